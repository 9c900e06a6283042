//! Request execution shared by every resource namespace
//!
//! Every admin call goes through [`RequestExecutor::execute`], which attaches the
//! session's bearer token, sends the request and turns the reply into either an
//! [`ApiResponse`] or a [`ClientError`].

use crate::config::Settings;
use crate::error::{ClientError, ErrorBody, Result};
use crate::token_store::TokenStore;
use reqwest::header::{ACCEPT, LOCATION};
use reqwest::{Client, Method, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, warn};

/// State owned by one client handle
pub(crate) struct Session {
    base_url: String,
    url: Url,
    http: Client,
    tokens: TokenStore,
}

impl Session {
    /// Build a session with an empty token store
    pub fn new(settings: &Settings) -> Result<Self> {
        let url = settings.validate()?;

        let mut builder = Client::builder();
        if let Some(timeout) = settings.request_timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            base_url: settings.base_url.clone(),
            url,
            http: builder.build()?,
            tokens: TokenStore::new(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn http(&self) -> &Client {
        &self.http
    }

    pub fn tokens(&self) -> &TokenStore {
        &self.tokens
    }

    /// Append percent-encoded path segments to the base URL
    pub fn endpoint<S: AsRef<str>>(&self, segments: &[S]) -> Result<Url> {
        let mut url = self.url.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::Configuration(format!("base_url cannot be a base: {}", self.base_url)))?
            .pop_if_empty()
            .extend(segments.iter().map(AsRef::as_ref));
        Ok(url)
    }
}

/// One admin call: method, path below the base URL, body, query and the status that means success
#[derive(Debug, Clone)]
pub(crate) struct ApiRequest {
    method: Method,
    segments: Vec<String>,
    query: Vec<(&'static str, String)>,
    body: Option<Value>,
    expected: StatusCode,
}

impl ApiRequest {
    fn new(method: Method, segments: &[&str], expected: StatusCode) -> Self {
        Self {
            method,
            segments: segments.iter().map(|s| s.to_string()).collect(),
            query: Vec::new(),
            body: None,
            expected,
        }
    }

    /// GET expecting 200
    pub fn get(segments: &[&str]) -> Self {
        Self::new(Method::GET, segments, StatusCode::OK)
    }

    /// POST expecting 201
    pub fn post(segments: &[&str]) -> Self {
        Self::new(Method::POST, segments, StatusCode::CREATED)
    }

    /// PUT expecting 204
    pub fn put(segments: &[&str]) -> Self {
        Self::new(Method::PUT, segments, StatusCode::NO_CONTENT)
    }

    /// DELETE expecting 204
    pub fn delete(segments: &[&str]) -> Self {
        Self::new(Method::DELETE, segments, StatusCode::NO_CONTENT)
    }

    pub fn expect_status(mut self, status: StatusCode) -> Self {
        self.expected = status;
        self
    }

    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }

    pub fn query(mut self, pairs: Vec<(&'static str, String)>) -> Self {
        self.query.extend(pairs);
        self
    }

    fn path(&self) -> String {
        format!("/{}", self.segments.join("/"))
    }
}

/// Successful reply
#[derive(Debug, Clone)]
pub(crate) struct ApiResponse {
    pub status: StatusCode,
    pub location: Option<String>,
    /// `None` when the server sent no body (typical for 201 and 204)
    pub body: Option<Value>,
}

impl ApiResponse {
    /// Decode the body, which must be present
    pub fn into_json<T: DeserializeOwned>(self) -> Result<T> {
        let body = self.body.ok_or_else(|| {
            ClientError::InvalidResponse(format!("expected a JSON body with status {}", self.status))
        })?;
        Ok(serde_json::from_value(body)?)
    }

    /// Identifier of a created resource: the last path segment of the `Location` header
    pub fn created_id(&self) -> Result<String> {
        let location = self.location.as_deref().ok_or_else(|| {
            ClientError::InvalidResponse("created resource has no Location header".to_string())
        })?;

        location
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .filter(|id| !id.is_empty())
            .map(str::to_string)
            .ok_or_else(|| {
                ClientError::InvalidResponse(format!("cannot read an id from Location: {location}"))
            })
    }
}

/// Sends admin requests with the session's bearer token
#[derive(Clone)]
pub(crate) struct RequestExecutor {
    session: Arc<Session>,
}

impl RequestExecutor {
    pub fn new(session: Arc<Session>) -> Self {
        Self { session }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Send `request` and map the reply against its expected status
    pub async fn execute(&self, request: ApiRequest) -> Result<ApiResponse> {
        let token = self.session.tokens().get()?;
        let url = self.session.endpoint(&request.segments[..])?;
        let path = request.path();

        let mut builder = self
            .session
            .http()
            .request(request.method.clone(), url)
            .bearer_auth(&token.access_token)
            .header(ACCEPT, "application/json");

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let location = response
            .headers()
            .get(LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let bytes = response.bytes().await?;

        debug!(method = %request.method, path = %path, status = %status, "Admin request completed");

        if status != request.expected {
            let body = ErrorBody::from_bytes(&bytes);
            warn!(
                method = %request.method,
                path = %path,
                status = %status,
                expected = %request.expected,
                body = %body,
                "Admin request failed"
            );
            return Err(ClientError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let body = if bytes.iter().all(u8::is_ascii_whitespace) {
            None
        } else {
            Some(serde_json::from_slice(&bytes)?)
        };

        Ok(ApiResponse {
            status,
            location,
            body,
        })
    }

    /// Send `request` and decode its JSON body
    pub async fn fetch<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T> {
        self.execute(request).await?.into_json()
    }

    /// Send `request`, discarding any body
    pub async fn send(&self, request: ApiRequest) -> Result<()> {
        self.execute(request).await.map(|_| ())
    }

    /// Fetch-after-write
    ///
    /// Sends `write` and, only once it succeeded, resolves with whatever
    /// `follow_up` reads back. Used for endpoints that answer a create with an
    /// empty body.
    pub async fn create_then_fetch<T, F, Fut>(&self, write: ApiRequest, follow_up: F) -> Result<T>
    where
        F: FnOnce(ApiResponse) -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let created = self.execute(write).await?;
        follow_up(created).await
    }
}
