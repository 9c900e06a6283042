//! Client settings

use crate::error::{ClientError, Result};
use reqwest::Url;
use serde::Deserialize;
use std::time::Duration;

/// Settings used to build and authenticate a [`KeycloakAdminClient`](crate::KeycloakAdminClient)
///
/// Read once by the client factory and never modified afterwards. Field names
/// also accept the camelCase spelling used by Keycloak tooling (`baseUrl`,
/// `accessToken`, ...) when deserialized.
#[derive(Clone, Deserialize)]
pub struct Settings {
    /// Server base URL, including any context path (e.g. `http://localhost:8080/auth`)
    #[serde(alias = "baseUrl")]
    pub base_url: String,

    /// Username for the password grant
    #[serde(default)]
    pub username: Option<String>,

    /// Password for the password grant
    #[serde(default)]
    pub password: Option<String>,

    /// OAuth2 grant type
    /// Default: "password"
    #[serde(default = "default_grant_type", alias = "grantType")]
    pub grant_type: String,

    /// Client registered with the server used to log in
    /// Default: "admin-cli"
    #[serde(default = "default_client_id", alias = "clientId")]
    pub client_id: String,

    /// Secret for confidential login clients
    #[serde(default, alias = "clientSecret")]
    pub client_secret: Option<String>,

    /// Realm whose token endpoint is used to log in
    /// Default: "master"
    #[serde(default = "default_realm_name", alias = "realmName")]
    pub realm_name: String,

    /// Already-issued bearer token; when set the token endpoint is never called
    #[serde(default, alias = "accessToken")]
    pub access_token: Option<String>,

    /// Per-request transport timeout in milliseconds. No timeout when unset.
    #[serde(default, alias = "requestTimeoutMs")]
    pub request_timeout_ms: Option<u64>,
}

fn default_grant_type() -> String {
    "password".to_string()
}

fn default_client_id() -> String {
    "admin-cli".to_string()
}

fn default_realm_name() -> String {
    "master".to_string()
}

impl Settings {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            username: None,
            password: None,
            grant_type: default_grant_type(),
            client_id: default_client_id(),
            client_secret: None,
            realm_name: default_realm_name(),
            access_token: None,
            request_timeout_ms: None,
        }
    }

    /// Settings for a password grant with the default `admin-cli` client in `master`
    pub fn password(
        base_url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            username: Some(username.into()),
            password: Some(password.into()),
            ..Self::new(base_url)
        }
    }

    /// Settings that skip the token endpoint and use `access_token` as is
    pub fn with_token(base_url: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            access_token: Some(access_token.into()),
            ..Self::new(base_url)
        }
    }

    pub fn with_client_id(mut self, client_id: impl Into<String>) -> Self {
        self.client_id = client_id.into();
        self
    }

    pub fn with_client_secret(mut self, client_secret: impl Into<String>) -> Self {
        self.client_secret = Some(client_secret.into());
        self
    }

    pub fn with_grant_type(mut self, grant_type: impl Into<String>) -> Self {
        self.grant_type = grant_type.into();
        self
    }

    pub fn with_realm_name(mut self, realm_name: impl Into<String>) -> Self {
        self.realm_name = realm_name.into();
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout_ms = Some(u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX));
        self
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_ms.map(Duration::from_millis)
    }

    /// Pre-supplied token, if one was given and is not empty
    pub(crate) fn preset_token(&self) -> Option<&str> {
        self.access_token.as_deref().filter(|t| !t.is_empty())
    }

    /// Check the settings and return the parsed base URL
    pub fn validate(&self) -> Result<Url> {
        if self.base_url.trim().is_empty() {
            return Err(ClientError::Configuration("base_url is required".to_string()));
        }

        let url = Url::parse(&self.base_url)
            .map_err(|e| ClientError::Configuration(format!("invalid base_url: {e}")))?;

        if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
            return Err(ClientError::Configuration(format!(
                "base_url must be an http(s) URL: {}",
                self.base_url
            )));
        }

        if self.request_timeout_ms == Some(0) {
            return Err(ClientError::Configuration(
                "request timeout must be greater than zero".to_string(),
            ));
        }

        if self.preset_token().is_some() {
            return Ok(url);
        }

        let missing = [
            ("username", self.username.as_deref().unwrap_or_default()),
            ("password", self.password.as_deref().unwrap_or_default()),
            ("grant_type", self.grant_type.as_str()),
            ("client_id", self.client_id.as_str()),
            ("realm_name", self.realm_name.as_str()),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(name, _)| name)
        .collect::<Vec<_>>();

        if !missing.is_empty() {
            return Err(ClientError::Configuration(format!(
                "missing {} (required unless access_token is supplied)",
                missing.join(", ")
            )));
        }

        Ok(url)
    }
}

impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let redact = |value: &Option<String>| value.as_ref().map(|_| "<redacted>");

        f.debug_struct("Settings")
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .field("password", &redact(&self.password))
            .field("grant_type", &self.grant_type)
            .field("client_id", &self.client_id)
            .field("client_secret", &redact(&self.client_secret))
            .field("realm_name", &self.realm_name)
            .field("access_token", &redact(&self.access_token))
            .field("request_timeout_ms", &self.request_timeout_ms)
            .finish()
    }
}
