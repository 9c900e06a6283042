//! Error types for the Keycloak admin client

use serde_json::Value;
use thiserror::Error;

/// Client error types
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The token endpoint refused the grant. Both fields are the server's, untouched.
    #[error("Authentication failed: {}", describe_grant_error(.error, .error_description))]
    Authentication {
        error: Option<String>,
        error_description: Option<String>,
    },

    /// An admin call answered with a status other than the one it expects.
    #[error("API request failed with status {status}: {body}")]
    Api { status: u16, body: ErrorBody },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ClientError {
    /// Server-reported message for `Api` and `Authentication` failures.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ClientError::Api { body, .. } => body.message(),
            ClientError::Authentication {
                error,
                error_description,
            } => error_description.as_deref().or(error.as_deref()),
            _ => None,
        }
    }

    /// HTTP status of an `Api` failure.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

fn describe_grant_error(error: &Option<String>, description: &Option<String>) -> String {
    match (error, description) {
        (Some(e), Some(d)) => format!("{e} ({d})"),
        (Some(e), None) => e.clone(),
        (None, Some(d)) => d.clone(),
        (None, None) => "no error reported by token endpoint".to_string(),
    }
}

/// Body of a failed admin call, kept exactly as the server sent it.
///
/// Keycloak is not consistent here: most endpoints answer with a JSON object
/// such as `{"errorMessage": "..."}` or `{"error": "..."}`, some with a bare JSON
/// string, and proxies in front of it may answer with plain text.
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorBody {
    Json(Value),
    Text(String),
    Empty,
}

impl ErrorBody {
    pub(crate) fn from_bytes(bytes: &[u8]) -> Self {
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return ErrorBody::Empty;
        }

        match serde_json::from_slice(bytes) {
            Ok(value) => ErrorBody::Json(value),
            Err(_) => ErrorBody::Text(String::from_utf8_lossy(bytes).into_owned()),
        }
    }

    /// Best-effort human readable message: `errorMessage`, then `error`, then a bare string.
    pub fn message(&self) -> Option<&str> {
        match self {
            ErrorBody::Json(Value::String(s)) => Some(s),
            ErrorBody::Json(Value::Object(map)) => ["errorMessage", "error", "error_description"]
                .iter()
                .find_map(|key| map.get(*key).and_then(Value::as_str)),
            ErrorBody::Json(_) => None,
            ErrorBody::Text(s) => Some(s),
            ErrorBody::Empty => None,
        }
    }
}

impl std::fmt::Display for ErrorBody {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorBody::Json(value) => write!(f, "{value}"),
            ErrorBody::Text(text) => f.write_str(text),
            ErrorBody::Empty => f.write_str("<empty body>"),
        }
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;
