//! Type definitions for authentication

use serde::Deserialize;

/// Bearer token held by a session
#[derive(Clone)]
pub(crate) struct SessionToken {
    pub access_token: String,
    /// Lifetime reported by the token endpoint, if any. Recorded only; nothing refreshes on it.
    pub expires_in_secs: Option<u64>,
    pub issued_at_secs: i64,
}

impl SessionToken {
    pub fn new(access_token: String, expires_in_secs: Option<u64>) -> Self {
        let issued_at_secs = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs() as i64)
            .unwrap_or_default();

        Self {
            access_token,
            expires_in_secs,
            issued_at_secs,
        }
    }

    pub fn expires_at_secs(&self) -> Option<i64> {
        self.expires_in_secs
            .map(|secs| self.issued_at_secs + secs as i64)
    }
}

impl std::fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionToken")
            .field("access_token", &"<redacted>")
            .field("expires_in_secs", &self.expires_in_secs)
            .field("issued_at_secs", &self.issued_at_secs)
            .finish()
    }
}

/// Token endpoint reply. Success and failure share one shape so a single parse covers both.
#[derive(Debug, Deserialize)]
pub(crate) struct TokenEndpointResponse {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub expires_in: Option<u64>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub error_description: Option<String>,
}
