//! Per-session token storage

use crate::error::{ClientError, Result};
use crate::types::SessionToken;
use std::sync::OnceLock;

/// Token record owned by exactly one session
///
/// Written once by the authenticator, read by every request afterwards. Nothing
/// outside the crate can reach it.
#[derive(Default)]
pub(crate) struct TokenStore {
    token: OnceLock<SessionToken>,
}

impl TokenStore {
    /// Create an empty token store
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the session token
    pub fn get(&self) -> Result<&SessionToken> {
        self.token.get().ok_or_else(|| {
            ClientError::Internal("token store read before authentication completed".to_string())
        })
    }

    /// Commit the session token
    pub fn set_token(&self, token: SessionToken) -> Result<()> {
        if token.access_token.is_empty() {
            return Err(ClientError::InvalidResponse(
                "token endpoint returned an empty access_token".to_string(),
            ));
        }

        self.token
            .set(token)
            .map_err(|_| ClientError::Internal("session token committed twice".to_string()))
    }
}
