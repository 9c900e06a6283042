//! Authentication against the server's token endpoint

use crate::config::Settings;
use crate::error::{ClientError, Result};
use crate::executor::Session;
use crate::types::*;
use reqwest::header::ACCEPT;
use tracing::{debug, info, warn};

/// Populate the session's token store
///
/// A non-empty `settings.access_token` is committed as is and no request is
/// made. Otherwise a single password grant is performed against
/// `{base_url}/realms/{realm_name}/protocol/openid-connect/token`.
///
/// Called exactly once per session, before the client handle is handed out.
pub(crate) async fn authenticate(session: &Session, settings: &Settings) -> Result<()> {
    if let Some(token) = settings.preset_token() {
        debug!(base_url = %session.base_url(), "Using pre-supplied access token");
        return session
            .tokens()
            .set_token(SessionToken::new(token.to_string(), None));
    }

    let token = request_token(session, settings).await?;
    info!(
        base_url = %session.base_url(),
        realm = %settings.realm_name,
        client_id = %settings.client_id,
        expires_at = ?token.expires_at_secs(),
        "Authenticated against token endpoint"
    );

    session.tokens().set_token(token)
}

/// Perform the password grant and return the issued token
async fn request_token(session: &Session, settings: &Settings) -> Result<SessionToken> {
    let url = session.endpoint(&[
        "realms",
        settings.realm_name.as_str(),
        "protocol",
        "openid-connect",
        "token",
    ])?;

    let mut form = vec![
        ("username", settings.username.as_deref().unwrap_or_default()),
        ("password", settings.password.as_deref().unwrap_or_default()),
        ("grant_type", settings.grant_type.as_str()),
        ("client_id", settings.client_id.as_str()),
    ];
    if let Some(secret) = settings.client_secret.as_deref() {
        form.push(("client_secret", secret));
    }

    debug!(url = %url, grant_type = %settings.grant_type, "Requesting access token");

    let response = session
        .http()
        .post(url)
        .header(ACCEPT, "application/json")
        .form(&form)
        .send()
        .await?;

    let status = response.status();
    let body = response.bytes().await?;

    match serde_json::from_slice::<TokenEndpointResponse>(&body) {
        Ok(TokenEndpointResponse {
            access_token: Some(access_token),
            expires_in,
            ..
        }) if status.is_success() => Ok(SessionToken::new(access_token, expires_in)),
        Ok(reply) => {
            warn!(
                status = %status,
                error = ?reply.error,
                error_description = ?reply.error_description,
                "Token request rejected"
            );
            Err(ClientError::Authentication {
                error: reply.error,
                error_description: reply.error_description,
            })
        }
        Err(e) => {
            let text = String::from_utf8_lossy(&body).into_owned();
            warn!(status = %status, error = %e, "Token endpoint returned a non-JSON body");
            Err(ClientError::Authentication {
                error: None,
                error_description: (!text.trim().is_empty()).then_some(text),
            })
        }
    }
}
