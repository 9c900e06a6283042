//! Client handle and factory

use crate::auth_client::authenticate;
use crate::config::Settings;
use crate::error::Result;
use crate::executor::{RequestExecutor, Session};
use crate::resources::{Clients, Events, Groups, Realms, Users};
use std::sync::Arc;
use tracing::debug;

/// Authenticated handle to a Keycloak server's admin API
///
/// Only obtainable through [`KeycloakAdminClient::connect`] (or
/// [`create_client`]), which returns after authentication settled, so every
/// operation on a handle runs with a committed bearer token. Clones share the
/// same session.
#[derive(Clone)]
pub struct KeycloakAdminClient {
    executor: RequestExecutor,
    realms: Realms,
    clients: Clients,
    users: Users,
    groups: Groups,
    events: Events,
}

impl KeycloakAdminClient {
    /// Build a client and authenticate it
    ///
    /// # Arguments
    /// * `settings` - Server location and credentials (or a pre-issued token)
    ///
    /// # Errors
    /// * `Configuration` for unusable settings
    /// * `Transport` when the token endpoint cannot be reached
    /// * `Authentication` when the server refuses the credentials
    pub async fn connect(settings: Settings) -> Result<Self> {
        let session = Arc::new(Session::new(&settings)?);
        let client = Self::bind(RequestExecutor::new(Arc::clone(&session)));

        debug!(base_url = %session.base_url(), "Client bound, authenticating");
        authenticate(&session, &settings).await?;

        Ok(client)
    }

    fn bind(executor: RequestExecutor) -> Self {
        Self {
            realms: Realms::new(executor.clone()),
            clients: Clients::new(executor.clone()),
            users: Users::new(executor.clone()),
            groups: Groups::new(executor.clone()),
            events: Events::new(executor.clone()),
            executor,
        }
    }

    /// Base URL the client was created with, exactly as given
    pub fn base_url(&self) -> &str {
        self.executor.session().base_url()
    }

    pub fn realms(&self) -> &Realms {
        &self.realms
    }

    pub fn clients(&self) -> &Clients {
        &self.clients
    }

    pub fn users(&self) -> &Users {
        &self.users
    }

    pub fn groups(&self) -> &Groups {
        &self.groups
    }

    pub fn events(&self) -> &Events {
        &self.events
    }
}

impl std::fmt::Debug for KeycloakAdminClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeycloakAdminClient")
            .field("base_url", &self.base_url())
            .finish_non_exhaustive()
    }
}

/// Build and authenticate a [`KeycloakAdminClient`]
pub async fn create_client(settings: Settings) -> Result<KeycloakAdminClient> {
    KeycloakAdminClient::connect(settings).await
}
