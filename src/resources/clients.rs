//! Client operations.

use crate::dto::{ClientQuery, ClientRepresentation, CredentialRepresentation};
use crate::error::{ClientError, Result};
use crate::executor::{ApiRequest, RequestExecutor};
use tracing::debug;

use super::{required, required_field, ClientRoleMapper, ClientRoles, ADMIN, REALMS};

/// `client.clients()`
#[derive(Clone)]
pub struct Clients {
    executor: RequestExecutor,
    roles: ClientRoles,
    maps: ClientRoleMapper,
}

impl Clients {
    pub(crate) fn new(executor: RequestExecutor) -> Self {
        Self {
            roles: ClientRoles::new(executor.clone()),
            maps: ClientRoleMapper::new(executor.clone()),
            executor,
        }
    }

    /// Roles defined by a client
    pub fn roles(&self) -> &ClientRoles {
        &self.roles
    }

    /// Client role assignments to users
    pub fn maps(&self) -> &ClientRoleMapper {
        &self.maps
    }

    /// List the realm's clients, optionally filtered
    pub async fn find(&self, realm_name: &str, query: &ClientQuery) -> Result<Vec<ClientRepresentation>> {
        let realm_name = required(realm_name, "realm name")?;
        self.executor
            .fetch(ApiRequest::get(&[ADMIN, REALMS, realm_name, "clients"]).query(query.pairs()))
            .await
    }

    /// Get one client by its server-assigned id
    pub async fn find_one(&self, realm_name: &str, id: &str) -> Result<ClientRepresentation> {
        let realm_name = required(realm_name, "realm name")?;
        let id = required(id, "client id")?;
        self.executor
            .fetch(ApiRequest::get(&[ADMIN, REALMS, realm_name, "clients", id]))
            .await
    }

    /// Create a client and return it as stored by the server
    ///
    /// Read back through the `clientId` filter, which is unique within a realm.
    pub async fn create(&self, realm_name: &str, client: &ClientRepresentation) -> Result<ClientRepresentation> {
        let realm_name = required(realm_name, "realm name")?;
        let client_id = required_field(&client.client_id, "clientId")?;
        let request = ApiRequest::post(&[ADMIN, REALMS, realm_name, "clients"]).json(client)?;

        self.executor
            .create_then_fetch(request, |_| async move {
                debug!(realm = %realm_name, client_id = %client_id, "Client created, reading it back");
                self.find(realm_name, &ClientQuery::by_client_id(client_id))
                    .await?
                    .into_iter()
                    .find(|c| c.client_id.as_deref() == Some(client_id))
                    .ok_or_else(|| {
                        ClientError::InvalidResponse(format!("created client {client_id} not found"))
                    })
            })
            .await
    }

    /// Replace a client; `client.id` selects which one
    pub async fn update(&self, realm_name: &str, client: &ClientRepresentation) -> Result<()> {
        let realm_name = required(realm_name, "realm name")?;
        let id = required_field(&client.id, "client id")?;
        self.executor
            .send(ApiRequest::put(&[ADMIN, REALMS, realm_name, "clients", id]).json(client)?)
            .await
    }

    /// Delete a client by its server-assigned id
    pub async fn remove(&self, realm_name: &str, id: &str) -> Result<()> {
        let realm_name = required(realm_name, "realm name")?;
        let id = required(id, "client id")?;
        self.executor
            .send(ApiRequest::delete(&[ADMIN, REALMS, realm_name, "clients", id]))
            .await
    }

    /// Current secret of a confidential client
    pub async fn client_secret(&self, realm_name: &str, id: &str) -> Result<CredentialRepresentation> {
        let realm_name = required(realm_name, "realm name")?;
        let id = required(id, "client id")?;
        self.executor
            .fetch(ApiRequest::get(&[ADMIN, REALMS, realm_name, "clients", id, "client-secret"]))
            .await
    }
}
