//! Realm and client role operations.

use crate::dto::RoleRepresentation;
use crate::error::Result;
use crate::executor::{ApiRequest, RequestExecutor};

use super::{required, required_field, ADMIN, REALMS};

/// `client.realms().roles()`
#[derive(Clone)]
pub struct RealmRoles {
    executor: RequestExecutor,
}

impl RealmRoles {
    pub(crate) fn new(executor: RequestExecutor) -> Self {
        Self { executor }
    }

    /// List the realm's roles
    pub async fn find(&self, realm_name: &str) -> Result<Vec<RoleRepresentation>> {
        let realm_name = required(realm_name, "realm name")?;
        self.executor
            .fetch(ApiRequest::get(&[ADMIN, REALMS, realm_name, "roles"]))
            .await
    }

    /// Get one realm role by name
    pub async fn find_one(&self, realm_name: &str, role_name: &str) -> Result<RoleRepresentation> {
        let realm_name = required(realm_name, "realm name")?;
        let role_name = required(role_name, "role name")?;
        self.executor
            .fetch(ApiRequest::get(&[ADMIN, REALMS, realm_name, "roles", role_name]))
            .await
    }

    /// Create a realm role and return it as stored by the server
    pub async fn create(&self, realm_name: &str, role: &RoleRepresentation) -> Result<RoleRepresentation> {
        let realm_name = required(realm_name, "realm name")?;
        let role_name = required_field(&role.name, "role name")?;
        let request = ApiRequest::post(&[ADMIN, REALMS, realm_name, "roles"]).json(role)?;

        self.executor
            .create_then_fetch(request, |_| self.find_one(realm_name, role_name))
            .await
    }
}

/// `client.clients().roles()`
///
/// `id` is the client's server-assigned id, not its `clientId`.
#[derive(Clone)]
pub struct ClientRoles {
    executor: RequestExecutor,
}

impl ClientRoles {
    pub(crate) fn new(executor: RequestExecutor) -> Self {
        Self { executor }
    }

    /// List the client's roles
    pub async fn find(&self, realm_name: &str, id: &str) -> Result<Vec<RoleRepresentation>> {
        let realm_name = required(realm_name, "realm name")?;
        let id = required(id, "client id")?;
        self.executor
            .fetch(ApiRequest::get(&[ADMIN, REALMS, realm_name, "clients", id, "roles"]))
            .await
    }

    /// Get one client role by name
    pub async fn find_one(&self, realm_name: &str, id: &str, role_name: &str) -> Result<RoleRepresentation> {
        let realm_name = required(realm_name, "realm name")?;
        let id = required(id, "client id")?;
        let role_name = required(role_name, "role name")?;
        self.executor
            .fetch(ApiRequest::get(&[
                ADMIN, REALMS, realm_name, "clients", id, "roles", role_name,
            ]))
            .await
    }

    /// Create a client role and return it as stored by the server
    pub async fn create(
        &self,
        realm_name: &str,
        id: &str,
        role: &RoleRepresentation,
    ) -> Result<RoleRepresentation> {
        let realm_name = required(realm_name, "realm name")?;
        let id = required(id, "client id")?;
        let role_name = required_field(&role.name, "role name")?;
        let request =
            ApiRequest::post(&[ADMIN, REALMS, realm_name, "clients", id, "roles"]).json(role)?;

        self.executor
            .create_then_fetch(request, |_| self.find_one(realm_name, id, role_name))
            .await
    }
}
