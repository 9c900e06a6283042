//! Role mapping operations: assigning realm and client roles to users.

use crate::dto::{MappingsRepresentation, RoleRepresentation};
use crate::error::{ClientError, Result};
use crate::executor::{ApiRequest, RequestExecutor};
use tracing::debug;

use super::{required, ADMIN, REALMS};

fn require_roles(roles: &[RoleRepresentation]) -> Result<&[RoleRepresentation]> {
    if roles.is_empty() {
        return Err(ClientError::Validation("roles are missing".to_string()));
    }
    Ok(roles)
}

/// `client.realms().maps()`
#[derive(Clone)]
pub struct RealmRoleMapper {
    executor: RequestExecutor,
}

impl RealmRoleMapper {
    pub(crate) fn new(executor: RequestExecutor) -> Self {
        Self { executor }
    }

    /// Assign realm roles to a user
    pub async fn map(&self, realm_name: &str, user_id: &str, roles: &[RoleRepresentation]) -> Result<()> {
        let realm_name = required(realm_name, "realm name")?;
        let user_id = required(user_id, "user id")?;
        let roles = require_roles(roles)?;

        debug!(realm = %realm_name, user_id = %user_id, count = roles.len(), "Mapping realm roles");
        self.executor
            .send(
                ApiRequest::post(&[ADMIN, REALMS, realm_name, "users", user_id, "role-mappings", "realm"])
                    .expect_status(reqwest::StatusCode::NO_CONTENT)
                    .json(roles)?,
            )
            .await
    }

    /// Remove realm roles from a user
    pub async fn unmap(&self, realm_name: &str, user_id: &str, roles: &[RoleRepresentation]) -> Result<()> {
        let realm_name = required(realm_name, "realm name")?;
        let user_id = required(user_id, "user id")?;
        let roles = require_roles(roles)?;

        debug!(realm = %realm_name, user_id = %user_id, count = roles.len(), "Unmapping realm roles");
        self.executor
            .send(
                ApiRequest::delete(&[ADMIN, REALMS, realm_name, "users", user_id, "role-mappings", "realm"])
                    .json(roles)?,
            )
            .await
    }
}

/// `client.clients().maps()`
///
/// `client_id` is the server-assigned id of the client owning the roles.
#[derive(Clone)]
pub struct ClientRoleMapper {
    executor: RequestExecutor,
}

impl ClientRoleMapper {
    pub(crate) fn new(executor: RequestExecutor) -> Self {
        Self { executor }
    }

    /// Assign client roles to a user
    pub async fn map(
        &self,
        realm_name: &str,
        user_id: &str,
        client_id: &str,
        roles: &[RoleRepresentation],
    ) -> Result<()> {
        let realm_name = required(realm_name, "realm name")?;
        let user_id = required(user_id, "user id")?;
        let client_id = required(client_id, "client id")?;
        let roles = require_roles(roles)?;

        debug!(realm = %realm_name, user_id = %user_id, client_id = %client_id, count = roles.len(), "Mapping client roles");
        self.executor
            .send(
                ApiRequest::post(&[
                    ADMIN, REALMS, realm_name, "users", user_id, "role-mappings", "clients", client_id,
                ])
                .expect_status(reqwest::StatusCode::NO_CONTENT)
                .json(roles)?,
            )
            .await
    }

    /// Remove client roles from a user
    pub async fn unmap(
        &self,
        realm_name: &str,
        user_id: &str,
        client_id: &str,
        roles: &[RoleRepresentation],
    ) -> Result<()> {
        let realm_name = required(realm_name, "realm name")?;
        let user_id = required(user_id, "user id")?;
        let client_id = required(client_id, "client id")?;
        let roles = require_roles(roles)?;

        debug!(realm = %realm_name, user_id = %user_id, client_id = %client_id, count = roles.len(), "Unmapping client roles");
        self.executor
            .send(
                ApiRequest::delete(&[
                    ADMIN, REALMS, realm_name, "users", user_id, "role-mappings", "clients", client_id,
                ])
                .json(roles)?,
            )
            .await
    }
}

/// `client.users().role_mappings()`
#[derive(Clone)]
pub struct UserRoleMappings {
    executor: RequestExecutor,
}

impl UserRoleMappings {
    pub(crate) fn new(executor: RequestExecutor) -> Self {
        Self { executor }
    }

    /// All realm and client roles mapped to a user
    pub async fn find(&self, realm_name: &str, user_id: &str) -> Result<MappingsRepresentation> {
        let realm_name = required(realm_name, "realm name")?;
        let user_id = required(user_id, "user id")?;
        self.executor
            .fetch(ApiRequest::get(&[ADMIN, REALMS, realm_name, "users", user_id, "role-mappings"]))
            .await
    }
}
