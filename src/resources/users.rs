//! User operations.

use crate::dto::{CredentialRepresentation, UserQuery, UserRepresentation};
use crate::error::Result;
use crate::executor::{ApiRequest, RequestExecutor};
use tracing::debug;

use super::{required, required_field, UserGroups, UserRoleMappings, ADMIN, REALMS};

/// `client.users()`
#[derive(Clone)]
pub struct Users {
    executor: RequestExecutor,
    role_mappings: UserRoleMappings,
    groups: UserGroups,
}

impl Users {
    pub(crate) fn new(executor: RequestExecutor) -> Self {
        Self {
            role_mappings: UserRoleMappings::new(executor.clone()),
            groups: UserGroups::new(executor.clone()),
            executor,
        }
    }

    /// Roles mapped to a user
    pub fn role_mappings(&self) -> &UserRoleMappings {
        &self.role_mappings
    }

    /// Groups a user belongs to
    pub fn groups(&self) -> &UserGroups {
        &self.groups
    }

    /// List the realm's users, optionally filtered
    pub async fn find(&self, realm_name: &str, query: &UserQuery) -> Result<Vec<UserRepresentation>> {
        let realm_name = required(realm_name, "realm name")?;
        self.executor
            .fetch(ApiRequest::get(&[ADMIN, REALMS, realm_name, "users"]).query(query.pairs()))
            .await
    }

    /// Get one user by id
    pub async fn find_one(&self, realm_name: &str, user_id: &str) -> Result<UserRepresentation> {
        let realm_name = required(realm_name, "realm name")?;
        let user_id = required(user_id, "user id")?;
        self.executor
            .fetch(ApiRequest::get(&[ADMIN, REALMS, realm_name, "users", user_id]))
            .await
    }

    /// Create a user and return it as stored by the server
    ///
    /// The username filter matches by substring, so the new user's id is taken
    /// from the `Location` header instead.
    pub async fn create(&self, realm_name: &str, user: &UserRepresentation) -> Result<UserRepresentation> {
        let realm_name = required(realm_name, "realm name")?;
        let request = ApiRequest::post(&[ADMIN, REALMS, realm_name, "users"]).json(user)?;

        self.executor
            .create_then_fetch(request, |created| async move {
                let user_id = created.created_id()?;
                debug!(realm = %realm_name, user_id = %user_id, "User created, reading it back");
                self.find_one(realm_name, &user_id).await
            })
            .await
    }

    /// Replace a user; `user.id` selects which one
    pub async fn update(&self, realm_name: &str, user: &UserRepresentation) -> Result<()> {
        let realm_name = required(realm_name, "realm name")?;
        let user_id = required_field(&user.id, "user id")?;
        self.executor
            .send(ApiRequest::put(&[ADMIN, REALMS, realm_name, "users", user_id]).json(user)?)
            .await
    }

    /// Delete a user
    pub async fn remove(&self, realm_name: &str, user_id: &str) -> Result<()> {
        let realm_name = required(realm_name, "realm name")?;
        let user_id = required(user_id, "user id")?;
        self.executor
            .send(ApiRequest::delete(&[ADMIN, REALMS, realm_name, "users", user_id]))
            .await
    }

    /// Set a new password for a user
    pub async fn reset_password(
        &self,
        realm_name: &str,
        user_id: &str,
        credential: &CredentialRepresentation,
    ) -> Result<()> {
        let realm_name = required(realm_name, "realm name")?;
        let user_id = required(user_id, "user id")?;
        self.executor
            .send(
                ApiRequest::put(&[ADMIN, REALMS, realm_name, "users", user_id, "reset-password"])
                    .json(credential)?,
            )
            .await
    }
}
