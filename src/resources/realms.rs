//! Realm operations.

use crate::dto::RealmRepresentation;
use crate::error::Result;
use crate::executor::{ApiRequest, RequestExecutor};
use tracing::debug;

use super::{required, required_field, RealmRoleMapper, RealmRoles, ADMIN, REALMS};

/// `client.realms()`
#[derive(Clone)]
pub struct Realms {
    executor: RequestExecutor,
    roles: RealmRoles,
    maps: RealmRoleMapper,
}

impl Realms {
    pub(crate) fn new(executor: RequestExecutor) -> Self {
        Self {
            roles: RealmRoles::new(executor.clone()),
            maps: RealmRoleMapper::new(executor.clone()),
            executor,
        }
    }

    /// Realm-level roles
    pub fn roles(&self) -> &RealmRoles {
        &self.roles
    }

    /// Realm role assignments to users
    pub fn maps(&self) -> &RealmRoleMapper {
        &self.maps
    }

    /// List every realm visible to the authenticated user
    pub async fn find(&self) -> Result<Vec<RealmRepresentation>> {
        self.executor.fetch(ApiRequest::get(&[ADMIN, REALMS])).await
    }

    /// Get one realm by name
    pub async fn find_one(&self, realm_name: &str) -> Result<RealmRepresentation> {
        let realm_name = required(realm_name, "realm name")?;
        self.executor
            .fetch(ApiRequest::get(&[ADMIN, REALMS, realm_name]))
            .await
    }

    /// Create (import) a realm and return it as stored by the server
    ///
    /// The server answers with an empty body, so the realm is read back by the
    /// name it was submitted with.
    pub async fn create(&self, realm: &RealmRepresentation) -> Result<RealmRepresentation> {
        let realm_name = required_field(&realm.realm, "realm name")?;
        let request = ApiRequest::post(&[ADMIN, REALMS]).json(realm)?;

        self.executor
            .create_then_fetch(request, |_| {
                debug!(realm = %realm_name, "Realm created, reading it back");
                self.find_one(realm_name)
            })
            .await
    }

    /// Update a realm; only the fields present in `realm` change
    pub async fn update(&self, realm_name: &str, realm: &RealmRepresentation) -> Result<()> {
        let realm_name = required(realm_name, "realm name")?;
        self.executor
            .send(ApiRequest::put(&[ADMIN, REALMS, realm_name]).json(realm)?)
            .await
    }

    /// Delete a realm
    pub async fn remove(&self, realm_name: &str) -> Result<()> {
        let realm_name = required(realm_name, "realm name")?;
        self.executor
            .send(ApiRequest::delete(&[ADMIN, REALMS, realm_name]))
            .await
    }
}
