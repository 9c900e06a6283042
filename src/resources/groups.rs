//! Group operations.

use crate::dto::{GroupRepresentation, PageQuery, UserRepresentation};
use crate::error::Result;
use crate::executor::{ApiRequest, RequestExecutor};

use super::{required, ADMIN, REALMS};

/// `client.groups()`
#[derive(Clone)]
pub struct Groups {
    executor: RequestExecutor,
    members: GroupMembers,
}

impl Groups {
    pub(crate) fn new(executor: RequestExecutor) -> Self {
        Self {
            members: GroupMembers::new(executor.clone()),
            executor,
        }
    }

    pub fn members(&self) -> &GroupMembers {
        &self.members
    }

    /// Group hierarchy of the realm; only names, ids and paths are filled in
    pub async fn find(&self, realm_name: &str) -> Result<Vec<GroupRepresentation>> {
        let realm_name = required(realm_name, "realm name")?;
        self.executor
            .fetch(ApiRequest::get(&[ADMIN, REALMS, realm_name, "groups"]))
            .await
    }
}

/// `client.groups().members()`
#[derive(Clone)]
pub struct GroupMembers {
    executor: RequestExecutor,
}

impl GroupMembers {
    pub(crate) fn new(executor: RequestExecutor) -> Self {
        Self { executor }
    }

    /// Users in a group, paginated (the server caps `max` at 100 by default)
    pub async fn find(&self, realm_name: &str, group_id: &str, page: &PageQuery) -> Result<Vec<UserRepresentation>> {
        let realm_name = required(realm_name, "realm name")?;
        let group_id = required(group_id, "group id")?;
        self.executor
            .fetch(
                ApiRequest::get(&[ADMIN, REALMS, realm_name, "groups", group_id, "members"])
                    .query(page.pairs()),
            )
            .await
    }
}

/// `client.users().groups()`
#[derive(Clone)]
pub struct UserGroups {
    executor: RequestExecutor,
}

impl UserGroups {
    pub(crate) fn new(executor: RequestExecutor) -> Self {
        Self { executor }
    }

    /// Groups a user is a direct member of
    pub async fn find(&self, realm_name: &str, user_id: &str) -> Result<Vec<GroupRepresentation>> {
        let realm_name = required(realm_name, "realm name")?;
        let user_id = required(user_id, "user id")?;
        self.executor
            .fetch(ApiRequest::get(&[ADMIN, REALMS, realm_name, "users", user_id, "groups"]))
            .await
    }
}
