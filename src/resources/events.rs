//! Event operations.

use crate::dto::{EventQuery, EventRepresentation};
use crate::error::Result;
use crate::executor::{ApiRequest, RequestExecutor};

use super::{required, ADMIN, REALMS};

/// `client.events()`
#[derive(Clone)]
pub struct Events {
    executor: RequestExecutor,
}

impl Events {
    pub(crate) fn new(executor: RequestExecutor) -> Self {
        Self { executor }
    }

    /// User events recorded by the realm, newest first
    pub async fn find(&self, realm_name: &str, query: &EventQuery) -> Result<Vec<EventRepresentation>> {
        let realm_name = required(realm_name, "realm name")?;
        self.executor
            .fetch(ApiRequest::get(&[ADMIN, REALMS, realm_name, "events"]).query(query.pairs()))
            .await
    }
}
