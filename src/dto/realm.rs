//! Realm representation.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A realm as exchanged with `/admin/realms`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RealmRepresentation {
    /// Internal identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Realm name, unique on the server.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub realm: Option<String>,
    /// Display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Whether the realm is enabled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    /// Fields not modelled above.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RealmRepresentation {
    /// Minimal realm with just a name.
    pub fn new(realm: impl Into<String>) -> Self {
        Self {
            realm: Some(realm.into()),
            ..Self::default()
        }
    }
}
