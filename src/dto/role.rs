//! Role and role-mapping representations.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A realm or client role.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleRepresentation {
    /// Server-assigned identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Role name (unique within its realm or client).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Whether this is a composite role.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub composite: Option<bool>,
    /// Whether this is a client role.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_role: Option<bool>,
    /// Realm or client owning the role.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub container_id: Option<String>,
    /// Fields not modelled above.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RoleRepresentation {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }
}

/// All role mappings of a user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MappingsRepresentation {
    /// Realm roles.
    #[serde(default)]
    pub realm_mappings: Vec<RoleRepresentation>,
    /// Client roles keyed by client ID.
    #[serde(default)]
    pub client_mappings: HashMap<String, ClientMappingsRepresentation>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Client roles mapped to a user for one client.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientMappingsRepresentation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client: Option<String>,
    #[serde(default)]
    pub mappings: Vec<RoleRepresentation>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
