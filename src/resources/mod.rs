//! Resource namespaces bound to a client handle.
//!
//! Each namespace holds a clone of the handle's [`RequestExecutor`](crate::executor::RequestExecutor)
//! and maps its operations onto admin endpoints below `{base_url}/admin/realms`.

pub mod clients;
pub mod events;
pub mod groups;
pub mod realms;
pub mod role_mappings;
pub mod roles;
pub mod users;

pub use clients::Clients;
pub use events::Events;
pub use groups::{GroupMembers, Groups, UserGroups};
pub use realms::Realms;
pub use role_mappings::{ClientRoleMapper, RealmRoleMapper, UserRoleMappings};
pub use roles::{ClientRoles, RealmRoles};
pub use users::Users;

use crate::error::{ClientError, Result};

pub(crate) const ADMIN: &str = "admin";
pub(crate) const REALMS: &str = "realms";

/// Reject an identifier that would not address its own path segment
///
/// Empty values are missing. `.` and `..` are dropped or resolved by URL
/// normalization, so they would reach a different endpoint.
pub(crate) fn required<'a>(value: &'a str, what: &str) -> Result<&'a str> {
    if value.trim().is_empty() {
        return Err(ClientError::Validation(format!("{what} is missing")));
    }
    if matches!(value, "." | "..") {
        return Err(ClientError::Validation(format!("{what} is invalid")));
    }
    Ok(value)
}

/// Same as [`required`] for optional representation fields
pub(crate) fn required_field<'a>(value: &'a Option<String>, what: &str) -> Result<&'a str> {
    required(value.as_deref().unwrap_or_default(), what)
}
