//! Admin API representations.
//!
//! Field names follow the server's camelCase JSON. Every representation keeps
//! the fields it does not model in `extra`, so a value read from the server can
//! be modified and sent back without dropping anything.

pub mod client;
pub mod event;
pub mod group;
pub mod query;
pub mod realm;
pub mod role;
pub mod user;

pub use client::ClientRepresentation;
pub use event::EventRepresentation;
pub use group::GroupRepresentation;
pub use query::{ClientQuery, EventQuery, PageQuery, UserQuery};
pub use realm::RealmRepresentation;
pub use role::{ClientMappingsRepresentation, MappingsRepresentation, RoleRepresentation};
pub use user::{CredentialRepresentation, UserRepresentation};
