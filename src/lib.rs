//! Keycloak Admin Rust Client
//!
//! A Rust client library for the Keycloak admin REST API, with bearer token
//! acquisition and propagation handled for the caller.
//!
//! ```no_run
//! use keycloak_admin_rs_client::{create_client, Settings};
//!
//! # async fn run() -> keycloak_admin_rs_client::Result<()> {
//! let settings = Settings::password("http://localhost:8080/auth", "admin", "admin");
//! let client = create_client(settings).await?;
//!
//! for realm in client.realms().find().await? {
//!     println!("{:?}", realm.realm);
//! }
//! # Ok(())
//! # }
//! ```

mod auth_client;
pub mod client;
pub mod config;
pub mod dto;
pub mod error;
mod executor;
pub mod resources;
mod token_store;
mod types;

pub use client::{create_client, KeycloakAdminClient};
pub use config::Settings;
pub use error::{ClientError, ErrorBody, Result};
