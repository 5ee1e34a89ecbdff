//! Thin client for OpenStack identity, image and compute lookups.
//!
//! Authenticates against the identity service with tenant-scoped password
//! credentials, resolves a service endpoint from the returned catalog and
//! issues authenticated calls against it.
//!
//! ```no_run
//! # async fn run() -> osclient::Result<()> {
//! let client = osclient::Client::from_env()?;
//! let image_id = client.get_image_id_by_name("ubuntu").await?;
//! let flavor_id = client.get_flavor_id_by_name("m1.small").await?;
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod client;
pub mod config;
pub mod connection;
pub mod errors;
pub mod identity;
pub mod resources;
pub mod transport;

pub use catalog::{Domain, EndpointUrls, ServiceCatalogEntry};
pub use client::Client;
pub use config::Credentials;
pub use connection::Connection;
pub use errors::{ClientError, Result};
pub use identity::AuthResponse;
pub use resources::{Collection, ResourceRecord, FLAVORS, IMAGES};
