use bytes::Bytes;
use reqwest::{Method, Response};

use crate::catalog::Domain;
use crate::config::Credentials;
use crate::connection::{self, Connection};
use crate::errors::Result;
use crate::identity::{self, AuthResponse};
use crate::resources::{self, Collection, ResourceRecord};
use crate::transport;

/// Entry point for identity, image and compute lookups.
///
/// Holds the credentials it was built with and one HTTP client. Every
/// operation authenticates from scratch.
#[derive(Debug, Clone)]
pub struct Client {
    http: reqwest::Client,
    credentials: Credentials,
}

impl Client {
    pub fn new(credentials: Credentials) -> Result<Self> {
        let http = reqwest::Client::builder()
            .use_rustls_tls()
            .user_agent(concat!("osclient/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self::with_http_client(http, credentials))
    }

    /// Build a client around a preconfigured `reqwest::Client`.
    pub fn with_http_client(http: reqwest::Client, credentials: Credentials) -> Self {
        Self { http, credentials }
    }

    /// Credentials from `OS_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::new(Credentials::load())
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// True only when all four credential values are set.
    pub fn is_authenticated(&self) -> bool {
        self.credentials.is_configured()
    }

    pub async fn authenticate(&self) -> Result<AuthResponse> {
        identity::authenticate(&self.http, &self.credentials).await
    }

    pub async fn get_connection(&self, service_name: &str, domain: Domain) -> Result<Connection> {
        connection::get_connection(&self.http, &self.credentials, service_name, domain).await
    }

    pub async fn call(
        &self,
        conn: &Connection,
        method: Method,
        path: &str,
        body: impl Into<Bytes>,
    ) -> Result<Response> {
        transport::call(&self.http, conn, method, path, body).await
    }

    pub async fn find_id_by_name(&self, collection: &Collection, name: &str) -> Result<String> {
        resources::find_id_by_name(&self.http, &self.credentials, collection, name).await
    }

    pub async fn list(&self, collection: &Collection) -> Result<Vec<ResourceRecord>> {
        resources::list(&self.http, &self.credentials, collection).await
    }

    pub async fn get_image_id_by_name(&self, name: &str) -> Result<String> {
        resources::get_image_id_by_name(&self.http, &self.credentials, name).await
    }

    pub async fn get_flavor_id_by_name(&self, name: &str) -> Result<String> {
        resources::get_flavor_id_by_name(&self.http, &self.credentials, name).await
    }
}
