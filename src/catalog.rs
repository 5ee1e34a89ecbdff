//! Service catalog lookups by service name and endpoint domain.
//!
//! The catalog is returned by the identity service at authentication time.
//! Entries are scanned in the order the service returned them; the first
//! entry whose name matches wins, and only its first endpoint is consulted.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::ClientError;

/// Selects which URL of an endpoint to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Domain {
    Public,
    Admin,
}

impl Domain {
    pub fn as_str(&self) -> &'static str {
        match self {
            Domain::Public => "public",
            Domain::Admin => "admin",
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Domain {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "public" => Ok(Domain::Public),
            "admin" => Ok(Domain::Admin),
            _ => Err(ClientError::InvalidDomain(s.to_string())),
        }
    }
}

/// Public and admin URLs of one service endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointUrls {
    #[serde(rename = "publicURL", default)]
    pub public_url: String,
    #[serde(rename = "adminURL", default)]
    pub admin_url: String,
}

impl EndpointUrls {
    pub fn url(&self, domain: Domain) -> &str {
        match domain {
            Domain::Public => &self.public_url,
            Domain::Admin => &self.admin_url,
        }
    }
}

/// A named service and its endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceCatalogEntry {
    pub name: String,
    #[serde(default)]
    pub endpoints: Vec<EndpointUrls>,
}

/// Find the `domain` URL of the first catalog entry named `service_name`.
///
/// Returns `None` when no entry matches, when the first match has no
/// endpoints, or when its URL for `domain` is empty.
pub fn resolve<'a>(
    service_name: &str,
    domain: Domain,
    catalog: &'a [ServiceCatalogEntry],
) -> Option<&'a str> {
    let entry = catalog.iter().find(|entry| entry.name == service_name)?;
    let url = entry.endpoints.first()?.url(domain);
    if url.is_empty() {
        None
    } else {
        Some(url)
    }
}
