//! Name-to-id lookups over service listing endpoints.
//!
//! Each lookup opens a public connection to the owning service, GETs a fixed
//! listing path and scans the returned array in order for an exact name match.

pub mod flavor;
pub mod image;

use reqwest::Method;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info};

use crate::catalog::Domain;
use crate::config::Credentials;
use crate::connection;
use crate::errors::{ClientError, Result};
use crate::transport;

pub use flavor::{get_flavor_id_by_name, FLAVORS};
pub use image::{get_image_id_by_name, IMAGES};

/// A listing endpoint: which service owns it, where it lives and which
/// top-level key holds the array of records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Collection {
    pub kind: &'static str,
    pub service: &'static str,
    pub path: &'static str,
    pub key: &'static str,
}

/// The `{id, name}` pair of one listed record.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ResourceRecord {
    pub id: String,
    pub name: Option<String>,
}

/// Pull the record array named by `collection.key` out of a listing body.
fn entries<'a>(collection: &Collection, listing: &'a Value) -> Result<&'a Vec<Value>> {
    listing
        .get(collection.key)
        .and_then(Value::as_array)
        .ok_or_else(|| {
            ClientError::Decode(format!(
                "{} listing has no '{}' array",
                collection.kind, collection.key
            ))
        })
}

fn parse_listing(collection: &Collection, body: &[u8]) -> Result<Value> {
    serde_json::from_slice(body).map_err(|e| ClientError::decode(collection.kind, e))
}

/// Return the `id` of the first record named `name` in a listing body.
pub fn find_in_listing(collection: &Collection, body: &[u8], name: &str) -> Result<String> {
    let listing = parse_listing(collection, body)?;

    for entry in entries(collection, &listing)? {
        let record = entry.as_object().ok_or_else(|| {
            ClientError::Decode(format!("{} entry is not an object", collection.kind))
        })?;

        if record.get("name").and_then(Value::as_str) != Some(name) {
            continue;
        }

        return record
            .get("id")
            .and_then(Value::as_str)
            .map(String::from)
            .ok_or_else(|| {
                ClientError::Decode(format!("{} '{}' has no string id", collection.kind, name))
            });
    }

    Err(ClientError::NotFound {
        kind: collection.kind,
        name: name.to_string(),
    })
}

/// Decode every record of a listing body.
pub fn records_in_listing(collection: &Collection, body: &[u8]) -> Result<Vec<ResourceRecord>> {
    let listing = parse_listing(collection, body)?;
    entries(collection, &listing)?
        .iter()
        .map(|entry| {
            ResourceRecord::deserialize(entry).map_err(|e| ClientError::decode(collection.kind, e))
        })
        .collect()
}

async fn fetch_listing(
    http: &reqwest::Client,
    creds: &Credentials,
    collection: &Collection,
) -> Result<bytes::Bytes> {
    let conn = connection::get_connection(http, creds, collection.service, Domain::Public).await?;
    let resp = transport::call(http, &conn, Method::GET, collection.path, "").await?;
    let body = resp.bytes().await?;
    debug!(kind = collection.kind, bytes = body.len(), "listing fetched");
    Ok(body)
}

/// Look up the id of the `collection` record named `name`.
pub async fn find_id_by_name(
    http: &reqwest::Client,
    creds: &Credentials,
    collection: &Collection,
    name: &str,
) -> Result<String> {
    let body = fetch_listing(http, creds, collection).await?;
    let id = find_in_listing(collection, &body, name)?;
    info!(kind = collection.kind, name, id = %id, "resolved name");
    Ok(id)
}

/// List every record of `collection`.
pub async fn list(
    http: &reqwest::Client,
    creds: &Credentials,
    collection: &Collection,
) -> Result<Vec<ResourceRecord>> {
    let body = fetch_listing(http, creds, collection).await?;
    records_in_listing(collection, &body)
}
