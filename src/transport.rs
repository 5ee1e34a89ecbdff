//! Authenticated HTTP calls against a resolved service connection.
//! One attempt per call; errors are returned as-is, never retried.

use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{Method, Response};
use tracing::{debug, warn};

use crate::connection::Connection;
use crate::errors::{ClientError, Result};

pub const X_AUTH_TOKEN: &str = "x-auth-token";
pub const X_AUTH_PROJECT_ID: &str = "x-auth-project-id";

/// Headers sent on every service call. Auth headers are left out for
/// anonymous connections.
pub fn auth_headers(conn: &Connection) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    if !conn.is_anonymous() {
        let mut token = HeaderValue::from_str(&conn.token)
            .map_err(|e| ClientError::decode("auth token is not a valid header value", e))?;
        token.set_sensitive(true);
        headers.insert(X_AUTH_TOKEN, token);

        let project = HeaderValue::from_str(&conn.tenant_name)
            .map_err(|e| ClientError::decode("tenant name is not a valid header value", e))?;
        headers.insert(X_AUTH_PROJECT_ID, project);
    }

    Ok(headers)
}

/// Issue `method` against `conn.base_url + path`.
///
/// Statuses >= 400 become [`ClientError::Api`]; the error body is drained
/// into the message. On success the caller owns the response and its body.
pub async fn call(
    http: &reqwest::Client,
    conn: &Connection,
    method: Method,
    path: &str,
    body: impl Into<Bytes>,
) -> Result<Response> {
    let url = format!("{}{}", conn.base_url, path);
    debug!(method = %method, url = %url, "calling service");

    let resp = http
        .request(method.clone(), &url)
        .headers(auth_headers(conn)?)
        .body(body.into())
        .send()
        .await?;

    let status = resp.status();
    if status.as_u16() >= 400 {
        let text = match resp.text().await {
            Ok(text) => text,
            Err(e) => {
                debug!(url = %url, error = %e, "failed to read error body");
                String::new()
            }
        };
        warn!(method = %method, url = %url, status = %status, "service call failed");
        return Err(ClientError::api(status, &text));
    }

    Ok(resp)
}
