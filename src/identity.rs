//! Identity service: password authentication and token issuance.
//!
//! Sends `POST {auth_url}/tokens` with tenant-scoped password credentials and
//! decodes the issued token, the tenant and the service catalog. Every call
//! produces a fresh token; nothing is cached.

use std::fmt;

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::catalog::ServiceCatalogEntry;
use crate::config::Credentials;
use crate::errors::{ClientError, Result};

// ── Request body ─────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct AuthContainer<'a> {
    auth: AuthRequest<'a>,
}

#[derive(Debug, Serialize)]
struct AuthRequest<'a> {
    #[serde(rename = "passwordCredentials")]
    password_credentials: PasswordCredentials<'a>,
    #[serde(rename = "tenantName")]
    tenant_name: &'a str,
}

#[derive(Serialize)]
struct PasswordCredentials<'a> {
    username: &'a str,
    password: &'a str,
}

impl fmt::Debug for PasswordCredentials<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PasswordCredentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

impl<'a> AuthContainer<'a> {
    fn from_credentials(creds: &'a Credentials) -> Self {
        Self {
            auth: AuthRequest {
                password_credentials: PasswordCredentials {
                    username: &creds.username,
                    password: creds.password(),
                },
                tenant_name: &creds.tenant_name,
            },
        }
    }
}

// ── Response body ────────────────────────────────────────────

#[derive(Deserialize)]
struct AccessEnvelope {
    access: Access,
}

#[derive(Deserialize)]
struct Access {
    token: IssuedToken,
    #[serde(rename = "serviceCatalog", default)]
    service_catalog: Vec<ServiceCatalogEntry>,
}

#[derive(Deserialize)]
struct IssuedToken {
    id: String,
    tenant: Tenant,
}

#[derive(Deserialize)]
struct Tenant {
    id: String,
    name: String,
}

/// Result of a successful authentication.
#[derive(Clone)]
pub struct AuthResponse {
    pub token: String,
    pub tenant_id: String,
    pub tenant_name: String,
    pub catalog: Vec<ServiceCatalogEntry>,
}

impl fmt::Debug for AuthResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthResponse")
            .field("token", &"***")
            .field("tenant_id", &self.tenant_id)
            .field("tenant_name", &self.tenant_name)
            .field("catalog", &self.catalog)
            .finish()
    }
}

impl Access {
    fn into_auth_response(self) -> AuthResponse {
        AuthResponse {
            token: self.token.id,
            tenant_id: self.token.tenant.id,
            tenant_name: self.token.tenant.name,
            catalog: self.service_catalog,
        }
    }
}

/// Decode a token-issuance response body.
pub fn decode_access(body: &[u8]) -> Result<AuthResponse> {
    let envelope: AccessEnvelope = serde_json::from_slice(body)
        .map_err(|e| ClientError::decode("identity token response", e))?;
    Ok(envelope.access.into_auth_response())
}

/// Token endpoint under `auth_url`. A single trailing `/` is dropped.
fn tokens_url(auth_url: &str) -> String {
    let base = auth_url.strip_suffix('/').unwrap_or(auth_url);
    format!("{}/tokens", base)
}

/// Authenticate against the identity service.
pub async fn authenticate(http: &reqwest::Client, creds: &Credentials) -> Result<AuthResponse> {
    let url = tokens_url(&creds.auth_url);
    debug!(url = %url, tenant = %creds.tenant_name, user = %creds.username, "requesting token");

    let resp = http
        .post(&url)
        .header(reqwest::header::CONTENT_TYPE, "application/json")
        .header(reqwest::header::ACCEPT, "application/json")
        .json(&AuthContainer::from_credentials(creds))
        .send()
        .await?;

    let status = resp.status();
    if status != StatusCode::OK {
        warn!(url = %url, status = %status, "identity service rejected authentication");
        return Err(ClientError::Auth { status });
    }

    let body = resp.bytes().await?;
    let auth = decode_access(&body)?;

    info!(
        tenant = %auth.tenant_name,
        tenant_id = %auth.tenant_id,
        services = auth.catalog.len(),
        "authenticated"
    );
    Ok(auth)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_body_shape() {
        let creds = Credentials::new("demo", "alice", "s3cret", "http://k");
        let body = serde_json::to_value(AuthContainer::from_credentials(&creds)).unwrap();
        assert_eq!(
            body,
            json!({
                "auth": {
                    "passwordCredentials": {"username": "alice", "password": "s3cret"},
                    "tenantName": "demo"
                }
            })
        );
    }

    #[test]
    fn test_request_debug_hides_password() {
        let creds = Credentials::new("demo", "alice", "s3cret", "http://k");
        let dbg = format!("{:?}", AuthContainer::from_credentials(&creds));
        assert!(!dbg.contains("s3cret"));
    }

    #[test]
    fn test_tokens_url_trims_one_trailing_slash() {
        assert_eq!(tokens_url("http://k/v2.0"), "http://k/v2.0/tokens");
        assert_eq!(tokens_url("http://k/v2.0/"), "http://k/v2.0/tokens");
        assert_eq!(tokens_url("http://k/v2.0//"), "http://k/v2.0//tokens");
    }

    #[test]
    fn test_decode_access_extracts_fields() {
        let body = json!({
            "access": {
                "token": {
                    "id": "tok-123",
                    "expires": "2030-01-01T00:00:00Z",
                    "tenant": {"id": "t-1", "name": "demo", "enabled": true}
                },
                "serviceCatalog": [
                    {"name": "nova", "type": "compute",
                     "endpoints": [{"publicURL": "http://nova/v2/t-1", "adminURL": "http://nova-adm"}]},
                    {"name": "glance", "type": "image",
                     "endpoints": [{"publicURL": "http://glance:9292"}]}
                ],
                "user": {"id": "u-1", "name": "alice"}
            }
        });
        let auth = decode_access(body.to_string().as_bytes()).unwrap();
        assert_eq!(auth.token, "tok-123");
        assert_eq!(auth.tenant_id, "t-1");
        assert_eq!(auth.tenant_name, "demo");
        assert_eq!(auth.catalog.len(), 2);
        assert_eq!(auth.catalog[0].name, "nova");
        assert_eq!(auth.catalog[0].endpoints[0].admin_url, "http://nova-adm");
        assert_eq!(auth.catalog[1].endpoints[0].admin_url, "");
    }

    #[test]
    fn test_decode_access_without_catalog() {
        let body = r#"{"access":{"token":{"id":"tok","tenant":{"id":"t","name":"n"}}}}"#;
        let auth = decode_access(body.as_bytes()).unwrap();
        assert!(auth.catalog.is_empty());
    }

    #[test]
    fn test_decode_access_rejects_malformed_json() {
        let err = decode_access(b"{not json").unwrap_err();
        assert!(matches!(err, ClientError::Decode(_)));
    }

    #[test]
    fn test_decode_access_rejects_missing_token_id() {
        let body = r#"{"access":{"token":{"tenant":{"id":"t","name":"n"}}}}"#;
        let err = decode_access(body.as_bytes()).unwrap_err();
        assert!(matches!(err, ClientError::Decode(_)));
    }

    #[test]
    fn test_decode_access_rejects_wrong_typed_field() {
        let body = r#"{"access":{"token":{"id":42,"tenant":{"id":"t","name":"n"}}}}"#;
        assert!(matches!(
            decode_access(body.as_bytes()).unwrap_err(),
            ClientError::Decode(_)
        ));
    }

    #[test]
    fn test_auth_response_debug_hides_token() {
        let auth = AuthResponse {
            token: "tok-secret".into(),
            tenant_id: "t".into(),
            tenant_name: "n".into(),
            catalog: vec![],
        };
        assert!(!format!("{:?}", auth).contains("tok-secret"));
    }
}
