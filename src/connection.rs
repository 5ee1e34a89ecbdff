use std::fmt;

use tracing::{debug, warn};

use crate::catalog::{self, Domain};
use crate::config::Credentials;
use crate::errors::{ClientError, Result};
use crate::identity::{self, AuthResponse};

/// An authenticated handle on one service's base URL.
///
/// Built fresh for every logical operation and never shared or refreshed.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Connection {
    pub token: String,
    pub tenant_name: String,
    pub tenant_id: String,
    pub base_url: String,
}

impl Connection {
    /// The no-auth connection handed out when credentials are unconfigured.
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn is_anonymous(&self) -> bool {
        self.token.is_empty()
    }

    /// Scope an authentication result to the `domain` endpoint of `service_name`.
    pub fn from_auth(auth: AuthResponse, service_name: &str, domain: Domain) -> Result<Self> {
        let base_url = catalog::resolve(service_name, domain, &auth.catalog)
            .ok_or_else(|| ClientError::NotFound {
                kind: "endpoint",
                name: format!("{}/{}", service_name, domain),
            })?
            .to_string();

        Ok(Self {
            token: auth.token,
            tenant_name: auth.tenant_name,
            tenant_id: auth.tenant_id,
            base_url,
        })
    }
}

impl fmt::Debug for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Connection")
            .field("token", &if self.token.is_empty() { "" } else { "***" })
            .field("tenant_name", &self.tenant_name)
            .field("tenant_id", &self.tenant_id)
            .field("base_url", &self.base_url)
            .finish()
    }
}

/// Authenticate and resolve `service_name` into a [`Connection`].
///
/// Unconfigured credentials yield [`Connection::anonymous`] without error.
pub async fn get_connection(
    http: &reqwest::Client,
    creds: &Credentials,
    service_name: &str,
    domain: Domain,
) -> Result<Connection> {
    if !creds.is_configured() {
        debug!(service = service_name, "credentials unconfigured, using anonymous connection");
        return Ok(Connection::anonymous());
    }

    let auth = identity::authenticate(http, creds).await?;
    let conn = Connection::from_auth(auth, service_name, domain).map_err(|e| {
        warn!(service = service_name, domain = %domain, "service missing from catalog");
        e
    })?;

    debug!(service = service_name, domain = %domain, base_url = %conn.base_url, "connection ready");
    Ok(conn)
}
