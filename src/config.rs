use std::fmt;

use zeroize::Zeroizing;

pub const ENV_TENANT_NAME: &str = "OS_TENANT_NAME";
pub const ENV_USERNAME: &str = "OS_USERNAME";
pub const ENV_PASSWORD: &str = "OS_PASSWORD";
pub const ENV_AUTH_URL: &str = "OS_AUTH_URL";

/// Identity credentials for a single tenant.
///
/// Immutable once built. Any empty field leaves the client in no-auth mode;
/// see [`Credentials::is_configured`].
#[derive(Clone, Default)]
pub struct Credentials {
    pub tenant_name: String,
    pub username: String,
    password: Zeroizing<String>,
    /// Identity service base URL, e.g. `http://keystone:5000/v2.0`.
    pub auth_url: String,
}

impl Credentials {
    pub fn new(
        tenant_name: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
        auth_url: impl Into<String>,
    ) -> Self {
        Self {
            tenant_name: tenant_name.into(),
            username: username.into(),
            password: Zeroizing::new(password.into()),
            auth_url: auth_url.into(),
        }
    }

    /// Read credentials from the process environment (and `.env`, if present).
    ///
    /// Never fails: missing variables leave the matching field empty and the
    /// client falls back to unauthenticated calls.
    pub fn load() -> Self {
        dotenvy::dotenv().ok();
        let creds = Self::from_lookup(|key| std::env::var(key).ok());

        let missing = creds.missing_vars();
        if !missing.is_empty() {
            tracing::warn!(
                missing = %missing.join(","),
                "OpenStack environment variables are not set; requests will be unauthenticated"
            );
        }
        creds
    }

    /// Build credentials from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).unwrap_or_default();
        Self::new(
            get(ENV_TENANT_NAME),
            get(ENV_USERNAME),
            get(ENV_PASSWORD),
            get(ENV_AUTH_URL),
        )
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    /// True only when all four values are non-empty.
    pub fn is_configured(&self) -> bool {
        self.missing_vars().is_empty()
    }

    /// Names of the environment variables whose values are empty.
    pub fn missing_vars(&self) -> Vec<&'static str> {
        [
            (ENV_TENANT_NAME, self.tenant_name.as_str()),
            (ENV_USERNAME, self.username.as_str()),
            (ENV_PASSWORD, self.password.as_str()),
            (ENV_AUTH_URL, self.auth_url.as_str()),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(name, _)| name)
        .collect()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("tenant_name", &self.tenant_name)
            .field("username", &self.username)
            .field("password", &"***")
            .field("auth_url", &self.auth_url)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    fn full() -> Vec<(&'static str, &'static str)> {
        vec![
            (ENV_TENANT_NAME, "demo"),
            (ENV_USERNAME, "alice"),
            (ENV_PASSWORD, "s3cret"),
            (ENV_AUTH_URL, "http://keystone:5000/v2.0"),
        ]
    }

    #[test]
    fn test_all_fields_set_is_configured() {
        let creds = Credentials::from_lookup(lookup_from(&full()));
        assert!(creds.is_configured());
        assert_eq!(creds.tenant_name, "demo");
        assert_eq!(creds.password(), "s3cret");
        assert!(creds.missing_vars().is_empty());
    }

    #[test]
    fn test_any_single_empty_field_is_unconfigured() {
        for skip in [ENV_TENANT_NAME, ENV_USERNAME, ENV_PASSWORD, ENV_AUTH_URL] {
            let pairs: Vec<_> = full().into_iter().filter(|(k, _)| *k != skip).collect();
            let creds = Credentials::from_lookup(lookup_from(&pairs));
            assert!(!creds.is_configured(), "{} missing should be unconfigured", skip);
            assert_eq!(creds.missing_vars(), vec![skip]);
        }
    }

    #[test]
    fn test_empty_string_counts_as_missing() {
        let mut pairs = full();
        pairs[0] = (ENV_TENANT_NAME, "");
        let creds = Credentials::from_lookup(lookup_from(&pairs));
        assert!(!creds.is_configured());
    }

    #[test]
    fn test_default_is_unconfigured() {
        let creds = Credentials::default();
        assert!(!creds.is_configured());
        assert_eq!(creds.missing_vars().len(), 4);
    }

    #[test]
    fn test_debug_hides_password() {
        let creds = Credentials::new("demo", "alice", "s3cret", "http://k");
        let dbg = format!("{:?}", creds);
        assert!(!dbg.contains("s3cret"));
        assert!(dbg.contains("alice"));
    }
}
