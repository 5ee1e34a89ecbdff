use super::{find_id_by_name, Collection};
use crate::config::Credentials;
use crate::errors::Result;

/// Flavor listing of the compute service.
pub const FLAVORS: Collection = Collection {
    kind: "flavor",
    service: "nova",
    path: "/flavors",
    key: "flavors",
};

/// Id of the first flavor named exactly `name`.
pub async fn get_flavor_id_by_name(
    http: &reqwest::Client,
    creds: &Credentials,
    name: &str,
) -> Result<String> {
    find_id_by_name(http, creds, &FLAVORS, name).await
}
