use super::{find_id_by_name, Collection};
use crate::config::Credentials;
use crate::errors::Result;

/// Image listing of the image service.
pub const IMAGES: Collection = Collection {
    kind: "image",
    service: "glance",
    path: "/v1/images",
    key: "images",
};

/// Id of the first image named exactly `name`.
pub async fn get_image_id_by_name(
    http: &reqwest::Client,
    creds: &Credentials,
    name: &str,
) -> Result<String> {
    find_id_by_name(http, creds, &IMAGES, name).await
}
