//! Client bundle special case
//!
//! The client-side navigation runtime is not stored with the application; a
//! request for its literal path is answered by fetching the published bundle
//! from the CDN and serving it as JavaScript. The finalizer stamps the
//! checksum and length like any other response.

use crate::http::error::PageError;
use crate::http::response::PageResponse;

/// Literal request path answered with the client bundle
pub const CLIENT_BUNDLE_PATH: &str = "/nattramn-client.js";

/// Published bundle location
const CLIENT_BUNDLE_URL: &str = "https://unpkg.com/nattramn-client/dist/nattramn-client.js";

/// Fetch the client bundle and wrap it as a JavaScript response
pub async fn fetch_client_bundle() -> Result<PageResponse, PageError> {
    let response = reqwest::get(CLIENT_BUNDLE_URL)
        .await
        .and_then(|r| r.error_for_status())
        .map_err(|source| PageError::BundleFetch { source })?;

    let bytes = response.bytes().await.map_err(|source| PageError::BundleFetch { source })?;

    log::debug!("fetched client bundle ({} bytes)", bytes.len());
    Ok(PageResponse::ok("application/javascript", bytes))
}
