//! Article page scraping.
//!
//! Scraping a page is a single pass with no crawl frontier and no retries:
//!
//! 1. **Fetching**: [`fetch_page`] downloads the raw markup bytes
//! 2. **Extraction**: [`bbc`] parses the markup and applies the compiled
//!    [`selectors::ArticleSelectors`] to build one
//!    [`ArticleRecord`](crate::models::ArticleRecord)
//!
//! # Extracted fields
//!
//! | Field | Default selector | Required |
//! |-------|------------------|----------|
//! | Title | `#content` | yes |
//! | Date | `span.bbc-1dafq0j.e1mklfmt0` | yes |
//! | Fonte | `span.bbc-1y5sx98` | yes |
//! | Author | `span.bbc-1ypcc2` | yes |
//! | Src | `img.bbc-139onq` (`src` attribute) | no |
//! | Body | `div.bbc-19j92fr.ebmt73l0 p` | no |
//! | Keywords | `li.bbc-1uuxkzb.e2o6ii40 a` | no |

pub mod bbc;
pub mod selectors;

use crate::error::{Error, Result};
use reqwest::Client;
use tracing::{debug, info, instrument};

/// Fetch one page and return the raw response body.
///
/// The request waits until the server answers or the connection fails; no
/// timeout is applied and nothing is retried.
///
/// # Errors
///
/// Returns [`Error::Fetch`] on transport failure or a non-success status.
#[instrument(level = "info", skip(client))]
pub async fn fetch_page(client: &Client, url: &str) -> Result<Vec<u8>> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| Error::fetch(url, e))?;

    let status = response.status();
    debug!(%status, "Received response");
    if !status.is_success() {
        return Err(Error::fetch(url, format!("HTTP status {status}")));
    }

    let bytes = response.bytes().await.map_err(|e| Error::fetch(url, e))?;
    info!(bytes = bytes.len(), "Fetched page");
    Ok(bytes.to_vec())
}
