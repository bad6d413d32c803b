//! Lead image download.

use crate::error::{Error, Result};
use crate::models::ArticleRecord;
use crate::scrapers::fetch_page;
use reqwest::Client;
use std::path::Path;
use tokio::fs;
use tracing::{info, instrument, warn};

/// Download the `Src` image of each record into `path`.
///
/// Every image is written to the same file, so with a batch of several
/// records the last one wins. Records without an image are skipped.
///
/// # Returns
///
/// The number of images written.
///
/// # Errors
///
/// - [`Error::Fetch`] if an image cannot be downloaded
/// - [`Error::Export`] if the file cannot be written
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn download_image(
    client: &Client,
    records: &[ArticleRecord],
    path: &Path,
) -> Result<usize> {
    let mut written = 0;
    for record in records {
        let Some(src) = record.src.as_deref() else {
            warn!(url = %record.url, "Article has no image; skipping");
            continue;
        };

        let bytes = fetch_page(client, src).await?;
        fs::write(path, &bytes)
            .await
            .map_err(|e| Error::export(path, e))?;
        info!(%src, bytes = bytes.len(), "Wrote image");
        written += 1;
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::sample_record;
    use httpmock::prelude::*;

    const JPEG_MAGIC: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0];

    #[tokio::test]
    async fn test_downloads_image_bytes() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/img/lead.jpg");
                then.status(200).body(JPEG_MAGIC);
            })
            .await;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("image.jpg");
        let record = ArticleRecord {
            src: Some(server.url("/img/lead.jpg")),
            ..sample_record()
        };

        let written = download_image(&Client::new(), &[record], &path).await.unwrap();

        mock.assert_async().await;
        assert_eq!(written, 1);
        assert_eq!(std::fs::read(&path).unwrap(), JPEG_MAGIC);
    }

    #[tokio::test]
    async fn test_skips_records_without_image() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("image.jpg");
        let record = ArticleRecord {
            src: None,
            ..sample_record()
        };

        let written = download_image(&Client::new(), &[record], &path).await.unwrap();
        assert_eq!(written, 0);
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_failed_download_is_fetch_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/img/missing.jpg");
                then.status(404);
            })
            .await;

        let dir = tempfile::tempdir().unwrap();
        let record = ArticleRecord {
            src: Some(server.url("/img/missing.jpg")),
            ..sample_record()
        };
        let err = download_image(&Client::new(), &[record], &dir.path().join("image.jpg"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Fetch { .. }));
    }
}
