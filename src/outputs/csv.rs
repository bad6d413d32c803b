//! Delimited-text export.
//!
//! Columns follow [`ArticleRecord::COLUMNS`]. Multi-line bodies are quoted by
//! the writer, and `Keywords` is stored as a JSON array string.

use crate::error::{Error, Result};
use crate::models::ArticleRecord;
use std::path::Path;
use tracing::{info, instrument};

/// Write `records` to `path` as CSV, replacing any existing file.
///
/// The document is encoded in memory first and written in one call.
///
/// # Returns
///
/// The exact bytes written to `path`.
///
/// # Errors
///
/// Returns [`Error::Export`] if a row cannot be encoded or the file cannot be
/// written.
#[instrument(level = "info", skip_all, fields(path = %path.display(), count = records.len()))]
pub fn write_csv(records: &[ArticleRecord], path: &Path) -> Result<Vec<u8>> {
    let csv_err = |e: ::csv::Error| Error::export(path, e);
    let mut writer = ::csv::Writer::from_writer(Vec::new());

    writer.write_record(ArticleRecord::COLUMNS).map_err(csv_err)?;
    for record in records {
        writer.write_record(record.to_row()?).map_err(csv_err)?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| Error::export(path, e.error()))?;
    std::fs::write(path, &bytes).map_err(|e| Error::export(path, e))?;

    info!(bytes = bytes.len(), "Wrote CSV export");
    Ok(bytes)
}
