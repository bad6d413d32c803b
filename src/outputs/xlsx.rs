//! Spreadsheet export.
//!
//! A cell holds at most [`MAX_CELL_CHARS`] characters. Longer values (in
//! practice only `Body`) are cut at that length and a warning names the
//! column and row.

use crate::error::{Error, Result};
use crate::models::ArticleRecord;
use rust_xlsxwriter::{Format, Workbook, XlsxError};
use std::path::Path;
use tracing::{info, instrument, warn};

/// Excel's per-cell character limit.
pub const MAX_CELL_CHARS: usize = 32_767;

/// Write `records` to `path` as a single-sheet XLSX workbook.
///
/// Row 0 holds the bold column headers, then one row per record. Empty
/// values (such as an absent `Src`) are left as blank cells. The workbook is
/// built in memory and written in one call.
///
/// # Returns
///
/// The exact bytes written to `path`.
///
/// # Errors
///
/// Returns [`Error::Export`] if a cell cannot be encoded or the file cannot
/// be written.
#[instrument(level = "info", skip_all, fields(path = %path.display(), count = records.len()))]
pub fn write_xlsx(records: &[ArticleRecord], path: &Path) -> Result<Vec<u8>> {
    let xlsx_err = |e: XlsxError| Error::export(path, e);

    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();
    let sheet = workbook.add_worksheet();

    for (col, name) in ArticleRecord::COLUMNS.iter().enumerate() {
        sheet
            .write_string_with_format(0, col as u16, *name, &header)
            .map_err(xlsx_err)?;
    }

    for (i, record) in records.iter().enumerate() {
        let row = (i + 1) as u32;
        for (col, cell) in record.to_row()?.into_iter().enumerate() {
            if cell.is_empty() {
                continue;
            }
            let cell = fit_cell(cell, ArticleRecord::COLUMNS[col], row);
            sheet.write_string(row, col as u16, cell).map_err(xlsx_err)?;
        }
    }

    let bytes = workbook.save_to_buffer().map_err(xlsx_err)?;
    std::fs::write(path, &bytes).map_err(|e| Error::export(path, e))?;
    info!(bytes = bytes.len(), "Wrote XLSX export");
    Ok(bytes)
}

/// Cut `cell` to [`MAX_CELL_CHARS`] characters on a character boundary.
fn fit_cell(cell: String, column: &str, row: u32) -> String {
    match cell.char_indices().nth(MAX_CELL_CHARS) {
        None => cell,
        Some((cut, _)) => {
            warn!(
                column,
                row,
                chars = cell.chars().count(),
                limit = MAX_CELL_CHARS,
                "Cell exceeds spreadsheet limit, truncating"
            );
            let mut cell = cell;
            cell.truncate(cut);
            cell
        }
    }
}
