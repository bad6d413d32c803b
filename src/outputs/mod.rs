//! File outputs for scraped records.
//!
//! # Submodules
//!
//! - [`csv`]: delimited text, header row plus one row per record
//! - [`xlsx`]: spreadsheet with a single worksheet in the same layout
//! - [`image`]: downloads the lead image referenced by a record's `Src`
//!
//! Neither tabular format writes a row-index column. All writers overwrite an
//! existing file in place; there is no atomic rename.

pub mod csv;
pub mod image;
pub mod xlsx;
