//! Error type shared by the scraper, exporters, store and HTTP service.
//!
//! Nothing in this crate retries. Every variant aborts the current invocation
//! and propagates to the immediate caller, so a record is either built
//! completely or not at all.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Transport failure or non-success status while fetching a page.
    #[error("failed to fetch {url}: {reason}")]
    Fetch { url: String, reason: String },

    /// A required selector matched no element.
    #[error("missing required field {field} (selector `{selector}`)")]
    MissingField {
        field: &'static str,
        selector: String,
    },

    #[error("invalid selector `{selector}`: {reason}")]
    InvalidSelector { selector: String, reason: String },

    /// Writing an export file failed.
    #[error("failed to export {}: {reason}", path.display())]
    Export { path: PathBuf, reason: String },

    #[error("storage error: {0}")]
    Storage(#[from] sqlx::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn fetch(url: &str, reason: impl ToString) -> Self {
        Self::Fetch {
            url: url.to_string(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn export(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::Export {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_field_message_names_field_and_selector() {
        let err = Error::MissingField {
            field: "Title",
            selector: "#content".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "missing required field Title (selector `#content`)"
        );
    }

    #[test]
    fn test_export_message_includes_path() {
        let err = Error::export("/tmp/out/data.csv", "permission denied");
        assert_eq!(
            err.to_string(),
            "failed to export /tmp/out/data.csv: permission denied"
        );
    }
}
