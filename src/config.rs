//! Runtime configuration loaded from an optional YAML file.
//!
//! Every section falls back to defaults, so an empty file (or no file at all)
//! produces a working configuration targeting BBC News Brasil.
//!
//! ```yaml
//! site:
//!   base_url: https://www.bbc.com
//!   lang: portuguese
//! database:
//!   path: articles.db
//! server:
//!   host: 0.0.0.0
//!   port: 8080
//! exports:
//!   csv: data.csv
//!   xlsx: data.xlsx
//!   image: image.jpg
//! selectors:
//!   title: "#content"
//! ```

use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::PathBuf;
use tracing::{info, instrument};
use url::Url;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub site: SiteConfig,
    pub selectors: SelectorConfig,
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub exports: ExportConfig,
}

/// Where article short codes are resolved.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub base_url: String,
    pub lang: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.bbc.com".to_string(),
            lang: "portuguese".to_string(),
        }
    }
}

impl SiteConfig {
    /// Build the article URL for a short code: `<base_url>/<lang>/articles/<code>`.
    ///
    /// The code is percent-encoded as a single path segment, so a code can
    /// never add path segments or a query string.
    pub fn article_url(&self, code: &str) -> String {
        format!(
            "{}/{}/articles/{}",
            self.base_url.trim_end_matches('/'),
            self.lang,
            urlencoding::encode(code)
        )
    }
}

/// CSS selectors for each extracted field.
///
/// Defaults match the class names BBC News Brasil uses on article pages.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    pub title: String,
    pub fonte: String,
    pub author: String,
    pub date: String,
    pub image: String,
    pub body_container: String,
    pub body_paragraph: String,
    pub keyword_item: String,
    pub keyword_link: String,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            title: "#content".to_string(),
            fonte: "span.bbc-1y5sx98".to_string(),
            author: "span.bbc-1ypcc2".to_string(),
            date: "span.bbc-1dafq0j.e1mklfmt0".to_string(),
            image: "img.bbc-139onq".to_string(),
            body_container: "div.bbc-19j92fr.ebmt73l0".to_string(),
            body_paragraph: "p".to_string(),
            keyword_item: "li.bbc-1uuxkzb.e2o6ii40".to_string(),
            keyword_link: "a".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub path: PathBuf,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("articles.db"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

/// Default output filenames. Existing files are overwritten.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub csv: PathBuf,
    pub xlsx: PathBuf,
    pub image: PathBuf,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            csv: PathBuf::from("data.csv"),
            xlsx: PathBuf::from("data.xlsx"),
            image: PathBuf::from("image.jpg"),
        }
    }
}

/// Load settings from `path`, or return the defaults when no path is given.
///
/// # Errors
///
/// Returns [`Error::Config`] when the file is not valid YAML for
/// [`Settings`] or when `site.base_url` is not an absolute URL.
#[instrument(level = "info")]
pub fn load_settings(path: Option<&str>) -> Result<Settings> {
    let settings = match path {
        Some(path) => {
            let raw = std::fs::read_to_string(path)?;
            let settings = parse_settings(&raw)?;
            info!(path, "Loaded configuration");
            settings
        }
        None => Settings::default(),
    };
    Ok(settings)
}

fn parse_settings(raw: &str) -> Result<Settings> {
    let settings: Settings = if raw.trim().is_empty() {
        Settings::default()
    } else {
        serde_yaml::from_str(raw).map_err(|e| Error::Config(e.to_string()))?
    };

    Url::parse(&settings.site.base_url)
        .map_err(|e| Error::Config(format!("invalid site.base_url: {e}")))?;

    Ok(settings)
}
