//! HTTP API over the scraper, exporters and row store.
//!
//! All dependencies live in [`AppState`], which `main` builds once and the
//! router clones into each handler. Nothing is held in process-wide globals.

mod handlers;
mod routes;

pub use routes::create_router;

use crate::config::Settings;
use crate::error::{Error, Result};
use crate::scrapers::bbc::ArticleScraper;
use crate::storage::ArticleStore;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, instrument};

/// Shared state for the web server.
#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub scraper: Arc<ArticleScraper>,
    pub store: ArticleStore,
}

impl AppState {
    pub fn new(settings: Settings, scraper: ArticleScraper, store: ArticleStore) -> Self {
        Self {
            settings: Arc::new(settings),
            scraper: Arc::new(scraper),
            store,
        }
    }
}

/// Bind `host:port` and serve until the process is stopped.
#[instrument(level = "info", skip(state))]
pub async fn serve(state: AppState, host: &str, port: u16) -> Result<()> {
    let addr: SocketAddr = format!("{host}:{port}")
        .parse()
        .map_err(|e| Error::Config(format!("invalid listen address {host}:{port}: {e}")))?;

    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "Starting server");
    axum::serve(listener, create_router(state)).await?;
    Ok(())
}
