//! Router configuration for the web server.

use axum::{routing::get, Router};
use tower_http::cors::CorsLayer;

use super::handlers;
use super::AppState;

/// Paths served by [`create_router`], listed by the index route.
pub(super) const ROUTES: &[&str] = &[
    "/json?url=<article url>",
    "/read_table",
    "/download_excel/:code",
    "/download_csv/:code",
    "/search_cod_url/:code",
    "/search_fonte/:fonte",
    "/search_keyword/:keyword",
];

/// Create the main router with all routes.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        // Scrape and store
        .route("/json", get(handlers::scrape_json))
        .route("/read_table", get(handlers::read_table))
        // Scrape and export
        .route("/download_excel/:code", get(handlers::download_excel))
        .route("/download_csv/:code", get(handlers::download_csv))
        // Stored-row search
        .route("/search_cod_url/:code", get(handlers::search_by_code))
        .route("/search_fonte/:fonte", get(handlers::search_by_fonte))
        .route("/search_keyword/:keyword", get(handlers::search_by_keyword))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
