//! Request handlers.
//!
//! Handlers are thin: each one resolves its input, calls the scraper, the
//! store or an exporter, and maps [`Error`] to a JSON error response.

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::path::{Path as FsPath, PathBuf};
use tracing::{error, info, instrument};

use super::routes::ROUTES;
use super::AppState;
use crate::error::{Error, Result};
use crate::models::ArticleRecord;
use crate::outputs::{csv::write_csv, xlsx::write_xlsx};

const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
const CSV_CONTENT_TYPE: &str = "text/csv; charset=utf-8";

type Exporter = fn(&[ArticleRecord], &FsPath) -> Result<Vec<u8>>;

/// [`Error`] rendered as `{"error": "..."}` with a matching status code.
pub struct ApiError(Error);

impl From<Error> for ApiError {
    fn from(e: Error) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            Error::Fetch { .. } => StatusCode::BAD_GATEWAY,
            Error::MissingField { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        error!(%status, error = %self.0, "Request failed");
        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}

#[derive(Debug, Deserialize)]
pub struct ScrapeQuery {
    pub url: String,
}

pub async fn index() -> Json<Value> {
    Json(json!({ "routes": ROUTES }))
}

/// Scrape `url`, store the record and return the batch.
#[instrument(level = "info", skip(state))]
pub async fn scrape_json(
    State(state): State<AppState>,
    Query(params): Query<ScrapeQuery>,
) -> std::result::Result<Json<Vec<ArticleRecord>>, ApiError> {
    let records = state.scraper.scrape(&params.url).await?;
    state.store.insert_rows(&records).await?;
    Ok(Json(records))
}

pub async fn read_table(
    State(state): State<AppState>,
) -> std::result::Result<Json<Vec<ArticleRecord>>, ApiError> {
    Ok(Json(state.store.list_rows().await?))
}

#[instrument(level = "info", skip(state))]
pub async fn download_excel(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> std::result::Result<Response, ApiError> {
    let url = state.settings.site.article_url(&code);
    let records = state.scraper.scrape(&url).await?;
    let path = state.settings.exports.xlsx.clone();
    export_attachment(records, path, write_xlsx, XLSX_CONTENT_TYPE).await
}

#[instrument(level = "info", skip(state))]
pub async fn download_csv(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> std::result::Result<Response, ApiError> {
    let url = state.settings.site.article_url(&code);
    let records = state.scraper.scrape(&url).await?;
    let path = state.settings.exports.csv.clone();
    export_attachment(records, path, write_csv, CSV_CONTENT_TYPE).await
}

/// Write the export file on the blocking pool and send the same bytes back
/// as an attachment.
///
/// The response body is the buffer this request encoded, never a read of the
/// shared file, so concurrent exports cannot swap content.
async fn export_attachment(
    records: Vec<ArticleRecord>,
    path: PathBuf,
    exporter: Exporter,
    content_type: &'static str,
) -> std::result::Result<Response, ApiError> {
    let target = path.clone();
    let bytes = tokio::task::spawn_blocking(move || exporter(&records, &target))
        .await
        .map_err(|e| Error::export(&path, e))??;
    info!(path = %path.display(), bytes = bytes.len(), "Serving export");

    let filename = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("export");
    Ok((
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        bytes,
    )
        .into_response())
}

pub async fn search_by_code(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> std::result::Result<Json<Vec<ArticleRecord>>, ApiError> {
    let url = state.settings.site.article_url(&code);
    Ok(Json(state.store.find_by_url(&url).await?))
}

pub async fn search_by_fonte(
    State(state): State<AppState>,
    Path(fonte): Path<String>,
) -> std::result::Result<Json<Vec<ArticleRecord>>, ApiError> {
    Ok(Json(state.store.find_by_fonte(&fonte).await?))
}

/// Rows tagged with `keyword`, or a plain message when there are none.
pub async fn search_by_keyword(
    State(state): State<AppState>,
    Path(keyword): Path<String>,
) -> std::result::Result<Response, ApiError> {
    let rows = state.store.find_by_keyword(&keyword).await?;
    if rows.is_empty() {
        let message = format!("No articles found containing the keyword: {keyword}");
        return Ok(Json(Value::String(message)).into_response());
    }
    Ok(Json(rows).into_response())
}
