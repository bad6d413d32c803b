//! # Thoughtful Articles
//!
//! Scrapes single news article pages (BBC News Brasil by default) into flat
//! records, stores them in SQLite, and exports them as CSV or XLSX files.
//!
//! ## Usage
//!
//! ```sh
//! thoughtful_articles scrape https://www.bbc.com/portuguese/articles/c4nnzyz2ljjo --store
//! thoughtful_articles serve --port 8080
//! ```
//!
//! ## Architecture
//!
//! Every invocation is one stateless pass:
//! 1. **Fetching**: download one page (no retries, no timeout)
//! 2. **Extraction**: apply the configured selectors to build one record
//! 3. **Output**: print it, store it, export it, or serve it over HTTP

use clap::Parser;
use reqwest::Client;
use std::error::Error;
use std::path::PathBuf;
use tracing::{debug, info, instrument};
use tracing_subscriber::{fmt as tfmt, EnvFilter};

mod cli;
mod config;
mod error;
mod models;
mod outputs;
mod scrapers;
mod server;
mod storage;
mod utils;

use cli::{Cli, Command, ExportFormat, SearchArgs};
use config::Settings;
use models::ArticleRecord;
use scrapers::bbc::ArticleScraper;
use scrapers::selectors::ArticleSelectors;
use storage::ArticleStore;
use utils::{ensure_parent_writable, truncate_for_log};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .with_writer(std::io::stderr)
        .init();

    let start_time = std::time::Instant::now();
    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    let mut settings = config::load_settings(args.config.as_deref())?;
    if let Some(database) = args.database {
        settings.database.path = database;
    }

    let client = Client::new();
    let selectors = ArticleSelectors::compile(&settings.selectors)?;
    let scraper = ArticleScraper::new(client.clone(), selectors);

    run(args.command, settings, scraper, client).await?;

    let elapsed = start_time.elapsed();
    info!(?elapsed, "Execution complete");
    Ok(())
}

#[instrument(level = "info", skip_all)]
async fn run(
    command: Command,
    settings: Settings,
    scraper: ArticleScraper,
    client: Client,
) -> Result<(), Box<dyn Error>> {
    match command {
        Command::Scrape { url, store } => {
            let records = scraper.scrape(&url).await?;
            for record in &records {
                debug!(body = %truncate_for_log(&record.body, 200), "Article body");
            }
            if store {
                let db = ArticleStore::connect(&settings.database.path).await?;
                db.insert_rows(&records).await?;
            }
            print_json(&records)?;
        }
        Command::Export {
            url,
            format,
            output,
        } => {
            let path = output.unwrap_or_else(|| match format {
                ExportFormat::Csv => settings.exports.csv.clone(),
                ExportFormat::Xlsx => settings.exports.xlsx.clone(),
            });
            ensure_parent_writable(&path).await?;

            let records = scraper.scrape(&url).await?;
            write_export(records, path.clone(), format).await?;
            info!(path = %path.display(), "Export written");
        }
        Command::Image { url, output } => {
            let path = output.unwrap_or_else(|| settings.exports.image.clone());
            ensure_parent_writable(&path).await?;

            let records = scraper.scrape(&url).await?;
            let written = outputs::image::download_image(&client, &records, &path).await?;
            info!(path = %path.display(), written, "Image download finished");
        }
        Command::List => {
            let db = ArticleStore::connect(&settings.database.path).await?;
            print_json(&db.list_rows().await?)?;
        }
        Command::Search(search) => {
            let db = ArticleStore::connect(&settings.database.path).await?;
            let rows = search_rows(&db, &settings, search).await?;
            print_json(&rows)?;
        }
        Command::Serve { host, port } => {
            let host = host.unwrap_or_else(|| settings.server.host.clone());
            let port = port.unwrap_or(settings.server.port);
            let db = ArticleStore::connect(&settings.database.path).await?;
            let state = server::AppState::new(settings, scraper, db);
            server::serve(state, &host, port).await?;
        }
    }
    Ok(())
}

async fn write_export(
    records: Vec<ArticleRecord>,
    path: PathBuf,
    format: ExportFormat,
) -> Result<(), Box<dyn Error>> {
    tokio::task::spawn_blocking(move || match format {
        ExportFormat::Csv => outputs::csv::write_csv(&records, &path),
        ExportFormat::Xlsx => outputs::xlsx::write_xlsx(&records, &path),
    })
    .await??;
    Ok(())
}

async fn search_rows(
    db: &ArticleStore,
    settings: &Settings,
    search: SearchArgs,
) -> error::Result<Vec<ArticleRecord>> {
    if let Some(code) = search.code {
        db.find_by_url(&settings.site.article_url(&code)).await
    } else if let Some(fonte) = search.fonte {
        db.find_by_fonte(&fonte).await
    } else if let Some(keyword) = search.keyword {
        db.find_by_keyword(&keyword).await
    } else {
        Ok(Vec::new())
    }
}

fn print_json(records: &[ArticleRecord]) -> Result<(), Box<dyn Error>> {
    println!("{}", serde_json::to_string_pretty(records)?);
    Ok(())
}
