//! Command-line interface definitions for Thoughtful Articles.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! Global options can also be provided through environment variables.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Command-line arguments for the Thoughtful Articles application.
///
/// # Examples
///
/// ```sh
/// # Scrape one article and print it as JSON
/// thoughtful_articles scrape https://www.bbc.com/portuguese/articles/c4nnzyz2ljjo
///
/// # Scrape and export as a spreadsheet
/// thoughtful_articles export https://www.bbc.com/portuguese/articles/c4nnzyz2ljjo --format xlsx
///
/// # Serve the HTTP API on port 8080
/// thoughtful_articles serve --port 8080
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Optional path to a config.yaml file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// SQLite database file for stored articles (overrides config)
    #[arg(long, env = "ARTICLES_DB", global = true)]
    pub database: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Scrape one article and print it as JSON
    Scrape {
        /// Article URL
        url: String,

        /// Also insert the record into the database
        #[arg(long)]
        store: bool,
    },
    /// Scrape one article and write it to a CSV or XLSX file
    Export {
        /// Article URL
        url: String,

        #[arg(short, long, value_enum, default_value_t = ExportFormat::Csv)]
        format: ExportFormat,

        /// Output file (defaults to the configured data.csv / data.xlsx)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Scrape one article and download its lead image
    Image {
        /// Article URL
        url: String,

        /// Output file (defaults to the configured image.jpg)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print every stored article as JSON
    List,
    /// Search stored articles
    Search(SearchArgs),
    /// Run the HTTP API
    Serve {
        #[arg(long, env = "HOST")]
        host: Option<String>,

        #[arg(long, env = "PORT")]
        port: Option<u16>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Csv,
    Xlsx,
}

#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
pub struct SearchArgs {
    /// Article short code, resolved against the configured site
    #[arg(long)]
    pub code: Option<String>,

    /// Exact Fonte value
    #[arg(long)]
    pub fonte: Option<String>,

    /// Keyword that must appear in the article's Keywords
    #[arg(long)]
    pub keyword: Option<String>,
}
