//! Data model for scraped articles.
//!
//! [`ArticleRecord`] is the only record type. It serializes with the column
//! names used by the row store and export files (`Title`, `Date`, `Body`,
//! `Fonte`, `Author`, `Src`, `URL`, `Keywords`).

use crate::error::Result;
use serde::{Deserialize, Serialize};

/// One article scraped from a single page.
///
/// Built in one pass by the record builder and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ArticleRecord {
    /// Headline text.
    #[serde(rename = "Title")]
    pub title: String,
    /// Publication date exactly as printed on the page.
    #[serde(rename = "Date")]
    pub date: String,
    /// Body paragraphs, each terminated by `\n`. Empty when the page has no body container.
    #[serde(rename = "Body")]
    pub body: String,
    /// Source attribution ("fonte") line.
    #[serde(rename = "Fonte")]
    pub fonte: String,
    #[serde(rename = "Author")]
    pub author: String,
    /// Lead image `src`, or `None` when the page has no lead image.
    #[serde(rename = "Src")]
    pub src: Option<String>,
    /// The URL that was requested, unmodified.
    #[serde(rename = "URL")]
    pub url: String,
    /// Topic links in document order. Duplicates are kept.
    #[serde(rename = "Keywords")]
    pub keywords: Vec<String>,
}

impl ArticleRecord {
    /// Column headers for tabular exports, in row order.
    pub const COLUMNS: [&'static str; 8] = [
        "Title", "Date", "Body", "Fonte", "Author", "Src", "URL", "Keywords",
    ];

    /// Flatten the record into one string per column of [`Self::COLUMNS`].
    ///
    /// An absent `Src` becomes an empty cell and `Keywords` is encoded as a
    /// JSON array so it survives a round trip through a flat file.
    pub fn to_row(&self) -> Result<[String; 8]> {
        Ok([
            self.title.clone(),
            self.date.clone(),
            self.body.clone(),
            self.fonte.clone(),
            self.author.clone(),
            self.src.clone().unwrap_or_default(),
            self.url.clone(),
            serde_json::to_string(&self.keywords)?,
        ])
    }
}

#[cfg(test)]
pub(crate) fn sample_record() -> ArticleRecord {
    ArticleRecord {
        title: "Eleições: o que muda".to_string(),
        date: "12 outubro 2023".to_string(),
        body: "Primeiro parágrafo.\nSegundo, com \"aspas\", vírgulas.\n".to_string(),
        fonte: "BBC News Brasil".to_string(),
        author: "Maria Silva".to_string(),
        src: Some("https://ichef.bbci.co.uk/img/lead.jpg".to_string()),
        url: "https://www.bbc.com/portuguese/articles/c1234".to_string(),
        keywords: vec!["Política".to_string(), "Brasil".to_string()],
    }
}
