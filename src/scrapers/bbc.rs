//! BBC News Brasil article scraper.
//!
//! Article pages carry every field in stable, generated class names, so each
//! field is a single selector lookup against the parsed page. The parsed
//! [`Html`] never outlives [`ArticleScraper::extract`], which keeps it out of
//! any `.await` and keeps the scrape future `Send`.

use crate::error::{Error, Result};
use crate::models::ArticleRecord;
use crate::scrapers::fetch_page;
use crate::scrapers::selectors::{ArticleSelectors, FieldSelector};
use reqwest::Client;
use scraper::Html;
use tracing::{debug, info, instrument};

/// Fetches article pages and turns them into [`ArticleRecord`]s.
#[derive(Debug, Clone)]
pub struct ArticleScraper {
    client: Client,
    selectors: ArticleSelectors,
}

impl ArticleScraper {
    pub fn new(client: Client, selectors: ArticleSelectors) -> Self {
        Self { client, selectors }
    }

    /// Scrape one article page.
    ///
    /// Returns a batch of exactly one record, the shape the row store and
    /// exporters consume.
    ///
    /// # Errors
    ///
    /// - [`Error::Fetch`] if the page cannot be downloaded
    /// - [`Error::MissingField`] if a required field is not on the page
    #[instrument(level = "info", skip(self))]
    pub async fn scrape(&self, url: &str) -> Result<Vec<ArticleRecord>> {
        let bytes = fetch_page(&self.client, url).await?;
        let markup = String::from_utf8_lossy(&bytes);
        let record = self.extract(&markup, url)?;
        info!(
            keywords = record.keywords.len(),
            body_bytes = record.body.len(),
            has_image = record.src.is_some(),
            "Scraped article"
        );
        Ok(vec![record])
    }

    /// Build a record from already fetched markup.
    pub fn extract(&self, markup: &str, url: &str) -> Result<ArticleRecord> {
        let document = Html::parse_document(markup);
        extract_record(&document, &self.selectors, url)
    }
}

/// Assemble every field of the record from a parsed page.
pub fn extract_record(
    document: &Html,
    selectors: &ArticleSelectors,
    url: &str,
) -> Result<ArticleRecord> {
    let title = extract_required_text(document, &selectors.title, "Title")?;
    let fonte = extract_required_text(document, &selectors.fonte, "Fonte")?;
    let author = extract_required_text(document, &selectors.author, "Author")?;
    let date = extract_required_text(document, &selectors.date, "Date")?;
    let src = extract_image_src(document, &selectors.image);
    let body = extract_body(document, selectors);
    let keywords = extract_keywords(document, selectors);

    Ok(ArticleRecord {
        title,
        date,
        body,
        fonte,
        author,
        src,
        url: url.to_string(),
        keywords,
    })
}

/// Text of the first element matching `field_selector`, untrimmed.
pub fn extract_required_text(
    document: &Html,
    field_selector: &FieldSelector,
    field: &'static str,
) -> Result<String> {
    document
        .select(&field_selector.selector)
        .next()
        .map(|el| el.text().collect::<String>())
        .ok_or_else(|| Error::MissingField {
            field,
            selector: field_selector.text.clone(),
        })
}

/// `src` of the first matching image, if there is one.
pub fn extract_image_src(document: &Html, image: &FieldSelector) -> Option<String> {
    let src = document
        .select(&image.selector)
        .next()
        .and_then(|el| el.value().attr("src"))
        .map(str::to_string);
    if src.is_none() {
        debug!(selector = %image.text, "No lead image on page");
    }
    src
}

/// Concatenate every paragraph of every body container, one `\n` after each.
pub fn extract_body(document: &Html, selectors: &ArticleSelectors) -> String {
    let mut text = String::new();
    for container in document.select(&selectors.body_container.selector) {
        for paragraph in container.select(&selectors.body_paragraph.selector) {
            text.extend(paragraph.text());
            text.push('\n');
        }
    }
    text
}

/// Anchor texts inside the topic list items, in document order.
pub fn extract_keywords(document: &Html, selectors: &ArticleSelectors) -> Vec<String> {
    document
        .select(&selectors.keyword_item.selector)
        .flat_map(|item| item.select(&selectors.keyword_link.selector))
        .map(|link| link.text().collect::<String>())
        .collect()
}


#[cfg(test)]
mod tests {
    use super::fixtures::ARTICLE_PAGE;
    use super::*;
    use crate::config::SelectorConfig;
    use httpmock::prelude::*;

    fn selectors() -> ArticleSelectors {
        ArticleSelectors::compile(&SelectorConfig::default()).unwrap()
    }

    fn scraper() -> ArticleScraper {
        ArticleScraper::new(Client::new(), selectors())
    }

    #[test]
    fn test_extract_full_record() {
        let url = "https://www.bbc.com/portuguese/articles/c1234?at=1";
        let record = scraper().extract(ARTICLE_PAGE, url).unwrap();

        assert_eq!(record.title, "Eleições: o que muda");
        assert_eq!(record.fonte, "BBC News Brasil");
        assert_eq!(record.author, "Maria Silva");
        assert_eq!(record.date, "12 outubro 2023");
        assert_eq!(
            record.src.as_deref(),
            Some("https://ichef.bbci.co.uk/img/lead.jpg")
        );
        assert_eq!(record.url, url);
    }

    #[test]
    fn test_body_has_one_segment_per_paragraph_in_order() {
        let document = Html::parse_document(ARTICLE_PAGE);
        let body = extract_body(&document, &selectors());
        assert_eq!(body, "Primeiro parágrafo.\nSegundo.\nTerceiro.\n");
        assert_eq!(body.matches('\n').count(), 3);
    }

    #[test]
    fn test_body_keeps_empty_paragraphs() {
        let document = Html::parse_document(
            r#"<div class="bbc-19j92fr ebmt73l0"><p></p><p>x</p></div>"#,
        );
        assert_eq!(extract_body(&document, &selectors()), "\nx\n");
    }

    #[test]
    fn test_body_without_containers_is_empty() {
        let document = Html::parse_document("<div><p>Solto.</p></div>");
        assert_eq!(extract_body(&document, &selectors()), "");
    }

    #[test]
    fn test_keywords_keep_order_and_duplicates() {
        let document = Html::parse_document(ARTICLE_PAGE);
        assert_eq!(
            extract_keywords(&document, &selectors()),
            vec!["Política", "Brasil", "Política"]
        );
    }

    #[test]
    fn test_keywords_empty_without_items() {
        let document = Html::parse_document("<ul><li><a>Solto</a></li></ul>");
        assert!(extract_keywords(&document, &selectors()).is_empty());
    }

    #[test]
    fn test_missing_image_is_none() {
        let markup = ARTICLE_PAGE.replace("bbc-139onq", "bbc-other-img");
        let record = scraper().extract(&markup, "u").unwrap();
        assert_eq!(record.src, None);
    }

    #[test]
    fn test_image_without_src_is_none() {
        let markup = ARTICLE_PAGE.replace(
            r#"src="https://ichef.bbci.co.uk/img/lead.jpg""#,
            r#"data-src="lazy.jpg""#,
        );
        let record = scraper().extract(&markup, "u").unwrap();
        assert_eq!(record.src, None);
    }

    #[test]
    fn test_text_is_not_trimmed() {
        let markup = ARTICLE_PAGE.replace(
            r#"<span class="bbc-1ypcc2">Maria Silva</span>"#,
            r#"<span class="bbc-1ypcc2">  Maria Silva
</span>"#,
        );
        let record = scraper().extract(&markup, "u").unwrap();
        assert_eq!(record.author, "  Maria Silva\n");
    }

    #[test]
    fn test_missing_title_fails() {
        let markup = ARTICLE_PAGE.replace(r#"id="content""#, r#"id="headline""#);
        match scraper().extract(&markup, "u").unwrap_err() {
            Error::MissingField { field, selector } => {
                assert_eq!(field, "Title");
                assert_eq!(selector, "#content");
            }
            other => panic!("expected missing field, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_author_fails() {
        let markup = ARTICLE_PAGE.replace("bbc-1ypcc2", "bbc-renamed");
        let err = scraper().extract(&markup, "u").unwrap_err();
        assert!(matches!(err, Error::MissingField { field: "Author", .. }));
    }

    #[tokio::test]
    async fn test_scrape_returns_batch_of_one() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/portuguese/articles/c1234");
                then.status(200)
                    .header("content-type", "text/html; charset=utf-8")
                    .body(ARTICLE_PAGE);
            })
            .await;

        let url = server.url("/portuguese/articles/c1234");
        let records = scraper().scrape(&url).await.unwrap();

        mock.assert_async().await;
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].url, url);
        assert_eq!(records[0].keywords.len(), 3);
    }

    #[tokio::test]
    async fn test_scrape_fetch_failure_produces_no_records() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/portuguese/articles/broken");
                then.status(500);
            })
            .await;

        let result = scraper()
            .scrape(&server.url("/portuguese/articles/broken"))
            .await;
        assert!(matches!(result, Err(Error::Fetch { .. })));
    }

    #[tokio::test]
    async fn test_scrape_page_without_title_fails() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/portuguese/articles/notitle");
                then.status(200).body("<html><body><p>vazio</p></body></html>");
            })
            .await;

        let result = scraper()
            .scrape(&server.url("/portuguese/articles/notitle"))
            .await;
        assert!(matches!(
            result,
            Err(Error::MissingField { field: "Title", .. })
        ));
    }
}
