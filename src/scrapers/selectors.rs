//! Compiled selector set.
//!
//! Selector text comes from [`SelectorConfig`] and is parsed once at start-up,
//! so bad selectors surface as a configuration failure instead of on the
//! first scrape.

use crate::config::SelectorConfig;
use crate::error::{Error, Result};
use scraper::Selector;

/// A parsed selector together with its source text, kept for error messages.
#[derive(Debug, Clone)]
pub struct FieldSelector {
    pub text: String,
    pub selector: Selector,
}

impl FieldSelector {
    pub fn parse(text: &str) -> Result<Self> {
        let selector = Selector::parse(text).map_err(|e| Error::InvalidSelector {
            selector: text.to_string(),
            reason: format!("{e:?}"),
        })?;
        Ok(Self {
            text: text.to_string(),
            selector,
        })
    }
}

#[derive(Debug, Clone)]
pub struct ArticleSelectors {
    pub title: FieldSelector,
    pub fonte: FieldSelector,
    pub author: FieldSelector,
    pub date: FieldSelector,
    pub image: FieldSelector,
    pub body_container: FieldSelector,
    pub body_paragraph: FieldSelector,
    pub keyword_item: FieldSelector,
    pub keyword_link: FieldSelector,
}

impl ArticleSelectors {
    pub fn compile(config: &SelectorConfig) -> Result<Self> {
        Ok(Self {
            title: FieldSelector::parse(&config.title)?,
            fonte: FieldSelector::parse(&config.fonte)?,
            author: FieldSelector::parse(&config.author)?,
            date: FieldSelector::parse(&config.date)?,
            image: FieldSelector::parse(&config.image)?,
            body_container: FieldSelector::parse(&config.body_container)?,
            body_paragraph: FieldSelector::parse(&config.body_paragraph)?,
            keyword_item: FieldSelector::parse(&config.keyword_item)?,
            keyword_link: FieldSelector::parse(&config.keyword_link)?,
        })
    }
}
