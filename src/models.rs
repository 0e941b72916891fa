//! Data models for one run.
//!
//! This module defines the values that flow between stages:
//! - [`SortMode`]: ordering requested from the search API
//! - [`ArticleTitleList`]: plain-text headlines from the news search
//! - [`ImageReference`]: the representative image and where it was saved
//! - [`SearchResponse`], [`NewsItem`], [`ImageItem`]: typed search API records
//!
//! Nothing here outlives the run; there is no cache and no shared state.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Result ordering understood by the search API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortMode {
    /// Most relevant first (`sim` on the wire).
    Relevance,
    /// Newest first.
    Date,
}

impl SortMode {
    /// Query-string value for the `sort` parameter.
    pub fn as_query(&self) -> &'static str {
        match self {
            SortMode::Relevance => "sim",
            SortMode::Date => "date",
        }
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_query())
    }
}

/// Ordered plain-text headlines, markup and entities already removed.
///
/// Only titles the API actually returned are kept; the list is never padded
/// up to the requested count.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ArticleTitleList(Vec<String>);

impl ArticleTitleList {
    pub fn new(titles: Vec<String>) -> Self {
        Self(titles)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Titles with blank entries skipped, in original order.
    pub fn non_empty(&self) -> impl Iterator<Item = &str> {
        self.0
            .iter()
            .map(String::as_str)
            .filter(|t| !t.trim().is_empty())
    }
}

/// The representative image for a run.
///
/// `url` is the link exactly as returned, query string included, because
/// many image hosts sign their URLs. `file_extension` is derived from the
/// same link with the query string removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageReference {
    pub url: String,
    pub file_extension: String,
    pub local_path: PathBuf,
}

/// Envelope shared by the news and image search endpoints.
#[derive(Debug, Deserialize)]
pub struct SearchResponse<T> {
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
}

/// One hit from the news search. `title` may contain `<b>` markup and entities.
///
/// Other fields (`originallink`, `description`, `pubDate`, ...) are ignored.
#[derive(Debug, Deserialize)]
pub struct NewsItem {
    #[serde(default)]
    pub title: Option<String>,
}

/// One hit from the image search; only `link` is used.
#[derive(Debug, Deserialize)]
pub struct ImageItem {
    #[serde(default)]
    pub link: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_mode_query_values() {
        assert_eq!(SortMode::Relevance.as_query(), "sim");
        assert_eq!(SortMode::Date.to_string(), "date");
        assert_eq!(SortMode::Relevance.to_string(), "sim");
    }

    #[test]
    fn test_title_list_serializes_as_plain_array() {
        let titles = ArticleTitleList::new(vec!["a".to_string(), "b".to_string()]);
        assert_eq!(serde_json::to_string(&titles).unwrap(), r#"["a","b"]"#);
    }

    #[test]
    fn test_news_response_deserialization() {
        let json = r#"{
            "lastBuildDate": "Mon, 19 Oct 2026 09:00:00 +0900",
            "total": 2,
            "start": 1,
            "display": 2,
            "items": [
                {
                    "title": "<b>Stocks</b> rally",
                    "originallink": "https://news.example.com/1",
                    "link": "https://n.news.example.com/1",
                    "description": "...",
                    "pubDate": "Mon, 19 Oct 2026 08:55:00 +0900"
                },
                { "link": "https://n.news.example.com/2" }
            ]
        }"#;

        let resp: SearchResponse<NewsItem> = serde_json::from_str(json).unwrap();
        assert_eq!(resp.total, Some(2));
        assert_eq!(resp.items.len(), 2);
        assert_eq!(resp.items[0].title.as_deref(), Some("<b>Stocks</b> rally"));
        assert!(resp.items[1].title.is_none());
    }

    #[test]
    fn test_missing_items_defaults_to_empty() {
        let resp: SearchResponse<ImageItem> = serde_json::from_str(r#"{"total": 0}"#).unwrap();
        assert!(resp.items.is_empty());
    }

    #[test]
    fn test_title_list_non_empty_skips_blanks() {
        let list = ArticleTitleList::new(vec![
            "first".to_string(),
            String::new(),
            "  ".to_string(),
            "second".to_string(),
        ]);
        assert_eq!(list.len(), 4);
        assert_eq!(list.non_empty().collect::<Vec<_>>(), vec!["first", "second"]);
    }
}
