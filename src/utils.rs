//! Utility functions for text cleanup, filenames, and file system operations.
//!
//! This module provides helper functions used throughout the application:
//! - HTML-to-plain-text conversion for search result titles
//! - Filename-safe keywords and timestamped output names
//! - Idempotent output folder creation
//! - String truncation for logging

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::Html;
use std::io;
use std::path::Path;
use tokio::fs;
use tracing::{debug, instrument};

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Convert an HTML snippet into plain text.
///
/// Tags are dropped and character references decoded (`&quot;`, `&amp;`,
/// `&lt;`, `&gt;`, `&nbsp;` and the rest of the HTML set). Runs of
/// whitespace, non-breaking spaces included, collapse to one space.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(html_to_text("<b>Foo</b> &amp; Bar"), "Foo & Bar");
/// ```
pub fn html_to_text(raw: &str) -> String {
    let fragment = Html::parse_fragment(raw);
    let text = fragment.root_element().text().collect::<String>();
    WHITESPACE.replace_all(&text, " ").trim().to_string()
}

/// Make a keyword usable as part of a single filename.
///
/// Path separators become `_`; everything else, including non-ASCII text,
/// is kept.
pub fn filename_safe(keyword: &str) -> String {
    keyword
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect()
}

/// `<timestamp>_<keyword>.<extension>` for one run artifact.
pub fn artifact_filename(timestamp_millis: i64, keyword: &str, extension: &str) -> String {
    format!("{}_{}.{}", timestamp_millis, filename_safe(keyword), extension)
}

/// Create the output folder (and parents) if missing.
///
/// Calling this on an existing folder is a no-op.
#[instrument(level = "debug", skip_all, fields(path = %path.display()))]
pub async fn ensure_output_dir(path: &Path) -> io::Result<()> {
    fs::create_dir_all(path).await?;
    debug!("Output directory ready");
    Ok(())
}

/// Truncate a string for logging purposes.
///
/// Long strings are cut at a char boundary at or below `max` bytes and get
/// `"…(+N bytes)"` appended.
pub fn truncate_for_log(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    let mut cut = max;
    while !s.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}…(+{} bytes)", &s[..cut], s.len() - cut)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_html_to_text_strips_tags_and_entities() {
        assert_eq!(html_to_text("<b>Foo</b> &amp; Bar"), "Foo & Bar");
        assert_eq!(
            html_to_text("&quot;<b>AI</b>&quot; &lt;chips&gt;&nbsp;rally"),
            "\"AI\" <chips> rally"
        );
    }

    #[test]
    fn test_html_to_text_plain_passthrough() {
        assert_eq!(html_to_text("삼성전자 주가 상승"), "삼성전자 주가 상승");
        assert_eq!(html_to_text(""), "");
    }

    #[test]
    fn test_html_to_text_collapses_whitespace() {
        assert_eq!(html_to_text("  a \n\t <i>b</i>  "), "a b");
    }

    #[test]
    fn test_filename_safe() {
        assert_eq!(filename_safe("stocks"), "stocks");
        assert_eq!(filename_safe("AI/ML"), "AI_ML");
        assert_eq!(filename_safe(" a\\b "), "a_b");
    }

    #[test]
    fn test_artifact_filename() {
        assert_eq!(
            artifact_filename(1_700_000_000_000, "stocks", "JPG"),
            "1700000000000_stocks.JPG"
        );
    }

    #[tokio::test]
    async fn test_ensure_output_dir_is_idempotent() {
        let tmp = tempdir().unwrap();
        let dir = tmp.path().join("news_data").join("nested");

        ensure_output_dir(&dir).await.unwrap();
        std::fs::write(dir.join("keep.txt"), "x").unwrap();
        ensure_output_dir(&dir).await.unwrap();

        assert!(dir.is_dir());
        assert_eq!(std::fs::read_dir(&dir).unwrap().count(), 1);
    }

    #[test]
    fn test_truncate_for_log_short_string() {
        assert_eq!(truncate_for_log("Hello, world!", 100), "Hello, world!");
    }

    #[test]
    fn test_truncate_for_log_long_string() {
        let s = "a".repeat(500);
        let result = truncate_for_log(&s, 100);
        assert!(result.starts_with(&"a".repeat(100)));
        assert!(result.contains("…(+400 bytes)"));
    }

    #[test]
    fn test_truncate_for_log_respects_char_boundaries() {
        let result = truncate_for_log("가나다", 4);
        assert!(result.starts_with('가'));
        assert!(result.contains("(+6 bytes)"));
    }
}
