//! Command-line interface definitions.
//!
//! The job is normally driven by a scheduler that only sets environment
//! variables, so every argument falls back to its env var. Flags win over
//! the environment when both are present.

use clap::Parser;

/// Raw, unvalidated run inputs.
///
/// Values are turned into a [`crate::config::RunConfig`] before use; that is
/// where the keyword requirement and the display title default are applied.
///
/// # Examples
///
/// ```sh
/// # Scheduler style
/// KEYWORD=stocks NAVER_CLIENT_ID=... NAVER_CLIENT_SECRET=... naver_news_slack
///
/// # Explicit flags, custom output folder
/// naver_news_slack --keyword stocks --output-dir /var/lib/news
/// ```
#[derive(Parser, Debug, Default)]
#[command(author, version, about)]
pub struct Cli {
    /// Search term
    #[arg(short, long, env = "KEYWORD")]
    pub keyword: Option<String>,

    /// Title shown in the Slack header (defaults to "<keyword> news")
    #[arg(short = 't', long, env = "NEWS_TITLE")]
    pub news_title: Option<String>,

    /// Naver API client id
    #[arg(long, env = "NAVER_CLIENT_ID", hide_env_values = true)]
    pub client_id: Option<String>,

    /// Naver API client secret
    #[arg(long, env = "NAVER_CLIENT_SECRET", hide_env_values = true)]
    pub client_secret: Option<String>,

    /// Slack incoming webhook; the notification is skipped when unset
    #[arg(long, env = "SLACK_WEBHOOK_URL", hide_env_values = true)]
    pub webhook_url: Option<String>,

    /// Folder receiving the title list, JSON snapshot and image
    #[arg(short, long, env = "NEWS_OUTPUT_DIR", default_value = "news_data")]
    pub output_dir: String,

    /// Base URL of the search API
    #[arg(
        long,
        env = "NAVER_API_BASE_URL",
        default_value = "https://openapi.naver.com/v1/search"
    )]
    pub api_base_url: String,

    /// Timeout applied to every HTTP call, in seconds
    #[arg(long, env = "HTTP_TIMEOUT_SECS", default_value_t = 15)]
    pub timeout_secs: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::try_parse_from([
            "naver_news_slack",
            "--keyword",
            "stocks",
            "--news-title",
            "Market wrap",
            "--output-dir",
            "/tmp/news",
            "--api-base-url",
            "http://127.0.0.1:9/v1/search",
            "--timeout-secs",
            "5",
        ])
        .unwrap();

        assert_eq!(cli.keyword.as_deref(), Some("stocks"));
        assert_eq!(cli.news_title.as_deref(), Some("Market wrap"));
        assert_eq!(cli.output_dir, "/tmp/news");
        assert_eq!(cli.api_base_url, "http://127.0.0.1:9/v1/search");
        assert_eq!(cli.timeout_secs, 5);
    }

    #[test]
    fn test_cli_short_flags() {
        let cli =
            Cli::try_parse_from(["naver_news_slack", "-k", "ai", "-t", "AI", "-o", "out"]).unwrap();

        assert_eq!(cli.keyword.as_deref(), Some("ai"));
        assert_eq!(cli.news_title.as_deref(), Some("AI"));
        assert_eq!(cli.output_dir, "out");
    }

    #[test]
    fn test_cli_rejects_non_numeric_timeout() {
        let res = Cli::try_parse_from(["naver_news_slack", "--timeout-secs", "soon"]);
        assert!(res.is_err());
    }
}
