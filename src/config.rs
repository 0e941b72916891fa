//! Run configuration.
//!
//! [`RunConfig`] is built once from the parsed [`Cli`] and is immutable for
//! the rest of the run. Only the keyword is required here; API credentials
//! and the webhook are checked by the stages that use them.

use crate::cli::Cli;
use crate::error::ConfigError;
use crate::models::SortMode;
use std::path::PathBuf;
use std::time::Duration;

/// Headlines requested per run.
pub const RESULT_COUNT: u32 = 10;
/// 1-based offset of the first result.
pub const START_OFFSET: u32 = 1;

/// Client id/secret pair sent as `X-Naver-Client-*` headers.
#[derive(Clone)]
pub struct ApiCredentials {
    pub client_id: String,
    pub client_secret: String,
}

impl std::fmt::Debug for ApiCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiCredentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct RunConfig {
    pub keyword: String,
    pub display_title: String,
    pub credentials: Option<ApiCredentials>,
    pub webhook_url: Option<String>,
    pub result_count: u32,
    pub start_offset: u32,
    pub sort: SortMode,
    pub output_dir: PathBuf,
    pub api_base_url: String,
    pub timeout: Duration,
}

impl RunConfig {
    /// Validate raw CLI/env input.
    ///
    /// # Errors
    ///
    /// [`ConfigError::MissingKeyword`] when the keyword is absent or blank,
    /// [`ConfigError::InvalidTimeout`] when the timeout is zero.
    pub fn from_cli(cli: Cli) -> Result<Self, ConfigError> {
        let keyword = non_blank(cli.keyword).ok_or(ConfigError::MissingKeyword)?;
        if cli.timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout);
        }

        let display_title = non_blank(cli.news_title).unwrap_or_else(|| format!("{keyword} news"));

        let credentials = match (non_blank(cli.client_id), non_blank(cli.client_secret)) {
            (Some(client_id), Some(client_secret)) => Some(ApiCredentials {
                client_id,
                client_secret,
            }),
            _ => None,
        };

        Ok(Self {
            keyword,
            display_title,
            credentials,
            webhook_url: non_blank(cli.webhook_url),
            result_count: RESULT_COUNT,
            start_offset: START_OFFSET,
            sort: SortMode::Date,
            output_dir: PathBuf::from(cli.output_dir),
            api_base_url: cli.api_base_url.trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(cli.timeout_secs),
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli_with_keyword(keyword: Option<&str>) -> Cli {
        Cli {
            keyword: keyword.map(str::to_string),
            output_dir: "news_data".to_string(),
            api_base_url: "https://openapi.naver.com/v1/search/".to_string(),
            timeout_secs: 15,
            ..Cli::default()
        }
    }

    #[test]
    fn test_missing_keyword_is_rejected() {
        let err = RunConfig::from_cli(cli_with_keyword(None)).unwrap_err();
        assert_eq!(err, ConfigError::MissingKeyword);
    }

    #[test]
    fn test_blank_keyword_is_rejected() {
        let err = RunConfig::from_cli(cli_with_keyword(Some("   "))).unwrap_err();
        assert_eq!(err, ConfigError::MissingKeyword);
    }

    #[test]
    fn test_defaults_applied() {
        let cfg = RunConfig::from_cli(cli_with_keyword(Some("stocks"))).unwrap();
        assert_eq!(cfg.keyword, "stocks");
        assert_eq!(cfg.display_title, "stocks news");
        assert_eq!(cfg.result_count, 10);
        assert_eq!(cfg.start_offset, 1);
        assert_eq!(cfg.sort, SortMode::Date);
        assert_eq!(cfg.api_base_url, "https://openapi.naver.com/v1/search");
        assert_eq!(cfg.timeout, Duration::from_secs(15));
        assert!(cfg.credentials.is_none());
        assert!(cfg.webhook_url.is_none());
    }

    #[test]
    fn test_explicit_title_and_credentials() {
        let cli = Cli {
            news_title: Some("Market wrap".to_string()),
            client_id: Some("id".to_string()),
            client_secret: Some("secret".to_string()),
            webhook_url: Some("https://hooks.slack.com/services/x".to_string()),
            ..cli_with_keyword(Some("stocks"))
        };
        let cfg = RunConfig::from_cli(cli).unwrap();
        assert_eq!(cfg.display_title, "Market wrap");
        let creds = cfg.credentials.unwrap();
        assert_eq!(creds.client_id, "id");
        assert_eq!(creds.client_secret, "secret");
        assert!(format!("{creds:?}").contains("<redacted>"));
        assert_eq!(
            cfg.webhook_url.as_deref(),
            Some("https://hooks.slack.com/services/x")
        );
    }

    #[test]
    fn test_half_credentials_count_as_missing() {
        let cli = Cli {
            client_id: Some("id".to_string()),
            ..cli_with_keyword(Some("stocks"))
        };
        assert!(RunConfig::from_cli(cli).unwrap().credentials.is_none());
    }

    #[test]
    fn test_empty_webhook_is_absent() {
        let cli = Cli {
            webhook_url: Some(String::new()),
            ..cli_with_keyword(Some("stocks"))
        };
        assert!(RunConfig::from_cli(cli).unwrap().webhook_url.is_none());
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        let cli = Cli {
            timeout_secs: 0,
            ..cli_with_keyword(Some("stocks"))
        };
        assert_eq!(
            RunConfig::from_cli(cli).unwrap_err(),
            ConfigError::InvalidTimeout
        );
    }
}
