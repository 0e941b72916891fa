//! Naver search API client.
//!
//! Both stages that talk to the search API go through [`SearchClient`]:
//! - [`SearchClient::fetch_titles`] queries `news.json` and returns plain-text headlines
//! - [`SearchClient::fetch_image_link`] queries `image` and returns the first link
//!
//! Each call is a single attempt bounded by the client timeout. Responses are
//! decoded into typed records; a missing field is reported as
//! [`PipelineError::MalformedResponse`], never an index fault.

use crate::config::{ApiCredentials, RunConfig};
use crate::error::PipelineError;
use crate::models::{ArticleTitleList, ImageItem, NewsItem, SearchResponse, SortMode};
use crate::utils::{html_to_text, truncate_for_log};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument, warn};

const NEWS_ENDPOINT: &str = "news.json";
const IMAGE_ENDPOINT: &str = "image";

/// Build the HTTP client shared by every stage of a run.
///
/// Redirects are followed with reqwest's default policy; `timeout` bounds
/// each request end to end.
pub fn build_http_client(timeout: Duration) -> Result<Client, PipelineError> {
    let client = Client::builder()
        .timeout(timeout)
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()?;
    Ok(client)
}

/// Query parameters common to both search endpoints.
#[derive(Debug, Clone, Copy)]
pub struct SearchQuery<'a> {
    pub keyword: &'a str,
    pub count: u32,
    pub offset: u32,
    pub sort: SortMode,
}

impl<'a> SearchQuery<'a> {
    pub fn from_config(config: &'a RunConfig) -> Self {
        Self {
            keyword: &config.keyword,
            count: config.result_count,
            offset: config.start_offset,
            sort: config.sort,
        }
    }

    fn to_query_string(self) -> String {
        format!(
            "query={}&display={}&start={}&sort={}",
            urlencoding::encode(self.keyword),
            self.count,
            self.offset,
            self.sort.as_query()
        )
    }
}

#[derive(Debug, Clone)]
pub struct SearchClient {
    http: Client,
    base_url: String,
    credentials: Option<ApiCredentials>,
}

impl SearchClient {
    pub fn new(http: Client, base_url: impl Into<String>, credentials: Option<ApiCredentials>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            credentials,
        }
    }

    /// Fetch headlines for `query` as plain text.
    ///
    /// Items without a `title` are skipped, so the list may be shorter than
    /// `query.count` but never padded.
    #[instrument(level = "info", skip_all, fields(keyword = %query.keyword))]
    pub async fn fetch_titles(&self, query: SearchQuery<'_>) -> Result<ArticleTitleList, PipelineError> {
        let resp: SearchResponse<NewsItem> = self.search(NEWS_ENDPOINT, query).await?;

        let titles = resp
            .items
            .into_iter()
            .filter_map(|item| item.title)
            .map(|raw| html_to_text(&raw))
            .collect::<Vec<_>>();

        info!(count = titles.len(), total = ?resp.total, "Fetched news titles");
        debug!(?titles, "Titles");
        Ok(ArticleTitleList::new(titles))
    }

    /// Fetch the first image result's `link`, exactly as returned.
    #[instrument(level = "info", skip_all, fields(keyword = %query.keyword))]
    pub async fn fetch_image_link(&self, query: SearchQuery<'_>) -> Result<String, PipelineError> {
        let resp: SearchResponse<ImageItem> = self.search(IMAGE_ENDPOINT, query).await?;

        let first = resp
            .items
            .into_iter()
            .next()
            .ok_or_else(|| PipelineError::MalformedResponse {
                endpoint: self.endpoint_url(IMAGE_ENDPOINT),
                reason: "no image items in response".to_string(),
            })?;

        let link = first
            .link
            .map(|l| l.trim().to_string())
            .filter(|l| !l.is_empty())
            .ok_or_else(|| PipelineError::MalformedResponse {
                endpoint: self.endpoint_url(IMAGE_ENDPOINT),
                reason: "first image item has no link".to_string(),
            })?;

        info!(%link, "Found image link");
        Ok(link)
    }

    fn endpoint_url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url, endpoint)
    }

    /// GET `{base}/{endpoint}?query=..` and decode the JSON body.
    async fn search<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: SearchQuery<'_>,
    ) -> Result<SearchResponse<T>, PipelineError> {
        let endpoint_url = self.endpoint_url(endpoint);

        let Some(creds) = &self.credentials else {
            warn!(endpoint = %endpoint_url, "NAVER_CLIENT_ID / NAVER_CLIENT_SECRET not set");
            return Err(PipelineError::ApiConnection {
                endpoint: endpoint_url,
                status: None,
                message: "API credentials are not configured".to_string(),
            });
        };

        let url = format!("{}?{}", endpoint_url, query.to_query_string());
        let t0 = Instant::now();
        let response = self
            .http
            .get(&url)
            .header("X-Naver-Client-Id", &creds.client_id)
            .header("X-Naver-Client-Secret", &creds.client_secret)
            .send()
            .await
            .map_err(|e| PipelineError::ApiConnection {
                endpoint: endpoint_url.clone(),
                status: None,
                message: e.to_string(),
            })?;

        let status = response.status();
        info!(
            endpoint = %endpoint_url,
            status = status.as_u16(),
            elapsed_ms = t0.elapsed().as_millis() as u64,
            "Search API responded"
        );

        let body = response.text().await.map_err(|e| PipelineError::ApiConnection {
            endpoint: endpoint_url.clone(),
            status: Some(status.as_u16()),
            message: e.to_string(),
        })?;

        if !status.is_success() {
            return Err(PipelineError::ApiConnection {
                endpoint: endpoint_url,
                status: Some(status.as_u16()),
                message: truncate_for_log(&body, 500),
            });
        }

        serde_json::from_str(&body).map_err(|e| PipelineError::MalformedResponse {
            endpoint: endpoint_url,
            reason: format!("{} (body: {})", e, truncate_for_log(&body, 200)),
        })
    }
}
