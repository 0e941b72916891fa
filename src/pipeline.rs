//! One run of the job, stage by stage.
//!
//! Stages run once each, strictly in order:
//! fetch news → save titles → fetch image link → download image →
//! write snapshot → notify.
//!
//! Every stage failure is caught here, logged, and pushed onto
//! [`RunReport::errors`]. Only a failed news fetch ends the run early, since
//! without headlines there is nothing to save or send. A missing image link
//! drops the image block from the notification; a failed download does not,
//! because Slack loads the image from its remote URL.

use crate::api::{SearchClient, SearchQuery, build_http_client};
use crate::config::RunConfig;
use crate::error::PipelineError;
use crate::image::{download_image, image_reference};
use crate::models::{ArticleTitleList, ImageReference};
use crate::notify::{NotificationOutcome, Notifier};
use crate::outputs::json::{RunSnapshot, write_snapshot};
use crate::outputs::titles::save_titles;
use std::path::PathBuf;
use tracing::{error, info, instrument, warn};

/// Everything a run produced, plus every stage error it swallowed.
#[derive(Debug, Default)]
pub struct RunReport {
    pub titles: Option<ArticleTitleList>,
    pub titles_path: Option<PathBuf>,
    pub image: Option<ImageReference>,
    pub image_bytes: Option<u64>,
    pub snapshot_path: Option<PathBuf>,
    pub notification: Option<NotificationOutcome>,
    pub errors: Vec<PipelineError>,
}

impl RunReport {
    /// `true` when every attempted stage succeeded.
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    fn record(&mut self, stage: &'static str, err: PipelineError) {
        error!(stage, kind = err.kind(), error = %err, "Stage failed");
        self.errors.push(err);
    }
}

/// Execute the whole job once.
///
/// Never fails: all errors end up in the returned report.
#[instrument(level = "info", skip_all, fields(keyword = %config.keyword, timestamp = timestamp_millis))]
pub async fn run(config: &RunConfig, timestamp_millis: i64) -> RunReport {
    let mut report = RunReport::default();

    let http = match build_http_client(config.timeout) {
        Ok(http) => http,
        Err(e) => {
            report.record("http_client", e);
            return report;
        }
    };

    let search = SearchClient::new(
        http.clone(),
        config.api_base_url.as_str(),
        config.credentials.clone(),
    );
    let query = SearchQuery::from_config(config);

    // ---- News ----
    let titles = match search.fetch_titles(query).await {
        Ok(titles) => titles,
        Err(e) => {
            report.record("fetch_news", e);
            warn!("No headlines; remaining stages skipped");
            return report;
        }
    };

    match save_titles(&titles, &config.keyword, timestamp_millis, &config.output_dir).await {
        Ok(path) => report.titles_path = Some(path),
        Err(e) => report.record("save_titles", e),
    }

    // ---- Image ----
    let image = match search.fetch_image_link(query).await.and_then(|link| {
        image_reference(&link, &config.keyword, timestamp_millis, &config.output_dir)
    }) {
        Ok(image) => Some(image),
        Err(e) => {
            report.record("fetch_image", e);
            None
        }
    };

    if let Some(image) = &image {
        match download_image(&http, image).await {
            Ok(bytes) => report.image_bytes = Some(bytes),
            Err(e) => report.record("download_image", e),
        }
    }

    let snapshot = RunSnapshot::new(
        &config.keyword,
        &config.display_title,
        timestamp_millis,
        &titles,
        image.as_ref(),
    );
    match write_snapshot(&snapshot, &config.output_dir).await {
        Ok(path) => report.snapshot_path = Some(path),
        Err(e) => report.record("write_snapshot", e),
    }

    // ---- Notify ----
    let notifier = Notifier::new(http, config.webhook_url.clone());
    let image_url = image.as_ref().map(|i| i.url.as_str());
    match notifier.notify(&titles, &config.display_title, image_url).await {
        Ok(outcome) => report.notification = Some(outcome),
        Err(e) => report.record("notify", e),
    }

    info!(
        titles = titles.len(),
        image = image.is_some(),
        errors = report.errors.len(),
        "Run finished"
    );
    report.titles = Some(titles);
    report.image = image;
    report
}
