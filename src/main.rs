//! # Naver News Slack
//!
//! A single-run batch job that searches Naver for a keyword, saves the
//! latest headlines and a representative image, and posts a summary to a
//! Slack incoming webhook. Meant to be started periodically by an external
//! scheduler (cron, a Kubernetes CronJob, ...).
//!
//! ## Usage
//!
//! ```sh
//! KEYWORD=stocks NAVER_CLIENT_ID=... NAVER_CLIENT_SECRET=... \
//! SLACK_WEBHOOK_URL=https://hooks.slack.com/services/... naver_news_slack
//! ```
//!
//! ## Architecture
//!
//! The application follows a pipeline architecture:
//! 1. **News**: Fetch headlines from the news search and strip their markup
//! 2. **Persistence**: Write the headlines to `<timestamp>_<keyword>.txt`
//! 3. **Image**: Find the first image result and download it
//! 4. **Snapshot**: Write a JSON summary of the run
//! 5. **Notify**: Post the headlines and image to Slack
//!
//! Stage failures are logged and do not abort the process. Only a missing
//! keyword (or an invalid option) produces a non-zero exit code.

use chrono::Utc;
use clap::Parser;
use std::process::ExitCode;
use tracing::{debug, error, info, warn};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod api;
mod cli;
mod config;
mod error;
mod image;
mod models;
mod notify;
mod outputs;
mod pipeline;
mod utils;

use cli::Cli;
use config::RunConfig;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!(version = env!("CARGO_PKG_VERSION"), "naver_news_slack starting up");

    let args = Cli::parse();
    let config = match RunConfig::from_cli(args) {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Invalid configuration; nothing was run");
            return ExitCode::from(2);
        }
    };
    debug!(?config, "Loaded configuration");
    info!(
        keyword = %config.keyword,
        title = %config.display_title,
        output_dir = %config.output_dir.display(),
        "Configuration loaded"
    );

    let timestamp = Utc::now().timestamp_millis();
    let report = pipeline::run(&config, timestamp).await;

    info!(
        titles = ?report.titles.as_ref().map(|t| t.len()),
        titles_file = ?report.titles_path,
        image_file = ?report.image.as_ref().map(|i| &i.local_path),
        image_bytes = ?report.image_bytes,
        snapshot_file = ?report.snapshot_path,
        notification = ?report.notification,
        "Run artifacts"
    );

    let elapsed = start_time.elapsed();
    if report.is_clean() {
        info!(?elapsed, "Execution complete");
    } else {
        warn!(
            ?elapsed,
            errors = report.errors.len(),
            "Execution complete with errors"
        );
    }

    ExitCode::SUCCESS
}
