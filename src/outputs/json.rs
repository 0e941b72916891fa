//! JSON snapshot of a run.
//!
//! Written next to the text file as `<timestamp>_<keyword>.json`, so
//! downstream tooling can pick up the headlines and image without parsing
//! the log. Fields that a failed stage never produced are `null`.

use crate::error::PipelineError;
use crate::models::{ArticleTitleList, ImageReference};
use crate::utils::{artifact_filename, ensure_output_dir};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{info, instrument};

#[derive(Debug, Serialize)]
pub struct RunSnapshot<'a> {
    pub keyword: &'a str,
    pub display_title: &'a str,
    /// Run timestamp, epoch milliseconds.
    pub timestamp: i64,
    /// Same instant as `timestamp`, RFC 3339 UTC.
    pub fetched_at: Option<String>,
    pub titles: &'a ArticleTitleList,
    pub image: Option<&'a ImageReference>,
}

impl<'a> RunSnapshot<'a> {
    pub fn new(
        keyword: &'a str,
        display_title: &'a str,
        timestamp_millis: i64,
        titles: &'a ArticleTitleList,
        image: Option<&'a ImageReference>,
    ) -> Self {
        let fetched_at = DateTime::<Utc>::from_timestamp_millis(timestamp_millis)
            .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Millis, true));
        Self {
            keyword,
            display_title,
            timestamp: timestamp_millis,
            fetched_at,
            titles,
            image,
        }
    }
}

/// Write `snapshot` to `<folder>/<timestamp>_<keyword>.json`.
///
/// # Errors
///
/// [`PipelineError::Persistence`] if the folder or file cannot be written.
#[instrument(level = "info", skip_all, fields(folder = %folder.display()))]
pub async fn write_snapshot(snapshot: &RunSnapshot<'_>, folder: &Path) -> Result<PathBuf, PipelineError> {
    let json = serde_json::to_string_pretty(snapshot).map_err(|e| PipelineError::Persistence {
        path: folder.to_path_buf(),
        source: std::io::Error::other(e),
    })?;

    ensure_output_dir(folder)
        .await
        .map_err(|source| PipelineError::Persistence {
            path: folder.to_path_buf(),
            source,
        })?;

    let path = folder.join(artifact_filename(snapshot.timestamp, snapshot.keyword, "json"));
    fs::write(&path, json)
        .await
        .map_err(|source| PipelineError::Persistence {
            path: path.clone(),
            source,
        })?;

    info!(path = %path.display(), "Wrote JSON snapshot");
    Ok(path)
}
