//! Plain-text headline file.

use crate::error::PipelineError;
use crate::models::ArticleTitleList;
use crate::utils::{artifact_filename, ensure_output_dir};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{info, instrument};

/// Write `titles` to `<folder>/<timestamp>_<keyword>.txt`.
///
/// Blank titles are skipped and every remaining title is followed by a
/// newline, so an empty list yields an empty file. An existing file at the
/// same path is overwritten. `folder` is created if missing.
///
/// # Errors
///
/// [`PipelineError::Persistence`] on any I/O failure.
#[instrument(level = "info", skip_all, fields(%keyword, folder = %folder.display()))]
pub async fn save_titles(
    titles: &ArticleTitleList,
    keyword: &str,
    timestamp_millis: i64,
    folder: &Path,
) -> Result<PathBuf, PipelineError> {
    ensure_output_dir(folder)
        .await
        .map_err(|source| PipelineError::Persistence {
            path: folder.to_path_buf(),
            source,
        })?;

    let path = folder.join(artifact_filename(timestamp_millis, keyword, "txt"));
    let contents = titles
        .non_empty()
        .map(|t| format!("{t}\n"))
        .collect::<String>();

    fs::write(&path, contents)
        .await
        .map_err(|source| PipelineError::Persistence {
            path: path.clone(),
            source,
        })?;

    info!(path = %path.display(), count = titles.non_empty().count(), "Wrote title list");
    Ok(path)
}
