//! Representative image: filename derivation and download.
//!
//! The image link is used in two forms. The extension comes from the link
//! with its query string and fragment removed; the download (and the Slack
//! image block) use the link unchanged, since signed image hosts reject
//! requests without their query parameters.

use crate::error::PipelineError;
use crate::models::ImageReference;
use crate::utils::{artifact_filename, ensure_output_dir};
use futures::StreamExt;
use reqwest::Client;
use std::path::Path;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{info, instrument, warn};
use url::Url;

/// Used when the link's last path segment has no usable extension.
pub const FALLBACK_EXTENSION: &str = "jpg";

/// Extension of the last path segment, ignoring query string and fragment.
///
/// Returns `None` when the segment has no dot or the suffix does not look
/// like a file extension.
pub fn link_extension(link: &Url) -> Option<String> {
    let last = link.path_segments()?.last()?;
    let (stem, ext) = last.rsplit_once('.')?;
    let plausible = !stem.is_empty()
        && !ext.is_empty()
        && ext.len() <= 5
        && ext.chars().all(|c| c.is_ascii_alphanumeric());
    plausible.then(|| ext.to_string())
}

/// Work out where the image for this run will be stored.
///
/// The file is named `<timestamp>_<keyword>.<extension>` under `folder`.
///
/// # Errors
///
/// [`PipelineError::MalformedResponse`] when `link` is not an absolute URL.
pub fn image_reference(
    link: &str,
    keyword: &str,
    timestamp_millis: i64,
    folder: &Path,
) -> Result<ImageReference, PipelineError> {
    let parsed = Url::parse(link).map_err(|e| PipelineError::MalformedResponse {
        endpoint: "image".to_string(),
        reason: format!("image link {link:?} is not a valid URL: {e}"),
    })?;

    let file_extension = link_extension(&parsed).unwrap_or_else(|| {
        warn!(%link, fallback = FALLBACK_EXTENSION, "Image link has no recognisable extension");
        FALLBACK_EXTENSION.to_string()
    });
    let local_path = folder.join(artifact_filename(timestamp_millis, keyword, &file_extension));

    Ok(ImageReference {
        url: link.to_string(),
        file_extension,
        local_path,
    })
}

/// Stream `image.url` into `image.local_path`.
///
/// The output folder is created if missing. A partially written file is
/// removed when the transfer fails.
///
/// # Returns
///
/// The number of bytes written.
#[instrument(level = "info", skip_all, fields(url = %image.url, path = %image.local_path.display()))]
pub async fn download_image(http: &Client, image: &ImageReference) -> Result<u64, PipelineError> {
    let download_err = |status: Option<u16>, message: String| PipelineError::Download {
        url: image.url.clone(),
        status,
        message,
    };

    let response = http
        .get(&image.url)
        .send()
        .await
        .map_err(|e| download_err(None, e.to_string()))?;

    let status = response.status();
    info!(status = status.as_u16(), "Image download responded");
    if !status.is_success() {
        return Err(download_err(
            Some(status.as_u16()),
            format!("unexpected status {status}"),
        ));
    }

    if let Some(parent) = image.local_path.parent() {
        ensure_output_dir(parent)
            .await
            .map_err(|source| PipelineError::Persistence {
                path: parent.to_path_buf(),
                source,
            })?;
    }

    let mut file = fs::File::create(&image.local_path)
        .await
        .map_err(|source| PipelineError::Persistence {
            path: image.local_path.clone(),
            source,
        })?;

    let mut written: u64 = 0;
    let mut stream = response.bytes_stream();
    let result: Result<(), PipelineError> = async {
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| download_err(Some(status.as_u16()), e.to_string()))?;
            file.write_all(&chunk)
                .await
                .map_err(|source| PipelineError::Persistence {
                    path: image.local_path.clone(),
                    source,
                })?;
            written += chunk.len() as u64;
        }
        file.flush().await.map_err(|source| PipelineError::Persistence {
            path: image.local_path.clone(),
            source,
        })
    }
    .await;

    if let Err(e) = result {
        drop(file);
        if let Err(rm) = fs::remove_file(&image.local_path).await {
            warn!(error = %rm, "Could not remove partial image file");
        }
        return Err(e);
    }

    info!(bytes = written, "Saved image");
    Ok(written)
}
