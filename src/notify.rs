//! Slack incoming-webhook notification.
//!
//! The message uses Block Kit with three blocks, in order:
//! 1. a header with the display title between two marker glyphs
//! 2. a mrkdwn section with the headlines, one per line, in a code block
//! 3. an image block pointing at the remote image URL (omitted when the run
//!    found no image)
//!
//! Only status 200 counts as delivered. A missing webhook URL is not an
//! error: the stage is skipped and logged.

use crate::error::PipelineError;
use crate::models::ArticleTitleList;
use crate::utils::truncate_for_log;
use itertools::Itertools;
use reqwest::Client;
use reqwest::StatusCode;
use serde::Serialize;
use tracing::{error, info, instrument, warn};

const HEADER_MARKER: &str = "🔴";

/// What happened to the notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationOutcome {
    /// The webhook accepted the message.
    Sent,
    /// No webhook URL configured; nothing was sent.
    Skipped,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct NotificationPayload {
    pub blocks: Vec<Block>,
}

#[derive(Debug, Serialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    Header { text: TextObject },
    Section { text: TextObject },
    Image { image_url: String, alt_text: String },
}

#[derive(Debug, Serialize, PartialEq)]
pub struct TextObject {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emoji: Option<bool>,
}

impl NotificationPayload {
    /// Assemble the message for `titles` under `display_title`.
    ///
    /// Backticks inside a headline become `'` so the code block cannot be
    /// closed early.
    pub fn build(titles: &ArticleTitleList, display_title: &str, image_url: Option<&str>) -> Self {
        let body = titles
            .non_empty()
            .map(|title| title.replace('`', "'"))
            .join("\n");

        let mut blocks = vec![
            Block::Header {
                text: TextObject {
                    kind: "plain_text",
                    text: format!("{HEADER_MARKER} Today's {display_title} {HEADER_MARKER}"),
                    emoji: Some(true),
                },
            },
            Block::Section {
                text: TextObject {
                    kind: "mrkdwn",
                    text: format!("```{body}```"),
                    emoji: None,
                },
            },
        ];

        if let Some(url) = image_url {
            blocks.push(Block::Image {
                image_url: url.to_string(),
                alt_text: format!("{display_title} image"),
            });
        }

        Self { blocks }
    }
}

/// Posts run summaries to a Slack webhook.
#[derive(Debug, Clone)]
pub struct Notifier {
    http: Client,
    webhook_url: Option<String>,
}

impl Notifier {
    pub fn new(http: Client, webhook_url: Option<String>) -> Self {
        Self { http, webhook_url }
    }

    /// Send `titles` and the image link to the webhook.
    ///
    /// # Returns
    ///
    /// [`NotificationOutcome::Skipped`] without any network call when no
    /// webhook is configured, [`NotificationOutcome::Sent`] on status 200.
    ///
    /// # Errors
    ///
    /// [`PipelineError::Notification`] for any other status (or a transport
    /// failure, reported with status 0).
    #[instrument(level = "info", skip_all, fields(count = titles.len()))]
    pub async fn notify(
        &self,
        titles: &ArticleTitleList,
        display_title: &str,
        image_url: Option<&str>,
    ) -> Result<NotificationOutcome, PipelineError> {
        let Some(webhook_url) = self.webhook_url.as_deref() else {
            warn!("SLACK_WEBHOOK_URL not set; skipping notification");
            return Ok(NotificationOutcome::Skipped);
        };

        let payload = NotificationPayload::build(titles, display_title, image_url);

        let response = self
            .http
            .post(webhook_url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "Webhook request failed");
                PipelineError::Notification {
                    status: 0,
                    body: e.to_string(),
                }
            })?;

        let status = response.status();
        if status == StatusCode::OK {
            info!("Slack message sent");
            return Ok(NotificationOutcome::Sent);
        }

        let body = response.text().await.unwrap_or_default();
        error!(
            status = status.as_u16(),
            body = %truncate_for_log(&body, 300),
            "Slack rejected the message"
        );
        Err(PipelineError::Notification {
            status: status.as_u16(),
            body,
        })
    }
}
