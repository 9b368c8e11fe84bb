//! Slack webhook notification provider implementation.
//!
//! Posts the rendered message to a Slack-compatible incoming webhook using the
//! global `HTTP_CLIENT`.

use super::provider::Notifier;
use super::template::{WEBHOOK_TEMPLATE, render, resolve_template};
use crate::config::SlackConfig;
use crate::error::{AppError, AppResult};
use crate::external::client::HTTP_CLIENT;
use crate::runner::RunResult;
use async_trait::async_trait;
use serde_json::json;

/// Slack (or compatible) incoming webhook provider
///
/// # Example
/// ```ignore
/// let config = SlackConfig {
///     url: "https://hooks.slack.com/services/T000/B000/XXX".to_string(),
///     ..Default::default()
/// };
/// let provider = SlackProvider::new(config);
/// provider.deliver(&result).await?;
/// ```
#[derive(Clone)]
pub struct SlackProvider {
    config: SlackConfig,
}

impl SlackProvider {
    /// Creates a new webhook provider with configuration
    ///
    /// # Arguments
    /// * `config` - Webhook configuration (URL, optional template and display fields)
    pub fn new(config: SlackConfig) -> Self {
        Self { config }
    }

    /// Builds the webhook payload around the rendered `text`
    ///
    /// Optional display fields are only included when set and non-empty.
    fn build_payload(&self, text: String) -> serde_json::Value {
        let mut body = json!({ "text": text });

        let optional = [
            ("icon_url", &self.config.icon_url),
            ("icon_emoji", &self.config.icon_emoji),
            ("username", &self.config.username),
        ];
        for (key, value) in optional {
            if let Some(value) = value.as_deref().filter(|v| !v.is_empty()) {
                body[key] = json!(value);
            }
        }

        body
    }
}

#[async_trait]
impl Notifier for SlackProvider {
    /// Sends the message to the webhook
    ///
    /// Transport failures and non-2xx responses are both returned as errors.
    async fn deliver(&self, result: &RunResult) -> AppResult<()> {
        let template = resolve_template(self.config.template.as_deref(), WEBHOOK_TEMPLATE);
        let payload = self.build_payload(render(template, result)?);

        let response = HTTP_CLIENT
            .post(&self.config.url)
            .header("Content-Type", "application/json")
            .json(&payload)
            .send()
            .await
            .map_err(|e| AppError::transport(self.name(), e))?;

        let status = response.status();
        if status.is_success() {
            tracing::debug!(
                channel = self.name(),
                status = status.as_u16(),
                "webhook accepted message"
            );
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        Err(AppError::Delivery {
            channel: self.name().to_string(),
            status: status.as_u16(),
            body,
        })
    }

    fn name(&self) -> &'static str {
        "slack"
    }
}
