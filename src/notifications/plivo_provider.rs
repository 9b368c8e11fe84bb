//! Plivo SMS notification provider implementation.
//!
//! Plivo API Reference: https://www.plivo.com/docs/messaging/api/message

use super::provider::Notifier;
use super::template::{SMS_TEMPLATE, render, resolve_template};
use crate::config::PlivoConfig;
use crate::error::{AppError, AppResult};
use crate::external::client::HTTP_CLIENT;
use crate::runner::RunResult;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

/// Response envelope; Plivo reports failures in `error`
#[derive(Debug, Deserialize)]
struct PlivoResponse {
    #[serde(default)]
    error: Option<String>,
}

/// Plivo SMS provider
#[derive(Clone)]
pub struct PlivoProvider {
    config: PlivoConfig,
}

impl PlivoProvider {
    pub fn new(config: PlivoConfig) -> Self {
        Self { config }
    }

    fn build_payload(&self, text: String) -> serde_json::Value {
        json!({
            "src": self.config.from,
            "dst": self.config.to,
            "text": text,
        })
    }

    fn provider_error(&self, message: String) -> AppError {
        AppError::Provider {
            channel: self.name().to_string(),
            code: None,
            message,
        }
    }
}

#[async_trait]
impl Notifier for PlivoProvider {
    async fn deliver(&self, result: &RunResult) -> AppResult<()> {
        let template = resolve_template(self.config.template.as_deref(), SMS_TEMPLATE);
        let payload = self.build_payload(render(template, result)?);

        let response = HTTP_CLIENT
            .post(self.config.messages_url())
            .basic_auth(&self.config.auth_id, Some(&self.config.auth_token))
            .json(&payload)
            .send()
            .await
            .map_err(|e| AppError::transport(self.name(), e))?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let error = serde_json::from_str::<PlivoResponse>(&body)
            .ok()
            .and_then(|r| r.error)
            .filter(|e| !e.is_empty());

        match error {
            Some(message) => Err(self.provider_error(message)),
            None if status.is_success() => {
                tracing::debug!(
                    channel = self.name(),
                    status = status.as_u16(),
                    "plivo accepted message"
                );
                Ok(())
            }
            None => Err(AppError::Delivery {
                channel: self.name().to_string(),
                status: status.as_u16(),
                body,
            }),
        }
    }

    fn name(&self) -> &'static str {
        "plivo"
    }
}
