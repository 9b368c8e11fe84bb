//! Twilio SMS notification provider implementation.
//!
//! Sends the rendered message through Twilio's Messages REST API.
//!
//! Twilio API Reference: https://www.twilio.com/docs/messaging/api/message-resource

use super::provider::Notifier;
use super::template::{SMS_TEMPLATE, render, resolve_template};
use crate::config::TwilioConfig;
use crate::error::{AppError, AppResult};
use crate::external::client::HTTP_CLIENT;
use crate::runner::RunResult;
use async_trait::async_trait;
use serde::Deserialize;

/// Error body returned by Twilio for rejected requests
#[derive(Debug, Deserialize)]
struct TwilioErrorBody {
    code: Option<i64>,
    message: String,
}

/// Twilio SMS provider
#[derive(Clone)]
pub struct TwilioProvider {
    config: TwilioConfig,
}

impl TwilioProvider {
    /// Creates a new Twilio provider with configuration
    ///
    /// # Arguments
    /// * `config` - Account credentials, phone numbers and optional template
    pub fn new(config: TwilioConfig) -> Self {
        Self { config }
    }

    /// Form fields for the Messages API
    fn build_form<'a>(&'a self, body: &'a str) -> [(&'static str, &'a str); 3] {
        [
            ("From", self.config.from.as_str()),
            ("To", self.config.to.as_str()),
            ("Body", body),
        ]
    }
}

#[async_trait]
impl Notifier for TwilioProvider {
    /// Sends one SMS through Twilio
    ///
    /// A non-2xx response becomes a provider error carrying Twilio's error code
    /// when the body can be decoded.
    async fn deliver(&self, result: &RunResult) -> AppResult<()> {
        let template = resolve_template(self.config.template.as_deref(), SMS_TEMPLATE);
        let text = render(template, result)?;

        let response = HTTP_CLIENT
            .post(self.config.messages_url())
            .basic_auth(&self.config.account_sid, Some(&self.config.auth_token))
            .form(&self.build_form(&text))
            .send()
            .await
            .map_err(|e| AppError::transport(self.name(), e))?;

        let status = response.status();
        if status.is_success() {
            tracing::debug!(
                channel = self.name(),
                status = status.as_u16(),
                "twilio accepted message"
            );
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        Err(match serde_json::from_str::<TwilioErrorBody>(&body) {
            Ok(error) => AppError::Provider {
                channel: self.name().to_string(),
                code: error.code,
                message: error.message,
            },
            Err(_) => AppError::Delivery {
                channel: self.name().to_string(),
                status: status.as_u16(),
                body,
            },
        })
    }

    fn name(&self) -> &'static str {
        "twilio"
    }
}
