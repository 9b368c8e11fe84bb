use thiserror::Error;

use crate::notifications::RenderError;

/// Errors raised while delivering a notification.
///
/// Every variant is scoped to a single channel: a failure here is recorded
/// against that notifier and never stops delivery to the others.
#[derive(Error, Debug)]
pub enum AppError {
    /// The message template could not be rendered
    #[error("Template rendering failed")]
    Render {
        #[from]
        source: RenderError,
    },

    /// The request never produced an HTTP response
    #[error("Request to {channel} failed")]
    Transport {
        channel: String,
        #[source]
        source: reqwest::Error,
    },

    /// The endpoint answered with a non-success status
    #[error("{channel} responded with HTTP {status}: {body}")]
    Delivery {
        channel: String,
        status: u16,
        body: String,
    },

    /// The provider accepted the request but reported an error
    #[error("{channel} rejected the message: {message}{}", code_suffix(.code))]
    Provider {
        channel: String,
        code: Option<i64>,
        message: String,
    },
}

impl AppError {
    /// Creates a transport error for `channel`
    pub fn transport(channel: impl Into<String>, source: reqwest::Error) -> Self {
        AppError::Transport {
            channel: channel.into(),
            source,
        }
    }
}

fn code_suffix(code: &Option<i64>) -> String {
    code.map(|c| format!(" (code {c})")).unwrap_or_default()
}

/// Type alias for Result with AppError to simplify function signatures
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delivery_error_message() {
        let err = AppError::Delivery {
            channel: "slack".to_string(),
            status: 404,
            body: "no_service".to_string(),
        };
        assert_eq!(err.to_string(), "slack responded with HTTP 404: no_service");
    }

    #[test]
    fn test_provider_error_message_with_and_without_code() {
        let with_code = AppError::Provider {
            channel: "twilio".to_string(),
            code: Some(21211),
            message: "Invalid 'To' Phone Number".to_string(),
        };
        assert_eq!(
            with_code.to_string(),
            "twilio rejected the message: Invalid 'To' Phone Number (code 21211)"
        );

        let without_code = AppError::Provider {
            channel: "plivo".to_string(),
            code: None,
            message: "invalid src".to_string(),
        };
        assert_eq!(without_code.to_string(), "plivo rejected the message: invalid src");
    }
}
