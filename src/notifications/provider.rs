//! Core notifier trait.
//!
//! This module provides the abstraction shared by every notification channel,
//! so the dispatcher can drive Slack, Twilio and Plivo the same way.

use crate::error::AppResult;
use crate::runner::RunResult;
use async_trait::async_trait;

/// A configured channel able to report a finished command.
///
/// Uses `async_trait` to support async methods with dynamic dispatch.
///
/// # Example Implementation
/// ```ignore
/// use async_trait::async_trait;
///
/// pub struct PagerNotifier {
///     config: PagerConfig,
/// }
///
/// #[async_trait]
/// impl Notifier for PagerNotifier {
///     async fn deliver(&self, result: &RunResult) -> AppResult<()> {
///         let text = render(&self.config.template, result)?;
///         // one request, no retry
///     }
///
///     fn name(&self) -> &'static str {
///         "pager"
///     }
/// }
/// ```
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Renders a message for `result` and sends it with exactly one request.
    ///
    /// # Returns
    /// `Ok(())` once the channel accepted the message; otherwise the render,
    /// transport or provider error. Nothing is retried.
    async fn deliver(&self, result: &RunResult) -> AppResult<()>;

    /// Returns the channel name used in logs and failure reports
    fn name(&self) -> &'static str;
}
