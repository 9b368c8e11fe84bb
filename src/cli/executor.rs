//! Command executor
//!
//! Runs the wrapped command, fans the result out to the configured
//! notifiers and decides the process exit status.

use super::parser::Cli;
use crate::config::Settings;
use crate::error::error_chain;
use crate::notifications::{DeliveryFailure, NotifierSet};
use crate::runner::{RunResult, run_command};

/// Execute one `hey` invocation with the loaded settings
///
/// The command always runs to completion (or fails to start) before any
/// notification is attempted, and every configured notifier is attempted
/// even when the command could not be run.
///
/// # Returns
/// The exit status for the process, see [`exit_status`]
pub async fn execute(cli: Cli, settings: &Settings) -> u8 {
    let result = run_command(cli.command).await;

    let notifiers = NotifierSet::from_settings(settings);
    tracing::debug!(channels = ?notifiers.names(), "dispatching notifications");

    let failures = notifiers.dispatch(&result).await;
    for failure in &failures {
        tracing::error!(
            channel = failure.channel,
            error = %error_chain(&failure.error),
            "notification delivery failed"
        );
    }

    exit_status(&result, &failures)
}

/// Exit status policy
///
/// `1` when the command did not succeed or any notifier failed, `0`
/// otherwise. The child's own exit code is not propagated.
pub fn exit_status(result: &RunResult, failures: &[DeliveryFailure]) -> u8 {
    if result.success() && failures.is_empty() { 0 } else { 1 }
}
