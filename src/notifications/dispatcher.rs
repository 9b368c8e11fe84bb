//! Notification fan-out.
//!
//! Builds the configured notifiers and delivers one Run Result to each of
//! them in turn, collecting failures instead of stopping at the first one.

use super::plivo_provider::PlivoProvider;
use super::provider::Notifier;
use super::slack_provider::SlackProvider;
use super::twilio_provider::TwilioProvider;
use crate::config::Settings;
use crate::error::AppError;
use crate::runner::RunResult;

/// A notifier that did not deliver its message
#[derive(Debug)]
pub struct DeliveryFailure {
    pub channel: &'static str,
    pub error: AppError,
}

/// The notifiers enabled for this invocation, in delivery order
pub struct NotifierSet {
    notifiers: Vec<Box<dyn Notifier>>,
}

impl NotifierSet {
    pub fn new(notifiers: Vec<Box<dyn Notifier>>) -> Self {
        Self { notifiers }
    }

    /// Creates one notifier per configured section
    ///
    /// Order is fixed: Plivo, Twilio, then the Slack webhook. Sections that
    /// are absent contribute nothing, so an empty configuration yields an
    /// empty set.
    pub fn from_settings(settings: &Settings) -> Self {
        let mut notifiers: Vec<Box<dyn Notifier>> = Vec::new();

        if let Some(plivo) = &settings.plivo {
            notifiers.push(Box::new(PlivoProvider::new(plivo.clone())));
        }
        if let Some(twilio) = &settings.twilio {
            notifiers.push(Box::new(TwilioProvider::new(twilio.clone())));
        }
        if let Some(slack) = &settings.slack {
            notifiers.push(Box::new(SlackProvider::new(slack.clone())));
        }

        Self::new(notifiers)
    }

    pub fn len(&self) -> usize {
        self.notifiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notifiers.is_empty()
    }

    /// Channel names in delivery order
    pub fn names(&self) -> Vec<&'static str> {
        self.notifiers.iter().map(|n| n.name()).collect()
    }

    /// Delivers `result` to every notifier, one after another
    ///
    /// Every notifier is attempted exactly once regardless of earlier
    /// failures.
    ///
    /// # Returns
    /// The failures in delivery order; empty when every channel succeeded
    pub async fn dispatch(&self, result: &RunResult) -> Vec<DeliveryFailure> {
        let mut failures = Vec::new();

        for notifier in &self.notifiers {
            let channel = notifier.name();
            tracing::debug!(channel, "delivering notification");

            match notifier.deliver(result).await {
                Ok(()) => tracing::info!(channel, "notification delivered"),
                Err(error) => failures.push(DeliveryFailure { channel, error }),
            }
        }

        failures
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{PlivoConfig, SlackConfig, TwilioConfig};
    use crate::error::AppResult;
    use async_trait::async_trait;
    use jiff::Timestamp;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FakeNotifier {
        name: &'static str,
        fail: bool,
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl Notifier for FakeNotifier {
        async fn deliver(&self, _result: &RunResult) -> AppResult<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                Err(AppError::Delivery {
                    channel: self.name.to_string(),
                    status: 500,
                    body: String::new(),
                })
            } else {
                Ok(())
            }
        }

        fn name(&self) -> &'static str {
            self.name
        }
    }

    fn fake(name: &'static str, fail: bool) -> (Box<dyn Notifier>, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let notifier = FakeNotifier {
            name,
            fail,
            calls: calls.clone(),
        };
        (Box::new(notifier), calls)
    }

    fn run_result() -> RunResult {
        let now = Timestamp::now();
        RunResult::new(vec!["true".to_string()], now, now, true)
    }

    #[tokio::test]
    async fn test_dispatch_does_not_short_circuit() {
        let (first, first_calls) = fake("first", true);
        let (second, second_calls) = fake("second", false);
        let (third, third_calls) = fake("third", true);
        let set = NotifierSet::new(vec![first, second, third]);

        let failures = set.dispatch(&run_result()).await;

        assert_eq!(first_calls.load(Ordering::SeqCst), 1);
        assert_eq!(second_calls.load(Ordering::SeqCst), 1);
        assert_eq!(third_calls.load(Ordering::SeqCst), 1);
        let channels: Vec<_> = failures.iter().map(|f| f.channel).collect();
        assert_eq!(channels, vec!["first", "third"]);
    }

    #[tokio::test]
    async fn test_dispatch_all_succeed() {
        let (a, _) = fake("a", false);
        let (b, _) = fake("b", false);
        let set = NotifierSet::new(vec![a, b]);

        assert!(set.dispatch(&run_result()).await.is_empty());
    }

    #[tokio::test]
    async fn test_empty_set_dispatches_nothing() {
        let set = NotifierSet::from_settings(&Settings::default());

        assert!(set.is_empty());
        assert!(set.dispatch(&run_result()).await.is_empty());
    }

    #[test]
    fn test_from_settings_fixed_order() {
        let settings = Settings {
            slack: Some(SlackConfig {
                url: "https://hooks.example.com".to_string(),
                ..Default::default()
            }),
            twilio: Some(TwilioConfig::default()),
            plivo: Some(PlivoConfig::default()),
            ..Default::default()
        };

        let set = NotifierSet::from_settings(&settings);

        assert_eq!(set.len(), 3);
        assert_eq!(set.names(), vec!["plivo", "twilio", "slack"]);
    }

    #[test]
    fn test_from_settings_only_present_sections() {
        let settings = Settings {
            slack: Some(SlackConfig::default()),
            ..Default::default()
        };

        assert_eq!(NotifierSet::from_settings(&settings).names(), vec!["slack"]);
    }
}
