//! Notification system with pluggable providers.
//!
//! The core trait `Notifier` lets the dispatcher drive every channel the same
//! way. Each provider renders its own message from the Run Result and sends it
//! with a single HTTP request.

mod dispatcher;
mod plivo_provider;
mod provider;
mod slack_provider;
mod twilio_provider;

pub mod template;

pub use dispatcher::{DeliveryFailure, NotifierSet};
pub use plivo_provider::PlivoProvider;
pub use provider::Notifier;
pub use slack_provider::SlackProvider;
pub use template::{RenderError, render};
pub use twilio_provider::TwilioProvider;
