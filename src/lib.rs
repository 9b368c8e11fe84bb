//! hey library
//!
//! Runs a command and reports its outcome to Slack, Twilio and Plivo.

pub mod cli;
pub mod config;
pub mod error;
pub mod external;
pub mod logger;
pub mod notifications;
pub mod runner;
