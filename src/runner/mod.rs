//! Child process execution.
//!
//! Runs the user's command with inherited stdio and captures the outcome as a
//! [`RunResult`] that notifiers render messages from.

mod result;
mod spawn;

pub use result::{RunError, RunResult};
pub use spawn::run_command;
