//! CLI argument parsing with clap
//!
//! `hey` owns no flags: every token after the program name belongs to the
//! command being wrapped.

use clap::Parser;
use std::ffi::OsString;

/// Run a command and report how it went to the configured channels
#[derive(Parser, Debug)]
#[command(name = "hey")]
#[command(about = "Run a command and notify Slack, Twilio or Plivo when it finishes")]
#[command(long_about = "
hey runs the given command with its arguments, waits for it to finish and then
sends a short report to every channel configured in ~/.hey.toml.

EXAMPLES:
    # Notify when a long build finishes
    hey make release

    # Flags are passed through untouched
    hey cargo test --workspace -- --nocapture
")]
#[command(disable_help_flag = true, disable_version_flag = true)]
pub struct Cli {
    /// Command to run followed by its arguments
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, value_name = "COMMAND")]
    pub command: Vec<OsString>,
}
