//! The record of one command invocation.

use std::time::Duration;

use jiff::Timestamp;
use thiserror::Error;

/// Reasons a command could not be run to completion.
///
/// A non-zero exit status is a normal outcome and is not represented here.
#[derive(Debug, Error)]
pub enum RunError {
    /// No command was given on the command line
    #[error("you must supply a command to run")]
    NoCommand,

    /// The process could not be started
    #[error("failed to start `{program}`")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// Waiting for the process to finish failed
    #[error("failed to wait for `{program}`")]
    Wait {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

/// Identity, timing and outcome of a finished command invocation.
///
/// A `RunResult` only exists once the child has terminated (or could not be
/// started), so `end` is always known and never earlier than `start`.
/// Notifiers receive it by shared reference.
#[derive(Debug)]
pub struct RunResult {
    args: Vec<String>,
    start: Timestamp,
    end: Timestamp,
    success: bool,
    exit_code: Option<i32>,
    error: Option<RunError>,
}

impl RunResult {
    /// Creates a result for `args` that ran from `start` to `end`.
    ///
    /// An `end` earlier than `start` is clamped to `start`.
    pub fn new(args: Vec<String>, start: Timestamp, end: Timestamp, success: bool) -> Self {
        Self {
            args,
            start,
            end: end.max(start),
            success,
            exit_code: None,
            error: None,
        }
    }

    /// Attaches the numeric exit code reported by the platform
    pub fn with_exit_code(mut self, code: Option<i32>) -> Self {
        self.exit_code = code;
        self
    }

    /// Attaches a spawn or wait error. The run is then never successful.
    pub fn with_error(mut self, error: RunError) -> Self {
        self.success = false;
        self.error = Some(error);
        self
    }

    /// The command and its arguments as supplied
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// The arguments joined by single spaces
    pub fn command_line(&self) -> String {
        self.args.join(" ")
    }

    pub fn start(&self) -> Timestamp {
        self.start
    }

    pub fn end(&self) -> Timestamp {
        self.end
    }

    /// Wall-clock time between `start` and `end`
    pub fn duration(&self) -> Duration {
        self.end.duration_since(self.start).unsigned_abs()
    }

    /// Whether the process was started and reported success
    pub fn success(&self) -> bool {
        self.success
    }

    pub fn exit_code(&self) -> Option<i32> {
        self.exit_code
    }

    pub fn error(&self) -> Option<&RunError> {
        self.error.as_ref()
    }
}
