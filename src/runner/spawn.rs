//! Spawn the child process and wait for it.

use std::ffi::OsString;
use std::process::Stdio;

use jiff::Timestamp;
use tokio::process::Command;

use super::result::{RunError, RunResult};

/// Runs `args[0]` with the remaining arguments and waits for it to exit.
///
/// The child inherits stdin, stdout and stderr. `start` is taken right before
/// spawning and `end` right after the process terminates or fails to start.
/// Failures are recorded on the returned [`RunResult`] rather than returned,
/// so that they can still be reported through the configured notifiers.
///
/// Arguments reach the child byte for byte; the result keeps a lossy UTF-8
/// copy for messages.
pub async fn run_command(argv: Vec<OsString>) -> RunResult {
    let start = Timestamp::now();
    let args: Vec<String> = argv
        .iter()
        .map(|arg| arg.to_string_lossy().into_owned())
        .collect();

    let Some((program_os, rest)) = argv.split_first() else {
        tracing::error!("{}", RunError::NoCommand);
        return RunResult::new(args, start, start, false).with_error(RunError::NoCommand);
    };
    let program = program_os.to_string_lossy().into_owned();

    let mut command = Command::new(program_os);
    command
        .args(rest)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit());

    tracing::debug!(program = %program, args = ?&args[1..], "spawning command");

    let mut child = match command.spawn() {
        Ok(child) => child,
        Err(source) => {
            let end = Timestamp::now();
            tracing::error!(program = %program, error = %source, "failed to start command");
            return RunResult::new(args, start, end, false)
                .with_error(RunError::Spawn { program, source });
        }
    };

    match child.wait().await {
        Ok(status) => {
            let end = Timestamp::now();
            tracing::info!(
                program = %program,
                success = status.success(),
                exit_code = ?status.code(),
                "command finished"
            );
            RunResult::new(args, start, end, status.success()).with_exit_code(status.code())
        }
        Err(source) => {
            let end = Timestamp::now();
            tracing::error!(program = %program, error = %source, "failed to wait for command");
            RunResult::new(args, start, end, false).with_error(RunError::Wait { program, source })
        }
    }
}
