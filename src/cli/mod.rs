//! CLI module for hey
//!
//! This module provides command-line interface functionality including:
//! - Argument parsing with clap
//! - Running the command and dispatching notifications
//! - Mapping the outcome to the process exit status

pub mod executor;
pub mod parser;

// Re-export public types for convenience
pub use executor::{execute, exit_status};
pub use parser::Cli;
