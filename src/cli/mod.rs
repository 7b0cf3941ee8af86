//! CLI support for artemis-ql
//!
//! Provides programmatic access to the `artemis` command so other tools
//! (query editors, suggestion services) can embed it.

mod check;

pub use check::{CheckReport, CheckResult, QueryOptions, Stage, execute_check, execute_parse};

use std::io;

use thiserror::Error;

/// Errors that can occur during CLI operations
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Parse error: {0}")]
    Parse(#[from] crate::ParseError),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("No query provided. Pass it as an argument or pipe it to stdin.")]
    NoInput,
}
