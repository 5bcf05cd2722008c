//! Subcommand implementations, one module per command.

pub mod completions;
pub mod config;
pub mod diagram;
pub mod init;
pub mod object;
pub mod parse;
pub mod system;
pub mod watch;

use std::path::Path;

use metaview_core::error::MetaviewError;
use tokio::task::JoinError;

use crate::error::{CliError, CliResult, IntoCli};

/// Read a saved response; `-` reads stdin.
pub(crate) fn read_payload(path: &Path) -> CliResult<String> {
    if path.as_os_str() == "-" {
        return std::io::read_to_string(std::io::stdin()).with_cli_context(|| "Failed to read stdin");
    }
    std::fs::read_to_string(path)
        .with_cli_context(|| format!("Failed to read '{}'", path.display()))
}

/// A background task panicked or was cancelled.
pub(crate) fn task_failed(e: JoinError) -> CliError {
    CliError::Core(MetaviewError::Internal {
        message: format!("background task failed: {e}"),
    })
}
