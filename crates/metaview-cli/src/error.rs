//! CLI errors: what went wrong, what to try next, which exit code.

use std::error::Error as _;
use std::fmt::Write as _;

use owo_colors::OwoColorize;
use thiserror::Error;

use metaview_core::error::{ErrorCategory as CoreCategory, MetaviewError};

pub type CliResult<T> = Result<T, CliError>;

type BoxedSource = Option<Box<dyn std::error::Error + Send + Sync>>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Invalid input: {message}")]
    InvalidInput {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Raised by `metaview-core` or an adapter.
    #[error("{0}")]
    Core(#[from] MetaviewError),

    /// A view never received the data it needs to be shown.
    #[error("{what} could not be loaded")]
    Incomplete {
        what: String,
        /// `(href, reason)` of each failed request.
        reasons: Vec<(String, String)>,
    },

    #[error("I/O error: {message}")]
    IoError {
        message: String,
        #[source]
        source: std::io::Error,
    },
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::IoError {
            message: err.to_string(),
            source: err,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Bad arguments or a payload that does not parse.
    UserError,
    NotFound,
    Configuration,
    /// Bugs, local I/O and unreachable servers.
    Internal,
}

impl CliError {
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidInput { .. } => vec![
                "Pass --kind when a saved response is ambiguous".into(),
                "Use --help for usage information".into(),
            ],
            Self::ConfigError { .. } => vec![
                "Show the active settings with 'metaview config list'".into(),
                "Create a default config with 'metaview init'".into(),
            ],
            Self::Core(core) => core.suggestions(),
            Self::Incomplete { reasons, .. } => {
                let mut lines: Vec<String> = reasons
                    .iter()
                    .map(|(href, reason)| format!("{href}: {reason}"))
                    .collect();
                if lines.is_empty() {
                    lines.push("The server sent no usable response".into());
                }
                lines.push("Check server.base_url with 'metaview config get server.base_url'".into());
                lines
            }
            Self::IoError { .. } => vec!["Check that the path exists and is readable".into()],
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidInput { .. } => ErrorCategory::UserError,
            Self::ConfigError { .. } => ErrorCategory::Configuration,
            Self::Core(core) => match core.category() {
                CoreCategory::Parse | CoreCategory::Model => ErrorCategory::UserError,
                CoreCategory::NotFound => ErrorCategory::NotFound,
                CoreCategory::Configuration => ErrorCategory::Configuration,
                CoreCategory::Network | CoreCategory::Internal => ErrorCategory::Internal,
            },
            Self::Incomplete { .. } => ErrorCategory::NotFound,
            Self::IoError { .. } => ErrorCategory::Internal,
        }
    }

    pub fn exit_code(&self) -> u8 {
        match self.category() {
            ErrorCategory::Internal => 1,
            ErrorCategory::UserError => 2,
            ErrorCategory::NotFound => 3,
            ErrorCategory::Configuration => 4,
        }
    }

    pub fn format_colored(&self, verbose: bool) -> String {
        self.render(verbose, true)
    }

    pub fn format_plain(&self, verbose: bool) -> String {
        self.render(verbose, false)
    }

    /// Message, cause chain when `verbose`, then suggestions.
    fn render(&self, verbose: bool, color: bool) -> String {
        let paint = |text: &str, heading: bool| -> String {
            match (color, heading) {
                (false, _) => text.to_string(),
                (true, true) => text.red().bold().to_string(),
                (true, false) => text.dimmed().to_string(),
            }
        };

        let mut out = String::new();
        let _ = writeln!(out, "\n{} {self}", paint("Error:", true));

        if verbose {
            let mut cause = self.source();
            while let Some(err) = cause {
                let _ = writeln!(out, "  {}", paint(&format!("Caused by: {err}"), false));
                cause = err.source();
            }
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            let heading = if color {
                "Suggestions:".yellow().bold().to_string()
            } else {
                "Suggestions:".to_string()
            };
            let _ = writeln!(out, "\n{heading}");
            for line in suggestions {
                let _ = writeln!(out, "  {line}");
            }
        }

        if !verbose {
            let _ = writeln!(out, "\n{}", paint("Use -v / --verbose for more details.", false));
        }
        out
    }

    pub fn log(&self) {
        match self.category() {
            ErrorCategory::UserError | ErrorCategory::NotFound => {
                tracing::warn!(code = self.exit_code(), "{self}")
            }
            ErrorCategory::Configuration | ErrorCategory::Internal => {
                tracing::error!(code = self.exit_code(), "{self}")
            }
        }
        if let Some(source) = self.source() {
            tracing::debug!(%source, "Caused by");
        }
    }
}

/// Attach a message when converting foreign errors at the call site.
pub trait IntoCli<T> {
    fn with_cli_context<F, S>(self, f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>;
}

impl<T> IntoCli<T> for Result<T, std::io::Error> {
    fn with_cli_context<F, S>(self, f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(|e| CliError::IoError {
            message: f().into(),
            source: e,
        })
    }
}

impl<T> IntoCli<T> for Result<T, toml::de::Error> {
    fn with_cli_context<F, S>(self, f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(|e| CliError::ConfigError {
            message: f().into(),
            source: Some(Box::new(e)),
        })
    }
}
