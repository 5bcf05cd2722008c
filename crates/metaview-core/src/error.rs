//! Unified error handling for Metaview Core.
//!
//! Wraps domain and application errors behind one root type that carries
//! user-actionable suggestions.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// Root error type for Metaview Core operations.
#[derive(Debug, Error, Clone)]
pub enum MetaviewError {
    /// Payload or metamodel errors.
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    /// Fetch, render and slot delivery failures.
    #[error("Application error: {0}")]
    Application(#[from] ApplicationError),

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Unexpected internal errors (bugs).
    #[error("Internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

impl MetaviewError {
    /// Next steps to show next to the message.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::Configuration { message } => vec![
                format!("Configuration issue: {}", message),
                "Run `metaview config` to inspect the effective settings".into(),
            ],
            Self::Internal { .. } => vec!["This appears to be a bug in Metaview".into()],
        }
    }

    /// Drives the CLI exit code and message styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Parse => ErrorCategory::Parse,
                crate::domain::ErrorCategory::Model => ErrorCategory::Model,
            },
            Self::Application(e) => e.category(),
            Self::Configuration { .. } => ErrorCategory::Configuration,
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }
}

/// Coarse classification shared by every layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Parse,
    Model,
    NotFound,
    Network,
    Configuration,
    Internal,
}

pub type MetaviewResult<T> = Result<T, MetaviewError>;

/// `.context("what was being done")` for foreign errors; they become [`MetaviewError::Internal`].
pub trait Context<T> {
    fn context(self, msg: impl Into<String>) -> MetaviewResult<T>;
}

impl<T, E> Context<T> for Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn context(self, msg: impl Into<String>) -> MetaviewResult<T> {
        self.map_err(|e| MetaviewError::Internal {
            message: format!("{}: {}", msg.into(), e),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PayloadKind;

    #[test]
    fn domain_categories_map_through() {
        let err = MetaviewError::from(DomainError::parse(PayloadKind::Menu, "eof"));
        assert_eq!(err.category(), ErrorCategory::Parse);
    }

    #[test]
    fn unreachable_server_is_a_network_failure() {
        let err = MetaviewError::from(ApplicationError::FetchFailed {
            href: "http://localhost/restful/user".into(),
            status: None,
            reason: "connection refused".into(),
        });
        assert_eq!(err.category(), ErrorCategory::Network);
    }

    #[test]
    fn context_wraps_foreign_errors() {
        let parsed: Result<u8, _> = "x".parse::<u8>();
        let err = parsed.context("reading timeout").unwrap_err();
        assert!(err.to_string().contains("reading timeout"));
    }
}
