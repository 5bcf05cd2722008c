//! Application layer errors.
//!
//! These errors represent failures in orchestration and transport, not in
//! payload content. Payload errors are `DomainError` from `crate::domain`.

use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur while fetching, rendering or delivering results.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// A linked resource could not be fetched.
    #[error("Fetching {href} failed: {reason}")]
    FetchFailed {
        href: String,
        /// HTTP status, when the server answered at all.
        status: Option<u16>,
        reason: String,
    },

    /// The remote diagram renderer rejected or failed the request.
    #[error("Diagram rendering failed: {reason}")]
    RenderingFailed { reason: String },

    #[error("Updating slot '{slot}' failed: {reason}")]
    SlotUpdateFailed { slot: String, reason: String },

    #[error("Server push failed: {reason}")]
    PushFailed { reason: String },

    /// Slot store lock poisoned.
    #[error("Slot store error")]
    StoreLockError,
}

impl ApplicationError {
    pub fn fetch(href: impl Into<String>, reason: impl ToString) -> Self {
        Self::FetchFailed {
            href: href.into(),
            status: None,
            reason: reason.to_string(),
        }
    }

    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::FetchFailed {
                href,
                status: Some(401 | 403),
                ..
            } => vec![
                format!("The server refused access to {}", href),
                "Check server.user and server.password (or METAVIEW_SERVER__USER)".into(),
            ],
            Self::FetchFailed { href, status: Some(404), .. } => vec![
                format!("Nothing found at {}", href),
                "Check server.base_url and the domain type name".into(),
            ],
            Self::FetchFailed { .. } => vec![
                "Check that the server is running and reachable".into(),
                "Increase server.timeout_secs for slow servers".into(),
            ],
            Self::RenderingFailed { .. } => vec![
                "Check render.endpoint; the default is https://kroki.io/".into(),
                "Use `metaview diagram --text-only` to print the diagram source".into(),
            ],
            Self::PushFailed { .. } => vec!["Check push.url in your configuration".into()],
            _ => vec!["Check the error details above".into()],
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::FetchFailed { status: Some(404), .. } => ErrorCategory::NotFound,
            Self::FetchFailed { .. } | Self::RenderingFailed { .. } | Self::PushFailed { .. } => {
                ErrorCategory::Network
            }
            Self::SlotUpdateFailed { .. } | Self::StoreLockError => ErrorCategory::Internal,
        }
    }
}
