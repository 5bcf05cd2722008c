// ============================================================================
// domain/error.rs - PAYLOAD AND MODEL ERRORS
// ============================================================================

use thiserror::Error;

use crate::domain::transfer::PayloadKind;

/// Payload and metamodel errors. `Clone`, so a failed arrival can be
/// forwarded to the aggregator by value.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Parse Errors (payload does not match the handler schema)
    // ========================================================================
    #[error("cannot parse {kind} payload: {reason}")]
    Parse { kind: PayloadKind, reason: String },

    #[error("unexpected result type: expected '{expected}', found '{found}'")]
    UnexpectedResultType {
        expected: &'static str,
        found: String,
    },

    #[error("Required field missing: {field}")]
    MissingRequiredField { field: &'static str },

    #[error("no handler accepts this payload")]
    UnrecognizedPayload,

    // ========================================================================
    // Model Errors (metamodel consistency violations)
    // ========================================================================
    /// A member is neither a property nor an action.
    #[error("tertium non datur: member '{member}' with relation '{rel}' is neither property nor action")]
    TertiumNonDatur { member: String, rel: String },

    #[error("invalid canonical name '{name}'")]
    InvalidCanonicalName { name: String },
}

impl DomainError {
    /// Shorthand for a [`DomainError::Parse`] built from any displayable cause.
    pub fn parse(kind: PayloadKind, reason: impl ToString) -> Self {
        Self::Parse {
            kind,
            reason: reason.to_string(),
        }
    }

    /// Next steps to show next to the message.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Parse { kind, reason } => vec![
                format!("The response does not look like a {kind} representation"),
                format!("Details: {}", reason),
                "Check that the link profile matches the requested payload kind".into(),
            ],
            Self::UnexpectedResultType { expected, found } => vec![
                format!("The action returned '{}' but '{}' was expected", found, expected),
                "Use the handler matching the action's return type".into(),
            ],
            Self::TertiumNonDatur { rel, .. } => vec![
                format!("Relation '{}' is not a property or action relation", rel),
                "The server's domain-type metadata is inconsistent".into(),
            ],
            Self::UnrecognizedPayload => vec![
                "Pass the payload kind explicitly (e.g. --kind domain-type)".into(),
            ],
            _ => vec!["See documentation for more details".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Parse { .. }
            | Self::UnexpectedResultType { .. }
            | Self::MissingRequiredField { .. }
            | Self::UnrecognizedPayload => ErrorCategory::Parse,
            Self::TertiumNonDatur { .. } | Self::InvalidCanonicalName { .. } => {
                ErrorCategory::Model
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Parse,
    Model,
}
