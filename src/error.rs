//! Error types for sessions and the hosting layer

use thiserror::Error;

/// Rejection of an operation on a session.
///
/// Every variant is local and non-fatal: the session is left exactly as it
/// was before the rejected call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// Bad duration or mode setup before start
    #[error("invalid configuration: {reason}")]
    InvalidConfiguration { reason: &'static str },

    /// Operation not permitted in the current state
    #[error("cannot {action} while {state}")]
    InvalidTransition {
        action: &'static str,
        state: &'static str,
    },

    /// Empty required input
    #[error("{field} cannot be empty")]
    Validation { field: &'static str },
}

impl SessionError {
    pub(crate) fn transition(action: &'static str, state: &'static str) -> Self {
        Self::InvalidTransition { action, state }
    }

    pub(crate) fn configuration(reason: &'static str) -> Self {
        Self::InvalidConfiguration { reason }
    }

    /// Stable key the presentation layer maps to a localized message
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidConfiguration { .. } => "invalid_configuration",
            Self::InvalidTransition { .. } => "invalid_transition",
            Self::Validation { .. } => "validation_error",
        }
    }
}

/// Errors raised by the hosting layer around the sessions
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Session(#[from] SessionError),

    #[error("failed to lock {what}")]
    LockPoisoned { what: &'static str },
}

impl AppError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Session(e) => e.kind(),
            Self::LockPoisoned { .. } => "internal",
        }
    }
}
