//! Provider error taxonomy
//!
//! Every remote failure surfaced to the orchestrator is one of these
//! kinds, so a caller can react per kind instead of parsing messages.

use thiserror::Error;

/// Errors from either external provider
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Malformed or missing input, caught before or by the provider
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Duplicate resource name or a creation race lost
    #[error("Conflict: {0}")]
    Conflict(String),

    /// The resource does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Non-success response from the provider, with status and body
    #[error("Provider API error (HTTP {status}): {body}")]
    Api { status: u16, body: String },

    /// The request never produced a response (DNS, connect, timeout)
    #[error("Transport error: {0}")]
    Transport(String),
}

impl ProviderError {
    /// Whether a bounded retry of an idempotent call is worthwhile.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(_) => true,
            Self::Api { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict(_))
    }
}

pub type Result<T> = std::result::Result<T, ProviderError>;
