//! Orchestrator error types
//!
//! Every failure carries the step it happened in and a kind the caller
//! can branch on, plus the reports of the steps completed before it.

use crate::step::{Step, StepReport};
use serde::Serialize;
use siteforge_core::CoreError;
use siteforge_providers::ProviderError;
use siteforge_store::StoreError;
use thiserror::Error;

/// Caller-facing failure classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Malformed or missing required input
    Validation,
    /// Duplicate name or a lost creation race
    Conflict,
    /// Non-success response from an external provider
    Provider,
    /// Record store failure; the most severe class, since external
    /// resources may exist with no tracking record
    Persistence,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::Validation => write!(f, "validation"),
            ErrorKind::Conflict => write!(f, "conflict"),
            ErrorKind::Provider => write!(f, "provider"),
            ErrorKind::Persistence => write!(f, "persistence"),
        }
    }
}

/// Underlying failure of a single step
#[derive(Error, Debug)]
pub enum OperationError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl OperationError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            OperationError::Core(_) => ErrorKind::Validation,
            OperationError::Provider(e) => match e {
                ProviderError::Validation(_) => ErrorKind::Validation,
                ProviderError::Conflict(_) => ErrorKind::Conflict,
                _ => ErrorKind::Provider,
            },
            OperationError::Store(e) => match e {
                StoreError::Conflict(_) => ErrorKind::Conflict,
                // A read miss means the caller named a record that does
                // not exist, which is an input problem.
                StoreError::NotFound(_) => ErrorKind::Validation,
                _ => ErrorKind::Persistence,
            },
        }
    }
}

/// A lifecycle operation failed at a named step
#[derive(Error, Debug)]
#[error("step '{step}' failed: {source}")]
pub struct ProvisionError {
    /// The step that failed
    pub step: Step,

    /// Reports for every step, the failed one last
    pub steps: Vec<StepReport>,

    #[source]
    pub source: OperationError,
}

impl ProvisionError {
    pub fn kind(&self) -> ErrorKind {
        self.source.kind()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_mapping() {
        let cases: Vec<(OperationError, ErrorKind)> = vec![
            (CoreError::Validation("empty".into()).into(), ErrorKind::Validation),
            (CoreError::InvalidTransition("re-provision".into()).into(), ErrorKind::Validation),
            (ProviderError::Conflict("taken".into()).into(), ErrorKind::Conflict),
            (ProviderError::Api { status: 500, body: String::new() }.into(), ErrorKind::Provider),
            (ProviderError::Transport("refused".into()).into(), ErrorKind::Provider),
            (StoreError::Conflict("slug taken".into()).into(), ErrorKind::Conflict),
            (StoreError::NotFound("s-1".into()).into(), ErrorKind::Validation),
            (StoreError::StateError("version".into()).into(), ErrorKind::Persistence),
        ];

        for (err, expected) in cases {
            assert_eq!(err.kind(), expected, "{err}");
        }
    }
}
