//! Store error types

use thiserror::Error;

/// Record store errors
#[derive(Error, Debug)]
pub enum StoreError {
    /// Uniqueness constraint violation (duplicate id or repository slug)
    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("Store file error: {0}")]
    StateError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, StoreError>;
