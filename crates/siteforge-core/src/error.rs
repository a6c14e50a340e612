//! Core error types

use thiserror::Error;

/// Errors produced by the pure core
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Invalid transition: {0}")]
    InvalidTransition(String),

    #[error("Template render error: {0}")]
    TemplateRender(String),
}

pub type Result<T> = std::result::Result<T, CoreError>;
