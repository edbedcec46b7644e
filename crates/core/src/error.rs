//! Error types for the prompt enrichment service.
//!
//! This module defines a unified error enum that covers all error categories
//! in the application: request validation, the two retrieval stores, the
//! embedding capability, configuration, and serialization.

use thiserror::Error;

/// Unified error type for the enrichment service.
///
/// All fallible functions in the workspace return `Result<T, AppError>`.
/// Store faults are represented here, never swallowed; the pipeline decides
/// where degradation happens and the HTTP boundary decides what surfaces.
#[derive(Error, Debug)]
pub enum AppError {
    /// Malformed client input; surfaces as HTTP 400
    #[error("Validation error: {0}")]
    Validation(String),

    /// Vector store (similarity index) faults
    #[error("Vector store error: {0}")]
    VectorStore(String),

    /// Relational store faults
    #[error("Database error: {0}")]
    Database(String),

    /// Embedding capability faults
    #[error("Embedding error: {0}")]
    Embedding(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O and filesystem errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

impl From<serde_yaml::Error> for AppError {
    fn from(err: serde_yaml::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

/// Convenience type alias for Results with AppError.
pub type AppResult<T> = Result<T, AppError>;
