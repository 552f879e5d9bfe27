//! Error types for record generation.

use arrow::error::ArrowError;
use thiserror::Error;

use crate::field::FieldKind;

/// Errors that can occur while planning, generating or converting tables
#[derive(Debug, Error)]
pub enum Error {
    /// Request rejected before any work was dispatched
    #[error("Invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    /// A field generator could not produce a required value
    #[error("Generation exhausted for field '{field}' after {attempts} attempts")]
    GenerationExhausted { field: FieldKind, attempts: usize },

    /// A worker died before reporting a result
    #[error("Worker for partition {partition} failed: {reason}")]
    WorkerFailed { partition: usize, reason: String },

    /// A worker task was cancelled or could not be joined
    #[error("Worker task lost: {reason}")]
    WorkerLost { reason: String },

    /// Arrow data does not match the people schema
    #[error("Schema mismatch: {message}")]
    SchemaMismatch { message: String },

    #[error(transparent)]
    Arrow(#[from] ArrowError),
}

impl Error {
    pub fn invalid_configuration(message: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            message: message.into(),
        }
    }

    pub fn schema_mismatch(message: impl Into<String>) -> Self {
        Self::SchemaMismatch {
            message: message.into(),
        }
    }
}

/// Result type alias for [`Error`]
pub type Result<T> = std::result::Result<T, Error>;
