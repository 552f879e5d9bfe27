//! Error types for Parquet writer operations.

use std::path::Path;
use thiserror::Error;

/// Error codes for programmatic handling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// E004: Configuration missing or invalid
    E004InvalidConfig,
    /// E005: Write operation failed
    E005WriteFailure,
    /// E008: Read operation failed
    E008ReadFailure,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::E004InvalidConfig => "E004",
            Self::E005WriteFailure => "E005",
            Self::E008ReadFailure => "E008",
        }
    }

    pub fn docs_url(&self) -> String {
        format!(
            "https://github.com/rsfake/rsfake/blob/main/docs/troubleshooting.md#{}",
            self.as_str().to_lowercase()
        )
    }
}

/// Errors that can occur during Parquet reading and writing
#[derive(Debug, Error)]
pub enum WriterError {
    /// Invalid writer options or output layout
    #[error("[{code}] Invalid configuration: {message}\n\nSee: {docs_url}")]
    InvalidConfig {
        code: &'static str,
        message: String,
        docs_url: String,
    },

    /// Write operation failed
    #[error("[{code}] Write to '{path}' failed: {message}\n\nSee: {docs_url}")]
    WriteFailure {
        code: &'static str,
        path: String,
        message: String,
        docs_url: String,
    },

    /// Read operation failed
    #[error("[{code}] Read from '{path}' failed: {message}\n\nSee: {docs_url}")]
    ReadFailure {
        code: &'static str,
        path: String,
        message: String,
        docs_url: String,
    },
}

impl WriterError {
    /// Create an invalid config error with error code
    pub fn invalid_config(message: impl Into<String>) -> Self {
        let code_enum = ErrorCode::E004InvalidConfig;
        Self::InvalidConfig {
            code: code_enum.as_str(),
            message: message.into(),
            docs_url: code_enum.docs_url(),
        }
    }

    /// Create a write failure error with error code
    pub fn write_failure(path: &Path, message: impl ToString) -> Self {
        let code_enum = ErrorCode::E005WriteFailure;
        Self::WriteFailure {
            code: code_enum.as_str(),
            path: path.display().to_string(),
            message: message.to_string(),
            docs_url: code_enum.docs_url(),
        }
    }

    /// Create a read failure error with error code
    pub fn read_failure(path: &Path, message: impl ToString) -> Self {
        let code_enum = ErrorCode::E008ReadFailure;
        Self::ReadFailure {
            code: code_enum.as_str(),
            path: path.display().to_string(),
            message: message.to_string(),
            docs_url: code_enum.docs_url(),
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidConfig { code, .. }
            | Self::WriteFailure { code, .. }
            | Self::ReadFailure { code, .. } => code,
        }
    }
}

/// Result type alias for WriterError
pub type Result<T> = std::result::Result<T, WriterError>;
