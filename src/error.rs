//! Error types for inistore
//!
//! Provides a unified error type for load and store operations.
//! The accessor API on [`crate::Store`] never fails; only the
//! parse/serialize paths produce these.

use thiserror::Error;

/// Result type alias using IniError
pub type Result<T> = std::result::Result<T, IniError>;

/// Unified error type for inistore operations
#[derive(Debug, Error)]
pub enum IniError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Format Errors
    // -------------------------------------------------------------------------
    /// A key/value line with nothing before the `=`
    #[error("Unsupported format at line {line_number}: {line:?}")]
    UnsupportedFormat { line_number: usize, line: String },

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    // -------------------------------------------------------------------------
    // Scheduling Errors
    // -------------------------------------------------------------------------
    #[error("Worker error: {0}")]
    Worker(String),
}

impl IniError {
    /// True for errors caused by malformed input text
    pub fn is_format_error(&self) -> bool {
        matches!(self, IniError::UnsupportedFormat { .. })
    }
}
