//! Error types for G-code analysis.

use thiserror::Error;

/// Errors that can occur while analyzing a G-code file.
///
/// Files without any recognizable comment are not an error; they produce
/// `Ok(None)` from the analysis entry points.
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// The file could not be opened or read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A filament value matched the numeric pattern but is not a number.
    #[error("invalid number {value:?} at line {line}")]
    InvalidNumber {
        /// Line number (1-indexed).
        line: usize,
        /// The offending text.
        value: String,
    },

    /// Invalid analyzer settings.
    #[error("invalid settings: {0}")]
    InvalidSettings(String),
}

impl AnalysisError {
    /// Create an invalid number error.
    pub fn invalid_number(line: usize, value: impl Into<String>) -> Self {
        Self::InvalidNumber {
            line,
            value: value.into(),
        }
    }
}

/// Result type for analysis operations.
pub type Result<T> = std::result::Result<T, AnalysisError>;
