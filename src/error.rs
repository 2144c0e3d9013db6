//! Error types for unlayout library.

use std::io;
use thiserror::Error;

/// Result type alias for unlayout operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while loading or rendering analysis results.
///
/// Reconstruction itself never fails: data-shape anomalies in an analysis
/// result degrade to plain paragraph output instead of raising an error.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input is not a valid analysis result document.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The analysis operation envelope reports a non-terminal or failed status.
    #[error("Analysis did not succeed (status: {0})")]
    AnalysisNotSucceeded(String),

    /// A role list could not be parsed.
    #[error("Invalid role list: {0}")]
    InvalidRoleList(String),

    /// Error during rendering (text, JSON).
    #[error("Rendering error: {0}")]
    Render(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::AnalysisNotSucceeded("running".to_string());
        assert_eq!(err.to_string(), "Analysis did not succeed (status: running)");

        let err = Error::InvalidRoleList("empty role name".to_string());
        assert_eq!(err.to_string(), "Invalid role list: empty role name");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::Json(_)));
    }
}
