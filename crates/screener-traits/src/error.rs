//! Error types for the screener workspace.
//!
//! Scoring itself never fails: missing fundamentals simply fail the
//! associated criterion. The errors here cover configuration, persistence
//! and table construction.

use thiserror::Error;

/// The main error type for screener operations.
#[derive(Debug, Error)]
pub enum ScreenerError {
    /// A scoring rule set or threshold configuration is not usable.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Error due to invalid or malformed data.
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// No scoring preset is registered under the requested name.
    #[error("Unknown preset: {0}")]
    UnknownPreset(String),

    /// Error reading or writing a file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error encoding or decoding CSV.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Error from Polars operations.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// Generic error for other cases.
    #[error("Error: {0}")]
    Other(String),
}

impl From<String> for ScreenerError {
    fn from(s: String) -> Self {
        Self::Other(s)
    }
}

impl From<&str> for ScreenerError {
    fn from(s: &str) -> Self {
        Self::Other(s.to_string())
    }
}

/// A specialized Result type for screener operations.
///
/// This is a convenience type that uses [`ScreenerError`] as the error type.
pub type Result<T> = std::result::Result<T, ScreenerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ScreenerError::InvalidConfig("weights must sum to 1".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid configuration: weights must sum to 1"
        );

        let err = ScreenerError::UnknownPreset("nope".to_string());
        assert_eq!(err.to_string(), "Unknown preset: nope");
    }

    #[test]
    fn test_error_from_str() {
        let err: ScreenerError = "boom".into();
        assert!(matches!(err, ScreenerError::Other(ref s) if s == "boom"));
    }

    #[test]
    fn test_error_from_io() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: ScreenerError = io.into();
        assert!(matches!(err, ScreenerError::Io(_)));
    }
}
