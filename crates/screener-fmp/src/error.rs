//! Error types for the FMP client.

use screener_traits::FetchError;
use thiserror::Error;

/// Errors that can occur when using the FMP API.
#[derive(Debug, Error)]
pub enum FmpError {
    /// Missing API key.
    #[error("FMP_API_KEY environment variable not set")]
    MissingApiKey,

    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// JSON parsing failed.
    #[error("Failed to parse JSON response: {0}")]
    Json(#[from] serde_json::Error),

    /// API returned an error.
    #[error("FMP API error: {0}")]
    Api(String),

    /// FMP refused the request with a client error status.
    #[error("FMP rejected the request (HTTP {status}): {message}")]
    Rejected {
        /// HTTP status code
        status: u16,
        /// Response body
        message: String,
    },

    /// Rate limit exceeded.
    #[error("Rate limit exceeded. Free tier allows 250 requests/day.")]
    RateLimitExceeded,

    /// Symbol not found.
    #[error("Symbol not found: {0}")]
    SymbolNotFound(String),

    /// No data available.
    #[error("No data available for {0}")]
    NoData(String),
}

impl From<FmpError> for FetchError {
    fn from(err: FmpError) -> Self {
        match err {
            FmpError::SymbolNotFound(symbol) | FmpError::NoData(symbol) => Self::NotFound(symbol),
            FmpError::Rejected {
                status: 404,
                message,
            } => Self::NotFound(message),
            FmpError::Json(e) => Self::Malformed(e.to_string()),
            other @ (FmpError::MissingApiKey | FmpError::Rejected { .. }) => {
                Self::Rejected(other.to_string())
            }
            other @ (FmpError::Request(_) | FmpError::Api(_) | FmpError::RateLimitExceeded) => {
                Self::Transient(other.to_string())
            }
        }
    }
}
