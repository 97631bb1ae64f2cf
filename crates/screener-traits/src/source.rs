//! Data-source seam for fundamentals providers.
//!
//! A provider hands the engine one [`FundamentalsRecord`] per ticker. Failure
//! is reported as an explicit [`FetchError`] so that callers can decide
//! whether to retry, drop the ticker or stop.

use std::future::Future;

use thiserror::Error;

use crate::{FundamentalsRecord, Symbol};

/// Why fundamentals for a ticker could not be produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The provider does not know the ticker or has no data for it.
    #[error("No data for {0}")]
    NotFound(Symbol),

    /// Network failure, rate limiting or a provider-side error.
    #[error("Transient failure: {0}")]
    Transient(String),

    /// The provider answered but the payload could not be interpreted.
    #[error("Malformed data: {0}")]
    Malformed(String),

    /// The provider refused the request, e.g. a bad credential or a plan
    /// that does not cover the ticker.
    #[error("Request rejected: {0}")]
    Rejected(String),
}

impl FetchError {
    /// Whether repeating the request later may succeed.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Transient(_))
    }
}

/// Outcome of fetching one ticker.
pub type FetchResult<T> = std::result::Result<T, FetchError>;

/// A provider of fundamentals records.
///
/// Implementations must be thread-safe so that a batch can fetch several
/// tickers concurrently.
///
/// # Example
///
/// ```
/// use screener_traits::{FetchError, FetchResult, FundamentalsRecord, FundamentalsSource};
///
/// struct Fixed;
///
/// impl FundamentalsSource for Fixed {
///     async fn fetch(&self, symbol: &str) -> FetchResult<FundamentalsRecord> {
///         match symbol {
///             "AAPL" => Ok(FundamentalsRecord::new("AAPL")),
///             other => Err(FetchError::NotFound(other.to_string())),
///         }
///     }
/// }
/// ```
pub trait FundamentalsSource: Send + Sync {
    /// Fetch the current fundamentals for `symbol`.
    fn fetch(&self, symbol: &str) -> impl Future<Output = FetchResult<FundamentalsRecord>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_transient_is_retryable() {
        assert!(FetchError::Transient("timeout".into()).is_retryable());
        assert!(!FetchError::NotFound("ZZZZ".into()).is_retryable());
        assert!(!FetchError::Malformed("bad json".into()).is_retryable());
        assert!(!FetchError::Rejected("invalid API key".into()).is_retryable());
    }

    #[test]
    fn test_fetch_error_display() {
        let err = FetchError::NotFound("ZZZZ".to_string());
        assert_eq!(err.to_string(), "No data for ZZZZ");
    }
}
