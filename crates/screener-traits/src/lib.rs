#![doc(issue_tracker_base_url = "https://github.com/factordynamics/screener/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Core types and trait definitions for the screener workspace.
//!
//! This crate provides the shared vocabulary of the stock screener: the
//! per-ticker [`FundamentalsRecord`], the [`Phase`] and [`Score`] outputs of
//! the scoring engine, and the [`FundamentalsSource`] seam through which data
//! providers hand records to the engine.

/// The version of the screener-traits crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Module declarations
pub mod error;
pub mod source;
pub mod stats;
pub mod types;

// Re-exports
pub use error::{Result, ScreenerError};
pub use source::{FetchError, FetchResult, FundamentalsSource};
pub use types::{Date, FundamentalsRecord, Phase, Score, Symbol};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
        assert!(VERSION.contains('.'));
    }
}
