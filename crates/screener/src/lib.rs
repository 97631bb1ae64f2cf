#![doc(issue_tracker_base_url = "https://github.com/factordynamics/screener/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! # screener
//!
//! Fundamentals-based stock screening and scoring.
//!
//! screener is an umbrella crate that re-exports all screener sub-crates for
//! convenience. It classifies each company into a growth phase, scores it
//! against a configurable rule set and keeps a dated history of the scores.
//!
//! ## Quick Start
//!
//! ```
//! use screener::{FundamentalsRecord, Phase, calculate_score, classify_phase};
//!
//! let record = FundamentalsRecord {
//!     trailing_pe: Some(12.0),
//!     trailing_eps: Some(2.5),
//!     return_on_equity: Some(0.2),
//!     payout_ratio: Some(0.3),
//!     dividend_yield: Some(0.02),
//!     free_cashflow: Some(1.0e9),
//!     beta: Some(1.0),
//!     ..FundamentalsRecord::new("AAPL")
//! };
//!
//! let phase = classify_phase(&record);
//! assert_eq!(phase, Phase::Growth);
//! assert_eq!(calculate_score(&record, phase).value(), 10.0);
//! ```
//!
//! ## Crate Organization
//!
//! - [`traits`] - Shared types and the [`FundamentalsSource`] seam
//! - [`scoring`] - Phase classification, criteria, rule sets and presets
//! - [`history`] - CSV score history deduplicated per ticker and day
//! - [`batch`] - Fail-open batch fetching, caching and the screening table
//! - [`fmp`] - Financial Modeling Prep data source
//!
//! ## Architecture
//!
//! 1. **Sources** produce one [`FundamentalsRecord`] per ticker
//! 2. **Batches** collect the records, dropping tickers that fail
//! 3. **Sector averages** are computed once over the complete batch
//! 4. **Rules** classify and score every record
//! 5. **History** stores the day's scores

/// Version information for the screener crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Core Types
// ============================================================================

/// Shared types and trait definitions.
pub mod traits {
    pub use screener_traits::*;
}

pub use screener_traits::{
    Date, FetchError, FetchResult, FundamentalsRecord, FundamentalsSource, Phase, Result, Score,
    ScreenerError, Symbol,
};

// ============================================================================
// Scoring
// ============================================================================

/// Phase classification and scoring.
///
/// Rule sets are plain data: a list of weighted [`Criterion`] values with a
/// maximum score. Three presets ship with the crate:
///
/// - **canonical**: points scale, maximum 10, phase-dependent payout band
/// - **classic**: five criteria worth two points each
/// - **weighted**: fractional weights summing to one, with a sector-relative
///   valuation criterion
///
/// # Example
///
/// ```
/// use screener::scoring::{get_preset, SectorAverages};
/// use screener::{FundamentalsRecord, Phase};
///
/// let rules = get_preset("classic").unwrap();
/// let record = FundamentalsRecord {
///     trailing_pe: Some(10.0),
///     ..FundamentalsRecord::new("KO")
/// };
/// let score = rules.score(&record, Phase::Value, &SectorAverages::default());
/// assert_eq!(score.value(), 2.0);
/// ```
pub mod scoring {
    pub use screener_scoring::*;
}

pub use screener_scoring::{
    Criterion, PhaseThresholds, ScoringRules, SectorAverages, calculate_score,
    calculate_score_with, classify_phase, get_preset,
};

// ============================================================================
// History
// ============================================================================

/// Dated score history.
pub mod history {
    pub use screener_history::*;
}

pub use screener_history::HistoryLog;

// ============================================================================
// Batch Processing
// ============================================================================

/// Batch fetching, evaluation and screening.
pub mod batch {
    pub use screener_batch::*;
}

pub use screener_batch::{BatchEvaluator, ScoredRecord, ScreenFilter};

// ============================================================================
// Data Providers
// ============================================================================

/// Financial Modeling Prep (FMP) API client.
///
/// ## Setup
///
/// 1. Get a free API key at <https://financialmodelingprep.com/>
/// 2. Set the `FMP_API_KEY` environment variable or add to `.env` file
///
/// ## Example
///
/// ```ignore
/// use screener::fmp::FmpClient;
/// use screener::FundamentalsSource;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = FmpClient::from_env()?;
///     let record = client.fetch("CEZ.PR").await?;
///     println!("P/E: {:?}", record.pe());
///     Ok(())
/// }
/// ```
pub mod fmp {
    pub use screener_fmp::*;
}

// ============================================================================
// Prelude
// ============================================================================

/// Prelude module for convenient imports.
///
/// ```
/// use screener::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        BatchEvaluator, FundamentalsRecord, FundamentalsSource, HistoryLog, Phase, Result, Score,
        ScoredRecord, ScreenFilter, ScreenerError, ScoringRules,
    };
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::batch::{CachedSource, fetch_batch, screen_table};
    use tempfile::TempDir;

    struct Fixture;

    impl FundamentalsSource for Fixture {
        async fn fetch(&self, symbol: &str) -> FetchResult<FundamentalsRecord> {
            let record = match symbol {
                "AAPL" => FundamentalsRecord {
                    sector: Some("Technology".to_string()),
                    trailing_pe: Some(12.0),
                    trailing_eps: Some(2.5),
                    return_on_equity: Some(0.2),
                    payout_ratio: Some(0.3),
                    dividend_yield: Some(0.02),
                    free_cashflow: Some(1.0e9),
                    beta: Some(1.0),
                    ..FundamentalsRecord::new(symbol)
                },
                "CEZ.PR" => FundamentalsRecord {
                    sector: Some("Utilities".to_string()),
                    trailing_pe: Some(20.0),
                    free_cashflow: Some(-5.0),
                    ..FundamentalsRecord::new(symbol)
                },
                _ => return Err(FetchError::NotFound(symbol.to_string())),
            };
            Ok(record)
        }
    }

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
        let parts: Vec<&str> = VERSION.split('.').collect();
        assert!(parts.len() >= 2, "Version should have at least major.minor");
    }

    #[test]
    fn test_error_types() {
        let _result: Result<()> = Ok(());
        let _error: ScreenerError = ScreenerError::InvalidData("test".to_string());
    }

    #[tokio::test]
    async fn test_fetch_score_screen_and_log() {
        let source = CachedSource::new(Fixture, chrono::Duration::minutes(10));
        let symbols: Vec<Symbol> = ["AAPL", "MISSING", "CEZ.PR"]
            .iter()
            .map(|s| s.to_string())
            .collect();

        let batch = fetch_batch(&source, &symbols, 2).await;
        assert_eq!(batch.dropped_count(), 1);

        let scored = BatchEvaluator::default().evaluate(batch.records);
        let table = screen_table(&scored).unwrap();
        let kept = ScreenFilter::min_score(5.0).apply(&table).unwrap();
        assert_eq!(kept.height(), 1);

        let dir = TempDir::new().unwrap();
        let mut log = HistoryLog::open(dir.path().join("history.csv"));
        let today = Date::from_ymd_opt(2024, 6, 3).unwrap();
        log.record(
            today,
            scored.iter().map(|s| (s.record.ticker.clone(), s.score)),
        );
        log.save().unwrap();

        let reopened = HistoryLog::open(log.path());
        assert_eq!(reopened.series("AAPL"), vec![(today, Score::new(10.0))]);
        assert_eq!(reopened.series("CEZ.PR"), vec![(today, Score::ZERO)]);
    }
}
