//! Data loading utilities for the screener CLI.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use screener_batch::{BatchEvaluator, CachedSource, ScoredRecord, fetch_batch};
use screener_fmp::FmpClient;
use screener_scoring::ScoringRules;
use screener_traits::{ScreenerError, Symbol};
use tracing::info;

use crate::config::ScreenerConfig;

/// Fetch and score `symbols`, returning the scored batch and the tickers
/// that could not be fetched.
pub(crate) async fn load_scores(
    config: &ScreenerConfig,
    rules: ScoringRules,
    symbols: &[Symbol],
) -> Result<(Vec<ScoredRecord>, Vec<Symbol>)> {
    let client = FmpClient::from_env().context("FMP client unavailable")?;
    let source = CachedSource::new(client, config.cache_ttl());

    info!(tickers = symbols.len(), rules = %rules.name, "loading fundamentals");
    let batch = fetch_batch(&source, symbols, config.concurrency).await;
    let dropped = batch.dropped.iter().map(|d| d.symbol.clone()).collect();

    let evaluator = BatchEvaluator::new(rules, config.thresholds)?;
    Ok((evaluator.evaluate(batch.records), dropped))
}

/// Normalize user-entered symbols: trimmed, upper case, no blanks.
pub(crate) fn normalize_symbols(symbols: &[String]) -> Vec<Symbol> {
    symbols
        .iter()
        .map(|s| s.trim().to_uppercase())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Parse a date string in YYYY-MM-DD format.
pub(crate) fn parse_date(date_str: &str) -> Result<NaiveDate, ScreenerError> {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
        .map_err(|e| ScreenerError::InvalidData(format!("Invalid date format: {e}")))
}
