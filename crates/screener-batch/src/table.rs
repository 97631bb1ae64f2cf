//! Screening table and filter.

use polars::prelude::*;
use screener_traits::{Phase, Result, ScreenerError};
use serde::{Deserialize, Serialize};

use crate::evaluate::ScoredRecord;

/// Lay scored records out as a DataFrame, best score first.
///
/// Columns: `ticker`, `name`, `exchange`, `sector`, `phase`, `score`,
/// `price`, `pe`, `roe`, `eps`, `dividend_yield`, `payout_ratio`,
/// `debt_to_equity`, `free_cashflow`, `beta`, `market_cap`. Missing
/// fundamentals are nulls. Ties keep input order.
///
/// # Errors
///
/// Returns an error if the DataFrame cannot be built.
pub fn screen_table(scored: &[ScoredRecord]) -> Result<DataFrame> {
    let table = df! {
        "ticker" => column(scored, |s| s.record.ticker.as_str()),
        "name" => column(scored, |s| s.record.name.as_deref()),
        "exchange" => column(scored, |s| s.record.exchange()),
        "sector" => column(scored, |s| s.record.sector.as_deref()),
        "phase" => column(scored, |s| s.phase.as_str()),
        "score" => column(scored, |s| s.score.value()),
        "price" => column(scored, |s| s.record.price),
        "pe" => column(scored, |s| s.record.pe()),
        "roe" => column(scored, |s| s.record.roe()),
        "eps" => column(scored, |s| s.record.eps()),
        "dividend_yield" => column(scored, |s| s.record.dividend_yield()),
        "payout_ratio" => column(scored, |s| s.record.payout_ratio()),
        "debt_to_equity" => column(scored, |s| s.record.debt_to_equity()),
        "free_cashflow" => column(scored, |s| s.record.free_cashflow()),
        "beta" => column(scored, |s| s.record.beta()),
        "market_cap" => column(scored, |s| s.record.market_cap()),
    }?;

    Ok(table.sort(
        ["score"],
        SortMultipleOptions::default()
            .with_order_descending(true)
            .with_maintain_order(true),
    )?)
}

fn column<'a, T>(scored: &'a [ScoredRecord], f: impl Fn(&'a ScoredRecord) -> T) -> Vec<T> {
    scored.iter().map(f).collect()
}

/// Row filter over a screening table.
///
/// An empty selection accepts every value. A row without a sector fails a
/// non-empty sector selection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenFilter {
    /// Minimum score, inclusive
    pub min_score: f64,
    /// Accepted phases
    pub phases: Vec<Phase>,
    /// Accepted sectors
    pub sectors: Vec<String>,
    /// Accepted exchange codes
    pub exchanges: Vec<String>,
}

impl ScreenFilter {
    /// A filter keeping rows scoring at least `min_score`.
    #[must_use]
    pub fn min_score(min_score: f64) -> Self {
        Self {
            min_score,
            ..Self::default()
        }
    }

    /// Keep only the rows of `table` that pass the filter.
    ///
    /// # Errors
    ///
    /// Returns an error if `table` lacks one of the screening columns.
    pub fn apply(&self, table: &DataFrame) -> Result<DataFrame> {
        for col in ["score", "phase", "sector", "exchange"] {
            if table.column(col).is_err() {
                return Err(ScreenerError::InvalidData(format!(
                    "Missing screening column: {col}"
                )));
            }
        }

        let scores = table.column("score")?.as_materialized_series().f64()?;
        let phases = table.column("phase")?.as_materialized_series().str()?;
        let sectors = table.column("sector")?.as_materialized_series().str()?;
        let exchanges = table.column("exchange")?.as_materialized_series().str()?;

        let mask = scores
            .into_iter()
            .zip(phases)
            .zip(sectors)
            .zip(exchanges)
            .map(|(((score, phase), sector), exchange)| {
                score.is_some_and(|s| s >= self.min_score)
                    && self.accepts_phase(phase)
                    && accepts(&self.sectors, sector)
                    && accepts(&self.exchanges, exchange)
            })
            .collect::<BooleanChunked>();

        Ok(table.filter(&mask)?)
    }

    fn accepts_phase(&self, phase: Option<&str>) -> bool {
        self.phases.is_empty()
            || phase.is_some_and(|p| self.phases.iter().any(|want| want.as_str() == p))
    }
}

fn accepts(selection: &[String], value: Option<&str>) -> bool {
    selection.is_empty() || value.is_some_and(|v| selection.iter().any(|want| want == v))
}
