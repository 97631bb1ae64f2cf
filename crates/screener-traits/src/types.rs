//! Common types used throughout the screener workspace.
//!
//! This module defines the fundamentals record handed to the scoring engine
//! and the two values the engine produces for it: a [`Phase`] label and a
//! bounded [`Score`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::ScreenerError;

// Re-export date type from chrono
pub use chrono::NaiveDate as Date;

/// A market symbol identifier.
///
/// Typically a ticker like "AAPL", or an exchange-suffixed ticker such as
/// "CEZ.PR" or "HSBA.L".
pub type Symbol = String;

/// Exchange label used for tickers without an exchange suffix.
pub const DEFAULT_EXCHANGE: &str = "USA";

/// Normalized fundamentals for one security at one evaluation time.
///
/// Every numeric field is optional. A missing value is never an error: it
/// fails whatever scoring criterion reads it and counts as zero for phase
/// classification. Non-finite values are treated the same as missing ones;
/// use the accessor methods rather than the raw fields when evaluating.
///
/// # Example
///
/// ```
/// use screener_traits::FundamentalsRecord;
///
/// let record = FundamentalsRecord {
///     trailing_pe: Some(12.0),
///     free_cashflow: Some(f64::NAN),
///     ..FundamentalsRecord::new("CEZ.PR")
/// };
///
/// assert_eq!(record.pe(), Some(12.0));
/// assert_eq!(record.free_cashflow(), None);
/// assert_eq!(record.exchange(), "PR");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FundamentalsRecord {
    /// Ticker symbol.
    pub ticker: Symbol,
    /// Company name.
    #[serde(default)]
    pub name: Option<String>,
    /// Sector classification, used for sector-relative valuation.
    #[serde(default)]
    pub sector: Option<String>,
    /// Business summary.
    #[serde(default)]
    pub description: Option<String>,
    /// Last price.
    #[serde(default)]
    pub price: Option<f64>,
    /// Trailing price to earnings ratio.
    #[serde(default, rename = "trailingPE")]
    pub trailing_pe: Option<f64>,
    /// Return on equity as a fraction.
    #[serde(default)]
    pub return_on_equity: Option<f64>,
    /// Trailing earnings per share.
    #[serde(default)]
    pub trailing_eps: Option<f64>,
    /// Dividend yield as a fraction.
    #[serde(default)]
    pub dividend_yield: Option<f64>,
    /// Share of earnings paid out as dividends.
    #[serde(default)]
    pub payout_ratio: Option<f64>,
    /// Debt to equity ratio.
    #[serde(default)]
    pub debt_to_equity: Option<f64>,
    /// Free cash flow in currency units, may be negative.
    #[serde(default)]
    pub free_cashflow: Option<f64>,
    /// Volatility relative to the broad market.
    #[serde(default)]
    pub beta: Option<f64>,
    /// Market capitalization in currency units.
    #[serde(default)]
    pub market_cap: Option<f64>,
    /// Speculative excess-return estimate, only read by the weighted preset.
    #[serde(default)]
    pub alpha: Option<f64>,
}

const fn finite(value: Option<f64>) -> Option<f64> {
    match value {
        Some(v) if v.is_finite() => Some(v),
        _ => None,
    }
}

impl FundamentalsRecord {
    /// Creates an empty record for `ticker` with every field absent.
    pub fn new(ticker: impl Into<Symbol>) -> Self {
        Self {
            ticker: ticker.into(),
            ..Self::default()
        }
    }

    /// Exchange code derived from the ticker suffix.
    ///
    /// `"HSBA.L"` yields `"L"`; a ticker without a suffix yields
    /// [`DEFAULT_EXCHANGE`].
    pub fn exchange(&self) -> &str {
        match self.ticker.rsplit_once('.') {
            Some((_, suffix)) if !suffix.is_empty() => suffix,
            _ => DEFAULT_EXCHANGE,
        }
    }

    /// Trailing P/E, if present and finite.
    pub const fn pe(&self) -> Option<f64> {
        finite(self.trailing_pe)
    }

    /// Return on equity, if present and finite.
    pub const fn roe(&self) -> Option<f64> {
        finite(self.return_on_equity)
    }

    /// Trailing EPS, if present and finite.
    pub const fn eps(&self) -> Option<f64> {
        finite(self.trailing_eps)
    }

    /// Dividend yield, if present and finite.
    pub const fn dividend_yield(&self) -> Option<f64> {
        finite(self.dividend_yield)
    }

    /// Payout ratio, if present and finite.
    pub const fn payout_ratio(&self) -> Option<f64> {
        finite(self.payout_ratio)
    }

    /// Debt to equity, if present and finite.
    pub const fn debt_to_equity(&self) -> Option<f64> {
        finite(self.debt_to_equity)
    }

    /// Free cash flow, if present and finite.
    pub const fn free_cashflow(&self) -> Option<f64> {
        finite(self.free_cashflow)
    }

    /// Beta, if present and finite.
    pub const fn beta(&self) -> Option<f64> {
        finite(self.beta)
    }

    /// Market capitalization, if present and finite.
    pub const fn market_cap(&self) -> Option<f64> {
        finite(self.market_cap)
    }

    /// Alpha estimate, if present and finite.
    pub const fn alpha(&self) -> Option<f64> {
        finite(self.alpha)
    }
}

/// Heuristic lifecycle classification of a company.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Phase {
    /// Profitable and compounding: high EPS with high return on equity.
    Growth,
    /// Large, established business.
    Stable,
    /// Everything else.
    Value,
}

impl Phase {
    /// All phases in classification priority order.
    pub const ALL: [Self; 3] = [Self::Growth, Self::Stable, Self::Value];

    /// Display label.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Growth => "Growth",
            Self::Stable => "Stable",
            Self::Value => "Value",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Phase {
    type Err = ScreenerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|phase| phase.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ScreenerError::InvalidData(format!("Unknown phase: '{s}'")))
    }
}

/// A bounded investment score.
///
/// Point presets produce whole numbers, the weighted preset a fraction in
/// `[0, 1]`. The bound itself belongs to the rule set that produced the score.
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Score(f64);

impl Score {
    /// The lowest possible score.
    pub const ZERO: Self = Self(0.0);

    /// Wraps a raw score value.
    #[must_use]
    pub const fn new(value: f64) -> Self {
        Self(value)
    }

    /// Returns the raw score value.
    #[must_use]
    pub const fn value(&self) -> f64 {
        self.0
    }
}

impl From<f64> for Score {
    fn from(value: f64) -> Self {
        Self(value)
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.fract() == 0.0 {
            write!(f, "{:.0}", self.0)
        } else {
            write!(f, "{:.2}", self.0)
        }
    }
}
