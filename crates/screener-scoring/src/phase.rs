//! Growth-phase classification.

use screener_traits::{FundamentalsRecord, Phase};
use serde::{Deserialize, Serialize};

/// Thresholds separating the three phases.
///
/// Classification checks Growth first, then Stable, and falls back to Value.
/// Missing inputs count as zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhaseThresholds {
    /// EPS must exceed this for Growth (default: 2.0)
    pub growth_min_eps: f64,

    /// Return on equity must exceed this for Growth (default: 0.15)
    pub growth_min_roe: f64,

    /// Market cap must exceed this for Stable (default: 5e10)
    pub stable_min_market_cap: f64,
}

impl Default for PhaseThresholds {
    fn default() -> Self {
        Self {
            growth_min_eps: 2.0,
            growth_min_roe: 0.15,
            stable_min_market_cap: 5e10,
        }
    }
}

impl PhaseThresholds {
    /// Classify a record against these thresholds.
    #[must_use]
    pub fn classify(&self, record: &FundamentalsRecord) -> Phase {
        let eps = record.eps().unwrap_or(0.0);
        let roe = record.roe().unwrap_or(0.0);
        let market_cap = record.market_cap().unwrap_or(0.0);

        if eps > self.growth_min_eps && roe > self.growth_min_roe {
            Phase::Growth
        } else if market_cap > self.stable_min_market_cap {
            Phase::Stable
        } else {
            Phase::Value
        }
    }
}

/// Classify a record with the default thresholds.
#[must_use]
pub fn classify_phase(record: &FundamentalsRecord) -> Phase {
    PhaseThresholds::default().classify(record)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(eps: Option<f64>, roe: Option<f64>, market_cap: Option<f64>) -> FundamentalsRecord {
        FundamentalsRecord {
            trailing_eps: eps,
            return_on_equity: roe,
            market_cap,
            ..FundamentalsRecord::new("TEST")
        }
    }

    #[test]
    fn test_empty_record_is_value() {
        assert_eq!(classify_phase(&FundamentalsRecord::new("X")), Phase::Value);
    }

    #[test]
    fn test_growth_needs_both_eps_and_roe() {
        assert_eq!(classify_phase(&record(Some(3.0), Some(0.2), None)), Phase::Growth);
        assert_eq!(classify_phase(&record(Some(3.0), Some(0.1), None)), Phase::Value);
        assert_eq!(classify_phase(&record(Some(1.0), Some(0.3), None)), Phase::Value);
        assert_eq!(classify_phase(&record(None, Some(0.3), None)), Phase::Value);
    }

    #[test]
    fn test_growth_takes_priority_over_stable() {
        let r = record(Some(3.0), Some(0.2), Some(6e10));
        assert_eq!(classify_phase(&r), Phase::Growth);
    }

    #[test]
    fn test_large_cap_is_stable() {
        assert_eq!(classify_phase(&record(Some(1.0), Some(0.05), Some(6e10))), Phase::Stable);
        assert_eq!(classify_phase(&record(None, None, Some(5e10))), Phase::Value);
    }

    #[test]
    fn test_thresholds_are_strict() {
        assert_eq!(classify_phase(&record(Some(2.0), Some(0.2), None)), Phase::Value);
        assert_eq!(classify_phase(&record(Some(2.5), Some(0.15), None)), Phase::Value);
    }

    #[test]
    fn test_non_finite_counts_as_zero() {
        let r = record(Some(f64::NAN), Some(0.4), Some(f64::INFINITY));
        assert_eq!(classify_phase(&r), Phase::Value);
    }

    #[test]
    fn test_custom_thresholds() {
        let thresholds = PhaseThresholds {
            stable_min_market_cap: 1e9,
            ..PhaseThresholds::default()
        };
        assert_eq!(thresholds.classify(&record(None, None, Some(2e9))), Phase::Stable);
    }
}
