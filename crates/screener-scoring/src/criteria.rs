//! Individual scoring criteria.
//!
//! Each [`Criterion`] is a pass/fail test over one record. A missing input
//! always fails the test; it never produces an error.

use screener_traits::{FundamentalsRecord, Phase};
use serde::{Deserialize, Serialize};

use crate::sector::SectorAverages;

/// A numeric interval.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Band {
    /// Lower edge
    pub low: f64,
    /// Upper edge
    pub high: f64,
}

impl Band {
    /// Create a band from its edges.
    #[must_use]
    pub const fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    /// Whether `value` lies strictly between the edges.
    #[must_use]
    pub const fn contains_open(&self, value: f64) -> bool {
        self.low < value && value < self.high
    }

    /// Whether `value` lies between the edges, edges included.
    #[must_use]
    pub const fn contains_closed(&self, value: f64) -> bool {
        self.low <= value && value <= self.high
    }
}

/// Acceptable payout-ratio band for each phase.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhaseBands {
    /// Band for Growth companies (default: 0.1 to 0.4)
    pub growth: Band,
    /// Band for Stable companies (default: 0.3 to 0.7)
    pub stable: Band,
    /// Band for Value companies (default: 0.5 to 0.8)
    pub value: Band,
}

impl Default for PhaseBands {
    fn default() -> Self {
        Self {
            growth: Band::new(0.1, 0.4),
            stable: Band::new(0.3, 0.7),
            value: Band::new(0.5, 0.8),
        }
    }
}

impl PhaseBands {
    /// The band that applies to `phase`.
    #[must_use]
    pub const fn for_phase(&self, phase: Phase) -> Band {
        match phase {
            Phase::Growth => self.growth,
            Phase::Stable => self.stable,
            Phase::Value => self.value,
        }
    }
}

/// A single pass/fail scoring test.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Criterion {
    /// Trailing P/E is positive and below `limit`.
    ///
    /// With `allow_negative`, any non-zero P/E below `limit` passes, so a
    /// loss-making company counts as cheap.
    PeBelow {
        /// Exclusive upper limit
        limit: f64,
        /// Let negative P/E pass
        #[serde(default)]
        allow_negative: bool,
    },

    /// Trailing P/E is positive and below the batch's average for the sector.
    PeBelowSectorAverage,

    /// Payout ratio is positive and strictly inside the band for the phase.
    PayoutInPhaseBand {
        /// Per-phase bands
        #[serde(default)]
        bands: PhaseBands,
    },

    /// EPS exceeds `min_eps` and dividend yield exceeds `min_yield`.
    EpsWithDividend {
        /// Exclusive lower EPS limit
        min_eps: f64,
        /// Exclusive lower dividend-yield limit
        min_yield: f64,
    },

    /// Return on equity exceeds `limit`.
    RoeAbove {
        /// Exclusive lower limit
        limit: f64,
    },

    /// Dividend yield exceeds `limit`.
    DividendYieldAbove {
        /// Exclusive lower limit
        limit: f64,
    },

    /// Debt to equity is below `limit`.
    ///
    /// With `zero_fails`, a reported ratio of exactly zero fails.
    DebtToEquityBelow {
        /// Exclusive upper limit
        limit: f64,
        /// Treat a zero ratio as missing
        #[serde(default)]
        zero_fails: bool,
    },

    /// Free cash flow is positive.
    PositiveFreeCashflow,

    /// Beta lies in `[low, high]`.
    BetaWithin {
        /// Inclusive lower edge
        low: f64,
        /// Inclusive upper edge
        high: f64,
    },

    /// Alpha estimate is positive.
    PositiveAlpha,
}

impl Criterion {
    /// Whether `record`, classified as `phase`, passes this test.
    ///
    /// `sectors` is only consulted by [`Criterion::PeBelowSectorAverage`].
    #[must_use]
    pub fn passes(
        &self,
        record: &FundamentalsRecord,
        phase: Phase,
        sectors: &SectorAverages,
    ) -> bool {
        match *self {
            Self::PeBelow {
                limit,
                allow_negative,
            } => record.pe().is_some_and(|pe| {
                let sign_ok = if allow_negative { pe != 0.0 } else { pe > 0.0 };
                sign_ok && pe < limit
            }),
            Self::PeBelowSectorAverage => {
                let average = record.sector.as_deref().and_then(|s| sectors.pe_for(s));
                match (record.pe(), average) {
                    (Some(pe), Some(avg)) => pe > 0.0 && pe < avg,
                    _ => false,
                }
            }
            Self::PayoutInPhaseBand { bands } => record
                .payout_ratio()
                .is_some_and(|p| p > 0.0 && bands.for_phase(phase).contains_open(p)),
            Self::EpsWithDividend { min_eps, min_yield } => {
                record.eps().is_some_and(|eps| eps > min_eps)
                    && record.dividend_yield().is_some_and(|y| y > min_yield)
            }
            Self::RoeAbove { limit } => record.roe().is_some_and(|roe| roe > limit),
            Self::DividendYieldAbove { limit } => {
                record.dividend_yield().is_some_and(|y| y > limit)
            }
            Self::DebtToEquityBelow { limit, zero_fails } => record
                .debt_to_equity()
                .is_some_and(|de| de < limit && !(zero_fails && de == 0.0)),
            Self::PositiveFreeCashflow => record.free_cashflow().is_some_and(|fcf| fcf > 0.0),
            Self::BetaWithin { low, high } => record
                .beta()
                .is_some_and(|b| Band::new(low, high).contains_closed(b)),
            Self::PositiveAlpha => record.alpha().is_some_and(|a| a > 0.0),
        }
    }

    /// Short human-readable description.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::PeBelow {
                limit,
                allow_negative: false,
            } => format!("P/E below {limit}"),
            Self::PeBelow {
                limit,
                allow_negative: true,
            } => format!("non-zero P/E below {limit}"),
            Self::PeBelowSectorAverage => "P/E below sector average".to_string(),
            Self::PayoutInPhaseBand { bands } => format!(
                "payout ratio in phase band (growth {}-{}, stable {}-{}, value {}-{})",
                bands.growth.low,
                bands.growth.high,
                bands.stable.low,
                bands.stable.high,
                bands.value.low,
                bands.value.high
            ),
            Self::EpsWithDividend { min_eps, min_yield } => {
                format!("EPS above {min_eps} with dividend yield above {min_yield}")
            }
            Self::RoeAbove { limit } => format!("ROE above {limit}"),
            Self::DividendYieldAbove { limit } => format!("dividend yield above {limit}"),
            Self::DebtToEquityBelow {
                limit,
                zero_fails: false,
            } => format!("debt/equity below {limit}"),
            Self::DebtToEquityBelow {
                limit,
                zero_fails: true,
            } => format!("non-zero debt/equity below {limit}"),
            Self::PositiveFreeCashflow => "positive free cash flow".to_string(),
            Self::BetaWithin { low, high } => format!("beta within {low}-{high}"),
            Self::PositiveAlpha => "positive alpha".to_string(),
        }
    }

    /// Whether the test depends on batch-wide sector averages.
    #[must_use]
    pub const fn needs_sector_averages(&self) -> bool {
        matches!(self, Self::PeBelowSectorAverage)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty() -> FundamentalsRecord {
        FundamentalsRecord::new("TEST")
    }

    #[test]
    fn test_every_criterion_fails_on_empty_record() {
        let sectors = SectorAverages::default();
        let criteria = [
            Criterion::PeBelow {
                limit: 15.0,
                allow_negative: true,
            },
            Criterion::PeBelowSectorAverage,
            Criterion::PayoutInPhaseBand {
                bands: PhaseBands::default(),
            },
            Criterion::EpsWithDividend {
                min_eps: 1.0,
                min_yield: 0.0,
            },
            Criterion::RoeAbove { limit: 0.1 },
            Criterion::DividendYieldAbove { limit: 0.03 },
            Criterion::DebtToEquityBelow {
                limit: 1.0,
                zero_fails: false,
            },
            Criterion::PositiveFreeCashflow,
            Criterion::BetaWithin {
                low: 0.7,
                high: 1.3,
            },
            Criterion::PositiveAlpha,
        ];
        for criterion in &criteria {
            for phase in Phase::ALL {
                assert!(
                    !criterion.passes(&empty(), phase, &sectors),
                    "{} passed on an empty record",
                    criterion.describe()
                );
            }
        }
    }

    #[test]
    fn test_pe_below_rejects_non_positive() {
        let c = Criterion::PeBelow {
            limit: 15.0,
            allow_negative: false,
        };
        let sectors = SectorAverages::default();
        let mut r = empty();
        r.trailing_pe = Some(12.0);
        assert!(c.passes(&r, Phase::Value, &sectors));
        r.trailing_pe = Some(15.0);
        assert!(!c.passes(&r, Phase::Value, &sectors));
        r.trailing_pe = Some(-4.0);
        assert!(!c.passes(&r, Phase::Value, &sectors));
    }

    #[test]
    fn test_pe_below_allowing_negative() {
        let c = Criterion::PeBelow {
            limit: 15.0,
            allow_negative: true,
        };
        let sectors = SectorAverages::default();
        for (pe, expected) in [(-4.0, true), (0.0, false), (12.0, true), (15.0, false)] {
            let r = FundamentalsRecord {
                trailing_pe: Some(pe),
                ..empty()
            };
            assert_eq!(c.passes(&r, Phase::Value, &sectors), expected, "pe {pe}");
        }
    }

    #[test]
    fn test_debt_to_equity_zero() {
        let sectors = SectorAverages::default();
        let debt_free = FundamentalsRecord {
            debt_to_equity: Some(0.0),
            ..empty()
        };
        let lenient = Criterion::DebtToEquityBelow {
            limit: 1.0,
            zero_fails: false,
        };
        let strict = Criterion::DebtToEquityBelow {
            limit: 1.0,
            zero_fails: true,
        };
        assert!(lenient.passes(&debt_free, Phase::Value, &sectors));
        assert!(!strict.passes(&debt_free, Phase::Value, &sectors));

        let levered = FundamentalsRecord {
            debt_to_equity: Some(0.5),
            ..empty()
        };
        assert!(strict.passes(&levered, Phase::Value, &sectors));
    }

    #[test]
    fn test_payout_band_depends_on_phase() {
        let c = Criterion::PayoutInPhaseBand {
            bands: PhaseBands::default(),
        };
        let sectors = SectorAverages::default();
        let r = FundamentalsRecord {
            payout_ratio: Some(0.35),
            ..empty()
        };
        assert!(c.passes(&r, Phase::Growth, &sectors));
        assert!(c.passes(&r, Phase::Stable, &sectors));
        assert!(!c.passes(&r, Phase::Value, &sectors));

        let r = FundamentalsRecord {
            payout_ratio: Some(0.75),
            ..empty()
        };
        assert!(!c.passes(&r, Phase::Growth, &sectors));
        assert!(!c.passes(&r, Phase::Stable, &sectors));
        assert!(c.passes(&r, Phase::Value, &sectors));
    }

    #[test]
    fn test_payout_band_edges_are_open() {
        let c = Criterion::PayoutInPhaseBand {
            bands: PhaseBands::default(),
        };
        let r = FundamentalsRecord {
            payout_ratio: Some(0.4),
            ..empty()
        };
        assert!(!c.passes(&r, Phase::Growth, &SectorAverages::default()));
    }

    #[test]
    fn test_beta_band_edges_are_closed() {
        let c = Criterion::BetaWithin {
            low: 0.7,
            high: 1.3,
        };
        let sectors = SectorAverages::default();
        let cases = [(0.7, true), (1.3, true), (1.0, true), (0.69, false), (1.31, false)];
        for (beta, expected) in cases {
            let r = FundamentalsRecord {
                beta: Some(beta),
                ..empty()
            };
            assert_eq!(c.passes(&r, Phase::Value, &sectors), expected, "beta {beta}");
        }
    }

    #[test]
    fn test_eps_with_dividend_needs_both() {
        let c = Criterion::EpsWithDividend {
            min_eps: 1.0,
            min_yield: 0.0,
        };
        let sectors = SectorAverages::default();
        let both = FundamentalsRecord {
            trailing_eps: Some(1.5),
            dividend_yield: Some(0.02),
            ..empty()
        };
        assert!(c.passes(&both, Phase::Value, &sectors));

        let no_dividend = FundamentalsRecord {
            dividend_yield: Some(0.0),
            ..both.clone()
        };
        assert!(!c.passes(&no_dividend, Phase::Value, &sectors));

        let low_eps = FundamentalsRecord {
            trailing_eps: Some(0.5),
            ..both
        };
        assert!(!c.passes(&low_eps, Phase::Value, &sectors));
    }

    #[test]
    fn test_pe_below_sector_average() {
        let peers = vec![
            FundamentalsRecord {
                sector: Some("Energy".into()),
                trailing_pe: Some(10.0),
                ..FundamentalsRecord::new("A")
            },
            FundamentalsRecord {
                sector: Some("Energy".into()),
                trailing_pe: Some(20.0),
                ..FundamentalsRecord::new("B")
            },
        ];
        let sectors = SectorAverages::from_records(&peers);
        let c = Criterion::PeBelowSectorAverage;

        assert!(c.passes(&peers[0], Phase::Value, &sectors));
        assert!(!c.passes(&peers[1], Phase::Value, &sectors));

        let unknown_sector = FundamentalsRecord {
            sector: Some("Utilities".into()),
            trailing_pe: Some(1.0),
            ..FundamentalsRecord::new("C")
        };
        assert!(!c.passes(&unknown_sector, Phase::Value, &sectors));
    }

    #[test]
    fn test_criterion_serde_tagging() {
        let c = Criterion::BetaWithin {
            low: 0.7,
            high: 1.3,
        };
        let json = serde_json::to_string(&c).unwrap();
        assert_eq!(json, r#"{"kind":"beta_within","low":0.7,"high":1.3}"#);

        let parsed: Criterion =
            serde_json::from_str(r#"{"kind":"positive_free_cashflow"}"#).unwrap();
        assert_eq!(parsed, Criterion::PositiveFreeCashflow);

        let parsed: Criterion = serde_json::from_str(r#"{"kind":"payout_in_phase_band"}"#).unwrap();
        assert_eq!(
            parsed,
            Criterion::PayoutInPhaseBand {
                bands: PhaseBands::default()
            }
        );
    }
}
