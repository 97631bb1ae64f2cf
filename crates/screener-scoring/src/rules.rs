//! Scoring rule sets and the score calculator.
//!
//! A [`ScoringRules`] value is a list of weighted criteria plus a declared
//! maximum. The score of a record is the sum of the weights of the criteria
//! it passes, clipped to `[0, max_score]`. Calculation is a pure function of
//! the record, its phase, the rules and the batch's sector averages.

use screener_traits::{FundamentalsRecord, Phase, Result, Score, ScreenerError};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::criteria::{Criterion, PhaseBands};
use crate::sector::SectorAverages;

/// Tolerance used when checking that fraction weights sum to one.
const WEIGHT_SUM_TOLERANCE: f64 = 1e-9;

/// How a rule set's score is expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreScale {
    /// Whole points up to the declared maximum.
    #[default]
    Points,
    /// Weights summing to one; the score is a fraction in `[0, 1]`.
    Fraction,
}

/// A criterion together with what passing it is worth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightedCriterion {
    /// The test
    #[serde(flatten)]
    pub criterion: Criterion,

    /// Points or weight awarded on pass
    pub weight: f64,
}

impl WeightedCriterion {
    /// Pair a criterion with its weight.
    #[must_use]
    pub const fn new(criterion: Criterion, weight: f64) -> Self {
        Self { criterion, weight }
    }
}

/// A complete scoring configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringRules {
    /// Preset or user-chosen name
    pub name: String,

    /// Upper bound of the score
    pub max_score: f64,

    /// Points or fraction
    #[serde(default)]
    pub scale: ScoreScale,

    /// Criteria evaluated in order
    pub criteria: Vec<WeightedCriterion>,
}

impl Default for ScoringRules {
    fn default() -> Self {
        Self::canonical()
    }
}

impl ScoringRules {
    /// The phase-aware point rule set, maximum 10.
    ///
    /// | criterion | points |
    /// |---|---|
    /// | P/E below 15 | 3 |
    /// | payout ratio in the phase band | 2 |
    /// | EPS above 1 with a dividend | 2 |
    /// | positive free cash flow | 2 |
    /// | beta within 0.7-1.3 | 1 |
    #[must_use]
    pub fn canonical() -> Self {
        Self {
            name: "canonical".to_string(),
            max_score: 10.0,
            scale: ScoreScale::Points,
            criteria: vec![
                WeightedCriterion::new(
                    Criterion::PeBelow {
                        limit: 15.0,
                        allow_negative: false,
                    },
                    3.0,
                ),
                WeightedCriterion::new(
                    Criterion::PayoutInPhaseBand {
                        bands: PhaseBands::default(),
                    },
                    2.0,
                ),
                WeightedCriterion::new(
                    Criterion::EpsWithDividend {
                        min_eps: 1.0,
                        min_yield: 0.0,
                    },
                    2.0,
                ),
                WeightedCriterion::new(Criterion::PositiveFreeCashflow, 2.0),
                WeightedCriterion::new(
                    Criterion::BetaWithin {
                        low: 0.7,
                        high: 1.3,
                    },
                    1.0,
                ),
            ],
        }
    }

    /// The first dashboard's rule set: five tests worth two points each.
    ///
    /// A reported value of zero fails every test, and a negative P/E passes
    /// the valuation test, as in that dashboard.
    #[must_use]
    pub fn classic() -> Self {
        Self {
            name: "classic".to_string(),
            max_score: 10.0,
            scale: ScoreScale::Points,
            criteria: vec![
                WeightedCriterion::new(
                    Criterion::PeBelow {
                        limit: 15.0,
                        allow_negative: true,
                    },
                    2.0,
                ),
                WeightedCriterion::new(Criterion::RoeAbove { limit: 0.1 }, 2.0),
                WeightedCriterion::new(Criterion::DividendYieldAbove { limit: 0.03 }, 2.0),
                WeightedCriterion::new(
                    Criterion::DebtToEquityBelow {
                        limit: 1.0,
                        zero_fails: true,
                    },
                    2.0,
                ),
                WeightedCriterion::new(Criterion::PositiveFreeCashflow, 2.0),
            ],
        }
    }

    /// Fraction rule set with sector-relative valuation and alpha.
    ///
    /// Requires [`SectorAverages`] computed over the whole batch.
    #[must_use]
    pub fn weighted() -> Self {
        Self {
            name: "weighted".to_string(),
            max_score: 1.0,
            scale: ScoreScale::Fraction,
            criteria: vec![
                WeightedCriterion::new(
                    Criterion::PeBelow {
                        limit: 15.0,
                        allow_negative: false,
                    },
                    0.20,
                ),
                WeightedCriterion::new(Criterion::PeBelowSectorAverage, 0.15),
                WeightedCriterion::new(
                    Criterion::PayoutInPhaseBand {
                        bands: PhaseBands::default(),
                    },
                    0.15,
                ),
                WeightedCriterion::new(
                    Criterion::EpsWithDividend {
                        min_eps: 1.0,
                        min_yield: 0.0,
                    },
                    0.15,
                ),
                WeightedCriterion::new(Criterion::PositiveFreeCashflow, 0.15),
                WeightedCriterion::new(
                    Criterion::BetaWithin {
                        low: 0.7,
                        high: 1.3,
                    },
                    0.10,
                ),
                WeightedCriterion::new(Criterion::PositiveAlpha, 0.10),
            ],
        }
    }

    /// Check that the rules can produce a meaningful bounded score.
    ///
    /// # Errors
    ///
    /// Returns [`ScreenerError::InvalidConfig`] if the maximum is not a
    /// positive finite number, if any weight is negative or non-finite, or if
    /// a fraction rule set's weights do not sum to one.
    pub fn validate(&self) -> Result<()> {
        if !self.max_score.is_finite() || self.max_score <= 0.0 {
            return Err(ScreenerError::InvalidConfig(format!(
                "rules '{}': max_score must be positive, got {}",
                self.name, self.max_score
            )));
        }

        if self.criteria.is_empty() {
            return Err(ScreenerError::InvalidConfig(format!(
                "rules '{}': no criteria",
                self.name
            )));
        }

        for wc in &self.criteria {
            if !wc.weight.is_finite() || wc.weight < 0.0 {
                return Err(ScreenerError::InvalidConfig(format!(
                    "rules '{}': weight {} for '{}' must be a non-negative number",
                    self.name,
                    wc.weight,
                    wc.criterion.describe()
                )));
            }
        }

        if self.scale == ScoreScale::Fraction {
            let total = self.total_weight();
            if (total - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
                return Err(ScreenerError::InvalidConfig(format!(
                    "rules '{}': fraction weights must sum to 1.0, got {total}",
                    self.name
                )));
            }
            if (self.max_score - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
                return Err(ScreenerError::InvalidConfig(format!(
                    "rules '{}': fraction rules must have max_score 1.0, got {}",
                    self.name, self.max_score
                )));
            }
        }

        Ok(())
    }

    /// Sum of all weights.
    #[must_use]
    pub fn total_weight(&self) -> f64 {
        self.criteria.iter().map(|wc| wc.weight).sum()
    }

    /// Whether scoring needs sector averages from the whole batch.
    #[must_use]
    pub fn needs_sector_averages(&self) -> bool {
        self.criteria
            .iter()
            .any(|wc| wc.criterion.needs_sector_averages())
    }

    /// Evaluate every criterion, returning each with its pass/fail outcome.
    pub fn evaluate<'a>(
        &'a self,
        record: &'a FundamentalsRecord,
        phase: Phase,
        sectors: &'a SectorAverages,
    ) -> impl Iterator<Item = (&'a WeightedCriterion, bool)> + 'a {
        self.criteria
            .iter()
            .map(move |wc| (wc, wc.criterion.passes(record, phase, sectors)))
    }

    /// Score a record already classified as `phase`.
    #[must_use]
    pub fn score(
        &self,
        record: &FundamentalsRecord,
        phase: Phase,
        sectors: &SectorAverages,
    ) -> Score {
        let raw: f64 = self
            .evaluate(record, phase, sectors)
            .filter(|(_, passed)| *passed)
            .map(|(wc, _)| wc.weight)
            .sum();
        let clipped = raw.min(self.max_score).max(0.0);

        trace!(
            ticker = %record.ticker,
            rules = %self.name,
            %phase,
            raw,
            score = clipped,
            "scored record"
        );

        Score::new(clipped)
    }
}

/// Score a record with the canonical rule set.
#[must_use]
pub fn calculate_score(record: &FundamentalsRecord, phase: Phase) -> Score {
    ScoringRules::canonical().score(record, phase, &SectorAverages::default())
}

/// Score a record with explicit rules and batch sector averages.
#[must_use]
pub fn calculate_score_with(
    record: &FundamentalsRecord,
    phase: Phase,
    rules: &ScoringRules,
    sectors: &SectorAverages,
) -> Score {
    rules.score(record, phase, sectors)
}
