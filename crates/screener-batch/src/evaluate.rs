//! Batch classification and scoring.

use screener_scoring::{PhaseThresholds, ScoringRules, SectorAverages};
use screener_traits::{FundamentalsRecord, Phase, Result, Score};
use serde::Serialize;
use tracing::{debug, info};

/// A record together with its phase and score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredRecord {
    /// The fundamentals that were scored
    pub record: FundamentalsRecord,
    /// Growth phase
    pub phase: Phase,
    /// Bounded score
    pub score: Score,
}

/// Classifies and scores whole batches with one rule set.
#[derive(Debug, Clone, Default)]
pub struct BatchEvaluator {
    rules: ScoringRules,
    thresholds: PhaseThresholds,
}

impl BatchEvaluator {
    /// Create an evaluator after checking the rules.
    ///
    /// # Errors
    ///
    /// Returns an error if the rules fail [`ScoringRules::validate`].
    pub fn new(rules: ScoringRules, thresholds: PhaseThresholds) -> Result<Self> {
        rules.validate()?;
        Ok(Self { rules, thresholds })
    }

    /// The rule set in use.
    pub const fn rules(&self) -> &ScoringRules {
        &self.rules
    }

    /// The phase thresholds in use.
    pub const fn thresholds(&self) -> &PhaseThresholds {
        &self.thresholds
    }

    /// Score every record of a batch.
    ///
    /// Sector averages are computed over the complete batch before the first
    /// record is scored, so each score is independent of record order. Output
    /// order follows input order.
    pub fn evaluate(&self, records: Vec<FundamentalsRecord>) -> Vec<ScoredRecord> {
        let sectors = if self.rules.needs_sector_averages() {
            SectorAverages::from_records(&records)
        } else {
            SectorAverages::default()
        };

        let scored: Vec<ScoredRecord> = records
            .into_iter()
            .map(|record| self.evaluate_one(record, &sectors))
            .collect();

        info!(
            rules = %self.rules.name,
            records = scored.len(),
            sectors = sectors.len(),
            "batch scored"
        );

        scored
    }

    /// Score one record against precomputed sector averages.
    pub fn evaluate_one(
        &self,
        record: FundamentalsRecord,
        sectors: &SectorAverages,
    ) -> ScoredRecord {
        let phase = self.thresholds.classify(&record);
        let score = self.rules.score(&record, phase, sectors);
        debug!(ticker = %record.ticker, %phase, %score, "evaluated");
        ScoredRecord {
            record,
            phase,
            score,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::collections::HashMap;

    fn peer(ticker: &str, sector: &str, pe: f64) -> FundamentalsRecord {
        FundamentalsRecord {
            sector: Some(sector.to_string()),
            trailing_pe: Some(pe),
            free_cashflow: Some(1.0),
            ..FundamentalsRecord::new(ticker)
        }
    }

    #[test]
    fn test_default_is_canonical() {
        let evaluator = BatchEvaluator::default();
        assert_eq!(evaluator.rules().name, "canonical");
        let scored = evaluator.evaluate(vec![FundamentalsRecord::new("EMPTY")]);
        assert_eq!(scored[0].phase, Phase::Value);
        assert_eq!(scored[0].score, Score::ZERO);
    }

    #[test]
    fn test_new_rejects_invalid_rules() {
        let mut rules = ScoringRules::weighted();
        rules.criteria.pop();
        assert!(BatchEvaluator::new(rules, PhaseThresholds::default()).is_err());
    }

    #[test]
    fn test_weighted_scores_are_order_independent() {
        let evaluator =
            BatchEvaluator::new(ScoringRules::weighted(), PhaseThresholds::default()).unwrap();
        let mut batch = vec![
            peer("A", "Tech", 18.0),
            peer("B", "Tech", 40.0),
            peer("C", "Tech", 25.0),
            peer("D", "Energy", 9.0),
            peer("E", "Energy", 11.0),
        ];

        let by_ticker = |scored: Vec<ScoredRecord>| -> HashMap<String, f64> {
            scored
                .into_iter()
                .map(|s| (s.record.ticker, s.score.value()))
                .collect()
        };

        let forward = by_ticker(evaluator.evaluate(batch.clone()));
        batch.reverse();
        let backward = by_ticker(evaluator.evaluate(batch.clone()));
        batch.rotate_left(2);
        let rotated = by_ticker(evaluator.evaluate(batch));

        assert_eq!(forward, backward);
        assert_eq!(forward, rotated);

        // Tech average is 27.67: A and C are below it, B is not.
        assert_relative_eq!(forward["A"], 0.30, epsilon = 1e-12);
        assert_relative_eq!(forward["B"], 0.15, epsilon = 1e-12);
        // Energy average is 10: D is below it and also under 15.
        assert_relative_eq!(forward["D"], 0.50, epsilon = 1e-12);
        assert_relative_eq!(forward["E"], 0.35, epsilon = 1e-12);
    }

    #[test]
    fn test_output_follows_input_order() {
        let scored = BatchEvaluator::default().evaluate(vec![
            FundamentalsRecord::new("Z"),
            FundamentalsRecord::new("A"),
        ]);
        let tickers: Vec<&str> = scored.iter().map(|s| s.record.ticker.as_str()).collect();
        assert_eq!(tickers, vec!["Z", "A"]);
    }
}
