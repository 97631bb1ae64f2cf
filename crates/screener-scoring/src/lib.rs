//! Scoring engine for the screener stock dashboard.
//!
//! This crate turns one [`FundamentalsRecord`](screener_traits::FundamentalsRecord)
//! into the two values every consumer needs:
//! - a [`Phase`](screener_traits::Phase) label (Growth, Stable or Value)
//! - a bounded [`Score`](screener_traits::Score)
//!
//! The scoring rules are data rather than code. [`ScoringRules`] holds a list
//! of weighted [`Criterion`] values and a declared maximum; the different
//! dashboard formulas are presets of that one type (see [`registry`]).
//!
//! # Example
//!
//! ```
//! use screener_scoring::{calculate_score, classify_phase};
//! use screener_traits::{FundamentalsRecord, Phase};
//!
//! let record = FundamentalsRecord {
//!     trailing_pe: Some(12.0),
//!     trailing_eps: Some(3.0),
//!     return_on_equity: Some(0.2),
//!     ..FundamentalsRecord::new("AAPL")
//! };
//!
//! let phase = classify_phase(&record);
//! assert_eq!(phase, Phase::Growth);
//! assert_eq!(calculate_score(&record, phase).value(), 3.0);
//! ```

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod criteria;
pub mod phase;
pub mod registry;
pub mod rules;
pub mod sector;

// Re-export key types
pub use criteria::{Band, Criterion, PhaseBands};
pub use phase::{PhaseThresholds, classify_phase};
pub use registry::{PresetInfo, available_presets, get_preset};
pub use rules::{ScoreScale, ScoringRules, WeightedCriterion, calculate_score, calculate_score_with};
pub use sector::SectorAverages;
