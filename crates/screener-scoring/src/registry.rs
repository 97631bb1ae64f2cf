//! Preset registry for discovering the built-in scoring rule sets.
//!
//! Every scoring formula the dashboard has used is a preset of
//! [`ScoringRules`]; this module names them, describes them and resolves
//! user-facing aliases.

use screener_traits::{Result, ScreenerError};
use serde::Serialize;

use crate::rules::{ScoreScale, ScoringRules};

/// Metadata about a preset.
#[derive(Debug, Clone, Serialize)]
pub struct PresetInfo {
    /// Unique identifier for the preset
    pub name: &'static str,

    /// Alternative names accepted by [`get_preset`]
    pub aliases: &'static [&'static str],

    /// Human-readable description
    pub description: &'static str,

    /// Points or fraction
    pub scale: ScoreScale,

    /// Whether the preset needs batch-wide sector averages
    pub sector_relative: bool,
}

impl PresetInfo {
    /// Build the rule set this entry describes.
    #[must_use]
    pub fn rules(&self) -> ScoringRules {
        match self.name {
            "classic" => ScoringRules::classic(),
            "weighted" => ScoringRules::weighted(),
            _ => ScoringRules::canonical(),
        }
    }

    fn matches(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
            || self.aliases.iter().any(|a| a.eq_ignore_ascii_case(name))
    }
}

/// Get information about all built-in presets.
#[must_use]
pub fn available_presets() -> Vec<PresetInfo> {
    vec![
        PresetInfo {
            name: "canonical",
            aliases: &["default", "points"],
            description: "Phase-aware points: P/E, payout band, EPS with dividend, FCF, beta \
                          (max 10)",
            scale: ScoreScale::Points,
            sector_relative: false,
        },
        PresetInfo {
            name: "classic",
            aliases: &["original", "v1"],
            description: "Two points each for P/E, ROE, dividend yield, debt/equity, FCF (max 10)",
            scale: ScoreScale::Points,
            sector_relative: false,
        },
        PresetInfo {
            name: "weighted",
            aliases: &["fraction"],
            description: "Weights summing to 1 with sector-relative P/E and alpha (max 1.0)",
            scale: ScoreScale::Fraction,
            sector_relative: true,
        },
    ]
}

/// Get information about a preset by name or alias.
#[must_use]
pub fn preset_info(name: &str) -> Option<PresetInfo> {
    available_presets()
        .into_iter()
        .find(|info| info.matches(name.trim()))
}

/// Resolve a preset by name or alias into its rule set.
///
/// # Errors
///
/// Returns [`ScreenerError::UnknownPreset`] if no preset matches.
pub fn get_preset(name: &str) -> Result<ScoringRules> {
    preset_info(name)
        .map(|info| info.rules())
        .ok_or_else(|| ScreenerError::UnknownPreset(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_available_presets() {
        let presets = available_presets();
        assert_eq!(presets.len(), 3);
        for info in &presets {
            let rules = info.rules();
            assert_eq!(rules.name, info.name);
            assert_eq!(rules.scale, info.scale);
            assert_eq!(rules.needs_sector_averages(), info.sector_relative);
            rules.validate().unwrap();
        }
    }

    #[test]
    fn test_get_preset_by_alias() {
        assert_eq!(get_preset("default").unwrap().name, "canonical");
        assert_eq!(get_preset("ORIGINAL").unwrap().name, "classic");
        assert_eq!(get_preset(" fraction ").unwrap().name, "weighted");
    }

    #[test]
    fn test_unknown_preset() {
        let result = get_preset("nonexistent");
        assert!(matches!(result, Err(ScreenerError::UnknownPreset(_))));
        assert!(preset_info("nonexistent").is_none());
    }

    #[test]
    fn test_descriptions() {
        for info in available_presets() {
            assert!(!info.description.is_empty());
        }
    }
}
