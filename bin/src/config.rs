//! Screener configuration file.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::TimeDelta;
use screener_batch::ScreenFilter;
use screener_scoring::{PhaseThresholds, ScoringRules, get_preset};
use screener_traits::Symbol;
use serde::{Deserialize, Serialize};

use crate::data;

/// Tickers screened when the configuration names none.
pub(crate) const DEFAULT_TICKERS: &[&str] = &[
    "CEZ.PR", "KOMB.PR", "MONET.PR", "HSBA.L", "TSCO.L", "BP.L", "AAPL", "MSFT", "KO", "JNJ",
];

/// Settings read from a TOML file passed with `--config`.
///
/// Every field has a default, so an empty file is a valid configuration.
///
/// ```toml
/// tickers = ["KO", "CEZ.PR"]
/// preset = "weighted"
/// history_path = "data/score_history.csv"
///
/// [thresholds]
/// growth_min_eps = 3.0
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct ScreenerConfig {
    pub(crate) tickers: Vec<Symbol>,
    pub(crate) preset: String,
    /// Custom rule set, replaces `preset` when present.
    pub(crate) rules: Option<ScoringRules>,
    pub(crate) thresholds: PhaseThresholds,
    pub(crate) history_path: PathBuf,
    pub(crate) cache_ttl_secs: u64,
    pub(crate) concurrency: usize,
    pub(crate) min_score: f64,
}

impl Default for ScreenerConfig {
    fn default() -> Self {
        Self {
            tickers: DEFAULT_TICKERS.iter().map(|s| s.to_string()).collect(),
            preset: "canonical".to_string(),
            rules: None,
            thresholds: PhaseThresholds::default(),
            history_path: PathBuf::from("score_history.csv"),
            cache_ttl_secs: 3600,
            concurrency: 4,
            min_score: 0.0,
        }
    }
}

impl ScreenerConfig {
    /// Load the configuration, or the defaults when no path is given.
    pub(crate) fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("Invalid config {}", path.display()))
    }

    pub(crate) fn parse(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Rule set for this run.
    ///
    /// A preset named on the command line wins over custom rules, which win
    /// over the configured preset.
    pub(crate) fn rules(&self, preset: Option<&str>) -> Result<ScoringRules> {
        let rules = match (preset, &self.rules) {
            (Some(name), _) => get_preset(name)?,
            (None, Some(custom)) => custom.clone(),
            (None, None) => get_preset(&self.preset)?,
        };
        rules.validate()?;
        Ok(rules)
    }

    /// Configured tickers, trimmed and upper-cased.
    pub(crate) fn symbols(&self) -> Vec<Symbol> {
        data::normalize_symbols(&self.tickers)
    }

    /// Filter seeded with the configured minimum score.
    pub(crate) fn filter(&self) -> ScreenFilter {
        ScreenFilter::min_score(self.min_score)
    }

    /// Cache time-to-live, saturating at the largest representable span.
    pub(crate) fn cache_ttl(&self) -> TimeDelta {
        i64::try_from(self.cache_ttl_secs)
            .ok()
            .and_then(TimeDelta::try_seconds)
            .unwrap_or(TimeDelta::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use screener_scoring::ScoreScale;
    use std::io::Write;

    #[test]
    fn test_empty_file_is_default() {
        assert_eq!(ScreenerConfig::parse("").unwrap(), ScreenerConfig::default());
    }

    #[test]
    fn test_partial_file() {
        let config = ScreenerConfig::parse(
            r#"
            tickers = ["KO"]
            preset = "classic"
            min_score = 6.0

            [thresholds]
            growth_min_eps = 3.0
            "#,
        )
        .unwrap();

        assert_eq!(config.tickers, vec!["KO".to_string()]);
        assert_eq!(config.thresholds.growth_min_eps, 3.0);
        assert_eq!(config.thresholds.growth_min_roe, 0.15);
        assert_eq!(config.concurrency, 4);
        assert_eq!(config.rules(None).unwrap().name, "classic");
        assert_eq!(config.filter().min_score, 6.0);
    }

    #[test]
    fn test_configured_tickers_are_normalized() {
        let config =
            ScreenerConfig::parse(r#"tickers = [" cez.pr", "", "hsba.l ", "KO"]"#).unwrap();
        assert_eq!(config.symbols(), vec!["CEZ.PR", "HSBA.L", "KO"]);
    }

    #[test]
    fn test_custom_rules_and_override() {
        let config = ScreenerConfig::parse(
            r#"
            [rules]
            name = "cash"
            max_score = 1.0
            scale = "fraction"

            [[rules.criteria]]
            kind = "positive_free_cashflow"
            weight = 1.0
            "#,
        )
        .unwrap();

        let custom = config.rules(None).unwrap();
        assert_eq!(custom.name, "cash");
        assert_eq!(custom.scale, ScoreScale::Fraction);
        assert_eq!(config.rules(Some("weighted")).unwrap().name, "weighted");
    }

    #[test]
    fn test_unknown_preset_is_an_error() {
        let config = ScreenerConfig {
            preset: "nope".to_string(),
            ..ScreenerConfig::default()
        };
        assert!(config.rules(None).is_err());
    }

    #[test]
    fn test_huge_cache_ttl_saturates() {
        let config = ScreenerConfig::parse("cache_ttl_secs = 10000000000000000").unwrap();
        assert_eq!(config.cache_ttl(), TimeDelta::MAX);

        let config = ScreenerConfig {
            cache_ttl_secs: u64::MAX,
            ..ScreenerConfig::default()
        };
        assert_eq!(config.cache_ttl(), TimeDelta::MAX);
        assert_eq!(ScreenerConfig::default().cache_ttl(), TimeDelta::hours(1));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "cache_ttl_secs = 60").unwrap();
        let config = ScreenerConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.cache_ttl(), TimeDelta::seconds(60));
        assert!(ScreenerConfig::load(Some(Path::new("/nonexistent/screener.toml"))).is_err());
    }
}
