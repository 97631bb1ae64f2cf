//! Show command implementation.

use crate::{config::ScreenerConfig, data};
use anyhow::{Result, bail};
use screener_batch::ScoredRecord;
use screener_scoring::{ScoringRules, SectorAverages};

/// Width descriptions are wrapped to.
const WRAP_WIDTH: usize = 64;

/// Show one ticker's details and its per-criterion score breakdown.
pub(crate) async fn show_ticker(
    config: &ScreenerConfig,
    ticker: &str,
    preset: Option<&str>,
) -> Result<()> {
    let rules = config.rules(preset)?;
    let symbols = data::normalize_symbols(&[ticker.to_string()]);
    let (scored, _) = data::load_scores(config, rules.clone(), &symbols).await?;

    let Some(scored) = scored.into_iter().next() else {
        bail!("No data for {}", ticker.trim());
    };

    println!("\n╔══════════════════════════════════════════════════════════════╗");
    println!("║                      Stock Details                           ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");

    for line in detail_lines(&scored, &rules) {
        println!("{line}");
    }
    println!();

    Ok(())
}

/// Render the detail view of a scored record.
///
/// Sector averages come from the record alone, matching how a one-ticker
/// batch is scored.
fn detail_lines(scored: &ScoredRecord, rules: &ScoringRules) -> Vec<String> {
    let record = &scored.record;
    let sectors = SectorAverages::from_records(std::slice::from_ref(record));

    let mut lines = vec![
        format!("Ticker:    {}", record.ticker),
        format!("Name:      {}", record.name.as_deref().unwrap_or("-")),
        format!("Sector:    {}", record.sector.as_deref().unwrap_or("-")),
        format!("Exchange:  {}", record.exchange()),
        format!("Phase:     {}", scored.phase),
        format!("Score:     {} / {} ({})", scored.score, rules.max_score, rules.name),
        String::new(),
    ];

    lines.push(format!("{:<6} {:>6}  Criterion", "Result", "Weight"));
    lines.push("─".repeat(60));
    for (wc, passed) in rules.evaluate(record, scored.phase, &sectors) {
        lines.push(format!(
            "{:<6} {:>6}  {}",
            if passed { "pass" } else { "fail" },
            wc.weight,
            wc.criterion.describe()
        ));
    }

    let description = record.description.as_deref().map(|d| wrap(d, WRAP_WIDTH));
    if let Some(wrapped) = description.filter(|w| !w.is_empty()) {
        lines.push(String::new());
        lines.extend(wrapped);
    }

    lines
}

/// Greedy word wrap.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if !current.is_empty() && current.chars().count() + 1 + word.chars().count() > width {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use screener_batch::BatchEvaluator;
    use screener_traits::{FundamentalsRecord, Phase};

    fn scored_growth_record() -> ScoredRecord {
        let record = FundamentalsRecord {
            name: Some("Apple Inc.".to_string()),
            sector: Some("Technology".to_string()),
            description: Some("Designs phones and computers.".to_string()),
            trailing_pe: Some(12.0),
            trailing_eps: Some(3.0),
            return_on_equity: Some(0.2),
            payout_ratio: Some(0.2),
            dividend_yield: Some(0.01),
            free_cashflow: Some(1e6),
            beta: Some(2.0),
            ..FundamentalsRecord::new("AAPL")
        };
        BatchEvaluator::default().evaluate(vec![record]).remove(0)
    }

    #[test]
    fn test_detail_lines_show_record_and_breakdown() {
        let scored = scored_growth_record();
        assert_eq!(scored.phase, Phase::Growth);

        let lines = detail_lines(&scored, &ScoringRules::canonical());
        assert!(lines.contains(&"Name:      Apple Inc.".to_string()));
        assert!(lines.contains(&"Sector:    Technology".to_string()));
        assert!(lines.contains(&"Exchange:  USA".to_string()));
        assert!(lines.contains(&"Phase:     Growth".to_string()));
        assert!(lines.contains(&"Score:     9 / 10 (canonical)".to_string()));
        assert!(lines.contains(&"Designs phones and computers.".to_string()));

        let results: Vec<&str> = lines
            .iter()
            .filter_map(|l| l.split_whitespace().next())
            .filter(|word| matches!(*word, "pass" | "fail"))
            .collect();
        assert_eq!(results, vec!["pass", "pass", "pass", "pass", "fail"]);
    }

    #[test]
    fn test_detail_lines_without_description() {
        let mut scored = scored_growth_record();
        scored.record.description = None;
        scored.record.name = None;
        let lines = detail_lines(&scored, &ScoringRules::canonical());
        assert!(lines.contains(&"Name:      -".to_string()));
        assert!(lines.last().is_some_and(|l| l.starts_with("fail")));
    }

    #[test]
    fn test_wrap() {
        assert_eq!(
            wrap("one two three four", 9),
            vec!["one two".to_string(), "three".to_string(), "four".to_string()]
        );
        assert!(wrap("   ", 10).is_empty());
    }
}
