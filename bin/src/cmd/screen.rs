//! Screen command implementation.

use crate::{cmd, config::ScreenerConfig, data};
use anyhow::{Context, Result};
use chrono::Utc;
use polars::prelude::*;
use screener_batch::{ScreenFilter, screen_table};
use screener_traits::Phase;

/// Options for the `screen` command.
#[derive(Debug)]
pub(crate) struct ScreenArgs {
    pub(crate) min_score: Option<f64>,
    pub(crate) phases: Vec<Phase>,
    pub(crate) sectors: Vec<String>,
    pub(crate) exchanges: Vec<String>,
    pub(crate) preset: Option<String>,
    pub(crate) no_log: bool,
}

impl ScreenArgs {
    fn filter(&self, config: &ScreenerConfig) -> ScreenFilter {
        let mut filter = config.filter();
        if let Some(min) = self.min_score {
            filter.min_score = min;
        }
        filter.phases.clone_from(&self.phases);
        filter.sectors.clone_from(&self.sectors);
        filter.exchanges = self.exchanges.iter().map(|e| e.to_uppercase()).collect();
        filter
    }
}

/// Screen the configured tickers and print the rows that pass the filter.
pub(crate) async fn run_screen(config: &ScreenerConfig, args: ScreenArgs) -> Result<()> {
    let rules = config.rules(args.preset.as_deref())?;
    let filter = args.filter(config);
    let symbols = config.symbols();

    println!("\n╔══════════════════════════════════════════════════════════════╗");
    println!("║                      Stock Screener                          ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");

    println!("Rules:      {} (max {})", rules.name, rules.max_score);
    println!("Tickers:    {}", symbols.len());
    println!("Min score:  {}", filter.min_score);
    if !filter.phases.is_empty() {
        let phases: Vec<&str> = filter.phases.iter().map(Phase::as_str).collect();
        println!("Phases:     {}", phases.join(", "));
    }
    if !filter.sectors.is_empty() {
        println!("Sectors:    {}", filter.sectors.join(", "));
    }
    if !filter.exchanges.is_empty() {
        println!("Exchanges:  {}", filter.exchanges.join(", "));
    }
    println!();

    let (scored, dropped) = data::load_scores(config, rules, &symbols).await?;
    cmd::report_dropped(&dropped);

    let table = screen_table(&scored)?;
    let kept = filter.apply(&table)?;
    print_table(&kept)?;

    println!("{} of {} ticker(s) passed", kept.height(), table.height());
    println!();

    if !args.no_log && !scored.is_empty() {
        cmd::log_scores(&config.history_path, Utc::now().date_naive(), &scored)?;
    }

    Ok(())
}

fn print_table(table: &DataFrame) -> Result<()> {
    let text = |name: &str| -> Result<Vec<String>> {
        Ok(table
            .column(name)
            .with_context(|| format!("Missing column: {name}"))?
            .as_materialized_series()
            .str()?
            .into_iter()
            .map(|v| v.unwrap_or("-").to_string())
            .collect())
    };
    let number = |name: &str| -> Result<Vec<Option<f64>>> {
        Ok(table
            .column(name)
            .with_context(|| format!("Missing column: {name}"))?
            .as_materialized_series()
            .f64()?
            .into_iter()
            .collect())
    };

    let tickers = text("ticker")?;
    let exchanges = text("exchange")?;
    let sectors = text("sector")?;
    let phases = text("phase")?;
    let scores = number("score")?;
    let pes = number("pe")?;
    let yields = number("dividend_yield")?;

    println!(
        "{:<10} {:<6} {:<24} {:<7} {:>7} {:>8} {:>7}",
        "Symbol", "Exch", "Sector", "Phase", "Score", "P/E", "Yield"
    );
    println!("{}", "─".repeat(75));

    for i in 0..table.height() {
        println!(
            "{:<10} {:<6} {:<24} {:<7} {:>7} {:>8} {:>7}",
            tickers[i],
            exchanges[i],
            truncate(&sectors[i], 24),
            phases[i],
            fmt_opt(scores[i], 2),
            fmt_opt(pes[i], 1),
            yields[i].map_or_else(|| "-".to_string(), |y| format!("{:.1}%", y * 100.0)),
        );
    }
    println!();

    Ok(())
}

fn fmt_opt(value: Option<f64>, decimals: usize) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{v:.decimals$}"))
}

fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        s.to_string()
    } else {
        let mut out: String = s.chars().take(width.saturating_sub(1)).collect();
        out.push('…');
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_filter_overrides_config() {
        let config = ScreenerConfig {
            min_score: 5.0,
            ..ScreenerConfig::default()
        };
        let args = ScreenArgs {
            min_score: None,
            phases: vec![Phase::Value],
            sectors: Vec::new(),
            exchanges: vec!["pr".to_string()],
            preset: None,
            no_log: true,
        };
        let filter = args.filter(&config);
        assert_eq!(filter.min_score, 5.0);
        assert_eq!(filter.exchanges, vec!["PR".to_string()]);

        let args = ScreenArgs {
            min_score: Some(7.0),
            ..args
        };
        assert_eq!(args.filter(&config).min_score, 7.0);
    }

    #[test]
    fn test_fmt_helpers() {
        assert_eq!(fmt_opt(Some(12.345), 1), "12.3");
        assert_eq!(fmt_opt(None, 2), "-");
        assert_eq!(truncate("Financial Services", 24), "Financial Services");
        assert_eq!(truncate("Communication Services Group", 10), "Communica…");
    }
}
