//! Score command implementation.

use crate::{cmd, config::ScreenerConfig, data};
use anyhow::Result;
use chrono::Utc;
use screener_batch::ScoredRecord;

/// Options for the `score` command.
#[derive(Debug)]
pub(crate) struct ScoreArgs {
    pub(crate) symbols: Vec<String>,
    pub(crate) preset: Option<String>,
    pub(crate) date: Option<String>,
    pub(crate) no_log: bool,
    pub(crate) json: bool,
}

/// Score the given symbols and log the result.
pub(crate) async fn show_scores(config: &ScreenerConfig, args: ScoreArgs) -> Result<()> {
    let rules = config.rules(args.preset.as_deref())?;
    let date = match args.date.as_deref() {
        Some(d) => data::parse_date(d)?,
        None => Utc::now().date_naive(),
    };

    let symbols = if args.symbols.is_empty() {
        config.symbols()
    } else {
        data::normalize_symbols(&args.symbols)
    };

    let rules_name = rules.name.clone();
    let max_score = rules.max_score;
    let (scored, dropped) = data::load_scores(config, rules, &symbols).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&scored)?);
    } else {
        println!("\n╔══════════════════════════════════════════════════════════════╗");
        println!("║                      Company Scores                          ║");
        println!("╚══════════════════════════════════════════════════════════════╝\n");

        println!("Rules:  {rules_name} (max {max_score})");
        println!("Date:   {date}");
        println!();

        cmd::report_dropped(&dropped);
        print_scores(&scored);
    }

    if !args.no_log && !scored.is_empty() {
        let written = cmd::log_scores(&config.history_path, date, &scored)?;
        if !args.json {
            println!(
                "Logged {written} score(s) to {}",
                config.history_path.display()
            );
            println!();
        }
    }

    Ok(())
}

fn print_scores(scored: &[ScoredRecord]) {
    println!("{:<10} {:<8} {:<8} {:>8}  Name", "Symbol", "Exchange", "Phase", "Score");
    println!("{}", "─".repeat(60));

    for s in scored {
        println!(
            "{:<10} {:<8} {:<8} {:>8}  {}",
            s.record.ticker,
            s.record.exchange(),
            s.phase.as_str(),
            s.score.to_string(),
            s.record.name.as_deref().unwrap_or("-"),
        );
    }
    println!();
}
