//! CLI subcommand modules.
//!
//! This module contains the implementations for all screener CLI subcommands.

pub(crate) mod history;
pub(crate) mod presets;
pub(crate) mod score;
pub(crate) mod screen;
pub(crate) mod show;

use anyhow::Result;
use chrono::NaiveDate;
use screener_batch::ScoredRecord;
use screener_history::HistoryLog;
use std::path::Path;

/// Append a day's scores to the history log at `path`.
pub(crate) fn log_scores(path: &Path, date: NaiveDate, scored: &[ScoredRecord]) -> Result<usize> {
    let mut log = HistoryLog::open(path);
    let written = log.record(
        date,
        scored.iter().map(|s| (s.record.ticker.clone(), s.score)),
    );
    log.save()?;
    Ok(written)
}

/// Print the tickers a batch left out.
pub(crate) fn report_dropped(dropped: &[String]) {
    if !dropped.is_empty() {
        println!("Skipped {} ticker(s) without data: {}", dropped.len(), dropped.join(", "));
        println!();
    }
}
