//! History command implementation.

use crate::config::ScreenerConfig;
use anyhow::Result;
use screener_history::HistoryLog;
use screener_traits::{Date, Score};

/// Show the logged scores for one ticker.
pub(crate) fn show_history(config: &ScreenerConfig, ticker: &str) -> Result<()> {
    let ticker = ticker.trim().to_uppercase();
    let log = HistoryLog::open(&config.history_path);
    let series = log.series(&ticker);

    println!("\n╔══════════════════════════════════════════════════════════════╗");
    println!("║                      Score History                           ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");

    println!("Ticker: {ticker}");
    println!("Log:    {}", log.path().display());
    println!();

    if series.is_empty() {
        println!("No scores logged for {ticker}.");
        println!();
        return Ok(());
    }

    println!("{:<12} {:>8} {:>8}", "Date", "Score", "Change");
    println!("{}", "─".repeat(30));
    for (date, score, change) in with_changes(&series) {
        let change = change.map_or_else(|| "-".to_string(), |c| format!("{c:+}"));
        println!("{:<12} {:>8} {:>8}", date.to_string(), score.to_string(), change);
    }
    println!();

    Ok(())
}

/// Pair every entry with its change from the previous one.
fn with_changes(series: &[(Date, Score)]) -> Vec<(Date, Score, Option<f64>)> {
    series
        .iter()
        .enumerate()
        .map(|(i, &(date, score))| {
            let change = i
                .checked_sub(1)
                .map(|prev| score.value() - series[prev].1.value());
            (date, score, change)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_changes() {
        let day = |d| Date::from_ymd_opt(2024, 5, d).unwrap();
        let series = vec![
            (day(1), Score::new(4.0)),
            (day(2), Score::new(7.0)),
            (day(3), Score::new(5.0)),
        ];
        let changes: Vec<Option<f64>> = with_changes(&series)
            .into_iter()
            .map(|(_, _, c)| c)
            .collect();
        assert_eq!(changes, vec![None, Some(3.0), Some(-2.0)]);
    }
}
