//! CSV-backed score history.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use screener_traits::{Date, Result, Score, Symbol};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// One row of the history log.
///
/// The CSV columns are `Ticker,Score,Date`. Logs written by the Czech-language
/// dashboard used `Skóre` and `Datum`; those headers are still accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreHistoryEntry {
    /// Ticker symbol
    #[serde(rename = "Ticker")]
    pub ticker: Symbol,

    /// Score recorded for the day
    #[serde(rename = "Score", alias = "Skóre")]
    pub score: Score,

    /// Calendar day of the run
    #[serde(rename = "Date", alias = "Datum")]
    pub date: Date,
}

/// Append-only score log deduplicated on `(ticker, date)`.
///
/// Recording a ticker twice on the same day keeps only the last score.
/// Rows are never removed.
#[derive(Debug, Clone)]
pub struct HistoryLog {
    path: PathBuf,
    rows: BTreeMap<(Date, Symbol), Score>,
}

impl HistoryLog {
    /// Load the log at `path`.
    ///
    /// A missing, unreadable or corrupt file yields an empty log; the next
    /// [`save`](Self::save) rewrites it from scratch.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();

        let rows = if path.exists() {
            match read_rows(&path) {
                Ok(rows) => {
                    debug!(path = %path.display(), rows = rows.len(), "loaded score history");
                    rows
                }
                Err(e) => {
                    warn!(
                        path = %path.display(),
                        error = %e,
                        "score history unreadable, starting with an empty log"
                    );
                    BTreeMap::new()
                }
            }
        } else {
            debug!(path = %path.display(), "no score history yet");
            BTreeMap::new()
        };

        Self { path, rows }
    }

    /// Path the log is saved to.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Record one score per ticker for `date`.
    ///
    /// Returns the number of scores written.
    pub fn record<I, S>(&mut self, date: Date, scores: I) -> usize
    where
        I: IntoIterator<Item = (S, Score)>,
        S: Into<Symbol>,
    {
        let mut written = 0;
        for (ticker, score) in scores {
            self.rows.insert((date, ticker.into()), score);
            written += 1;
        }
        written
    }

    /// Write the whole log back to its file, sorted by date then ticker.
    ///
    /// The file is written next to its final location and renamed into place.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or the file cannot
    /// be written.
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let tmp = self.path.with_extension("csv.tmp");
        {
            let mut writer = csv::Writer::from_path(&tmp)?;
            for entry in self.entries() {
                writer.serialize(entry)?;
            }
            writer.flush()?;
        }
        fs::rename(&tmp, &self.path)?;

        info!(path = %self.path.display(), rows = self.rows.len(), "saved score history");
        Ok(())
    }

    /// Scores recorded for `ticker`, oldest first.
    pub fn series(&self, ticker: &str) -> Vec<(Date, Score)> {
        self.rows
            .iter()
            .filter(|((_, t), _)| t == ticker)
            .map(|((date, _), score)| (*date, *score))
            .collect()
    }

    /// All rows, sorted by date then ticker.
    pub fn entries(&self) -> impl Iterator<Item = ScoreHistoryEntry> + '_ {
        self.rows
            .iter()
            .map(|((date, ticker), score)| ScoreHistoryEntry {
                ticker: ticker.clone(),
                score: *score,
                date: *date,
            })
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the log has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

fn read_rows(path: &Path) -> Result<BTreeMap<(Date, Symbol), Score>> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut rows = BTreeMap::new();
    for row in reader.deserialize() {
        let entry: ScoreHistoryEntry = row?;
        rows.insert((entry.date, entry.ticker), entry.score);
    }
    Ok(rows)
}
