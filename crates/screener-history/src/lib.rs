//! Score history log for screener.
//!
//! Each run of the screener appends one score per ticker per calendar day to
//! a flat CSV table keyed by `(ticker, date)`. History charts read the log
//! back one ticker at a time.
//!
//! # Example
//!
//! ```rust,no_run
//! use screener_history::HistoryLog;
//! use screener_traits::{Date, Score};
//!
//! let mut log = HistoryLog::open("score_history.csv");
//! let today = Date::from_ymd_opt(2024, 5, 2).unwrap();
//! log.record(today, [("AAPL", Score::new(7.0)), ("KO", Score::new(5.0))]);
//! log.save()?;
//!
//! for (date, score) in log.series("AAPL") {
//!     println!("{date}: {score}");
//! }
//! # Ok::<(), screener_traits::ScreenerError>(())
//! ```

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

mod log;

pub use log::{HistoryLog, ScoreHistoryEntry};
