//! Batch processing for the screener.
//!
//! A screening run goes through three stages:
//! 1. [`fetch_batch`] pulls one record per ticker from a
//!    [`FundamentalsSource`](screener_traits::FundamentalsSource), dropping
//!    tickers that fail and reporting them
//! 2. [`BatchEvaluator`] computes batch-wide sector averages, then
//!    classifies and scores every record
//! 3. [`screen_table`] lays the results out as a DataFrame that a
//!    [`ScreenFilter`] narrows down
//!
//! [`CachedSource`] wraps any source with a time-to-live cache.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

mod cache;
mod evaluate;
mod fetch;
mod table;

pub use cache::CachedSource;
pub use evaluate::{BatchEvaluator, ScoredRecord};
pub use fetch::{BatchFetch, DroppedTicker, fetch_batch};
pub use table::{ScreenFilter, screen_table};
