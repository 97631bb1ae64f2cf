//! Fail-open batch fetching.

use futures::stream::{self, StreamExt};
use screener_traits::{FetchError, FundamentalsRecord, FundamentalsSource, Symbol};
use tracing::{info, warn};

/// A ticker left out of a batch, with the reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DroppedTicker {
    /// The ticker
    pub symbol: Symbol,
    /// Why it could not be fetched
    pub error: FetchError,
}

/// Result of fetching a batch of tickers.
#[derive(Debug, Clone, Default)]
pub struct BatchFetch {
    /// Records fetched successfully, in request order
    pub records: Vec<FundamentalsRecord>,
    /// Tickers that failed, in request order
    pub dropped: Vec<DroppedTicker>,
}

impl BatchFetch {
    /// Number of tickers left out of the batch.
    #[must_use]
    pub const fn dropped_count(&self) -> usize {
        self.dropped.len()
    }

    /// Dropped tickers whose failure may go away on retry.
    pub fn retryable(&self) -> impl Iterator<Item = &str> {
        self.dropped
            .iter()
            .filter(|d| d.error.is_retryable())
            .map(|d| d.symbol.as_str())
    }
}

/// Fetch every symbol, at most `concurrency` at a time.
///
/// A failure for one ticker never fails the batch: the ticker is moved to
/// [`BatchFetch::dropped`] and a warning is logged.
pub async fn fetch_batch<S>(source: &S, symbols: &[Symbol], concurrency: usize) -> BatchFetch
where
    S: FundamentalsSource,
{
    let outcomes: Vec<_> = stream::iter(symbols)
        .map(|symbol| async move { (symbol, source.fetch(symbol).await) })
        .buffered(concurrency.max(1))
        .collect()
        .await;

    let mut batch = BatchFetch::default();
    for (symbol, outcome) in outcomes {
        match outcome {
            Ok(record) => batch.records.push(record),
            Err(error) => {
                warn!(%symbol, %error, "dropping ticker from batch");
                batch.dropped.push(DroppedTicker {
                    symbol: symbol.clone(),
                    error,
                });
            }
        }
    }

    info!(
        requested = symbols.len(),
        fetched = batch.records.len(),
        dropped = batch.dropped_count(),
        "batch fetch finished"
    );

    batch
}
