//! Batch-wide sector averages.
//!
//! Sector-relative criteria compare a record against its peers in the same
//! batch, so the averages must be computed over the whole batch before any
//! record in it is scored.

use std::collections::BTreeMap;

use screener_traits::{FundamentalsRecord, stats::mean_of_finite};
use tracing::debug;

/// Mean trailing P/E per sector over one batch.
///
/// Only positive, finite P/E values of records with a sector contribute.
/// The result does not depend on the order of the input records.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SectorAverages {
    pe: BTreeMap<String, f64>,
}

impl SectorAverages {
    /// Compute the averages over a batch.
    #[must_use]
    pub fn from_records(records: &[FundamentalsRecord]) -> Self {
        let mut by_sector: BTreeMap<String, Vec<f64>> = BTreeMap::new();
        for record in records {
            if let (Some(sector), Some(pe)) = (record.sector.as_deref(), record.pe())
                && pe > 0.0
            {
                by_sector.entry(sector.to_string()).or_default().push(pe);
            }
        }

        let pe: BTreeMap<String, f64> = by_sector
            .into_iter()
            .filter_map(|(sector, values)| mean_of_finite(&values).map(|mean| (sector, mean)))
            .collect();

        debug!(sectors = pe.len(), records = records.len(), "computed sector P/E averages");

        Self { pe }
    }

    /// Average P/E for `sector`, if any peer reported one.
    #[must_use]
    pub fn pe_for(&self, sector: &str) -> Option<f64> {
        self.pe.get(sector).copied()
    }

    /// Iterate over `(sector, average P/E)` pairs in sector order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.pe.iter().map(|(sector, pe)| (sector.as_str(), *pe))
    }

    /// Number of sectors with an average.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pe.len()
    }

    /// Whether no sector has an average.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pe.is_empty()
    }
}
