use crate::acquire::acquire;
use crate::lookback::Lookback;
use crate::yahoo::PriceSource;
use indicatif::ProgressBar;
use std::collections::HashMap;
use std::path::PathBuf;
use tickboard_core::{Catalog, SeriesSet};
use tracing::{debug, trace};

/// Arguments an acquisition is memoized by.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AcquireKey {
    pub catalog: Catalog,
    pub export: Option<PathBuf>,
    pub lookback: Lookback,
}

/// Acquisition results kept for the lifetime of the process.
///
/// Unbounded and never evicted; a repeated key is answered with a copy of the
/// stored result and no I/O (no fetch, no export).
#[derive(Debug, Default)]
pub struct AcquisitionCache {
    entries: HashMap<AcquireKey, SeriesSet>,
}

impl AcquisitionCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn load<S: PriceSource>(
        &mut self,
        source: &S,
        key: &AcquireKey,
        pb: &ProgressBar,
    ) -> SeriesSet {
        if let Some(hit) = self.entries.get(key) {
            trace!("acquisition cache hit ({} tickers)", hit.len());
            return hit.clone();
        }

        debug!(
            "acquiring {} tickers over {} (cache miss)",
            key.catalog.len(),
            key.lookback
        );
        let data = acquire(
            source,
            &key.catalog,
            key.export.as_deref(),
            key.lookback,
            pb,
        )
        .await;
        self.entries.insert(key.clone(), data.clone());
        data
    }

    pub fn contains(&self, key: &AcquireKey) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
