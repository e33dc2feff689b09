//! Time-to-live cache over the source aggregator.
//!
//! A hit returns the current snapshot without suspending. A miss (empty,
//! stale, or forced) runs one aggregator refresh and replaces the snapshot
//! wholesale; readers always see a complete, previously published record
//! set. Concurrent misses may each refresh; the aggregator is bounded, so
//! nothing blocks forever.

use crate::record::PermitRecord;
use crate::sources::{RecordSet, SourceAggregator};
use std::sync::RwLock;
use std::time::{Duration, Instant};

struct CacheEntry {
    set: RecordSet,
    loaded_at: Instant,
}

pub struct PermitCache {
    aggregator: SourceAggregator,
    ttl: Duration,
    entry: RwLock<Option<CacheEntry>>,
}

impl PermitCache {
    pub fn new(aggregator: SourceAggregator, ttl: Duration) -> Self {
        Self {
            aggregator,
            ttl,
            entry: RwLock::new(None),
        }
    }

    /// Current record set, refreshing when stale or when `force_refresh`.
    pub async fn records(&self, force_refresh: bool) -> RecordSet {
        if !force_refresh {
            // The lock is only held to clone the snapshot handle, never
            // across an await.
            let guard = self.entry.read().expect("permit cache lock poisoned");
            if let Some(entry) = guard.as_ref() {
                if !entry.set.records.is_empty() && entry.loaded_at.elapsed() < self.ttl {
                    tracing::debug!(count = entry.set.records.len(), "permit cache hit");
                    return entry.set.clone();
                }
            }
        }

        let set = self.aggregator.load().await;
        let entry = CacheEntry {
            set: set.clone(),
            loaded_at: Instant::now(),
        };
        *self.entry.write().expect("permit cache lock poisoned") = Some(entry);
        tracing::info!(
            count = set.records.len(),
            provenance = set.provenance.as_str(),
            "permit cache refreshed"
        );
        set
    }

    pub async fn find_by_id(&self, id: u64) -> Option<PermitRecord> {
        let set = self.records(false).await;
        crate::store::find_by_id(&set.records, id).cloned()
    }

    pub async fn find_by_number(&self, number: &str) -> Option<PermitRecord> {
        let set = self.records(false).await;
        crate::store::find_by_number(&set.records, number).cloned()
    }

    pub async fn count(&self) -> usize {
        self.records(false).await.records.len()
    }
}
