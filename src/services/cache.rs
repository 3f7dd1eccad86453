use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

use crate::models::ScoredRestaurant;

/// How discovery results are memoized
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CacheMode {
    /// One slot, last key wins
    #[default]
    SingleSlot,
    /// Key -> entry map with TTL and bounded capacity
    MultiSlot,
}

/// Cached discovery result
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub key: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub data: Arc<Vec<ScoredRestaurant>>,
    stored_at: Instant,
}

impl CacheEntry {
    fn new(key: String, data: Arc<Vec<ScoredRestaurant>>) -> Self {
        Self {
            key,
            timestamp: chrono::Utc::now(),
            data,
            stored_at: Instant::now(),
        }
    }

    fn is_fresh(&self, ttl: Duration) -> bool {
        self.stored_at.elapsed() < ttl
    }
}

enum CacheStore {
    SingleSlot(Mutex<Option<CacheEntry>>),
    MultiSlot(moka::future::Cache<String, CacheEntry>),
}

/// Time-boxed memo of discovery results
///
/// Entries are replaced wholesale and never partially updated. Locks are
/// only held for the read or the write, never across the upstream call.
pub struct DiscoveryCache {
    store: CacheStore,
    ttl: Duration,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl DiscoveryCache {
    /// Create a cache in the given mode; `max_entries` only bounds multi-slot mode
    pub fn new(mode: CacheMode, ttl: Duration, max_entries: u64) -> Self {
        let store = match mode {
            CacheMode::SingleSlot => CacheStore::SingleSlot(Mutex::new(None)),
            CacheMode::MultiSlot => CacheStore::MultiSlot(
                moka::future::CacheBuilder::new(max_entries)
                    .time_to_live(ttl)
                    .build(),
            ),
        };

        Self {
            store,
            ttl,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    pub fn single_slot(ttl: Duration) -> Self {
        Self::new(CacheMode::SingleSlot, ttl, 1)
    }

    pub fn mode(&self) -> CacheMode {
        match self.store {
            CacheStore::SingleSlot(_) => CacheMode::SingleSlot,
            CacheStore::MultiSlot(_) => CacheMode::MultiSlot,
        }
    }

    /// Fresh data for exactly this key, if any
    pub async fn get(&self, key: &str) -> Option<Arc<Vec<ScoredRestaurant>>> {
        let entry = match &self.store {
            CacheStore::SingleSlot(slot) => slot
                .lock()
                .await
                .as_ref()
                .filter(|entry| entry.key == key)
                .cloned(),
            CacheStore::MultiSlot(cache) => cache.get(key).await,
        };

        match entry.filter(|entry| entry.is_fresh(self.ttl)) {
            Some(entry) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                tracing::trace!("Discovery cache hit: {}", key);
                Some(entry.data)
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                tracing::trace!("Discovery cache miss: {}", key);
                None
            }
        }
    }

    /// Store a result; in single-slot mode this evicts whatever was there
    pub async fn insert(&self, key: String, data: Arc<Vec<ScoredRestaurant>>) {
        let entry = CacheEntry::new(key.clone(), data);
        match &self.store {
            CacheStore::SingleSlot(slot) => {
                *slot.lock().await = Some(entry);
            }
            CacheStore::MultiSlot(cache) => {
                cache.insert(key.clone(), entry).await;
            }
        }
        tracing::trace!("Discovery cache set: {}", key);
    }

    /// Current single-slot entry (always `None` in multi-slot mode)
    pub async fn current_entry(&self) -> Option<CacheEntry> {
        match &self.store {
            CacheStore::SingleSlot(slot) => slot.lock().await.clone(),
            CacheStore::MultiSlot(_) => None,
        }
    }

    pub async fn clear(&self) {
        match &self.store {
            CacheStore::SingleSlot(slot) => {
                slot.lock().await.take();
            }
            CacheStore::MultiSlot(cache) => {
                cache.invalidate_all();
                cache.run_pending_tasks().await;
            }
        }
        tracing::debug!("Discovery cache cleared");
    }

    pub async fn stats(&self) -> CacheStats {
        let entries = match &self.store {
            CacheStore::SingleSlot(slot) => u64::from(slot.lock().await.is_some()),
            CacheStore::MultiSlot(cache) => cache.entry_count(),
        };
        let hit_count = self.hits.load(Ordering::Relaxed);
        let miss_count = self.misses.load(Ordering::Relaxed);
        let lookups = hit_count + miss_count;

        CacheStats {
            mode: self.mode(),
            entries,
            hit_count,
            miss_count,
            hit_rate: if lookups == 0 {
                0.0
            } else {
                hit_count as f64 / lookups as f64
            },
        }
    }
}

/// Cache statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheStats {
    pub mode: CacheMode,
    pub entries: u64,
    pub hit_count: u64,
    pub miss_count: u64,
    pub hit_rate: f64,
}

/// Cache key builder
pub struct CacheKey;

impl CacheKey {
    /// Build the key for a discovery request
    ///
    /// Coordinates are rounded to 2 decimals so GPS jitter still hits the
    /// cache, and cuisines are sorted so selection order does not matter.
    pub fn discovery(
        latitude: f64,
        longitude: f64,
        cuisines: &[String],
        profile_id: Option<&str>,
    ) -> String {
        let mut sorted: Vec<&str> = cuisines.iter().map(String::as_str).collect();
        sorted.sort_unstable();

        format!(
            "{:.2}|{:.2}|{}|{}",
            latitude,
            longitude,
            sorted.join(","),
            profile_id.unwrap_or("")
        )
    }
}
