//! Tiered Cache Store Module
//!
//! Combines the memory and disk tiers behind one expiring key-value API:
//! memory first, disk on miss with promotion, fire-and-forget write-through,
//! and a sweep entry point for the background purge task.

use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::cache::memory::Lookup;
use crate::cache::{CacheEntry, CacheStats, DiskTier, MemoryTier, StatsCounters};
use crate::config::Config;
use crate::error::CacheResult;

// == Tiered Cache ==
/// Two-tier expiring cache.
///
/// The cache is best-effort by contract: every failure on the write path is
/// swallowed after logging, and every failure on the read path degrades to a
/// miss. Callers never have to handle a cache error.
#[derive(Debug)]
pub struct TieredCache {
    memory: RwLock<MemoryTier>,
    disk: DiskTier,
    counters: StatsCounters,
    default_ttl: u64,
}

impl TieredCache {
    // == Constructor ==
    /// Opens a cache over `dir` with the given memory bound and entry TTL.
    ///
    /// # Arguments
    /// * `dir` - Disk tier directory, created if absent
    /// * `max_memory_entries` - Memory tier entry bound
    /// * `default_ttl` - Store-wide TTL in seconds applied to every entry
    pub async fn open(
        dir: impl Into<std::path::PathBuf>,
        max_memory_entries: usize,
        default_ttl: u64,
    ) -> CacheResult<Self> {
        Ok(Self {
            memory: RwLock::new(MemoryTier::new(max_memory_entries)),
            disk: DiskTier::open(dir).await?,
            counters: StatsCounters::new(),
            default_ttl,
        })
    }

    /// Opens a cache with parameters taken from the configuration.
    pub async fn from_config(config: &Config) -> CacheResult<Self> {
        Self::open(
            config.cache_dir.clone(),
            config.max_memory_entries,
            config.default_ttl,
        )
        .await
    }

    // == Set ==
    /// Serializes and stores a value under `key` with the store-wide TTL.
    ///
    /// The memory tier is updated before this returns; the disk copy is
    /// written by a spawned task, so the caller never waits on I/O. A codec
    /// failure turns the whole call into a logged no-op.
    pub async fn set<T: Serialize>(&self, key: &str, value: &T) {
        let payload = match serde_json::to_vec(value) {
            Ok(payload) => payload,
            Err(err) => {
                warn!(key, "cache set skipped, payload failed to serialize: {err}");
                return;
            }
        };
        self.set_raw(key, payload).await;
    }

    /// Byte-level variant of [`set`](Self::set) for pre-serialized payloads.
    pub async fn set_raw(&self, key: &str, payload: Vec<u8>) {
        let entry = CacheEntry::new(payload, self.default_ttl);

        {
            let mut memory = self.memory.write().await;
            let evicted = memory.insert(key.to_string(), entry.clone());
            self.counters.record_evictions(evicted);
        }

        let disk = self.disk.clone();
        let key = key.to_string();
        tokio::spawn(async move {
            if let Err(err) = disk.write(&key, &entry).await {
                warn!(key, "cache disk write-through failed: {err}");
            }
        });
    }

    // == Get ==
    /// Retrieves and deserializes the value under `key`.
    ///
    /// Returns `None` on a miss, an expired entry, or a payload that no
    /// longer decodes; a decode failure is logged and treated as a miss.
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let payload = self.get_raw(key).await?;
        match serde_json::from_slice(&payload) {
            Ok(value) => Some(value),
            Err(err) => {
                warn!(key, "cached payload failed to deserialize, treating as miss: {err}");
                None
            }
        }
    }

    /// Byte-level variant of [`get`](Self::get).
    ///
    /// Memory tier first; on miss the disk tier is consulted and a hit is
    /// promoted into memory. Expired entries found along the way are removed
    /// from the tier where they were found.
    pub async fn get_raw(&self, key: &str) -> Option<Vec<u8>> {
        {
            let mut memory = self.memory.write().await;
            match memory.lookup(key) {
                Lookup::Hit(entry) => {
                    self.counters.record_memory_hit();
                    return Some(entry.payload);
                }
                Lookup::Expired | Lookup::Missing => {}
            }
        }

        match self.disk.read(key).await {
            Ok(Some(entry)) if !entry.is_expired() => {
                self.counters.record_disk_hit();
                let mut memory = self.memory.write().await;
                let evicted = memory.insert(key.to_string(), entry.clone());
                self.counters.record_evictions(evicted);
                Some(entry.payload)
            }
            Ok(Some(_)) => {
                // Lazy cleanup of the expired disk copy
                if let Err(err) = self.disk.remove(key).await {
                    debug!(key, "failed to drop expired disk entry: {err}");
                }
                self.counters.record_miss();
                None
            }
            Ok(None) => {
                self.counters.record_miss();
                None
            }
            Err(err) => {
                warn!(key, "disk tier read failed, treating as miss: {err}");
                self.counters.record_miss();
                None
            }
        }
    }

    // == Remove ==
    /// Deletes the entry from both tiers; idempotent.
    pub async fn remove(&self, key: &str) {
        {
            let mut memory = self.memory.write().await;
            memory.remove(key);
        }
        if let Err(err) = self.disk.remove(key).await {
            warn!(key, "disk tier remove failed: {err}");
        }
    }

    // == Purge Expired ==
    /// Sweeps both tiers, deleting every expired entry.
    ///
    /// Returns the number of entries reclaimed. This is the only path that
    /// frees disk space for entries nobody has read since they expired.
    pub async fn purge_expired(&self) -> usize {
        let from_memory = {
            let mut memory = self.memory.write().await;
            memory.purge_expired()
        };

        let from_disk = match self.disk.purge_expired().await {
            Ok(count) => count,
            Err(err) => {
                warn!("disk tier sweep failed: {err}");
                0
            }
        };

        from_memory + from_disk
    }

    // == Stats ==
    /// Returns a snapshot of cache performance counters.
    pub async fn stats(&self) -> CacheStats {
        let memory_entries = self.memory.read().await.len();
        self.counters.snapshot(memory_entries)
    }
}
