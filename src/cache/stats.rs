//! Cache Statistics Module
//!
//! Tracks per-tier hit counters, misses, and evictions.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

// == Stats Counters ==
/// Lock-free counters updated on the cache read/write paths.
#[derive(Debug, Default)]
pub struct StatsCounters {
    memory_hits: AtomicU64,
    disk_hits: AtomicU64,
    misses: AtomicU64,
    evictions: AtomicU64,
}

impl StatsCounters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a hit served by the memory tier.
    pub fn record_memory_hit(&self) {
        self.memory_hits.fetch_add(1, Ordering::Relaxed);
    }

    /// Records a hit served by the disk tier (and promoted).
    pub fn record_disk_hit(&self) {
        self.disk_hits.fetch_add(1, Ordering::Relaxed);
    }

    /// Records a lookup that found nothing usable in either tier.
    pub fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    /// Records entries evicted from the memory tier to honor its bound.
    pub fn record_evictions(&self, count: usize) {
        if count > 0 {
            self.evictions.fetch_add(count as u64, Ordering::Relaxed);
        }
    }

    /// Produces a point-in-time snapshot.
    pub fn snapshot(&self, memory_entries: usize) -> CacheStats {
        CacheStats {
            memory_hits: self.memory_hits.load(Ordering::Relaxed),
            disk_hits: self.disk_hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            evictions: self.evictions.load(Ordering::Relaxed),
            memory_entries,
        }
    }
}

// == Cache Stats ==
/// Snapshot of cache performance metrics.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CacheStats {
    /// Lookups served from the memory tier
    pub memory_hits: u64,
    /// Lookups served from the disk tier
    pub disk_hits: u64,
    /// Lookups that found nothing unexpired in either tier
    pub misses: u64,
    /// Entries evicted from the memory tier
    pub evictions: u64,
    /// Current memory tier entry count
    pub memory_entries: usize,
}

impl CacheStats {
    // == Hit Rate ==
    /// Hits across both tiers divided by total lookups, 0.0 when idle.
    pub fn hit_rate(&self) -> f64 {
        let hits = self.memory_hits + self.disk_hits;
        let total = hits + self.misses;
        if total == 0 {
            0.0
        } else {
            hits as f64 / total as f64
        }
    }
}
