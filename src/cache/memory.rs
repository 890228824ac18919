//! Memory Tier Module
//!
//! Bounded, volatile, process-lifetime storage. Always consulted first;
//! evicts least recently used entries when full.

use std::collections::HashMap;

use crate::cache::{CacheEntry, LruTracker};

/// Outcome of a memory tier lookup.
#[derive(Debug)]
pub enum Lookup {
    /// Present and unexpired
    Hit(CacheEntry),
    /// Present but past its expiration; removed during the lookup
    Expired,
    /// Not present
    Missing,
}

// == Memory Tier ==
/// In-memory cache tier with an entry-count bound and LRU eviction.
///
/// Not internally synchronized; the owning store guards it with a lock.
#[derive(Debug)]
pub struct MemoryTier {
    entries: HashMap<String, CacheEntry>,
    lru: LruTracker,
    max_entries: usize,
}

impl MemoryTier {
    /// Creates an empty tier holding at most `max_entries` entries.
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: HashMap::new(),
            lru: LruTracker::new(),
            max_entries: max_entries.max(1),
        }
    }

    // == Insert ==
    /// Stores an entry, replacing any existing one for the same key.
    ///
    /// Returns the number of entries evicted to stay within the bound.
    pub fn insert(&mut self, key: String, entry: CacheEntry) -> usize {
        let is_overwrite = self.entries.contains_key(&key);

        let mut evicted = 0;
        if !is_overwrite {
            while self.entries.len() >= self.max_entries {
                match self.lru.evict_oldest() {
                    Some(oldest) => {
                        self.entries.remove(&oldest);
                        evicted += 1;
                    }
                    None => break,
                }
            }
        }

        self.entries.insert(key.clone(), entry);
        self.lru.touch(&key);
        evicted
    }

    // == Lookup ==
    /// Retrieves an entry, lazily removing it when found expired.
    pub fn lookup(&mut self, key: &str) -> Lookup {
        match self.entries.get(key) {
            Some(entry) if entry.is_expired() => {
                self.entries.remove(key);
                self.lru.remove(key);
                Lookup::Expired
            }
            Some(entry) => {
                let entry = entry.clone();
                self.lru.touch(key);
                Lookup::Hit(entry)
            }
            None => Lookup::Missing,
        }
    }

    // == Remove ==
    /// Removes an entry; idempotent.
    pub fn remove(&mut self, key: &str) {
        self.entries.remove(key);
        self.lru.remove(key);
    }

    // == Purge Expired ==
    /// Removes every expired entry, returning how many were dropped.
    pub fn purge_expired(&mut self) -> usize {
        let expired_keys: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired())
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired_keys {
            self.entries.remove(key);
            self.lru.remove(key);
        }

        expired_keys.len()
    }

    /// Returns the current number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
