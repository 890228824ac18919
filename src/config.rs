//! Configuration Module
//!
//! Handles loading server and cache configuration from environment variables,
//! plus the runtime-updatable sorting parameters pushed by remote config.

use std::env;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};

/// Static configuration loaded once at startup.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory backing the disk cache tier
    pub cache_dir: PathBuf,
    /// TTL in seconds applied to every cache entry
    pub default_ttl: u64,
    /// Maximum number of entries the memory tier can hold
    pub max_memory_entries: usize,
    /// Background purge task interval in seconds
    pub purge_interval: u64,
    /// HTTP server port for the companion posts service
    pub server_port: u16,
    /// Base URL of the secondary feed source API
    pub api_base_url: String,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_DIR` - Disk tier directory (default: ./feedcache)
    /// - `DEFAULT_TTL` - Entry TTL in seconds (default: 1800)
    /// - `MAX_MEMORY_ENTRIES` - Memory tier capacity (default: 1000)
    /// - `PURGE_INTERVAL` - Purge frequency in seconds (default: 300)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `API_BASE_URL` - Secondary source base URL (default: http://127.0.0.1:3000)
    pub fn from_env() -> Self {
        Self {
            cache_dir: env::var("CACHE_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./feedcache")),
            default_ttl: env::var("DEFAULT_TTL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1800),
            max_memory_entries: env::var("MAX_MEMORY_ENTRIES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1000),
            purge_interval: env::var("PURGE_INTERVAL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(300),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            api_base_url: env::var("API_BASE_URL")
                .unwrap_or_else(|_| "http://127.0.0.1:3000".to_string()),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_dir: PathBuf::from("./feedcache"),
            default_ttl: 1800,
            max_memory_entries: 1000,
            purge_interval: 300,
            server_port: 3000,
            api_base_url: "http://127.0.0.1:3000".to_string(),
        }
    }
}

// == Sorting Configuration ==
/// Feed sorting parameters delivered out-of-band by a remote-config collaborator.
///
/// The fetch path reads these fresh on every request; whoever owns the remote
/// config fetch pushes new values through [`SortingHandle::update`].
#[derive(Debug, Clone)]
pub struct SortingConfig {
    /// Sorting flag: "engagement", "ai", or anything else for chronological
    pub feed_sorting_type: String,
    /// Weight applied to like counts by the scored strategy
    pub ai_engagement_weight: f64,
    /// Weight applied to recency by the scored strategy
    pub ai_sorting_weight: f64,
}

impl Default for SortingConfig {
    fn default() -> Self {
        Self {
            feed_sorting_type: String::new(),
            ai_engagement_weight: 1.0,
            ai_sorting_weight: 1.0,
        }
    }
}

/// Shared handle to the last-known sorting configuration.
///
/// Cloning the handle shares the underlying values; readers always see the
/// most recent update.
#[derive(Debug, Clone, Default)]
pub struct SortingHandle {
    inner: Arc<RwLock<SortingConfig>>,
}

impl SortingHandle {
    /// Creates a handle seeded with the given configuration.
    pub fn new(config: SortingConfig) -> Self {
        Self {
            inner: Arc::new(RwLock::new(config)),
        }
    }

    /// Returns a snapshot of the current sorting configuration.
    pub fn current(&self) -> SortingConfig {
        self.inner
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Replaces the stored configuration with freshly fetched values.
    pub fn update(&self, config: SortingConfig) {
        *self
            .inner
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = config;
    }
}
