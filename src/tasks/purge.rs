//! Purge Sweep Task
//!
//! Background task that periodically sweeps expired entries from both cache
//! tiers. The sweep is the only mechanism that reclaims disk space for
//! entries nobody has read since they expired.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::TieredCache;

/// Spawns the periodic purge sweep for a cache.
///
/// The task is owned by whoever owns the cache's lifecycle: keep the handle
/// and abort it on shutdown. The interval is fixed and independent of
/// read/write traffic, and the sweep never holds a caller-visible lock for
/// the duration of a disk scan.
///
/// # Arguments
/// * `cache` - Shared cache to sweep
/// * `purge_interval_secs` - Seconds between sweeps
///
/// # Returns
/// A JoinHandle used to abort the task during graceful shutdown.
pub fn spawn_purge_task(cache: Arc<TieredCache>, purge_interval_secs: u64) -> JoinHandle<()> {
    let interval = Duration::from_secs(purge_interval_secs);

    tokio::spawn(async move {
        info!(
            "Starting cache purge task with interval of {} seconds",
            purge_interval_secs
        );

        loop {
            tokio::time::sleep(interval).await;

            let removed = cache.purge_expired().await;

            if removed > 0 {
                info!("Cache purge: removed {} expired entries", removed);
            } else {
                debug!("Cache purge: no expired entries found");
            }
        }
    })
}
