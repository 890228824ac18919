//! Disk Tier Module
//!
//! Durable cache tier: one JSON file per entry under a dedicated directory,
//! keyed identically to the memory tier. Survives process restarts and is
//! reclaimed by the periodic purge sweep.

use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::debug;

use crate::cache::CacheEntry;
use crate::error::CacheResult;

// == Disk Tier ==
/// File-backed cache tier.
///
/// Cheap to clone; clones share the same directory.
#[derive(Debug, Clone)]
pub struct DiskTier {
    dir: PathBuf,
}

impl DiskTier {
    // == Constructor ==
    /// Opens (creating if needed) the tier directory.
    pub async fn open(dir: impl Into<PathBuf>) -> CacheResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).await?;
        Ok(Self { dir })
    }

    /// Path of the entry file for `key`.
    fn entry_path(&self, key: &str) -> PathBuf {
        self.dir.join(sanitize_key(key))
    }

    // == Read ==
    /// Loads the entry for `key`, or `None` if no file exists.
    ///
    /// A file that fails to decode is reported as an error; the store above
    /// treats that as a miss.
    pub async fn read(&self, key: &str) -> CacheResult<Option<CacheEntry>> {
        let path = self.entry_path(key);
        let bytes = match fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };

        let entry: CacheEntry = serde_json::from_slice(&bytes)?;
        Ok(Some(entry))
    }

    // == Write ==
    /// Persists an entry, replacing any previous file for the same key.
    pub async fn write(&self, key: &str, entry: &CacheEntry) -> CacheResult<()> {
        let encoded = serde_json::to_vec(entry)?;
        fs::write(self.entry_path(key), encoded).await?;
        Ok(())
    }

    // == Remove ==
    /// Deletes the entry file; idempotent.
    pub async fn remove(&self, key: &str) -> CacheResult<()> {
        match fs::remove_file(self.entry_path(key)).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }

    // == Purge Expired ==
    /// Scans the tier directory and deletes every expired entry file.
    ///
    /// Files that no longer decode are deleted as well; they can never be
    /// read back, and the sweep is the only path that reclaims them.
    pub async fn purge_expired(&self) -> CacheResult<usize> {
        let mut removed = 0;
        let mut dir_entries = fs::read_dir(&self.dir).await?;

        while let Some(dir_entry) = dir_entries.next_entry().await? {
            let path = dir_entry.path();
            if !dir_entry.file_type().await?.is_file() {
                continue;
            }

            if should_purge(&path).await {
                if fs::remove_file(&path).await.is_ok() {
                    removed += 1;
                    debug!(path = %path.display(), "purged expired cache file");
                }
            }
        }

        Ok(removed)
    }
}

/// Whether the file at `path` holds an expired or undecodable entry.
async fn should_purge(path: &Path) -> bool {
    let Ok(bytes) = fs::read(path).await else {
        return false;
    };
    match serde_json::from_slice::<CacheEntry>(&bytes) {
        Ok(entry) => entry.is_expired(),
        Err(_) => true,
    }
}

/// Maps a cache key to a safe file name.
///
/// Alphanumerics and `-`, `_`, `.` pass through; every other byte becomes
/// `%XX`, keeping the mapping injective so distinct keys never share a file.
fn sanitize_key(key: &str) -> String {
    let mut name = String::with_capacity(key.len());
    for byte in key.bytes() {
        match byte {
            b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'-' | b'_' | b'.' => {
                name.push(byte as char);
            }
            _ => {
                name.push_str(&format!("%{:02X}", byte));
            }
        }
    }
    name
}
