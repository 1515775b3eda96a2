//! Disk cache store for raw API record collections
//!
//! Provides a `CacheStore` that maps a resource-collection name to a stable
//! on-disk location and persists the raw (pre-projection) records as a JSON
//! array. The cache is a pure optimization layer: its failures are surfaced
//! as values, never as panics, and callers recover from them locally.

use std::fs;
use std::io;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::data::RawRecord;

/// Default cache root, relative to the working directory
const DEFAULT_CACHE_DIR: &str = ".cache";

/// Default maximum age before an entry is considered stale (24 hours)
pub const DEFAULT_MAX_AGE: Duration = Duration::from_secs(24 * 60 * 60);

/// Errors raised by cache reads and writes
///
/// Callers are expected to treat these as a cache miss; the repository logs
/// them and falls through to a fetch.
#[derive(Debug, Error)]
pub enum CacheError {
    /// Filesystem read or write failed
    #[error("cache I/O failed: {0}")]
    Io(#[from] io::Error),

    /// The entry exists but its content is not a JSON array of objects
    #[error("cache entry is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Manages reading and writing cached record collections on disk
///
/// Each resource-collection name maps to `<cache_dir>/<sanitized name>.json`
/// holding a JSON array of raw field mappings. An entry is valid while its
/// last-write time is within `max_age` of now.
#[derive(Debug, Clone)]
pub struct CacheStore {
    /// Directory where cache files are stored
    cache_dir: PathBuf,
    /// Maximum entry age before it is considered stale
    max_age: Duration,
}

impl Default for CacheStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CacheStore {
    /// Creates a store rooted at the default `.cache` directory
    pub fn new() -> Self {
        Self::with_dir(PathBuf::from(DEFAULT_CACHE_DIR))
    }

    /// Creates a store rooted at a custom directory
    ///
    /// Useful for testing or when a specific cache location is needed.
    pub fn with_dir(cache_dir: PathBuf) -> Self {
        Self {
            cache_dir,
            max_age: DEFAULT_MAX_AGE,
        }
    }

    /// Overrides the maximum entry age
    pub fn max_age(mut self, max_age: Duration) -> Self {
        self.max_age = max_age;
        self
    }

    /// Returns the path of the cache file for the given resource name
    ///
    /// Path-separator characters in the name are sanitized so a name like
    /// `launches/abc` cannot escape the cache directory or create nested
    /// directories.
    fn entry_path(&self, name: &str) -> PathBuf {
        self.cache_dir.join(format!("{}.json", sanitize(name)))
    }

    /// True iff an entry exists and its last-write time is within `max_age`
    pub fn is_valid(&self, name: &str) -> bool {
        let Ok(metadata) = fs::metadata(self.entry_path(name)) else {
            return false;
        };
        let Ok(modified) = metadata.modified() else {
            return false;
        };
        match modified.elapsed() {
            Ok(age) => age <= self.max_age,
            // A last-write time in the future counts as fresh.
            Err(_) => true,
        }
    }

    /// Loads the persisted collection for the given resource name
    ///
    /// Returns `Ok(None)` when no entry exists. An unreadable or corrupt
    /// entry is an error so the caller can log it and treat it as a miss.
    pub fn load(&self, name: &str) -> Result<Option<Vec<RawRecord>>, CacheError> {
        let path = self.entry_path(name);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        let records = serde_json::from_str(&content)?;
        Ok(Some(records))
    }

    /// Durably persists the given collection, overwriting any prior entry
    pub fn save(&self, name: &str, records: &[RawRecord]) -> Result<(), CacheError> {
        fs::create_dir_all(&self.cache_dir)?;
        let json = serde_json::to_string_pretty(records)?;
        fs::write(self.entry_path(name), json)?;
        Ok(())
    }
}

/// Replaces path-separator characters with underscores
fn sanitize(name: &str) -> String {
    name.replace(['/', '\\'], "_")
}
