//! Cache module for storing API responses to disk
//!
//! This module persists raw record collections to the filesystem, one JSON
//! file per resource-collection name. The file modification time is the sole
//! validity signal; corrupt or unreadable entries are reported explicitly so
//! callers can treat them as misses.

mod store;

pub use store::{CacheError, CacheStore, DEFAULT_MAX_AGE};
