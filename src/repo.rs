//! Cache-backed repository over the SpaceX API
//!
//! For each resource collection the repository checks the disk cache first,
//! serves from it when valid, and otherwise fetches from the API, persists the
//! raw records, and returns the materialized ones. The cache always stores the
//! raw (pre-projection) form so that fields unknown to the current record
//! models survive on disk across upgrades.

use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, warn};

use crate::cache::CacheStore;
use crate::data::{
    FetchError, Launch, Launchpad, MalformedRecord, RawRecord, Rocket, SpaceXClient,
};

/// Errors surfaced by repository reads
#[derive(Debug, Error)]
pub enum RepoError {
    /// The upstream fetch failed and no valid cache entry could serve instead
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// A raw record could not be projected into its typed form
    #[error(transparent)]
    Malformed(#[from] MalformedRecord),
}

/// The "list all" operations the repository needs from the upstream API
///
/// `SpaceXClient` is the production implementation; tests substitute a mock
/// that counts invocations.
#[async_trait]
pub trait SpaceXApi {
    async fn list_launches(&self) -> Result<Vec<RawRecord>, FetchError>;
    async fn list_rockets(&self) -> Result<Vec<RawRecord>, FetchError>;
    async fn list_launchpads(&self) -> Result<Vec<RawRecord>, FetchError>;
}

#[async_trait]
impl SpaceXApi for SpaceXClient {
    async fn list_launches(&self) -> Result<Vec<RawRecord>, FetchError> {
        self.launches().await
    }

    async fn list_rockets(&self) -> Result<Vec<RawRecord>, FetchError> {
        self.rockets().await
    }

    async fn list_launchpads(&self) -> Result<Vec<RawRecord>, FetchError> {
        self.launchpads().await
    }
}

/// Cache-backed access to launches, rockets, and launchpads
///
/// Both collaborators are injected, there are no process-wide singletons.
pub struct Repository<A: SpaceXApi> {
    api: A,
    cache: CacheStore,
}

impl Repository<SpaceXClient> {
    /// Repository against the production API with the default cache store
    pub fn with_defaults() -> Self {
        Self::new(SpaceXClient::new(), CacheStore::new())
    }
}

impl<A: SpaceXApi> Repository<A> {
    /// Creates a repository from an API client and a cache store
    pub fn new(api: A, cache: CacheStore) -> Self {
        Self { api, cache }
    }

    /// All launches, from cache when valid unless `force_refresh` is set
    pub async fn launches(&self, force_refresh: bool) -> Result<Vec<Launch>, RepoError> {
        if let Some(cached) = self.cached("launches", force_refresh) {
            return materialize(&cached, Launch::from_raw);
        }
        let raw = self.api.list_launches().await?;
        let records = materialize(&raw, Launch::from_raw)?;
        self.store("launches", &raw);
        Ok(records)
    }

    /// All rockets, from cache when valid unless `force_refresh` is set
    pub async fn rockets(&self, force_refresh: bool) -> Result<Vec<Rocket>, RepoError> {
        if let Some(cached) = self.cached("rockets", force_refresh) {
            return materialize(&cached, Rocket::from_raw);
        }
        let raw = self.api.list_rockets().await?;
        let records = materialize(&raw, Rocket::from_raw)?;
        self.store("rockets", &raw);
        Ok(records)
    }

    /// All launchpads, from cache when valid unless `force_refresh` is set
    pub async fn launchpads(&self, force_refresh: bool) -> Result<Vec<Launchpad>, RepoError> {
        if let Some(cached) = self.cached("launchpads", force_refresh) {
            return materialize(&cached, Launchpad::from_raw);
        }
        let raw = self.api.list_launchpads().await?;
        let records = materialize(&raw, Launchpad::from_raw)?;
        self.store("launchpads", &raw);
        Ok(records)
    }

    /// Returns the cached raw collection when it can serve this read
    ///
    /// Unreadable or corrupt entries and empty collections fall through to a
    /// fetch; cache failures are logged, never escalated.
    fn cached(&self, name: &str, force_refresh: bool) -> Option<Vec<RawRecord>> {
        if force_refresh || !self.cache.is_valid(name) {
            return None;
        }
        match self.cache.load(name) {
            Ok(Some(records)) if !records.is_empty() => {
                debug!(resource = name, records = records.len(), "serving from cache");
                Some(records)
            }
            Ok(_) => None,
            Err(err) => {
                warn!(resource = name, error = %err, "discarding unreadable cache entry");
                None
            }
        }
    }

    /// Persists freshly fetched raw records, logging (not raising) failures
    fn store(&self, name: &str, records: &[RawRecord]) {
        if let Err(err) = self.cache.save(name, records) {
            warn!(resource = name, error = %err, "failed to persist cache entry");
        }
    }
}

/// Projects every raw record, surfacing the first malformed one
fn materialize<T>(
    raw: &[RawRecord],
    from_raw: impl Fn(&RawRecord) -> Result<T, MalformedRecord>,
) -> Result<Vec<T>, RepoError> {
    raw.iter()
        .map(|record| from_raw(record).map_err(RepoError::from))
        .collect()
}
