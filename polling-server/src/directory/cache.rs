//! Caching layer for station directory queries.
//!
//! Rapid re-searches tend to repeat the same few queries, and the dataset
//! changes rarely. Successful query results are cached per
//! (query kind, normalised text); failures are never cached.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;

use crate::domain::{PollingStation, PostalCode};

use super::StationDirectory;
use super::error::DirectoryError;

/// Which directory query produced a cache entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum QueryKind {
    PostalCode,
    Settlement,
    Address,
}

/// Cache key: query kind plus lower-cased query text.
type QueryKey = (QueryKind, String);

/// Cached query result.
type QueryEntry = Arc<Vec<PollingStation>>;

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(60),
            max_capacity: 1000,
        }
    }
}

/// Station directory with caching.
///
/// Wraps any [`StationDirectory`] and caches its successful results.
pub struct CachedDirectory<D> {
    inner: D,
    queries: MokaCache<QueryKey, QueryEntry>,
}

impl<D: StationDirectory> CachedDirectory<D> {
    /// Create a new cached directory.
    pub fn new(inner: D, config: &CacheConfig) -> Self {
        let queries = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { inner, queries }
    }

    /// Access the underlying directory for queries that bypass the cache.
    pub fn inner(&self) -> &D {
        &self.inner
    }

    /// Get cache statistics.
    pub fn entry_count(&self) -> u64 {
        self.queries.entry_count()
    }

    /// Invalidate all cached entries.
    pub fn invalidate_all(&self) {
        self.queries.invalidate_all();
    }

    async fn cached<F>(
        &self,
        key: QueryKey,
        fetch: F,
    ) -> Result<Vec<PollingStation>, DirectoryError>
    where
        F: Future<Output = Result<Vec<PollingStation>, DirectoryError>>,
    {
        if let Some(hit) = self.queries.get(&key).await {
            tracing::trace!(?key, "directory cache hit");
            return Ok(hit.as_ref().clone());
        }

        let stations = fetch.await?;
        self.queries.insert(key, Arc::new(stations.clone())).await;

        Ok(stations)
    }
}

impl<D: StationDirectory> StationDirectory for CachedDirectory<D> {
    async fn find_by_postal_code(
        &self,
        code: &PostalCode,
    ) -> Result<Vec<PollingStation>, DirectoryError> {
        let key = (QueryKind::PostalCode, code.as_str().to_string());
        self.cached(key, self.inner.find_by_postal_code(code)).await
    }

    async fn find_by_settlement_contains(
        &self,
        text: &str,
    ) -> Result<Vec<PollingStation>, DirectoryError> {
        let key = (QueryKind::Settlement, text.to_lowercase());
        self.cached(key, self.inner.find_by_settlement_contains(text))
            .await
    }

    async fn find_by_address_contains(
        &self,
        text: &str,
    ) -> Result<Vec<PollingStation>, DirectoryError> {
        let key = (QueryKind::Address, text.to_lowercase());
        self.cached(key, self.inner.find_by_address_contains(text))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Coordinates;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    /// Directory that counts calls and can be switched to failing.
    #[derive(Default)]
    struct CountingDirectory {
        calls: AtomicUsize,
        failing: AtomicBool,
    }

    impl CountingDirectory {
        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        fn respond(&self) -> Result<Vec<PollingStation>, DirectoryError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.failing.load(Ordering::SeqCst) {
                return Err(DirectoryError::Api {
                    status: 503,
                    message: "unavailable".to_string(),
                });
            }
            Ok(vec![PollingStation {
                id: Some(1),
                postal_code: "1052".to_string(),
                settlement: "Budapest".to_string(),
                address: "Petőfi utca 10.".to_string(),
                station_number: "001".to_string(),
                district: None,
                coordinates: Some(Coordinates::new(47.49, 19.05).unwrap()),
            }])
        }
    }

    impl StationDirectory for CountingDirectory {
        async fn find_by_postal_code(
            &self,
            _code: &PostalCode,
        ) -> Result<Vec<PollingStation>, DirectoryError> {
            self.respond()
        }

        async fn find_by_settlement_contains(
            &self,
            _text: &str,
        ) -> Result<Vec<PollingStation>, DirectoryError> {
            self.respond()
        }

        async fn find_by_address_contains(
            &self,
            _text: &str,
        ) -> Result<Vec<PollingStation>, DirectoryError> {
            self.respond()
        }
    }

    fn code(s: &str) -> PostalCode {
        PostalCode::parse(s).unwrap()
    }

    #[test]
    fn default_config() {
        let config = CacheConfig::default();
        assert_eq!(config.ttl, Duration::from_secs(60));
        assert_eq!(config.max_capacity, 1000);
    }

    #[tokio::test]
    async fn repeated_query_served_from_cache() {
        let cached = CachedDirectory::new(CountingDirectory::default(), &CacheConfig::default());

        let first = cached.find_by_postal_code(&code("1052")).await.unwrap();
        let second = cached.find_by_postal_code(&code("1052")).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(cached.inner().calls(), 1);
    }

    #[tokio::test]
    async fn entry_count_tracks_distinct_queries() {
        let cached = CachedDirectory::new(CountingDirectory::default(), &CacheConfig::default());

        cached.find_by_postal_code(&code("1052")).await.unwrap();
        cached.find_by_postal_code(&code("1052")).await.unwrap();
        cached.find_by_settlement_contains("budapest").await.unwrap();
        cached.queries.run_pending_tasks().await;

        assert_eq!(cached.entry_count(), 2);

        cached.invalidate_all();
        cached.queries.run_pending_tasks().await;
        assert_eq!(cached.entry_count(), 0);
    }

    #[tokio::test]
    async fn text_keys_ignore_case() {
        let cached = CachedDirectory::new(CountingDirectory::default(), &CacheConfig::default());

        cached.find_by_settlement_contains("Budapest").await.unwrap();
        cached.find_by_settlement_contains("budapest").await.unwrap();

        assert_eq!(cached.inner().calls(), 1);
    }

    #[tokio::test]
    async fn query_kinds_cached_separately() {
        let cached = CachedDirectory::new(CountingDirectory::default(), &CacheConfig::default());

        cached.find_by_settlement_contains("buda").await.unwrap();
        cached.find_by_address_contains("buda").await.unwrap();

        assert_eq!(cached.inner().calls(), 2);
    }

    #[tokio::test]
    async fn failures_not_cached() {
        let inner = CountingDirectory::default();
        inner.failing.store(true, Ordering::SeqCst);
        let cached = CachedDirectory::new(inner, &CacheConfig::default());

        assert!(cached.find_by_postal_code(&code("1052")).await.is_err());

        cached.inner().failing.store(false, Ordering::SeqCst);
        assert!(cached.find_by_postal_code(&code("1052")).await.is_ok());
        assert_eq!(cached.inner().calls(), 2);
    }

    #[tokio::test]
    async fn invalidate_forces_refetch() {
        let cached = CachedDirectory::new(CountingDirectory::default(), &CacheConfig::default());

        cached.find_by_address_contains("petőfi").await.unwrap();
        cached.invalidate_all();
        cached.find_by_address_contains("petőfi").await.unwrap();

        assert_eq!(cached.inner().calls(), 2);
    }
}
