use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

use crate::core::cache::Cache;
use crate::core::currency::CurrencyCode;
use crate::core::rates::{FetchError, RateProvider, RateSnapshot};

/// Memoizes rate snapshots per base currency for the cache TTL.
///
/// Failed fetches are not cached, so the next call retries the network.
#[derive(Clone)]
pub struct CachingRateProvider<T: RateProvider> {
    inner: T,
    cache: Cache<CurrencyCode, RateSnapshot>,
}

impl<T: RateProvider> CachingRateProvider<T> {
    pub fn new(inner: T, ttl: Duration) -> Self {
        Self::with_cache(inner, Cache::with_ttl(ttl))
    }

    /// Wraps `inner` around an existing cache. Clones of a cache share entries,
    /// so several providers can use one process-wide cache.
    pub fn with_cache(inner: T, cache: Cache<CurrencyCode, RateSnapshot>) -> Self {
        Self { inner, cache }
    }

    pub fn inner(&self) -> &T {
        &self.inner
    }
}

#[async_trait]
impl<T: RateProvider> RateProvider for CachingRateProvider<T> {
    async fn fetch_rates(&self, base: CurrencyCode) -> Result<RateSnapshot, FetchError> {
        if let Some(cached) = self.cache.get(&base).await {
            debug!("Cache hit for rates based on {}", base);
            return Ok(cached);
        }
        debug!("Cache miss for rates based on {}", base);
        let snapshot = self.inner.fetch_rates(base).await?;
        self.cache.put(base, snapshot.clone()).await;
        Ok(snapshot)
    }
}
