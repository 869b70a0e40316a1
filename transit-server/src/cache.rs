//! Caching layer for route queries.
//!
//! The station graph never changes while the process runs, so a cached
//! answer is never stale. The TTL and capacity only bound memory. Errors
//! are cached too: an unknown station stays unknown.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;
use tracing::trace;

use crate::planner::{Itinerary, RouteError, RouteService};

/// Cache key: the raw (origin, destination) query text.
type RouteKey = (String, String);

/// Cached route outcome.
type RouteEntry = Result<Arc<Itinerary>, RouteError>;

/// Configuration for the route cache.
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
            ttl: Duration::from_secs(60 * 60),
            max_capacity: 10_000,
        }
    }
}

/// Route service with memoized answers.
#[derive(Clone)]
pub struct CachedRouteService {
    service: RouteService,
    cache: MokaCache<RouteKey, RouteEntry>,
}

impl CachedRouteService {
    /// Create a new cached service.
    pub fn new(service: RouteService, config: &CacheConfig) -> Self {
        let cache = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { service, cache }
    }

    /// Find a route, using the cache if available.
    pub async fn route(&self, origin: &str, destination: &str) -> RouteEntry {
        let key = (origin.to_string(), destination.to_string());
        self.cache
            .get_with(key, async {
                trace!(origin, destination, "Route cache miss");
                self.service.route(origin, destination).map(Arc::new)
            })
            .await
    }

    /// Access the underlying service for operations that bypass the cache.
    pub fn service(&self) -> &RouteService {
        &self.service
    }
}
