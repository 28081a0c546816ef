// Problem catalog cache: slug -> topic tags, refreshed on a TTL.
//
// The catalog is owned by the process and passed by reference into the
// LeetCode builder. Policy is read-if-fresh, else refetch-and-replace.
// The refetch runs without holding the lock, so two requests racing past
// an expired entry both refetch and the last write wins.
//
// A failed refetch yields an empty catalog for that request and leaves the
// cache untouched, so the next request tries again.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::leetcode::client::CatalogProblem;

/// Default catalog lifetime.
pub const DEFAULT_CATALOG_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Source of the full problem catalog.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn fetch_catalog(&self) -> Result<Vec<CatalogProblem>>;
}

/// Time source for TTL checks. Swappable so tests can move time forward.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Topic tags indexed by problem slug.
#[derive(Debug, Default)]
pub struct ProblemCatalog {
    tags_by_slug: HashMap<String, Vec<String>>,
}

impl ProblemCatalog {
    /// Index a raw catalog. Problems without a slug cannot be looked up and
    /// are dropped.
    pub fn from_problems(problems: Vec<CatalogProblem>) -> Self {
        let tags_by_slug = problems
            .into_iter()
            .filter_map(|p| {
                let slug = p.title_slug?;
                let tags = p.topic_tags.iter().map(|t| t.name().to_string()).collect();
                Some((slug, tags))
            })
            .collect();
        Self { tags_by_slug }
    }

    pub fn tags(&self, slug: &str) -> Option<&[String]> {
        self.tags_by_slug.get(slug).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.tags_by_slug.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags_by_slug.is_empty()
    }
}

struct CachedCatalog {
    catalog: Arc<ProblemCatalog>,
    fetched_at: DateTime<Utc>,
}

/// TTL cache over a `CatalogSource`.
pub struct ProblemCatalogCache {
    ttl: Duration,
    clock: Arc<dyn Clock>,
    state: RwLock<Option<CachedCatalog>>,
}

impl ProblemCatalogCache {
    pub fn new(ttl: Duration) -> Self {
        Self::with_clock(ttl, Arc::new(SystemClock))
    }

    pub fn with_clock(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            ttl,
            clock,
            state: RwLock::new(None),
        }
    }

    /// Return the cached catalog if it is younger than the TTL, otherwise
    /// fetch a new one from `source` and store it.
    pub async fn get_or_refresh(&self, source: &dyn CatalogSource) -> Arc<ProblemCatalog> {
        if let Some(catalog) = self.fresh().await {
            debug!(problems = catalog.len(), "Using cached problem catalog");
            return catalog;
        }

        info!("Fetching problem catalog");
        match source.fetch_catalog().await {
            Ok(problems) => {
                let catalog = Arc::new(ProblemCatalog::from_problems(problems));
                *self.state.write().await = Some(CachedCatalog {
                    catalog: Arc::clone(&catalog),
                    fetched_at: self.clock.now(),
                });
                info!(problems = catalog.len(), "Problem catalog refreshed");
                catalog
            }
            Err(e) => {
                warn!(error = %e, "Problem catalog fetch failed, continuing with an empty catalog");
                Arc::new(ProblemCatalog::default())
            }
        }
    }

    /// Drop the cached catalog so the next lookup refetches.
    pub async fn clear(&self) {
        *self.state.write().await = None;
        info!("Problem catalog cache cleared");
    }

    /// When the cached catalog was fetched, if there is one.
    pub async fn fetched_at(&self) -> Option<DateTime<Utc>> {
        self.state.read().await.as_ref().map(|c| c.fetched_at)
    }

    async fn fresh(&self) -> Option<Arc<ProblemCatalog>> {
        let state = self.state.read().await;
        let cached = state.as_ref()?;
        // A clock that moved backwards still counts as fresh
        let fresh = (self.clock.now() - cached.fetched_at)
            .to_std()
            .map(|age| age < self.ttl)
            .unwrap_or(true);
        fresh.then(|| Arc::clone(&cached.catalog))
    }
}
