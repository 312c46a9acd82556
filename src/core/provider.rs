use crate::config::PortfolioConfig;
use crate::domain::model::{FetchOutcome, MetricsStatus, ProfileMetrics, ProfileSection};
use crate::domain::ports::ScholarSource;
use crate::utils::error::{LookupError, LookupResult};
use moka::future::Cache;
use moka::Expiry;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Sections requested from the index when enriching an author.
pub const LOOKUP_SECTIONS: [ProfileSection; 3] = [
    ProfileSection::Basics,
    ProfileSection::Indices,
    ProfileSection::Counts,
];

/// Shown for a publication whose abstract is missing or could not be fetched.
pub const NO_ABSTRACT: &str = "No abstract available.";

const ABSTRACT_CACHE_CAPACITY: u64 = 1024;

#[derive(Debug, Clone)]
pub struct ProviderSettings {
    pub lookup_timeout: Duration,
    pub cache_ttl: Duration,
    pub fallback_ttl: Duration,
    pub cache_capacity: u64,
    pub fallback: ProfileMetrics,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self::from_config(&PortfolioConfig::default())
    }
}

impl ProviderSettings {
    pub fn from_config(config: &PortfolioConfig) -> Self {
        Self {
            lookup_timeout: config.lookup_timeout(),
            cache_ttl: config.cache_ttl(),
            fallback_ttl: config.fallback_ttl(),
            cache_capacity: config.cache_capacity(),
            fallback: config.fallback_metrics(),
        }
    }
}

struct OutcomeExpiry {
    live_ttl: Duration,
    fallback_ttl: Duration,
}

impl Expiry<String, FetchOutcome> for OutcomeExpiry {
    fn expire_after_create(
        &self,
        _key: &String,
        value: &FetchOutcome,
        _created_at: Instant,
    ) -> Option<Duration> {
        Some(match value.status {
            MetricsStatus::Live => self.live_ttl,
            MetricsStatus::Fallback => self.fallback_ttl,
        })
    }
}

/// Citation metrics per researcher identifier, never failing.
///
/// A lookup is a search followed by a fill of [`LOOKUP_SECTIONS`], bounded by
/// the lookup timeout. Any [`LookupError`] is logged and replaced by the
/// fallback record. Outcomes are memoized per identifier; concurrent callers
/// for an identifier that is not cached share a single lookup.
///
/// Publication abstracts go through a second cache keyed by publication id.
/// Only successful abstract lookups are kept there.
pub struct ProfileDataProvider<S: ScholarSource> {
    source: S,
    cache: Cache<String, FetchOutcome>,
    abstracts: Cache<String, Arc<str>>,
    fallback: Arc<ProfileMetrics>,
    lookup_timeout: Duration,
}

impl<S: ScholarSource> ProfileDataProvider<S> {
    pub fn new(source: S, settings: ProviderSettings) -> Self {
        let cache = Cache::builder()
            .max_capacity(settings.cache_capacity)
            .expire_after(OutcomeExpiry {
                live_ttl: settings.cache_ttl,
                fallback_ttl: settings.fallback_ttl,
            })
            .build();
        let abstracts = Cache::builder()
            .max_capacity(ABSTRACT_CACHE_CAPACITY)
            .time_to_live(settings.cache_ttl)
            .build();

        Self {
            source,
            cache,
            abstracts,
            fallback: Arc::new(settings.fallback),
            lookup_timeout: settings.lookup_timeout,
        }
    }

    pub async fn fetch_metrics(&self, identifier: &str) -> FetchOutcome {
        self.cache
            .get_with(identifier.to_string(), self.resolve(identifier))
            .await
    }

    pub async fn metrics(&self, identifier: &str) -> Arc<ProfileMetrics> {
        self.fetch_metrics(identifier).await.metrics
    }

    /// Abstract text for one publication, or [`NO_ABSTRACT`]. Never fails.
    pub async fn publication_abstract(&self, author_pub_id: &str) -> Arc<str> {
        let lookup = self.lookup_abstract(author_pub_id);
        match self.abstracts.try_get_with(author_pub_id.to_string(), lookup).await {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!("⚠️ Abstract lookup for {} failed: {}", author_pub_id, e);
                Arc::from(NO_ABSTRACT)
            }
        }
    }

    pub fn fallback_metrics(&self) -> &ProfileMetrics {
        &self.fallback
    }

    pub async fn invalidate(&self, identifier: &str) {
        self.cache.invalidate(identifier).await;
    }

    pub fn invalidate_all(&self) {
        self.cache.invalidate_all();
        self.abstracts.invalidate_all();
    }

    /// Number of memoized identifiers once pending evictions have run.
    pub async fn cached_entries(&self) -> u64 {
        self.cache.run_pending_tasks().await;
        self.cache.entry_count()
    }

    async fn resolve(&self, identifier: &str) -> FetchOutcome {
        match self.lookup(identifier).await {
            Ok(metrics) => {
                tracing::info!(
                    "📚 Live metrics for {}: {} citations, h-index {}, i10-index {}, {} publications",
                    identifier,
                    metrics.total_citations,
                    metrics.h_index,
                    metrics.i10_index,
                    metrics.publication_list.len()
                );
                FetchOutcome::live(metrics)
            }
            Err(e) => {
                tracing::warn!(
                    "⚠️ Scholar lookup for {} failed, serving fallback metrics: {}",
                    identifier,
                    e
                );
                FetchOutcome::fallback(Arc::clone(&self.fallback))
            }
        }
    }

    async fn lookup(&self, identifier: &str) -> LookupResult<ProfileMetrics> {
        let attempt = async {
            let author = self.source.search_author_id(identifier).await?;
            tracing::debug!("Resolved author {:?}, filling sections", author.name);
            self.source.fill(&author, &LOOKUP_SECTIONS).await
        };

        match tokio::time::timeout(self.lookup_timeout, attempt).await {
            Ok(result) => result,
            Err(_) => Err(LookupError::Timeout(self.lookup_timeout)),
        }
    }

    async fn lookup_abstract(&self, author_pub_id: &str) -> LookupResult<Arc<str>> {
        let attempt = self.source.fill_publication(author_pub_id);
        let text = match tokio::time::timeout(self.lookup_timeout, attempt).await {
            Ok(result) => result?,
            Err(_) => return Err(LookupError::Timeout(self.lookup_timeout)),
        };
        Ok(Arc::from(text.as_deref().unwrap_or(NO_ABSTRACT)))
    }
}
