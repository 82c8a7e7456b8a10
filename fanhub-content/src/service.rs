//! Cached content accessors.

use std::future::Future;
use std::sync::Arc;

use tracing::{debug, info, instrument};

use fanhub_cache::{CacheConfig, CacheStats, TimedCache};
use fanhub_core::constants::MAX_PANEL_COUNT;
use fanhub_core::error::{FanhubError, Result};
use fanhub_core::traits::ContentProvider;
use fanhub_core::types::{
    Esport, Match, NewsItem, Platform, ResourceKind, Team, TeamStat, Trend, Video,
};

use crate::key::ContentKey;

/// A cached provider answer.
#[derive(Clone, Debug, PartialEq)]
pub enum Content {
    /// News items
    News(Vec<NewsItem>),
    /// A roster
    Team(Team),
    /// Upcoming matches
    Schedule(Vec<Match>),
    /// Season statistics
    Stats(Vec<TeamStat>),
    /// Trending posts
    Trends(Vec<Trend>),
    /// Videos
    Videos(Vec<Video>),
}

impl Content {
    /// Which resource this content came from.
    pub fn kind(&self) -> ResourceKind {
        match self {
            Content::News(_) => ResourceKind::News,
            Content::Team(_) => ResourceKind::Team,
            Content::Schedule(_) => ResourceKind::Schedule,
            Content::Stats(_) => ResourceKind::Stats,
            Content::Trends(_) => ResourceKind::Trends,
            Content::Videos(_) => ResourceKind::Videos,
        }
    }
}

/// Content accessors backed by a [`TimedCache`].
///
/// Each accessor builds a [`ContentKey`] from all of its parameters and
/// goes to the provider only when the cache has nothing fresh for it.
/// Provider errors are returned as-is and never cached.
pub struct ContentService {
    provider: Arc<dyn ContentProvider>,
    cache: Arc<TimedCache<ContentKey, Content>>,
}

impl ContentService {
    /// Creates a service with the default 30 minute cache.
    pub fn new(provider: Arc<dyn ContentProvider>) -> Self {
        Self::with_cache(provider, TimedCache::new())
    }

    /// Creates a service with a custom cache configuration.
    pub fn with_cache_config(provider: Arc<dyn ContentProvider>, config: CacheConfig) -> Result<Self> {
        Ok(Self::with_cache(provider, TimedCache::with_config(config)?))
    }

    /// Creates a service around an existing cache.
    pub fn with_cache(provider: Arc<dyn ContentProvider>, cache: TimedCache<ContentKey, Content>) -> Self {
        Self {
            provider,
            cache: Arc::new(cache),
        }
    }

    /// News for an esport, `count` items (dashboard default 6).
    #[instrument(skip(self))]
    pub async fn news(&self, esport: Esport, count: usize) -> Result<Vec<NewsItem>> {
        validate_count(count)?;
        let provider = Arc::clone(&self.provider);
        let key = ContentKey::list(ResourceKind::News, esport, count);

        match self
            .cached(key, || async move {
                provider.fetch_news(esport, count).await.map(Content::News)
            })
            .await?
        {
            Content::News(items) => Ok(items),
            other => Err(mismatch(&key, &other)),
        }
    }

    /// Roster for an esport.
    #[instrument(skip(self))]
    pub async fn team(&self, esport: Esport) -> Result<Team> {
        let provider = Arc::clone(&self.provider);
        let key = ContentKey::single(ResourceKind::Team, esport);

        match self
            .cached(key, || async move { provider.fetch_team(esport).await.map(Content::Team) })
            .await?
        {
            Content::Team(team) => Ok(team),
            other => Err(mismatch(&key, &other)),
        }
    }

    /// Next `count` matches for an esport (dashboard default 5).
    #[instrument(skip(self))]
    pub async fn schedule(&self, esport: Esport, count: usize) -> Result<Vec<Match>> {
        validate_count(count)?;
        let provider = Arc::clone(&self.provider);
        let key = ContentKey::list(ResourceKind::Schedule, esport, count);

        match self
            .cached(key, || async move {
                provider
                    .fetch_schedule(esport, count)
                    .await
                    .map(Content::Schedule)
            })
            .await?
        {
            Content::Schedule(matches) => Ok(matches),
            other => Err(mismatch(&key, &other)),
        }
    }

    /// Season statistics for an esport.
    #[instrument(skip(self))]
    pub async fn team_stats(&self, esport: Esport) -> Result<Vec<TeamStat>> {
        let provider = Arc::clone(&self.provider);
        let key = ContentKey::single(ResourceKind::Stats, esport);

        match self
            .cached(key, || async move { provider.fetch_stats(esport).await.map(Content::Stats) })
            .await?
        {
            Content::Stats(stats) => Ok(stats),
            other => Err(mismatch(&key, &other)),
        }
    }

    /// Trending posts for an esport, `count` items (dashboard default 10).
    #[instrument(skip(self))]
    pub async fn trends(&self, esport: Esport, count: usize) -> Result<Vec<Trend>> {
        validate_count(count)?;
        let provider = Arc::clone(&self.provider);
        let key = ContentKey::list(ResourceKind::Trends, esport, count);

        match self
            .cached(key, || async move {
                provider.fetch_trends(esport, count).await.map(Content::Trends)
            })
            .await?
        {
            Content::Trends(trends) => Ok(trends),
            other => Err(mismatch(&key, &other)),
        }
    }

    /// Trending posts narrowed to one platform.
    ///
    /// Filtering happens after the cache, so all platforms share one entry.
    pub async fn trends_on(
        &self,
        esport: Esport,
        count: usize,
        platform: Option<Platform>,
    ) -> Result<Vec<Trend>> {
        let trends = self.trends(esport, count).await?;
        Ok(match platform {
            Some(platform) => trends.into_iter().filter(|t| t.platform == platform).collect(),
            None => trends,
        })
    }

    /// Videos for an esport, `count` items (dashboard default 4).
    #[instrument(skip(self))]
    pub async fn videos(&self, esport: Esport, count: usize) -> Result<Vec<Video>> {
        validate_count(count)?;
        let provider = Arc::clone(&self.provider);
        let key = ContentKey::list(ResourceKind::Videos, esport, count);

        match self
            .cached(key, || async move {
                provider.fetch_videos(esport, count).await.map(Content::Videos)
            })
            .await?
        {
            Content::Videos(videos) => Ok(videos),
            other => Err(mismatch(&key, &other)),
        }
    }

    /// Drops one cached answer so the next request refetches it.
    pub fn invalidate(&self, key: &ContentKey) -> bool {
        self.cache.invalidate(key)
    }

    /// Drops every expired answer. Returns how many were removed.
    pub fn purge_expired(&self) -> usize {
        let purged = self.cache.purge_expired();
        if purged > 0 {
            debug!(purged, "Purged expired cache entries");
        }
        purged
    }

    /// Cache statistics.
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// The underlying cache.
    pub fn cache(&self) -> &TimedCache<ContentKey, Content> {
        &self.cache
    }

    /// A fetch keeps running if the caller goes away, so an abandoned
    /// request still fills the cache for the next one.
    async fn cached<F, Fut>(&self, key: ContentKey, producer: F) -> Result<Content>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Content>> + Send + 'static,
    {
        let label = key.fingerprint()?;
        let mut fetched = false;
        let content = self
            .cache
            .get_or_compute(key, || {
                fetched = true;
                producer()
            })
            .await?;

        if fetched {
            info!(key = %label, "Fetched fresh content");
        } else {
            debug!(key = %label, "Cache hit");
        }
        Ok(content)
    }
}

fn validate_count(count: usize) -> Result<()> {
    if count == 0 || count > MAX_PANEL_COUNT {
        return Err(FanhubError::ValidationError(format!(
            "count must be between 1 and {}, got {}",
            MAX_PANEL_COUNT, count
        )));
    }
    Ok(())
}

fn mismatch(key: &ContentKey, found: &Content) -> FanhubError {
    FanhubError::InternalError(format!(
        "cache entry {} holds {} content",
        key,
        found.kind()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulated::{ProviderConfig, SimulatedProvider};
    use chrono::{Duration, TimeZone, Utc};
    use fanhub_cache::ManualClock;

    struct Fixture {
        provider: Arc<SimulatedProvider>,
        clock: ManualClock,
        service: ContentService,
    }

    fn fixture() -> Fixture {
        let provider = Arc::new(SimulatedProvider::with_config(ProviderConfig::instant()));
        let clock = ManualClock::new(Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap());
        let cache = TimedCache::with_clock(CacheConfig::default(), Arc::new(clock.clone())).unwrap();
        let service = ContentService::with_cache(provider.clone(), cache);
        Fixture {
            provider,
            clock,
            service,
        }
    }

    #[tokio::test]
    async fn test_second_request_is_cached() {
        let fx = fixture();

        let first = fx.service.news(Esport::Csgo, 6).await.unwrap();
        let second = fx.service.news(Esport::Csgo, 6).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(fx.provider.calls(ResourceKind::News), 1);
    }

    #[tokio::test]
    async fn test_count_is_part_of_key() {
        let fx = fixture();

        assert_eq!(fx.service.news(Esport::Csgo, 6).await.unwrap().len(), 6);
        assert_eq!(fx.service.news(Esport::Csgo, 3).await.unwrap().len(), 3);
        assert_eq!(fx.service.news(Esport::Lol, 6).await.unwrap().len(), 6);

        assert_eq!(fx.provider.calls(ResourceKind::News), 3);
    }

    #[tokio::test]
    async fn test_refetch_after_ttl() {
        let fx = fixture();

        fx.service.team(Esport::Valorant).await.unwrap();
        fx.clock.advance(Duration::minutes(29));
        fx.service.team(Esport::Valorant).await.unwrap();
        assert_eq!(fx.provider.calls(ResourceKind::Team), 1);

        fx.clock.advance(Duration::minutes(1));
        fx.service.team(Esport::Valorant).await.unwrap();
        assert_eq!(fx.provider.calls(ResourceKind::Team), 2);
    }

    #[tokio::test]
    async fn test_failure_is_propagated_and_not_cached() {
        let fx = fixture();
        fx.provider.set_failing(ResourceKind::Stats, true);

        let err = fx.service.team_stats(Esport::Csgo).await.unwrap_err();
        assert!(matches!(err, FanhubError::ProviderUnavailable { .. }));
        assert!(fx.service.cache().is_empty());

        fx.provider.set_failing(ResourceKind::Stats, false);
        assert_eq!(fx.service.team_stats(Esport::Csgo).await.unwrap().len(), 4);
        assert_eq!(fx.provider.calls(ResourceKind::Stats), 2);
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_stale_entry() {
        let fx = fixture();
        let first = fx.service.videos(Esport::Lol, 4).await.unwrap();

        fx.clock.advance(Duration::minutes(31));
        fx.provider.set_failing(ResourceKind::Videos, true);
        assert!(fx.service.videos(Esport::Lol, 4).await.is_err());

        let key = ContentKey::list(ResourceKind::Videos, Esport::Lol, 4);
        assert_eq!(fx.service.cache().len(), 1);
        assert_eq!(fx.service.cache_stats().expired_entries, 1);

        // Back inside the first write's window, the old value is still there.
        fx.clock.advance(Duration::minutes(-10));
        assert_eq!(fx.service.cache().get(&key), Some(Content::Videos(first)));
    }

    #[tokio::test]
    async fn test_invalidate_forces_refetch() {
        let fx = fixture();

        fx.service.schedule(Esport::Csgo, 5).await.unwrap();
        let key = ContentKey::list(ResourceKind::Schedule, Esport::Csgo, 5);
        assert!(fx.service.invalidate(&key));
        fx.service.schedule(Esport::Csgo, 5).await.unwrap();

        assert_eq!(fx.provider.calls(ResourceKind::Schedule), 2);
    }

    #[tokio::test]
    async fn test_trends_platform_filter_shares_entry() {
        let fx = fixture();

        let all = fx.service.trends_on(Esport::Csgo, 12, None).await.unwrap();
        let mut filtered = 0;
        for platform in Platform::ALL {
            let only = fx
                .service
                .trends_on(Esport::Csgo, 12, Some(platform))
                .await
                .unwrap();
            assert!(only.iter().all(|t| t.platform == platform));
            filtered += only.len();
        }

        assert_eq!(filtered, all.len());
        assert_eq!(fx.provider.calls(ResourceKind::Trends), 1);
    }

    #[tokio::test]
    async fn test_rejects_bad_count() {
        let fx = fixture();

        assert!(matches!(
            fx.service.news(Esport::Csgo, 0).await,
            Err(FanhubError::ValidationError(_))
        ));
        assert!(fx.service.videos(Esport::Csgo, MAX_PANEL_COUNT + 1).await.is_err());
        assert_eq!(fx.provider.total_calls(), 0);
    }

    #[tokio::test]
    async fn test_abandoned_request_still_fills_cache() {
        let provider = Arc::new(SimulatedProvider::with_config(ProviderConfig {
            news_delay_ms: 50,
            ..ProviderConfig::instant()
        }));
        let service = ContentService::new(provider.clone());

        let abandoned = tokio::time::timeout(
            std::time::Duration::from_millis(10),
            service.news(Esport::Csgo, 6),
        )
        .await;
        assert!(abandoned.is_err());

        tokio::time::sleep(std::time::Duration::from_millis(200)).await;
        assert_eq!(service.cache().len(), 1);

        service.news(Esport::Csgo, 6).await.unwrap();
        assert_eq!(provider.calls(ResourceKind::News), 1);
    }

    #[tokio::test]
    async fn test_purge_expired() {
        let fx = fixture();

        fx.service.news(Esport::Csgo, 6).await.unwrap();
        fx.clock.advance(Duration::minutes(15));
        fx.service.team(Esport::Csgo).await.unwrap();
        fx.clock.advance(Duration::minutes(20));

        assert_eq!(fx.service.purge_expired(), 1);
        assert_eq!(fx.service.cache_stats().total_entries, 1);
    }
}
