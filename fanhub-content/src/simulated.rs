//! Simulated content source.
//!
//! Returns canned content after an artificial per-resource delay, the way
//! the dashboard behaves before real content APIs are wired in.

use std::collections::HashSet;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use fanhub_core::constants::{
    NEWS_DELAY_MS, SCHEDULE_DELAY_MS, STATS_DELAY_MS, TEAM_DELAY_MS, TRENDS_DELAY_MS,
    VIDEOS_DELAY_MS,
};
use fanhub_core::error::{FanhubError, Result};
use fanhub_core::traits::ContentProvider;
use fanhub_core::types::{Esport, Match, NewsItem, ResourceKind, Team, TeamStat, Trend, Video};

use crate::catalog;

/// Simulated provider configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// News delay in milliseconds
    pub news_delay_ms: u64,
    /// Roster delay in milliseconds
    pub team_delay_ms: u64,
    /// Schedule delay in milliseconds
    pub schedule_delay_ms: u64,
    /// Statistics delay in milliseconds
    pub stats_delay_ms: u64,
    /// Trends delay in milliseconds
    pub trends_delay_ms: u64,
    /// Videos delay in milliseconds
    pub videos_delay_ms: u64,
    /// Resources that fail from the start
    #[serde(default)]
    pub failing: Vec<ResourceKind>,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            news_delay_ms: NEWS_DELAY_MS,
            team_delay_ms: TEAM_DELAY_MS,
            schedule_delay_ms: SCHEDULE_DELAY_MS,
            stats_delay_ms: STATS_DELAY_MS,
            trends_delay_ms: TRENDS_DELAY_MS,
            videos_delay_ms: VIDEOS_DELAY_MS,
            failing: Vec::new(),
        }
    }
}

impl ProviderConfig {
    /// A config with every delay set to zero.
    pub fn instant() -> Self {
        Self {
            news_delay_ms: 0,
            team_delay_ms: 0,
            schedule_delay_ms: 0,
            stats_delay_ms: 0,
            trends_delay_ms: 0,
            videos_delay_ms: 0,
            failing: Vec::new(),
        }
    }

    /// Makes `kind` fail.
    pub fn failing(mut self, kind: ResourceKind) -> Self {
        if !self.failing.contains(&kind) {
            self.failing.push(kind);
        }
        self
    }

    /// The configured delay for a resource.
    pub fn delay(&self, kind: ResourceKind) -> Duration {
        let ms = match kind {
            ResourceKind::News => self.news_delay_ms,
            ResourceKind::Team => self.team_delay_ms,
            ResourceKind::Schedule => self.schedule_delay_ms,
            ResourceKind::Stats => self.stats_delay_ms,
            ResourceKind::Trends => self.trends_delay_ms,
            ResourceKind::Videos => self.videos_delay_ms,
        };
        Duration::from_millis(ms)
    }
}

/// Canned content with artificial latency.
///
/// Counts every call per resource so callers can see how often the cache
/// let a request through. Failures can be switched on and off at runtime.
pub struct SimulatedProvider {
    config: ProviderConfig,
    failing: RwLock<HashSet<ResourceKind>>,
    calls: DashMap<ResourceKind, u64>,
}

impl SimulatedProvider {
    /// Creates a provider with the default delays.
    pub fn new() -> Self {
        Self::with_config(ProviderConfig::default())
    }

    /// Creates a provider with custom configuration.
    pub fn with_config(config: ProviderConfig) -> Self {
        let failing = config.failing.iter().copied().collect();
        Self {
            config,
            failing: RwLock::new(failing),
            calls: DashMap::new(),
        }
    }

    /// Turns simulated failure of `kind` on or off.
    pub fn set_failing(&self, kind: ResourceKind, failing: bool) {
        let mut set = self.failing.write();
        if failing {
            set.insert(kind);
        } else {
            set.remove(&kind);
        }
    }

    /// How many times `kind` was requested.
    pub fn calls(&self, kind: ResourceKind) -> u64 {
        self.calls.get(&kind).map(|c| *c).unwrap_or(0)
    }

    /// Total requests across all resources.
    pub fn total_calls(&self) -> u64 {
        self.calls.iter().map(|entry| *entry.value()).sum()
    }

    /// Counts the call, waits out the delay, then fails if `kind` is switched off.
    async fn simulate(&self, kind: ResourceKind) -> Result<()> {
        *self.calls.entry(kind).or_insert(0) += 1;

        let delay = self.config.delay(kind);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        if self.failing.read().contains(&kind) {
            return Err(FanhubError::unavailable(kind.as_str(), "simulated outage"));
        }
        debug!(resource = %kind, delay_ms = delay.as_millis() as u64, "Simulated response");
        Ok(())
    }
}

impl Default for SimulatedProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ContentProvider for SimulatedProvider {
    #[instrument(skip(self))]
    async fn fetch_news(&self, esport: Esport, count: usize) -> Result<Vec<NewsItem>> {
        self.simulate(ResourceKind::News).await?;
        Ok(catalog::news(esport, count, Utc::now(), &mut rand::thread_rng()))
    }

    #[instrument(skip(self))]
    async fn fetch_team(&self, esport: Esport) -> Result<Team> {
        self.simulate(ResourceKind::Team).await?;
        Ok(catalog::team(esport))
    }

    #[instrument(skip(self))]
    async fn fetch_schedule(&self, esport: Esport, count: usize) -> Result<Vec<Match>> {
        self.simulate(ResourceKind::Schedule).await?;
        Ok(catalog::schedule(esport, count, Utc::now(), &mut rand::thread_rng()))
    }

    #[instrument(skip(self))]
    async fn fetch_stats(&self, esport: Esport) -> Result<Vec<TeamStat>> {
        self.simulate(ResourceKind::Stats).await?;
        Ok(catalog::stats(esport))
    }

    #[instrument(skip(self))]
    async fn fetch_trends(&self, esport: Esport, count: usize) -> Result<Vec<Trend>> {
        self.simulate(ResourceKind::Trends).await?;
        Ok(catalog::trends(esport, count, Utc::now(), &mut rand::thread_rng()))
    }

    #[instrument(skip(self))]
    async fn fetch_videos(&self, esport: Esport, count: usize) -> Result<Vec<Video>> {
        self.simulate(ResourceKind::Videos).await?;
        Ok(catalog::videos(esport, count, Utc::now(), &mut rand::thread_rng()))
    }
}
