//! Common traits for FanHub.
//!
//! The content layer talks to its data source through [`ContentProvider`],
//! so the cache can sit in front of a simulated source in development and
//! tests and in front of anything else later.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{Esport, Match, NewsItem, Team, TeamStat, Trend, Video};

// ═══════════════════════════════════════════════════════════════════════════════
// CONTENT PROVIDER TRAIT
// ═══════════════════════════════════════════════════════════════════════════════

/// Source of panel content.
///
/// Every method may be slow; callers are expected to cache results.
/// Implementations own their own timeouts.
#[async_trait]
pub trait ContentProvider: Send + Sync {
    /// Latest news for an esport, at most `count` items.
    async fn fetch_news(&self, esport: Esport, count: usize) -> Result<Vec<NewsItem>>;

    /// Current roster for an esport.
    async fn fetch_team(&self, esport: Esport) -> Result<Team>;

    /// Next `count` matches for an esport.
    async fn fetch_schedule(&self, esport: Esport, count: usize) -> Result<Vec<Match>>;

    /// Season statistics for an esport.
    async fn fetch_stats(&self, esport: Esport) -> Result<Vec<TeamStat>>;

    /// Trending social posts for an esport, at most `count` items.
    async fn fetch_trends(&self, esport: Esport, count: usize) -> Result<Vec<Trend>>;

    /// Recent videos for an esport, at most `count` items.
    async fn fetch_videos(&self, esport: Esport, count: usize) -> Result<Vec<Video>>;
}
