//! Whole-dashboard loading.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use fanhub_core::constants::{
    DEFAULT_NEWS_COUNT, DEFAULT_SCHEDULE_COUNT, DEFAULT_TRENDS_COUNT, DEFAULT_VIDEOS_COUNT,
};
use fanhub_core::error::Result;
use fanhub_core::types::{Esport, Match, NewsItem, ResourceKind, Team, TeamStat, Trend, Video};

use crate::service::ContentService;

/// Every panel for one esport.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    /// Selected esport
    pub esport: Esport,
    /// Latest news
    pub news: Vec<NewsItem>,
    /// Roster, absent if it failed to load
    pub team: Option<Team>,
    /// Upcoming matches
    pub schedule: Vec<Match>,
    /// Season statistics
    pub stats: Vec<TeamStat>,
    /// Trending posts
    pub trends: Vec<Trend>,
    /// Videos
    pub videos: Vec<Video>,
    /// Panels that failed and were left empty
    pub failed_panels: Vec<ResourceKind>,
    /// When the snapshot was assembled
    pub loaded_at: DateTime<Utc>,
}

impl DashboardSnapshot {
    /// True if every panel loaded.
    pub fn is_complete(&self) -> bool {
        self.failed_panels.is_empty()
    }
}

/// Loads all dashboard panels concurrently through a [`ContentService`].
///
/// A failing panel is logged and rendered empty; it never takes the rest
/// of the dashboard down with it.
#[derive(Clone)]
pub struct Dashboard {
    service: Arc<ContentService>,
}

impl Dashboard {
    /// Creates a dashboard over a shared service.
    pub fn new(service: Arc<ContentService>) -> Self {
        Self { service }
    }

    /// The underlying service.
    pub fn service(&self) -> &Arc<ContentService> {
        &self.service
    }

    /// Loads every panel with its default size.
    pub async fn load(&self, esport: Esport) -> DashboardSnapshot {
        let (news, team, schedule, stats, trends, videos) = tokio::join!(
            self.service.news(esport, DEFAULT_NEWS_COUNT),
            self.service.team(esport),
            self.service.schedule(esport, DEFAULT_SCHEDULE_COUNT),
            self.service.team_stats(esport),
            self.service.trends(esport, DEFAULT_TRENDS_COUNT),
            self.service.videos(esport, DEFAULT_VIDEOS_COUNT),
        );

        let mut failed = Vec::new();
        let snapshot = DashboardSnapshot {
            esport,
            news: panel(ResourceKind::News, news, &mut failed).unwrap_or_default(),
            team: panel(ResourceKind::Team, team, &mut failed),
            schedule: panel(ResourceKind::Schedule, schedule, &mut failed).unwrap_or_default(),
            stats: panel(ResourceKind::Stats, stats, &mut failed).unwrap_or_default(),
            trends: panel(ResourceKind::Trends, trends, &mut failed).unwrap_or_default(),
            videos: panel(ResourceKind::Videos, videos, &mut failed).unwrap_or_default(),
            failed_panels: failed,
            loaded_at: Utc::now(),
        };

        info!(
            esport = %esport,
            failed = snapshot.failed_panels.len(),
            "Dashboard loaded"
        );
        snapshot
    }
}

fn panel<T>(kind: ResourceKind, result: Result<T>, failed: &mut Vec<ResourceKind>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(panel = %kind, error = %e, "Panel failed to load");
            failed.push(kind);
            None
        }
    }
}
