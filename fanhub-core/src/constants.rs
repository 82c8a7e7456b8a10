//! Constants for FanHub.
//!
//! Defaults for the response cache, the panel sizes each dashboard section
//! asks for, and the artificial latencies of the simulated content source.

// ═══════════════════════════════════════════════════════════════════════════════
// CACHE
// ═══════════════════════════════════════════════════════════════════════════════

/// Default freshness window of the response cache, in minutes.
pub const DEFAULT_CACHE_TTL_MINUTES: u64 = 30;

// ═══════════════════════════════════════════════════════════════════════════════
// PANEL SIZES
// ═══════════════════════════════════════════════════════════════════════════════

/// News items shown on the dashboard.
pub const DEFAULT_NEWS_COUNT: usize = 6;

/// Upcoming matches shown on the dashboard.
pub const DEFAULT_SCHEDULE_COUNT: usize = 5;

/// Trending topics shown on the dashboard.
pub const DEFAULT_TRENDS_COUNT: usize = 10;

/// Videos shown on the dashboard.
pub const DEFAULT_VIDEOS_COUNT: usize = 4;

/// Upper bound accepted for any `count` parameter.
pub const MAX_PANEL_COUNT: usize = 50;

// ═══════════════════════════════════════════════════════════════════════════════
// SIMULATED LATENCY (milliseconds)
// ═══════════════════════════════════════════════════════════════════════════════

/// Artificial delay of the news source.
pub const NEWS_DELAY_MS: u64 = 500;

/// Artificial delay of the team roster source.
pub const TEAM_DELAY_MS: u64 = 700;

/// Artificial delay of the match schedule source.
pub const SCHEDULE_DELAY_MS: u64 = 600;

/// Artificial delay of the team statistics source.
pub const STATS_DELAY_MS: u64 = 800;

/// Artificial delay of the trending topics source.
pub const TRENDS_DELAY_MS: u64 = 400;

/// Artificial delay of the videos source.
pub const VIDEOS_DELAY_MS: u64 = 550;

// ═══════════════════════════════════════════════════════════════════════════════
// ACCOUNTS
// ═══════════════════════════════════════════════════════════════════════════════

/// Minimum accepted password length at registration.
pub const MIN_PASSWORD_LEN: usize = 6;
