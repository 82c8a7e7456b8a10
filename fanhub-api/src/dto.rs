//! DTOs for API requests and responses.

use serde::{Deserialize, Serialize};

use fanhub_cache::CacheStats;
use fanhub_core::types::User;

/// `?count=` on list endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct CountQuery {
    /// Number of items, resource default when absent
    pub count: Option<usize>,
}

/// Query string for the trends endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct TrendsQuery {
    /// Number of items
    pub count: Option<usize>,
    /// `twitter`, `reddit`, `google` or `all`
    pub platform: Option<String>,
}

/// Login form.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// Account email
    pub email: String,
    /// Account password
    pub password: String,
    /// Keep the session
    #[serde(default)]
    pub remember: bool,
}

/// Response for registration.
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    /// The new account
    pub user: User,
}

/// Response for logout.
#[derive(Debug, Serialize)]
pub struct LogoutResponse {
    /// False if nobody was logged in
    pub logged_out: bool,
}

/// Response for cache statistics.
#[derive(Debug, Serialize)]
pub struct CacheStatsResponse {
    /// Raw counters
    #[serde(flatten)]
    pub stats: CacheStats,
    /// Hits over total lookups
    pub hit_rate: f64,
    /// Configured lifetime
    pub ttl_minutes: u64,
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Status
    pub status: String,
    /// Version
    pub version: String,
    /// Uptime in seconds
    pub uptime_seconds: u64,
    /// Entries currently cached
    pub cached_entries: usize,
    /// Registered users
    pub registered_users: usize,
}
