//! API route handlers.

use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    http::StatusCode,
    Json,
};
use tracing::debug;

use fanhub_auth::RegisterRequest;
use fanhub_content::DashboardSnapshot;
use fanhub_core::constants::{
    DEFAULT_NEWS_COUNT, DEFAULT_SCHEDULE_COUNT, DEFAULT_TRENDS_COUNT, DEFAULT_VIDEOS_COUNT,
};
use fanhub_core::types::{
    Esport, Match, NewsItem, Platform, Session, Team, TeamStat, Trend, Video,
};

use crate::dto::*;
use crate::error::ApiError;
use crate::state::AppState;

type Result<T> = std::result::Result<T, ApiError>;

fn parse_esport(raw: &str) -> Result<Esport> {
    Ok(raw.parse::<Esport>()?)
}

/// `all` and an empty value mean no filter.
fn parse_platform(raw: Option<&str>) -> Result<Option<Platform>> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(p) if p.eq_ignore_ascii_case("all") => Ok(None),
        Some(p) => Ok(Some(p.parse::<Platform>()?)),
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Content Handlers
// ═══════════════════════════════════════════════════════════════════════════

/// GET /api/v1/news/:esport
pub async fn get_news(
    State(state): State<Arc<AppState>>,
    Path(esport): Path<String>,
    query: std::result::Result<Query<CountQuery>, QueryRejection>,
) -> Result<Json<Vec<NewsItem>>> {
    let Query(query) = query?;
    let esport = parse_esport(&esport)?;
    let count = query.count.unwrap_or(DEFAULT_NEWS_COUNT);
    Ok(Json(state.content.news(esport, count).await?))
}

/// GET /api/v1/team/:esport
pub async fn get_team(
    State(state): State<Arc<AppState>>,
    Path(esport): Path<String>,
) -> Result<Json<Team>> {
    let esport = parse_esport(&esport)?;
    Ok(Json(state.content.team(esport).await?))
}

/// GET /api/v1/schedule/:esport
pub async fn get_schedule(
    State(state): State<Arc<AppState>>,
    Path(esport): Path<String>,
    query: std::result::Result<Query<CountQuery>, QueryRejection>,
) -> Result<Json<Vec<Match>>> {
    let Query(query) = query?;
    let esport = parse_esport(&esport)?;
    let count = query.count.unwrap_or(DEFAULT_SCHEDULE_COUNT);
    Ok(Json(state.content.schedule(esport, count).await?))
}

/// GET /api/v1/stats/:esport
pub async fn get_stats(
    State(state): State<Arc<AppState>>,
    Path(esport): Path<String>,
) -> Result<Json<Vec<TeamStat>>> {
    let esport = parse_esport(&esport)?;
    Ok(Json(state.content.team_stats(esport).await?))
}

/// GET /api/v1/trends/:esport
pub async fn get_trends(
    State(state): State<Arc<AppState>>,
    Path(esport): Path<String>,
    query: std::result::Result<Query<TrendsQuery>, QueryRejection>,
) -> Result<Json<Vec<Trend>>> {
    let Query(query) = query?;
    let esport = parse_esport(&esport)?;
    let platform = parse_platform(query.platform.as_deref())?;
    let count = query.count.unwrap_or(DEFAULT_TRENDS_COUNT);
    Ok(Json(state.content.trends_on(esport, count, platform).await?))
}

/// GET /api/v1/videos/:esport
pub async fn get_videos(
    State(state): State<Arc<AppState>>,
    Path(esport): Path<String>,
    query: std::result::Result<Query<CountQuery>, QueryRejection>,
) -> Result<Json<Vec<Video>>> {
    let Query(query) = query?;
    let esport = parse_esport(&esport)?;
    let count = query.count.unwrap_or(DEFAULT_VIDEOS_COUNT);
    Ok(Json(state.content.videos(esport, count).await?))
}

/// GET /api/v1/dashboard/:esport
pub async fn get_dashboard(
    State(state): State<Arc<AppState>>,
    Path(esport): Path<String>,
) -> Result<Json<DashboardSnapshot>> {
    let esport = parse_esport(&esport)?;
    Ok(Json(state.dashboard.load(esport).await))
}

/// GET /api/v1/cache/stats
pub async fn get_cache_stats(State(state): State<Arc<AppState>>) -> Json<CacheStatsResponse> {
    let stats = state.content.cache_stats();
    Json(CacheStatsResponse {
        hit_rate: stats.hit_rate(),
        stats,
        ttl_minutes: state.config.cache_ttl_minutes,
    })
}

// ═══════════════════════════════════════════════════════════════════════════
// Auth Handlers
// ═══════════════════════════════════════════════════════════════════════════

/// POST /api/v1/auth/register
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>)> {
    let user = state.users.register(req)?;
    Ok((StatusCode::CREATED, Json(RegisterResponse { user })))
}

/// POST /api/v1/auth/login
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<Session>> {
    let session = state.users.login(&req.email, &req.password, req.remember)?;
    Ok(Json(session))
}

/// POST /api/v1/auth/logout
pub async fn logout(State(state): State<Arc<AppState>>) -> Json<LogoutResponse> {
    Json(LogoutResponse {
        logged_out: state.users.logout(),
    })
}

/// GET /api/v1/auth/me
pub async fn current_user(State(state): State<Arc<AppState>>) -> Result<Json<Session>> {
    Ok(Json(state.users.require_user()?))
}

// ═══════════════════════════════════════════════════════════════════════════
// Health
// ═══════════════════════════════════════════════════════════════════════════

/// GET /health
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let response = HealthResponse {
        status: "ok".into(),
        version: env!("CARGO_PKG_VERSION").into(),
        uptime_seconds: state.started_at.elapsed().as_secs(),
        cached_entries: state.content.cache().len(),
        registered_users: state.users.len(),
    };
    debug!(uptime = response.uptime_seconds, "Health check");
    Json(response)
}
