//! API route configuration.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers;
use crate::state::AppState;

/// Creates the API router with all routes configured.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))

        // Content panels
        .route("/api/v1/news/:esport", get(handlers::get_news))
        .route("/api/v1/team/:esport", get(handlers::get_team))
        .route("/api/v1/schedule/:esport", get(handlers::get_schedule))
        .route("/api/v1/stats/:esport", get(handlers::get_stats))
        .route("/api/v1/trends/:esport", get(handlers::get_trends))
        .route("/api/v1/videos/:esport", get(handlers::get_videos))
        .route("/api/v1/dashboard/:esport", get(handlers::get_dashboard))

        // Accounts
        .route("/api/v1/auth/register", post(handlers::register))
        .route("/api/v1/auth/login", post(handlers::login))
        .route("/api/v1/auth/logout", post(handlers::logout))
        .route("/api/v1/auth/me", get(handlers::current_user))

        // Cache
        .route("/api/v1/cache/stats", get(handlers::get_cache_stats))

        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;
    use crate::state::ApiConfig;

    fn test_state() -> Arc<AppState> {
        let config = ApiConfig {
            simulate_latency: false,
            ..ApiConfig::default()
        };
        Arc::new(AppState::new(config).unwrap())
    }

    async fn get(state: &Arc<AppState>, uri: &str) -> (StatusCode, Value) {
        let response = create_router(state.clone())
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        read(response).await
    }

    async fn post(state: &Arc<AppState>, uri: &str, body: Value) -> (StatusCode, Value) {
        let response = create_router(state.clone())
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        read(response).await
    }

    async fn read(response: axum::response::Response) -> (StatusCode, Value) {
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    #[tokio::test]
    async fn test_health_check() {
        let state = test_state();
        let (status, body) = get(&state, "/health").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_news_default_and_custom_count() {
        let state = test_state();

        let (status, body) = get(&state, "/api/v1/news/csgo").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 6);

        let (_, body) = get(&state, "/api/v1/news/valorant?count=2").await;
        assert_eq!(body.as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_unparsable_count_is_json_bad_request() {
        let state = test_state();

        let (status, body) = get(&state, "/api/v1/news/csgo?count=abc").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "BAD_REQUEST");

        let (status, body) = get(&state, "/api/v1/trends/csgo?count=-1").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "BAD_REQUEST");
    }

    #[tokio::test]
    async fn test_repeat_request_hits_cache() {
        let state = test_state();

        let (_, first) = get(&state, "/api/v1/team/lol").await;
        let (_, second) = get(&state, "/api/v1/team/lol").await;
        assert_eq!(first, second);

        let (status, stats) = get(&state, "/api/v1/cache/stats").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(stats["hits"], 1);
        assert_eq!(stats["misses"], 1);
        assert_eq!(stats["total_entries"], 1);
        assert_eq!(stats["ttl_minutes"], 30);
    }

    #[tokio::test]
    async fn test_unknown_esport() {
        let state = test_state();
        let (status, body) = get(&state, "/api/v1/stats/dota").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "BAD_REQUEST");
    }

    #[tokio::test]
    async fn test_trends_platform_filter() {
        let state = test_state();

        let (status, body) = get(&state, "/api/v1/trends/csgo?count=12&platform=reddit").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body
            .as_array()
            .unwrap()
            .iter()
            .all(|t| t["platform"] == "reddit"));

        let (status, _) = get(&state, "/api/v1/trends/csgo?platform=myspace").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_invalid_count() {
        let state = test_state();
        let (status, _) = get(&state, "/api/v1/videos/csgo?count=0").await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_dashboard() {
        let state = test_state();
        let (status, body) = get(&state, "/api/v1/dashboard/valorant").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["esport"], "valorant");
        assert_eq!(body["schedule"].as_array().unwrap().len(), 5);
        assert!(body["failedPanels"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_auth_flow() {
        let state = test_state();

        let (status, _) = get(&state, "/api/v1/auth/me").await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let form = json!({
            "name": "Ana",
            "email": "ana@example.com",
            "password": "secret1",
            "confirmPassword": "secret1",
            "favEsport": "lol",
            "acceptedTerms": true
        });
        let (status, body) = post(&state, "/api/v1/auth/register", form.clone()).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["user"]["favEsport"], "lol");

        let (status, _) = post(&state, "/api/v1/auth/register", form).await;
        assert_eq!(status, StatusCode::CONFLICT);

        let (status, _) = post(
            &state,
            "/api/v1/auth/login",
            json!({ "email": "ana@example.com", "password": "nope123" }),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, body) = post(
            &state,
            "/api/v1/auth/login",
            json!({ "email": "ANA@example.com", "password": "secret1", "remember": true }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["remember"], true);

        let (status, body) = get(&state, "/api/v1/auth/me").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["email"], "ana@example.com");

        let (_, body) = post(&state, "/api/v1/auth/logout", Value::Null).await;
        assert_eq!(body["logged_out"], true);
    }

    #[tokio::test]
    async fn test_register_validation() {
        let state = test_state();
        let (status, body) = post(
            &state,
            "/api/v1/auth/register",
            json!({
                "name": "Ana",
                "email": "ana@example.com",
                "password": "123",
                "confirmPassword": "123",
                "acceptedTerms": true
            }),
        )
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }
}
