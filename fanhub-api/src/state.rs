//! App state: content service, dashboard, users, config.

use std::str::FromStr;
use std::sync::Arc;
use std::time::Instant;

use tracing::warn;

use fanhub_auth::UserStore;
use fanhub_cache::CacheConfig;
use fanhub_content::{ContentService, Dashboard, ProviderConfig, SimulatedProvider};
use fanhub_core::constants::DEFAULT_CACHE_TTL_MINUTES;
use fanhub_core::error::Result;
use fanhub_core::traits::ContentProvider;

/// Server configuration.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    /// Content cache lifetime
    pub cache_ttl_minutes: u64,
    /// Keep the simulated provider's artificial delays
    pub simulate_latency: bool,
    /// Seconds between expired-entry sweeps, 0 disables them
    pub sweep_interval_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            cache_ttl_minutes: DEFAULT_CACHE_TTL_MINUTES,
            simulate_latency: true,
            sweep_interval_secs: 0,
        }
    }
}

impl ApiConfig {
    /// Reads `FANHUB_*` variables, loading `.env` first if present.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();
        let defaults = Self::default();

        Self {
            cache_ttl_minutes: env_or("FANHUB_CACHE_TTL_MINUTES", defaults.cache_ttl_minutes),
            simulate_latency: std::env::var("FANHUB_SIMULATE_LATENCY")
                .map(|v| v != "false" && v != "0")
                .unwrap_or(defaults.simulate_latency),
            sweep_interval_secs: env_or("FANHUB_SWEEP_INTERVAL_SECS", defaults.sweep_interval_secs),
        }
    }

    /// Cache configuration derived from this config.
    pub fn cache_config(&self) -> CacheConfig {
        CacheConfig::with_ttl_minutes(self.cache_ttl_minutes)
    }
}

/// Parses `name` if set. A value that does not parse falls back to
/// `default` with a warning.
fn env_or<T: FromStr>(name: &str, default: T) -> T {
    match std::env::var(name) {
        Ok(raw) => match raw.trim().parse() {
            Ok(value) => value,
            Err(_) => {
                warn!(var = name, value = %raw, "Ignoring unparsable value, using default");
                default
            }
        },
        Err(_) => default,
    }
}

/// Shared state behind every handler.
pub struct AppState {
    /// Server configuration
    pub config: ApiConfig,
    /// Cached content accessors
    pub content: Arc<ContentService>,
    /// Whole-dashboard loader sharing `content`'s cache
    pub dashboard: Dashboard,
    /// Accounts and the current session
    pub users: UserStore,
    /// For uptime reporting
    pub started_at: Instant,
}

impl AppState {
    /// Builds state around the simulated provider.
    pub fn new(config: ApiConfig) -> Result<Self> {
        let provider_config = if config.simulate_latency {
            ProviderConfig::default()
        } else {
            ProviderConfig::instant()
        };
        let provider = Arc::new(SimulatedProvider::with_config(provider_config));
        Self::with_provider(config, provider)
    }

    /// Builds state around any content provider.
    pub fn with_provider(config: ApiConfig, provider: Arc<dyn ContentProvider>) -> Result<Self> {
        let content = Arc::new(ContentService::with_cache_config(
            provider,
            config.cache_config(),
        )?);

        Ok(Self {
            dashboard: Dashboard::new(Arc::clone(&content)),
            content,
            config,
            users: UserStore::new(),
            started_at: Instant::now(),
        })
    }
}
