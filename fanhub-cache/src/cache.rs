//! In-memory TTL cache for producer results.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::future::Future;
use std::hash::Hash;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use fanhub_core::constants::DEFAULT_CACHE_TTL_MINUTES;
use fanhub_core::error::{FanhubError, Result};

use crate::clock::{Clock, SystemClock};

/// One year; anything longer is almost certainly a unit mistake.
const MAX_TTL_MINUTES: u64 = 60 * 24 * 365;

/// Cache entry: value and write time, always replaced together.
#[derive(Clone)]
struct CacheEntry<V> {
    value: V,
    stored_at: DateTime<Utc>,
}

impl<V> CacheEntry<V> {
    fn is_fresh(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        now.signed_duration_since(self.stored_at) < ttl
    }
}

/// Cache configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Freshness window in minutes
    pub ttl_minutes: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_minutes: DEFAULT_CACHE_TTL_MINUTES,
        }
    }
}

impl CacheConfig {
    /// Creates a config with the given TTL.
    pub fn with_ttl_minutes(ttl_minutes: u64) -> Self {
        Self { ttl_minutes }
    }

    /// Checks that the TTL is positive and within one year.
    pub fn validate(&self) -> Result<()> {
        if self.ttl_minutes == 0 {
            return Err(FanhubError::ConfigError(
                "cache ttl_minutes must be positive".into(),
            ));
        }
        if self.ttl_minutes > MAX_TTL_MINUTES {
            return Err(FanhubError::ConfigError(format!(
                "cache ttl_minutes must be at most {}, got {}",
                MAX_TTL_MINUTES, self.ttl_minutes
            )));
        }
        Ok(())
    }

    /// The TTL as a duration, after validation.
    pub fn ttl(&self) -> Result<Duration> {
        self.validate()?;
        // Bounded by MAX_TTL_MINUTES, so the cast and constructor cannot overflow.
        Ok(Duration::minutes(self.ttl_minutes as i64))
    }
}

/// Time-boxed cache in front of a slow producer.
///
/// An entry written at `T` is returned by [`get`](Self::get) while
/// `now - T < ttl`; at `T + ttl` it is already a miss. Expired entries are
/// not evicted by lookups and stay stored until overwritten, invalidated or
/// swept by [`purge_expired`](Self::purge_expired).
///
/// Thread-safe. The lock is never held while a producer runs, so concurrent
/// misses on one key each invoke their producer and the last write wins.
/// [`get_or_compute`](Self::get_or_compute) needs the cache behind an `Arc`.
pub struct TimedCache<K, V> {
    entries: RwLock<HashMap<K, CacheEntry<V>>>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl<K, V> TimedCache<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    /// Creates a cache with the default 30 minute TTL and the system clock.
    pub fn new() -> Self {
        Self::from_parts(
            Duration::minutes(DEFAULT_CACHE_TTL_MINUTES as i64),
            Arc::new(SystemClock),
        )
    }

    /// Creates a cache with custom configuration.
    pub fn with_config(config: CacheConfig) -> Result<Self> {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Creates a cache reading time from `clock`.
    pub fn with_clock(config: CacheConfig, clock: Arc<dyn Clock>) -> Result<Self> {
        Ok(Self::from_parts(config.ttl()?, clock))
    }

    fn from_parts(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl,
            clock,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Returns the stored value if it is still fresh.
    ///
    /// A key that was never stored and a key whose entry expired look the
    /// same to the caller.
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let now = self.clock.now();
        let found = self
            .entries
            .read()
            .get(key)
            .filter(|e| e.is_fresh(now, self.ttl))
            .map(|e| e.value.clone());

        match found {
            Some(_) => self.hits.fetch_add(1, Ordering::Relaxed),
            None => self.misses.fetch_add(1, Ordering::Relaxed),
        };
        found
    }

    /// Stores `value` under `key`, replacing any previous entry.
    pub fn set(&self, key: K, value: V) {
        let entry = CacheEntry {
            value,
            stored_at: self.clock.now(),
        };
        self.entries.write().insert(key, entry);
    }

    /// Returns the fresh value for `key`, or runs `producer` and stores its result.
    ///
    /// `producer` is invoked at most once per call and only on a miss. If it
    /// fails, the error is returned unchanged and the stored entry for `key`
    /// (stale or absent) is left exactly as it was.
    ///
    /// The fill runs as its own Tokio task. Dropping the returned future
    /// (a client disconnect, a caller-side timeout) does not stop it: the
    /// producer still completes and a success is still stored.
    pub async fn get_or_compute<F, Fut, E>(
        self: &Arc<Self>,
        key: K,
        producer: F,
    ) -> std::result::Result<V, E>
    where
        K: Send + Sync + 'static,
        V: Send + Sync + 'static,
        F: FnOnce() -> Fut,
        Fut: Future<Output = std::result::Result<V, E>> + Send + 'static,
        E: From<FanhubError> + Send + 'static,
    {
        if let Some(value) = self.get(&key) {
            return Ok(value);
        }

        let cache = Arc::clone(self);
        let fill = producer();
        let handle = tokio::spawn(async move {
            let value = fill.await?;
            cache.set(key, value.clone());
            Ok::<V, E>(value)
        });

        match handle.await {
            Ok(result) => result,
            Err(e) if e.is_panic() => std::panic::resume_unwind(e.into_panic()),
            Err(e) => Err(E::from(FanhubError::InternalError(format!(
                "cache fill task cancelled: {}",
                e
            )))),
        }
    }

    /// Removes the entry for `key`. Returns true if one was stored.
    pub fn invalidate<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.write().remove(key).is_some()
    }

    /// Drops every expired entry and returns how many were removed.
    ///
    /// The cache never calls this on its own.
    pub fn purge_expired(&self) -> usize {
        let now = self.clock.now();
        let mut entries = self.entries.write();
        let before = entries.len();
        entries.retain(|_, e| e.is_fresh(now, self.ttl));
        before - entries.len()
    }

    /// Returns the number of stored entries, expired ones included.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Returns true if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// The configured freshness window.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Returns cache statistics.
    pub fn stats(&self) -> CacheStats {
        let now = self.clock.now();
        let entries = self.entries.read();
        let expired = entries
            .values()
            .filter(|e| !e.is_fresh(now, self.ttl))
            .count();

        CacheStats {
            total_entries: entries.len(),
            expired_entries: expired,
            valid_entries: entries.len() - expired,
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}

impl<K, V> Default for TimedCache<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

/// Cache statistics.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheStats {
    /// Total entries (including expired)
    pub total_entries: usize,
    /// Expired entries still stored
    pub expired_entries: usize,
    /// Fresh entries
    pub valid_entries: usize,
    /// Lookups answered from the cache
    pub hits: u64,
    /// Lookups that found nothing fresh
    pub misses: u64,
}

impl CacheStats {
    /// Fraction of lookups that were hits, 0.0 when there were none.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use chrono::TimeZone;
    use std::sync::atomic::AtomicUsize;

    fn ten_am() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap()
    }

    type TestCache = Arc<TimedCache<String, Vec<&'static str>>>;

    fn make_cache(ttl_minutes: u64) -> (TestCache, ManualClock) {
        let clock = ManualClock::new(ten_am());
        let cache = TimedCache::with_clock(
            CacheConfig::with_ttl_minutes(ttl_minutes),
            Arc::new(clock.clone()),
        )
        .unwrap();
        (Arc::new(cache), clock)
    }

    fn down(reason: &str) -> FanhubError {
        FanhubError::unavailable("news", reason)
    }

    #[test]
    fn test_cache_set_get() {
        let (cache, _clock) = make_cache(30);
        cache.set("news_csgo_6".into(), vec!["item1", "item2"]);
        assert_eq!(cache.get("news_csgo_6"), Some(vec!["item1", "item2"]));
    }

    #[test]
    fn test_cache_miss() {
        let (cache, _clock) = make_cache(30);
        assert!(cache.get("nonexistent").is_none());
    }

    #[test]
    fn test_fresh_just_before_ttl() {
        let (cache, clock) = make_cache(30);
        cache.set("k".into(), vec!["v"]);

        clock.advance(Duration::minutes(30) - Duration::milliseconds(1));
        assert_eq!(cache.get("k"), Some(vec!["v"]));
    }

    #[test]
    fn test_expired_at_exact_ttl() {
        let (cache, clock) = make_cache(30);
        cache.set("k".into(), vec!["v"]);

        clock.advance(Duration::minutes(30));
        assert!(cache.get("k").is_none());
    }

    #[test]
    fn test_expired_after_ttl() {
        let (cache, clock) = make_cache(30);
        cache.set("k".into(), vec!["v"]);

        clock.advance(Duration::hours(5));
        assert!(cache.get("k").is_none());
    }

    #[test]
    fn test_get_does_not_evict() {
        let (cache, clock) = make_cache(30);
        cache.set("k".into(), vec!["v"]);
        clock.advance(Duration::minutes(31));

        assert!(cache.get("k").is_none());
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_overwrite_replaces_value_and_timestamp() {
        let (cache, clock) = make_cache(30);
        cache.set("k".into(), vec!["v1"]);

        clock.advance(Duration::minutes(20));
        cache.set("k".into(), vec!["v2"]);
        assert_eq!(cache.get("k"), Some(vec!["v2"]));

        // Still fresh 29 minutes after the second write, 49 after the first.
        clock.advance(Duration::minutes(29));
        assert_eq!(cache.get("k"), Some(vec!["v2"]));
    }

    #[test]
    fn test_key_independence() {
        let (cache, clock) = make_cache(30);
        cache.set("a".into(), vec!["a1"]);
        clock.advance(Duration::minutes(10));
        cache.set("b".into(), vec!["b1"]);

        cache.set("a".into(), vec!["a2"]);
        assert!(cache.invalidate("a"));
        assert_eq!(cache.get("b"), Some(vec!["b1"]));

        // b's timestamp was not touched by writes to a.
        clock.advance(Duration::minutes(30));
        assert!(cache.get("b").is_none());
    }

    #[test]
    fn test_worked_example() {
        let (cache, clock) = make_cache(30);
        cache.set("news_csgo_6".into(), vec!["item1", "item2"]);

        clock.set(ten_am() + Duration::minutes(29));
        assert_eq!(cache.get("news_csgo_6"), Some(vec!["item1", "item2"]));

        clock.set(ten_am() + Duration::minutes(30));
        assert!(cache.get("news_csgo_6").is_none());
    }

    #[tokio::test]
    async fn test_get_or_compute_bypasses_producer_on_hit() {
        let (cache, _clock) = make_cache(30);
        cache.set("k".into(), vec!["cached"]);

        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let value = cache
            .get_or_compute("k".into(), move || async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok::<_, FanhubError>(vec!["fresh"])
            })
            .await
            .unwrap();

        assert_eq!(value, vec!["cached"]);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_get_or_compute_invokes_once_on_miss() {
        let (cache, _clock) = make_cache(30);

        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let value = cache
            .get_or_compute("k".into(), move || async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok::<_, FanhubError>(vec!["fresh"])
            })
            .await
            .unwrap();

        assert_eq!(value, vec!["fresh"]);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(cache.get("k"), Some(vec!["fresh"]));
    }

    #[tokio::test]
    async fn test_get_or_compute_refreshes_expired() {
        let (cache, clock) = make_cache(30);
        cache.set("news_csgo_6".into(), vec!["old"]);
        clock.advance(Duration::minutes(31));

        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let value = cache
            .get_or_compute("news_csgo_6".into(), move || async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok::<_, FanhubError>(vec!["new"])
            })
            .await
            .unwrap();

        assert_eq!(value, vec!["new"]);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(cache.get("news_csgo_6"), Some(vec!["new"]));
    }

    #[tokio::test]
    async fn test_failure_leaves_absent_key_absent() {
        let (cache, _clock) = make_cache(30);

        let err = cache
            .get_or_compute("k".into(), || async { Err::<Vec<&str>, _>(down("boom")) })
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            FanhubError::ProviderUnavailable { ref reason, .. } if reason == "boom"
        ));
        assert!(cache.get("k").is_none());
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn test_failure_keeps_stale_entry() {
        let (cache, clock) = make_cache(30);
        cache.set("k".into(), vec!["stale"]);
        clock.advance(Duration::minutes(45));

        let result = cache
            .get_or_compute("k".into(), || async { Err::<Vec<&str>, _>(down("down")) })
            .await;
        assert!(result.is_err());

        // Rewind to check the stale entry's value and timestamp survived untouched.
        clock.set(ten_am() + Duration::minutes(29));
        assert_eq!(cache.get("k"), Some(vec!["stale"]));
    }

    #[tokio::test]
    async fn test_retry_after_failure_invokes_producer_again() {
        let (cache, _clock) = make_cache(30);

        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let _ = cache
            .get_or_compute("k".into(), move || async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Err::<Vec<&str>, _>(down("first"))
            })
            .await;
        let counter = calls.clone();
        let value = cache
            .get_or_compute("k".into(), move || async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok::<_, FanhubError>(vec!["second"])
            })
            .await
            .unwrap();

        assert_eq!(value, vec!["second"]);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_concurrent_misses_are_not_coalesced() {
        let (cache, _clock) = make_cache(30);
        let calls = Arc::new(AtomicUsize::new(0));

        let counter = calls.clone();
        let first = cache.get_or_compute("k".into(), move || async move {
            counter.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(std::time::Duration::from_millis(10)).await;
            Ok::<_, FanhubError>(vec!["first"])
        });
        let counter = calls.clone();
        let second = cache.get_or_compute("k".into(), move || async move {
            counter.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(std::time::Duration::from_millis(40)).await;
            Ok::<_, FanhubError>(vec!["second"])
        });

        let (a, b) = tokio::join!(first, second);
        assert_eq!(a.unwrap(), vec!["first"]);
        assert_eq!(b.unwrap(), vec!["second"]);
        assert_eq!(calls.load(Ordering::SeqCst), 2);

        // The later completion wrote last.
        assert_eq!(cache.get("k"), Some(vec!["second"]));
    }

    #[tokio::test]
    async fn test_abandoned_caller_still_stores_result() {
        let (cache, _clock) = make_cache(30);

        let pending = cache.get_or_compute("news_csgo_6".into(), || async {
            tokio::time::sleep(std::time::Duration::from_millis(50)).await;
            Ok::<_, FanhubError>(vec!["item1"])
        });
        let timed_out = tokio::time::timeout(std::time::Duration::from_millis(10), pending).await;
        assert!(timed_out.is_err());
        assert!(cache.is_empty());

        tokio::time::sleep(std::time::Duration::from_millis(200)).await;
        assert_eq!(cache.get("news_csgo_6"), Some(vec!["item1"]));
    }

    #[tokio::test]
    async fn test_abandoned_caller_failure_not_stored() {
        let (cache, _clock) = make_cache(30);

        let pending = cache.get_or_compute("k".into(), || async {
            tokio::time::sleep(std::time::Duration::from_millis(50)).await;
            Err::<Vec<&str>, _>(down("late failure"))
        });
        assert!(tokio::time::timeout(std::time::Duration::from_millis(10), pending)
            .await
            .is_err());

        tokio::time::sleep(std::time::Duration::from_millis(200)).await;
        assert!(cache.is_empty());
    }

    #[test]
    fn test_invalidate() {
        let (cache, _clock) = make_cache(30);
        cache.set("k".into(), vec!["v"]);

        assert!(cache.invalidate("k"));
        assert!(!cache.invalidate("k"));
        assert!(cache.get("k").is_none());
    }

    #[test]
    fn test_purge_expired() {
        let (cache, clock) = make_cache(30);
        cache.set("old".into(), vec!["o"]);
        clock.advance(Duration::minutes(20));
        cache.set("new".into(), vec!["n"]);
        clock.advance(Duration::minutes(15));

        assert_eq!(cache.purge_expired(), 1);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get("new"), Some(vec!["n"]));
    }

    #[test]
    fn test_stats() {
        let (cache, clock) = make_cache(30);
        cache.set("a".into(), vec!["a"]);
        clock.advance(Duration::minutes(40));
        cache.set("b".into(), vec!["b"]);

        assert!(cache.get("a").is_none());
        assert!(cache.get("b").is_some());

        let stats = cache.stats();
        assert_eq!(stats.total_entries, 2);
        assert_eq!(stats.expired_entries, 1);
        assert_eq!(stats.valid_entries, 1);
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert!((stats.hit_rate() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_default_ttl() {
        let cache: TimedCache<String, u32> = TimedCache::new();
        assert_eq!(cache.ttl(), Duration::minutes(30));
    }

    #[test]
    fn test_config_validation() {
        assert!(CacheConfig::default().validate().is_ok());
        assert!(matches!(
            CacheConfig::with_ttl_minutes(0).validate(),
            Err(FanhubError::ConfigError(_))
        ));
        assert!(CacheConfig::with_ttl_minutes(u64::MAX).validate().is_err());
        assert!(TimedCache::<String, u32>::with_config(CacheConfig::with_ttl_minutes(0)).is_err());
    }

    #[test]
    fn test_fingerprint_keys() {
        use crate::Fingerprint;

        let clock = ManualClock::new(ten_am());
        let cache: TimedCache<Fingerprint, u32> =
            TimedCache::with_clock(CacheConfig::default(), Arc::new(clock)).unwrap();
        let key = Fingerprint::from_parts(["team", "lol"]).unwrap();

        cache.set(key.clone(), 7);
        assert_eq!(cache.get(&key), Some(7));
        assert_eq!(cache.get("team_lol"), Some(7));
    }
}
