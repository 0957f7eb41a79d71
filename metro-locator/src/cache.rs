//! Disk-backed expiring cache.
//!
//! Reference data (station lists, operating hours, geocoded addresses)
//! changes slowly, so each lookup is memoised in a JSON file that survives
//! process restarts. A store file holds one entry per key:
//!
//! ```json
//! { "<key>": { "computed_at": 1723267500, "value": ... } }
//! ```
//!
//! The cache never fails its caller. A missing, unreadable or malformed
//! store is treated as empty, and a failed write is logged and ignored.

use std::collections::BTreeMap;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Key used for operations that take no arguments.
pub const GLOBAL_KEY: &str = "";

/// Errors writing a store. Only ever logged.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("cache I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to serialize cache: {0}")]
    Json(#[from] serde_json::Error),

    #[error("system time before unix epoch")]
    Clock,
}

/// One memoised value.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CachedEntry<V> {
    /// Unix timestamp (seconds) when the value was computed.
    computed_at: u64,
    value: V,
}

/// Configuration for one cached operation.
#[derive(Debug, Clone)]
pub struct CacheStoreConfig {
    /// Path to the store file.
    pub path: PathBuf,
    /// How long a computed value stays valid.
    pub ttl: Duration,
}

impl CacheStoreConfig {
    pub fn new(path: impl Into<PathBuf>, ttl: Duration) -> Self {
        Self {
            path: path.into(),
            ttl,
        }
    }

    /// Set a custom TTL.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }
}

/// Time-boxed memoisation of a value-producing operation.
#[derive(Debug, Clone)]
pub struct ExpiringCache {
    config: CacheStoreConfig,
}

impl ExpiringCache {
    pub fn new(config: CacheStoreConfig) -> Self {
        Self { config }
    }

    /// Return the live value for `key`, or compute, persist and return a
    /// fresh one.
    ///
    /// Errors from `compute` are returned unchanged and nothing is written.
    pub async fn get_or_compute<V, E, F, Fut>(&self, key: &str, compute: F) -> Result<V, E>
    where
        V: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        self.get_or_compute_at(key, SystemTime::now(), compute)
            .await
    }

    /// As [`get_or_compute`](Self::get_or_compute), with an explicit clock.
    pub async fn get_or_compute_at<V, E, F, Fut>(
        &self,
        key: &str,
        now: SystemTime,
        compute: F,
    ) -> Result<V, E>
    where
        V: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        if let Some(value) = self.lookup(key, now) {
            debug!(path = %self.config.path.display(), key, "cache hit");
            return Ok(value);
        }

        debug!(path = %self.config.path.display(), key, "cache miss");
        let value = compute().await?;

        if let Err(e) = self.store(key, &value, now) {
            warn!(
                path = %self.config.path.display(),
                key,
                error = %e,
                "failed to write cache entry"
            );
        }

        Ok(value)
    }

    /// Find a live entry for `key`.
    ///
    /// An entry whose value no longer deserializes as `V` is a miss.
    fn lookup<V: DeserializeOwned>(&self, key: &str, now: SystemTime) -> Option<V> {
        let now_secs = epoch_secs(now)?;
        let entry = self.load_entries().remove(key)?;

        let age_secs = now_secs.saturating_sub(entry.computed_at);
        if age_secs >= self.config.ttl.as_secs() {
            return None;
        }

        serde_json::from_value(entry.value).ok()
    }

    /// Overwrite the entry for `key`, keeping every other key in the store.
    fn store<V: Serialize>(&self, key: &str, value: &V, now: SystemTime) -> Result<(), CacheError> {
        let computed_at = epoch_secs(now).ok_or(CacheError::Clock)?;

        let mut entries = self.load_entries();
        entries.insert(
            key.to_string(),
            CachedEntry {
                computed_at,
                value: serde_json::to_value(value)?,
            },
        );

        // Create parent directories if needed
        if let Some(parent) = self.config.path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(&entries)?;
        std::fs::write(&self.config.path, json)?;

        Ok(())
    }

    fn load_entries(&self) -> BTreeMap<String, CachedEntry<serde_json::Value>> {
        std::fs::read_to_string(&self.config.path)
            .ok()
            .and_then(|contents| serde_json::from_str(&contents).ok())
            .unwrap_or_default()
    }

    /// Get the store file path.
    pub fn path(&self) -> &Path {
        &self.config.path
    }

    /// Get the cache TTL.
    pub fn ttl(&self) -> Duration {
        self.config.ttl
    }
}

fn epoch_secs(time: SystemTime) -> Option<u64> {
    time.duration_since(SystemTime::UNIX_EPOCH)
        .ok()
        .map(|d| d.as_secs())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::Infallible;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::tempdir;

    const HOUR: Duration = Duration::from_secs(60 * 60);

    fn cache_in(dir: &Path, ttl: Duration) -> ExpiringCache {
        ExpiringCache::new(CacheStoreConfig::new(dir.join("op.cache.json"), ttl))
    }

    async fn counted(
        cache: &ExpiringCache,
        key: &str,
        now: SystemTime,
        calls: &AtomicUsize,
        value: u32,
    ) -> u32 {
        cache
            .get_or_compute_at(key, now, move || async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok::<_, Infallible>(value)
            })
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn second_call_within_ttl_does_not_recompute() {
        let dir = tempdir().unwrap();
        let cache = cache_in(dir.path(), HOUR);
        let calls = AtomicUsize::new(0);
        let t0 = SystemTime::now();

        assert_eq!(counted(&cache, GLOBAL_KEY, t0, &calls, 1).await, 1);
        let later = t0 + Duration::from_secs(60);
        assert_eq!(counted(&cache, GLOBAL_KEY, later, &calls, 2).await, 1);

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn call_after_ttl_recomputes_and_overwrites() {
        let dir = tempdir().unwrap();
        let cache = cache_in(dir.path(), HOUR);
        let calls = AtomicUsize::new(0);
        let t0 = SystemTime::now();

        counted(&cache, GLOBAL_KEY, t0, &calls, 1).await;
        let expired = t0 + HOUR;
        assert_eq!(counted(&cache, GLOBAL_KEY, expired, &calls, 2).await, 2);
        assert_eq!(calls.load(Ordering::SeqCst), 2);

        // The new value is now the cached one
        let soon_after = expired + Duration::from_secs(1);
        assert_eq!(counted(&cache, GLOBAL_KEY, soon_after, &calls, 3).await, 2);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn entries_survive_a_new_cache_instance() {
        let dir = tempdir().unwrap();
        let calls = AtomicUsize::new(0);
        let now = SystemTime::now();

        counted(&cache_in(dir.path(), HOUR), "k", now, &calls, 7).await;
        let value = counted(&cache_in(dir.path(), HOUR), "k", now, &calls, 8).await;

        assert_eq!(value, 7);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn keys_are_independent() {
        let dir = tempdir().unwrap();
        let cache = cache_in(dir.path(), HOUR);
        let calls = AtomicUsize::new(0);
        let now = SystemTime::now();

        assert_eq!(counted(&cache, "1 Main St", now, &calls, 1).await, 1);
        assert_eq!(counted(&cache, "2 Main St", now, &calls, 2).await, 2);
        assert_eq!(counted(&cache, "1 Main St", now, &calls, 3).await, 1);
        assert_eq!(counted(&cache, "2 Main St", now, &calls, 4).await, 2);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn keys_are_not_normalised() {
        let dir = tempdir().unwrap();
        let cache = cache_in(dir.path(), HOUR);
        let calls = AtomicUsize::new(0);
        let now = SystemTime::now();

        counted(&cache, "1 Main St", now, &calls, 1).await;
        counted(&cache, "1 main st", now, &calls, 2).await;
        counted(&cache, "1 Main St ", now, &calls, 3).await;
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn zero_ttl_always_recomputes() {
        let dir = tempdir().unwrap();
        let cache = cache_in(dir.path(), Duration::ZERO);
        let calls = AtomicUsize::new(0);
        let now = SystemTime::now();

        counted(&cache, GLOBAL_KEY, now, &calls, 1).await;
        counted(&cache, GLOBAL_KEY, now, &calls, 2).await;
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn compute_error_propagates_and_is_not_cached() {
        let dir = tempdir().unwrap();
        let cache = cache_in(dir.path(), HOUR);
        let now = SystemTime::now();

        let result: Result<u32, String> = cache
            .get_or_compute_at(GLOBAL_KEY, now, || async { Err("upstream down".to_string()) })
            .await;
        assert_eq!(result.unwrap_err(), "upstream down");
        assert!(!cache.path().exists());

        let calls = AtomicUsize::new(0);
        assert_eq!(counted(&cache, GLOBAL_KEY, now, &calls, 5).await, 5);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn corrupt_store_is_a_miss() {
        let dir = tempdir().unwrap();
        let cache = cache_in(dir.path(), HOUR);
        std::fs::write(cache.path(), "{ not json").unwrap();

        let calls = AtomicUsize::new(0);
        let now = SystemTime::now();
        assert_eq!(counted(&cache, GLOBAL_KEY, now, &calls, 9).await, 9);
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        // And the store has been repaired
        assert_eq!(counted(&cache, GLOBAL_KEY, now, &calls, 10).await, 9);
    }

    #[tokio::test]
    async fn mistyped_entry_is_a_miss() {
        let dir = tempdir().unwrap();
        let cache = cache_in(dir.path(), HOUR);
        let now = SystemTime::now();

        cache
            .get_or_compute_at("k", now, || async { Ok::<_, Infallible>("text".to_string()) })
            .await
            .unwrap();

        let calls = AtomicUsize::new(0);
        assert_eq!(counted(&cache, "k", now, &calls, 3).await, 3);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn unwritable_store_still_returns_value() {
        let dir = tempdir().unwrap();
        // A directory where the store file should be makes the write fail
        let path = dir.path().join("blocked");
        std::fs::create_dir(&path).unwrap();
        let cache = ExpiringCache::new(CacheStoreConfig::new(&path, HOUR));

        let calls = AtomicUsize::new(0);
        let now = SystemTime::now();
        assert_eq!(counted(&cache, GLOBAL_KEY, now, &calls, 4).await, 4);
        assert_eq!(counted(&cache, GLOBAL_KEY, now, &calls, 5).await, 5);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn creates_parent_directories() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("dir").join("op.json");
        let cache = ExpiringCache::new(CacheStoreConfig::new(&path, HOUR));

        let calls = AtomicUsize::new(0);
        counted(&cache, GLOBAL_KEY, SystemTime::now(), &calls, 1).await;
        assert!(path.exists());
    }

    #[test]
    fn store_layout() {
        let dir = tempdir().unwrap();
        let cache = cache_in(dir.path(), HOUR);
        let now = SystemTime::UNIX_EPOCH + Duration::from_secs(1_723_267_500);

        cache.store("addr", &vec![1, 2], now).unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(cache.path()).unwrap()).unwrap();
        assert_eq!(
            raw,
            serde_json::json!({ "addr": { "computed_at": 1_723_267_500u64, "value": [1, 2] } })
        );
    }
}
