//
//  marketplace-sdk
//  cache/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Response Memoization
//!
//! A small decorator for read-mostly endpoints. [`Memoized`] looks a key up
//! in a [`Cache`], and on a miss runs the wrapped operation and stores its
//! result for a TTL. Values are stored as JSON so any cache backend that can
//! hold a [`serde_json::Value`] works.
//!
//! Errors are never cached.
//!
//! ```rust
//! use std::sync::Arc;
//! use std::time::Duration;
//! use marketplace_sdk::cache::{Memoized, MemoryCache};
//!
//! # tokio_test::block_on(async {
//! let memo = Memoized::new(Arc::new(MemoryCache::new()));
//! let first: u32 = memo.get_or_fetch("answer", Duration::from_secs(60), || async { Ok(42) }).await?;
//! let second: u32 = memo.get_or_fetch("answer", Duration::from_secs(60), || async { Ok(0) }).await?;
//! assert_eq!((first, second), (42, 42));
//! # Ok::<(), marketplace_sdk::api::ApiError>(())
//! # }).unwrap();
//! ```

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::api::ApiResult;

/// Key/value storage with per-entry expiry.
pub trait Cache: Send + Sync {
    /// Returns the live value for `key`, if any.
    fn get(&self, key: &str) -> Option<Value>;

    /// Stores `value` under `key` for `ttl`.
    fn set(&self, key: &str, value: Value, ttl: Duration);
}

/// Process-local [`Cache`].
///
/// Expired entries are evicted when read and swept on every write. A TTL too
/// large to represent as an [`Instant`] never expires.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<String, (Option<Instant>, Value)>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries, expired ones included.
    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Cache for MemoryCache {
    fn get(&self, key: &str) -> Option<Value> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        match entries.get(key) {
            Some((expires_at, value)) if is_live(*expires_at, Instant::now()) => {
                Some(value.clone())
            }
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    fn set(&self, key: &str, value: Value, ttl: Duration) {
        let now = Instant::now();
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.retain(|_, (expires_at, _)| is_live(*expires_at, now));
        entries.insert(key.to_string(), (now.checked_add(ttl), value));
    }
}

fn is_live(expires_at: Option<Instant>, now: Instant) -> bool {
    expires_at.map_or(true, |at| now < at)
}

/// Memoizing wrapper around a [`Cache`].
#[derive(Clone)]
pub struct Memoized {
    cache: Arc<dyn Cache>,
}

impl Memoized {
    pub fn new(cache: Arc<dyn Cache>) -> Self {
        Self { cache }
    }

    /// Returns the cached value for `key`, or runs `fetch` and caches its
    /// result for `ttl`.
    ///
    /// A cached value that no longer decodes as `T` counts as a miss.
    pub async fn get_or_fetch<T, F, Fut>(&self, key: &str, ttl: Duration, fetch: F) -> ApiResult<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = ApiResult<T>>,
    {
        if let Some(cached) = self.cache.get(key) {
            match serde_json::from_value(cached) {
                Ok(value) => {
                    tracing::debug!("Cache hit for {}", key);
                    return Ok(value);
                }
                Err(e) => tracing::debug!("Discarding undecodable cache entry {}: {}", key, e),
            }
        }

        let value = fetch().await?;
        match serde_json::to_value(&value) {
            Ok(json) => self.cache.set(key, json, ttl),
            Err(e) => tracing::warn!("Not caching {}: {}", key, e),
        }
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_memory_cache_expiry() {
        let cache = MemoryCache::new();
        cache.set("live", Value::from(1), Duration::from_secs(60));
        cache.set("dead", Value::from(2), Duration::ZERO);

        assert_eq!(cache.get("live"), Some(Value::from(1)));
        assert_eq!(cache.get("dead"), None);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_unbounded_ttl_never_expires() {
        let cache = MemoryCache::new();
        cache.set("forever", Value::from(1), Duration::MAX);

        assert_eq!(cache.get("forever"), Some(Value::from(1)));
    }

    #[test]
    fn test_write_sweeps_expired_entries() {
        let cache = MemoryCache::new();
        cache.set("banners.category.1.desktop", Value::from(1), Duration::ZERO);
        assert_eq!(cache.len(), 1);

        cache.set("banners.home.desktop", Value::from(3), Duration::from_secs(60));

        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get("banners.home.desktop"), Some(Value::from(3)));
    }

    #[test]
    fn test_fetch_runs_once_per_key() {
        let memo = Memoized::new(Arc::new(MemoryCache::new()));
        let calls = AtomicUsize::new(0);

        for _ in 0..3 {
            let value: String = tokio_test::block_on(memo.get_or_fetch(
                "banners.home.desktop",
                Duration::from_secs(60),
                || async {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok("banner".to_string())
                },
            ))
            .unwrap();
            assert_eq!(value, "banner");
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_errors_are_not_cached() {
        let cache = Arc::new(MemoryCache::new());
        let memo = Memoized::new(cache.clone());

        let result: ApiResult<u32> = tokio_test::block_on(memo.get_or_fetch(
            "k",
            Duration::from_secs(60),
            || async { Err(ApiError::AuthenticationRequired(None)) },
        ));

        assert!(result.is_err());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_undecodable_entry_is_a_miss() {
        let cache = Arc::new(MemoryCache::new());
        cache.set("k", Value::from("not a number"), Duration::from_secs(60));
        let memo = Memoized::new(cache);

        let value: u32 = tokio_test::block_on(memo.get_or_fetch(
            "k",
            Duration::from_secs(60),
            || async { Ok(7) },
        ))
        .unwrap();

        assert_eq!(value, 7);
    }
}
