//! Lookup cache adapters.
//!
//! [`InMemoryLookupCache`] is the process-wide read-through store: construct
//! one at start-up and share it (`Arc`) between every HTTP lookup service.
//! Entries never change once written; an optional time-to-live evicts them
//! lazily on read. [`DisabledLookupCache`] always misses.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use dashmap::DashMap;
use mockable::{Clock, DefaultClock};
use serde_json::Value;
use tracing::debug;

use crate::domain::ports::{LookupCache, LookupCacheError, LookupCacheKey};

struct CachedResponse {
    value: Arc<Value>,
    stored_at: DateTime<Utc>,
}

/// Concurrent in-process cache of decoded lookup responses.
pub struct InMemoryLookupCache {
    entries: DashMap<LookupCacheKey, CachedResponse>,
    ttl: Option<TimeDelta>,
    clock: Arc<dyn Clock>,
}

impl InMemoryLookupCache {
    /// Cache whose entries live for the lifetime of the process.
    pub fn new() -> Self {
        Self::with_clock(None, Arc::new(DefaultClock))
    }

    /// Cache whose entries expire `ttl` after they were stored.
    pub fn with_ttl(ttl: Duration) -> Self {
        Self::with_clock(Some(ttl), Arc::new(DefaultClock))
    }

    /// Cache measuring entry age against `clock`.
    ///
    /// A `ttl` too large to represent is treated as no expiry.
    pub fn with_clock(ttl: Option<Duration>, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: DashMap::new(),
            ttl: ttl.and_then(|ttl| TimeDelta::from_std(ttl).ok()),
            clock,
        }
    }

    /// Number of stored entries, including expired ones not yet evicted.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn is_expired(&self, stored_at: DateTime<Utc>) -> bool {
        self.ttl
            .is_some_and(|ttl| self.clock.utc().signed_duration_since(stored_at) >= ttl)
    }
}

impl Default for InMemoryLookupCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LookupCache for InMemoryLookupCache {
    async fn get(&self, key: &LookupCacheKey) -> Result<Option<Arc<Value>>, LookupCacheError> {
        // Copy out before evicting: removing while a shard guard is held deadlocks.
        let cached = self
            .entries
            .get(key)
            .map(|entry| (Arc::clone(&entry.value), entry.stored_at));

        match cached {
            Some((value, stored_at)) if !self.is_expired(stored_at) => Ok(Some(value)),
            Some(_) => {
                self.entries
                    .remove_if(key, |_, entry| self.is_expired(entry.stored_at));
                debug!(key = %key, "evicted expired lookup cache entry");
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn put(&self, key: &LookupCacheKey, value: Arc<Value>) -> Result<(), LookupCacheError> {
        self.entries.insert(
            key.clone(),
            CachedResponse {
                value,
                stored_at: self.clock.utc(),
            },
        );
        Ok(())
    }
}

/// Cache that never stores anything, for deployments with caching disabled.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledLookupCache;

#[async_trait]
impl LookupCache for DisabledLookupCache {
    async fn get(&self, _key: &LookupCacheKey) -> Result<Option<Arc<Value>>, LookupCacheError> {
        Ok(None)
    }

    async fn put(&self, _key: &LookupCacheKey, _value: Arc<Value>) -> Result<(), LookupCacheError> {
        Ok(())
    }
}
