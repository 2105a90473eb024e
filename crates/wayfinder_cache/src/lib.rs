//! Read cache for site and page lookups.
//!
//! Strictly a read-through/invalidate-on-write layer: the relational store
//! stays the single source of truth, and the generation pipeline only ever
//! invalidates. Entries expire by TTL and evict least-recently-used when
//! the cache is full.

use serde_json::Value;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use uuid::Uuid;

/// Configuration for the site cache.
#[derive(Debug, Clone, derive_getters::Getters)]
pub struct SiteCacheConfig {
    /// Default entry time-to-live in seconds
    default_ttl: u64,
    /// Maximum number of entries before LRU eviction
    max_size: usize,
}

impl Default for SiteCacheConfig {
    fn default() -> Self {
        Self {
            default_ttl: 300,
            max_size: 1000,
        }
    }
}

impl SiteCacheConfig {
    /// Sets the default TTL in seconds.
    pub fn with_default_ttl(mut self, seconds: u64) -> Self {
        self.default_ttl = seconds;
        self
    }

    /// Sets the maximum entry count.
    pub fn with_max_size(mut self, max_size: usize) -> Self {
        self.max_size = max_size;
        self
    }
}

/// A cached read result.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    value: Value,
    inserted_at: Instant,
    ttl: Duration,
    last_access: u64,
}

impl CacheEntry {
    /// The cached value.
    pub fn value(&self) -> &Value {
        &self.value
    }

    fn is_expired(&self) -> bool {
        self.inserted_at.elapsed() >= self.ttl
    }
}

/// TTL + LRU cache for read-heavy site/page lookups.
///
/// Keys are `(site_id, resource, key)` triples, e.g.
/// `(site, "page", "home")` or `(site, "site", "settings")`, so a whole
/// site's entries can be dropped in one call when content changes.
#[derive(Debug)]
pub struct SiteCache {
    config: SiteCacheConfig,
    entries: HashMap<(Uuid, String, String), CacheEntry>,
    access_clock: u64,
}

impl SiteCache {
    /// Creates a cache with the given configuration.
    pub fn new(config: SiteCacheConfig) -> Self {
        Self {
            config,
            entries: HashMap::new(),
            access_clock: 0,
        }
    }

    /// Looks up a cached value, refreshing its LRU position.
    ///
    /// Expired entries are removed on access and report as a miss.
    pub fn get(&mut self, site_id: Uuid, resource: &str, key: &str) -> Option<&CacheEntry> {
        let cache_key = (site_id, resource.to_string(), key.to_string());

        if let Some(entry) = self.entries.get(&cache_key)
            && entry.is_expired()
        {
            tracing::debug!(%site_id, resource, key, "Evicting expired cache entry");
            self.entries.remove(&cache_key);
            return None;
        }

        self.access_clock += 1;
        let clock = self.access_clock;
        self.entries.get_mut(&cache_key).map(|entry| {
            entry.last_access = clock;
            &*entry
        })
    }

    /// Inserts a value, evicting the least-recently-used entry when full.
    ///
    /// `ttl_secs` overrides the configured default when given.
    pub fn insert(
        &mut self,
        site_id: Uuid,
        resource: &str,
        key: &str,
        value: Value,
        ttl_secs: Option<u64>,
    ) {
        let cache_key = (site_id, resource.to_string(), key.to_string());

        if !self.entries.contains_key(&cache_key) && self.entries.len() >= self.config.max_size {
            self.evict_lru();
        }

        self.access_clock += 1;
        self.entries.insert(
            cache_key,
            CacheEntry {
                value,
                inserted_at: Instant::now(),
                ttl: Duration::from_secs(ttl_secs.unwrap_or(self.config.default_ttl)),
                last_access: self.access_clock,
            },
        );
    }

    /// Drops one entry.
    pub fn invalidate(&mut self, site_id: Uuid, resource: &str, key: &str) -> bool {
        self.entries
            .remove(&(site_id, resource.to_string(), key.to_string()))
            .is_some()
    }

    /// Drops every entry belonging to a site.
    ///
    /// Called after content or structure mutations so readers never serve
    /// stale pages.
    pub fn invalidate_site(&mut self, site_id: Uuid) -> usize {
        let before = self.entries.len();
        self.entries.retain(|(id, _, _), _| *id != site_id);
        let removed = before - self.entries.len();
        if removed > 0 {
            tracing::debug!(%site_id, removed, "Invalidated site cache entries");
        }
        removed
    }

    /// Removes all expired entries, returning how many were dropped.
    pub fn cleanup_expired(&mut self) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired());
        before - self.entries.len()
    }

    /// Drops everything.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of cached entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn evict_lru(&mut self) {
        if let Some(key) = self
            .entries
            .iter()
            .min_by_key(|(_, entry)| entry.last_access)
            .map(|(key, _)| key.clone())
        {
            tracing::debug!(?key, "Evicting least-recently-used cache entry");
            self.entries.remove(&key);
        }
    }
}
