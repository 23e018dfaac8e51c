/// Process-local TTL cache for classified search results
use super::Classification;
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::Instant;
use tracing::{debug, info};

/// Cached result for one team/limit pair
#[derive(Debug, Clone)]
struct CacheEntry {
    stored_at: Instant,
    value: Classification,
}

/// Maps `"{team_name}::{limit}"` to the last classified fetch.
///
/// Entries are replaced wholesale and never swept; stale entries simply sit
/// until overwritten. There is no single-flight: two concurrent misses for
/// the same key both fetch.
#[derive(Debug)]
pub struct SearchCache {
    entries: RwLock<HashMap<String, CacheEntry>>,
    ttl: Duration,
}

/// Cache statistics
#[derive(Debug, Default, Clone, PartialEq, Eq, serde::Serialize)]
pub struct CacheStats {
    pub total_entries: usize,
    pub live_entries: usize,
    pub stale_entries: usize,
    pub ttl_seconds: u64,
}

impl SearchCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    /// Generate cache key from team name and result limit
    pub fn key(team_name: &str, limit: usize) -> String {
        format!("{}::{}", team_name, limit)
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    fn is_live(&self, entry: &CacheEntry, now: Instant) -> bool {
        now.duration_since(entry.stored_at) < self.ttl
    }

    /// Load a cached result if still within the TTL
    pub async fn get(&self, key: &str) -> Option<Classification> {
        let entries = self.entries.read().await;
        let entry = entries.get(key)?;

        if self.is_live(entry, Instant::now()) {
            debug!("Cache hit: {} ({} videos)", key, entry.value.len());
            Some(entry.value.clone())
        } else {
            debug!("Cache expired for key: {}", key);
            None
        }
    }

    /// Store a result, replacing whatever was there. A zero TTL stores nothing.
    pub async fn insert(&self, key: &str, value: Classification) {
        if self.ttl.is_zero() {
            return;
        }
        let entry = CacheEntry {
            stored_at: Instant::now(),
            value,
        };
        self.entries.write().await.insert(key.to_string(), entry);
        debug!("💾 Cached result for {}", key);
    }

    /// Force invalidate a specific cache entry by key
    pub async fn invalidate(&self, key: &str) -> bool {
        let removed = self.entries.write().await.remove(key).is_some();
        if removed {
            info!("🗑️ Force invalidated cache for key: {}", key);
        }
        removed
    }

    /// Get cache statistics
    pub async fn stats(&self) -> CacheStats {
        let entries = self.entries.read().await;
        let now = Instant::now();
        let live_entries = entries.values().filter(|e| self.is_live(e, now)).count();

        CacheStats {
            total_entries: entries.len(),
            live_entries,
            stale_entries: entries.len() - live_entries,
            ttl_seconds: self.ttl.as_secs(),
        }
    }
}
