//! TTL cache over a name → JSON value map

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde_json::Value;
use tracing::debug;

use crate::clock::{Clock, SystemClock};

/// Default entry lifetime: 5 minutes.
pub const DEFAULT_TTL: Duration = Duration::from_millis(300_000);

/// A cached value and its absolute expiry.
#[derive(Debug, Clone)]
struct CacheEntry {
    value: Value,
    expires_at: DateTime<Utc>,
}

/// In-memory cache mapping document names to JSON values.
///
/// Entries are valid only while the current time is before their expiry.
/// Staleness is lazy: an expired entry stays in the map (it still counts
/// toward [`len`](Self::len)) and simply reads as a miss until a newer value
/// overwrites it or it is removed. There is no size limit and no eviction.
pub struct DocumentCache {
    entries: RwLock<HashMap<String, CacheEntry>>,
    ttl: chrono::Duration,
    clock: Arc<dyn Clock>,
}

impl DocumentCache {
    /// Create a cache with the default 5-minute TTL and the system clock.
    pub fn new() -> Self {
        Self::with_ttl(DEFAULT_TTL)
    }

    /// Create a cache with a custom TTL.
    pub fn with_ttl(ttl: Duration) -> Self {
        Self::with_ttl_and_clock(ttl, Arc::new(SystemClock))
    }

    /// Create a cache with a custom TTL and time source.
    pub fn with_ttl_and_clock(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl: chrono::Duration::milliseconds(ttl.as_millis() as i64),
            clock,
        }
    }

    /// Return the cached value for `name` if a fresh entry exists.
    pub fn get(&self, name: &str) -> Option<Value> {
        let now = self.clock.now();
        let entries = self.entries.read();
        entries.get(name).and_then(|entry| {
            if now < entry.expires_at {
                Some(entry.value.clone())
            } else {
                None
            }
        })
    }

    /// Store `value` under `name`, resetting its expiry to now + TTL.
    pub fn set(&self, name: &str, value: Value) {
        let expires_at = self.clock.now() + self.ttl;
        debug!(document = name, expires_at = %expires_at, "caching document");
        self.entries.write().insert(
            name.to_string(),
            CacheEntry { value, expires_at },
        );
    }

    /// Drop the entry for `name`, value and expiry both.
    pub fn remove(&self, name: &str) {
        self.entries.write().remove(name);
    }

    /// Drop every entry.
    pub fn clear(&self) {
        debug!("clearing document cache");
        self.entries.write().clear();
    }

    /// Whether a fresh entry exists for `name`. Same check as [`get`](Self::get)
    /// without cloning the value.
    pub fn is_valid(&self, name: &str) -> bool {
        let now = self.clock.now();
        self.entries
            .read()
            .get(name)
            .map(|entry| now < entry.expires_at)
            .unwrap_or(false)
    }

    /// Number of stored entries, stale ones included.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Whether the cache holds no entries at all.
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl Default for DocumentCache {
    fn default() -> Self {
        Self::new()
    }
}
