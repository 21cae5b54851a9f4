use crate::thumbnail::detect::detect;
use crate::thumbnail::fetchers;
use crate::thumbnail::types::{CacheStats, ThumbnailResult};
use crate::transport::HttpTransport;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::time::Instant;

/// How long a resolved thumbnail is served from memory.
pub const CACHE_TTL: Duration = Duration::from_secs(24 * 60 * 60);

struct CacheEntry {
    result: ThumbnailResult,
    timestamp: Instant,
}

impl CacheEntry {
    fn is_expired(&self, now: Instant) -> bool {
        now.duration_since(self.timestamp) >= CACHE_TTL
    }
}

/// In-memory TTL cache in front of the platform fetchers.
///
/// Keys are the input URLs exactly as given. Only successful resolutions are
/// stored. Concurrent `resolve` calls for the same missing key share a single
/// fetch: the first caller fetches, the others wait and read its entry.
pub struct ThumbnailCache {
    transport: Arc<dyn HttpTransport>,
    entries: Mutex<HashMap<String, CacheEntry>>,
    inflight: Mutex<HashMap<String, Arc<tokio::sync::Mutex<()>>>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl ThumbnailCache {
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        ThumbnailCache {
            transport,
            entries: Mutex::new(HashMap::new()),
            inflight: Mutex::new(HashMap::new()),
        }
    }

    pub async fn resolve(&self, url: &str) -> Option<ThumbnailResult> {
        if let Some(hit) = self.lookup(url) {
            return Some(hit);
        }

        let Some(platform) = detect(url) else {
            log::debug!("unrecognized platform: {url}");
            return None;
        };

        let gate = self.gate(url);
        let _permit = gate.gate.lock().await;

        // filled by a concurrent call while we waited
        if let Some(hit) = self.lookup(url) {
            return Some(hit);
        }

        let result = fetchers::fetch_thumbnail(platform, url, self.transport.as_ref()).await;

        if let Some(ref result) = result {
            lock(&self.entries).insert(
                url.to_string(),
                CacheEntry {
                    result: result.clone(),
                    timestamp: Instant::now(),
                },
            );
        }

        result
    }

    pub fn clear(&self) {
        lock(&self.entries).clear();
    }

    pub fn stats(&self) -> CacheStats {
        let entries = lock(&self.entries);
        CacheStats {
            size: entries.len(),
            keys: entries.keys().cloned().collect(),
        }
    }

    /// Drop every entry at or past the TTL. Returns how many were removed.
    pub fn prune_expired(&self) -> usize {
        let now = Instant::now();
        let mut entries = lock(&self.entries);

        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired(now));
        let removed = before - entries.len();

        if removed > 0 {
            log::debug!("pruned {removed} expired thumbnails");
        }
        removed
    }

    /// Fresh hit stamped `cached`. An expired entry is removed on sight.
    fn lookup(&self, url: &str) -> Option<ThumbnailResult> {
        let mut entries = lock(&self.entries);
        let entry = entries.get(url)?;

        if entry.is_expired(Instant::now()) {
            entries.remove(url);
            return None;
        }

        Some(entry.result.as_cached())
    }

    fn gate(&self, url: &str) -> InflightGate<'_> {
        let gate = lock(&self.inflight)
            .entry(url.to_string())
            .or_default()
            .clone();

        InflightGate {
            cache: self,
            url: url.to_string(),
            gate,
        }
    }
}

/// Shared per-key lock. Unregistered by whichever holder drops it last,
/// including callers whose `resolve` future was cancelled.
struct InflightGate<'a> {
    cache: &'a ThumbnailCache,
    url: String,
    gate: Arc<tokio::sync::Mutex<()>>,
}

impl Drop for InflightGate<'_> {
    fn drop(&mut self) {
        let mut inflight = lock(&self.cache.inflight);

        // new clones are only handed out under this lock, so a count of two
        // (the map and us) means nobody else is queued on this key
        let last = inflight
            .get(&self.url)
            .is_some_and(|g| Arc::ptr_eq(g, &self.gate) && Arc::strong_count(g) == 2);
        if last {
            inflight.remove(&self.url);
        }
    }
}
