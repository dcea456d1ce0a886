use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};
use std::time::{Duration, Instant};
use tracing::debug;

#[derive(Debug, Clone)]
struct CacheEntry<V> {
    value: V,
    stored_at: Instant,
}

/// Keyed store whose entries expire a fixed `ttl` after they were written.
///
/// There is no size bound beyond expiry: every `set` sweeps expired entries, so the cache
/// holds at most the keys written within the last `ttl`. Entries are replaced wholesale
/// under the write lock, so concurrent writers to the same key never interleave and the
/// last `set` wins. Created once at service start and never persisted.
#[derive(Debug)]
pub struct TtlCache<V> {
    ttl: Duration,
    entries: RwLock<HashMap<String, CacheEntry<V>>>,
}

impl<V: Clone> TtlCache<V> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Returns the value if it was stored less than `ttl` ago.
    pub fn get(&self, key: &str) -> Option<V> {
        self.get_at(key, Instant::now())
    }

    pub fn set(&self, key: impl Into<String>, value: V) {
        self.set_at(key, value, Instant::now());
    }

    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub(crate) fn get_at(&self, key: &str, now: Instant) -> Option<V> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        match entries.get(key) {
            Some(entry) if self.is_fresh(entry, now) => Some(entry.value.clone()),
            Some(_) => {
                debug!(key, "cache entry expired");
                None
            }
            None => None,
        }
    }

    pub(crate) fn set_at(&self, key: impl Into<String>, value: V, stored_at: Instant) {
        let entry = CacheEntry { value, stored_at };
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        let before = entries.len();
        entries.retain(|_, kept| self.is_fresh(kept, stored_at));
        let swept = before - entries.len();
        if swept > 0 {
            debug!(swept, "dropped expired cache entries");
        }
        entries.insert(key.into(), entry);
    }

    fn is_fresh(&self, entry: &CacheEntry<V>, now: Instant) -> bool {
        now.saturating_duration_since(entry.stored_at) < self.ttl
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn set_then_get_returns_value() {
        let cache = TtlCache::new(Duration::from_secs(60));
        cache.set("districts_GUJARAT", vec!["SURAT".to_string()]);
        assert_eq!(
            cache.get("districts_GUJARAT"),
            Some(vec!["SURAT".to_string()])
        );
        assert_eq!(cache.get("districts_BIHAR"), None);
    }

    #[test]
    fn entry_expires_once_ttl_elapses() {
        let ttl = Duration::from_secs(30);
        let cache = TtlCache::new(ttl);
        let stored_at = Instant::now();
        cache.set_at("all_states", 7u32, stored_at);

        assert_eq!(cache.get_at("all_states", stored_at + Duration::from_secs(29)), Some(7));
        assert_eq!(cache.get_at("all_states", stored_at + ttl), None);
        assert_eq!(cache.get_at("all_states", stored_at + Duration::from_secs(90)), None);
    }

    #[test]
    fn expiry_is_observed_in_real_time() {
        let cache = TtlCache::new(Duration::from_millis(20));
        cache.set("short", 1u8);
        std::thread::sleep(Duration::from_millis(40));
        assert_eq!(cache.get("short"), None);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn writes_sweep_expired_entries() {
        let ttl = Duration::from_secs(30);
        let cache = TtlCache::new(ttl);
        let start = Instant::now();
        for index in 0..1_000u32 {
            cache.set_at(format!("nearest_{index}"), index, start);
        }
        cache.set_at("fresh", 1, start + Duration::from_secs(10));
        assert_eq!(cache.len(), 1_001);

        cache.set_at("later", 2, start + ttl + Duration::from_secs(1));

        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get_at("fresh", start + ttl), Some(1));
    }

    #[test]
    fn last_write_wins_and_replaces_whole_entry() {
        let cache = TtlCache::new(Duration::from_secs(60));
        cache.set("key", (1u32, "first"));
        cache.set("key", (2u32, "second"));
        assert_eq!(cache.get("key"), Some((2, "second")));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn concurrent_writers_never_corrupt_entries() {
        let cache = Arc::new(TtlCache::new(Duration::from_secs(60)));
        let handles: Vec<_> = (0..8u64)
            .map(|worker| {
                let cache = Arc::clone(&cache);
                std::thread::spawn(move || {
                    for round in 0..200u64 {
                        cache.set("shared", vec![worker; 16]);
                        if let Some(value) = cache.get("shared") {
                            assert!(value.iter().all(|item| *item == value[0]));
                        }
                        cache.set(format!("own_{worker}"), vec![round]);
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().expect("writer thread");
        }

        assert_eq!(cache.len(), 9);
        for worker in 0..8u64 {
            assert_eq!(cache.get(&format!("own_{worker}")), Some(vec![199]));
        }
    }
}
