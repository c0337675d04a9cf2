//! Bounded least-recently-used memoization for recursive evaluators.

use std::collections::BTreeMap;
use std::fmt;
use std::hash::Hash;

use numan_core::config::CacheConfig;
use parking_lot::Mutex;
use rustc_hash::FxHashMap;

/// A per-instance LRU cache behind a lock.
///
/// Values are pure functions of their keys, so a miss only costs
/// recomputation. The lock is held only for the duration of a single lookup
/// or insertion, never while a value is being computed.
pub struct MemoCache<K, V> {
    capacity: usize,
    entries: Mutex<Entries<K, V>>,
}

struct Entries<K, V> {
    map: FxHashMap<K, (V, u64)>,
    /// Last-use stamp -> key, oldest first.
    order: BTreeMap<u64, K>,
    clock: u64,
}

impl<K, V> Entries<K, V> {
    fn new() -> Self {
        Self {
            map: FxHashMap::default(),
            order: BTreeMap::new(),
            clock: 0,
        }
    }
}

impl<K: Eq + Hash + Clone, V: Clone> MemoCache<K, V> {
    pub fn new(config: CacheConfig) -> Self {
        Self {
            capacity: config.capacity,
            entries: Mutex::new(Entries::new()),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        *self.entries.lock() = Entries::new();
    }

    pub fn get(&self, key: &K) -> Option<V> {
        if self.capacity == 0 {
            return None;
        }
        let mut guard = self.entries.lock();
        let entries = &mut *guard;
        entries.clock += 1;
        let (value, stamp) = entries.map.get_mut(key)?;
        entries.order.remove(&*stamp);
        *stamp = entries.clock;
        entries.order.insert(entries.clock, key.clone());
        Some(value.clone())
    }

    pub fn insert(&self, key: K, value: V) {
        if self.capacity == 0 {
            return;
        }
        let mut guard = self.entries.lock();
        let entries = &mut *guard;
        entries.clock += 1;
        let stamp = entries.clock;
        if let Some((_, old)) = entries.map.insert(key.clone(), (value, stamp)) {
            entries.order.remove(&old);
        }
        entries.order.insert(stamp, key);

        while entries.map.len() > self.capacity {
            match entries.order.pop_first() {
                Some((_, oldest)) => {
                    entries.map.remove(&oldest);
                    log::trace!("memo cache at capacity {}, evicted oldest entry", self.capacity);
                }
                None => break,
            }
        }
    }

    /// Return the cached value for `key`, computing and storing it on a miss.
    pub fn get_or_insert_with(&self, key: K, compute: impl FnOnce() -> V) -> V {
        if let Some(hit) = self.get(&key) {
            return hit;
        }
        let value = compute();
        self.insert(key, value.clone());
        value
    }
}

impl<K: Eq + Hash + Clone, V: Clone> Default for MemoCache<K, V> {
    fn default() -> Self {
        Self::new(CacheConfig::default())
    }
}

/// Cloning yields an empty cache with the same capacity.
impl<K: Eq + Hash + Clone, V: Clone> Clone for MemoCache<K, V> {
    fn clone(&self) -> Self {
        Self::new(CacheConfig::new(self.capacity))
    }
}

impl<K, V> fmt::Debug for MemoCache<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoCache")
            .field("capacity", &self.capacity)
            .field("len", &self.entries.lock().map.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_after_insert() {
        let cache = MemoCache::new(CacheConfig::new(4));
        cache.insert(1u32, "one");
        assert_eq!(cache.get(&1), Some("one"));
        assert_eq!(cache.get(&2), None);
    }

    #[test]
    fn test_evicts_least_recently_used() {
        let cache = MemoCache::new(CacheConfig::new(2));
        cache.insert(1u32, 10);
        cache.insert(2, 20);
        // touch 1 so that 2 becomes the oldest
        assert_eq!(cache.get(&1), Some(10));
        cache.insert(3, 30);
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get(&2), None);
        assert_eq!(cache.get(&1), Some(10));
        assert_eq!(cache.get(&3), Some(30));
    }

    #[test]
    fn test_reinsert_does_not_grow() {
        let cache = MemoCache::new(CacheConfig::new(2));
        cache.insert(1u32, 1);
        cache.insert(1, 2);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get(&1), Some(2));
    }

    #[test]
    fn test_disabled_cache_stores_nothing() {
        let cache = MemoCache::new(CacheConfig::disabled());
        let mut calls = 0;
        for _ in 0..3 {
            let v = cache.get_or_insert_with(7u32, || {
                calls += 1;
                49
            });
            assert_eq!(v, 49);
        }
        assert_eq!(calls, 3);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_clone_is_empty() {
        let cache = MemoCache::new(CacheConfig::new(3));
        cache.insert(1u32, 1);
        let copy = cache.clone();
        assert!(copy.is_empty());
        assert_eq!(copy.capacity(), 3);
    }
}
