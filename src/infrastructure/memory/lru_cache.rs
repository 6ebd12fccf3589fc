//! In-Memory LRU Cache Implementation
//!
//! 同时受条目数和总成本约束；插入时按最近最少使用淘汰直到两个上限都满足。
//! 单个条目成本超过总上限时不缓存

use lru::LruCache;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::application::ports::MemoryCachePort;

struct Inner<V> {
    /// key -> (value, cost)
    entries: LruCache<String, (V, usize)>,
    total_cost: usize,
}

/// 内存 LRU 缓存
pub struct LruMemoryCache<V> {
    inner: Mutex<Inner<V>>,
    max_entries: usize,
    max_cost: usize,
}

impl<V> LruMemoryCache<V> {
    pub fn new(max_entries: usize, max_cost: usize) -> Self {
        Self {
            inner: Mutex::new(Inner {
                entries: LruCache::unbounded(),
                total_cost: 0,
            }),
            max_entries,
            max_cost,
        }
    }

    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    pub fn max_cost(&self) -> usize {
        self.max_cost
    }

    fn lock(&self) -> MutexGuard<'_, Inner<V>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<V> MemoryCachePort<V> for LruMemoryCache<V>
where
    V: Clone + Send + Sync,
{
    fn get(&self, key: &str) -> Option<V> {
        self.lock().entries.get(key).map(|(value, _)| value.clone())
    }

    fn put(&self, key: String, value: V, cost: usize) {
        let mut guard = self.lock();
        let inner = &mut *guard;

        if cost > self.max_cost {
            if let Some((_, old_cost)) = inner.entries.pop(&key) {
                inner.total_cost -= old_cost;
            }
            tracing::debug!(key = %key, cost, max_cost = self.max_cost, "Entry exceeds memory cache budget");
            return;
        }

        if let Some((_, old_cost)) = inner.entries.put(key, (value, cost)) {
            inner.total_cost -= old_cost;
        }
        inner.total_cost += cost;

        let mut evicted = 0usize;
        while inner.entries.len() > self.max_entries || inner.total_cost > self.max_cost {
            match inner.entries.pop_lru() {
                Some((_, (_, evicted_cost))) => {
                    inner.total_cost -= evicted_cost;
                    evicted += 1;
                }
                None => break,
            }
        }

        if evicted > 0 {
            tracing::debug!(
                evicted,
                entries = inner.entries.len(),
                total_cost = inner.total_cost,
                "Memory cache evicted entries"
            );
        }
    }

    fn remove(&self, key: &str) -> Option<V> {
        let mut guard = self.lock();
        let inner = &mut *guard;
        inner.entries.pop(key).map(|(value, cost)| {
            inner.total_cost -= cost;
            value
        })
    }

    fn clear(&self) {
        let mut guard = self.lock();
        guard.entries.clear();
        guard.total_cost = 0;
    }

    fn len(&self) -> usize {
        self.lock().entries.len()
    }

    fn total_cost(&self) -> usize {
        self.lock().total_cost
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_get_remove() {
        let cache = LruMemoryCache::new(10, 1024);
        cache.put("a".to_string(), 1u32, 10);

        assert_eq!(cache.get("a"), Some(1));
        assert_eq!(cache.total_cost(), 10);

        assert_eq!(cache.remove("a"), Some(1));
        assert_eq!(cache.get("a"), None);
        assert_eq!(cache.total_cost(), 0);
    }

    #[test]
    fn test_count_limit() {
        let cache = LruMemoryCache::new(3, usize::MAX);
        for i in 0..10 {
            cache.put(format!("k{}", i), i, 1);
        }
        assert_eq!(cache.len(), 3);
        assert!(cache.get("k9").is_some());
    }

    #[test]
    fn test_cost_limit() {
        let cache = LruMemoryCache::new(100, 100);
        for i in 0..10 {
            cache.put(format!("k{}", i), i, 30);
        }
        assert!(cache.total_cost() <= 100);
        assert_eq!(cache.len(), 3);
    }

    #[test]
    fn test_oversized_entry_not_retained() {
        let cache = LruMemoryCache::new(10, 100);
        cache.put("small".to_string(), 1, 10);
        cache.put("huge".to_string(), 2, 101);

        assert_eq!(cache.get("huge"), None);
        assert_eq!(cache.get("small"), Some(1));
        assert_eq!(cache.total_cost(), 10);
    }

    #[test]
    fn test_replace_adjusts_cost() {
        let cache = LruMemoryCache::new(10, 100);
        cache.put("a".to_string(), 1, 40);
        cache.put("a".to_string(), 2, 15);

        assert_eq!(cache.len(), 1);
        assert_eq!(cache.total_cost(), 15);
        assert_eq!(cache.get("a"), Some(2));
    }

    #[test]
    fn test_clear() {
        let cache = LruMemoryCache::new(10, 100);
        cache.put("a".to_string(), 1, 40);
        cache.put("b".to_string(), 2, 40);
        cache.clear();

        assert!(cache.is_empty());
        assert_eq!(cache.total_cost(), 0);
    }
}
