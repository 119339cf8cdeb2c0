//! # Cache Trait Hierarchy
//!
//! This module defines the trait hierarchy for the cache, separating the
//! universal operations from recency-specific ones.
//!
//! ## Architecture
//!
//! ```text
//!   ┌─────────────────────────────────────────┐
//!   │            CoreCache<K, V>              │
//!   │                                         │
//!   │  insert(&mut, K, V) → Option<V>         │
//!   │  get(&mut, &K) → Option<&V>             │
//!   │  contains(&, &K) → bool                 │
//!   │  len(&) → usize                         │
//!   │  is_empty(&) → bool                     │
//!   │  capacity(&) → usize                    │
//!   │  clear(&mut)                            │
//!   └──────────────────┬──────────────────────┘
//!                      │
//!                      ▼
//!   ┌─────────────────────────────────────────┐
//!   │          MutableCache<K, V>             │
//!   │                                         │
//!   │  remove(&K) → Option<V>                 │
//!   │  remove_batch(&[K])                     │
//!   └──────────────────┬──────────────────────┘
//!                      │
//!                      ▼
//!   ┌─────────────────────────────────────────┐
//!   │          LruCacheTrait<K, V>            │
//!   │                                         │
//!   │  pop_lru() → (K, V)                     │
//!   │  peek_lru() → (&K, &V)                  │
//!   │  touch(&K) → bool                       │
//!   │  recency_rank(&K) → usize               │
//!   └─────────────────────────────────────────┘
//! ```
//!
//! ## Trait Summary
//!
//! | Trait             | Extends        | Purpose                            |
//! |-------------------|----------------|------------------------------------|
//! | `CoreCache`       | -              | Universal cache operations         |
//! | `MutableCache`    | `CoreCache`    | Adds arbitrary key removal         |
//! | `LruCacheTrait`   | `MutableCache` | LRU-specific with recency tracking |
//! | `ConcurrentCache` | `Send + Sync`  | Marker for thread-safe caches      |
//!
//! ## Thread Safety
//!
//! - [`LruCore`](crate::policy::lru::LruCore) is **NOT thread-safe**; wrap it
//!   or use [`ConcurrentLruCache`](crate::policy::lru::ConcurrentLruCache).
//! - Use the `ConcurrentCache` marker trait as a bound to require a
//!   thread-safe implementation.

/// Core cache operations that all caches support.
///
/// This trait defines the fundamental operations that make sense for any
/// bounded cache, regardless of eviction policy.
///
/// # Type Parameters
///
/// - `K`: Key type (implementations typically require `Eq + Hash`)
/// - `V`: Value type
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use lrukit::policy::lru::LruCore;
/// use lrukit::traits::CoreCache;
///
/// fn warm_cache<C: CoreCache<u64, Arc<String>>>(cache: &mut C, data: &[(u64, String)]) {
///     for (key, value) in data {
///         cache.insert(*key, Arc::new(value.clone()));
///     }
/// }
///
/// let mut cache = LruCore::try_new(100).unwrap();
/// warm_cache(&mut cache, &[(1, "one".to_string()), (2, "two".to_string())]);
/// assert_eq!(cache.len(), 2);
/// ```
pub trait CoreCache<K, V> {
    /// Inserts a key-value pair, returning the previous value if it existed.
    ///
    /// If the cache is at capacity and the key is new, the least recently
    /// used entry is evicted before the new entry is inserted.
    ///
    /// # Example
    ///
    /// ```
    /// use std::sync::Arc;
    /// use lrukit::policy::lru::LruCore;
    /// use lrukit::traits::CoreCache;
    ///
    /// let mut cache = LruCore::try_new(10).unwrap();
    ///
    /// // New key returns None
    /// assert_eq!(cache.insert(1, Arc::new("first")), None);
    ///
    /// // Existing key returns previous value
    /// assert_eq!(*cache.insert(1, Arc::new("second")).unwrap(), "first");
    /// ```
    fn insert(&mut self, key: K, value: V) -> Option<V>;

    /// Gets a reference to a value by key.
    ///
    /// Updates recency state: the entry becomes the most recently used. Use
    /// [`contains`](Self::contains) if you only need to check existence
    /// without affecting eviction order.
    ///
    /// # Example
    ///
    /// ```
    /// use std::sync::Arc;
    /// use lrukit::policy::lru::LruCore;
    /// use lrukit::traits::CoreCache;
    ///
    /// let mut cache = LruCore::try_new(10).unwrap();
    /// cache.insert(1, Arc::new("value"));
    ///
    /// assert_eq!(cache.get(&1).map(|v| **v), Some("value"));
    /// assert_eq!(cache.get(&99), None);
    /// ```
    fn get(&mut self, key: &K) -> Option<&V>;

    /// Checks if a key exists without updating access state.
    ///
    /// Unlike [`get`](Self::get), this does not affect eviction order.
    ///
    /// # Example
    ///
    /// ```
    /// use std::sync::Arc;
    /// use lrukit::policy::lru::LruCore;
    /// use lrukit::traits::CoreCache;
    ///
    /// let mut cache = LruCore::try_new(10).unwrap();
    /// cache.insert(1, Arc::new("value"));
    ///
    /// assert!(cache.contains(&1));
    /// assert!(!cache.contains(&99));
    /// ```
    fn contains(&self, key: &K) -> bool;

    /// Returns the current number of entries in the cache.
    fn len(&self) -> usize;

    /// Returns `true` if the cache contains no entries.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the maximum capacity of the cache.
    fn capacity(&self) -> usize;

    /// Removes all entries from the cache.
    ///
    /// Entries dropped by `clear` are not reported to the eviction listener.
    fn clear(&mut self);
}

/// Caches that support arbitrary key-based removal.
///
/// This trait extends [`CoreCache`] with the ability to remove entries by
/// key. Removal keeps the index and recency order consistent; the removed
/// entry is handed back to the caller rather than reported to the eviction
/// listener.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use lrukit::policy::lru::LruCore;
/// use lrukit::traits::{CoreCache, MutableCache};
///
/// fn invalidate_keys<C: MutableCache<u64, Arc<String>>>(cache: &mut C, keys: &[u64]) {
///     for key in keys {
///         cache.remove(key);
///     }
/// }
///
/// let mut cache = LruCore::try_new(100).unwrap();
/// cache.insert(1, Arc::new("one".to_string()));
/// cache.insert(2, Arc::new("two".to_string()));
///
/// invalidate_keys(&mut cache, &[1]);
/// assert!(!cache.contains(&1));
/// assert!(cache.contains(&2));
/// ```
pub trait MutableCache<K, V>: CoreCache<K, V> {
    /// Removes a specific key-value pair.
    ///
    /// Returns the removed value if the key existed, or `None` if it didn't.
    fn remove(&mut self, key: &K) -> Option<V>;

    /// Removes multiple keys.
    ///
    /// Returns a vector of `Option<V>` in the same order as the input keys.
    /// The default implementation loops over [`remove`](Self::remove).
    fn remove_batch(&mut self, keys: &[K]) -> Vec<Option<V>> {
        keys.iter().map(|k| self.remove(k)).collect()
    }
}

/// LRU-specific operations that respect access order.
///
/// This trait extends [`MutableCache`] with recency-based eviction and
/// access tracking. Entries are totally ordered by recency; the least
/// recently accessed entry is evicted first, so there is never a tie.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use lrukit::policy::lru::LruCore;
/// use lrukit::traits::{CoreCache, LruCacheTrait};
///
/// let mut cache: LruCore<u64, &str> = LruCore::try_new(3).unwrap();
/// cache.insert(1, Arc::new("first"));
/// cache.insert(2, Arc::new("second"));
/// cache.insert(3, Arc::new("third"));
///
/// // Access key 1 to make it MRU
/// cache.get(&1);
///
/// // Key 2 is now LRU
/// assert_eq!(cache.peek_lru().map(|(k, _)| *k), Some(2));
///
/// // Touch without retrieving the value
/// assert!(cache.touch(&2)); // now key 3 is LRU
///
/// let (key, _) = cache.pop_lru().unwrap();
/// assert_eq!(key, 3);
/// ```
pub trait LruCacheTrait<K, V>: MutableCache<K, V> {
    /// Removes and returns the least recently used entry.
    ///
    /// Returns `None` if the cache is empty.
    fn pop_lru(&mut self) -> Option<(K, V)>;

    /// Peeks at the LRU entry without removing it.
    ///
    /// Returns `None` if the cache is empty. Does not update access order.
    fn peek_lru(&self) -> Option<(&K, &V)>;

    /// Marks an entry as recently used without retrieving the value.
    ///
    /// Returns `true` if the key was found and touched, `false` otherwise.
    fn touch(&mut self, key: &K) -> bool;

    /// Gets the recency rank of a key (0 = most recent, higher = less recent).
    ///
    /// Returns `None` if the key is not found. O(n): walks the recency list.
    fn recency_rank(&self, key: &K) -> Option<usize>;
}

/// Marker trait for caches that are safe to use concurrently.
///
/// Implementors guarantee thread-safe operations. This trait extends
/// `Send + Sync` and can be used as a bound to require concurrent access.
///
/// # Example
///
/// ```
/// use lrukit::traits::ConcurrentCache;
///
/// fn use_from_threads<C: ConcurrentCache>(_cache: &C) {
///     // Safe to share between threads
/// }
/// ```
pub trait ConcurrentCache: Send + Sync {}

#[cfg(test)]
mod tests {
    use super::*;

    // Minimal implementation exercising the default methods.
    struct VecCache {
        data: Vec<(i32, String)>,
        capacity: usize,
    }

    impl CoreCache<i32, String> for VecCache {
        fn insert(&mut self, key: i32, value: String) -> Option<String> {
            if let Some((_, existing)) = self.data.iter_mut().find(|(k, _)| *k == key) {
                return Some(std::mem::replace(existing, value));
            }
            if self.data.len() >= self.capacity {
                self.data.remove(0);
            }
            self.data.push((key, value));
            None
        }

        fn get(&mut self, key: &i32) -> Option<&String> {
            self.data.iter().find(|(k, _)| k == key).map(|(_, v)| v)
        }

        fn contains(&self, key: &i32) -> bool {
            self.data.iter().any(|(k, _)| k == key)
        }

        fn len(&self) -> usize {
            self.data.len()
        }

        fn capacity(&self) -> usize {
            self.capacity
        }

        fn clear(&mut self) {
            self.data.clear();
        }
    }

    impl MutableCache<i32, String> for VecCache {
        fn remove(&mut self, key: &i32) -> Option<String> {
            let pos = self.data.iter().position(|(k, _)| k == key)?;
            Some(self.data.remove(pos).1)
        }
    }

    #[test]
    fn insert_returns_previous_value() {
        let mut cache = VecCache {
            data: Vec::new(),
            capacity: 2,
        };

        assert_eq!(cache.insert(1, "first".to_string()), None);
        assert_eq!(
            cache.insert(1, "second".to_string()),
            Some("first".to_string())
        );
        assert_eq!(cache.get(&1), Some(&"second".to_string()));
    }

    #[test]
    fn is_empty_default_tracks_len() {
        let mut cache = VecCache {
            data: Vec::new(),
            capacity: 2,
        };
        assert!(cache.is_empty());
        cache.insert(1, "one".to_string());
        assert!(!cache.is_empty());
    }

    #[test]
    fn remove_batch_default_preserves_order() {
        let mut cache = VecCache {
            data: Vec::new(),
            capacity: 4,
        };
        cache.insert(1, "one".to_string());
        cache.insert(2, "two".to_string());
        cache.insert(3, "three".to_string());

        let removed = cache.remove_batch(&[1, 99, 3]);
        assert_eq!(
            removed,
            vec![Some("one".to_string()), None, Some("three".to_string())]
        );
        assert_eq!(cache.len(), 1);
    }
}
