//! Builder for the thread-safe LRU cache.
//!
//! Bundles the capacity with the optional eviction listener so both are
//! fixed before the cache is shared between threads.
//!
//! ## Example
//!
//! ```rust
//! use lrukit::LruCacheBuilder;
//!
//! let cache = LruCacheBuilder::new(100)
//!     .try_build::<u64, String>()
//!     .unwrap();
//! cache.insert(1, "hello".to_string());
//! assert_eq!(*cache.get(&1).unwrap(), "hello");
//! ```

use std::hash::Hash;
use std::sync::Arc;

use crate::error::ConfigError;
use crate::listener::{EvictionListener, FnListener};
use crate::policy::lru::ConcurrentLruCache;

/// Builder for [`ConcurrentLruCache`] instances.
pub struct LruCacheBuilder {
    capacity: usize,
}

impl LruCacheBuilder {
    /// Creates a new cache builder with the specified capacity.
    ///
    /// The capacity is validated by [`try_build`](Self::try_build), not here.
    pub fn new(capacity: usize) -> Self {
        Self { capacity }
    }

    /// Registers a closure as the eviction listener.
    ///
    /// The closure receives the evicted key and value, and runs on the
    /// thread whose `insert` triggered the eviction, while the cache's write
    /// lock is held.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::sync::Arc;
    /// use lrukit::LruCacheBuilder;
    ///
    /// let cache = LruCacheBuilder::new(1)
    ///     .eviction_listener(|key: &u64, value: Arc<u64>| {
    ///         println!("evicted {key} -> {value}");
    ///     })
    ///     .try_build()
    ///     .unwrap();
    /// cache.insert(1u64, 10u64);
    /// ```
    pub fn eviction_listener<K, V, F>(self, f: F) -> ListenerBuilder<K, V>
    where
        K: Clone + Eq + Hash + Send + Sync + 'static,
        V: Send + Sync + 'static,
        F: Fn(&K, Arc<V>) + Send + Sync + 'static,
    {
        ListenerBuilder {
            capacity: self.capacity,
            listener: Box::new(FnListener(f)),
        }
    }

    /// Builds the cache.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the configured capacity is zero.
    pub fn try_build<K, V>(self) -> Result<ConcurrentLruCache<K, V>, ConfigError>
    where
        K: Clone + Eq + Hash + Send + Sync + 'static,
        V: Send + Sync + 'static,
    {
        ConcurrentLruCache::try_new(self.capacity)
    }
}

/// Key/value-typed continuation of [`LruCacheBuilder`] once a listener is
/// attached.
pub struct ListenerBuilder<K, V> {
    capacity: usize,
    listener: Box<dyn EvictionListener<K, V>>,
}

impl<K, V> ListenerBuilder<K, V>
where
    K: Clone + Eq + Hash + Send + Sync + 'static,
    V: Send + Sync + 'static,
{
    /// Replaces the eviction listener; the last-set listener wins.
    pub fn eviction_listener<F>(mut self, f: F) -> Self
    where
        F: Fn(&K, Arc<V>) + Send + Sync + 'static,
    {
        self.listener = Box::new(FnListener(f));
        self
    }

    /// Builds the cache with the configured listener installed.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the configured capacity is zero.
    pub fn try_build(self) -> Result<ConcurrentLruCache<K, V>, ConfigError> {
        let cache = ConcurrentLruCache::try_new(self.capacity)?;
        cache.set_boxed_eviction_listener(self.listener);
        Ok(cache)
    }
}
