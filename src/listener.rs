//! Eviction listener — a callback invoked when capacity pressure removes an
//! entry from the cache.
//!
//! The listener fires exactly once per evicted entry, synchronously, on the
//! thread performing the insert that triggered the eviction. It is **not**
//! invoked for value updates of an existing key, for entries handed back to
//! the caller (`remove`, `pop_lru`), or for `clear`.
//!
//! # Example
//! ```
//! use std::sync::{Arc, Mutex};
//! use lrukit::LruCacheBuilder;
//!
//! let log: Arc<Mutex<Vec<u64>>> = Arc::new(Mutex::new(Vec::new()));
//! let log2 = Arc::clone(&log);
//!
//! let cache: lrukit::ConcurrentLruCache<u64, u64> = LruCacheBuilder::new(2)
//!     .eviction_listener(move |key: &u64, _val| {
//!         log2.lock().unwrap().push(*key);
//!     })
//!     .try_build()
//!     .unwrap();
//!
//! cache.insert(1, 10);
//! cache.insert(2, 20);
//! cache.insert(3, 30); // capacity eviction: key 1
//! assert_eq!(*log.lock().unwrap(), vec![1]);
//! ```

use std::sync::Arc;

// ---------------------------------------------------------------------------
// EvictionListener trait
// ---------------------------------------------------------------------------

/// A callback invoked each time an entry is evicted by capacity pressure.
///
/// Implementations must be `Send + Sync + 'static` so the listener can live
/// inside the thread-safe cache wrapper.
///
/// The callback receives:
/// - a reference to the evicted key,
/// - the evicted value (`Arc<V>`, the cache's last reference to it).
///
/// The entry is fully removed from the index and the recency order before
/// the callback runs. **Do not call back into the cache from inside the
/// listener** when using [`ConcurrentLruCache`] — it runs while the cache's
/// write lock is held, and re-entering the cache would deadlock.
///
/// [`ConcurrentLruCache`]: crate::policy::lru::ConcurrentLruCache
pub trait EvictionListener<K, V>: Send + Sync + 'static {
    fn on_evict(&self, key: &K, value: Arc<V>);
}

/// An [`EvictionListener`] backed by a closure.
///
/// Created directly or via
/// [`LruCacheBuilder::eviction_listener`](crate::builder::LruCacheBuilder::eviction_listener).
pub struct FnListener<F>(pub F);

impl<K, V, F> EvictionListener<K, V> for FnListener<F>
where
    F: Fn(&K, Arc<V>) + Send + Sync + 'static,
{
    fn on_evict(&self, key: &K, value: Arc<V>) {
        (self.0)(key, value)
    }
}
