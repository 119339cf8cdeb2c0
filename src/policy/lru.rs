//! # Least Recently Used (LRU) Cache Implementation
//!
//! Fixed-capacity cache that evicts the least recently used entry on
//! overflow, with an optional eviction listener that fires exactly once per
//! evicted entry.
//!
//! ## Architecture
//!
//! ```text
//!   ┌────────────────────────────────────────────────────────────────────┐
//!   │                     ConcurrentLruCache<K, V>                       │
//!   │                                                                    │
//!   │   ┌──────────────────────────────────────────────────────────────┐ │
//!   │   │                  Arc<RwLock<LruCore<K, V>>>                  │ │
//!   │   └──────────────────────────────────────────────────────────────┘ │
//!   │                                │                                   │
//!   │                                ▼                                   │
//!   │   ┌──────────────────────────────────────────────────────────────┐ │
//!   │   │                       LruCore<K, V>                          │ │
//!   │   │                                                              │ │
//!   │   │   FxHashMap<K, NonNull<Node>>   (lookup index, O(1) find)    │ │
//!   │   │                │                                             │ │
//!   │   │                ▼                                             │ │
//!   │   │   head ──► [node] ◄──► [node] ◄──► [node] ◄── tail           │ │
//!   │   │            (MRU)                   (LRU)                     │ │
//!   │   │                                                              │ │
//!   │   │   listener: Option<Box<dyn EvictionListener<K, V>>>          │ │
//!   │   └──────────────────────────────────────────────────────────────┘ │
//!   └────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Both structures are always mutated together, so every key in the index
//! appears exactly once in the recency list and `len() <= capacity()` holds
//! after every operation.
//!
//! ## LRU Operations Flow
//!
//! ```text
//!   INSERT new key (cache full)
//!   ═══════════════════════════════════════════════════════════════════
//!
//!   Before:  head ──► [A] ◄──► [B] ◄──► [C] ◄── tail    (capacity = 3)
//!
//!   insert(D):
//!     1. Unlink [C] from tail and from the index
//!     2. Notify the eviction listener with (C, value_C)
//!     3. Attach [D] at head
//!
//!   After:   head ──► [D] ◄──► [A] ◄──► [B] ◄── tail
//!
//!   ═══════════════════════════════════════════════════════════════════
//!
//!   ACCESS existing key
//!   ═══════════════════════════════════════════════════════════════════
//!
//!   get(B): find [B] in the index, move it to head. O(1).
//!
//!   After:   head ──► [B] ◄──► [A] ◄──► [C] ◄── tail
//! ```
//!
//! ## Key Components
//!
//! | Component              | Description                                      |
//! |------------------------|--------------------------------------------------|
//! | `LruCore<K, V>`        | Single-threaded core: index + recency list       |
//! | `ConcurrentLruCache`   | Thread-safe wrapper with `parking_lot::RwLock`   |
//! | `Node<K, V>`           | Heap node: prev/next links + key + `Arc<V>`      |
//! | `EvictionListener`     | Hook fired once per capacity eviction            |
//!
//! ## Eviction Notification
//!
//! The listener fires only for capacity-triggered evictions, never for a
//! value update of an existing key. Entries handed back to the caller
//! (`remove`, `pop_lru`) and entries dropped by `clear` or by dropping the
//! cache are not reported. The evicted entry is removed from both structures
//! before the listener runs, and on the concurrent wrapper the listener runs
//! while the write lock is held, so no other caller can observe the evicted
//! entry as still present.
//!
//! ## Concurrency Model
//!
//! ```text
//!   get() / try_get() / insert() / remove() / touch()  →  WRITE lock
//!   peek() / contains() / len() / capacity()           →  READ lock
//!
//!   Note: even reads need the write lock if they update LRU order.
//! ```
//!
//! ## Safety
//!
//! Nodes are heap-allocated and tracked via `NonNull` pointers; the index
//! owns the only other handle to each node. All pointer manipulation is
//! confined to `detach`, `attach_front` and `pop_tail`, and the `Drop` impl
//! frees every node by draining the list.

use std::fmt;
use std::hash::Hash;
use std::ptr::NonNull;
use std::sync::Arc;

#[cfg(feature = "concurrency")]
use parking_lot::RwLock;
use rustc_hash::FxHashMap;

#[cfg(feature = "concurrency")]
use crate::error::NotFoundError;
use crate::error::{ConfigError, InvariantError};
use crate::listener::EvictionListener;
#[cfg(feature = "metrics")]
use crate::metrics::{LruMetrics, LruMetricsSnapshot};
#[cfg(feature = "concurrency")]
use crate::traits::ConcurrentCache;
use crate::traits::{CoreCache, LruCacheTrait, MutableCache};

/// Node in the LRU linked list.
///
/// Layout keeps the list links first for traversal; the key is needed for
/// index removal during eviction.
#[repr(C)]
struct Node<K, V> {
    prev: Option<NonNull<Node<K, V>>>,
    next: Option<NonNull<Node<K, V>>>,
    key: K,
    value: Arc<V>,
}

/// Single-threaded LRU cache core: hash index + raw-pointer linked list.
///
/// Keys are stored twice (index and node), so `K: Clone` is required; clones
/// happen once per insert. Values are `Arc<V>` so callers can keep a
/// reference past eviction without copying data.
///
/// All operations are O(1) except [`recency_rank`](LruCacheTrait::recency_rank)
/// and [`clear`](CoreCache::clear).
///
/// Thread safety is provided by the [`ConcurrentLruCache`] wrapper.
pub struct LruCore<K, V>
where
    K: Clone + Eq + Hash,
{
    map: FxHashMap<K, NonNull<Node<K, V>>>,
    head: Option<NonNull<Node<K, V>>>,
    tail: Option<NonNull<Node<K, V>>>,
    capacity: usize,
    listener: Option<Box<dyn EvictionListener<K, V>>>,
    #[cfg(feature = "metrics")]
    metrics: LruMetrics,
}

// SAFETY: LruCore can be sent between threads if K and the shared values can.
// The raw pointers only reference heap memory owned by the struct, and the
// listener box is Send + Sync by its trait bounds.
unsafe impl<K, V> Send for LruCore<K, V>
where
    K: Clone + Eq + Hash + Send,
    V: Send + Sync,
{
}

// SAFETY: &LruCore only exposes read paths; mutation requires &mut.
// Actual thread-safety is provided by the RwLock in ConcurrentLruCache.
unsafe impl<K, V> Sync for LruCore<K, V>
where
    K: Clone + Eq + Hash + Sync,
    V: Send + Sync,
{
}

impl<K, V> LruCore<K, V>
where
    K: Clone + Eq + Hash,
{
    /// Creates a new LRU cache core with the given capacity.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `capacity` is zero; the bound must be a
    /// strictly positive number of entries.
    ///
    /// # Example
    /// ```
    /// use lrukit::policy::lru::LruCore;
    ///
    /// let cache: LruCore<u32, String> = LruCore::try_new(100).unwrap();
    /// assert!(LruCore::<u32, String>::try_new(0).is_err());
    /// ```
    pub fn try_new(capacity: usize) -> Result<Self, ConfigError> {
        if capacity == 0 {
            return Err(ConfigError::new("capacity must be greater than zero"));
        }
        Ok(LruCore {
            map: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            head: None,
            tail: None,
            capacity,
            listener: None,
            #[cfg(feature = "metrics")]
            metrics: LruMetrics::default(),
        })
    }

    /// Registers the eviction listener; the last-set listener wins.
    ///
    /// The listener is invoked synchronously from [`insert`](CoreCache::insert)
    /// once per capacity-evicted entry, after the entry has been removed from
    /// both the index and the recency list.
    ///
    /// # Example
    /// ```
    /// use std::sync::{Arc, Mutex};
    /// use lrukit::listener::FnListener;
    /// use lrukit::policy::lru::LruCore;
    /// use lrukit::traits::CoreCache;
    ///
    /// let evicted: Arc<Mutex<Vec<(u32, u32)>>> = Arc::new(Mutex::new(Vec::new()));
    /// let sink = Arc::clone(&evicted);
    ///
    /// let mut cache: LruCore<u32, u32> = LruCore::try_new(1).unwrap();
    /// cache.set_eviction_listener(Box::new(FnListener(move |k: &u32, v: Arc<u32>| {
    ///     sink.lock().unwrap().push((*k, *v));
    /// })));
    ///
    /// cache.insert(1, Arc::new(10));
    /// cache.insert(2, Arc::new(20)); // evicts (1, 10)
    /// assert_eq!(*evicted.lock().unwrap(), vec![(1, 10)]);
    /// ```
    pub fn set_eviction_listener(&mut self, listener: Box<dyn EvictionListener<K, V>>) {
        self.listener = Some(listener);
    }

    /// Detach a node from the linked list without removing it from the map.
    #[inline(always)]
    fn detach(&mut self, node_ptr: NonNull<Node<K, V>>) {
        unsafe {
            let node = node_ptr.as_ref();
            let prev = node.prev;
            let next = node.next;

            match prev {
                Some(mut p) => p.as_mut().next = next,
                None => self.head = next,
            }

            match next {
                Some(mut n) => n.as_mut().prev = prev,
                None => self.tail = prev,
            }
        }
    }

    /// Attach a node at the front (MRU position).
    #[inline(always)]
    fn attach_front(&mut self, mut node_ptr: NonNull<Node<K, V>>) {
        unsafe {
            let node = node_ptr.as_mut();
            node.prev = None;
            node.next = self.head;

            match self.head {
                Some(mut h) => h.as_mut().prev = Some(node_ptr),
                None => self.tail = Some(node_ptr),
            }

            self.head = Some(node_ptr);
        }
    }

    /// Pop the tail node (LRU) and return it.
    #[inline(always)]
    fn pop_tail(&mut self) -> Option<Box<Node<K, V>>> {
        self.tail.map(|tail_ptr| unsafe {
            let node = Box::from_raw(tail_ptr.as_ptr());

            self.tail = node.prev;
            match self.tail {
                Some(mut t) => t.as_mut().next = None,
                None => self.head = None,
            }

            node
        })
    }

    /// Validate internal invariants (debug builds only).
    fn validate_invariants(&self) {
        #[cfg(debug_assertions)]
        {
            if self.map.is_empty() {
                debug_assert!(self.head.is_none());
                debug_assert!(self.tail.is_none());
                return;
            }

            // Count nodes from head
            let mut count = 0usize;
            let mut current = self.head;
            while let Some(ptr) = current {
                count += 1;
                unsafe {
                    let node = ptr.as_ref();
                    debug_assert!(self.map.contains_key(&node.key));
                    current = node.next;
                }
                if count > self.map.len() {
                    panic!("Cycle detected in list");
                }
            }

            debug_assert_eq!(count, self.map.len());
            debug_assert!(count <= self.capacity);
        }
    }

    /// Checks that the lookup index and the recency list agree.
    ///
    /// Verified invariants:
    /// - index size equals list length and never exceeds capacity;
    /// - every listed key is present in the index, with no duplicates;
    /// - the list is doubly linked consistently (back-links match).
    ///
    /// # Errors
    ///
    /// Returns [`InvariantError`] naming the first violated invariant.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        if self.map.len() > self.capacity {
            return Err(InvariantError::new(format!(
                "index holds {} entries, capacity is {}",
                self.map.len(),
                self.capacity
            )));
        }

        let mut count = 0usize;
        let mut prev: Option<NonNull<Node<K, V>>> = None;
        let mut current = self.head;
        while let Some(ptr) = current {
            count += 1;
            if count > self.map.len() {
                return Err(InvariantError::new("recency list longer than index"));
            }
            let node = unsafe { ptr.as_ref() };
            match self.map.get(&node.key) {
                Some(&indexed) if indexed == ptr => {}
                Some(_) => {
                    return Err(InvariantError::new("index points at a different node"));
                }
                None => {
                    return Err(InvariantError::new("listed key missing from index"));
                }
            }
            if node.prev != prev {
                return Err(InvariantError::new("broken back-link in recency list"));
            }
            prev = Some(ptr);
            current = node.next;
        }

        if prev != self.tail {
            return Err(InvariantError::new("tail does not terminate the list"));
        }
        if count != self.map.len() {
            return Err(InvariantError::new(format!(
                "recency list holds {} nodes, index holds {}",
                count,
                self.map.len()
            )));
        }
        Ok(())
    }
}

impl<K, V> CoreCache<K, Arc<V>> for LruCore<K, V>
where
    K: Clone + Eq + Hash + 'static,
    V: 'static,
{
    /// Inserts or updates an entry, evicting the LRU entry if needed.
    ///
    /// Updating an existing key replaces its value, promotes it to MRU and
    /// returns the previous value; no eviction happens and the listener is
    /// not invoked. Inserting a new key into a full cache first unlinks the
    /// tail entry from both structures, then notifies the listener exactly
    /// once with the evicted pair, then attaches the new entry at head.
    #[inline]
    fn insert(&mut self, key: K, value: Arc<V>) -> Option<Arc<V>> {
        #[cfg(feature = "metrics")]
        {
            self.metrics.insert_calls += 1;
        }

        // Existing key: update value, promote, no eviction.
        if let Some(&node_ptr) = self.map.get(&key) {
            #[cfg(feature = "metrics")]
            {
                self.metrics.insert_updates += 1;
            }

            let previous = unsafe {
                let node = &mut *node_ptr.as_ptr();
                std::mem::replace(&mut node.value, value)
            };

            self.detach(node_ptr);
            self.attach_front(node_ptr);

            self.validate_invariants();

            return Some(previous);
        }

        #[cfg(feature = "metrics")]
        {
            self.metrics.insert_new += 1;
        }

        // Full: unlink the tail from both structures before notifying, so
        // the listener can never observe the victim as still present.
        if self.map.len() >= self.capacity {
            if let Some(evicted) = self.pop_tail() {
                self.map.remove(&evicted.key);
                #[cfg(feature = "metrics")]
                {
                    self.metrics.evicted_entries += 1;
                }

                if let Some(listener) = &self.listener {
                    let Node {
                        key: evicted_key,
                        value: evicted_value,
                        ..
                    } = *evicted;
                    listener.on_evict(&evicted_key, evicted_value);
                    #[cfg(feature = "metrics")]
                    {
                        self.metrics.eviction_notifications += 1;
                    }
                }
            }
        }

        let node = Box::new(Node {
            prev: None,
            next: None,
            key: key.clone(),
            value,
        });
        let node_ptr = NonNull::new(Box::into_raw(node)).unwrap();

        self.map.insert(key, node_ptr);
        self.attach_front(node_ptr);

        self.validate_invariants();

        None
    }

    /// Lookup that promotes the entry to the MRU position on a hit.
    #[inline]
    fn get(&mut self, key: &K) -> Option<&Arc<V>> {
        let node_ptr = match self.map.get(key) {
            Some(&ptr) => ptr,
            None => {
                #[cfg(feature = "metrics")]
                {
                    self.metrics.get_calls += 1;
                    self.metrics.get_misses += 1;
                }
                return None;
            }
        };

        #[cfg(feature = "metrics")]
        {
            self.metrics.get_calls += 1;
            self.metrics.get_hits += 1;
        }

        self.detach(node_ptr);
        self.attach_front(node_ptr);

        self.validate_invariants();

        unsafe { Some(&(*node_ptr.as_ptr()).value) }
    }

    /// Pure presence check; never changes the recency order.
    #[inline]
    fn contains(&self, key: &K) -> bool {
        self.map.contains_key(key)
    }

    #[inline]
    fn len(&self) -> usize {
        self.map.len()
    }

    #[inline]
    fn capacity(&self) -> usize {
        self.capacity
    }

    fn clear(&mut self) {
        // Drop all nodes; cleared entries are not reported to the listener.
        while self.pop_tail().is_some() {}
        self.map.clear();

        self.validate_invariants();
    }
}

impl<K, V> LruCore<K, V>
where
    K: Clone + Eq + Hash,
{
    /// Read-only lookup without recency update.
    ///
    /// Returns an `Arc<V>` clone. Unlike [`get`](CoreCache::get), this does
    /// not move the entry to the MRU position.
    ///
    /// # Example
    ///
    /// ```
    /// use std::sync::Arc;
    /// use lrukit::policy::lru::LruCore;
    /// use lrukit::traits::CoreCache;
    ///
    /// let mut cache: LruCore<u32, String> = LruCore::try_new(2).unwrap();
    /// cache.insert(1, Arc::new("first".to_string()));
    /// cache.insert(2, Arc::new("second".to_string()));
    ///
    /// // Peek doesn't affect LRU order
    /// assert_eq!(*cache.peek(&1).unwrap(), "first");
    ///
    /// // Key 1 is still LRU and is evicted next
    /// cache.insert(3, Arc::new("third".to_string()));
    /// assert!(!cache.contains(&1));
    /// ```
    #[inline]
    pub fn peek(&self, key: &K) -> Option<Arc<V>> {
        #[cfg(feature = "metrics")]
        self.metrics.peek_calls.incr();

        if let Some(&node_ptr) = self.map.get(key) {
            #[cfg(feature = "metrics")]
            self.metrics.peek_found.incr();
            let value = unsafe { &(*node_ptr.as_ptr()).value };
            return Some(Arc::clone(value));
        }
        None
    }
}

impl<K, V> MutableCache<K, Arc<V>> for LruCore<K, V>
where
    K: Clone + Eq + Hash + 'static,
    V: 'static,
{
    /// Removes an entry, returning its value to the caller.
    ///
    /// Removal is not an eviction: the listener is not invoked.
    #[inline]
    fn remove(&mut self, key: &K) -> Option<Arc<V>> {
        let node_ptr = self.map.remove(key)?;

        self.detach(node_ptr);
        let node = unsafe { Box::from_raw(node_ptr.as_ptr()) };

        self.validate_invariants();

        Some(node.value)
    }
}

impl<K, V> LruCacheTrait<K, Arc<V>> for LruCore<K, V>
where
    K: Clone + Eq + Hash + 'static,
    V: 'static,
{
    /// Removes and returns the least recently used entry.
    ///
    /// The entry is handed to the caller, so the listener is not invoked.
    #[inline]
    fn pop_lru(&mut self) -> Option<(K, Arc<V>)> {
        #[cfg(feature = "metrics")]
        {
            self.metrics.pop_lru_calls += 1;
        }

        let node = self.pop_tail()?;
        self.map.remove(&node.key);

        self.validate_invariants();

        #[cfg(feature = "metrics")]
        {
            self.metrics.pop_lru_found += 1;
        }

        Some((node.key, node.value))
    }

    /// Peeks at the LRU entry without removing it or changing the order.
    #[inline]
    fn peek_lru(&self) -> Option<(&K, &Arc<V>)> {
        self.tail.map(|tail_ptr| unsafe {
            let node = tail_ptr.as_ref();
            (&node.key, &node.value)
        })
    }

    #[inline]
    fn touch(&mut self, key: &K) -> bool {
        #[cfg(feature = "metrics")]
        {
            self.metrics.touch_calls += 1;
        }

        if let Some(&node_ptr) = self.map.get(key) {
            self.detach(node_ptr);
            self.attach_front(node_ptr);

            self.validate_invariants();

            #[cfg(feature = "metrics")]
            {
                self.metrics.touch_found += 1;
            }

            true
        } else {
            false
        }
    }

    fn recency_rank(&self, key: &K) -> Option<usize> {
        #[cfg(feature = "metrics")]
        self.metrics.recency_rank_calls.incr();

        let &target_ptr = self.map.get(key)?;
        let mut rank = 0usize;
        let mut current = self.head;

        while let Some(ptr) = current {
            if ptr == target_ptr {
                #[cfg(feature = "metrics")]
                self.metrics.recency_rank_found.incr();
                return Some(rank);
            }
            rank += 1;
            current = unsafe { ptr.as_ref().next };
        }
        None
    }
}

#[cfg(feature = "metrics")]
impl<K, V> LruCore<K, V>
where
    K: Clone + Eq + Hash,
{
    pub fn metrics_snapshot(&self) -> LruMetricsSnapshot {
        LruMetricsSnapshot {
            get_calls: self.metrics.get_calls,
            get_hits: self.metrics.get_hits,
            get_misses: self.metrics.get_misses,
            insert_calls: self.metrics.insert_calls,
            insert_updates: self.metrics.insert_updates,
            insert_new: self.metrics.insert_new,
            evicted_entries: self.metrics.evicted_entries,
            eviction_notifications: self.metrics.eviction_notifications,
            pop_lru_calls: self.metrics.pop_lru_calls,
            pop_lru_found: self.metrics.pop_lru_found,
            touch_calls: self.metrics.touch_calls,
            touch_found: self.metrics.touch_found,
            peek_calls: self.metrics.peek_calls.get(),
            peek_found: self.metrics.peek_found.get(),
            recency_rank_calls: self.metrics.recency_rank_calls.get(),
            recency_rank_found: self.metrics.recency_rank_found.get(),
            cache_len: self.map.len(),
            capacity: self.capacity,
        }
    }
}

// Free all heap-allocated nodes when the core is dropped. Dropped entries
// are not reported to the listener.
impl<K, V> Drop for LruCore<K, V>
where
    K: Clone + Eq + Hash,
{
    fn drop(&mut self) {
        while self.pop_tail().is_some() {}
    }
}

impl<K, V> fmt::Debug for LruCore<K, V>
where
    K: Clone + Eq + Hash + fmt::Debug + 'static,
    V: 'static,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruCore")
            .field("len", &self.len())
            .field("capacity", &self.capacity())
            .field("has_listener", &self.listener.is_some())
            .finish_non_exhaustive()
    }
}

impl<K, V> Extend<(K, Arc<V>)> for LruCore<K, V>
where
    K: Clone + Eq + Hash + 'static,
    V: 'static,
{
    fn extend<T: IntoIterator<Item = (K, Arc<V>)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

/// Thread-safe LRU cache: [`LruCore`] behind a `parking_lot::RwLock`.
///
/// All methods take `&self`; cloning the handle shares the same cache.
/// Operations that change the recency order (including `get`) take the write
/// lock; pure queries take the read lock.
#[cfg(feature = "concurrency")]
#[derive(Clone)]
pub struct ConcurrentLruCache<K, V>
where
    K: Clone + Eq + Hash,
{
    inner: Arc<RwLock<LruCore<K, V>>>,
}

#[cfg(feature = "concurrency")]
impl<K, V> fmt::Debug for ConcurrentLruCache<K, V>
where
    K: Clone + Eq + Hash + fmt::Debug + 'static,
    V: 'static,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cache = self.inner.read();
        f.debug_struct("ConcurrentLruCache")
            .field("len", &cache.len())
            .field("capacity", &cache.capacity())
            .finish_non_exhaustive()
    }
}

#[cfg(feature = "concurrency")]
impl<K, V> ConcurrentLruCache<K, V>
where
    K: Clone + Eq + Hash + Send + Sync + 'static,
    V: Send + Sync + 'static,
{
    /// Creates a new thread-safe LRU cache with the given capacity.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `capacity` is zero.
    ///
    /// # Example
    ///
    /// ```
    /// use lrukit::policy::lru::ConcurrentLruCache;
    ///
    /// let cache: ConcurrentLruCache<u32, String> = ConcurrentLruCache::try_new(100).unwrap();
    /// assert_eq!(cache.capacity(), 100);
    /// assert!(cache.is_empty());
    /// ```
    pub fn try_new(capacity: usize) -> Result<Self, ConfigError> {
        Ok(ConcurrentLruCache {
            inner: Arc::new(RwLock::new(LruCore::try_new(capacity)?)),
        })
    }

    /// Registers the eviction listener; the last-set listener wins.
    ///
    /// The listener runs on the thread calling [`insert`](Self::insert),
    /// while the cache's write lock is held. It must not call back into the
    /// cache.
    pub fn set_eviction_listener(&self, listener: impl EvictionListener<K, V>) {
        self.set_boxed_eviction_listener(Box::new(listener));
    }

    pub(crate) fn set_boxed_eviction_listener(&self, listener: Box<dyn EvictionListener<K, V>>) {
        let mut cache = self.inner.write();
        cache.set_eviction_listener(listener);
    }

    /// Inserts a value, wrapping it in `Arc<V>` internally.
    ///
    /// Returns the previous `Arc<V>` if the key existed (a value update,
    /// which promotes the key and never evicts). Inserting a new key into a
    /// full cache evicts the least recently used entry and notifies the
    /// eviction listener before this call returns.
    ///
    /// # Example
    ///
    /// ```
    /// use lrukit::policy::lru::ConcurrentLruCache;
    ///
    /// let cache: ConcurrentLruCache<u32, String> = ConcurrentLruCache::try_new(100).unwrap();
    ///
    /// let old = cache.insert(1, "first".to_string());
    /// assert!(old.is_none());
    ///
    /// let old = cache.insert(1, "updated".to_string());
    /// assert_eq!(*old.unwrap(), "first");
    /// ```
    pub fn insert(&self, key: K, value: V) -> Option<Arc<V>> {
        let value_arc = Arc::new(value);
        let mut cache = self.inner.write();
        cache.insert(key, value_arc)
    }

    /// Inserts an `Arc<V>` directly (no re-wrapping if already shared).
    ///
    /// # Example
    ///
    /// ```
    /// use lrukit::policy::lru::ConcurrentLruCache;
    /// use std::sync::Arc;
    ///
    /// let cache: ConcurrentLruCache<u32, String> = ConcurrentLruCache::try_new(100).unwrap();
    ///
    /// let shared = Arc::new("shared_data".to_string());
    /// cache.insert_arc(1, Arc::clone(&shared));
    ///
    /// let retrieved = cache.try_get(&1).unwrap();
    /// assert!(Arc::ptr_eq(&shared, &retrieved));
    /// ```
    pub fn insert_arc(&self, key: K, value: Arc<V>) -> Option<Arc<V>> {
        let mut cache = self.inner.write();
        cache.insert(key, value)
    }

    /// Gets a value by key, promoting it to the MRU position.
    ///
    /// # Errors
    ///
    /// Fails with [`NotFoundError`] if the key is absent. Use
    /// [`try_get`](Self::try_get) to treat a miss as `None` instead.
    ///
    /// # Example
    ///
    /// ```
    /// use lrukit::policy::lru::ConcurrentLruCache;
    ///
    /// let cache: ConcurrentLruCache<u32, String> = ConcurrentLruCache::try_new(100).unwrap();
    /// cache.insert(1, "value".to_string());
    ///
    /// assert_eq!(*cache.get(&1).unwrap(), "value");
    /// assert!(cache.get(&999).is_err());
    /// ```
    pub fn get(&self, key: &K) -> Result<Arc<V>, NotFoundError> {
        self.try_get(key).ok_or(NotFoundError::new())
    }

    /// Gets a value by key, promoting it to the MRU position.
    ///
    /// Returns `None` on a miss; a miss does not change the recency order.
    /// Requires the write lock because a hit updates the LRU order.
    ///
    /// # Example
    ///
    /// ```
    /// use lrukit::policy::lru::ConcurrentLruCache;
    ///
    /// let cache: ConcurrentLruCache<u32, String> = ConcurrentLruCache::try_new(100).unwrap();
    /// cache.insert(1, "value".to_string());
    ///
    /// assert_eq!(*cache.try_get(&1).unwrap(), "value");
    /// assert!(cache.try_get(&999).is_none());
    /// ```
    pub fn try_get(&self, key: &K) -> Option<Arc<V>> {
        let mut cache = self.inner.write();
        cache.get(key).map(Arc::clone)
    }

    /// Peeks a value without affecting LRU order.
    ///
    /// Only requires the read lock, allowing concurrent peeks.
    pub fn peek(&self, key: &K) -> Option<Arc<V>> {
        let cache = self.inner.read();
        cache.peek(key)
    }

    /// Removes an entry and returns its `Arc<V>`.
    ///
    /// Removal is handed to the caller; the eviction listener is not
    /// invoked.
    pub fn remove(&self, key: &K) -> Option<Arc<V>> {
        let mut cache = self.inner.write();
        cache.remove(key)
    }

    /// Marks an entry as recently used without retrieving its value.
    ///
    /// Returns `true` if the key was found.
    pub fn touch(&self, key: &K) -> bool {
        let mut cache = self.inner.write();
        cache.touch(key)
    }

    /// Returns the current number of entries in the cache.
    pub fn len(&self) -> usize {
        let cache = self.inner.read();
        cache.len()
    }

    /// Returns `true` if the cache is empty.
    pub fn is_empty(&self) -> bool {
        let cache = self.inner.read();
        cache.len() == 0
    }

    /// Returns the maximum capacity of the cache.
    pub fn capacity(&self) -> usize {
        let cache = self.inner.read();
        cache.capacity()
    }

    /// Returns `true` if the key exists in the cache.
    ///
    /// Pure query under the read lock; never changes the eviction order.
    ///
    /// # Example
    ///
    /// ```
    /// use lrukit::policy::lru::ConcurrentLruCache;
    ///
    /// let cache: ConcurrentLruCache<u32, String> = ConcurrentLruCache::try_new(100).unwrap();
    /// cache.insert(1, "value".to_string());
    ///
    /// assert!(cache.contains(&1));
    /// assert!(!cache.contains(&2));
    /// ```
    pub fn contains(&self, key: &K) -> bool {
        let cache = self.inner.read();
        cache.contains(key)
    }

    /// Clears all entries from the cache without notifying the listener.
    pub fn clear(&self) {
        let mut cache = self.inner.write();
        cache.clear()
    }

    /// Removes and returns the least recently used entry.
    pub fn pop_lru(&self) -> Option<(K, Arc<V>)> {
        let mut cache = self.inner.write();
        cache.pop_lru()
    }

    /// Peeks at the least recently used entry without removing it.
    pub fn peek_lru(&self) -> Option<(K, Arc<V>)> {
        let cache = self.inner.read();
        cache.peek_lru().map(|(k, v)| (k.clone(), Arc::clone(v)))
    }
}

#[cfg(feature = "concurrency")]
impl<K, V> ConcurrentCache for ConcurrentLruCache<K, V>
where
    K: Clone + Eq + Hash + Send + Sync + 'static,
    V: Send + Sync + 'static,
{
}

#[cfg(all(feature = "metrics", feature = "concurrency"))]
impl<K, V> ConcurrentLruCache<K, V>
where
    K: Clone + Eq + Hash + Send + Sync + 'static,
    V: Send + Sync + 'static,
{
    pub fn metrics_snapshot(&self) -> LruMetricsSnapshot {
        let cache = self.inner.read();
        cache.metrics_snapshot()
    }
}
