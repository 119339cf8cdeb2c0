//! lrukit: a fixed-capacity LRU cache with eviction notification.
//!
//! The single-threaded core lives in [`policy::lru::LruCore`]; the
//! thread-safe wrapper is [`policy::lru::ConcurrentLruCache`] (feature
//! `concurrency`, enabled by default).

pub mod error;
pub mod listener;
pub mod policy;
pub mod traits;

#[cfg(feature = "concurrency")]
pub mod builder;

#[cfg(feature = "metrics")]
pub mod metrics;

#[cfg(feature = "concurrency")]
pub use builder::LruCacheBuilder;
pub use error::{ConfigError, InvariantError, NotFoundError};
pub use listener::{EvictionListener, FnListener};
#[cfg(feature = "concurrency")]
pub use policy::lru::ConcurrentLruCache;
pub use policy::lru::LruCore;
