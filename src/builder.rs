//! Builder for W-TinyLFU caches.
//!
//! Hides the capacity arithmetic behind a small fluent API.
//!
//! ## Example
//!
//! ```rust
//! use lfukit::builder::WTinyLfuBuilder;
//! use lfukit::policy::wtinylfu::WTinyLfuCache;
//!
//! let mut cache: WTinyLfuCache<u64, String> = WTinyLfuBuilder::new(100).build();
//! cache.insert(1, "hello".to_string());
//! assert_eq!(cache.get(&1).as_deref().map(String::as_str), Some("hello"));
//! ```

use std::hash::Hash;

use crate::error::ConfigError;
use crate::policy::wtinylfu::WTinyLfuCache;

/// Builder for [`WTinyLfuCache`] instances.
#[derive(Debug, Clone)]
pub struct WTinyLfuBuilder {
    capacity: usize,
    window_capacity: Option<usize>,
}

impl WTinyLfuBuilder {
    /// Creates a builder for a cache with the given total capacity.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            window_capacity: None,
        }
    }

    /// Overrides the window size (default: `max(1, ceil(0.01 * capacity))`).
    ///
    /// A larger window favors recency-heavy workloads over frequency-skewed
    /// ones.
    ///
    /// # Example
    ///
    /// ```
    /// use lfukit::builder::WTinyLfuBuilder;
    /// use lfukit::policy::wtinylfu::WTinyLfuCache;
    ///
    /// let cache: WTinyLfuCache<u64, u64> =
    ///     WTinyLfuBuilder::new(100).window_capacity(25).build();
    /// assert_eq!(cache.window_capacity(), 25);
    /// assert_eq!(cache.main_capacity(), 75);
    /// ```
    pub fn window_capacity(mut self, capacity: usize) -> Self {
        self.window_capacity = Some(capacity);
        self
    }

    /// Builds the cache, validating the configuration.
    ///
    /// # Example
    ///
    /// ```
    /// use lfukit::builder::WTinyLfuBuilder;
    /// use lfukit::policy::wtinylfu::WTinyLfuCache;
    ///
    /// let invalid: Result<WTinyLfuCache<u64, u64>, _> =
    ///     WTinyLfuBuilder::new(10).window_capacity(20).try_build();
    /// assert!(invalid.is_err());
    /// ```
    pub fn try_build<K, V>(self) -> Result<WTinyLfuCache<K, V>, ConfigError>
    where
        K: Clone + Eq + Hash,
    {
        match self.window_capacity {
            Some(window) => WTinyLfuCache::with_window_capacity(self.capacity, window),
            None => WTinyLfuCache::try_new(self.capacity),
        }
    }

    /// Builds the cache.
    ///
    /// # Panics
    ///
    /// Panics if the configuration is invalid; use
    /// [`try_build`](Self::try_build) to handle the error instead.
    pub fn build<K, V>(self) -> WTinyLfuCache<K, V>
    where
        K: Clone + Eq + Hash,
    {
        self.try_build().expect("invalid cache configuration")
    }
}
