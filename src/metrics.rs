//! Operation counters for the W-TinyLFU cache.
//!
//! Counters are plain `u64`s bumped inline by the cache; a point-in-time copy
//! is exposed through [`WTinyLfuMetricsSnapshot`]. Hit and miss counts are
//! part of the cache's own surface
//! ([`hits`](crate::policy::wtinylfu::WTinyLfuCache::hits) /
//! [`misses`](crate::policy::wtinylfu::WTinyLfuCache::misses)); the snapshot
//! adds insert/eviction/admission breakdowns and segment occupancy gauges.

/// Internal running counters. One instance lives inside each cache.
#[derive(Debug, Default)]
pub(crate) struct WTinyLfuMetrics {
    pub(crate) get_hits: u64,
    pub(crate) get_misses: u64,

    pub(crate) insert_calls: u64,
    pub(crate) insert_updates: u64,
    pub(crate) insert_new: u64,

    pub(crate) evicted_entries: u64,
    /// Window victims that won the admission contest and entered the main cache.
    pub(crate) admitted_pages: u64,
    /// Window victims the contest refused while the main cache was full.
    pub(crate) rejected_candidates: u64,
}

/// Point-in-time view of a cache's counters and occupancy.
///
/// # Example
///
/// ```
/// use lfukit::policy::wtinylfu::WTinyLfuCache;
///
/// let mut cache: WTinyLfuCache<u64, u64> = WTinyLfuCache::new(100);
/// cache.insert(1, 10);
/// cache.get(&1);
/// cache.get(&2);
///
/// let snapshot = cache.metrics_snapshot();
/// assert_eq!(snapshot.get_hits, 1);
/// assert_eq!(snapshot.get_misses, 1);
/// assert_eq!(snapshot.insert_new, 1);
/// assert_eq!(snapshot.cache_len, 1);
/// assert_eq!(snapshot.capacity, 100);
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct WTinyLfuMetricsSnapshot {
    pub get_hits: u64,
    pub get_misses: u64,

    pub insert_calls: u64,
    pub insert_updates: u64,
    pub insert_new: u64,

    pub evicted_entries: u64,
    pub admitted_pages: u64,
    pub rejected_candidates: u64,

    // gauges captured at snapshot time
    pub cache_len: usize,
    pub window_len: usize,
    pub probationary_len: usize,
    pub protected_len: usize,
    pub capacity: usize,
}
