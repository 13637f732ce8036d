//! Window-TinyLFU cache replacement policy.
//!
//! Implements the W-TinyLFU policy from Einziger, Friedman and Manes,
//! "TinyLFU: A Highly Efficient Cache Admission Policy"
//! (<https://arxiv.org/abs/1512.00727>), with the algorithmic details of the
//! Caffeine implementation: a small recency window absorbs bursts, a
//! frequency sketch arbitrates admission into the frequency-managed main
//! space.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────────────┐
//! │                           WTinyLfuCache<K, V>                            │
//! │                                                                          │
//! │   index: FxHashMap<K, SlotId>      pages: SlotArena<Page<K, V>>          │
//! │   (the only key → page lookup)     (stable ids, intrusive links)         │
//! │                                                                          │
//! │            window victim   .──────────────.   main victim                │
//! │           .───────────────►│   TinyLFU    │◄──────────────.              │
//! │           │                │ (freq sketch)│               │              │
//! │   ┌───────────────────┐    `──────────────'    ┌──────────────────┐      │
//! │   │ Window Cache (1%) │           │            │ Main Cache (99%) │      │
//! │   │       (LRU)       │           │            │      (SLRU)      │      │
//! │   └───────────────────┘           ▼            └──────────────────┘      │
//! │           ▲                admitted winner               ▲               │
//! │           │                     │                        │               │
//! │        new page                 `────────────────────────'               │
//! └──────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! New pages enter the window, where they stay while they have high temporal
//! locality. A page pushed out of a full window gets a chance to enter the
//! main cache's probationary segment. If the whole cache is full, the
//! admission contest compares the sketch frequency of the window victim with
//! that of the main cache's eviction candidate; the lower-frequency page
//! loses its slot. On a tie the window victim loses: displacing a main
//! resident requires a strict frequency win.
//!
//! The sketch's periodic aging reset keeps lingering entries that are no
//! longer accessed from holding their slots forever.
//!
//! ## Operations
//!
//! | Operation         | Time   | Notes                                      |
//! |-------------------|--------|--------------------------------------------|
//! | `get`             | O(1)   | Records a sketch access on hit and miss    |
//! | `insert`          | O(1)*  | *Amortized; may run one admission contest  |
//! | `erase`           | O(1)   | Index + hosting segment                    |
//! | `contains`        | O(1)   | Index lookup only, no sketch access        |
//! | `change_capacity` | O(n)   | Drains overflow, clears sketch history     |
//!
//! ## Key duplication and value ownership
//!
//! Keys are stored twice, once in the page and once in the index, so small
//! cheap keys are preferred. Values are `Arc<V>`: a caller holding a value
//! keeps it alive past its eviction.
//!
//! ## Thread safety
//!
//! - [`WTinyLfuCache`]: not thread-safe, single-threaded core
//! - [`ConcurrentWTinyLfuCache`]: wraps the core in a `parking_lot::RwLock`

use std::fmt;
use std::hash::Hash;
use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::ds::frequency_sketch::FrequencySketch;
use crate::ds::slot_arena::{SlotArena, SlotId};
use crate::error::ConfigError;
use crate::metrics::{WTinyLfuMetrics, WTinyLfuMetricsSnapshot};
use crate::policy::segment::{LruSegment, Page, Slot};
use crate::policy::slru::SlruCache;
use crate::traits::{CoreCache, MutableCache, ReadOnlyCache};

/// Window-TinyLFU cache core.
///
/// # Type Parameters
///
/// - `K`: key type, `Clone + Eq + Hash` (cloned into the index and the page)
/// - `V`: value type, held as `Arc<V>`
///
/// # Example
///
/// ```
/// use lfukit::policy::wtinylfu::WTinyLfuCache;
///
/// let mut cache: WTinyLfuCache<u64, &str> = WTinyLfuCache::new(100);
///
/// cache.insert(1, "one");
/// cache.insert(2, "two");
///
/// assert_eq!(cache.get(&1).as_deref(), Some(&"one"));
/// assert_eq!(cache.get(&3), None);
/// assert_eq!(cache.hits(), 1);
/// assert_eq!(cache.misses(), 1);
/// assert_eq!(cache.len(), 2);
/// ```
///
/// # Eviction behavior
///
/// A new key always lands at the window's MRU position. When the window is
/// full, its LRU page either moves into the main cache (cache below
/// capacity) or enters the admission contest against the main cache's
/// probationary victim (cache full). Overwriting an existing key changes
/// neither its segment nor its recency.
pub struct WTinyLfuCache<K, V>
where
    K: Clone + Eq + Hash,
{
    sketch: FrequencySketch,

    /// Maps keys to the stable page id in whichever segment hosts the page.
    index: FxHashMap<K, SlotId>,

    /// All pages of all three segments live here; segment membership is a
    /// matter of link chains and the page's slot tag.
    pages: SlotArena<Page<K, V>>,

    window: LruSegment,
    main: SlruCache,

    metrics: WTinyLfuMetrics,
}

impl<K, V> WTinyLfuCache<K, V>
where
    K: Clone + Eq + Hash,
{
    /// Creates a cache with the given total capacity.
    ///
    /// The window gets `max(1, ceil(0.01 * capacity))` slots, the main SLRU
    /// the rest (80% protected, 20% probationary).
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero. Use [`try_new`](Self::try_new) to handle
    /// the error instead.
    pub fn new(capacity: usize) -> Self {
        Self::try_new(capacity).expect("cache capacity must be greater than zero")
    }

    /// Fallible constructor; rejects a zero capacity.
    pub fn try_new(capacity: usize) -> Result<Self, ConfigError> {
        if capacity == 0 {
            return Err(ConfigError::new("cache capacity must be greater than zero"));
        }
        Self::build(capacity, Self::window_capacity_for(capacity))
    }

    /// Constructor with an explicit window size instead of the 1% default.
    ///
    /// A larger window favors recency-heavy workloads; the default suits
    /// frequency-skewed ones.
    pub fn with_window_capacity(
        capacity: usize,
        window_capacity: usize,
    ) -> Result<Self, ConfigError> {
        if capacity == 0 {
            return Err(ConfigError::new("cache capacity must be greater than zero"));
        }
        if window_capacity == 0 || window_capacity > capacity {
            return Err(ConfigError::new(
                "window capacity must be between 1 and the total capacity",
            ));
        }
        Self::build(capacity, window_capacity)
    }

    fn build(capacity: usize, window_capacity: usize) -> Result<Self, ConfigError> {
        Ok(Self {
            sketch: FrequencySketch::try_new(capacity)?,
            index: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            pages: SlotArena::with_capacity(capacity),
            window: LruSegment::new(window_capacity),
            main: SlruCache::new(capacity - window_capacity),
            metrics: WTinyLfuMetrics::default(),
        })
    }

    fn window_capacity_for(capacity: usize) -> usize {
        ((capacity + 99) / 100).max(1)
    }

    /// Returns the number of cached entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Returns `true` if the cache holds no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Returns the total capacity (window + main).
    #[inline]
    pub fn capacity(&self) -> usize {
        self.window.capacity() + self.main.capacity()
    }

    /// Returns the window segment's capacity.
    #[inline]
    pub fn window_capacity(&self) -> usize {
        self.window.capacity()
    }

    /// Returns the main (SLRU) capacity.
    #[inline]
    pub fn main_capacity(&self) -> usize {
        self.main.capacity()
    }

    /// Returns the protected segment's capacity.
    #[inline]
    pub fn protected_capacity(&self) -> usize {
        self.main.protected_capacity()
    }

    /// Returns the probationary segment's capacity.
    #[inline]
    pub fn probationary_capacity(&self) -> usize {
        self.main.probationary_capacity()
    }

    /// Number of `get` calls that found their key.
    #[inline]
    pub fn hits(&self) -> u64 {
        self.metrics.get_hits
    }

    /// Number of `get` calls that missed.
    #[inline]
    pub fn misses(&self) -> u64 {
        self.metrics.get_misses
    }

    /// Returns `true` if the key is cached.
    ///
    /// Pure index lookup: does not record a sketch access and does not touch
    /// recency, unlike [`get`](Self::get).
    #[inline]
    pub fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    /// Looks up a key, recording the access in the frequency sketch.
    ///
    /// The sketch access happens on every call, hit or miss; the estimator
    /// needs miss traffic to decide future admissions. On a hit the hosting
    /// segment promotes the page (window-internal move, or the SLRU
    /// probationary → protected rule) and the shared value is returned.
    ///
    /// # Example
    ///
    /// ```
    /// use lfukit::policy::wtinylfu::WTinyLfuCache;
    ///
    /// let mut cache: WTinyLfuCache<&str, u32> = WTinyLfuCache::new(10);
    /// cache.insert("a", 1);
    ///
    /// assert_eq!(cache.get(&"a").as_deref(), Some(&1));
    /// assert_eq!(cache.get(&"missing"), None);
    /// ```
    pub fn get(&mut self, key: &K) -> Option<Arc<V>> {
        let id = self.lookup(key)?;
        self.pages.get(id).map(|page| Arc::clone(&page.value))
    }

    /// Inserts a key-value pair, wrapping the value in an `Arc`.
    ///
    /// An existing key has its value overwritten in place: the page keeps its
    /// segment and recency position and nothing is evicted. A new key may
    /// displace a page via the eviction cycle, then lands at the window MRU
    /// position.
    ///
    /// # Example
    ///
    /// ```
    /// use lfukit::policy::wtinylfu::WTinyLfuCache;
    ///
    /// let mut cache: WTinyLfuCache<&str, u32> = WTinyLfuCache::new(10);
    /// cache.insert("a", 1);
    /// cache.insert("a", 2);
    ///
    /// assert_eq!(cache.len(), 1);
    /// assert_eq!(cache.get(&"a").as_deref(), Some(&2));
    /// ```
    pub fn insert(&mut self, key: K, value: V) {
        self.insert_arc(key, Arc::new(value));
    }

    /// Inserts a pre-wrapped value, returning the replaced value for an
    /// existing key.
    pub fn insert_arc(&mut self, key: K, value: Arc<V>) -> Option<Arc<V>> {
        self.metrics.insert_calls += 1;

        if let Some(page) = self.index.get(&key).and_then(|&id| self.pages.get_mut(id)) {
            self.metrics.insert_updates += 1;
            return Some(std::mem::replace(&mut page.value, value));
        }

        self.metrics.insert_new += 1;
        if self.window.is_full() {
            self.make_room();
        }

        let id = self.pages.insert(Page::new(key.clone(), Slot::Window, value));
        self.window.insert_at_mru(&mut self.pages, id);
        self.index.insert(key, id);

        #[cfg(debug_assertions)]
        self.debug_validate_invariants();

        None
    }

    /// Returns the cached value, loading and inserting it on a miss.
    ///
    /// # Example
    ///
    /// ```
    /// use lfukit::policy::wtinylfu::WTinyLfuCache;
    ///
    /// let mut cache: WTinyLfuCache<u64, u64> = WTinyLfuCache::new(10);
    ///
    /// let value = cache.get_or_load(&7, |key| key * 10);
    /// assert_eq!(*value, 70);
    ///
    /// // Second call is served from the cache; the loader does not run.
    /// let value = cache.get_or_load(&7, |_| unreachable!());
    /// assert_eq!(*value, 70);
    /// ```
    pub fn get_or_load<F>(&mut self, key: &K, loader: F) -> Arc<V>
    where
        F: FnOnce(&K) -> V,
    {
        if let Some(value) = self.get(key) {
            return value;
        }
        let value = Arc::new(loader(key));
        self.insert_arc(key.clone(), Arc::clone(&value));
        value
    }

    /// Fallible [`get_or_load`](Self::get_or_load): a loader error is
    /// propagated unchanged and nothing is inserted.
    ///
    /// # Example
    ///
    /// ```
    /// use lfukit::policy::wtinylfu::WTinyLfuCache;
    ///
    /// let mut cache: WTinyLfuCache<u64, u64> = WTinyLfuCache::new(10);
    ///
    /// let failed: Result<_, &str> = cache.try_get_or_load(&7, |_| Err("unreachable key"));
    /// assert_eq!(failed, Err("unreachable key"));
    /// assert!(cache.is_empty());
    ///
    /// let loaded: Result<_, &str> = cache.try_get_or_load(&7, |key| Ok(key * 10));
    /// assert_eq!(loaded.map(|v| *v), Ok(70));
    /// ```
    pub fn try_get_or_load<F, E>(&mut self, key: &K, loader: F) -> Result<Arc<V>, E>
    where
        F: FnOnce(&K) -> Result<V, E>,
    {
        if let Some(value) = self.get(key) {
            return Ok(value);
        }
        let value = Arc::new(loader(key)?);
        self.insert_arc(key.clone(), Arc::clone(&value));
        Ok(value)
    }

    /// Removes a key, returning its value if it was cached.
    ///
    /// # Example
    ///
    /// ```
    /// use lfukit::policy::wtinylfu::WTinyLfuCache;
    ///
    /// let mut cache: WTinyLfuCache<&str, u32> = WTinyLfuCache::new(10);
    /// cache.insert("a", 1);
    ///
    /// assert_eq!(cache.erase(&"a").as_deref(), Some(&1));
    /// assert_eq!(cache.erase(&"a"), None);
    /// assert!(cache.is_empty());
    /// ```
    pub fn erase(&mut self, key: &K) -> Option<Arc<V>> {
        let id = self.index.remove(key)?;

        let slot = self.pages.get(id).map(|page| page.slot);
        match slot {
            Some(Slot::Window) => self.window.erase(&mut self.pages, id),
            Some(_) => self.main.erase(&mut self.pages, id),
            None => {}
        }
        let page = self.pages.remove(id)?;

        #[cfg(debug_assertions)]
        self.debug_validate_invariants();

        Some(page.value)
    }

    /// Resizes the cache.
    ///
    /// The frequency sketch is reallocated, which clears its history: the
    /// hit rate degrades transiently until estimates rebuild. Window and
    /// main capacities are recomputed as at construction and any overflow is
    /// drained: the window from its LRU end, then the main cache from its
    /// probationary end, after demoting whatever no longer fits in
    /// protected.
    ///
    /// # Example
    ///
    /// ```
    /// use lfukit::policy::wtinylfu::WTinyLfuCache;
    ///
    /// let mut cache: WTinyLfuCache<u64, u64> = WTinyLfuCache::new(100);
    /// for i in 0..100 {
    ///     cache.insert(i, i);
    /// }
    ///
    /// cache.change_capacity(10).unwrap();
    /// assert!(cache.len() <= 10);
    /// assert_eq!(cache.capacity(), 10);
    ///
    /// assert!(cache.change_capacity(0).is_err());
    /// assert_eq!(cache.capacity(), 10);
    /// ```
    pub fn change_capacity(&mut self, capacity: usize) -> Result<(), ConfigError> {
        if capacity == 0 {
            return Err(ConfigError::new("cache capacity must be greater than zero"));
        }
        self.sketch.change_capacity(capacity)?;

        let window_capacity = Self::window_capacity_for(capacity);
        self.window.set_capacity(window_capacity);
        self.main.set_capacity(capacity - window_capacity);

        while self.window.len() > self.window.capacity() {
            self.evict_from_window();
        }
        self.main.rebalance(&mut self.pages);
        while self.main.len() > self.main.capacity() {
            self.evict_from_main();
        }

        #[cfg(debug_assertions)]
        self.debug_validate_invariants();

        Ok(())
    }

    /// Drops every cached entry.
    ///
    /// Sketch history and hit/miss counters are kept; a cleared cache
    /// re-fills under the same frequency estimates.
    pub fn clear(&mut self) {
        self.pages.clear();
        self.index.clear();
        self.window.clear();
        self.main.clear();
    }

    /// Returns a copy of the operation counters and occupancy gauges.
    pub fn metrics_snapshot(&self) -> WTinyLfuMetricsSnapshot {
        WTinyLfuMetricsSnapshot {
            get_hits: self.metrics.get_hits,
            get_misses: self.metrics.get_misses,
            insert_calls: self.metrics.insert_calls,
            insert_updates: self.metrics.insert_updates,
            insert_new: self.metrics.insert_new,
            evicted_entries: self.metrics.evicted_entries,
            admitted_pages: self.metrics.admitted_pages,
            rejected_candidates: self.metrics.rejected_candidates,
            cache_len: self.len(),
            window_len: self.window.len(),
            probationary_len: self.main.probationary_len(),
            protected_len: self.main.protected_len(),
            capacity: self.capacity(),
        }
    }

    // Records the sketch access, resolves the key and applies the hit rule.
    fn lookup(&mut self, key: &K) -> Option<SlotId> {
        self.sketch.record_access(key);
        match self.index.get(key) {
            Some(&id) => {
                self.handle_hit(id);
                self.metrics.get_hits += 1;
                Some(id)
            }
            None => {
                self.metrics.get_misses += 1;
                None
            }
        }
    }

    fn handle_hit(&mut self, id: SlotId) {
        let slot = self.pages.get(id).map(|page| page.slot);
        match slot {
            Some(Slot::Window) => self.window.promote(&mut self.pages, id),
            Some(_) => self.main.on_hit(&mut self.pages, id),
            None => {}
        }
    }

    /// The eviction cycle, run when the window is full and a new page is
    /// pending.
    ///
    /// Below total capacity the window victim simply moves to the main
    /// cache's probationary MRU position. At capacity the admission contest
    /// runs: the victim with the lower sketch frequency loses its slot, and
    /// a tie keeps the main resident.
    fn make_room(&mut self) {
        if self.len() < self.capacity() {
            if let Some(id) = self.window.lru() {
                self.main.admit_from_window(&mut self.pages, id, &mut self.window);
            }
            return;
        }

        let window_victim = match self.window.lru() {
            Some(id) => id,
            None => return,
        };
        let main_victim = match self.main.victim() {
            Some(id) => id,
            // Degenerate main cache (capacity 1 total): plain window LRU.
            None => {
                self.evict_from_window();
                return;
            }
        };

        let window_freq = self.victim_frequency(window_victim);
        let main_freq = self.victim_frequency(main_victim);

        if window_freq > main_freq {
            self.metrics.admitted_pages += 1;
            self.evict_from_main();
            self.main
                .admit_from_window(&mut self.pages, window_victim, &mut self.window);
        } else {
            self.metrics.rejected_candidates += 1;
            self.evict_from_window();
        }
    }

    fn victim_frequency(&self, id: SlotId) -> u8 {
        match self.pages.get(id) {
            Some(page) => self.sketch.frequency(&page.key),
            None => 0,
        }
    }

    fn evict_from_window(&mut self) {
        if let Some(id) = self.window.evict(&mut self.pages) {
            self.drop_page(id);
        }
    }

    fn evict_from_main(&mut self) {
        if let Some(id) = self.main.evict(&mut self.pages) {
            self.drop_page(id);
        }
    }

    fn drop_page(&mut self, id: SlotId) {
        if let Some(page) = self.pages.remove(id) {
            self.index.remove(&page.key);
            self.metrics.evicted_entries += 1;
        }
    }

    /// Validates the structural invariants (debug/test builds only).
    ///
    /// Checks that the index, the page arena and the three segment chains
    /// agree in size, that every chained page carries the right slot tag and
    /// is indexed under its own key, and that the window, the protected
    /// segment and the cache total respect their capacities.
    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        let window_ids = self.window.ids(&self.pages);
        let probationary_ids = self.main.probationary_ids(&self.pages);
        let protected_ids = self.main.protected_ids(&self.pages);

        let total = window_ids.len() + probationary_ids.len() + protected_ids.len();
        assert_eq!(self.index.len(), total, "index size mismatch");
        assert_eq!(self.pages.len(), total, "arena size mismatch");

        assert!(self.window.len() <= self.window.capacity());
        assert!(self.main.protected_len() <= self.main.protected_capacity());
        assert!(self.len() <= self.capacity());

        let tagged = [
            (&window_ids, Slot::Window),
            (&probationary_ids, Slot::Probationary),
            (&protected_ids, Slot::Protected),
        ];
        for (ids, slot) in tagged {
            for &id in ids.iter() {
                let page = self.pages.get(id).expect("chained page is live");
                assert_eq!(page.slot, slot, "slot tag disagrees with hosting segment");
                assert_eq!(self.index.get(&page.key), Some(&id), "index points elsewhere");
            }
        }

        self.pages.debug_validate_invariants();
    }
}

impl<K, V> fmt::Debug for WTinyLfuCache<K, V>
where
    K: Clone + Eq + Hash,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WTinyLfuCache")
            .field("capacity", &self.capacity())
            .field("len", &self.len())
            .field("window_len", &self.window.len())
            .field("probationary_len", &self.main.probationary_len())
            .field("protected_len", &self.main.protected_len())
            .field("hits", &self.hits())
            .field("misses", &self.misses())
            .finish_non_exhaustive()
    }
}

impl<K, V> ReadOnlyCache<K, Arc<V>> for WTinyLfuCache<K, V>
where
    K: Clone + Eq + Hash,
{
    #[inline]
    fn contains(&self, key: &K) -> bool {
        WTinyLfuCache::contains(self, key)
    }

    #[inline]
    fn len(&self) -> usize {
        WTinyLfuCache::len(self)
    }

    #[inline]
    fn capacity(&self) -> usize {
        WTinyLfuCache::capacity(self)
    }
}

/// [`CoreCache`] over `Arc<V>` values, the unified interface for generic
/// cache consumers.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use lfukit::policy::wtinylfu::WTinyLfuCache;
/// use lfukit::traits::CoreCache;
///
/// let mut cache: WTinyLfuCache<u64, u32> = WTinyLfuCache::new(10);
/// assert_eq!(CoreCache::insert(&mut cache, 1, Arc::new(10)), None);
/// assert_eq!(CoreCache::get(&mut cache, &1), Some(&Arc::new(10)));
/// ```
impl<K, V> CoreCache<K, Arc<V>> for WTinyLfuCache<K, V>
where
    K: Clone + Eq + Hash,
{
    #[inline]
    fn insert(&mut self, key: K, value: Arc<V>) -> Option<Arc<V>> {
        self.insert_arc(key, value)
    }

    #[inline]
    fn get(&mut self, key: &K) -> Option<&Arc<V>> {
        let id = self.lookup(key)?;
        self.pages.get(id).map(|page| &page.value)
    }

    #[inline]
    fn contains(&self, key: &K) -> bool {
        WTinyLfuCache::contains(self, key)
    }

    #[inline]
    fn len(&self) -> usize {
        WTinyLfuCache::len(self)
    }

    #[inline]
    fn capacity(&self) -> usize {
        WTinyLfuCache::capacity(self)
    }

    fn clear(&mut self) {
        WTinyLfuCache::clear(self);
    }
}

impl<K, V> MutableCache<K, Arc<V>> for WTinyLfuCache<K, V>
where
    K: Clone + Eq + Hash,
{
    #[inline]
    fn remove(&mut self, key: &K) -> Option<Arc<V>> {
        self.erase(key)
    }
}

/// Thread-safe wrapper around [`WTinyLfuCache`] using a `parking_lot::RwLock`.
///
/// Every access that touches recency or the sketch takes the write lock,
/// including `get`; only pure lookups (`contains`, `len`, `capacity`,
/// counters) take the read lock.
///
/// # Example
///
/// ```
/// use lfukit::policy::wtinylfu::ConcurrentWTinyLfuCache;
///
/// let cache: ConcurrentWTinyLfuCache<u64, String> = ConcurrentWTinyLfuCache::new(100);
/// cache.insert(1, "one".to_string());
///
/// assert_eq!(cache.get(&1).as_deref().map(String::as_str), Some("one"));
/// assert!(cache.contains(&1));
/// assert_eq!(cache.len(), 1);
/// ```
pub struct ConcurrentWTinyLfuCache<K, V>
where
    K: Clone + Eq + Hash,
{
    inner: RwLock<WTinyLfuCache<K, V>>,
}

impl<K, V> ConcurrentWTinyLfuCache<K, V>
where
    K: Clone + Eq + Hash,
{
    /// Creates a concurrent cache with the given total capacity.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: RwLock::new(WTinyLfuCache::new(capacity)),
        }
    }

    /// Fallible constructor; rejects a zero capacity.
    pub fn try_new(capacity: usize) -> Result<Self, ConfigError> {
        Ok(Self {
            inner: RwLock::new(WTinyLfuCache::try_new(capacity)?),
        })
    }

    /// Looks up a key. Takes the write lock: hits move pages.
    pub fn get(&self, key: &K) -> Option<Arc<V>> {
        self.inner.write().get(key)
    }

    /// Inserts a key-value pair, wrapping the value in an `Arc`.
    pub fn insert(&self, key: K, value: V) {
        self.inner.write().insert(key, value);
    }

    /// Inserts a pre-wrapped value, returning the replaced value.
    pub fn insert_arc(&self, key: K, value: Arc<V>) -> Option<Arc<V>> {
        self.inner.write().insert_arc(key, value)
    }

    /// Returns the cached value, loading it on a miss.
    ///
    /// The loader runs under the write lock; keep it short or load outside
    /// and use [`insert_arc`](Self::insert_arc).
    pub fn get_or_load<F>(&self, key: &K, loader: F) -> Arc<V>
    where
        F: FnOnce(&K) -> V,
    {
        self.inner.write().get_or_load(key, loader)
    }

    /// Fallible [`get_or_load`](Self::get_or_load).
    pub fn try_get_or_load<F, E>(&self, key: &K, loader: F) -> Result<Arc<V>, E>
    where
        F: FnOnce(&K) -> Result<V, E>,
    {
        self.inner.write().try_get_or_load(key, loader)
    }

    /// Removes a key, returning its value if it was cached.
    pub fn erase(&self, key: &K) -> Option<Arc<V>> {
        self.inner.write().erase(key)
    }

    /// Returns `true` if the key is cached. Read lock only.
    pub fn contains(&self, key: &K) -> bool {
        self.inner.read().contains(key)
    }

    /// Returns the number of cached entries.
    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    /// Returns `true` if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    /// Returns the total capacity.
    pub fn capacity(&self) -> usize {
        self.inner.read().capacity()
    }

    /// Number of `get` calls that found their key.
    pub fn hits(&self) -> u64 {
        self.inner.read().hits()
    }

    /// Number of `get` calls that missed.
    pub fn misses(&self) -> u64 {
        self.inner.read().misses()
    }

    /// Resizes the cache; see [`WTinyLfuCache::change_capacity`].
    pub fn change_capacity(&self, capacity: usize) -> Result<(), ConfigError> {
        self.inner.write().change_capacity(capacity)
    }

    /// Drops every cached entry.
    pub fn clear(&self) {
        self.inner.write().clear();
    }

    /// Returns a copy of the operation counters and occupancy gauges.
    pub fn metrics_snapshot(&self) -> WTinyLfuMetricsSnapshot {
        self.inner.read().metrics_snapshot()
    }
}

impl<K, V> fmt::Debug for ConcurrentWTinyLfuCache<K, V>
where
    K: Clone + Eq + Hash,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.read();
        f.debug_struct("ConcurrentWTinyLfuCache")
            .field("capacity", &inner.capacity())
            .field("len", &inner.len())
            .finish_non_exhaustive()
    }
}
