//! Segmented LRU: the main space of a W-TinyLFU cache.
//!
//! Two LRU segments over the shared page arena:
//!
//! ```text
//!    PROBATIONARY (20%)                     PROTECTED (80%)
//!    ┌─────────────────────────┐            ┌─────────────────────────┐
//!    │ MRU               LRU   │   on_hit   │ MRU               LRU   │
//!    │  ▼                  ▼   │ ─────────► │  ▼                  ▼   │
//!    │ admitted ◄──► victim    │            │ hot   ◄──►   demoted    │
//!    └─────────────────────────┘ ◄───────── └─────────────────────────┘
//!         ▲                        overflow
//!         │ admit_from_window      demotion
//!    window victim
//! ```
//!
//! Pages admitted from the window enter the probationary MRU position. A hit
//! on a probationary page promotes it to protected; if that promotion pushes
//! protected past its capacity, the protected LRU page is demoted back to the
//! probationary MRU position, giving it another chance. A page in protected
//! has therefore been hit at least twice since admission.
//!
//! The probationary LRU page is the main cache's eviction candidate: the one
//! the admission contest weighs against the window victim. The probationary
//! segment may transiently exceed its own share while the cache as a whole
//! has room; the outer cache resolves that in its overflow handling.

use crate::ds::slot_arena::{SlotArena, SlotId};
use crate::policy::segment::{LruSegment, Page, Slot};

/// Probationary + protected segments with an 80/20 capacity split.
#[derive(Debug)]
pub(crate) struct SlruCache {
    protected: LruSegment,
    probationary: LruSegment,
}

impl SlruCache {
    pub(crate) fn new(capacity: usize) -> Self {
        let (protected, probationary) = Self::split(capacity);
        Self {
            protected: LruSegment::new(protected),
            probationary: LruSegment::new(probationary),
        }
    }

    // 80% protected, remainder probationary; the two always sum to capacity.
    fn split(capacity: usize) -> (usize, usize) {
        let protected = capacity * 4 / 5;
        (protected, capacity - protected)
    }

    pub(crate) fn len(&self) -> usize {
        self.protected.len() + self.probationary.len()
    }

    pub(crate) fn capacity(&self) -> usize {
        self.protected.capacity() + self.probationary.capacity()
    }

    pub(crate) fn protected_len(&self) -> usize {
        self.protected.len()
    }

    pub(crate) fn probationary_len(&self) -> usize {
        self.probationary.len()
    }

    pub(crate) fn protected_capacity(&self) -> usize {
        self.protected.capacity()
    }

    pub(crate) fn probationary_capacity(&self) -> usize {
        self.probationary.capacity()
    }

    /// Recomputes the split. No pages are dropped; the cache drains.
    pub(crate) fn set_capacity(&mut self, capacity: usize) {
        let (protected, probationary) = Self::split(capacity);
        self.protected.set_capacity(protected);
        self.probationary.set_capacity(probationary);
    }

    /// The eviction candidate the admission contest sees.
    pub(crate) fn victim(&self) -> Option<SlotId> {
        self.probationary.lru()
    }

    /// Unlinks and returns the next victim: the probationary LRU page, or the
    /// protected LRU page once probationary is empty.
    pub(crate) fn evict<K, V>(&mut self, pages: &mut SlotArena<Page<K, V>>) -> Option<SlotId> {
        match self.probationary.evict(pages) {
            Some(id) => Some(id),
            None => self.protected.evict(pages),
        }
    }

    /// Unlinks a page from whichever segment its slot tag names.
    pub(crate) fn erase<K, V>(&mut self, pages: &mut SlotArena<Page<K, V>>, id: SlotId) {
        let slot = pages.get(id).map(|page| page.slot);
        match slot {
            Some(Slot::Probationary) => self.probationary.erase(pages, id),
            Some(Slot::Protected) => self.protected.erase(pages, id),
            _ => debug_assert!(false, "page is not in the main cache"),
        }
    }

    /// Splices a window page into the probationary MRU position.
    pub(crate) fn admit_from_window<K, V>(
        &mut self,
        pages: &mut SlotArena<Page<K, V>>,
        id: SlotId,
        window: &mut LruSegment,
    ) {
        self.probationary.splice_from(pages, id, window);
        if let Some(page) = pages.get_mut(id) {
            page.slot = Slot::Probationary;
        }
    }

    /// Applies the SLRU hit rule.
    ///
    /// A probationary page is promoted to the protected MRU position; if
    /// protected then exceeds its capacity, its LRU page is demoted to the
    /// probationary MRU position. A protected page just moves to MRU.
    pub(crate) fn on_hit<K, V>(&mut self, pages: &mut SlotArena<Page<K, V>>, id: SlotId) {
        let slot = pages.get(id).map(|page| page.slot);
        match slot {
            Some(Slot::Probationary) => {
                self.protected.splice_from(pages, id, &mut self.probationary);
                if let Some(page) = pages.get_mut(id) {
                    page.slot = Slot::Protected;
                }
                if self.protected.len() > self.protected.capacity() {
                    self.demote_protected_lru(pages);
                }
            }
            Some(Slot::Protected) => self.protected.promote(pages, id),
            _ => debug_assert!(false, "page is not in the main cache"),
        }
    }

    /// Demotes protected pages until the segment fits its capacity. Used
    /// after a resize; nothing is evicted here.
    pub(crate) fn rebalance<K, V>(&mut self, pages: &mut SlotArena<Page<K, V>>) {
        while self.protected.len() > self.protected.capacity() {
            self.demote_protected_lru(pages);
        }
    }

    pub(crate) fn clear(&mut self) {
        self.protected.clear();
        self.probationary.clear();
    }

    fn demote_protected_lru<K, V>(&mut self, pages: &mut SlotArena<Page<K, V>>) {
        if let Some(cold) = self.protected.lru() {
            self.probationary
                .splice_from(pages, cold, &mut self.protected);
            if let Some(page) = pages.get_mut(cold) {
                page.slot = Slot::Probationary;
            }
        }
    }

    #[cfg(any(test, debug_assertions))]
    pub(crate) fn probationary_ids<K, V>(&self, pages: &SlotArena<Page<K, V>>) -> Vec<SlotId> {
        self.probationary.ids(pages)
    }

    #[cfg(any(test, debug_assertions))]
    pub(crate) fn protected_ids<K, V>(&self, pages: &SlotArena<Page<K, V>>) -> Vec<SlotId> {
        self.protected.ids(pages)
    }
}
