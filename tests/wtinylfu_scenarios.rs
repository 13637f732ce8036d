// ==============================================
// END-TO-END CACHE SCENARIOS (integration)
// ==============================================
//
// Observable behavior of the full W-TinyLFU policy: fill, scan resistance,
// admission ties, aging, resizing and erase semantics. Unit-level coverage
// lives next to each module; these tests exercise the assembled cache the
// way a caller would.

use std::sync::Arc;

use lfukit::policy::wtinylfu::WTinyLfuCache;

// ==============================================
// Fill & Round Trips
// ==============================================

#[test]
fn filling_to_capacity_retains_every_entry() {
    let mut cache: WTinyLfuCache<u64, u64> = WTinyLfuCache::new(100);
    for i in 0..100 {
        cache.insert(i, i * 7);
    }

    assert_eq!(cache.len(), 100);
    for i in 0..100 {
        assert_eq!(cache.get(&i).as_deref(), Some(&(i * 7)), "key {i} lost");
    }
    assert_eq!(cache.get(&200), None);
    assert_eq!(cache.hits(), 100);
    assert_eq!(cache.misses(), 1);
}

#[test]
fn insert_then_get_returns_the_value() {
    let mut cache: WTinyLfuCache<u64, String> = WTinyLfuCache::new(8);
    // Holds with the cache empty, part-filled and full: a new key always
    // lands in the window.
    for i in 0..32 {
        cache.insert(i, format!("value-{i}"));
        assert_eq!(
            cache.get(&i).as_deref().map(String::as_str),
            Some(format!("value-{i}").as_str())
        );
    }
}

#[test]
fn overwrite_then_get_returns_the_latest_value() {
    let mut cache: WTinyLfuCache<&str, u64> = WTinyLfuCache::new(10);
    cache.insert("k", 1);
    cache.insert("k", 2);
    assert_eq!(cache.get(&"k").as_deref(), Some(&2));
    assert_eq!(cache.len(), 1);
}

#[test]
fn erase_then_get_is_absent_and_reinsert_works() {
    let mut cache: WTinyLfuCache<&str, u64> = WTinyLfuCache::new(10);
    cache.insert("k", 1);
    cache.erase(&"k");

    assert_eq!(cache.get(&"k"), None);
    assert_eq!(cache.len(), 0);

    cache.insert("k", 2);
    assert_eq!(cache.get(&"k").as_deref(), Some(&2));
}

#[test]
fn hits_plus_misses_counts_every_get() {
    let mut cache: WTinyLfuCache<u64, u64> = WTinyLfuCache::new(16);
    for i in 0..16 {
        cache.insert(i, i);
    }

    let mut gets = 0u64;
    for i in 0..200 {
        cache.get(&(i % 29));
        gets += 1;
    }
    assert_eq!(cache.hits() + cache.misses(), gets);
}

// ==============================================
// Scan Resistance
// ==============================================

// The paper's headline property: a long scan of one-shot keys must not
// displace a small set of frequently accessed residents.
#[test]
fn hot_keys_survive_a_full_scan() {
    let mut cache: WTinyLfuCache<u64, u64> = WTinyLfuCache::new(1024);
    for i in 0..1024 {
        cache.insert(i, i * 3);
    }

    // Warm twenty keys across ten rounds.
    for _ in 0..10 {
        for k in 100..120 {
            assert!(cache.get(&k).is_some());
        }
    }

    // Scan: a window's worth short of the full capacity, all cold keys.
    for i in 0..(1024 - 20) {
        cache.insert(1024 + i, i);
    }

    assert_eq!(cache.len(), 1024);
    for k in 100..120u64 {
        assert_eq!(
            cache.get(&k).as_deref(),
            Some(&(k * 3)),
            "hot key {k} was displaced by the scan"
        );
    }
}

#[test]
fn cold_scan_keys_are_refused_admission() {
    let mut cache: WTinyLfuCache<u64, u64> = WTinyLfuCache::new(64);
    for i in 0..64 {
        cache.insert(i, i);
    }
    for _ in 0..5 {
        for k in 0..32 {
            cache.get(&k);
        }
    }

    for i in 1000..2000 {
        cache.insert(i, i);
    }

    // Scan keys only ever churn through the window; the warmed half of the
    // original population is untouched.
    let survivors = (0..32).filter(|k| cache.contains(k)).count();
    assert_eq!(survivors, 32);
}

// ==============================================
// Admission Contest
// ==============================================

#[test]
fn equal_frequencies_keep_the_main_resident() {
    // capacity 4: window 1, protected 2, probationary 1. After four inserts
    // with no gets, every frequency estimate is zero: the contest is a tie,
    // and the tie must evict the window victim, not the main one.
    let mut cache: WTinyLfuCache<&str, u64> = WTinyLfuCache::new(4);
    cache.insert("a", 0);
    cache.insert("b", 1);
    cache.insert("c", 2);
    cache.insert("d", 3);

    cache.insert("e", 4);

    assert_eq!(cache.len(), 4);
    assert!(!cache.contains(&"d"), "window victim should lose the tie");
    assert!(cache.contains(&"e"), "new page should take the window");
    for key in ["a", "b", "c"] {
        assert!(cache.contains(&key), "main cache should be untouched");
    }
}

#[test]
fn strictly_hotter_window_victim_is_admitted() {
    let mut cache: WTinyLfuCache<&str, u64> = WTinyLfuCache::new(4);
    cache.insert("a", 0);
    cache.insert("b", 1);
    cache.insert("c", 2);
    cache.insert("d", 3);

    cache.get(&"d");
    cache.get(&"d");
    cache.insert("e", 4);

    assert!(cache.contains(&"d"), "hot window victim should be admitted");
    assert!(!cache.contains(&"a"), "cold main victim should be evicted");
    assert_eq!(cache.len(), 4);
}

// ==============================================
// Boundary Capacities
// ==============================================

#[test]
fn capacity_one_keeps_only_the_newest_entry() {
    let mut cache: WTinyLfuCache<u64, u64> = WTinyLfuCache::new(1);
    assert_eq!(cache.window_capacity(), 1);
    assert_eq!(cache.main_capacity(), 0);

    for i in 0..20 {
        cache.insert(i, i);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get(&i).as_deref(), Some(&i));
        if i > 0 {
            assert!(!cache.contains(&(i - 1)));
        }
    }
}

#[test]
fn capacity_one_hundred_region_split() {
    let cache: WTinyLfuCache<u64, u64> = WTinyLfuCache::new(100);
    assert_eq!(cache.window_capacity(), 1);
    assert_eq!(cache.protected_capacity(), 79);
    assert_eq!(cache.probationary_capacity(), 20);
}

// ==============================================
// Resize
// ==============================================

#[test]
fn shrinking_drains_and_remaining_keys_resolve() {
    let mut cache: WTinyLfuCache<u64, u64> = WTinyLfuCache::new(100);
    for i in 0..100 {
        cache.insert(i, i + 500);
    }
    let (hits, misses) = (cache.hits(), cache.misses());

    cache.change_capacity(10).unwrap();

    assert!(cache.len() <= 10);
    assert_eq!(cache.capacity(), 10);
    // The resize itself is not a hit or a miss.
    assert_eq!((cache.hits(), cache.misses()), (hits, misses));

    for key in (0..100).filter(|k| cache.contains(k)).collect::<Vec<_>>() {
        assert_eq!(cache.get(&key).as_deref(), Some(&(key + 500)));
    }
}

#[test]
fn shrinking_clears_frequency_history() {
    let mut cache: WTinyLfuCache<u64, u64> = WTinyLfuCache::new(8);
    for i in 0..8 {
        cache.insert(i, i);
    }
    // Make key 0 the hottest entry by far, then shrink.
    for _ in 0..20 {
        cache.get(&0);
    }
    cache.change_capacity(4).unwrap();
    assert_eq!(cache.len(), 4);

    // History is gone: the old window resident (key 7, never accessed) and a
    // fresh insert both lose 0-vs-0 admission ties against main residents.
    cache.insert(100, 100);
    assert!(!cache.contains(&7));
    cache.insert(101, 101);
    assert!(!cache.contains(&100));

    for key in [0, 5, 6, 101] {
        assert!(cache.contains(&key), "key {key} should have survived");
    }
    assert_eq!(cache.len(), 4);
}

#[test]
fn growing_preserves_all_entries() {
    let mut cache: WTinyLfuCache<u64, u64> = WTinyLfuCache::new(10);
    for i in 0..10 {
        cache.insert(i, i);
    }

    cache.change_capacity(100).unwrap();

    assert_eq!(cache.len(), 10);
    assert_eq!(cache.capacity(), 100);
    for i in 0..10 {
        assert_eq!(cache.get(&i).as_deref(), Some(&i));
    }
}

// ==============================================
// Shared Value Ownership
// ==============================================

#[test]
fn held_values_outlive_eviction_and_erase() {
    let mut cache: WTinyLfuCache<u64, String> = WTinyLfuCache::new(1);
    cache.insert(1, "survivor".to_string());
    let held = cache.get(&1).unwrap();

    cache.insert(2, "displacer".to_string());
    assert!(!cache.contains(&1));
    assert_eq!(held.as_str(), "survivor");

    let erased = cache.erase(&2).unwrap();
    assert!(cache.is_empty());
    assert_eq!(erased.as_str(), "displacer");
}

#[test]
fn cache_and_caller_share_one_allocation() {
    let mut cache: WTinyLfuCache<u64, Vec<u8>> = WTinyLfuCache::new(10);
    cache.insert(1, vec![1, 2, 3]);

    let a = cache.get(&1).unwrap();
    let b = cache.get(&1).unwrap();
    assert!(Arc::ptr_eq(&a, &b));
    // cache + a + b
    assert_eq!(Arc::strong_count(&a), 3);
}

// ==============================================
// Loader Integration
// ==============================================

#[test]
fn get_or_load_populates_and_then_serves_from_cache() {
    let mut cache: WTinyLfuCache<u64, u64> = WTinyLfuCache::new(10);
    let mut loads = 0u32;

    for _ in 0..3 {
        let value = cache.get_or_load(&42, |key| {
            loads += 1;
            key * 2
        });
        assert_eq!(*value, 84);
    }

    assert_eq!(loads, 1);
    assert_eq!(cache.misses(), 1);
    assert_eq!(cache.hits(), 2);
}

#[test]
fn loader_failure_does_not_insert() {
    let mut cache: WTinyLfuCache<u64, u64> = WTinyLfuCache::new(10);

    for attempt in 0..3 {
        let result: Result<Arc<u64>, u32> = cache.try_get_or_load(&1, |_| Err(attempt));
        assert_eq!(result.unwrap_err(), attempt);
    }
    assert!(cache.is_empty());

    let ok: Result<Arc<u64>, u32> = cache.try_get_or_load(&1, |_| Ok(7));
    assert_eq!(ok.map(|v| *v), Ok(7));
    assert_eq!(cache.len(), 1);
}

// ==============================================
// Randomized Workload Invariants
// ==============================================

#[test]
fn invariants_hold_under_a_seeded_random_workload() {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    let mut rng = StdRng::seed_from_u64(0x5eed);
    let mut cache: WTinyLfuCache<u64, u64> = WTinyLfuCache::new(32);

    for step in 0..5_000u64 {
        let key = rng.gen_range(0..96);
        match rng.gen_range(0..10) {
            0..=4 => cache.insert(key, step),
            5..=7 => {
                cache.get(&key);
            }
            8 => {
                cache.erase(&key);
            }
            _ => {
                cache.get_or_load(&key, |k| *k);
            }
        }

        assert!(cache.len() <= cache.capacity());
        if step % 250 == 0 {
            #[cfg(debug_assertions)]
            cache.debug_validate_invariants();
        }
    }
    #[cfg(debug_assertions)]
    cache.debug_validate_invariants();
}

#[test]
fn invariants_hold_under_random_resizes() {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    let mut rng = StdRng::seed_from_u64(0xcafe);
    let mut cache: WTinyLfuCache<u64, u64> = WTinyLfuCache::new(64);

    for round in 0..40u64 {
        for i in 0..50 {
            cache.insert(round * 50 + i, i);
            cache.get(&(round * 50 + i % 7));
        }
        let capacity = rng.gen_range(1..=128);
        cache.change_capacity(capacity).unwrap();
        assert!(cache.len() <= capacity);
        #[cfg(debug_assertions)]
        cache.debug_validate_invariants();
    }
}
