#![no_main]

use libfuzzer_sys::fuzz_target;
use lfukit::policy::wtinylfu::WTinyLfuCache;

// Fuzz arbitrary operation sequences on WTinyLfuCache
//
// Drives random sequences of insert, get, erase, contains, change_capacity
// and clear operations, checking the externally observable invariants after
// every step.
fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }

    let mut cache: WTinyLfuCache<u16, u16> = WTinyLfuCache::new(16);

    let mut idx = 0;
    while idx + 2 < data.len() {
        let op = data[idx] % 8;
        let key = u16::from(data[idx + 1]) | (u16::from(data[idx + 2] & 0x3) << 8);
        let value = u16::from(data[idx + 2]);
        idx += 3;

        match op {
            0 | 1 | 2 => {
                cache.insert(key, value);

                // A fresh insert always lands in the window.
                assert!(cache.contains(&key));
                assert_eq!(cache.get(&key).as_deref(), Some(&value));
            }
            3 | 4 => {
                let before = cache.len();
                let _ = cache.get(&key);
                // Lookups never change occupancy.
                assert_eq!(cache.len(), before);
            }
            5 => {
                let was_cached = cache.contains(&key);
                let removed = cache.erase(&key);
                assert_eq!(removed.is_some(), was_cached);
                assert!(!cache.contains(&key));
            }
            6 => {
                let capacity = usize::from(data[idx - 1] % 64) + 1;
                cache.change_capacity(capacity).unwrap();
                assert_eq!(cache.capacity(), capacity);
            }
            _ => {
                if key % 97 == 0 {
                    cache.clear();
                    assert!(cache.is_empty());
                }
            }
        }

        assert!(cache.len() <= cache.capacity());
    }
});
