//! Store Concurrency Tests
//!
//! These tests verify the snapshot-isolation contract of the wrapper:
//! readers pin frozen views, writers serialize without losing updates,
//! and guards keep values alive across later writes.

use snaptrie::TrieStore;
use std::sync::Arc;
use std::thread;

// ============================================================================
// Snapshot isolation
// ============================================================================

#[test]
fn test_guard_survives_overwrite() {
    let store = TrieStore::new();
    store.put(b"key", 1u32);

    let guard = store.get::<u32>(b"key").unwrap();
    store.put(b"key", 2u32);

    assert_eq!(*guard, 1);
    assert_eq!(*store.get::<u32>(b"key").unwrap(), 2);
}

#[test]
fn test_guard_survives_removal() {
    let store = TrieStore::new();
    store.put(b"key", String::from("pinned"));

    let guard = store.get::<String>(b"key").unwrap();
    store.remove(b"key");

    assert!(store.get::<String>(b"key").is_none());
    assert_eq!(*guard, "pinned");
}

#[test]
fn test_guard_snapshot_is_frozen() {
    let store = TrieStore::new();
    store.put(b"a", 1u32);
    store.put(b"b", 2u32);

    let guard = store.get::<u32>(b"a").unwrap();
    store.remove(b"b");
    store.put(b"c", 3u32);

    // The pinned snapshot reflects the store at lookup time, not now.
    let snapshot = guard.snapshot();
    assert_eq!(snapshot.get::<u32>(b"b"), Some(&2));
    assert_eq!(snapshot.get::<u32>(b"c"), None);
}

#[test]
fn test_cloned_guards_share_snapshot() {
    let store = TrieStore::new();
    store.put(b"key", 7u64);

    let guard = store.get::<u64>(b"key").unwrap();
    let clone = guard.clone();
    store.remove(b"key");
    drop(guard);

    assert_eq!(*clone, 7);
}

// ============================================================================
// Threaded access
// ============================================================================

#[test]
fn test_readers_observe_monotonic_counter() {
    let store = Arc::new(TrieStore::new());
    store.put(b"counter", 0u64);

    const WRITES: u64 = 2_000;

    let mut readers = Vec::new();
    for _ in 0..4 {
        let store = Arc::clone(&store);
        readers.push(thread::spawn(move || {
            let mut last = 0u64;
            for _ in 0..2_000 {
                let seen = *store.get::<u64>(b"counter").unwrap();
                // Publishes are ordered, so observed values never go back.
                assert!(seen >= last, "counter went backwards: {seen} < {last}");
                assert!(seen <= WRITES);
                last = seen;
            }
        }));
    }

    let writer = {
        let store = Arc::clone(&store);
        thread::spawn(move || {
            for i in 1..=WRITES {
                store.put(b"counter", i);
            }
        })
    };

    writer.join().unwrap();
    for reader in readers {
        reader.join().unwrap();
    }

    assert_eq!(*store.get::<u64>(b"counter").unwrap(), WRITES);
}

#[test]
fn test_parallel_writers_lose_no_updates() {
    let store = Arc::new(TrieStore::new());

    const THREADS: usize = 8;
    const KEYS_PER_THREAD: usize = 64;

    let mut writers = Vec::new();
    for t in 0..THREADS {
        let store = Arc::clone(&store);
        writers.push(thread::spawn(move || {
            for i in 0..KEYS_PER_THREAD {
                let key = format!("writer{t}/key{i}");
                store.put(key.as_bytes(), (t * KEYS_PER_THREAD + i) as u64);
            }
        }));
    }
    for writer in writers {
        writer.join().unwrap();
    }

    // Every write from every thread made it into the final snapshot.
    let snapshot = store.snapshot();
    for t in 0..THREADS {
        for i in 0..KEYS_PER_THREAD {
            let key = format!("writer{t}/key{i}");
            assert_eq!(
                snapshot.get::<u64>(key.as_bytes()),
                Some(&((t * KEYS_PER_THREAD + i) as u64)),
                "lost update for {key}"
            );
        }
    }
}

#[test]
fn test_guard_pins_value_under_write_churn() {
    let store = Arc::new(TrieStore::new());
    store.put(b"stable", String::from("still here"));

    let guard = store.get::<String>(b"stable").unwrap();

    let churn = {
        let store = Arc::clone(&store);
        thread::spawn(move || {
            for i in 0..1_000u32 {
                let key = format!("churn{}", i % 16);
                store.put(key.as_bytes(), i);
                if i % 3 == 0 {
                    store.remove(key.as_bytes());
                }
            }
            store.remove(b"stable");
        })
    };
    churn.join().unwrap();

    assert!(store.get::<String>(b"stable").is_none());
    assert_eq!(*guard, "still here");
    assert_eq!(
        guard.snapshot().get::<String>(b"stable").unwrap(),
        "still here"
    );
}

#[test]
fn test_mixed_readers_and_removers() {
    let store = Arc::new(TrieStore::new());
    for i in 0..64u32 {
        store.put(format!("key{i}").as_bytes(), i);
    }

    let remover = {
        let store = Arc::clone(&store);
        thread::spawn(move || {
            for i in 0..64u32 {
                store.remove(format!("key{i}").as_bytes());
            }
        })
    };

    let mut readers = Vec::new();
    for _ in 0..4 {
        let store = Arc::clone(&store);
        readers.push(thread::spawn(move || {
            for i in 0..64u32 {
                // Either state is fine; a hit must carry the right value.
                if let Some(guard) = store.get::<u32>(format!("key{i}").as_bytes()) {
                    assert_eq!(*guard, i);
                }
            }
        }));
    }

    remover.join().unwrap();
    for reader in readers {
        reader.join().unwrap();
    }

    assert!(store.snapshot().is_empty());
}
