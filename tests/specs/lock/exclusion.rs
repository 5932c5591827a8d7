//! Mutual exclusion specs
//!
//! At most one owner holds a resource while its store record exists.

use crate::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};

#[test]
fn blocking_lock_serializes_distinct_owners() {
    let (manager, _) = memory_manager();
    let manager = Arc::new(manager);
    let inside = Arc::new(AtomicUsize::new(0));
    let max_inside = Arc::new(AtomicUsize::new(0));
    let entries = Arc::new(AtomicUsize::new(0));

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let manager = Arc::clone(&manager);
            let inside = Arc::clone(&inside);
            let max_inside = Arc::clone(&max_inside);
            let entries = Arc::clone(&entries);
            std::thread::spawn(move || {
                let me = owner(&format!("worker-{}", i));
                for _ in 0..20 {
                    manager
                        .lock("ledger", &me, Duration::from_secs(10), TTL)
                        .unwrap();
                    let now = inside.fetch_add(1, Ordering::SeqCst) + 1;
                    max_inside.fetch_max(now, Ordering::SeqCst);
                    entries.fetch_add(1, Ordering::SeqCst);
                    std::thread::yield_now();
                    inside.fetch_sub(1, Ordering::SeqCst);
                    assert_eq!(manager.unlock("ledger", &me).unwrap(), Release::Released);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(max_inside.load(Ordering::SeqCst), 1);
    assert_eq!(entries.load(Ordering::SeqCst), 160);
    assert!(manager.tracker().is_empty());
}

#[test]
fn concurrent_try_lock_has_single_winner() {
    let (manager, store) = memory_manager();
    let manager = Arc::new(manager);

    let handles: Vec<_> = (0..16)
        .map(|i| {
            let manager = Arc::clone(&manager);
            std::thread::spawn(move || {
                let me = owner(&format!("worker-{}", i));
                manager.try_lock("ledger", &me, TTL).unwrap().then_some(me)
            })
        })
        .collect();

    let winners: Vec<OwnerId> = handles
        .into_iter()
        .filter_map(|h| h.join().unwrap())
        .collect();

    assert_eq!(winners.len(), 1);
    assert_eq!(
        store.get("spec:ledger").unwrap().as_deref(),
        Some(winners[0].as_str())
    );
}

#[test]
fn separate_managers_on_one_store_exclude_each_other() {
    // Two managers with their own trackers stand in for two processes
    let store = MemoryStore::new();
    let config = LockConfig::new().with_key_prefix("spec:");
    let first = LockManager::with_config(store.clone(), config.clone());
    let second = LockManager::with_config(store.clone(), config);

    first.lock("ledger", &owner("shared-id"), WAIT, TTL).unwrap();

    // Same owner string, different process view: no reentry, so it waits
    let result = second.lock(
        "ledger",
        &owner("shared-id"),
        Duration::from_millis(30),
        TTL,
    );
    assert!(matches!(result, Err(LockError::Timeout { .. })));
    assert_eq!(second.depth("ledger", &owner("shared-id")), 0);
}

#[test]
fn resources_are_independent() {
    let (manager, _) = memory_manager();

    manager.lock("a", &owner("x"), WAIT, TTL).unwrap();
    let other = manager.lock("b", &owner("y"), WAIT, TTL).unwrap();

    assert_eq!(other, Acquisition::Acquired);
}
