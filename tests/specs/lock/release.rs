//! Release specs
//!
//! Only the recorded holder may delete a lock record.

use crate::prelude::*;
use similar_asserts::assert_eq;

#[test]
fn non_owner_release_is_rejected_without_delete() {
    let store = FakeStore::new();
    let manager = LockManager::new(store.clone());
    manager.lock("ledger", &owner("a"), WAIT, TTL).unwrap();

    let err = manager.unlock("ledger", &owner("b")).unwrap_err();

    assert!(matches!(err, LockError::NotOwner { .. }));
    assert!(!err.is_retryable());
    assert_eq!(
        store.calls(),
        vec![
            StoreCall::SetIfAbsent {
                key: "redis:lock:ledger".to_string(),
                value: "a".to_string(),
                ttl: TTL,
            },
            StoreCall::Get {
                key: "redis:lock:ledger".to_string(),
            },
        ]
    );
    assert_eq!(store.value("redis:lock:ledger").as_deref(), Some("a"));
}

#[test]
fn owner_release_reads_then_deletes() {
    let store = FakeStore::new();
    let manager = LockManager::new(TracedStore::new(store.clone()));
    manager.lock("ledger", &owner("a"), WAIT, TTL).unwrap();

    assert_eq!(manager.unlock("ledger", &owner("a")).unwrap(), Release::Released);

    let calls = store.calls();
    assert_eq!(
        calls[1..].to_vec(),
        vec![
            StoreCall::Get {
                key: "redis:lock:ledger".to_string(),
            },
            StoreCall::Delete {
                key: "redis:lock:ledger".to_string(),
            },
        ]
    );
}

#[test]
fn store_shared_through_arc() {
    let store = Arc::new(MemoryStore::new());
    let manager = LockManager::new(Arc::clone(&store));
    manager.lock("ledger", &owner("a"), WAIT, TTL).unwrap();

    assert!(!store.set_if_absent("redis:lock:ledger", "b", TTL).unwrap());
    manager.unlock("ledger", &owner("a")).unwrap();
    assert!(store.is_empty());
}
