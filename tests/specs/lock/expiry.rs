//! Expiry and timeout specs
//!
//! Records vanish through TTL expiry, and failed waits leave no reentry state.

use crate::prelude::*;

#[test]
fn unlock_after_ttl_expiry_succeeds() {
    let (manager, _, clock) = fake_clock_manager();
    let me = owner("worker-1");
    manager
        .lock("ledger", &me, WAIT, Duration::from_millis(100))
        .unwrap();

    clock.advance(Duration::from_millis(100));

    assert_eq!(
        manager.unlock("ledger", &me).unwrap(),
        Release::AlreadyExpired
    );
    assert!(manager.tracker().is_empty());
}

#[test]
fn waiter_acquires_once_holder_expires() {
    let (manager, store, clock) = fake_clock_manager();
    manager
        .lock("ledger", &owner("a"), WAIT, Duration::from_millis(50))
        .unwrap();
    let start = clock.now();

    // Polls every 10ms of fake time until a's record expires at 50ms
    let acquisition = manager
        .lock("ledger", &owner("b"), Duration::from_secs(1), TTL)
        .unwrap();

    assert_eq!(acquisition, Acquisition::Acquired);
    assert_eq!(clock.now().duration_since(start), Duration::from_millis(50));
    assert_eq!(store.get("spec:ledger").unwrap().as_deref(), Some("b"));
}

#[test]
fn stale_holder_unlock_after_reacquire_is_rejected() {
    let (manager, store, clock) = fake_clock_manager();
    manager
        .lock("ledger", &owner("a"), WAIT, Duration::from_millis(50))
        .unwrap();
    clock.advance(Duration::from_millis(50));
    manager.lock("ledger", &owner("b"), WAIT, TTL).unwrap();

    assert!(matches!(
        manager.unlock("ledger", &owner("a")),
        Err(LockError::NotOwner { .. })
    ));
    assert_eq!(store.get("spec:ledger").unwrap().as_deref(), Some("b"));
}

#[test]
fn timeout_with_refusing_store_rolls_back_depth() {
    let store = FakeStore::new();
    store.refuse_sets(true);
    let manager = LockManager::new(store.clone());
    let me = owner("worker-1");
    let wait = Duration::from_millis(50);

    let start = Instant::now();
    let result = manager.lock("ledger", &me, wait, Duration::from_millis(1000));
    let elapsed = start.elapsed();

    assert!(matches!(result, Err(LockError::Timeout { .. })));
    assert!(elapsed >= wait);
    assert!(elapsed < Duration::from_secs(2), "took {:?}", elapsed);
    assert_eq!(manager.depth("ledger", &me), 0);

    store.refuse_sets(false);
    assert_eq!(
        manager.lock("ledger", &me, WAIT, TTL).unwrap(),
        Acquisition::Acquired
    );
}

#[test]
fn timeout_is_retryable() {
    let (manager, _, _) = fake_clock_manager();
    manager.lock("ledger", &owner("a"), WAIT, TTL).unwrap();

    let err = manager
        .lock("ledger", &owner("b"), Duration::from_millis(25), TTL)
        .unwrap_err();
    assert!(err.is_retryable());
}
