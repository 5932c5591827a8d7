//! Shared helpers for keylock specs

pub use keylock_adapters::{MemoryStore, TracedStore};
pub use keylock_core::{
    Acquisition, Clock, FakeClock, FakeStore, KeyValueStore, LockConfig, LockError, LockManager,
    OwnerId, Release, StoreCall,
};
pub use std::sync::Arc;
pub use std::time::{Duration, Instant};

pub const WAIT: Duration = Duration::from_millis(500);
pub const TTL: Duration = Duration::from_secs(30);

pub fn owner(id: &str) -> OwnerId {
    OwnerId::new(id)
}

/// Manager over a shared in-memory store using the real clock
pub fn memory_manager() -> (LockManager<MemoryStore>, MemoryStore) {
    let store = MemoryStore::new();
    let config = LockConfig::new().with_key_prefix("spec:");
    let manager = LockManager::with_config(store.clone(), config);
    (manager, store)
}

/// Manager and store driven by one fake clock
pub fn fake_clock_manager() -> (
    LockManager<MemoryStore<FakeClock>, FakeClock>,
    MemoryStore<FakeClock>,
    FakeClock,
) {
    let clock = FakeClock::new();
    let store = MemoryStore::with_clock(clock.clone());
    let config = LockConfig::new()
        .with_key_prefix("spec:")
        .with_poll_interval(Duration::from_millis(10));
    let manager = LockManager::with_clock(store.clone(), config, clock.clone());
    (manager, store, clock)
}
