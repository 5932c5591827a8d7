// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake store for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{KeyValueStore, StoreError};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Recorded store call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCall {
    SetIfAbsent {
        key: String,
        value: String,
        ttl: Duration,
    },
    Get {
        key: String,
    },
    Delete {
        key: String,
    },
}

#[derive(Default)]
struct FakeState {
    records: HashMap<String, String>,
    calls: Vec<StoreCall>,
    refuse_sets: bool,
    failures: VecDeque<StoreError>,
}

/// Fake store for testing
///
/// Records never expire on their own; call [`FakeStore::expire`] to
/// simulate the store dropping one.
#[derive(Clone, Default)]
pub struct FakeStore {
    state: Arc<Mutex<FakeState>>,
}

impl FakeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every conditional set report the key as taken
    pub fn refuse_sets(&self, refuse: bool) {
        self.lock().refuse_sets = refuse;
    }

    /// Fail the next call (of any kind) with `error`
    pub fn fail_next(&self, error: StoreError) {
        self.lock().failures.push_back(error);
    }

    /// Seed a record as if another process had set it
    pub fn insert(&self, key: &str, value: &str) {
        self.lock()
            .records
            .insert(key.to_string(), value.to_string());
    }

    /// Drop a record as if its TTL had elapsed
    pub fn expire(&self, key: &str) {
        self.lock().records.remove(key);
    }

    /// Current value of a record, without recording a call
    pub fn value(&self, key: &str) -> Option<String> {
        self.lock().records.get(key).cloned()
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<StoreCall> {
        self.lock().calls.clone()
    }

    /// Number of conditional sets attempted
    pub fn set_attempts(&self) -> usize {
        self.lock()
            .calls
            .iter()
            .filter(|c| matches!(c, StoreCall::SetIfAbsent { .. }))
            .count()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, FakeState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl KeyValueStore for FakeStore {
    fn set_if_absent(&self, key: &str, value: &str, ttl: Duration) -> Result<bool, StoreError> {
        let mut state = self.lock();
        state.calls.push(StoreCall::SetIfAbsent {
            key: key.to_string(),
            value: value.to_string(),
            ttl,
        });
        if let Some(err) = state.failures.pop_front() {
            return Err(err);
        }
        if state.refuse_sets || state.records.contains_key(key) {
            return Ok(false);
        }
        state.records.insert(key.to_string(), value.to_string());
        Ok(true)
    }

    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let mut state = self.lock();
        state.calls.push(StoreCall::Get {
            key: key.to_string(),
        });
        if let Some(err) = state.failures.pop_front() {
            return Err(err);
        }
        Ok(state.records.get(key).cloned())
    }

    fn delete(&self, key: &str) -> Result<(), StoreError> {
        let mut state = self.lock();
        state.calls.push(StoreCall::Delete {
            key: key.to_string(),
        });
        if let Some(err) = state.failures.pop_front() {
            return Err(err);
        }
        state.records.remove(key);
        Ok(())
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
