// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Process-local nesting depth per (store key, owner)
//!
//! Keys are the prefixed store keys, not bare resource names, so two
//! managers addressing different records never share a depth.
//!
//! The store has no notion of reentrancy, so the tracker is the only record
//! that an owner already holds a lock. It is never shared across processes:
//! a second process using the same owner string gets no reentry benefit.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use crate::owner::OwnerId;

/// Concurrent map from (store key, owner) to nesting depth
///
/// Entries exist only while depth is positive. Every operation runs under
/// one mutex, so increments and decrements never interleave.
#[derive(Debug, Default)]
pub struct ReentryTracker {
    depths: Mutex<HashMap<(String, OwnerId), u32>>,
}

impl ReentryTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment the depth, creating the entry at zero if absent, and return it
    pub fn increment(&self, key: &str, owner: &OwnerId) -> u32 {
        let mut depths = self.depths();
        let depth = depths
            .entry((key.to_string(), owner.clone()))
            .or_insert(0);
        *depth = depth.saturating_add(1);
        *depth
    }

    /// Decrement the depth and return it, or `None` if there was no entry
    ///
    /// The entry is removed when the depth reaches zero.
    pub fn decrement(&self, key: &str, owner: &OwnerId) -> Option<u32> {
        let mut depths = self.depths();
        let key = (key.to_string(), owner.clone());
        let depth = depths.get_mut(&key)?;
        *depth = depth.saturating_sub(1);
        let remaining = *depth;
        if remaining == 0 {
            depths.remove(&key);
        }
        Some(remaining)
    }

    /// Current depth, zero when untracked
    pub fn depth(&self, key: &str, owner: &OwnerId) -> u32 {
        self.depths()
            .get(&(key.to_string(), owner.clone()))
            .copied()
            .unwrap_or(0)
    }

    /// Forget the entry regardless of depth
    pub fn remove(&self, key: &str, owner: &OwnerId) -> Option<u32> {
        self.depths().remove(&(key.to_string(), owner.clone()))
    }

    /// Number of tracked (key, owner) pairs
    pub fn len(&self) -> usize {
        self.depths().len()
    }

    pub fn is_empty(&self) -> bool {
        self.depths().is_empty()
    }

    fn depths(&self) -> MutexGuard<'_, HashMap<(String, OwnerId), u32>> {
        self.depths.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
#[path = "reentry_tests.rs"]
mod tests;
