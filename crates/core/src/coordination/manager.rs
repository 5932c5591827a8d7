// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Lock manager: acquisition and release over a key-value store
//!
//! Mutual exclusion comes entirely from the store's atomic conditional set.
//! The manager layers three things on top:
//! - parameter validation before any store call
//! - a bounded poll loop for blocking acquisition
//! - same-process reentrancy through a shared [`ReentryTracker`]
//!
//! Depths are tracked per prefixed store key, so managers sharing a tracker
//! only see each other's holds when they address the same record.
//!
//! # Release race
//!
//! `unlock` reads the record, compares the owner, then deletes. These are
//! separate store calls. If the record expires between the read and the
//! delete and another owner acquires it, the delete erases that owner's
//! lock. Closing the gap needs an atomic compare-and-delete at the store
//! boundary or fencing tokens; neither is part of [`KeyValueStore`].

use std::sync::Arc;
use std::time::Duration;

use super::guard::LockGuard;
use super::reentry::ReentryTracker;
use crate::clock::{Clock, SystemClock};
use crate::config::LockConfig;
use crate::error::LockError;
use crate::owner::OwnerId;
use crate::store::KeyValueStore;

/// Successful outcome of [`LockManager::lock`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Acquisition {
    /// The store record was created by this call
    Acquired,
    /// The owner already held the lock in this process; the store was not touched
    Reentered { depth: u32 },
}

impl Acquisition {
    pub fn is_reentrant(&self) -> bool {
        matches!(self, Acquisition::Reentered { .. })
    }
}

/// Successful outcome of [`LockManager::unlock`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Release {
    /// A nested hold was released; the store record is still in place
    Nested { depth: u32 },
    /// The store record was deleted
    Released,
    /// No record was found, typically because its TTL elapsed
    AlreadyExpired,
}

/// Coordinates lock acquisition and release against a store
pub struct LockManager<S, C = SystemClock> {
    store: S,
    config: LockConfig,
    clock: C,
    tracker: Arc<ReentryTracker>,
}

impl<S: KeyValueStore> LockManager<S, SystemClock> {
    pub fn new(store: S) -> Self {
        Self::with_config(store, LockConfig::default())
    }

    pub fn with_config(store: S, config: LockConfig) -> Self {
        Self::with_clock(store, config, SystemClock)
    }
}

impl<S: KeyValueStore, C: Clock> LockManager<S, C> {
    pub fn with_clock(store: S, config: LockConfig, clock: C) -> Self {
        Self::with_tracker(store, config, clock, Arc::new(ReentryTracker::new()))
    }

    /// Build a manager sharing an existing tracker
    ///
    /// Managers in one process must share a tracker for nested calls to see
    /// each other's holds.
    /// Depths are keyed by prefixed store key, so only managers over the
    /// same store should share one.
    pub fn with_tracker(
        store: S,
        config: LockConfig,
        clock: C,
        tracker: Arc<ReentryTracker>,
    ) -> Self {
        Self {
            store,
            config,
            clock,
            tracker,
        }
    }

    pub fn config(&self) -> &LockConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn tracker(&self) -> &Arc<ReentryTracker> {
        &self.tracker
    }

    /// Store key for a resource, with the configured prefix
    pub fn store_key(&self, resource: &str) -> String {
        self.config.store_key(resource)
    }

    /// Nesting depth this process records for the owner
    pub fn depth(&self, resource: &str, owner: &OwnerId) -> u32 {
        self.tracker.depth(&self.store_key(resource), owner)
    }

    /// Single conditional-set attempt
    ///
    /// Does not consult the reentry tracker: a second `try_lock` by the
    /// same owner while the record exists returns false.
    pub fn try_lock(
        &self,
        resource: &str,
        owner: &OwnerId,
        ttl: Duration,
    ) -> Result<bool, LockError> {
        require_resource(resource)?;
        require_positive("ttl", ttl)?;

        let key = self.store_key(resource);
        let acquired = self.store.set_if_absent(&key, owner.as_str(), ttl)?;
        tracing::debug!(resource, %owner, %key, acquired, "try_lock");
        Ok(acquired)
    }

    /// Blocking, reentrant acquisition
    ///
    /// Returns immediately if `owner` already holds `resource` through an
    /// earlier `lock` in this process. Otherwise polls the store until the
    /// conditional set succeeds or `wait_timeout` elapses. Any failure rolls
    /// back the depth increment made on entry.
    ///
    /// Threads sharing one `owner` share its depth. A second thread gets
    /// `Reentered` as soon as the first has incremented, even while the
    /// first is still polling. If that poll then fails, the second thread
    /// holds no store record. Give each thread its own owner, for example
    /// [`OwnerId::current_thread`], when that matters.
    pub fn lock(
        &self,
        resource: &str,
        owner: &OwnerId,
        wait_timeout: Duration,
        ttl: Duration,
    ) -> Result<Acquisition, LockError> {
        require_resource(resource)?;
        require_positive("wait_timeout", wait_timeout)?;
        require_positive("ttl", ttl)?;

        let key = self.store_key(resource);
        let depth = self.tracker.increment(&key, owner);
        if depth > 1 {
            tracing::debug!(resource, %owner, depth, "reentered");
            return Ok(Acquisition::Reentered { depth });
        }

        match self.poll(resource, &key, owner, wait_timeout, ttl) {
            Ok(()) => Ok(Acquisition::Acquired),
            Err(e) => {
                self.tracker.decrement(&key, owner);
                Err(e)
            }
        }
    }

    /// Like [`lock`](Self::lock), returning a guard that unlocks on drop
    pub fn lock_guard(
        &self,
        resource: &str,
        owner: &OwnerId,
        wait_timeout: Duration,
        ttl: Duration,
    ) -> Result<LockGuard<'_, S, C>, LockError> {
        let acquisition = self.lock(resource, owner, wait_timeout, ttl)?;
        Ok(LockGuard::new(self, resource, owner.clone(), acquisition))
    }

    /// Release one hold on `resource`
    ///
    /// Nested holds only decrement the depth. The final release deletes the
    /// store record if `owner` holds it, succeeds if no record exists, and
    /// fails with [`LockError::NotOwner`] if someone else holds it.
    pub fn unlock(&self, resource: &str, owner: &OwnerId) -> Result<Release, LockError> {
        require_resource(resource)?;

        let key = self.store_key(resource);
        if let Some(depth) = self.tracker.decrement(&key, owner) {
            if depth > 0 {
                tracing::debug!(resource, %owner, depth, "nested release");
                return Ok(Release::Nested { depth });
            }
        }

        match self.store.get(&key)? {
            Some(holder) if !holder.trim().is_empty() => {
                if holder != owner.as_str() {
                    tracing::warn!(resource, %owner, %holder, "unlock rejected: not owner");
                    return Err(LockError::NotOwner {
                        resource: resource.to_string(),
                        owner: owner.to_string(),
                        holder,
                    });
                }
                self.store.delete(&key)?;
                tracing::debug!(resource, %owner, %key, "released");
                Ok(Release::Released)
            }
            _ => {
                tracing::debug!(resource, %owner, %key, "no record to release");
                Ok(Release::AlreadyExpired)
            }
        }
    }

    fn poll(
        &self,
        resource: &str,
        key: &str,
        owner: &OwnerId,
        wait_timeout: Duration,
        ttl: Duration,
    ) -> Result<(), LockError> {
        let start = self.clock.now();
        let mut attempts: u64 = 0;

        loop {
            attempts += 1;
            if self.store.set_if_absent(key, owner.as_str(), ttl)? {
                let elapsed = self.clock.now().saturating_duration_since(start);
                tracing::debug!(
                    resource,
                    %owner,
                    %key,
                    attempts,
                    elapsed_ms = elapsed.as_millis() as u64,
                    "acquired"
                );
                return Ok(());
            }

            let elapsed = self.clock.now().saturating_duration_since(start);
            if elapsed >= wait_timeout {
                tracing::warn!(
                    resource,
                    %owner,
                    attempts,
                    elapsed_ms = elapsed.as_millis() as u64,
                    "lock timed out"
                );
                return Err(LockError::Timeout {
                    resource: resource.to_string(),
                    owner: owner.to_string(),
                    waited: elapsed,
                });
            }

            let interval = self.config.poll_interval;
            if interval.is_zero() {
                self.clock.yield_now();
            } else {
                self.clock.sleep(interval.min(wait_timeout - elapsed));
            }
        }
    }
}

fn require_resource(resource: &str) -> Result<(), LockError> {
    if resource.trim().is_empty() {
        return Err(LockError::InvalidParameter(
            "resource can not be blank".to_string(),
        ));
    }
    Ok(())
}

fn require_positive(name: &str, value: Duration) -> Result<(), LockError> {
    if value.is_zero() {
        return Err(LockError::InvalidParameter(format!(
            "{} must be greater than zero",
            name
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "manager_tests.rs"]
mod tests;
