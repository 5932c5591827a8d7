// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! RAII guard for a held lock

use super::manager::{Acquisition, LockManager, Release};
use crate::clock::Clock;
use crate::error::LockError;
use crate::owner::OwnerId;
use crate::store::KeyValueStore;

/// Releases one hold on drop
///
/// If the release fails during drop a warning is logged and the error is
/// otherwise discarded. Call [`LockGuard::release`] to observe it.
pub struct LockGuard<'a, S: KeyValueStore, C: Clock> {
    manager: &'a LockManager<S, C>,
    resource: String,
    owner: OwnerId,
    acquisition: Acquisition,
    released: bool,
}

impl<'a, S: KeyValueStore, C: Clock> LockGuard<'a, S, C> {
    pub(super) fn new(
        manager: &'a LockManager<S, C>,
        resource: &str,
        owner: OwnerId,
        acquisition: Acquisition,
    ) -> Self {
        Self {
            manager,
            resource: resource.to_string(),
            owner,
            acquisition,
            released: false,
        }
    }

    pub fn resource(&self) -> &str {
        &self.resource
    }

    pub fn owner(&self) -> &OwnerId {
        &self.owner
    }

    /// How this hold was obtained
    pub fn acquisition(&self) -> Acquisition {
        self.acquisition
    }

    /// Release now and report the outcome
    pub fn release(mut self) -> Result<Release, LockError> {
        self.released = true;
        self.manager.unlock(&self.resource, &self.owner)
    }
}

impl<S: KeyValueStore, C: Clock> Drop for LockGuard<'_, S, C> {
    fn drop(&mut self) {
        if self.released {
            return;
        }
        if let Err(e) = self.manager.unlock(&self.resource, &self.owner) {
            tracing::warn!(
                resource = %self.resource,
                owner = %self.owner,
                error = %e,
                "failed to release lock on drop"
            );
        }
    }
}

impl<S: KeyValueStore, C: Clock> std::fmt::Debug for LockGuard<'_, S, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LockGuard")
            .field("resource", &self.resource)
            .field("owner", &self.owner)
            .field("acquisition", &self.acquisition)
            .finish()
    }
}

#[cfg(test)]
#[path = "guard_tests.rs"]
mod tests;
