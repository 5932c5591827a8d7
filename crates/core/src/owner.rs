// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Owner identifiers and their generators
//!
//! An owner is the logical holder of a lock: a thread, a request, a job.
//! The store records the owner string as the lock value and `unlock`
//! compares against it, so two unrelated callers must never share one.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Sentinel owner used when the caller supplies a blank identifier
///
/// Every caller that omits an owner shares this value. They can reenter
/// and unlock each other's locks.
pub const ANONYMOUS_OWNER: &str = "NONE";

/// Identifies the logical holder of a lock
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String")]
pub struct OwnerId(String);

impl OwnerId {
    /// Create an owner, normalizing blank input to [`ANONYMOUS_OWNER`]
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        if id.trim().is_empty() {
            Self::anonymous()
        } else {
            Self(id)
        }
    }

    /// The shared sentinel owner
    pub fn anonymous() -> Self {
        Self(ANONYMOUS_OWNER.to_string())
    }

    /// Owner scoped to the calling thread of this process
    pub fn current_thread() -> Self {
        let thread = std::thread::current();
        Self(format!("{}-{:?}", std::process::id(), thread.id()))
    }

    pub fn is_anonymous(&self) -> bool {
        self.0 == ANONYMOUS_OWNER
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for OwnerId {
    fn default() -> Self {
        Self::anonymous()
    }
}

impl From<&str> for OwnerId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for OwnerId {
    fn from(id: String) -> Self {
        Self::new(id)
    }
}

impl std::fmt::Display for OwnerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Generates unique owner identifiers
pub trait OwnerIdGen: Clone + Send + Sync {
    fn next(&self) -> OwnerId;
}

/// UUID-based generator for production use
#[derive(Clone, Default)]
pub struct UuidOwnerIdGen;

impl OwnerIdGen for UuidOwnerIdGen {
    fn next(&self) -> OwnerId {
        OwnerId(uuid::Uuid::new_v4().to_string())
    }
}

/// Sequential generator for testing
#[derive(Clone)]
pub struct SequentialOwnerIdGen {
    prefix: String,
    counter: Arc<AtomicU64>,
}

impl SequentialOwnerIdGen {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            counter: Arc::new(AtomicU64::new(1)),
        }
    }
}

impl Default for SequentialOwnerIdGen {
    fn default() -> Self {
        Self::new("owner")
    }
}

impl OwnerIdGen for SequentialOwnerIdGen {
    fn next(&self) -> OwnerId {
        let n = self.counter.fetch_add(1, Ordering::SeqCst);
        OwnerId(format!("{}-{}", self.prefix, n))
    }
}

#[cfg(test)]
#[path = "owner_tests.rs"]
mod tests;
