// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Errors surfaced by the lock protocol

use crate::store::StoreError;
use std::time::Duration;
use thiserror::Error;

/// Errors from lock, try_lock and unlock
#[derive(Debug, Error)]
pub enum LockError {
    /// Raised before any store interaction
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("lock timed out after {waited:?}: resource={resource}, owner={owner}")]
    Timeout {
        resource: String,
        owner: String,
        waited: Duration,
    },

    #[error("{owner} cannot unlock {resource}: held by {holder}")]
    NotOwner {
        resource: String,
        owner: String,
        holder: String,
    },

    /// Store failures pass through untouched
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl LockError {
    /// Whether retrying the same call may succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            LockError::Timeout { .. } => true,
            LockError::Store(e) => e.is_transient(),
            LockError::InvalidParameter(_) | LockError::NotOwner { .. } => false,
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
