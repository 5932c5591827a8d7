// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced store wrapper for consistent observability

use keylock_core::{KeyValueStore, StoreError};
use std::time::Duration;

/// Wrapper that adds tracing to any KeyValueStore
#[derive(Clone)]
pub struct TracedStore<S> {
    inner: S,
}

impl<S> TracedStore<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S: KeyValueStore> KeyValueStore for TracedStore<S> {
    fn set_if_absent(&self, key: &str, value: &str, ttl: Duration) -> Result<bool, StoreError> {
        let span = tracing::debug_span!("store.set_if_absent", key);
        let _guard = span.enter();

        let start = std::time::Instant::now();
        let result = self.inner.set_if_absent(key, value, ttl);
        let elapsed = start.elapsed();

        match &result {
            Ok(created) => tracing::trace!(
                value,
                ttl_ms = ttl.as_millis() as u64,
                created,
                elapsed_ms = elapsed.as_millis() as u64,
                "conditional set"
            ),
            Err(e) => tracing::error!(
                elapsed_ms = elapsed.as_millis() as u64,
                error = %e,
                "conditional set failed"
            ),
        }

        result
    }

    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let span = tracing::debug_span!("store.get", key);
        let _guard = span.enter();

        let result = self.inner.get(key);
        match &result {
            Ok(value) => tracing::trace!(found = value.is_some(), "read"),
            Err(e) => tracing::error!(error = %e, "get failed"),
        }

        result
    }

    fn delete(&self, key: &str) -> Result<(), StoreError> {
        let span = tracing::debug_span!("store.delete", key);
        let _guard = span.enter();

        let result = self.inner.delete(key);
        match &result {
            Ok(()) => tracing::debug!("deleted"),
            Err(e) => tracing::error!(error = %e, "delete failed"),
        }

        result
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;
