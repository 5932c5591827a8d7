// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
// Enable coverage(off) attribute for excluding test infrastructure
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! keylock-core: mutual exclusion over named resources shared by processes
//!
//! This crate provides:
//! - The [`KeyValueStore`] contract locks are built on
//! - A [`LockManager`] with try-once, blocking and reentrant acquisition
//! - Owner identifiers, a clock abstraction and configuration

pub mod clock;
pub mod config;
pub mod coordination;
pub mod error;
pub mod owner;
pub mod store;

// Re-exports
pub use clock::{Clock, FakeClock, SystemClock, FAKE_YIELD_TICK};
pub use config::{ConfigError, LockConfig, DEFAULT_KEY_PREFIX};
pub use coordination::{Acquisition, LockGuard, LockManager, ReentryTracker, Release};
pub use error::LockError;
pub use owner::{OwnerId, OwnerIdGen, SequentialOwnerIdGen, UuidOwnerIdGen, ANONYMOUS_OWNER};
pub use store::{KeyValueStore, StoreError};

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
pub use store::{FakeStore, StoreCall};
