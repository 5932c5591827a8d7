// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Lock coordination over a shared key-value store
//!
//! This module provides:
//! - **LockManager** - try-once, blocking and reentrant acquisition plus release
//! - **ReentryTracker** - process-wide nesting depth per (resource, owner)
//! - **LockGuard** - RAII release for a held lock

pub mod guard;
pub mod manager;
pub mod reentry;

pub use guard::LockGuard;
pub use manager::{Acquisition, LockManager, Release};
pub use reentry::ReentryTracker;
