// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Clock abstraction for testable time handling
//!
//! The lock manager measures its wait window through a [`Clock`], and the
//! in-memory store computes record expiry from one. Swapping in a
//! [`FakeClock`] lets tests expire records without real sleeps.

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// A clock that provides the current time
pub trait Clock: Clone + Send + Sync {
    fn now(&self) -> Instant;

    /// Block the calling thread for `duration`
    fn sleep(&self, duration: Duration);

    /// Give up the remainder of a busy-poll iteration
    fn yield_now(&self);
}

/// Real system clock
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }

    fn yield_now(&self) {
        std::thread::yield_now();
    }
}

/// Time a [`FakeClock`] advances per `yield_now`
pub const FAKE_YIELD_TICK: Duration = Duration::from_millis(1);

/// Fake clock for testing with controllable time
///
/// Clones share the same underlying instant. Sleeping advances the clock
/// instead of blocking, and yielding advances it by [`FAKE_YIELD_TICK`] so
/// busy polls still reach their deadline.
#[derive(Clone, Debug)]
pub struct FakeClock {
    current: Arc<Mutex<Instant>>,
}

impl FakeClock {
    pub fn new() -> Self {
        Self {
            current: Arc::new(Mutex::new(Instant::now())),
        }
    }

    /// Advance the clock by the given duration
    pub fn advance(&self, duration: Duration) {
        let mut current = self.current.lock().unwrap_or_else(|e| e.into_inner());
        *current += duration;
    }

    /// Set the clock to a specific instant
    pub fn set(&self, instant: Instant) {
        let mut current = self.current.lock().unwrap_or_else(|e| e.into_inner());
        *current = instant;
    }
}

impl Default for FakeClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for FakeClock {
    fn now(&self) -> Instant {
        *self.current.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn sleep(&self, duration: Duration) {
        self.advance(duration);
    }

    fn yield_now(&self) {
        self.advance(FAKE_YIELD_TICK);
    }
}

#[cfg(test)]
#[path = "clock_tests.rs"]
mod tests;
