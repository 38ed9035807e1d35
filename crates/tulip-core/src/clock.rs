//! Time oracle.
//!
//! The engine never reads wall-clock time itself; every time-sensitive
//! operation asks its [`Clock`]. [`SystemClock`] is the production source,
//! [`ManualClock`] a shared settable clock for tests and simulations.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;

use crate::types::Timestamp;

/// Source of the current timestamp.
pub trait Clock: Send + Sync {
    /// Current time in Unix seconds.
    fn now(&self) -> Timestamp;
}

/// Wall clock backed by `chrono::Utc`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        // Pre-epoch readings clamp to zero.
        u64::try_from(Utc::now().timestamp()).unwrap_or(0)
    }
}

/// Settable clock. Clones share the same reading.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Arc<AtomicU64>,
}

impl ManualClock {
    pub fn new(now: Timestamp) -> Self {
        Self { now: Arc::new(AtomicU64::new(now)) }
    }

    pub fn set(&self, now: Timestamp) {
        self.now.store(now, Ordering::SeqCst);
    }

    /// Move the clock forward by `secs`, saturating at `u64::MAX`.
    pub fn advance(&self, secs: u64) {
        // fetch_update only fails if the closure returns None.
        let _ = self
            .now
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |t| Some(t.saturating_add(secs)));
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        self.now.load(Ordering::SeqCst)
    }
}
