//! Virtual clock for scripted sessions.
//!
//! Deterministic nanosecond time source used in place of the wall clock
//! during replay, so event timestamps are reproducible across runs.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

#[derive(Clone, Default)]
pub struct VirtualClock {
    offset_ns: Arc<AtomicU64>,
}

impl VirtualClock {
    /// Creates a clock starting at the given nanosecond offset.
    pub fn new(start_ns: u64) -> Self {
        Self {
            offset_ns: Arc::new(AtomicU64::new(start_ns)),
        }
    }

    /// Current virtual time in nanoseconds.
    #[inline]
    pub fn now_ns(&self) -> u64 {
        self.offset_ns.load(Ordering::Acquire)
    }

    /// Advances by the given number of nanoseconds.
    #[inline]
    pub fn advance_ns(&self, ns: u64) {
        self.offset_ns.fetch_add(ns, Ordering::Release);
    }

    /// Advances by whole seconds, matching the session tick granularity.
    #[inline]
    pub fn advance_secs(&self, secs: u64) {
        self.advance_ns(secs * 1_000_000_000);
    }
}
