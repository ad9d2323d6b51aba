//! Violation ledger.
//!
//! Append-only, most-recent-first log of accepted events. Retention only
//! bounds the history kept for display; the violation counter is
//! independent and never decreases except on reset.

use std::collections::VecDeque;

use crate::event::SecurityEvent;

#[derive(Debug)]
pub struct ViolationLedger {
    retained: VecDeque<SecurityEvent>,
    retention: usize,
    count: u64,
}

impl ViolationLedger {
    pub fn new(retention: usize) -> Self {
        Self {
            retained: VecDeque::with_capacity(retention),
            retention,
            count: 0,
        }
    }

    /// Records an accepted event and returns the new violation count.
    ///
    /// The event goes to the front of the retained sequence; entries past
    /// the retention bound are evicted oldest-first. No entry is ever
    /// rewritten or reordered after insertion.
    pub fn record(&mut self, event: SecurityEvent) -> u64 {
        self.retained.push_front(event);
        self.retained.truncate(self.retention);
        self.count += 1;
        self.count
    }

    /// Cumulative count of accepted violations, independent of retention.
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Retained events, most recent first.
    pub fn recent(&self) -> impl Iterator<Item = &SecurityEvent> {
        self.retained.iter()
    }

    pub fn retained_len(&self) -> usize {
        self.retained.len()
    }

    pub fn retention(&self) -> usize {
        self.retention
    }

    /// Clears retained events and zeroes the counter.
    pub fn reset(&mut self) {
        self.retained.clear();
        self.count = 0;
    }
}
