//! Bounded fan-out queue between the session runtime and notification
//! sinks.
//!
//! Multi-producer, single-consumer in practice: the runtime publishes each
//! accepted event and one drain task forwards them to logging/metrics.
//! Capacity is a hard bound; publishers drop (with a warning at the call
//! site) rather than block the signal-handling turn.

use crossbeam::queue::SegQueue;
use thiserror::Error;

use crate::event::SecurityEvent;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum EventError {
    #[error("notification queue capacity exceeded")]
    QueueFull,
}

pub struct EventBus {
    queue: SegQueue<SecurityEvent>,
    capacity: usize,
}

impl EventBus {
    /// Creates a new bus with a fixed capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            queue: SegQueue::new(),
            capacity,
        }
    }

    /// Enqueues an event for the sinks.
    pub fn publish(&self, event: SecurityEvent) -> Result<(), EventError> {
        if self.queue.len() >= self.capacity {
            return Err(EventError::QueueFull);
        }
        self.queue.push(event);
        Ok(())
    }

    /// Removes the oldest pending event, if any.
    pub fn drain_next(&self) -> Option<SecurityEvent> {
        self.queue.pop()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::Severity;
    use crate::signal::SignalKind;

    fn event(id: u64) -> SecurityEvent {
        SecurityEvent {
            id,
            kind: SignalKind::CopyAttempt,
            message: "Attempted to copy content".into(),
            occurred_at_ns: id,
            severity: Severity::Medium,
        }
    }

    #[test]
    fn preserves_publish_order() {
        let bus = EventBus::with_capacity(16);
        for id in 0..4 {
            bus.publish(event(id)).unwrap();
        }
        for id in 0..4 {
            assert_eq!(bus.drain_next().unwrap().id, id);
        }
        assert!(bus.drain_next().is_none());
    }

    #[test]
    fn rejects_beyond_capacity() {
        let bus = EventBus::with_capacity(2);
        bus.publish(event(0)).unwrap();
        bus.publish(event(1)).unwrap();
        assert_eq!(bus.publish(event(2)), Err(EventError::QueueFull));
        assert_eq!(bus.len(), 2);
    }
}
