//! Shared FIFO of pending notifications.

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::sync::Notify;

use crate::NotificationEvent;

/// Thread-safe FIFO buffer between producers and stream drain loops.
///
/// Delivery is "steal", not broadcast: each enqueued event is returned by
/// exactly one `try_dequeue` call, ever. If no stream is currently draining,
/// events wait in the queue indefinitely.
///
/// The queue is unbounded. At this system's event volume (one event per
/// interactive search) a capacity bound and overflow policy would add
/// complexity without a failure mode to guard against.
#[derive(Debug, Default)]
pub struct EventQueue {
    pending: Mutex<VecDeque<NotificationEvent>>,
    wake: Notify,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an event at the tail and wakes one waiting drain loop.
    ///
    /// Never blocks beyond the internal lock, never fails.
    pub fn enqueue(&self, event: NotificationEvent) {
        self.pending().push_back(event);
        self.wake.notify_one();
    }

    /// Removes and returns the head event, or `None` when the queue is
    /// empty. Never blocks beyond the internal lock.
    pub fn try_dequeue(&self) -> Option<NotificationEvent> {
        self.pending().pop_front()
    }

    /// Suspends until an enqueue wakes this caller or `max_wait` elapses,
    /// whichever comes first.
    ///
    /// Drain loops call this between empty polls so a fresh event is picked
    /// up as it arrives instead of after a full polling interval. A wake-up
    /// is only a hint: the caller must still go through `try_dequeue`, and
    /// may find another loop got there first.
    pub async fn wait_for_event(&self, max_wait: Duration) {
        let _ = tokio::time::timeout(max_wait, self.wake.notified()).await;
    }

    pub fn len(&self) -> usize {
        self.pending().len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending().is_empty()
    }

    fn pending(&self) -> MutexGuard<'_, VecDeque<NotificationEvent>> {
        // A poisoned lock means a holder panicked, not that the deque itself
        // is in an inconsistent state; push/pop are panic-free.
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
