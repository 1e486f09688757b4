//! Bounded per-connection delivery queue.
//!
//! A mailbox is a FIFO queue with a hard capacity and an explicit
//! overflow policy. The sender side is held by the hub and never
//! blocks; the receiver side is exclusively owned by one connection's
//! stream adapter. `tokio::sync::mpsc` cannot express drop-oldest
//! (the sender has no access to the queue head), so the queue is a
//! mutex-guarded `VecDeque` paired with a `Notify` for wakeups.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use tokio::sync::Notify;

use studyhub_core::config::hub::OverflowPolicy;

/// Result of a non-blocking push into a mailbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PushOutcome {
    /// The event was queued.
    Delivered,
    /// The mailbox was full; the oldest queued event was evicted to
    /// make room (drop-oldest policy).
    DroppedOldest,
    /// The mailbox was full; the new event was discarded
    /// (drop-newest policy).
    Rejected,
    /// The mailbox has been closed; the event was discarded.
    Closed,
}

struct MailboxState<E> {
    queue: VecDeque<E>,
    closed: bool,
}

struct Shared<E> {
    state: Mutex<MailboxState<E>>,
    notify: Notify,
    capacity: usize,
    policy: OverflowPolicy,
}

/// Factory for a connected sender/receiver pair.
pub struct Mailbox;

impl Mailbox {
    /// Creates a bounded mailbox with the given capacity and overflow
    /// policy, returning the push handle and the exclusive pull handle.
    pub fn bounded<E>(
        capacity: usize,
        policy: OverflowPolicy,
    ) -> (MailboxSender<E>, MailboxReceiver<E>) {
        let shared = Arc::new(Shared {
            state: Mutex::new(MailboxState {
                queue: VecDeque::with_capacity(capacity.min(64)),
                closed: false,
            }),
            notify: Notify::new(),
            capacity,
            policy,
        });
        (
            MailboxSender {
                shared: Arc::clone(&shared),
            },
            MailboxReceiver { shared },
        )
    }
}

/// Push handle. Cloned freely; only the hub writes through it.
pub struct MailboxSender<E> {
    shared: Arc<Shared<E>>,
}

impl<E> Clone for MailboxSender<E> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<E> MailboxSender<E> {
    /// Queues an event without blocking. A full queue triggers the
    /// configured overflow policy.
    pub fn push(&self, event: E) -> PushOutcome {
        let outcome = {
            let mut state = self
                .shared
                .state
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            if state.closed {
                return PushOutcome::Closed;
            }
            if state.queue.len() >= self.shared.capacity {
                match self.shared.policy {
                    OverflowPolicy::DropOldest => {
                        state.queue.pop_front();
                        state.queue.push_back(event);
                        PushOutcome::DroppedOldest
                    }
                    OverflowPolicy::DropNewest => PushOutcome::Rejected,
                }
            } else {
                state.queue.push_back(event);
                PushOutcome::Delivered
            }
        };
        if outcome != PushOutcome::Rejected {
            self.shared.notify.notify_one();
        }
        outcome
    }

    /// Closes the mailbox and wakes the receiver. Pending events remain
    /// readable; further pushes are discarded.
    pub fn close(&self) {
        let mut state = self
            .shared
            .state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        state.closed = true;
        drop(state);
        self.shared.notify.notify_one();
    }

    /// Whether the mailbox has been closed.
    pub fn is_closed(&self) -> bool {
        self.shared
            .state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .closed
    }
}

/// Pull handle, exclusively owned by one connection's consumer loop.
pub struct MailboxReceiver<E> {
    shared: Arc<Shared<E>>,
}

impl<E> MailboxReceiver<E> {
    /// Waits for the next queued event.
    ///
    /// Returns `None` once the mailbox is closed and drained. Cancel
    /// safe: no event is held across an await point, so dropping the
    /// future (e.g. when the keepalive timer wins a `select!`) never
    /// loses an event.
    pub async fn recv(&mut self) -> Option<E> {
        loop {
            {
                let mut state = self
                    .shared
                    .state
                    .lock()
                    .unwrap_or_else(|poisoned| poisoned.into_inner());
                if let Some(event) = state.queue.pop_front() {
                    return Some(event);
                }
                if state.closed {
                    return None;
                }
            }
            // notify_one stores a permit when no waiter is parked, so a
            // push between the check above and this await is not lost.
            self.shared.notify.notified().await;
        }
    }

    /// Pops the next event if one is queued, without waiting.
    pub fn try_recv(&mut self) -> Option<E> {
        self.shared
            .state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .queue
            .pop_front()
    }

    /// Number of currently queued events.
    pub fn len(&self) -> usize {
        self.shared
            .state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .queue
            .len()
    }

    /// Whether the queue is currently empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
