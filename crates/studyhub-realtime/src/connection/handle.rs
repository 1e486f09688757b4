//! Individual subscriber connection handle.

use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{DateTime, Utc};
use uuid::Uuid;

use studyhub_core::types::{ConnectionId, Identity};

use super::mailbox::{MailboxSender, PushOutcome};

/// A handle to a single live subscriber connection.
///
/// Holds the mailbox push side plus metadata about the subscribing
/// principal. The matching [`MailboxReceiver`](super::MailboxReceiver)
/// is owned by the connection's stream adapter and never stored here.
pub struct ConnectionHandle<E> {
    /// Unique connection ID, allocated at subscribe time.
    pub id: ConnectionId,
    /// The subscribing principal; opaque to the hub.
    pub identity: Identity,
    /// When the connection was established.
    pub connected_at: DateTime<Utc>,
    /// Push side of the connection's mailbox.
    sender: MailboxSender<E>,
    /// Whether the connection is still live.
    alive: AtomicBool,
}

impl<E> std::fmt::Debug for ConnectionHandle<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionHandle")
            .field("id", &self.id)
            .field("identity", &self.identity)
            .field("connected_at", &self.connected_at)
            .field("alive", &self.is_alive())
            .finish()
    }
}

impl<E> ConnectionHandle<E> {
    /// Creates a handle for a freshly registered connection.
    pub fn new(identity: Identity, sender: MailboxSender<E>) -> Self {
        Self {
            id: Uuid::new_v4(),
            identity,
            connected_at: Utc::now(),
            sender,
            alive: AtomicBool::new(true),
        }
    }

    /// Pushes an event into the connection's mailbox without blocking.
    pub fn send(&self, event: E) -> PushOutcome {
        if !self.is_alive() {
            return PushOutcome::Closed;
        }
        self.sender.push(event)
    }

    /// Whether the connection is still live.
    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::SeqCst)
    }

    /// Marks the connection closed and shuts its mailbox, waking the
    /// consumer loop so the stream can end.
    pub fn mark_closed(&self) {
        self.alive.store(false, Ordering::SeqCst);
        self.sender.close();
    }
}
