//! Connection registry — central table of all live connections.

use std::sync::Arc;

use dashmap::DashMap;

use studyhub_core::config::hub::OverflowPolicy;
use studyhub_core::types::{ConnectionId, Identity};

use super::handle::ConnectionHandle;
use super::mailbox::{Mailbox, MailboxReceiver};

/// Thread-safe table of all live connections, keyed by connection ID.
pub struct ConnectionRegistry<E> {
    /// Connection ID → connection handle.
    by_id: DashMap<ConnectionId, Arc<ConnectionHandle<E>>>,
    /// Mailbox capacity for newly registered connections.
    mailbox_capacity: usize,
    /// Overflow policy for newly registered connections.
    overflow_policy: OverflowPolicy,
}

impl<E> ConnectionRegistry<E> {
    /// Creates an empty registry with the given mailbox settings.
    pub fn new(mailbox_capacity: usize, overflow_policy: OverflowPolicy) -> Self {
        Self {
            by_id: DashMap::new(),
            mailbox_capacity,
            overflow_policy,
        }
    }

    /// Allocates a connection with a fresh id and bounded mailbox and
    /// stores it. Returns the handle and the exclusive pull side.
    pub fn register(&self, identity: Identity) -> (Arc<ConnectionHandle<E>>, MailboxReceiver<E>) {
        let (tx, rx) = Mailbox::bounded(self.mailbox_capacity, self.overflow_policy);
        let handle = Arc::new(ConnectionHandle::new(identity, tx));
        self.by_id.insert(handle.id, Arc::clone(&handle));
        (handle, rx)
    }

    /// Looks up a connection by id.
    pub fn get(&self, conn_id: &ConnectionId) -> Option<Arc<ConnectionHandle<E>>> {
        self.by_id.get(conn_id).map(|entry| Arc::clone(entry.value()))
    }

    /// Removes a connection. Idempotent: removing an absent id is a
    /// no-op returning `None`.
    pub fn unregister(&self, conn_id: &ConnectionId) -> Option<Arc<ConnectionHandle<E>>> {
        self.by_id.remove(conn_id).map(|(_, handle)| handle)
    }

    /// Returns all live connection ids.
    pub fn all_ids(&self) -> Vec<ConnectionId> {
        self.by_id.iter().map(|entry| *entry.key()).collect()
    }

    /// Returns all live connection handles.
    pub fn all_connections(&self) -> Vec<Arc<ConnectionHandle<E>>> {
        self.by_id
            .iter()
            .map(|entry| Arc::clone(entry.value()))
            .collect()
    }

    /// Number of live connections.
    pub fn connection_count(&self) -> usize {
        self.by_id.len()
    }
}
