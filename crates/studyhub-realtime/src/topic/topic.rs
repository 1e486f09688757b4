//! Single topic with member tracking.

use std::collections::HashSet;

use studyhub_core::types::{ConnectionId, TopicId};

/// A single broadcast topic with a set of member connections.
#[derive(Debug, Clone)]
pub struct Topic {
    /// Topic identifier.
    pub id: TopicId,
    /// Set of member connection IDs.
    pub members: HashSet<ConnectionId>,
}

impl Topic {
    /// Creates a new empty topic.
    pub fn new(id: TopicId) -> Self {
        Self {
            id,
            members: HashSet::new(),
        }
    }

    /// Adds a member.
    pub fn add(&mut self, conn_id: ConnectionId) {
        self.members.insert(conn_id);
    }

    /// Removes a member.
    pub fn remove(&mut self, conn_id: &ConnectionId) {
        self.members.remove(conn_id);
    }

    /// Returns whether the topic has any members.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Returns member count.
    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    /// Returns all member connection IDs.
    pub fn member_ids(&self) -> Vec<ConnectionId> {
        self.members.iter().copied().collect()
    }
}
