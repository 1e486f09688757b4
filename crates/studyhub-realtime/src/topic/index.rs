//! Topic index — maps topics to member connections and back.
//!
//! Keeps a forward map (topic → members) for O(targets) fan-out and a
//! reverse map (connection → topics) so teardown can deregister a
//! connection from every topic it joined. The reverse map is the
//! connection's subscribed-topic set; both maps are only ever mutated
//! through this index, which keeps them symmetric.

use std::collections::HashSet;

use dashmap::DashMap;

use studyhub_core::types::{ConnectionId, TopicId};

use super::topic::Topic;

/// Registry of topic memberships.
#[derive(Debug, Default)]
pub struct TopicIndex {
    /// Topic ID → topic with member set.
    topics: DashMap<TopicId, Topic>,
    /// Connection ID → set of subscribed topic IDs (reverse index).
    by_connection: DashMap<ConnectionId, HashSet<TopicId>>,
}

impl TopicIndex {
    /// Creates an empty index.
    pub fn new() -> Self {
        Self {
            topics: DashMap::new(),
            by_connection: DashMap::new(),
        }
    }

    /// Adds a connection to a topic, creating the topic on first use.
    pub fn subscribe(&self, topic_id: TopicId, conn_id: ConnectionId) {
        self.topics
            .entry(topic_id.clone())
            .or_insert_with(|| Topic::new(topic_id.clone()))
            .add(conn_id);
        self.by_connection
            .entry(conn_id)
            .or_default()
            .insert(topic_id);
    }

    /// Removes a connection from a topic. Empty topics are pruned so
    /// topic churn cannot leak memory.
    pub fn unsubscribe(&self, topic_id: &TopicId, conn_id: &ConnectionId) {
        if let Some(mut topic) = self.topics.get_mut(topic_id) {
            topic.remove(conn_id);
            if topic.is_empty() {
                drop(topic);
                self.topics.remove(topic_id);
            }
        }
        if let Some(mut subscribed) = self.by_connection.get_mut(conn_id) {
            subscribed.remove(topic_id);
            if subscribed.is_empty() {
                drop(subscribed);
                self.by_connection.remove(conn_id);
            }
        }
    }

    /// Removes a connection from every topic it joined, returning the
    /// topics it was subscribed to.
    pub fn unsubscribe_all(&self, conn_id: &ConnectionId) -> HashSet<TopicId> {
        let subscribed = self
            .by_connection
            .remove(conn_id)
            .map(|(_, topics)| topics)
            .unwrap_or_default();
        for topic_id in &subscribed {
            if let Some(mut topic) = self.topics.get_mut(topic_id) {
                topic.remove(conn_id);
                if topic.is_empty() {
                    drop(topic);
                    self.topics.remove(topic_id);
                }
            }
        }
        subscribed
    }

    /// Returns all member connection IDs of a topic. Unknown topics
    /// yield an empty set, never an error.
    pub fn members_of(&self, topic_id: &TopicId) -> Vec<ConnectionId> {
        self.topics
            .get(topic_id)
            .map(|topic| topic.member_ids())
            .unwrap_or_default()
    }

    /// Returns the topics a connection is subscribed to.
    pub fn topics_of(&self, conn_id: &ConnectionId) -> HashSet<TopicId> {
        self.by_connection
            .get(conn_id)
            .map(|entry| entry.value().clone())
            .unwrap_or_default()
    }

    /// Number of subscriptions held by a connection.
    pub fn subscription_count(&self, conn_id: &ConnectionId) -> usize {
        self.by_connection
            .get(conn_id)
            .map(|entry| entry.value().len())
            .unwrap_or(0)
    }

    /// Total number of live (non-empty) topics.
    pub fn topic_count(&self) -> usize {
        self.topics.len()
    }
}
