//! The event hub: single entry point for publishing and subscribing.
//!
//! Composes the connection registry and topic index. One hub instance
//! exists per feature (chat, announcements, ticker), each parameterized
//! by its event type and constructed explicitly at server boot — there
//! is no ambient global hub.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{debug, info, warn};

use studyhub_core::config::hub::HubConfig;
use studyhub_core::types::{ConnectionId, Identity, TopicId};
use studyhub_core::{AppError, AppResult};

use crate::connection::mailbox::{MailboxReceiver, PushOutcome};
use crate::connection::registry::ConnectionRegistry;
use crate::event::{HubEvent, Target};
use crate::topic::index::TopicIndex;

/// In-memory broker coordinating topic subscriptions and event fan-out
/// for one feature's event type.
pub struct EventHub<E: HubEvent> {
    /// Short feature label used in log context (`chat`, `announcements`).
    name: &'static str,
    /// Live connections and their mailboxes.
    registry: ConnectionRegistry<E>,
    /// Topic membership, forward and reverse.
    topics: TopicIndex,
    /// Hub settings.
    config: HubConfig,
    /// Set once shutdown begins; new subscribes are refused.
    shutting_down: AtomicBool,
}

impl<E: HubEvent> EventHub<E> {
    /// Creates a hub with the given settings.
    pub fn new(name: &'static str, config: HubConfig) -> Arc<Self> {
        let hub = Arc::new(Self {
            name,
            registry: ConnectionRegistry::new(config.mailbox_capacity, config.overflow_policy),
            topics: TopicIndex::new(),
            config,
            shutting_down: AtomicBool::new(false),
        });
        info!(hub = name, "Event hub initialized");
        hub
    }

    /// Registers a connection and subscribes it to the initial topics.
    ///
    /// Validation happens before any registration, so a failed
    /// subscribe leaves no partial state behind. The returned
    /// [`Subscription`] tears the connection down when dropped.
    pub fn subscribe(
        self: &Arc<Self>,
        identity: Identity,
        initial_topics: Vec<TopicId>,
    ) -> AppResult<Subscription<E>> {
        if self.shutting_down.load(Ordering::SeqCst) {
            return Err(AppError::service_unavailable("hub is shutting down"));
        }
        if initial_topics.len() > self.config.max_topics_per_connection {
            return Err(AppError::validation(format!(
                "requested {} topics, maximum is {}",
                initial_topics.len(),
                self.config.max_topics_per_connection
            )));
        }

        let (handle, mailbox) = self.registry.register(identity);
        for topic_id in initial_topics {
            self.topics.subscribe(topic_id, handle.id);
        }

        // Shutdown may have started after the check above; its snapshot
        // of live connections can miss this one, so tear it down here.
        if self.shutting_down.load(Ordering::SeqCst) {
            self.teardown(&handle.id);
            return Err(AppError::service_unavailable("hub is shutting down"));
        }

        info!(
            hub = self.name,
            conn_id = %handle.id,
            identity = %identity,
            "Connection registered"
        );

        Ok(Subscription {
            connection_id: handle.id,
            mailbox,
            hub: Arc::clone(self),
        })
    }

    /// Fans an event out to every connection subscribed to its target.
    ///
    /// Never blocks on a slow consumer: a full mailbox triggers the
    /// configured overflow policy, which is logged and swallowed.
    /// Publishing to a topic with no members is a successful no-op.
    /// Returns the number of mailboxes the event was queued into.
    pub fn publish(&self, event: &E) -> usize {
        let target_ids = match event.target() {
            Target::Topic(topic_id) => self.topics.members_of(&topic_id),
            Target::All => self.registry.all_ids(),
        };

        let mut delivered = 0;
        for conn_id in &target_ids {
            let Some(handle) = self.registry.get(conn_id) else {
                continue;
            };
            match handle.send(event.clone()) {
                PushOutcome::Delivered => delivered += 1,
                PushOutcome::DroppedOldest => {
                    delivered += 1;
                    warn!(
                        hub = self.name,
                        conn_id = %conn_id,
                        kind = event.kind(),
                        "Mailbox full, evicted oldest queued event"
                    );
                }
                PushOutcome::Rejected => {
                    warn!(
                        hub = self.name,
                        conn_id = %conn_id,
                        kind = event.kind(),
                        "Mailbox full, event dropped"
                    );
                }
                PushOutcome::Closed => {
                    debug!(
                        hub = self.name,
                        conn_id = %conn_id,
                        "Publish raced with teardown, mailbox closed"
                    );
                }
            }
        }
        delivered
    }

    /// Atomically reshapes a connection's topic set (room switch).
    pub fn change_subscription(
        &self,
        conn_id: &ConnectionId,
        add: Vec<TopicId>,
        remove: Vec<TopicId>,
    ) -> AppResult<()> {
        let handle = self
            .registry
            .get(conn_id)
            .ok_or_else(|| AppError::not_found(format!("no live connection {conn_id}")))?;

        let projected = self.topics.subscription_count(conn_id) + add.len();
        if projected > self.config.max_topics_per_connection {
            return Err(AppError::validation(format!(
                "connection would hold {projected} topics, maximum is {}",
                self.config.max_topics_per_connection
            )));
        }

        for topic_id in remove {
            self.topics.unsubscribe(&topic_id, conn_id);
        }
        for topic_id in add {
            self.topics.subscribe(topic_id, handle.id);
        }

        // A teardown may have completed between the lookup above and the
        // index writes. Roll the writes back so a dead connection never
        // lingers in the index; a teardown still in flight removes them
        // itself via unsubscribe_all.
        if !handle.is_alive() || self.registry.get(conn_id).is_none() {
            self.topics.unsubscribe_all(conn_id);
            return Err(AppError::not_found(format!(
                "connection {conn_id} closed during subscription change"
            )));
        }

        debug!(hub = self.name, conn_id = %conn_id, "Subscription changed");
        Ok(())
    }

    /// Removes a connection from the registry and from every topic.
    ///
    /// Idempotent: tearing down an absent connection is a no-op.
    /// Invoked automatically when the connection's [`Subscription`]
    /// drops, which the stream adapter guarantees on every exit route.
    pub fn teardown(&self, conn_id: &ConnectionId) {
        if let Some(handle) = self.registry.unregister(conn_id) {
            handle.mark_closed();
            let topics = self.topics.unsubscribe_all(conn_id);
            info!(
                hub = self.name,
                conn_id = %conn_id,
                topics = topics.len(),
                "Connection torn down"
            );
        }
    }

    /// Stops the hub: refuses new subscriptions and force-closes every
    /// live connection, ending their streams.
    pub fn shutdown(&self) {
        self.shutting_down.store(true, Ordering::SeqCst);
        let connections = self.registry.all_connections();
        for handle in &connections {
            self.teardown(&handle.id);
        }
        info!(
            hub = self.name,
            closed = connections.len(),
            "Event hub shut down"
        );
    }

    /// Keepalive interval configured for this hub's streams.
    pub fn keepalive_interval(&self) -> std::time::Duration {
        self.config.keepalive_interval()
    }

    /// Number of live connections.
    pub fn connection_count(&self) -> usize {
        self.registry.connection_count()
    }

    /// Number of live (non-empty) topics.
    pub fn topic_count(&self) -> usize {
        self.topics.topic_count()
    }

    /// Current members of a topic (diagnostics).
    pub fn members_of(&self, topic_id: &TopicId) -> Vec<ConnectionId> {
        self.topics.members_of(topic_id)
    }
}

impl<E: HubEvent> std::fmt::Debug for EventHub<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventHub")
            .field("name", &self.name)
            .field("connections", &self.connection_count())
            .field("topics", &self.topic_count())
            .finish()
    }
}

/// A live subscription: the exclusive pull side of one connection's
/// mailbox plus the hub reference needed for cleanup.
///
/// Dropping the subscription tears the connection down — client
/// disconnects, stream errors, and task cancellation all funnel
/// through this single cleanup path.
pub struct Subscription<E: HubEvent> {
    /// Id of the registered connection.
    pub connection_id: ConnectionId,
    mailbox: MailboxReceiver<E>,
    hub: Arc<EventHub<E>>,
}

impl<E: HubEvent> Subscription<E> {
    /// Waits for the next delivered event; `None` once the connection
    /// is torn down and the mailbox drained.
    pub async fn recv(&mut self) -> Option<E> {
        self.mailbox.recv().await
    }

    /// Number of events currently queued (diagnostics and tests).
    pub fn pending(&self) -> usize {
        self.mailbox.len()
    }

    /// The hub this subscription belongs to.
    pub fn hub(&self) -> &Arc<EventHub<E>> {
        &self.hub
    }
}

impl<E: HubEvent> std::fmt::Debug for Subscription<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("connection_id", &self.connection_id)
            .field("pending", &self.pending())
            .finish()
    }
}

impl<E: HubEvent> Drop for Subscription<E> {
    fn drop(&mut self) {
        self.hub.teardown(&self.connection_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;
    use uuid::Uuid;

    use studyhub_core::config::hub::OverflowPolicy;
    use studyhub_core::error::ErrorKind;

    /// Minimal event type exercising the generic engine.
    #[derive(Debug, Clone, PartialEq, Eq, Serialize)]
    struct TestEvent {
        topic: Option<TopicId>,
        seq: u32,
    }

    impl HubEvent for TestEvent {
        fn kind(&self) -> &'static str {
            "test"
        }

        fn target(&self) -> Target {
            match &self.topic {
                Some(topic_id) => Target::Topic(topic_id.clone()),
                None => Target::All,
            }
        }
    }

    fn topic(name: &str) -> TopicId {
        TopicId::parse(name).expect("valid topic")
    }

    fn on_topic(name: &str, seq: u32) -> TestEvent {
        TestEvent {
            topic: Some(topic(name)),
            seq,
        }
    }

    fn hub() -> Arc<EventHub<TestEvent>> {
        EventHub::new("test", HubConfig::default())
    }

    #[tokio::test]
    async fn test_subscriber_receives_published_event() {
        let hub = hub();
        let mut sub = hub
            .subscribe(Identity::Anonymous, vec![topic("room-1")])
            .expect("subscribe");

        let delivered = hub.publish(&on_topic("room-1", 1));
        assert_eq!(delivered, 1);
        assert_eq!(sub.recv().await, Some(on_topic("room-1", 1)));
    }

    #[tokio::test]
    async fn test_fanout_respects_topic_membership() {
        let hub = hub();
        let mut x = hub
            .subscribe(Identity::Anonymous, vec![topic("room-1")])
            .expect("subscribe x");
        let mut y = hub
            .subscribe(Identity::Anonymous, vec![topic("room-2")])
            .expect("subscribe y");

        hub.publish(&on_topic("room-1", 7));
        assert_eq!(x.recv().await, Some(on_topic("room-1", 7)));
        assert_eq!(y.pending(), 0);
    }

    #[tokio::test]
    async fn test_per_connection_order_is_publish_order() {
        let hub = hub();
        let mut sub = hub
            .subscribe(Identity::Anonymous, vec![topic("room-1")])
            .expect("subscribe");

        for seq in 1..=5 {
            hub.publish(&on_topic("room-1", seq));
        }
        for seq in 1..=5 {
            assert_eq!(sub.recv().await, Some(on_topic("room-1", seq)));
        }
    }

    #[tokio::test]
    async fn test_publish_to_empty_topic_is_noop() {
        let hub = hub();
        assert_eq!(hub.publish(&on_topic("room-empty", 1)), 0);
    }

    #[tokio::test]
    async fn test_broadcast_reaches_every_connection() {
        let hub = hub();
        let mut x = hub
            .subscribe(Identity::Anonymous, vec![topic("room-1")])
            .expect("subscribe x");
        let mut y = hub
            .subscribe(Identity::Anonymous, vec![])
            .expect("subscribe y");

        let event = TestEvent {
            topic: None,
            seq: 99,
        };
        assert_eq!(hub.publish(&event), 2);
        assert_eq!(x.recv().await, Some(event.clone()));
        assert_eq!(y.recv().await, Some(event));
    }

    #[tokio::test]
    async fn test_change_subscription_moves_rooms() {
        let hub = hub();
        let mut sub = hub
            .subscribe(Identity::Anonymous, vec![topic("room-1")])
            .expect("subscribe");

        hub.change_subscription(
            &sub.connection_id,
            vec![topic("room-2")],
            vec![topic("room-1")],
        )
        .expect("change");

        hub.publish(&on_topic("room-1", 1));
        hub.publish(&on_topic("room-2", 2));
        assert_eq!(sub.recv().await, Some(on_topic("room-2", 2)));
        assert_eq!(sub.pending(), 0);
    }

    #[tokio::test]
    async fn test_change_subscription_unknown_connection() {
        let hub = hub();
        let err = hub
            .change_subscription(&Uuid::new_v4(), vec![topic("room-1")], vec![])
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_teardown_is_total() {
        let hub = hub();
        let sub = hub
            .subscribe(Identity::Anonymous, vec![topic("room-1"), topic("room-2")])
            .expect("subscribe");
        let conn_id = sub.connection_id;

        hub.teardown(&conn_id);
        assert!(hub.members_of(&topic("room-1")).is_empty());
        assert!(hub.members_of(&topic("room-2")).is_empty());
        assert_eq!(hub.connection_count(), 0);
        assert_eq!(hub.topic_count(), 0);
    }

    #[tokio::test]
    async fn test_teardown_is_idempotent() {
        let hub = hub();
        let sub = hub
            .subscribe(Identity::Anonymous, vec![topic("room-1")])
            .expect("subscribe");
        let conn_id = sub.connection_id;

        hub.teardown(&conn_id);
        hub.teardown(&conn_id);
        assert_eq!(hub.connection_count(), 0);
    }

    #[tokio::test]
    async fn test_dropping_subscription_tears_down() {
        let hub = hub();
        let sub = hub
            .subscribe(Identity::Anonymous, vec![topic("room-1")])
            .expect("subscribe");
        drop(sub);

        // Publishing after the transport closed must not error and must
        // reach nobody.
        assert_eq!(hub.publish(&on_topic("room-1", 1)), 0);
        assert!(hub.members_of(&topic("room-1")).is_empty());
    }

    #[tokio::test]
    async fn test_subscribe_rejects_excessive_topics() {
        let config = HubConfig {
            max_topics_per_connection: 2,
            ..HubConfig::default()
        };
        let hub: Arc<EventHub<TestEvent>> = EventHub::new("test", config);
        let topics = vec![topic("a"), topic("b"), topic("c")];

        let err = hub.subscribe(Identity::Anonymous, topics).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        // No partial registration.
        assert_eq!(hub.connection_count(), 0);
        assert_eq!(hub.topic_count(), 0);
    }

    #[tokio::test]
    async fn test_overflow_drop_oldest_keeps_latest() {
        let config = HubConfig {
            mailbox_capacity: 2,
            overflow_policy: OverflowPolicy::DropOldest,
            ..HubConfig::default()
        };
        let hub: Arc<EventHub<TestEvent>> = EventHub::new("test", config);
        let mut sub = hub
            .subscribe(Identity::Anonymous, vec![topic("room-1")])
            .expect("subscribe");

        hub.publish(&on_topic("room-1", 1));
        hub.publish(&on_topic("room-1", 2));
        hub.publish(&on_topic("room-1", 3));

        assert_eq!(sub.pending(), 2);
        assert_eq!(sub.recv().await, Some(on_topic("room-1", 2)));
        assert_eq!(sub.recv().await, Some(on_topic("room-1", 3)));
    }

    #[test]
    fn test_subscription_change_racing_teardown_leaves_no_index_entries() {
        for _ in 0..50 {
            let hub: Arc<EventHub<TestEvent>> = EventHub::new("test", HubConfig::default());
            let sub = hub
                .subscribe(Identity::Anonymous, vec![topic("room-a")])
                .expect("subscribe");
            let conn_id = sub.connection_id;

            let worker = {
                let hub = Arc::clone(&hub);
                std::thread::spawn(move || loop {
                    if hub
                        .change_subscription(&conn_id, vec![topic("room-b")], vec![])
                        .is_err()
                    {
                        break;
                    }
                    if hub
                        .change_subscription(&conn_id, vec![], vec![topic("room-b")])
                        .is_err()
                    {
                        break;
                    }
                })
            };

            hub.teardown(&conn_id);
            worker.join().expect("worker thread");

            assert_eq!(hub.connection_count(), 0);
            assert_eq!(hub.topic_count(), 0);
            assert!(hub.members_of(&topic("room-a")).is_empty());
            assert!(hub.members_of(&topic("room-b")).is_empty());
        }
    }

    #[test]
    fn test_subscribes_racing_shutdown_do_not_survive_it() {
        let hub: Arc<EventHub<TestEvent>> = EventHub::new("test", HubConfig::default());

        let workers: Vec<_> = (0..4)
            .map(|_| {
                let hub = Arc::clone(&hub);
                std::thread::spawn(move || {
                    let mut subs = Vec::new();
                    while let Ok(sub) = hub.subscribe(Identity::Anonymous, vec![topic("room-1")]) {
                        subs.push(sub);
                    }
                    subs
                })
            })
            .collect();

        hub.shutdown();
        let held: Vec<_> = workers
            .into_iter()
            .map(|worker| worker.join().expect("worker thread"))
            .collect();

        // Shutdown has returned and every subscribe call has resolved:
        // nothing may remain live, even with subscriptions still held.
        assert_eq!(hub.connection_count(), 0);
        assert_eq!(hub.topic_count(), 0);
        drop(held);
    }

    #[tokio::test]
    async fn test_shutdown_ends_streams_and_refuses_subscribes() {
        let hub = hub();
        let mut sub = hub
            .subscribe(Identity::Anonymous, vec![topic("room-1")])
            .expect("subscribe");

        hub.shutdown();
        assert_eq!(sub.recv().await, None);
        assert_eq!(hub.connection_count(), 0);

        let err = hub.subscribe(Identity::Anonymous, vec![]).unwrap_err();
        assert_eq!(err.kind, ErrorKind::ServiceUnavailable);
    }
}
