//! Per-feature event schemas and their wire codec.
//!
//! Each feature defines a closed tagged enum implementing [`HubEvent`].
//! The hub is generic over the event type; features only supply event
//! variants and topic derivation.

pub mod announcement;
pub mod chat;
pub mod codec;
pub mod ticker;

use serde::Serialize;

use studyhub_core::types::TopicId;

/// Delivery target of a published event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// All connections subscribed to the topic.
    Topic(TopicId),
    /// Every live connection on the hub.
    All,
}

/// An immutable, tagged event distributable through an
/// [`EventHub`](crate::hub::EventHub).
///
/// Events are fire-and-forget: cloned once per target mailbox, encoded
/// at the stream boundary, never persisted.
pub trait HubEvent: Clone + Send + Sync + Serialize + 'static {
    /// Wire-level discriminant, e.g. `message-sent`.
    fn kind(&self) -> &'static str;

    /// Where the event should be delivered.
    fn target(&self) -> Target;
}
