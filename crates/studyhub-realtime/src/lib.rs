//! # studyhub-realtime
//!
//! In-memory real-time event distribution for StudyHub. Provides:
//!
//! - A generic [`EventHub`] engine: connection registry, per-topic
//!   fan-out, bounded per-connection mailboxes
//! - Per-feature event schemas (chat, announcements, demo ticker) as
//!   closed tagged enums with SSE wire encoding
//! - A stream adapter that turns a subscription into a keepalive-aware
//!   frame stream with guaranteed teardown on every exit path
//!
//! Events are ephemeral: no persistence, no acknowledgement, no
//! delivery guarantee beyond "delivered if the mailbox is open and not
//! over capacity at publish time." Fan-out is single-process only.

pub mod connection;
pub mod event;
pub mod hub;
pub mod stream;
pub mod topic;

pub use connection::registry::ConnectionRegistry;
pub use event::{HubEvent, Target};
pub use hub::{EventHub, Subscription};
pub use stream::{StreamFrame, stream_frames};
pub use topic::index::TopicIndex;
