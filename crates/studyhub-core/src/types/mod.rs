//! Shared type definitions.

pub mod id;
pub mod identity;

pub use id::{ConnectionId, TopicId};
pub use identity::Identity;
