//! Demo ticker events, published by a background task on the shared
//! `ticks` topic.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use studyhub_core::types::TopicId;

use super::{HubEvent, Target};

/// Derives the shared ticker topic.
pub fn ticks_topic() -> TopicId {
    // "ticks" is within the topic grammar; parse cannot fail.
    TopicId::parse("ticks").unwrap_or_else(|_| unreachable!())
}

/// Events on the demo tick channel.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum TickEvent {
    /// Periodic tick.
    Tick {
        /// Monotonically increasing tick counter.
        seq: u64,
        /// When the tick was generated.
        at: DateTime<Utc>,
    },
}

impl HubEvent for TickEvent {
    fn kind(&self) -> &'static str {
        match self {
            Self::Tick { .. } => "tick",
        }
    }

    fn target(&self) -> Target {
        Target::Topic(ticks_topic())
    }
}
