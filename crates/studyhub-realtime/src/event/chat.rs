//! Chat feature events. One topic per room: `room:<uuid>`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use studyhub_core::types::{Identity, TopicId};

use super::{HubEvent, Target};

/// Derives the topic for a chat room.
pub fn room_topic(room_id: Uuid) -> TopicId {
    TopicId::from_parts("room", room_id)
}

/// Events delivered to chat room subscribers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ChatEvent {
    /// A message was saved and should appear in the room.
    MessageSent {
        /// Room the message belongs to.
        room_id: Uuid,
        /// Message identifier from the persistence layer.
        message_id: Uuid,
        /// Who sent it.
        sender: Identity,
        /// Message body.
        body: String,
        /// Server-side timestamp.
        sent_at: DateTime<Utc>,
    },
    /// A reaction was added to an existing message.
    ReactionAdded {
        /// Room the message belongs to.
        room_id: Uuid,
        /// Message being reacted to.
        message_id: Uuid,
        /// Reaction emoji.
        emoji: String,
        /// Who reacted.
        reacted_by: Identity,
    },
    /// A user started typing.
    UserTyping {
        /// Room the user is typing in.
        room_id: Uuid,
        /// Who is typing.
        user: Identity,
    },
    /// A room member went online or offline.
    PresenceChanged {
        /// Room whose roster changed.
        room_id: Uuid,
        /// Affected user.
        user: Identity,
        /// Whether the user is now online.
        online: bool,
    },
}

impl ChatEvent {
    /// Room this event belongs to.
    pub fn room_id(&self) -> Uuid {
        match self {
            Self::MessageSent { room_id, .. }
            | Self::ReactionAdded { room_id, .. }
            | Self::UserTyping { room_id, .. }
            | Self::PresenceChanged { room_id, .. } => *room_id,
        }
    }
}

impl HubEvent for ChatEvent {
    fn kind(&self) -> &'static str {
        match self {
            Self::MessageSent { .. } => "message-sent",
            Self::ReactionAdded { .. } => "reaction-added",
            Self::UserTyping { .. } => "user-typing",
            Self::PresenceChanged { .. } => "presence-changed",
        }
    }

    fn target(&self) -> Target {
        Target::Topic(room_topic(self.room_id()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_matches_serde_tag() {
        let event = ChatEvent::UserTyping {
            room_id: Uuid::new_v4(),
            user: Identity::Anonymous,
        };
        let json = serde_json::to_value(&event).expect("serialize");
        assert_eq!(json["type"], event.kind());
    }

    #[test]
    fn test_target_is_room_topic() {
        let room_id = Uuid::new_v4();
        let event = ChatEvent::PresenceChanged {
            room_id,
            user: Identity::User(Uuid::new_v4()),
            online: true,
        };
        assert_eq!(event.target(), Target::Topic(room_topic(room_id)));
    }
}
