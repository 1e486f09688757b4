//! Announcement feature events.
//!
//! Course-scoped announcements fan out on `course:<uuid>` topics;
//! platform-wide announcements broadcast to every connection.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use studyhub_core::types::TopicId;

use super::{HubEvent, Target};

/// Derives the topic for a course feed.
pub fn course_topic(course_id: Uuid) -> TopicId {
    TopicId::from_parts("course", course_id)
}

/// Events delivered to announcement feed subscribers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum AnnouncementEvent {
    /// A new announcement was published.
    AnnouncementPosted {
        /// Announcement identifier from the persistence layer.
        announcement_id: Uuid,
        /// Scoping course, or `None` for a platform-wide broadcast.
        course_id: Option<Uuid>,
        /// Headline.
        title: String,
        /// Body text.
        body: String,
        /// Publication timestamp.
        posted_at: DateTime<Utc>,
    },
    /// A previously published announcement was withdrawn.
    AnnouncementRetracted {
        /// Announcement being withdrawn.
        announcement_id: Uuid,
        /// Scoping course, or `None` for platform-wide.
        course_id: Option<Uuid>,
    },
}

impl AnnouncementEvent {
    fn course_id(&self) -> Option<Uuid> {
        match self {
            Self::AnnouncementPosted { course_id, .. }
            | Self::AnnouncementRetracted { course_id, .. } => *course_id,
        }
    }
}

impl HubEvent for AnnouncementEvent {
    fn kind(&self) -> &'static str {
        match self {
            Self::AnnouncementPosted { .. } => "announcement-posted",
            Self::AnnouncementRetracted { .. } => "announcement-retracted",
        }
    }

    fn target(&self) -> Target {
        match self.course_id() {
            Some(course_id) => Target::Topic(course_topic(course_id)),
            None => Target::All,
        }
    }
}
