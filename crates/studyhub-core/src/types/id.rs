//! Identifier types for the realtime layer.
//!
//! `ConnectionId` is a plain UUID allocated at subscribe time.
//! `TopicId` is a branded string validated on construction so that a
//! malformed topic is rejected before it ever reaches the hub.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;

/// Unique identifier for one live subscriber connection.
pub type ConnectionId = Uuid;

/// Maximum accepted length for a topic identifier.
const MAX_TOPIC_LEN: usize = 128;

/// A validated topic identifier (e.g. `room:<uuid>`, `course:<uuid>`,
/// `ticks`).
///
/// Constructed through [`TopicId::parse`], which enforces the character
/// set, or [`TopicId::from_parts`] for identifiers derived from already
/// typed values.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TopicId(String);

impl TopicId {
    /// Parses a raw string into a topic identifier.
    ///
    /// Accepts non-empty strings of at most 128 bytes consisting of
    /// ASCII alphanumerics, `:`, `-`, `_`, and `.`. Anything else is an
    /// `UnknownTopic` error.
    pub fn parse(raw: &str) -> Result<Self, AppError> {
        if raw.is_empty() {
            return Err(AppError::unknown_topic("topic identifier is empty"));
        }
        if raw.len() > MAX_TOPIC_LEN {
            return Err(AppError::unknown_topic(format!(
                "topic identifier exceeds {MAX_TOPIC_LEN} bytes"
            )));
        }
        let valid = raw
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b':' | b'-' | b'_' | b'.'));
        if !valid {
            return Err(AppError::unknown_topic(format!(
                "topic identifier '{raw}' contains invalid characters"
            )));
        }
        Ok(Self(raw.to_string()))
    }

    /// Builds a `<prefix>:<id>` topic from typed components.
    ///
    /// Intended for feature code deriving topics from UUIDs and fixed
    /// prefixes, which are valid by construction.
    pub fn from_parts(prefix: &str, id: impl fmt::Display) -> Self {
        let topic = format!("{prefix}:{id}");
        debug_assert!(TopicId::parse(&topic).is_ok());
        Self(topic)
    }

    /// Returns the topic identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TopicId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
