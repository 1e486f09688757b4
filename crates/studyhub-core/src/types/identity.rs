//! Caller identity as supplied by the upstream auth layer.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The principal behind a subscription or publish call.
///
/// The hub treats identity as opaque metadata; authorization is
/// resolved by the auth collaborator before requests reach the hub.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "id", rename_all = "snake_case")]
pub enum Identity {
    /// An authenticated platform user.
    User(Uuid),
    /// An unauthenticated caller (public feeds, demo channels).
    Anonymous,
}

impl Identity {
    /// Returns the user id for authenticated callers.
    pub fn user_id(&self) -> Option<Uuid> {
        match self {
            Self::User(id) => Some(*id),
            Self::Anonymous => None,
        }
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User(id) => write!(f, "user:{id}"),
            Self::Anonymous => write!(f, "anonymous"),
        }
    }
}
