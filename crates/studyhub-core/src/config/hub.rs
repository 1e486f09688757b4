//! Event hub configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// What to do when a connection mailbox is full at publish time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OverflowPolicy {
    /// Evict the oldest queued event to make room for the new one.
    DropOldest,
    /// Reject the new event and keep the queue as-is.
    DropNewest,
}

impl Default for OverflowPolicy {
    fn default() -> Self {
        Self::DropOldest
    }
}

/// Event hub configuration, shared by every feature hub instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HubConfig {
    /// Maximum buffered events per connection mailbox.
    #[serde(default = "default_mailbox_capacity")]
    pub mailbox_capacity: usize,
    /// Behavior when a mailbox is full at publish time.
    #[serde(default)]
    pub overflow_policy: OverflowPolicy,
    /// Idle time before a keepalive frame is emitted, in milliseconds.
    #[serde(default = "default_keepalive_interval_ms")]
    pub keepalive_interval_ms: u64,
    /// Maximum topic subscriptions per connection.
    #[serde(default = "default_max_topics")]
    pub max_topics_per_connection: usize,
}

impl HubConfig {
    /// Keepalive interval as a [`Duration`].
    pub fn keepalive_interval(&self) -> Duration {
        Duration::from_millis(self.keepalive_interval_ms)
    }
}

impl Default for HubConfig {
    fn default() -> Self {
        Self {
            mailbox_capacity: default_mailbox_capacity(),
            overflow_policy: OverflowPolicy::default(),
            keepalive_interval_ms: default_keepalive_interval_ms(),
            max_topics_per_connection: default_max_topics(),
        }
    }
}

fn default_mailbox_capacity() -> usize {
    256
}

fn default_keepalive_interval_ms() -> u64 {
    20_000
}

fn default_max_topics() -> usize {
    50
}
