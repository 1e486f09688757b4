//! Demo ticker configuration.

use serde::{Deserialize, Serialize};

/// Settings for the demo tick publisher.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TickerConfig {
    /// Whether the ticker background task runs at all.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Seconds between published ticks.
    #[serde(default = "default_interval")]
    pub interval_seconds: u64,
}

impl Default for TickerConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            interval_seconds: default_interval(),
        }
    }
}

fn default_enabled() -> bool {
    true
}

fn default_interval() -> u64 {
    5
}
