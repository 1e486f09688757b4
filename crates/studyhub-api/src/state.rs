//! Application state shared across all handlers.

use std::sync::Arc;

use studyhub_core::config::AppConfig;
use studyhub_realtime::EventHub;
use studyhub_realtime::event::announcement::AnnouncementEvent;
use studyhub_realtime::event::chat::ChatEvent;
use studyhub_realtime::event::ticker::TickEvent;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`. All fields are
/// `Arc`-wrapped for cheap cloning across tasks. Each feature gets its
/// own hub instance, constructed once at server boot.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Chat room event hub.
    pub chat: Arc<EventHub<ChatEvent>>,
    /// Announcement feed hub.
    pub announcements: Arc<EventHub<AnnouncementEvent>>,
    /// Demo ticker hub.
    pub ticker: Arc<EventHub<TickEvent>>,
}

impl AppState {
    /// Builds the state with freshly constructed hubs.
    pub fn new(config: AppConfig) -> Self {
        let hub_config = config.hub.clone();
        Self {
            config: Arc::new(config),
            chat: EventHub::new("chat", hub_config.clone()),
            announcements: EventHub::new("announcements", hub_config.clone()),
            ticker: EventHub::new("ticker", hub_config),
        }
    }

    /// Stops every hub, force-closing live streams.
    pub fn shutdown_hubs(&self) {
        self.chat.shutdown();
        self.announcements.shutdown();
        self.ticker.shutdown();
    }
}
