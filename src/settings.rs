use crate::session::Cadence;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const SETTINGS_FILE: &str = "overlay_settings.json";
const DEFAULT_NOTIFICATION_SECS: u64 = 5;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// When enabled the application initialises the logger at debug level.
    pub debug_logging: bool,
    /// Optional file receiving log output instead of stdout.
    pub log_file: Option<String>,
    /// Delay between idle loop iterations in milliseconds.
    pub idle_interval_ms: u64,
    /// Delay between active frames in milliseconds.
    pub active_interval_ms: u64,
    /// Minimum number of seconds between two environment status samples.
    pub status_refresh_secs: u64,
    /// Seconds to wait before bringing up host services. Some hosts drop
    /// button messages when the overlay registers too early after boot.
    pub startup_delay_secs: u64,
    /// Upper bound on messages handled per loop iteration.
    pub max_messages_per_turn: usize,
    /// How long a notification stays on screen.
    pub notification_display_secs: f32,
    /// Notifications buffered between the listener and the screen.
    pub notification_mailbox: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            debug_logging: false,
            log_file: None,
            idle_interval_ms: 300,
            active_interval_ms: 40,
            status_refresh_secs: 5,
            startup_delay_secs: 0,
            max_messages_per_turn: 8,
            notification_display_secs: DEFAULT_NOTIFICATION_SECS as f32,
            notification_mailbox: 4,
        }
    }
}

impl Settings {
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path).unwrap_or_default();
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save(&self, path: &str) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn cadence(&self) -> Cadence {
        Cadence {
            idle_interval: Duration::from_millis(self.idle_interval_ms),
            active_interval: Duration::from_millis(self.active_interval_ms),
            max_messages_per_turn: self.max_messages_per_turn.max(1),
        }
    }

    pub fn status_refresh(&self) -> Duration {
        Duration::from_secs(self.status_refresh_secs)
    }

    /// Falls back to the default for values no `Duration` can hold.
    pub fn notification_display(&self) -> Duration {
        Duration::try_from_secs_f32(self.notification_display_secs.max(0.0)).unwrap_or_else(|err| {
            tracing::warn!(
                %err,
                secs = self.notification_display_secs,
                "invalid notification_display_secs, using default"
            );
            Duration::from_secs(DEFAULT_NOTIFICATION_SECS)
        })
    }
}
