use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Top-level application settings container.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct AppSettings {
    pub auto_click: AutoClickSettings,
    pub messaging: MessagingSettings,
    pub logging: LoggingSettings,
}

/// Controls how stored rules are applied when a page loads.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AutoClickSettings {
    pub enabled: bool,
    /// Stop at the first rule that clicks something. When false every
    /// matching rule gets its own single-shot attempt.
    pub stop_after_first_click: bool,
}

impl Default for AutoClickSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            stop_after_first_click: true,
        }
    }
}

/// Coordinator ↔ page messaging settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MessagingSettings {
    /// How long the coordinator waits for a page context to answer.
    pub response_timeout_ms: u64,
}

impl MessagingSettings {
    /// Timeout for coordinator → page requests.
    pub fn response_timeout(&self) -> Duration {
        Duration::from_millis(self.response_timeout_ms)
    }
}

impl Default for MessagingSettings {
    fn default() -> Self {
        Self {
            response_timeout_ms: 2000,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingSettings {
    /// Default filter directive; `RUST_LOG` takes precedence.
    pub level: String,
    /// Emit JSON lines instead of human-readable output.
    pub json: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}
