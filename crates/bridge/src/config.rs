//! Bridge configuration
//!
//! Which executables to run, which broker they talk to, the topic root and
//! the timing of reads and publishes.

use std::time::Duration;

use crate::types::{
    DEFAULT_HOST, DEFAULT_PUBLISHER, DEFAULT_SUBSCRIBER, DEFAULT_TOPIC_ROOT, MAX_FRAGMENT_BYTES,
    POLL_INTERVAL_MS, PUBLISH_TIMEOUT_MS, SETTLE_DELAY_MS,
};

/// Bridge configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BridgeConfig {
    pub host: String,
    /// Broker port; `None` leaves it to the tools' default
    pub port: Option<u16>,
    /// Topic root without trailing slash
    pub topic_root: String,
    pub subscriber_program: String,
    pub publisher_program: String,
    pub poll_interval_ms: u64,
    pub publish_timeout_ms: u64,
    pub settle_delay_ms: u64,
    /// Cap on a buffered partial line; 0 disables it
    pub max_fragment_bytes: usize,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: None,
            topic_root: DEFAULT_TOPIC_ROOT.to_string(),
            subscriber_program: DEFAULT_SUBSCRIBER.to_string(),
            publisher_program: DEFAULT_PUBLISHER.to_string(),
            poll_interval_ms: POLL_INTERVAL_MS,
            publish_timeout_ms: PUBLISH_TIMEOUT_MS,
            settle_delay_ms: SETTLE_DELAY_MS,
            max_fragment_bytes: MAX_FRAGMENT_BYTES,
        }
    }
}

impl BridgeConfig {
    /// Create from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create from any variable lookup. Blank values and unparsable numbers
    /// fall back to the defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let non_empty = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .and_then(|s| if s.is_empty() { None } else { Some(s) })
        };

        let host = non_empty("TTT_MQTT_HOST").unwrap_or(defaults.host);
        let port = non_empty("TTT_MQTT_PORT").and_then(|s| s.parse().ok());
        let topic_root = non_empty("TTT_TOPIC")
            .map(|s| normalize_root(&s))
            .unwrap_or(defaults.topic_root);
        let subscriber_program = non_empty("TTT_MQTT_SUB").unwrap_or(defaults.subscriber_program);
        let publisher_program = non_empty("TTT_MQTT_PUB").unwrap_or(defaults.publisher_program);

        let poll_interval_ms = non_empty("TTT_POLL_MS")
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.poll_interval_ms);
        let publish_timeout_ms = non_empty("TTT_PUBLISH_TIMEOUT_MS")
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.publish_timeout_ms);
        let max_fragment_bytes = non_empty("TTT_MAX_FRAGMENT_BYTES")
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.max_fragment_bytes);

        Self {
            host,
            port,
            topic_root,
            subscriber_program,
            publisher_program,
            poll_interval_ms,
            publish_timeout_ms,
            settle_delay_ms: defaults.settle_delay_ms,
            max_fragment_bytes,
        }
    }

    /// Wildcard the subscriber listens on (`<root>/#`)
    pub fn subscribe_pattern(&self) -> String {
        format!("{}/#", self.topic_root)
    }

    /// `-h <host> [-p <port>]`, shared by both tools
    pub fn broker_args(&self) -> Vec<String> {
        let mut args = vec!["-h".to_string(), self.host.clone()];
        if let Some(port) = self.port {
            args.push("-p".to_string());
            args.push(port.to_string());
        }
        args
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.max(1))
    }

    pub fn publish_timeout(&self) -> Duration {
        Duration::from_millis(self.publish_timeout_ms)
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }
}

/// Strip trailing slashes so `<root>/board` comparisons stay exact
pub fn normalize_root(root: &str) -> String {
    root.trim().trim_end_matches('/').to_string()
}
