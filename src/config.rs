//! Runtime configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Tunable settings for a tracker instance.
///
/// Deserializable so deployments can layer a config file over the defaults;
/// every field falls back individually.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackerConfig {
    /// Seconds of inactivity after which the session is signed out.
    #[serde(default = "default_idle_timeout_secs")]
    pub idle_timeout_secs: u64,

    /// Capacity of the repository actor's mailbox.
    #[serde(default = "default_mailbox_capacity")]
    pub mailbox_capacity: usize,
}

impl TrackerConfig {
    pub fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_timeout_secs)
    }

    /// Mailbox slots for the repository actor, floored at one: a bounded
    /// channel cannot have zero capacity, so a zero from a config file must
    /// not reach the channel constructor.
    pub fn mailbox_capacity(&self) -> usize {
        self.mailbox_capacity.max(1)
    }
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            idle_timeout_secs: default_idle_timeout_secs(),
            mailbox_capacity: default_mailbox_capacity(),
        }
    }
}

fn default_idle_timeout_secs() -> u64 {
    20 * 60
}

fn default_mailbox_capacity() -> usize {
    32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config: TrackerConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.idle_timeout_secs, 1200);
        assert_eq!(config.mailbox_capacity, 32);
    }

    #[test]
    fn idle_timeout_converts_to_duration() {
        let config = TrackerConfig {
            idle_timeout_secs: 90,
            ..TrackerConfig::default()
        };
        assert_eq!(config.idle_timeout(), Duration::from_secs(90));
    }

    #[test]
    fn zero_mailbox_capacity_is_floored_at_one() {
        let config: TrackerConfig = serde_json::from_str(r#"{"mailbox_capacity": 0}"#).unwrap();
        assert_eq!(config.mailbox_capacity, 0, "The raw field keeps the file's value");
        assert_eq!(config.mailbox_capacity(), 1);

        let config = TrackerConfig::default();
        assert_eq!(config.mailbox_capacity(), 32);
    }
}
