//! Notification broker configuration

use serde::{Deserialize, Serialize};

use super::env_or;

/// Redis-list backed notification queue configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BrokerConfig {
    /// Broker connection URL
    pub url: String,

    /// Prefix of every queue key (`<prefix>:<queue>`)
    pub queue_prefix: String,

    /// Seconds a consumer blocks waiting for a message before polling again
    pub poll_timeout: u64,
}

impl Default for BrokerConfig {
    fn default() -> Self {
        Self {
            url: String::from("redis://localhost:6379"),
            queue_prefix: String::from("queue"),
            poll_timeout: 5,
        }
    }
}

impl BrokerConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            url: std::env::var("BROKER_URL")
                .or_else(|_| std::env::var("REDIS_URL"))
                .unwrap_or(defaults.url),
            queue_prefix: std::env::var("BROKER_QUEUE_PREFIX").unwrap_or(defaults.queue_prefix),
            poll_timeout: env_or("BROKER_POLL_TIMEOUT", defaults.poll_timeout),
        }
    }

    /// Key of the list holding pending messages
    pub fn queue_key(&self, queue: &str) -> String {
        format!("{}:{}", self.queue_prefix, queue)
    }

    /// Key of the list holding messages taken but not yet acknowledged
    pub fn processing_key(&self, queue: &str) -> String {
        format!("{}:{}:processing", self.queue_prefix, queue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queue_keys() {
        let config = BrokerConfig::default();
        assert_eq!(config.queue_key("send_verify_token"), "queue:send_verify_token");
        assert_eq!(
            config.processing_key("send_verify_token"),
            "queue:send_verify_token:processing"
        );
    }
}
