use std::time::Duration;

/// Timeouts and pauses used across a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeoutConfig {
    /// Per-request timeout for account endpoints (default: 15 seconds)
    pub account_request: Duration,

    /// Per-request timeout for the push notification (default: 10 seconds)
    pub notification_request: Duration,

    /// Pause between two accounts (default: 1 second)
    pub account_pause: Duration,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            account_request: Duration::from_secs(15),
            notification_request: Duration::from_secs(10),
            account_pause: Duration::from_secs(1),
        }
    }
}

impl TimeoutConfig {
    /// Create a new timeout configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder pattern: set account request timeout
    pub fn with_account_request(mut self, duration: Duration) -> Self {
        self.account_request = duration;
        self
    }

    /// Builder pattern: set notification request timeout
    pub fn with_notification_request(mut self, duration: Duration) -> Self {
        self.notification_request = duration;
        self
    }

    /// Builder pattern: set inter-account pause
    pub fn with_account_pause(mut self, duration: Duration) -> Self {
        self.account_pause = duration;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TimeoutConfig::new();
        assert_eq!(config.account_request, Duration::from_secs(15));
        assert_eq!(config.notification_request, Duration::from_secs(10));
        assert_eq!(config.account_pause, Duration::from_secs(1));
    }

    #[test]
    fn test_builder() {
        let config = TimeoutConfig::new()
            .with_account_request(Duration::from_millis(200))
            .with_account_pause(Duration::ZERO);
        assert_eq!(config.account_request, Duration::from_millis(200));
        assert_eq!(config.account_pause, Duration::ZERO);
        assert_eq!(config.notification_request, Duration::from_secs(10));
    }
}
