use std::time::Duration;
use uuid::Uuid;

use crate::device::constants::{make_uart_tx_uuid, LISTEN_DURATION, SCAN_TIMEOUT, TARGET_NAME};

/// Everything a session needs to know about its target and how long to spend on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Case-insensitive substring of the advertised name to connect to.
    pub target_name: String,
    /// Characteristic whose notifications are printed.
    pub characteristic: Uuid,
    pub scan_timeout: Duration,
    /// How long to stay subscribed before tearing the connection down.
    pub listen_for: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            target_name: String::from(TARGET_NAME),
            characteristic: make_uart_tx_uuid(),
            scan_timeout: Duration::from_millis(SCAN_TIMEOUT),
            listen_for: Duration::from_millis(LISTEN_DURATION),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_targets_the_sleep_tracker_uart() {
        let config = SessionConfig::default();
        assert_eq!(config.target_name, "bangle-sleeptracker");
        assert_eq!(config.characteristic.to_string(), "6e400003-b5a3-f393-e0a9-e50e24dcca9e");
        assert_eq!(config.scan_timeout, Duration::from_secs(5));
        assert_eq!(config.listen_for, Duration::from_secs(10));
    }
}
