//! Per-speaker proxy configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Configuration passed to every [`KefSpeaker`](crate::KefSpeaker)
///
/// Deserializes from the control panel's `config.json`; keys this crate does
/// not use (such as `app_base_url`) are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProxyConfig {
    /// Upper bound for a whole request/response exchange
    #[serde(rename = "timeout_secs", with = "duration_secs")]
    pub timeout: Duration,

    /// Log raw response bodies
    pub debug_enabled: bool,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            debug_enabled: false,
        }
    }
}

impl ProxyConfig {
    /// Parse from a JSON config document
    pub fn from_json(json: &str) -> crate::Result<Self> {
        serde_json::from_str(json).map_err(|e| crate::KefError::InvalidArgument(format!("config: {}", e)))
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_debug(mut self, enabled: bool) -> Self {
        self.debug_enabled = enabled;
        self
    }
}

mod duration_secs {
    use serde::{de, Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(value.as_secs_f64())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = f64::deserialize(deserializer)?;
        Duration::try_from_secs_f64(secs).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_five_seconds_quiet() {
        let config = ProxyConfig::default();
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert!(!config.debug_enabled);
    }

    #[test]
    fn reads_panel_config_file() {
        let config = ProxyConfig::from_json(
            r#"{"app_base_url": "", "app_base_path": "/", "debug_enabled": true}"#,
        )
        .unwrap();
        assert!(config.debug_enabled);
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
    }

    #[test]
    fn reads_fractional_timeout() {
        let config = ProxyConfig::from_json(r#"{"timeout_secs": 0.25}"#).unwrap();
        assert_eq!(config.timeout, Duration::from_millis(250));
    }

    #[test]
    fn rejects_negative_timeout() {
        let err = ProxyConfig::from_json(r#"{"timeout_secs": -1}"#).unwrap_err();
        assert!(matches!(err, crate::KefError::InvalidArgument(_)));
    }
}
