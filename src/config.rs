//! Configuration types.
//!
//! [`PositionOptions`] travels to the external source untouched; the keys it
//! recognizes are the source's contract, not ours. [`CoordinatorConfig`]
//! sizes the coordinator's own channels.

use serde::{Deserialize, Serialize};

/// Options passed through to the external position source.
///
/// This core never interprets these fields; they mirror the platform options
/// object (accuracy hint, acquisition timeout, cached-fix staleness
/// tolerance) and mean whatever the source says they mean.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PositionOptions {
    /// Request the most accurate fix the device can provide.
    pub enable_high_accuracy: Option<bool>,
    /// Maximum time to wait for a fix, in milliseconds.
    pub timeout: Option<u64>,
    /// Maximum acceptable age of a cached fix, in milliseconds.
    pub maximum_age: Option<u64>,
}

impl PositionOptions {
    /// Request a high-accuracy fix.
    pub fn high_accuracy() -> Self {
        Self {
            enable_high_accuracy: Some(true),
            ..Default::default()
        }
    }
}

/// Configuration for the location watch coordinator.
#[derive(Debug, Clone)]
pub struct CoordinatorConfig {
    /// Capacity of the trigger-failure broadcast channel.
    pub failure_channel_capacity: usize,
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            failure_channel_capacity: 16,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options_are_empty() {
        let options = PositionOptions::default();
        assert!(options.enable_high_accuracy.is_none());
        assert!(options.timeout.is_none());
        assert!(options.maximum_age.is_none());
    }

    #[test]
    fn test_options_deserialize_from_platform_shape() {
        let options: PositionOptions = serde_json::from_str(
            r#"{"enableHighAccuracy": true, "timeout": 5000, "maximumAge": 0}"#,
        )
        .unwrap();
        assert_eq!(options.enable_high_accuracy, Some(true));
        assert_eq!(options.timeout, Some(5000));
        assert_eq!(options.maximum_age, Some(0));
    }

    #[test]
    fn test_default_config() {
        let config = CoordinatorConfig::default();
        assert_eq!(config.failure_channel_capacity, 16);
    }
}
