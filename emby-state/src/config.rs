//! Configuration for poll coordinators
//!
//! Each coordinator owns one resource and refreshes it on a fixed interval.
//! Consumer-triggered refreshes are debounced by `min_refresh_interval`.

use std::time::Duration;

use crate::error::{Result, StateError};

/// Default refresh interval for live sessions
pub const SESSIONS_INTERVAL: Duration = Duration::from_secs(30);

/// Default refresh interval for latest items
pub const LATEST_ITEMS_INTERVAL: Duration = Duration::from_secs(5 * 60);

/// Default debounce for consumer-triggered refreshes
pub const MIN_REFRESH_INTERVAL: Duration = Duration::from_secs(10);

/// Configuration for a single coordinator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoordinatorConfig {
    /// Name used in logs and errors
    pub name: String,

    /// Interval between scheduled refreshes
    pub update_interval: Duration,

    /// Minimum time between two refreshes requested by consumers
    ///
    /// A request arriving sooner is served from the cache.
    pub min_refresh_interval: Duration,
}

impl CoordinatorConfig {
    pub fn new(name: impl Into<String>, update_interval: Duration) -> Self {
        Self {
            name: name.into(),
            update_interval,
            min_refresh_interval: MIN_REFRESH_INTERVAL,
        }
    }

    /// Preset for the live sessions coordinator
    pub fn sessions() -> Self {
        Self::new("Emby Sessions", SESSIONS_INTERVAL)
    }

    /// Preset for the latest items coordinator
    pub fn latest_items() -> Self {
        Self::new("Emby Recent Media (Grouped)", LATEST_ITEMS_INTERVAL)
    }

    pub fn with_update_interval(mut self, interval: Duration) -> Self {
        self.update_interval = interval;
        self
    }

    pub fn with_min_refresh_interval(mut self, interval: Duration) -> Self {
        self.min_refresh_interval = interval;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(StateError::InvalidConfig(
                "Coordinator name must not be empty".to_string(),
            ));
        }

        if self.update_interval.is_zero() {
            return Err(StateError::InvalidConfig(format!(
                "{}: update interval must be greater than 0",
                self.name
            )));
        }

        if self.min_refresh_interval > self.update_interval {
            return Err(StateError::InvalidConfig(format!(
                "{}: min refresh interval must not exceed the update interval",
                self.name
            )));
        }

        Ok(())
    }
}
