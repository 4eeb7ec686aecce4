//! Connection and polling configuration
//!
//! Credentials are supplied by the application, either directly, from a JSON
//! document, or from `EMBY_*` environment variables. Nothing is persisted.

use std::time::Duration;

use emby_state::config::{LATEST_ITEMS_INTERVAL, MIN_REFRESH_INTERVAL, SESSIONS_INTERVAL};
use emby_state::CoordinatorConfig;
use serde::{Deserialize, Serialize};

use crate::SdkError;

/// Default Emby HTTP port
pub const DEFAULT_PORT: u16 = 8096;

/// Categories tracked by latest-item sensors unless configured otherwise
pub const DEFAULT_CATEGORIES: [&str; 3] = ["Movie", "Episode", "Series"];

/// Configuration for an [`EmbySystem`](crate::EmbySystem)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbyConfig {
    pub host: String,
    pub port: u16,
    pub api_key: String,
    /// User whose libraries feed the latest-item sensors
    pub user_id: String,
    pub sessions_interval_ms: u64,
    pub latest_items_interval_ms: u64,
    /// Debounce for refreshes requested by players and sensors
    pub min_refresh_interval_ms: u64,
    /// One latest-item sensor is created per category
    pub latest_categories: Vec<String>,
}

impl Default for EmbyConfig {
    fn default() -> Self {
        Self {
            host: String::new(),
            port: DEFAULT_PORT,
            api_key: String::new(),
            user_id: String::new(),
            sessions_interval_ms: millis(SESSIONS_INTERVAL),
            latest_items_interval_ms: millis(LATEST_ITEMS_INTERVAL),
            min_refresh_interval_ms: millis(MIN_REFRESH_INTERVAL),
            latest_categories: DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl EmbyConfig {
    pub fn new(
        host: impl Into<String>,
        port: u16,
        api_key: impl Into<String>,
        user_id: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            port,
            api_key: api_key.into(),
            user_id: user_id.into(),
            ..Default::default()
        }
    }

    /// Parse a JSON document; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, SdkError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read `EMBY_HOST`, `EMBY_PORT`, `EMBY_API_KEY` and `EMBY_USER_ID`
    pub fn from_env() -> Result<Self, SdkError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from any key lookup, using the `EMBY_*` names
    pub fn from_lookup<F>(lookup: F) -> Result<Self, SdkError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key)
                .filter(|v| !v.is_empty())
                .ok_or_else(|| SdkError::Config(format!("{} is not set", key)))
        };

        let port = match lookup("EMBY_PORT") {
            Some(raw) => raw
                .parse()
                .map_err(|_| SdkError::Config(format!("EMBY_PORT is not a valid port: {}", raw)))?,
            None => DEFAULT_PORT,
        };

        Ok(Self::new(
            required("EMBY_HOST")?,
            port,
            required("EMBY_API_KEY")?,
            required("EMBY_USER_ID")?,
        ))
    }

    pub fn with_sessions_interval(mut self, interval: Duration) -> Self {
        self.sessions_interval_ms = millis(interval);
        self
    }

    pub fn with_latest_items_interval(mut self, interval: Duration) -> Self {
        self.latest_items_interval_ms = millis(interval);
        self
    }

    pub fn with_min_refresh_interval(mut self, interval: Duration) -> Self {
        self.min_refresh_interval_ms = millis(interval);
        self
    }

    pub fn with_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.latest_categories = categories.into_iter().map(Into::into).collect();
        self
    }

    /// `http://{host}:{port}`
    pub fn base_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }

    pub fn sessions_coordinator(&self) -> CoordinatorConfig {
        CoordinatorConfig::sessions()
            .with_update_interval(Duration::from_millis(self.sessions_interval_ms))
            .with_min_refresh_interval(Duration::from_millis(self.min_refresh_interval_ms))
    }

    pub fn latest_items_coordinator(&self) -> CoordinatorConfig {
        CoordinatorConfig::latest_items()
            .with_update_interval(Duration::from_millis(self.latest_items_interval_ms))
            .with_min_refresh_interval(Duration::from_millis(self.min_refresh_interval_ms))
    }

    /// Validate the configuration and return the first issue found
    pub fn validate(&self) -> Result<(), SdkError> {
        if self.host.trim().is_empty() {
            return Err(SdkError::Config("host must not be empty".to_string()));
        }
        if self.port == 0 {
            return Err(SdkError::Config("port must not be 0".to_string()));
        }
        if self.api_key.is_empty() {
            return Err(SdkError::Config("api_key must not be empty".to_string()));
        }
        if self.user_id.is_empty() {
            return Err(SdkError::Config("user_id must not be empty".to_string()));
        }
        if self.latest_categories.iter().any(|c| c.is_empty()) {
            return Err(SdkError::Config("latest categories must not be empty".to_string()));
        }

        self.sessions_coordinator().validate()?;
        self.latest_items_coordinator().validate()?;
        Ok(())
    }
}

fn millis(interval: Duration) -> u64 {
    u64::try_from(interval.as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = EmbyConfig::new("10.0.0.5", DEFAULT_PORT, "key", "user");
        assert_eq!(config.base_url(), "http://10.0.0.5:8096");
        assert_eq!(config.sessions_coordinator().update_interval, Duration::from_secs(30));
        assert_eq!(config.latest_items_coordinator().update_interval, Duration::from_secs(300));
        assert_eq!(config.latest_categories, vec!["Movie", "Episode", "Series"]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_lookup() {
        let config = EmbyConfig::from_lookup(lookup(&[
            ("EMBY_HOST", "emby.local"),
            ("EMBY_PORT", "8920"),
            ("EMBY_API_KEY", "k"),
            ("EMBY_USER_ID", "u"),
        ]))
        .unwrap();

        assert_eq!(config.base_url(), "http://emby.local:8920");
        assert_eq!(config.api_key, "k");
        assert_eq!(config.user_id, "u");
    }

    #[test]
    fn test_from_lookup_missing_key() {
        let err = EmbyConfig::from_lookup(lookup(&[("EMBY_HOST", "emby.local")])).unwrap_err();
        assert!(err.to_string().contains("EMBY_API_KEY"));
    }

    #[test]
    fn test_from_lookup_bad_port() {
        let err = EmbyConfig::from_lookup(lookup(&[
            ("EMBY_HOST", "h"),
            ("EMBY_PORT", "http"),
            ("EMBY_API_KEY", "k"),
            ("EMBY_USER_ID", "u"),
        ]))
        .unwrap_err();
        assert!(matches!(err, SdkError::Config(_)));
    }

    #[test]
    fn test_from_json_fills_defaults() {
        let config = EmbyConfig::from_json(
            r#"{"host": "h", "api_key": "k", "user_id": "u", "latest_categories": ["Movie"]}"#,
        )
        .unwrap();

        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.sessions_interval_ms, 30_000);
        assert_eq!(config.latest_categories, vec!["Movie"]);
    }

    #[test]
    fn test_sub_second_intervals_are_kept() {
        let config = EmbyConfig::new("h", DEFAULT_PORT, "k", "u")
            .with_sessions_interval(Duration::from_millis(1500))
            .with_latest_items_interval(Duration::from_millis(500))
            .with_min_refresh_interval(Duration::from_millis(250));

        assert_eq!(config.sessions_coordinator().update_interval, Duration::from_millis(1500));
        assert_eq!(config.latest_items_coordinator().update_interval, Duration::from_millis(500));
        assert_eq!(config.sessions_coordinator().min_refresh_interval, Duration::from_millis(250));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation() {
        assert!(EmbyConfig::default().validate().is_err());

        let no_user = EmbyConfig::new("h", DEFAULT_PORT, "k", "");
        assert!(no_user.validate().is_err());

        let zero_interval = EmbyConfig::new("h", DEFAULT_PORT, "k", "u")
            .with_sessions_interval(Duration::ZERO);
        assert!(matches!(zero_interval.validate(), Err(SdkError::StateError(_))));
    }
}
