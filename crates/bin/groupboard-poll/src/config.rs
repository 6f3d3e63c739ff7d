//! Configuration loading — TOML file with environment variable overrides.
//!
//! Looks for `groupboard-poll.toml` in the working directory. Every field has
//! a default so the file is optional. Environment variables take precedence
//! over file values.

use std::time::Duration;

use serde::Deserialize;

use groupboard_app::poller::DEFAULT_POLL_INTERVAL_MS;
use groupboard_domain::recency::RecencyStrategy;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Polling settings.
    pub poller: PollerConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

/// Polling configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct PollerConfig {
    /// Root URL of the groupboard server.
    pub base_url: String,
    /// Milliseconds between two polls.
    pub interval_ms: u64,
    /// How groups are classified as online.
    pub recency: RecencyStrategy,
    /// HTML file the dashboard is rendered into.
    pub output: String,
    /// Per-request timeout; the HTTP client default when unset.
    pub request_timeout_secs: Option<u64>,
    /// Browser reload cadence written into the page; `0` disables it.
    pub page_refresh_secs: u32,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

impl Config {
    /// Load configuration from `groupboard-poll.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, if an
    /// override cannot be parsed, or if the result is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("groupboard-poll.toml")?;
        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    /// Apply overrides looked up through `var` (the process environment
    /// outside of tests).
    fn apply_overrides(
        &mut self,
        var: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(val) = var("GROUPBOARD_URL") {
            self.poller.base_url = val;
        }
        if let Some(val) = var("GROUPBOARD_INTERVAL_MS") {
            self.poller.interval_ms = val.trim().parse().map_err(|err| {
                ConfigError::Validation(format!("GROUPBOARD_INTERVAL_MS {val:?}: {err}"))
            })?;
        }
        if let Some(val) = var("GROUPBOARD_RECENCY") {
            self.poller.recency = val
                .parse()
                .map_err(|err| ConfigError::Validation(format!("GROUPBOARD_RECENCY: {err}")))?;
        }
        if let Some(val) = var("GROUPBOARD_OUTPUT") {
            self.poller.output = val;
        }
        if let Some(val) = var("GROUPBOARD_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = var("RUST_LOG") {
            self.logging.filter = val;
        }
        Ok(())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.poller.interval_ms == 0 {
            return Err(ConfigError::Validation(
                "interval_ms must be at least 1".to_string(),
            ));
        }
        if !(self.poller.base_url.starts_with("http://")
            || self.poller.base_url.starts_with("https://"))
        {
            return Err(ConfigError::Validation(format!(
                "base_url must be an http(s) URL, got {:?}",
                self.poller.base_url
            )));
        }
        if self.poller.output.trim().is_empty() {
            return Err(ConfigError::Validation("output must not be empty".to_string()));
        }
        if self.poller.request_timeout_secs == Some(0) {
            return Err(ConfigError::Validation(
                "request_timeout_secs must be non-zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Time between two polls.
    #[must_use]
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.poller.interval_ms)
    }

    /// Per-request timeout, if configured.
    #[must_use]
    pub fn request_timeout(&self) -> Option<Duration> {
        self.poller.request_timeout_secs.map(Duration::from_secs)
    }

    /// Page reload cadence, if enabled.
    #[must_use]
    pub fn page_refresh(&self) -> Option<u32> {
        (self.poller.page_refresh_secs > 0).then_some(self.poller.page_refresh_secs)
    }
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:9000".to_string(),
            interval_ms: DEFAULT_POLL_INTERVAL_MS,
            recency: RecencyStrategy::default(),
            output: "dashboard.html".to_string(),
            request_timeout_secs: None,
            page_refresh_secs: 1,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "groupboard_poll=info,groupboard=info".to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}
