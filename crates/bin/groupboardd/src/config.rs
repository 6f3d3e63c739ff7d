//! Configuration loading — `groupboardd.toml` plus `GROUPBOARD_*` overrides.
//!
//! The file is optional; a missing file yields the defaults (listen on
//! `0.0.0.0:9000`, `sensor_data.db`, groups `group_1`..`group_6`).

use std::net::SocketAddr;

use serde::Deserialize;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
    pub groups: GroupsConfig,
}

/// HTTP listener and server-rendered dashboard.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// `host:port` to listen on.
    pub bind: String,
    /// Reload cadence of `/` and `/dashboard`, in seconds.
    pub refresh_secs: u32,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// `sqlx` `SQLite` connection URL.
    pub url: String,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

/// Roster of groups allowed to report.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct GroupsConfig {
    pub valid: Vec<String>,
}

impl Config {
    /// Load `groupboardd.toml` (if present), apply environment overrides and
    /// validate the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is malformed or the configuration is
    /// invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match std::fs::read_to_string("groupboardd.toml") {
            Ok(content) => toml::from_str(&content)?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Self::default(),
            Err(err) => return Err(err.into()),
        };
        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(val) = var("GROUPBOARD_BIND") {
            self.server.bind = val;
        }
        if let Some(val) = var("GROUPBOARD_DATABASE_URL") {
            self.database.url = val;
        }
        if let Some(val) = var("GROUPBOARD_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = var("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if let Err(err) = self.server.bind.parse::<SocketAddr>() {
            return Err(ConfigError::Validation(format!(
                "bind {:?}: {err}",
                self.server.bind
            )));
        }
        if self.groups.valid.is_empty() {
            return Err(ConfigError::Validation(
                "at least one valid group is required".to_string(),
            ));
        }
        if self.groups.valid.iter().any(|group| group.trim().is_empty()) {
            return Err(ConfigError::Validation(
                "group ids must not be blank".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:9000".to_string(),
            refresh_secs: 5,
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite:sensor_data.db?mode=rwc".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "groupboardd=info,groupboard=info,tower_http=debug".to_string(),
        }
    }
}

impl Default for GroupsConfig {
    fn default() -> Self {
        Self {
            valid: (1..=6).map(|n| format!("group_{n}")).collect(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    #[error("invalid configuration: {0}")]
    Validation(String),
}
