//! Client configuration: defaults, an optional TOML file, then environment overrides.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use url::Url;

use crate::interface_adapters::clients::{ClientOptions, Timeouts};

pub const DEFAULT_API_URL: &str = "http://localhost:8000";
pub const DEFAULT_SESSION_FILE: &str = ".lookbook_session.json";
pub const DEFAULT_PROBE_TIMEOUT_SECS: u64 = 3;
pub const DEFAULT_STANDARD_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_EXTENDED_TIMEOUT_SECS: u64 = 30;

// Environment variable naming the TOML file to load before overrides.
pub const CONFIG_PATH_ENV: &str = "LOOKBOOK_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid api base url '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("invalid value for {key}: '{value}'")]
    InvalidValue { key: &'static str, value: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TimeoutConfig {
    pub probe_secs: u64,
    pub standard_secs: u64,
    pub extended_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            probe_secs: DEFAULT_PROBE_TIMEOUT_SECS,
            standard_secs: DEFAULT_STANDARD_TIMEOUT_SECS,
            extended_secs: DEFAULT_EXTENDED_TIMEOUT_SECS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClientConfig {
    pub api_base_url: String,
    // Development convenience: answer failed calls with canned data.
    pub mock_fallback: bool,
    pub analytics_enabled: bool,
    pub session_file: PathBuf,
    pub timeouts: TimeoutConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            mock_fallback: true,
            analytics_enabled: true,
            session_file: PathBuf::from(DEFAULT_SESSION_FILE),
            timeouts: TimeoutConfig::default(),
        }
    }
}

impl ClientConfig {
    /// Build the runtime config.
    ///
    /// Loads `.env` if present, reads the TOML file named by `LOOKBOOK_CONFIG`
    /// (if set), then applies these environment overrides:
    /// - `LOOKBOOK_API_URL`
    /// - `LOOKBOOK_MOCK_FALLBACK`: `true`/`false` (also `1`/`0`, `yes`/`no`, `on`/`off`)
    /// - `LOOKBOOK_ANALYTICS`: same boolean forms
    /// - `LOOKBOOK_SESSION_FILE`
    /// - `LOOKBOOK_PROBE_TIMEOUT_SECS`, `LOOKBOOK_STANDARD_TIMEOUT_SECS`,
    ///   `LOOKBOOK_EXTENDED_TIMEOUT_SECS`
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env locally; safe to ignore when not present.
        let _ = dotenvy::dotenv();

        let base = match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) => Self::from_file(path)?,
            Err(_) => Self::default(),
        };
        base.with_overrides(|key| std::env::var(key).ok())
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&raw)
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(raw)?)
    }

    // `lookup` abstracts the environment so overrides can be tested without touching it.
    pub fn with_overrides(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(url) = lookup("LOOKBOOK_API_URL") {
            self.api_base_url = url;
        }
        if let Some(raw) = lookup("LOOKBOOK_MOCK_FALLBACK") {
            self.mock_fallback = parse_bool("LOOKBOOK_MOCK_FALLBACK", &raw)?;
        }
        if let Some(raw) = lookup("LOOKBOOK_ANALYTICS") {
            self.analytics_enabled = parse_bool("LOOKBOOK_ANALYTICS", &raw)?;
        }
        if let Some(path) = lookup("LOOKBOOK_SESSION_FILE") {
            self.session_file = PathBuf::from(path);
        }
        if let Some(raw) = lookup("LOOKBOOK_PROBE_TIMEOUT_SECS") {
            self.timeouts.probe_secs = parse_secs("LOOKBOOK_PROBE_TIMEOUT_SECS", &raw)?;
        }
        if let Some(raw) = lookup("LOOKBOOK_STANDARD_TIMEOUT_SECS") {
            self.timeouts.standard_secs = parse_secs("LOOKBOOK_STANDARD_TIMEOUT_SECS", &raw)?;
        }
        if let Some(raw) = lookup("LOOKBOOK_EXTENDED_TIMEOUT_SECS") {
            self.timeouts.extended_secs = parse_secs("LOOKBOOK_EXTENDED_TIMEOUT_SECS", &raw)?;
        }
        Ok(self)
    }

    pub fn base_url(&self) -> Result<Url, ConfigError> {
        let invalid = |reason: String| ConfigError::InvalidBaseUrl {
            url: self.api_base_url.clone(),
            reason,
        };
        let url = Url::parse(self.api_base_url.trim()).map_err(|err| invalid(err.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
        }
        if url.cannot_be_a_base() {
            return Err(invalid("not a base url".to_string()));
        }
        Ok(url)
    }

    /// Validates the config and converts it into client settings.
    pub fn client_options(&self) -> Result<ClientOptions, ConfigError> {
        let timeouts = Timeouts {
            probe: non_zero("timeouts.probe_secs", self.timeouts.probe_secs)?,
            standard: non_zero("timeouts.standard_secs", self.timeouts.standard_secs)?,
            extended: non_zero("timeouts.extended_secs", self.timeouts.extended_secs)?,
        };
        Ok(ClientOptions {
            base_url: self.base_url()?,
            timeouts,
            mock_fallback: self.mock_fallback,
        })
    }
}

fn parse_bool(key: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key,
            value: raw.to_string(),
        }),
    }
}

fn parse_secs(key: &'static str, raw: &str) -> Result<u64, ConfigError> {
    raw.trim()
        .parse::<u64>()
        .map_err(|_| ConfigError::InvalidValue {
            key,
            value: raw.to_string(),
        })
}

fn non_zero(key: &'static str, secs: u64) -> Result<Duration, ConfigError> {
    if secs == 0 {
        return Err(ConfigError::InvalidValue {
            key,
            value: secs.to_string(),
        });
    }
    Ok(Duration::from_secs(secs))
}
