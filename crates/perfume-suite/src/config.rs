//! Configuration for the perfume suite
//!
//! Every section and field has a default, so an empty file (or no file) yields the standard
//! setup: 5 s call timeout, the two built-in dispatch profiles, origin "Unknown".

use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Path of the TOML file loaded by [`SuiteConfig::from_env`].
pub const CONFIG_PATH_ENV: &str = "PERFUME_SUITE_CONFIG";
/// Overrides `rpc.internal_secret`.
pub const SECRET_ENV: &str = "PERFUME_INTERNAL_SECRET";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
pub struct SuiteConfig {
    #[serde(default)]
    pub rpc: RpcConfig,
    #[serde(default)]
    pub actors: ActorsConfig,
    #[serde(default)]
    pub fulfillment: FulfillmentConfig,
    #[serde(default)]
    pub dispatch: DispatchConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RpcConfig {
    /// Bound on every call between actors, in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Shared secret expected in the internal secret header.
    #[serde(default = "default_internal_secret")]
    pub internal_secret: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ActorsConfig {
    /// Channel capacity of each actor.
    #[serde(default = "default_buffer_size")]
    pub buffer_size: usize,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FulfillmentConfig {
    /// Origin recorded on plants planted to cover a shortfall.
    #[serde(default = "default_origin")]
    pub default_origin: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DispatchConfig {
    #[serde(default = "default_distribution")]
    pub distribution: DispatchProfileConfig,
    #[serde(default = "default_depot")]
    pub depot: DispatchProfileConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DispatchProfileConfig {
    pub max_packages_per_batch: usize,
    pub inter_batch_delay_ms: u64,
}

fn default_timeout_ms() -> u64 {
    5_000
}

fn default_internal_secret() -> String {
    "change-me".to_string()
}

fn default_buffer_size() -> usize {
    32
}

fn default_origin() -> String {
    "Unknown".to_string()
}

fn default_distribution() -> DispatchProfileConfig {
    DispatchProfileConfig {
        max_packages_per_batch: 3,
        inter_batch_delay_ms: 500,
    }
}

fn default_depot() -> DispatchProfileConfig {
    DispatchProfileConfig {
        max_packages_per_batch: 1,
        inter_batch_delay_ms: 2_500,
    }
}

impl Default for RpcConfig {
    fn default() -> Self {
        Self {
            timeout_ms: default_timeout_ms(),
            internal_secret: default_internal_secret(),
        }
    }
}

impl Default for ActorsConfig {
    fn default() -> Self {
        Self {
            buffer_size: default_buffer_size(),
        }
    }
}

impl Default for FulfillmentConfig {
    fn default() -> Self {
        Self {
            default_origin: default_origin(),
        }
    }
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            distribution: default_distribution(),
            depot: default_depot(),
        }
    }
}

impl RpcConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl SuiteConfig {
    /// Parses a TOML document and validates it.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: SuiteConfig = toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: "<inline>".to_string(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let config: SuiteConfig = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Loads the file named by `PERFUME_SUITE_CONFIG` (defaults otherwise), then applies
    /// `PERFUME_INTERNAL_SECRET`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) => Self::from_file(path)?,
            Err(_) => Self::default(),
        };
        if let Ok(secret) = std::env::var(SECRET_ENV) {
            config.rpc.internal_secret = secret;
        }
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rpc.timeout_ms == 0 {
            return Err(ConfigError::Invalid("rpc.timeout_ms must be positive".into()));
        }
        if self.rpc.internal_secret.is_empty() {
            return Err(ConfigError::Invalid("rpc.internal_secret must not be empty".into()));
        }
        if self.actors.buffer_size == 0 {
            return Err(ConfigError::Invalid("actors.buffer_size must be positive".into()));
        }
        for (role, profile) in [
            ("distribution", &self.dispatch.distribution),
            ("depot", &self.dispatch.depot),
        ] {
            if profile.max_packages_per_batch == 0 {
                return Err(ConfigError::Invalid(format!(
                    "dispatch.{role}.max_packages_per_batch must be positive"
                )));
            }
        }
        Ok(())
    }
}
