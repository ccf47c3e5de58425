use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::core_types::Account;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config yaml: {0}")]
    Parse(#[from] serde_yaml::Error),
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RelayConfig {
    /// Burn address receiving the fee leg
    #[serde(default = "default_fee_sink")]
    pub fee_sink: Account,
    #[serde(default)]
    pub atomicity: AtomicityMode,
    #[serde(default)]
    pub authorization: AuthMode,
    /// Reject a request while another one for the same sender is in flight
    #[serde(default = "default_true")]
    pub reentrancy_guard: bool,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// How the two transfer legs are kept all-or-nothing
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum AtomicityMode {
    /// A surrounding host transaction rolls everything back on failure.
    /// The relay itself never reverses a leg.
    Host,
    /// No host transaction: reverse the net leg if the fee leg fails.
    #[default]
    Compensate,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum AuthMode {
    /// Fail-open placeholder. Every request is authorized.
    #[default]
    AllowAll,
    /// Ed25519 intent signature + one-time intent ids
    Ed25519,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LoggingConfig {
    pub log_level: String,
    pub log_dir: String,
    pub log_file: String,
    pub use_json: bool,
    pub rotation: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_dir: "./logs".to_string(),
            log_file: "relay.log".to_string(),
            use_json: false,
            rotation: "daily".to_string(),
        }
    }
}

fn default_fee_sink() -> Account {
    Account::ZERO
}

fn default_true() -> bool {
    true
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            fee_sink: default_fee_sink(),
            atomicity: AtomicityMode::default(),
            authorization: AuthMode::default(),
            reentrancy_guard: true,
            logging: LoggingConfig::default(),
        }
    }
}

impl RelayConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml_str(&content)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(content)?)
    }
}
