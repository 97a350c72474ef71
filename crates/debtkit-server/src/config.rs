//! Server configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use debtkit_analytics::policy::DebtPolicy;
use debtkit_history::DEFAULT_CAPACITY;

/// Server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Calculator thresholds
    #[serde(default)]
    pub policy: DebtPolicy,

    /// Calculation history settings
    #[serde(default)]
    pub history: HistoryConfig,
}

/// Calculation history settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryConfig {
    /// Redb file to keep history in; in memory when unset
    pub storage_path: Option<PathBuf>,

    /// Maximum number of calculations kept
    #[serde(default = "default_capacity")]
    pub capacity: usize,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_capacity() -> usize {
    DEFAULT_CAPACITY
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            storage_path: None,
            capacity: default_capacity(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            policy: DebtPolicy::default(),
            history: HistoryConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &str) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text and validate the policy.
    pub fn from_toml(content: &str) -> Result<Self, std::io::Error> {
        let config: Self = toml::from_str(content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        config
            .policy
            .validate()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        Ok(config)
    }
}
