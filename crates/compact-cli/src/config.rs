//! # CLI Configuration
//!
//! The signing domain used by `claim build`, loaded from a YAML file and
//! then overridden from the environment.
//!
//! ```yaml
//! domain:
//!   name: The Compact
//!   version: "1"
//!   chain_id: 8453
//!   verifying_contract: "0x00000000000000171ede64904551eeDF3C6C9788"
//! ```
//!
//! Resolution order, last wins:
//!
//! 1. Built-in defaults (chain 1, zero verifying contract).
//! 2. The config file: `--config`, else `compact.yaml` if it exists.
//! 3. `COMPACT_CHAIN_ID` and `COMPACT_VERIFYING_CONTRACT`.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use alloy_primitives::Address;
use serde::{Deserialize, Serialize};

use compact_claims::{TypedDataDomain, DEFAULT_DOMAIN_NAME, DEFAULT_DOMAIN_VERSION};

/// Config file read when `--config` is not given.
pub const DEFAULT_CONFIG_PATH: &str = "compact.yaml";

/// Overrides `domain.chain_id`.
pub const CHAIN_ID_VAR: &str = "COMPACT_CHAIN_ID";

/// Overrides `domain.verifying_contract`.
pub const VERIFYING_CONTRACT_VAR: &str = "COMPACT_VERIFYING_CONTRACT";

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_yaml::Error,
    },
    #[error("invalid value {value:?} for {var}: {reason}")]
    InvalidEnv {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Top-level CLI configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CompactConfig {
    pub domain: DomainConfig,
}

/// Signing domain settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DomainConfig {
    pub name: String,
    pub version: String,
    pub chain_id: u64,
    pub verifying_contract: Address,
}

impl Default for DomainConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_DOMAIN_NAME.to_string(),
            version: DEFAULT_DOMAIN_VERSION.to_string(),
            chain_id: 1,
            verifying_contract: Address::ZERO,
        }
    }
}

impl DomainConfig {
    /// The typed-data domain these settings describe.
    pub fn to_domain(&self) -> TypedDataDomain {
        TypedDataDomain {
            name: self.name.clone(),
            version: self.version.clone(),
            chain_id: self.chain_id,
            verifying_contract: self.verifying_contract,
        }
    }
}

impl CompactConfig {
    /// Load the config file and apply environment overrides.
    ///
    /// An explicit `path` must exist. Without one, [`DEFAULT_CONFIG_PATH`]
    /// is read if present and defaults are used otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => {
                let default = Path::new(DEFAULT_CONFIG_PATH);
                if default.is_file() {
                    Self::from_file(default)?
                } else {
                    tracing::debug!("no config file found, using defaults");
                    Self::default()
                }
            }
        };
        config.apply_overrides(
            std::env::var(CHAIN_ID_VAR).ok().as_deref(),
            std::env::var(VERIFYING_CONTRACT_VAR).ok().as_deref(),
        )?;
        Ok(config)
    }

    /// Parse a config file without consulting the environment.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = serde_yaml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "loaded config file");
        Ok(config)
    }

    /// Apply override values as read from the environment.
    pub fn apply_overrides(
        &mut self,
        chain_id: Option<&str>,
        verifying_contract: Option<&str>,
    ) -> Result<(), ConfigError> {
        if let Some(raw) = chain_id {
            self.domain.chain_id = raw.trim().parse().map_err(|e: std::num::ParseIntError| {
                ConfigError::InvalidEnv {
                    var: CHAIN_ID_VAR,
                    value: raw.to_string(),
                    reason: e.to_string(),
                }
            })?;
        }
        if let Some(raw) = verifying_contract {
            self.domain.verifying_contract =
                Address::from_str(raw.trim()).map_err(|e| ConfigError::InvalidEnv {
                    var: VERIFYING_CONTRACT_VAR,
                    value: raw.to_string(),
                    reason: e.to_string(),
                })?;
        }
        Ok(())
    }
}
