//! Staking configuration loading
//!
//! Configuration comes from an optional TOML file with environment overrides.
//! Without a catalog path the built-in reference catalog is used.

use crate::catalog::{load_catalog, reference_catalog, Catalog, CatalogSource};
use crate::errors::StakingError;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

pub const ENV_CATALOG_PATH: &str = "VVT_CATALOG_PATH";
pub const ENV_EXPECTED_CHAIN_ID: &str = "VVT_EXPECTED_CHAIN_ID";
pub const ENV_CONTRACT_ADDRESS: &str = "VVT_CONTRACT_ADDRESS";

/// Ethereum mainnet
pub const DEFAULT_CHAIN_ID: u64 = 1;
pub const DEFAULT_TOKEN_DECIMALS: u32 = 18;
pub const DEFAULT_TOKEN_SYMBOL: &str = "VVT";
pub const DEFAULT_CONTRACT_ADDRESS: &str = "0x38EA6b550DD33c9Cf9aC65721F71BbFb37c70DCa";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("invalid value for {key}: {value}")]
    InvalidEnv { key: &'static str, value: String },

    #[error(transparent)]
    Catalog(#[from] StakingError),
}

/// Runtime configuration for the staking dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StakingConfig {
    /// TOML or JSON tier catalog; `None` selects the reference catalog
    pub catalog_path: Option<PathBuf>,
    pub expected_chain_id: u64,
    pub token_decimals: u32,
    pub token_symbol: String,
    pub contract_address: String,
}

impl Default for StakingConfig {
    fn default() -> Self {
        Self {
            catalog_path: None,
            expected_chain_id: DEFAULT_CHAIN_ID,
            token_decimals: DEFAULT_TOKEN_DECIMALS,
            token_symbol: DEFAULT_TOKEN_SYMBOL.to_string(),
            contract_address: DEFAULT_CONTRACT_ADDRESS.to_string(),
        }
    }
}

impl StakingConfig {
    /// Load from `path` when given, then apply environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = read(path)?;
        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Ok(path) = env::var(ENV_CATALOG_PATH) {
            if !path.trim().is_empty() {
                self.catalog_path = Some(PathBuf::from(path));
            }
        }
        if let Ok(value) = env::var(ENV_EXPECTED_CHAIN_ID) {
            self.expected_chain_id =
                value.trim().parse().map_err(|_| ConfigError::InvalidEnv {
                    key: ENV_EXPECTED_CHAIN_ID,
                    value,
                })?;
        }
        if let Ok(address) = env::var(ENV_CONTRACT_ADDRESS) {
            if !address.trim().is_empty() {
                self.contract_address = address;
            }
        }
        Ok(())
    }

    /// Resolve the tier catalog this configuration points at.
    pub fn catalog(&self) -> Result<Catalog, ConfigError> {
        match &self.catalog_path {
            Some(path) => load_catalog_file(path),
            None => Ok(reference_catalog()),
        }
    }
}

/// Load and validate a catalog file. `.json` files are parsed as JSON,
/// everything else as TOML.
pub fn load_catalog_file(path: &Path) -> Result<Catalog, ConfigError> {
    let content = read(path)?;
    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let source = if is_json {
        CatalogSource::from_json_str(&content)?
    } else {
        CatalogSource::from_toml_str(&content)?
    };
    let catalog = load_catalog(source)?;

    info!(
        target: "staking",
        "loaded {} staking tiers from {}",
        catalog.len(),
        path.display()
    );
    Ok(catalog)
}

fn read(path: &Path) -> Result<String, ConfigError> {
    fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })
}
