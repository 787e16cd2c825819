//! Chain-configuration registry for Proofgate.
//!
//! Maps chain identifiers to block-explorer endpoints. Loaded from a TOML
//! file with environment-variable overrides for API keys; ships with
//! built-in defaults for well-known chains. The registry is treated as
//! ground truth by the resolver — an unknown chain is a hard error, never
//! a guess.

use proofgate_core::ChainId;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// Environment variable consulted for a global explorer API key override.
pub const API_KEY_ENV: &str = "PROOFGATE_EXPLORER_API_KEY";

const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Errors from configuration loading and lookup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid chain entry for chain {chain}: {reason}")]
    Invalid { chain: u64, reason: String },
}

/// Configuration for a single chain's explorer endpoint.
#[derive(Clone, Serialize, Deserialize)]
pub struct ChainEntry {
    /// Numeric chain identifier (1 = Ethereum mainnet, 8453 = Base, ...).
    pub id: u64,

    /// Human-readable chain name (e.g. "ethereum", "base").
    pub name: String,

    /// Explorer API base URL (e.g. `https://api.etherscan.io/v2/api`).
    pub explorer_url: String,

    /// Explorer API key, if the endpoint requires one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl std::fmt::Debug for ChainEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChainEntry")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("explorer_url", &self.explorer_url)
            .field(
                "api_key",
                if self.api_key.is_some() { &"[REDACTED]" } else { &"None" },
            )
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// The chain registry: which chains exist and how to reach their explorers.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChainRegistry {
    #[serde(default)]
    chains: Vec<ChainEntry>,
}

impl ChainRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry pre-populated with well-known chains. API keys come from
    /// [`API_KEY_ENV`] when set.
    pub fn builtin() -> Self {
        let api_key = std::env::var(API_KEY_ENV).ok();
        let chains = [
            (1u64, "ethereum"),
            (11155111, "sepolia"),
            (8453, "base"),
            (42161, "arbitrum"),
            (137, "polygon"),
        ]
        .into_iter()
        .map(|(id, name)| ChainEntry {
            id,
            name: name.into(),
            explorer_url: "https://api.etherscan.io/v2/api".into(),
            api_key: api_key.clone(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        })
        .collect();
        Self { chains }
    }

    /// Load a registry from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let registry: ChainRegistry = toml::from_str(toml_str)?;
        registry.validate()?;
        Ok(registry)
    }

    /// Load a registry from a TOML file, applying [`API_KEY_ENV`] as an
    /// override for entries without an explicit key.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        let mut registry = Self::from_toml(&contents)?;
        if let Ok(key) = std::env::var(API_KEY_ENV) {
            for entry in &mut registry.chains {
                if entry.api_key.is_none() {
                    entry.api_key = Some(key.clone());
                }
            }
        }
        debug!(chains = registry.chains.len(), "Chain registry loaded");
        Ok(registry)
    }

    /// Add a chain entry, replacing any existing entry with the same id.
    pub fn insert(&mut self, entry: ChainEntry) {
        self.chains.retain(|c| c.id != entry.id);
        self.chains.push(entry);
    }

    /// Look up a chain's configuration.
    pub fn get(&self, chain: ChainId) -> Option<&ChainEntry> {
        self.chains.iter().find(|c| c.id == chain.0)
    }

    /// Resolve a symbolic chain name ("base") to its identifier.
    pub fn resolve_name(&self, name: &str) -> Option<ChainId> {
        let lower = name.to_lowercase();
        self.chains
            .iter()
            .find(|entry| entry.name == lower)
            .map(|entry| ChainId(entry.id))
    }

    /// Number of configured chains.
    pub fn len(&self) -> usize {
        self.chains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chains.is_empty()
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for entry in &self.chains {
            if entry.explorer_url.is_empty() {
                return Err(ConfigError::Invalid {
                    chain: entry.id,
                    reason: "explorer_url cannot be empty".into(),
                });
            }
            if !entry.explorer_url.starts_with("http://")
                && !entry.explorer_url.starts_with("https://")
            {
                return Err(ConfigError::Invalid {
                    chain: entry.id,
                    reason: format!("explorer_url '{}' is not an HTTP URL", entry.explorer_url),
                });
            }
            if entry.timeout_secs == 0 {
                return Err(ConfigError::Invalid {
                    chain: entry.id,
                    reason: "timeout_secs must be positive".into(),
                });
            }
            if self.chains.iter().filter(|c| c.id == entry.id).count() > 1 {
                return Err(ConfigError::Invalid {
                    chain: entry.id,
                    reason: "duplicate chain id".into(),
                });
            }
        }
        Ok(())
    }
}
