//! Error types surfaced by the registry.
//!
//! Only three things can go wrong: a strict lookup misses, a config file cannot
//! be read or parsed, or a consumer asks for the registry outside any provider
//! scope. Everything else in the handler is total.

use std::path::PathBuf;

/// Raised by `require_key` when nothing is registered under `key`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("No registry items registered for key \"{key}\".")]
pub struct RegistryKeyNotFound {
    pub key: String,
}

impl RegistryKeyNotFound {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

/// A consumer looked up the registry bundle in a context without a provider.
///
/// This is a wiring mistake at the call site, not a data-dependent condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("use_registry must be used within a RegistryProvider scope")]
pub struct OutsideProvider;

/// Failure to read or parse a registry config file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read registry config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse registry config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl ConfigError {
    /// Path of the config file that failed.
    pub fn path(&self) -> &std::path::Path {
        match self {
            ConfigError::Read { path, .. } | ConfigError::Parse { path, .. } => path,
        }
    }
}

/// Umbrella error for callers that want a single type.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error(transparent)]
    KeyNotFound(#[from] RegistryKeyNotFound),
    #[error(transparent)]
    OutsideProvider(#[from] OutsideProvider),
    #[error(transparent)]
    Config(#[from] ConfigError),
}
