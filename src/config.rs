//! Seed a registry from `react-app-registry.config.json`.
//!
//! Loading is best-effort: a missing file means "nothing configured" and a
//! broken file is reported to a [`DiagnosticSink`] and then ignored, so the
//! setup entry points never fail. [`load_config`] is the strict parser they
//! share for callers that want the error.

use crate::error::ConfigError;
use crate::registry::{RegistryConfig, RegistryHandler};
use serde::de::DeserializeOwned;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Config filename looked up in the working directory by default.
pub const DEFAULT_CONFIG_FILE: &str = "react-app-registry.config.json";

#[derive(Clone, Debug)]
/// Where to find the config file.
///
/// A relative `config_file` is joined onto `base_dir`, which falls back to the
/// process working directory at load time. Absolute paths are used as-is.
pub struct SetupOptions {
    pub config_file: PathBuf,
    pub base_dir: Option<PathBuf>,
}

impl Default for SetupOptions {
    fn default() -> Self {
        Self {
            config_file: PathBuf::from(DEFAULT_CONFIG_FILE),
            base_dir: None,
        }
    }
}

impl SetupOptions {
    pub fn with_config_file(mut self, config_file: impl Into<PathBuf>) -> Self {
        self.config_file = config_file.into();
        self
    }

    pub fn with_base_dir(mut self, base_dir: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(base_dir.into());
        self
    }

    /// Absolute location of the config file.
    ///
    /// If the working directory cannot be determined the relative path is
    /// returned unchanged and resolved by the OS.
    pub fn resolved_path(&self) -> PathBuf {
        if self.config_file.is_absolute() {
            return self.config_file.clone();
        }
        let base = self.base_dir.clone().or_else(|| env::current_dir().ok());
        match base {
            Some(base) => base.join(&self.config_file),
            None => self.config_file.clone(),
        }
    }
}

/// Receives config failures that setup swallows.
pub trait DiagnosticSink {
    fn report(&self, error: &ConfigError);
}

/// Default sink: logs through `tracing` at error level.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&self, error: &ConfigError) {
        tracing::error!(
            domain = "registry",
            path = %error.path().display(),
            error = %error,
            "failed to load registry config",
        );
    }
}

impl<F> DiagnosticSink for F
where
    F: Fn(&ConfigError),
{
    fn report(&self, error: &ConfigError) {
        self(error)
    }
}

/// Read and parse a config file without any fallback.
///
/// The top level must be a JSON object whose values are arrays of `T`.
pub fn load_config<T: DeserializeOwned>(path: &Path) -> Result<RegistryConfig<T>, ConfigError> {
    let data = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&data).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Build a handler seeded from the config file, logging failures via `tracing`.
pub fn setup_registry<T: DeserializeOwned>(options: &SetupOptions) -> RegistryHandler<T> {
    setup_registry_with_sink(options, &TracingSink)
}

pub fn setup_registry_with_sink<T, S>(options: &SetupOptions, sink: &S) -> RegistryHandler<T>
where
    T: DeserializeOwned,
    S: DiagnosticSink + ?Sized,
{
    let mut handler = RegistryHandler::new();
    merge_config_into_with_sink(&mut handler, options, sink);
    handler
}

/// Append the config file's entries to an existing handler.
///
/// Returns the number of keys read from the file; zero when the file is
/// missing or unusable, in which case `handler` is untouched.
pub fn merge_config_into<T: DeserializeOwned>(
    handler: &mut RegistryHandler<T>,
    options: &SetupOptions,
) -> usize {
    merge_config_into_with_sink(handler, options, &TracingSink)
}

pub fn merge_config_into_with_sink<T, S>(
    handler: &mut RegistryHandler<T>,
    options: &SetupOptions,
    sink: &S,
) -> usize
where
    T: DeserializeOwned,
    S: DiagnosticSink + ?Sized,
{
    let path = options.resolved_path();
    if !path.exists() {
        tracing::debug!(
            domain = "registry",
            path = %path.display(),
            "no registry config found; starting empty",
        );
        return 0;
    }

    let config = match load_config::<T>(&path) {
        Ok(config) => config,
        Err(err) => {
            sink.report(&err);
            return 0;
        }
    };

    let loaded = config.len();
    for (key, items) in config {
        handler.register_many(&key, items);
    }
    tracing::debug!(
        domain = "registry",
        path = %path.display(),
        keys = loaded,
        "loaded registry config",
    );
    loaded
}
