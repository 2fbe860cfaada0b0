//! Process-local keyed multi-value registry.
//!
//! Independent parts of an application register items under named slots and
//! other parts read back everything registered under a slot without knowing
//! about each other. The crate provides:
//!
//! - [`RegistryHandler`]: the key -> ordered bucket store and its policy,
//! - [`setup_registry`] / [`merge_config_into`]: best-effort seeding from
//!   `react-app-registry.config.json`,
//! - [`RegistryProvider`] / [`use_registry`]: the scoped capability bundle
//!   consumers receive instead of the handler itself.

pub mod config;
pub mod context;
pub mod error;
pub mod registry;

pub use config::{
    DEFAULT_CONFIG_FILE, DiagnosticSink, SetupOptions, TracingSink, load_config,
    merge_config_into, merge_config_into_with_sink, setup_registry, setup_registry_with_sink,
};
pub use context::{RegistryApi, RegistryContext, RegistryProvider, use_registry};
pub use error::{ConfigError, OutsideProvider, RegistryError, RegistryKeyNotFound};
pub use registry::{RegistryConfig, RegistryContainer, RegistryHandler};
