//! Keyed multi-value registry.
//!
//! `RegistryContainer` is the plain key -> bucket store and `RegistryHandler`
//! applies the registration policy on top of it. Handlers are single-owner;
//! share one through [`crate::context::RegistryApi`] when several call sites
//! need it.

pub mod container;
pub mod handler;

pub use container::{RegistryConfig, RegistryContainer};
pub use handler::RegistryHandler;
