//! # Configuration Modules
//!
//! Runtime configuration for the analytics fetcher and the binaries built on
//! top of it.

/// Layered admissions configuration: defaults, JSON file, overrides.
pub mod config_admissions;

pub use config_admissions::{load_config, AdmissionsConfig, ConfigError};
