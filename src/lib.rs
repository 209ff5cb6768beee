//! Discovery, loading, and validation of CyHy configuration.
//!
//! This crate owns the ordered search for a `cyhy.toml` configuration
//! source (explicit path, environment variables, fixed fallback paths, or
//! a remote parameter store), reads the winning source, and optionally
//! validates the parsed document against a caller-supplied serde model.

mod error;
mod loader;
mod model;
mod store;

/// Public error type returned by config discovery and loading APIs.
pub use error::ConfigError;
/// Discovery types and the `get_config` family of entry points.
pub use loader::{
    CONFIG_PATH_VAR, CONFIG_SSM_PATH_VAR, ConfigSource, ResolveOptions, find_config, get_config,
    get_config_value, get_config_value_with, get_config_with, validate_config,
};
/// The configuration schema shipped with the CyHy tools.
pub use model::{CyHyConfig, Database, Mode};
/// Remote parameter store collaborator contract.
pub use store::{ParameterStore, StoreError};
