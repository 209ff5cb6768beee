//! Error types for config discovery, loading, and validation.

use crate::store::StoreError;
use thiserror::Error;

/// Errors returned while resolving, loading, or validating config.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No configuration source could be resolved.
    #[error("no CyHy configuration found")]
    NotFound,
    /// Reading a config file failed.
    #[error("failed to read config: {0}")]
    ReadFailed(#[from] std::io::Error),
    /// Parsing config text as TOML failed.
    #[error("failed to parse config: {0}")]
    ParseFailed(#[from] toml::de::Error),
    /// Parsed config does not conform to the caller's model.
    #[error("config failed validation: {0}")]
    Validation(toml::de::Error),
    /// The remote store reported the parameter absent.
    #[error("parameter {0} not found in the remote store")]
    RemoteKeyMissing(String),
    /// The remote store call itself failed.
    #[error("remote store lookup failed for {key}")]
    RemoteLookup {
        /// The parameter key that was being fetched.
        key: String,
        /// Underlying store client error.
        #[source]
        source: StoreError,
    },
}
