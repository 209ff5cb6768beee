//! Ordered discovery and loading of the CyHy configuration.
//!
//! Resolves exactly one configuration source per call (explicit path,
//! environment variables, remote parameter store, or fixed fallback
//! paths), reads it, parses it as TOML, and optionally validates the
//! document against a caller-supplied serde model.


use crate::ConfigError;
use crate::store::ParameterStore;
use directories::UserDirs;
use log::{debug, error, info};
use serde::de::DeserializeOwned;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use toml::Table;

/// Environment variable forcing a filesystem config path.
pub const CONFIG_PATH_VAR: &str = "CYHY_CONFIG_PATH";
/// Environment variable forcing a remote parameter store key.
pub const CONFIG_SSM_PATH_VAR: &str = "CYHY_CONFIG_SSM_PATH";

/// Default config filename in the working directory.
const DEFAULT_CONFIG_FILE: &str = "cyhy.toml";
/// Config directory under the user's home.
const USER_CONFIG_DIR: &str = ".cyhy";
#[cfg(unix)]
/// System-wide config path on Unix.
const SYSTEM_CONFIG_PATH: &str = "/etc/cyhy.toml";

/// The single configuration source selected by discovery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Path supplied by the caller or forced through `CYHY_CONFIG_PATH`.
    File(PathBuf),
    /// Remote store key, from `CYHY_CONFIG_SSM_PATH`.
    Remote(String),
    /// Fallback path found on disk during discovery.
    Discovered(PathBuf),
}

/// Per-call snapshot of the ambient state discovery consults.
///
/// `from_env` captures the real process environment; tests construct the
/// struct directly so resolution calls stay independent and parallel-safe.
#[derive(Clone)]
pub struct ResolveOptions<'a> {
    /// Working directory searched for `cyhy.toml`.
    pub cwd: PathBuf,
    /// User fallback path (defaults to `~/.cyhy/cyhy.toml`).
    pub user_config_path: Option<PathBuf>,
    /// System fallback path (defaults to `/etc/cyhy.toml` on Unix).
    pub system_config_path: Option<PathBuf>,
    /// Value of `CYHY_CONFIG_PATH`, if set and non-empty.
    pub env_config_path: Option<PathBuf>,
    /// Value of `CYHY_CONFIG_SSM_PATH`, if set and non-empty.
    pub env_store_key: Option<String>,
    /// Remote store client used when `env_store_key` is set.
    pub store: Option<&'a dyn ParameterStore>,
}

impl<'a> ResolveOptions<'a> {
    /// Snapshot the process environment and default fallback locations.
    pub fn from_env() -> Self {
        Self {
            cwd: env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            user_config_path: default_user_config_path(),
            system_config_path: default_system_config_path(),
            env_config_path: env_var(CONFIG_PATH_VAR).map(PathBuf::from),
            env_store_key: env_var(CONFIG_SSM_PATH_VAR),
            store: None,
        }
    }

    /// Attach the remote store client used for `CYHY_CONFIG_SSM_PATH`.
    pub fn with_store(mut self, store: &'a dyn ParameterStore) -> Self {
        self.store = Some(store);
        self
    }
}

/// Find the single CyHy configuration source.
///
/// Tried strictly in order, first success wins: the `file_path` argument
/// (used as-is, discovery skipped), `CYHY_CONFIG_PATH`,
/// `CYHY_CONFIG_SSM_PATH`, then `cyhy.toml` in the working directory,
/// under `~/.cyhy/`, and in `/etc`. The two environment tiers commit the
/// caller: once set they are selected without an existence check, and a
/// later failure to read from them is terminal rather than a fallthrough.
pub fn find_config(
    file_path: Option<&Path>,
    options: &ResolveOptions<'_>,
) -> Result<ConfigSource, ConfigError> {
    if let Some(path) = file_path {
        debug!("using config file passed as parameter: {}", path.display());
        return Ok(ConfigSource::File(path.to_path_buf()));
    }

    if let Some(path) = &options.env_config_path {
        debug!(
            "using config file from {CONFIG_PATH_VAR}: {}",
            path.display()
        );
        return Ok(ConfigSource::File(path.clone()));
    }

    if let Some(key) = &options.env_store_key {
        debug!("using remote store key from {CONFIG_SSM_PATH_VAR}: {key}");
        return Ok(ConfigSource::Remote(key.clone()));
    }

    let cwd_path = options.cwd.join(DEFAULT_CONFIG_FILE);
    if cwd_path.exists() {
        debug!(
            "using config file from current working directory: {}",
            cwd_path.display()
        );
        return Ok(ConfigSource::Discovered(cwd_path));
    }

    if let Some(path) = &options.user_config_path {
        if path.exists() {
            debug!("using config file from home directory: {}", path.display());
            return Ok(ConfigSource::Discovered(path.clone()));
        }
    }

    if let Some(path) = &options.system_config_path {
        if path.exists() {
            debug!("using system config file: {}", path.display());
            return Ok(ConfigSource::Discovered(path.clone()));
        }
    }

    error!("no CyHy configuration found");
    Err(ConfigError::NotFound)
}

/// Load the configuration and validate it against `T`.
///
/// Discovery runs against a fresh [`ResolveOptions::from_env`] snapshot;
/// no remote store client is attached, so a set `CYHY_CONFIG_SSM_PATH`
/// fails the lookup. Use [`get_config_with`] to wire a store or to inject
/// ambient state.
pub fn get_config<T>(file_path: Option<&Path>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    get_config_with(file_path, &ResolveOptions::from_env())
}

/// Load the configuration with injected ambient state and validate it
/// against `T`.
pub fn get_config_with<T>(
    file_path: Option<&Path>,
    options: &ResolveOptions<'_>,
) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let table = get_config_value_with(file_path, options)?;
    validate_config(table)
}

/// Load the configuration and return the raw parsed table unchanged.
pub fn get_config_value(file_path: Option<&Path>) -> Result<Table, ConfigError> {
    get_config_value_with(file_path, &ResolveOptions::from_env())
}

/// Load the configuration with injected ambient state and return the raw
/// parsed table unchanged.
pub fn get_config_value_with(
    file_path: Option<&Path>,
    options: &ResolveOptions<'_>,
) -> Result<Table, ConfigError> {
    let source = find_config(file_path, options)?;
    let contents = read_source(&source, options)?;
    let table: Table = toml::from_str(&contents)?;
    info!("loaded CyHy configuration from {source:?}");
    Ok(table)
}

/// Validate a parsed config table against the caller's model.
pub fn validate_config<T>(table: Table) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    table.try_into().map_err(ConfigError::Validation)
}

/// Fetch the raw text of a resolved source.
///
/// At most one filesystem read or one remote store call per invocation.
fn read_source(source: &ConfigSource, options: &ResolveOptions<'_>) -> Result<String, ConfigError> {
    match source {
        ConfigSource::File(path) | ConfigSource::Discovered(path) => {
            debug!("reading config file: {}", path.display());
            Ok(fs::read_to_string(path)?)
        }
        ConfigSource::Remote(key) => {
            debug!("fetching config from remote store: {key}");
            let store = options.store.ok_or_else(|| ConfigError::RemoteLookup {
                key: key.clone(),
                source: "no parameter store client configured".into(),
            })?;
            let value = store.get(key).map_err(|source| ConfigError::RemoteLookup {
                key: key.clone(),
                source,
            })?;
            value.ok_or_else(|| ConfigError::RemoteKeyMissing(key.clone()))
        }
    }
}

/// Read an environment variable, treating empty values as unset.
fn env_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.is_empty())
}

/// Default user config path under the home directory.
fn default_user_config_path() -> Option<PathBuf> {
    UserDirs::new().map(|dirs| {
        dirs.home_dir()
            .join(USER_CONFIG_DIR)
            .join(DEFAULT_CONFIG_FILE)
    })
}

/// Default system config path on Unix; None elsewhere.
fn default_system_config_path() -> Option<PathBuf> {
    #[cfg(unix)]
    {
        Some(PathBuf::from(SYSTEM_CONFIG_PATH))
    }
    #[cfg(not(unix))]
    {
        None
    }
}
