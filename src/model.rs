//! Configuration schema shipped with the CyHy tools.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;

/// A named database connection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Database {
    /// Connection URI used to authenticate to the database.
    pub auth_uri: String,
    /// Database name.
    pub name: String,
}

/// A named operating mode, bound to one of the configured databases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Mode {
    /// The resolved database this mode operates against.
    pub database: Database,
    /// Human-readable description of the mode.
    pub description: String,
    /// Mode name.
    pub name: String,
}

/// Root of the CyHy configuration document.
///
/// In the document each mode names its database by key into the
/// `databases` table; deserialization resolves those references, so a
/// loaded config always carries fully-expanded `Database` values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CyHyConfig {
    /// Operating modes, keyed by mode identifier.
    pub modes: HashMap<String, Mode>,
    /// Database connections, keyed by database identifier.
    pub databases: HashMap<String, Database>,
}

/// On-disk shape of a mode, before database references are resolved.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawMode {
    database: String,
    description: String,
    name: String,
}

/// On-disk shape of the config root.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    modes: HashMap<String, RawMode>,
    databases: HashMap<String, Database>,
}

impl<'de> Deserialize<'de> for CyHyConfig {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = RawConfig::deserialize(deserializer)?;
        let mut modes = HashMap::with_capacity(raw.modes.len());
        for (key, mode) in raw.modes {
            let database = raw.databases.get(&mode.database).cloned().ok_or_else(|| {
                D::Error::custom(format!(
                    "mode {key} references unknown database {}",
                    mode.database
                ))
            })?;
            modes.insert(
                key,
                Mode {
                    database,
                    description: mode.description,
                    name: mode.name,
                },
            );
        }
        Ok(CyHyConfig {
            modes,
            databases: raw.databases,
        })
    }
}
