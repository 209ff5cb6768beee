//! Remote parameter store collaborator contract.

/// Error type returned by parameter store implementations.
pub type StoreError = Box<dyn std::error::Error + Send + Sync>;

/// A remote key-value parameter store queried by path-like key.
///
/// Implement this to back `CYHY_CONFIG_SSM_PATH` discovery with a real
/// client (e.g. a cloud systems-manager parameter store). The contract
/// distinguishes a cleanly absent key (`Ok(None)`) from a failed call
/// (`Err`, e.g. network or permission problems); the loader surfaces the
/// two as different error kinds.
pub trait ParameterStore: Send + Sync {
    /// Fetch the raw text stored under `key`, or `None` if the key does
    /// not exist.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
}
