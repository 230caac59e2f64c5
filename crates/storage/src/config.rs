use std::fmt;

use mintpress_core::config::{env_lookup, parse_or, ConfigError};

/// Default nft.storage API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.nft.storage";

/// Default per-request timeout. Uploads of large images are slow.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Connection settings for the storage API.
#[derive(Clone)]
pub struct StorageConfig {
    pub api_key: String,
    pub base_url: String,
    pub timeout_secs: u64,
}

impl StorageConfig {
    /// Load storage configuration from environment variables.
    ///
    /// | Env Var                    | Default                   |
    /// |----------------------------|---------------------------|
    /// | `NFT_STORAGE_KEY`          | required                  |
    /// | `NFT_STORAGE_URL`          | `https://api.nft.storage` |
    /// | `NFT_STORAGE_TIMEOUT_SECS` | `60`                      |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(env_lookup)
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup("NFT_STORAGE_KEY").ok_or(ConfigError::Missing("NFT_STORAGE_KEY"))?;
        let base_url = lookup("NFT_STORAGE_URL")
            .unwrap_or_else(|| DEFAULT_BASE_URL.into())
            .trim_end_matches('/')
            .to_string();
        let timeout_secs = parse_or(&lookup, "NFT_STORAGE_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?;

        Ok(Self {
            api_key,
            base_url,
            timeout_secs,
        })
    }
}

impl fmt::Debug for StorageConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StorageConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}
