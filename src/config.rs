use std::fmt;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::otc::{DEFAULT_CONTRACT_ADDRESS, DEFAULT_RPC_URL, VIEW_BATCH};

pub const CONFIG_FILENAME: &str = "transacto.json";
pub const ENV_RPC_URL: &str = "TRANSACTO_RPC_URL";
pub const ENV_PRIVATE_KEY: &str = "TRANSACTO_PRIVATE_KEY";

/// Per-client settings. Every field has a default, so a partial file works.
#[derive(Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OtcConfig {
    pub rpc_url: String,
    pub contract_address: String,
    /// Kept for a future signer; nothing in this crate signs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub private_key: Option<String>,
    pub max_retries: u32,
    pub retry_delay_ms: u64,
    pub batch_size: u64,
    pub timeout_secs: u64,
}

impl Default for OtcConfig {
    fn default() -> Self {
        Self {
            rpc_url: DEFAULT_RPC_URL.to_string(),
            contract_address: DEFAULT_CONTRACT_ADDRESS.to_string(),
            private_key: None,
            max_retries: 3,
            retry_delay_ms: 500,
            batch_size: VIEW_BATCH,
            timeout_secs: 30,
        }
    }
}

impl fmt::Debug for OtcConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OtcConfig")
            .field("rpc_url", &self.rpc_url)
            .field("contract_address", &self.contract_address)
            .field("private_key", &self.private_key.as_ref().map(|_| "<redacted>"))
            .field("max_retries", &self.max_retries)
            .field("retry_delay_ms", &self.retry_delay_ms)
            .field("batch_size", &self.batch_size)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl OtcConfig {
    pub fn with_rpc_url(mut self, rpc_url: &str) -> Self {
        self.rpc_url = crate::utils::remove_trailing_slash(rpc_url);
        self
    }

    pub fn has_private_key(&self) -> bool {
        self.private_key.as_deref().is_some_and(|k| !k.trim().is_empty())
    }

    /// Load from `path`, or from [`CONFIG_FILENAME`] in the working directory.
    ///
    /// An explicit path must exist; a missing default file just yields the
    /// defaults. Environment overrides are applied last.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(p) => Self::from_file(p)?,
            None if Path::new(CONFIG_FILENAME).exists() => Self::from_file(Path::new(CONFIG_FILENAME))?,
            None => {
                tracing::debug!("no {} found, using defaults", CONFIG_FILENAME);
                Self::default()
            }
        };
        Ok(config.apply_env())
    }

    /// Read a JSON config file as-is, without environment overrides.
    pub fn from_file(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open config file {}", path.display()))?;
        serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let file = File::create(path)
            .with_context(|| format!("Failed to create config file {}", path.display()))?;
        serde_json::to_writer_pretty(BufWriter::new(file), self)
            .with_context(|| format!("Failed to write config to {}", path.display()))
    }

    fn apply_env(mut self) -> Self {
        if let Some(url) = non_empty_var(ENV_RPC_URL) {
            self.rpc_url = url;
        }
        if let Some(key) = non_empty_var(ENV_PRIVATE_KEY) {
            self.private_key = Some(key);
        }
        self.rpc_url = crate::utils::remove_trailing_slash(&self.rpc_url);
        self
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|s| !s.is_empty())
}
