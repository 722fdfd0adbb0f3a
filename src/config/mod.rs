mod defaults;


use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::error::LullError;
use defaults::*;

/// Top-level lull configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub debounce: DebounceConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub model: ModelConfig,
}

/// Debounce window settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebounceConfig {
    /// Quiet period (seconds) after the last fragment before dispatch.
    #[serde(default = "default_delay_secs")]
    pub delay_secs: u64,
    /// Message sent to the user when the completion capability fails.
    #[serde(default = "default_failure_reply")]
    pub failure_reply: String,
}

impl DebounceConfig {
    /// The quiet period as a [`Duration`].
    pub fn delay(&self) -> Duration {
        Duration::from_secs(self.delay_secs)
    }
}

impl Default for DebounceConfig {
    fn default() -> Self {
        Self {
            delay_secs: default_delay_secs(),
            failure_reply: default_failure_reply(),
        }
    }
}

/// Aggregation store settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Backing for pending aggregations: "memory" or "cache".
    #[serde(default = "default_backend")]
    pub backend: String,
    /// Key namespace used by the cache backend.
    #[serde(default = "default_key_prefix")]
    pub key_prefix: String,
    /// TTL (seconds) for cache-backed pending entries, reaping buffers
    /// orphaned by a crash mid-window. 0 disables expiry.
    #[serde(default = "default_pending_ttl_secs")]
    pub pending_ttl_secs: u64,
}

impl StoreConfig {
    /// The orphan TTL as a [`Duration`], or `None` when disabled.
    pub fn pending_ttl(&self) -> Option<Duration> {
        if self.pending_ttl_secs == 0 {
            None
        } else {
            Some(Duration::from_secs(self.pending_ttl_secs))
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            key_prefix: default_key_prefix(),
            pending_ttl_secs: default_pending_ttl_secs(),
        }
    }
}

/// Model selection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Model used when the selector has no entry for a user.
    #[serde(default = "default_model")]
    pub default: String,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            default: default_model(),
        }
    }
}

/// Load configuration from a TOML file.
///
/// Falls back to defaults if the file does not exist.
pub fn load(path: &str) -> Result<Config, LullError> {
    let path = Path::new(path);
    if !path.exists() {
        tracing::info!(
            "Config file not found at {}, using defaults",
            path.display()
        );
        return Ok(Config::default());
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| LullError::Config(format!("failed to read {}: {}", path.display(), e)))?;

    let config: Config = toml::from_str(&content)
        .map_err(|e| LullError::Config(format!("failed to parse config: {}", e)))?;

    Ok(config)
}
