//! Application configuration.

use ratewatch_core::CurrencyPair;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Upstream feed listing endpoint.
    pub feed_url: String,
    /// Reference pair tracked for scheduled history and alerts.
    pub reference: PairSettings,
    /// Chat id allowed to use /stats.
    pub admin_chat_id: i64,
    /// Rate history document path.
    pub history_path: String,
    /// Subscriber registry document path.
    pub subscribers_path: String,
    /// Logging level.
    pub log_level: String,
}

/// Reference pair settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PairSettings {
    /// Base currency code.
    pub base: String,
    /// Counter currency code.
    pub counter: String,
}

impl PairSettings {
    /// Normalized pair.
    pub fn pair(&self) -> CurrencyPair {
        CurrencyPair::new(&self.base, &self.counter)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            feed_url: "https://api.money-go.com/api/currencies/rates".to_string(),
            reference: PairSettings {
                base: "USD".to_string(),
                counter: "BDT".to_string(),
            },
            admin_chat_id: 0,
            history_path: "rate_history.json".to_string(),
            subscribers_path: "subscribers.json".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Load from a JSON file. A missing file yields defaults; an unreadable
    /// or malformed file is a startup error.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            info!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }
}
