//! Persistent wait tuning for axent.
//!
//! Stores user settings in `~/.axent/config.json`. The only knobs are the
//! state waiter's defaults — suites running against slow simulators raise
//! the timeout once here instead of threading it through every call.
//!
//! # Example
//!
//! ```no_run
//! use axent_core::config::AxentConfig;
//! use axent_core::wait::WaitSpec;
//!
//! // Load (returns defaults if the file doesn't exist)
//! let config = AxentConfig::load();
//! let spec = WaitSpec::from_config(&config);
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

const CONFIG_FILENAME: &str = "config.json";

fn default_timeout_ms() -> u64 {
    5000
}

fn default_poll_interval_ms() -> u64 {
    100
}

/// Returns the axent data directory (`~/.axent`).
pub fn axent_dir() -> PathBuf {
    dirs::home_dir()
        .map(|home| home.join(".axent"))
        .unwrap_or_else(|| PathBuf::from(".axent"))
}

/// Persistent axent configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AxentConfig {
    /// Default maximum wait for a state, in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub default_timeout_ms: u64,

    /// Default interval between state probes, in milliseconds.
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

impl Default for AxentConfig {
    fn default() -> Self {
        Self {
            default_timeout_ms: default_timeout_ms(),
            poll_interval_ms: default_poll_interval_ms(),
        }
    }
}

impl AxentConfig {
    /// Load config from `~/.axent/config.json`.
    ///
    /// Returns [`Default`] if the file does not exist or cannot be parsed.
    pub fn load() -> Self {
        let path = axent_dir().join(CONFIG_FILENAME);
        std::fs::read_to_string(&path)
            .ok()
            .and_then(|s| serde_json::from_str(&s).ok())
            .unwrap_or_default()
    }

    /// Save config to `~/.axent/config.json`.
    pub fn save(&self) -> std::io::Result<()> {
        let dir = axent_dir();
        std::fs::create_dir_all(&dir)?;
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
        std::fs::write(dir.join(CONFIG_FILENAME), json)
    }
}
