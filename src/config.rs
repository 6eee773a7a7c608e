use std::path::{Path, PathBuf};
use std::time::Duration;

use eyre::{Result, bail};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::YOUTUBE_ORIGIN;

const DEFAULT_CLIENT_NAME: &str = "WEB";
const DEFAULT_CLIENT_VERSION: &str = "2.20201022.01.01";
const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";
const DEFAULT_TIMEOUT_SECS: u64 = 120;
const CONFIG_ENV: &str = "YTSEARCH_CONFIG";

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Upstream origin requests are sent to
    pub base_url: String,
    /// Client identity sent with continuation requests
    pub client_name: String,
    pub client_version: String,
    pub user_agent: String,
    /// Wall-clock limit the CLI puts on a whole search
    pub timeout_secs: u64,
    pub default_format: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: YOUTUBE_ORIGIN.to_string(),
            client_name: DEFAULT_CLIENT_NAME.to_string(),
            client_version: DEFAULT_CLIENT_VERSION.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            default_format: None,
        }
    }
}

impl Config {
    /// Load from `config_path()`; a missing file means defaults
    pub fn load() -> Result<Self> {
        Self::load_from(&config_path())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("No config file at {}, using defaults", path.display());
            return Ok(Config::default());
        }
        debug!("Loading config from {}", path.display());
        let config: Config = toml::from_str(&std::fs::read_to_string(path)?)?;
        if !config.base_url.starts_with("http://") && !config.base_url.starts_with("https://") {
            bail!("base_url must be an http(s) origin, got {:?}", config.base_url);
        }
        Ok(config)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// `$YTSEARCH_CONFIG`, else `<config_dir>/ytsearch/config.toml`
pub fn config_path() -> PathBuf {
    if let Some(path) = std::env::var_os(CONFIG_ENV) {
        return PathBuf::from(path);
    }
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from(".config"))
        .join("ytsearch")
        .join("config.toml")
}
