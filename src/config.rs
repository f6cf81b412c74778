//! Runtime settings.
//!
//! Settings are layered: built-in defaults, then an optional YAML file, then
//! environment variables prefixed with `FPL_`. Example:
//! `FPL_CACHE_TTL_SECS=60` sets `cache_ttl_secs` to 60.

use figment::{
    providers::{Env, Format, Serialized, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::Result;

/// YAML file picked up from the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "fpl-standings.yaml";

const ENV_PREFIX: &str = "FPL_";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheBackend {
    File,
    Sqlite,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub base_url: String,
    pub user_agent: String,
    pub timeout_secs: u64,
    pub cache_ttl_secs: u64,
    pub refresh_cooldown_secs: u64,
    pub cache_backend: CacheBackend,
    // Defaults to the platform cache directory
    pub cache_dir: Option<PathBuf>,
    pub detail_concurrency: usize,
    pub max_roster_pages: u32,
    pub rate_limit_capacity: usize,
    pub host: String,
    pub port: u16,
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: crate::fpl::http::FPL_BASE_URL.to_string(),
            user_agent: concat!("fpl-standings/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout_secs: 10,
            cache_ttl_secs: 300,
            refresh_cooldown_secs: 60,
            cache_backend: CacheBackend::File,
            cache_dir: None,
            detail_concurrency: 1,
            max_roster_pages: 20,
            rate_limit_capacity: 10_000,
            host: "127.0.0.1".to_string(),
            port: 8080,
            log_level: "info".to_string(),
        }
    }
}

impl Settings {
    /// Load settings from defaults, the YAML file (explicit path or
    /// `fpl-standings.yaml` if present) and `FPL_*` environment variables.
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let mut figment = Figment::new().merge(Serialized::defaults(Settings::default()));

        match config_path {
            Some(path) => figment = figment.merge(Yaml::file_exact(path)),
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                figment = figment.merge(Yaml::file(DEFAULT_CONFIG_FILE))
            }
            None => {}
        }

        let settings: Settings = figment.merge(Env::prefixed(ENV_PREFIX)).extract()?;
        Ok(settings)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    pub fn refresh_cooldown(&self) -> Duration {
        Duration::from_secs(self.refresh_cooldown_secs)
    }

    /// Directory holding cached snapshots.
    pub fn resolved_cache_dir(&self) -> PathBuf {
        self.cache_dir
            .clone()
            .unwrap_or_else(crate::core::cache::default_cache_dir)
    }
}
