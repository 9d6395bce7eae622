use crate::providers::ecb::DEFAULT_BASE_URL;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use tracing::debug;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ProviderConfig {
    pub base_url: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        ProviderConfig {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

fn default_freshness_secs() -> u64 {
    3600
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CacheConfig {
    /// Maximum age of a stored feed before it is re-fetched.
    #[serde(default = "default_freshness_secs")]
    pub freshness_secs: u64,
    /// Override for the on-disk cache location. Defaults to the user data
    /// directory; set in tests to isolate state.
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        CacheConfig {
            freshness_secs: default_freshness_secs(),
            dir: None,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub provider: ProviderConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    /// Default target currency set; empty includes every published
    /// currency. Overridden by --symbols on the command line.
    #[serde(default)]
    pub targets: Vec<String>,
}

impl AppConfig {
    /// Loads the default config file, falling back to defaults when none
    /// has been set up yet.
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            debug!("No config file found, using defaults");
            return Ok(AppConfig::default());
        }
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("in", "codito", "ecbfx")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn default_cache_dir() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("in", "codito", "ecbfx")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.data_dir().join("cache"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }
}
