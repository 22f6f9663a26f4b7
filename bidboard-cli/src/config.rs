//! Global configuration at ~/.config/bidboard/config.toml

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Global configuration.
///
/// Everything is optional: with no config file at all, the CLI runs fully
/// offline against the local store with an anonymous session.
#[derive(Deserialize, Clone, Default)]
#[serde(default)]
pub struct GlobalConfig {
    /// Where the local fallback store and filter prefs live.
    /// Defaults to the platform data dir.
    pub data_dir: Option<PathBuf>,

    /// Base URL of the events API. Absent means no remote tier.
    pub api_url: Option<String>,

    /// Authenticated user id. Absent means an anonymous session.
    pub user_id: Option<String>,

    /// Path to the project feed (JSON array of project records).
    pub projects_path: Option<PathBuf>,
}

impl GlobalConfig {
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if !path.exists() {
            return Ok(GlobalConfig::default());
        }
        let contents = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config at {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config at {}", path.display()))
    }

    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?
            .join("bidboard");
        Ok(config_dir.join("config.toml"))
    }

    pub fn data_dir(&self) -> Result<PathBuf> {
        let dir = match &self.data_dir {
            Some(dir) => dir.clone(),
            None => dirs::data_dir()
                .context("Could not determine data directory")?
                .join("bidboard"),
        };
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create data directory {}", dir.display()))?;
        Ok(dir)
    }

    pub fn events_path(&self) -> Result<PathBuf> {
        Ok(self.data_dir()?.join("events.json"))
    }

    pub fn prefs_path(&self) -> Result<PathBuf> {
        Ok(self.data_dir()?.join("filters.json"))
    }
}
