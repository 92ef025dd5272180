//! Configuration handling for the TUI

use crate::state::FlowKind;
use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Environment override for where submissions are written
const SUBMISSIONS_DIR_ENV: &str = "SIGNUP_SUBMISSIONS_DIR";

/// User configuration for the TUI
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SignupConfig {
    /// Directory receiving submitted payloads
    pub submissions_dir: Option<PathBuf>,
    /// Flow highlighted on the home screen at startup
    pub last_flow: Option<FlowKind>,
}

impl SignupConfig {
    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("io", "signup", "signup-tui")
    }

    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from file
    pub fn load() -> Result<Self> {
        let path = Self::config_path();

        if let Some(path) = path {
            if path.exists() {
                let content = fs::read_to_string(&path)?;
                let config: SignupConfig = serde_json::from_str(&content)?;
                return Ok(config);
            }
        }

        Ok(Self::default())
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        if let Some(path) = Self::config_path() {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            let content = serde_json::to_string_pretty(self)?;
            fs::write(&path, content)?;
            tracing::debug!(path = %path.display(), "config saved");
        }
        Ok(())
    }

    /// Resolve the submissions directory.
    ///
    /// Order: `SIGNUP_SUBMISSIONS_DIR`, the configured directory, the platform
    /// data dir, then `./submissions`.
    pub fn submissions_dir(&self) -> PathBuf {
        if let Ok(dir) = std::env::var(SUBMISSIONS_DIR_ENV) {
            if !dir.is_empty() {
                return PathBuf::from(dir);
            }
        }
        if let Some(dir) = &self.submissions_dir {
            return dir.clone();
        }
        Self::project_dirs()
            .map(|dirs| dirs.data_dir().join("submissions"))
            .unwrap_or_else(|| PathBuf::from("submissions"))
    }
}
