//! Host configuration: where files and widget records live.

use crate::error::{AppError, AppResult};
use foldr_core::EngineConfig;
use foldr_core::storage::{default_desktop_root, default_storage_root, default_widgets_dir};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Host settings, read from JSON. Missing fields take the platform defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Directory ingested files are moved into.
    pub storage_root: PathBuf,
    /// Directory drag-outs and removals restore into.
    pub desktop_root: PathBuf,
    /// Directory holding one JSON record per widget.
    pub widgets_dir: PathBuf,
    pub engine: EngineConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            storage_root: default_storage_root().unwrap_or_else(|| PathBuf::from("foldr/storage")),
            desktop_root: default_desktop_root().unwrap_or_else(|| PathBuf::from("Desktop")),
            widgets_dir: default_widgets_dir().unwrap_or_else(|| PathBuf::from("foldr/widgets")),
            engine: EngineConfig::default(),
        }
    }
}

impl AppConfig {
    /// `<config-dir>/foldr/config.json`
    pub fn default_path() -> AppResult<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join("foldr").join("config.json"))
            .ok_or(AppError::NoDefaultDir("config"))
    }

    /// Read `path`, or fall back to defaults when it does not exist.
    pub fn load(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            log::debug!("No config at {}; using defaults", path.display());
            return Ok(Self::default());
        }
        let json = fs::read_to_string(path)?;
        serde_json::from_str(&json).map_err(|e| AppError::Config {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    pub fn save(&self, path: &Path) -> AppResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|e| AppError::Config {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        fs::write(path, json)?;
        Ok(())
    }
}
