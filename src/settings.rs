// settings.rs - Persisted Form Values
//
// The main window's fields are remembered between sessions in a small
// JSON file under the platform config directory. The capture region is
// not part of it.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use log::{error, info};
use serde::{Deserialize, Serialize};

use crate::capture::file::desktop_dir;
use crate::constants::defaults;

/// Last-used values of the main window's fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Directory screenshots are written to
    #[serde(default = "default_save_path")]
    pub save_path: String,
    /// Interval field text, kept verbatim so a half-typed value survives
    #[serde(default = "default_interval")]
    pub interval: String,
    /// Shot count field text
    #[serde(default = "default_count")]
    pub count: String,
    /// Hide the main window while capturing
    #[serde(default)]
    pub hide_window: bool,
}

fn default_save_path() -> String {
    desktop_dir().to_string_lossy().into_owned()
}
fn default_interval() -> String {
    defaults::INTERVAL_SECS.to_string()
}
fn default_count() -> String {
    defaults::SHOT_COUNT.to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            save_path: default_save_path(),
            interval: default_interval(),
            count: default_count(),
            hide_window: false,
        }
    }
}

impl Settings {
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("ShotTimer")
            .join("settings.json")
    }

    /// Load from the default location, falling back to defaults
    pub fn load() -> Self {
        Self::load_from(&Self::config_path())
    }

    /// Load from `path`. Missing or unreadable files give the defaults.
    pub fn load_from(path: &Path) -> Self {
        if path.exists() {
            match fs::read_to_string(path) {
                Ok(contents) => match serde_json::from_str(&contents) {
                    Ok(settings) => {
                        info!("Settings loaded from {:?}", path);
                        return settings;
                    }
                    Err(e) => {
                        error!("Failed to parse settings: {}", e);
                    }
                },
                Err(e) => {
                    error!("Failed to read settings file: {}", e);
                }
            }
        }
        Self::default()
    }

    pub fn save(&self) -> anyhow::Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(self).context("Failed to serialize settings")?;
        fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
        info!("Settings saved to {:?}", path);
        Ok(())
    }
}
