//! Settings file for the command-line front end
//!
//! Describes which platform to emulate and where the overlay state lives on disk.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::constants::config;
use crate::logs::ScanStrategy;
use crate::platform::{Capabilities, OsVersion};
use crate::types::SurfaceSize;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Emulated OS version, e.g. `"26.0"`
    #[serde(default = "default_os_version")]
    pub os_version: String,
    /// A negative dimension means no surface is attached
    #[serde(default = "default_surface_width")]
    pub surface_width: f32,
    #[serde(default = "default_surface_height")]
    pub surface_height: f32,
    #[serde(default = "default_properties_path")]
    pub properties_path: PathBuf,
    #[serde(default = "default_log_path")]
    pub log_path: PathBuf,
    #[serde(default)]
    pub scan_strategy: ScanStrategy,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default = "default_device_model")]
    pub device_model: String,
}

fn default_os_version() -> String {
    "26.0".to_string()
}

fn default_surface_width() -> f32 {
    390.0
}

fn default_surface_height() -> f32 {
    844.0
}

fn app_dir(base: Option<PathBuf>) -> PathBuf {
    let mut path = base.unwrap_or_else(|| PathBuf::from("."));
    path.push(config::APP_DIR);
    path
}

fn default_properties_path() -> PathBuf {
    app_dir(dirs::config_dir()).join(config::PROPERTIES_FILENAME)
}

fn default_log_path() -> PathBuf {
    app_dir(dirs::data_dir()).join(config::LOG_FILENAME)
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_device_model() -> String {
    "Simulator".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            os_version: default_os_version(),
            surface_width: default_surface_width(),
            surface_height: default_surface_height(),
            properties_path: default_properties_path(),
            log_path: default_log_path(),
            scan_strategy: ScanStrategy::default(),
            log_level: default_log_level(),
            device_model: default_device_model(),
        }
    }
}

impl Settings {
    pub fn path() -> PathBuf {
        app_dir(dirs::config_dir()).join(config::FILENAME)
    }

    /// Load settings, falling back to defaults when the file does not exist yet
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            info!(path = %path.display(), "Config file not found, using defaults");
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;
        let settings: Settings = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse JSON from {:?}", path))?;

        info!(path = %path.display(), os = %settings.os_version, "Loaded config");
        Ok(settings)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory {:?}", parent))?;
        }

        let json = serde_json::to_string_pretty(self).context("Failed to serialize config to JSON")?;
        fs::write(path, json).with_context(|| format!("Failed to write config to {:?}", path))?;

        info!(path = %path.display(), "Saved config");
        Ok(())
    }

    pub fn os_version(&self) -> Result<OsVersion> {
        self.os_version
            .parse::<OsVersion>()
            .map_err(anyhow::Error::msg)
            .with_context(|| format!("Invalid os_version {:?}", self.os_version))
    }

    pub fn capabilities(&self) -> Result<Capabilities> {
        Ok(Capabilities::for_version(self.os_version()?))
    }

    pub fn surface(&self) -> Option<SurfaceSize> {
        if self.surface_width < 0.0 || self.surface_height < 0.0 {
            warn!(
                width = self.surface_width,
                height = self.surface_height,
                "Negative surface size, treating overlay surface as unattached"
            );
            return None;
        }
        Some(SurfaceSize::new(self.surface_width, self.surface_height))
    }
}
