//! Settings persistence.
//!
//! Settings live in a small TOML file. A missing file is not an error: the
//! defaults are used until the first save.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use directories::ProjectDirs;

use crate::models::settings::CalendarSettings;

const SETTINGS_FILE: &str = "settings.toml";

pub struct SettingsService {
    path: PathBuf,
}

impl SettingsService {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Service bound to `settings.toml` in the platform config directory.
    pub fn from_project_dirs() -> Result<Self> {
        let dirs = ProjectDirs::from("com", "CareCalendar", "CareCalendar")
            .ok_or_else(|| anyhow!("No home directory found for settings"))?;
        Ok(Self::new(dirs.config_dir().join(SETTINGS_FILE)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load settings, falling back to defaults when the file does not exist.
    pub fn load(&self) -> Result<CalendarSettings> {
        if !self.path.exists() {
            log::info!(
                "No settings file at {}, using defaults",
                self.path.display()
            );
            return Ok(CalendarSettings::default());
        }

        let text = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read settings from {}", self.path.display()))?;
        let settings: CalendarSettings = toml::from_str(&text)
            .with_context(|| format!("Failed to parse settings in {}", self.path.display()))?;
        settings
            .validate()
            .map_err(|e| anyhow!("Invalid settings in {}: {}", self.path.display(), e))?;

        log::debug!("Loaded settings from {}", self.path.display());
        Ok(settings)
    }

    /// Validate and write settings, creating the parent directory if needed.
    pub fn save(&self, settings: &CalendarSettings) -> Result<()> {
        settings
            .validate()
            .map_err(|e| anyhow!("Invalid settings: {}", e))?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create settings directory {}", parent.display())
                })?;
            }
        }

        let text = toml::to_string_pretty(settings).context("Failed to serialize settings")?;
        fs::write(&self.path, text)
            .with_context(|| format!("Failed to write settings to {}", self.path.display()))?;

        log::info!("Saved settings to {}", self.path.display());
        Ok(())
    }
}

/// Settings from `path` if given, otherwise from the platform config directory.
/// Any failure on the default location falls back to defaults with a warning.
pub fn load_settings(path: Option<&Path>) -> Result<CalendarSettings> {
    if let Some(path) = path {
        return SettingsService::new(path).load();
    }

    match SettingsService::from_project_dirs().and_then(|service| service.load()) {
        Ok(settings) => Ok(settings),
        Err(e) => {
            log::warn!("Failed to load settings: {:#}, using defaults", e);
            Ok(CalendarSettings::default())
        }
    }
}
