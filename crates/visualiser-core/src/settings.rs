//! Settings file IO
//!
//! Settings are stored as RON, JSON or TOML, chosen by file extension.
//! A path without an extension is treated as RON.

use crate::config::AnalysisConfig;
use crate::error::{ConfigError, CoreError, Result};
use crate::logging::LogConfig;
use crate::spinner::SpinnerConfig;
use crate::visual::{Layout, RingLayout};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Maximum accepted settings file size (1 MiB)
pub const MAX_SETTINGS_FILE_SIZE: u64 = 1024 * 1024;

/// Everything a visualiser run is configured with
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Frames per second when rendering offline
    pub frame_rate: f32,
    /// Audio analysis
    pub analysis: AnalysisConfig,
    /// Ring rotation
    pub spinner: SpinnerConfig,
    /// Object placement
    pub layout: Layout,
    /// Logging
    pub log: LogConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            frame_rate: 60.0,
            analysis: AnalysisConfig::default(),
            spinner: SpinnerConfig::default(),
            layout: Layout::Ring(RingLayout::default()),
            log: LogConfig::default(),
        }
    }
}

/// On-disk encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsFormat {
    /// Rusty Object Notation
    Ron,
    /// JSON
    Json,
    /// TOML
    Toml,
}

impl SettingsFormat {
    /// Pick the format from a path's extension
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("ron");

        match extension {
            "ron" => Ok(Self::Ron),
            "json" => Ok(Self::Json),
            "toml" => Ok(Self::Toml),
            other => Err(CoreError::UnsupportedFormat(other.to_string())),
        }
    }
}

impl Settings {
    /// Seconds per rendered frame
    pub fn frame_interval(&self) -> f32 {
        1.0 / self.frame_rate
    }

    /// Check the analysis config and frame rate
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        self.analysis.validate()?;
        if !(self.frame_rate.is_finite() && self.frame_rate > 0.0) {
            return Err(ConfigError::InvalidFrameRate(self.frame_rate));
        }
        Ok(())
    }

    /// Load settings from `path`
    pub fn load(path: &Path) -> Result<Self> {
        Self::load_with_limit(path, MAX_SETTINGS_FILE_SIZE)
    }

    fn load_with_limit(path: &Path, limit: u64) -> Result<Self> {
        let format = SettingsFormat::from_path(path)?;

        let size = std::fs::metadata(path)?.len();
        if size > limit {
            return Err(CoreError::FileTooLarge { size, limit });
        }

        let content = std::fs::read_to_string(path)?;
        let settings = Self::from_str_as(&content, format)?;

        debug!("Loaded settings from {:?} ({:?})", path, format);
        Ok(settings)
    }

    /// Parse settings text in the given format
    pub fn from_str_as(content: &str, format: SettingsFormat) -> Result<Self> {
        let settings: Settings = match format {
            SettingsFormat::Ron => ron::from_str(content)?,
            SettingsFormat::Json => serde_json::from_str(content)?,
            SettingsFormat::Toml => toml::from_str(content)?,
        };
        Ok(settings)
    }

    /// Serialize settings in the given format
    pub fn to_string_as(&self, format: SettingsFormat) -> Result<String> {
        let text = match format {
            SettingsFormat::Ron => {
                ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())?
            }
            SettingsFormat::Json => serde_json::to_string_pretty(self)?,
            SettingsFormat::Toml => toml::to_string_pretty(self)?,
        };
        Ok(text)
    }

    /// Save settings to `path`
    pub fn save(&self, path: &Path) -> Result<()> {
        let format = SettingsFormat::from_path(path)?;
        let text = self.to_string_as(format)?;
        std::fs::write(path, text)?;

        debug!("Saved settings to {:?} ({:?})", path, format);
        Ok(())
    }
}
