//! Configuration file support for easel.
//!
//! This module handles loading and validating settings from the configuration file
//! located at `~/.config/easel/config.toml`. Settings include the backend name,
//! redraw and throttle timing, what happens when the surface closes, headless
//! output and image fetching.
//!
//! If no config file exists, sensible defaults are used automatically.

pub mod enums;
pub mod types;

// Re-export commonly used types at module level
pub use enums::ClosePolicy;
pub use types::{CanvasConfig, ImagesConfig, LifecycleConfig, OutputConfig, TimingConfig};

use anyhow::{Context, Result};
use log::{debug, info};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration structure containing all settings.
///
/// All fields have sensible defaults and will use those if not specified in the config file.
///
/// # Example TOML
/// ```toml
/// [canvas]
/// backend = "headless"
/// aspect_width = 16
/// aspect_height = 9
///
/// [timing]
/// frames_per_second = 30
/// tick_interval_ms = 1
///
/// [lifecycle]
/// on_close = "exit"
///
/// [output]
/// frame_path = "/tmp/easel.png"
/// max_frames = 120
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, JsonSchema)]
pub struct Config {
    /// Drawing surface settings
    #[serde(default)]
    pub canvas: CanvasConfig,

    /// Redraw and throttle timing
    #[serde(default)]
    pub timing: TimingConfig,

    /// Surface close behaviour
    #[serde(default)]
    pub lifecycle: LifecycleConfig,

    /// Headless frame output
    #[serde(default)]
    pub output: OutputConfig,

    /// Web sprite fetching
    #[serde(default)]
    pub images: ImagesConfig,
}

impl Config {
    /// Validates and clamps all configuration values to acceptable ranges.
    ///
    /// Invalid values are clamped to the nearest valid value and a warning is logged.
    ///
    /// Validated ranges:
    /// - `frames_per_second`: 1 - 240
    /// - `tick_interval_ms`: 0 - 1000
    /// - `aspect_width` / `aspect_height`: at least 1
    /// - `timeout_secs`: 1 - 120
    pub fn validate_and_clamp(&mut self) {
        if !(1..=240).contains(&self.timing.frames_per_second) {
            log::warn!(
                "Invalid frames_per_second {}, clamping to 1-240 range",
                self.timing.frames_per_second
            );
            self.timing.frames_per_second = self.timing.frames_per_second.clamp(1, 240);
        }

        if self.timing.tick_interval_ms > 1000 {
            log::warn!(
                "Invalid tick_interval_ms {}, clamping to 0-1000 range",
                self.timing.tick_interval_ms
            );
            self.timing.tick_interval_ms = 1000;
        }

        if self.canvas.aspect_width == 0 || self.canvas.aspect_height == 0 {
            log::warn!(
                "Invalid aspect ratio {}:{}, falling back to 1:1",
                self.canvas.aspect_width,
                self.canvas.aspect_height
            );
            self.canvas.aspect_width = 1;
            self.canvas.aspect_height = 1;
        }

        if !(1..=120).contains(&self.images.timeout_secs) {
            log::warn!(
                "Invalid images timeout_secs {}, clamping to 1-120 range",
                self.images.timeout_secs
            );
            self.images.timeout_secs = self.images.timeout_secs.clamp(1, 120);
        }

        if self.output.max_frames == Some(0) {
            log::warn!("max_frames = 0 would close the surface immediately, ignoring it");
            self.output.max_frames = None;
        }
    }

    /// Interval between throttle ticks; `None` when the throttle is disabled.
    pub fn tick_interval(&self) -> Option<Duration> {
        (self.timing.tick_interval_ms > 0)
            .then(|| Duration::from_millis(self.timing.tick_interval_ms))
    }

    /// Returns the path to the configuration file.
    ///
    /// The config file is located at `~/.config/easel/config.toml`.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined (e.g., HOME not set).
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("easel");

        Ok(config_dir.join("config.toml"))
    }

    /// Loads configuration from file, or returns defaults if not found.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The config directory path cannot be determined
    /// - The file exists but cannot be read
    /// - The file exists but contains invalid TOML syntax
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;

        if !config_path.exists() {
            info!("Config file not found, using defaults");
            debug!("Expected config at: {}", config_path.display());
            return Ok(Self::default());
        }

        Self::load_from(&config_path)
    }

    /// Loads and validates configuration from an explicit path.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self> {
        let config_str = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        let mut config: Config = toml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;

        // Validate and clamp values to acceptable ranges
        config.validate_and_clamp();

        info!("Loaded config from {}", path.display());
        debug!("Config: {:?}", config);

        Ok(config)
    }

    /// JSON schema describing the configuration file.
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_match_documented_values() {
        let config = Config::default();
        assert_eq!(config.canvas.backend, "headless");
        assert_eq!(config.timing.frames_per_second, 60);
        assert_eq!(config.tick_interval(), Some(Duration::from_millis(1)));
        assert_eq!(config.lifecycle.on_close, ClosePolicy::Exit);
        assert!(config.output.frame_path.is_none());
    }

    #[test]
    fn load_from_parses_and_clamps() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[timing]\nframes_per_second = 1000\ntick_interval_ms = 0\n\n[lifecycle]\non_close = \"error\"\n\n[canvas]\naspect_width = 0"
        )
        .unwrap();

        let config = Config::load_from(file.path()).unwrap();
        assert_eq!(config.timing.frames_per_second, 240);
        assert_eq!(config.tick_interval(), None);
        assert_eq!(config.lifecycle.on_close, ClosePolicy::Error);
        assert_eq!(
            (config.canvas.aspect_width, config.canvas.aspect_height),
            (1, 1)
        );
    }

    #[test]
    fn invalid_toml_is_reported() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[timing\nframes_per_second = ").unwrap();
        let err = Config::load_from(file.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config"));
    }

    #[test]
    fn schema_names_every_section() {
        let schema = serde_json::to_value(Config::json_schema()).unwrap();
        let properties = schema["properties"].as_object().unwrap();
        for section in ["canvas", "timing", "lifecycle", "output", "images"] {
            assert!(properties.contains_key(section), "missing {section}");
        }
    }
}
