//! Configuration file support for touchtrack.
//!
//! Settings are read from `~/.config/touchtrack/config.toml`. They cover tap
//! classification thresholds, how the tracker registers with host surfaces, and
//! the default viewport used by the replay tool.
//!
//! If no config file exists, defaults are used.

pub mod types;

pub use types::{TrackerConfig, ViewportConfig};

use anyhow::{Context, Result};
use log::{debug, info, warn};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const MAX_TAP_DISTANCE: f64 = 10_000.0;
const MAX_TAP_DELAY_MS: u64 = 60_000;

/// Root configuration deserialized from the TOML file.
///
/// # Example TOML
/// ```toml
/// [tracker]
/// tap_distance_threshold = 10.0
/// tap_delay_ms = 300
/// prevent_default = false
/// filtered = true
/// passive = true
///
/// [viewport]
/// width = 1280.0
/// height = 720.0
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default, JsonSchema)]
pub struct Config {
    /// Pointer tracking behavior
    #[serde(default)]
    pub tracker: TrackerConfig,

    /// Default window size
    #[serde(default)]
    pub viewport: ViewportConfig,
}

impl Config {
    /// Validates and clamps all values to acceptable ranges, logging a warning
    /// for each adjusted value.
    ///
    /// Validated ranges:
    /// - `tap_distance_threshold`: 0.0 - 10000.0 (non-finite resets to 10.0)
    /// - `tap_delay_ms`: 0 - 60000
    /// - `viewport.width` / `viewport.height`: at least 1.0
    pub fn validate_and_clamp(&mut self) {
        let threshold = self.tracker.tap_distance_threshold;
        if !threshold.is_finite() {
            warn!("Invalid tap_distance_threshold {threshold}, falling back to 10.0");
            self.tracker.tap_distance_threshold = TrackerConfig::default().tap_distance_threshold;
        } else if !(0.0..=MAX_TAP_DISTANCE).contains(&threshold) {
            warn!(
                "Invalid tap_distance_threshold {:.1}, clamping to 0.0-{:.1} range",
                threshold, MAX_TAP_DISTANCE
            );
            self.tracker.tap_distance_threshold = threshold.clamp(0.0, MAX_TAP_DISTANCE);
        }

        if self.tracker.tap_delay_ms > MAX_TAP_DELAY_MS {
            warn!(
                "Invalid tap_delay_ms {}, clamping to 0-{} range",
                self.tracker.tap_delay_ms, MAX_TAP_DELAY_MS
            );
            self.tracker.tap_delay_ms = MAX_TAP_DELAY_MS;
        }

        for (name, value) in [
            ("width", &mut self.viewport.width),
            ("height", &mut self.viewport.height),
        ] {
            if !value.is_finite() || *value < 1.0 {
                warn!("Invalid viewport {name} {value}, clamping to 1.0");
                *value = 1.0;
            }
        }
    }

    /// Returns the path to the configuration file.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined (e.g., HOME not set).
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("touchtrack");

        Ok(config_dir.join("config.toml"))
    }

    /// Loads configuration from the default path, or returns defaults if not found.
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;
        Self::load_from(&config_path)
    }

    /// Loads configuration from `path`, or returns defaults if the file does not exist.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or is not valid TOML.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            info!("Config file not found, using defaults");
            debug!("Expected config at: {}", path.display());
            return Ok(Self::default());
        }

        let config_str = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        let mut config: Config = toml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;

        config.validate_and_clamp();

        info!("Loaded config from {}", path.display());
        debug!("Config: {:?}", config);

        Ok(config)
    }

    /// Serializes the config to TOML and writes it to `path`, creating parent
    /// directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let config_str = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(path, config_str)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;

        info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Writes a default config file to `path`. Refuses to overwrite an existing file.
    pub fn create_default_file(path: &Path) -> Result<()> {
        if path.exists() {
            return Err(anyhow::anyhow!(
                "Config file already exists at {}",
                path.display()
            ));
        }
        Self::default().save_to(path)
    }

    /// JSON schema describing the config file.
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Config)
    }
}
