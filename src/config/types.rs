//! Configuration type definitions.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Pointer tracking behavior.
///
/// Controls tap classification thresholds and how the tracker registers with
/// the host surfaces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TrackerConfig {
    /// Maximum distance in pixels between press and release for a tap
    /// (valid range: 0.0 - 10000.0)
    #[serde(default = "default_tap_distance_threshold")]
    pub tap_distance_threshold: f64,

    /// Maximum time in milliseconds between press and release for a tap
    /// (valid range: 0 - 60000)
    #[serde(default = "default_tap_delay_ms")]
    pub tap_delay_ms: u64,

    /// Suppress the host's native drag-start and touch scrolling while attached
    #[serde(default)]
    pub prevent_default: bool,

    /// Follow a single finger during multi-touch instead of the first listed touch
    #[serde(default = "default_filtered")]
    pub filtered: bool,

    /// Register listeners in passive (non-blocking) mode
    #[serde(default = "default_passive")]
    pub passive: bool,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            tap_distance_threshold: default_tap_distance_threshold(),
            tap_delay_ms: default_tap_delay_ms(),
            prevent_default: false,
            filtered: default_filtered(),
            passive: default_passive(),
        }
    }
}

/// Window size used when no host reports one (replay tooling).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ViewportConfig {
    /// Viewport width in pixels (minimum 1)
    #[serde(default = "default_viewport_width")]
    pub width: f64,

    /// Viewport height in pixels (minimum 1)
    #[serde(default = "default_viewport_height")]
    pub height: f64,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            width: default_viewport_width(),
            height: default_viewport_height(),
        }
    }
}

fn default_tap_distance_threshold() -> f64 {
    10.0
}

fn default_tap_delay_ms() -> u64 {
    300
}

fn default_filtered() -> bool {
    true
}

fn default_passive() -> bool {
    true
}

fn default_viewport_width() -> f64 {
    1280.0
}

fn default_viewport_height() -> f64 {
    720.0
}
