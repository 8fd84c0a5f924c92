//! Board configuration.
//!
//! Every field has a default, so the host page may pass a partial JSON
//! object (or nothing at all) to override individual settings.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("Config parse error: {0}")]
    Parse(String),
    #[error("Invalid config value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Connection options handed to the bus client when connecting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrokerConfig {
    pub host: String,
    pub port: u16,
    pub path: String,
    pub use_ssl: bool,
    pub keep_alive_secs: u32,
}

impl Default for BrokerConfig {
    fn default() -> Self {
        Self {
            host: "broker.hivemq.com".to_string(),
            port: 8884,
            path: "/mqtt".to_string(),
            use_ssl: true,
            keep_alive_secs: 30,
        }
    }
}

/// Settings for one board instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Topic shared by every participant of the board.
    pub topic: String,
    /// Fixed canvas height in CSS pixels; width follows the container.
    pub canvas_height: f64,
    /// Stroke line width in pixels.
    pub stroke_width: f64,
    /// Background color used by the fade overlay.
    pub background: String,
    /// Alpha of the per-frame fade overlay. 0 keeps strokes forever.
    pub fade_alpha: f64,
    /// Participants silent for longer than this are evicted.
    pub eviction_window_ms: u64,
    /// Radius of remote cursor markers in pixels.
    pub marker_radius: f64,
    /// Number of id characters shown in a name tag.
    pub label_chars: usize,
    pub label_font: String,
    pub broker: BrokerConfig,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            topic: "scrawl/board".to_string(),
            canvas_height: 500.0,
            stroke_width: 2.0,
            background: "#ffffff".to_string(),
            fade_alpha: 0.05,
            eviction_window_ms: 10_000,
            marker_radius: 5.0,
            label_chars: 4,
            label_font: "12px sans-serif".to_string(),
            broker: BrokerConfig::default(),
        }
    }
}

impl BoardConfig {
    /// Parse a (possibly partial) JSON object and validate it.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: BoardConfig =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.topic.trim().is_empty() {
            return Err(invalid("topic", "must not be empty"));
        }
        if !(self.canvas_height.is_finite() && self.canvas_height > 0.0) {
            return Err(invalid("canvas_height", format!("{} is not a positive size", self.canvas_height)));
        }
        if !(self.stroke_width.is_finite() && self.stroke_width > 0.0) {
            return Err(invalid("stroke_width", format!("{} is not a positive width", self.stroke_width)));
        }
        if !(0.0..=1.0).contains(&self.fade_alpha) {
            return Err(invalid("fade_alpha", format!("{} is outside [0, 1]", self.fade_alpha)));
        }
        if self.eviction_window_ms == 0 {
            return Err(invalid("eviction_window_ms", "must be at least 1ms"));
        }
        if !(self.marker_radius.is_finite() && self.marker_radius >= 0.0) {
            return Err(invalid("marker_radius", format!("{} is negative", self.marker_radius)));
        }
        Ok(())
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.into(),
    }
}
