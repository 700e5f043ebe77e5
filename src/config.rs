//! World configuration
//!
//! The handful of constants the simulation must not hard-code: world
//! dimensions, the ground reference, and the frame duration driving the
//! session clock. Loadable from JSON so embedders can reshape the world.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// World dimensions and frame timing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// World width in units; player and enemy x are clamped to it
    pub width: f32,
    /// World height in units
    pub height: f32,
    /// The ground line sits this far above the bottom edge
    pub ground_offset: f32,
    /// Milliseconds of session-clock time per simulation frame
    pub frame_ms: f64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 400.0,
            ground_offset: 60.0,
            frame_ms: 1000.0 / 60.0,
        }
    }
}

impl WorldConfig {
    /// Y coordinate entities rest on when standing on the ground line
    pub fn ground_anchor(&self) -> f32 {
        self.height - self.ground_offset
    }

    /// Load a config from a JSON file; missing fields fall back to defaults
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, Box<dyn std::error::Error>> {
        let json = std::fs::read_to_string(path)?;
        let config = serde_json::from_str(&json)?;
        Ok(config)
    }
}
