//! Readout overlay configuration

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use pv_core::LatLonFormatter;

/// Errors loading an overlay configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid overlay configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Settings for the cursor readout overlay
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OverlayConfig {
    /// Include per-layer readouts below the location header
    pub include_displays: bool,

    /// Include the altitude in the location header
    pub include_altitude: bool,

    /// Gap kept between the panel and the bottom of the screen
    pub margin: f32,

    /// Font size of the panel text
    pub font_size: f32,

    /// Decimal places for latitude and longitude
    pub decimals: usize,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            include_displays: true,
            include_altitude: true,
            margin: crate::placement::SCREEN_MARGIN,
            font_size: 12.0,
            decimals: 2,
        }
    }
}

impl OverlayConfig {
    /// Parse a JSON configuration; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a JSON configuration file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Location formatter matching these settings
    pub fn formatter(&self) -> LatLonFormatter {
        LatLonFormatter::with_decimals(self.decimals)
    }
}
