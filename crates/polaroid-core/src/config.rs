use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_ACCEPTED_TYPES, DEFAULT_CONTAINER_HEIGHT, DEFAULT_CONTAINER_WIDTH,
    DEFAULT_ELEMENT_HEIGHT, DEFAULT_ELEMENT_WIDTH, DEFAULT_MAX_FILES, DEFAULT_MAX_FILE_SIZE,
    DEFAULT_MAX_INCREMENT, DEFAULT_SETTLE_MS, DEFAULT_SUCCESS_RATE, DEFAULT_TICK_MS,
    LAYOUT_PADDING,
};
use crate::error::{PolaroidError, Result};
use crate::layout::LayoutBounds;

/// Top-level configuration, usually read from TOML.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GalleryConfig {
    #[serde(default)]
    pub upload: UploadConfig,
    #[serde(default)]
    pub layout: LayoutConfig,
    #[serde(default)]
    pub simulation: SimulationConfig,
}

impl GalleryConfig {
    pub fn validate(&self) -> Result<()> {
        self.upload.validate()?;
        self.layout.bounds().validate()?;
        self.simulation.validate()
    }
}

/// Limits applied when files are added to an upload session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadConfig {
    /// Maximum number of files tracked by one session.
    pub max_files: usize,
    /// Maximum size of a single file, in bytes.
    pub max_file_size: u64,
    /// MIME types allowed through validation.
    pub accepted_types: Vec<String>,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_files: DEFAULT_MAX_FILES,
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            accepted_types: DEFAULT_ACCEPTED_TYPES.iter().map(|t| t.to_string()).collect(),
        }
    }
}

impl UploadConfig {
    pub fn validate(&self) -> Result<()> {
        if self.max_files == 0 {
            return Err(PolaroidError::InvalidConfig(
                "upload.max_files must be at least 1".into(),
            ));
        }
        if self.accepted_types.is_empty() {
            return Err(PolaroidError::InvalidConfig(
                "upload.accepted_types must not be empty".into(),
            ));
        }
        Ok(())
    }

    pub fn accepts(&self, mime_type: &str) -> bool {
        self.accepted_types.iter().any(|t| t == mime_type)
    }
}

/// Collage container and polaroid footprint.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub container_width: f64,
    pub container_height: f64,
    pub element_width: f64,
    pub element_height: f64,
    pub padding: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            container_width: DEFAULT_CONTAINER_WIDTH,
            container_height: DEFAULT_CONTAINER_HEIGHT,
            element_width: DEFAULT_ELEMENT_WIDTH,
            element_height: DEFAULT_ELEMENT_HEIGHT,
            padding: LAYOUT_PADDING,
        }
    }
}

impl LayoutConfig {
    pub fn bounds(&self) -> LayoutBounds {
        LayoutBounds {
            container_width: self.container_width,
            container_height: self.container_height,
            element_width: self.element_width,
            element_height: self.element_height,
            padding: self.padding,
        }
    }
}

/// Timing and outcome of the simulated transfer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Interval between progress ticks, in milliseconds.
    pub tick_ms: u64,
    /// Pause before a file resolves, in milliseconds.
    pub settle_ms: u64,
    /// Largest progress increment per tick, in percentage points.
    pub max_increment: f64,
    /// Probability (0.0..=1.0) that a file succeeds.
    pub success_rate: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            tick_ms: DEFAULT_TICK_MS,
            settle_ms: DEFAULT_SETTLE_MS,
            max_increment: DEFAULT_MAX_INCREMENT,
            success_rate: DEFAULT_SUCCESS_RATE,
        }
    }
}

impl SimulationConfig {
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.success_rate) {
            return Err(PolaroidError::InvalidConfig(format!(
                "simulation.success_rate must be within 0..=1, got {}",
                self.success_rate
            )));
        }
        if !self.max_increment.is_finite() || self.max_increment <= 0.0 {
            return Err(PolaroidError::InvalidConfig(format!(
                "simulation.max_increment must be positive, got {}",
                self.max_increment
            )));
        }
        Ok(())
    }

    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    pub fn settle(&self) -> Duration {
        Duration::from_millis(self.settle_ms)
    }
}

impl fmt::Display for SimulationConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "tick {} ms, settle {} ms, +<{} pts, {:.0}% success",
            self.tick_ms,
            self.settle_ms,
            self.max_increment,
            self.success_rate * 100.0
        )
    }
}
