//! Shared configuration for Gouache
//!
//! This crate provides the single source of truth for the numeric constants
//! the painting engine consumes: pressure threshold, brush size bounds,
//! stroke spacing and pencil texture coefficients. Every value can be
//! overridden before a stroke begins; the engine reads the config on every
//! dab, so a change made mid-stroke applies to the next dab only.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Pressure below which a sample is considered "no contact"
pub const DEFAULT_PRESSURE_THRESHOLD: f32 = 0.1;

/// Pressure assumed when a device reports nothing useful
pub const DEFAULT_PRESSURE: f32 = 0.5;

/// Upper bound for reported pressure
pub const MAX_PRESSURE: f32 = 1.0;

/// Default brush size in pixels
pub const DEFAULT_BRUSH_SIZE: f32 = 10.0;

/// Smallest brush size the slider allows
pub const MIN_BRUSH_SIZE: f32 = 1.0;

/// Largest brush size in standard mode
pub const MAX_BRUSH_SIZE: f32 = 50.0;

/// Largest brush size in extended mode
pub const MAX_BRUSH_SIZE_EXTENDED: f32 = 100.0;

/// Dab spacing as a fraction of the pressure-scaled brush size
pub const SPACING_FACTOR: f32 = 0.5;

/// Width of the pencil grain noise interval
pub const PENCIL_NOISE_RANGE: f32 = 0.2;

/// Lower bound of the pencil grain noise interval
pub const PENCIL_NOISE_BASE: f32 = 0.9;

/// Pencil opacity relative to pressure
pub const PENCIL_OPACITY_FACTOR: f32 = 0.8;

/// Number of undo snapshots kept
pub const HISTORY_CAPACITY: usize = 20;

/// Default canvas width in pixels
pub const DEFAULT_CANVAS_WIDTH: u32 = 800;

/// Default canvas height in pixels
pub const DEFAULT_CANVAS_HEIGHT: u32 = 400;

/// Largest canvas edge in pixels
pub const MAX_CANVAS_DIMENSION: u32 = 16_384;

/// Default brush color
pub const DEFAULT_COLOR: &str = "#000000";

/// Environment variable overriding the pressure threshold
pub const ENV_PRESSURE_THRESHOLD: &str = "GOUACHE_PRESSURE_THRESHOLD";

/// Environment variable selecting the brush size mode (`standard` or `extended`)
pub const ENV_BRUSH_SIZE_MODE: &str = "GOUACHE_BRUSH_SIZE_MODE";

/// Errors raised while loading or validating configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Upper brush size bound selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BrushSizeMode {
    /// Sizes 1 to 50
    #[default]
    Standard,
    /// Sizes 1 to 100
    Extended,
}

impl BrushSizeMode {
    /// Parse from environment variable GOUACHE_BRUSH_SIZE_MODE
    pub fn from_env() -> Option<Self> {
        match std::env::var(ENV_BRUSH_SIZE_MODE).as_deref() {
            Ok("extended") => Some(Self::Extended),
            Ok("standard") => Some(Self::Standard),
            _ => None,
        }
    }

    /// Size ceiling for this mode
    pub fn max_size(self) -> f32 {
        match self {
            Self::Standard => MAX_BRUSH_SIZE,
            Self::Extended => MAX_BRUSH_SIZE_EXTENDED,
        }
    }
}

/// Painting configuration consumed by the brush engine and stroke sampler
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaintConfig {
    /// Dabs with pressure below this are no-ops
    pub pressure_threshold: f32,
    /// Pressure used when a device reports none
    pub default_pressure: f32,
    /// Reported pressure is clamped to this
    pub max_pressure: f32,
    /// Initial brush size
    pub default_brush_size: f32,
    /// Brush size floor
    pub min_brush_size: f32,
    /// Selects the brush size ceiling
    pub size_mode: BrushSizeMode,
    /// Spacing as a fraction of pressure * size
    pub spacing_factor: f32,
    pub pencil_noise_range: f32,
    pub pencil_noise_base: f32,
    pub pencil_opacity_factor: f32,
    /// Undo snapshots kept per session
    pub history_capacity: usize,
    pub canvas_width: u32,
    pub canvas_height: u32,
    /// Initial brush color as `#rrggbb`
    pub default_color: String,
}

impl Default for PaintConfig {
    fn default() -> Self {
        Self {
            pressure_threshold: DEFAULT_PRESSURE_THRESHOLD,
            default_pressure: DEFAULT_PRESSURE,
            max_pressure: MAX_PRESSURE,
            default_brush_size: DEFAULT_BRUSH_SIZE,
            min_brush_size: MIN_BRUSH_SIZE,
            size_mode: BrushSizeMode::Standard,
            spacing_factor: SPACING_FACTOR,
            pencil_noise_range: PENCIL_NOISE_RANGE,
            pencil_noise_base: PENCIL_NOISE_BASE,
            pencil_opacity_factor: PENCIL_OPACITY_FACTOR,
            history_capacity: HISTORY_CAPACITY,
            canvas_width: DEFAULT_CANVAS_WIDTH,
            canvas_height: DEFAULT_CANVAS_HEIGHT,
            default_color: DEFAULT_COLOR.to_string(),
        }
    }
}

impl PaintConfig {
    /// Parse a config from JSON; missing fields take their defaults
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path.as_ref())?;
        debug!("Loaded config from {}", path.as_ref().display());
        Self::from_json_str(&text)
    }

    /// Apply GOUACHE_* environment overrides
    ///
    /// Unparseable values are ignored and the current value is kept.
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(threshold) = std::env::var(ENV_PRESSURE_THRESHOLD)
            .ok()
            .and_then(|v| v.parse::<f32>().ok())
        {
            self.pressure_threshold = threshold;
        }
        if let Some(mode) = BrushSizeMode::from_env() {
            self.size_mode = mode;
        }
        self
    }

    /// Get the brush size ceiling for the current mode
    pub fn max_brush_size(&self) -> f32 {
        self.size_mode.max_size()
    }

    /// Clamp a requested brush size into the configured bounds
    pub fn clamp_brush_size(&self, size: f32) -> f32 {
        if size.is_nan() {
            return self.default_brush_size;
        }
        size.clamp(self.min_brush_size, self.max_brush_size())
    }

    /// Check that the values describe a usable configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.pressure_threshold > 0.0 && self.pressure_threshold <= 1.0) {
            return Err(ConfigError::Invalid {
                field: "pressure_threshold",
                reason: format!("{} is outside (0, 1]", self.pressure_threshold),
            });
        }
        if !(self.max_pressure >= self.pressure_threshold) {
            return Err(ConfigError::Invalid {
                field: "max_pressure",
                reason: format!(
                    "{} is below the pressure threshold {}",
                    self.max_pressure, self.pressure_threshold
                ),
            });
        }
        if !(self.min_brush_size >= 1.0 && self.min_brush_size <= self.max_brush_size()) {
            return Err(ConfigError::Invalid {
                field: "min_brush_size",
                reason: format!(
                    "{} must be within [1, {}]",
                    self.min_brush_size,
                    self.max_brush_size()
                ),
            });
        }
        if !(self.spacing_factor > 0.0) {
            return Err(ConfigError::Invalid {
                field: "spacing_factor",
                reason: format!("{} must be positive", self.spacing_factor),
            });
        }
        if self.history_capacity == 0 {
            return Err(ConfigError::Invalid {
                field: "history_capacity",
                reason: "must keep at least one snapshot".to_string(),
            });
        }
        check_canvas_size(self.canvas_width, self.canvas_height)
    }
}

/// Check that both canvas edges are within `1..=MAX_CANVAS_DIMENSION`
pub fn check_canvas_size(width: u32, height: u32) -> Result<(), ConfigError> {
    let edge = 1..=MAX_CANVAS_DIMENSION;
    if !edge.contains(&width) || !edge.contains(&height) {
        return Err(ConfigError::Invalid {
            field: "canvas_width/canvas_height",
            reason: format!(
                "{}x{} is outside 1x1..{}x{}",
                width, height, MAX_CANVAS_DIMENSION, MAX_CANVAS_DIMENSION
            ),
        });
    }
    Ok(())
}
