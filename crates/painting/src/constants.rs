//! Engine-fixed brush coefficients
//!
//! Unlike the values in [`gouache_config::PaintConfig`], these are part of
//! each brush's character and are not externally settable.

/// Spray dots per dab at full pressure.
pub const SPRAY_DOTS_PER_PRESSURE: f32 = 20.0;

/// Spray dot opacity relative to pressure.
pub const SPRAY_ALPHA_FACTOR: f32 = 0.3;

/// Lower bound of the per-dot spray alpha jitter.
pub const SPRAY_JITTER_BASE: f32 = 0.8;

/// Width of the per-dot spray alpha jitter.
pub const SPRAY_JITTER_RANGE: f32 = 0.4;

/// Paper and texture brush opacity relative to pressure.
pub const MEDIA_OPACITY_FACTOR: f32 = 0.8;

/// Paper grain: fixed share of the opacity.
pub const PAPER_GRAIN_BASE: f32 = 0.7;

/// Paper grain: share of the opacity driven by cached noise.
pub const PAPER_GRAIN_RANGE: f32 = 0.3;

/// Paper per-pixel color variation (multiplicative, +/-).
pub const PAPER_COLOR_VARIATION: f32 = 0.05;

/// Texture lookup scale: canvas pixels to texture repeats.
pub const TEXTURE_SCALE: f32 = 0.01;
