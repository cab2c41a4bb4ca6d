//! Error types for the painting crate
//!
//! Painting operations themselves never fail; these cover resource loading
//! and parsing at the crate boundary, plus rejected canvas sizes.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PaintError {
    #[error("Failed to load texture: {0}")]
    TextureLoad(#[from] image::ImageError),

    #[error("Texture is empty: {width}x{height}")]
    EmptyTexture { width: u32, height: u32 },

    #[error("Texture data length {actual} does not match {width}x{height} RGBA ({expected})")]
    TextureSize {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },

    #[error("Invalid hex color: {0:?}")]
    InvalidColor(String),

    #[error(transparent)]
    Config(#[from] gouache_config::ConfigError),
}
