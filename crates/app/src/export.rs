//! PNG export of the composited frame

use std::path::Path;

use anyhow::{Context, Result};
use image::RgbaImage;
use painting::Frame;
use tracing::info;

/// Write a frame to `path`; the format follows the file extension
pub fn write_frame(frame: Frame<'_>, path: &Path) -> Result<()> {
    let image = RgbaImage::from_raw(frame.width, frame.height, frame.bytes.to_vec())
        .context("Frame bytes do not match its dimensions")?;
    image
        .save(path)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    info!("Wrote {}x{} canvas to {}", frame.width, frame.height, path.display());
    Ok(())
}
