//! Texture brush: stamps a tiling source image tinted by the brush color

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info};

use super::deposit::{AlphaRule, Deposit, deposit};
use super::{BrushConfig, for_each_covered};
use crate::constants::{MEDIA_OPACITY_FACTOR, TEXTURE_SCALE};
use crate::error::PaintError;
use crate::surface::PixelBuffer;
use crate::types::{Dab, Region, Rgba};

/// A decoded RGBA image sampled with wrap-around addressing
#[derive(Debug, Clone, PartialEq)]
pub struct TextureSource {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl TextureSource {
    /// Wrap raw RGBA bytes
    pub fn from_rgba(width: u32, height: u32, data: Vec<u8>) -> Result<Self, PaintError> {
        if width == 0 || height == 0 {
            return Err(PaintError::EmptyTexture { width, height });
        }
        let expected = width as usize * height as usize * 4;
        if data.len() != expected {
            return Err(PaintError::TextureSize {
                width,
                height,
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn from_image(image: image::RgbaImage) -> Result<Self, PaintError> {
        let (width, height) = image.dimensions();
        Self::from_rgba(width, height, image.into_raw())
    }

    /// Decode an image file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, PaintError> {
        let image = image::open(path.as_ref())?.to_rgba8();
        info!(
            "Loaded brush texture {} ({}x{})",
            path.as_ref().display(),
            image.width(),
            image.height()
        );
        Self::from_image(image)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Sample at texture-space coordinates, where one unit spans the image
    ///
    /// Coordinates wrap in both directions, negative ones included.
    pub fn sample(&self, u: f32, v: f32) -> Rgba {
        let tx = wrap((u * self.width as f32).floor(), self.width);
        let ty = wrap((v * self.height as f32).floor(), self.height);
        let i = (ty as usize * self.width as usize + tx as usize) * 4;
        [
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ]
    }
}

#[inline]
fn wrap(coord: f32, extent: u32) -> u32 {
    let coord = if coord.is_finite() { coord as i64 } else { 0 };
    coord.rem_euclid(extent as i64) as u32
}

/// Stamps a tiling texture; unavailable until a texture is provided
#[derive(Debug, Clone, Default)]
pub struct TextureBrush {
    texture: Option<Arc<TextureSource>>,
}

impl TextureBrush {
    pub fn new(texture: Option<Arc<TextureSource>>) -> Self {
        Self { texture }
    }

    pub fn set_texture(&mut self, texture: Arc<TextureSource>) {
        self.texture = Some(texture);
    }

    /// True once a texture has been provided
    pub fn is_ready(&self) -> bool {
        self.texture.is_some()
    }

    /// Local alpha: `pressure * 0.8 * (1 - d²) * texel_alpha`; color is the
    /// texel color multiplied by the brush color.
    ///
    /// Without a texture the dab is skipped.
    pub fn stamp(&self, dab: Dab, buffer: &mut PixelBuffer, brush: &BrushConfig) -> Option<Region> {
        let Some(texture) = self.texture.as_deref() else {
            debug!("TextureBrush::stamp: no texture loaded, dab skipped");
            return None;
        };

        let radius = brush.radius(dab.pressure);
        let radius_sq = radius * radius;
        let base_alpha = dab.pressure * MEDIA_OPACITY_FACTOR;
        let tint = brush.color.to_f32();
        let (width, height) = (buffer.width(), buffer.height());

        for_each_covered(dab.x, dab.y, radius, width, height, |px, py, dist_sq| {
            let falloff = 1.0 - dist_sq / radius_sq;
            let texel = texture.sample(px as f32 * TEXTURE_SCALE, py as f32 * TEXTURE_SCALE);
            let alpha = base_alpha * falloff * (texel[3] as f32 / 255.0);
            let color = [
                texel[0] as f32 * tint[0] / 255.0,
                texel[1] as f32 * tint[1] / 255.0,
                texel[2] as f32 * tint[2] / 255.0,
            ];
            deposit(
                buffer,
                px,
                py,
                Deposit::new(color, alpha, AlphaRule::Additive),
                brush.is_eraser,
            );
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brush::BrushKind;
    use crate::types::Rgb;

    /// 2x1 texture: left texel opaque white, right texel transparent
    fn half_texture() -> Arc<TextureSource> {
        Arc::new(
            TextureSource::from_rgba(2, 1, vec![255, 255, 255, 255, 255, 255, 255, 0]).unwrap(),
        )
    }

    fn texture_brush(color: Rgb) -> BrushConfig {
        BrushConfig {
            kind: BrushKind::Texture,
            size: 4.0,
            color,
            ..Default::default()
        }
    }

    #[test]
    fn test_texture_rejects_bad_data() {
        assert!(matches!(
            TextureSource::from_rgba(0, 4, vec![]),
            Err(PaintError::EmptyTexture { .. })
        ));
        assert!(matches!(
            TextureSource::from_rgba(2, 2, vec![0; 15]),
            Err(PaintError::TextureSize { expected: 16, .. })
        ));
    }

    #[test]
    fn test_texture_wraps_negative_coordinates() {
        let texture = half_texture();
        assert_eq!(texture.sample(0.0, 0.0)[3], 255);
        assert_eq!(texture.sample(0.5, 0.0)[3], 0);
        assert_eq!(texture.sample(1.0, 0.0)[3], 255);
        // -0.25 * 2 = -0.5 -> floor -1 -> wraps to texel 1
        assert_eq!(texture.sample(-0.25, 0.0)[3], 0);
        assert_eq!(texture.sample(-0.75, 3.5)[3], 255);
    }

    #[test]
    fn test_texture_brush_unavailable_is_noop() {
        let brush = TextureBrush::default();
        let mut buffer = PixelBuffer::new(16, 16);
        assert!(!brush.is_ready());
        let region = brush.stamp(Dab::new(8.0, 8.0, 1.0), &mut buffer, &texture_brush(Rgb::BLACK));
        assert!(region.is_none());
        assert!(buffer.is_blank());
    }

    #[test]
    fn test_texture_brush_multiplies_color() {
        let brush = TextureBrush::new(Some(half_texture()));
        let mut buffer = PixelBuffer::new(16, 16);

        // Pixels 0..50 map to u in [0, 0.5): the opaque white texel
        brush.stamp(Dab::new(8.0, 8.0, 1.0), &mut buffer, &texture_brush(Rgb::new(200, 100, 0)));

        let center = buffer.get(8, 8).unwrap();
        // alpha 0.8 at the center, color = white * brush color, blend 0.8
        assert_eq!(center[3], 204);
        assert_eq!(center[0], 160);
        assert_eq!(center[1], 80);
        assert_eq!(center[2], 0);
    }

    #[test]
    fn test_texture_transparent_texels_leave_no_paint() {
        let brush = TextureBrush::new(Some(half_texture()));
        let mut buffer = PixelBuffer::new(128, 16);

        // Pixels 50..100 map to u in [0.5, 1.0): the transparent texel
        brush.stamp(Dab::new(75.0, 8.0, 1.0), &mut buffer, &texture_brush(Rgb::new(255, 0, 0)));

        assert!(buffer.is_blank());
    }

    #[test]
    fn test_texture_alpha_builds_up_and_clamps() {
        let brush = TextureBrush::new(Some(half_texture()));
        let mut buffer = PixelBuffer::new(16, 16);
        let config = texture_brush(Rgb::new(0, 0, 255));

        // 0.5 * 0.8 at the center: 102 per pass
        brush.stamp(Dab::new(8.0, 8.0, 0.5), &mut buffer, &config);
        let a1 = buffer.get(8, 8).unwrap()[3] as i32;
        brush.stamp(Dab::new(8.0, 8.0, 0.5), &mut buffer, &config);
        let a2 = buffer.get(8, 8).unwrap()[3] as i32;
        assert_eq!(a1, 102);
        assert!((a2 - (2 * a1).min(255)).abs() <= 1, "a1 {a1}, a2 {a2}");

        brush.stamp(Dab::new(8.0, 8.0, 1.0), &mut buffer, &config);
        assert_eq!(buffer.get(8, 8).unwrap()[3], 255);
    }
}
