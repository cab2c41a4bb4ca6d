//! Paper brush: pigment catching on a fixed paper grain

use std::collections::HashMap;

use rand::Rng;

use super::deposit::{AlphaRule, Deposit, deposit};
use super::{BrushConfig, for_each_covered, unit};
use crate::constants::{
    MEDIA_OPACITY_FACTOR, PAPER_COLOR_VARIATION, PAPER_GRAIN_BASE, PAPER_GRAIN_RANGE,
};
use crate::surface::PixelBuffer;
use crate::types::{Dab, Region};

/// Soft disc modulated by a per-pixel grain value
///
/// The grain is sampled once per integer coordinate and memoized, so the
/// same paper texture shows through on every pass. The cache is never
/// evicted; it is bounded by the canvas area.
#[derive(Debug, Clone, Default)]
pub struct PaperBrush {
    grain: HashMap<(u32, u32), f32>,
}

impl PaperBrush {
    pub fn new() -> Self {
        Self::default()
    }

    /// Grain at a pixel, sampling and caching it on first use
    pub fn grain_at<R: Rng>(&mut self, x: u32, y: u32, rng: &mut R) -> f32 {
        *self.grain.entry((x, y)).or_insert_with(|| unit(rng))
    }

    /// Cached grain at a pixel, if it has been sampled
    pub fn cached_grain(&self, x: u32, y: u32) -> Option<f32> {
        self.grain.get(&(x, y)).copied()
    }

    /// Number of memoized grain samples
    pub fn grain_cache_len(&self) -> usize {
        self.grain.len()
    }

    /// Local alpha: `pressure * 0.8 * (1 - d²) * (0.7 + grain * 0.3)`; the
    /// deposited color is scaled by a per-pixel factor in `1 ± 0.05`.
    ///
    /// Only the incoming paint is tinted, so an already opaque pixel keeps
    /// its color.
    pub fn stamp<R: Rng>(
        &mut self,
        dab: Dab,
        buffer: &mut PixelBuffer,
        brush: &BrushConfig,
        rng: &mut R,
    ) -> Option<Region> {
        let radius = brush.radius(dab.pressure);
        let radius_sq = radius * radius;
        let base_alpha = dab.pressure * MEDIA_OPACITY_FACTOR;
        let color = brush.color.to_f32();
        let (width, height) = (buffer.width(), buffer.height());

        for_each_covered(dab.x, dab.y, radius, width, height, |px, py, dist_sq| {
            let falloff = 1.0 - dist_sq / radius_sq;
            let grain = self.grain_at(px, py, rng);
            let alpha = base_alpha * falloff * (PAPER_GRAIN_BASE + grain * PAPER_GRAIN_RANGE);
            let tint = 1.0 + (unit(rng) * 2.0 - 1.0) * PAPER_COLOR_VARIATION;
            let paint = Deposit::new(color.map(|c| c * tint), alpha, AlphaRule::Additive);
            deposit(buffer, px, py, paint, brush.is_eraser);
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brush::BrushKind;
    use crate::types::Rgb;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn paper() -> BrushConfig {
        BrushConfig {
            kind: BrushKind::Paper,
            size: 6.0,
            color: Rgb::new(100, 150, 200),
            ..Default::default()
        }
    }

    #[test]
    fn test_paper_grain_is_memoized() {
        let mut brush = PaperBrush::new();
        let mut rng = StdRng::seed_from_u64(42);
        let mut buffer = PixelBuffer::new(32, 32);

        brush.stamp(Dab::new(16.0, 16.0, 1.0), &mut buffer, &paper(), &mut rng);
        let cached = brush.grain_cache_len();
        let center = brush.cached_grain(16, 16).unwrap();
        assert!(cached > 0);

        brush.stamp(Dab::new(16.0, 16.0, 1.0), &mut buffer, &paper(), &mut rng);
        assert_eq!(brush.grain_cache_len(), cached);
        assert_eq!(brush.cached_grain(16, 16), Some(center));
        assert!((0.0..1.0).contains(&center));
    }

    #[test]
    fn test_paper_center_alpha_bounds() {
        let mut brush = PaperBrush::new();
        let mut rng = StdRng::seed_from_u64(8);
        let mut buffer = PixelBuffer::new(32, 32);

        brush.stamp(Dab::new(16.0, 16.0, 1.0), &mut buffer, &paper(), &mut rng);

        // 0.8 * (0.7..1.0)
        let alpha = buffer.get(16, 16).unwrap()[3] as f32 / 255.0;
        assert!(alpha >= 0.56 - 1.0 / 255.0 && alpha <= 0.8 + 1.0 / 255.0, "alpha {alpha}");
    }

    #[test]
    fn test_paper_color_variation_is_small() {
        let mut brush = PaperBrush::new();
        let mut rng = StdRng::seed_from_u64(9);
        let mut buffer = PixelBuffer::new(32, 32);

        brush.stamp(Dab::new(16.0, 16.0, 1.0), &mut buffer, &paper(), &mut rng);

        // On a transparent pixel the mixed color is the tinted source * blend
        let pixel = buffer.get(16, 16).unwrap();
        let blend = pixel[3] as f32 / 255.0;
        let expected_green = 150.0 * blend;
        assert!((pixel[1] as f32 - expected_green).abs() <= expected_green * 0.05 + 2.0);
    }

    #[test]
    fn test_paper_leaves_opaque_paint_unchanged() {
        let mut brush = PaperBrush::new();
        let mut rng = StdRng::seed_from_u64(40);
        let mut buffer = PixelBuffer::new(32, 32);
        buffer.clear([200, 200, 200, 255]);
        let before = buffer.clone();
        let config = BrushConfig {
            color: Rgb::new(200, 200, 200),
            ..paper()
        };

        for _ in 0..40 {
            brush.stamp(Dab::new(16.0, 16.0, 1.0), &mut buffer, &config, &mut rng);
        }
        assert_eq!(buffer, before);
    }

    #[test]
    fn test_paper_additive_buildup() {
        let mut brush = PaperBrush::new();
        let mut rng = StdRng::seed_from_u64(4);
        let mut buffer = PixelBuffer::new(32, 32);
        let dab = Dab::new(16.0, 16.0, 0.5);

        brush.stamp(dab, &mut buffer, &paper(), &mut rng);
        let first = buffer.get(16, 16).unwrap()[3];
        brush.stamp(dab, &mut buffer, &paper(), &mut rng);
        let second = buffer.get(16, 16).unwrap()[3];

        // Same cached grain means the same local alpha on both passes
        assert!((second as i32 - 2 * first as i32).abs() <= 1);
    }
}
