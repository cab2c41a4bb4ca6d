//! Pencil brush: grainy, soft-edged, builds up with repeated passes

use gouache_config::PaintConfig;
use rand::Rng;

use super::deposit::{AlphaRule, Deposit, deposit};
use super::{BrushConfig, for_each_covered, unit};
use crate::surface::PixelBuffer;
use crate::types::{Dab, Region};

#[derive(Debug, Clone, Default)]
pub struct PencilBrush;

impl PencilBrush {
    /// Local alpha: `pressure * opacity_factor * (1 - d²) * noise` where `d`
    /// is the distance normalized to the radius and `noise` is drawn fresh
    /// per pixel from `[noise_base, noise_base + noise_range]`.
    pub fn stamp<R: Rng>(
        &self,
        dab: Dab,
        buffer: &mut PixelBuffer,
        brush: &BrushConfig,
        settings: &PaintConfig,
        rng: &mut R,
    ) -> Option<Region> {
        let radius = brush.radius(dab.pressure);
        let radius_sq = radius * radius;
        let base_alpha = dab.pressure * settings.pencil_opacity_factor;
        let color = brush.color.to_f32();
        let (width, height) = (buffer.width(), buffer.height());

        for_each_covered(dab.x, dab.y, radius, width, height, |px, py, dist_sq| {
            let falloff = 1.0 - dist_sq / radius_sq;
            let grain = settings.pencil_noise_base + unit(rng) * settings.pencil_noise_range;
            let paint = Deposit::new(color, base_alpha * falloff * grain, AlphaRule::Additive);
            deposit(buffer, px, py, paint, brush.is_eraser);
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brush::BrushKind;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn pencil() -> BrushConfig {
        BrushConfig {
            kind: BrushKind::Pencil,
            size: 10.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_pencil_center_alpha_within_noise_bounds() {
        let settings = PaintConfig::default();
        let mut rng = StdRng::seed_from_u64(7);
        let mut buffer = PixelBuffer::new(32, 32);

        PencilBrush.stamp(Dab::new(16.0, 16.0, 1.0), &mut buffer, &pencil(), &settings, &mut rng);

        // Center: falloff 1, alpha = 0.8 * noise with noise in [0.9, 1.1]
        let alpha = buffer.get(16, 16).unwrap()[3] as f32 / 255.0;
        assert!(alpha >= 0.8 * 0.9 - 1.0 / 255.0, "alpha {alpha}");
        assert!(alpha <= 0.8 * 1.1 + 1.0 / 255.0, "alpha {alpha}");
    }

    #[test]
    fn test_pencil_soft_edge() {
        let settings = PaintConfig::default();
        let mut rng = StdRng::seed_from_u64(1);
        let mut buffer = PixelBuffer::new(32, 32);

        PencilBrush.stamp(Dab::new(16.0, 16.0, 1.0), &mut buffer, &pencil(), &settings, &mut rng);

        let center = buffer.get(16, 16).unwrap()[3];
        let near_edge = buffer.get(25, 16).unwrap()[3];
        assert!(near_edge < center);
        // Exactly on the radius the falloff is zero
        assert_eq!(buffer.get(26, 16).unwrap()[3], 0);
    }

    #[test]
    fn test_pencil_builds_up() {
        let settings = PaintConfig::default();
        let mut rng = StdRng::seed_from_u64(3);
        let mut buffer = PixelBuffer::new(32, 32);
        let brush = pencil();

        PencilBrush.stamp(Dab::new(16.0, 16.0, 0.5), &mut buffer, &brush, &settings, &mut rng);
        let a1 = buffer.get(16, 16).unwrap()[3] as f32 / 255.0;
        let mut probe = PixelBuffer::new(32, 32);
        let mut probe_rng = rng.clone();
        PencilBrush.stamp(Dab::new(16.0, 16.0, 0.5), &mut probe, &brush, &settings, &mut probe_rng);
        let a2 = probe.get(16, 16).unwrap()[3] as f32 / 255.0;

        PencilBrush.stamp(Dab::new(16.0, 16.0, 0.5), &mut buffer, &brush, &settings, &mut rng);
        let combined = buffer.get(16, 16).unwrap()[3] as f32 / 255.0;

        assert!((combined - (a1 + a2).min(1.0)).abs() <= 2.0 / 255.0);
    }

    #[test]
    fn test_pencil_is_reproducible_with_seed() {
        let settings = PaintConfig::default();
        let mut a = PixelBuffer::new(32, 32);
        let mut b = PixelBuffer::new(32, 32);

        let dab = Dab::new(10.0, 12.0, 0.7);
        PencilBrush.stamp(dab, &mut a, &pencil(), &settings, &mut StdRng::seed_from_u64(99));
        PencilBrush.stamp(dab, &mut b, &pencil(), &settings, &mut StdRng::seed_from_u64(99));

        assert_eq!(a, b);
    }
}
