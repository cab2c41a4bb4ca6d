//! Spray brush: scattered translucent dots

use std::f32::consts::TAU;

use rand::Rng;

use super::deposit::{AlphaRule, Deposit, deposit};
use super::{BrushConfig, unit};
use crate::constants::{
    SPRAY_ALPHA_FACTOR, SPRAY_DOTS_PER_PRESSURE, SPRAY_JITTER_BASE, SPRAY_JITTER_RANGE,
};
use crate::surface::PixelBuffer;
use crate::types::{Dab, Region, union_regions};

/// Scatters `floor(20 * pressure)` single-pixel dots inside the disc
///
/// Dots are placed at a uniform random angle and a uniform random fraction
/// of the radius. That is not area-uniform: density is higher near the
/// center, which is the intended airbrush look.
#[derive(Debug, Clone, Default)]
pub struct SprayBrush;

impl SprayBrush {
    pub fn stamp<R: Rng>(
        &self,
        dab: Dab,
        buffer: &mut PixelBuffer,
        brush: &BrushConfig,
        rng: &mut R,
    ) -> Option<Region> {
        let radius = brush.radius(dab.pressure);
        let base_alpha = dab.pressure * SPRAY_ALPHA_FACTOR;
        let dot_count = (SPRAY_DOTS_PER_PRESSURE * dab.pressure).floor() as u32;
        let color = brush.color.to_f32();
        let (width, height) = (buffer.width() as f32, buffer.height() as f32);

        let mut touched = None;
        for _ in 0..dot_count {
            let angle = unit(rng) * TAU;
            let distance = unit(rng) * radius;
            let dot_x = (dab.x + angle.cos() * distance).floor();
            let dot_y = (dab.y + angle.sin() * distance).floor();

            if !(dot_x >= 0.0 && dot_y >= 0.0 && dot_x < width && dot_y < height) {
                continue;
            }

            let alpha = base_alpha * (SPRAY_JITTER_BASE + unit(rng) * SPRAY_JITTER_RANGE);
            let (px, py) = (dot_x as u32, dot_y as u32);
            deposit(
                buffer,
                px,
                py,
                Deposit::new(color, alpha, AlphaRule::Additive),
                brush.is_eraser,
            );
            touched = union_regions(touched, Some(Region::pixel(px, py)));
        }

        touched
    }
}
