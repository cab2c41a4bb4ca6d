//! Basic brush: an opaque marker

use super::deposit::{AlphaRule, Deposit, deposit};
use super::{BrushConfig, for_each_covered};
use crate::surface::PixelBuffer;
use crate::types::{Dab, Region};

/// Solid disc whose alpha equals the pressure
///
/// Uses the max alpha rule, so passing over the same spot again with equal
/// or lighter pressure leaves the ink as it was.
#[derive(Debug, Clone, Default)]
pub struct BasicBrush;

impl BasicBrush {
    pub fn stamp(&self, dab: Dab, buffer: &mut PixelBuffer, brush: &BrushConfig) -> Option<Region> {
        let radius = brush.radius(dab.pressure);
        let paint = Deposit::new(brush.color.to_f32(), dab.pressure, AlphaRule::Max);
        let (width, height) = (buffer.width(), buffer.height());

        for_each_covered(dab.x, dab.y, radius, width, height, |px, py, _| {
            deposit(buffer, px, py, paint, brush.is_eraser);
        })
    }
}
