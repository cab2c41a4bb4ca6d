//! Pixel-level paint deposit shared by all brush variants

use crate::surface::PixelBuffer;

/// How a dab's local alpha combines with the alpha already on the pixel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlphaRule {
    /// `max(existing, local)`: re-covering with the same ink never changes it
    Max,
    /// `min(1, existing + local)`: repeated passes build up
    Additive,
}

/// Paint laid down at one pixel
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Deposit {
    /// Source color, channels in 0..=255
    pub color: [f32; 3],
    /// Local alpha 0.0-1.0
    pub alpha: f32,
    pub rule: AlphaRule,
}

impl Deposit {
    pub fn new(color: [f32; 3], alpha: f32, rule: AlphaRule) -> Self {
        Self { color, alpha, rule }
    }
}

/// Apply a deposit to one pixel
///
/// Color uses unmultiplied source-over weighted by the alpha the pixel does
/// not yet have: `blend = local * (1 - existing)`. Erasing zeroes alpha and
/// leaves color bytes untouched. Out-of-bounds coordinates are ignored.
#[inline]
pub fn deposit(buffer: &mut PixelBuffer, x: u32, y: u32, paint: Deposit, is_eraser: bool) {
    let Some(mut pixel) = buffer.get(x, y) else {
        return;
    };

    if is_eraser {
        pixel[3] = 0;
        buffer.set(x, y, pixel);
        return;
    }

    let local = if paint.alpha.is_nan() {
        0.0
    } else {
        paint.alpha.clamp(0.0, 1.0)
    };
    let existing = pixel[3] as f32 / 255.0;
    let blend = local * (1.0 - existing);

    for c in 0..3 {
        let mixed = paint.color[c] * blend + pixel[c] as f32 * (1.0 - blend);
        pixel[c] = to_channel(mixed);
    }

    // Alpha math stays in the byte domain so max() is exactly idempotent
    pixel[3] = match paint.rule {
        AlphaRule::Max => pixel[3].max(to_channel(local * 255.0)),
        AlphaRule::Additive => to_channel((pixel[3] as f32 + local * 255.0).min(255.0)),
    };

    buffer.set(x, y, pixel);
}

#[inline]
fn to_channel(value: f32) -> u8 {
    value.floor().clamp(0.0, 255.0) as u8
}
