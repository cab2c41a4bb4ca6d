//! Layer compositing
//!
//! Layers are combined bottom to top into a display buffer that is cleared
//! to transparent before every full recomposite. Each layer's blend function
//! operates on normalized unmultiplied channels; the result is mixed into
//! the destination by `opacity * alpha` with source-over alpha.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::layers::LayerStack;
use crate::surface::PixelBuffer;
use crate::types::{Rgba, TRANSPARENT};

/// Per-layer blend mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlendMode {
    #[default]
    Normal,
    Multiply,
    Screen,
    Overlay,
    Darken,
    Lighten,
    ColorDodge,
    ColorBurn,
}

impl BlendMode {
    /// All blend modes in panel order
    pub fn all() -> &'static [BlendMode] {
        &[
            BlendMode::Normal,
            BlendMode::Multiply,
            BlendMode::Screen,
            BlendMode::Overlay,
            BlendMode::Darken,
            BlendMode::Lighten,
            BlendMode::ColorDodge,
            BlendMode::ColorBurn,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            BlendMode::Normal => "Normal",
            BlendMode::Multiply => "Multiply",
            BlendMode::Screen => "Screen",
            BlendMode::Overlay => "Overlay",
            BlendMode::Darken => "Darken",
            BlendMode::Lighten => "Lighten",
            BlendMode::ColorDodge => "Color Dodge",
            BlendMode::ColorBurn => "Color Burn",
        }
    }

    /// Blend one normalized channel: `s` from the layer, `d` from below
    #[inline]
    pub fn blend_channel(self, s: f32, d: f32) -> f32 {
        match self {
            BlendMode::Normal => s,
            BlendMode::Multiply => s * d,
            BlendMode::Screen => 1.0 - (1.0 - s) * (1.0 - d),
            BlendMode::Overlay => {
                if d < 0.5 {
                    2.0 * s * d
                } else {
                    1.0 - 2.0 * (1.0 - s) * (1.0 - d)
                }
            }
            BlendMode::Darken => s.min(d),
            BlendMode::Lighten => s.max(d),
            BlendMode::ColorDodge => {
                if d == 0.0 {
                    0.0
                } else if s >= 1.0 {
                    1.0
                } else {
                    (d / (1.0 - s)).min(1.0)
                }
            }
            BlendMode::ColorBurn => {
                if d >= 1.0 {
                    1.0
                } else if s == 0.0 {
                    0.0
                } else {
                    1.0 - ((1.0 - d) / s).min(1.0)
                }
            }
        }
    }
}

/// Composite one source pixel over a destination pixel
///
/// Where the destination is transparent the blend function has no effect
/// and the source is laid down as with [`BlendMode::Normal`].
pub fn composite_pixel(dst: Rgba, src: Rgba, mode: BlendMode, opacity: f32) -> Rgba {
    if src[3] == 0 {
        return dst;
    }

    let effective = opacity.clamp(0.0, 1.0) * (src[3] as f32 / 255.0);
    if effective <= 0.0 {
        return dst;
    }

    let dst_a = dst[3] as f32 / 255.0;
    let out_a = effective + dst_a * (1.0 - effective);
    if out_a <= 0.0 {
        return TRANSPARENT;
    }

    let mut out = [0u8; 4];
    for c in 0..3 {
        let s = src[c] as f32 / 255.0;
        let d = dst[c] as f32 / 255.0;
        let mixed = (1.0 - dst_a) * s + dst_a * mode.blend_channel(s, d);
        let value = (effective * mixed + dst_a * (1.0 - effective) * d) / out_a;
        out[c] = to_byte(value);
    }
    out[3] = to_byte(out_a);
    out
}

#[inline]
fn to_byte(value: f32) -> u8 {
    (value * 255.0).round().clamp(0.0, 255.0) as u8
}

/// Borrowed view of a composited frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame<'a> {
    pub width: u32,
    pub height: u32,
    /// Flat RGBA bytes, row-major
    pub bytes: &'a [u8],
}

/// Owns the display buffer and rebuilds it from a layer stack
#[derive(Debug, Clone)]
pub struct Compositor {
    display: PixelBuffer,
}

impl Compositor {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            display: PixelBuffer::new(width, height),
        }
    }

    /// Recomposite every visible layer, bottom rank first
    pub fn composite(&mut self, stack: &LayerStack) -> &PixelBuffer {
        let (width, height) = stack.dimensions();
        if self.display.width() != width || self.display.height() != height {
            self.display = PixelBuffer::new(width, height);
        } else {
            self.display.clear(TRANSPARENT);
        }

        let mut drawn = 0;
        for layer in stack.iter() {
            if !layer.visible || layer.opacity <= 0.0 {
                continue;
            }
            if layer.buffer.width() != width || layer.buffer.height() != height {
                debug!("Compositor: layer {} size mismatch, skipped", layer.id);
                continue;
            }

            let (mode, opacity) = (layer.blend_mode, layer.opacity);
            for (dst, src) in self.display.pixels_mut().iter_mut().zip(layer.buffer.pixels()) {
                *dst = composite_pixel(*dst, *src, mode, opacity);
            }
            drawn += 1;
        }

        debug!("Compositor: composited {} of {} layers", drawn, stack.len());
        &self.display
    }

    pub fn display(&self) -> &PixelBuffer {
        &self.display
    }

    /// Flat RGBA view of the last composite
    pub fn frame(&self) -> Frame<'_> {
        Frame {
            width: self.display.width(),
            height: self.display.height(),
            bytes: self.display.as_bytes(),
        }
    }
}
