//! Brush engine: per-variant dab rasterization
//!
//! Every variant implements a single operation, stamping one [`Dab`] into a
//! [`PixelBuffer`]. [`Brush`] is the closed set of variants with one
//! dispatching [`Brush::stamp`], and [`BrushSet`] keeps one instance of each
//! so stateful variants (the paper grain cache, the loaded texture) survive
//! switching brushes.
//!
//! Each stamp returns the clipped bounding box it touched, or `None` when the
//! dab was skipped or fell entirely outside the buffer.

mod basic;
mod deposit;
mod paper;
mod pencil;
mod spray;
mod texture;

pub use basic::BasicBrush;
pub use deposit::{AlphaRule, Deposit, deposit};
pub use paper::PaperBrush;
pub use pencil::PencilBrush;
pub use spray::SprayBrush;
pub use texture::{TextureBrush, TextureSource};

use std::sync::Arc;

use gouache_config::{DEFAULT_BRUSH_SIZE, PaintConfig};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::surface::PixelBuffer;
use crate::types::{Dab, Region, Rgb};

/// Brush variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BrushKind {
    #[default]
    Basic,
    Pencil,
    Spray,
    Paper,
    Texture,
}

impl BrushKind {
    pub const ALL: [BrushKind; 5] = [
        BrushKind::Basic,
        BrushKind::Pencil,
        BrushKind::Spray,
        BrushKind::Paper,
        BrushKind::Texture,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            BrushKind::Basic => "Basic",
            BrushKind::Pencil => "Pencil",
            BrushKind::Spray => "Spray",
            BrushKind::Paper => "Paper",
            BrushKind::Texture => "Texture",
        }
    }
}

/// Brush state used for one dab
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrushConfig {
    pub kind: BrushKind,
    /// Radius at full pressure, in pixels
    pub size: f32,
    pub color: Rgb,
    pub is_eraser: bool,
}

impl Default for BrushConfig {
    fn default() -> Self {
        Self {
            kind: BrushKind::Basic,
            size: DEFAULT_BRUSH_SIZE,
            color: Rgb::BLACK,
            is_eraser: false,
        }
    }
}

impl BrushConfig {
    /// Dab radius for a pressure
    #[inline]
    pub fn radius(&self, pressure: f32) -> f32 {
        pressure * self.size
    }
}

/// One brush variant with its own state
#[derive(Debug, Clone)]
pub enum Brush {
    Basic(BasicBrush),
    Pencil(PencilBrush),
    Spray(SprayBrush),
    Paper(PaperBrush),
    Texture(TextureBrush),
}

impl Brush {
    pub fn new(kind: BrushKind) -> Self {
        match kind {
            BrushKind::Basic => Brush::Basic(BasicBrush),
            BrushKind::Pencil => Brush::Pencil(PencilBrush),
            BrushKind::Spray => Brush::Spray(SprayBrush),
            BrushKind::Paper => Brush::Paper(PaperBrush::new()),
            BrushKind::Texture => Brush::Texture(TextureBrush::default()),
        }
    }

    pub fn kind(&self) -> BrushKind {
        match self {
            Brush::Basic(_) => BrushKind::Basic,
            Brush::Pencil(_) => BrushKind::Pencil,
            Brush::Spray(_) => BrushKind::Spray,
            Brush::Paper(_) => BrushKind::Paper,
            Brush::Texture(_) => BrushKind::Texture,
        }
    }

    /// Stamp one dab
    ///
    /// Dabs below the pressure threshold, or with a non-finite position,
    /// leave the buffer untouched.
    pub fn stamp<R: Rng>(
        &mut self,
        dab: Dab,
        buffer: &mut PixelBuffer,
        brush: &BrushConfig,
        settings: &PaintConfig,
        rng: &mut R,
    ) -> Option<Region> {
        if !(dab.pressure >= settings.pressure_threshold) {
            return None;
        }
        if !dab.x.is_finite() || !dab.y.is_finite() {
            debug!("Brush::stamp: non-finite dab position ({}, {})", dab.x, dab.y);
            return None;
        }

        match self {
            Brush::Basic(b) => b.stamp(dab, buffer, brush),
            Brush::Pencil(b) => b.stamp(dab, buffer, brush, settings, rng),
            Brush::Spray(b) => b.stamp(dab, buffer, brush, rng),
            Brush::Paper(b) => b.stamp(dab, buffer, brush, rng),
            Brush::Texture(b) => b.stamp(dab, buffer, brush),
        }
    }
}

/// One brush instance per variant
#[derive(Debug, Clone)]
pub struct BrushSet {
    brushes: [Brush; 5],
}

impl Default for BrushSet {
    fn default() -> Self {
        Self {
            brushes: BrushKind::ALL.map(Brush::new),
        }
    }
}

impl BrushSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, kind: BrushKind) -> &Brush {
        &self.brushes[kind as usize]
    }

    pub fn get_mut(&mut self, kind: BrushKind) -> &mut Brush {
        &mut self.brushes[kind as usize]
    }

    /// Provide the texture brush's source image
    pub fn set_texture(&mut self, texture: Arc<TextureSource>) {
        if let Brush::Texture(brush) = self.get_mut(BrushKind::Texture) {
            brush.set_texture(texture);
        }
    }

    pub fn texture_ready(&self) -> bool {
        matches!(self.get(BrushKind::Texture), Brush::Texture(brush) if brush.is_ready())
    }

    pub fn paper(&self) -> Option<&PaperBrush> {
        match self.get(BrushKind::Paper) {
            Brush::Paper(brush) => Some(brush),
            _ => None,
        }
    }
}

/// Uniform sample in `[0, 1)`
#[inline]
pub(crate) fn unit<R: Rng>(rng: &mut R) -> f32 {
    rng.gen_range(0.0..1.0)
}

/// Clipped integer bounding box of a disc, `None` if it misses the buffer
pub(crate) fn disc_bounds(x: f32, y: f32, radius: f32, width: u32, height: u32) -> Option<Region> {
    if !(radius > 0.0) || !radius.is_finite() || width == 0 || height == 0 {
        return None;
    }

    let x0 = (x - radius).floor().max(0.0);
    let y0 = (y - radius).floor().max(0.0);
    let x1 = (x + radius).ceil().min((width - 1) as f32);
    let y1 = (y + radius).ceil().min((height - 1) as f32);
    if x1 < x0 || y1 < y0 {
        return None;
    }

    let (x0, y0, x1, y1) = (x0 as u32, y0 as u32, x1 as u32, y1 as u32);
    Some(Region::new(x0, y0, x1 - x0 + 1, y1 - y0 + 1))
}

/// Visit every in-bounds pixel whose squared distance to `(x, y)` is at most
/// `radius²`, passing that squared distance
///
/// Returns the clipped bounding box when at least one pixel was visited.
pub(crate) fn for_each_covered(
    x: f32,
    y: f32,
    radius: f32,
    width: u32,
    height: u32,
    mut visit: impl FnMut(u32, u32, f32),
) -> Option<Region> {
    let bounds = disc_bounds(x, y, radius, width, height)?;
    let radius_sq = radius * radius;
    let mut any = false;

    for py in bounds.y..bounds.y + bounds.height {
        let dy = py as f32 - y;
        for px in bounds.x..bounds.x + bounds.width {
            let dx = px as f32 - x;
            let dist_sq = dx * dx + dy * dy;
            if dist_sq <= radius_sq {
                visit(px, py, dist_sq);
                any = true;
            }
        }
    }

    any.then_some(bounds)
}
