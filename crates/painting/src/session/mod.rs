//! Painting session
//!
//! Owns everything one canvas needs while the user paints: the layer stack,
//! one instance of every brush variant, the current brush state, the stroke
//! sampler, undo history and the compositor. All drawing state lives here
//! rather than in globals, so several sessions can coexist.
//!
//! The session is driven by:
//! - pointer events ([`PaintingSession::handle_pointer`]) or the lower-level
//!   `begin_stroke` / `stroke_to` / `end_stroke` calls
//! - layer panel commands (`add_layer`, `set_layer_opacity`, ...)
//! - brush setters (`set_brush_size`, `set_color_hex`, ...)
//!
//! Dabs only mark the session as needing a flush; the compositor runs once
//! per frame boundary in [`PaintingSession::flush`].

mod flush;
mod input;
mod panel;
mod stroke;
mod undo;

use std::sync::Arc;

use gouache_config::PaintConfig;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{info, warn};

use crate::brush::{BrushConfig, BrushKind, BrushSet, TextureSource};
use crate::compositor::Compositor;
use crate::error::PaintError;
use crate::history::{HistoryStack, LayerSnapshot};
use crate::layers::LayerStack;
use crate::palette::Palette;
use crate::sampler::StrokeSampler;
use crate::types::{Region, Rgb};

pub use input::{PointerEvent, PointerKind};
pub use stroke::ActiveStroke;

pub struct PaintingSession {
    pub(crate) settings: PaintConfig,
    pub(crate) layers: LayerStack,
    pub(crate) brushes: BrushSet,
    pub(crate) brush: BrushConfig,
    pub(crate) sampler: StrokeSampler,
    /// Current stroke (None if not painting)
    pub(crate) stroke: Option<ActiveStroke>,
    pub(crate) history: HistoryStack<LayerSnapshot>,
    pub(crate) palette: Palette,
    pub(crate) compositor: Compositor,
    /// Set by any change that needs a recomposite
    pub(crate) pending_flush: bool,
    /// Union of regions touched since the dirty region was last taken
    pub(crate) dirty: Option<Region>,
    pub(crate) rng: StdRng,
}

impl PaintingSession {
    /// Create a session sized from the settings, seeded from system entropy
    pub fn new(settings: PaintConfig) -> Self {
        Self::with_rng(settings, StdRng::from_entropy())
    }

    /// Create a session with reproducible brush noise
    pub fn with_seed(settings: PaintConfig, seed: u64) -> Self {
        Self::with_rng(settings, StdRng::seed_from_u64(seed))
    }

    fn with_rng(settings: PaintConfig, rng: StdRng) -> Self {
        let color = Rgb::from_hex(&settings.default_color).unwrap_or_else(|e| {
            warn!("Invalid default color, using black: {}", e);
            Rgb::BLACK
        });
        let brush = BrushConfig {
            kind: BrushKind::Basic,
            size: settings.clamp_brush_size(settings.default_brush_size),
            color,
            is_eraser: false,
        };
        let (width, height) = (settings.canvas_width, settings.canvas_height);
        info!("Painting session {}x{}", width, height);

        Self {
            layers: LayerStack::new(width, height),
            brushes: BrushSet::new(),
            brush,
            sampler: StrokeSampler::new(&settings),
            stroke: None,
            history: HistoryStack::new(settings.history_capacity),
            palette: Palette::new(),
            compositor: Compositor::new(width, height),
            pending_flush: true,
            dirty: Some(Region::new(0, 0, width, height)),
            rng,
            settings,
        }
    }

    pub fn settings(&self) -> &PaintConfig {
        &self.settings
    }

    /// Replace the settings
    ///
    /// Takes effect from the next dab, including mid-stroke. The brush size
    /// is re-clamped to the new bounds and history trimmed to the new
    /// capacity.
    pub fn set_settings(&mut self, settings: PaintConfig) {
        self.brush.size = settings.clamp_brush_size(self.brush.size);
        self.history.set_capacity(settings.history_capacity);
        self.settings = settings;
    }

    pub fn width(&self) -> u32 {
        self.layers.dimensions().0
    }

    pub fn height(&self) -> u32 {
        self.layers.dimensions().1
    }

    pub fn layers(&self) -> &LayerStack {
        &self.layers
    }

    pub fn brush(&self) -> &BrushConfig {
        &self.brush
    }

    pub fn brushes(&self) -> &BrushSet {
        &self.brushes
    }

    /// Set the brush size, clamped to the configured bounds; returns the
    /// size actually applied
    pub fn set_brush_size(&mut self, size: f32) -> f32 {
        self.brush.size = self.settings.clamp_brush_size(size);
        self.brush.size
    }

    pub fn set_color(&mut self, color: Rgb) {
        self.brush.color = color;
    }

    /// Set the brush color from a `#rrggbb` string
    pub fn set_color_hex(&mut self, hex: &str) -> Result<(), PaintError> {
        self.brush.color = Rgb::from_hex(hex)?;
        Ok(())
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Add a swatch to the palette; `false` if it was already there
    pub fn add_palette_color(&mut self, color: Rgb) -> bool {
        self.palette.add_color(color)
    }

    /// Paint with the palette swatch at `index`; out of range is a no-op
    pub fn select_palette_color(&mut self, index: usize) -> bool {
        match self.palette.select_swatch(index) {
            Some(color) => {
                self.brush.color = color;
                true
            }
            None => false,
        }
    }

    pub fn set_brush_kind(&mut self, kind: BrushKind) {
        if kind == BrushKind::Texture && !self.brushes.texture_ready() {
            warn!("Texture brush selected without a texture; dabs are skipped until one is loaded");
        }
        self.brush.kind = kind;
    }

    pub fn set_eraser(&mut self, is_eraser: bool) {
        self.brush.is_eraser = is_eraser;
    }

    /// Flip eraser mode, returning the new state
    pub fn toggle_eraser(&mut self) -> bool {
        self.brush.is_eraser = !self.brush.is_eraser;
        self.brush.is_eraser
    }

    /// Provide the texture brush's source image
    pub fn set_texture(&mut self, texture: TextureSource) {
        info!(
            "Texture brush ready ({}x{})",
            texture.width(),
            texture.height()
        );
        self.brushes.set_texture(Arc::new(texture));
    }

    /// Mark the whole canvas for recomposite
    pub(crate) fn mark_all_dirty(&mut self) {
        let (width, height) = self.layers.dimensions();
        self.mark_dirty(Region::new(0, 0, width, height));
    }

    pub(crate) fn mark_dirty(&mut self, region: Region) {
        self.dirty = Some(match self.dirty {
            Some(dirty) => dirty.union(&region),
            None => region,
        });
        self.pending_flush = true;
    }
}
