//! Gouache painting engine - brush rasterization and layer compositing
//!
//! This crate turns pointer strokes into pixels:
//! - [`surface`] - RGBA8 pixel buffer
//! - [`sampler`] - Resamples pointer motion into evenly spaced dabs
//! - [`brush`] - Per-variant dab rendering (basic, pencil, spray, paper, texture)
//! - [`layers`] - Layer stack with opacity, blend mode and visibility
//! - [`compositor`] - Blends the layer stack into a display buffer
//! - [`history`] - Bounded undo snapshots
//! - [`palette`] - Color swatches
//! - [`session`] - Painting session tying it all together

pub mod brush;
pub mod compositor;
pub mod constants;
pub mod error;
pub mod history;
pub mod layers;
pub mod palette;
pub mod sampler;
pub mod session;
pub mod surface;
pub mod types;

pub use brush::{BrushConfig, BrushKind, TextureSource};
pub use compositor::{BlendMode, Compositor, Frame};
pub use error::PaintError;
pub use history::{HistoryStack, LayerSnapshot};
pub use layers::{Layer, LayerId, LayerStack, ReorderDirection};
pub use palette::Palette;
pub use sampler::StrokeSampler;
pub use session::{PaintingSession, PointerEvent, PointerKind};
pub use surface::PixelBuffer;
pub use types::*;
