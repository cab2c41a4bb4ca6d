//! Paint command types for the brush and canvas.

use serde::{Deserialize, Serialize};

/// Brush variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BrushStyle {
    #[default]
    Basic,
    Pencil,
    Spray,
    Paper,
    Texture,
}

/// Commands for controlling the brush and canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PaintCommand {
    /// Set brush color as `#rrggbb`
    SetBrushColor { color: String },
    /// Set brush size in pixels (clamped to the configured bounds)
    SetBrushSize { size: f32 },
    SetBrushStyle { style: BrushStyle },
    SetEraser { enabled: bool },
    ToggleEraser,
    /// Undo the last stroke or clear
    Undo,
    /// Clear the active layer to transparent
    ClearLayer,
    /// Resize every layer, keeping overlapping content
    ResizeCanvas { width: u32, height: u32 },
    /// Add a `#rrggbb` swatch to the palette
    AddSwatch { color: String },
    /// Paint with the palette swatch at `index`
    SelectSwatch { index: usize },
}
