//! State snapshots sent to the UI.

use serde::{Deserialize, Serialize};

use crate::commands::{BrushStyle, LayerBlendMode};

/// One row of the layer panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerInfo {
    pub id: u32,
    pub name: String,
    pub opacity: f32,
    pub blend_mode: LayerBlendMode,
    pub visible: bool,
}

/// Current brush state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrushInfo {
    pub style: BrushStyle,
    pub size: f32,
    /// `#rrggbb`
    pub color: String,
    pub eraser: bool,
    /// False while the texture brush has no texture loaded
    pub ready: bool,
}

/// Rectangle of changed pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirtyRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}
