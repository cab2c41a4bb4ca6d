//! Layer panel commands.

use serde::{Deserialize, Serialize};

/// Per-layer blend mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayerBlendMode {
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

/// Direction for moving a layer in the stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayerDirection {
    /// Toward the top of the stack
    Up,
    /// Toward the bottom of the stack
    Down,
}

/// Commands from the layer panel.
///
/// Indexes are stack positions, 0 being the bottom layer. An out-of-range
/// index is ignored by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PanelCommand {
    /// Add a layer on top; it becomes the active layer
    AddLayer,
    /// Set layer opacity (0.0-1.0)
    SetOpacity { index: usize, opacity: f32 },
    SetBlendMode { index: usize, mode: LayerBlendMode },
    Reorder { index: usize, direction: LayerDirection },
    ToggleVisibility { index: usize },
    /// Make a layer the target of new strokes
    SelectActive { index: usize },
}
