//! Main IPC message enums for communication between the engine and UI.

use serde::{Deserialize, Serialize};

use crate::commands::{PaintCommand, PanelCommand};
use crate::error::IpcError;
use crate::input::InputEvent;
use crate::types::{BrushInfo, DirtyRect, LayerInfo};

/// Messages from the UI to the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum UiToEngine {
    /// Pointer sample on the canvas
    Input(InputEvent),

    /// Layer panel interaction
    PanelCommand(PanelCommand),

    /// Brush and canvas commands
    PaintCommand(PaintCommand),

    /// Frame boundary: recomposite if anything changed
    Frame,
}

/// Messages from the engine to the UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum EngineToUi {
    /// Layer stack changed (added, reordered, restyled, selection moved)
    LayersChanged { layers: Vec<LayerInfo>, active: usize },

    /// Brush settings changed
    BrushChanged(BrushInfo),

    /// Palette swatches (`#rrggbb`, oldest first) or selection changed
    PaletteChanged { swatches: Vec<String>, selected: String },

    /// A recomposited frame is ready for display
    FramePresented {
        width: u32,
        height: u32,
        /// Area changed since the previous frame
        dirty: Option<DirtyRect>,
    },

    /// Undo was requested with nothing to undo
    UndoUnavailable,

    /// Error notification
    Error { code: String, message: String },
}

impl UiToEngine {
    /// Decode one JSON message
    pub fn from_json(json: &str) -> Result<Self, IpcError> {
        let json = json.trim();
        if !json.starts_with('{') {
            return Err(IpcError::InvalidFormat(format!(
                "expected a JSON object, got {:?}",
                json.chars().take(32).collect::<String>()
            )));
        }
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, IpcError> {
        Ok(serde_json::to_string(self)?)
    }
}

impl EngineToUi {
    pub fn from_json(json: &str) -> Result<Self, IpcError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Encode as a single line of JSON
    pub fn to_json(&self) -> Result<String, IpcError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn error(code: impl Into<String>, message: impl Into<String>) -> Self {
        EngineToUi::Error {
            code: code.into(),
            message: message.into(),
        }
    }
}
