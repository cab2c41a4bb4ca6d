//! Pointer input events

use serde::{Deserialize, Serialize};

/// Pointer event phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerKind {
    Down,
    Move,
    Up,
    /// Pointer left the canvas
    Cancel,
}

/// Pointer sample in canvas pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InputEvent {
    pub kind: PointerKind,
    pub x: f64,
    pub y: f64,
    /// Absent when the device reports no pressure
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pressure: Option<f64>,
}
