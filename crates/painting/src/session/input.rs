//! Pointer input for the painting session

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::PaintingSession;

/// Pointer event phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerKind {
    Down,
    Move,
    Up,
    /// Pointer left the surface
    Cancel,
}

/// A pointer sample in canvas pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    pub kind: PointerKind,
    pub x: f64,
    pub y: f64,
    /// Missing when the device reports no pressure
    #[serde(default)]
    pub pressure: Option<f64>,
}

impl PointerEvent {
    pub fn new(kind: PointerKind, x: f64, y: f64, pressure: Option<f64>) -> Self {
        Self {
            kind,
            x,
            y,
            pressure,
        }
    }
}

impl PaintingSession {
    /// Route a pointer event to the stroke machinery
    ///
    /// Returns `true` if the event started, continued or ended a stroke.
    /// Moves without a stroke (hover) and events with a non-finite position
    /// are dropped.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> bool {
        let (x, y) = (event.x as f32, event.y as f32);
        let pressure = event.pressure.map(|p| p as f32);

        match event.kind {
            PointerKind::Down | PointerKind::Move if !(x.is_finite() && y.is_finite()) => {
                debug!("handle_pointer: non-finite position ({}, {}) dropped", event.x, event.y);
                false
            }
            PointerKind::Down => self.begin_stroke(x, y, pressure),
            PointerKind::Move => {
                if !self.is_stroking() {
                    return false;
                }
                self.stroke_to(x, y, pressure);
                true
            }
            PointerKind::Up => self.end_stroke(),
            PointerKind::Cancel => self.cancel_stroke(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gouache_config::PaintConfig;

    fn session() -> PaintingSession {
        PaintingSession::with_seed(
            PaintConfig {
                canvas_width: 64,
                canvas_height: 64,
                ..Default::default()
            },
            11,
        )
    }

    #[test]
    fn test_pointer_sequence_paints() {
        let mut session = session();
        assert!(session.handle_pointer(PointerEvent::new(PointerKind::Down, 10.0, 10.0, None)));
        assert!(session.handle_pointer(PointerEvent::new(PointerKind::Move, 40.0, 10.0, None)));
        assert!(session.handle_pointer(PointerEvent::new(PointerKind::Up, 40.0, 10.0, None)));

        // Absent pressure on down reads as full pressure and sticks
        let buffer = &session.layers().active().unwrap().buffer;
        assert_eq!(buffer.get(25, 10).unwrap()[3], 255);
    }

    #[test]
    fn test_hover_move_is_ignored() {
        let mut session = session();
        assert!(!session.handle_pointer(PointerEvent::new(PointerKind::Move, 10.0, 10.0, Some(1.0))));
        assert!(!session.handle_pointer(PointerEvent::new(PointerKind::Up, 10.0, 10.0, None)));
        assert!(session.layers().active().unwrap().buffer.is_blank());
    }

    #[test]
    fn test_cancel_ends_stroke() {
        let mut session = session();
        session.handle_pointer(PointerEvent::new(PointerKind::Down, 10.0, 10.0, Some(0.5)));
        assert!(session.handle_pointer(PointerEvent::new(PointerKind::Cancel, 0.0, 0.0, None)));
        assert!(!session.is_stroking());
    }

    #[test]
    fn test_non_finite_position_dropped() {
        let mut session = session();
        assert!(!session.handle_pointer(PointerEvent::new(PointerKind::Down, f64::NAN, 1.0, None)));
        assert!(!session.is_stroking());
    }

    #[test]
    fn test_event_json_shape() {
        let event: PointerEvent =
            serde_json::from_str(r#"{"kind":"move","x":1.5,"y":2.0}"#).unwrap();
        assert_eq!(event, PointerEvent::new(PointerKind::Move, 1.5, 2.0, None));
    }
}
