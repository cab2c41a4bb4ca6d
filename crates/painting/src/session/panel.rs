//! Layer panel commands
//!
//! Index-addressed commands are no-ops on an out-of-range index and report
//! whether anything changed.

use gouache_config::check_canvas_size;
use tracing::{debug, info};

use crate::compositor::BlendMode;
use crate::error::PaintError;
use crate::history::LayerSnapshot;
use crate::layers::{LayerId, ReorderDirection};
use crate::types::TRANSPARENT;

use super::PaintingSession;

impl PaintingSession {
    /// Add a layer on top of the stack; it becomes the active layer
    pub fn add_layer(&mut self) -> LayerId {
        let id = self.layers.add_layer();
        self.pending_flush = true;
        id
    }

    pub fn set_layer_opacity(&mut self, index: usize, opacity: f32) -> bool {
        let changed = self.layers.set_opacity(index, opacity);
        self.refresh_if(changed)
    }

    pub fn set_layer_blend_mode(&mut self, index: usize, mode: BlendMode) -> bool {
        let changed = self.layers.set_blend_mode(index, mode);
        self.refresh_if(changed)
    }

    pub fn reorder_layer(&mut self, index: usize, direction: ReorderDirection) -> bool {
        let changed = self.layers.reorder(index, direction);
        self.refresh_if(changed)
    }

    pub fn toggle_layer_visibility(&mut self, index: usize) -> bool {
        let changed = self.layers.toggle_visibility(index);
        self.refresh_if(changed)
    }

    /// Make a layer the target of subsequent strokes
    pub fn select_layer(&mut self, index: usize) -> bool {
        self.layers.select_active(index)
    }

    /// Clear the active layer to transparent; undoable
    pub fn clear_active_layer(&mut self) -> bool {
        if self.stroke.is_some() {
            debug!("clear_active_layer: ignored while stroking");
            return false;
        }
        let Some(layer) = self.layers.active_mut() else {
            return false;
        };

        self.history.push(LayerSnapshot {
            layer_id: layer.id,
            buffer: layer.buffer.clone(),
        });
        layer.buffer.clear(TRANSPARENT);
        info!("Cleared layer {}", layer.name);

        self.mark_all_dirty();
        true
    }

    /// Resize every layer and the display, preserving overlapping content
    ///
    /// Sizes rejected by [`check_canvas_size`] leave the canvas as it is.
    pub fn resize_canvas(&mut self, width: u32, height: u32) -> Result<(), PaintError> {
        check_canvas_size(width, height)?;
        if (width, height) == self.layers.dimensions() {
            return Ok(());
        }
        info!("Resizing canvas to {}x{}", width, height);
        self.layers.resize(width, height);
        self.dirty = None;
        self.mark_all_dirty();
        Ok(())
    }

    fn refresh_if(&mut self, changed: bool) -> bool {
        if changed {
            self.mark_all_dirty();
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use gouache_config::PaintConfig;

    use crate::compositor::BlendMode;
    use crate::layers::ReorderDirection;
    use crate::session::PaintingSession;

    fn session() -> PaintingSession {
        let mut session = PaintingSession::with_seed(
            PaintConfig {
                canvas_width: 32,
                canvas_height: 32,
                ..Default::default()
            },
            5,
        );
        session.flush();
        session
    }

    #[test]
    fn test_panel_commands_request_flush() {
        let mut session = session();
        assert!(!session.needs_flush());

        assert!(session.set_layer_opacity(0, 0.5));
        assert!(session.needs_flush());
        session.flush();

        assert!(session.set_layer_blend_mode(0, BlendMode::Screen));
        assert_eq!(session.layers().get(0).unwrap().blend_mode, BlendMode::Screen);
        assert!(session.needs_flush());
    }

    #[test]
    fn test_out_of_range_commands_are_noops() {
        let mut session = session();
        assert!(!session.set_layer_opacity(4, 0.5));
        assert!(!session.set_layer_blend_mode(4, BlendMode::Multiply));
        assert!(!session.reorder_layer(4, ReorderDirection::Up));
        assert!(!session.toggle_layer_visibility(4));
        assert!(!session.select_layer(4));
        assert!(!session.needs_flush());
    }

    #[test]
    fn test_new_layer_is_stroke_target() {
        let mut session = session();
        let id = session.add_layer();
        session.begin_stroke(16.0, 16.0, Some(1.0));
        session.end_stroke();

        assert!(!session.layers().find(id).unwrap().buffer.is_blank());
        assert!(session.layers().get(0).unwrap().buffer.is_blank());
    }

    #[test]
    fn test_reorder_keeps_moved_layer_active() {
        let mut session = session();
        let id = session.add_layer();
        assert!(session.reorder_layer(1, ReorderDirection::Down));
        assert_eq!(session.layers().active().unwrap().id, id);
        assert_eq!(session.layers().active_index(), 0);
    }

    #[test]
    fn test_clear_layer_is_undoable() {
        let mut session = session();
        session.begin_stroke(16.0, 16.0, Some(1.0));
        session.end_stroke();
        let painted = session.layers().active().unwrap().buffer.clone();

        assert!(session.clear_active_layer());
        assert!(session.layers().active().unwrap().buffer.is_blank());

        assert!(session.undo());
        assert_eq!(session.layers().active().unwrap().buffer, painted);
    }

    #[test]
    fn test_resize_canvas_preserves_overlap() {
        let mut session = session();
        session.begin_stroke(5.0, 5.0, Some(1.0));
        session.end_stroke();
        let before = session.layers().active().unwrap().buffer.get(5, 5);

        session.resize_canvas(16, 64).unwrap();
        assert_eq!((session.width(), session.height()), (16, 64));
        let buffer = &session.layers().active().unwrap().buffer;
        assert_eq!(buffer.get(5, 5), before);
        assert_eq!(buffer.get(5, 50), Some([0, 0, 0, 0]));
        assert_eq!(buffer.get(20, 5), None);

        let frame = session.flush().unwrap();
        assert_eq!((frame.width, frame.height), (16, 64));
    }

    #[test]
    fn test_resize_rejects_empty_canvas() {
        let mut session = session();
        session.begin_stroke(5.0, 5.0, Some(1.0));
        session.end_stroke();
        session.flush();

        assert!(session.resize_canvas(0, 0).is_err());
        assert!(session.resize_canvas(32, 0).is_err());
        assert!(session.resize_canvas(100_000, 32).is_err());
        assert_eq!((session.width(), session.height()), (32, 32));
        assert!(!session.needs_flush());
        assert!(!session.layers().active().unwrap().buffer.is_blank());
    }
}
