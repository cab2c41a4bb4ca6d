//! Undo for the painting session

use tracing::debug;

use super::PaintingSession;

impl PaintingSession {
    /// Check if undo is available
    pub fn can_undo(&self) -> bool {
        !self.history.is_empty()
    }

    /// Get the number of undo levels available
    pub fn undo_count(&self) -> usize {
        self.history.len()
    }

    /// Restore the most recent snapshot into the layer it was taken from
    ///
    /// Returns `false` when there is nothing to undo or a stroke is in
    /// progress. A snapshot taken before a canvas resize is cropped or
    /// padded to the current size.
    pub fn undo(&mut self) -> bool {
        if self.stroke.is_some() {
            debug!("Undo: ignored while stroking");
            return false;
        }
        let Some(snapshot) = self.history.pop() else {
            debug!("Undo: no entries available");
            return false;
        };
        let Some(layer) = self.layers.find_mut(snapshot.layer_id) else {
            debug!("Undo: layer {} no longer exists", snapshot.layer_id);
            return false;
        };

        layer.buffer.copy_from(&snapshot.buffer);
        debug!(
            "Undo: restored layer {} ({} remaining)",
            snapshot.layer_id,
            self.history.len()
        );
        self.mark_all_dirty();
        true
    }
}
