//! Frame-boundary compositing
//!
//! Any number of dabs and panel commands between two frames set the
//! pending-flush flag once; the next [`PaintingSession::flush`] recomposites
//! the whole stack a single time.

use tracing::debug;

use crate::compositor::Frame;
use crate::types::Region;

use super::PaintingSession;

impl PaintingSession {
    /// Check if a recomposite is pending
    pub fn needs_flush(&self) -> bool {
        self.pending_flush
    }

    /// Recomposite if anything changed since the last flush
    ///
    /// Returns the new frame, or `None` when nothing was pending.
    pub fn flush(&mut self) -> Option<Frame<'_>> {
        if !self.pending_flush {
            return None;
        }
        self.pending_flush = false;
        Some(self.composite())
    }

    /// Recomposite unconditionally
    pub fn composite(&mut self) -> Frame<'_> {
        self.compositor.composite(&self.layers);
        let frame = self.compositor.frame();
        debug!("Composited frame {}x{}", frame.width, frame.height);
        frame
    }

    /// The last composited frame
    pub fn frame(&self) -> Frame<'_> {
        self.compositor.frame()
    }

    /// Take the union of regions changed since the last call
    pub fn take_dirty_region(&mut self) -> Option<Region> {
        self.dirty.take()
    }

    /// Check if any region is dirty
    pub fn has_dirty_region(&self) -> bool {
        self.dirty.is_some()
    }
}
