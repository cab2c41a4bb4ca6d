//! Stroke handling for the painting session

use tracing::debug;

use crate::history::LayerSnapshot;
use crate::layers::LayerId;
use crate::types::{Dab, Region};

use super::PaintingSession;

/// The stroke in progress
#[derive(Debug, Clone)]
pub struct ActiveStroke {
    layer_id: LayerId,
    points: Vec<(f32, f32)>,
    dab_count: usize,
}

impl ActiveStroke {
    /// Layer the stroke paints into, fixed at pointer-down
    pub fn layer_id(&self) -> LayerId {
        self.layer_id
    }

    /// Raw pointer positions received so far
    pub fn points(&self) -> &[(f32, f32)] {
        &self.points
    }

    /// Dabs handed to the brush so far
    pub fn dab_count(&self) -> usize {
        self.dab_count
    }
}

impl PaintingSession {
    /// Begin a stroke on the active layer
    ///
    /// Snapshots the layer for undo, then stamps the first dab at the
    /// pointer-down position. Returns `false` if a stroke is already in
    /// progress; the second pointer-down is ignored.
    pub fn begin_stroke(&mut self, x: f32, y: f32, pressure: Option<f32>) -> bool {
        if self.stroke.is_some() {
            debug!("begin_stroke: stroke already in progress, ignoring");
            return false;
        }
        let Some(layer) = self.layers.active() else {
            debug!("begin_stroke: no active layer");
            return false;
        };

        let layer_id = layer.id;
        self.history.push(LayerSnapshot {
            layer_id,
            buffer: layer.buffer.clone(),
        });

        let dab = self.sampler.begin(x, y, pressure, &self.settings);
        self.stroke = Some(ActiveStroke {
            layer_id,
            points: vec![(x, y)],
            dab_count: 0,
        });
        debug!(
            "begin_stroke: layer {} with {} brush, size {:.1}",
            layer_id,
            self.brush.kind.name(),
            self.brush.size
        );

        self.apply_dab(dab);
        true
    }

    /// Continue the stroke to a new pointer position
    ///
    /// Returns the number of dabs placed.
    pub fn stroke_to(&mut self, x: f32, y: f32, pressure: Option<f32>) -> usize {
        let Some(stroke) = self.stroke.as_mut() else {
            debug!("stroke_to: no active stroke, ignoring");
            return 0;
        };
        stroke.points.push((x, y));

        let dabs = self.sampler.sample(
            x,
            y,
            pressure,
            self.brush.size,
            self.layers.dimensions(),
            &self.settings,
        );
        let count = dabs.len();
        for dab in dabs {
            self.apply_dab(dab);
        }
        count
    }

    /// Finish the stroke; returns `false` if none was in progress
    pub fn end_stroke(&mut self) -> bool {
        let Some(stroke) = self.stroke.take() else {
            return false;
        };
        self.sampler.end();
        debug!(
            "end_stroke: layer {}, {} points, {} dabs",
            stroke.layer_id,
            stroke.points.len(),
            stroke.dab_count
        );
        true
    }

    /// Pointer exit: handled exactly like pointer-up
    pub fn cancel_stroke(&mut self) -> bool {
        self.end_stroke()
    }

    /// Check if a stroke is currently in progress
    pub fn is_stroking(&self) -> bool {
        self.stroke.is_some()
    }

    pub fn current_stroke(&self) -> Option<&ActiveStroke> {
        self.stroke.as_ref()
    }

    /// Stamp one dab into the stroke's layer with the current brush
    pub(crate) fn apply_dab(&mut self, dab: Dab) -> Option<Region> {
        let stroke = self.stroke.as_mut()?;
        stroke.dab_count += 1;
        let layer_id = stroke.layer_id;

        let Some(layer) = self.layers.find_mut(layer_id) else {
            debug!("apply_dab: layer {} no longer exists", layer_id);
            return None;
        };

        let region = self.brushes.get_mut(self.brush.kind).stamp(
            dab,
            &mut layer.buffer,
            &self.brush,
            &self.settings,
            &mut self.rng,
        );

        match region {
            Some(region) => {
                debug!(
                    "  apply_dab: pos=({:.1}, {:.1}), pressure={:.2} -> region ({}, {}) {}x{}",
                    dab.x, dab.y, dab.pressure, region.x, region.y, region.width, region.height
                );
                self.mark_dirty(region);
            }
            None => debug!("  apply_dab: pos=({:.1}, {:.1}) left no paint", dab.x, dab.y),
        }
        region
    }
}
