//! In-memory color palette: a fixed number of swatches plus a selection

use std::collections::VecDeque;

use tracing::debug;

use crate::types::Rgb;

/// Swatches a palette holds before the oldest is dropped
pub const PALETTE_SIZE: usize = 16;

/// Swatches a new palette starts with
pub const DEFAULT_SWATCHES: [Rgb; PALETTE_SIZE] = [
    Rgb([0x00, 0x00, 0x00]),
    Rgb([0xff, 0xff, 0xff]),
    Rgb([0xff, 0x00, 0x00]),
    Rgb([0x00, 0xff, 0x00]),
    Rgb([0x00, 0x00, 0xff]),
    Rgb([0xff, 0xff, 0x00]),
    Rgb([0xff, 0x00, 0xff]),
    Rgb([0x00, 0xff, 0xff]),
    Rgb([0x80, 0x80, 0x80]),
    Rgb([0x80, 0x00, 0x00]),
    Rgb([0x00, 0x80, 0x00]),
    Rgb([0x00, 0x00, 0x80]),
    Rgb([0x80, 0x80, 0x00]),
    Rgb([0x80, 0x00, 0x80]),
    Rgb([0x00, 0x80, 0x80]),
    Rgb([0xc0, 0xc0, 0xc0]),
];

#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    swatches: VecDeque<Rgb>,
    selected: Rgb,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            swatches: DEFAULT_SWATCHES.into_iter().collect(),
            selected: DEFAULT_SWATCHES[0],
        }
    }
}

impl Palette {
    pub fn new() -> Self {
        Self::default()
    }

    /// Swatches, oldest first
    pub fn swatches(&self) -> impl Iterator<Item = Rgb> + '_ {
        self.swatches.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.swatches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.swatches.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Rgb> {
        self.swatches.get(index).copied()
    }

    pub fn selected(&self) -> Rgb {
        self.selected
    }

    /// Append a swatch unless it is already present
    ///
    /// A full palette drops its oldest swatch. Returns `false` for a
    /// duplicate.
    pub fn add_color(&mut self, color: Rgb) -> bool {
        if self.swatches.contains(&color) {
            return false;
        }
        self.swatches.push_back(color);
        if self.swatches.len() > PALETTE_SIZE {
            if let Some(dropped) = self.swatches.pop_front() {
                debug!("Palette full, dropped {}", dropped.to_hex());
            }
        }
        true
    }

    /// Select a color; it need not be one of the swatches
    pub fn select_color(&mut self, color: Rgb) {
        self.selected = color;
    }

    /// Select the swatch at `index`; out of range is a no-op
    pub fn select_swatch(&mut self, index: usize) -> Option<Rgb> {
        let color = self.get(index)?;
        self.selected = color;
        Some(color)
    }
}
