//! Layer stack
//!
//! Index 0 is the bottom rank and is composited first. All layers share
//! the stack's dimensions. Panel operations address layers by index and
//! treat an out-of-range index as a no-op, reporting `false`.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::compositor::BlendMode;
use crate::surface::PixelBuffer;

/// Stable layer identifier, unaffected by reordering
pub type LayerId = u32;

/// Direction for moving a layer within the stack
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReorderDirection {
    /// Toward the top of the stack (higher rank)
    Up,
    /// Toward the bottom of the stack (lower rank)
    Down,
}

#[derive(Debug, Clone)]
pub struct Layer {
    pub id: LayerId,
    pub name: String,
    pub buffer: PixelBuffer,
    /// 0.0-1.0
    pub opacity: f32,
    pub blend_mode: BlendMode,
    pub visible: bool,
}

impl Layer {
    pub fn new(id: LayerId, name: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            id,
            name: name.into(),
            buffer: PixelBuffer::new(width, height),
            opacity: 1.0,
            blend_mode: BlendMode::Normal,
            visible: true,
        }
    }
}

/// Ordered layers plus the active selection
#[derive(Debug, Clone)]
pub struct LayerStack {
    layers: Vec<Layer>,
    active: usize,
    next_id: LayerId,
    width: u32,
    height: u32,
}

impl LayerStack {
    /// Create a stack holding a single "Background" layer
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            layers: vec![Layer::new(0, "Background", width, height)],
            active: 0,
            next_id: 1,
            width,
            height,
        }
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Layers bottom to top
    pub fn iter(&self) -> impl Iterator<Item = &Layer> {
        self.layers.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Layer> {
        self.layers.get(index)
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn active(&self) -> Option<&Layer> {
        self.layers.get(self.active)
    }

    pub fn active_mut(&mut self) -> Option<&mut Layer> {
        self.layers.get_mut(self.active)
    }

    pub fn find(&self, id: LayerId) -> Option<&Layer> {
        self.layers.iter().find(|l| l.id == id)
    }

    pub fn find_mut(&mut self, id: LayerId) -> Option<&mut Layer> {
        self.layers.iter_mut().find(|l| l.id == id)
    }

    /// Append a transparent layer on top and make it active
    pub fn add_layer(&mut self) -> LayerId {
        let id = self.next_id;
        self.next_id += 1;
        let name = format!("Layer {}", self.layers.len() + 1);
        info!("Added {} (id {})", name, id);

        self.layers.push(Layer::new(id, name, self.width, self.height));
        self.active = self.layers.len() - 1;
        id
    }

    /// Set a layer's opacity, clamped to [0, 1]
    pub fn set_opacity(&mut self, index: usize, opacity: f32) -> bool {
        let Some(layer) = self.layers.get_mut(index) else {
            debug!("set_opacity: index {} out of range", index);
            return false;
        };
        layer.opacity = if opacity.is_nan() {
            layer.opacity
        } else {
            opacity.clamp(0.0, 1.0)
        };
        true
    }

    pub fn set_blend_mode(&mut self, index: usize, mode: BlendMode) -> bool {
        let Some(layer) = self.layers.get_mut(index) else {
            debug!("set_blend_mode: index {} out of range", index);
            return false;
        };
        layer.blend_mode = mode;
        true
    }

    pub fn toggle_visibility(&mut self, index: usize) -> bool {
        let Some(layer) = self.layers.get_mut(index) else {
            debug!("toggle_visibility: index {} out of range", index);
            return false;
        };
        layer.visible = !layer.visible;
        true
    }

    pub fn select_active(&mut self, index: usize) -> bool {
        if index >= self.layers.len() {
            debug!("select_active: index {} out of range", index);
            return false;
        }
        self.active = index;
        true
    }

    /// Swap a layer with its neighbour; the moved layer becomes active
    ///
    /// Returns `false` when the index is out of range or the layer is
    /// already at that end of the stack.
    pub fn reorder(&mut self, index: usize, direction: ReorderDirection) -> bool {
        if index >= self.layers.len() {
            debug!("reorder: index {} out of range", index);
            return false;
        }
        let target = match direction {
            ReorderDirection::Up if index + 1 < self.layers.len() => index + 1,
            ReorderDirection::Down if index > 0 => index - 1,
            _ => return false,
        };

        self.layers.swap(index, target);
        self.active = target;
        true
    }

    /// Resize every layer, preserving overlapping content
    pub fn resize(&mut self, width: u32, height: u32) {
        for layer in &mut self.layers {
            layer.buffer.resize(width, height);
        }
        self.width = width;
        self.height = height;
    }
}
