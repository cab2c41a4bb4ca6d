//! Routes UI messages into the painting session
//!
//! Every message is applied in order; notifications for the UI are queued
//! in an outbox and drained by the caller.

use gouache_ipc::{
    BrushInfo, BrushStyle, DirtyRect, EngineToUi, InputEvent, LayerBlendMode, LayerDirection,
    LayerInfo, PaintCommand, PanelCommand, PointerKind as IpcPointerKind, UiToEngine,
};
use painting::{
    BlendMode, BrushKind, PaintingSession, PointerEvent, PointerKind, Region, ReorderDirection, Rgb,
};
use tracing::{debug, warn};

pub struct Dispatcher {
    session: PaintingSession,
    outbox: Vec<EngineToUi>,
}

impl Dispatcher {
    pub fn new(session: PaintingSession) -> Self {
        Self {
            session,
            outbox: Vec::new(),
        }
    }

    pub fn session(&self) -> &PaintingSession {
        &self.session
    }

    pub fn into_session(self) -> PaintingSession {
        self.session
    }

    /// Take the queued notifications
    pub fn drain(&mut self) -> Vec<EngineToUi> {
        std::mem::take(&mut self.outbox)
    }

    pub fn dispatch(&mut self, message: UiToEngine) {
        match message {
            UiToEngine::Input(event) => {
                self.session.handle_pointer(pointer_event(event));
            }
            UiToEngine::PanelCommand(command) => self.handle_panel(command),
            UiToEngine::PaintCommand(command) => self.handle_paint(command),
            UiToEngine::Frame => self.present(),
        }
    }

    fn handle_panel(&mut self, command: PanelCommand) {
        debug!("Panel command: {:?}", command);
        let changed = match command {
            PanelCommand::AddLayer => {
                self.session.add_layer();
                true
            }
            PanelCommand::SetOpacity { index, opacity } => {
                self.session.set_layer_opacity(index, opacity)
            }
            PanelCommand::SetBlendMode { index, mode } => {
                self.session.set_layer_blend_mode(index, blend_mode(mode))
            }
            PanelCommand::Reorder { index, direction } => {
                self.session.reorder_layer(index, reorder_direction(direction))
            }
            PanelCommand::ToggleVisibility { index } => self.session.toggle_layer_visibility(index),
            PanelCommand::SelectActive { index } => self.session.select_layer(index),
        };
        if changed {
            self.outbox.push(self.layers_changed());
        }
    }

    fn handle_paint(&mut self, command: PaintCommand) {
        debug!("Paint command: {:?}", command);
        match command {
            PaintCommand::SetBrushColor { color } => {
                if let Err(e) = self.session.set_color_hex(&color) {
                    warn!("Rejected brush color: {}", e);
                    self.outbox
                        .push(EngineToUi::error("invalid_color", e.to_string()));
                    return;
                }
            }
            PaintCommand::SetBrushSize { size } => {
                self.session.set_brush_size(size);
            }
            PaintCommand::SetBrushStyle { style } => self.session.set_brush_kind(brush_kind(style)),
            PaintCommand::SetEraser { enabled } => self.session.set_eraser(enabled),
            PaintCommand::ToggleEraser => {
                self.session.toggle_eraser();
            }
            PaintCommand::Undo => {
                if !self.session.undo() {
                    self.outbox.push(EngineToUi::UndoUnavailable);
                }
                return;
            }
            PaintCommand::ClearLayer => {
                self.session.clear_active_layer();
                return;
            }
            PaintCommand::AddSwatch { color } => {
                match Rgb::from_hex(&color) {
                    Ok(color) => {
                        if self.session.add_palette_color(color) {
                            self.outbox.push(self.palette_changed());
                        }
                    }
                    Err(e) => {
                        warn!("Rejected swatch: {}", e);
                        self.outbox
                            .push(EngineToUi::error("invalid_color", e.to_string()));
                    }
                }
                return;
            }
            PaintCommand::SelectSwatch { index } => {
                if !self.session.select_palette_color(index) {
                    return;
                }
                self.outbox.push(self.palette_changed());
            }
            PaintCommand::ResizeCanvas { width, height } => {
                if let Err(e) = self.session.resize_canvas(width, height) {
                    warn!("Rejected canvas resize: {}", e);
                    self.outbox
                        .push(EngineToUi::error("invalid_size", e.to_string()));
                }
                return;
            }
        }
        self.outbox.push(self.brush_changed());
    }

    /// Flush pending changes and announce the frame
    fn present(&mut self) {
        let size = self.session.flush().map(|frame| (frame.width, frame.height));
        if let Some((width, height)) = size {
            let dirty = self.session.take_dirty_region().map(dirty_rect);
            self.outbox.push(EngineToUi::FramePresented {
                width,
                height,
                dirty,
            });
        }
    }

    fn layers_changed(&self) -> EngineToUi {
        let layers = self.session.layers();
        EngineToUi::LayersChanged {
            layers: layers
                .iter()
                .map(|layer| LayerInfo {
                    id: layer.id,
                    name: layer.name.clone(),
                    opacity: layer.opacity,
                    blend_mode: layer_blend_mode(layer.blend_mode),
                    visible: layer.visible,
                })
                .collect(),
            active: layers.active_index(),
        }
    }

    fn palette_changed(&self) -> EngineToUi {
        let palette = self.session.palette();
        EngineToUi::PaletteChanged {
            swatches: palette.swatches().map(|c| c.to_hex()).collect(),
            selected: palette.selected().to_hex(),
        }
    }

    fn brush_changed(&self) -> EngineToUi {
        let brush = self.session.brush();
        EngineToUi::BrushChanged(BrushInfo {
            style: brush_style(brush.kind),
            size: brush.size,
            color: brush.color.to_hex(),
            eraser: brush.is_eraser,
            ready: brush.kind != BrushKind::Texture || self.session.brushes().texture_ready(),
        })
    }
}

fn pointer_event(event: InputEvent) -> PointerEvent {
    let kind = match event.kind {
        IpcPointerKind::Down => PointerKind::Down,
        IpcPointerKind::Move => PointerKind::Move,
        IpcPointerKind::Up => PointerKind::Up,
        IpcPointerKind::Cancel => PointerKind::Cancel,
    };
    PointerEvent::new(kind, event.x, event.y, event.pressure)
}

fn blend_mode(mode: LayerBlendMode) -> BlendMode {
    match mode {
        LayerBlendMode::Normal => BlendMode::Normal,
        LayerBlendMode::Multiply => BlendMode::Multiply,
        LayerBlendMode::Screen => BlendMode::Screen,
        LayerBlendMode::Overlay => BlendMode::Overlay,
        LayerBlendMode::Darken => BlendMode::Darken,
        LayerBlendMode::Lighten => BlendMode::Lighten,
        LayerBlendMode::ColorDodge => BlendMode::ColorDodge,
        LayerBlendMode::ColorBurn => BlendMode::ColorBurn,
    }
}

fn layer_blend_mode(mode: BlendMode) -> LayerBlendMode {
    match mode {
        BlendMode::Normal => LayerBlendMode::Normal,
        BlendMode::Multiply => LayerBlendMode::Multiply,
        BlendMode::Screen => LayerBlendMode::Screen,
        BlendMode::Overlay => LayerBlendMode::Overlay,
        BlendMode::Darken => LayerBlendMode::Darken,
        BlendMode::Lighten => LayerBlendMode::Lighten,
        BlendMode::ColorDodge => LayerBlendMode::ColorDodge,
        BlendMode::ColorBurn => LayerBlendMode::ColorBurn,
    }
}

fn brush_kind(style: BrushStyle) -> BrushKind {
    match style {
        BrushStyle::Basic => BrushKind::Basic,
        BrushStyle::Pencil => BrushKind::Pencil,
        BrushStyle::Spray => BrushKind::Spray,
        BrushStyle::Paper => BrushKind::Paper,
        BrushStyle::Texture => BrushKind::Texture,
    }
}

fn brush_style(kind: BrushKind) -> BrushStyle {
    match kind {
        BrushKind::Basic => BrushStyle::Basic,
        BrushKind::Pencil => BrushStyle::Pencil,
        BrushKind::Spray => BrushStyle::Spray,
        BrushKind::Paper => BrushStyle::Paper,
        BrushKind::Texture => BrushStyle::Texture,
    }
}

fn reorder_direction(direction: LayerDirection) -> ReorderDirection {
    match direction {
        LayerDirection::Up => ReorderDirection::Up,
        LayerDirection::Down => ReorderDirection::Down,
    }
}

fn dirty_rect(region: Region) -> DirtyRect {
    DirtyRect {
        x: region.x,
        y: region.y,
        width: region.width,
        height: region.height,
    }
}
