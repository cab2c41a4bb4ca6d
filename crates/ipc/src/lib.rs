//! IPC message protocol for Gouache
//!
//! Defines the messages exchanged between the painting engine and its UI.
//! Every message is JSON; the envelopes are adjacently tagged
//! (`{"type": ..., "data": ...}`).

mod commands;
mod error;
mod input;
mod messages;
mod types;

pub use commands::*;
pub use error::IpcError;
pub use input::*;
pub use messages::*;
pub use types::*;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_message_roundtrip() {
        let json = r#"{"type":"Input","data":{"kind":"down","x":12.5,"y":4.0,"pressure":0.75}}"#;
        let msg = UiToEngine::from_json(json).unwrap();
        assert_eq!(
            msg,
            UiToEngine::Input(InputEvent {
                kind: PointerKind::Down,
                x: 12.5,
                y: 4.0,
                pressure: Some(0.75),
            })
        );
        assert_eq!(msg.to_json().unwrap(), json);
    }

    #[test]
    fn test_missing_pressure_is_none() {
        let msg = UiToEngine::from_json(r#"{"type":"Input","data":{"kind":"move","x":1,"y":2}}"#)
            .unwrap();
        let UiToEngine::Input(event) = msg else {
            panic!("expected input");
        };
        assert_eq!(event.pressure, None);
        assert!(!UiToEngine::Input(event).to_json().unwrap().contains("pressure"));
    }

    #[test]
    fn test_panel_command_shape() {
        let msg = UiToEngine::from_json(
            r#"{"type":"PanelCommand","data":{"SetBlendMode":{"index":1,"mode":"color_dodge"}}}"#,
        )
        .unwrap();
        assert_eq!(
            msg,
            UiToEngine::PanelCommand(PanelCommand::SetBlendMode {
                index: 1,
                mode: LayerBlendMode::ColorDodge,
            })
        );

        let msg = UiToEngine::from_json(r#"{"type":"PanelCommand","data":"AddLayer"}"#).unwrap();
        assert_eq!(msg, UiToEngine::PanelCommand(PanelCommand::AddLayer));
    }

    #[test]
    fn test_paint_command_shape() {
        let msg = UiToEngine::from_json(
            r##"{"type":"PaintCommand","data":{"SetBrushColor":{"color":"#ff0000"}}}"##,
        )
        .unwrap();
        assert_eq!(
            msg,
            UiToEngine::PaintCommand(PaintCommand::SetBrushColor {
                color: "#ff0000".to_string()
            })
        );

        let msg = UiToEngine::from_json(r#"{"type":"Frame"}"#).unwrap();
        assert_eq!(msg, UiToEngine::Frame);
    }

    #[test]
    fn test_invalid_messages() {
        assert!(matches!(
            UiToEngine::from_json("   "),
            Err(IpcError::InvalidFormat(_))
        ));
        assert!(matches!(
            UiToEngine::from_json(r#"{"type":"Teleport"}"#),
            Err(IpcError::Json(_))
        ));
    }

    #[test]
    fn test_engine_message_roundtrip() {
        let msg = EngineToUi::LayersChanged {
            layers: vec![LayerInfo {
                id: 0,
                name: "Background".to_string(),
                opacity: 1.0,
                blend_mode: LayerBlendMode::Normal,
                visible: true,
            }],
            active: 0,
        };
        let json = msg.to_json().unwrap();
        assert!(json.starts_with(r#"{"type":"LayersChanged""#));
        assert_eq!(EngineToUi::from_json(&json).unwrap(), msg);

        let json = EngineToUi::UndoUnavailable.to_json().unwrap();
        assert_eq!(json, r#"{"type":"UndoUnavailable"}"#);
    }

    #[test]
    fn test_palette_messages() {
        let msg = UiToEngine::from_json(
            r#"{"type":"PaintCommand","data":{"SelectSwatch":{"index":3}}}"#,
        )
        .unwrap();
        assert_eq!(msg, UiToEngine::PaintCommand(PaintCommand::SelectSwatch { index: 3 }));

        let msg = EngineToUi::PaletteChanged {
            swatches: vec!["#000000".to_string()],
            selected: "#000000".to_string(),
        };
        let json = msg.to_json().unwrap();
        assert!(json.starts_with(r##"{"type":"PaletteChanged","data":{"swatches":["#000000"]"##));
        assert_eq!(EngineToUi::from_json(&json).unwrap(), msg);
    }
}
