//! Message scripts: one JSON `UiToEngine` message per line

use std::path::Path;

use anyhow::{Context, Result};
use gouache_ipc::UiToEngine;

/// A parsed message with its 1-based source line
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptLine {
    pub line: usize,
    pub message: UiToEngine,
}

/// Parse a script, skipping blank lines and `#` comments
pub fn parse_script(text: &str) -> Result<Vec<ScriptLine>> {
    text.lines()
        .enumerate()
        .filter(|(_, l)| {
            let l = l.trim();
            !l.is_empty() && !l.starts_with('#')
        })
        .map(|(i, l)| {
            let message = UiToEngine::from_json(l).with_context(|| format!("line {}", i + 1))?;
            Ok(ScriptLine {
                line: i + 1,
                message,
            })
        })
        .collect()
}

pub fn load_script(path: &Path) -> Result<Vec<ScriptLine>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read script {}", path.display()))?;
    parse_script(&text).with_context(|| format!("Invalid script {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use gouache_ipc::{InputEvent, PointerKind};

    #[test]
    fn test_parse_skips_comments_and_blanks() {
        let text = r#"
# warm-up stroke
{"type":"Input","data":{"kind":"down","x":1,"y":2}}

{"type":"Frame"}
"#;
        let lines = parse_script(text).unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].line, 3);
        assert_eq!(
            lines[0].message,
            UiToEngine::Input(InputEvent {
                kind: PointerKind::Down,
                x: 1.0,
                y: 2.0,
                pressure: None,
            })
        );
        assert_eq!(lines[1].line, 5);
        assert_eq!(lines[1].message, UiToEngine::Frame);
    }

    #[test]
    fn test_error_names_the_line() {
        let text = "{\"type\":\"Frame\"}\n{\"type\":\"Frame\"}\nnot json\n";
        let err = parse_script(text).unwrap_err();
        assert!(format!("{err:#}").contains("line 3"), "{err:#}");
    }
}
