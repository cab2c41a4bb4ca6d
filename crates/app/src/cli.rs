//! Command-line arguments
//!
//! Usage examples:
//!   gouache session.jsonl --output canvas.png
//!   gouache session.jsonl -o out.png --config paint.json --texture grain.png --seed 7
//!   gouache session.jsonl -o out.png --width 1024 --height 768 --emit-events

use std::path::PathBuf;

use clap::Parser;

/// Gouache headless painter.
///
/// Replays a script of UI messages (one JSON message per line) against a
/// painting session and writes the flattened canvas to a PNG.
#[derive(Parser, Debug)]
#[command(name = "gouache", about = "Gouache headless painter")]
pub struct CliArgs {
    /// Message script: one JSON `UiToEngine` message per line.
    /// Blank lines and lines starting with `#` are skipped.
    #[arg(value_name = "SCRIPT.jsonl")]
    pub script: PathBuf,

    /// Output PNG path.
    #[arg(short, long, value_name = "FILE", default_value = "painting.png")]
    pub output: PathBuf,

    /// Paint configuration file (JSON). Missing fields use defaults.
    #[arg(short, long, value_name = "CONFIG.json")]
    pub config: Option<PathBuf>,

    /// Image used by the texture brush.
    #[arg(short, long, value_name = "IMAGE")]
    pub texture: Option<PathBuf>,

    /// Seed for brush noise, for reproducible output.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Canvas width, overriding the configuration.
    #[arg(long)]
    pub width: Option<u32>,

    /// Canvas height, overriding the configuration.
    #[arg(long)]
    pub height: Option<u32>,

    /// Print engine notifications to stdout as JSON lines.
    #[arg(long)]
    pub emit_events: bool,

    /// Enable debug logging (RUST_LOG may then refine it).
    #[arg(long)]
    pub debug: bool,
}
