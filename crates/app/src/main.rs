//! Gouache - headless painting driver
//!
//! Replays a message script against a painting session and writes the
//! flattened canvas to disk.

mod cli;
mod dispatch;
mod export;
mod logging;
mod script;

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use gouache_config::PaintConfig;
use painting::{PaintingSession, TextureSource};
use tracing::{error, info};

use cli::CliArgs;
use dispatch::Dispatcher;

fn main() -> ExitCode {
    let args = CliArgs::parse();
    logging::init(args.debug);

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: CliArgs) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => PaintConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => PaintConfig::default(),
    }
    .with_env_overrides();
    if let Some(width) = args.width {
        config.canvas_width = width;
    }
    if let Some(height) = args.height {
        config.canvas_height = height;
    }
    config.validate().context("Invalid paint configuration")?;

    let mut session = match args.seed {
        Some(seed) => PaintingSession::with_seed(config, seed),
        None => PaintingSession::new(config),
    };
    if let Some(path) = &args.texture {
        let texture = TextureSource::load(path)
            .with_context(|| format!("Failed to load texture {}", path.display()))?;
        session.set_texture(texture);
    }
    info!("Canvas {}x{}", session.width(), session.height());

    let lines = script::load_script(&args.script)?;
    info!("Replaying {} messages from {}", lines.len(), args.script.display());

    let mut dispatcher = Dispatcher::new(session);
    for line in lines {
        dispatcher.dispatch(line.message);
        let events = dispatcher.drain();
        if args.emit_events {
            for event in events {
                println!("{}", event.to_json()?);
            }
        }
    }

    let mut session = dispatcher.into_session();
    if session.is_stroking() {
        info!("Script ended mid-stroke; ending it");
        session.end_stroke();
    }
    export::write_frame(session.composite(), &args.output)
}
