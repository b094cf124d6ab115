/// wavegl Terminal Demo - Animated sine-wave mesh
///
/// Renders the wave as a point cloud in the terminal.
/// Controls:
///   - Left drag: Pan
///   - Right drag: Orbit
///   - Mouse wheel: Move closer / further
///   - T: Toggle accelerator / host vertex generation
///   - Q/ESC: Quit

use clap::Parser;
use std::fs;
use std::io;
use std::path::Path;
use wavegl_core::{FrameDriver, TransformState, ViewSession, ViewportState};
use wavegl_terminal::{Args, TerminalApp};

fn load_state(path: &Path) -> io::Result<TransformState> {
    let data = fs::read_to_string(path).map_err(|e| {
        io::Error::new(e.kind(), format!("Failed to read state file {}: {}", path.display(), e))
    })?;
    serde_json::from_str(&data).map_err(|e| {
        io::Error::new(io::ErrorKind::InvalidData, format!("Failed to parse state: {}", e))
    })
}

fn save_state(path: &Path, state: &TransformState) -> io::Result<()> {
    let json = serde_json::to_string_pretty(state)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    fs::write(path, json)
}

fn main() -> io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();

    let transform = match &args.state {
        Some(path) => load_state(path)?,
        None => TransformState::default(),
    };
    let session = ViewSession::new(transform, ViewportState::default());
    let driver = FrameDriver::new(session, args.resolution(), args.strategy.into());

    let mut app = TerminalApp::new(driver, args.fps)?;
    app.run()?;

    if let Some(path) = &args.save_state {
        save_state(path, app.driver().session().transform())?;
        println!("Saved view to {}", path.display());
    }

    Ok(())
}
