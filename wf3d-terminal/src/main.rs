/// WF3D - interactive wireframe viewer
///
/// Usage: wf3d <PATH> [--fps N] [--depth D] [--display vertex,index,wire] [--hold-ms MS]
/// Controls:
///   - Arrows / PageUp / PageDown: Move
///   - Q Z / D A / W S: Rotate in the xy, xz and yz planes
///   - L J / Home End / I K: Scale x, y and z
///   - R: Reset to the identity transform
///   - ESC: Quit

use anyhow::{Context, Result};
use clap::Parser;
use std::fs::File;
use std::path::Path;
use std::sync::Mutex;
use tracing::{info, Level};
use wf3d_core::{obj, Model, ModelController, Vec3};
use wf3d_terminal::cli::Args;
use wf3d_terminal::TerminalApp;

fn init_logging(path: &Path, level: Level) -> Result<()> {
    let logfile = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .event_format(
            tracing_subscriber::fmt::format()
                .with_target(false)
                .with_file(true)
                .with_line_number(true),
        )
        .with_ansi(false)
        .with_max_level(level)
        .with_writer(Mutex::new(logfile))
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    if let Some(log_file) = &args.log_file {
        init_logging(log_file, args.log_level)?;
    }

    let path = args.geometry_path();
    let data = obj::load_obj(&path)?;
    let model = Model::new(data, Vec3::new(0.0, 0.0, args.depth))
        .with_context(|| format!("invalid mesh in {}", path.display()))?;
    info!(
        path = %path.display(),
        vertices = model.vertices().len(),
        faces = model.faces().len(),
        "mesh loaded"
    );

    let mut app = TerminalApp::new(ModelController::new(model), args.display_flags(), args.fps)?
        .hold_window(args.hold_window());
    app.run()
}
