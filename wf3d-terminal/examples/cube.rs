/// Example: Spin the built-in cube without a geometry file
///
/// Usage: cargo run --example cube

use anyhow::Result;
use wf3d_core::config::{ORIGIN_DEPTH, TARGET_FPS};
use wf3d_core::{DisplayFlags, MeshData, Model, ModelController, Vec3};
use wf3d_terminal::TerminalApp;

fn main() -> Result<()> {
    let cube = MeshData::cube(4.0);
    let model = Model::new(cube, Vec3::new(0.0, 0.0, ORIGIN_DEPTH))?;

    let flags = DisplayFlags::VERTEX | DisplayFlags::VERTEX_INDEX | DisplayFlags::WIRE;
    let mut app = TerminalApp::new(ModelController::new(model), flags, TARGET_FPS)?;
    app.run()
}
