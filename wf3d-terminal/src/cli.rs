/// Command line arguments
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::time::Duration;
use tracing::Level;
use wf3d_core::config::{ORIGIN_DEPTH, TARGET_FPS};
use wf3d_core::DisplayFlags;

use crate::input::HOLD_WINDOW;

/// Interactive wireframe viewer for OBJ meshes
#[derive(Debug, Parser)]
#[command(name = "wf3d", version, about)]
pub struct Args {
    /// Geometry file made of `v x y z` and `f i j k ...` lines
    pub path: String,

    /// Target frame rate
    #[arg(long, default_value_t = TARGET_FPS, value_parser = parse_fps)]
    pub fps: f64,

    /// Distance between the camera plane and the model's origin
    #[arg(long, default_value_t = ORIGIN_DEPTH)]
    pub depth: f64,

    /// Render passes, comma separated
    #[arg(
        long,
        value_enum,
        value_delimiter = ',',
        default_values_t = [DisplayPass::Vertex, DisplayPass::Index, DisplayPass::Wire]
    )]
    pub display: Vec<DisplayPass>,

    /// Milliseconds a key stays held after its last press or repeat, used
    /// when the terminal does not report key releases
    #[arg(long, default_value_t = HOLD_WINDOW.as_millis() as u64)]
    pub hold_ms: u64,

    /// Write logs to this file
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Maximum log level written to the log file
    #[arg(long, default_value_t = Level::INFO)]
    pub log_level: Level,
}

/// One render pass selectable from the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DisplayPass {
    Vertex,
    Index,
    Wire,
    Face,
}

impl From<DisplayPass> for DisplayFlags {
    fn from(pass: DisplayPass) -> Self {
        match pass {
            DisplayPass::Vertex => DisplayFlags::VERTEX,
            DisplayPass::Index => DisplayFlags::VERTEX_INDEX,
            DisplayPass::Wire => DisplayFlags::WIRE,
            DisplayPass::Face => DisplayFlags::FACE,
        }
    }
}

impl Args {
    /// The geometry path with surrounding quotes removed.
    pub fn geometry_path(&self) -> PathBuf {
        PathBuf::from(trim_quotes(&self.path))
    }

    pub fn hold_window(&self) -> Duration {
        Duration::from_millis(self.hold_ms)
    }

    pub fn display_flags(&self) -> DisplayFlags {
        self.display
            .iter()
            .fold(DisplayFlags::empty(), |flags, &pass| flags | pass.into())
    }
}

fn trim_quotes(raw: &str) -> &str {
    raw.trim().trim_matches(|c| c == '"' || c == '\'')
}

fn parse_fps(raw: &str) -> Result<f64, String> {
    let fps: f64 = raw.parse().map_err(|_| format!("`{raw}` is not a number"))?;
    if fps.is_finite() && fps > 0.0 {
        Ok(fps)
    } else {
        Err("frame rate must be a positive number".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["wf3d", "cube.obj"]).unwrap();
        assert_eq!(args.geometry_path(), PathBuf::from("cube.obj"));
        assert_eq!(args.fps, TARGET_FPS);
        assert_eq!(args.depth, ORIGIN_DEPTH);
        assert_eq!(
            args.display_flags(),
            DisplayFlags::VERTEX | DisplayFlags::VERTEX_INDEX | DisplayFlags::WIRE
        );
        assert!(args.log_file.is_none());
        assert_eq!(args.hold_window(), HOLD_WINDOW);
    }

    #[test]
    fn test_hold_window_option() {
        let args = Args::try_parse_from(["wf3d", "a.obj", "--hold-ms", "300"]).unwrap();
        assert_eq!(args.hold_window(), Duration::from_millis(300));
    }

    #[test]
    fn test_quotes_are_trimmed() {
        let args = Args::try_parse_from(["wf3d", "\"my models/cube.obj\""]).unwrap();
        assert_eq!(args.geometry_path(), PathBuf::from("my models/cube.obj"));

        let args = Args::try_parse_from(["wf3d", "'cube.obj'"]).unwrap();
        assert_eq!(args.geometry_path(), PathBuf::from("cube.obj"));
    }

    #[test]
    fn test_path_is_required() {
        assert!(Args::try_parse_from(["wf3d"]).is_err());
    }

    #[test]
    fn test_extra_arguments_rejected() {
        assert!(Args::try_parse_from(["wf3d", "a.obj", "b.obj"]).is_err());
    }

    #[test]
    fn test_display_list() {
        let args = Args::try_parse_from(["wf3d", "a.obj", "--display", "wire,face"]).unwrap();
        assert_eq!(args.display_flags(), DisplayFlags::WIRE | DisplayFlags::FACE);
    }

    #[test]
    fn test_fps_must_be_positive() {
        assert!(Args::try_parse_from(["wf3d", "a.obj", "--fps", "0"]).is_err());
        assert!(Args::try_parse_from(["wf3d", "a.obj", "--fps", "fast"]).is_err());
        let args = Args::try_parse_from(["wf3d", "a.obj", "--fps", "30"]).unwrap();
        assert_eq!(args.fps, 30.0);
    }
}
