/// WF3D Core Library - Wireframe transform and projection pipeline
///
/// This library holds everything a front end needs to show a mesh as a
/// wireframe: vector types, the rotate/scale/translate operators, the
/// perspective projection, OBJ loading, the keyboard controller and the
/// drawing interface. Drawing surfaces and input devices live elsewhere.

pub mod area;
pub mod config;
pub mod controller;
pub mod error;
pub mod geometry;
pub mod model;
pub mod obj;
pub mod projection;
pub mod transform;
pub mod vector;

// Re-export commonly used types
pub use controller::{Action, ControllerSettings, InputState, ModelController, ResetState, Updatable};
pub use error::{AreaError, Error, GeometryError, ObjError, RenderError, Result};
pub use geometry::{Face, MeshData};
pub use model::{Anchor, Canvas, Color, DisplayFlags, Drawable, Model};
pub use projection::{project, to_canvas, Viewport};
pub use transform::{apply_chain, rotate, scale, translate, Angles, Transform};
pub use vector::{Vec2, Vec3};
