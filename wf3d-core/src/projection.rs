/// Perspective projection and canvas mapping
use crate::vector::{Vec2, Vec3};

/// Perspective divide onto the z = 1 plane.
///
/// A vertex on the camera plane (`z == 0`) has no screen position and
/// yields [`Vec2::AT_INFINITY`].
pub fn project(v: Vec3) -> Vec2 {
    if v.z == 0.0 {
        return Vec2::AT_INFINITY;
    }
    Vec2::new(v.x / v.z, v.y / v.z)
}

/// Map normalized coordinates in roughly `[-1, 1]` to pixels.
///
/// Screen y grows downward, so y is flipped.
pub fn to_canvas(p: Vec2, width: f64, height: f64) -> Vec2 {
    match p.coordinates() {
        Some((x, y)) => Vec2::new((x + 1.0) * width / 2.0, (1.0 - y) * height / 2.0),
        None => p,
    }
}

/// Inverse of [`to_canvas`].
pub fn from_canvas(p: Vec2, width: f64, height: f64) -> Vec2 {
    match p.coordinates() {
        Some((px, py)) => Vec2::new(px * 2.0 / width - 1.0, 1.0 - py * 2.0 / height),
        None => p,
    }
}

/// Pixel dimensions of the drawing surface
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width as f64,
            height: height as f64,
        }
    }

    pub fn to_canvas(&self, p: Vec2) -> Vec2 {
        to_canvas(p, self.width, self.height)
    }

    pub fn from_canvas(&self, p: Vec2) -> Vec2 {
        from_canvas(p, self.width, self.height)
    }

    /// Project a camera-space vertex straight to pixels.
    pub fn project_to_canvas(&self, v: Vec3) -> Vec2 {
        self.to_canvas(project(v))
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(crate::config::CANVAS_WIDTH, crate::config::CANVAS_HEIGHT)
    }
}
