/// Mesh model, display flags and the drawing interface
use nalgebra::Point2;
use std::ops::{BitOr, BitOrAssign};

use crate::config::POINT_SIZE;
use crate::error::{GeometryError, RenderError};
use crate::geometry::{face_edges, Face, MeshData};
use crate::projection::Viewport;
use crate::transform::{apply_chain, Angles, Transform};
use crate::vector::{Vec2, Vec3};

/// Colors understood by every canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    White,
    Green,
    Yellow,
}

/// Where a text block is placed relative to a point
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Anchor {
    TopLeft(Point2<f64>),
    /// Text centered horizontally, its bottom edge on the point
    MidBottom(Point2<f64>),
}

/// Drawing surface the core renders into
///
/// The core never owns pixels; it only issues these calls with finite
/// canvas coordinates.
pub trait Canvas {
    fn viewport(&self) -> Viewport;
    fn draw_point(&mut self, position: Point2<f64>, color: Color);
    fn draw_line(&mut self, from: Point2<f64>, to: Point2<f64>, color: Color);
    fn draw_text(&mut self, content: &str, anchor: Anchor, color: Color);
}

/// Something that can render itself onto a canvas
pub trait Drawable {
    fn draw<C: Canvas>(&self, canvas: &mut C, flags: DisplayFlags) -> Result<(), RenderError>;
}

/// Render passes to run for a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DisplayFlags(u8);

impl DisplayFlags {
    pub const VERTEX: DisplayFlags = DisplayFlags(0b0001);
    pub const VERTEX_INDEX: DisplayFlags = DisplayFlags(0b0010);
    pub const WIRE: DisplayFlags = DisplayFlags(0b0100);
    pub const FACE: DisplayFlags = DisplayFlags(0b1000);

    pub const fn empty() -> Self {
        DisplayFlags(0)
    }

    pub const fn bits(&self) -> u8 {
        self.0
    }

    pub const fn contains(&self, other: DisplayFlags) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn intersects(&self, other: DisplayFlags) -> bool {
        self.0 & other.0 != 0
    }

    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

impl BitOr for DisplayFlags {
    type Output = DisplayFlags;
    fn bitor(self, rhs: DisplayFlags) -> DisplayFlags {
        DisplayFlags(self.0 | rhs.0)
    }
}

impl BitOrAssign for DisplayFlags {
    fn bitor_assign(&mut self, rhs: DisplayFlags) {
        self.0 |= rhs.0;
    }
}

/// A mesh together with its current placement
///
/// `position`, `scale` and `angle` are updated in place every frame;
/// `origin` pushes the mesh away from the camera plane.
#[derive(Debug, Clone)]
pub struct Model {
    vertices: Vec<Vec3>,
    faces: Vec<Face>,
    pub origin: Vec3,
    pub position: Vec3,
    pub scale: Vec3,
    pub angle: Angles,
}

impl Model {
    /// Build a model, checking every face index against the vertex list.
    pub fn new(data: MeshData, origin: Vec3) -> Result<Self, GeometryError> {
        if let Some((face, index)) = data.find_invalid_index() {
            return Err(GeometryError::FaceIndex {
                face,
                index,
                count: data.vertices.len(),
            });
        }

        Ok(Self {
            vertices: data.vertices,
            faces: data.faces,
            origin,
            position: Vec3::ZERO,
            scale: Vec3::ONE,
            angle: Angles::zero(),
        })
    }

    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    /// Rotate, then scale, then move to `position + origin`.
    pub fn transform_chain(&self) -> [Transform; 3] {
        [
            Transform::Rotate(self.angle),
            Transform::Scale(self.scale),
            Transform::Translate(self.position + self.origin),
        ]
    }

    /// Canvas position of a model-space vertex.
    pub fn project_vertex(&self, vertex: Vec3, viewport: &Viewport) -> Vec2 {
        viewport.project_to_canvas(apply_chain(vertex, &self.transform_chain()))
    }

    pub fn project_all(&self, viewport: &Viewport) -> Vec<Vec2> {
        let chain = self.transform_chain();
        self.vertices
            .iter()
            .map(|&v| viewport.project_to_canvas(apply_chain(v, &chain)))
            .collect()
    }

    pub fn is_identity(&self) -> bool {
        self.position == Vec3::ZERO && self.scale == Vec3::ONE && self.angle.is_zero()
    }

    /// Snap position, scale and angle back to the identity transform.
    pub fn reset_transform(&mut self) {
        self.position = Vec3::ZERO;
        self.scale = Vec3::ONE;
        self.angle = Angles::zero();
    }

    fn draw_points<C: Canvas>(&self, canvas: &mut C, projected: &[Vec2], flags: DisplayFlags) {
        for (i, p) in projected.iter().enumerate() {
            let Some(point) = p.to_point() else {
                continue;
            };

            if flags.contains(DisplayFlags::VERTEX) {
                canvas.draw_point(point, Color::Green);
            }
            if flags.contains(DisplayFlags::VERTEX_INDEX) {
                let label_at = Point2::new(point.x, point.y - POINT_SIZE / 2.0);
                canvas.draw_text(&i.to_string(), Anchor::MidBottom(label_at), Color::Green);
            }
        }
    }

    fn draw_wireframe<C: Canvas>(&self, canvas: &mut C, projected: &[Vec2]) {
        for face in &self.faces {
            for (a, b) in face_edges(face) {
                if let (Some(from), Some(to)) = (projected[a].to_point(), projected[b].to_point()) {
                    canvas.draw_line(from, to, Color::White);
                }
            }
        }
    }
}

impl Drawable for Model {
    /// Run the passes selected by `flags`.
    ///
    /// Face fill is not available and fails before anything is drawn.
    fn draw<C: Canvas>(&self, canvas: &mut C, flags: DisplayFlags) -> Result<(), RenderError> {
        if flags.contains(DisplayFlags::FACE) {
            return Err(RenderError::NotImplemented("face fill"));
        }

        let projected = self.project_all(&canvas.viewport());

        if flags.intersects(DisplayFlags::VERTEX | DisplayFlags::VERTEX_INDEX) {
            self.draw_points(canvas, &projected, flags);
        }
        if flags.contains(DisplayFlags::WIRE) {
            self.draw_wireframe(canvas, &projected);
        }

        Ok(())
    }
}
