/// Rotation angles and the translate / scale / rotate operators
use nalgebra::{Rotation2, Vector2};

use crate::vector::Vec3;

/// Rotation angles in degrees, one per coordinate plane
///
/// Angles are kept in `[0, 360)` by [`Angles::wrap`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Angles {
    pub xy: f64,
    pub xz: f64,
    pub yz: f64,
}

impl Angles {
    pub const fn new(xy: f64, xz: f64, yz: f64) -> Self {
        Self { xy, xz, yz }
    }

    pub const fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    /// Rotate by delta amounts (in degrees)
    pub fn rotate(&mut self, dxy: f64, dxz: f64, dyz: f64) {
        self.xy += dxy;
        self.xz += dxz;
        self.yz += dyz;
    }

    /// Bring every angle back into `[0, 360)`.
    pub fn wrap(&mut self) {
        self.xy = wrap_degrees(self.xy);
        self.xz = wrap_degrees(self.xz);
        self.yz = wrap_degrees(self.yz);
    }

    pub fn is_zero(&self) -> bool {
        self.xy == 0.0 && self.xz == 0.0 && self.yz == 0.0
    }
}

impl std::ops::Mul<f64> for Angles {
    type Output = Angles;
    fn mul(self, rhs: f64) -> Angles {
        Angles::new(self.xy * rhs, self.xz * rhs, self.yz * rhs)
    }
}

impl std::ops::SubAssign for Angles {
    fn sub_assign(&mut self, rhs: Angles) {
        self.rotate(-rhs.xy, -rhs.xz, -rhs.yz);
    }
}

fn wrap_degrees(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid rounds tiny negative inputs up to exactly 360
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Rotate the pair `(a, b)` counter-clockwise by `degrees`.
fn rotate_plane(a: f64, b: f64, degrees: f64) -> (f64, f64) {
    let rotated = Rotation2::new(degrees.to_radians()) * Vector2::new(a, b);
    (rotated.x, rotated.y)
}

pub fn translate(vertex: Vec3, offset: Vec3) -> Vec3 {
    vertex + offset
}

pub fn scale(vertex: Vec3, factors: Vec3) -> Vec3 {
    vertex * factors
}

/// Rotate through the xy, then xz, then yz planes.
///
/// The three planar rotations are applied in sequence and do not commute;
/// the yz step turns y towards z, the opposite sense of the first two.
pub fn rotate(vertex: Vec3, angles: Angles) -> Vec3 {
    let (x1, y1) = rotate_plane(vertex.x, vertex.y, angles.xy);
    let z1 = vertex.z;

    let (x2, z2) = rotate_plane(x1, z1, angles.xz);
    let y2 = y1;

    let (y3, z3) = rotate_plane(y2, z2, -angles.yz);

    Vec3::new(x2, y3, z3)
}

/// One step of a vertex transform chain
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Transform {
    Translate(Vec3),
    Scale(Vec3),
    Rotate(Angles),
}

impl Transform {
    pub fn apply(&self, vertex: Vec3) -> Vec3 {
        match *self {
            Transform::Translate(offset) => translate(vertex, offset),
            Transform::Scale(factors) => scale(vertex, factors),
            Transform::Rotate(angles) => rotate(vertex, angles),
        }
    }
}

/// Fold a vertex through the transforms, left to right.
pub fn apply_chain<'a>(vertex: Vec3, chain: impl IntoIterator<Item = &'a Transform>) -> Vec3 {
    chain.into_iter().fold(vertex, |v, t| t.apply(v))
}
