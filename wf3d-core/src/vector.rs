/// 2D and 3D vector value types
///
/// `Vec2` carries the result of a perspective divide and can be "at
/// infinity" when the divide was undefined. Every operation on an
/// at-infinity vector yields an at-infinity vector, so no numeric value is
/// ever derived from a point without coordinates.
use nalgebra::{Point2, Vector3};
use std::fmt;
use std::ops::{Add, AddAssign, Index, IndexMut, Mul, Neg, Sub, SubAssign};

use crate::error::GeometryError;

/// A point in normalized or pixel screen space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vec2 {
    coords: Option<[f64; 2]>,
}

impl Vec2 {
    /// The point with no finite screen location.
    pub const AT_INFINITY: Vec2 = Vec2 { coords: None };

    pub const fn new(x: f64, y: f64) -> Self {
        Self {
            coords: Some([x, y]),
        }
    }

    pub fn x(&self) -> Option<f64> {
        self.coords.map(|c| c[0])
    }

    pub fn y(&self) -> Option<f64> {
        self.coords.map(|c| c[1])
    }

    pub fn is_at_infinity(&self) -> bool {
        self.coords.is_none()
    }

    pub fn coordinates(&self) -> Option<(f64, f64)> {
        self.coords.map(|[x, y]| (x, y))
    }

    /// Finite position for handing to a canvas.
    pub fn to_point(&self) -> Option<Point2<f64>> {
        self.coords.map(|[x, y]| Point2::new(x, y))
    }

    /// Component by position (0 = x, 1 = y). `None` when at infinity.
    pub fn get(&self, index: usize) -> Result<Option<f64>, GeometryError> {
        if index >= 2 {
            return Err(GeometryError::Index { index, len: 2 });
        }
        Ok(self.coords.map(|c| c[index]))
    }

    /// Set a component by position. Leaves an at-infinity vector unchanged.
    pub fn set(&mut self, index: usize, value: f64) -> Result<(), GeometryError> {
        if index >= 2 {
            return Err(GeometryError::Index { index, len: 2 });
        }
        if let Some(c) = self.coords.as_mut() {
            c[index] = value;
        }
        Ok(())
    }

    /// Add a component slice, which must hold exactly two values.
    pub fn try_add(self, other: &[f64]) -> Result<Self, GeometryError> {
        let [dx, dy] = <[f64; 2]>::try_from(other).map_err(|_| GeometryError::Shape {
            expected: 2,
            found: other.len(),
        })?;
        Ok(self + (dx, dy))
    }

    /// Subtract a component slice, which must hold exactly two values.
    pub fn try_sub(self, other: &[f64]) -> Result<Self, GeometryError> {
        let [dx, dy] = <[f64; 2]>::try_from(other).map_err(|_| GeometryError::Shape {
            expected: 2,
            found: other.len(),
        })?;
        Ok(self - (dx, dy))
    }

    pub fn scale_by(self, factor: f64) -> Self {
        self.map(|v| v * factor)
    }

    pub fn dot(&self, other: &Vec2) -> Option<f64> {
        match (self.coords, other.coords) {
            (Some(a), Some(b)) => Some(a[0] * b[0] + a[1] * b[1]),
            _ => None,
        }
    }

    fn map(self, f: impl Fn(f64) -> f64) -> Self {
        Self {
            coords: self.coords.map(|[x, y]| [f(x), f(y)]),
        }
    }

    fn zip(self, other: Vec2, f: impl Fn(f64, f64) -> f64) -> Self {
        match (self.coords, other.coords) {
            (Some(a), Some(b)) => Self::new(f(a[0], b[0]), f(a[1], b[1])),
            _ => Self::AT_INFINITY,
        }
    }
}

impl fmt::Display for Vec2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.coords {
            Some([x, y]) => write!(f, "Vec2({x}, {y})"),
            None => write!(f, "Vec2(Inf, Inf)"),
        }
    }
}

impl Add for Vec2 {
    type Output = Vec2;
    fn add(self, rhs: Vec2) -> Vec2 {
        self.zip(rhs, |a, b| a + b)
    }
}

impl Add<(f64, f64)> for Vec2 {
    type Output = Vec2;
    fn add(self, rhs: (f64, f64)) -> Vec2 {
        self + Vec2::new(rhs.0, rhs.1)
    }
}

impl Add<f64> for Vec2 {
    type Output = Vec2;
    fn add(self, rhs: f64) -> Vec2 {
        self.map(|v| v + rhs)
    }
}

impl Sub for Vec2 {
    type Output = Vec2;
    fn sub(self, rhs: Vec2) -> Vec2 {
        self.zip(rhs, |a, b| a - b)
    }
}

impl Sub<(f64, f64)> for Vec2 {
    type Output = Vec2;
    fn sub(self, rhs: (f64, f64)) -> Vec2 {
        self - Vec2::new(rhs.0, rhs.1)
    }
}

impl Sub<f64> for Vec2 {
    type Output = Vec2;
    fn sub(self, rhs: f64) -> Vec2 {
        self.map(|v| v - rhs)
    }
}

impl Mul for Vec2 {
    type Output = Vec2;
    fn mul(self, rhs: Vec2) -> Vec2 {
        self.zip(rhs, |a, b| a * b)
    }
}

impl Mul<f64> for Vec2 {
    type Output = Vec2;
    fn mul(self, rhs: f64) -> Vec2 {
        self.scale_by(rhs)
    }
}

impl Neg for Vec2 {
    type Output = Vec2;
    fn neg(self) -> Vec2 {
        self.map(|v| -v)
    }
}

/// A point or direction in model space
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3::new(0.0, 0.0, 0.0);
    pub const ONE: Vec3 = Vec3::new(1.0, 1.0, 1.0);

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub const fn splat(v: f64) -> Self {
        Self::new(v, v, v)
    }

    pub fn coordinates(&self) -> (f64, f64, f64) {
        (self.x, self.y, self.z)
    }

    pub fn get(&self, index: usize) -> Result<f64, GeometryError> {
        match index {
            0 => Ok(self.x),
            1 => Ok(self.y),
            2 => Ok(self.z),
            _ => Err(GeometryError::Index { index, len: 3 }),
        }
    }

    pub fn set(&mut self, index: usize, value: f64) -> Result<(), GeometryError> {
        match index {
            0 => self.x = value,
            1 => self.y = value,
            2 => self.z = value,
            _ => return Err(GeometryError::Index { index, len: 3 }),
        }
        Ok(())
    }

    /// Add a component slice, which must hold exactly three values.
    pub fn try_add(self, other: &[f64]) -> Result<Self, GeometryError> {
        Ok(self + Self::from_slice(other)?)
    }

    /// Subtract a component slice, which must hold exactly three values.
    pub fn try_sub(self, other: &[f64]) -> Result<Self, GeometryError> {
        Ok(self - Self::from_slice(other)?)
    }

    pub fn from_slice(values: &[f64]) -> Result<Self, GeometryError> {
        match *values {
            [x, y, z] => Ok(Self::new(x, y, z)),
            _ => Err(GeometryError::Shape {
                expected: 3,
                found: values.len(),
            }),
        }
    }

    /// Offset x and y by a screen-space delta, keeping depth.
    pub fn add_xy(self, delta: Vec2) -> Option<Self> {
        delta
            .coordinates()
            .map(|(dx, dy)| Self::new(self.x + dx, self.y + dy, self.z))
    }

    pub fn scale_by(self, factor: f64) -> Self {
        Self::new(self.x * factor, self.y * factor, self.z * factor)
    }

    pub fn dot(&self, other: &Vec3) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }
}

impl fmt::Display for Vec3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Vec3({}, {}, {})", self.x, self.y, self.z)
    }
}

impl From<[f64; 3]> for Vec3 {
    fn from([x, y, z]: [f64; 3]) -> Self {
        Self::new(x, y, z)
    }
}

impl From<(f64, f64, f64)> for Vec3 {
    fn from((x, y, z): (f64, f64, f64)) -> Self {
        Self::new(x, y, z)
    }
}

impl From<Vector3<f64>> for Vec3 {
    fn from(v: Vector3<f64>) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl From<Vec3> for Vector3<f64> {
    fn from(v: Vec3) -> Self {
        Vector3::new(v.x, v.y, v.z)
    }
}

impl Index<usize> for Vec3 {
    type Output = f64;
    fn index(&self, index: usize) -> &f64 {
        match index {
            0 => &self.x,
            1 => &self.y,
            2 => &self.z,
            _ => panic!("index {index} out of range for Vec3"),
        }
    }
}

impl IndexMut<usize> for Vec3 {
    fn index_mut(&mut self, index: usize) -> &mut f64 {
        match index {
            0 => &mut self.x,
            1 => &mut self.y,
            2 => &mut self.z,
            _ => panic!("index {index} out of range for Vec3"),
        }
    }
}

impl Add for Vec3 {
    type Output = Vec3;
    fn add(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Add<(f64, f64, f64)> for Vec3 {
    type Output = Vec3;
    fn add(self, rhs: (f64, f64, f64)) -> Vec3 {
        self + Vec3::from(rhs)
    }
}

impl Add<f64> for Vec3 {
    type Output = Vec3;
    fn add(self, rhs: f64) -> Vec3 {
        self + Vec3::splat(rhs)
    }
}

impl Sub for Vec3 {
    type Output = Vec3;
    fn sub(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Sub<(f64, f64, f64)> for Vec3 {
    type Output = Vec3;
    fn sub(self, rhs: (f64, f64, f64)) -> Vec3 {
        self - Vec3::from(rhs)
    }
}

impl Sub<f64> for Vec3 {
    type Output = Vec3;
    fn sub(self, rhs: f64) -> Vec3 {
        self - Vec3::splat(rhs)
    }
}

/// Elementwise product.
impl Mul for Vec3 {
    type Output = Vec3;
    fn mul(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x * rhs.x, self.y * rhs.y, self.z * rhs.z)
    }
}

impl Mul<f64> for Vec3 {
    type Output = Vec3;
    fn mul(self, rhs: f64) -> Vec3 {
        self.scale_by(rhs)
    }
}

impl Mul<Vec3> for f64 {
    type Output = Vec3;
    fn mul(self, rhs: Vec3) -> Vec3 {
        rhs.scale_by(self)
    }
}

impl Neg for Vec3 {
    type Output = Vec3;
    fn neg(self) -> Vec3 {
        Vec3::new(-self.x, -self.y, -self.z)
    }
}

impl AddAssign for Vec3 {
    fn add_assign(&mut self, rhs: Vec3) {
        *self = *self + rhs;
    }
}

impl SubAssign for Vec3 {
    fn sub_assign(&mut self, rhs: Vec3) {
        *self = *self - rhs;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec2_arithmetic() {
        let v = Vec2::new(1.0, 2.0);
        assert_eq!(v + Vec2::new(3.0, 4.0), Vec2::new(4.0, 6.0));
        assert_eq!(v + (1.0, 1.0), Vec2::new(2.0, 3.0));
        assert_eq!(v + 1.0, Vec2::new(2.0, 3.0));
        assert_eq!(v - 1.0, Vec2::new(0.0, 1.0));
        assert_eq!(v * 2.0, Vec2::new(2.0, 4.0));
        assert_eq!(v * Vec2::new(3.0, -1.0), Vec2::new(3.0, -2.0));
        assert_eq!(v.dot(&Vec2::new(3.0, 4.0)), Some(11.0));
    }

    #[test]
    fn test_at_infinity_is_absorbing() {
        let inf = Vec2::AT_INFINITY;
        assert!((inf + 1.0).is_at_infinity());
        assert!((inf + (1.0, 2.0)).is_at_infinity());
        assert!((inf * 3.0).is_at_infinity());
        assert!((-inf).is_at_infinity());
        assert!((Vec2::new(1.0, 1.0) + inf).is_at_infinity());
        assert_eq!(inf.dot(&Vec2::new(1.0, 1.0)), None);
        assert_eq!(inf.x(), None);
        assert_eq!(inf.to_string(), "Vec2(Inf, Inf)");
    }

    #[test]
    fn test_set_on_at_infinity_keeps_sentinel() {
        let mut inf = Vec2::AT_INFINITY;
        inf.set(0, 5.0).unwrap();
        assert!(inf.is_at_infinity());
        assert!(inf.set(2, 5.0).is_err());
    }

    #[test]
    fn test_slice_shape_mismatch() {
        let err = Vec2::new(0.0, 0.0).try_add(&[1.0, 2.0, 3.0]).unwrap_err();
        assert_eq!(err, GeometryError::Shape { expected: 2, found: 3 });

        let err = Vec3::ZERO.try_sub(&[1.0]).unwrap_err();
        assert_eq!(err, GeometryError::Shape { expected: 3, found: 1 });

        assert_eq!(
            Vec3::ZERO.try_add(&[1.0, 2.0, 3.0]).unwrap(),
            Vec3::new(1.0, 2.0, 3.0)
        );
    }

    #[test]
    fn test_vec3_indexing() {
        let mut v = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(v.get(2), Ok(3.0));
        assert_eq!(v.get(3), Err(GeometryError::Index { index: 3, len: 3 }));
        v.set(1, 7.0).unwrap();
        v[0] = 4.0;
        assert_eq!(v, Vec3::new(4.0, 7.0, 3.0));
        assert!(v.set(5, 0.0).is_err());
        assert!(Vec2::new(1.0, 2.0).get(2).is_err());
    }

    #[test]
    fn test_vec3_arithmetic() {
        let v = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(v * Vec3::new(2.0, 3.0, 4.0), Vec3::new(2.0, 6.0, 12.0));
        assert_eq!(2.0 * v, Vec3::new(2.0, 4.0, 6.0));
        assert_eq!(v - (1.0, 1.0, 1.0), Vec3::new(0.0, 1.0, 2.0));
        assert_eq!(v + 1.0, Vec3::new(2.0, 3.0, 4.0));
        assert_eq!(v.dot(&Vec3::new(1.0, 1.0, 1.0)), 6.0);
        assert_eq!(v.to_string(), "Vec3(1, 2, 3)");
    }

    #[test]
    fn test_vec3_plus_vec2_keeps_depth() {
        let v = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(v.add_xy(Vec2::new(0.5, -1.0)), Some(Vec3::new(1.5, 1.0, 3.0)));
        assert_eq!(v.add_xy(Vec2::AT_INFINITY), None);
    }

    #[test]
    fn test_nalgebra_conversion() {
        let v = Vec3::new(1.0, -2.0, 0.5);
        let n: Vector3<f64> = v.into();
        assert_eq!(Vec3::from(n), v);
    }
}
