/// Face areas from edge lengths.
///
/// Triangles are split by the altitude onto their middle side, with both
/// base angles found through the law of cosines. Larger polygons are broken
/// into triangles. Cosines can be rounded to a number of decimal digits
/// before `acos` to absorb floating point noise from chained computations.
use crate::config::AREA_PRECISION;
use crate::error::AreaError;

/// Rounding past this many digits cannot change an `f64`.
const MAX_ROUND_DIGITS: u32 = 15;

fn round_to(value: f64, digits: u32) -> f64 {
    if digits > MAX_ROUND_DIGITS {
        return value;
    }
    let factor = 10f64.powi(digits as i32);
    (value * factor).round() / factor
}

/// Angle between sides `a` and `b` opposite side `c`.
///
/// `None` when either adjacent side is zero.
fn base_angle(a: f64, b: f64, c: f64, precision: Option<u32>) -> Option<Result<f64, AreaError>> {
    if a == 0.0 || b == 0.0 {
        return None;
    }

    let mut cosine = (a * a + b * b - c * c) / (2.0 * a * b);
    if let Some(digits) = precision {
        cosine = round_to(cosine, digits);
    }

    if !(-1.0..=1.0).contains(&cosine) {
        return Some(Err(AreaError::Domain { a, b, c }));
    }
    Some(Ok(cosine.acos()))
}

/// Area of the triangle with sides `a`, `b` and `c`.
///
/// A zero-length side gives an area of `0`.
pub fn triangle_area(a: f64, b: f64, c: f64, precision: Option<u32>) -> Result<f64, AreaError> {
    let (theta_1, theta_2) = match (
        base_angle(a, b, c, precision),
        base_angle(c, b, a, precision),
    ) {
        (Some(t1), Some(t2)) => (t1?, t2?),
        _ => return Ok(0.0),
    };

    let area_1 = a * a * theta_1.cos() * theta_1.sin();
    let area_2 = c * c * theta_2.cos() * theta_2.sin();

    Ok((area_1 + area_2).abs() / 2.0)
}

/// Area of a quadrilateral split along one diagonal.
///
/// The shortest and longest sides are paired; when the positions of the
/// two remaining sides add up to an even number the sides are taken in the
/// given order instead. The diagonal is the hypotenuse of the first pair.
pub fn quadrilateral_area(
    a: f64,
    b: f64,
    c: f64,
    d: f64,
    precision: Option<u32>,
) -> Result<f64, AreaError> {
    let lengths = [a, b, c, d];
    let first_index = |value: f64, fallback: usize| {
        lengths
            .iter()
            .position(|&l| l == value)
            .unwrap_or(fallback)
    };

    let short = lengths.iter().copied().fold(f64::INFINITY, f64::min);
    let long = lengths.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let short_i = first_index(short, 0);
    // With all sides equal the longest side must still be a different one
    let long_i = (0..lengths.len())
        .find(|&i| i != short_i && lengths[i] == long)
        .unwrap_or(if short_i == 3 { 2 } else { 3 });

    let mut rest = (0..lengths.len()).filter(|&i| i != short_i && i != long_i);
    let (r1, r2) = match (rest.next(), rest.next()) {
        (Some(r1), Some(r2)) => (r1, r2),
        _ => return Err(AreaError::InvalidArgument("quadrilateral needs four sides")),
    };

    let (l1, l2) = (lengths[r1], lengths[r2]);
    let (l1_i, l2_i) = (first_index(l1, r1), first_index(l2, r2));

    let (l1, l2, l3, l4) = if (l1_i + l2_i) % 2 == 0 {
        (a, b, c, d)
    } else {
        (l1, l2, short, long)
    };

    let diagonal = (l1 * l1 + l2 * l2).sqrt();
    let area = triangle_area(l1, l2, diagonal, None)? + triangle_area(l3, l4, diagonal, None)?;

    Ok(match precision {
        Some(digits) => round_to(area, digits),
        None => area,
    })
}

/// Area of a polygon given its side lengths in order.
///
/// From five sides on, the first two sides are closed off by their
/// hypotenuse into a right triangle and the remainder is measured
/// recursively.
pub fn polygon_area(sides: &[f64]) -> Result<f64, AreaError> {
    match *sides {
        [] => Err(AreaError::InvalidArgument("side lengths are required")),
        [_] => Err(AreaError::InvalidArgument(
            "cannot determine the area of a single point",
        )),
        [_, _] => Err(AreaError::DegenerateShape("a line has no area")),
        [a, b, c] => triangle_area(a, b, c, Some(AREA_PRECISION)),
        [a, b, c, d] => quadrilateral_area(a, b, c, d, Some(AREA_PRECISION)),
        [a, b, ref rest @ ..] => {
            let mut remaining = Vec::with_capacity(rest.len() + 1);
            remaining.push((a * a + b * b).sqrt());
            remaining.extend_from_slice(rest);

            Ok(0.5 * a * b + polygon_area(&remaining)?)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_right_triangle() {
        let area = triangle_area(3.0, 4.0, 5.0, Some(10)).unwrap();
        assert!((area - 6.0).abs() < EPS);

        let area = triangle_area(3.0, 4.0, 5.0, None).unwrap();
        assert!((area - 6.0).abs() < EPS);
    }

    #[test]
    fn test_obtuse_triangle() {
        // Two unit sides at 120 degrees
        let area = triangle_area(1.0, 1.0, 3f64.sqrt(), Some(10)).unwrap();
        assert!((area - 0.5 * (120f64.to_radians()).sin()).abs() < EPS);
    }

    #[test]
    fn test_zero_side_is_zero_area() {
        assert_eq!(triangle_area(0.0, 4.0, 5.0, None), Ok(0.0));
        assert_eq!(triangle_area(3.0, 0.0, 5.0, Some(4)), Ok(0.0));
    }

    #[test]
    fn test_impossible_triangle() {
        let err = triangle_area(1.0, 1.0, 5.0, Some(10)).unwrap_err();
        assert!(matches!(err, AreaError::Domain { .. }));
    }

    #[test]
    fn test_rectangle() {
        let area = quadrilateral_area(3.0, 4.0, 3.0, 4.0, Some(10)).unwrap();
        assert!((area - 12.0).abs() < EPS);
    }

    #[test]
    fn test_square() {
        let area = quadrilateral_area(1.0, 1.0, 1.0, 1.0, Some(10)).unwrap();
        assert!((area - 1.0).abs() < EPS);
    }

    #[test]
    fn test_side_order_parity() {
        // odd index sum: shortest and longest sides are paired
        let area = quadrilateral_area(1.0, 2.0, 3.0, 4.0, Some(10)).unwrap();
        assert!((area - 4.7320508076).abs() < EPS);

        let area = quadrilateral_area(4.0, 1.0, 2.0, 3.0, Some(10)).unwrap();
        assert!((area - 4.7320508076).abs() < EPS);

        // even index sum: sides are used as given
        let area = quadrilateral_area(1.0, 2.0, 4.0, 3.0, Some(10)).unwrap();
        assert!((area - 4.3166247904).abs() < EPS);
    }

    #[test]
    fn test_large_precision_leaves_value_alone() {
        let area = triangle_area(3.0, 4.0, 5.0, Some(400)).unwrap();
        assert!((area - 6.0).abs() < EPS);
        assert_eq!(round_to(0.1234, 16), 0.1234);
        assert_eq!(round_to(0.1234, 2), 0.12);
    }

    #[test]
    fn test_polygon_argument_errors() {
        assert!(matches!(polygon_area(&[]), Err(AreaError::InvalidArgument(_))));
        assert!(matches!(polygon_area(&[1.0]), Err(AreaError::InvalidArgument(_))));
        assert!(matches!(
            polygon_area(&[1.0, 1.0]),
            Err(AreaError::DegenerateShape(_))
        ));
    }

    #[test]
    fn test_polygon_dispatch() {
        let tri = polygon_area(&[3.0, 4.0, 5.0]).unwrap();
        assert!((tri - 6.0).abs() < EPS);

        let quad = polygon_area(&[3.0, 4.0, 3.0, 4.0]).unwrap();
        assert!((quad - 12.0).abs() < EPS);
    }

    #[test]
    fn test_pentagon_fans_out() {
        // 3-4 right triangle, then a 5x5 square on its hypotenuse
        let area = polygon_area(&[3.0, 4.0, 5.0, 5.0, 5.0]).unwrap();
        assert!((area - 31.0).abs() < 1e-6);

        let area = polygon_area(&[1.0; 5]).unwrap();
        assert!((area - 1.6401194831).abs() < EPS);
    }
}
