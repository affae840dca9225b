//! Uniform Catmull-Rom spline evaluation.
//!
//! A Catmull-Rom segment interpolates between its two inner control
//! points `p1` and `p2`, using the outer points `p0` and `p3` to shape
//! the tangents. The curve passes through `p1` at `t = 0` and through
//! `p2` at `t = 1`.

use nalgebra::{Point3, Vector3};

/// Evaluate a uniform Catmull-Rom segment at parameter `t`.
///
/// The segment runs from `p1` (at `t = 0`) to `p2` (at `t = 1`); `p0`
/// and `p3` are the neighbouring control points that determine the
/// tangents at the segment ends. `t` is not clamped.
///
/// # Example
///
/// ```
/// use nalgebra::Point3;
/// use spline_path::catmull_rom;
///
/// let p0 = Point3::new(0.0, 0.0, 0.0);
/// let p1 = Point3::new(1.0, 0.0, 0.0);
/// let p2 = Point3::new(2.0, 0.0, 0.0);
/// let p3 = Point3::new(3.0, 0.0, 0.0);
///
/// let start = catmull_rom(0.0, p0, p1, p2, p3);
/// assert!((start - p1).norm() < 1e-6);
///
/// let end = catmull_rom(1.0, p0, p1, p2, p3);
/// assert!((end - p2).norm() < 1e-6);
/// ```
#[must_use]
pub fn catmull_rom(
    t: f32,
    p0: Point3<f32>,
    p1: Point3<f32>,
    p2: Point3<f32>,
    p3: Point3<f32>,
) -> Point3<f32> {
    let (p0, p1, p2, p3) = (p0.coords, p1.coords, p2.coords, p3.coords);

    let a = 2.0 * p1;
    let b = p2 - p0;
    let c = 2.0 * p0 - 5.0 * p1 + 4.0 * p2 - p3;
    let d = -p0 + 3.0 * p1 - 3.0 * p2 + p3;

    Point3::from(0.5 * (a + b * t + c * (t * t) + d * (t * t * t)))
}

/// Tolerance-scaled floating point comparison.
///
/// Treats two values as equal when their difference is negligible
/// relative to their magnitudes, with an absolute floor for values
/// near zero.
#[must_use]
pub(crate) fn approximately(a: f32, b: f32) -> bool {
    (a - b).abs() < f32::max(1.0e-6 * f32::max(a.abs(), b.abs()), f32::EPSILON * 8.0)
}

/// Normalize a vector, or return zero when it is too short to carry a
/// meaningful direction.
#[must_use]
pub(crate) fn normalize_or_zero(v: Vector3<f32>) -> Vector3<f32> {
    let norm = v.norm();
    if norm > f32::EPSILON {
        v / norm
    } else {
        Vector3::zeros()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn collinear() -> [Point3<f32>; 4] {
        [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
            Point3::new(3.0, 0.0, 0.0),
        ]
    }

    #[test]
    fn test_interpolates_inner_points() {
        let p0 = Point3::new(-1.0, 2.0, 0.5);
        let p1 = Point3::new(0.0, 1.0, -1.0);
        let p2 = Point3::new(3.0, -2.0, 2.0);
        let p3 = Point3::new(4.0, 0.0, 1.0);

        assert_relative_eq!(catmull_rom(0.0, p0, p1, p2, p3), p1, epsilon = 1e-6);
        assert_relative_eq!(catmull_rom(1.0, p0, p1, p2, p3), p2, epsilon = 1e-6);
    }

    #[test]
    fn test_reproduces_straight_lines() {
        let [p0, p1, p2, p3] = collinear();
        for i in 0..=10 {
            let t = i as f32 / 10.0;
            let expected = Point3::new(1.0 + t, 0.0, 0.0);
            assert_relative_eq!(catmull_rom(t, p0, p1, p2, p3), expected, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_midpoint_of_symmetric_arrangement() {
        // Symmetric control points put the midpoint on the axis of symmetry.
        let p0 = Point3::new(-2.0, 0.0, 0.0);
        let p1 = Point3::new(-1.0, 1.0, 0.0);
        let p2 = Point3::new(1.0, 1.0, 0.0);
        let p3 = Point3::new(2.0, 0.0, 0.0);

        let mid = catmull_rom(0.5, p0, p1, p2, p3);
        assert_relative_eq!(mid.x, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_approximately() {
        assert!(approximately(1.0, 1.0));
        assert!(approximately(0.0, 0.0));
        assert!(approximately(1_000_000.0, 1_000_000.5));
        assert!(!approximately(1.0, 1.001));
        assert!(!approximately(0.0, 0.001));
    }

    #[test]
    fn test_normalize_or_zero() {
        let v = normalize_or_zero(Vector3::new(3.0, 0.0, 4.0));
        assert_relative_eq!(v.norm(), 1.0, epsilon = 1e-6);

        let z = normalize_or_zero(Vector3::zeros());
        assert_eq!(z, Vector3::zeros());
    }
}
