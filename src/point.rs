//! Control points and query samples.

use nalgebra::{Point3, UnitQuaternion, Vector3};

/// An oriented control point on a path.
///
/// Carries a position and a rotation. Rotations are interpolated
/// alongside positions when the path is sampled, so a point's rotation
/// influences the orientation of every sample on its adjacent
/// segments.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathPoint {
    /// Position of the control point.
    pub position: Point3<f32>,
    /// Orientation carried by the control point.
    pub rotation: UnitQuaternion<f32>,
}

impl PathPoint {
    /// Create a control point from a position and a rotation.
    #[must_use]
    pub fn new(position: Point3<f32>, rotation: UnitQuaternion<f32>) -> Self {
        Self { position, rotation }
    }

    /// Create a control point at `position` with identity rotation.
    #[must_use]
    pub fn from_position(position: Point3<f32>) -> Self {
        Self::new(position, UnitQuaternion::identity())
    }

    /// Create a control point from coordinates, with identity rotation.
    #[must_use]
    pub fn from_coords(x: f32, y: f32, z: f32) -> Self {
        Self::from_position(Point3::new(x, y, z))
    }
}

impl Default for PathPoint {
    fn default() -> Self {
        Self::from_position(Point3::origin())
    }
}

/// The result of sampling a path: an interpolated pose plus the travel
/// direction at the sampled location.
///
/// `direction` is a unit vector except at degenerate locations (a
/// single-point path, or coincident control points), where it is zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathSample {
    /// Interpolated position.
    pub position: Point3<f32>,
    /// Interpolated rotation.
    pub rotation: UnitQuaternion<f32>,
    /// Direction of travel along the path at the sample.
    pub direction: Vector3<f32>,
}

impl PathSample {
    /// Create a sample from its parts.
    #[must_use]
    pub fn new(
        position: Point3<f32>,
        rotation: UnitQuaternion<f32>,
        direction: Vector3<f32>,
    ) -> Self {
        Self {
            position,
            rotation,
            direction,
        }
    }

    /// Create a sample at a control point with a known direction.
    #[must_use]
    pub fn from_point(point: PathPoint, direction: Vector3<f32>) -> Self {
        Self::new(point.position, point.rotation, direction)
    }

    /// The pose of this sample, without the direction.
    #[must_use]
    pub fn point(&self) -> PathPoint {
        PathPoint::new(self.position, self.rotation)
    }
}

/// Spherical interpolation that tolerates antipodal rotations.
///
/// `UnitQuaternion::slerp` panics when the rotations are exact
/// opposites; here the nearer endpoint is returned instead, since any
/// interpolation axis would be arbitrary.
#[must_use]
pub(crate) fn slerp(
    a: &UnitQuaternion<f32>,
    b: &UnitQuaternion<f32>,
    t: f32,
) -> UnitQuaternion<f32> {
    a.try_slerp(b, t, 1.0e-9)
        .unwrap_or_else(|| if t < 0.5 { *a } else { *b })
}
