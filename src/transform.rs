//! The pivot transform separating path-local and world coordinates.

use nalgebra::{Point3, UnitQuaternion, Vector3};

use crate::point::{PathPoint, PathSample};

/// Coordinate space in which positions and rotations are expressed at
/// an API boundary.
///
/// Control points are stored pivot-local; `World` inputs are converted
/// on the way in and `World` outputs on the way out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Space {
    /// Pivot-local coordinates, as stored.
    #[default]
    Local,
    /// World coordinates, transformed through the path's pivot.
    World,
}

/// A rigid transform placing a path in the world.
///
/// Rotation is applied before translation, matching the usual
/// local-to-world convention.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pivot {
    /// Rotation component.
    pub rotation: UnitQuaternion<f32>,
    /// Translation component.
    pub translation: Vector3<f32>,
}

impl Pivot {
    /// Create a pivot from a rotation and a translation.
    #[must_use]
    pub fn new(rotation: UnitQuaternion<f32>, translation: Vector3<f32>) -> Self {
        Self {
            rotation,
            translation,
        }
    }

    /// The identity pivot: local and world coordinates coincide.
    #[must_use]
    pub fn identity() -> Self {
        Self::new(UnitQuaternion::identity(), Vector3::zeros())
    }

    /// Transform a local position into world coordinates.
    #[must_use]
    pub fn transform_point(&self, point: &Point3<f32>) -> Point3<f32> {
        self.rotation * point + self.translation
    }

    /// Transform a world position into local coordinates.
    #[must_use]
    pub fn inverse_transform_point(&self, point: &Point3<f32>) -> Point3<f32> {
        self.rotation
            .inverse_transform_point(&(point - self.translation))
    }

    /// Rotate a local vector into world coordinates.
    #[must_use]
    pub fn transform_vector(&self, vector: &Vector3<f32>) -> Vector3<f32> {
        self.rotation * vector
    }

    /// Rotate a world vector into local coordinates.
    #[must_use]
    pub fn inverse_transform_vector(&self, vector: &Vector3<f32>) -> Vector3<f32> {
        self.rotation.inverse_transform_vector(vector)
    }

    /// Compose a local rotation with the pivot rotation.
    #[must_use]
    pub fn transform_rotation(&self, rotation: &UnitQuaternion<f32>) -> UnitQuaternion<f32> {
        self.rotation * rotation
    }

    /// Remove the pivot rotation from a world rotation.
    #[must_use]
    pub fn inverse_transform_rotation(
        &self,
        rotation: &UnitQuaternion<f32>,
    ) -> UnitQuaternion<f32> {
        self.rotation.inverse() * rotation
    }

    /// Transform a whole control point into world coordinates.
    #[must_use]
    pub fn point_to_world(&self, point: PathPoint) -> PathPoint {
        PathPoint::new(
            self.transform_point(&point.position),
            self.transform_rotation(&point.rotation),
        )
    }

    /// Transform a whole control point into local coordinates.
    #[must_use]
    pub fn point_to_local(&self, point: PathPoint) -> PathPoint {
        PathPoint::new(
            self.inverse_transform_point(&point.position),
            self.inverse_transform_rotation(&point.rotation),
        )
    }

    /// Transform a sample, including its direction, into world
    /// coordinates.
    #[must_use]
    pub fn sample_to_world(&self, sample: PathSample) -> PathSample {
        PathSample::new(
            self.transform_point(&sample.position),
            self.transform_rotation(&sample.rotation),
            self.transform_vector(&sample.direction),
        )
    }
}

impl Default for Pivot {
    fn default() -> Self {
        Self::identity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::FRAC_PI_2;

    fn pivot() -> Pivot {
        Pivot::new(
            UnitQuaternion::from_axis_angle(&Vector3::z_axis(), FRAC_PI_2),
            Vector3::new(10.0, 0.0, -3.0),
        )
    }

    #[test]
    fn test_point_round_trip() {
        let pivot = pivot();
        let local = Point3::new(1.0, 2.0, 3.0);
        let world = pivot.transform_point(&local);
        assert_relative_eq!(pivot.inverse_transform_point(&world), local, epsilon = 1e-5);
    }

    #[test]
    fn test_rotation_before_translation() {
        let pivot = pivot();
        let world = pivot.transform_point(&Point3::new(1.0, 0.0, 0.0));
        // A quarter turn about z maps +x to +y, then the translation applies.
        assert_relative_eq!(world, Point3::new(10.0, 1.0, -3.0), epsilon = 1e-5);
    }

    #[test]
    fn test_vectors_ignore_translation() {
        let pivot = pivot();
        let world = pivot.transform_vector(&Vector3::x());
        assert_relative_eq!(world, Vector3::y(), epsilon = 1e-5);
    }

    #[test]
    fn test_identity_is_noop() {
        let p = Point3::new(4.0, -1.0, 0.5);
        assert_eq!(Pivot::identity().transform_point(&p), p);
    }

    #[test]
    fn test_whole_point_round_trip() {
        let pivot = pivot();
        let point = PathPoint::new(
            Point3::new(-2.0, 0.0, 1.0),
            UnitQuaternion::from_axis_angle(&Vector3::y_axis(), 0.7),
        );
        let back = pivot.point_to_local(pivot.point_to_world(point));
        assert_relative_eq!(back.position, point.position, epsilon = 1e-5);
        assert_relative_eq!(
            back.rotation.angle_to(&point.rotation),
            0.0,
            epsilon = 1e-5
        );
    }
}
