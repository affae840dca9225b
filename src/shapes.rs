//! Shape generators: ready-made paths for common layouts.
//!
//! All generators build pivot-local geometry around the origin with an
//! identity pivot; position the result afterwards with
//! [`Path::set_pivot`]. Angles are in radians. `normal` faces out of
//! the shape's plane and `up` orients it within that plane.

use nalgebra::{Point3, Unit, UnitQuaternion, Vector3};
use std::f32::consts::{PI, TAU};

use crate::{error::PathError, path::Path, transform::Space, Result};

/// Orientation frame of a generated shape: the rotation carrying the
/// canonical plane onto the requested one, plus the rotation axis.
fn shape_frame(
    normal: Vector3<f32>,
    up: Vector3<f32>,
) -> Result<(UnitQuaternion<f32>, Unit<Vector3<f32>>)> {
    if normal.norm() <= f32::EPSILON {
        return Err(PathError::invalid_shape("normal must not be zero"));
    }
    if up.norm() <= f32::EPSILON {
        return Err(PathError::invalid_shape("up must not be zero"));
    }
    let axis = Unit::new_normalize(normal);
    if axis.cross(&up.normalize()).norm() <= 1.0e-5 {
        return Err(PathError::invalid_shape("normal and up must not be parallel"));
    }
    Ok((UnitQuaternion::face_towards(&normal, &up), axis))
}

impl Path {
    /// A looped regular polygon with `side_count` corners at `radius`
    /// from the origin, lying in the plane facing `normal`.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::InvalidShape`] for fewer than three sides,
    /// a non-positive radius, or a degenerate orientation.
    pub fn polygon(
        normal: Vector3<f32>,
        up: Vector3<f32>,
        side_count: usize,
        radius: f32,
    ) -> Result<Self> {
        if side_count < 3 {
            return Err(PathError::invalid_shape("polygon needs at least 3 sides"));
        }
        if radius <= 0.0 {
            return Err(PathError::invalid_shape("polygon radius must be positive"));
        }
        let (orientation, axis) = shape_frame(normal, up)?;

        let mut path = Self::new();
        let delta = TAU / side_count as f32;
        for i in 0..side_count {
            let spoke = orientation * Vector3::new(0.0, radius, 0.0);
            let corner = UnitQuaternion::from_axis_angle(&axis, delta * i as f32) * spoke;
            path.add_position(Point3::from(corner), Space::Local);
        }
        path.set_looped(true);
        Ok(path)
    }

    /// A flat spiral winding `coils` times around the origin, with
    /// `step` distance gained per full turn.
    ///
    /// `offset_angle` rotates where the spiral starts. One extra point
    /// is prepended behind the center so the curve enters it smoothly.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::InvalidShape`] for zero coils, a
    /// non-positive step, fewer than three points per coil, or a
    /// degenerate orientation.
    pub fn spiral(
        normal: Vector3<f32>,
        up: Vector3<f32>,
        offset_angle: f32,
        coils: u32,
        step: f32,
        points_per_coil: usize,
    ) -> Result<Self> {
        Self::build_spiral(normal, up, offset_angle, coils, step, points_per_coil, false)
    }

    /// A spiral that also climbs along `normal`, gaining height
    /// proportional to the in-plane distance covered by each step.
    ///
    /// # Errors
    ///
    /// Same conditions as [`Path::spiral`].
    pub fn spiral_3d(
        normal: Vector3<f32>,
        up: Vector3<f32>,
        offset_angle: f32,
        coils: u32,
        step: f32,
        points_per_coil: usize,
    ) -> Result<Self> {
        Self::build_spiral(normal, up, offset_angle, coils, step, points_per_coil, true)
    }

    #[allow(clippy::too_many_arguments)]
    fn build_spiral(
        normal: Vector3<f32>,
        up: Vector3<f32>,
        offset_angle: f32,
        coils: u32,
        step: f32,
        points_per_coil: usize,
        climb: bool,
    ) -> Result<Self> {
        if coils < 1 {
            return Err(PathError::invalid_shape("spiral needs at least 1 coil"));
        }
        if step <= 0.0 {
            return Err(PathError::invalid_shape("spiral step must be positive"));
        }
        if points_per_coil < 3 {
            return Err(PathError::invalid_shape(
                "spiral needs at least 3 points per coil",
            ));
        }
        let (orientation, axis) = shape_frame(normal, up)?;
        let climb_axis = axis.into_inner();

        let delta = TAU / points_per_coil as f32;
        let offset = -offset_angle;
        // The ray direction one step before the spiral start; the loop
        // advances it before emitting each point.
        let seed = orientation
            * (UnitQuaternion::from_axis_angle(&Vector3::z_axis(), -(offset - delta))
                * Vector3::y());

        let mut path = Self::new();
        let mut direction = seed;
        let mut angle = -delta;
        let mut previous = Vector3::zeros();

        for _ in 0..coils {
            for _ in 0..points_per_coil {
                angle += delta;
                direction = UnitQuaternion::from_axis_angle(&axis, delta) * direction;
                let distance = step / TAU * angle;
                let in_plane = direction * distance;

                if climb {
                    let lift = climb_axis * (in_plane - previous).norm();
                    path.add_position(Point3::from(in_plane + lift), Space::Local);
                    previous = in_plane;
                } else {
                    path.add_position(Point3::from(in_plane), Space::Local);
                }
            }
        }

        // Lead-in point behind the center, mirroring the first step.
        path.insert_position(0, Point3::from(seed * (step / TAU * -delta)), Space::Local)?;

        if climb {
            // Drop the lead-in below the center by its distance to the
            // first real point, keeping the climb rate consistent.
            let lead = path.point_by_index(0, Space::Local)?.position;
            let first = path.point_by_index(1, Space::Local)?.position;
            path.set_position(0, lead - climb_axis * (lead - first).norm(), Space::Local)?;
        }
        Ok(path)
    }

    /// An open arc spanning half a turn, `width` across and `height`
    /// tall, with one tangent control point past each end.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::InvalidShape`] for fewer than three sides,
    /// non-positive dimensions, or a degenerate orientation.
    pub fn arc(
        normal: Vector3<f32>,
        up: Vector3<f32>,
        width: f32,
        height: f32,
        side_count: usize,
    ) -> Result<Self> {
        if side_count < 3 {
            return Err(PathError::invalid_shape("arc needs at least 3 sides"));
        }
        if width <= 0.0 || height <= 0.0 {
            return Err(PathError::invalid_shape(
                "arc width and height must be positive",
            ));
        }
        let (orientation, axis) = shape_frame(normal, up)?;

        let delta = PI / (side_count - 1) as f32;
        let width = width / 2.0 - 1.0;
        let height = height - 1.0;

        let mut path = Self::new();
        for i in -1..=side_count as i32 {
            let angle = delta * i as f32;

            let x_axis = orientation * Vector3::x();
            let rotated = UnitQuaternion::from_axis_angle(&axis, angle) * x_axis;
            // Stretch along the arc's own axes rather than scaling the
            // whole vector, so width and height stay independent.
            let rotated = rotated + x_axis * rotated.dot(&x_axis) * width;

            let y_axis = orientation * Vector3::y();
            let rotated = rotated + y_axis * rotated.dot(&y_axis) * height;

            path.add_position(Point3::from(rotated), Space::Local);
        }
        Ok(path)
    }

    /// An open zigzag wave with `repeat` full periods, `height` peak
    /// amplitude, and peaks `1 / frequency` apart. `start_up` chooses
    /// whether the first half-period rises or falls.
    ///
    /// Midpoints are inserted after the first and before the last
    /// point so both wave ends lie on the visible curve.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::InvalidShape`] for non-positive height or
    /// frequency, zero repeats, or a degenerate orientation.
    pub fn wave(
        normal: Vector3<f32>,
        up: Vector3<f32>,
        height: f32,
        frequency: f32,
        repeat: u32,
        start_up: bool,
    ) -> Result<Self> {
        if height <= 0.0 {
            return Err(PathError::invalid_shape("wave height must be positive"));
        }
        if frequency <= 0.0 {
            return Err(PathError::invalid_shape("wave frequency must be positive"));
        }
        if repeat < 1 {
            return Err(PathError::invalid_shape("wave must repeat at least once"));
        }
        let (orientation, _) = shape_frame(-normal, up)?;

        let (mut current, mut to_next) = if start_up {
            (Vector3::new(-1.0, -1.0, 0.0), Vector3::new(2.0, 2.0, 0.0))
        } else {
            (Vector3::new(-1.0, 1.0, 0.0), Vector3::new(2.0, -2.0, 0.0))
        };

        let mut path = Self::new();
        let mut push = |path: &mut Self| {
            let mut point = current;
            point.x = point.x / 4.0 / frequency;
            point.y *= height;
            path.add_position(Point3::from(orientation * point), Space::Local);

            current += to_next;
            to_next.y = -to_next.y;
        };

        for _ in 0..=repeat {
            push(&mut path);
            push(&mut path);
        }

        // Pull the wave ends onto the visible curve.
        let a = path.point_by_index(0, Space::Local)?.position;
        let b = path.point_by_index(1, Space::Local)?.position;
        path.insert_position(1, Point3::from(a.coords.lerp(&b.coords, 0.5)), Space::Local)?;

        let count = path.points_count();
        let c = path.point_by_index(count - 2, Space::Local)?.position;
        let d = path.point_by_index(count - 1, Space::Local)?.position;
        path.insert_position(
            count - 1,
            Point3::from(c.coords.lerp(&d.coords, 0.5)),
            Space::Local,
        )?;

        Ok(path)
    }
}
