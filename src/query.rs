//! Sampling queries: poses by index, by segment distance, and by
//! distance along the whole path.
//!
//! All queries run on the pivot-local control points and convert to
//! world coordinates at the very end when [`Space::World`] is
//! requested, so extrapolation offsets and interpolated rotations
//! never mix spaces.

use nalgebra::Vector3;

use crate::{
    error::PathError,
    path::Path,
    point::{slerp, PathSample},
    spline::{approximately, catmull_rom, normalize_or_zero},
    transform::Space,
    Result,
};

impl Path {
    /// The pose at a control point, with the direction the curve
    /// leaves it in.
    ///
    /// The index wraps, so any value names some control point. A
    /// single-point path yields a zero direction.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::EmptyPath`] when the path has no points.
    pub fn point_by_index(&self, index: usize, space: Space) -> Result<PathSample> {
        self.control_sample(index as isize, space)
    }

    /// The pose at an on-path control point.
    ///
    /// Unlike [`Path::point_by_index`], this skips the outer tangent
    /// controls of an open path, so index 0 is always the start of the
    /// visible curve.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::EmptyPath`] when the path has no points
    /// and [`PathError::PointIndexOutOfRange`] when `index` exceeds
    /// the on-path point count of an open path.
    pub fn point_on_path(&self, index: usize, space: Space) -> Result<PathSample> {
        let raw = self.topology().on_path_raw_index(index)?;
        self.control_sample(raw as isize, space)
    }

    /// Sample the pose at a distance along one segment.
    ///
    /// With `normalized` set, `distance` is a fraction of the segment
    /// length in `[0, 1]`; otherwise it is an absolute arc length.
    /// Distances are clamped to the segment. The sample's direction
    /// points along the curve and is zero only at degenerate
    /// (coincident-point) locations.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::EmptyPath`] on an empty path and
    /// [`PathError::InvalidSegment`] when `segment` does not name an
    /// existing segment.
    pub fn sample_at_segment_distance(
        &self,
        segment: usize,
        distance: f32,
        normalized: bool,
        space: Space,
    ) -> Result<PathSample> {
        if self.is_empty() {
            return Err(PathError::EmptyPath);
        }
        if self.points_count() == 1 {
            let sample = PathSample::from_point(self.points[0], Vector3::zeros());
            return Ok(self.globalize(sample, space));
        }

        let length = self.segment_length(segment)?;
        let (distance, normalized_distance) = if normalized {
            let fraction = distance.clamp(0.0, 1.0);
            (length * fraction, fraction)
        } else {
            let distance = distance.clamp(0.0, length);
            let fraction = if length > f32::EPSILON {
                distance / length
            } else {
                0.0
            };
            (distance, fraction)
        };

        if self.points_count() == 2 {
            return Ok(self.sample_pair(segment, normalized_distance, space));
        }

        // Work in cache-slot indexing from here on.
        let slot = self.topology().storage_slot(segment)?;
        let segments = self.segments_count();

        if approximately(distance, 0.0) {
            return self.control_sample(slot as isize, space);
        }
        if approximately(distance, length) {
            let ends_at_last_point = if self.looped() {
                slot == segments - 1
            } else {
                slot - 1 == segments - 1
            };
            if !ends_at_last_point {
                return self.control_sample(slot as isize + 1, space);
            }
            // The far end of the final segment is the closing control
            // point, approached from behind.
            let point = self.points[self.topology().wrap(slot as isize + 1)];
            let direction = self.segment_end_direction(slot as isize);
            return Ok(self.globalize(PathSample::from_point(point, direction), space));
        }

        Ok(self.globalize(
            self.walk_segment(slot as isize, distance, normalized_distance),
            space,
        ))
    }

    /// Sample the pose at a distance along the whole path.
    ///
    /// With `normalized` set, `distance` is a fraction of the total
    /// path length. Negative distances clamp to the path start. On an
    /// open multi-point path, distances beyond the total length
    /// extrapolate: the path repeats, each repetition rigidly offset
    /// by the translation and rotation between the first and last
    /// on-path points. Looped paths wrap instead.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::EmptyPath`] when the path has no points.
    pub fn sample_at_distance(
        &self,
        distance: f32,
        normalized: bool,
        space: Space,
    ) -> Result<PathSample> {
        if self.is_empty() {
            return Err(PathError::EmptyPath);
        }
        if self.points_count() == 1 {
            let sample = PathSample::from_point(self.points[0], Vector3::zeros());
            return Ok(self.globalize(sample, space));
        }

        let mut distance = if normalized {
            distance * self.length()
        } else {
            distance
        };
        distance = distance.max(0.0);

        if self.length() <= f32::EPSILON {
            // Fully degenerate path: every distance maps to the start.
            return self.sample_at_segment_distance(0, 0.0, false, space);
        }

        let (offset_position, offset_rotation) = if self.looped() {
            (Vector3::zeros(), nalgebra::UnitQuaternion::identity())
        } else {
            let first = self.point_on_path(0, Space::Local)?;
            let last = self.point_on_path(self.points_on_path_count() - 1, Space::Local)?;
            (
                last.position - first.position,
                last.rotation * first.rotation.inverse(),
            )
        };

        let mut repeated = (distance / self.length()).floor() as i32;
        let frac = distance % self.length();
        if approximately(frac, 0.0) {
            // Exact multiples of the length belong to the end of the
            // previous repetition, not the start of the next.
            repeated = (repeated - 1).max(0);
        }

        let offset_position = offset_position * repeated as f32;
        let offset_rotation = offset_rotation.powf(repeated as f32);

        distance = if !approximately(distance, 0.0) && approximately(frac, 0.0) {
            self.length()
        } else {
            frac
        };

        let segments = self.segments_count();
        let mut segment = 0;
        while segment < segments {
            let segment_length = self.segment_length(segment)?;
            if distance <= segment_length {
                break;
            }
            distance -= segment_length;
            segment += 1;
        }
        if segment == segments {
            // Accumulated float error can push a full-length distance
            // past the last segment.
            segment -= 1;
            distance = self.segment_length(segment)?;
        }

        let sample = self.sample_at_segment_distance(segment, distance, false, Space::Local)?;
        let sample = PathSample::new(
            sample.position + offset_position,
            offset_rotation * sample.rotation,
            sample.direction,
        );
        Ok(self.globalize(sample, space))
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn globalize(&self, sample: PathSample, space: Space) -> PathSample {
        match space {
            Space::Local => sample,
            Space::World => self.pivot.sample_to_world(sample),
        }
    }

    /// Sample at a raw (wrapping) control index, directed along the
    /// curve leaving it.
    fn control_sample(&self, raw: isize, space: Space) -> Result<PathSample> {
        if self.is_empty() {
            return Err(PathError::EmptyPath);
        }
        let index = self.topology().wrap(raw);
        let direction = if self.points_count() == 1 {
            Vector3::zeros()
        } else {
            self.segment_start_direction(index as isize)
        };
        Ok(self.globalize(PathSample::from_point(self.points[index], direction), space))
    }

    /// Two-point paths interpolate straight between the endpoints.
    /// Segment 1 of a looped pair runs the same line backwards.
    fn sample_pair(&self, segment: usize, fraction: f32, space: Space) -> PathSample {
        let (from, to) = if segment == 0 { (0, 1) } else { (1, 0) };
        let a = self.points[from];
        let b = self.points[to];

        let (position, direction) = if self.points[0].position == self.points[1].position {
            (self.points[0].position, Vector3::zeros())
        } else {
            (
                nalgebra::Point3::from(a.position.coords.lerp(&b.position.coords, fraction)),
                normalize_or_zero(b.position - a.position),
            )
        };

        let rotation = if self.points[0].rotation == self.points[1].rotation {
            self.points[0].rotation
        } else {
            slerp(&a.rotation, &b.rotation, fraction)
        };

        self.globalize(PathSample::new(position, rotation, direction), space)
    }

    /// Walk the span at `slot` sub-step by sub-step until the
    /// remaining distance falls inside one, then interpolate within
    /// it. Rotation interpolates across the whole segment.
    fn walk_segment(&self, slot: isize, distance: f32, normalized_distance: f32) -> PathSample {
        let topology = self.topology();
        let [p0, p1, p2, p3] = self.span(slot);
        let from_rotation = self.points[topology.wrap(slot)].rotation;
        let to_rotation = self.points[topology.wrap(slot + 1)].rotation;
        let rotation = slerp(&from_rotation, &to_rotation, normalized_distance);

        let mut remaining = distance;
        let mut last = p1;
        let mut t = self.step;

        while t < 1.0 {
            let position = catmull_rom(t, p0, p1, p2, p3);
            let sub_length = (position - last).norm();
            if remaining <= sub_length {
                return sub_step_sample(last, position, remaining, sub_length, rotation);
            }
            remaining -= sub_length;
            last = position;
            t += self.step;
        }

        let position = catmull_rom(1.0, p0, p1, p2, p3);
        let sub_length = (position - last).norm();
        sub_step_sample(last, position, remaining, sub_length, rotation)
    }

    fn segment_start_direction(&self, raw: isize) -> Vector3<f32> {
        let [p0, p1, p2, p3] = self.span(raw);
        normalize_or_zero(catmull_rom(self.step, p0, p1, p2, p3) - p1)
    }

    fn segment_end_direction(&self, raw: isize) -> Vector3<f32> {
        // The same probe as the start direction, run over the
        // reversed span so it approaches the far end from behind.
        let [p0, p1, p2, p3] = self.span(raw);
        normalize_or_zero(p2 - catmull_rom(self.step, p3, p2, p1, p0))
    }
}

/// Interpolate within one linear sub-step of a segment walk.
fn sub_step_sample(
    last: nalgebra::Point3<f32>,
    position: nalgebra::Point3<f32>,
    remaining: f32,
    sub_length: f32,
    rotation: nalgebra::UnitQuaternion<f32>,
) -> PathSample {
    let fraction = if sub_length > f32::EPSILON {
        remaining / sub_length
    } else {
        0.0
    };
    PathSample::new(
        nalgebra::Point3::from(last.coords.lerp(&position.coords, fraction)),
        rotation,
        normalize_or_zero(position - last),
    )
}
