//! Path storage, mutation, and the segment length cache.
//!
//! A [`Path`] owns an ordered list of oriented control points plus a
//! cache of per-segment arc lengths. Every mutation keeps the cache in
//! lock step: a change to point `i` can only affect the segments whose
//! four-point spans include `i`, so mutations recompute a small window
//! of segments instead of the whole path. Small paths (fewer than five
//! points) recompute everything, since wrapping makes nearly every
//! span overlap the change anyway.

use nalgebra::Point3;
use tracing::debug;

use crate::{
    error::PathError,
    point::PathPoint,
    spline::catmull_rom,
    topology::Topology,
    transform::{Pivot, Space},
    Result,
};

/// Smallest permitted sampling resolution.
pub(crate) const MIN_RESOLUTION: u32 = 1;

/// Largest permitted sampling resolution.
pub(crate) const MAX_RESOLUTION: u32 = 100;

/// Below this point count, mutations recompute every cached segment
/// length rather than a window.
const WINDOWED_RECOMPUTE_THRESHOLD: usize = 5;

/// How a segment's arc length is measured, keyed off the point count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub(crate) enum LengthMode {
    /// No points: nothing to measure.
    Empty,
    /// One point: every length is zero.
    Single,
    /// Two points: the exact straight-line distance.
    Pair,
    /// Three or more points: piecewise-linear walk along the spline.
    General,
}

impl LengthMode {
    pub(crate) fn from_count(points: usize) -> Self {
        match points {
            0 => Self::Empty,
            1 => Self::Single,
            2 => Self::Pair,
            _ => Self::General,
        }
    }
}

/// An ordered path of oriented control points with cached arc lengths.
///
/// Control points are stored in pivot-local coordinates; the
/// [`Pivot`] places the path in the world, and every accessor taking a
/// [`Space`] converts at the boundary.
///
/// # Example
///
/// ```
/// use nalgebra::Point3;
/// use spline_path::{Path, Space};
///
/// let mut path = Path::new();
/// for x in 0..4 {
///     path.add_position(Point3::new(x as f32, 0.0, 0.0), Space::Local);
/// }
///
/// // Four collinear points make one unit-length segment.
/// assert_eq!(path.segments_count(), 1);
/// assert!((path.length() - 1.0).abs() < 1e-4);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Path {
    pub(crate) points: Vec<PathPoint>,
    pub(crate) segment_lengths: Vec<f32>,
    pub(crate) resolution: u32,
    pub(crate) step: f32,
    pub(crate) looped: bool,
    pub(crate) length: f32,
    pub(crate) mode: LengthMode,
    pub(crate) pivot: Pivot,
}

impl Path {
    /// Create an empty open path with resolution 1 and an identity
    /// pivot.
    #[must_use]
    pub fn new() -> Self {
        Self {
            points: Vec::new(),
            segment_lengths: Vec::new(),
            resolution: MIN_RESOLUTION,
            step: 1.0 / MIN_RESOLUTION as f32,
            looped: false,
            length: 0.0,
            mode: LengthMode::Empty,
            pivot: Pivot::identity(),
        }
    }

    /// Create a path from pivot-local control points.
    ///
    /// `resolution` is clamped to the valid range. The length cache is
    /// fully computed before the path is returned.
    #[must_use]
    pub fn from_points(
        points: impl IntoIterator<Item = PathPoint>,
        resolution: u32,
        looped: bool,
    ) -> Self {
        let points: Vec<PathPoint> = points.into_iter().collect();
        let resolution = resolution.clamp(MIN_RESOLUTION, MAX_RESOLUTION);
        let mut path = Self {
            segment_lengths: vec![0.0; points.len()],
            points,
            resolution,
            step: 1.0 / resolution as f32,
            looped,
            length: 0.0,
            mode: LengthMode::Empty,
            pivot: Pivot::identity(),
        };
        path.recalculate();
        path
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// Number of control points.
    #[must_use]
    pub fn points_count(&self) -> usize {
        self.points.len()
    }

    /// Whether the path has no control points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The control points, in pivot-local coordinates.
    #[must_use]
    pub fn points(&self) -> &[PathPoint] {
        &self.points
    }

    /// Current sampling resolution.
    #[must_use]
    pub fn resolution(&self) -> u32 {
        self.resolution
    }

    /// Whether the path closes back on itself.
    #[must_use]
    pub fn looped(&self) -> bool {
        self.looped
    }

    /// Total arc length over the path's segments.
    #[must_use]
    pub fn length(&self) -> f32 {
        self.length
    }

    /// The pivot placing this path in the world.
    #[must_use]
    pub fn pivot(&self) -> Pivot {
        self.pivot
    }

    /// Replace the pivot.
    ///
    /// Stored points are pivot-local, so this moves the whole path
    /// rigidly without touching the length cache.
    pub fn set_pivot(&mut self, pivot: Pivot) {
        self.pivot = pivot;
    }

    /// The current topology of the path.
    #[must_use]
    pub fn topology(&self) -> Topology {
        Topology::new(self.points.len(), self.looped)
    }

    /// Number of curve segments.
    #[must_use]
    pub fn segments_count(&self) -> usize {
        self.topology().segments_count()
    }

    /// Number of control points lying on the visible curve.
    #[must_use]
    pub fn points_on_path_count(&self) -> usize {
        self.topology().points_on_path_count()
    }

    /// Cached arc length of one segment.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::EmptyPath`] on an empty path and
    /// [`PathError::InvalidSegment`] when `segment` does not name an
    /// existing segment.
    pub fn segment_length(&self, segment: usize) -> Result<f32> {
        let slot = self.topology().storage_slot(segment)?;
        Ok(self.segment_lengths[slot])
    }

    // ------------------------------------------------------------------
    // Configuration
    // ------------------------------------------------------------------

    /// Set the sampling resolution, clamped to `1..=100`, and
    /// recompute every cached segment length at the new density.
    pub fn set_resolution(&mut self, resolution: u32) {
        self.resolution = resolution.clamp(MIN_RESOLUTION, MAX_RESOLUTION);
        self.step = 1.0 / self.resolution as f32;
        self.recalculate_all_segments();
    }

    /// Open or close the path.
    ///
    /// Per-segment lengths are span-local and stay valid; only which
    /// slots contribute to the total changes, so just the total is
    /// recomputed.
    pub fn set_looped(&mut self, looped: bool) {
        self.looped = looped;
        self.recalculate_path_length();
    }

    // ------------------------------------------------------------------
    // Mutation
    // ------------------------------------------------------------------

    /// Append a control point.
    pub fn add_point(&mut self, point: PathPoint, space: Space) {
        let point = self.localize(point, space);
        self.points.push(point);
        self.segment_lengths.push(0.0);
        self.mode = LengthMode::from_count(self.points.len());

        let count = self.points.len();
        if count < WINDOWED_RECOMPUTE_THRESHOLD {
            self.recalculate_all_segments();
        } else {
            // The new point reshapes the spans reaching back three
            // slots and, through wrapping, the closing span.
            self.recalculate_window(count as isize - 3, count as isize);
        }
    }

    /// Append a control point at `position` with identity rotation.
    pub fn add_position(&mut self, position: Point3<f32>, space: Space) {
        self.add_point(PathPoint::from_position(position), space);
    }

    /// Insert a control point before `index`.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::PointIndexOutOfRange`] when `index` is
    /// greater than the point count.
    pub fn insert_point(&mut self, index: usize, point: PathPoint, space: Space) -> Result<()> {
        if index > self.points.len() {
            return Err(PathError::point_index_out_of_range(
                index,
                self.points.len(),
            ));
        }
        let point = self.localize(point, space);
        self.points.insert(index, point);
        self.segment_lengths.insert(index, 0.0);
        self.mode = LengthMode::from_count(self.points.len());

        if self.points.len() < WINDOWED_RECOMPUTE_THRESHOLD {
            self.recalculate_all_segments();
        } else {
            self.recalculate_window(index as isize - 2, index as isize + 1);
        }
        Ok(())
    }

    /// Insert a control point at `position` before `index`, with
    /// identity rotation.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::PointIndexOutOfRange`] when `index` is
    /// greater than the point count.
    pub fn insert_position(&mut self, index: usize, position: Point3<f32>, space: Space) -> Result<()> {
        self.insert_point(index, PathPoint::from_position(position), space)
    }

    /// Remove and return the control point at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::PointIndexOutOfRange`] when `index` does
    /// not name an existing point.
    pub fn remove_point_at(&mut self, index: usize) -> Result<PathPoint> {
        if index >= self.points.len() {
            return Err(PathError::point_index_out_of_range(
                index,
                self.points.len(),
            ));
        }
        let removed = self.points.remove(index);
        self.segment_lengths.remove(index);
        self.mode = LengthMode::from_count(self.points.len());

        if self.points.is_empty() {
            self.length = 0.0;
        } else if self.points.len() < WINDOWED_RECOMPUTE_THRESHOLD {
            self.recalculate_all_segments();
        } else {
            self.recalculate_window(index as isize - 2, index as isize);
        }
        Ok(removed)
    }

    /// Remove the first control point at exactly `position`.
    ///
    /// Returns whether a point was removed.
    pub fn remove_point(&mut self, position: Point3<f32>, space: Space) -> bool {
        match self.index_of_position(position, space) {
            Some(index) => self.remove_point_at(index).is_ok(),
            None => false,
        }
    }

    /// Remove every control point and reset the cache.
    pub fn clear_points(&mut self) {
        self.points.clear();
        self.segment_lengths.clear();
        self.length = 0.0;
        self.mode = LengthMode::Empty;
    }

    /// Index of the first control point at exactly `position`.
    #[must_use]
    pub fn index_of_position(&self, position: Point3<f32>, space: Space) -> Option<usize> {
        let position = match space {
            Space::Local => position,
            Space::World => self.pivot.inverse_transform_point(&position),
        };
        self.points.iter().position(|p| p.position == position)
    }

    /// Whether any control point sits at exactly `position`.
    #[must_use]
    pub fn contains_position(&self, position: Point3<f32>, space: Space) -> bool {
        self.index_of_position(position, space).is_some()
    }

    /// Replace the control point at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::PointIndexOutOfRange`] when `index` does
    /// not name an existing point.
    pub fn set_point(&mut self, index: usize, point: PathPoint, space: Space) -> Result<()> {
        if index >= self.points.len() {
            return Err(PathError::point_index_out_of_range(
                index,
                self.points.len(),
            ));
        }
        self.points[index] = self.localize(point, space);
        self.recalculate_after_change(index);
        Ok(())
    }

    /// Move the control point at `index`, keeping its rotation.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::PointIndexOutOfRange`] when `index` does
    /// not name an existing point.
    pub fn set_position(&mut self, index: usize, position: Point3<f32>, space: Space) -> Result<()> {
        if index >= self.points.len() {
            return Err(PathError::point_index_out_of_range(
                index,
                self.points.len(),
            ));
        }
        self.points[index].position = match space {
            Space::Local => position,
            Space::World => self.pivot.inverse_transform_point(&position),
        };
        self.recalculate_after_change(index);
        Ok(())
    }

    /// Reorient the control point at `index`, keeping its position.
    ///
    /// Rotations do not affect arc lengths, so the cache is untouched.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::PointIndexOutOfRange`] when `index` does
    /// not name an existing point.
    pub fn set_rotation(
        &mut self,
        index: usize,
        rotation: nalgebra::UnitQuaternion<f32>,
        space: Space,
    ) -> Result<()> {
        if index >= self.points.len() {
            return Err(PathError::point_index_out_of_range(
                index,
                self.points.len(),
            ));
        }
        self.points[index].rotation = match space {
            Space::Local => rotation,
            Space::World => self.pivot.inverse_transform_rotation(&rotation),
        };
        Ok(())
    }

    // ------------------------------------------------------------------
    // Cache maintenance
    // ------------------------------------------------------------------

    /// Rebuild the whole length cache from the control points.
    ///
    /// Useful after deserializing a path whose cached lengths are
    /// suspect.
    pub fn recalculate(&mut self) {
        self.mode = LengthMode::from_count(self.points.len());
        self.step = 1.0 / self.resolution as f32;
        self.recalculate_all_segments();
        debug!(
            points = self.points.len(),
            resolution = self.resolution,
            length = self.length,
            "rebuilt path length cache"
        );
    }

    fn localize(&self, point: PathPoint, space: Space) -> PathPoint {
        match space {
            Space::Local => point,
            Space::World => self.pivot.point_to_local(point),
        }
    }

    fn recalculate_after_change(&mut self, index: usize) {
        if self.points.len() < WINDOWED_RECOMPUTE_THRESHOLD {
            self.recalculate_all_segments();
        } else {
            self.recalculate_window(index as isize - 2, index as isize + 1);
        }
    }

    fn recalculate_all_segments(&mut self) {
        for slot in 0..self.segment_lengths.len() {
            self.recalculate_slot(slot);
        }
        self.recalculate_path_length();
    }

    fn recalculate_window(&mut self, from: isize, to: isize) {
        let topology = self.topology();
        for raw in from..=to {
            let slot = topology.wrap(raw);
            self.recalculate_slot(slot);
        }
        self.recalculate_path_length();
    }

    fn recalculate_slot(&mut self, slot: usize) {
        self.segment_lengths[slot] = match self.mode {
            LengthMode::Empty | LengthMode::Single => 0.0,
            LengthMode::Pair => (self.points[0].position - self.points[1].position).norm(),
            LengthMode::General => self.walk_slot_length(slot),
        };
    }

    /// Piecewise-linear arc length of one cached span, walked at the
    /// current resolution with an explicit final step to `t = 1`.
    fn walk_slot_length(&self, slot: usize) -> f32 {
        let [p0, p1, p2, p3] = self.span(slot as isize);

        let mut length = 0.0;
        let mut last = p1;
        let mut t = 0.0;
        while t < 1.0 {
            let position = catmull_rom(t, p0, p1, p2, p3);
            length += (position - last).norm();
            last = position;
            t += self.step;
        }
        length + (catmull_rom(1.0, p0, p1, p2, p3) - last).norm()
    }

    fn recalculate_path_length(&mut self) {
        let topology = self.topology();
        let shift = topology.segment_shift();
        self.length = (0..topology.segments_count())
            .map(|segment| self.segment_lengths[segment + shift])
            .sum();
    }

    /// The four control positions shaping the span stored in `slot`.
    pub(crate) fn span(&self, slot: isize) -> [Point3<f32>; 4] {
        let topology = self.topology();
        [
            self.points[topology.wrap(slot - 1)].position,
            self.points[topology.wrap(slot)].position,
            self.points[topology.wrap(slot + 1)].position,
            self.points[topology.wrap(slot + 2)].position,
        ]
    }
}

impl Default for Path {
    fn default() -> Self {
        Self::new()
    }
}
