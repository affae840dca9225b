//! Segment topology of a path.
//!
//! Derives everything that depends only on the point count and the
//! looped flag: how many curve segments exist, how control-point
//! indices wrap, and how public segment indices map onto length-cache
//! slots.
//!
//! A looped path closes back on itself, so every control point starts
//! a segment. An open path reserves its first and last points as
//! tangent controls once it has more than three points, which is why
//! segment indices are shifted by one against cache slots there.

use crate::{error::PathError, Result};

/// Point count and looped flag of a path, with the derived segment
/// arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Topology {
    /// Number of control points.
    pub points: usize,
    /// Whether the path closes back on itself.
    pub looped: bool,
}

impl Topology {
    /// Create a topology from a point count and a looped flag.
    #[must_use]
    pub fn new(points: usize, looped: bool) -> Self {
        Self { points, looped }
    }

    /// Number of curve segments the path has.
    ///
    /// Fewer than two points yield no segments. A looped path has one
    /// segment per point. An open path has a single segment until it
    /// reaches four points, after which the outermost points act as
    /// tangent controls only.
    #[must_use]
    pub fn segments_count(&self) -> usize {
        if self.points < 2 {
            0
        } else if self.looped {
            self.points
        } else if self.points < 4 {
            1
        } else {
            self.points - 3
        }
    }

    /// Number of control points that lie on the visible curve.
    ///
    /// On an open path with more than two points the outermost points
    /// shape tangents without being on the curve themselves.
    #[must_use]
    pub fn points_on_path_count(&self) -> usize {
        if self.looped || self.points < 3 {
            self.points
        } else if self.points <= 4 {
            2
        } else {
            self.points - 2
        }
    }

    /// Offset between public segment indices and length-cache slots.
    ///
    /// One on an open path with more than two points (slot zero is the
    /// control-only leading span), zero otherwise.
    #[must_use]
    pub fn segment_shift(&self) -> usize {
        usize::from(!self.looped && self.points > 2)
    }

    /// Wrap a possibly-negative index into `0..points`.
    #[must_use]
    pub fn wrap(&self, index: isize) -> usize {
        debug_assert!(self.points > 0, "cannot wrap an index over zero points");
        let n = self.points as isize;
        (((index % n) + n) % n) as usize
    }

    /// Map a public segment index to its length-cache slot, validating
    /// the index against the current topology.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::EmptyPath`] when the path has no points and
    /// [`PathError::InvalidSegment`] when `segment` does not name an
    /// existing segment.
    pub fn storage_slot(&self, segment: usize) -> Result<usize> {
        if self.points == 0 {
            return Err(PathError::EmptyPath);
        }
        if segment >= self.segments_count() {
            return Err(PathError::invalid_segment(
                segment,
                self.segments_count(),
                self.points,
                self.looped,
            ));
        }
        Ok(segment + self.segment_shift())
    }

    /// Map an on-path point index to the underlying control-point
    /// index.
    ///
    /// Looped paths expose every control point on the curve, so the
    /// index passes through unchanged (callers wrap it). Open paths
    /// with more than two points hide the outer tangent controls, so
    /// the index is shifted past the leading control.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::EmptyPath`] when the path has no points and
    /// [`PathError::PointIndexOutOfRange`] when `index` exceeds the
    /// on-path point count of an open path.
    pub fn on_path_raw_index(&self, index: usize) -> Result<usize> {
        if self.points == 0 {
            return Err(PathError::EmptyPath);
        }
        if self.looped {
            return Ok(index);
        }
        if index >= self.points_on_path_count() {
            return Err(PathError::point_index_out_of_range(
                index,
                self.points_on_path_count(),
            ));
        }
        Ok(index + self.segment_shift())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segments_count() {
        for (points, looped, expected) in [
            (0, false, 0),
            (1, false, 0),
            (2, false, 1),
            (3, false, 1),
            (4, false, 1),
            (5, false, 2),
            (8, false, 5),
            (0, true, 0),
            (1, true, 0),
            (2, true, 2),
            (3, true, 3),
            (8, true, 8),
        ] {
            assert_eq!(
                Topology::new(points, looped).segments_count(),
                expected,
                "points={points} looped={looped}"
            );
        }
    }

    #[test]
    fn test_points_on_path_count() {
        for (points, looped, expected) in [
            (0, false, 0),
            (2, false, 2),
            (3, false, 2),
            (4, false, 2),
            (5, false, 3),
            (7, false, 5),
            (3, true, 3),
            (7, true, 7),
        ] {
            assert_eq!(
                Topology::new(points, looped).points_on_path_count(),
                expected,
                "points={points} looped={looped}"
            );
        }
    }

    #[test]
    fn test_wrap() {
        let topo = Topology::new(5, true);
        assert_eq!(topo.wrap(0), 0);
        assert_eq!(topo.wrap(4), 4);
        assert_eq!(topo.wrap(5), 0);
        assert_eq!(topo.wrap(7), 2);
        assert_eq!(topo.wrap(-1), 4);
        assert_eq!(topo.wrap(-6), 4);
    }

    #[test]
    fn test_storage_slot_shift() {
        // Open path with tangent controls: segment 0 lives in slot 1.
        let topo = Topology::new(6, false);
        assert_eq!(topo.storage_slot(0), Ok(1));
        assert_eq!(topo.storage_slot(2), Ok(3));

        // Two points: no controls, no shift.
        assert_eq!(Topology::new(2, false).storage_slot(0), Ok(0));

        // Looped: one slot per point, no shift.
        let topo = Topology::new(4, true);
        assert_eq!(topo.storage_slot(3), Ok(3));
    }

    #[test]
    fn test_storage_slot_validation() {
        assert_eq!(Topology::new(0, false).storage_slot(0), Err(PathError::EmptyPath));

        let err = Topology::new(3, false).storage_slot(1);
        assert!(err.is_err_and(|e| e.is_invalid_segment()));

        let err = Topology::new(6, false).storage_slot(3);
        assert!(err.is_err_and(|e| e.is_invalid_segment()));

        let err = Topology::new(4, true).storage_slot(4);
        assert!(err.is_err_and(|e| e.is_invalid_segment()));
    }

    #[test]
    fn test_on_path_raw_index() {
        // Looped indices pass through for the caller to wrap.
        assert_eq!(Topology::new(4, true).on_path_raw_index(6), Ok(6));

        // Open path with controls shifts past the leading control.
        let topo = Topology::new(5, false);
        assert_eq!(topo.on_path_raw_index(0), Ok(1));
        assert_eq!(topo.on_path_raw_index(2), Ok(3));
        assert!(topo
            .on_path_raw_index(3)
            .is_err_and(|e| e.is_point_index_out_of_range()));

        // Two-point open path exposes both points directly.
        let topo = Topology::new(2, false);
        assert_eq!(topo.on_path_raw_index(1), Ok(1));
        assert!(topo
            .on_path_raw_index(2)
            .is_err_and(|e| e.is_point_index_out_of_range()));

        assert_eq!(
            Topology::new(0, false).on_path_raw_index(0),
            Err(PathError::EmptyPath)
        );
    }
}
