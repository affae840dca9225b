//! Resolution tuning.
//!
//! Three strategies with different cost and rigor:
//!
//! - [`Path::optimize`] scores the sharpness of each interior corner
//!   and picks a resolution from the worst one. Cheap, no resampling.
//! - [`Path::optimize_by_angle`] searches for the smallest resolution
//!   whose piecewise-linear rendition never turns more than a given
//!   angle between consecutive sub-steps.
//! - [`Path::optimize_by_length`] raises the resolution until the
//!   measured path length stops improving meaningfully.

use tracing::{debug, info};

use crate::{
    path::{Path, MAX_RESOLUTION},
    spline::{catmull_rom, normalize_or_zero},
};

/// Weight mapping corner sharpness onto the resolution range.
const TURN_RESOLUTION_SCALE: f32 = 15.0;

/// Divisor softening the influence of uneven neighbour distances.
const ASPECT_SOFTENING: f32 = 2.5;

/// How strongly the neighbour-distance aspect raises the resolution.
const ASPECT_WEIGHT: f32 = 0.1;

/// The corner heuristic never goes below this resolution.
const MIN_HEURISTIC_RESOLUTION: u32 = 4;

/// Starting candidate for the angle-bounded search.
const MIN_SEARCH_RESOLUTION: u32 = 3;

impl Path {
    /// Pick a resolution from the sharpness of the path's corners.
    ///
    /// Each interior point (every point, when looped) is scored by the
    /// angle between its neighbour directions and by how unevenly the
    /// neighbours are spaced; the worst score sets the resolution.
    /// Paths with fewer than three points are straight lines and get
    /// resolution 1.
    pub fn optimize(&mut self) {
        if self.points_count() < 3 {
            self.set_resolution(1);
            return;
        }

        let topology = self.topology();
        let (start, end) = if self.looped() {
            (0, self.points_count())
        } else if self.points_count() == 3 {
            (1, 3)
        } else {
            (1, self.points_count() - 1)
        };

        let mut resolution = 1.0_f32;
        for i in start..end {
            let center = self.points()[i].position;
            let back = self.points()[topology.wrap(i as isize - 1)].position - center;
            let forward = self.points()[topology.wrap(i as isize + 1)].position - center;

            let back_dir = normalize_or_zero(back);
            let forward_dir = normalize_or_zero(forward);
            let dot = back_dir
                .dot(&forward_dir)
                .max((-back_dir).dot(&forward_dir));

            let mut candidate = (dot + 1.0) / 2.0 * TURN_RESOLUTION_SCALE + 1.0;

            let mut aspect = if forward.norm() > f32::EPSILON && back.norm() > f32::EPSILON {
                back.norm() / forward.norm()
            } else {
                1.0
            };
            if aspect < 1.0 {
                aspect = 1.0 / aspect;
            }
            aspect = (aspect / ASPECT_SOFTENING).max(1.0);

            candidate += candidate * (aspect - 1.0) * ASPECT_WEIGHT;
            resolution = resolution.max(candidate);
        }

        let resolution = (resolution as u32).max(MIN_HEURISTIC_RESOLUTION);
        debug!(resolution, "corner heuristic picked resolution");
        self.set_resolution(resolution);
    }

    /// Find the smallest resolution whose sub-step directions never
    /// turn by more than `max_angle` radians.
    ///
    /// Candidates are tried from 3 upwards. The turn check carries the
    /// previous direction across segment boundaries, so kinks between
    /// segments count too. When a candidate fails mid-path, the next
    /// one resumes checking from the failing segment rather than the
    /// start, since earlier segments only get smoother at higher
    /// resolutions. Resolution 100 is accepted as a best effort even
    /// if the bound is still violated.
    ///
    /// Paths with fewer than three points have no curvature; they get
    /// resolution 3.
    pub fn optimize_by_angle(&mut self, max_angle: f32) {
        if self.points_count() < 3 {
            self.set_resolution(MIN_SEARCH_RESOLUTION);
            return;
        }

        let topology = self.topology();
        let segments = topology.segments_count();
        let shift = topology.segment_shift();

        let mut resolution = MIN_SEARCH_RESOLUTION;
        let mut start_segment = 0;

        'candidate: loop {
            let mut last_direction: Option<nalgebra::Vector3<f32>> = None;

            for visited in 0..segments {
                let segment = (start_segment + visited) % segments;
                let [p0, p1, p2, p3] = self.span((segment + shift) as isize);

                let mut last_position = p1;
                for sub_step in 1..=resolution {
                    let t = sub_step as f32 / resolution as f32;
                    let position = catmull_rom(t, p0, p1, p2, p3);
                    let delta = position - last_position;
                    last_position = position;
                    if delta.norm() <= f32::EPSILON {
                        continue;
                    }

                    let direction = delta / delta.norm();
                    if let Some(previous) = last_direction {
                        if previous.angle(&direction) > max_angle {
                            if resolution >= MAX_RESOLUTION {
                                break 'candidate;
                            }
                            resolution += 1;
                            start_segment = segment;
                            continue 'candidate;
                        }
                    }
                    last_direction = Some(direction);
                }
            }
            break;
        }

        info!(
            resolution,
            max_angle, "angle-bounded search settled on resolution"
        );
        self.set_resolution(resolution);
    }

    /// Raise the resolution until the measured length converges.
    ///
    /// Starting from resolution 1, each increment is kept while it
    /// still changes the total length by more than
    /// `delta_basis² × length`. Squaring the basis makes the knob feel
    /// linear: halving `delta_basis` quarters the tolerated error.
    /// Resolution 100 is the ceiling.
    pub fn optimize_by_length(&mut self, delta_basis: f32) {
        if self.points_count() < 2 {
            self.set_resolution(1);
            return;
        }

        self.set_resolution(1);
        let mut previous = self.length();

        for candidate in 2..=MAX_RESOLUTION {
            self.set_resolution(candidate);
            let delta = (self.length() - previous).abs();
            if delta <= delta_basis * delta_basis * self.length() {
                break;
            }
            previous = self.length();
        }

        info!(
            resolution = self.resolution(),
            delta_basis, "length convergence settled on resolution"
        );
    }
}
