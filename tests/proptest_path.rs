//! Property-based tests for path mutation and sampling.
//!
//! These tests use proptest to generate random paths and verify that
//! the windowed length-cache maintenance agrees with a full rebuild,
//! and that sampling stays finite and consistent.
//!
//! Run with: cargo test --test proptest_path

use nalgebra::Point3;
use proptest::prelude::*;
use proptest::test_runner::TestCaseError;
use spline_path::{Path, PathPoint, Space};

// =============================================================================
// Strategies for generating random paths
// =============================================================================

/// Generate a random control point position in a bounded range.
fn arb_position() -> impl Strategy<Value = [f32; 3]> {
    prop::array::uniform3(-100.0..100.0f32)
}

/// Generate a random control point with position only.
fn arb_point() -> impl Strategy<Value = PathPoint> {
    arb_position().prop_map(|[x, y, z]| PathPoint::from_coords(x, y, z))
}

/// Generate a path with a bounded number of points.
fn arb_path(
    min_points: usize,
    max_points: usize,
    resolution: u32,
) -> impl Strategy<Value = Path> {
    (
        prop::collection::vec(arb_point(), min_points..=max_points),
        any::<bool>(),
    )
        .prop_map(move |(points, looped)| Path::from_points(points, resolution, looped))
}

/// A single structural edit to apply to a path.
#[derive(Debug, Clone)]
enum Mutation {
    Add([f32; 3]),
    Insert(usize, [f32; 3]),
    Remove(usize),
    Move(usize, [f32; 3]),
}

fn arb_mutation() -> impl Strategy<Value = Mutation> {
    prop_oneof![
        arb_position().prop_map(Mutation::Add),
        (any::<usize>(), arb_position()).prop_map(|(i, p)| Mutation::Insert(i, p)),
        any::<usize>().prop_map(Mutation::Remove),
        (any::<usize>(), arb_position()).prop_map(|(i, p)| Mutation::Move(i, p)),
    ]
}

/// Apply a mutation, folding raw indices into the valid range and
/// skipping removals that would drain the path.
fn apply(path: &mut Path, mutation: &Mutation) {
    match *mutation {
        Mutation::Add([x, y, z]) => path.add_position(Point3::new(x, y, z), Space::Local),
        Mutation::Insert(index, [x, y, z]) => {
            let index = index % (path.points_count() + 1);
            path.insert_position(index, Point3::new(x, y, z), Space::Local)
                .unwrap();
        }
        Mutation::Remove(index) => {
            if path.points_count() > 2 {
                path.remove_point_at(index % path.points_count()).unwrap();
            }
        }
        Mutation::Move(index, [x, y, z]) => {
            let index = index % path.points_count();
            path.set_position(index, Point3::new(x, y, z), Space::Local)
                .unwrap();
        }
    }
}

/// Compare every observable length of two paths.
fn assert_same_lengths(mutated: &Path, rebuilt: &Path) -> Result<(), TestCaseError> {
    prop_assert_eq!(mutated.segments_count(), rebuilt.segments_count());
    for segment in 0..mutated.segments_count() {
        let a = mutated.segment_length(segment).unwrap();
        let b = rebuilt.segment_length(segment).unwrap();
        prop_assert!(
            (a - b).abs() <= 1e-3 * b.abs().max(1.0),
            "segment {} diverged: windowed {} vs rebuilt {}",
            segment,
            a,
            b
        );
    }
    prop_assert!(
        (mutated.length() - rebuilt.length()).abs() <= 1e-3 * rebuilt.length().max(1.0),
        "total length diverged: windowed {} vs rebuilt {}",
        mutated.length(),
        rebuilt.length()
    );
    Ok(())
}

// =============================================================================
// Property Tests: Windowed cache maintenance
// =============================================================================

proptest! {
    /// Windowed recomputes after any edit sequence agree with a full
    /// rebuild from the final points.
    #[test]
    fn windowed_recompute_matches_full_rebuild(
        mut path in arb_path(6, 16, 4),
        mutations in prop::collection::vec(arb_mutation(), 1..=8),
    ) {
        for mutation in &mutations {
            apply(&mut path, mutation);
        }

        let rebuilt = Path::from_points(path.points().to_vec(), path.resolution(), path.looped());
        assert_same_lengths(&path, &rebuilt)?;
    }

    /// The same holds on the opposite looped state, which reads the
    /// cache slots an open path leaves unused.
    #[test]
    fn windowed_recompute_covers_hidden_slots(
        mut path in arb_path(6, 12, 4),
        mutations in prop::collection::vec(arb_mutation(), 1..=6),
    ) {
        for mutation in &mutations {
            apply(&mut path, mutation);
        }
        path.set_looped(!path.looped());

        let rebuilt = Path::from_points(path.points().to_vec(), path.resolution(), path.looped());
        assert_same_lengths(&path, &rebuilt)?;
    }

    /// An explicit full rebuild never changes observable lengths.
    #[test]
    fn recalculate_is_idempotent(mut path in arb_path(2, 12, 8)) {
        let before: Vec<f32> = (0..path.segments_count())
            .map(|s| path.segment_length(s).unwrap())
            .collect();
        let total = path.length();

        path.recalculate();

        let after: Vec<f32> = (0..path.segments_count())
            .map(|s| path.segment_length(s).unwrap())
            .collect();
        prop_assert_eq!(before, after);
        prop_assert_eq!(total, path.length());
    }

    /// The total length is exactly the sum of the segment lengths.
    #[test]
    fn total_length_is_sum_of_segments(path in arb_path(2, 14, 4)) {
        let sum: f32 = (0..path.segments_count())
            .map(|s| path.segment_length(s).unwrap())
            .sum();
        prop_assert!((path.length() - sum).abs() <= 1e-4 * sum.max(1.0));
    }
}

// =============================================================================
// Property Tests: Sampling
// =============================================================================

proptest! {
    /// Whole-path sampling never panics and always yields finite data,
    /// including extrapolated and negative distances.
    #[test]
    fn sampling_is_always_finite(
        path in arb_path(1, 12, 4),
        distance in -3.0..5.0f32,
        normalized in any::<bool>(),
    ) {
        let sample = path.sample_at_distance(distance, normalized, Space::World).unwrap();
        prop_assert!(sample.position.coords.iter().all(|c| c.is_finite()));
        prop_assert!(sample.direction.iter().all(|c| c.is_finite()));
        prop_assert!(sample.rotation.quaternion().norm().is_finite());
    }

    /// Per-segment sampling clamps distances and stays finite.
    #[test]
    fn segment_sampling_is_always_finite(
        path in arb_path(2, 12, 4),
        distance in -10.0..200.0f32,
        segment_seed in any::<usize>(),
    ) {
        let segment = segment_seed % path.segments_count();
        let sample = path
            .sample_at_segment_distance(segment, distance, false, Space::Local)
            .unwrap();
        prop_assert!(sample.position.coords.iter().all(|c| c.is_finite()));
    }

    /// Segment start samples coincide with the segment's first control
    /// point.
    #[test]
    fn segment_start_is_exact(path in arb_path(2, 10, 4), segment_seed in any::<usize>()) {
        let segment = segment_seed % path.segments_count();
        let start = path
            .sample_at_segment_distance(segment, 0.0, false, Space::Local)
            .unwrap();
        // Distance zero short-circuits to a stored control point, so
        // the match is exact.
        prop_assert!(path
            .points()
            .iter()
            .any(|p| p.position == start.position));
    }
}
