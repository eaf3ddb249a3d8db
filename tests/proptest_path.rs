//! Property-based tests for path construction and composition.
//!
//! These tests use proptest to generate random paths and verify the laws the
//! combinators must satisfy.
//!
//! Run with: cargo test -p trajectory-types -- proptest

#![allow(clippy::unwrap_used)]

use nalgebra::Rotation3;
use proptest::prelude::*;
use trajectory_types::{
    Matrix3, Path, Vector3, arc_length_parametrize, concatenate, cubic_bezier_path,
    integrate_arc_length, linear_trajectory, scale_speed, slerp_trajectory, synchronize,
};

// =============================================================================
// Strategies for generating random inputs
// =============================================================================

/// Generate a random point in a bounded box.
fn arb_point() -> impl Strategy<Value = Vector3<f64>> {
    prop::array::uniform3(-10.0..10.0f64).prop_map(|[x, y, z]| Vector3::new(x, y, z))
}

/// Generate a positive speed.
fn arb_speed() -> impl Strategy<Value = f64> {
    0.05..5.0f64
}

/// Generate a linear trajectory between two random points.
fn arb_linear_trajectory() -> impl Strategy<Value = Path<Vector3<f64>>> {
    (arb_point(), arb_point(), arb_speed())
        .prop_map(|(a, b, speed)| linear_trajectory(a, b, speed).unwrap())
}

/// Generate a scalar trajectory over `[0, duration]` with a smooth shape.
fn arb_scalar_trajectory() -> impl Strategy<Value = Path<f64>> {
    (0.1..10.0f64, -5.0..5.0f64, 0.1..3.0f64).prop_map(|(duration, amplitude, frequency)| {
        Path::new(
            move |t: f64| amplitude * (frequency * t).sin() + t,
            0.0,
            duration,
        )
        .unwrap()
    })
}

/// Generate a random rotation from an axis-angle vector.
fn arb_rotation() -> impl Strategy<Value = Matrix3<f64>> {
    prop::array::uniform3(-3.0..3.0f64).prop_map(|[x, y, z]| {
        *Rotation3::new(Vector3::new(x, y, z)).matrix()
    })
}

/// Generate strictly increasing keyframe times with matching rotations.
fn arb_keyframes() -> impl Strategy<Value = (Vec<f64>, Vec<Matrix3<f64>>)> {
    (2usize..6).prop_flat_map(|n| {
        (
            -5.0..5.0f64,
            prop::collection::vec(0.1..2.0f64, n - 1),
            prop::collection::vec(arb_rotation(), n),
        )
            .prop_map(|(start, gaps, rotations)| {
                let mut times = vec![start];
                for gap in gaps {
                    let last = times[times.len() - 1];
                    times.push(last + gap);
                }
                (times, rotations)
            })
    })
}

// =============================================================================
// Path laws
// =============================================================================

proptest! {
    #[test]
    fn proptest_duration_and_endpoint_law(path in arb_linear_trajectory()) {
        prop_assert_eq!(path.duration(), path.end_time() - path.start_time());
        prop_assert_eq!(path.start(), path.value_at(path.start_time()));
        prop_assert_eq!(path.end(), path.value_at(path.end_time()));
    }

    #[test]
    fn proptest_linear_trajectory_duration(
        a in arb_point(), b in arb_point(), speed in arb_speed()
    ) {
        let path = linear_trajectory(a, b, speed).unwrap();
        let expected = (b - a).norm() / speed;
        prop_assert!((path.duration() - expected).abs() < 1e-9);
        prop_assert!((path.end() - b).norm() < 1e-9);
    }

    #[test]
    fn proptest_evaluation_is_clamped(path in arb_scalar_trajectory(), overshoot in 0.0..100.0f64) {
        prop_assert_eq!(path.value_at(path.end_time() + overshoot), path.end());
        prop_assert_eq!(path.value_at(path.start_time() - overshoot), path.start());
    }
}

// =============================================================================
// Combinator laws
// =============================================================================

proptest! {
    #[test]
    fn proptest_scale_speed_identity(path in arb_scalar_trajectory(), fraction in 0.0..1.0f64) {
        let same = scale_speed(&path, 1.0).unwrap();
        let t = fraction * path.duration();
        prop_assert_eq!(same.domain(), path.domain());
        prop_assert_eq!(same.value_at(t), path.value_at(t));
    }

    #[test]
    fn proptest_scale_speed_duration(path in arb_scalar_trajectory(), factor in 0.1..10.0f64) {
        let scaled = scale_speed(&path, factor).unwrap();
        prop_assert!((scaled.duration() - path.duration() / factor).abs() < 1e-9);
        prop_assert!((scaled.end() - path.end()).abs() < 1e-9);
    }

    #[test]
    fn proptest_synchronize_law(a in arb_scalar_trajectory(), b in arb_linear_trajectory()) {
        let longest = a.duration().max(b.duration());
        let (a2, b2) = synchronize(&a, &b).unwrap();
        prop_assert!((a2.duration() - longest).abs() < 1e-12);
        prop_assert!((b2.duration() - longest).abs() < 1e-12);
        prop_assert_eq!(a2.start_time(), 0.0);
        prop_assert_eq!(b2.start_time(), 0.0);
        prop_assert!((a2.end() - a.end()).abs() < 1e-9);
    }

    #[test]
    fn proptest_concatenation_duration_law(
        paths in prop::collection::vec(arb_scalar_trajectory(), 1..6)
    ) {
        let total: f64 = paths.iter().map(Path::duration).sum();
        let joined = concatenate(&paths).unwrap();
        prop_assert!((joined.duration() - total).abs() < 1e-9);
        prop_assert_eq!(joined.start(), paths[0].start());
        let last = paths[paths.len() - 1].end();
        prop_assert!((joined.value_at(total + 1.0) - last).abs() < 1e-9);
    }
}

// =============================================================================
// Slerp and arc-length laws
// =============================================================================

proptest! {
    #[test]
    fn proptest_slerp_exactness((times, rotations) in arb_keyframes()) {
        let path = slerp_trajectory(&times, &rotations).unwrap();
        for (t, r) in times.iter().zip(&rotations) {
            prop_assert!((path.value_at(*t) - r).norm() < 1e-12);
        }
        let mid = (times[0] + times[1]) / 2.0;
        let m = path.value_at(mid);
        prop_assert!((m.transpose() * m - Matrix3::identity()).norm() < 1e-9);
    }

    #[test]
    fn proptest_arc_length_endpoints(
        p0 in arb_point(), p1 in arb_point(), p2 in arb_point(), p3 in arb_point()
    ) {
        let curve = cubic_bezier_path(p0, p1, p2, p3);
        let by_length = arc_length_parametrize(&curve);
        prop_assert_eq!(by_length.start(), curve.start());
        prop_assert_eq!(by_length.end(), curve.end());

        prop_assert_eq!(by_length.start_time(), 0.0);
        let estimate = integrate_arc_length(&curve, 20_000).unwrap();
        prop_assert!((by_length.end_time() - estimate).abs() <= 1e-2 * estimate.max(1.0));
    }
}
