//! Circular-arc paths and trajectories.
//!
//! Every arc is produced by rigidly rotating a start value (point,
//! orientation or pose) about a rotation line given by a center and an axis.
//! Paths are parametrized by the swept angle over `[0, max_angle]`;
//! trajectories are parametrized by time and travel the arc at a constant
//! linear speed.
//!
//! A negative `max_angle` sweeps the other way: the axis is negated and the
//! domain stays `[0, |max_angle|]`.

use nalgebra::{Matrix3, Matrix4, Rotation3, Unit, Vector3};
use tracing::debug;

use crate::geometry::{
    NORMALIZE_EPSILON, distance_to_line, position_of, rotate_pose_unit, unit_axis, validate_pose,
    validate_rotation,
};
use crate::linear::validate_speed;
use crate::{Path, PathError, Result};

/// Rotation line plus sweep, normalized so the sweep is non-negative.
#[derive(Debug, Clone, Copy)]
struct Sweep {
    axis: Unit<Vector3<f64>>,
    max_angle: f64,
}

impl Sweep {
    fn new(axis: &Vector3<f64>, max_angle: f64) -> Result<Self> {
        if !max_angle.is_finite() {
            return Err(PathError::configuration(format!(
                "arc angle must be finite, got {max_angle}"
            )));
        }
        let axis = unit_axis(axis)?;
        Ok(if max_angle < 0.0 {
            Self {
                axis: -axis,
                max_angle: -max_angle,
            }
        } else {
            Self { axis, max_angle }
        })
    }

    fn rotation(&self, angle: f64) -> Rotation3<f64> {
        Rotation3::from_axis_angle(&self.axis, angle)
    }
}

/// Distance from `start` to the rotation line, rejecting points on the line.
fn arc_radius(start: &Vector3<f64>, center: &Vector3<f64>, axis: &Vector3<f64>) -> Result<f64> {
    let radius = distance_to_line(start, center, axis)?;
    if radius < NORMALIZE_EPSILON {
        return Err(PathError::degenerate(
            "start position lies on the rotation axis (radius is zero)",
        ));
    }
    Ok(radius)
}

/// Points on a circular arc as a function of the swept angle.
///
/// # Errors
///
/// Returns [`PathError::DegenerateGeometry`] for a zero-length axis and
/// [`PathError::Configuration`] for a non-finite angle.
pub fn circular_arc_position_path(
    start: Vector3<f64>,
    center: Vector3<f64>,
    axis: Vector3<f64>,
    max_angle: f64,
) -> Result<Path<Vector3<f64>>> {
    let sweep = Sweep::new(&axis, max_angle)?;
    Ok(Path::from_fn(
        move |angle| center + sweep.rotation(angle) * (start - center),
        0.0,
        sweep.max_angle,
    ))
}

/// Orientations rotated about a world-frame axis as a function of the angle.
///
/// # Errors
///
/// Returns [`PathError::InvalidRotation`] if `start_orientation` is not a
/// proper rotation, plus the errors of [`circular_arc_position_path`].
pub fn circular_arc_orientation_path(
    start_orientation: Matrix3<f64>,
    axis: Vector3<f64>,
    max_angle: f64,
) -> Result<Path<Matrix3<f64>>> {
    validate_rotation(&start_orientation)?;
    let sweep = Sweep::new(&axis, max_angle)?;
    Ok(Path::from_fn(
        move |angle| sweep.rotation(angle).matrix() * start_orientation,
        0.0,
        sweep.max_angle,
    ))
}

/// Poses rigidly rotated about the line `(center, axis)` as a function of the
/// angle.
///
/// # Errors
///
/// Returns [`PathError::InvalidRotation`] if `start_pose` is not a rigid
/// pose, plus the errors of [`circular_arc_position_path`].
pub fn circular_arc_path(
    start_pose: Matrix4<f64>,
    center: Vector3<f64>,
    axis: Vector3<f64>,
    max_angle: f64,
) -> Result<Path<Matrix4<f64>>> {
    validate_pose(&start_pose)?;
    let sweep = Sweep::new(&axis, max_angle)?;
    Ok(Path::from_fn(
        move |angle| rotate_pose_unit(&start_pose, &center, &sweep.axis, angle),
        0.0,
        sweep.max_angle,
    ))
}

/// Points on a circular arc travelled at constant linear `speed`.
///
/// The radius is the distance from `start` to the rotation line. The swept
/// angle at time `t` is `speed · t / radius`, so the duration is
/// `radius · |max_angle| / speed`.
///
/// # Errors
///
/// Returns [`PathError::DegenerateGeometry`] if the speed is not positive, the
/// axis has zero length, or `start` lies on the rotation line.
///
/// # Example
///
/// ```
/// use trajectory_types::circular_arc_position_trajectory;
/// use nalgebra::Vector3;
/// use std::f64::consts::PI;
///
/// let trajectory = circular_arc_position_trajectory(
///     Vector3::new(2.0, 0.0, 0.0),
///     Vector3::zeros(),
///     Vector3::z(),
///     PI,
///     1.0,
/// )
/// .unwrap();
///
/// // Half a circle of radius 2
/// assert!((trajectory.duration() - 2.0 * PI).abs() < 1e-12);
/// assert!((trajectory.end() - Vector3::new(-2.0, 0.0, 0.0)).norm() < 1e-12);
/// ```
pub fn circular_arc_position_trajectory(
    start: Vector3<f64>,
    center: Vector3<f64>,
    axis: Vector3<f64>,
    max_angle: f64,
    speed: f64,
) -> Result<Path<Vector3<f64>>> {
    validate_speed(speed)?;
    let sweep = Sweep::new(&axis, max_angle)?;
    let radius = arc_radius(&start, &center, &axis)?;
    let duration = radius * sweep.max_angle / speed;
    debug!(radius, duration, "Built circular arc position trajectory");

    Ok(Path::from_fn(
        move |time| center + sweep.rotation(speed * time / radius) * (start - center),
        0.0,
        duration,
    ))
}

/// Poses on a circular arc whose position travels at constant linear `speed`.
///
/// Same timing as [`circular_arc_position_trajectory`], using the position of
/// `start_pose` to determine the radius.
pub fn circular_arc_trajectory(
    start_pose: Matrix4<f64>,
    center: Vector3<f64>,
    axis: Vector3<f64>,
    max_angle: f64,
    speed: f64,
) -> Result<Path<Matrix4<f64>>> {
    validate_pose(&start_pose)?;
    validate_speed(speed)?;
    let sweep = Sweep::new(&axis, max_angle)?;
    let radius = arc_radius(&position_of(&start_pose), &center, &axis)?;
    let duration = radius * sweep.max_angle / speed;
    debug!(radius, duration, "Built circular arc pose trajectory");

    Ok(Path::from_fn(
        move |time| rotate_pose_unit(&start_pose, &center, &sweep.axis, speed * time / radius),
        0.0,
        duration,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{orientation_of, pose_from_parts};
    use approx::assert_relative_eq;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_position_path_by_angle() {
        let path =
            circular_arc_position_path(Vector3::x(), Vector3::zeros(), Vector3::z(), PI).unwrap();
        assert_relative_eq!(path.duration(), PI);
        assert_relative_eq!(path.value_at(FRAC_PI_2), Vector3::y(), epsilon = 1e-12);
        assert_relative_eq!(path.end(), -Vector3::x(), epsilon = 1e-12);
    }

    #[test]
    fn test_negative_angle_flips_axis() {
        let path =
            circular_arc_position_path(Vector3::x(), Vector3::zeros(), Vector3::z(), -FRAC_PI_2)
                .unwrap();
        assert_eq!(path.domain(), (0.0, FRAC_PI_2));
        assert_relative_eq!(path.end(), -Vector3::y(), epsilon = 1e-12);
    }

    #[test]
    fn test_orientation_path() {
        let path = circular_arc_orientation_path(Matrix3::identity(), Vector3::z(), PI).unwrap();
        let quarter = path.value_at(FRAC_PI_2);
        assert_relative_eq!(quarter * Vector3::x(), Vector3::y(), epsilon = 1e-12);
        assert!(validate_rotation(&quarter).is_ok());

        let not_rotation = Matrix3::identity() * 2.0;
        assert!(
            circular_arc_orientation_path(not_rotation, Vector3::z(), PI)
                .is_err_and(|e| e.is_invalid_rotation())
        );
    }

    #[test]
    fn test_pose_path_rotates_position_and_orientation() {
        let start = pose_from_parts(&Matrix3::identity(), &Vector3::new(1.0, 0.0, 0.5));
        let path = circular_arc_path(start, Vector3::zeros(), Vector3::z(), FRAC_PI_2).unwrap();
        let end = path.end();
        assert_relative_eq!(position_of(&end), Vector3::new(0.0, 1.0, 0.5), epsilon = 1e-12);
        assert_relative_eq!(
            orientation_of(&end) * Vector3::x(),
            Vector3::y(),
            epsilon = 1e-12
        );
        assert!(validate_pose(&end).is_ok());
    }

    #[test]
    fn test_position_trajectory_timing() {
        let trajectory = circular_arc_position_trajectory(
            Vector3::new(1.0, 0.0, 0.0),
            Vector3::zeros(),
            Vector3::z(),
            PI,
            1.0,
        )
        .unwrap();
        assert_relative_eq!(trajectory.duration(), PI, epsilon = 1e-12);
        assert_relative_eq!(trajectory.value_at(0.0), Vector3::x(), epsilon = 1e-12);
        assert_relative_eq!(trajectory.value_at(PI), -Vector3::x(), epsilon = 1e-12);

        // Constant speed: equal time steps cover equal chord lengths
        let a = trajectory.value_at(0.5);
        let b = trajectory.value_at(1.0);
        let c = trajectory.value_at(1.5);
        assert_relative_eq!((b - a).norm(), (c - b).norm(), epsilon = 1e-12);
    }

    #[test]
    fn test_radius_uses_projection_on_axis() {
        // Start is offset along the axis; only the perpendicular distance counts
        let trajectory = circular_arc_position_trajectory(
            Vector3::new(0.0, 2.0, 5.0),
            Vector3::zeros(),
            Vector3::z(),
            PI,
            2.0,
        )
        .unwrap();
        assert_relative_eq!(trajectory.duration(), PI, epsilon = 1e-12);
        assert_relative_eq!(trajectory.end(), Vector3::new(0.0, -2.0, 5.0), epsilon = 1e-12);
    }

    #[test]
    fn test_degenerate_inputs() {
        let on_axis = circular_arc_position_trajectory(
            Vector3::new(0.0, 0.0, 1.0),
            Vector3::zeros(),
            Vector3::z(),
            PI,
            1.0,
        );
        assert!(on_axis.is_err_and(|e| e.is_degenerate()));

        let zero_axis =
            circular_arc_position_path(Vector3::x(), Vector3::zeros(), Vector3::zeros(), PI);
        assert!(zero_axis.is_err_and(|e| e.is_degenerate()));

        let bad_speed = circular_arc_position_trajectory(
            Vector3::x(),
            Vector3::zeros(),
            Vector3::z(),
            PI,
            0.0,
        );
        assert!(bad_speed.is_err_and(|e| e.is_degenerate()));
    }

    #[test]
    fn test_pose_trajectory() {
        let start = pose_from_parts(&Matrix3::identity(), &Vector3::new(0.5, 0.0, 0.0));
        let trajectory =
            circular_arc_trajectory(start, Vector3::zeros(), Vector3::z(), PI, 0.25).unwrap();
        assert_relative_eq!(trajectory.duration(), 2.0 * PI, epsilon = 1e-12);
        assert_relative_eq!(
            position_of(&trajectory.end()),
            Vector3::new(-0.5, 0.0, 0.0),
            epsilon = 1e-12
        );
    }
}
