//! Compound pose trajectories.
//!
//! These builders assemble the primitives into the motions a manipulator
//! actually executes. Poses follow the gripper convention used throughout
//! the crate: local +Z points forward out of the gripper and local X is the
//! opening direction.

use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

use nalgebra::{Matrix3, Matrix4, Vector3};
use tracing::debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::geometry::{
    NORMALIZE_EPSILON, distance_to_line, flat_orientation, orientation_of,
    pitch_gripper_orientation, position_of, validate_pose, validate_rotation,
};
use crate::linear::validate_speed;
use crate::{
    Path, PathError, Result, circular_arc_orientation_path, circular_arc_position_trajectory,
    circular_arc_trajectory, combine, constant_trajectory, linear_trajectory, slerp_trajectory,
    synchronize,
};

/// Straight-line motion from `p0` to `p1` at constant `speed`, holding
/// `orientation`.
///
/// # Errors
///
/// Returns [`PathError::InvalidRotation`] if `orientation` is not a rotation
/// and [`PathError::DegenerateGeometry`] for an unusable speed.
///
/// # Example
///
/// ```
/// use trajectory_types::linear_constant_orientation_trajectory;
/// use nalgebra::{Matrix3, Vector3};
///
/// let trajectory = linear_constant_orientation_trajectory(
///     Vector3::zeros(),
///     Vector3::new(0.3, 0.0, 0.0),
///     Matrix3::identity(),
///     0.1,
/// )
/// .unwrap();
///
/// assert!((trajectory.duration() - 3.0).abs() < 1e-12);
/// ```
pub fn linear_constant_orientation_trajectory(
    p0: Vector3<f64>,
    p1: Vector3<f64>,
    orientation: Matrix3<f64>,
    speed: f64,
) -> Result<Path<Matrix4<f64>>> {
    validate_rotation(&orientation)?;
    let position = linear_trajectory(p0, p1, speed)?;
    let orientation = constant_trajectory(orientation, position.duration())?;
    combine(&orientation, &position)
}

/// Straight-line motion between two poses with the orientation slerped over
/// the same duration.
///
/// # Errors
///
/// Returns [`PathError::InvalidRotation`] for non-rigid poses and
/// [`PathError::DegenerateGeometry`] for an unusable speed or coincident
/// positions (the orientation change would need zero time).
pub fn linear_slerp_trajectory(
    pose0: Matrix4<f64>,
    pose1: Matrix4<f64>,
    speed: f64,
) -> Result<Path<Matrix4<f64>>> {
    validate_pose(&pose0)?;
    validate_pose(&pose1)?;
    let position = linear_trajectory(position_of(&pose0), position_of(&pose1), speed)?;
    let duration = position.duration();
    if duration == 0.0 {
        return Err(PathError::degenerate(
            "poses share a position, orientation cannot be interpolated in zero time",
        ));
    }
    let orientation = slerp_trajectory(
        &[0.0, duration],
        &[orientation_of(&pose0), orientation_of(&pose1)],
    )?;
    combine(&orientation, &position)
}

/// Retract the gripper `distance` along its own backward direction (−Z),
/// keeping its orientation.
///
/// # Errors
///
/// Returns [`PathError::InvalidRotation`] for a non-rigid pose and
/// [`PathError::DegenerateGeometry`] for an unusable speed.
pub fn move_gripper_backwards_trajectory(
    start_pose: Matrix4<f64>,
    distance: f64,
    speed: f64,
) -> Result<Path<Matrix4<f64>>> {
    validate_pose(&start_pose)?;
    let orientation = orientation_of(&start_pose);
    let start = position_of(&start_pose);
    let backwards: Vector3<f64> = -orientation.column(2).into_owned();
    linear_constant_orientation_trajectory(start, start + backwards * distance, orientation, speed)
}

/// Slide the gripper `distance` backwards in the horizontal plane, keeping its
/// orientation. The backward direction (−Z) is projected onto the plane
/// and renormalized.
///
/// # Errors
///
/// Returns [`PathError::DegenerateGeometry`] if the gripper points straight
/// up or down, plus the errors of [`move_gripper_backwards_trajectory`].
pub fn slide_gripper_backwards_trajectory(
    start_pose: Matrix4<f64>,
    distance: f64,
    speed: f64,
) -> Result<Path<Matrix4<f64>>> {
    validate_pose(&start_pose)?;
    let orientation = orientation_of(&start_pose);
    let start = position_of(&start_pose);
    let backwards = -orientation.column(2).into_owned();
    let horizontal = Vector3::new(backwards.x, backwards.y, 0.0);
    let norm = horizontal.norm();
    if norm < NORMALIZE_EPSILON {
        return Err(PathError::degenerate(
            "gripper points vertically, no horizontal backward direction",
        ));
    }
    linear_constant_orientation_trajectory(
        start,
        start + horizontal * (distance / norm),
        orientation,
        speed,
    )
}

/// Rotate two grippers together about the vertical axis through the midpoint
/// of their positions. Positive angles are counterclockwise seen from above.
///
/// Both grippers sit at the same distance from that axis, so the two
/// trajectories share one duration.
///
/// # Errors
///
/// Returns [`PathError::DegenerateGeometry`] if the grippers are stacked
/// vertically (zero radius) or the speed is unusable, and
/// [`PathError::InvalidRotation`] for non-rigid poses.
pub fn rotate_pair_trajectories(
    pose0: Matrix4<f64>,
    pose1: Matrix4<f64>,
    angle: f64,
    speed: f64,
) -> Result<(Path<Matrix4<f64>>, Path<Matrix4<f64>>)> {
    let center = (position_of(&pose0) + position_of(&pose1)) / 2.0;
    let trajectory0 = circular_arc_trajectory(pose0, center, Vector3::z(), angle, speed)?;
    let trajectory1 = circular_arc_trajectory(pose1, center, Vector3::z(), angle, speed)?;
    synchronize(&trajectory0, &trajectory1)
}

/// Parameters of a circular fold.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FoldConfig {
    /// Pitch of the gripper at the start. It tilts the fingers down towards
    /// the cloth.
    pub start_pitch_angle: f64,

    /// Pitch of the gripper at the end of the fold.
    pub end_pitch_angle: f64,

    /// Height of the release point above the grasp height.
    pub end_height_offset: f64,

    /// Constant speed along the fold arc.
    pub speed: f64,
}

impl Default for FoldConfig {
    fn default() -> Self {
        Self {
            start_pitch_angle: FRAC_PI_4,
            end_pitch_angle: FRAC_PI_4,
            end_height_offset: 0.04,
            speed: 0.2,
        }
    }
}

impl FoldConfig {
    /// Set both pitch angles.
    #[must_use]
    pub fn with_pitch_angles(mut self, start: f64, end: f64) -> Self {
        self.start_pitch_angle = start;
        self.end_pitch_angle = end;
        self
    }

    /// Set the end height offset.
    #[must_use]
    pub fn with_end_height_offset(mut self, offset: f64) -> Self {
        self.end_height_offset = offset;
        self
    }

    /// Set the speed along the arc.
    #[must_use]
    pub fn with_speed(mut self, speed: f64) -> Self {
        self.speed = speed;
        self
    }

    /// Check that every field is finite and the speed is positive.
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("start pitch angle", self.start_pitch_angle),
            ("end pitch angle", self.end_pitch_angle),
            ("end height offset", self.end_height_offset),
        ];
        if let Some((name, value)) = fields.iter().find(|(_, value)| !value.is_finite()) {
            return Err(PathError::configuration(format!(
                "fold {name} must be finite, got {value}"
            )));
        }
        validate_speed(self.speed)
    }
}

/// Circular fold: carry a grasped point over a fold line and put it down on
/// the other side.
///
/// The grasp travels a circular arc about the fold line at `config.speed`.
/// The arc starts at the grasp and stops where its height above the fold
/// line equals the start height plus `config.end_height_offset`. The
/// orientation is slerped through three keyframes:
///
/// - start: flat along `approach_direction`, pitched down by `start_pitch_angle`
/// - halfway (at half the duration): the flat orientation rotated 90° about
///   the fold line
/// - end: the flat orientation rotated 180° about the fold line, pitched by
///   `end_pitch_angle`
///
/// `fold_line` is a point on the line and its direction. The fold rotates
/// counterclockwise about that direction.
///
/// # Errors
///
/// - [`PathError::DegenerateGeometry`] if the grasp lies on the fold line, the
///   start or end height cannot be reached on the arc, the approach direction
///   has no horizontal component, or the fold line direction is zero.
/// - [`PathError::Configuration`] for an invalid `config`.
pub fn circular_fold_trajectory(
    grasp_location: Vector3<f64>,
    approach_direction: Vector3<f64>,
    fold_line: (Vector3<f64>, Vector3<f64>),
    config: &FoldConfig,
) -> Result<Path<Matrix4<f64>>> {
    config.validate()?;
    let (fold_point, fold_direction) = fold_line;

    let radius = distance_to_line(&grasp_location, &fold_point, &fold_direction)?;
    if radius < NORMALIZE_EPSILON {
        return Err(PathError::degenerate("grasp location lies on the fold line"));
    }
    let start_height = grasp_location.z - fold_point.z;
    let start_delta = arc_elevation(start_height, radius)?;
    let end_delta = arc_elevation(start_height + config.end_height_offset, radius)?;
    let max_angle = PI - start_delta - end_delta;
    if max_angle <= 0.0 {
        return Err(PathError::degenerate(format!(
            "fold heights leave no arc to travel (angle {max_angle})"
        )));
    }

    let position = circular_arc_position_trajectory(
        grasp_location,
        fold_point,
        fold_direction,
        max_angle,
        config.speed,
    )?;
    let duration = position.duration();

    let flat = flat_orientation(&approach_direction)?;
    let over = circular_arc_orientation_path(flat, fold_direction, PI)?;
    let start_orientation = pitch_gripper_orientation(&flat, -config.start_pitch_angle)?;
    let middle_orientation = over.value_at(FRAC_PI_2);
    let end_orientation = pitch_gripper_orientation(&over.end(), config.end_pitch_angle)?;

    let orientation = slerp_trajectory(
        &[0.0, duration / 2.0, duration],
        &[start_orientation, middle_orientation, end_orientation],
    )?;
    debug!(radius, max_angle, duration, "Built circular fold trajectory");

    combine(&orientation, &position)
}

/// Angle above the horizontal at which the arc reaches `height`.
fn arc_elevation(height: f64, radius: f64) -> Result<f64> {
    let ratio = height / radius;
    if !(-1.0..=1.0).contains(&ratio) {
        return Err(PathError::degenerate(format!(
            "height {height} is unreachable on a fold arc of radius {radius}"
        )));
    }
    Ok(ratio.asin())
}
