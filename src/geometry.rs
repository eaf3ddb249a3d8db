//! Rigid-transform helpers shared by the builders.
//!
//! Orientations are 3×3 rotation matrices and poses are 4×4 homogeneous
//! matrices with the orientation in the top-left block and the position in
//! the top-right column. Rotation axes are normalized internally.

use nalgebra::{Matrix3, Matrix4, Rotation3, Unit, Vector3};

use crate::{PathError, Result};

/// Tolerance for orthogonality and determinant checks.
pub const ROTATION_TOLERANCE: f64 = 1e-6;

/// Norms below this are treated as zero when normalizing.
pub(crate) const NORMALIZE_EPSILON: f64 = 1e-12;

/// Normalize a rotation axis.
pub(crate) fn unit_axis(axis: &Vector3<f64>) -> Result<Unit<Vector3<f64>>> {
    Unit::try_new(*axis, NORMALIZE_EPSILON)
        .ok_or_else(|| PathError::degenerate(format!("rotation axis {axis:?} has zero length")))
}

/// Rotate a vector about an axis through the origin.
///
/// # Errors
///
/// Returns [`PathError::DegenerateGeometry`] if `axis` has zero length.
pub fn rotate_vector(
    vector: &Vector3<f64>,
    axis: &Vector3<f64>,
    angle: f64,
) -> Result<Vector3<f64>> {
    let axis = unit_axis(axis)?;
    Ok(Rotation3::from_axis_angle(&axis, angle) * vector)
}

/// Rotate a point about the line through `center` along `axis`.
///
/// # Example
///
/// ```
/// use trajectory_types::rotate_point;
/// use nalgebra::Vector3;
/// use std::f64::consts::FRAC_PI_2;
///
/// let p = rotate_point(&Vector3::x(), &Vector3::zeros(), &Vector3::z(), FRAC_PI_2).unwrap();
/// assert!((p - Vector3::y()).norm() < 1e-12);
/// ```
pub fn rotate_point(
    point: &Vector3<f64>,
    center: &Vector3<f64>,
    axis: &Vector3<f64>,
    angle: f64,
) -> Result<Vector3<f64>> {
    let axis = unit_axis(axis)?;
    Ok(center + Rotation3::from_axis_angle(&axis, angle) * (point - center))
}

/// Rotate an orientation about a world-frame axis (left multiplication).
pub fn rotate_orientation(
    orientation: &Matrix3<f64>,
    axis: &Vector3<f64>,
    angle: f64,
) -> Result<Matrix3<f64>> {
    let axis = unit_axis(axis)?;
    Ok(Rotation3::from_axis_angle(&axis, angle).matrix() * orientation)
}

/// Rotate a pose rigidly about the line through `center` along `axis`.
///
/// Both the position and the orientation of the pose are rotated.
pub fn rotate_pose(
    pose: &Matrix4<f64>,
    center: &Vector3<f64>,
    axis: &Vector3<f64>,
    angle: f64,
) -> Result<Matrix4<f64>> {
    let axis = unit_axis(axis)?;
    Ok(rotate_pose_unit(pose, center, &axis, angle))
}

pub(crate) fn rotate_pose_unit(
    pose: &Matrix4<f64>,
    center: &Vector3<f64>,
    axis: &Unit<Vector3<f64>>,
    angle: f64,
) -> Matrix4<f64> {
    let rotation = Rotation3::from_axis_angle(axis, angle);
    let orientation = rotation.matrix() * orientation_of(pose);
    let position = center + rotation * (position_of(pose) - center);
    pose_from_parts(&orientation, &position)
}

/// Orthogonally project a point onto the line through `line_point` along
/// `line_direction`.
///
/// # Errors
///
/// Returns [`PathError::DegenerateGeometry`] if `line_direction` has zero length.
pub fn project_point_on_line(
    point: &Vector3<f64>,
    line_point: &Vector3<f64>,
    line_direction: &Vector3<f64>,
) -> Result<Vector3<f64>> {
    let direction = Unit::try_new(*line_direction, NORMALIZE_EPSILON)
        .ok_or_else(|| PathError::degenerate("line direction has zero length"))?;
    let along = (point - line_point).dot(direction.as_ref());
    Ok(line_point + direction.into_inner() * along)
}

/// Distance from a point to the line through `line_point` along `line_direction`.
pub fn distance_to_line(
    point: &Vector3<f64>,
    line_point: &Vector3<f64>,
    line_direction: &Vector3<f64>,
) -> Result<f64> {
    Ok((project_point_on_line(point, line_point, line_direction)? - point).norm())
}

/// Assemble a pose from an orientation and a position.
#[must_use]
pub fn pose_from_parts(orientation: &Matrix3<f64>, position: &Vector3<f64>) -> Matrix4<f64> {
    let mut pose = Matrix4::identity();
    pose.fixed_view_mut::<3, 3>(0, 0).copy_from(orientation);
    pose.fixed_view_mut::<3, 1>(0, 3).copy_from(position);
    pose
}

/// The orientation block of a pose.
#[must_use]
pub fn orientation_of(pose: &Matrix4<f64>) -> Matrix3<f64> {
    pose.fixed_view::<3, 3>(0, 0).into_owned()
}

/// The position column of a pose.
#[must_use]
pub fn position_of(pose: &Matrix4<f64>) -> Vector3<f64> {
    pose.fixed_view::<3, 1>(0, 3).into_owned()
}

/// Check that a matrix is a proper rotation (orthogonal, determinant +1).
///
/// # Errors
///
/// Returns [`PathError::InvalidRotation`] naming the violated property.
pub fn validate_rotation(orientation: &Matrix3<f64>) -> Result<()> {
    if orientation.iter().any(|x| !x.is_finite()) {
        return Err(PathError::invalid_rotation("matrix has non-finite entries"));
    }
    let orthogonality = (orientation.transpose() * orientation - Matrix3::identity()).norm();
    if orthogonality > ROTATION_TOLERANCE {
        return Err(PathError::invalid_rotation(format!(
            "matrix is not orthogonal (deviation {orthogonality:e})"
        )));
    }
    let determinant = orientation.determinant();
    if (determinant - 1.0).abs() > ROTATION_TOLERANCE {
        return Err(PathError::invalid_rotation(format!(
            "determinant is {determinant}, expected 1"
        )));
    }
    Ok(())
}

/// Check that a matrix is a rigid pose: rotation block plus `[0, 0, 0, 1]`
/// bottom row.
pub fn validate_pose(pose: &Matrix4<f64>) -> Result<()> {
    let bottom = pose.fixed_view::<1, 4>(3, 0);
    let expected = [0.0, 0.0, 0.0, 1.0];
    if bottom
        .iter()
        .zip(expected)
        .any(|(actual, expected)| (actual - expected).abs() > ROTATION_TOLERANCE)
    {
        return Err(PathError::invalid_rotation("pose bottom row must be [0, 0, 0, 1]"));
    }
    if position_of(pose).iter().any(|x| !x.is_finite()) {
        return Err(PathError::invalid_rotation("pose position is not finite"));
    }
    validate_rotation(&orientation_of(pose))
}

/// Project a direction onto the horizontal plane and normalize it.
fn horizontal_unit(direction: &Vector3<f64>, name: &str) -> Result<Vector3<f64>> {
    let horizontal = Vector3::new(direction.x, direction.y, 0.0);
    let norm = horizontal.norm();
    if norm < NORMALIZE_EPSILON {
        return Err(PathError::degenerate(format!(
            "{name} has no horizontal component"
        )));
    }
    Ok(horizontal / norm)
}

/// Gripper orientation with local Z along `forward_direction` and the gripper
/// opening towards world up (local X = +Z).
///
/// The direction is expected in the horizontal plane; any vertical component
/// is discarded.
pub fn flat_orientation(forward_direction: &Vector3<f64>) -> Result<Matrix3<f64>> {
    let z = horizontal_unit(forward_direction, "gripper forward direction")?;
    let x = Vector3::z();
    let y = z.cross(&x);
    Ok(Matrix3::from_columns(&[x, y, z]))
}

/// Gripper orientation pointing straight down (local Z = −Z) that opens
/// along `open_direction`.
///
/// The direction is expected in the horizontal plane; any vertical component
/// is discarded.
pub fn top_down_orientation(open_direction: &Vector3<f64>) -> Result<Matrix3<f64>> {
    let x = horizontal_unit(open_direction, "gripper open direction")?;
    let z = -Vector3::z();
    let y = z.cross(&x);
    Ok(Matrix3::from_columns(&[x, y, z]))
}

/// Rotate a gripper orientation about its own local Y axis.
pub fn pitch_gripper_orientation(
    orientation: &Matrix3<f64>,
    pitch_angle: f64,
) -> Result<Matrix3<f64>> {
    let local_y: Vector3<f64> = orientation.column(1).into_owned();
    rotate_orientation(orientation, &local_y, pitch_angle)
}
