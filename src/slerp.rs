//! Keyframe orientation interpolation.

use nalgebra::{Matrix3, Rotation3, UnitQuaternion};
use tracing::debug;

use crate::geometry::validate_rotation;
use crate::{Path, PathError, Result};

const SLERP_EPSILON: f64 = 1e-9;

/// Orientation keyframes with their quaternion form precomputed.
struct Keyframes {
    times: Vec<f64>,
    orientations: Vec<Matrix3<f64>>,
    quaternions: Vec<UnitQuaternion<f64>>,
}

impl Keyframes {
    fn evaluate(&self, t: f64) -> Matrix3<f64> {
        let last = self.times.len() - 1;
        // Index of the first keyframe strictly after t
        let upper = self.times.partition_point(|&time| time <= t);
        if upper == 0 {
            return self.orientations[0];
        }
        if upper > last {
            return self.orientations[last];
        }

        let i = upper - 1;
        let (t0, t1) = (self.times[i], self.times[i + 1]);
        if t == t0 {
            return self.orientations[i];
        }
        let fraction = (t - t0) / (t1 - t0);
        let (q0, q1) = (&self.quaternions[i], &self.quaternions[i + 1]);
        // `try_slerp` takes the shorter arc and yields `None` only when the
        // keyframes coincide to within `SLERP_EPSILON`
        q0.try_slerp(q1, fraction, SLERP_EPSILON)
            .unwrap_or(*q0)
            .to_rotation_matrix()
            .into_inner()
    }
}

/// Spherical linear interpolation through timed orientation keyframes.
///
/// The path spans `[times[0], times[n − 1]]`. Between two bracketing
/// keyframes it follows the shortest great-circle arc, and at every keyframe
/// time it returns that keyframe's matrix exactly.
///
/// # Errors
///
/// - [`PathError::InsufficientData`] for fewer than 2 keyframes.
/// - [`PathError::Configuration`] if `times` and `orientations` differ in
///   length, or the times are not finite and strictly increasing.
/// - [`PathError::InvalidRotation`] if any orientation is not a proper rotation.
///
/// # Example
///
/// ```
/// use trajectory_types::slerp_trajectory;
/// use nalgebra::{Matrix3, Rotation3, Vector3};
/// use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};
///
/// let quarter = *Rotation3::from_axis_angle(&Vector3::z_axis(), FRAC_PI_2).matrix();
/// let path = slerp_trajectory(&[0.0, 1.0], &[Matrix3::identity(), quarter]).unwrap();
///
/// let eighth = Rotation3::from_axis_angle(&Vector3::z_axis(), FRAC_PI_4);
/// assert!((path.value_at(0.5) - eighth.matrix()).norm() < 1e-12);
/// ```
pub fn slerp_trajectory(
    times: &[f64],
    orientations: &[Matrix3<f64>],
) -> Result<Path<Matrix3<f64>>> {
    if times.len() != orientations.len() {
        return Err(PathError::configuration(format!(
            "{} keyframe times given for {} orientations",
            times.len(),
            orientations.len()
        )));
    }
    if times.len() < 2 {
        return Err(PathError::insufficient_data(2, times.len()));
    }
    if times.iter().any(|t| !t.is_finite()) {
        return Err(PathError::configuration("keyframe times must be finite"));
    }
    if let Some(pair) = times.windows(2).find(|pair| pair[1] <= pair[0]) {
        return Err(PathError::configuration(format!(
            "keyframe times must be strictly increasing, got {} followed by {}",
            pair[0], pair[1]
        )));
    }
    for orientation in orientations {
        validate_rotation(orientation)?;
    }

    let quaternions = orientations
        .iter()
        .map(|m| UnitQuaternion::from_rotation_matrix(&Rotation3::from_matrix_unchecked(*m)))
        .collect();
    let keyframes = Keyframes {
        times: times.to_vec(),
        orientations: orientations.to_vec(),
        quaternions,
    };
    debug!(keyframes = times.len(), "Built slerp trajectory");

    let (start, end) = (times[0], times[times.len() - 1]);
    Ok(Path::from_fn(move |t| keyframes.evaluate(t), start, end))
}
