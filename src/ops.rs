//! Path combinators: concatenate, combine, split, scale speed, synchronize
//! and retime.
//!
//! Combinators never touch their inputs. They capture clones of the input
//! paths (which share the wrapped functions) and return new paths.

use nalgebra::{Matrix3, Matrix4, Vector3};
use tracing::debug;

use crate::geometry::{orientation_of, pose_from_parts, position_of};
use crate::path::bounds_match;
use crate::{Path, PathError, Result};

/// Sequential composition of paths.
///
/// Each input is treated as occupying `[0, duration_i]` and the segments are
/// stacked, so the result has domain `[0, Σ duration_i]`. To evaluate at `t`
/// the segments are walked in order, subtracting each duration from `t`,
/// until one satisfies `remaining ≤ duration_i`; that segment is evaluated at
/// `start_time_i + remaining`. At an exact boundary the earlier segment is
/// selected (at its end). Past the total duration the final segment's end
/// value is returned.
///
/// # Errors
///
/// Returns [`PathError::InsufficientData`] if `paths` is empty.
///
/// # Example
///
/// ```
/// use trajectory_types::{Path, concatenate};
///
/// let a = Path::new(|t: f64| t, 0.0, 1.0).unwrap();
/// let b = Path::new(|t: f64| 1.0 + 2.0 * t, 0.0, 2.0).unwrap();
/// let ab = concatenate(&[a, b.clone()]).unwrap();
///
/// assert_eq!(ab.duration(), 3.0);
/// assert_eq!(ab.value_at(1.5), b.value_at(0.5));
/// ```
pub fn concatenate<V: 'static>(paths: &[Path<V>]) -> Result<Path<V>> {
    if paths.is_empty() {
        return Err(PathError::insufficient_data(1, 0));
    }
    let segments: Vec<Path<V>> = paths.to_vec();
    let total: f64 = segments.iter().map(Path::duration).sum();
    debug!(segments = segments.len(), total, "Concatenated paths");

    Ok(Path::from_fn(
        move |t| {
            let mut remaining = t;
            for segment in &segments {
                let duration = segment.duration();
                if remaining <= duration {
                    return segment.value_at(segment.start_time() + remaining);
                }
                remaining -= duration;
            }
            segments[segments.len() - 1].end()
        },
        0.0,
        total,
    ))
}

/// Merge an orientation path and a position path into a pose path.
///
/// At every parameter the orientation fills the top-left 3×3 block and the
/// position the top-right column of a 4×4 homogeneous matrix.
///
/// # Errors
///
/// Returns [`PathError::Configuration`] if the two domains differ.
pub fn combine(
    orientation: &Path<Matrix3<f64>>,
    position: &Path<Vector3<f64>>,
) -> Result<Path<Matrix4<f64>>> {
    if !bounds_match(orientation.start_time(), position.start_time())
        || !bounds_match(orientation.end_time(), position.end_time())
    {
        return Err(PathError::configuration(format!(
            "orientation domain [{}, {}] does not match position domain [{}, {}]",
            orientation.start_time(),
            orientation.end_time(),
            position.start_time(),
            position.end_time()
        )));
    }

    let start = orientation.start_time().min(position.start_time());
    let end = orientation.end_time().max(position.end_time());
    let orientation = orientation.clone();
    let position = position.clone();
    Ok(Path::from_fn(
        move |t| pose_from_parts(&orientation.value_at(t), &position.value_at(t)),
        start,
        end,
    ))
}

/// Split a pose path into its orientation and position paths.
///
/// Both outputs share the pose path's domain.
pub fn split(pose: &Path<Matrix4<f64>>) -> (Path<Matrix3<f64>>, Path<Vector3<f64>>) {
    (
        pose.map(|m| orientation_of(&m)),
        pose.map(|m| position_of(&m)),
    )
}

fn validate_trajectory<V: 'static>(path: &Path<V>, what: &str) -> Result<()> {
    if !bounds_match(path.start_time(), 0.0) {
        return Err(PathError::configuration(format!(
            "{what} must start at 0, starts at {}",
            path.start_time()
        )));
    }
    Ok(())
}

/// Re-time a trajectory by a constant speed factor.
///
/// `factor > 1` speeds the trajectory up (shorter duration), `factor < 1`
/// slows it down. The result has domain `[0, end_time / factor]` and
/// `value_at(t) = path.value_at(t · factor)`.
///
/// # Errors
///
/// Returns [`PathError::Configuration`] if `factor` is not positive and
/// finite or `path` does not start at 0.
///
/// # Example
///
/// ```
/// use trajectory_types::{linear_trajectory, scale_speed};
/// use nalgebra::Vector3;
///
/// let slow = linear_trajectory(Vector3::<f64>::zeros(), Vector3::x(), 1.0).unwrap();
/// let fast = scale_speed(&slow, 2.0).unwrap();
///
/// assert_eq!(fast.duration(), 0.5);
/// assert_eq!(fast.value_at(0.25), slow.value_at(0.5));
/// ```
pub fn scale_speed<V: 'static>(path: &Path<V>, factor: f64) -> Result<Path<V>> {
    if !factor.is_finite() || factor <= 0.0 {
        return Err(PathError::configuration(format!(
            "speed factor must be positive and finite, got {factor}"
        )));
    }
    validate_trajectory(path, "scaled path")?;
    Ok(stretch(path, factor, path.end_time() / factor))
}

fn stretch<V: 'static>(path: &Path<V>, factor: f64, end_time: f64) -> Path<V> {
    let inner = path.clone();
    Path::from_fn(move |t| inner.value_at(t * factor), 0.0, end_time)
}

/// Slow the shorter of two trajectories down so both share the longer
/// duration.
///
/// The longer trajectory is returned unchanged. A zero-duration trajectory
/// cannot be stretched by a speed factor, so it is held at its value over
/// the longer duration instead.
///
/// # Errors
///
/// Returns [`PathError::Configuration`] if either path does not start at 0.
pub fn synchronize<A, B>(a: &Path<A>, b: &Path<B>) -> Result<(Path<A>, Path<B>)>
where
    A: Clone + Send + Sync + 'static,
    B: Clone + Send + Sync + 'static,
{
    validate_trajectory(a, "first trajectory")?;
    validate_trajectory(b, "second trajectory")?;

    let (da, db) = (a.duration(), b.duration());
    if da > db {
        debug!(from = db, to = da, "Slowing second trajectory to synchronize");
        Ok((a.clone(), slow_to(b, da)))
    } else if db > da {
        debug!(from = da, to = db, "Slowing first trajectory to synchronize");
        Ok((slow_to(a, db), b.clone()))
    } else {
        Ok((a.clone(), b.clone()))
    }
}

fn slow_to<V: Clone + Send + Sync + 'static>(path: &Path<V>, duration: f64) -> Path<V> {
    if path.duration() == 0.0 {
        let value = path.start();
        return Path::from_fn(move |_| value.clone(), 0.0, duration);
    }
    stretch(path, path.duration() / duration, duration)
}

/// Re-time a path with a normalized motion profile.
///
/// The result is a trajectory over `[0, duration]`. At time `t` the profile
/// is evaluated at the matching fraction of its own domain, and its output
/// (a fraction in `[0, 1]`) selects how far along `path` to be:
/// `path(start + profile(t / duration) · path.duration)`.
///
/// # Errors
///
/// Returns [`PathError::Configuration`] if `duration` is negative or not finite.
pub fn retime<V: 'static>(path: &Path<V>, profile: &Path<f64>, duration: f64) -> Result<Path<V>> {
    if !duration.is_finite() || duration < 0.0 {
        return Err(PathError::configuration(format!(
            "retimed duration must be non-negative and finite, got {duration}"
        )));
    }
    let inner = path.clone();
    let profile = profile.clone();
    Ok(Path::from_fn(
        move |t| {
            let fraction = if duration > 0.0 { t / duration } else { 0.0 };
            let u = profile.start_time() + fraction * profile.duration();
            let s = profile.value_at(u);
            inner.value_at(inner.start_time() + s * inner.duration())
        },
        0.0,
        duration,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{constant_trajectory, linear_path, linear_trajectory};
    use approx::assert_relative_eq;
    use nalgebra::Rotation3;

    fn ramp(duration: f64) -> Path<f64> {
        Path::new(move |t| t / duration, 0.0, duration).unwrap()
    }

    #[test]
    fn test_concatenate_duration_and_lookup() {
        let a = ramp(1.0);
        let b = Path::new(|t| 10.0 + t, 0.0, 2.0).unwrap();
        let ab = concatenate(&[a.clone(), b.clone()]).unwrap();
        assert_relative_eq!(ab.duration(), 3.0);
        assert_relative_eq!(ab.value_at(0.5), a.value_at(0.5));
        assert_relative_eq!(ab.value_at(1.5), b.value_at(0.5));
        assert_relative_eq!(ab.value_at(3.0), b.end());
    }

    #[test]
    fn test_concatenate_boundary_selects_earlier_segment() {
        let a = Path::new(|_| 1.0, 0.0, 1.0).unwrap();
        let b = Path::new(|_| 2.0, 0.0, 1.0).unwrap();
        let ab = concatenate(&[a, b]).unwrap();
        assert_relative_eq!(ab.value_at(1.0), 1.0);
        assert_relative_eq!(ab.value_at(1.0 + 1e-9), 2.0);
    }

    #[test]
    fn test_concatenate_overflow_clamps_to_last_end() {
        let ab = concatenate(&[ramp(1.0), ramp(1.0)]).unwrap();
        assert_relative_eq!(ab.value_at_unchecked(5.0), 1.0);
        assert_relative_eq!(ab.value_at(5.0), 1.0);
    }

    #[test]
    fn test_concatenate_offsets_into_segment_domain() {
        let shifted = Path::new(|t| t, 5.0, 6.0).unwrap();
        let joined = concatenate(&[ramp(1.0), shifted]).unwrap();
        assert_relative_eq!(joined.duration(), 2.0);
        assert_relative_eq!(joined.value_at(1.5), 5.5);
    }

    #[test]
    fn test_concatenate_requires_a_path() {
        assert!(concatenate::<f64>(&[]).is_err_and(|e| e.is_insufficient_data()));
    }

    #[test]
    fn test_combine_and_split() {
        let orientation_path = Path::unit(|t| *Rotation3::from_euler_angles(0.0, 0.0, t).matrix());
        let position_path = linear_path(Vector3::zeros(), Vector3::new(1.0, 2.0, 3.0));
        let pose = combine(&orientation_path, &position_path).unwrap();
        assert_eq!(pose.domain(), (0.0, 1.0));

        let m = pose.value_at(0.5);
        assert_relative_eq!(position_of(&m), Vector3::new(0.5, 1.0, 1.5), epsilon = 1e-12);
        assert_relative_eq!(orientation_of(&m), orientation_path.value_at(0.5));
        assert_relative_eq!(m[(3, 3)], 1.0);

        let (orientation, position) = split(&pose);
        assert_eq!(orientation.domain(), pose.domain());
        assert_relative_eq!(position.value_at(0.25), position_path.value_at(0.25), epsilon = 1e-12);
        assert_relative_eq!(orientation.value_at(0.25), orientation_path.value_at(0.25));
    }

    #[test]
    fn test_combine_rejects_mismatched_domains() {
        let orientation = constant_trajectory(Matrix3::identity(), 2.0).unwrap();
        let position = linear_trajectory(Vector3::<f64>::zeros(), Vector3::x(), 1.0).unwrap();
        assert!(combine(&orientation, &position).is_err_and(|e| e.is_configuration()));
    }

    #[test]
    fn test_scale_speed() {
        let path = ramp(2.0);
        let fast = scale_speed(&path, 4.0).unwrap();
        assert_relative_eq!(fast.duration(), 0.5);
        assert_relative_eq!(fast.value_at(0.25), path.value_at(1.0));

        let slow = scale_speed(&path, 0.5).unwrap();
        assert_relative_eq!(slow.duration(), 4.0);
        assert_relative_eq!(slow.end(), path.end());
    }

    #[test]
    fn test_scale_speed_identity() {
        let path = ramp(3.0);
        let same = scale_speed(&path, 1.0).unwrap();
        assert_eq!(same.domain(), path.domain());
        for i in 0..=30 {
            let t = f64::from(i) / 10.0;
            assert_relative_eq!(same.value_at(t), path.value_at(t));
        }
    }

    #[test]
    fn test_scale_speed_rejects_bad_inputs() {
        for factor in [0.0, -2.0, f64::NAN, f64::INFINITY] {
            assert!(scale_speed(&ramp(1.0), factor).is_err_and(|e| e.is_configuration()));
        }
        let shifted = Path::new(|t| t, 1.0, 2.0).unwrap();
        assert!(scale_speed(&shifted, 2.0).is_err_and(|e| e.is_configuration()));
    }

    #[test]
    fn test_synchronize() {
        let a = ramp(2.0);
        let b = ramp(4.0);
        let (a2, b2) = synchronize(&a, &b).unwrap();
        assert_relative_eq!(a2.duration(), 4.0);
        assert_relative_eq!(b2.duration(), 4.0);
        assert_relative_eq!(a2.value_at(2.0), a.value_at(1.0));
        assert_relative_eq!(b2.value_at(1.0), b.value_at(1.0));

        // Order does not matter
        let (b3, a3) = synchronize(&b, &a).unwrap();
        assert_relative_eq!(a3.duration(), 4.0);
        assert_relative_eq!(b3.duration(), 4.0);
    }

    #[test]
    fn test_synchronize_mixed_value_types() {
        let position = linear_trajectory(Vector3::<f64>::zeros(), Vector3::x(), 0.5).unwrap();
        let orientation = constant_trajectory(Matrix3::<f64>::identity(), 1.0).unwrap();
        let (orientation, position) = synchronize(&orientation, &position).unwrap();
        assert_relative_eq!(orientation.duration(), position.duration());
        assert!(combine(&orientation, &position).is_ok());
    }

    #[test]
    fn test_synchronize_zero_duration_is_held() {
        let still = constant_trajectory(7.0, 0.0).unwrap();
        let (held, other) = synchronize(&still, &ramp(2.0)).unwrap();
        assert_relative_eq!(held.duration(), 2.0);
        assert_relative_eq!(other.duration(), 2.0);
        assert_relative_eq!(held.value_at(1.3), 7.0);
    }

    #[test]
    fn test_synchronized_zero_duration_pose_is_shared_across_threads() {
        let pose = Matrix4::<f64>::identity();
        let still = constant_trajectory(pose, 0.0).unwrap();
        let moving = constant_trajectory(pose, 3.0).unwrap();
        let (held, _) = synchronize(&still, &moving).unwrap();

        let values: Vec<Matrix4<f64>> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..3)
                .map(|i| {
                    let held = &held;
                    scope.spawn(move || held.value_at(f64::from(i)))
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });
        assert_relative_eq!(held.duration(), 3.0);
        assert!(values.iter().all(|v| *v == pose));
    }

    #[test]
    fn test_retime_with_profile() {
        let path = linear_path(0.0_f64, 10.0);
        let profile = Path::unit(|t| t * t);
        let retimed = retime(&path, &profile, 2.0).unwrap();
        assert_eq!(retimed.domain(), (0.0, 2.0));
        assert_relative_eq!(retimed.value_at(1.0), 2.5, epsilon = 1e-12);
        assert_relative_eq!(retimed.end(), 10.0, epsilon = 1e-12);
        assert!(retime(&path, &profile, -1.0).is_err());
    }
}
