//! Straight-line and constant paths.

use crate::{Path, PathError, Result, VectorValue};

/// Check that a travel speed is usable as a divisor.
pub(crate) fn validate_speed(speed: f64) -> Result<()> {
    if !speed.is_finite() || speed <= 0.0 {
        return Err(PathError::degenerate(format!(
            "speed must be positive and finite, got {speed}"
        )));
    }
    Ok(())
}

/// Linear interpolation from `a` to `b` over the unit domain.
///
/// `value_at(t) = a + t·(b − a)`.
///
/// # Example
///
/// ```
/// use trajectory_types::linear_path;
/// use nalgebra::Vector3;
///
/// let path = linear_path(Vector3::zeros(), Vector3::new(2.0, 0.0, 0.0));
/// assert_eq!(path.value_at(0.25), Vector3::new(0.5, 0.0, 0.0));
/// ```
pub fn linear_path<V: VectorValue>(a: V, b: V) -> Path<V> {
    Path::unit(move |t| a.lerp(&b, t))
}

/// A straight line from `a` to `b` travelled at constant `speed`.
///
/// The domain is `[0, ‖b − a‖ / speed]`. When `a == b` the trajectory has
/// zero duration and holds `a`.
///
/// # Errors
///
/// Returns [`PathError::DegenerateGeometry`] if `speed` is not positive and finite.
///
/// # Example
///
/// ```
/// use trajectory_types::linear_trajectory;
/// use nalgebra::Vector3;
///
/// let trajectory = linear_trajectory(Vector3::<f64>::zeros(), Vector3::x(), 0.5).unwrap();
/// assert_eq!(trajectory.duration(), 2.0);
/// ```
pub fn linear_trajectory<V: VectorValue>(a: V, b: V, speed: f64) -> Result<Path<V>> {
    validate_speed(speed)?;
    let length = a.distance(&b);
    let duration = length / speed;

    if duration == 0.0 {
        return Ok(Path::from_fn(move |_| a.clone(), 0.0, 0.0));
    }

    let line = linear_path(a, b);
    Ok(Path::from_fn(
        move |t| line.value_at_unchecked(t / duration),
        0.0,
        duration,
    ))
}

/// Hold `value` over `[0, duration]`.
///
/// # Errors
///
/// Returns [`PathError::Configuration`] if `duration` is negative or not finite.
pub fn constant_trajectory<V>(value: V, duration: f64) -> Result<Path<V>>
where
    V: Clone + Send + Sync + 'static,
{
    if !duration.is_finite() || duration < 0.0 {
        return Err(PathError::configuration(format!(
            "constant trajectory duration must be non-negative, got {duration}"
        )));
    }
    Ok(Path::from_fn(move |_| value.clone(), 0.0, duration))
}
