//! Minimum-jerk quintic.

use crate::Path;

/// The minimum-jerk quintic `10t³ − 15t⁴ + 6t⁵` for `t` in `[0, 1]`.
pub fn minimum_jerk(t: f64) -> f64 {
    let t3 = t * t * t;
    t3 * (10.0 - 15.0 * t + 6.0 * t * t)
}

/// Minimum-jerk position profile over `[0, 1]`.
///
/// Zero velocity and acceleration at both ends.
///
/// # Example
///
/// ```
/// use trajectory_types::minimum_jerk_path;
///
/// let profile = minimum_jerk_path();
/// assert_eq!(profile.start(), 0.0);
/// assert_eq!(profile.end(), 1.0);
/// assert_eq!(profile.value_at(0.5), 0.5);
/// ```
pub fn minimum_jerk_path() -> Path<f64> {
    Path::unit(minimum_jerk)
}

/// Velocity of the minimum-jerk profile, `30t² − 60t³ + 30t⁴`.
pub fn minimum_jerk_velocity_path() -> Path<f64> {
    Path::unit(|t| 30.0 * t * t * (1.0 - t) * (1.0 - t))
}

/// Acceleration of the minimum-jerk profile, `60t − 180t² + 120t³`.
pub fn minimum_jerk_acceleration_path() -> Path<f64> {
    Path::unit(|t| 60.0 * t - 180.0 * t * t + 120.0 * t * t * t)
}
