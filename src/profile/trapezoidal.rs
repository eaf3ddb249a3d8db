//! Trapezoidal (parabolic blend) profile.
//!
//! Linear trajectory with parabolic blends, normalized to `q(0) = 0`,
//! `q(1) = 1` and `q̇(0) = q̇(1) = 0`. The constant-velocity phase lasts
//! `f` and each blend lasts `Ta = (1 − f) / 2`.

use crate::{Path, Result, TrapezoidalConfig};

/// Phase of a trapezoidal profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrapezoidalPhase {
    /// Speeding up, `[0, Ta)`.
    Acceleration,
    /// Cruising, `[Ta, 1 − Ta)`.
    ConstantVelocity,
    /// Slowing down, `[1 − Ta, 1]`.
    Deceleration,
}

/// A validated trapezoidal profile with its phase boundaries and position
/// coefficients precomputed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrapezoidalProfile {
    acceleration_end: f64,
    deceleration_start: f64,
    // q(t) = a2·t² on the first blend
    a2: f64,
    // q(t) = b0 + b1·t while cruising
    b0: f64,
    b1: f64,
    // q(t) = c0 + c1·t + c2·t² on the last blend
    c0: f64,
    c1: f64,
    c2: f64,
}

impl TrapezoidalProfile {
    /// Build the profile for `config`.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::Configuration`](crate::PathError::Configuration)
    /// if the constant-velocity fraction is outside `(0, 1)`.
    pub fn new(config: &TrapezoidalConfig) -> Result<Self> {
        config.validate()?;
        let ta = config.acceleration_fraction();
        let cruise_velocity = 1.0 / (1.0 - ta);

        Ok(Self {
            acceleration_end: ta,
            deceleration_start: ta + config.constant_velocity_fraction,
            a2: cruise_velocity / (2.0 * ta),
            b0: -cruise_velocity * ta / 2.0,
            b1: cruise_velocity,
            c0: 1.0 - cruise_velocity / (2.0 * ta),
            c1: cruise_velocity / ta,
            c2: -cruise_velocity / (2.0 * ta),
        })
    }

    /// Phase active at `t` (clamped into `[0, 1]`).
    pub fn phase(&self, t: f64) -> TrapezoidalPhase {
        let t = t.clamp(0.0, 1.0);
        if t < self.acceleration_end {
            TrapezoidalPhase::Acceleration
        } else if t < self.deceleration_start {
            TrapezoidalPhase::ConstantVelocity
        } else {
            TrapezoidalPhase::Deceleration
        }
    }

    /// Acceleration shape: `+1`, `0`, `−1` per phase.
    pub fn acceleration(&self, t: f64) -> f64 {
        match self.phase(t) {
            TrapezoidalPhase::Acceleration => 1.0,
            TrapezoidalPhase::ConstantVelocity => 0.0,
            TrapezoidalPhase::Deceleration => -1.0,
        }
    }

    /// Velocity shape, normalized to a plateau of 1.
    pub fn velocity(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        let slope = 1.0 / self.acceleration_end;
        match self.phase(t) {
            TrapezoidalPhase::Acceleration => slope * t,
            TrapezoidalPhase::ConstantVelocity => 1.0,
            TrapezoidalPhase::Deceleration => 1.0 - slope * (t - self.deceleration_start),
        }
    }

    /// Normalized position, `q(0) = 0` and `q(1) = 1`.
    pub fn position(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self.phase(t) {
            TrapezoidalPhase::Acceleration => self.a2 * t * t,
            TrapezoidalPhase::ConstantVelocity => self.b0 + self.b1 * t,
            TrapezoidalPhase::Deceleration => self.c0 + self.c1 * t + self.c2 * t * t,
        }
    }
}

/// Trapezoidal acceleration profile over `[0, 1]`.
///
/// # Errors
///
/// See [`TrapezoidalProfile::new`].
pub fn trapezoidal_acceleration_path(config: &TrapezoidalConfig) -> Result<Path<f64>> {
    let profile = TrapezoidalProfile::new(config)?;
    Ok(Path::unit(move |t| profile.acceleration(t)))
}

/// Trapezoidal velocity profile over `[0, 1]`.
///
/// # Errors
///
/// See [`TrapezoidalProfile::new`].
pub fn trapezoidal_velocity_path(config: &TrapezoidalConfig) -> Result<Path<f64>> {
    let profile = TrapezoidalProfile::new(config)?;
    Ok(Path::unit(move |t| profile.velocity(t)))
}

/// Trapezoidal position profile over `[0, 1]`.
///
/// # Errors
///
/// See [`TrapezoidalProfile::new`].
///
/// # Example
///
/// ```
/// use trajectory_types::{TrapezoidalConfig, trapezoidal_position_path};
///
/// let profile = trapezoidal_position_path(&TrapezoidalConfig::default()).unwrap();
/// assert_eq!(profile.start(), 0.0);
/// assert!((profile.end() - 1.0).abs() < 1e-12);
/// assert!((profile.value_at(0.5) - 0.5).abs() < 1e-12);
/// ```
pub fn trapezoidal_position_path(config: &TrapezoidalConfig) -> Result<Path<f64>> {
    let profile = TrapezoidalProfile::new(config)?;
    Ok(Path::unit(move |t| profile.position(t)))
}
