//! Jerk-limited (S-curve) profile.
//!
//! The acceleration signal is two trapezoids of opposite sign separated by a
//! zero-acceleration cruise:
//!
//! ```text
//!  a
//!  1 ┤  ┌──┐
//!    │ /    \
//!  0 ┼/      \________        /
//!    │                \      /
//! -1 ┤                 └────┘
//!    └──────────────────────────── t
//!     1  2  3    4     5  6  7
//! ```
//!
//! Velocity and position are its exact first and second integrals.

use crate::{Path, Result, SCurveConfig};

/// Phase of an S-curve profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SCurvePhase {
    /// Acceleration ramps from 0 to 1.
    IncreasingAcceleration,
    /// Acceleration held at 1.
    ConstantAcceleration,
    /// Acceleration ramps from 1 to 0.
    DecreasingAcceleration,
    /// Zero acceleration.
    ConstantVelocity,
    /// Acceleration ramps from 0 to −1.
    IncreasingDeceleration,
    /// Acceleration held at −1.
    ConstantDeceleration,
    /// Acceleration ramps from −1 back to 0.
    DecreasingDeceleration,
}

impl SCurvePhase {
    const ALL: [Self; 7] = [
        Self::IncreasingAcceleration,
        Self::ConstantAcceleration,
        Self::DecreasingAcceleration,
        Self::ConstantVelocity,
        Self::IncreasingDeceleration,
        Self::ConstantDeceleration,
        Self::DecreasingDeceleration,
    ];
}

/// Start state of one phase. Within a phase the jerk is constant.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Segment {
    phase: SCurvePhase,
    start: f64,
    jerk: f64,
    acceleration: f64,
    velocity: f64,
    position: f64,
}

impl Segment {
    fn acceleration(&self, tau: f64) -> f64 {
        self.acceleration + self.jerk * tau
    }

    fn velocity(&self, tau: f64) -> f64 {
        self.velocity + self.acceleration * tau + self.jerk * tau * tau / 2.0
    }

    fn position(&self, tau: f64) -> f64 {
        self.position
            + self.velocity * tau
            + self.acceleration * tau * tau / 2.0
            + self.jerk * tau * tau * tau / 6.0
    }
}

/// A validated S-curve profile with every phase's start state precomputed.
#[derive(Debug, Clone, PartialEq)]
pub struct SCurveProfile {
    segments: [Segment; 7],
    final_position: f64,
}

impl SCurveProfile {
    /// Build the profile for `config`.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::Configuration`](crate::PathError::Configuration)
    /// if the fractions are negative or leave no time for the jerk phases.
    pub fn new(config: &SCurveConfig) -> Result<Self> {
        config.validate()?;
        let tj = config.jerk_fraction();
        let tc = config.constant_acceleration_fraction;
        let tz = config.zero_acceleration_fraction;
        let jerk = 1.0 / tj;

        let durations = [tj, tc, tj, tz, tj, tc, tj];
        let jerks = [jerk, 0.0, -jerk, 0.0, -jerk, 0.0, jerk];

        let mut segments = [Segment {
            phase: SCurvePhase::IncreasingAcceleration,
            start: 0.0,
            jerk,
            acceleration: 0.0,
            velocity: 0.0,
            position: 0.0,
        }; 7];

        let mut state = segments[0];
        for i in 0..7 {
            state.phase = SCurvePhase::ALL[i];
            state.jerk = jerks[i];
            segments[i] = state;

            let tau = durations[i];
            state = Segment {
                start: state.start + tau,
                acceleration: state.acceleration(tau),
                velocity: state.velocity(tau),
                position: state.position(tau),
                ..state
            };
        }

        Ok(Self {
            segments,
            final_position: state.position,
        })
    }

    fn segment(&self, t: f64) -> (&Segment, f64) {
        let t = t.clamp(0.0, 1.0);
        // Last segment whose start is at or before t
        let index = self
            .segments
            .partition_point(|segment| segment.start <= t)
            .saturating_sub(1);
        let segment = &self.segments[index];
        (segment, t - segment.start)
    }

    /// Phase active at `t` (clamped into `[0, 1]`).
    pub fn phase(&self, t: f64) -> SCurvePhase {
        self.segment(t).0.phase
    }

    /// Acceleration, peaking at `±1`.
    pub fn acceleration(&self, t: f64) -> f64 {
        let (segment, tau) = self.segment(t);
        segment.acceleration(tau)
    }

    /// Velocity, the integral of [`acceleration`](Self::acceleration) from 0.
    pub fn velocity(&self, t: f64) -> f64 {
        let (segment, tau) = self.segment(t);
        segment.velocity(tau)
    }

    /// Position, the integral of [`velocity`](Self::velocity) from 0.
    pub fn position(&self, t: f64) -> f64 {
        let (segment, tau) = self.segment(t);
        segment.position(tau)
    }

    /// Position divided by its final value, mapping `[0, 1]` onto `[0, 1]`.
    pub fn normalized_position(&self, t: f64) -> f64 {
        self.position(t) / self.final_position
    }

    /// Position reached at `t = 1`.
    pub fn final_position(&self) -> f64 {
        self.final_position
    }
}

/// S-curve acceleration profile over `[0, 1]`.
///
/// # Errors
///
/// See [`SCurveProfile::new`].
pub fn s_curve_acceleration_path(config: &SCurveConfig) -> Result<Path<f64>> {
    let profile = SCurveProfile::new(config)?;
    Ok(Path::unit(move |t| profile.acceleration(t)))
}

/// S-curve velocity profile over `[0, 1]`.
///
/// # Errors
///
/// See [`SCurveProfile::new`].
pub fn s_curve_velocity_path(config: &SCurveConfig) -> Result<Path<f64>> {
    let profile = SCurveProfile::new(config)?;
    Ok(Path::unit(move |t| profile.velocity(t)))
}

/// S-curve position profile over `[0, 1]` (not normalized).
///
/// # Errors
///
/// See [`SCurveProfile::new`].
pub fn s_curve_position_path(config: &SCurveConfig) -> Result<Path<f64>> {
    let profile = SCurveProfile::new(config)?;
    Ok(Path::unit(move |t| profile.position(t)))
}

/// S-curve position profile scaled to end at 1, for use as a time warp.
///
/// # Errors
///
/// See [`SCurveProfile::new`].
///
/// # Example
///
/// ```
/// use trajectory_types::{SCurveConfig, s_curve_normalized_position_path};
///
/// let warp = s_curve_normalized_position_path(&SCurveConfig::default()).unwrap();
/// assert_eq!(warp.start(), 0.0);
/// assert!((warp.end() - 1.0).abs() < 1e-12);
/// ```
pub fn s_curve_normalized_position_path(config: &SCurveConfig) -> Result<Path<f64>> {
    let profile = SCurveProfile::new(config)?;
    Ok(Path::unit(move |t| profile.normalized_position(t)))
}
