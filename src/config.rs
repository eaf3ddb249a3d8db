//! Numeric configuration for sampled and profile-based paths.
//!
//! Each builder that relies on a sample count, a step size or a phase split
//! takes one of the structs below. The [`Default`] impls carry the reference
//! constants; presets and `with_*` methods cover the common adjustments.
//!
//! # Example
//!
//! ```
//! use trajectory_types::{ArcLengthConfig, SCurveConfig};
//!
//! let config = ArcLengthConfig::precise();
//! assert!(config.table_samples > ArcLengthConfig::default().table_samples);
//!
//! let profile = SCurveConfig::default().with_zero_acceleration_fraction(0.3);
//! assert!(profile.validate().is_ok());
//! ```

use crate::{PathError, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Sample counts for arc-length estimation and reparametrization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ArcLengthConfig {
    /// Samples used by [`integrate_arc_length`](crate::integrate_arc_length).
    pub estimate_samples: usize,

    /// Samples used to build the length→parameter table for
    /// [`arc_length_parametrize`](crate::arc_length_parametrize).
    pub table_samples: usize,
}

impl Default for ArcLengthConfig {
    fn default() -> Self {
        Self {
            estimate_samples: 50,
            table_samples: 1000,
        }
    }
}

impl ArcLengthConfig {
    /// Coarse sampling for previews.
    #[must_use]
    pub fn fast() -> Self {
        Self {
            estimate_samples: 20,
            table_samples: 200,
        }
    }

    /// Dense sampling when lengths feed into timing.
    #[must_use]
    pub fn precise() -> Self {
        Self {
            estimate_samples: 1000,
            table_samples: 10_000,
        }
    }

    /// Set the estimate sample count.
    #[must_use]
    pub fn with_estimate_samples(mut self, samples: usize) -> Self {
        self.estimate_samples = samples;
        self
    }

    /// Set the table sample count.
    #[must_use]
    pub fn with_table_samples(mut self, samples: usize) -> Self {
        self.table_samples = samples;
        self
    }

    /// Check that both sample counts can span a domain.
    pub fn validate(&self) -> Result<()> {
        validate_samples(self.estimate_samples)?;
        validate_samples(self.table_samples)
    }
}

/// Step control for finite-difference differentiation.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DifferentiationConfig {
    /// Base step. Higher orders widen it (`step · order`) to limit round-off,
    /// and it shrinks to fit domains shorter than the stencil.
    pub step: f64,
}

impl Default for DifferentiationConfig {
    fn default() -> Self {
        Self { step: 1e-4 }
    }
}

impl DifferentiationConfig {
    /// Set the base step.
    #[must_use]
    pub fn with_step(mut self, step: f64) -> Self {
        self.step = step;
        self
    }

    /// Check that the step is usable.
    pub fn validate(&self) -> Result<()> {
        if !self.step.is_finite() || self.step <= 0.0 {
            return Err(PathError::configuration(format!(
                "differentiation step must be positive and finite, got {}",
                self.step
            )));
        }
        Ok(())
    }
}

/// Tolerance and recursion limit for adaptive Simpson quadrature.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct QuadratureConfig {
    /// Absolute error tolerance over the whole interval.
    pub tolerance: f64,

    /// Maximum bisection depth.
    pub max_depth: usize,
}

impl Default for QuadratureConfig {
    fn default() -> Self {
        Self {
            tolerance: 1e-10,
            max_depth: 20,
        }
    }
}

impl QuadratureConfig {
    /// Looser tolerance and shallower recursion, for nested integrals.
    #[must_use]
    pub fn fast() -> Self {
        Self {
            tolerance: 1e-6,
            max_depth: 12,
        }
    }

    /// Set the tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Set the maximum depth.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Check that the tolerance is usable.
    pub fn validate(&self) -> Result<()> {
        if !self.tolerance.is_finite() || self.tolerance <= 0.0 {
            return Err(PathError::configuration(format!(
                "quadrature tolerance must be positive and finite, got {}",
                self.tolerance
            )));
        }
        Ok(())
    }
}

/// Phase split of the trapezoidal velocity profile.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TrapezoidalConfig {
    /// Fraction of the unit domain spent at constant velocity, in `(0, 1)`.
    /// The rest is split evenly between acceleration and deceleration.
    pub constant_velocity_fraction: f64,
}

impl Default for TrapezoidalConfig {
    fn default() -> Self {
        Self {
            constant_velocity_fraction: 0.5,
        }
    }
}

impl TrapezoidalConfig {
    /// Set the constant-velocity fraction.
    #[must_use]
    pub fn with_constant_velocity_fraction(mut self, fraction: f64) -> Self {
        self.constant_velocity_fraction = fraction;
        self
    }

    /// Duration of each of the acceleration and deceleration phases.
    #[must_use]
    pub fn acceleration_fraction(&self) -> f64 {
        (1.0 - self.constant_velocity_fraction) / 2.0
    }

    /// Check that the fraction lies strictly inside `(0, 1)`.
    pub fn validate(&self) -> Result<()> {
        let f = self.constant_velocity_fraction;
        if !(f > 0.0 && f < 1.0) {
            return Err(PathError::configuration(format!(
                "constant velocity fraction must lie in (0, 1), got {f}"
            )));
        }
        Ok(())
    }
}

/// Phase split of the jerk-limited S-curve acceleration profile.
///
/// The unit domain is divided into seven phases: jerk up, constant
/// acceleration, jerk down, zero acceleration, jerk down, constant
/// deceleration, jerk up. The four jerk phases share what remains after the
/// zero and constant phases.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SCurveConfig {
    /// Fraction spent coasting at zero acceleration.
    pub zero_acceleration_fraction: f64,

    /// Fraction spent at constant acceleration, per trapezoid.
    pub constant_acceleration_fraction: f64,
}

impl Default for SCurveConfig {
    fn default() -> Self {
        Self {
            zero_acceleration_fraction: 0.5,
            constant_acceleration_fraction: 0.1,
        }
    }
}

impl SCurveConfig {
    /// Set the zero-acceleration fraction.
    #[must_use]
    pub fn with_zero_acceleration_fraction(mut self, fraction: f64) -> Self {
        self.zero_acceleration_fraction = fraction;
        self
    }

    /// Set the constant-acceleration fraction.
    #[must_use]
    pub fn with_constant_acceleration_fraction(mut self, fraction: f64) -> Self {
        self.constant_acceleration_fraction = fraction;
        self
    }

    /// Duration of each of the four jerk phases.
    #[must_use]
    pub fn jerk_fraction(&self) -> f64 {
        (1.0 - self.zero_acceleration_fraction - 2.0 * self.constant_acceleration_fraction) / 4.0
    }

    /// Check that all seven phases have non-negative length and the jerk
    /// phases a positive one.
    pub fn validate(&self) -> Result<()> {
        let zero = self.zero_acceleration_fraction;
        let constant = self.constant_acceleration_fraction;
        if !zero.is_finite() || zero < 0.0 {
            return Err(PathError::configuration(format!(
                "zero acceleration fraction must be non-negative, got {zero}"
            )));
        }
        if !constant.is_finite() || constant < 0.0 {
            return Err(PathError::configuration(format!(
                "constant acceleration fraction must be non-negative, got {constant}"
            )));
        }
        if self.jerk_fraction() <= 0.0 {
            return Err(PathError::configuration(format!(
                "zero + 2 * constant acceleration fractions must be below 1, got {}",
                zero + 2.0 * constant
            )));
        }
        Ok(())
    }
}

pub(crate) fn validate_samples(samples: usize) -> Result<()> {
    if samples < 2 {
        return Err(PathError::configuration(format!(
            "at least 2 samples are needed to span a domain, got {samples}"
        )));
    }
    Ok(())
}
