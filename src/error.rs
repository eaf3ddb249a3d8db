//! Error types for path construction and evaluation.

use thiserror::Error;

/// Errors that can occur while building or evaluating paths.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PathError {
    /// A geometric input is degenerate (zero axis, zero radius, bad speed).
    #[error("degenerate geometry: {reason}")]
    DegenerateGeometry {
        /// Description of the degeneracy.
        reason: String,
    },

    /// Fewer keyframes or points than the builder needs.
    #[error("insufficient data: need at least {required}, got {actual}")]
    InsufficientData {
        /// Minimum required count.
        required: usize,
        /// Actual count provided.
        actual: usize,
    },

    /// A combinator or builder parameter is invalid.
    #[error("invalid configuration: {reason}")]
    Configuration {
        /// Description of what's wrong with the parameter.
        reason: String,
    },

    /// A matrix meant as an orientation or pose is not a proper rigid transform.
    #[error("invalid rotation: {reason}")]
    InvalidRotation {
        /// Description of the violated property.
        reason: String,
    },

    /// Strict evaluation was requested outside the path domain.
    #[error("parameter {t} is outside the path domain [{start}, {end}]")]
    OutOfDomain {
        /// The requested parameter.
        t: f64,
        /// Domain start.
        start: f64,
        /// Domain end.
        end: f64,
    },
}

impl PathError {
    /// Create a degenerate geometry error.
    #[must_use]
    pub fn degenerate(reason: impl Into<String>) -> Self {
        Self::DegenerateGeometry {
            reason: reason.into(),
        }
    }

    /// Create an insufficient data error.
    #[must_use]
    pub fn insufficient_data(required: usize, actual: usize) -> Self {
        Self::InsufficientData { required, actual }
    }

    /// Create a configuration error.
    #[must_use]
    pub fn configuration(reason: impl Into<String>) -> Self {
        Self::Configuration {
            reason: reason.into(),
        }
    }

    /// Create an invalid rotation error.
    #[must_use]
    pub fn invalid_rotation(reason: impl Into<String>) -> Self {
        Self::InvalidRotation {
            reason: reason.into(),
        }
    }

    /// Create an out-of-domain error.
    #[must_use]
    pub fn out_of_domain(t: f64, start: f64, end: f64) -> Self {
        Self::OutOfDomain { t, start, end }
    }

    /// Check if this is a degenerate geometry error.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        matches!(self, Self::DegenerateGeometry { .. })
    }

    /// Check if this is an insufficient data error.
    #[must_use]
    pub fn is_insufficient_data(&self) -> bool {
        matches!(self, Self::InsufficientData { .. })
    }

    /// Check if this is a configuration error.
    #[must_use]
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration { .. })
    }

    /// Check if this is an invalid rotation error.
    #[must_use]
    pub fn is_invalid_rotation(&self) -> bool {
        matches!(self, Self::InvalidRotation { .. })
    }

    /// Check if this is an out-of-domain error.
    #[must_use]
    pub fn is_out_of_domain(&self) -> bool {
        matches!(self, Self::OutOfDomain { .. })
    }
}
