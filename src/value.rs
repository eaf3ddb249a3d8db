//! Arithmetic over path values.
//!
//! Builders that blend control values (linear interpolation, Bézier, Hermite,
//! splines) and the numeric transforms (differentiation, integration, arc
//! length) only need a vector space with a norm. [`VectorValue`] captures
//! exactly that, so scalar, 2D, 3D and matrix-valued paths share one code path.

use std::ops::{Add, Mul, Sub};

use nalgebra::SMatrix;

/// A value that supports vector-space arithmetic and a norm.
///
/// Implemented for `f64` and every fixed-size nalgebra matrix of `f64`
/// (which includes `Vector2`, `Vector3`, `Matrix3` and `Matrix4`). Matrices use
/// the Frobenius norm.
pub trait VectorValue:
    Clone
    + Send
    + Sync
    + 'static
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<f64, Output = Self>
{
    /// The additive identity.
    fn zero() -> Self;

    /// Euclidean (or Frobenius) norm.
    fn norm(&self) -> f64;

    /// Distance between two values, `‖other − self‖`.
    fn distance(&self, other: &Self) -> f64 {
        (other.clone() - self.clone()).norm()
    }

    /// Linear blend `self + t·(other − self)`.
    fn lerp(&self, other: &Self, t: f64) -> Self {
        self.clone() + (other.clone() - self.clone()) * t
    }
}

impl VectorValue for f64 {
    fn zero() -> Self {
        0.0
    }

    fn norm(&self) -> f64 {
        self.abs()
    }
}

impl<const R: usize, const C: usize> VectorValue for SMatrix<f64, R, C> {
    fn zero() -> Self {
        Self::zeros()
    }

    fn norm(&self) -> f64 {
        nalgebra::Matrix::norm(self)
    }
}
