//! Bézier and Hermite polynomial segments.
//!
//! All segments live on the unit domain `[0, 1]` and work for any
//! [`VectorValue`], so the same constructors build scalar, planar and spatial
//! curves.

use crate::{Path, VectorValue};

/// A quadratic Bézier segment.
///
/// # Equation
///
/// ```text
/// B(t) = (1-t)²P₀ + 2(1-t)tP₁ + t²P₂
/// ```
///
/// # Example
///
/// ```
/// use trajectory_types::quadratic_bezier_path;
/// use nalgebra::Vector2;
///
/// let path = quadratic_bezier_path(
///     Vector2::new(0.0, 0.0),
///     Vector2::new(1.0, 2.0),
///     Vector2::new(2.0, 0.0),
/// );
///
/// // Midpoint is pulled toward the control point
/// assert!(path.value_at(0.5).y > 0.0);
/// ```
pub fn quadratic_bezier_path<V: VectorValue>(p0: V, p1: V, p2: V) -> Path<V> {
    Path::unit(move |t| {
        let mt = 1.0 - t;
        p0.clone() * (mt * mt) + p1.clone() * (2.0 * mt * t) + p2.clone() * (t * t)
    })
}

/// A cubic Bézier segment.
///
/// # Equation
///
/// ```text
/// B(t) = (1-t)³P₀ + 3(1-t)²tP₁ + 3(1-t)t²P₂ + t³P₃
/// ```
pub fn cubic_bezier_path<V: VectorValue>(p0: V, p1: V, p2: V, p3: V) -> Path<V> {
    Path::unit(move |t| {
        let mt = 1.0 - t;
        let mt2 = mt * mt;
        let t2 = t * t;
        p0.clone() * (mt2 * mt)
            + p1.clone() * (3.0 * mt2 * t)
            + p2.clone() * (3.0 * mt * t2)
            + p3.clone() * (t2 * t)
    })
}

/// A cubic Hermite segment from `p0` with tangent `v0` to `p1` with tangent `v1`.
///
/// # Equation
///
/// ```text
/// H(t) = (2t³ - 3t² + 1)P₀ + (t³ - 2t² + t)V₀ + (-2t³ + 3t²)P₁ + (t³ - t²)V₁
/// ```
pub fn hermite_path<V: VectorValue>(p0: V, v0: V, p1: V, v1: V) -> Path<V> {
    Path::unit(move |t| {
        let t2 = t * t;
        let t3 = t2 * t;
        p0.clone() * (2.0 * t3 - 3.0 * t2 + 1.0)
            + v0.clone() * (t3 - 2.0 * t2 + t)
            + p1.clone() * (-2.0 * t3 + 3.0 * t2)
            + v1.clone() * (t3 - t2)
    })
}
