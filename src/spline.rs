//! Multi-point splines.
//!
//! Interpolating splines (Catmull-Rom, cardinal) build one Hermite segment
//! per consecutive point pair and concatenate them, so a spline through `n`
//! points has domain `[0, n − 1]` and passes through point `i` at `t = i`.
//! Tangents are central differences at interior points and one-sided
//! differences at the ends.
//!
//! The uniform B-spline approximates its control polygon instead of
//! interpolating it; each window of four control points yields one segment.

use crate::{Path, PathError, Result, VectorValue, concatenate, hermite_path};

/// Interpolating Catmull-Rom spline through `points` (unscaled tangents).
///
/// # Errors
///
/// Returns [`PathError::InsufficientData`] for fewer than 2 points.
///
/// # Example
///
/// ```
/// use trajectory_types::catmull_rom_path;
/// use nalgebra::Vector2;
///
/// let points = vec![
///     Vector2::new(0.0, 0.0),
///     Vector2::new(1.0, 1.0),
///     Vector2::new(2.0, 0.0),
/// ];
/// let spline = catmull_rom_path(&points).unwrap();
///
/// assert_eq!(spline.duration(), 2.0);
/// assert!((spline.value_at(1.0) - points[1]).norm() < 1e-12);
/// ```
pub fn catmull_rom_path<V: VectorValue>(points: &[V]) -> Result<Path<V>> {
    hermite_spline(points, 1.0)
}

/// Interpolating cardinal spline through `points`.
///
/// Tangents are the Catmull-Rom tangents multiplied by `scale`; the
/// conventional default is 0.5. A scale of 1.0 reproduces
/// [`catmull_rom_path`] and 0.0 gives straight-line segments with zero end
/// velocity.
///
/// # Errors
///
/// Returns [`PathError::InsufficientData`] for fewer than 2 points and
/// [`PathError::Configuration`] for a non-finite scale.
pub fn cardinal_path<V: VectorValue>(points: &[V], scale: f64) -> Result<Path<V>> {
    if !scale.is_finite() {
        return Err(PathError::configuration(format!(
            "cardinal tangent scale must be finite, got {scale}"
        )));
    }
    hermite_spline(points, scale)
}

fn hermite_spline<V: VectorValue>(points: &[V], scale: f64) -> Result<Path<V>> {
    if points.len() < 2 {
        return Err(PathError::insufficient_data(2, points.len()));
    }

    let last = points.len() - 1;
    let tangents: Vec<V> = (0..points.len())
        .map(|i| {
            let tangent = if i == 0 {
                points[1].clone() - points[0].clone()
            } else if i == last {
                points[last].clone() - points[last - 1].clone()
            } else {
                (points[i + 1].clone() - points[i - 1].clone()) * 0.5
            };
            tangent * scale
        })
        .collect();

    let segments: Vec<Path<V>> = points
        .windows(2)
        .zip(tangents.windows(2))
        .map(|(p, v)| hermite_path(p[0].clone(), v[0].clone(), p[1].clone(), v[1].clone()))
        .collect();

    concatenate(&segments)
}

/// A single uniform cubic B-spline segment from four control points.
///
/// # Equation
///
/// ```text
///                        ⎡ 1  4  1  0⎤ ⎡P₀⎤
/// B(t) = [1 t t² t³] · ⅙ ⎢-3  0  3  0⎥ ⎢P₁⎥
///                        ⎢ 3 -6  3  0⎥ ⎢P₂⎥
///                        ⎣-1  3 -3  1⎦ ⎣P₃⎦
/// ```
pub fn bspline_path<V: VectorValue>(p0: V, p1: V, p2: V, p3: V) -> Path<V> {
    Path::unit(move |t| {
        let t2 = t * t;
        let t3 = t2 * t;
        let b0 = (1.0 - 3.0 * t + 3.0 * t2 - t3) / 6.0;
        let b1 = (4.0 - 6.0 * t2 + 3.0 * t3) / 6.0;
        let b2 = (1.0 + 3.0 * t + 3.0 * t2 - 3.0 * t3) / 6.0;
        let b3 = t3 / 6.0;
        p0.clone() * b0 + p1.clone() * b1 + p2.clone() * b2 + p3.clone() * b3
    })
}

/// A uniform cubic B-spline over a control polygon of at least 4 points.
///
/// Each window of four consecutive control points contributes one unit
/// segment, so `n` control points give domain `[0, n − 3]`. Segments join
/// with C² continuity.
///
/// # Errors
///
/// Returns [`PathError::InsufficientData`] for fewer than 4 control points.
pub fn uniform_bspline_path<V: VectorValue>(control_points: &[V]) -> Result<Path<V>> {
    if control_points.len() < 4 {
        return Err(PathError::insufficient_data(4, control_points.len()));
    }
    let segments: Vec<Path<V>> = control_points
        .windows(4)
        .map(|w| bspline_path(w[0].clone(), w[1].clone(), w[2].clone(), w[3].clone()))
        .collect();
    concatenate(&segments)
}
