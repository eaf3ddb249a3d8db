//! Numeric differentiation and integration of paths.
//!
//! Both transforms keep the input's domain and evaluate the input lazily at
//! every query, so their cost is paid per evaluation.

use tracing::debug;

use crate::{DifferentiationConfig, Path, PathError, QuadratureConfig, Result, VectorValue};

/// The `order`-th derivative of `path`, by finite differences.
///
/// Uses the binomial stencil
/// `Δⁿf(x) = Σₖ (−1)ⁿ⁻ᵏ C(n, k) f(x + k·h)` divided by `hⁿ`. The stencil is
/// centered on `t` in the interior and shifted against the nearest bound when
/// it would leave the domain, which lowers accuracy near the ends. The step is
/// `config.step · order`, shrunk so the stencil fits the domain. A
/// zero-duration path has a zero derivative.
///
/// # Errors
///
/// Returns [`PathError::Configuration`] if `order` is 0 or the config is invalid.
///
/// # Example
///
/// ```
/// use trajectory_types::{DifferentiationConfig, Path, differentiated};
///
/// let square = Path::new(|t: f64| t * t, 0.0, 2.0).unwrap();
/// let slope = differentiated(&square, 1, &DifferentiationConfig::default()).unwrap();
///
/// assert!((slope.value_at(1.0) - 2.0).abs() < 1e-6);
/// ```
pub fn differentiated<V: VectorValue>(
    path: &Path<V>,
    order: usize,
    config: &DifferentiationConfig,
) -> Result<Path<V>> {
    if order == 0 {
        return Err(PathError::configuration("differentiation order must be at least 1"));
    }
    let exponent = i32::try_from(order).map_err(|_| {
        PathError::configuration(format!("differentiation order {order} is too large"))
    })?;
    config.validate()?;

    let (start, end) = path.domain();
    let duration = path.duration();
    if duration == 0.0 {
        return Ok(Path::from_fn(|_| V::zero(), start, end));
    }

    let n = order as f64;
    let step = (config.step * n).min(duration / n);
    let span = step * n;
    let coefficients = binomial_stencil(order);
    let scale = 1.0 / step.powi(exponent);
    debug!(order, step, "Built numeric derivative");

    let inner = path.clone();
    Ok(Path::from_fn(
        move |t| {
            let base = (t - span / 2.0).clamp(start, end - span);
            let sum = coefficients
                .iter()
                .enumerate()
                .fold(V::zero(), |acc, (k, &c)| {
                    acc + inner.value_at(base + k as f64 * step) * c
                });
            sum * scale
        },
        start,
        end,
    ))
}

/// Signed binomial coefficients `(−1)ⁿ⁻ᵏ C(n, k)` for `k = 0..=n`.
fn binomial_stencil(order: usize) -> Vec<f64> {
    let mut coefficients = Vec::with_capacity(order + 1);
    let mut c = 1.0;
    for k in 0..=order {
        let sign = if (order - k) % 2 == 0 { 1.0 } else { -1.0 };
        coefficients.push(sign * c);
        c = c * (order - k) as f64 / (k + 1) as f64;
    }
    coefficients
}

/// The running integral of `path` from `start_time` to `t`.
///
/// Each evaluation runs adaptive Simpson quadrature over
/// `[start_time, t]`, stopping when halves agree within the tolerance or the
/// maximum depth is reached.
///
/// # Errors
///
/// Returns [`PathError::Configuration`] if the config is invalid.
///
/// # Example
///
/// ```
/// use trajectory_types::{Path, QuadratureConfig, integrated};
///
/// let ramp = Path::new(|t: f64| 2.0 * t, 0.0, 3.0).unwrap();
/// let area = integrated(&ramp, &QuadratureConfig::default()).unwrap();
///
/// assert!((area.value_at(3.0) - 9.0).abs() < 1e-9);
/// ```
pub fn integrated<V: VectorValue>(path: &Path<V>, config: &QuadratureConfig) -> Result<Path<V>> {
    config.validate()?;
    let config = *config;
    let (start, end) = path.domain();
    debug!(
        tolerance = config.tolerance,
        max_depth = config.max_depth,
        "Built numeric integral"
    );

    let inner = path.clone();
    Ok(Path::from_fn(
        move |t| {
            if t <= start {
                return V::zero();
            }
            adaptive_simpson(&inner, start, t, config.tolerance, config.max_depth)
        },
        start,
        end,
    ))
}

fn adaptive_simpson<V: VectorValue>(
    path: &Path<V>,
    a: f64,
    b: f64,
    tolerance: f64,
    max_depth: usize,
) -> V {
    fn simpson_step<V: VectorValue>(fa: &V, fm: &V, fb: &V, a: f64, b: f64) -> V {
        (fa.clone() + fm.clone() * 4.0 + fb.clone()) * ((b - a) / 6.0)
    }

    #[allow(clippy::too_many_arguments)]
    fn adaptive_helper<V: VectorValue>(
        path: &Path<V>,
        a: f64,
        b: f64,
        fa: V,
        fm: V,
        fb: V,
        whole: V,
        tolerance: f64,
        depth: usize,
    ) -> V {
        let mid = (a + b) / 2.0;
        let left_mid = (a + mid) / 2.0;
        let right_mid = (mid + b) / 2.0;
        let flm = path.value_at(left_mid);
        let frm = path.value_at(right_mid);

        let left = simpson_step(&fa, &flm, &fm, a, mid);
        let right = simpson_step(&fm, &frm, &fb, mid, b);
        let combined = left.clone() + right.clone();
        let error = combined.clone() - whole;

        if depth == 0 || error.norm() < 15.0 * tolerance {
            combined + error * (1.0 / 15.0)
        } else {
            let half_tolerance = tolerance / 2.0;
            adaptive_helper(path, a, mid, fa, flm, fm.clone(), left, half_tolerance, depth - 1)
                + adaptive_helper(path, mid, b, fm, frm, fb, right, half_tolerance, depth - 1)
        }
    }

    let fa = path.value_at(a);
    let fm = path.value_at((a + b) / 2.0);
    let fb = path.value_at(b);
    let whole = simpson_step(&fa, &fm, &fb, a, b);
    adaptive_helper(path, a, b, fa, fm, fb, whole, tolerance, max_depth)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::linear_path;
    use approx::assert_relative_eq;
    use nalgebra::Vector3;

    fn cubic() -> Path<f64> {
        Path::new(|t| t * t * t, -1.0, 2.0).unwrap()
    }

    #[test]
    fn test_binomial_stencil() {
        assert_eq!(binomial_stencil(1), vec![-1.0, 1.0]);
        assert_eq!(binomial_stencil(2), vec![1.0, -2.0, 1.0]);
        assert_eq!(binomial_stencil(3), vec![-1.0, 3.0, -3.0, 1.0]);
    }

    #[test]
    fn test_first_derivative() {
        let config = DifferentiationConfig::default();
        let d = differentiated(&cubic(), 1, &config).unwrap();
        assert_eq!(d.domain(), (-1.0, 2.0));
        for t in [-0.5, 0.0, 0.7, 1.5] {
            assert_relative_eq!(d.value_at(t), 3.0 * t * t, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_second_derivative() {
        let config = DifferentiationConfig::default();
        let d2 = differentiated(&cubic(), 2, &config).unwrap();
        for t in [-0.5, 0.3, 1.2] {
            assert_relative_eq!(d2.value_at(t), 6.0 * t, epsilon = 1e-4);
        }
    }

    #[test]
    fn test_derivative_near_bounds() {
        let config = DifferentiationConfig::default();
        let d = differentiated(&cubic(), 1, &config).unwrap();
        // One-sided near the ends: first-order accurate
        assert_relative_eq!(d.value_at(-1.0), 3.0, epsilon = 1e-3);
        assert_relative_eq!(d.value_at(2.0), 12.0, epsilon = 1e-2);
    }

    #[test]
    fn test_vector_derivative() {
        let line = linear_path(Vector3::zeros(), Vector3::new(1.0, -2.0, 3.0));
        let d = differentiated(&line, 1, &DifferentiationConfig::default()).unwrap();
        assert_relative_eq!(d.value_at(0.5), Vector3::new(1.0, -2.0, 3.0), epsilon = 1e-8);
    }

    #[test]
    fn test_derivative_of_short_and_empty_domains() {
        let config = DifferentiationConfig::default().with_step(1.0);
        let short = Path::new(|t| 5.0 * t, 0.0, 0.01).unwrap();
        let d = differentiated(&short, 1, &config).unwrap();
        assert_relative_eq!(d.value_at(0.005), 5.0, epsilon = 1e-9);

        let point = Path::new(|t| t, 1.0, 1.0).unwrap();
        let d = differentiated(&point, 2, &DifferentiationConfig::default()).unwrap();
        assert_relative_eq!(d.value_at(1.0), 0.0);
    }

    #[test]
    fn test_differentiation_rejects_bad_inputs() {
        let config = DifferentiationConfig::default();
        assert!(differentiated(&cubic(), 0, &config).is_err_and(|e| e.is_configuration()));
        let bad = DifferentiationConfig::default().with_step(-1.0);
        assert!(differentiated(&cubic(), 1, &bad).is_err_and(|e| e.is_configuration()));
    }

    #[test]
    fn test_integral() {
        let config = QuadratureConfig::default();
        let integral = integrated(&cubic(), &config).unwrap();
        assert_eq!(integral.domain(), (-1.0, 2.0));
        // ∫₋₁ᵗ s³ ds = (t⁴ − 1) / 4
        assert_relative_eq!(integral.value_at(-1.0), 0.0);
        for t in [0.0, 1.0, 2.0] {
            assert_relative_eq!(integral.value_at(t), (t.powi(4) - 1.0) / 4.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_integral_of_oscillation() {
        let wave = Path::new(f64::sin, 0.0, std::f64::consts::PI).unwrap();
        let area = integrated(&wave, &QuadratureConfig::default()).unwrap();
        assert_relative_eq!(area.end(), 2.0, epsilon = 1e-9);
    }

    #[test]
    fn test_vector_integral_and_round_trip() {
        let velocity = Path::unit(|t| Vector3::new(1.0, 2.0 * t, 0.0));
        let position = integrated(&velocity, &QuadratureConfig::default()).unwrap();
        assert_relative_eq!(position.end(), Vector3::new(1.0, 1.0, 0.0), epsilon = 1e-9);

        let recovered = differentiated(&position, 1, &DifferentiationConfig::default()).unwrap();
        assert_relative_eq!(recovered.value_at(0.5), velocity.value_at(0.5), epsilon = 1e-5);
    }
}
