//! The [`Path`] value type.
//!
//! A path is a function over a closed scalar interval `[start_time, end_time]`
//! together with those bounds. Values can be scalars, 2D/3D vectors,
//! orientations (3×3 rotations) or poses (4×4 homogeneous transforms).
//!
//! A *trajectory* is a path whose domain starts at 0 and whose parameter is
//! read as elapsed time. That is a usage convention, not a separate type.
//!
//! # Evaluation policy
//!
//! - [`Path::value_at`] clamps the parameter into the domain, so evaluation
//!   past either end holds the boundary value. It never extrapolates.
//! - [`Path::try_value_at`] is the strict variant and returns
//!   [`PathError::OutOfDomain`] for parameters outside the domain.
//! - [`Path::value_at_unchecked`] calls the wrapped function directly.

use std::fmt;
use std::sync::Arc;

use crate::{PathError, Result};

/// Relative slack allowed when comparing a parameter against a domain bound.
pub(crate) const DOMAIN_TOLERANCE: f64 = 1e-9;

/// Check whether two domain bounds agree within [`DOMAIN_TOLERANCE`].
pub(crate) fn bounds_match(a: f64, b: f64) -> bool {
    (a - b).abs() <= DOMAIN_TOLERANCE * a.abs().max(b.abs()).max(1.0)
}

type PathFn<V> = dyn Fn(f64) -> V + Send + Sync;

/// An immutable function over a closed scalar interval.
///
/// Cloning is cheap: clones share the wrapped function and anything it
/// captured. Paths are `Send + Sync`, so one path can be evaluated from many
/// threads at once.
///
/// # Example
///
/// ```
/// use trajectory_types::Path;
///
/// let square = Path::new(|t: f64| t * t, 0.0, 2.0).unwrap();
/// assert_eq!(square.duration(), 2.0);
/// assert_eq!(square.value_at(1.5), 2.25);
///
/// // Clamped outside the domain
/// assert_eq!(square.value_at(3.0), 4.0);
/// assert!(square.try_value_at(3.0).is_err());
/// ```
pub struct Path<V> {
    function: Arc<PathFn<V>>,
    start_time: f64,
    end_time: f64,
}

impl<V> Clone for Path<V> {
    fn clone(&self) -> Self {
        Self {
            function: Arc::clone(&self.function),
            start_time: self.start_time,
            end_time: self.end_time,
        }
    }
}

impl<V> fmt::Debug for Path<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Path")
            .field("start_time", &self.start_time)
            .field("end_time", &self.end_time)
            .field("value", &std::any::type_name::<V>())
            .finish()
    }
}

impl<V: 'static> Path<V> {
    /// Create a path from a function and its domain.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::Configuration`] if either bound is not finite or
    /// `start_time > end_time`.
    pub fn new<F>(function: F, start_time: f64, end_time: f64) -> Result<Self>
    where
        F: Fn(f64) -> V + Send + Sync + 'static,
    {
        if !start_time.is_finite() || !end_time.is_finite() {
            return Err(PathError::configuration(format!(
                "path bounds must be finite, got [{start_time}, {end_time}]"
            )));
        }
        if start_time > end_time {
            return Err(PathError::configuration(format!(
                "path start {start_time} is after its end {end_time}"
            )));
        }
        Ok(Self::from_fn(function, start_time, end_time))
    }

    /// Create a path over the unit domain `[0, 1]`.
    pub fn unit<F>(function: F) -> Self
    where
        F: Fn(f64) -> V + Send + Sync + 'static,
    {
        Self::from_fn(function, 0.0, 1.0)
    }

    /// Bounds are the caller's responsibility here.
    pub(crate) fn from_fn<F>(function: F, start_time: f64, end_time: f64) -> Self
    where
        F: Fn(f64) -> V + Send + Sync + 'static,
    {
        debug_assert!(start_time <= end_time);
        Self {
            function: Arc::new(function),
            start_time,
            end_time,
        }
    }

    /// Start of the domain.
    pub fn start_time(&self) -> f64 {
        self.start_time
    }

    /// End of the domain.
    pub fn end_time(&self) -> f64 {
        self.end_time
    }

    /// Length of the domain, `end_time − start_time`.
    pub fn duration(&self) -> f64 {
        self.end_time - self.start_time
    }

    /// The domain as `(start_time, end_time)`.
    pub fn domain(&self) -> (f64, f64) {
        (self.start_time, self.end_time)
    }

    /// Check whether `t` lies in the domain, allowing a tiny relative slack.
    pub fn contains(&self, t: f64) -> bool {
        let slack_start = DOMAIN_TOLERANCE * self.start_time.abs().max(1.0);
        let slack_end = DOMAIN_TOLERANCE * self.end_time.abs().max(1.0);
        t >= self.start_time - slack_start && t <= self.end_time + slack_end
    }

    /// Check whether the domain starts at 0.
    pub fn is_trajectory(&self) -> bool {
        self.start_time == 0.0
    }

    /// Clamp `t` into the domain.
    pub fn clamp(&self, t: f64) -> f64 {
        t.clamp(self.start_time, self.end_time)
    }

    /// Evaluate at `t`, clamped into the domain.
    pub fn value_at(&self, t: f64) -> V {
        (self.function)(self.clamp(t))
    }

    /// Evaluate at `t`, failing if `t` is outside the domain.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::OutOfDomain`] if `t` is outside
    /// `[start_time, end_time]` or is NaN.
    pub fn try_value_at(&self, t: f64) -> Result<V> {
        if !self.contains(t) {
            return Err(PathError::out_of_domain(t, self.start_time, self.end_time));
        }
        Ok(self.value_at(t))
    }

    /// Evaluate the wrapped function at `t` as is.
    pub fn value_at_unchecked(&self, t: f64) -> V {
        (self.function)(t)
    }

    /// Value at `start_time`.
    pub fn start(&self) -> V {
        self.value_at_unchecked(self.start_time)
    }

    /// Value at `end_time`.
    pub fn end(&self) -> V {
        self.value_at_unchecked(self.end_time)
    }

    /// Transform every value, keeping the domain.
    pub fn map<W, F>(&self, f: F) -> Path<W>
    where
        W: 'static,
        F: Fn(V) -> W + Send + Sync + 'static,
    {
        let inner = self.clone();
        Path::from_fn(
            move |t| f(inner.value_at_unchecked(t)),
            self.start_time,
            self.end_time,
        )
    }

    /// Build a path over `[start_time, end_time]` that evaluates this path at
    /// `warp(t)`. The warped parameter is clamped into this path's domain.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::Configuration`] for invalid bounds.
    pub fn reparametrize<F>(&self, start_time: f64, end_time: f64, warp: F) -> Result<Path<V>>
    where
        F: Fn(f64) -> f64 + Send + Sync + 'static,
    {
        let inner = self.clone();
        Path::new(move |t| inner.value_at(warp(t)), start_time, end_time)
    }

    /// Traverse the same domain in the opposite direction.
    pub fn reverse(&self) -> Path<V> {
        let inner = self.clone();
        let (start, end) = self.domain();
        Path::from_fn(
            move |t| inner.value_at(start + end - t),
            self.start_time,
            self.end_time,
        )
    }

    /// Sample `n` evenly spaced `(t, value)` pairs, both bounds included.
    /// `n` is raised to 2 if smaller.
    pub fn sample_uniform(&self, n: usize) -> Vec<(f64, V)> {
        sample_parameters(self.start_time, self.end_time, n)
            .map(|t| (t, self.value_at(t)))
            .collect()
    }
}

/// `n` (at least 2) evenly spaced parameters over `[start, end]`, with the
/// last one exactly `end`.
pub(crate) fn sample_parameters(start: f64, end: f64, n: usize) -> impl Iterator<Item = f64> {
    let n = n.max(2);
    let step = (end - start) / (n - 1) as f64;
    (0..n).map(move |i| if i == n - 1 { end } else { start + step * i as f64 })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::Vector3;

    fn ramp() -> Path<f64> {
        Path::new(|t| 2.0 * t, 1.0, 3.0).unwrap()
    }

    #[test]
    fn test_derived_properties() {
        let path = ramp();
        assert_relative_eq!(path.duration(), 2.0);
        assert_relative_eq!(path.start(), 2.0);
        assert_relative_eq!(path.end(), 6.0);
        assert_eq!(path.domain(), (1.0, 3.0));
        assert!(!path.is_trajectory());
    }

    #[test]
    fn test_invalid_bounds() {
        assert!(Path::new(|t| t, 1.0, 0.0).is_err_and(|e| e.is_configuration()));
        assert!(Path::new(|t| t, f64::NAN, 1.0).is_err());
        assert!(Path::new(|t| t, 0.0, f64::INFINITY).is_err());
        assert!(Path::new(|t| t, 1.0, 1.0).is_ok());
    }

    #[test]
    fn test_clamped_evaluation() {
        let path = ramp();
        assert_relative_eq!(path.value_at(0.0), 2.0);
        assert_relative_eq!(path.value_at(10.0), 6.0);
        assert_relative_eq!(path.value_at(2.0), 4.0);
        assert_relative_eq!(path.value_at_unchecked(10.0), 20.0);
    }

    #[test]
    fn test_strict_evaluation() {
        let path = ramp();
        assert_relative_eq!(path.try_value_at(2.5).unwrap(), 5.0);
        assert!(path.try_value_at(3.0 + 1e-12).is_ok());
        assert!(path.try_value_at(0.5).is_err_and(|e| e.is_out_of_domain()));
        assert!(path.try_value_at(f64::NAN).is_err());
    }

    #[test]
    fn test_map_keeps_domain() {
        let path = ramp().map(|x| Vector3::new(x, 0.0, 0.0));
        assert_eq!(path.domain(), (1.0, 3.0));
        assert_relative_eq!(path.value_at(2.0), Vector3::new(4.0, 0.0, 0.0));
    }

    #[test]
    fn test_reverse() {
        let reversed = ramp().reverse();
        assert_relative_eq!(reversed.start(), 6.0);
        assert_relative_eq!(reversed.end(), 2.0);
        assert_relative_eq!(reversed.value_at(1.5), 5.0);
    }

    #[test]
    fn test_reparametrize() {
        let path = Path::unit(|t| t);
        let squared = path.reparametrize(0.0, 2.0, |t| (t / 2.0).powi(2)).unwrap();
        assert_relative_eq!(squared.value_at(1.0), 0.25);
        assert_relative_eq!(squared.end(), 1.0);
    }

    #[test]
    fn test_sampling() {
        let samples = ramp().sample_uniform(5);
        assert_eq!(samples.len(), 5);
        assert_relative_eq!(samples[0].0, 1.0);
        assert_relative_eq!(samples[2].1, 4.0);
        assert_eq!(samples[4].0, 3.0);

        assert_eq!(ramp().sample_uniform(0).len(), 2);
    }

    #[test]
    fn test_shared_across_threads() {
        let path = Path::unit(|t: f64| Vector3::new(t, 2.0 * t, 3.0 * t));
        let sums: Vec<f64> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|_| {
                    let path = &path;
                    scope.spawn(move || {
                        path.sample_uniform(101)
                            .iter()
                            .map(|(_, v)| v.x)
                            .sum::<f64>()
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });
        for sum in sums {
            assert_relative_eq!(sum, 50.5, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_bounds_match() {
        assert!(bounds_match(1.0, 1.0 + 1e-12));
        assert!(!bounds_match(1.0, 1.001));
        assert!(bounds_match(0.0, 0.0));
    }
}
