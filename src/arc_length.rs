//! Arc-length estimation and reparametrization.
//!
//! Lengths are chord sums over uniformly spaced samples:
//! `L ≈ Σ ‖p(sᵢ₊₁) − p(sᵢ)‖`. The reparametrized path looks lengths up in a
//! sorted `(length, parameter)` table and interpolates the parameter linearly
//! between the two bracketing samples.

use tracing::debug;

use crate::config::validate_samples;
use crate::path::{bounds_match, sample_parameters};
use crate::{ArcLengthConfig, Path, Result, VectorValue};

/// Approximate the arc length of `path` from `samples` uniformly spaced points.
///
/// # Errors
///
/// Returns [`PathError::Configuration`](crate::PathError::Configuration) for
/// fewer than 2 samples.
///
/// # Example
///
/// ```
/// use trajectory_types::{integrate_arc_length, linear_path};
/// use nalgebra::Vector2;
///
/// let line = linear_path(Vector2::new(0.0, 0.0), Vector2::new(3.0, 4.0));
/// let length = integrate_arc_length(&line, 10).unwrap();
/// assert!((length - 5.0).abs() < 1e-12);
/// ```
pub fn integrate_arc_length<V: VectorValue>(path: &Path<V>, samples: usize) -> Result<f64> {
    validate_samples(samples)?;
    let mut previous: Option<V> = None;
    let mut length = 0.0;
    for s in sample_parameters(path.start_time(), path.end_time(), samples) {
        let value = path.value_at(s);
        if let Some(prev) = &previous {
            length += prev.distance(&value);
        }
        previous = Some(value);
    }
    Ok(length)
}

/// Cumulative arc length against the parameter that produced it.
///
/// Entries are sorted by length and keys are unique: when consecutive samples
/// do not move, the later parameter replaces the earlier one. A path that
/// starts stationary therefore has a first entry of `(0, s)` where `s` is the
/// last sampled parameter before it starts moving.
#[derive(Debug, Clone, PartialEq)]
pub struct ArcLengthTable {
    entries: Vec<(f64, f64)>,
    total_length: f64,
}

impl ArcLengthTable {
    /// Total chord length.
    pub fn total_length(&self) -> f64 {
        self.total_length
    }

    /// The `(length, parameter)` entries. The first has length 0 and holds
    /// the last sampled parameter at which no distance has been covered,
    /// which is `start_time` unless the path starts stationary.
    pub fn entries(&self) -> &[(f64, f64)] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no entries. Tables built by
    /// [`create_arc_length_to_parameter_map`] always have at least one.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Parameter at which the path has travelled `length`, by linear
    /// interpolation between the bracketing entries. Lengths outside
    /// `[0, total_length]` map to the first or last parameter.
    pub fn parameter_at(&self, length: f64) -> f64 {
        let Some(&(_, last_s)) = self.entries.last() else {
            return 0.0;
        };
        // First entry strictly longer than `length`
        let upper = self.entries.partition_point(|&(l, _)| l <= length);
        if upper == 0 {
            return self.entries[0].1;
        }
        if upper == self.entries.len() {
            return last_s;
        }
        let (l0, s0) = self.entries[upper - 1];
        let (l1, s1) = self.entries[upper];
        let weight = (length - l0) / (l1 - l0);
        s0 + weight * (s1 - s0)
    }
}

/// Build the length→parameter table of `path` from `samples` uniformly
/// spaced parameters.
///
/// # Errors
///
/// Returns [`PathError::Configuration`](crate::PathError::Configuration) for
/// fewer than 2 samples.
pub fn create_arc_length_to_parameter_map<V: VectorValue>(
    path: &Path<V>,
    samples: usize,
) -> Result<ArcLengthTable> {
    validate_samples(samples)?;
    Ok(build_table(path, samples))
}

fn build_table<V: VectorValue>(path: &Path<V>, samples: usize) -> ArcLengthTable {
    let mut parameters = sample_parameters(path.start_time(), path.end_time(), samples);
    let mut entries = Vec::with_capacity(samples);
    let mut total_length = 0.0;

    let first = parameters.next().unwrap_or(path.start_time());
    entries.push((0.0, first));
    let mut previous = path.value_at(first);

    for s in parameters {
        let value = path.value_at(s);
        total_length += previous.distance(&value);
        match entries.last_mut() {
            Some(last) if last.0 == total_length => last.1 = s,
            _ => entries.push((total_length, s)),
        }
        previous = value;
    }

    ArcLengthTable {
        entries,
        total_length,
    }
}

/// Reparametrize `path` by distance travelled, with the default sampling.
///
/// The result has domain `[0, total_length]`. Its start and end equal the
/// input's start and end exactly.
///
/// # Example
///
/// ```
/// use trajectory_types::{arc_length_parametrize, quadratic_bezier_path};
/// use nalgebra::Vector2;
///
/// let curve = quadratic_bezier_path(
///     Vector2::new(0.0, 0.0),
///     Vector2::new(1.0, 2.0),
///     Vector2::new(2.0, 0.0),
/// );
/// let by_length = arc_length_parametrize(&curve);
///
/// assert_eq!(by_length.start(), curve.start());
/// assert_eq!(by_length.end(), curve.end());
/// ```
pub fn arc_length_parametrize<V: VectorValue>(path: &Path<V>) -> Path<V> {
    let table = build_table(path, ArcLengthConfig::default().table_samples);
    parametrize_with_table(path, table)
}

/// Reparametrize `path` by distance travelled, using `config.table_samples`
/// samples for the table.
///
/// # Errors
///
/// Returns [`PathError::Configuration`](crate::PathError::Configuration) if
/// the config is invalid.
pub fn arc_length_parametrize_with<V: VectorValue>(
    path: &Path<V>,
    config: &ArcLengthConfig,
) -> Result<Path<V>> {
    config.validate()?;
    Ok(parametrize_with_table(path, build_table(path, config.table_samples)))
}

fn parametrize_with_table<V: VectorValue>(path: &Path<V>, table: ArcLengthTable) -> Path<V> {
    let total = table.total_length();
    debug!(
        entries = table.len(),
        total_length = total,
        "Built arc-length table"
    );

    let inner = path.clone();
    Path::from_fn(
        move |t| {
            if bounds_match(t, 0.0) {
                return inner.start();
            }
            if bounds_match(t, total) {
                return inner.end();
            }
            inner.value_at(table.parameter_at(t))
        },
        0.0,
        total,
    )
}
