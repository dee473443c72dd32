//! Projection grid on the reporting clock.
use crate::epidemic::errors::{EpiError, EpiResult};
use ndarray::Array1;
use serde::Serialize;

/// Finite, non-negative, strictly increasing projection times (reporting
/// clock; the delay `tau0` is added per draw).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectionGrid {
    times: Array1<f64>,
}

impl ProjectionGrid {
    /// Errors
    /// ------
    /// - `EpiError::InvalidGrid` for an empty grid or the first entry that is
    ///   non-finite, negative or not above its predecessor.
    pub fn new(times: Array1<f64>) -> EpiResult<Self> {
        if times.is_empty() {
            return Err(EpiError::InvalidGrid {
                index: 0,
                value: f64::NAN,
                reason: "Grid must contain at least one time.",
            });
        }
        let mut previous = f64::NEG_INFINITY;
        for (index, &value) in times.iter().enumerate() {
            let reason = if !value.is_finite() {
                "Grid times must be finite."
            } else if value < 0.0 {
                "Grid times must be non-negative."
            } else if value <= previous {
                "Grid times must be strictly increasing."
            } else {
                previous = value;
                continue;
            };
            return Err(EpiError::InvalidGrid { index, value, reason });
        }
        Ok(Self { times })
    }

    /// `start, start + step, …` up to and including `end` (within round-off).
    ///
    /// Errors
    /// ------
    /// - `EpiError::InvalidGrid` if `step` is not finite and positive, or the
    ///   resulting times are invalid (e.g. `end < start`, negative start).
    pub fn uniform(start: f64, end: f64, step: f64) -> EpiResult<Self> {
        if !step.is_finite() || step <= 0.0 {
            return Err(EpiError::InvalidGrid {
                index: 0,
                value: step,
                reason: "Grid step must be finite and > 0.",
            });
        }
        if !(start.is_finite() && end.is_finite()) || end < start {
            return Err(EpiError::InvalidGrid {
                index: 0,
                value: end,
                reason: "Grid end must be finite and not below the start.",
            });
        }
        let n = ((end - start) / step + 1e-9).floor() as usize + 1;
        Self::new(Array1::from_shape_fn(n, |i| start + i as f64 * step))
    }

    pub fn times(&self) -> &Array1<f64> {
        &self.times
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// Always `false`; construction requires at least one time.
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Index of the first time strictly after `t` (`len()` if none).
    pub fn first_after(&self, t: f64) -> usize {
        self.times.iter().position(|&v| v > t).unwrap_or(self.times.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    // Purpose
    // -------
    // Uniform grids include the end point; `first_after` splits at a time.
    fn uniform_includes_end_and_splits_after_window() {
        let grid = ProjectionGrid::uniform(0.0, 10.0, 0.5).expect("valid grid");
        assert_eq!(grid.len(), 21);
        assert_eq!(grid.times()[20], 10.0);
        assert_eq!(grid.first_after(4.0), 9);
        assert_eq!(grid.first_after(10.0), 21);
    }

    #[test]
    // Purpose
    // -------
    // Invalid grids are rejected at the first offending entry.
    fn new_rejects_invalid_grids() {
        assert!(ProjectionGrid::new(Array1::zeros(0)).is_err());
        assert!(matches!(
            ProjectionGrid::new(array![0.0, 2.0, 2.0]),
            Err(EpiError::InvalidGrid { index: 2, .. })
        ));
        assert!(matches!(
            ProjectionGrid::new(array![-1.0, 2.0]),
            Err(EpiError::InvalidGrid { index: 0, .. })
        ));
        assert!(ProjectionGrid::uniform(0.0, 5.0, 0.0).is_err());
        assert!(ProjectionGrid::uniform(5.0, 0.0, 1.0).is_err());
    }
}
