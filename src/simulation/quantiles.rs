//! Quantile levels and per-time quantile bands over an ensemble.
//!
//! Quantiles use linear interpolation between order statistics
//! (Hyndman–Fan type 7): for sorted `x_(0..n)` and level `q`,
//! `h = (n − 1)·q`, `Q(q) = x_⌊h⌋ + (h − ⌊h⌋)·(x_⌈h⌉ − x_⌊h⌋)`.
use crate::epidemic::errors::{EpiError, EpiResult};
use ndarray::{Array1, Array2, Axis};
use serde::{Deserialize, Serialize};

/// Lower/upper band levels, `0 ≤ lower < upper ≤ 1`.
///
/// Default: `0.025 / 0.975`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuantileLevels {
    pub lower: f64,
    pub upper: f64,
}

impl QuantileLevels {
    /// Errors
    /// ------
    /// - `EpiError::InvalidQuantile` for non-finite, out-of-range or unordered
    ///   levels.
    pub fn new(lower: f64, upper: f64) -> EpiResult<Self> {
        if !(lower.is_finite() && upper.is_finite()) || lower < 0.0 || upper > 1.0 {
            return Err(EpiError::InvalidQuantile {
                lower,
                upper,
                reason: "Quantile levels must lie in [0, 1].",
            });
        }
        if lower >= upper {
            return Err(EpiError::InvalidQuantile {
                lower,
                upper,
                reason: "Lower level must be below the upper level.",
            });
        }
        Ok(Self { lower, upper })
    }
}

impl Default for QuantileLevels {
    fn default() -> Self {
        Self { lower: 0.025, upper: 0.975 }
    }
}

/// Lower / median / upper quantiles at each time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Band {
    pub times: Array1<f64>,
    pub lower: Array1<f64>,
    pub median: Array1<f64>,
    pub upper: Array1<f64>,
}

impl Band {
    /// Band over the rows of a `(time × draw)` matrix.
    pub fn from_matrix(times: &Array1<f64>, values: &Array2<f64>, levels: &QuantileLevels) -> Self {
        let n = values.nrows();
        let mut lower = Array1::<f64>::zeros(n);
        let mut median = Array1::<f64>::zeros(n);
        let mut upper = Array1::<f64>::zeros(n);
        for (t, row) in values.axis_iter(Axis(0)).enumerate() {
            let mut sorted = row.to_vec();
            sorted.sort_by(f64::total_cmp);
            lower[t] = quantile_sorted(&sorted, levels.lower);
            median[t] = quantile_sorted(&sorted, 0.5);
            upper[t] = quantile_sorted(&sorted, levels.upper);
        }
        Self { times: times.clone(), lower, median, upper }
    }
}

/// Confidence (model layer) and prediction (observation layer) bands.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnsembleSummary {
    pub levels: QuantileLevels,
    pub incidence_ci: Band,
    pub incidence_pi: Band,
    pub cumulative_ci: Band,
    pub cumulative_pi: Band,
    pub rt_ci: Band,
}

/// Type-7 quantile of an ascending slice; `NaN` for an empty slice.
pub fn quantile_sorted(sorted: &[f64], q: f64) -> f64 {
    match sorted.len() {
        0 => f64::NAN,
        1 => sorted[0],
        n => {
            let h = (n - 1) as f64 * q.clamp(0.0, 1.0);
            let lo = h.floor() as usize;
            let hi = (lo + 1).min(n - 1);
            sorted[lo] + (h - lo as f64) * (sorted[hi] - sorted[lo])
        }
    }
}
