//! Observed case-count series for outbreak models.
//!
//! Purpose
//! -------
//! Provide a small, validated container for the reported case counts and
//! their observation times. This module centralizes input validation so the
//! likelihood and the ensemble can assume a clean series.
//!
//! Key behaviors
//! -------------
//! - [`ObservedSeries`] enforces basic invariants (at least two points,
//!   equal lengths, finite non-negative strictly increasing times).
//! - The first reported count is forced to zero: it marks the origin of the
//!   series and is never compared against model incidence.
//!
//! Invariants & assumptions
//! ------------------------
//! - `times.len() == cases.len() >= 2`.
//! - `times` is finite, non-negative and strictly increasing.
//! - `cases[0] == 0`.
//! - Read-only after construction.
//!
//! Conventions
//! -----------
//! - Times are in days since the first report. The model clock is offset
//!   from this by the reporting delay `tau0` (see [`ObservedSeries::shifted_times`]).
//!
//! Testing notes
//! -------------
//! - Unit tests cover the happy path, the forced zero, and each rejection.
use crate::epidemic::errors::{EpiError, EpiResult};
use ndarray::Array1;

/// `ObservedSeries` — validated reported-case series.
///
/// Fields
/// ------
/// - `times`: `Array1<f64>`
///   Observation times (days since first report).
/// - `cases`: `Array1<u64>`
///   Reported new cases at each time; `cases[0]` is always zero.
#[derive(Debug, Clone, PartialEq)]
pub struct ObservedSeries {
    times: Array1<f64>,
    cases: Array1<u64>,
}

impl ObservedSeries {
    /// Construct a validated [`ObservedSeries`].
    ///
    /// Errors
    /// ------
    /// - `EpiError::LengthMismatch` when lengths differ.
    /// - `EpiError::TooFewObservations` when fewer than two points are given.
    /// - `EpiError::NonFiniteTime`, `EpiError::NegativeTime`,
    ///   `EpiError::NonIncreasingTimes` for the first offending time.
    ///
    /// Examples
    /// --------
    /// ```rust
    /// # use ndarray::array;
    /// # use rust_outbreak::epidemic::core::data::ObservedSeries;
    /// let series = ObservedSeries::new(array![0.0, 1.0, 2.0], array![4, 2, 3]).unwrap();
    /// assert_eq!(series.cases()[0], 0);
    /// assert_eq!(series.total_cases(), 5);
    /// ```
    pub fn new(times: Array1<f64>, mut cases: Array1<u64>) -> EpiResult<Self> {
        if times.len() != cases.len() {
            return Err(EpiError::LengthMismatch { times: times.len(), cases: cases.len() });
        }
        if times.len() < 2 {
            return Err(EpiError::TooFewObservations { len: times.len() });
        }
        let mut previous = f64::NEG_INFINITY;
        for (index, &value) in times.iter().enumerate() {
            if !value.is_finite() {
                return Err(EpiError::NonFiniteTime { index, value });
            }
            if value < 0.0 {
                return Err(EpiError::NegativeTime { index, value });
            }
            if value <= previous {
                return Err(EpiError::NonIncreasingTimes { index, previous, value });
            }
            previous = value;
        }
        cases[0] = 0;
        Ok(Self { times, cases })
    }

    pub fn times(&self) -> &Array1<f64> {
        &self.times
    }

    pub fn cases(&self) -> &Array1<u64> {
        &self.cases
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// Always `false`; construction requires at least two observations.
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    pub fn last_time(&self) -> f64 {
        self.times[self.times.len() - 1]
    }

    /// Sum of reported cases (after the forced leading zero).
    pub fn total_cases(&self) -> u64 {
        self.cases.sum()
    }

    /// Observation times on the model clock, `times + delay`.
    pub fn shifted_times(&self, delay: f64) -> Array1<f64> {
        &self.times + delay
    }
}
