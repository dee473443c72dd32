//! Unified error handling for inference routines.
//!
//! This module defines `InferenceError`, the error type used when a
//! covariance matrix is turned into sampling or interval machinery. It
//! groups shape, symmetry, finiteness and definiteness failures. An alias
//! `InferenceResult<T>` standardizes the return type across inference code.

/// Unified error type for inference routines.
#[derive(Debug, Clone, PartialEq)]
pub enum InferenceError {
    // ---- Shape ----
    /// Covariance is not `dim × dim` for the given mean / parameter vector.
    CovarianceDimMismatch {
        expected: usize,
        found: (usize, usize),
    },

    /// Mean vector is empty.
    EmptyMean,

    // ---- Entries ----
    /// Covariance or mean contains a NaN or infinite entry.
    NonFiniteEntry {
        row: usize,
        col: usize,
        value: f64,
    },

    /// Covariance differs from its transpose beyond tolerance.
    CovarianceNotSymmetric {
        row: usize,
        col: usize,
        diff: f64,
    },

    // ---- Definiteness ----
    /// Covariance has a materially negative eigenvalue.
    CovarianceNotPsd {
        min_eigenvalue: f64,
        tolerance: f64,
    },

    // ---- Intervals ----
    /// Confidence level must lie strictly inside (0, 1).
    InvalidLevel {
        level: f64,
    },

    // ---- Fallback ----
    UnknownError,
}

pub type InferenceResult<T> = Result<T, InferenceError>;

impl std::error::Error for InferenceError {}

impl std::fmt::Display for InferenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Shape ----
            InferenceError::CovarianceDimMismatch { expected, found } => write!(
                f,
                "Inference Error: covariance must be {expected}x{expected}, found {}x{}",
                found.0, found.1
            ),
            InferenceError::EmptyMean => write!(f, "Inference Error: mean vector is empty"),

            // ---- Entries ----
            InferenceError::NonFiniteEntry { row, col, value } => {
                write!(f, "Inference Error: non-finite entry {value} at ({row}, {col})")
            }
            InferenceError::CovarianceNotSymmetric { row, col, diff } => write!(
                f,
                "Inference Error: covariance not symmetric at ({row}, {col}), |a_ij - a_ji| = {diff}"
            ),

            // ---- Definiteness ----
            InferenceError::CovarianceNotPsd { min_eigenvalue, tolerance } => write!(
                f,
                "Inference Error: covariance not positive semi-definite (min eigenvalue {min_eigenvalue}, tolerance {tolerance})"
            ),

            // ---- Intervals ----
            InferenceError::InvalidLevel { level } => {
                write!(f, "Inference Error: confidence level {level} must lie in (0, 1)")
            }

            // ---- Fallback ----
            InferenceError::UnknownError => write!(f, "Inference Error: Unknown error occurred"),
        }
    }
}
