//! Validation helpers for log-likelihood optimization.
//!
//! This module centralizes common consistency checks used across the
//! optimizer interface:
//!
//! - **Option checks**: [`verify_sd_tolerance`], [`verify_max_iter`],
//!   [`verify_simplex_scale`], [`verify_hessian_step`] ensure numeric
//!   settings are finite and strictly positive.
//! - **Starting point**: [`validate_theta0`] rejects empty or non-finite
//!   initial vectors before a simplex is built around them.
//! - **Parameter estimates**: [`validate_theta_hat`] ensures a candidate
//!   `theta_hat` exists and contains only finite values.
//! - **Objective values**: [`validate_value`] checks log-likelihood outputs
//!   for finiteness.
//! - **Curvature**: [`validate_hessian`] checks shape and finiteness of a
//!   numerical Hessian.
use crate::optimization::{
    errors::{OptError, OptResult},
    loglik_optimizer::{Theta, types::Hessian},
};

/// Validate the simplex standard-deviation tolerance.
///
/// # Errors
/// Returns [`OptError::InvalidSdTolerance`] if the value is non-finite or ≤ 0.0.
pub fn verify_sd_tolerance(tol: f64) -> OptResult<()> {
    if !tol.is_finite() {
        return Err(OptError::InvalidSdTolerance { tol, reason: "Tolerance must be finite." });
    }
    if tol <= 0.0 {
        return Err(OptError::InvalidSdTolerance { tol, reason: "Tolerance must be positive." });
    }
    Ok(())
}

/// Validate the iteration budget.
///
/// # Errors
/// Returns [`OptError::InvalidMaxIter`] if `max_iter == 0`.
pub fn verify_max_iter(max_iter: usize) -> OptResult<()> {
    if max_iter == 0 {
        return Err(OptError::InvalidMaxIter {
            max_iter,
            reason: "Maximum iterations must be greater than zero.",
        });
    }
    Ok(())
}

/// Validate the relative initial-simplex size.
///
/// # Errors
/// Returns [`OptError::InvalidSimplexScale`] if the value is non-finite or ≤ 0.0.
pub fn verify_simplex_scale(scale: f64) -> OptResult<()> {
    if !scale.is_finite() {
        return Err(OptError::InvalidSimplexScale { scale, reason: "Scale must be finite." });
    }
    if scale <= 0.0 {
        return Err(OptError::InvalidSimplexScale { scale, reason: "Scale must be positive." });
    }
    Ok(())
}

/// Validate the relative finite-difference step used for Hessians.
///
/// # Errors
/// Returns [`OptError::InvalidHessianStep`] if the value is non-finite or ≤ 0.0.
pub fn verify_hessian_step(step: f64) -> OptResult<()> {
    if !step.is_finite() {
        return Err(OptError::InvalidHessianStep { step, reason: "Step must be finite." });
    }
    if step <= 0.0 {
        return Err(OptError::InvalidHessianStep { step, reason: "Step must be positive." });
    }
    Ok(())
}

/// Validate an initial parameter vector.
///
/// # Errors
/// - [`OptError::EmptyTheta`] if `theta0` has no entries.
/// - [`OptError::InvalidThetaInput`] with the index/value of the first
///   non-finite element.
pub fn validate_theta0(theta0: &Theta) -> OptResult<()> {
    if theta0.is_empty() {
        return Err(OptError::EmptyTheta);
    }
    for (index, &value) in theta0.iter().enumerate() {
        if !value.is_finite() {
            return Err(OptError::InvalidThetaInput { index, value });
        }
    }
    Ok(())
}

/// Validate and unwrap an estimated parameter vector (`theta_hat`).
///
/// Accepts only a present vector with all **finite** entries.
///
/// # Errors
/// - [`OptError::MissingThetaHat`] if no vector was provided.
/// - [`OptError::InvalidThetaHat`] if any element is non-finite.
pub fn validate_theta_hat(theta_hat: Option<Theta>) -> OptResult<Theta> {
    match theta_hat {
        Some(t) => {
            for (index, &value) in t.iter().enumerate() {
                if !value.is_finite() {
                    return Err(OptError::InvalidThetaHat {
                        index,
                        value,
                        reason: "Parameter estimates must be finite.",
                    });
                }
            }
            Ok(t)
        }
        None => Err(OptError::MissingThetaHat),
    }
}

/// Validate that a scalar log-likelihood value is finite.
///
/// # Errors
/// Returns [`OptError::NonFiniteCost`] if the value is `NaN` or infinite.
pub fn validate_value(value: f64) -> OptResult<()> {
    if !value.is_finite() {
        return Err(OptError::NonFiniteCost { value });
    }
    Ok(())
}

/// Validate the shape and entries of a Hessian matrix.
///
/// # Errors
/// - [`OptError::HessianDimMismatch`] if dimensions are not `dim × dim`.
/// - [`OptError::InvalidHessian`] if any entry is non-finite, with offending
///   row/col indices and value.
pub fn validate_hessian(hessian: &Hessian, dim: usize) -> OptResult<()> {
    if hessian.nrows() != dim || hessian.ncols() != dim {
        return Err(OptError::HessianDimMismatch {
            expected: dim,
            found: (hessian.nrows(), hessian.ncols()),
        });
    }
    for ((i, j), &value) in hessian.indexed_iter() {
        if !value.is_finite() {
            return Err(OptError::InvalidHessian { row: i, col: j, value });
        }
    }
    Ok(())
}
