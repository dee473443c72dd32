//! loglik_optimizer::finite_diff — central-difference Hessian helpers.
//!
//! Purpose
//! -------
//! Approximate the Hessian of a scalar objective at a point from function
//! values alone, together with validation and symmetry cleanup, so the
//! covariance layer can request curvature without analytic derivatives.
//!
//! Key behaviors
//! -------------
//! - Construct central-difference Hessians with per-coordinate steps
//!   `h_i = rel_step · max(1, |θ_i|)` via [`compute_hessian`].
//! - Enforce symmetry of Hessian matrices in-place using
//!   [`symmetrize_hess`].
//!
//! Invariants & assumptions
//! ------------------------
//! - The objective is an ODE-backed likelihood whose values carry
//!   integration noise near `rtol`. Steps are therefore far larger than
//!   `sqrt(ε)`; the default `rel_step = 1e-3` keeps truncation error small
//!   while staying well above that noise floor.
//! - Any error raised by the objective is propagated unchanged; a point
//!   near the optimum that cannot be evaluated is a hard failure here.
//! - Returned Hessians satisfy [`validate_hessian`] and are exactly
//!   symmetric.
//!
//! Conventions
//! -----------
//! - Differences are taken with respect to the unconstrained parameter
//!   vector `Theta`; any reparameterization is handled by higher layers.
//! - The objective is evaluated `1 + 2n + 4·n(n-1)/2` times.
//!
//! Testing notes
//! -------------
//! - Unit tests cover an exact quadratic, a cross term, error propagation,
//!   and symmetrization.
use crate::optimization::{
    errors::OptResult,
    loglik_optimizer::{
        Theta,
        types::Hessian,
        validation::{validate_hessian, verify_hessian_step},
    },
};

/// compute_hessian — central-difference Hessian of a scalar objective.
///
/// Parameters
/// ----------
/// - `f`: `&F`
///   Objective `θ ↦ f(θ)`, returning `OptResult<f64>`.
/// - `theta`: `&Theta`
///   Point at which curvature is approximated.
/// - `rel_step`: `f64`
///   Relative step; coordinate `i` is perturbed by
///   `h_i = rel_step · max(1, |θ_i|)`.
///
/// Returns
/// -------
/// `OptResult<Hessian>`
///   - `Ok(hess)` with `hess[i][j] ≈ ∂²f/∂θ_i∂θ_j`, symmetrized.
///
/// Errors
/// ------
/// - `OptError::InvalidHessianStep` if `rel_step` is non-positive or non-finite.
/// - Any error returned by `f`.
/// - `OptError::InvalidHessian` if an entry is non-finite.
///
/// Notes
/// -----
/// - Diagonal: `(f(θ + h_i e_i) − 2 f(θ) + f(θ − h_i e_i)) / h_i²`.
/// - Off-diagonal: `(f(++) − f(+−) − f(−+) + f(−−)) / (4 h_i h_j)`.
///
/// Examples
/// --------
/// ```rust
/// # use ndarray::array;
/// # use rust_outbreak::optimization::loglik_optimizer::finite_diff::compute_hessian;
/// let f = |t: &ndarray::Array1<f64>| Ok(t[0] * t[0] + 3.0 * t[0] * t[1]);
/// let h = compute_hessian(&f, &array![0.5, -1.0], 1e-3).unwrap();
/// assert!((h[[0, 0]] - 2.0).abs() < 1e-6);
/// assert!((h[[0, 1]] - 3.0).abs() < 1e-6);
/// ```
pub fn compute_hessian<F>(f: &F, theta: &Theta, rel_step: f64) -> OptResult<Hessian>
where
    F: Fn(&Theta) -> OptResult<f64>,
{
    verify_hessian_step(rel_step)?;
    let dim = theta.len();
    let steps: Vec<f64> = theta.iter().map(|&t| rel_step * t.abs().max(1.0)).collect();
    let f0 = f(theta)?;
    let eval = |shifts: &[(usize, f64)]| -> OptResult<f64> {
        let mut point = theta.clone();
        for &(idx, delta) in shifts {
            point[idx] += delta;
        }
        f(&point)
    };

    let mut hess = Hessian::zeros((dim, dim));
    for i in 0..dim {
        let hi = steps[i];
        let plus = eval(&[(i, hi)])?;
        let minus = eval(&[(i, -hi)])?;
        hess[[i, i]] = (plus - 2.0 * f0 + minus) / (hi * hi);
        for j in 0..i {
            let hj = steps[j];
            let pp = eval(&[(i, hi), (j, hj)])?;
            let pm = eval(&[(i, hi), (j, -hj)])?;
            let mp = eval(&[(i, -hi), (j, hj)])?;
            let mm = eval(&[(i, -hi), (j, -hj)])?;
            let value = (pp - pm - mp + mm) / (4.0 * hi * hj);
            hess[[i, j]] = value;
            hess[[j, i]] = value;
        }
    }
    validate_hessian(&hess, dim)?;
    symmetrize_hess(&mut hess);
    Ok(hess)
}

/// symmetrize_hess — replace `H` by `(H + Hᵀ) / 2` in place.
///
/// Notes
/// -----
/// - Assumes a square matrix; each unordered pair is visited once.
pub fn symmetrize_hess(hess: &mut Hessian) {
    let n = hess.nrows();
    for i in 0..n {
        for j in (i + 1)..n {
            let avg = 0.5 * (hess[[i, j]] + hess[[j, i]]);
            hess[[i, j]] = avg;
            hess[[j, i]] = avg;
        }
    }
}
