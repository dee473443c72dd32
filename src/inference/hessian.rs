//! inference::hessian — Hessian-based covariance and standard error utilities.
//!
//! Purpose
//! -------
//! Turn the finite-difference Hessian of a negative log-likelihood at the
//! MLE into a numerically stable covariance estimate for the free
//! parameters, expressed in unconstrained optimizer space.
//!
//! Key behaviors
//! -------------
//! - Call [`compute_hessian`] on the negative log-likelihood to obtain the
//!   observed information matrix `J(θ̂)`.
//! - Copy the `ndarray` Hessian into a `nalgebra::DMatrix` (`fill_dmatrix`)
//!   for eigen-based linear algebra.
//! - Form the Moore–Penrose pseudoinverse `J⁺ = Q diag(1/λ) Qᵀ` over the
//!   eigenvalues that survive truncation ([`pseudo_inverse`]).
//! - Derive standard errors as square roots of the covariance diagonal.
//!
//! Invariants & assumptions
//! ------------------------
//! - [`compute_hessian`] returns a finite, exactly symmetric `n×n` matrix.
//! - Eigenvalues with `|λ| ≤ EIGEN_EPS · max(1, |λ_max|)` are dropped, so
//!   flat directions contribute zero variance.
//! - A materially negative eigenvalue (a saddle or a non-minimum) is an
//!   error, never truncated.
//!
//! Conventions
//! -----------
//! - Hessians are on the **summed** negative log-likelihood scale, so the
//!   covariance is the usual inverse observed information.
//! - No explicit matrix inverse is formed.
//! - Errors are reported via [`OptResult<T>`].
//!
//! Downstream usage
//! ----------------
//! - `SeirModel::fit` calls [`calc_covariance`] after a converged
//!   optimization; `FitResult` and the simulation sampler consume the result.
//!
//! Testing notes
//! -------------
//! - Unit tests cover correlated quadratics with analytic inverses,
//!   truncation of a flat direction and rejection of a saddle.
use crate::optimization::{
    errors::{OptError, OptResult}, loglik_optimizer::finite_diff::compute_hessian,
    numerical_stability::transformations::EIGEN_EPS,
};
use nalgebra::DMatrix;
use ndarray::{Array1, Array2};

/// calc_covariance — observed-information covariance at `θ̂`.
///
/// Parameters
/// ----------
/// - `nll`: `&F`
///   Negative log-likelihood `θ ↦ −ℓ(θ)`.
/// - `theta_hat`: `&Array1<f64>`
///   MLE in unconstrained space.
/// - `rel_step`: `f64`
///   Relative finite-difference step forwarded to [`compute_hessian`].
///
/// Returns
/// -------
/// `OptResult<Array2<f64>>`
///   - Symmetric PSD `n×n` covariance `J(θ̂)⁺`.
///
/// Errors
/// ------
/// - Propagates errors from [`compute_hessian`] (objective failures,
///   non-finite entries, invalid step).
/// - `OptError::IndefiniteHessian` from [`pseudo_inverse`].
pub fn calc_covariance<F>(nll: &F, theta_hat: &Array1<f64>, rel_step: f64) -> OptResult<Array2<f64>>
where
    F: Fn(&Array1<f64>) -> OptResult<f64>,
{
    let obs_info = compute_hessian(nll, theta_hat, rel_step)?;
    let mut obs_info_nalg = DMatrix::<f64>::zeros(obs_info.nrows(), obs_info.ncols());
    fill_dmatrix(&obs_info, &mut obs_info_nalg);
    pseudo_inverse(obs_info_nalg)
}

/// Square roots of the covariance diagonal.
pub fn standard_errors(cov: &Array2<f64>) -> Array1<f64> {
    cov.diag().mapv(|v| v.max(0.0).sqrt())
}

// ---- Helper methods ----

fn fill_dmatrix(obs_info: &Array2<f64>, obs_info_nalg: &mut DMatrix<f64>) {
    for ((i, j), &value) in obs_info.indexed_iter() {
        obs_info_nalg[(i, j)] = value;
    }
}

/// Eigen-truncated pseudoinverse of a symmetric positive semi-definite matrix.
///
/// Errors
/// ------
/// - `OptError::IndefiniteHessian` if `λ_min < −EIGEN_EPS · max(1, |λ_max|)`.
pub fn pseudo_inverse(matrix: DMatrix<f64>) -> OptResult<Array2<f64>> {
    let n = matrix.nrows();
    let eigen_decomp = matrix.symmetric_eigen();
    let q = eigen_decomp.eigenvectors;
    let eigenvals = eigen_decomp.eigenvalues;
    let lambda_max = eigenvals.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let lambda_min = eigenvals.iter().copied().fold(f64::INFINITY, f64::min);
    let cutoff = EIGEN_EPS * lambda_max.abs().max(1.0);
    if lambda_min < -cutoff {
        return Err(OptError::IndefiniteHessian { min_eigenvalue: lambda_min, tolerance: cutoff });
    }
    let dropped = eigenvals.iter().filter(|&&lambda| lambda <= cutoff).count();
    if dropped > 0 {
        log::debug!("pseudoinverse dropped {dropped} of {n} eigenvalues (cutoff {cutoff:e})");
    }

    let mut inv = Array2::<f64>::zeros((n, n));
    for (k, &lambda) in eigenvals.iter().enumerate() {
        if lambda <= cutoff {
            continue;
        }
        for i in 0..n {
            let coeff = q[(i, k)] / lambda;
            for j in 0..n {
                inv[[i, j]] += coeff * q[(j, k)];
            }
        }
    }
    Ok(inv)
}
