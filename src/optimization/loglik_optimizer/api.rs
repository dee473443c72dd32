//! High-level entry point for maximizing a user-provided `LogLikelihood`.
//!
//! This builds a Nelder–Mead simplex around the starting point, wraps the
//! model in an `ArgMinAdapter` (which *minimizes* `-ℓ(θ)`), and delegates the
//! run to `run_nelder_mead`.
use crate::optimization::{
    errors::OptResult,
    loglik_optimizer::{
        OptimOutcome, Theta,
        adapter::ArgMinAdapter,
        builders::build_optimizer_nelder_mead,
        run::run_nelder_mead,
        traits::{LogLikelihood, MLEOptions},
    },
};

/// Maximize a log-likelihood `ℓ(θ)` with the Nelder–Mead simplex method.
///
/// # Behavior
/// - Validates the initial guess via `f.check(theta0, data)`.
/// - Builds the initial simplex (`θ0` plus one vertex per axis).
/// - Wraps `(f, data)` in an `ArgMinAdapter` that exposes the minimization
///   problem `c(θ) = -ℓ(θ)` to `argmin`.
/// - Calls `run_nelder_mead` and returns an `OptimOutcome`.
///
/// # Errors
/// - Propagates any error from `f.check`.
/// - Propagates builder errors (empty or non-finite `theta0`).
/// - Propagates runtime errors from `run_nelder_mead`.
///
/// # Example
/// ```no_run
/// use ndarray::array;
/// use rust_outbreak::optimization::errors::OptResult;
/// use rust_outbreak::optimization::loglik_optimizer::{maximize, LogLikelihood, MLEOptions};
///
/// struct Quadratic;
/// impl LogLikelihood for Quadratic {
///     type Data = ();
///     fn value(&self, theta: &ndarray::Array1<f64>, _: &()) -> OptResult<f64> {
///         Ok(-theta.dot(theta))
///     }
///     fn check(&self, _: &ndarray::Array1<f64>, _: &()) -> OptResult<()> {
///         Ok(())
///     }
/// }
///
/// let out = maximize(&Quadratic, array![0.1, -0.2, 0.3], &(), &MLEOptions::default())?;
/// println!("θ̂ = {:?}", out.theta_hat);
/// # Ok::<(), rust_outbreak::optimization::errors::OptError>(())
/// ```
pub fn maximize<F: LogLikelihood>(
    f: &F, theta0: Theta, data: &F::Data, opts: &MLEOptions,
) -> OptResult<OptimOutcome> {
    f.check(&theta0, data)?;
    let solver = build_optimizer_nelder_mead(&theta0, opts)?;
    let problem = ArgMinAdapter::new(f, data);
    run_nelder_mead(opts, problem, solver)
}
