//! Public API surface for log-likelihood maximization.
//!
//! - [`LogLikelihood`]: trait users implement for their model.
//! - [`MLEOptions`] and [`Tolerances`]: configuration for the optimizer.
//! - [`OptimOutcome`]: normalized result returned by the high-level `maximize` API.
//!
//! Convention: we *maximize* a user log-likelihood `ℓ(θ)` by minimizing the cost
//! `c(θ) = -ℓ(θ)` with a derivative-free Nelder–Mead simplex. Evaluations that
//! fail for numerical reasons are mapped to a finite penalty by the adapter.
use crate::optimization::{
    errors::OptResult,
    loglik_optimizer::{
        Cost, FnEvalMap, Theta,
        validation::{
            validate_theta_hat, validate_value, verify_max_iter, verify_sd_tolerance,
            verify_simplex_scale,
        },
    },
};
use argmin::core::{TerminationReason, TerminationStatus};
use serde::{Deserialize, Serialize};

/// User-implemented log-likelihood interface.
///
/// You maximize `ℓ(θ)`; internally we minimize the cost `c(θ) = -ℓ(θ)`.
///
/// - `type Data`: per-model data carried into `value`/`check`.
///
/// Required:
/// - `value(&Theta, &Data) -> OptResult<Cost>`: evaluate `ℓ(θ)`.
///   - Errors: return a descriptive `OptError`. Errors for which
///     `OptError::is_numerical` holds are treated as "reject this point";
///     every other error aborts the optimization.
/// - `check(&Theta, &Data) -> OptResult<()>`: validation hook to reject
///   obviously invalid `θ`/`data` pairs. Called once before optimization.
pub trait LogLikelihood {
    type Data;

    fn value(&self, theta: &Theta, data: &Self::Data) -> OptResult<Cost>;
    fn check(&self, theta: &Theta, data: &Self::Data) -> OptResult<()>;
}

/// Optimizer-level configuration.
///
/// Fields:
/// - `tols: Tolerances` — simplex tolerance and iteration limit.
/// - `simplex_scale: f64` — relative size of the initial simplex. Vertex `i`
///   is `θ0 + h_i e_i` with `h_i = simplex_scale · |θ0_i|`, or
///   `h_i = simplex_scale` when `θ0_i = 0`.
/// - `verbose: bool` — if `true`, attaches an observer (behind the `obs_slog`
///   feature) and prints progress.
///
/// Default:
/// - `tols`: `sd_tolerance = 1e-7`, `max_iter = 1000`
/// - `simplex_scale`: `0.1`
/// - `verbose`: `false`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MLEOptions {
    pub tols: Tolerances,
    pub simplex_scale: f64,
    pub verbose: bool,
}

impl MLEOptions {
    /// Create a new set of optimizer options.
    ///
    /// # Errors
    /// - `OptError::InvalidSimplexScale` if `simplex_scale` is non-finite
    ///   or not strictly positive.
    pub fn new(tols: Tolerances, simplex_scale: f64, verbose: bool) -> OptResult<Self> {
        verify_simplex_scale(simplex_scale)?;
        Ok(Self { tols, simplex_scale, verbose })
    }
}

impl Default for MLEOptions {
    fn default() -> Self {
        Self { tols: Tolerances::default(), simplex_scale: 0.1, verbose: false }
    }
}

/// Stopping rules for the simplex search.
///
/// - `sd_tolerance`: terminate once the standard deviation of the cost values
///   over the simplex vertices falls below this threshold.
/// - `max_iter`: hard cap on the number of iterations. Hitting it is reported
///   as non-convergence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tolerances {
    pub sd_tolerance: f64,
    pub max_iter: usize,
}

impl Tolerances {
    /// Construct validated tolerances.
    ///
    /// # Rules
    /// - `sd_tolerance` must be **finite and strictly positive**.
    /// - `max_iter` must be `> 0`.
    ///
    /// # Errors
    /// - `OptError::InvalidSdTolerance` for a non-finite or non-positive tolerance.
    /// - `OptError::InvalidMaxIter` if `max_iter == 0`.
    pub fn new(sd_tolerance: f64, max_iter: usize) -> OptResult<Self> {
        verify_sd_tolerance(sd_tolerance)?;
        verify_max_iter(max_iter)?;
        Ok(Self { sd_tolerance, max_iter })
    }
}

impl Default for Tolerances {
    fn default() -> Self {
        Self { sd_tolerance: 1e-7, max_iter: 1000 }
    }
}

/// Canonical result returned by `maximize`.
///
/// - `theta_hat`: best parameter vector found.
/// - `value`: best **log-likelihood** value `ℓ(θ)` (not the cost).
/// - `converged`: `true` only if the solver met its tolerance
///   (`SolverConverged` or `TargetCostReached`). Running out of iterations,
///   or any other stop, counts as not converged.
/// - `status`: human-readable termination status string.
/// - `iterations`: number of optimizer iterations performed.
/// - `fn_evals`: function-evaluation counters reported by `argmin`.
#[derive(Debug, Clone, PartialEq)]
pub struct OptimOutcome {
    pub theta_hat: Theta,
    pub value: f64,
    pub converged: bool,
    pub status: String,
    pub iterations: usize,
    pub fn_evals: FnEvalMap,
}

impl OptimOutcome {
    /// Build a validated [`OptimOutcome`] from raw solver state.
    ///
    /// Performs:
    /// - `theta_hat` check via `validate_theta_hat` (present and all finite).
    /// - `value` check via `validate_value` (finite).
    /// - Maps `TerminationStatus` into `(converged, status)`.
    ///
    /// # Errors
    /// - Propagates any validation errors for `theta_hat` or `value`.
    pub fn new(
        theta_hat_opt: Option<Theta>, value: f64, termination: TerminationStatus, iterations: u64,
        fn_evals: FnEvalMap,
    ) -> OptResult<Self> {
        let theta_hat = validate_theta_hat(theta_hat_opt)?;
        validate_value(value)?;
        let (converged, status) = match &termination {
            TerminationStatus::NotTerminated => (false, "Not terminated".to_string()),
            TerminationStatus::Terminated(reason) => {
                let converged = matches!(
                    reason,
                    TerminationReason::SolverConverged | TerminationReason::TargetCostReached
                );
                (converged, format!("{reason:?}"))
            }
        };
        Ok(Self {
            theta_hat,
            value,
            converged,
            status,
            iterations: iterations as usize,
            fn_evals,
        })
    }
}
