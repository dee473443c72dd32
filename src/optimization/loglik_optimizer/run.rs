//! Execution helper that runs the Nelder–Mead solver on a log-likelihood
//! problem and returns a crate-friendly [`OptimOutcome`].
use crate::optimization::{
    errors::OptResult,
    loglik_optimizer::{
        LogLikelihood, MLEOptions, OptimOutcome, adapter::ArgMinAdapter, types::NelderMeadSolver,
    },
};
use argmin::core::{Executor, State};

/// Run a Nelder–Mead optimization for a log-likelihood problem.
///
/// Wires up:
/// - the user model via [`ArgMinAdapter`],
/// - a solver from
///   [`build_optimizer_nelder_mead`](crate::optimization::loglik_optimizer::builders::build_optimizer_nelder_mead),
///   which already carries the initial simplex,
/// - `max_iters` from `opts.tols`,
/// - optional observers (behind the `obs_slog` feature),
///
/// then executes the solver and converts the result into [`OptimOutcome`].
///
/// # Feature flags
/// If the `obs_slog` feature is enabled and `opts.verbose == true`, a terminal
/// slog observer is attached with `ObserverMode::Always`.
///
/// # Returns
/// An [`OptimOutcome`] with the best vertex, best log-likelihood value ℓ(θ̂),
/// termination status, iteration count and function-evaluation counts.
///
/// # Errors
/// - Propagates any `argmin` runtime error, including non-numerical errors
///   raised by the model, via `From<argmin::core::Error>`.
/// - Propagates validation errors from [`OptimOutcome::new`].
pub fn run_nelder_mead<'a, F>(
    opts: &MLEOptions, problem: ArgMinAdapter<'a, F>, solver: NelderMeadSolver,
) -> OptResult<OptimOutcome>
where
    F: LogLikelihood,
{
    let max_iter = opts.tols.max_iter as u64;
    #[allow(unused_mut)]
    let mut optimizer = Executor::new(problem, solver).configure(|state| state.max_iters(max_iter));
    #[cfg(feature = "obs_slog")]
    if opts.verbose {
        let observer = argmin_observer_slog::SlogLogger::term_noblock();
        optimizer = optimizer.add_observer(observer, argmin::core::observers::ObserverMode::Always);
    }

    let mut result = optimizer.run()?.state().clone();
    let iterations = result.get_iter();
    let function_counts = result.get_func_counts().clone();
    let termination = result.get_termination_status().clone();
    log::debug!("nelder-mead stopped after {iterations} iterations: {termination:?}");
    OptimOutcome::new(
        result.take_best_param(),
        -result.get_best_cost(),
        termination,
        iterations,
        function_counts,
    )
}
