//! SEIRD model: Poisson log-likelihood, maximum-likelihood fit and
//! deterministic projection.
//!
//! The model links the ODE system in `epidemic::core::dynamics` to reported
//! case counts. Observation `j` is Poisson with rate equal to the growth of
//! the cumulative-onset trace `C` over the interval that starts at the
//! (delay-shifted) observation time:
//!
//! ```text
//! g_j = t_j + τ0,  g_{n} = g_{n-1} + (t_{n-1} − t_{n-2})
//! λ_j = C(g_{j+1}) − C(g_j)
//! −ℓ(θ) = −Σ_j [ y_j ln λ_j − λ_j − ln y_j! ]
//! ```
//!
//! Key ideas:
//! - Increments below `−INCIDENCE_TOL·max(1, C)` (or non-finite) mean the
//!   integration broke down and are reported as
//!   `EpiError::NumericalInstability`; smaller negative round-off is
//!   clamped to zero.
//! - Inside the optimizer, numerical failures become the finite penalty
//!   cost, so Nelder–Mead steps away from unstable regions.
//! - The covariance is computed only for converged fits.
use crate::{
    epidemic::{
        core::{
            data::ObservedSeries,
            dynamics::{ModelState, derivatives},
            ode::integrate,
            options::SeirOptions,
            params::{ParameterSpec, ParameterVector},
            reproduction::reproduction_numbers,
        },
        errors::{EpiError, EpiResult},
        models::fit::FitResult,
    },
    inference::hessian::calc_covariance,
    optimization::{
        errors::{OptError, OptResult},
        loglik_optimizer::{LogLikelihood, Theta, maximize},
    },
    simulation::grid::ProjectionGrid,
};
use ndarray::Array1;
use serde::Serialize;
use statrs::function::factorial::ln_factorial;

/// Relative slack for negative cumulative increments caused by round-off.
pub const INCIDENCE_TOL: f64 = 1e-8;

/// SEIRD model bound to a parameter configuration and options.
///
/// # Notes
/// - Stateless across evaluations; `fit` returns a [`FitResult`] instead of
///   caching it, so one model can be shared by the ensemble workers.
#[derive(Debug, Clone, PartialEq)]
pub struct SeirModel {
    /// Fixed/free parameter configuration; defines the θ layout.
    pub spec: ParameterSpec,
    /// Population, integrator and optimizer settings.
    pub options: SeirOptions,
}

/// Deterministic trajectory at a single parameter vector.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PointProjection {
    pub times: Array1<f64>,
    pub incidence: Array1<f64>,
    pub rt: Array1<f64>,
}

impl SeirModel {
    pub fn new(spec: ParameterSpec, options: SeirOptions) -> Self {
        Self { spec, options }
    }

    /// Cumulative onsets `C(t)` at each model time, integrating from `t = 0`.
    ///
    /// # Errors
    /// - `EpiError::IntegrationFailed` when the integrator cannot reach a
    ///   requested time (including times before zero).
    pub fn cumulative_onsets(
        &self, params: &ParameterVector, model_times: &[f64],
    ) -> EpiResult<Vec<f64>> {
        let y0: [f64; 6] =
            ModelState::initial(self.options.population, self.options.initial_infectious).into();
        let population = self.options.population;
        let states = integrate(
            |t, y| derivatives(t, y, params, population),
            0.0,
            y0,
            model_times,
            &self.options.ode,
        )?;
        Ok(states.iter().map(|state| state[5]).collect())
    }

    /// Expected new cases per grid step, `[0, ΔC_1, …, ΔC_{m-1}]`, with the
    /// grid shifted onto the model clock by `params.tau0`.
    ///
    /// # Errors
    /// - Integration errors from [`cumulative_onsets`](Self::cumulative_onsets).
    /// - `EpiError::NumericalInstability` for a materially negative or
    ///   non-finite increment.
    pub fn projected_incidence(
        &self, params: &ParameterVector, grid: &ProjectionGrid,
    ) -> EpiResult<Array1<f64>> {
        let model_times = (grid.times() + params.tau0).to_vec();
        let cumulative = self.cumulative_onsets(params, &model_times)?;
        let mut incidence = Array1::<f64>::zeros(cumulative.len());
        for j in 1..cumulative.len() {
            incidence[j] = checked_increment(j, cumulative[j - 1], cumulative[j])?;
        }
        Ok(incidence)
    }

    /// Poisson negative log-likelihood `−ℓ(θ)` of the observed counts.
    ///
    /// Returns `+∞` when an observation with `y > 0` meets a zero rate.
    ///
    /// # Errors
    /// - `EpiError::Param` for a θ of the wrong length or with invalid entries.
    /// - `EpiError::IntegrationFailed` / `EpiError::NumericalInstability`
    ///   when the ODE solution is unusable at θ.
    pub fn negative_log_likelihood(&self, theta: &Theta, data: &ObservedSeries) -> EpiResult<f64> {
        let params = self.spec.to_natural(theta)?;
        let times = data.times();
        let n = times.len();
        let mut grid: Vec<f64> = times.iter().map(|&t| t + params.tau0).collect();
        grid.push(grid[n - 1] + (times[n - 1] - times[n - 2]));

        let cumulative = self.cumulative_onsets(&params, &grid)?;
        let mut nll = 0.0;
        for (j, &y) in data.cases().iter().enumerate() {
            let rate = checked_increment(j, cumulative[j], cumulative[j + 1])?;
            nll -= poisson_ln_pmf(y, rate);
        }
        Ok(nll)
    }

    /// Fit the free parameters by maximum likelihood.
    ///
    /// ## Steps
    /// 1. Start from the configured free values (`spec.initial_theta()`).
    /// 2. Maximize ℓ(θ) with Nelder–Mead per `options.mle_opts`.
    /// 3. If the solver converged, invert the central-difference observed
    ///    information at θ̂ into the covariance; otherwise leave it `None`.
    ///
    /// ## Errors
    /// - `EpiError::Optimization` for optimizer configuration/backend
    ///   failures, a failing Hessian, or an indefinite Hessian
    ///   (`OptError::IndefiniteHessian`) at θ̂.
    /// - `EpiError::Param` if θ̂ cannot be mapped to natural space.
    pub fn fit(&self, data: &ObservedSeries) -> EpiResult<FitResult> {
        let theta0 = self.spec.initial_theta();
        log::info!(
            "fitting SEIRD model: {} free parameters, {} observations",
            theta0.len(),
            data.len()
        );
        let outcome = maximize(self, theta0, data, &self.options.mle_opts)?;
        log::debug!(
            "optimizer stopped after {} iterations: {} (converged = {})",
            outcome.iterations,
            outcome.status,
            outcome.converged
        );

        let params = self.spec.to_natural(&outcome.theta_hat)?;
        let covariance = if outcome.converged {
            let nll = |theta: &Theta| -> OptResult<f64> {
                Ok(self.negative_log_likelihood(theta, data)?)
            };
            Some(calc_covariance(&nll, &outcome.theta_hat, self.options.hessian_step)?)
        } else {
            None
        };
        log::info!(
            "fit finished: −ℓ = {:.6}, R0 = {:.4}, converged = {}",
            -outcome.value,
            params.beta0 / params.gamma,
            outcome.converged
        );

        Ok(FitResult {
            theta_hat: outcome.theta_hat,
            params,
            covariance,
            converged: outcome.converged,
            status: outcome.status,
            neg_log_likelihood: -outcome.value,
            iterations: outcome.iterations,
            fn_evals: outcome.fn_evals,
            spec: self.spec.clone(),
        })
    }

    /// Deterministic incidence and `R(t)` over `grid` at the point estimate.
    pub fn point_projection(
        &self, fit: &FitResult, grid: &ProjectionGrid,
    ) -> EpiResult<PointProjection> {
        let incidence = self.projected_incidence(&fit.params, grid)?;
        let rt = reproduction_numbers(&(grid.times() + fit.params.tau0), &fit.params);
        Ok(PointProjection { times: grid.times().clone(), incidence, rt })
    }
}

impl LogLikelihood for SeirModel {
    type Data = ObservedSeries;

    fn value(&self, theta: &Theta, data: &ObservedSeries) -> OptResult<f64> {
        Ok(-self.negative_log_likelihood(theta, data)?)
    }

    fn check(&self, theta: &Theta, _data: &ObservedSeries) -> OptResult<()> {
        if theta.len() != self.spec.n_free() {
            return Err(OptError::ThetaLengthMismatch {
                expected: self.spec.n_free(),
                actual: theta.len(),
            });
        }
        Ok(())
    }
}

// ---- Helper methods ----

fn checked_increment(index: usize, previous: f64, current: f64) -> EpiResult<f64> {
    let delta = current - previous;
    if !delta.is_finite() || delta < -INCIDENCE_TOL * current.abs().max(1.0) {
        return Err(EpiError::NumericalInstability { index, value: delta });
    }
    Ok(delta.max(0.0))
}

fn poisson_ln_pmf(y: u64, rate: f64) -> f64 {
    if rate == 0.0 {
        return if y == 0 { 0.0 } else { f64::NEG_INFINITY };
    }
    y as f64 * rate.ln() - rate - ln_factorial(y)
}
