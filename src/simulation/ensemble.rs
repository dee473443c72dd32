//! Parametric-bootstrap trajectory ensemble.
//!
//! Purpose
//! -------
//! Propagate the sampling uncertainty of a converged fit into projections:
//! draw θ from `N(θ̂, Σ)`, re-integrate the SEIRD system for each draw, add
//! Poisson observation noise, and collect the results as `(time × draw)`
//! matrices.
//!
//! Key behaviors
//! -------------
//! - Two layers per draw: the model expectation (parameter uncertainty
//!   only; confidence intervals) and one Poisson realization (parameter and
//!   observation uncertainty; prediction intervals).
//! - `R(t)` is computed from the same parameter draws as the incidence.
//! - Cumulative cases are reported only for grid points after the data
//!   window, offset by the observed total.
//! - Draw `d` uses `ctx.rng_for_draw(d)` for both its θ and its Poisson
//!   noise, so sequential and rayon-parallel runs are bit-identical.
//!
//! Invariants & assumptions
//! ------------------------
//! - The fit must be converged and carry a covariance.
//! - The grid must reach past the last observation.
//! - Any failing draw rejects the whole ensemble.
use crate::{
    epidemic::{
        core::{data::ObservedSeries, params::ParameterVector, reproduction::reproduction_numbers},
        errors::{EpiError, EpiResult},
        models::{FitResult, SeirModel},
    },
    simulation::{
        context::SimulationContext,
        grid::ProjectionGrid,
        quantiles::{Band, EnsembleSummary, QuantileLevels},
        sampler::MvnSampler,
    },
};
use ndarray::{Array1, Array2, ArrayView1, s};
use rand::rngs::StdRng;
use rand_distr::{Distribution, Poisson};
use rayon::prelude::*;
use serde::Serialize;

/// TrajectoryEnsemble — per-draw trajectories on a projection grid.
///
/// Fields
/// ------
/// - `times`: grid times (reporting clock).
/// - `expected_incidence`, `observed_incidence`, `rt`: `(times × draws)`.
/// - `cumulative_times`: grid times strictly after the last observation.
/// - `expected_cumulative`, `observed_cumulative`:
///   `(cumulative_times × draws)`.
/// - `draw_params`: natural parameter vector of each draw.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrajectoryEnsemble {
    pub times: Array1<f64>,
    pub expected_incidence: Array2<f64>,
    pub observed_incidence: Array2<f64>,
    pub rt: Array2<f64>,
    pub cumulative_times: Array1<f64>,
    pub expected_cumulative: Array2<f64>,
    pub observed_cumulative: Array2<f64>,
    pub draw_params: Vec<ParameterVector>,
}

struct DrawOutcome {
    params: ParameterVector,
    expected: Array1<f64>,
    observed: Array1<f64>,
    rt: Array1<f64>,
}

/// Simulate an ensemble of `ctx.n_draws` trajectories over `grid`.
///
/// Errors
/// ------
/// - `EpiError::NotConverged` for a non-converged fit.
/// - `EpiError::MissingCovariance` if the fit has no covariance.
/// - `EpiError::InvalidGrid` if the grid ends at or before the last
///   observation.
/// - `EpiError::Inference` if the covariance is not a valid PSD matrix.
/// - `EpiError::EnsembleDrawFailed` if any draw fails to integrate or
///   produces invalid incidence.
pub fn simulate(
    model: &SeirModel, fit: &FitResult, data: &ObservedSeries, grid: &ProjectionGrid,
    ctx: &SimulationContext,
) -> EpiResult<TrajectoryEnsemble> {
    if !fit.converged {
        return Err(EpiError::NotConverged { status: fit.status.clone() });
    }
    let covariance = fit.covariance.as_ref().ok_or(EpiError::MissingCovariance)?;
    if grid.first_after(data.last_time()) == grid.len() {
        let index = grid.len() - 1;
        return Err(EpiError::InvalidGrid {
            index,
            value: grid.times()[index],
            reason: "Projection grid must extend past the last observation.",
        });
    }
    let sampler = MvnSampler::new(fit.theta_hat.clone(), covariance.clone())?;
    log::info!(
        "simulating {} draws over {} grid points (parallel = {})",
        ctx.n_draws,
        grid.len(),
        ctx.parallel
    );

    let run = |draw: usize| {
        run_draw(model, fit, &sampler, grid, ctx, draw)
            .map_err(|err| EpiError::EnsembleDrawFailed { draw, reason: err.to_string() })
    };
    let draws: Vec<DrawOutcome> = if ctx.parallel {
        (0..ctx.n_draws).into_par_iter().map(run).collect::<EpiResult<_>>()?
    } else {
        (0..ctx.n_draws).map(run).collect::<EpiResult<_>>()?
    };

    let ensemble = assemble(grid, data, draws);
    log::info!("ensemble complete: {} draws", ensemble.draw_params.len());
    Ok(ensemble)
}

impl TrajectoryEnsemble {
    pub fn n_draws(&self) -> usize {
        self.draw_params.len()
    }

    /// Quantile bands for every layer.
    pub fn summarize(&self, levels: &QuantileLevels) -> EnsembleSummary {
        EnsembleSummary {
            levels: *levels,
            incidence_ci: Band::from_matrix(&self.times, &self.expected_incidence, levels),
            incidence_pi: Band::from_matrix(&self.times, &self.observed_incidence, levels),
            cumulative_ci: Band::from_matrix(
                &self.cumulative_times,
                &self.expected_cumulative,
                levels,
            ),
            cumulative_pi: Band::from_matrix(
                &self.cumulative_times,
                &self.observed_cumulative,
                levels,
            ),
            rt_ci: Band::from_matrix(&self.times, &self.rt, levels),
        }
    }
}

// ---- Helper methods ----

fn run_draw(
    model: &SeirModel, fit: &FitResult, sampler: &MvnSampler, grid: &ProjectionGrid,
    ctx: &SimulationContext, draw: usize,
) -> EpiResult<DrawOutcome> {
    let mut rng = ctx.rng_for_draw(draw);
    let theta = sampler.sample(&mut rng);
    let params = fit.spec.to_natural(&theta)?;
    let expected = model.projected_incidence(&params, grid)?;
    let observed = expected
        .iter()
        .map(|&rate| poisson_draw(rate, &mut rng))
        .collect::<EpiResult<Array1<f64>>>()?;
    let rt = reproduction_numbers(&(grid.times() + params.tau0), &params);
    Ok(DrawOutcome { params, expected, observed, rt })
}

fn poisson_draw(rate: f64, rng: &mut StdRng) -> EpiResult<f64> {
    if rate == 0.0 {
        return Ok(0.0);
    }
    Ok(Poisson::new(rate)?.sample(rng))
}

fn assemble(
    grid: &ProjectionGrid, data: &ObservedSeries, draws: Vec<DrawOutcome>,
) -> TrajectoryEnsemble {
    let n_times = grid.len();
    let n_draws = draws.len();
    let start = grid.first_after(data.last_time());
    let total = data.total_cases() as f64;

    let mut expected_incidence = Array2::<f64>::zeros((n_times, n_draws));
    let mut observed_incidence = Array2::<f64>::zeros((n_times, n_draws));
    let mut rt = Array2::<f64>::zeros((n_times, n_draws));
    let mut expected_cumulative = Array2::<f64>::zeros((n_times - start, n_draws));
    let mut observed_cumulative = Array2::<f64>::zeros((n_times - start, n_draws));
    let mut draw_params = Vec::with_capacity(n_draws);

    for (d, outcome) in draws.into_iter().enumerate() {
        expected_incidence.column_mut(d).assign(&outcome.expected);
        observed_incidence.column_mut(d).assign(&outcome.observed);
        rt.column_mut(d).assign(&outcome.rt);
        expected_cumulative
            .column_mut(d)
            .assign(&running_total(total, outcome.expected.slice(s![start..])));
        observed_cumulative
            .column_mut(d)
            .assign(&running_total(total, outcome.observed.slice(s![start..])));
        draw_params.push(outcome.params);
    }

    TrajectoryEnsemble {
        times: grid.times().clone(),
        expected_incidence,
        observed_incidence,
        rt,
        cumulative_times: grid.times().slice(s![start..]).to_owned(),
        expected_cumulative,
        observed_cumulative,
        draw_params,
    }
}

fn running_total(offset: f64, increments: ArrayView1<f64>) -> Array1<f64> {
    let mut acc = offset;
    increments
        .iter()
        .map(|&v| {
            acc += v;
            acc
        })
        .collect()
}
