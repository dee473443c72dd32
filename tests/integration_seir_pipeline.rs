//! Integration tests for the SEIRD fitting and projection pipeline.
//!
//! Purpose
//! -------
//! - Validate the end-to-end pipeline: from a validated case series, through
//!   parameter configuration and maximum-likelihood fitting, to seeded
//!   parametric-bootstrap ensembles and their quantile bands.
//! - Exercise realistic outbreak regimes rather than toy edge cases only.
//!
//! Coverage
//! --------
//! - `epidemic::core`:
//!   - `ParameterSpec` built by builder, string maps and JSON config.
//! - `epidemic::models::SeirModel`:
//!   - Convergence on a short rising series, local optimality of θ̂,
//!     `R(0) = β0/γ`.
//! - `simulation`:
//!   - Degenerate (zero-covariance) ensembles, seeded reproducibility,
//!     seed sensitivity, parallel vs sequential equality, and quantile
//!     stability between 10,000 and 100,000 draws.
//!   - Refusal of non-converged fits, non-PSD covariances and grids that
//!     end inside the data window.
//!
//! Exclusions
//! ----------
//! - Fine-grained validation of low-level building blocks (integrator,
//!   transforms, error conversions); these are covered by unit tests.
use ndarray::{Array1, Array2, array};
use rust_outbreak::{
    epidemic::{
        core::{
            config::ParameterConfig,
            data::ObservedSeries,
            ode::OdeOptions,
            options::SeirOptions,
            params::{ParamName, ParameterSpec},
            reproduction::reproduction_number,
        },
        errors::EpiError,
        models::{FitResult, SeirModel},
    },
    inference::errors::InferenceError,
    optimization::loglik_optimizer::MLEOptions,
    simulation::{
        context::SimulationContext,
        ensemble::simulate,
        grid::ProjectionGrid,
        quantiles::QuantileLevels,
    },
};
use std::collections::HashMap;

/// Purpose
/// -------
/// The ten-day rising series used by the end-to-end scenarios.
fn ten_day_series() -> ObservedSeries {
    ObservedSeries::new(
        Array1::from_iter((0..10).map(|t| t as f64)),
        array![0, 1, 0, 2, 1, 3, 2, 4, 3, 5],
    )
    .expect("valid series")
}

/// Purpose
/// -------
/// Fixed σ, γ, f, no intervention effect and no reporting delay; β0, k and
/// τ1 free from their customary starting values.
fn ten_day_spec() -> ParameterSpec {
    ParameterSpec::builder()
        .free(ParamName::Beta0, (2.0f64 / 7.4).ln())
        .fixed(ParamName::Beta1, 0.0)
        .free(ParamName::K, (0.1f64).ln())
        .free(ParamName::Tau1, 30.0)
        .fixed(ParamName::F, 0.5)
        .fixed(ParamName::Tau0, f64::NEG_INFINITY)
        .fixed(ParamName::Sigma, 1.0 / 9.3)
        .fixed(ParamName::Gamma, 1.0 / 7.4)
        .build()
        .expect("valid spec")
}

/// Purpose
/// -------
/// Model with looser integrator tolerances for ensemble-heavy tests.
///
/// Notes
/// -----
/// - β0 and the delay τ0 are free so each draw moves both the growth rate
///   and the clock shift.
fn projection_model() -> SeirModel {
    let spec = ParameterSpec::builder()
        .free(ParamName::Beta0, (0.75f64).ln())
        .fixed(ParamName::Beta1, 0.5)
        .fixed(ParamName::K, 0.2)
        .fixed(ParamName::Tau1, 40.0)
        .fixed(ParamName::F, 0.1)
        .free(ParamName::Tau0, 0.0)
        .fixed(ParamName::Sigma, 0.5)
        .fixed(ParamName::Gamma, 0.25)
        .build()
        .expect("valid spec");
    let ode = OdeOptions::new(1e-6, 1e-6, 1e-1, 100_000).expect("valid ode options");
    let opts = SeirOptions::new(1e6, 1.0, ode, MLEOptions::default(), 1e-3).expect("valid options");
    SeirModel::new(spec, opts)
}

/// Purpose
/// -------
/// A converged fit at the configured starting point with the given
/// covariance, bypassing the optimizer.
fn synthetic_fit(model: &SeirModel, covariance: Array2<f64>) -> FitResult {
    let theta_hat = model.spec.initial_theta();
    let params = model.spec.to_natural(&theta_hat).expect("valid θ");
    FitResult {
        theta_hat,
        params,
        covariance: Some(covariance),
        converged: true,
        status: "SolverConverged".to_string(),
        neg_log_likelihood: 0.0,
        iterations: 0,
        fn_evals: HashMap::new(),
        spec: model.spec.clone(),
    }
}

fn projection_grid() -> ProjectionGrid {
    ProjectionGrid::uniform(0.0, 30.0, 1.0).expect("valid grid")
}

#[test]
// Purpose
// -------
// The ten-day scenario converges to an initially growing epidemic.
//
// Given
// -----
// - Cases [0,1,0,2,1,3,2,4,3,5] on days 0..9, default options.
//
// Expect
// ------
// - `converged == true`, a covariance is present, and `β0 > γ`.
// - `R(0) = β0/γ` exactly, and equals `basic_reproduction_number()`.
fn ten_day_fit_converges_to_growing_epidemic() {
    // Arrange
    let data = ten_day_series();
    let model = SeirModel::new(ten_day_spec(), SeirOptions::default());

    // Act
    let fit = model.fit(&data).expect("fit should run");

    // Assert
    assert!(fit.converged, "status: {}", fit.status);
    assert!(fit.covariance.is_some());
    assert!(fit.params.beta0 > fit.params.gamma);
    assert!(fit.neg_log_likelihood.is_finite());
    assert_eq!(
        reproduction_number(0.0, &fit.params),
        fit.params.beta0 / fit.params.gamma
    );
    assert_eq!(fit.basic_reproduction_number(), fit.params.beta0 / fit.params.gamma);
}

#[test]
// Purpose
// -------
// θ̂ is a local minimum of the NLL along every free coordinate.
//
// Given
// -----
// - The converged ten-day fit.
//
// Expect
// ------
// - The NLL at θ̂ reproduces `fit.neg_log_likelihood`.
// - `NLL(θ̂ ± h·e_i) ≥ NLL(θ̂) − 1e-4` for `h = 1e-3·max(1, |θ̂_i|)`.
fn fitted_point_is_locally_optimal() {
    // Arrange
    let data = ten_day_series();
    let model = SeirModel::new(ten_day_spec(), SeirOptions::default());
    let fit = model.fit(&data).expect("fit should run");

    // Act
    let at_hat = model.negative_log_likelihood(&fit.theta_hat, &data).expect("finite NLL");

    // Assert
    assert!((at_hat - fit.neg_log_likelihood).abs() < 1e-9 * at_hat.abs().max(1.0));
    for i in 0..fit.theta_hat.len() {
        let h = 1e-3 * fit.theta_hat[i].abs().max(1.0);
        for sign in [-1.0, 1.0] {
            let mut theta = fit.theta_hat.clone();
            theta[i] += sign * h;
            let nll = model.negative_log_likelihood(&theta, &data).expect("finite NLL");
            assert!(nll >= at_hat - 1e-4, "coordinate {i}, step {}: {nll} < {at_hat}", sign * h);
        }
    }
}

#[test]
// Purpose
// -------
// The likelihood does not depend on how fixed and free parameters are
// supplied or ordered.
//
// Given
// -----
// - The ten-day configuration via builder (two orders), string maps in
//   reversed order, and a JSON document.
//
// Expect
// ------
// - Identical θ layouts and bit-identical NLL values.
fn likelihood_is_invariant_to_merge_order() {
    // Arrange
    let data = ten_day_series();
    let forward = ten_day_spec();
    let reversed = ParameterSpec::builder()
        .fixed(ParamName::Gamma, 1.0 / 7.4)
        .fixed(ParamName::Sigma, 1.0 / 9.3)
        .fixed(ParamName::Tau0, f64::NEG_INFINITY)
        .fixed(ParamName::F, 0.5)
        .free(ParamName::Tau1, 30.0)
        .free(ParamName::K, (0.1f64).ln())
        .fixed(ParamName::Beta1, 0.0)
        .free(ParamName::Beta0, (2.0f64 / 7.4).ln())
        .build()
        .expect("valid spec");
    let from_maps = ParameterSpec::from_maps(
        [
            ("gamma", 1.0 / 7.4),
            ("sigma", 1.0 / 9.3),
            ("tau0", f64::NEG_INFINITY),
            ("f", 0.5),
            ("beta1", 0.0),
        ],
        [("tau1", 30.0), ("k", (0.1f64).ln()), ("beta0", (2.0f64 / 7.4).ln())],
    )
    .expect("valid maps");
    let json = format!(
        r#"{{"fixed": {{"gamma": {}, "sigma": {}, "tau0": "-inf", "f": 0.5, "beta1": 0}},
            "free": {{"tau1": 30, "k": {}, "beta0": {}}}}}"#,
        1.0 / 7.4,
        1.0 / 9.3,
        (0.1f64).ln(),
        (2.0f64 / 7.4).ln()
    );
    let from_json = ParameterConfig::from_json(&json)
        .and_then(ParameterConfig::into_spec)
        .expect("valid config");
    let theta = array![(0.4f64).ln(), (0.2f64).ln(), 6.0];

    // Act
    let nlls: Vec<f64> = [forward, reversed, from_maps, from_json]
        .into_iter()
        .map(|spec| {
            SeirModel::new(spec, SeirOptions::default())
                .negative_log_likelihood(&theta, &data)
                .expect("finite NLL")
        })
        .collect();

    // Assert
    for nll in &nlls[1..] {
        assert_eq!(nll.to_bits(), nlls[0].to_bits());
    }
}

#[test]
// Purpose
// -------
// A zero covariance collapses the ensemble onto the point trajectory.
//
// Given
// -----
// - A synthetic converged fit with Σ = 0, 500 draws.
//
// Expect
// ------
// - Model-layer incidence, cumulative and R(t) bands equal the
//   deterministic projection at every time.
// - Observation-layer draws are non-negative integers whose mean at the
//   last grid point lies within 4 standard errors of the Poisson rate.
fn zero_covariance_ensemble_collapses_to_point_projection() {
    // Arrange
    let model = projection_model();
    let fit = synthetic_fit(&model, Array2::zeros((2, 2)));
    let data = ten_day_series();
    let grid = projection_grid();
    let ctx = SimulationContext::new(99, 500, true).expect("valid context");

    // Act
    let ensemble = simulate(&model, &fit, &data, &grid, &ctx).expect("ensemble runs");
    let summary = ensemble.summarize(&QuantileLevels::default());
    let point = model.point_projection(&fit, &grid).expect("projection runs");

    // Assert
    assert_eq!(summary.incidence_ci.lower, point.incidence);
    assert_eq!(summary.incidence_ci.upper, point.incidence);
    assert_eq!(summary.rt_ci.median, point.rt);
    let spread = &summary.cumulative_ci.upper - &summary.cumulative_ci.lower;
    assert!(spread.iter().all(|&v| v == 0.0));
    assert_eq!(summary.cumulative_ci.times, array![10.0, 11.0, 12.0, 13.0, 14.0, 15.0, 16.0,
        17.0, 18.0, 19.0, 20.0, 21.0, 22.0, 23.0, 24.0, 25.0, 26.0, 27.0, 28.0, 29.0, 30.0]);
    assert!(ensemble.observed_incidence.iter().all(|&v| v >= 0.0 && v.fract() == 0.0));

    let last = grid.len() - 1;
    let rate = point.incidence[last];
    let mean = ensemble.observed_incidence.row(last).mean().expect("non-empty row");
    let se = (rate / ctx.n_draws as f64).sqrt();
    assert!(rate > 10.0);
    assert!((mean - rate).abs() < 4.0 * se, "mean {mean} vs rate {rate}");
}

#[test]
// Purpose
// -------
// Seeded ensembles are bit-reproducible and independent of execution mode;
// different seeds give different draws.
//
// Given
// -----
// - The same synthetic fit, 300 draws, seeds 7 and 8.
//
// Expect
// ------
// - Two sequential runs with seed 7 are identical, and equal to a parallel
//   run with seed 7.
// - Seed 8 differs from seed 7 in the observation layer.
fn seeded_ensembles_are_reproducible_and_seed_sensitive() {
    // Arrange
    let model = projection_model();
    let fit = synthetic_fit(&model, array![[0.0025, 0.0], [0.0, 0.01]]);
    let data = ten_day_series();
    let grid = projection_grid();
    let sequential = SimulationContext::new(7, 300, false).expect("valid context");
    let parallel = SimulationContext::new(7, 300, true).expect("valid context");
    let other_seed = SimulationContext::new(8, 300, false).expect("valid context");

    // Act
    let a = simulate(&model, &fit, &data, &grid, &sequential).expect("ensemble runs");
    let b = simulate(&model, &fit, &data, &grid, &sequential).expect("ensemble runs");
    let c = simulate(&model, &fit, &data, &grid, &parallel).expect("ensemble runs");
    let d = simulate(&model, &fit, &data, &grid, &other_seed).expect("ensemble runs");

    // Assert
    assert_eq!(a, b);
    assert_eq!(a, c);
    assert_ne!(a.observed_incidence, d.observed_incidence);
    assert_ne!(a.draw_params, d.draw_params);
}

#[test]
// Purpose
// -------
// Quantile bands are stable as the draw count grows.
//
// Given
// -----
// - The same synthetic fit with seeds 1 (10,000 draws) and 2 (100,000
//   draws).
//
// Expect
// ------
// - At the last grid point, the 2.5% / 97.5% bounds of the incidence CI and
//   PI and of the R(t) CI differ by less than 5% relative.
fn quantile_bands_are_stable_between_draw_counts() {
    // Arrange
    let model = projection_model();
    let fit = synthetic_fit(&model, array![[0.0025, 0.0], [0.0, 0.01]]);
    let data = ten_day_series();
    let grid = projection_grid();
    let small = SimulationContext::new(1, 10_000, true).expect("valid context");
    let large = SimulationContext::new(2, 100_000, true).expect("valid context");
    let levels = QuantileLevels::default();

    // Act
    let s = simulate(&model, &fit, &data, &grid, &small).expect("ensemble runs").summarize(&levels);
    let l = simulate(&model, &fit, &data, &grid, &large).expect("ensemble runs").summarize(&levels);

    // Assert
    let last = grid.len() - 1;
    let pairs = [
        (s.incidence_ci.lower[last], l.incidence_ci.lower[last]),
        (s.incidence_ci.upper[last], l.incidence_ci.upper[last]),
        (s.incidence_pi.lower[last], l.incidence_pi.lower[last]),
        (s.incidence_pi.upper[last], l.incidence_pi.upper[last]),
        (s.rt_ci.lower[last], l.rt_ci.lower[last]),
        (s.rt_ci.upper[last], l.rt_ci.upper[last]),
    ];
    for (small_q, large_q) in pairs {
        assert!(large_q > 0.0);
        assert!(((small_q - large_q) / large_q).abs() < 0.05, "{small_q} vs {large_q}");
    }
}

#[test]
// Purpose
// -------
// Uncertainty propagation refuses unusable fits.
//
// Given
// -----
// - A non-converged fit, a fit without covariance, and a fit whose
//   covariance is indefinite.
//
// Expect
// ------
// - `NotConverged`, `MissingCovariance` and `Inference(CovarianceNotPsd)`.
fn simulate_refuses_non_converged_and_invalid_fits() {
    // Arrange
    let model = projection_model();
    let data = ten_day_series();
    let grid = projection_grid();
    let ctx = SimulationContext::new(3, 10, false).expect("valid context");
    let mut not_converged = synthetic_fit(&model, Array2::eye(2));
    not_converged.converged = false;
    not_converged.status = "MaxItersReached".to_string();
    let mut missing = synthetic_fit(&model, Array2::eye(2));
    missing.covariance = None;
    let indefinite = synthetic_fit(&model, array![[1.0, 2.0], [2.0, 1.0]]);

    // Act / Assert
    assert!(matches!(
        simulate(&model, &not_converged, &data, &grid, &ctx),
        Err(EpiError::NotConverged { .. })
    ));
    assert!(matches!(
        simulate(&model, &missing, &data, &grid, &ctx),
        Err(EpiError::MissingCovariance)
    ));
    assert!(matches!(
        simulate(&model, &indefinite, &data, &grid, &ctx),
        Err(EpiError::Inference(InferenceError::CovarianceNotPsd { .. }))
    ));
}

#[test]
// Purpose
// -------
// Projections must reach beyond the observed window.
//
// Given
// -----
// - Data on days 0..9, a grid ending on day 5 and a grid ending on day 9.
//
// Expect
// ------
// - `InvalidGrid` for both; the grid ending on day 10 is accepted.
fn simulate_rejects_grid_inside_data_window() {
    // Arrange
    let model = projection_model();
    let data = ten_day_series();
    let fit = synthetic_fit(&model, Array2::zeros((2, 2)));
    let ctx = SimulationContext::new(3, 5, false).expect("valid context");
    let short = ProjectionGrid::uniform(0.0, 5.0, 1.0).expect("valid grid");
    let at_last = ProjectionGrid::uniform(0.0, 9.0, 1.0).expect("valid grid");
    let beyond = ProjectionGrid::uniform(0.0, 10.0, 1.0).expect("valid grid");

    // Act / Assert
    assert!(matches!(
        simulate(&model, &fit, &data, &short, &ctx),
        Err(EpiError::InvalidGrid { index: 5, .. })
    ));
    assert!(matches!(
        simulate(&model, &fit, &data, &at_last, &ctx),
        Err(EpiError::InvalidGrid { index: 9, .. })
    ));
    let ensemble = simulate(&model, &fit, &data, &beyond, &ctx).expect("grid past window");
    assert_eq!(ensemble.cumulative_times, array![10.0]);
}

#[test]
// Purpose
// -------
// An exhausted iteration budget is reported as non-converged without a
// covariance.
fn exhausted_budget_yields_non_converged_fit() {
    // Arrange
    let mut opts = SeirOptions::default();
    opts.mle_opts.tols.max_iter = 2;
    let model = SeirModel::new(ten_day_spec(), opts);

    // Act
    let fit = model.fit(&ten_day_series()).expect("fit should run");

    // Assert
    assert!(!fit.converged);
    assert!(fit.covariance.is_none());
    assert!(matches!(fit.parameter_intervals(0.95), Err(EpiError::MissingCovariance)));
}
