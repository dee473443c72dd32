//! SEIR options — configuration for fitting and model integration.
//!
//! Purpose
//! -------
//! Collect the configuration knobs of the outbreak model in one place: the
//! population and seed used for the initial condition, integrator
//! tolerances, optimizer settings and the Hessian step used for the
//! covariance.
//!
//! Invariants & assumptions
//! ------------------------
//! - `population` is finite and positive; `initial_infectious` is finite,
//!   positive and strictly below `population`.
//! - Components (`OdeOptions`, `MLEOptions`) are validated by their own
//!   constructors; `SeirOptions::new` adds the cross-field checks.
//!
//! Testing notes
//! -------------
//! - Unit tests cover defaults and each rejection in `SeirOptions::new`.
use crate::{
    epidemic::{
        core::ode::OdeOptions,
        errors::{EpiError, EpiResult},
    },
    optimization::loglik_optimizer::{MLEOptions, validation::verify_hessian_step},
};
use serde::{Deserialize, Serialize};

/// SeirOptions — model and estimation configuration.
///
/// Fields
/// ------
/// - `population`: `f64`
///   Constant population `N` in the force of infection.
/// - `initial_infectious`: `f64`
///   Infectious individuals `I0` at model time zero.
/// - `ode`: [`OdeOptions`]
///   Tolerances and step controls for every integration.
/// - `mle_opts`: [`MLEOptions`]
///   Nelder–Mead tolerances and initial simplex size.
/// - `hessian_step`: `f64`
///   Relative finite-difference step for the covariance Hessian.
///
/// Default
/// -------
/// - `population = 1e6`, `initial_infectious = 1`
/// - `ode = OdeOptions::default()` (`rtol = atol = 1e-10`)
/// - `mle_opts = MLEOptions::default()`
/// - `hessian_step = 1e-3`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeirOptions {
    pub population: f64,
    pub initial_infectious: f64,
    pub ode: OdeOptions,
    pub mle_opts: MLEOptions,
    pub hessian_step: f64,
}

impl SeirOptions {
    /// Construct validated options.
    ///
    /// Errors
    /// ------
    /// - `EpiError::InvalidPopulation` if `population` is non-finite or ≤ 0.
    /// - `EpiError::InvalidInitialInfectious` if `initial_infectious` is
    ///   non-finite, ≤ 0, or ≥ `population`.
    /// - `EpiError::Optimization(InvalidHessianStep)` for a bad Hessian step.
    pub fn new(
        population: f64, initial_infectious: f64, ode: OdeOptions, mle_opts: MLEOptions,
        hessian_step: f64,
    ) -> EpiResult<Self> {
        if !population.is_finite() || population <= 0.0 {
            return Err(EpiError::InvalidPopulation {
                value: population,
                reason: "Population must be a positive number.",
            });
        }
        if !initial_infectious.is_finite() || initial_infectious <= 0.0 {
            return Err(EpiError::InvalidInitialInfectious {
                value: initial_infectious,
                reason: "Initial infectious count must be finite and > 0.",
            });
        }
        if initial_infectious >= population {
            return Err(EpiError::InvalidInitialInfectious {
                value: initial_infectious,
                reason: "Initial infectious count must be below the population.",
            });
        }
        verify_hessian_step(hessian_step)?;
        Ok(Self { population, initial_infectious, ode, mle_opts, hessian_step })
    }
}

impl Default for SeirOptions {
    fn default() -> Self {
        Self {
            population: 1e6,
            initial_infectious: 1.0,
            ode: OdeOptions::default(),
            mle_opts: MLEOptions::default(),
            hessian_step: 1e-3,
        }
    }
}
