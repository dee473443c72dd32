//! epidemic — SEIRD outbreak modeling from reported case counts.
//!
//! Purpose
//! -------
//! Provide the single-source pieces of the outbreak pipeline: validated case
//! series, fixed/free parameter configuration with a stable
//! reparameterization, the SEIRD dynamics and integrator, the Poisson
//! likelihood and the maximum-likelihood fit.
//!
//! Key behaviors
//! -------------
//! - `core` holds data, parameters, dynamics, the Dormand–Prince integrator,
//!   options and `R(t)`.
//! - `models` holds [`SeirModel`] and [`FitResult`].
//! - `errors` defines [`EpiError`] and [`ParamError`].
//!
//! Conventions
//! -----------
//! - Observation times are on the reporting clock; the model clock is the
//!   reporting clock shifted by the delay `tau0`.
//! - Fixed values are natural-space; free values are unconstrained starts.

pub mod core;
pub mod errors;
pub mod models;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::core::{
    ObservedSeries, ParamName, ParamValue, ParameterConfig, ParameterSpec, ParameterVector,
    SeirOptions,
};
pub use self::errors::{EpiError, EpiResult, ParamError, ParamResult};
pub use self::models::{FitResult, SeirModel};

// ---- Optional convenience prelude for downstream crates -------------------

pub mod prelude {
    pub use super::core::prelude::*;
    pub use super::errors::{EpiError, EpiResult, ParamError};
    pub use super::models::prelude::*;
}
