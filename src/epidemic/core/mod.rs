//! epidemic::core — data, parameters, dynamics and integration.
//!
//! Purpose
//! -------
//! Hold the building blocks shared by the SEIR model and the simulation
//! engine: validated observation data, the fixed/free parameter
//! configuration and its reparameterization, compartment dynamics, the ODE
//! integrator, options, and the reproduction number.
//!
//! Downstream usage
//! ----------------
//! - `epidemic::models::seir` composes these into a likelihood and a fit.
//! - `simulation` reuses `transform`, `ode`, `dynamics` and `reproduction`
//!   for each ensemble draw.

pub mod config;
pub mod data;
pub mod dynamics;
pub mod ode;
pub mod options;
pub mod params;
pub mod reproduction;
pub mod transform;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::config::{ConfigValue, ParameterConfig};
pub use self::data::ObservedSeries;
pub use self::dynamics::{ModelState, STATE_DIM, derivatives, transmission_rate, transmission_rates};
pub use self::ode::{OdeOptions, integrate};
pub use self::options::SeirOptions;
pub use self::params::{
    ParamName, ParamValue, ParameterSpec, ParameterSpecBuilder, ParameterVector, TransformKind,
};
pub use self::reproduction::{reproduction_number, reproduction_numbers};
pub use self::transform::free_to_natural;

// ---- Optional convenience prelude for downstream crates -------------------

pub mod prelude {
    pub use super::config::ParameterConfig;
    pub use super::data::ObservedSeries;
    pub use super::dynamics::ModelState;
    pub use super::ode::OdeOptions;
    pub use super::options::SeirOptions;
    pub use super::params::{ParamName, ParamValue, ParameterSpec, ParameterVector};
    pub use super::reproduction::reproduction_number;
}
