//! Errors for outbreak models (data validation, options checks, integration,
//! estimation and ensemble failures).
//!
//! This module defines a model error type, [`EpiError`], and a parameter error
//! type, [`ParamError`], used across the fitting and simulation stacks. Both
//! implement `Display`/`Error`.
//!
//! ## Conventions
//! - **Indices are 0-based**.
//! - Observation times must be **finite, non-negative and strictly increasing**.
//! - Optimizer and covariance errors are wrapped unchanged in
//!   [`EpiError::Optimization`] and [`EpiError::Inference`].
use crate::{inference::errors::InferenceError, optimization::errors::OptError};
use rand_distr::PoissonError;

/// Crate-wide result alias for outbreak operations that may produce [`EpiError`].
pub type EpiResult<T> = Result<T, EpiError>;

/// Result alias for parameter-construction/validation paths that may produce
/// [`ParamError`].
pub type ParamResult<T> = Result<T, ParamError>;

/// Unified error type for outbreak modeling.
#[derive(Debug, Clone, PartialEq)]
pub enum EpiError {
    // ---- Input/data validation ----
    /// Series must have at least two observations.
    TooFewObservations { len: usize },

    /// `times` and `cases` have different lengths.
    LengthMismatch { times: usize, cases: usize },

    /// An observation time is NaN/±inf.
    NonFiniteTime { index: usize, value: f64 },

    /// An observation time is negative.
    NegativeTime { index: usize, value: f64 },

    /// Observation times must be strictly increasing.
    NonIncreasingTimes { index: usize, previous: f64, value: f64 },

    // ---- Options validation ----
    /// Population must be finite and > 0.
    InvalidPopulation { value: f64, reason: &'static str },

    /// Initial infectious count must be finite, > 0, and below the population.
    InvalidInitialInfectious { value: f64, reason: &'static str },

    /// ODE tolerances must be finite and > 0.
    InvalidOdeTolerance { value: f64, reason: &'static str },

    /// ODE initial step must be finite and > 0.
    InvalidOdeStep { value: f64, reason: &'static str },

    /// ODE step budget must be > 0.
    InvalidMaxSteps { value: usize },

    // ---- Integration / likelihood ----
    /// The integrator could not reach the requested output times.
    IntegrationFailed { reason: String },

    /// Expected incidence was materially negative or non-finite.
    NumericalInstability { index: usize, value: f64 },

    // ---- Estimation ----
    /// Fit did not converge; uncertainty propagation is refused.
    NotConverged { status: String },

    /// Fit carries no covariance matrix.
    MissingCovariance,

    /// Wrapped optimizer error.
    Optimization(OptError),

    /// Wrapped covariance / interval error.
    Inference(InferenceError),

    /// Wrapped parameter configuration error.
    Param(ParamError),

    // ---- Simulation ----
    /// Projection grid entries must be finite, non-negative and strictly increasing.
    InvalidGrid { index: usize, value: f64, reason: &'static str },

    /// Ensemble needs at least one draw.
    InvalidDrawCount { n_draws: usize },

    /// Quantile levels must satisfy 0 ≤ lower < upper ≤ 1.
    InvalidQuantile { lower: f64, upper: f64, reason: &'static str },

    /// A single ensemble draw failed; the whole ensemble is rejected.
    EnsembleDrawFailed { draw: usize, reason: String },

    /// Wrapper for rand_distr::PoissonError
    InvalidPoissonRate { reason: String },

    /// ---- Fallback ----
    UnknownError,
}

impl std::error::Error for EpiError {}

impl std::fmt::Display for EpiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Input/data validation ----
            EpiError::TooFewObservations { len } => {
                write!(f, "Series needs at least two observations; got {len}.")
            }
            EpiError::LengthMismatch { times, cases } => {
                write!(f, "Times ({times}) and cases ({cases}) must have equal length.")
            }
            EpiError::NonFiniteTime { index, value } => {
                write!(f, "Observation time at index {index} is non-finite: {value}")
            }
            EpiError::NegativeTime { index, value } => {
                write!(f, "Observation time at index {index} is negative: {value}")
            }
            EpiError::NonIncreasingTimes { index, previous, value } => {
                write!(
                    f,
                    "Observation times must be strictly increasing; index {index} has {value} after {previous}"
                )
            }
            // ---- Options validation ----
            EpiError::InvalidPopulation { value, reason } => {
                write!(f, "Population must be finite and > 0; got: {value}. {reason}")
            }
            EpiError::InvalidInitialInfectious { value, reason } => {
                write!(f, "Invalid initial infectious count {value}: {reason}")
            }
            EpiError::InvalidOdeTolerance { value, reason } => {
                write!(f, "ODE tolerance must be finite and > 0; got: {value}. {reason}")
            }
            EpiError::InvalidOdeStep { value, reason } => {
                write!(f, "ODE step must be finite and > 0; got: {value}. {reason}")
            }
            EpiError::InvalidMaxSteps { value } => {
                write!(f, "ODE step budget must be > 0; got: {value}")
            }
            // ---- Integration / likelihood ----
            EpiError::IntegrationFailed { reason } => {
                write!(f, "ODE integration failed: {reason}")
            }
            EpiError::NumericalInstability { index, value } => {
                write!(f, "Expected incidence at observation {index} is invalid: {value}")
            }
            // ---- Estimation ----
            EpiError::NotConverged { status } => {
                write!(f, "Fit did not converge (status: {status}); refusing to propagate uncertainty.")
            }
            EpiError::MissingCovariance => {
                write!(f, "Fit result carries no covariance matrix.")
            }
            EpiError::Optimization(err) => write!(f, "{err}"),
            EpiError::Inference(err) => write!(f, "{err}"),
            EpiError::Param(err) => write!(f, "{err}"),
            // ---- Simulation ----
            EpiError::InvalidGrid { index, value, reason } => {
                write!(f, "Invalid projection grid at index {index} ({value}): {reason}")
            }
            EpiError::InvalidDrawCount { n_draws } => {
                write!(f, "Ensemble needs at least one draw; got {n_draws}.")
            }
            EpiError::InvalidQuantile { lower, upper, reason } => {
                write!(f, "Invalid quantile levels ({lower}, {upper}): {reason}")
            }
            EpiError::EnsembleDrawFailed { draw, reason } => {
                write!(f, "Ensemble draw {draw} failed: {reason}")
            }
            EpiError::InvalidPoissonRate { reason } => {
                write!(f, "Invalid Poisson rate: {reason}")
            }
            EpiError::UnknownError => {
                write!(f, "An unknown error occurred in the outbreak model.")
            }
        }
    }
}

impl From<OptError> for EpiError {
    fn from(err: OptError) -> EpiError {
        EpiError::Optimization(err)
    }
}

impl From<InferenceError> for EpiError {
    fn from(err: InferenceError) -> EpiError {
        EpiError::Inference(err)
    }
}

impl From<ParamError> for EpiError {
    fn from(err: ParamError) -> EpiError {
        EpiError::Param(err)
    }
}

impl From<PoissonError> for EpiError {
    fn from(err: PoissonError) -> EpiError {
        EpiError::InvalidPoissonRate { reason: err.to_string() }
    }
}

/// Errors specific to parameter configuration and the θ ↔ parameter mapping.
///
/// Typical causes include unknown or duplicated names, missing required
/// parameters, out-of-domain fixed values and θ length mismatches.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamError {
    /// Name does not belong to the model.
    UnknownParameter { name: String },

    /// Parameter is listed as both fixed and free, or twice in one set.
    DuplicateParameter { name: &'static str },

    /// Required parameter is neither fixed nor free.
    MissingParameter { name: &'static str },

    /// Fixed value must be finite (the `tau0` no-delay sentinel excepted).
    NonFiniteFixed { name: &'static str, value: f64 },

    /// Fixed value lies outside its natural domain.
    OutOfDomainFixed { name: &'static str, value: f64, reason: &'static str },

    /// Free starting value must be finite.
    NonFiniteFreeStart { name: &'static str, value: f64 },

    /// Theta length mismatch for the free-parameter layout.
    ThetaLengthMismatch { expected: usize, actual: usize },

    /// Unconstrained optimization input must have finite values.
    InvalidThetaInput { index: usize, value: f64 },

    /// Configuration value could not be interpreted.
    InvalidConfigValue { name: String, text: String },

    /// Configuration document could not be parsed.
    MalformedConfig { reason: String },

    /// ---- Fallback ----
    UnknownError,
}

impl std::error::Error for ParamError {}

impl std::fmt::Display for ParamError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParamError::UnknownParameter { name } => {
                write!(f, "Unknown parameter name: {name:?}")
            }
            ParamError::DuplicateParameter { name } => {
                write!(f, "Parameter {name} is specified more than once (fixed and free?)")
            }
            ParamError::MissingParameter { name } => {
                write!(f, "Parameter {name} must be either fixed or free")
            }
            ParamError::NonFiniteFixed { name, value } => {
                write!(f, "Fixed value for {name} must be finite, got {value}")
            }
            ParamError::OutOfDomainFixed { name, value, reason } => {
                write!(f, "Fixed value for {name} is out of domain ({value}): {reason}")
            }
            ParamError::NonFiniteFreeStart { name, value } => {
                write!(f, "Starting value for free parameter {name} must be finite, got {value}")
            }
            ParamError::ThetaLengthMismatch { expected, actual } => {
                write!(f, "Theta length mismatch: expected {expected}, got {actual}")
            }
            ParamError::InvalidThetaInput { index, value } => {
                write!(f, "Theta input at index {index} must be finite, got {value}")
            }
            ParamError::InvalidConfigValue { name, text } => {
                write!(f, "Could not interpret value {text:?} for parameter {name}")
            }
            ParamError::MalformedConfig { reason } => {
                write!(f, "Malformed parameter configuration: {reason}")
            }
            ParamError::UnknownError => {
                write!(f, "An unknown error occurred in parameter validation.")
            }
        }
    }
}
