use argmin::core::{ArgminError, Error};

use crate::epidemic::errors::{EpiError, ParamError};

/// Crate-wide result alias for optimizer operations.
pub type OptResult<T> = Result<T, OptError>;

#[derive(Debug, Clone, PartialEq)]
pub enum OptError {
    // ---- MLEOptions ----
    /// Simplex standard-deviation tolerance needs to be positive and finite.
    InvalidSdTolerance {
        tol: f64,
        reason: &'static str,
    },
    /// Maximum iterations needs to be positive.
    InvalidMaxIter {
        max_iter: usize,
        reason: &'static str,
    },
    /// Relative size of the initial simplex needs to be positive and finite.
    InvalidSimplexScale {
        scale: f64,
        reason: &'static str,
    },
    /// Relative finite-difference step for the Hessian needs to be positive and finite.
    InvalidHessianStep {
        step: f64,
        reason: &'static str,
    },

    // ---- Cost function ----
    /// Cost function returned a non-finite value.
    NonFiniteCost {
        value: f64,
    },

    /// The optimizer needs at least one free coordinate.
    EmptyTheta,

    // ---- Optimizer outcome ----
    /// Estimated parameters must be finite.
    InvalidThetaHat {
        index: usize,
        value: f64,
        reason: &'static str,
    },

    /// Theta hat is missing
    MissingThetaHat,

    // ---- Argmin ---
    /// Wrapper for argmin::InvalidParameter
    InvalidParameter {
        text: String,
    },
    /// Wrapper for argmin::NotImplemented
    NotImplemented {
        text: String,
    },
    /// Wrapper for argmin::NotInitialized
    NotInitialized {
        text: String,
    },
    /// Wrapper for argmin::ConditionViolated
    ConditionViolated {
        text: String,
    },
    /// Wrapper for argmin::CheckPointNotFound
    CheckPointNotFound {
        text: String,
    },
    /// Wrapper for argmin::PotentialBug
    PotentialBug {
        text: String,
    },
    /// Wrapper for argmin::ImpossibleError
    ImpossibleError {
        text: String,
    },
    /// Wrapper for other argmin::Error types
    BackendError {
        text: String,
    },

    // ---- Finite Diffs ----
    /// Hessian matrix dimensions do not match parameter dimensions.
    HessianDimMismatch {
        expected: usize,
        found: (usize, usize),
    },

    /// Hessian values need to be finite.
    InvalidHessian {
        row: usize,
        col: usize,
        value: f64,
    },

    /// Observed information has a materially negative eigenvalue.
    IndefiniteHessian {
        min_eigenvalue: f64,
        tolerance: f64,
    },

    // ---- Model Errors ----
    /// Expected incidence was negative or non-finite at an observation.
    NumericalInstability {
        index: usize,
        value: f64,
    },
    /// The ODE integrator could not reach the requested output times.
    IntegrationFailed {
        reason: String,
    },
    /// Theta length does not match the number of free parameters.
    ThetaLengthMismatch {
        expected: usize,
        actual: usize,
    },
    /// Unconstrained optimization input must have finite values.
    InvalidThetaInput {
        index: usize,
        value: f64,
    },
    /// Any other model-side failure, carried as text.
    ModelError {
        text: String,
    },

    // ---- Fallback ----
    UnknownError,
}

impl OptError {
    /// `true` for failures that mean "this θ is numerically unusable" rather
    /// than "the problem is misconfigured". The optimizer adapter turns these
    /// into a penalty cost instead of aborting the run.
    pub fn is_numerical(&self) -> bool {
        matches!(
            self,
            OptError::NumericalInstability { .. }
                | OptError::IntegrationFailed { .. }
                | OptError::NonFiniteCost { .. }
        )
    }
}

impl std::error::Error for OptError {}

impl std::fmt::Display for OptError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- MLEOptions ----
            OptError::InvalidSdTolerance { tol, reason } => {
                write!(f, "Invalid simplex sd tolerance {tol}: {reason}")
            }
            OptError::InvalidMaxIter { max_iter, reason } => {
                write!(f, "Invalid maximum iterations {max_iter}: {reason}")
            }
            OptError::InvalidSimplexScale { scale, reason } => {
                write!(f, "Invalid initial simplex scale {scale}: {reason}")
            }
            OptError::InvalidHessianStep { step, reason } => {
                write!(f, "Invalid Hessian step {step}: {reason}")
            }

            // ---- Cost function ----
            OptError::NonFiniteCost { value } => {
                write!(f, "Non-finite cost value: {value}")
            }
            OptError::EmptyTheta => {
                write!(f, "No free parameters to optimize")
            }

            // ---- Optimizer outcome ----
            OptError::InvalidThetaHat { index, value, reason } => {
                write!(f, "Invalid estimated parameter at index {index}: {value}: {reason}")
            }
            OptError::MissingThetaHat => {
                write!(f, "Missing estimated parameters (theta hat)")
            }

            // ---- Argmin ----
            OptError::InvalidParameter { text } => {
                write!(f, "Invalid parameter: {text}")
            }
            OptError::NotImplemented { text } => {
                write!(f, "Not implemented: {text}")
            }
            OptError::NotInitialized { text } => {
                write!(f, "Not initialized: {text}")
            }
            OptError::ConditionViolated { text } => {
                write!(f, "Condition violated: {text}")
            }
            OptError::CheckPointNotFound { text } => {
                write!(f, "Checkpoint not found: {text}")
            }
            OptError::PotentialBug { text } => {
                write!(f, "Potential bug: {text}")
            }
            OptError::ImpossibleError { text } => {
                write!(f, "Impossible error: {text}")
            }
            OptError::BackendError { text } => {
                write!(f, "Backend error: {text}")
            }

            // ---- Finite Diffs ----
            OptError::HessianDimMismatch { expected, found } => {
                write!(
                    f,
                    "Hessian dimension mismatch: expected ({expected}, {expected}), found {found:?}"
                )
            }
            OptError::InvalidHessian { row, col, value } => {
                write!(f, "Invalid Hessian at ({row}, {col}): {value}, must be finite")
            }
            OptError::IndefiniteHessian { min_eigenvalue, tolerance } => write!(
                f,
                "Indefinite Hessian: min eigenvalue {min_eigenvalue} below -{tolerance}"
            ),

            // ---- Model Errors ----
            OptError::NumericalInstability { index, value } => {
                write!(f, "Numerical instability: expected incidence {value} at observation {index}")
            }
            OptError::IntegrationFailed { reason } => {
                write!(f, "ODE integration failed: {reason}")
            }
            OptError::ThetaLengthMismatch { expected, actual } => {
                write!(f, "Theta length mismatch: expected {expected}, actual {actual}")
            }
            OptError::InvalidThetaInput { index, value } => {
                write!(f, "Invalid theta input at index {index}: {value}, must be finite")
            }
            OptError::ModelError { text } => {
                write!(f, "Model error: {text}")
            }

            // ---- Fallback ----
            OptError::UnknownError => {
                write!(f, "Unknown error")
            }
        }
    }
}

impl From<Error> for OptError {
    fn from(original_err: Error) -> Self {
        // Errors raised by our own cost function come back through argmin
        // boxed; recover them unchanged.
        let original_err = match original_err.downcast::<OptError>() {
            Ok(opt_err) => return opt_err,
            Err(err) => err,
        };
        match original_err.downcast() {
            Ok(opt_err) => match opt_err {
                ArgminError::InvalidParameter { text } => OptError::InvalidParameter { text },
                ArgminError::NotImplemented { text } => OptError::NotImplemented { text },
                ArgminError::NotInitialized { text } => OptError::NotInitialized { text },
                ArgminError::ConditionViolated { text } => OptError::ConditionViolated { text },
                ArgminError::CheckpointNotFound { text } => OptError::CheckPointNotFound { text },
                ArgminError::PotentialBug { text } => OptError::PotentialBug { text },
                ArgminError::ImpossibleError { text } => OptError::ImpossibleError { text },
                _ => OptError::UnknownError,
            },
            Err(err) => OptError::BackendError { text: err.to_string() },
        }
    }
}

impl From<EpiError> for OptError {
    fn from(err: EpiError) -> Self {
        match err {
            EpiError::NumericalInstability { index, value } => {
                OptError::NumericalInstability { index, value }
            }
            EpiError::IntegrationFailed { reason } => OptError::IntegrationFailed { reason },
            EpiError::Param(param_err) => param_err.into(),
            EpiError::Optimization(opt_err) => opt_err,
            other => OptError::ModelError { text: other.to_string() },
        }
    }
}

impl From<ParamError> for OptError {
    fn from(err: ParamError) -> Self {
        match err {
            ParamError::ThetaLengthMismatch { expected, actual } => {
                OptError::ThetaLengthMismatch { expected, actual }
            }
            ParamError::InvalidThetaInput { index, value } => {
                OptError::InvalidThetaInput { index, value }
            }
            other => OptError::ModelError { text: other.to_string() },
        }
    }
}
