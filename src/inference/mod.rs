//! inference — observed-information covariance and standard errors.
//!
//! Purpose
//! -------
//! Provide post-estimation uncertainty quantification on top of a fitted
//! model: the covariance of the free parameters at the MLE from the
//! numerical Hessian, expressed in the unconstrained optimizer space `θ`.
//!
//! Key behaviors
//! -------------
//! - Define [`InferenceError`] and [`InferenceResult`] for covariance shape,
//!   symmetry, finiteness and definiteness failures.
//! - Convert a negative log-likelihood into a covariance matrix via
//!   [`calc_covariance`] (central-difference Hessian + eigen-truncated
//!   pseudoinverse).
//! - Derive [`standard_errors`] from a covariance matrix.
//!
//! Invariants & assumptions
//! ------------------------
//! - Covariance matrices are `p × p` symmetric positive semi-definite, with
//!   `p` the number of free parameters.
//! - All numerical routines return errors rather than panicking.
//!
//! Conventions
//! -----------
//! - Parameters `θ` live in **unconstrained optimizer space**; mapping to
//!   natural parameters is handled in `epidemic::core::transform`.
//!
//! Downstream usage
//! ----------------
//! - `SeirModel::fit` stores the covariance on `FitResult`;
//!   `simulation::sampler::MvnSampler` draws from `N(θ̂, Σ)` with it.
//!
//! Testing notes
//! -------------
//! - Unit tests in [`hessian`] check analytic inverses and truncation.

pub mod errors;
pub mod hessian;

// ---- Re-exports (primary surface) -----------------------------------------

pub use self::errors::{InferenceError, InferenceResult};
pub use self::hessian::{calc_covariance, standard_errors};

// ---- Optional convenience prelude for downstream crates ------------------

pub mod prelude {
    pub use super::errors::{InferenceError, InferenceResult};
    pub use super::hessian::{calc_covariance, standard_errors};
}
