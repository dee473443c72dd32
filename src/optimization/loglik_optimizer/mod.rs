//! loglik_optimizer — MLE-friendly, argmin-powered log-likelihood optimizer.
//!
//! Purpose
//! -------
//! Provide a high-level, Argmin-backed optimization layer for **maximizing
//! log-likelihoods** `ℓ(θ)`. Callers implement a single trait,
//! [`LogLikelihood`], and invoke [`maximize`] to run a derivative-free
//! Nelder–Mead simplex search with configurable tolerances.
//!
//! Key behaviors
//! -------------
//! - Convert user-supplied log-likelihoods `ℓ(θ)` into Argmin-compatible
//!   cost functions `c(θ) = -ℓ(θ)` via [`adapter::ArgMinAdapter`], mapping
//!   numerically failed evaluations to [`adapter::NLL_PENALTY`].
//! - Expose a single, user-facing entrypoint [`maximize`] that:
//!   - validates the initial guess with [`LogLikelihood::check`],
//!   - builds the initial simplex via [`builders`],
//!   - executes the solver via [`run::run_nelder_mead`], and
//!   - normalizes results into an [`OptimOutcome`].
//! - Provide a central-difference Hessian in [`finite_diff`] for the
//!   covariance step after a fit.
//! - Centralize optimizer configuration ([`Tolerances`], [`MLEOptions`]) and
//!   validation logic ([`validation`]).
//!
//! Invariants & assumptions
//! ------------------------
//! - The optimizer **always maximizes** a log-likelihood `ℓ(θ)` by minimizing
//!   `c(θ) = -ℓ(θ)`; user code implements `ℓ(θ)`, never the cost.
//! - [`LogLikelihood::value`] treats invalid inputs as recoverable
//!   [`OptError`](crate::optimization::errors::OptError) values, not panics.
//! - `converged` is `true` only when the simplex met its tolerance.
//!
//! Conventions
//! -----------
//! - Parameters live in an unconstrained optimizer space as [`Theta`]
//!   (`Array1<f64>`). Any mapping to constrained space happens in the model
//!   layer.
//! - Errors bubble up as `OptResult<T>`; this module and its children never
//!   intentionally panic or use `unsafe`.
//!
//! Downstream usage
//! ----------------
//! - `epidemic::models::SeirModel` implements [`LogLikelihood`] and calls
//!   [`maximize`], then [`finite_diff::compute_hessian`] at `θ̂`.
//!
//! Testing notes
//! -------------
//! - Unit tests in submodules cover penalty mapping in [`adapter`], simplex
//!   construction in [`builders`], Hessian accuracy in [`finite_diff`],
//!   configuration and outcome invariants in [`traits`], and end-to-end
//!   solves on toy objectives in [`api`].

pub mod adapter;
pub mod api;
pub mod builders;
pub mod finite_diff;
pub mod run;
pub mod traits;
pub mod types;
pub mod validation;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::adapter::NLL_PENALTY;
pub use self::api::maximize;
pub use self::finite_diff::compute_hessian;
pub use self::traits::{LogLikelihood, MLEOptions, OptimOutcome, Tolerances};
pub use self::types::{Cost, FnEvalMap, Hessian, Theta};

// ---- Optional convenience prelude for downstream crates -------------------
//
//     use rust_outbreak::optimization::loglik_optimizer::prelude::*;

pub mod prelude {
    pub use super::api::maximize;
    pub use super::traits::{LogLikelihood, MLEOptions, OptimOutcome, Tolerances};
    pub use super::types::{Cost, Theta};
}
