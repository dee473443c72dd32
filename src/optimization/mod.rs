//! optimization — MLE stack, numerical helpers, and unified error surface.
//!
//! Purpose
//! -------
//! Provide the optimization layer used for model fitting: an Argmin-backed
//! derivative-free log-likelihood optimizer, numerically stable parameter
//! transforms, and a single error/result surface. Callers implement a
//! log-likelihood, choose tolerances, and obtain fitted parameters and
//! diagnostics without touching backend solver details.
//!
//! Key behaviors
//! -------------
//! - Expose a high-level API for **maximizing log-likelihoods** `ℓ(θ)`
//!   (`loglik_optimizer`) with a Nelder–Mead simplex, plus a
//!   central-difference Hessian for post-fit curvature.
//! - Supply shared numerical primitives (`numerical_stability`) for mapping
//!   unconstrained parameters into model space.
//! - Normalize configuration issues, numerical failures, and backend solver
//!   errors into a single enum (`errors::OptError`) with a common result
//!   alias (`OptResult<T>`).
//!
//! Invariants & assumptions
//! ------------------------
//! - Optimizers operate in an unconstrained parameter space `θ` and assume
//!   inputs are finite once validation has passed; invalid states are
//!   reported as `OptError`, not panics.
//! - Numerical failures inside a likelihood evaluation (integration failure,
//!   negative expected counts) reject the candidate point; they never end
//!   the search.
//!
//! Conventions
//! -----------
//! - All solvers maximize `ℓ(θ)` by minimizing `c(θ) = -ℓ(θ)`; user-facing
//!   outcomes are expressed in terms of `ℓ`.
//! - Public entrypoints that can fail return `OptResult<T>`; callers never
//!   see raw Argmin errors.
//!
//! Downstream usage
//! ----------------
//! - `epidemic::models::SeirModel` implements `LogLikelihood` and calls
//!   `maximize`; `epidemic::core::transform` composes the
//!   `numerical_stability` transforms.
//! - Front-ends typically import `optimization::prelude::*`.
//!
//! Testing notes
//! -------------
//! - Unit tests in the submodules cover solver wiring, penalty handling,
//!   Hessian accuracy, transform tails, and error conversions.

pub mod errors;
pub mod loglik_optimizer;
pub mod numerical_stability;

// ---- Optional convenience prelude for downstream crates -------------------
//
//     use rust_outbreak::optimization::prelude::*;

pub mod prelude {
    pub use super::errors::{OptError, OptResult};
    pub use super::loglik_optimizer::prelude::*;
    pub use super::numerical_stability::prelude::*;
}
