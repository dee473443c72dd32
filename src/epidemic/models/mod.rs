//! models — the SEIRD outbreak model and its fit results.
//!
//! Purpose
//! -------
//! Wire `epidemic::core` (parameters, dynamics, integrator) to the generic
//! log-likelihood optimizer and the covariance machinery in `inference`.
//!
//! Key behaviors
//! -------------
//! - [`SeirModel`] implements [`LogLikelihood`](crate::optimization::loglik_optimizer::LogLikelihood)
//!   over the free unconstrained θ and exposes `fit`,
//!   `negative_log_likelihood`, `projected_incidence` and
//!   `point_projection`.
//! - [`FitResult`] carries θ̂, natural parameters, the optional covariance
//!   and Wald intervals.
//!
//! Invariants & assumptions
//! ------------------------
//! - θ always has `spec.n_free()` entries in canonical parameter order.
//! - `FitResult::covariance` is `Some` iff the optimizer converged.
//!
//! Downstream usage
//! ----------------
//! - `simulation::simulate` consumes a converged [`FitResult`] together with
//!   the same [`SeirModel`].

pub mod fit;
pub mod seir;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::fit::{FitResult, ParameterInterval};
pub use self::seir::{INCIDENCE_TOL, PointProjection, SeirModel};

// ---- Optional convenience prelude for downstream crates -------------------

pub mod prelude {
    pub use super::fit::FitResult;
    pub use super::seir::SeirModel;
}
