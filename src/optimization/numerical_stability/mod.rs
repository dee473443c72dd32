//! numerical_stability — guarded transforms and shared numeric tolerances.
//!
//! Purpose
//! -------
//! Collect the scalar transforms that map unconstrained optimizer
//! coordinates into constrained model parameters, together with the small
//! numeric tolerances shared by the reparameterization and the covariance
//! code.
//!
//! Key behaviors
//! -------------
//! - Provide clamped `exp`/`log` (`safe_exp`, `safe_log`) for strictly
//!   positive rate parameters.
//! - Provide a sign-split logistic and its inverse (`safe_logistic`,
//!   `safe_logit`) for parameters living in `(0, 1)`.
//! - Centralize `LOGIT_EPS` and `EIGEN_EPS`.
//!
//! Invariants & assumptions
//! ------------------------
//! - Forward transforms accept any `f64` and never return a value on the
//!   closed boundary of their target domain.
//! - Inverse transforms are only meaningful on the open target domain; they
//!   return `±∞` on the boundary rather than panicking.
//!
//! Conventions
//! -----------
//! - Pure functions on `f64`; no logging, no I/O, no global state.
//!
//! Downstream usage
//! ----------------
//! - `epidemic::core::transform` composes these per parameter to implement
//!   the parameter-vector reparameterization.
//! - `inference::hessian` uses `EIGEN_EPS` for eigenvalue truncation.
//!
//! Testing notes
//! -------------
//! - Unit tests in [`transformations`] cover agreement with naïve formulas,
//!   tail behavior, and round trips.

pub mod transformations;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::transformations::{
    EIGEN_EPS, LOGIT_EPS, safe_exp, safe_log, safe_logistic, safe_logit,
};

// ---- Optional convenience prelude for downstream crates -------------------

pub mod prelude {
    pub use super::transformations::{
        EIGEN_EPS, LOGIT_EPS, safe_exp, safe_log, safe_logistic, safe_logit,
    };
}
