//! loglik_optimizer::types — shared numeric aliases and solver wiring.
//!
//! Purpose
//! -------
//! Centralize the core numeric types and solver aliases used by the
//! log-likelihood optimizer, so the rest of the optimization code can stay
//! agnostic to `ndarray` and Argmin generics.
//!
//! Key behaviors
//! -------------
//! - Define canonical aliases for parameter vectors, Hessians, and scalar
//!   costs (`Theta`, `Hessian`, `Cost`).
//! - Provide a standard map type for Argmin function-evaluation counters
//!   (`FnEvalMap`).
//! - Expose the pre-wired Nelder–Mead solver alias (`NelderMeadSolver`).
//!
//! Invariants & assumptions
//! ------------------------
//! - All optimizer vectors and matrices are `ndarray` containers over `f64`.
//! - `Cost` is always a scalar `f64`; higher layers handle the sign flip
//!   between cost and log-likelihood.
//!
//! Conventions
//! -----------
//! - `Theta` is a column vector with one entry per free parameter.
//! - `Hessian` is a dense `theta.len() × theta.len()` matrix when used.
//!
//! Testing notes
//! -------------
//! - Type aliases only; exercised by the surrounding optimizer tests.
use argmin::solver::neldermead::NelderMead;
use ndarray::{Array1, Array2};
use std::collections::HashMap;

/// Parameter vector `θ` for log-likelihood optimization.
pub type Theta = Array1<f64>;

/// Dense Hessian matrix; `n × n` for `n = Theta.len()`.
pub type Hessian = Array2<f64>;

/// Scalar objective value `c(θ) = -ℓ(θ)` used by the optimizer.
pub type Cost = f64;

/// Function-evaluation counters as reported by the solver.
///
/// Maps counter names (e.g., `"cost_count"`) to counts.
pub type FnEvalMap = HashMap<String, u64>;

/// Nelder–Mead simplex solver specialized to this crate's numeric types.
pub type NelderMeadSolver = NelderMead<Theta, Cost>;
