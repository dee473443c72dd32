//! loglik_optimizer::builders — Nelder–Mead solver construction helpers.
//!
//! Purpose
//! -------
//! Build the initial simplex around a starting point and wire crate-level
//! tolerances into Argmin's `NelderMead`, so higher-level code can request a
//! configured solver without touching Argmin-specific types.
//!
//! Key behaviors
//! -------------
//! - [`initial_simplex`] places `n + 1` vertices: `θ0` itself and one vertex
//!   per axis, `θ0 + h_i e_i`.
//! - [`build_optimizer_nelder_mead`] applies `sd_tolerance` from
//!   [`MLEOptions`].
//!
//! Invariants & assumptions
//! ------------------------
//! - `θ0` is non-empty and finite (checked by `validate_theta0`).
//! - Axis steps are `h_i = simplex_scale · |θ0_i|`, falling back to
//!   `simplex_scale` when `θ0_i == 0`, so the simplex is never degenerate.
//!
//! Conventions
//! -----------
//! - The builders do **not** set `max_iters`; that is applied by the runner.
//! - Argmin errors surface as [`OptError`](crate::optimization::errors::OptError)
//!   via the crate's `From<Error>` conversion.
//!
//! Testing notes
//! -------------
//! - Unit tests check vertex placement, including the zero-coordinate
//!   fallback, and rejection of invalid starting points.
use crate::optimization::{
    errors::OptResult,
    loglik_optimizer::{
        traits::MLEOptions,
        types::{NelderMeadSolver, Theta},
        validation::validate_theta0,
    },
};

/// initial_simplex — build `n + 1` vertices around `theta0`.
///
/// Parameters
/// ----------
/// - `theta0`: `&Theta`
///   Starting point; becomes the first vertex.
/// - `scale`: `f64`
///   Relative axis step (already validated as positive and finite).
///
/// Returns
/// -------
/// `OptResult<Vec<Theta>>`
///   - `theta0` followed by `theta0 + h_i e_i` for each axis `i`.
///
/// Errors
/// ------
/// - `OptError::EmptyTheta` / `OptError::InvalidThetaInput` from
///   `validate_theta0`.
pub fn initial_simplex(theta0: &Theta, scale: f64) -> OptResult<Vec<Theta>> {
    validate_theta0(theta0)?;
    let mut vertices = Vec::with_capacity(theta0.len() + 1);
    vertices.push(theta0.clone());
    for i in 0..theta0.len() {
        let mut vertex = theta0.clone();
        let step = if theta0[i] == 0.0 { scale } else { scale * theta0[i].abs() };
        vertex[i] += step;
        vertices.push(vertex);
    }
    Ok(vertices)
}

/// build_optimizer_nelder_mead — construct a Nelder–Mead solver.
///
/// Purpose
/// -------
/// Build a [`NelderMeadSolver`] over the simplex from [`initial_simplex`]
/// with the standard-deviation tolerance from `opts.tols`.
///
/// Errors
/// ------
/// - Propagates `initial_simplex` errors.
/// - `OptError` (via `From<argmin::core::Error>`) if Argmin rejects the
///   tolerance.
///
/// Examples
/// --------
/// ```ignore
/// let solver = build_optimizer_nelder_mead(&theta0, &opts)?;
/// let outcome = run_nelder_mead(&opts, problem, solver)?;
/// ```
pub fn build_optimizer_nelder_mead(theta0: &Theta, opts: &MLEOptions) -> OptResult<NelderMeadSolver> {
    let vertices = initial_simplex(theta0, opts.simplex_scale)?;
    let solver = NelderMeadSolver::new(vertices).with_sd_tolerance(opts.tols.sd_tolerance)?;
    Ok(solver)
}
