//! Numerical stability utilities.
//!
//! Provides guarded implementations of the scalar transforms used to map
//! unconstrained optimizer coordinates into constrained model parameters.
//! Naïve `exp` and `1 / (1 + exp(-x))` overflow or round to the boundary of
//! their target domain for moderately large inputs; the versions here clamp
//! their output so the model never sees an exact `0`, `1`, or `∞`.
//!
//! # Provided items
//! - [`LOGIT_EPS`]: distance kept between logistic outputs and `{0, 1}`.
//! - [`EIGEN_EPS`]: relative eigenvalue floor for pseudoinverses.
//! - [`safe_exp`] / [`safe_log`]: ℝ ↔ (0, ∞).
//! - [`safe_logistic`] / [`safe_logit`]: ℝ ↔ (0, 1).

/// Distance kept between logistic outputs and the closed boundary `{0, 1}`.
///
/// `1 - 1e-15` is still distinguishable from `1.0` in `f64`, so clamped
/// outputs stay strictly inside the open unit interval.
pub const LOGIT_EPS: f64 = 1e-15;

/// Relative floor below which eigenvalues are treated as zero.
///
/// Used when forming pseudoinverses of observed-information matrices: an
/// eigenvalue `λ` contributes only if `λ > EIGEN_EPS · max(1, λ_max)`.
pub const EIGEN_EPS: f64 = 1e-10;

/// Exponential transform onto `(0, ∞)` with clamped output.
///
/// `exp(x)` underflows to `0.0` below roughly `-745` and overflows to `∞`
/// above roughly `709`. The result is clamped to
/// `[f64::MIN_POSITIVE, f64::MAX]` so rate parameters stay strictly positive
/// and finite.
///
/// # Parameters
/// - `x`: finite real input
///
/// # Returns
/// - `exp(x)` clamped into the positive finite range.
pub fn safe_exp(x: f64) -> f64 {
    x.exp().clamp(f64::MIN_POSITIVE, f64::MAX)
}

/// Inverse of [`safe_exp`] on `(0, ∞)`.
///
/// A non-positive input maps to `-∞`; callers that need a finite value must
/// validate the domain beforehand.
pub fn safe_log(x: f64) -> f64 {
    if x <= 0.0 { f64::NEG_INFINITY } else { x.ln() }
}

/// Numerically stable logistic function `σ(x) = 1 / (1 + exp(-x))`.
///
/// Uses the sign-split form to avoid overflow of `exp(-x)` for large
/// negative `x`:
///
/// - `x ≥ 0`: `1 / (1 + exp(-x))`
/// - `x < 0`: `exp(x) / (1 + exp(x))`
///
/// The result is clamped to `[LOGIT_EPS, 1 - LOGIT_EPS]`.
pub fn safe_logistic(x: f64) -> f64 {
    let p = if x >= 0.0 {
        1.0 / (1.0 + (-x).exp())
    } else {
        let ex = x.exp();
        ex / (1.0 + ex)
    };
    p.clamp(LOGIT_EPS, 1.0 - LOGIT_EPS)
}

/// Inverse logistic (log-odds) `logit(p) = ln(p / (1 - p))` on `(0, 1)`.
///
/// Computed as `ln(p) - ln1p(-p)` which keeps precision for `p` close to
/// either boundary. `p = 0` maps to `-∞`, `p = 1` to `+∞`.
pub fn safe_logit(p: f64) -> f64 {
    if p <= 0.0 {
        f64::NEG_INFINITY
    } else if p >= 1.0 {
        f64::INFINITY
    } else {
        p.ln() - (-p).ln_1p()
    }
}
