//! Adaptive Dormand–Prince 5(4) integrator for small fixed-size systems.
//!
//! Purpose
//! -------
//! Integrate `y' = f(t, y)` for `y ∈ ℝᴺ` and report the solution exactly at a
//! list of output times. Used for every likelihood evaluation and every
//! ensemble draw, so it works on stack arrays and allocates only the output.
//!
//! Key behaviors
//! -------------
//! - Embedded 5(4) pair with FSAL (first-same-as-last) stage reuse.
//! - Error control on the RMS norm of `err_i / (atol + rtol·max(|y_i|, |ŷ_i|))`;
//!   step factor `0.9·err^(−1/5)` clamped to `[0.2, 5]`.
//! - Steps are clipped so the solver lands on each output time.
//!
//! Invariants & assumptions
//! ------------------------
//! - Output times are non-decreasing and no earlier than `t0`.
//! - Failures (step below `min_step`, step budget exhausted, non-finite
//!   state) are reported as `EpiError::IntegrationFailed`; no partial
//!   solution is returned.
//!
//! Testing notes
//! -------------
//! - Unit tests check exponential decay and a harmonic oscillator against
//!   closed forms, output at `t0`, and each failure path.
use crate::epidemic::errors::{EpiError, EpiResult};
use serde::{Deserialize, Serialize};

// Dormand–Prince 5(4) tableau.
const C2: f64 = 1.0 / 5.0;
const C3: f64 = 3.0 / 10.0;
const C4: f64 = 4.0 / 5.0;
const C5: f64 = 8.0 / 9.0;

const A21: f64 = 1.0 / 5.0;
const A31: f64 = 3.0 / 40.0;
const A32: f64 = 9.0 / 40.0;
const A41: f64 = 44.0 / 45.0;
const A42: f64 = -56.0 / 15.0;
const A43: f64 = 32.0 / 9.0;
const A51: f64 = 19372.0 / 6561.0;
const A52: f64 = -25360.0 / 2187.0;
const A53: f64 = 64448.0 / 6561.0;
const A54: f64 = -212.0 / 729.0;
const A61: f64 = 9017.0 / 3168.0;
const A62: f64 = -355.0 / 33.0;
const A63: f64 = 46732.0 / 5247.0;
const A64: f64 = 49.0 / 176.0;
const A65: f64 = -5103.0 / 18656.0;

const B1: f64 = 35.0 / 384.0;
const B3: f64 = 500.0 / 1113.0;
const B4: f64 = 125.0 / 192.0;
const B5: f64 = -2187.0 / 6784.0;
const B6: f64 = 11.0 / 84.0;

// b − b̂ (5th minus embedded 4th order weights).
const E1: f64 = 71.0 / 57600.0;
const E3: f64 = -71.0 / 16695.0;
const E4: f64 = 71.0 / 1920.0;
const E5: f64 = -17253.0 / 339200.0;
const E6: f64 = 22.0 / 525.0;
const E7: f64 = -1.0 / 40.0;

const SAFETY: f64 = 0.9;
const MIN_FACTOR: f64 = 0.2;
const MAX_FACTOR: f64 = 5.0;

/// `OdeOptions` — tolerances and step controls for [`integrate`].
///
/// Default
/// -------
/// - `rtol = atol = 1e-10`
/// - `initial_step = 1e-2`
/// - `min_step = 1e-12`
/// - `max_steps = 1_000_000`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OdeOptions {
    pub rtol: f64,
    pub atol: f64,
    pub initial_step: f64,
    pub min_step: f64,
    pub max_steps: usize,
}

impl OdeOptions {
    /// Construct validated options with the default `min_step`.
    ///
    /// Errors
    /// ------
    /// - `EpiError::InvalidOdeTolerance` for non-finite or non-positive tolerances.
    /// - `EpiError::InvalidOdeStep` for a non-finite or non-positive step.
    /// - `EpiError::InvalidMaxSteps` if `max_steps == 0`.
    pub fn new(rtol: f64, atol: f64, initial_step: f64, max_steps: usize) -> EpiResult<Self> {
        for value in [rtol, atol] {
            if !value.is_finite() || value <= 0.0 {
                return Err(EpiError::InvalidOdeTolerance {
                    value,
                    reason: "Tolerances must be finite and strictly positive.",
                });
            }
        }
        check_step(initial_step)?;
        if max_steps == 0 {
            return Err(EpiError::InvalidMaxSteps { value: max_steps });
        }
        Ok(Self { rtol, atol, initial_step, min_step: Self::default().min_step, max_steps })
    }

    pub fn with_min_step(mut self, min_step: f64) -> EpiResult<Self> {
        check_step(min_step)?;
        self.min_step = min_step;
        Ok(self)
    }
}

impl Default for OdeOptions {
    fn default() -> Self {
        Self { rtol: 1e-10, atol: 1e-10, initial_step: 1e-2, min_step: 1e-12, max_steps: 1_000_000 }
    }
}

fn check_step(value: f64) -> EpiResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(EpiError::InvalidOdeStep {
            value,
            reason: "Steps must be finite and strictly positive.",
        });
    }
    Ok(())
}

fn failed(reason: String) -> EpiError {
    EpiError::IntegrationFailed { reason }
}

/// Integrate `y' = rhs(t, y)` from `(t0, y0)` and return `y` at each of `t_out`.
///
/// Parameters
/// ----------
/// - `rhs`: right-hand side `f(t, y)`.
/// - `t0`, `y0`: initial time and state.
/// - `t_out`: non-decreasing output times, each `≥ t0`. An output time equal
///   to the current time returns the current state.
/// - `opts`: tolerances and step controls.
///
/// Errors
/// ------
/// - `EpiError::IntegrationFailed` for unordered output times, step
///   underflow, step budget exhaustion or a non-finite state.
pub fn integrate<const N: usize, F>(
    rhs: F, t0: f64, y0: [f64; N], t_out: &[f64], opts: &OdeOptions,
) -> EpiResult<Vec<[f64; N]>>
where
    F: Fn(f64, &[f64; N]) -> [f64; N],
{
    let mut out = Vec::with_capacity(t_out.len());
    let mut t = t0;
    let mut y = y0;
    let mut k1 = rhs(t, &y);
    let mut h = opts.initial_step;
    let mut steps = 0usize;

    for (index, &target) in t_out.iter().enumerate() {
        if !target.is_finite() || target < t {
            return Err(failed(format!(
                "output time {target} at index {index} precedes current time {t}"
            )));
        }
        while t < target {
            if steps >= opts.max_steps {
                return Err(failed(format!("exceeded {} steps before t = {target}", opts.max_steps)));
            }
            if h < opts.min_step {
                return Err(failed(format!("step size {h:e} underflow at t = {t}")));
            }
            let remaining = target - t;
            let clipped = h >= remaining;
            let step = if clipped { remaining } else { h };

            let (y_new, k7, err) = dopri_step(&rhs, t, &y, &k1, step, opts);
            steps += 1;

            if !err.is_finite() || y_new.iter().any(|v| !v.is_finite()) {
                h = step * MIN_FACTOR;
                if h < opts.min_step {
                    return Err(failed(format!("non-finite state near t = {t}")));
                }
                continue;
            }

            let factor = if err == 0.0 {
                MAX_FACTOR
            } else {
                (SAFETY * err.powf(-0.2)).clamp(MIN_FACTOR, MAX_FACTOR)
            };
            if err <= 1.0 {
                t = if clipped { target } else { t + step };
                y = y_new;
                k1 = k7;
                if !clipped {
                    h = step * factor;
                }
            } else {
                h = step * factor.min(1.0);
            }
        }
        out.push(y);
    }
    Ok(out)
}

/// One Dormand–Prince step of size `h`; returns `(y_{n+1}, f(t+h, y_{n+1}), err)`.
fn dopri_step<const N: usize, F>(
    rhs: &F, t: f64, y: &[f64; N], k1: &[f64; N], h: f64, opts: &OdeOptions,
) -> ([f64; N], [f64; N], f64)
where
    F: Fn(f64, &[f64; N]) -> [f64; N],
{
    let stage = |coeffs: &[(f64, &[f64; N])]| -> [f64; N] {
        let mut s = *y;
        for (i, value) in s.iter_mut().enumerate() {
            *value += h * coeffs.iter().map(|(a, k)| a * k[i]).sum::<f64>();
        }
        s
    };

    let k2 = rhs(t + C2 * h, &stage(&[(A21, k1)]));
    let k3 = rhs(t + C3 * h, &stage(&[(A31, k1), (A32, &k2)]));
    let k4 = rhs(t + C4 * h, &stage(&[(A41, k1), (A42, &k2), (A43, &k3)]));
    let k5 = rhs(t + C5 * h, &stage(&[(A51, k1), (A52, &k2), (A53, &k3), (A54, &k4)]));
    let k6 = rhs(t + h, &stage(&[(A61, k1), (A62, &k2), (A63, &k3), (A64, &k4), (A65, &k5)]));
    let y_new = stage(&[(B1, k1), (B3, &k3), (B4, &k4), (B5, &k5), (B6, &k6)]);
    let k7 = rhs(t + h, &y_new);

    let mut sum_sq = 0.0;
    for i in 0..N {
        let err_i =
            h * (E1 * k1[i] + E3 * k3[i] + E4 * k4[i] + E5 * k5[i] + E6 * k6[i] + E7 * k7[i]);
        let scale = opts.atol + opts.rtol * y[i].abs().max(y_new[i].abs());
        sum_sq += (err_i / scale).powi(2);
    }
    let err = if N == 0 { 0.0 } else { (sum_sq / N as f64).sqrt() };
    (y_new, k7, err)
}
