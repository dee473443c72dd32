//! SEIRD compartment dynamics with a time-varying transmission rate.
//!
//! Purpose
//! -------
//! Define the model state and the right-hand side of the outbreak ODE:
//!
//! ```text
//! dS = −β(t)·S·I/N
//! dE =  β(t)·S·I/N − σ·E
//! dI =  σ·E − γ·I
//! dR =  (1 − f)·γ·I
//! dD =  f·γ·I
//! dC =  σ·E
//! ```
//!
//! where `C` counts cumulative onsets (entries into `I`) and `N` is the
//! constant initial population.
//!
//! Key behaviors
//! -------------
//! - [`transmission_rate`] implements the control-intervention curve:
//!   constant `β0` before `τ1`, then exponential decay towards `β0·β1` at
//!   rate `k`.
//! - [`derivatives`] evaluates the right-hand side for the integrator.
//!
//! Invariants & assumptions
//! ------------------------
//! - `S + E + I + R + D` is conserved by the dynamics.
//! - β(t) is continuous at `τ1` and tends to `β0·β1` as `t → ∞`.
//!
//! Testing notes
//! -------------
//! - Unit tests cover continuity and asymptote of β(t), conservation of the
//!   alive total along the RHS, and non-negativity along an integrated path.
use crate::epidemic::core::params::ParameterVector;
use ndarray::Array1;
use serde::{Deserialize, Serialize};

/// Number of state components `(S, E, I, R, D, C)`.
pub const STATE_DIM: usize = 6;

/// `ModelState` — compartment sizes plus cumulative onsets.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelState {
    pub s: f64,
    pub e: f64,
    pub i: f64,
    pub r: f64,
    pub d: f64,
    pub c: f64,
}

impl ModelState {
    /// Outbreak seed: `S = N − I0`, `I = I0`, everything else zero.
    pub fn initial(population: f64, initial_infectious: f64) -> Self {
        Self {
            s: population - initial_infectious,
            e: 0.0,
            i: initial_infectious,
            r: 0.0,
            d: 0.0,
            c: 0.0,
        }
    }

    /// `S + E + I + R + D`.
    pub fn alive_total(&self) -> f64 {
        self.s + self.e + self.i + self.r + self.d
    }

    /// Every compartment is at least `-tol`, the absolute round-off allowance.
    pub fn is_non_negative(&self, tol: f64) -> bool {
        <[f64; STATE_DIM]>::from(*self).iter().all(|&x| x >= -tol)
    }
}

impl From<ModelState> for [f64; STATE_DIM] {
    fn from(s: ModelState) -> Self {
        [s.s, s.e, s.i, s.r, s.d, s.c]
    }
}

impl From<[f64; STATE_DIM]> for ModelState {
    fn from(y: [f64; STATE_DIM]) -> Self {
        Self { s: y[0], e: y[1], i: y[2], r: y[3], d: y[4], c: y[5] }
    }
}

/// β(t): `β0` for `t < τ1`, else `β0·β1 + (β0 − β0·β1)·exp(−k(t − τ1))`.
pub fn transmission_rate(t: f64, params: &ParameterVector) -> f64 {
    if t < params.tau1 {
        params.beta0
    } else {
        let floor = params.beta0 * params.beta1;
        floor + (params.beta0 - floor) * (-params.k * (t - params.tau1)).exp()
    }
}

/// [`transmission_rate`] evaluated at each entry of `times`.
pub fn transmission_rates(times: &Array1<f64>, params: &ParameterVector) -> Array1<f64> {
    times.mapv(|t| transmission_rate(t, params))
}

/// Right-hand side of the SEIRD system at time `t`.
pub fn derivatives(
    t: f64, y: &[f64; STATE_DIM], params: &ParameterVector, population: f64,
) -> [f64; STATE_DIM] {
    let [s, e, i, _, _, _] = *y;
    let infection = transmission_rate(t, params) * s * i / population;
    let onset = params.sigma * e;
    let removal = params.gamma * i;
    [
        -infection,
        infection - onset,
        onset - removal,
        (1.0 - params.f) * removal,
        params.f * removal,
        onset,
    ]
}
