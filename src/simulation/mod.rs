//! simulation — parametric-bootstrap projections from a fitted model.
//!
//! Purpose
//! -------
//! Turn a converged [`FitResult`](crate::epidemic::models::FitResult) into
//! confidence and prediction bands for incidence, cumulative cases and
//! `R(t)` over a projection grid.
//!
//! Key behaviors
//! -------------
//! - [`MvnSampler`] draws θ from `N(θ̂, Σ)` through an eigen factor that
//!   tolerates singular covariances.
//! - [`simulate`] integrates one trajectory per draw, sequentially or on the
//!   rayon pool, and returns a [`TrajectoryEnsemble`].
//! - [`TrajectoryEnsemble::summarize`] reduces the ensemble to type-7
//!   quantile bands.
//!
//! Invariants & assumptions
//! ------------------------
//! - Randomness is owned by the caller-supplied [`SimulationContext`]; draw
//!   `d` is seeded from `(base_seed, d)` only, so results are independent of
//!   thread scheduling.
//!
//! Testing notes
//! -------------
//! - Reproducibility, seed sensitivity, the zero-covariance degenerate case
//!   and quantile stability are covered in
//!   `tests/integration_seir_pipeline.rs`.

pub mod context;
pub mod ensemble;
pub mod grid;
pub mod quantiles;
pub mod sampler;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::context::SimulationContext;
pub use self::ensemble::{TrajectoryEnsemble, simulate};
pub use self::grid::ProjectionGrid;
pub use self::quantiles::{Band, EnsembleSummary, QuantileLevels, quantile_sorted};
pub use self::sampler::{MvnSampler, PSD_TOL, SYM_TOL};

// ---- Optional convenience prelude for downstream crates -------------------

pub mod prelude {
    pub use super::context::SimulationContext;
    pub use super::ensemble::{TrajectoryEnsemble, simulate};
    pub use super::grid::ProjectionGrid;
    pub use super::quantiles::{EnsembleSummary, QuantileLevels};
}
