//! rust_outbreak — SEIRD outbreak fitting and uncertainty-aware projections.
//!
//! Purpose
//! -------
//! Estimate the transmission dynamics of an outbreak from reported case
//! counts and propagate parameter uncertainty into projections of
//! incidence, cumulative cases and the time-varying reproduction number.
//!
//! Key behaviors
//! -------------
//! - `epidemic`: validated case series, fixed/free parameter configuration,
//!   SEIRD dynamics integrated with an adaptive Dormand–Prince scheme, the
//!   Poisson likelihood and the maximum-likelihood fit.
//! - `optimization`: the generic Nelder–Mead log-likelihood maximizer on top
//!   of `argmin`, central-difference Hessians and stable transforms.
//! - `inference`: covariance and standard errors from the observed
//!   information.
//! - `simulation`: seeded parametric-bootstrap ensembles (sequential or
//!   rayon-parallel) and quantile bands.
//!
//! Invariants & assumptions
//! ------------------------
//! - The optimizer works in unconstrained θ-space; natural parameters are
//!   recovered on every evaluation.
//! - Library code reports failures through typed errors ([`EpiError`],
//!   [`OptError`], [`InferenceError`]) and never installs a logger.
//!
//! Downstream usage
//! ----------------
//! ```no_run
//! use ndarray::array;
//! use rust_outbreak::epidemic::prelude::*;
//! use rust_outbreak::simulation::prelude::*;
//!
//! let data = ObservedSeries::new(array![0.0, 1.0, 2.0, 3.0], array![0, 1, 2, 4])?;
//! let spec = ParameterSpec::builder()
//!     .free(ParamName::Beta0, (0.3f64).ln())
//!     .fixed(ParamName::Beta1, 0.0)
//!     .free(ParamName::K, (0.1f64).ln())
//!     .free(ParamName::Tau1, 30.0)
//!     .fixed(ParamName::F, 0.5)
//!     .fixed(ParamName::Tau0, f64::NEG_INFINITY)
//!     .fixed(ParamName::Sigma, 1.0 / 9.3)
//!     .fixed(ParamName::Gamma, 1.0 / 7.4)
//!     .build()?;
//! let model = SeirModel::new(spec, SeirOptions::default());
//! let fit = model.fit(&data)?;
//! let grid = ProjectionGrid::uniform(0.0, 30.0, 1.0)?;
//! let ensemble = simulate(&model, &fit, &data, &grid, &SimulationContext::default())?;
//! let summary = ensemble.summarize(&QuantileLevels::default());
//! println!("{:?}", summary.incidence_pi.upper);
//! # Ok::<(), rust_outbreak::epidemic::errors::EpiError>(())
//! ```
//!
//! Testing notes
//! -------------
//! - Unit tests live next to each module; the end-to-end pipeline is covered
//!   in `tests/integration_seir_pipeline.rs`.
//!
//! [`EpiError`]: crate::epidemic::errors::EpiError
//! [`OptError`]: crate::optimization::errors::OptError
//! [`InferenceError`]: crate::inference::errors::InferenceError

pub mod epidemic;
pub mod inference;
pub mod optimization;
pub mod simulation;
