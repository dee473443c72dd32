//! Fit results for the SEIRD model.
//!
//! A [`FitResult`] is the hand-off between estimation and uncertainty
//! propagation. It carries the optimum in unconstrained θ-space, the merged
//! natural parameter vector and, when the optimizer converged, the
//! covariance of θ̂ from the observed information.
use crate::{
    epidemic::{
        core::{
            params::{ParamName, ParameterSpec, ParameterVector},
            transform::free_to_natural,
        },
        errors::{EpiError, EpiResult},
    },
    inference::{errors::InferenceError, hessian::standard_errors},
    optimization::loglik_optimizer::FnEvalMap,
};
use ndarray::{Array1, Array2};
use serde::Serialize;
use statrs::distribution::{ContinuousCDF, Normal};

/// FitResult — outcome of [`SeirModel::fit`](crate::epidemic::models::SeirModel::fit).
///
/// Fields
/// ------
/// - `theta_hat`: free parameters at the optimum, unconstrained, in
///   canonical [`ParamName`] order.
/// - `params`: full natural parameter vector (fixed values merged in).
/// - `covariance`: `Some(cov)` of θ̂ in unconstrained space when the fit
///   converged, `None` otherwise.
/// - `converged`, `status`: optimizer termination summary.
/// - `neg_log_likelihood`: `−ℓ(θ̂)`.
/// - `iterations`, `fn_evals`: optimizer counters.
/// - `spec`: the parameter configuration used for the fit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FitResult {
    pub theta_hat: Array1<f64>,
    pub params: ParameterVector,
    pub covariance: Option<Array2<f64>>,
    pub converged: bool,
    pub status: String,
    pub neg_log_likelihood: f64,
    pub iterations: usize,
    pub fn_evals: FnEvalMap,
    pub spec: ParameterSpec,
}

/// Wald interval of one free parameter, reported in natural space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ParameterInterval {
    pub name: ParamName,
    pub estimate: f64,
    pub lower: f64,
    pub upper: f64,
}

impl FitResult {
    /// Standard errors of θ̂ (unconstrained space); `None` without covariance.
    pub fn standard_errors(&self) -> Option<Array1<f64>> {
        self.covariance.as_ref().map(standard_errors)
    }

    /// Two-sided Wald intervals for the free parameters.
    ///
    /// The interval `θ̂_i ± z·se_i` is built in unconstrained space and mapped
    /// through the parameter's transform. All transforms are increasing, so
    /// the endpoints keep their order.
    ///
    /// Errors
    /// ------
    /// - `EpiError::MissingCovariance` if the fit carries no covariance.
    /// - `EpiError::Inference(InvalidLevel)` unless `0 < level < 1`.
    pub fn parameter_intervals(&self, level: f64) -> EpiResult<Vec<ParameterInterval>> {
        let se = self.standard_errors().ok_or(EpiError::MissingCovariance)?;
        if !(level > 0.0 && level < 1.0) {
            return Err(InferenceError::InvalidLevel { level }.into());
        }
        let normal = Normal::new(0.0, 1.0).map_err(|_| InferenceError::UnknownError)?;
        let z = normal.inverse_cdf(0.5 + 0.5 * level);

        Ok(self
            .spec
            .free_names()
            .iter()
            .zip(self.theta_hat.iter().zip(se.iter()))
            .map(|(&name, (&theta, &se))| ParameterInterval {
                name,
                estimate: self.params.get(name),
                lower: free_to_natural(name, theta - z * se),
                upper: free_to_natural(name, theta + z * se),
            })
            .collect())
    }

    /// `R0 = β0 / γ` at the point estimate.
    pub fn basic_reproduction_number(&self) -> f64 {
        self.params.beta0 / self.params.gamma
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use std::collections::HashMap;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Wald intervals mapped into natural space.
    // - Refusal without covariance and for invalid levels.
    // -------------------------------------------------------------------------

    fn fit_with(covariance: Option<Array2<f64>>) -> FitResult {
        let spec = ParameterSpec::builder()
            .free(ParamName::Beta0, 0.0)
            .fixed(ParamName::Beta1, 0.0)
            .fixed(ParamName::K, 0.1)
            .free(ParamName::Tau1, 20.0)
            .fixed(ParamName::F, 0.5)
            .fixed(ParamName::Tau0, f64::NEG_INFINITY)
            .fixed(ParamName::Sigma, 0.1)
            .fixed(ParamName::Gamma, 0.25)
            .build()
            .expect("valid spec");
        let theta_hat = array![(0.5f64).ln(), 20.0];
        let params = spec.to_natural(&theta_hat).expect("valid θ");
        FitResult {
            theta_hat,
            params,
            covariance,
            converged: true,
            status: "SolverConverged".to_string(),
            neg_log_likelihood: 10.0,
            iterations: 42,
            fn_evals: HashMap::new(),
            spec,
        }
    }

    #[test]
    // Purpose
    // -------
    // Intervals are symmetric in θ-space and transformed per parameter.
    //
    // Given
    // -----
    // - beta0 (log) and tau1 (identity) free, cov = diag(0.01, 4).
    //
    // Expect
    // ------
    // - beta0 interval = 0.5·exp(±1.96·0.1); tau1 interval = 20 ± 1.96·2.
    fn parameter_intervals_map_wald_bounds_to_natural_space() {
        // Arrange
        let fit = fit_with(Some(array![[0.01, 0.0], [0.0, 4.0]]));

        // Act
        let intervals = fit.parameter_intervals(0.95).expect("covariance present");

        // Assert
        let z: f64 = 1.959_963_984_540_054;
        assert_eq!(intervals[0].name, ParamName::Beta0);
        assert!((intervals[0].estimate - 0.5).abs() < 1e-12);
        assert!((intervals[0].lower - 0.5 * (-0.1 * z).exp()).abs() < 1e-9);
        assert!((intervals[0].upper - 0.5 * (0.1 * z).exp()).abs() < 1e-9);
        assert!((intervals[1].lower - (20.0 - 2.0 * z)).abs() < 1e-9);
        assert!((intervals[1].upper - (20.0 + 2.0 * z)).abs() < 1e-9);
        assert!((fit.basic_reproduction_number() - 2.0).abs() < 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // Missing covariance and invalid levels are reported.
    fn parameter_intervals_reject_missing_covariance_and_bad_level() {
        assert!(matches!(
            fit_with(None).parameter_intervals(0.95),
            Err(EpiError::MissingCovariance)
        ));
        assert!(matches!(
            fit_with(Some(Array2::eye(2))).parameter_intervals(1.0),
            Err(EpiError::Inference(InferenceError::InvalidLevel { .. }))
        ));
    }
}
