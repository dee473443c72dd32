//! Adapter that exposes a user `LogLikelihood` as an `argmin` problem.
//!
//! We convert a *maximization* of a log-likelihood `ℓ(θ)` into a *minimization*
//! problem by defining the cost as `c(θ) = -ℓ(θ)`.
//!
//! The Nelder–Mead simplex orders vertices by cost and cannot cope with `NaN`
//! or with an aborted evaluation. Points where the model fails numerically
//! (integration failure, negative expected incidence, non-finite value) are
//! therefore assigned the finite cost [`NLL_PENALTY`], which the simplex
//! always ranks worst. Configuration errors still abort the run.
use crate::optimization::loglik_optimizer::{
    traits::LogLikelihood,
    types::{Cost, Theta},
};
use argmin::core::{CostFunction, Error};

/// Cost assigned to points whose log-likelihood cannot be evaluated.
pub const NLL_PENALTY: f64 = 1e10;

/// Bridges a user `LogLikelihood` to `argmin`'s `CostFunction`.
///
/// - `CostFunction::cost` returns `-ℓ(θ)` (negative log-likelihood), or
///   [`NLL_PENALTY`] if the evaluation failed numerically.
#[derive(Debug, Clone)]
pub struct ArgMinAdapter<'a, F: LogLikelihood> {
    pub f: &'a F,
    pub data: &'a F::Data,
}

impl<'a, F: LogLikelihood> CostFunction for ArgMinAdapter<'a, F> {
    type Param = Theta;
    type Output = Cost;

    /// Evaluate the cost `c(θ) = -ℓ(θ)`.
    ///
    /// # Errors
    /// Propagates any non-numerical `OptError` from the user's `value`.
    fn cost(&self, theta: &Self::Param) -> Result<Self::Output, Error> {
        match self.f.value(theta, self.data) {
            Ok(output) if output.is_finite() => Ok((-output).min(NLL_PENALTY)),
            Ok(output) => {
                log::trace!("non-finite log-likelihood {output} at θ = {theta}; penalized");
                Ok(NLL_PENALTY)
            }
            Err(err) if err.is_numerical() => {
                log::trace!("log-likelihood failed at θ = {theta}: {err}; penalized");
                Ok(NLL_PENALTY)
            }
            Err(err) => Err(err.into()),
        }
    }
}

impl<'a, F: LogLikelihood> ArgMinAdapter<'a, F> {
    /// Construct a new adapter over a user `LogLikelihood` and its data.
    pub fn new(f: &'a F, data: &'a F::Data) -> Self {
        Self { f, data }
    }
}
