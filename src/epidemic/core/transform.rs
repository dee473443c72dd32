//! θ ↔ natural parameter mapping.
//!
//! Free parameters are optimized in an unconstrained space. Each one is
//! mapped according to its [`TransformKind`]: `exp` for rates and the delay,
//! logistic for fractions, identity for the control onset `tau1`. Fixed
//! values are used as given. Evaluated on every likelihood call and every
//! ensemble draw.
//!
//! Special cases:
//! - `tau0 = −∞` (fixed sentinel or unconstrained value) maps to a natural
//!   delay of exactly `0.0`.
//! - An omitted `tau1` takes the natural `tau0`.
use crate::{
    epidemic::{
        core::params::{ParamName, ParamValue, ParameterSpec, ParameterVector, TransformKind},
        errors::{ParamError, ParamResult},
    },
    optimization::{
        loglik_optimizer::Theta,
        numerical_stability::{safe_exp, safe_log, safe_logistic, safe_logit},
    },
};

impl TransformKind {
    /// Unconstrained → natural.
    pub fn to_natural(self, u: f64) -> f64 {
        match self {
            TransformKind::Log => safe_exp(u),
            TransformKind::Logit => safe_logistic(u),
            TransformKind::Identity => u,
        }
    }

    /// Natural → unconstrained. Boundary values map to `±∞`.
    pub fn to_unconstrained(self, x: f64) -> f64 {
        match self {
            TransformKind::Log => safe_log(x),
            TransformKind::Logit => safe_logit(x),
            TransformKind::Identity => x,
        }
    }
}

/// Map one free coordinate of `name` to natural space.
pub fn free_to_natural(name: ParamName, u: f64) -> f64 {
    if name == ParamName::Tau0 && u == f64::NEG_INFINITY {
        return 0.0;
    }
    name.transform().to_natural(u)
}

fn fixed_to_natural(name: ParamName, value: f64) -> f64 {
    if name == ParamName::Tau0 && value == f64::NEG_INFINITY { 0.0 } else { value }
}

impl ParameterSpec {
    /// Starting θ: the free starting values in layout order.
    pub fn initial_theta(&self) -> Theta {
        self.free_names()
            .iter()
            .map(|&name| match self.value(name) {
                Some(ParamValue::Free(start)) => start,
                _ => 0.0,
            })
            .collect()
    }

    /// Map an unconstrained θ to the full natural parameter vector.
    ///
    /// Errors
    /// ------
    /// - `ParamError::ThetaLengthMismatch` if `theta.len() != n_free()`.
    /// - `ParamError::InvalidThetaInput` for NaN/±∞ entries, except `−∞` in
    ///   the `tau0` slot.
    pub fn to_natural(&self, theta: &Theta) -> ParamResult<ParameterVector> {
        if theta.len() != self.n_free() {
            return Err(ParamError::ThetaLengthMismatch {
                expected: self.n_free(),
                actual: theta.len(),
            });
        }
        for (index, (&value, &name)) in theta.iter().zip(self.free_names()).enumerate() {
            let sentinel = name == ParamName::Tau0 && value == f64::NEG_INFINITY;
            if !value.is_finite() && !sentinel {
                return Err(ParamError::InvalidThetaInput { index, value });
            }
        }

        let natural = |name: ParamName| -> Option<f64> {
            match self.value(name)? {
                ParamValue::Fixed(value) => Some(fixed_to_natural(name, value)),
                ParamValue::Free(_) => {
                    let index = self.theta_index(name)?;
                    Some(free_to_natural(name, theta[index]))
                }
            }
        };
        let tau0 = natural(ParamName::Tau0).unwrap_or(0.0);
        Ok(ParameterVector::from_fn(|name| match name {
            ParamName::Tau1 => natural(name).unwrap_or(tau0),
            ParamName::Tau0 => tau0,
            _ => natural(name).unwrap_or(f64::NAN),
        }))
    }

    /// Map natural values of the free parameters back to θ.
    ///
    /// Natural values on the boundary of a transform's domain (e.g. a zero
    /// delay) map to `±∞`.
    pub fn to_unconstrained(&self, params: &ParameterVector) -> Theta {
        self.free_names()
            .iter()
            .map(|&name| name.transform().to_unconstrained(params.get(name)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Round trips θ → natural → θ.
    // - Range guarantees of the natural parameters.
    // - The tau0 sentinel and the tau1 default.
    // -------------------------------------------------------------------------

    fn spec_all_free() -> ParameterSpec {
        ParameterSpec::builder()
            .free(ParamName::Beta0, -1.0)
            .free(ParamName::Beta1, 0.3)
            .free(ParamName::K, -2.0)
            .free(ParamName::Tau1, 12.0)
            .free(ParamName::F, -0.5)
            .free(ParamName::Tau0, 1.5)
            .free(ParamName::Sigma, -2.2)
            .free(ParamName::Gamma, -2.0)
            .build()
            .expect("valid spec")
    }

    #[test]
    // Purpose
    // -------
    // to_unconstrained(to_natural(θ)) ≈ θ on a generic θ.
    //
    // Given
    // -----
    // - All eight parameters free.
    //
    // Expect
    // ------
    // - Coordinate-wise agreement within 1e-9.
    fn round_trip_recovers_theta() {
        // Arrange
        let spec = spec_all_free();
        let theta = array![-0.7, 1.2, -3.0, 25.0, -1.5, 0.4, -2.1, -1.9];

        // Act
        let params = spec.to_natural(&theta).expect("finite θ");
        let back = spec.to_unconstrained(&params);

        // Assert
        for (a, b) in theta.iter().zip(back.iter()) {
            assert!((a - b).abs() < 1e-9, "{a} vs {b}");
        }
    }

    #[test]
    // Purpose
    // -------
    // Natural values stay in range even for extreme θ.
    //
    // Expect
    // ------
    // - Rates strictly positive, fractions strictly inside (0, 1).
    fn to_natural_respects_ranges_for_extreme_theta() {
        let spec = spec_all_free();
        for scale in [-800.0, 800.0] {
            let theta = Theta::from_elem(8, scale);
            let p = spec.to_natural(&theta).expect("finite θ");
            assert!(p.beta0 > 0.0 && p.k > 0.0 && p.sigma > 0.0 && p.gamma > 0.0);
            assert!(p.beta1 > 0.0 && p.beta1 < 1.0);
            assert!(p.f > 0.0 && p.f < 1.0);
            assert!(p.beta0.is_finite() && p.tau0.is_finite());
        }
    }

    #[test]
    // Purpose
    // -------
    // The no-delay sentinel gives tau0 = 0, and an omitted tau1 follows tau0.
    fn sentinel_delay_and_default_tau1() {
        // Arrange
        let fixed_sentinel = ParameterSpec::builder()
            .free(ParamName::Beta0, 0.0)
            .fixed(ParamName::Beta1, 0.0)
            .fixed(ParamName::K, 0.1)
            .fixed(ParamName::F, 0.5)
            .fixed(ParamName::Tau0, f64::NEG_INFINITY)
            .fixed(ParamName::Sigma, 0.1)
            .fixed(ParamName::Gamma, 0.1)
            .build()
            .expect("valid spec");
        let free_delay = ParameterSpec::builder()
            .fixed(ParamName::Beta0, 0.5)
            .fixed(ParamName::Beta1, 0.0)
            .fixed(ParamName::K, 0.1)
            .fixed(ParamName::F, 0.5)
            .free(ParamName::Tau0, 2.0_f64.ln())
            .fixed(ParamName::Sigma, 0.1)
            .fixed(ParamName::Gamma, 0.1)
            .build()
            .expect("valid spec");

        // Act
        let a = fixed_sentinel.to_natural(&array![0.0]).expect("valid θ");
        let b = free_delay.to_natural(&array![2.0_f64.ln()]).expect("valid θ");
        let c = free_delay.to_natural(&array![f64::NEG_INFINITY]).expect("sentinel θ");

        // Assert
        assert_eq!(a.tau0, 0.0);
        assert_eq!(a.tau1, 0.0);
        assert!((b.tau0 - 2.0).abs() < 1e-12);
        assert!((b.tau1 - 2.0).abs() < 1e-12);
        assert_eq!(c.tau0, 0.0);
    }

    #[test]
    // Purpose
    // -------
    // θ length and finiteness are checked.
    fn to_natural_rejects_bad_theta() {
        let spec = spec_all_free();
        assert_eq!(
            spec.to_natural(&array![0.0]),
            Err(ParamError::ThetaLengthMismatch { expected: 8, actual: 1 })
        );
        let mut theta = Theta::zeros(8);
        theta[0] = f64::NAN;
        assert!(matches!(
            spec.to_natural(&theta),
            Err(ParamError::InvalidThetaInput { index: 0, .. })
        ));
    }
}
