//! Parameter names, fixed/free configuration and natural parameter vectors.
//!
//! Purpose
//! -------
//! Describe which model parameters are estimated and which are held fixed,
//! and carry the resulting natural-space parameter vector through the
//! likelihood and the ensemble.
//!
//! Key behaviors
//! -------------
//! - [`ParamName`] enumerates the eight model parameters in canonical order,
//!   with their string keys and transform kind.
//! - [`ParamValue`] tags each configured parameter as `Fixed(natural)` or
//!   `Free(unconstrained start)`.
//! - [`ParameterSpec`] checks at construction that every parameter is
//!   covered exactly once, and fixes the θ layout: free parameters in
//!   canonical [`ParamName`] order, independent of the order they were given.
//! - [`ParameterVector`] is the natural-space value of all eight parameters.
//!
//! Invariants & assumptions
//! ------------------------
//! - `tau1` may be omitted; it then tracks the natural `tau0`.
//! - A fixed `tau0` of `f64::NEG_INFINITY` means "no delay" and yields a
//!   natural `tau0` of `0.0`.
//! - Fixed values are finite and inside their natural domain; free starts
//!   are finite.
//!
//! Conventions
//! -----------
//! - Names follow the model notation: `beta0` initial transmission rate,
//!   `beta1` fraction of `beta0` remaining after control, `k` decay rate of
//!   transmission after control starts at `tau1`, `f` case fatality ratio,
//!   `tau0` reporting delay, `sigma` incubation rate, `gamma` recovery rate.
//!
//! Testing notes
//! -------------
//! - Unit tests cover coverage checks, duplicate detection, the `tau1`
//!   default, and merge-order invariance of the θ layout.
use crate::epidemic::errors::{ParamError, ParamResult};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// How a free parameter maps from unconstrained `u` to natural space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransformKind {
    /// natural = exp(u), onto (0, ∞).
    Log,
    /// natural = 1 / (1 + exp(−u)), onto (0, 1).
    Logit,
    /// natural = u.
    Identity,
}

/// Model parameter names in canonical order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ParamName {
    Beta0,
    Beta1,
    K,
    Tau1,
    F,
    Tau0,
    Sigma,
    Gamma,
}

impl ParamName {
    /// All parameters in canonical order; this order defines the θ layout.
    pub const ALL: [ParamName; 8] = [
        ParamName::Beta0,
        ParamName::Beta1,
        ParamName::K,
        ParamName::Tau1,
        ParamName::F,
        ParamName::Tau0,
        ParamName::Sigma,
        ParamName::Gamma,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ParamName::Beta0 => "beta0",
            ParamName::Beta1 => "beta1",
            ParamName::K => "k",
            ParamName::Tau1 => "tau1",
            ParamName::F => "f",
            ParamName::Tau0 => "tau0",
            ParamName::Sigma => "sigma",
            ParamName::Gamma => "gamma",
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn transform(self) -> TransformKind {
        match self {
            ParamName::Beta0 | ParamName::K | ParamName::Tau0 => TransformKind::Log,
            ParamName::Sigma | ParamName::Gamma => TransformKind::Log,
            ParamName::Beta1 | ParamName::F => TransformKind::Logit,
            ParamName::Tau1 => TransformKind::Identity,
        }
    }

    /// Validate a fixed natural value against this parameter's domain.
    ///
    /// Errors
    /// ------
    /// - `ParamError::NonFiniteFixed` for NaN/±∞ (except the `tau0` sentinel).
    /// - `ParamError::OutOfDomainFixed` when outside the natural domain.
    pub fn check_fixed(self, value: f64) -> ParamResult<()> {
        let name = self.as_str();
        if self == ParamName::Tau0 && value == f64::NEG_INFINITY {
            return Ok(());
        }
        if !value.is_finite() {
            return Err(ParamError::NonFiniteFixed { name, value });
        }
        let reason = match self {
            ParamName::Beta0 | ParamName::Sigma | ParamName::Gamma if value <= 0.0 => {
                Some("must be > 0")
            }
            ParamName::K | ParamName::Tau0 if value < 0.0 => Some("must be >= 0"),
            ParamName::Beta1 | ParamName::F if !(0.0..=1.0).contains(&value) => {
                Some("must lie in [0, 1]")
            }
            _ => None,
        };
        match reason {
            Some(reason) => Err(ParamError::OutOfDomainFixed { name, value, reason }),
            None => Ok(()),
        }
    }
}

impl std::fmt::Display for ParamName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ParamName {
    type Err = ParamError;

    /// Parse a parameter key (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        ParamName::ALL
            .into_iter()
            .find(|name| name.as_str() == lower)
            .ok_or_else(|| ParamError::UnknownParameter { name: s.to_string() })
    }
}

/// Configured value of one parameter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ParamValue {
    /// Held at this natural-space value.
    Fixed(f64),
    /// Estimated; the value is the unconstrained starting point.
    Free(f64),
}

impl ParamValue {
    pub fn is_free(&self) -> bool {
        matches!(self, ParamValue::Free(_))
    }
}

/// Natural-space values of all model parameters.
///
/// `tau0` is the reporting delay in days (`0.0` when there is none).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParameterVector {
    pub beta0: f64,
    pub beta1: f64,
    pub k: f64,
    pub tau1: f64,
    pub f: f64,
    pub tau0: f64,
    pub sigma: f64,
    pub gamma: f64,
}

impl ParameterVector {
    pub fn get(&self, name: ParamName) -> f64 {
        match name {
            ParamName::Beta0 => self.beta0,
            ParamName::Beta1 => self.beta1,
            ParamName::K => self.k,
            ParamName::Tau1 => self.tau1,
            ParamName::F => self.f,
            ParamName::Tau0 => self.tau0,
            ParamName::Sigma => self.sigma,
            ParamName::Gamma => self.gamma,
        }
    }

    /// Build from a per-name lookup. Used by the reparameterizer only.
    pub(crate) fn from_fn<F: FnMut(ParamName) -> f64>(mut value: F) -> Self {
        Self {
            beta0: value(ParamName::Beta0),
            beta1: value(ParamName::Beta1),
            k: value(ParamName::K),
            tau1: value(ParamName::Tau1),
            f: value(ParamName::F),
            tau0: value(ParamName::Tau0),
            sigma: value(ParamName::Sigma),
            gamma: value(ParamName::Gamma),
        }
    }
}

/// `ParameterSpec` — validated fixed/free configuration and θ layout.
///
/// Construct with [`ParameterSpec::builder`] or [`ParameterSpec::from_maps`].
/// The mapping between θ and [`ParameterVector`] lives in
/// [`crate::epidemic::core::transform`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParameterSpec {
    slots: [Option<ParamValue>; 8],
    free: Vec<ParamName>,
}

impl ParameterSpec {
    pub fn builder() -> ParameterSpecBuilder {
        ParameterSpecBuilder::default()
    }

    /// Build a spec from string-keyed fixed and free maps.
    ///
    /// Parameters
    /// ----------
    /// - `fixed`: pairs `(name, natural value)`.
    /// - `free`: pairs `(name, unconstrained starting value)`.
    ///
    /// Errors
    /// ------
    /// - `ParamError::UnknownParameter` for an unrecognized key.
    /// - Any error from [`ParameterSpecBuilder::build`].
    ///
    /// Notes
    /// -----
    /// - Iteration order of either map does not affect the result.
    pub fn from_maps<I, J, K, L>(fixed: I, free: J) -> ParamResult<Self>
    where
        I: IntoIterator<Item = (K, f64)>,
        J: IntoIterator<Item = (L, f64)>,
        K: AsRef<str>,
        L: AsRef<str>,
    {
        let mut builder = ParameterSpec::builder();
        for (key, value) in fixed {
            builder = builder.fixed(key.as_ref().parse()?, value);
        }
        for (key, value) in free {
            builder = builder.free(key.as_ref().parse()?, value);
        }
        builder.build()
    }

    /// Configured value, or `None` for an omitted `tau1`.
    pub fn value(&self, name: ParamName) -> Option<ParamValue> {
        self.slots[name.index()]
    }

    /// Free parameters in θ order.
    pub fn free_names(&self) -> &[ParamName] {
        &self.free
    }

    pub fn n_free(&self) -> usize {
        self.free.len()
    }

    /// Position of `name` in θ, if free.
    pub fn theta_index(&self, name: ParamName) -> Option<usize> {
        self.free.iter().position(|&n| n == name)
    }
}

/// Collects fixed/free assignments and validates them in [`build`](Self::build).
#[derive(Debug, Clone, Default)]
pub struct ParameterSpecBuilder {
    entries: Vec<(ParamName, ParamValue)>,
}

impl ParameterSpecBuilder {
    pub fn fixed(mut self, name: ParamName, value: f64) -> Self {
        self.entries.push((name, ParamValue::Fixed(value)));
        self
    }

    pub fn free(mut self, name: ParamName, start: f64) -> Self {
        self.entries.push((name, ParamValue::Free(start)));
        self
    }

    /// Validate coverage and values.
    ///
    /// Errors
    /// ------
    /// - `ParamError::DuplicateParameter` if a name is assigned twice.
    /// - `ParamError::MissingParameter` if any parameter other than `tau1` is
    ///   unassigned.
    /// - `ParamError::NonFiniteFixed` / `ParamError::OutOfDomainFixed` for bad
    ///   fixed values.
    /// - `ParamError::NonFiniteFreeStart` for a non-finite free start.
    pub fn build(self) -> ParamResult<ParameterSpec> {
        let mut slots: [Option<ParamValue>; 8] = [None; 8];
        for (name, value) in self.entries {
            let slot = &mut slots[name.index()];
            if slot.is_some() {
                return Err(ParamError::DuplicateParameter { name: name.as_str() });
            }
            match value {
                ParamValue::Fixed(v) => name.check_fixed(v)?,
                ParamValue::Free(v) if !v.is_finite() => {
                    return Err(ParamError::NonFiniteFreeStart { name: name.as_str(), value: v });
                }
                ParamValue::Free(_) => {}
            }
            *slot = Some(value);
        }
        for name in ParamName::ALL {
            if name != ParamName::Tau1 && slots[name.index()].is_none() {
                return Err(ParamError::MissingParameter { name: name.as_str() });
            }
        }
        if slots[ParamName::Tau1.index()].is_none() {
            log::warn!("tau1 is neither fixed nor free; control onset defaults to tau0");
        }
        let free = ParamName::ALL
            .into_iter()
            .filter(|name| slots[name.index()].is_some_and(|v| v.is_free()))
            .collect();
        Ok(ParameterSpec { slots, free })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Name parsing and domain checks.
    // - Coverage / duplicate validation in `ParameterSpecBuilder::build`.
    // - Canonical θ layout regardless of insertion order.
    //
    // They intentionally DO NOT cover:
    // - θ ↔ natural mapping; see `transform.rs`.
    // -------------------------------------------------------------------------

    fn base_fixed() -> Vec<(&'static str, f64)> {
        vec![("beta1", 0.0), ("f", 0.5), ("tau0", f64::NEG_INFINITY), ("sigma", 0.1), ("gamma", 0.2)]
    }

    #[test]
    // Purpose
    // -------
    // Keys parse case-insensitively; unknown keys are rejected.
    fn param_name_from_str_accepts_known_keys_only() {
        assert_eq!("Beta0".parse::<ParamName>(), Ok(ParamName::Beta0));
        assert_eq!(" tau1 ".parse::<ParamName>(), Ok(ParamName::Tau1));
        assert!(matches!(
            "rho".parse::<ParamName>(),
            Err(ParamError::UnknownParameter { .. })
        ));
    }

    #[test]
    // Purpose
    // -------
    // Fixed values outside their natural domain are rejected.
    fn check_fixed_enforces_natural_domains() {
        assert!(ParamName::F.check_fixed(1.2).is_err());
        assert!(ParamName::Gamma.check_fixed(0.0).is_err());
        assert!(ParamName::Beta0.check_fixed(f64::NAN).is_err());
        assert!(ParamName::Tau0.check_fixed(f64::NEG_INFINITY).is_ok());
        assert!(ParamName::Beta1.check_fixed(0.0).is_ok());
        assert!(ParamName::Tau1.check_fixed(-3.0).is_ok());
    }

    #[test]
    // Purpose
    // -------
    // Free parameters are laid out in canonical order whatever the insertion
    // order.
    //
    // Given
    // -----
    // - The same assignments inserted forwards and reversed.
    //
    // Expect
    // ------
    // - Identical specs with θ layout [beta0, k, tau1].
    fn build_lays_out_free_parameters_canonically() {
        // Arrange
        let free = vec![("tau1", 30.0), ("k", -2.3), ("beta0", -1.3)];
        let mut reversed_fixed = base_fixed();
        reversed_fixed.reverse();
        let mut reversed_free = free.clone();
        reversed_free.reverse();

        // Act
        let a = ParameterSpec::from_maps(base_fixed(), free).expect("valid spec");
        let b = ParameterSpec::from_maps(reversed_fixed, reversed_free).expect("valid spec");

        // Assert
        assert_eq!(a, b);
        assert_eq!(a.free_names(), &[ParamName::Beta0, ParamName::K, ParamName::Tau1]);
        assert_eq!(a.theta_index(ParamName::Tau1), Some(2));
    }

    #[test]
    // Purpose
    // -------
    // Coverage rules: duplicates and missing parameters are errors; an
    // omitted tau1 is allowed.
    fn build_rejects_duplicates_and_missing_parameters() {
        let dup = ParameterSpec::from_maps(base_fixed(), vec![("beta0", 0.0), ("f", 0.1), ("k", 0.0)]);
        assert_eq!(dup, Err(ParamError::DuplicateParameter { name: "f" }));

        let missing = ParameterSpec::from_maps(base_fixed(), vec![("beta0", 0.0)]);
        assert_eq!(missing, Err(ParamError::MissingParameter { name: "k" }));

        let no_tau1 = ParameterSpec::from_maps(base_fixed(), vec![("beta0", 0.0), ("k", 0.0)])
            .expect("tau1 may be omitted");
        assert_eq!(no_tau1.value(ParamName::Tau1), None);
    }

    #[test]
    // Purpose
    // -------
    // A non-finite free start is rejected at construction.
    fn build_rejects_non_finite_free_start() {
        let err = ParameterSpec::from_maps(base_fixed(), vec![("beta0", f64::NAN), ("k", 0.0)]);
        assert!(matches!(err, Err(ParamError::NonFiniteFreeStart { name: "beta0", .. })));
    }
}
