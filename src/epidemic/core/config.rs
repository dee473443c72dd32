//! Serializable fixed/free parameter configuration.
//!
//! Accepts documents of the form
//!
//! ```json
//! {"fixed": {"sigma": 0.107, "tau0": "-inf"}, "free": {"beta0": -1.3}}
//! ```
//!
//! Fixed values are natural-space numbers; the strings `"-inf"` and `"none"`
//! denote the `tau0` no-delay sentinel. Free values are unconstrained
//! starting points. [`ParameterConfig::into_spec`] applies the same
//! validation as [`ParameterSpec::builder`].
use crate::epidemic::{
    core::params::ParameterSpec,
    errors::{ParamError, ParamResult},
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A fixed value: a number, or a textual sentinel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigValue {
    Number(f64),
    Text(String),
}

impl ConfigValue {
    fn resolve(&self, name: &str) -> ParamResult<f64> {
        match self {
            ConfigValue::Number(value) => Ok(*value),
            ConfigValue::Text(text) => match text.trim().to_lowercase().as_str() {
                "-inf" | "none" => Ok(f64::NEG_INFINITY),
                _ => Err(ParamError::InvalidConfigValue {
                    name: name.to_string(),
                    text: text.clone(),
                }),
            },
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParameterConfig {
    #[serde(default)]
    pub fixed: BTreeMap<String, ConfigValue>,
    #[serde(default)]
    pub free: BTreeMap<String, f64>,
}

impl ParameterConfig {
    /// Parse a JSON document.
    ///
    /// Errors
    /// ------
    /// - `ParamError::MalformedConfig` if the document is not valid JSON of
    ///   the expected shape.
    pub fn from_json(text: &str) -> ParamResult<Self> {
        serde_json::from_str(text)
            .map_err(|err| ParamError::MalformedConfig { reason: err.to_string() })
    }

    /// Validate and convert into a [`ParameterSpec`].
    ///
    /// Errors
    /// ------
    /// - `ParamError::InvalidConfigValue` for an unrecognized sentinel string.
    /// - Any error from [`ParameterSpec::from_maps`].
    pub fn into_spec(self) -> ParamResult<ParameterSpec> {
        let fixed = self
            .fixed
            .iter()
            .map(|(name, value)| value.resolve(name).map(|v| (name.as_str(), v)))
            .collect::<ParamResult<Vec<_>>>()?;
        ParameterSpec::from_maps(fixed, self.free.iter().map(|(name, &v)| (name.as_str(), v)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::epidemic::core::params::{ParamName, ParamValue};

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - JSON parsing including the delay sentinel.
    // - Error reporting for malformed documents and unknown names.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // A complete document converts to the expected spec.
    //
    // Given
    // -----
    // - tau0 given as "-inf", beta0/k/tau1 free.
    //
    // Expect
    // ------
    // - tau0 fixed at −∞, θ layout [beta0, k, tau1].
    fn from_json_builds_spec_with_delay_sentinel() {
        // Arrange
        let text = r#"{
            "fixed": {"beta1": 0, "f": 0.5, "tau0": "-inf", "sigma": 0.1075, "gamma": 0.1351},
            "free": {"tau1": 30, "beta0": -1.3, "k": -2.3}
        }"#;

        // Act
        let spec = ParameterConfig::from_json(text)
            .and_then(ParameterConfig::into_spec)
            .expect("valid config");

        // Assert
        assert_eq!(spec.value(ParamName::Tau0), Some(ParamValue::Fixed(f64::NEG_INFINITY)));
        assert_eq!(spec.free_names(), &[ParamName::Beta0, ParamName::K, ParamName::Tau1]);
    }

    #[test]
    // Purpose
    // -------
    // Malformed JSON, unknown sentinels and unknown names are reported.
    fn from_json_reports_configuration_errors() {
        assert!(matches!(
            ParameterConfig::from_json("{not json"),
            Err(ParamError::MalformedConfig { .. })
        ));

        let bad_text = ParameterConfig::from_json(r#"{"fixed": {"tau0": "never"}}"#)
            .expect("parses")
            .into_spec();
        assert!(matches!(bad_text, Err(ParamError::InvalidConfigValue { .. })));

        let unknown = ParameterConfig::from_json(r#"{"free": {"rho": 1.0}}"#)
            .expect("parses")
            .into_spec();
        assert!(matches!(unknown, Err(ParamError::UnknownParameter { .. })));
    }
}
