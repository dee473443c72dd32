//! Time-varying reproduction number `R(t) = β(t) / γ`.
//!
//! Under the SEIRD dynamics an infectious individual transmits at rate
//! `β(t)` for a mean duration `1/γ`, so `R(t) = β(t)/γ` and `R0 = β0/γ`.
//! Times are on the model clock (observation time plus reporting delay).
use crate::epidemic::core::{
    dynamics::{transmission_rate, transmission_rates},
    params::ParameterVector,
};
use ndarray::Array1;

pub fn reproduction_number(t: f64, params: &ParameterVector) -> f64 {
    transmission_rate(t, params) / params.gamma
}

pub fn reproduction_numbers(times: &Array1<f64>, params: &ParameterVector) -> Array1<f64> {
    transmission_rates(times, params) / params.gamma
}
