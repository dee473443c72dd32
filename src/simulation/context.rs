//! Simulation context — draw count, base seed and execution mode.
//!
//! Every ensemble draw owns an RNG seeded from `(base_seed, draw)`, so the
//! ensemble is reproducible and identical whether draws run sequentially or
//! on the rayon pool.
use crate::epidemic::errors::{EpiError, EpiResult};
use rand::{SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};

/// SimulationContext — caller-owned configuration of an ensemble run.
///
/// Default
/// -------
/// - `base_seed = 0x5EED_0F_0B5E57`, `n_draws = 10_000`, `parallel = true`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationContext {
    pub base_seed: u64,
    pub n_draws: usize,
    pub parallel: bool,
}

impl SimulationContext {
    /// Errors
    /// ------
    /// - `EpiError::InvalidDrawCount` if `n_draws == 0`.
    pub fn new(base_seed: u64, n_draws: usize, parallel: bool) -> EpiResult<Self> {
        if n_draws == 0 {
            return Err(EpiError::InvalidDrawCount { n_draws });
        }
        Ok(Self { base_seed, n_draws, parallel })
    }

    /// Independent generator for draw `draw`.
    pub fn rng_for_draw(&self, draw: usize) -> StdRng {
        StdRng::seed_from_u64(draw_seed(self.base_seed, draw as u64))
    }
}

impl Default for SimulationContext {
    fn default() -> Self {
        Self { base_seed: 0x5EED_0F0B_5E57, n_draws: 10_000, parallel: true }
    }
}

fn draw_seed(base_seed: u64, draw: u64) -> u64 {
    splitmix64(base_seed ^ splitmix64(draw))
}

fn splitmix64(x: u64) -> u64 {
    let mut z = x.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}
