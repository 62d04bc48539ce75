//! Deterministic per-taxi RNG.
//!
//! # Determinism strategy
//!
//! Each taxi gets its own independent `SmallRng` seeded by:
//!
//!   seed = global_seed XOR (taxi_id * MIXING_CONSTANT)
//!
//! The mixing constant is the 64-bit fractional part of the golden ratio,
//! which spreads consecutive taxi IDs uniformly across the seed space. This
//! means two runs with the same global seed and the same fleet produce
//! bit-identical repositioning rolls, exploration choices, and tie-breaks —
//! the basis for the simulator's seed-determinism guarantee.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::TaxiId;

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Per-taxi deterministic RNG, used for repositioning rolls and
/// epsilon-greedy action exploration.
///
/// The type is `!Sync`, matching the simulator's single-threaded tick loop —
/// there is never a second thread that could race on a taxi's RNG state.
#[derive(Clone, Debug)]
pub struct TaxiRng(SmallRng);

impl TaxiRng {
    /// Seed deterministically from the run's global seed and a taxi ID.
    pub fn new(global_seed: u64, taxi: TaxiId) -> Self {
        let seed = global_seed ^ (taxi.0 as u64).wrapping_mul(MIXING_CONSTANT);
        TaxiRng(SmallRng::seed_from_u64(seed))
    }

    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }

    #[inline]
    pub fn random<T>(&mut self) -> T
    where
        rand::distributions::Standard: rand::distributions::Distribution<T>,
    {
        self.0.r#gen()
    }

    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// `true` with probability `p` (clamped to [0, 1]).
    #[inline]
    pub fn gen_bool(&mut self, p: f64) -> bool {
        self.0.gen_bool(p.clamp(0.0, 1.0))
    }

    /// Pick uniformly among the indices of `values` that attain its maximum —
    /// used to break ties when choosing the best of several Q-values.
    pub fn argmax_tie_break(&mut self, values: &[f64]) -> usize {
        let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let ties: Vec<usize> = values
            .iter()
            .enumerate()
            .filter(|&(_, &v)| v == max)
            .map(|(i, _)| i)
            .collect();
        let pick = self.gen_range(0..ties.len());
        ties[pick]
    }
}
