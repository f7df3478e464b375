// src/rng.rs
//! Seeded random numbers for synthetic market data
//!
//! Same seed → same path, so demos and tests are reproducible. Normal draws
//! come from `rand_distr::StandardNormal` (ziggurat) on a `StdRng`.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, StandardNormal};

pub fn seed_rng_from_u64(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Derive a per-instrument seed so different tickers get different paths
pub fn seed_for_ticker(seed: u64, ticker: &str) -> u64 {
    ticker
        .bytes()
        .fold(seed, |acc, b| acc.wrapping_mul(0x100000001b3).wrapping_add(b as u64))
}

pub fn get_normal_draw<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    StandardNormal.sample(rng)
}
