// src/analytics/mod.rs
pub mod bs_analytic;

pub use bs_analytic::{greeks, price, price_batch, Greeks, OptionContract, OptionKind, Quote};
