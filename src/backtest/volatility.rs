// src/backtest/volatility.rs
//! Realized volatility from daily closes
//!
//! # Estimator
//! ```text
//! r_t   = ln(P_t / P_{t-1})
//! σ_t   = stdev(r_{t-W+1}, …, r_t) * √N      (sample stdev, N trading days/year)
//! ```
//! σ_t exists only once W returns are available, i.e. from price index W on.

use statrs::statistics::Statistics;

/// Per-step log returns; one shorter than `prices`
pub fn log_returns(prices: &[f64]) -> Vec<f64> {
    prices.windows(2).map(|w| (w[1] / w[0]).ln()).collect()
}

/// Rolling annualized volatility aligned with `prices`
///
/// Entry `i` is `None` while the trailing window of `window` returns is
/// incomplete (the first `window` prices), `Some(σ)` afterwards.
pub fn rolling_volatility(prices: &[f64], window: usize, periods_per_year: f64) -> Vec<Option<f64>> {
    let returns = log_returns(prices);
    let annualize = periods_per_year.sqrt();

    std::iter::repeat(None)
        .take(window)
        .chain(
            returns
                .windows(window.max(1))
                .map(|w| Some(w.iter().std_dev() * annualize)),
        )
        .take(prices.len())
        .collect()
}
