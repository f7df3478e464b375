// src/backtest/mod.rs
//! Rolling-volatility option backtest
//!
//! # Pipeline
//!
//! ```text
//! closes ──log returns──▶ rolling σ (W returns, ×√252) ──drop first W──▶
//!   Black-Scholes price per point (T = H/252) ──chunks of H──▶
//!   pnl = (V_end - V_start) × notional ──running sum──▶ cumulative
//! ```
//!
//! Windows are consecutive and non-overlapping, start at the first priced
//! point and step by the holding period H; a trailing partial window is
//! dropped. A series shorter than `W + H` closes yields no windows.

pub mod volatility;

use crate::analytics::{price_batch, OptionKind};
use crate::error::{validation::*, BsError, BsResult};
use crate::market::PriceSeries;
use crate::math_utils::Timer;
use chrono::NaiveDate;
use ndarray::Array1;
use serde::Serialize;
use tracing::{debug, info};

pub use volatility::{log_returns, rolling_volatility};

/// Backtest parameters
#[derive(Debug, Clone, Serialize)]
pub struct BacktestConfig {
    pub strike: f64,
    /// Points per window; also sets the option maturity H/252
    pub holding_period_days: usize,
    pub rate: f64,
    /// Number of log returns in the volatility window
    pub vol_window: usize,
    pub trading_days_per_year: f64,
    /// Units of option held per window
    pub notional: f64,
    pub starting_capital: f64,
    pub kind: OptionKind,
}

impl BacktestConfig {
    /// Validate the backtest configuration
    pub fn validate(&self) -> BsResult<()> {
        validate_positive("strike", self.strike)?;
        validate_min_count("holding_period_days", self.holding_period_days, 1)?;
        validate_finite("rate", self.rate)?;
        validate_min_count("vol_window", self.vol_window, 2)?;
        if self.vol_window.checked_add(self.holding_period_days).is_none() {
            return Err(BsError::config(
                "holding_period_days",
                format!("vol_window + holding_period_days overflows (got {})", self.holding_period_days),
            ));
        }
        validate_positive("trading_days_per_year", self.trading_days_per_year)?;
        validate_positive("notional", self.notional)?;
        validate_finite("starting_capital", self.starting_capital)?;
        Ok(())
    }

    /// Option maturity in years
    pub fn maturity(&self) -> f64 {
        self.holding_period_days as f64 / self.trading_days_per_year
    }

    /// Fewest closes that produce one complete window
    pub fn min_points(&self) -> usize {
        self.vol_window.saturating_add(self.holding_period_days)
    }
}

impl Default for BacktestConfig {
    fn default() -> Self {
        BacktestConfig {
            strike: 450.0,
            holding_period_days: 30,
            rate: 0.05,
            vol_window: 30,
            trading_days_per_year: 252.0,
            notional: 100.0,
            starting_capital: 10_000.0,
            kind: OptionKind::Call,
        }
    }
}

/// A close with its rolling volatility and model option price
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PricedPoint {
    pub date: NaiveDate,
    pub spot: f64,
    pub volatility: f64,
    pub option_price: f64,
}

/// Outcome of one holding-period window
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BacktestWindowResult {
    /// Date of the window's last point
    pub date: NaiveDate,
    pub start_price: f64,
    pub end_price: f64,
    pub pnl: f64,
    /// Starting capital plus all pnl up to and including this window
    pub cumulative: f64,
}

/// Backtest result with summary figures
#[derive(Debug, Clone, Serialize)]
pub struct BacktestReport {
    pub ticker: String,
    pub config: BacktestConfig,
    pub priced_points: usize,
    pub windows: Vec<BacktestWindowResult>,
    pub total_pnl: f64,
    pub final_value: f64,
}

/// Steps 1–3: rolling volatility and one model price per usable close
pub fn price_points(series: &PriceSeries, config: &BacktestConfig) -> BsResult<Vec<PricedPoint>> {
    config.validate()?;

    let closes = series.closes();
    let vols = rolling_volatility(&closes, config.vol_window, config.trading_days_per_year);

    let usable: Vec<(NaiveDate, f64, f64)> = series
        .points()
        .iter()
        .zip(vols)
        .filter_map(|(p, v)| v.map(|v| (p.date, p.close, v)))
        .collect();

    if let Some(&(date, _, v)) = usable.iter().find(|&&(_, _, v)| v <= 0.0) {
        return Err(BsError::InvalidParameters {
            parameter: "volatility".to_string(),
            value: v,
            constraint: format!(
                "must be positive (> 0); the {} returns ending {} are all equal",
                config.vol_window, date
            ),
        });
    }

    let spots: Array1<f64> = usable.iter().map(|&(_, s, _)| s).collect();
    let sigmas: Array1<f64> = usable.iter().map(|&(_, _, v)| v).collect();
    let prices = price_batch(&spots, &sigmas, config.strike, config.maturity(), config.rate, config.kind)?;

    debug!(
        usable = usable.len(),
        dropped = series.len() - usable.len(),
        "priced series"
    );

    Ok(usable
        .into_iter()
        .zip(prices.iter())
        .map(|((date, spot, volatility), &option_price)| PricedPoint {
            date,
            spot,
            volatility,
            option_price,
        })
        .collect())
}

/// Steps 4–5: non-overlapping windows of `holding_period_days` points
pub fn window_results(priced: &[PricedPoint], config: &BacktestConfig) -> Vec<BacktestWindowResult> {
    let h = config.holding_period_days.max(1);

    priced
        .chunks_exact(h)
        .scan(config.starting_capital, |cumulative, window| {
            let (first, last) = (window[0], window[h - 1]);
            let pnl = (last.option_price - first.option_price) * config.notional;
            *cumulative += pnl;
            Some(BacktestWindowResult {
                date: last.date,
                start_price: first.option_price,
                end_price: last.option_price,
                pnl,
                cumulative: *cumulative,
            })
        })
        .collect()
}

/// Run the backtest over a close series
///
/// # Errors
///
/// - `InvalidConfiguration` / `InvalidParameters` for a bad config
/// - `InvalidParameters` when a rolling volatility is zero (flat window); the
///   message names the date the flat window ends
pub fn run(series: &PriceSeries, config: &BacktestConfig) -> BsResult<Vec<BacktestWindowResult>> {
    config.validate()?;

    if series.len() < config.min_points() {
        debug!(
            points = series.len(),
            required = config.min_points(),
            "series too short for a complete window"
        );
        return Ok(Vec::new());
    }

    let priced = price_points(series, config)?;
    Ok(window_results(&priced, config))
}

/// Run the backtest and summarize it
pub fn run_report(ticker: &str, series: &PriceSeries, config: &BacktestConfig) -> BsResult<BacktestReport> {
    let timer = Timer::new();

    let windows = run(series, config)?;
    let total_pnl: f64 = windows.iter().map(|w| w.pnl).sum();
    let final_value = windows.last().map_or(config.starting_capital, |w| w.cumulative);
    let priced_points = series.len().saturating_sub(config.vol_window);

    info!(
        ticker,
        windows = windows.len(),
        total_pnl,
        final_value,
        elapsed_ms = timer.elapsed_ms(),
        "backtest finished"
    );

    Ok(BacktestReport {
        ticker: ticker.to_string(),
        config: config.clone(),
        priced_points,
        windows,
        total_pnl,
        final_value,
    })
}
