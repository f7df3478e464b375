// src/market/synthetic.rs
//! Synthetic daily closes from geometric Brownian motion
//!
//! Uses the exact GBM step on a business-day calendar (Mon–Fri, no holidays):
//! ```text
//! S_{t+dt} = S_t * exp((μ - σ²/2)dt + σ√dt * Z),   dt = 1/252
//! ```

use super::{validate_date_range, MarketDataSource, PricePoint, PriceSeries};
use crate::error::{validation::*, BsResult};
use crate::rng;
use chrono::{Datelike, NaiveDate, Weekday};
use tracing::debug;

const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// Geometric Brownian motion
#[derive(Debug, Clone, Copy)]
pub struct Gbm {
    pub s0: f64,
    pub mu: f64,
    pub sigma: f64,
}

impl Gbm {
    pub fn new(s0: f64, mu: f64, sigma: f64) -> BsResult<Self> {
        validate_positive("s0", s0)?;
        validate_finite("mu", mu)?;
        validate_non_negative("sigma", sigma)?;
        Ok(Gbm { s0, mu, sigma })
    }

    pub fn exact_step(&self, s_t: f64, dt: f64, normal_draw: f64) -> f64 {
        s_t * ((self.mu - 0.5 * self.sigma * self.sigma) * dt + self.sigma * dt.sqrt() * normal_draw).exp()
    }
}

/// Offline market-data source producing a seeded GBM path
#[derive(Debug, Clone)]
pub struct SyntheticSource {
    model: Gbm,
    seed: u64,
}

impl SyntheticSource {
    pub fn new(model: Gbm, seed: u64) -> Self {
        SyntheticSource { model, seed }
    }

    /// S0=450, μ=7%, σ=18%: roughly an index ETF
    pub fn equity_index(seed: u64) -> Self {
        SyntheticSource {
            model: Gbm {
                s0: 450.0,
                mu: 0.07,
                sigma: 0.18,
            },
            seed,
        }
    }
}

fn is_business_day(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

impl MarketDataSource for SyntheticSource {
    fn name(&self) -> &str {
        "synthetic"
    }

    fn fetch_closes(&self, ticker: &str, start: NaiveDate, end: NaiveDate) -> BsResult<PriceSeries> {
        validate_date_range(start, end)?;

        let mut rng = rng::seed_rng_from_u64(rng::seed_for_ticker(self.seed, ticker));
        let dt = 1.0 / TRADING_DAYS_PER_YEAR;

        let mut points = Vec::new();
        let mut current_s = self.model.s0;
        for date in start.iter_days().take_while(|d| *d <= end).filter(|d| is_business_day(*d)) {
            if !points.is_empty() {
                let z = rng::get_normal_draw(&mut rng);
                current_s = self.model.exact_step(current_s, dt, z);
            }
            points.push(PricePoint::new(date, current_s));
        }

        debug!(ticker, seed = self.seed, points = points.len(), "generated synthetic closes");
        PriceSeries::new(points)
    }
}
