// src/market/mod.rs
//! Market data: the daily close series consumed by the backtest
//!
//! A [`MarketDataSource`] turns (ticker, start, end) into a [`PriceSeries`].
//! Three sources are provided:
//! - [`YahooSource`]: Yahoo Finance daily chart endpoint
//! - [`CsvSource`]: a local CSV in Yahoo's export layout
//! - [`SyntheticSource`]: seeded geometric Brownian motion, for offline runs
//!
//! Only the closing price is kept. A `PriceSeries` is validated once at
//! construction (dates strictly increasing, closes finite and positive) and
//! is read-only afterwards.

pub mod csv_source;
pub mod synthetic;
pub mod yahoo;

pub use csv_source::CsvSource;
pub use synthetic::SyntheticSource;
pub use yahoo::YahooSource;

use crate::error::{BsError, BsResult};
use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// One daily close
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub close: f64,
}

impl PricePoint {
    pub fn new(date: NaiveDate, close: f64) -> Self {
        PricePoint { date, close }
    }
}

/// Ordered (date, close) series, strictly increasing by date
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriceSeries {
    points: Vec<PricePoint>,
}

impl PriceSeries {
    /// Build a series, checking ordering and price validity
    ///
    /// # Errors
    ///
    /// `BsError::Data` if a date does not strictly follow its predecessor or
    /// a close is not a finite positive number.
    pub fn new(points: Vec<PricePoint>) -> BsResult<Self> {
        for (i, p) in points.iter().enumerate() {
            if !p.close.is_finite() || p.close <= 0.0 {
                return Err(BsError::data(
                    "series",
                    format!("close on {} must be a positive number, got {}", p.date, p.close),
                ));
            }
            if i > 0 && p.date <= points[i - 1].date {
                return Err(BsError::data(
                    "series",
                    format!(
                        "dates must be strictly increasing: {} follows {}",
                        p.date,
                        points[i - 1].date
                    ),
                ));
            }
        }
        Ok(PriceSeries { points })
    }

    /// Series with one close per calendar day starting at `start`
    pub fn from_closes(start: NaiveDate, closes: &[f64]) -> BsResult<Self> {
        let points = closes
            .iter()
            .enumerate()
            .map(|(i, &close)| {
                start
                    .checked_add_days(Days::new(i as u64))
                    .map(|date| PricePoint::new(date, close))
                    .ok_or_else(|| BsError::data("series", "date overflow"))
            })
            .collect::<BsResult<Vec<_>>>()?;
        Self::new(points)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn closes(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.close).collect()
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.points.iter().map(|p| p.date).collect()
    }

    pub fn first(&self) -> Option<&PricePoint> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&PricePoint> {
        self.points.last()
    }
}

/// Source of daily closing prices
pub trait MarketDataSource {
    /// Short name used in logs and error messages
    fn name(&self) -> &str;

    /// Daily closes for `ticker` between `start` and `end`, both inclusive
    ///
    /// Implementations return `BsError::Data` for an unknown ticker, an
    /// unreachable feed or an empty result.
    fn fetch_closes(&self, ticker: &str, start: NaiveDate, end: NaiveDate) -> BsResult<PriceSeries>;
}

/// Reject empty or inverted date ranges
pub fn validate_date_range(start: NaiveDate, end: NaiveDate) -> BsResult<()> {
    if start >= end {
        Err(BsError::config(
            "end",
            format!("end date {} must be after start date {}", end, start),
        ))
    } else {
        Ok(())
    }
}
