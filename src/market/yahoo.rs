// src/market/yahoo.rs
//! Yahoo Finance daily history
//!
//! Uses the unofficial v8 chart endpoint:
//! ```text
//! GET {base_url}/{ticker}?period1={unix}&period2={unix}&interval=1d&events=history
//! ```
//! Only `timestamp[]` and `indicators.quote[0].close[]` are read; null closes
//! (halts, partial sessions) are skipped.

use super::{validate_date_range, MarketDataSource, PricePoint, PriceSeries};
use crate::error::{BsError, BsResult};
use chrono::{DateTime, Days, NaiveDate};
use serde::Deserialize;
use tracing::{debug, warn};

const DEFAULT_BASE_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart";
const SOURCE_NAME: &str = "yahoo";

/// Yahoo Finance chart client
pub struct YahooSource {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl YahooSource {
    pub fn new() -> BsResult<Self> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Client against a different endpoint (mirrors, local fixtures)
    pub fn with_base_url(base_url: impl Into<String>) -> BsResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36")
            .timeout(std::time::Duration::from_secs(30))
            .build()?;
        Ok(YahooSource {
            client,
            base_url: base_url.into(),
        })
    }
}

impl MarketDataSource for YahooSource {
    fn name(&self) -> &str {
        SOURCE_NAME
    }

    fn fetch_closes(&self, ticker: &str, start: NaiveDate, end: NaiveDate) -> BsResult<PriceSeries> {
        validate_date_range(start, end)?;

        let period1 = start
            .and_hms_opt(0, 0, 0)
            .map(|dt| dt.and_utc().timestamp())
            .ok_or_else(|| BsError::config("start", "not representable as a timestamp"))?;
        // period2 is exclusive
        let period2 = end
            .checked_add_days(Days::new(1))
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|dt| dt.and_utc().timestamp())
            .ok_or_else(|| BsError::config("end", "not representable as a timestamp"))?;

        let url = format!("{}/{}", self.base_url, ticker);
        debug!(%url, period1, period2, "requesting yahoo chart");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("period1", period1.to_string()),
                ("period2", period2.to_string()),
                ("interval", "1d".to_string()),
                ("events", "history".to_string()),
            ])
            .send()
            .map_err(|e| BsError::data(SOURCE_NAME, format!("request for '{}' failed: {}", ticker, e)))?;

        let status = response.status();
        let body = response
            .text()
            .map_err(|e| BsError::data(SOURCE_NAME, format!("failed to read response: {}", e)))?;

        parse_chart(&body, ticker).map_err(|e| match e {
            BsError::Data { reason, .. } if !status.is_success() => {
                BsError::data(SOURCE_NAME, format!("HTTP {}: {}", status, reason))
            }
            other => other,
        })
    }
}

/// Decode a chart response body into a close series
pub fn parse_chart(body: &str, ticker: &str) -> BsResult<PriceSeries> {
    let response: ChartResponse = serde_json::from_str(body)
        .map_err(|e| BsError::data(SOURCE_NAME, format!("failed to parse chart for '{}': {}", ticker, e)))?;

    if let Some(err) = response.chart.error {
        return Err(BsError::data(
            SOURCE_NAME,
            format!("unknown ticker '{}': {} ({})", ticker, err.description, err.code),
        ));
    }

    let result = response
        .chart
        .result
        .and_then(|r| r.into_iter().next())
        .ok_or_else(|| BsError::data(SOURCE_NAME, format!("no chart data returned for '{}'", ticker)))?;

    let timestamps = result.timestamp.unwrap_or_default();
    let closes = result
        .indicators
        .quote
        .into_iter()
        .next()
        .map(|q| q.close)
        .unwrap_or_default();

    if timestamps.len() != closes.len() {
        return Err(BsError::data(
            SOURCE_NAME,
            format!(
                "{} timestamps but {} closes for '{}'",
                timestamps.len(),
                closes.len(),
                ticker
            ),
        ));
    }

    let mut points: Vec<PricePoint> = Vec::with_capacity(timestamps.len());
    for (ts, close) in timestamps.into_iter().zip(closes) {
        let Some(close) = close else {
            continue;
        };
        let Some(date) = DateTime::from_timestamp(ts, 0).map(|dt| dt.date_naive()) else {
            warn!(ts, "skipping out-of-range timestamp");
            continue;
        };
        if points.last().is_some_and(|p| p.date >= date) {
            warn!(%date, "skipping duplicate session");
            continue;
        }
        points.push(PricePoint::new(date, close));
    }

    if points.is_empty() {
        return Err(BsError::data(SOURCE_NAME, format!("empty price series for '{}'", ticker)));
    }

    debug!(ticker, points = points.len(), "decoded yahoo chart");
    PriceSeries::new(points)
}

// Yahoo Finance chart response structures

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: Chart,
}

#[derive(Debug, Deserialize)]
struct Chart {
    result: Option<Vec<ChartResult>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    timestamp: Option<Vec<i64>>,
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    quote: Vec<QuoteIndicator>,
}

#[derive(Debug, Deserialize)]
struct QuoteIndicator {
    #[serde(default)]
    close: Vec<Option<f64>>,
}
