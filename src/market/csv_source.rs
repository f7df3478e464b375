// src/market/csv_source.rs
//! Daily closes from a CSV file
//!
//! Expects a header row with `Date` and `Close` columns (any order, case
//! insensitive), as in Yahoo's "Download" export:
//! ```text
//! Date,Open,High,Low,Close,Adj Close,Volume
//! 2024-01-02,472.16,473.67,470.49,472.65,470.14,123623700
//! ```
//! Rows whose close is `null` or empty are skipped. The ticker argument is only
//! used in messages; one file holds one instrument.

use super::{validate_date_range, MarketDataSource, PricePoint, PriceSeries};
use crate::error::{BsError, BsResult};
use chrono::NaiveDate;
use csv::ReaderBuilder;
use std::path::PathBuf;
use tracing::{debug, warn};

const SOURCE_NAME: &str = "csv";

pub struct CsvSource {
    path: PathBuf,
}

impl CsvSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        CsvSource { path: path.into() }
    }
}

impl MarketDataSource for CsvSource {
    fn name(&self) -> &str {
        SOURCE_NAME
    }

    fn fetch_closes(&self, ticker: &str, start: NaiveDate, end: NaiveDate) -> BsResult<PriceSeries> {
        validate_date_range(start, end)?;

        let mut reader = ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(&self.path)
            .map_err(|e| BsError::data(SOURCE_NAME, format!("cannot open {}: {}", self.path.display(), e)))?;

        let headers = reader.headers()?.clone();
        let column = |name: &str| {
            headers
                .iter()
                .position(|h| h.eq_ignore_ascii_case(name))
                .ok_or_else(|| BsError::data(SOURCE_NAME, format!("missing '{}' column in {}", name, self.path.display())))
        };
        let date_idx = column("Date")?;
        let close_idx = column("Close")?;

        let mut points = Vec::new();
        for (line, record) in reader.records().enumerate() {
            let record = record?;
            let raw_date = record.get(date_idx).unwrap_or_default();
            let raw_close = record.get(close_idx).unwrap_or_default();

            let date = NaiveDate::parse_from_str(raw_date, "%Y-%m-%d").map_err(|e| {
                BsError::data(SOURCE_NAME, format!("row {}: bad date '{}': {}", line + 2, raw_date, e))
            })?;
            if date < start || date > end {
                continue;
            }
            if raw_close.is_empty() || raw_close.eq_ignore_ascii_case("null") {
                warn!(%date, "skipping row without close");
                continue;
            }
            let close: f64 = raw_close.parse().map_err(|e| {
                BsError::data(SOURCE_NAME, format!("row {}: bad close '{}': {}", line + 2, raw_close, e))
            })?;
            points.push(PricePoint::new(date, close));
        }

        if points.is_empty() {
            return Err(BsError::data(
                SOURCE_NAME,
                format!("no rows for '{}' between {} and {} in {}", ticker, start, end, self.path.display()),
            ));
        }

        debug!(ticker, rows = points.len(), path = %self.path.display(), "loaded csv closes");
        PriceSeries::new(points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn write_fixture(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_reads_yahoo_layout() {
        let file = write_fixture(
            "Date,Open,High,Low,Close,Adj Close,Volume\n\
             2024-01-02,472.16,473.67,470.49,472.65,470.14,123623700\n\
             2024-01-03,470.43,471.19,468.17,468.79,466.30,103585900\n\
             2024-01-04,468.30,470.96,467.05,null,null,0\n\
             2024-01-05,467.49,470.44,466.43,467.92,465.43,86060800\n",
        );
        let source = CsvSource::new(file.path());
        let series = source.fetch_closes("SPY", d(2024, 1, 1), d(2024, 1, 31)).unwrap();

        assert_eq!(series.closes(), vec![472.65, 468.79, 467.92]);
    }

    #[test]
    fn test_filters_to_range() {
        let file = write_fixture("date,close\n2024-01-02,1.0\n2024-01-03,2.0\n2024-01-04,3.0\n");
        let source = CsvSource::new(file.path());
        let series = source.fetch_closes("X", d(2024, 1, 3), d(2024, 1, 4)).unwrap();

        assert_eq!(series.dates(), vec![d(2024, 1, 3), d(2024, 1, 4)]);
    }

    #[test]
    fn test_missing_column_is_data_error() {
        let file = write_fixture("Date,Open\n2024-01-02,1.0\n");
        let err = CsvSource::new(file.path())
            .fetch_closes("X", d(2024, 1, 1), d(2024, 2, 1))
            .unwrap_err();
        assert!(err.to_string().contains("Close"));
    }

    #[test]
    fn test_empty_range_is_data_error() {
        let file = write_fixture("Date,Close\n2024-01-02,1.0\n");
        let err = CsvSource::new(file.path())
            .fetch_closes("X", d(2025, 1, 1), d(2025, 2, 1))
            .unwrap_err();
        assert!(matches!(err, BsError::Data { .. }));
    }

    #[test]
    fn test_missing_file_is_data_error() {
        let err = CsvSource::new("/nonexistent/prices.csv")
            .fetch_closes("X", d(2024, 1, 1), d(2024, 2, 1))
            .unwrap_err();
        assert!(matches!(err, BsError::Data { .. }));
    }
}
