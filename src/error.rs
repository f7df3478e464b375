// src/error.rs
use thiserror::Error;

/// Error types for the bs-greeks library
#[derive(Debug, Error)]
pub enum BsError {
    /// Contract parameter outside its domain (spot, strike, maturity, volatility)
    #[error("Invalid parameter '{parameter}' = {value}: {constraint}")]
    InvalidParameters {
        parameter: String,
        value: f64,
        constraint: String,
    },

    /// Invalid backtest or source configuration
    #[error("Invalid configuration for '{field}': {reason}")]
    InvalidConfiguration { field: String, reason: String },

    /// Market data could not be obtained or is unusable
    #[error("Market data error from {source_name}: {reason}")]
    Data { source_name: String, reason: String },

    /// A formula produced a non-finite value
    #[error("Numerical instability in {method}: {reason}")]
    NumericalInstability { method: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Result type alias for bs-greeks operations
pub type BsResult<T> = Result<T, BsError>;

impl BsError {
    pub fn data(source_name: impl Into<String>, reason: impl Into<String>) -> Self {
        BsError::Data {
            source_name: source_name.into(),
            reason: reason.into(),
        }
    }

    pub fn config(field: impl Into<String>, reason: impl Into<String>) -> Self {
        BsError::InvalidConfiguration {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// True for errors raised by contract validation
    pub fn is_domain_error(&self) -> bool {
        matches!(self, BsError::InvalidParameters { .. })
    }
}

/// Validation utilities
pub mod validation {
    use super::{BsError, BsResult};

    /// Validate that a parameter is finite and strictly positive
    pub fn validate_positive(name: &str, value: f64) -> BsResult<()> {
        validate_finite(name, value)?;
        if value <= 0.0 {
            Err(BsError::InvalidParameters {
                parameter: name.to_string(),
                value,
                constraint: "must be positive (> 0)".to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Validate that a parameter is non-negative
    pub fn validate_non_negative(name: &str, value: f64) -> BsResult<()> {
        validate_finite(name, value)?;
        if value < 0.0 {
            Err(BsError::InvalidParameters {
                parameter: name.to_string(),
                value,
                constraint: "must be non-negative (≥ 0)".to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Validate that a value is finite and not NaN
    pub fn validate_finite(name: &str, value: f64) -> BsResult<()> {
        if !value.is_finite() {
            Err(BsError::InvalidParameters {
                parameter: name.to_string(),
                value,
                constraint: "must be finite (not NaN or infinite)".to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Validate a count-like configuration field against a lower bound
    pub fn validate_min_count(field: &str, value: usize, min: usize) -> BsResult<()> {
        if value < min {
            Err(BsError::InvalidConfiguration {
                field: field.to_string(),
                reason: format!("must be at least {} (got {})", min, value),
            })
        } else {
            Ok(())
        }
    }
}
