//! # bs-greeks: Black-Scholes Pricing, Greeks and Option Backtests
//!
//! Closed-form European option prices and sensitivities under Black-Scholes,
//! plus a simple historical backtest that prices an option off a rolling
//! realized-volatility estimate.
//!
//! ## Key Features
//!
//! - **Closed-form pricing**: call/put prices and Delta, Gamma, Theta, Vega, Rho
//! - **Validated contracts**: non-positive spot, strike, maturity or volatility
//!   is rejected before any arithmetic
//! - **Batch pricing**: many (spot, σ) pairs priced in parallel with ndarray + Rayon
//! - **Backtest**: rolling 30-return volatility, fixed holding-period windows,
//!   per-window PnL and cumulative portfolio value
//! - **Market data**: Yahoo Finance, CSV files, or a seeded synthetic GBM path
//!
//! ## Quick Start
//!
//! ```rust
//! use bs_greeks::analytics::{OptionContract, OptionKind};
//!
//! let call = OptionContract::new(100.0, 100.0, 1.0, 0.05, 0.2, OptionKind::Call)
//!     .expect("valid contract");
//! let quote = call.quote();
//! assert!((quote.price - 10.4506).abs() < 1e-4);
//! assert!((quote.greeks.delta - 0.6368).abs() < 1e-4);
//! ```
//!
//! ## Backtest
//!
//! ```rust
//! use bs_greeks::backtest::{self, BacktestConfig};
//! use bs_greeks::market::{MarketDataSource, SyntheticSource};
//! use chrono::NaiveDate;
//!
//! let source = SyntheticSource::equity_index(42);
//! let series = source
//!     .fetch_closes(
//!         "SPY",
//!         NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
//!         NaiveDate::from_ymd_opt(2023, 12, 31).unwrap(),
//!     )
//!     .unwrap();
//! let windows = backtest::run(&series, &BacktestConfig::default()).unwrap();
//! assert!(!windows.is_empty());
//! ```

// Module declarations
pub mod analytics;
pub mod backtest;
pub mod error;
pub mod market;
pub mod math_utils;
pub mod output;
pub mod rng;

// Re-export commonly used types for convenience
pub use analytics::{Greeks, OptionContract, OptionKind, Quote};
pub use error::{BsError, BsResult};
