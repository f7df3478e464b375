// demos/backtest_demo.rs
//! Rolling-volatility call backtest on a synthetic index path
//!
//! Run with: cargo run --example backtest_demo

use bs_greeks::backtest::{self, BacktestConfig};
use bs_greeks::market::{MarketDataSource, SyntheticSource};
use bs_greeks::output;
use chrono::NaiveDate;

fn main() {
    let source = SyntheticSource::equity_index(2024);
    let series = source
        .fetch_closes(
            "SYN",
            NaiveDate::from_ymd_opt(2022, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2023, 12, 31).unwrap(),
        )
        .expect("synthetic data");

    let config = BacktestConfig::default();
    println!("=== Backtest: {} closes, K={}, H={}d ===\n", series.len(), config.strike, config.holding_period_days);

    match backtest::run_report("SYN", &series, &config) {
        Ok(report) => {
            print!("{}", output::format_window_table(&report.windows));
            println!();
            print!("{}", output::render_chart(&report.windows, 50, 10));
            println!("\nTotal PnL: ${:.2}   Final value: ${:.2}", report.total_pnl, report.final_value);
        }
        Err(e) => println!("Backtest failed: {}", e),
    }
}
