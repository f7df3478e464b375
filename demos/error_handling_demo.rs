// demos/error_handling_demo.rs
use bs_greeks::analytics::{OptionContract, OptionKind};
use bs_greeks::backtest::{self, BacktestConfig};
use bs_greeks::error::BsError;
use bs_greeks::market::{CsvSource, MarketDataSource, PriceSeries};
use chrono::NaiveDate;

fn main() {
    println!("Error Handling Demo for bs-greeks");
    println!("=================================\n");

    // Test 1: Zero volatility
    println!("1. Testing zero volatility...");
    match OptionContract::new(100.0, 100.0, 1.0, 0.05, 0.0, OptionKind::Call) {
        Ok(_) => println!("   Unexpected: Should have failed!"),
        Err(e) => println!("   ✓ Caught error: {}", e),
    }

    // Test 2: Expired contract
    println!("\n2. Testing zero maturity...");
    match OptionContract::new(100.0, 100.0, 0.0, 0.05, 0.2, OptionKind::Put) {
        Ok(_) => println!("   Unexpected: Should have failed!"),
        Err(e) => println!("   ✓ Caught error: {}", e),
    }

    // Test 3: Invalid backtest configuration
    println!("\n3. Testing zero holding period...");
    let bad_config = BacktestConfig {
        holding_period_days: 0,
        ..Default::default()
    };
    match bad_config.validate() {
        Ok(_) => println!("   Unexpected: Should have failed!"),
        Err(e) => println!("   ✓ Caught error: {}", e),
    }

    // Test 4: Invalid market data
    println!("\n4. Testing negative close in a price series...");
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    match PriceSeries::from_closes(start, &[100.0, -3.0]) {
        Ok(_) => println!("   Unexpected: Should have failed!"),
        Err(e) => println!("   ✓ Caught error: {}", e),
    }

    // Test 5: Missing data file
    println!("\n5. Testing missing CSV file...");
    let end = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
    match CsvSource::new("does-not-exist.csv").fetch_closes("SPY", start, end) {
        Ok(_) => println!("   Unexpected: Should have failed!"),
        Err(e) => println!("   ✓ Caught error: {}", e),
    }

    // Test 6: Too little data is not an error
    println!("\n6. Testing short series...");
    let short = PriceSeries::from_closes(start, &[450.0; 30]).unwrap();
    match backtest::run(&short, &BacktestConfig::default()) {
        Ok(windows) => println!("   ✓ Success: {} windows", windows.len()),
        Err(e) => println!("   Unexpected error: {}", e),
    }

    // Test 7: Error type matching
    println!("\n7. Testing error type matching...");
    match OptionContract::new(-100.0, 100.0, 1.0, 0.05, 0.2, OptionKind::Call) {
        Ok(_) => println!("   Unexpected: Should have failed!"),
        Err(BsError::InvalidParameters { parameter, value, constraint }) => {
            println!("   ✓ Caught InvalidParameters: {} = {} ({})", parameter, value, constraint);
        }
        Err(other) => println!("   Unexpected error type: {}", other),
    }

    println!("\n✓ Error handling demo complete!");
}
