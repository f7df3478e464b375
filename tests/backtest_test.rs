// tests/backtest_test.rs
use bs_greeks::analytics::{OptionContract, OptionKind};
use bs_greeks::backtest::{self, BacktestConfig};
use bs_greeks::market::{CsvSource, MarketDataSource, PriceSeries, SyntheticSource};
use bs_greeks::output;
use chrono::NaiveDate;
use std::io::Write;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn synthetic_year(seed: u64) -> PriceSeries {
    SyntheticSource::equity_index(seed)
        .fetch_closes("SPY", d(2023, 1, 1), d(2023, 12, 31))
        .expect("synthetic series")
}

#[test]
fn test_window_count_property() {
    let series = synthetic_year(42);
    let n = series.len();

    for &h in &[1usize, 5, 7, 21, 30, 63, 200, 250] {
        let cfg = BacktestConfig {
            holding_period_days: h,
            ..Default::default()
        };
        let windows = backtest::run(&series, &cfg).unwrap();
        let expected = if n < 30 + h { 0 } else { (n - 30) / h };

        println!("N={} H={} windows={} expected={}", n, h, windows.len(), expected);
        assert_eq!(windows.len(), expected, "window count for H={}", h);

        if let Some(last) = windows.last() {
            let total: f64 = windows.iter().map(|w| w.pnl).sum();
            assert!((last.cumulative - (10_000.0 + total)).abs() < 1e-6);
        }
    }
}

#[test]
fn test_flat_warmup_with_short_tail_is_empty() {
    // 30 identical closes then fewer than H further points
    let mut closes = vec![450.0; 30];
    closes.extend_from_slice(&[451.0, 449.5, 452.0]);
    let series = PriceSeries::from_closes(d(2024, 1, 1), &closes).unwrap();

    let windows = backtest::run(&series, &BacktestConfig::default()).expect("no error");
    assert!(windows.is_empty());
}

#[test]
fn test_exactly_thirty_identical_closes_is_empty() {
    let series = PriceSeries::from_closes(d(2024, 1, 1), &[450.0; 30]).unwrap();
    assert!(backtest::run(&series, &BacktestConfig::default()).unwrap().is_empty());
}

#[test]
fn test_empty_series_is_empty() {
    let series = PriceSeries::default();
    assert!(backtest::run(&series, &BacktestConfig::default()).unwrap().is_empty());
}

#[test]
fn test_priced_points_match_pricer() {
    let series = synthetic_year(7);
    let cfg = BacktestConfig::default();
    let priced = backtest::price_points(&series, &cfg).unwrap();

    assert_eq!(priced.len(), series.len() - 30);
    for p in priced.iter().step_by(17) {
        let direct = OptionContract::call(p.spot, cfg.strike, 30.0 / 252.0, cfg.rate, p.volatility)
            .unwrap()
            .price();
        assert_eq!(p.option_price, direct);
    }
}

#[test]
fn test_put_backtest_mirrors_call_via_parity() {
    let series = synthetic_year(11);
    let call_cfg = BacktestConfig {
        holding_period_days: 21,
        ..Default::default()
    };
    let put_cfg = BacktestConfig {
        kind: OptionKind::Put,
        ..call_cfg.clone()
    };

    let calls = backtest::run(&series, &call_cfg).unwrap();
    let puts = backtest::run(&series, &put_cfg).unwrap();
    assert_eq!(calls.len(), puts.len());

    // C - P = S - K e^(-rT) with fixed T, so pnl_call - pnl_put = ΔS * notional
    let priced = backtest::price_points(&series, &call_cfg).unwrap();
    for (i, (c, p)) in calls.iter().zip(&puts).enumerate() {
        let start = priced[i * 21].spot;
        let end = priced[i * 21 + 20].spot;
        assert!((c.pnl - p.pnl - (end - start) * 100.0).abs() < 1e-6);
    }
}

#[test]
fn test_deterministic_runs() {
    let cfg = BacktestConfig::default();
    let a = backtest::run(&synthetic_year(3), &cfg).unwrap();
    let b = backtest::run(&synthetic_year(3), &cfg).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_csv_source_end_to_end() {
    let series = synthetic_year(99);

    let mut input = tempfile::NamedTempFile::new().unwrap();
    writeln!(input, "Date,Open,High,Low,Close,Adj Close,Volume").unwrap();
    for p in series.points() {
        writeln!(input, "{},{},{},{},{},{},1000", p.date, p.close, p.close, p.close, p.close, p.close).unwrap();
    }
    input.flush().unwrap();

    let loaded = CsvSource::new(input.path())
        .fetch_closes("SPY", d(2023, 1, 1), d(2023, 12, 31))
        .unwrap();
    assert_eq!(loaded.len(), series.len());

    let report = backtest::run_report("SPY", &loaded, &BacktestConfig::default()).unwrap();
    assert_eq!(report.windows.len(), (series.len() - 30) / 30);

    let out = tempfile::NamedTempFile::new().unwrap();
    output::write_backtest_csv(out.path(), &report.windows).unwrap();
    let written = std::fs::read_to_string(out.path()).unwrap();
    assert_eq!(written.lines().count(), report.windows.len() + 1);
}

#[test]
fn test_invalid_config_is_reported() {
    let cfg = BacktestConfig {
        holding_period_days: 0,
        ..Default::default()
    };
    let err = backtest::run(&synthetic_year(1), &cfg).unwrap_err();
    println!("{}", err);
    assert!(err.to_string().contains("holding_period_days"));
}

#[test]
fn test_overflowing_holding_period_is_a_config_error() {
    let cfg = BacktestConfig {
        holding_period_days: usize::MAX,
        ..Default::default()
    };
    let series = PriceSeries::from_closes(d(2024, 1, 1), &[450.0, 451.0, 449.0]).unwrap();
    let err = backtest::run(&series, &cfg).unwrap_err();
    println!("{}", err);
    assert!(matches!(err, bs_greeks::BsError::InvalidConfiguration { .. }));
}
