// src/main.rs
//! bs-greeks command line
//!
//! ```text
//! bs-greeks price --spot 100 --strike 100 --maturity 1 --rate 0.05 --volatility 0.2 --kind call
//! bs-greeks backtest --ticker SPY --start 2023-01-01 --end 2024-01-01 --strike 450 --holding-days 30
//! ```

use anyhow::{Context, Result};
use bs_greeks::analytics::{OptionContract, OptionKind};
use bs_greeks::backtest::{self, BacktestConfig};
use bs_greeks::market::{CsvSource, MarketDataSource, SyntheticSource, YahooSource};
use bs_greeks::output;
use chrono::{Months, NaiveDate, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "bs-greeks", version, about = "Black-Scholes pricing, Greeks and option backtests")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Price a European option and show its Greeks
    Price {
        /// Spot price (S)
        #[arg(long, default_value_t = 100.0)]
        spot: f64,

        /// Strike price (K)
        #[arg(long, default_value_t = 100.0)]
        strike: f64,

        /// Time to maturity in years (T)
        #[arg(long, default_value_t = 1.0)]
        maturity: f64,

        /// Risk-free rate (r)
        #[arg(long, default_value_t = 0.05)]
        rate: f64,

        /// Volatility (σ)
        #[arg(long, default_value_t = 0.2)]
        volatility: f64,

        /// call or put
        #[arg(long, default_value = "call")]
        kind: OptionKind,

        /// Print the quote as JSON
        #[arg(long)]
        json: bool,
    },

    /// Backtest a rolling-volatility option over historical closes
    Backtest {
        /// Ticker symbol
        #[arg(short, long, default_value = "SPY")]
        ticker: String,

        /// First date (defaults to one year before --end)
        #[arg(long)]
        start: Option<NaiveDate>,

        /// Last date (defaults to today)
        #[arg(long)]
        end: Option<NaiveDate>,

        /// Option strike
        #[arg(long, default_value_t = 450.0)]
        strike: f64,

        /// Holding period in trading days
        #[arg(long, default_value_t = 30)]
        holding_days: usize,

        /// Flat risk-free rate
        #[arg(long, default_value_t = 0.05)]
        rate: f64,

        /// Log returns in the volatility window
        #[arg(long, default_value_t = 30)]
        vol_window: usize,

        /// call or put
        #[arg(long, default_value = "call")]
        kind: OptionKind,

        /// Market data source
        #[arg(long, value_enum, default_value_t = SourceKind::Yahoo)]
        source: SourceKind,

        /// CSV file for --source csv
        #[arg(long, required_if_eq("source", "csv"))]
        csv_input: Option<PathBuf>,

        /// Seed for --source synthetic
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Write window results to this CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Chart width in columns
        #[arg(long, default_value_t = 60)]
        chart_width: usize,

        /// Chart height in rows
        #[arg(long, default_value_t = 12)]
        chart_height: usize,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum SourceKind {
    Yahoo,
    Csv,
    Synthetic,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Price {
            spot,
            strike,
            maturity,
            rate,
            volatility,
            kind,
            json,
        } => {
            let contract = OptionContract::new(spot, strike, maturity, rate, volatility, kind)?;
            let quote = contract.quote();
            if json {
                println!("{}", serde_json::to_string_pretty(&quote)?);
            } else {
                print!("{}", output::format_quote(&quote));
            }
            Ok(())
        }
        Commands::Backtest {
            ticker,
            start,
            end,
            strike,
            holding_days,
            rate,
            vol_window,
            kind,
            source,
            csv_input,
            seed,
            output: output_path,
            chart_width,
            chart_height,
        } => {
            let end = end.unwrap_or_else(|| Utc::now().date_naive());
            let start = match start {
                Some(s) => s,
                None => end
                    .checked_sub_months(Months::new(12))
                    .context("cannot derive a start date one year before --end")?,
            };

            let config = BacktestConfig {
                strike,
                holding_period_days: holding_days,
                rate,
                vol_window,
                kind,
                ..Default::default()
            };
            config.validate()?;

            let source: Box<dyn MarketDataSource> = match source {
                SourceKind::Yahoo => Box::new(YahooSource::new()?),
                SourceKind::Csv => Box::new(CsvSource::new(
                    csv_input.context("--csv-input is required with --source csv")?,
                )),
                SourceKind::Synthetic => Box::new(SyntheticSource::equity_index(seed)),
            };

            info!(%ticker, %start, %end, source = source.name(), "fetching closes");
            let series = source
                .fetch_closes(&ticker, start, end)
                .with_context(|| format!("could not load market data for {}", ticker))?;

            let report = backtest::run_report(&ticker, &series, &config)
                .with_context(|| format!("backtest for {} failed", ticker))?;

            println!(
                "{} {} K={:.2} H={}d from {} closes ({} priced)\n",
                report.ticker,
                config.kind,
                config.strike,
                config.holding_period_days,
                series.len(),
                report.priced_points
            );
            if report.windows.is_empty() {
                println!(
                    "Not enough data: need at least {} closes, got {}.",
                    config.min_points(),
                    series.len()
                );
            } else {
                print!("{}", output::format_window_table(&report.windows));
                println!();
                print!("{}", output::render_chart(&report.windows, chart_width, chart_height));
            }
            println!(
                "\nTotal PnL: ${:.2}   Final value: ${:.2}",
                report.total_pnl, report.final_value
            );

            if let Some(path) = output_path {
                output::write_backtest_csv(&path, &report.windows)
                    .with_context(|| format!("writing {}", path.display()))?;
                info!(path = %path.display(), "wrote window results");
            }
            Ok(())
        }
    }
}
