// src/output.rs
use crate::analytics::Quote;
use crate::backtest::BacktestWindowResult;
use crate::error::BsResult;
use std::path::Path;

/// Price (currency, 2 decimals) followed by the Greeks (4 decimals)
pub fn format_quote(quote: &Quote) -> String {
    let mut out = format!("Option Price: ${:.2}\nGreeks:\n", quote.price);
    for (name, value) in quote.greeks.labelled() {
        out.push_str(&format!("{}: {:.4}\n", name, value));
    }
    out
}

/// One row per window: date, option prices, pnl, portfolio value
pub fn format_window_table(windows: &[BacktestWindowResult]) -> String {
    let mut out = format!(
        "{:<12} {:>12} {:>12} {:>12} {:>14}\n",
        "date", "start", "end", "pnl", "cumulative"
    );
    out.push_str(&"-".repeat(66));
    out.push('\n');
    for w in windows {
        out.push_str(&format!(
            "{:<12} {:>12.4} {:>12.4} {:>12.2} {:>14.2}\n",
            w.date, w.start_price, w.end_price, w.pnl, w.cumulative
        ));
    }
    out
}

/// Terminal line chart of cumulative portfolio value over window dates
pub fn render_chart(windows: &[BacktestWindowResult], width: usize, height: usize) -> String {
    if windows.is_empty() {
        return "No completed holding-period windows to chart.\n".to_string();
    }
    let height = height.max(2);

    let values: Vec<f64> = windows.iter().map(|w| w.cumulative).collect();
    let lo = values.iter().cloned().fold(f64::INFINITY, f64::min);
    let hi = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let span = if hi > lo { hi - lo } else { 1.0 };

    // Resample to `width` columns
    let cols = width.min(values.len()).max(1);
    let column_value = |c: usize| {
        let idx = if cols == 1 { values.len() - 1 } else { c * (values.len() - 1) / (cols - 1) };
        values[idx]
    };

    let mut grid = vec![vec![' '; cols]; height];
    for c in 0..cols {
        let level = ((column_value(c) - lo) / span * (height - 1) as f64).round() as usize;
        let row = height - 1 - level.min(height - 1);
        grid[row][c] = '*';
    }

    let mut out = String::new();
    for (r, line) in grid.iter().enumerate() {
        let label = if r == 0 {
            format!("{:>12.2}", hi)
        } else if r == height - 1 {
            format!("{:>12.2}", lo)
        } else {
            " ".repeat(12)
        };
        out.push_str(&format!("{} |{}\n", label, line.iter().collect::<String>()));
    }
    out.push_str(&format!("{} +{}\n", " ".repeat(12), "-".repeat(cols)));
    let first = windows[0].date.to_string();
    let last = windows[windows.len() - 1].date.to_string();
    let gap = cols.saturating_sub(first.len() + last.len()).max(1);
    out.push_str(&format!("{}  {}{}{}\n", " ".repeat(12), first, " ".repeat(gap), last));
    out
}

/// Write backtest windows as CSV
pub fn write_backtest_csv(path: &Path, windows: &[BacktestWindowResult]) -> BsResult<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(["date", "start_price", "end_price", "pnl", "cumulative"])?;
    for w in windows {
        writer.write_record([
            w.date.to_string(),
            w.start_price.to_string(),
            w.end_price.to_string(),
            w.pnl.to_string(),
            w.cumulative.to_string(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}
