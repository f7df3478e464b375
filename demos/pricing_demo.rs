// demos/pricing_demo.rs
use bs_greeks::analytics::{price_batch, OptionContract, OptionKind};
use bs_greeks::math_utils::Timer;
use bs_greeks::output;
use ndarray::Array1;

fn main() {
    // Option parameters
    let spot = 100.0;
    let strike = 100.0;
    let maturity = 1.0;
    let rate = 0.05;
    let vol = 0.20;

    println!("=== Black-Scholes Pricing ===\n");
    println!("Spot:     ${:.2}", spot);
    println!("Strike:   ${:.2}", strike);
    println!("Maturity: {:.2} years", maturity);
    println!("Rate:     {:.1}%", rate * 100.0);
    println!("Vol:      {:.1}%\n", vol * 100.0);

    for kind in [OptionKind::Call, OptionKind::Put] {
        let contract = OptionContract::new(spot, strike, maturity, rate, vol, kind).expect("valid contract");
        println!("--- {} ---", kind);
        print!("{}", output::format_quote(&contract.quote()));
        println!();
    }

    // Put-call parity: C - P = S - K*e^(-rT)
    let call = OptionContract::call(spot, strike, maturity, rate, vol).expect("valid contract");
    let put = call.with_kind(OptionKind::Put);
    let lhs = call.price() - put.price();
    let rhs = spot - strike * call.discount();
    println!("Put-Call Parity Check:");
    println!("  C - P          = {:.6}", lhs);
    println!("  S - K*e^(-rT)  = {:.6}", rhs);
    println!("  Difference:      {:.2e}\n", (lhs - rhs).abs());

    // Batch pricing across a spot ladder
    let n = 1_000_000;
    let spots: Array1<f64> = (0..n).map(|i| 50.0 + 100.0 * i as f64 / n as f64).collect();
    let vols = Array1::from_elem(n, vol);

    let mut timer = Timer::new();
    timer.start();
    let prices = price_batch(&spots, &vols, strike, maturity, rate, OptionKind::Call).expect("valid inputs");
    let elapsed = timer.elapsed_ms();

    println!("=== Batch Pricing ===\n");
    println!("Priced {} calls in {:.2} ms ({:.0} per second)", n, elapsed, n as f64 / (elapsed / 1000.0));
    println!("  S=50  → {:.4}", prices[0]);
    println!("  S=100 → {:.4}", prices[n / 2]);
    println!("  S≈150 → {:.4}", prices[n - 1]);
}
