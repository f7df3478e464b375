// tests/greeks_test.rs
use bs_greeks::analytics::bs_analytic::{self, OptionContract, OptionKind};

fn reference_call() -> OptionContract {
    OptionContract::call(100.0, 100.0, 1.0, 0.05, 0.20).expect("valid contract")
}

/// Grid of valid contracts covering deep ITM/OTM, short/long dated, low/high vol
fn contract_grid() -> Vec<OptionContract> {
    let mut grid = Vec::new();
    for &s in &[50.0, 90.0, 100.0, 110.0, 200.0] {
        for &k in &[80.0, 100.0, 125.0] {
            for &t in &[0.01, 0.25, 1.0, 5.0] {
                for &r in &[-0.01, 0.0, 0.05] {
                    for &sigma in &[0.05, 0.2, 0.8] {
                        grid.push(OptionContract::call(s, k, t, r, sigma).unwrap());
                    }
                }
            }
        }
    }
    grid
}

#[test]
fn test_bs_call_price_analytic() {
    let contract = reference_call();
    let price = bs_analytic::price(&contract);
    let expected_price = 10.450583572185565;

    println!("\nAnalytic Call Price: {}", price);
    println!("Expected Call Price: {}", expected_price);

    assert!((price - expected_price).abs() < 1e-9, "Call price off: {}", price);
    assert!((price - 10.4506).abs() < 1e-4);
}

#[test]
fn test_bs_put_price_analytic() {
    let put = reference_call().with_kind(OptionKind::Put);
    let price = bs_analytic::price(&put);
    let via_parity = 10.450583572185565 - 100.0 + 100.0 * (-0.05f64).exp();

    println!("\nAnalytic Put Price: {}", price);
    println!("Put via parity: {}", via_parity);

    assert!((price - via_parity).abs() < 1e-9);
    assert!((price - 5.5735).abs() < 1e-4);
}

#[test]
fn test_bs_call_greeks_analytic() {
    let g = bs_analytic::greeks(&reference_call());

    let expected = [
        ("Delta", g.delta, 0.636830651175619),
        ("Gamma", g.gamma, 0.018762017345847),
        ("Theta", g.theta, -6.414027546438197),
        ("Vega", g.vega, 37.524034691693792),
        ("Rho", g.rho, 53.232481545376345),
    ];

    for (name, got, want) in expected {
        let rel_error = ((got - want) / want).abs();
        println!("{}: analytic {} expected {} (rel err {:.2e})", name, got, want, rel_error);
        assert!(rel_error < 1e-7, "Relative error for {} exceeds tolerance: {}", name, rel_error);
    }
}

#[test]
fn test_bs_put_greeks_analytic() {
    let g = bs_analytic::greeks(&reference_call().with_kind(OptionKind::Put));

    // Put greeks from the call values via parity: Δp = Δc - 1, ρp = ρc - K T e^(-rT),
    // Θp = Θc + r K e^(-rT)
    let df = (-0.05f64).exp();
    assert!((g.delta - (0.636830651175619 - 1.0)).abs() < 1e-9);
    assert!((g.gamma - 0.018762017345847).abs() < 1e-9);
    assert!((g.vega - 37.524034691693792).abs() < 1e-7);
    assert!((g.theta - (-6.414027546438197 + 0.05 * 100.0 * df)).abs() < 1e-7);
    assert!((g.rho - (53.232481545376345 - 100.0 * df)).abs() < 1e-7);
}

#[test]
fn test_put_call_parity() {
    let mut worst = 0.0f64;
    for call in contract_grid() {
        let put = call.with_kind(OptionKind::Put);
        let lhs = call.price() - put.price();
        let rhs = call.spot() - call.strike() * call.discount();
        worst = worst.max((lhs - rhs).abs());
    }
    println!("\nWorst parity violation over grid: {:.3e}", worst);
    assert!(worst < 1e-6, "Put-call parity violated by {}", worst);
}

#[test]
fn test_monotone_in_spot() {
    for &kind in &[OptionKind::Call, OptionKind::Put] {
        let prices: Vec<f64> = (1..=60)
            .map(|i| {
                let s = 40.0 + 2.5 * i as f64;
                OptionContract::new(s, 100.0, 0.5, 0.03, 0.25, kind).unwrap().price()
            })
            .collect();
        for w in prices.windows(2) {
            match kind {
                OptionKind::Call => assert!(w[1] >= w[0] - 1e-12, "call not increasing in spot: {:?}", w),
                OptionKind::Put => assert!(w[1] <= w[0] + 1e-12, "put not decreasing in spot: {:?}", w),
            }
        }
    }
}

#[test]
fn test_monotone_in_volatility() {
    for &kind in &[OptionKind::Call, OptionKind::Put] {
        for &s in &[80.0, 100.0, 120.0] {
            let prices: Vec<f64> = (1..=50)
                .map(|i| OptionContract::new(s, 100.0, 1.0, 0.05, 0.02 * i as f64, kind).unwrap().price())
                .collect();
            for w in prices.windows(2) {
                assert!(w[1] >= w[0] - 1e-12, "{:?} price decreasing in vol at S={}: {:?}", kind, s, w);
            }
        }
    }
}

#[test]
fn test_short_maturity_limit() {
    for &kind in &[OptionKind::Call, OptionKind::Put] {
        for &(s, k) in &[(110.0, 100.0), (90.0, 100.0), (100.0, 100.0)] {
            let c = OptionContract::new(s, k, 1e-10, 0.05, 0.2, kind).unwrap();
            let intrinsic = kind.intrinsic(s, k);
            println!("T→0: {} S={} K={} price={} intrinsic={}", kind, s, k, c.price(), intrinsic);
            assert!((c.price() - intrinsic).abs() < 1e-3);
        }
    }
}

#[test]
fn test_low_volatility_limit() {
    let (r, t) = (0.05, 1.0);
    for &(s, k) in &[(110.0, 100.0), (90.0, 100.0), (100.0, 100.0)] {
        let c = OptionContract::call(s, k, t, r, 1e-6).unwrap();
        let bound = (s - k * (-r * t).exp()).max(0.0);
        println!("σ→0: S={} K={} price={} bound={}", s, k, c.price(), bound);
        assert!((c.price() - bound).abs() < 1e-6);
    }
}

#[test]
fn test_delta_bounds() {
    for call in contract_grid() {
        let dc = call.greeks().delta;
        let dp = call.with_kind(OptionKind::Put).greeks().delta;
        assert!((0.0..=1.0).contains(&dc), "call delta {} out of [0,1] for {:?}", dc, call);
        assert!((-1.0..=0.0).contains(&dp), "put delta {} out of [-1,0] for {:?}", dp, call);
    }
}

#[test]
fn test_greeks_match_finite_differences() {
    let base = OptionContract::call(105.0, 100.0, 0.75, 0.04, 0.3).unwrap();
    let g = base.greeks();
    let h = 1e-4;

    let bump = |s: f64, t: f64, r: f64, v: f64| OptionContract::call(s, 100.0, t, r, v).unwrap().price();
    let (s, t, r, v) = (105.0, 0.75, 0.04, 0.3);

    let fd_delta = (bump(s + h, t, r, v) - bump(s - h, t, r, v)) / (2.0 * h);
    let fd_gamma = (bump(s + h, t, r, v) - 2.0 * base.price() + bump(s - h, t, r, v)) / (h * h);
    let fd_vega = (bump(s, t, r, v + h) - bump(s, t, r, v - h)) / (2.0 * h);
    let fd_rho = (bump(s, t, r + h, v) - bump(s, t, r - h, v)) / (2.0 * h);
    // Theta is dV/dt = -dV/dT
    let fd_theta = -(bump(s, t + h, r, v) - bump(s, t - h, r, v)) / (2.0 * h);

    println!("\nDelta {} vs FD {}", g.delta, fd_delta);
    println!("Gamma {} vs FD {}", g.gamma, fd_gamma);
    println!("Vega  {} vs FD {}", g.vega, fd_vega);
    println!("Rho   {} vs FD {}", g.rho, fd_rho);
    println!("Theta {} vs FD {}", g.theta, fd_theta);

    assert!((g.delta - fd_delta).abs() < 1e-6);
    assert!((g.gamma - fd_gamma).abs() < 1e-4);
    assert!((g.vega - fd_vega).abs() < 1e-5);
    assert!((g.rho - fd_rho).abs() < 1e-5);
    assert!((g.theta - fd_theta).abs() < 1e-5);
}

#[test]
fn test_domain_errors() {
    assert!(OptionContract::call(100.0, 100.0, 0.0, 0.05, 0.2).unwrap_err().is_domain_error());
    assert!(OptionContract::put(100.0, 100.0, 1.0, 0.05, -0.2).unwrap_err().is_domain_error());
    assert!(OptionContract::put(-100.0, 100.0, 1.0, 0.05, 0.2).is_err());
    assert!(OptionContract::call(100.0, 0.0, 1.0, 0.05, 0.2).is_err());
}
