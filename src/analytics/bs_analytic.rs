// src/analytics/bs_analytic.rs
//! Analytical Black-Scholes formulas for European options and Greeks
//!
//! # Mathematical Foundation
//!
//! Under the Black-Scholes model, the underlying asset follows:
//! ```text
//! dS_t = r S_t dt + σ S_t dW_t
//! ```
//!
//! The risk-neutral pricing formula gives:
//! ```text
//! V(S,t) = e^(-r(T-t)) * E^Q[payoff(S_T) | S_t = S]
//! ```
//!
//! For European options this has closed-form solutions involving the
//! cumulative normal distribution function Φ(x). Calls and puts share one
//! formula per quantity, weighted by the payoff sign ω (+1 call, −1 put):
//! ```text
//! V = ω * [S*Φ(ω d₁) - K*e^(-rT)*Φ(ω d₂)]
//! ```

use crate::error::{validation::*, BsError, BsResult};
use crate::math_utils::{norm_cdf, norm_pdf};
use ndarray::{Array1, Zip};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Option kind (Call or Put)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OptionKind {
    Call,
    Put,
}

impl OptionKind {
    /// Payoff sign ω: +1 for call, -1 for put
    pub fn sign(self) -> f64 {
        match self {
            OptionKind::Call => 1.0,
            OptionKind::Put => -1.0,
        }
    }

    /// Intrinsic value at given spot
    pub fn intrinsic(self, spot: f64, strike: f64) -> f64 {
        (self.sign() * (spot - strike)).max(0.0)
    }
}

impl fmt::Display for OptionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionKind::Call => write!(f, "call"),
            OptionKind::Put => write!(f, "put"),
        }
    }
}

impl FromStr for OptionKind {
    type Err = BsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "call" | "c" => Ok(OptionKind::Call),
            "put" | "p" => Ok(OptionKind::Put),
            other => Err(BsError::config(
                "kind",
                format!("expected 'call' or 'put', got '{}'", other),
            )),
        }
    }
}

/// Option Greeks (first-order sensitivities plus gamma)
///
/// Units are the raw partial derivatives: theta per year, vega per unit of
/// volatility, rho per unit of rate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Greeks {
    /// ∂V/∂S
    pub delta: f64,
    /// ∂²V/∂S²
    pub gamma: f64,
    /// ∂V/∂t
    pub theta: f64,
    /// ∂V/∂σ
    pub vega: f64,
    /// ∂V/∂r
    pub rho: f64,
}

impl Greeks {
    /// Greeks as (label, value) pairs in display order
    pub fn labelled(&self) -> [(&'static str, f64); 5] {
        [
            ("Delta", self.delta),
            ("Gamma", self.gamma),
            ("Theta", self.theta),
            ("Vega", self.vega),
            ("Rho", self.rho),
        ]
    }
}

/// Price and Greeks of one contract evaluation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub kind: OptionKind,
    pub price: f64,
    pub greeks: Greeks,
}

/// European option contract under Black-Scholes
///
/// Fields are private; the only way to obtain a contract is through the
/// validating constructors, so every instance satisfies S, K, T, σ > 0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OptionContract {
    spot: f64,
    strike: f64,
    maturity: f64,
    rate: f64,
    volatility: f64,
    kind: OptionKind,
}

impl OptionContract {
    /// Create a validated contract
    ///
    /// # Errors
    ///
    /// `BsError::InvalidParameters` when spot, strike, maturity or volatility
    /// is not strictly positive, or the rate is not finite.
    pub fn new(
        spot: f64,
        strike: f64,
        maturity: f64,
        rate: f64,
        volatility: f64,
        kind: OptionKind,
    ) -> BsResult<Self> {
        validate_positive("spot", spot)?;
        validate_positive("strike", strike)?;
        validate_positive("maturity", maturity)?;
        validate_finite("rate", rate)?;
        validate_positive("volatility", volatility)?;

        Ok(OptionContract {
            spot,
            strike,
            maturity,
            rate,
            volatility,
            kind,
        })
    }

    pub fn call(spot: f64, strike: f64, maturity: f64, rate: f64, volatility: f64) -> BsResult<Self> {
        Self::new(spot, strike, maturity, rate, volatility, OptionKind::Call)
    }

    pub fn put(spot: f64, strike: f64, maturity: f64, rate: f64, volatility: f64) -> BsResult<Self> {
        Self::new(spot, strike, maturity, rate, volatility, OptionKind::Put)
    }

    /// Same contract with the other payoff kind
    pub fn with_kind(self, kind: OptionKind) -> Self {
        OptionContract { kind, ..self }
    }

    pub fn spot(&self) -> f64 {
        self.spot
    }

    pub fn strike(&self) -> f64 {
        self.strike
    }

    pub fn maturity(&self) -> f64 {
        self.maturity
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }

    pub fn volatility(&self) -> f64 {
        self.volatility
    }

    pub fn kind(&self) -> OptionKind {
        self.kind
    }

    /// Discount factor e^(-rT)
    pub fn discount(&self) -> f64 {
        (-self.rate * self.maturity).exp()
    }

    /// Standardized moneyness d₁
    ///
    /// # Formula
    /// ```text
    /// d₁ = [ln(S/K) + (r + σ²/2)T] / (σ√T)
    /// ```
    pub fn d1(&self) -> f64 {
        let sigma = self.volatility;
        ((self.spot / self.strike).ln() + (self.rate + 0.5 * sigma * sigma) * self.maturity)
            / (sigma * self.maturity.sqrt())
    }

    /// d₂ = d₁ - σ√T
    pub fn d2(&self) -> f64 {
        self.d1() - self.volatility * self.maturity.sqrt()
    }

    /// Black-Scholes European option price
    ///
    /// # Formula
    /// ```text
    /// C = S*Φ(d₁) - K*e^(-rT)*Φ(d₂)
    /// P = K*e^(-rT)*Φ(-d₂) - S*Φ(-d₁)
    /// ```
    pub fn price(&self) -> f64 {
        let w = self.kind.sign();
        let (d1, d2) = (self.d1(), self.d2());
        w * (self.spot * norm_cdf(w * d1) - self.strike * self.discount() * norm_cdf(w * d2))
    }

    /// Black-Scholes Greeks
    ///
    /// # Formulas
    /// ```text
    /// Δ = Φ(d₁)                                   (call)   -Φ(-d₁)   (put)
    /// Γ = φ(d₁) / (S σ √T)                        (both)
    /// Θ = -S φ(d₁) σ / (2√T) - ω r K e^(-rT) Φ(ω d₂)
    /// ν = S φ(d₁) √T                              (both)
    /// ρ = ω K T e^(-rT) Φ(ω d₂)
    /// ```
    pub fn greeks(&self) -> Greeks {
        let w = self.kind.sign();
        let (d1, d2) = (self.d1(), self.d2());
        let sqrt_t = self.maturity.sqrt();
        let pdf_d1 = norm_pdf(d1);
        let df = self.discount();

        let delta = w * norm_cdf(w * d1);
        let gamma = pdf_d1 / (self.spot * self.volatility * sqrt_t);
        let theta = -(self.spot * pdf_d1 * self.volatility) / (2.0 * sqrt_t)
            - w * self.rate * self.strike * df * norm_cdf(w * d2);
        let vega = self.spot * pdf_d1 * sqrt_t;
        let rho = w * self.strike * self.maturity * df * norm_cdf(w * d2);

        Greeks {
            delta,
            gamma,
            theta,
            vega,
            rho,
        }
    }

    /// Price and Greeks together
    pub fn quote(&self) -> Quote {
        Quote {
            kind: self.kind,
            price: self.price(),
            greeks: self.greeks(),
        }
    }
}

impl Default for OptionContract {
    /// S=100, K=100, T=1, r=0.05, σ=0.2, call
    fn default() -> Self {
        OptionContract {
            spot: 100.0,
            strike: 100.0,
            maturity: 1.0,
            rate: 0.05,
            volatility: 0.2,
            kind: OptionKind::Call,
        }
    }
}

/// Black-Scholes price of a validated contract
pub fn price(contract: &OptionContract) -> f64 {
    contract.price()
}

/// Black-Scholes Greeks of a validated contract
pub fn greeks(contract: &OptionContract) -> Greeks {
    contract.greeks()
}

/// Price many (spot, volatility) pairs sharing strike, maturity, rate and kind
///
/// Elements are evaluated in parallel; the output is aligned with the inputs.
///
/// # Errors
///
/// - `InvalidConfiguration` if `spots` and `vols` differ in length
/// - `InvalidParameters` for the first element that fails contract validation
/// - `NumericalInstability` if any price is not finite
pub fn price_batch(
    spots: &Array1<f64>,
    vols: &Array1<f64>,
    strike: f64,
    maturity: f64,
    rate: f64,
    kind: OptionKind,
) -> BsResult<Array1<f64>> {
    if spots.len() != vols.len() {
        return Err(BsError::config(
            "vols",
            format!(
                "length {} does not match spots length {}",
                vols.len(),
                spots.len()
            ),
        ));
    }

    let priced = Zip::from(spots)
        .and(vols)
        .par_map_collect(|&s, &v| OptionContract::new(s, strike, maturity, rate, v, kind).map(|c| c.price()));

    let prices = priced.into_raw_vec().into_iter().collect::<BsResult<Vec<f64>>>()?;

    if let Some(idx) = prices.iter().position(|p| !p.is_finite()) {
        return Err(BsError::NumericalInstability {
            method: "price_batch".to_string(),
            reason: format!("non-finite price at index {}", idx),
        });
    }

    Ok(Array1::from(prices))
}
