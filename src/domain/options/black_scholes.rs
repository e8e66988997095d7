//! Black-Scholes pricing for European options
//!
//! Closed-form pricing with continuous dividend yield, full Greeks on both
//! sides, and an implied-volatility solver. Model assumptions:
//! - European exercise (expiry only)
//! - Constant risk-free rate and volatility
//! - Log-normal asset price distribution
//! - No transaction costs, continuous trading

use crate::domain::errors::PricingError;
use serde::{Deserialize, Serialize};
use statrs::distribution::{Continuous, ContinuousCDF, Normal};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionKind {
    Call,
    Put,
}

impl fmt::Display for OptionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionKind::Call => write!(f, "call"),
            OptionKind::Put => write!(f, "put"),
        }
    }
}

/// Pricing inputs for a European option
///
/// Rates and yields are annualized decimals (0.05 = 5%), expiry is in years.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OptionContract {
    pub spot: f64,
    pub strike: f64,
    pub expiry_years: f64,
    pub risk_free_rate: f64,
    pub volatility: f64,
    pub dividend_yield: f64,
}

impl OptionContract {
    pub fn new(
        spot: f64,
        strike: f64,
        expiry_years: f64,
        risk_free_rate: f64,
        volatility: f64,
    ) -> Self {
        Self {
            spot,
            strike,
            expiry_years,
            risk_free_rate,
            volatility,
            dividend_yield: 0.0,
        }
    }

    pub fn with_dividend_yield(mut self, dividend_yield: f64) -> Self {
        self.dividend_yield = dividend_yield;
        self
    }

    fn validate(&self) -> Result<(), PricingError> {
        if self.spot <= 0.0 {
            return Err(PricingError::NonPositiveSpot { value: self.spot });
        }
        if self.strike <= 0.0 {
            return Err(PricingError::NonPositiveStrike { value: self.strike });
        }
        if self.expiry_years <= 0.0 {
            return Err(PricingError::NonPositiveExpiry {
                value: self.expiry_years,
            });
        }
        if self.volatility <= 0.0 {
            return Err(PricingError::NonPositiveVolatility {
                value: self.volatility,
            });
        }
        Ok(())
    }
}

/// Option sensitivities
///
/// Conventions: theta is per calendar day, vega and rho are per one
/// percentage point move in volatility / rates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Greeks {
    pub delta: f64,
    pub gamma: f64,
    pub vega: f64,
    pub theta: f64,
    pub rho: f64,
}

/// Both legs of the pricing result for one strike/expiry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionQuote {
    pub call: f64,
    pub put: f64,
    pub call_greeks: Greeks,
    pub put_greeks: Greeks,
    pub d1: f64,
    pub d2: f64,
    pub intrinsic_call: f64,
    pub intrinsic_put: f64,
    pub time_value_call: f64,
    pub time_value_put: f64,
}

impl OptionQuote {
    pub fn premium(&self, kind: OptionKind) -> f64 {
        match kind {
            OptionKind::Call => self.call,
            OptionKind::Put => self.put,
        }
    }

    pub fn greeks(&self, kind: OptionKind) -> &Greeks {
        match kind {
            OptionKind::Call => &self.call_greeks,
            OptionKind::Put => &self.put_greeks,
        }
    }
}

fn std_normal() -> Normal {
    Normal::new(0.0, 1.0).expect("standard normal has valid parameters")
}

/// Price a European option and its Greeks
///
/// call = S e^(-qT) N(d1) - K e^(-rT) N(d2)
/// put  = K e^(-rT) N(-d2) - S e^(-qT) N(-d1)
/// with d1 = [ln(S/K) + (r - q + sigma^2/2) T] / (sigma sqrt(T)), d2 = d1 - sigma sqrt(T)
pub fn price(contract: &OptionContract) -> Result<OptionQuote, PricingError> {
    contract.validate()?;

    let OptionContract {
        spot: s,
        strike: k,
        expiry_years: t,
        risk_free_rate: r,
        volatility: sigma,
        dividend_yield: q,
    } = *contract;

    let normal = std_normal();
    let sqrt_t = t.sqrt();
    let d1 = ((s / k).ln() + (r - q + 0.5 * sigma * sigma) * t) / (sigma * sqrt_t);
    let d2 = d1 - sigma * sqrt_t;

    let nd1 = normal.cdf(d1);
    let nd2 = normal.cdf(d2);
    let n_md1 = normal.cdf(-d1);
    let n_md2 = normal.cdf(-d2);
    let pdf_d1 = normal.pdf(d1);

    let discount = (-r * t).exp();
    let carry = (-q * t).exp();

    let call = s * carry * nd1 - k * discount * nd2;
    let put = k * discount * n_md2 - s * carry * n_md1;

    let intrinsic_call = (s - k).max(0.0);
    let intrinsic_put = (k - s).max(0.0);

    // Gamma and vega are identical for call and put
    let gamma = carry * pdf_d1 / (s * sigma * sqrt_t);
    let vega = s * carry * pdf_d1 * sqrt_t / 100.0;

    let call_greeks = Greeks {
        delta: carry * nd1,
        gamma,
        vega,
        theta: (-(s * pdf_d1 * sigma * carry) / (2.0 * sqrt_t) - r * k * discount * nd2
            + q * s * carry * nd1)
            / 365.0,
        rho: k * t * discount * nd2 / 100.0,
    };

    let put_greeks = Greeks {
        delta: carry * (nd1 - 1.0),
        gamma,
        vega,
        theta: (-(s * pdf_d1 * sigma * carry) / (2.0 * sqrt_t) + r * k * discount * n_md2
            - q * s * carry * n_md1)
            / 365.0,
        rho: -k * t * discount * n_md2 / 100.0,
    };

    Ok(OptionQuote {
        call,
        put,
        call_greeks,
        put_greeks,
        d1,
        d2,
        intrinsic_call,
        intrinsic_put,
        time_value_call: call - intrinsic_call,
        time_value_put: put - intrinsic_put,
    })
}

const IV_MAX_ITERATIONS: usize = 100;
const IV_TOLERANCE: f64 = 1e-6;
const IV_MIN: f64 = 0.01;
const IV_MAX: f64 = 5.0;

/// Solve for the volatility implied by an observed market price
///
/// Newton-Raphson on vega. The contract's `volatility` field is ignored;
/// the solver seeds itself with the at-the-money approximation
/// sigma ~= sqrt(2 pi / T) * (price / S).
pub fn implied_volatility(
    market_price: f64,
    contract: &OptionContract,
    kind: OptionKind,
) -> Result<f64, PricingError> {
    let seed = (2.0 * std::f64::consts::PI / contract.expiry_years).sqrt()
        * (market_price / contract.spot);
    let mut sigma = seed.clamp(IV_MIN, IV_MAX);

    for _ in 0..IV_MAX_ITERATIONS {
        let trial = OptionContract {
            volatility: sigma,
            ..*contract
        };
        let quote = price(&trial)?;
        let model_price = quote.premium(kind);
        let vega = quote.greeks(kind).vega;

        let diff = model_price - market_price;
        if diff.abs() < IV_TOLERANCE {
            return Ok(sigma);
        }

        if vega == 0.0 {
            return Err(PricingError::ZeroVega { sigma });
        }

        // vega is quoted per 1% move, rescale to a plain derivative
        sigma = (sigma - diff / (vega * 100.0)).clamp(IV_MIN, IV_MAX);
    }

    Err(PricingError::ImpliedVolDidNotConverge {
        iterations: IV_MAX_ITERATIONS,
    })
}

/// Put-call parity residual: |(C - P) - (S e^(-qT) - K e^(-rT))|
///
/// Should be ~0 for consistently priced European options.
pub fn put_call_parity_gap(call: f64, put: f64, contract: &OptionContract) -> f64 {
    let lhs = call - put;
    let rhs = contract.spot * (-contract.dividend_yield * contract.expiry_years).exp()
        - contract.strike * (-contract.risk_free_rate * contract.expiry_years).exp();
    (lhs - rhs).abs()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn atm_contract() -> OptionContract {
        // At-the-money, 3 months, 5% rate, 25% vol
        OptionContract::new(150.0, 150.0, 0.25, 0.05, 0.25)
    }

    #[test]
    fn test_atm_call_and_put_positive() {
        let quote = price(&atm_contract()).unwrap();
        assert!(quote.call > 0.0);
        assert!(quote.put > 0.0);
        // ATM: all value is time value
        assert_eq!(quote.intrinsic_call, 0.0);
        assert_eq!(quote.intrinsic_put, 0.0);
    }

    #[test]
    fn test_reference_values() {
        // Classic textbook case: S=100, K=100, T=1, r=5%, sigma=20%
        let quote = price(&OptionContract::new(100.0, 100.0, 1.0, 0.05, 0.2)).unwrap();
        assert!(
            (quote.call - 10.4506).abs() < 1e-3,
            "call was {}",
            quote.call
        );
        assert!((quote.put - 5.5735).abs() < 1e-3, "put was {}", quote.put);
    }

    #[test]
    fn test_delta_bounds() {
        let quote = price(&atm_contract()).unwrap();
        assert!(quote.call_greeks.delta > 0.0 && quote.call_greeks.delta < 1.0);
        assert!(quote.put_greeks.delta > -1.0 && quote.put_greeks.delta < 0.0);
        // Without dividends: call delta - put delta = 1
        assert!((quote.call_greeks.delta - quote.put_greeks.delta - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_gamma_vega_shared_and_positive() {
        let quote = price(&atm_contract()).unwrap();
        assert!(quote.call_greeks.gamma > 0.0);
        assert_eq!(quote.call_greeks.gamma, quote.put_greeks.gamma);
        assert_eq!(quote.call_greeks.vega, quote.put_greeks.vega);
    }

    #[test]
    fn test_parity_holds() {
        let contract = OptionContract::new(180.0, 200.0, 0.5, 0.04, 0.30);
        let quote = price(&contract).unwrap();
        assert!(put_call_parity_gap(quote.call, quote.put, &contract) < 1e-9);
    }

    #[test]
    fn test_parity_holds_with_dividends() {
        let contract = OptionContract::new(250.0, 300.0, 1.0, 0.045, 0.50).with_dividend_yield(0.02);
        let quote = price(&contract).unwrap();
        assert!(put_call_parity_gap(quote.call, quote.put, &contract) < 1e-9);
    }

    #[test]
    fn test_invalid_inputs_rejected() {
        let bad_spot = OptionContract::new(0.0, 100.0, 1.0, 0.05, 0.2);
        assert!(matches!(
            price(&bad_spot),
            Err(PricingError::NonPositiveSpot { .. })
        ));

        let bad_vol = OptionContract::new(100.0, 100.0, 1.0, 0.05, 0.0);
        assert!(matches!(
            price(&bad_vol),
            Err(PricingError::NonPositiveVolatility { .. })
        ));

        let bad_expiry = OptionContract::new(100.0, 100.0, -0.1, 0.05, 0.2);
        assert!(matches!(
            price(&bad_expiry),
            Err(PricingError::NonPositiveExpiry { .. })
        ));
    }

    #[test]
    fn test_implied_vol_roundtrip() {
        let contract = OptionContract::new(100.0, 110.0, 0.75, 0.05, 0.35);
        let quote = price(&contract).unwrap();

        let iv_call = implied_volatility(quote.call, &contract, OptionKind::Call).unwrap();
        assert!((iv_call - 0.35).abs() < 1e-4, "iv was {}", iv_call);

        let iv_put = implied_volatility(quote.put, &contract, OptionKind::Put).unwrap();
        assert!((iv_put - 0.35).abs() < 1e-4, "iv was {}", iv_put);
    }

    #[test]
    fn test_deep_itm_call_approaches_forward_intrinsic() {
        let quote = price(&OptionContract::new(200.0, 50.0, 0.25, 0.05, 0.2)).unwrap();
        // Deep ITM call: premium ~ S - K e^(-rT), delta ~ 1
        let forward_intrinsic = 200.0 - 50.0 * (-0.05f64 * 0.25).exp();
        assert!((quote.call - forward_intrinsic).abs() < 0.01);
        assert!(quote.call_greeks.delta > 0.999);
    }
}
