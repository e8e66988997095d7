//! Option chain construction and position analytics
//!
//! Moneyness classification, break-even levels, worst/best case per
//! position, risk-neutral probability of profit, and chain generation
//! over a strike ladder.

use crate::domain::errors::PricingError;
use crate::domain::options::black_scholes::{self, OptionContract, OptionKind};
use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF, Normal};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Moneyness {
    InTheMoney,
    AtTheMoney,
    OutOfTheMoney,
}

impl fmt::Display for Moneyness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Moneyness::InTheMoney => write!(f, "ITM"),
            Moneyness::AtTheMoney => write!(f, "ATM"),
            Moneyness::OutOfTheMoney => write!(f, "OTM"),
        }
    }
}

/// Classify moneyness from the call side, with a 2% at-the-money band
pub fn moneyness(spot: f64, strike: f64) -> Moneyness {
    let ratio = spot / strike;
    if (ratio - 1.0).abs() < 0.02 {
        Moneyness::AtTheMoney
    } else if ratio > 1.0 {
        Moneyness::InTheMoney
    } else {
        Moneyness::OutOfTheMoney
    }
}

/// Break-even underlying price at expiry for a long position
pub fn break_even(strike: f64, premium: f64, kind: OptionKind) -> f64 {
    match kind {
        OptionKind::Call => strike + premium,
        OptionKind::Put => strike - premium,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PositionSide {
    Long,
    Short,
}

/// Bound on profit or loss for an option position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfitBound {
    Unlimited,
    Limited(f64),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskProfile {
    pub max_profit: ProfitBound,
    pub max_loss: ProfitBound,
}

/// Worst and best case at expiry for a single-leg position
pub fn risk_profile(
    strike: f64,
    premium: f64,
    side: PositionSide,
    kind: OptionKind,
) -> RiskProfile {
    match (side, kind) {
        (PositionSide::Long, OptionKind::Call) => RiskProfile {
            max_profit: ProfitBound::Unlimited,
            max_loss: ProfitBound::Limited(premium),
        },
        (PositionSide::Long, OptionKind::Put) => RiskProfile {
            max_profit: ProfitBound::Limited(strike - premium),
            max_loss: ProfitBound::Limited(premium),
        },
        (PositionSide::Short, OptionKind::Call) => RiskProfile {
            max_profit: ProfitBound::Limited(premium),
            max_loss: ProfitBound::Unlimited,
        },
        (PositionSide::Short, OptionKind::Put) => RiskProfile {
            max_profit: ProfitBound::Limited(premium),
            max_loss: ProfitBound::Limited(strike - premium),
        },
    }
}

/// Probability of a long position finishing past break-even at expiry
///
/// Call: P(S_T > K + premium). Put: P(S_T < K - premium). Measured under
/// the risk-neutral lognormal terminal distribution.
pub fn probability_of_profit(
    contract: &OptionContract,
    premium: f64,
    kind: OptionKind,
) -> Result<f64, PricingError> {
    let level = break_even(contract.strike, premium, kind);
    if level <= 0.0 {
        // Put premium at or above strike: profitable everywhere
        return Ok(match kind {
            OptionKind::Call => 0.0,
            OptionKind::Put => 1.0,
        });
    }

    let OptionContract {
        spot: s,
        expiry_years: t,
        risk_free_rate: r,
        volatility: sigma,
        dividend_yield: q,
        ..
    } = *contract;

    if sigma <= 0.0 {
        return Err(PricingError::NonPositiveVolatility { value: sigma });
    }
    if t <= 0.0 {
        return Err(PricingError::NonPositiveExpiry { value: t });
    }

    let normal = Normal::new(0.0, 1.0).expect("standard normal has valid parameters");
    let d = ((s / level).ln() + (r - q + 0.5 * sigma * sigma) * t) / (sigma * t.sqrt());

    Ok(match kind {
        OptionKind::Call => normal.cdf(d),
        OptionKind::Put => normal.cdf(-d),
    })
}

/// One strike row of an option chain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainEntry {
    pub strike: f64,
    pub call: f64,
    pub put: f64,
    pub call_delta: f64,
    pub put_delta: f64,
    pub call_iv: f64,
    pub put_iv: f64,
    pub moneyness: Moneyness,
}

/// Price the chain over the given strike ladder
///
/// Each entry reprices the contract at that strike; the contract's own
/// strike field is ignored.
pub fn option_chain(
    contract: &OptionContract,
    strikes: &[f64],
) -> Result<Vec<ChainEntry>, PricingError> {
    strikes
        .iter()
        .map(|&strike| {
            let leg = OptionContract { strike, ..*contract };
            let quote = black_scholes::price(&leg)?;
            Ok(ChainEntry {
                strike,
                call: quote.call,
                put: quote.put,
                call_delta: quote.call_greeks.delta,
                put_delta: quote.put_greeks.delta,
                call_iv: contract.volatility,
                put_iv: contract.volatility,
                moneyness: moneyness(contract.spot, strike),
            })
        })
        .collect()
}
