//! Option chain reporting
//!
//! Builds a priced chain around the spot with break-evens and
//! risk-neutral probabilities of profit for the at-the-money legs.

use crate::domain::errors::PricingError;
use crate::domain::options::{
    ChainEntry, Greeks, OptionContract, OptionKind, break_even, option_chain,
    probability_of_profit, put_call_parity_gap,
};
use serde::{Deserialize, Serialize};

/// Inputs for a chain report; strikes default to a +/-20% ladder in 5% steps
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainRequest {
    pub spot: f64,
    pub expiry_years: f64,
    pub risk_free_rate: f64,
    pub volatility: f64,
    #[serde(default)]
    pub dividend_yield: f64,
    #[serde(default)]
    pub strikes: Option<Vec<f64>>,
}

impl ChainRequest {
    fn strike_ladder(&self) -> Vec<f64> {
        match &self.strikes {
            Some(strikes) => strikes.clone(),
            None => (-4..=4)
                .map(|step| self.spot * (1.0 + 0.05 * step as f64))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionChainReport {
    pub spot: f64,
    pub expiry_years: f64,
    pub volatility: f64,
    pub entries: Vec<ChainEntry>,
    pub atm_call_break_even: f64,
    pub atm_put_break_even: f64,
    pub atm_call_pop: f64,
    pub atm_put_pop: f64,
    pub parity_gap: f64,
}

/// Price the chain and summarize the at-the-money row
pub fn build_chain(request: &ChainRequest) -> Result<OptionChainReport, PricingError> {
    let base = OptionContract::new(
        request.spot,
        request.spot,
        request.expiry_years,
        request.risk_free_rate,
        request.volatility,
    )
    .with_dividend_yield(request.dividend_yield);

    let strikes = request.strike_ladder();
    let entries = option_chain(&base, &strikes)?;

    // Nearest-to-spot row anchors the summary figures
    let atm = entries
        .iter()
        .min_by(|a, b| {
            let da = (a.strike - request.spot).abs();
            let db = (b.strike - request.spot).abs();
            da.partial_cmp(&db).expect("strikes are finite")
        })
        .ok_or(PricingError::EmptyStrikeLadder)?;

    let atm_contract = OptionContract {
        strike: atm.strike,
        ..base
    };
    let quote = crate::domain::options::price(&atm_contract)?;

    Ok(OptionChainReport {
        spot: request.spot,
        expiry_years: request.expiry_years,
        volatility: request.volatility,
        atm_call_break_even: break_even(atm.strike, atm.call, OptionKind::Call),
        atm_put_break_even: break_even(atm.strike, atm.put, OptionKind::Put),
        atm_call_pop: probability_of_profit(&atm_contract, atm.call, OptionKind::Call)?,
        atm_put_pop: probability_of_profit(&atm_contract, atm.put, OptionKind::Put)?,
        parity_gap: put_call_parity_gap(quote.call, quote.put, &atm_contract),
        entries,
    })
}

/// Plain-language reading of a Greeks block for terminal output
pub fn describe_greeks(greeks: &Greeks, kind: OptionKind) -> Vec<String> {
    let delta_line = match kind {
        OptionKind::Call => format!(
            "Delta: captures {:.1}% of the underlying's move",
            greeks.delta * 100.0
        ),
        OptionKind::Put => format!(
            "Delta: captures {:.1}% of the underlying's move (inverse)",
            greeks.delta.abs() * 100.0
        ),
    };
    vec![
        delta_line,
        format!("Gamma: delta shifts by {:.4} per $1 move", greeks.gamma),
        format!("Vega: price moves ${:.3} per 1% volatility change", greeks.vega),
        format!("Theta: loses ${:.3} per day to time decay", greeks.theta.abs()),
        format!("Rho: price moves ${:.3} per 1% rate change", greeks.rho),
    ]
}
