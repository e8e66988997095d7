//! Credit spread analysis and duration immunization

use crate::domain::errors::BondError;
use crate::domain::fixed_income::bond::{Bond, macaulay_duration};
use serde::{Deserialize, Serialize};

/// Decomposition of a corporate yield over the risk-free rate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditSpreadAnalysis {
    pub risk_free_rate: f64,
    pub credit_spread: f64,
    pub corporate_yield: f64,
    pub probability_of_default: f64,
    pub loss_given_default: f64,
    pub expected_loss: f64,
}

/// Reduced-form read of a credit spread: spread ~= PD x LGD
pub fn analyze_credit_spread(
    risk_free_rate: f64,
    corporate_yield: f64,
    loss_given_default: f64,
) -> CreditSpreadAnalysis {
    let credit_spread = corporate_yield - risk_free_rate;
    let probability_of_default = credit_spread / loss_given_default;

    CreditSpreadAnalysis {
        risk_free_rate,
        credit_spread,
        corporate_yield,
        probability_of_default,
        loss_given_default,
        expected_loss: probability_of_default * loss_given_default,
    }
}

/// Rebalancing advice for matching portfolio duration to a horizon
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImmunizationPlan {
    pub target_duration: f64,
    pub current_duration: f64,
    pub duration_gap: f64,
    pub rebalance_needed: bool,
    pub suggested_weights: Vec<f64>,
}

const REBALANCE_THRESHOLD_YEARS: f64 = 0.1;

/// Immunize a bond portfolio against rate moves
///
/// Computes the weighted portfolio duration; for a two-bond portfolio
/// outside the threshold it solves w1 D1 + w2 D2 = D_target, w1 + w2 = 1
/// (clamped long-only). Larger portfolios keep their weights and only
/// report the gap.
pub fn immunize(
    bonds: &[Bond],
    weights: &[f64],
    target_duration: f64,
    yields: &[f64],
) -> Result<ImmunizationPlan, BondError> {
    if bonds.len() != weights.len() {
        return Err(BondError::LengthMismatch {
            what: "weights",
            expected: bonds.len(),
            actual: weights.len(),
        });
    }
    if bonds.len() != yields.len() {
        return Err(BondError::LengthMismatch {
            what: "yields",
            expected: bonds.len(),
            actual: yields.len(),
        });
    }

    let durations: Vec<f64> = bonds
        .iter()
        .zip(yields.iter())
        .map(|(bond, &y)| macaulay_duration(bond, y))
        .collect();

    let current_duration = weights
        .iter()
        .zip(durations.iter())
        .map(|(w, d)| w * d)
        .sum::<f64>();

    let duration_gap = (current_duration - target_duration).abs();
    let rebalance_needed = duration_gap > REBALANCE_THRESHOLD_YEARS;

    let mut suggested_weights = weights.to_vec();
    if bonds.len() == 2 && rebalance_needed {
        let d1 = durations[0];
        let d2 = durations[1];
        if (d2 - d1).abs() > 1e-9 {
            let w1 = ((d2 - target_duration) / (d2 - d1)).clamp(0.0, 1.0);
            suggested_weights = vec![w1, 1.0 - w1];
        }
    }

    Ok(ImmunizationPlan {
        target_duration,
        current_duration,
        duration_gap,
        rebalance_needed,
        suggested_weights,
    })
}
