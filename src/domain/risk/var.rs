//! Value-at-Risk estimators
//!
//! Historical simulation, parametric (variance-covariance), and
//! conditional VaR (expected shortfall). Returns are period returns as
//! decimals; results are reported as positive loss numbers.

use crate::domain::errors::RiskError;
use statrs::distribution::{ContinuousCDF, Normal};

fn sorted(returns: &[f64]) -> Vec<f64> {
    let mut v = returns.to_vec();
    v.sort_by(|a, b| a.partial_cmp(b).expect("returns must not contain NaN"));
    v
}

/// Historical VaR: the loss at the (1 - confidence) quantile of observed returns
///
/// `None` for an empty series.
pub fn historical_var(returns: &[f64], confidence: f64) -> Result<Option<f64>, RiskError> {
    validate_confidence(confidence)?;
    if returns.is_empty() {
        return Ok(None);
    }
    let sorted = sorted(returns);
    let index = ((1.0 - confidence) * sorted.len() as f64).floor() as usize;
    let index = index.min(sorted.len() - 1);
    Ok(Some(-sorted[index]))
}

/// Conditional VaR (expected shortfall): mean loss beyond the VaR cutoff
pub fn conditional_var(returns: &[f64], confidence: f64) -> Result<Option<f64>, RiskError> {
    validate_confidence(confidence)?;
    if returns.is_empty() {
        return Ok(None);
    }
    let sorted = sorted(returns);
    let index = ((1.0 - confidence) * sorted.len() as f64).floor() as usize;
    let index = index.min(sorted.len() - 1);
    let tail = &sorted[..=index];
    let avg_tail = tail.iter().sum::<f64>() / tail.len() as f64;
    Ok(Some(-avg_tail))
}

/// Parametric VaR in currency terms over a horizon
///
/// VaR = -V * (mu - z_c * sigma * sqrt(t)) with z_c from the normal
/// inverse CDF, so any confidence level in (0, 1) is supported.
pub fn parametric_var(
    portfolio_value: f64,
    expected_return: f64,
    std_dev: f64,
    confidence: f64,
    horizon_periods: f64,
) -> Result<f64, RiskError> {
    validate_confidence(confidence)?;

    let normal = Normal::new(0.0, 1.0).expect("standard normal has valid parameters");
    let z = normal.inverse_cdf(confidence);

    let var_return = expected_return - z * std_dev * horizon_periods.sqrt();
    Ok(-portfolio_value * var_return)
}

fn validate_confidence(confidence: f64) -> Result<(), RiskError> {
    if confidence <= 0.0 || confidence >= 1.0 {
        return Err(RiskError::InvalidConfidence { value: confidence });
    }
    Ok(())
}
