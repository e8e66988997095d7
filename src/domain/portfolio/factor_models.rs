//! CAPM and Fama-French factor pricing

use serde::{Deserialize, Serialize};

/// Beta of an asset against the market: Cov(r_a, r_m) / Var(r_m)
///
/// Returns `None` when the series are misaligned, too short, or the
/// market shows no variance.
pub fn beta(asset_returns: &[f64], market_returns: &[f64]) -> Option<f64> {
    if asset_returns.len() != market_returns.len() || asset_returns.len() < 2 {
        return None;
    }
    let n = asset_returns.len() as f64;
    let asset_mean = asset_returns.iter().sum::<f64>() / n;
    let market_mean = market_returns.iter().sum::<f64>() / n;

    let mut covariance = 0.0;
    let mut market_variance = 0.0;
    for (a, m) in asset_returns.iter().zip(market_returns.iter()) {
        covariance += (a - asset_mean) * (m - market_mean);
        market_variance += (m - market_mean).powi(2);
    }

    if market_variance < 1e-12 {
        return None;
    }
    Some(covariance / market_variance)
}

/// CAPM: E[r] = r_f + beta * (r_m - r_f)
pub fn capm_expected_return(risk_free_rate: f64, beta: f64, market_return: f64) -> f64 {
    risk_free_rate + beta * (market_return - risk_free_rate)
}

/// Jensen's alpha: realized return minus the CAPM-required return
pub fn jensens_alpha(
    actual_return: f64,
    risk_free_rate: f64,
    beta: f64,
    market_return: f64,
) -> f64 {
    actual_return - capm_expected_return(risk_free_rate, beta, market_return)
}

/// Fama-French three-factor premiums
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FactorPremiums {
    /// Rm - Rf
    pub market_premium: f64,
    /// Small Minus Big (size)
    pub smb: f64,
    /// High Minus Low (value)
    pub hml: f64,
}

/// Exposures of one asset to the three factors
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FactorLoadings {
    pub market: f64,
    pub smb: f64,
    pub hml: f64,
}

impl FactorLoadings {
    /// R = Rf + b1 (Rm - Rf) + b2 SMB + b3 HML
    pub fn expected_return(&self, risk_free_rate: f64, premiums: &FactorPremiums) -> f64 {
        risk_free_rate
            + self.market * premiums.market_premium
            + self.smb * premiums.smb
            + self.hml * premiums.hml
    }
}
