//! Mean-variance portfolio arithmetic and a max-Sharpe weight search
//!
//! The optimizer is a projected finite-difference gradient ascent over the
//! simplex: long-only, weights renormalized to sum to one each step. For
//! the universe sizes this platform works with (a handful of tickers) it
//! converges well inside the default iteration budget.

use ndarray::Array2;
use serde::{Deserialize, Serialize};

/// Expected portfolio return: w' mu
pub fn portfolio_return(weights: &[f64], expected_returns: &[f64]) -> f64 {
    weights
        .iter()
        .zip(expected_returns.iter())
        .map(|(w, r)| w * r)
        .sum()
}

/// Portfolio variance: w' Sigma w
pub fn portfolio_variance(weights: &[f64], covariance: &Array2<f64>) -> f64 {
    let n = weights.len();
    let mut variance = 0.0;
    for i in 0..n {
        for j in 0..n {
            variance += weights[i] * weights[j] * covariance[[i, j]];
        }
    }
    variance
}

pub fn portfolio_volatility(weights: &[f64], covariance: &Array2<f64>) -> f64 {
    portfolio_variance(weights, covariance).max(0.0).sqrt()
}

/// Sharpe ratio: (r_p - r_f) / sigma_p, zero when volatility vanishes
pub fn sharpe_ratio(portfolio_return: f64, risk_free_rate: f64, volatility: f64) -> f64 {
    if volatility <= 0.0 {
        return 0.0;
    }
    (portfolio_return - risk_free_rate) / volatility
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MaxSharpeConfig {
    pub iterations: usize,
    pub learning_rate: f64,
    pub fd_step: f64,
}

impl Default for MaxSharpeConfig {
    fn default() -> Self {
        Self {
            iterations: 100,
            learning_rate: 0.01,
            fd_step: 1e-4,
        }
    }
}

/// Search for the long-only maximum-Sharpe portfolio
///
/// Starts from equal weights and climbs the Sharpe surface with a
/// finite-difference gradient, clamping at zero and renormalizing after
/// every step. Returns equal weights for an empty gradient (e.g. a flat
/// surface).
pub fn max_sharpe_weights(
    expected_returns: &[f64],
    covariance: &Array2<f64>,
    risk_free_rate: f64,
    config: &MaxSharpeConfig,
) -> Vec<f64> {
    let n = expected_returns.len();
    if n == 0 {
        return Vec::new();
    }
    let mut weights = vec![1.0 / n as f64; n];

    let sharpe_of = |w: &[f64]| {
        let ret = portfolio_return(w, expected_returns);
        let vol = portfolio_volatility(w, covariance);
        sharpe_ratio(ret, risk_free_rate, vol)
    };

    for _ in 0..config.iterations {
        let current = sharpe_of(&weights);

        let gradients: Vec<f64> = (0..n)
            .map(|i| {
                let mut bumped = weights.clone();
                bumped[i] += config.fd_step;
                let sum: f64 = bumped.iter().sum();
                for w in bumped.iter_mut() {
                    *w /= sum;
                }
                (sharpe_of(&bumped) - current) / config.fd_step
            })
            .collect();

        for (w, g) in weights.iter_mut().zip(gradients.iter()) {
            *w = (*w + config.learning_rate * g).max(0.0);
        }

        let sum: f64 = weights.iter().sum();
        if sum <= 0.0 {
            // Everything clamped to zero, restart from the center
            weights = vec![1.0 / n as f64; n];
            continue;
        }
        for w in weights.iter_mut() {
            *w /= sum;
        }
    }

    weights
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::arr2;

    #[test]
    fn test_portfolio_return_and_variance() {
        let cov = arr2(&[[0.04, 0.0], [0.0, 0.01]]);
        let weights = [0.5, 0.5];

        let ret = portfolio_return(&weights, &[0.10, 0.06]);
        assert!((ret - 0.08).abs() < 1e-12);

        let var = portfolio_variance(&weights, &cov);
        assert!((var - 0.0125).abs() < 1e-12);
    }

    #[test]
    fn test_sharpe_zero_volatility() {
        assert_eq!(sharpe_ratio(0.1, 0.02, 0.0), 0.0);
    }

    #[test]
    fn test_max_sharpe_prefers_dominant_asset() {
        // Asset 0: higher return, same risk as asset 1. Strictly dominant.
        let returns = [0.12, 0.04];
        let cov = arr2(&[[0.04, 0.0], [0.0, 0.04]]);

        let weights = max_sharpe_weights(&returns, &cov, 0.02, &MaxSharpeConfig::default());

        let sum: f64 = weights.iter().sum();
        assert!((sum - 1.0).abs() < 1e-9);
        assert!(weights.iter().all(|&w| w >= 0.0));
        assert!(
            weights[0] > weights[1],
            "dominant asset underweighted: {:?}",
            weights
        );
    }

    #[test]
    fn test_max_sharpe_beats_equal_weights() {
        let returns = [0.11, 0.05, 0.08];
        let cov = arr2(&[
            [0.050, 0.010, 0.004],
            [0.010, 0.030, 0.002],
            [0.004, 0.002, 0.020],
        ]);
        let rf = 0.02;

        let weights = max_sharpe_weights(&returns, &cov, rf, &MaxSharpeConfig::default());
        let optimized = sharpe_ratio(
            portfolio_return(&weights, &returns),
            rf,
            portfolio_volatility(&weights, &cov),
        );

        let equal = [1.0 / 3.0; 3];
        let baseline = sharpe_ratio(
            portfolio_return(&equal, &returns),
            rf,
            portfolio_volatility(&equal, &cov),
        );

        assert!(
            optimized >= baseline,
            "optimizer regressed: {} < {}",
            optimized,
            baseline
        );
    }

    #[test]
    fn test_empty_universe() {
        let cov = Array2::<f64>::zeros((0, 0));
        assert!(max_sharpe_weights(&[], &cov, 0.02, &MaxSharpeConfig::default()).is_empty());
    }
}
