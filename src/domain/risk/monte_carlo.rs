//! Monte Carlo equity-path simulation
//!
//! Resamples a strategy's win-rate/payoff profile over many paths to
//! estimate the distribution of final equity and drawdowns. Iterations
//! are independent, so they fan out across cores with rayon.

use rand::Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonteCarloConfig {
    pub iterations: usize,
    pub steps: usize,
    pub initial_equity: f64,
    /// Probability a step is a winner
    pub win_rate: f64,
    /// Gain per winning step, as a fraction (0.02 = +2%)
    pub avg_win_pct: f64,
    /// Loss per losing step, as a positive fraction
    pub avg_loss_pct: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonteCarloResult {
    pub final_equity_mean: f64,
    pub final_equity_median: f64,
    pub percentile_5: f64,
    pub percentile_95: f64,
    pub probability_of_profit: f64,
    pub max_drawdown_mean: f64,
}

pub struct MonteCarloEngine;

impl MonteCarloEngine {
    pub fn simulate(config: &MonteCarloConfig) -> MonteCarloResult {
        let paths: Vec<(f64, f64)> = (0..config.iterations)
            .into_par_iter()
            .map(|_| Self::run_path(config))
            .collect();

        let mut final_equities: Vec<f64> = paths.iter().map(|(equity, _)| *equity).collect();
        final_equities.sort_by(|a, b| a.partial_cmp(b).expect("equity is never NaN"));

        let n = final_equities.len().max(1) as f64;
        let mean = final_equities.iter().sum::<f64>() / n;
        let profitable = final_equities
            .iter()
            .filter(|&&equity| equity > config.initial_equity)
            .count();
        let drawdown_mean = paths.iter().map(|(_, dd)| dd).sum::<f64>() / n;

        MonteCarloResult {
            final_equity_mean: mean,
            final_equity_median: percentile(&final_equities, 0.50),
            percentile_5: percentile(&final_equities, 0.05),
            percentile_95: percentile(&final_equities, 0.95),
            probability_of_profit: profitable as f64 / n,
            max_drawdown_mean: drawdown_mean,
        }
    }

    /// One path: returns (final equity, max drawdown fraction)
    fn run_path(config: &MonteCarloConfig) -> (f64, f64) {
        let mut rng = rand::rng();
        let mut equity = config.initial_equity;
        let mut peak = equity;
        let mut max_drawdown = 0.0;

        for _ in 0..config.steps {
            let pnl_pct = if rng.random_bool(config.win_rate) {
                config.avg_win_pct
            } else {
                -config.avg_loss_pct
            };
            equity *= 1.0 + pnl_pct;

            if equity > peak {
                peak = equity;
            } else if peak > 0.0 {
                let drawdown = (peak - equity) / peak;
                if drawdown > max_drawdown {
                    max_drawdown = drawdown;
                }
            }
        }

        (equity, max_drawdown)
    }
}

fn percentile(sorted: &[f64], p: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    let index = ((sorted.len() as f64 * p) as usize).min(sorted.len() - 1);
    sorted[index]
}
