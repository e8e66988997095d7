//! Black-Litterman posterior expected returns
//!
//! Blends a market-equilibrium prior with investor views:
//!
//!   mu = [(tau Sigma)^-1 + P' Omega^-1 P]^-1 [(tau Sigma)^-1 pi + P' Omega^-1 Q]
//!
//! The posterior covariance is Sigma + M with
//! M = [(tau Sigma)^-1 + P' Omega^-1 P]^-1, the estimation uncertainty
//! around the blended mean.

use crate::domain::allocation::matrix;
use crate::domain::allocation::views::ViewSet;
use crate::domain::errors::AllocationError;
use ndarray::{Array1, Array2};

/// Market-equilibrium prior: expected returns pi and covariance Sigma
#[derive(Debug, Clone, PartialEq)]
pub struct MarketPrior {
    pub returns: Array1<f64>,
    pub covariance: Array2<f64>,
}

impl MarketPrior {
    pub fn new(returns: Array1<f64>, covariance: Array2<f64>) -> Result<Self, AllocationError> {
        let n = returns.len();
        if n == 0 {
            return Err(AllocationError::EmptyUniverse);
        }
        if covariance.nrows() != covariance.ncols() {
            return Err(AllocationError::NotSquare {
                rows: covariance.nrows(),
                cols: covariance.ncols(),
            });
        }
        if covariance.nrows() != n {
            return Err(AllocationError::DimensionMismatch {
                what: "covariance matrix",
                expected: n,
                actual: covariance.nrows(),
            });
        }
        Ok(Self {
            returns,
            covariance,
        })
    }

    /// Build the prior by reverse optimization from market-cap weights
    pub fn from_equilibrium(
        covariance: Array2<f64>,
        market_weights: &Array1<f64>,
        risk_aversion: f64,
    ) -> Result<Self, AllocationError> {
        let pi = equilibrium_returns(&covariance, market_weights, risk_aversion)?;
        Self::new(pi, covariance)
    }

    pub fn n_assets(&self) -> usize {
        self.returns.len()
    }
}

/// Reverse optimization: pi = delta * Sigma * w_mkt
///
/// The returns the market must be expecting for the observed cap weights
/// to be the optimal mean-variance portfolio at risk aversion delta.
pub fn equilibrium_returns(
    covariance: &Array2<f64>,
    market_weights: &Array1<f64>,
    risk_aversion: f64,
) -> Result<Array1<f64>, AllocationError> {
    let n = market_weights.len();
    if n == 0 {
        return Err(AllocationError::EmptyUniverse);
    }
    if covariance.nrows() != n || covariance.ncols() != n {
        return Err(AllocationError::DimensionMismatch {
            what: "covariance matrix",
            expected: n,
            actual: covariance.nrows(),
        });
    }
    Ok(covariance.dot(market_weights) * risk_aversion)
}

/// Posterior distribution after blending in the views
#[derive(Debug, Clone, PartialEq)]
pub struct Posterior {
    pub expected_returns: Array1<f64>,
    pub covariance: Array2<f64>,
}

/// Compute the Black-Litterman posterior
///
/// With no views the posterior mean is the prior mean and the covariance
/// carries only the tau inflation term.
pub fn posterior(
    prior: &MarketPrior,
    views: &ViewSet,
    tau: f64,
) -> Result<Posterior, AllocationError> {
    if tau <= 0.0 {
        return Err(AllocationError::NonPositiveTau { value: tau });
    }
    let n = prior.n_assets();
    if views.n_assets() != n {
        return Err(AllocationError::DimensionMismatch {
            what: "view universe",
            expected: n,
            actual: views.n_assets(),
        });
    }

    let tau_sigma = prior.covariance.mapv(|v| v * tau);

    if views.is_empty() {
        return Ok(Posterior {
            expected_returns: prior.returns.clone(),
            covariance: &prior.covariance + &tau_sigma,
        });
    }

    let (p, q, omega) = views.matrices(&prior.covariance, tau)?;

    let tau_sigma_inv = matrix::invert(&tau_sigma)?;
    let omega_inv = matrix::invert(&omega)?;

    // Precision-weighted blend of prior and views
    let pt_omega_inv = p.t().dot(&omega_inv);
    let precision = &tau_sigma_inv + &pt_omega_inv.dot(&p);
    let uncertainty = matrix::invert(&precision)?;

    let weighted = tau_sigma_inv.dot(&prior.returns) + pt_omega_inv.dot(&q);
    let expected_returns = uncertainty.dot(&weighted);

    Ok(Posterior {
        expected_returns,
        covariance: &prior.covariance + &uncertainty,
    })
}
