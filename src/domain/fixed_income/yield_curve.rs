//! Nelson-Siegel yield curve model
//!
//! y(tau) = b0 + b1 * f + b2 * (f - e^(-tau/lambda))
//! with f = (1 - e^(-tau/lambda)) / (tau/lambda)

use crate::domain::errors::BondError;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NelsonSiegelParams {
    /// Long-term level
    pub beta0: f64,
    /// Short-term component
    pub beta1: f64,
    /// Medium-term hump
    pub beta2: f64,
    /// Decay factor
    pub lambda: f64,
}

/// Yield at a single maturity
pub fn nelson_siegel_yield(maturity_years: f64, params: &NelsonSiegelParams) -> f64 {
    let NelsonSiegelParams {
        beta0,
        beta1,
        beta2,
        lambda,
    } = *params;

    if maturity_years == 0.0 {
        return beta0 + beta1;
    }

    let exp_term = (-maturity_years / lambda).exp();
    let factor = (1.0 - exp_term) / (maturity_years / lambda);

    beta0 + beta1 * factor + beta2 * (factor - exp_term)
}

/// One observed or generated point on the curve
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurvePoint {
    pub maturity: f64,
    #[serde(rename = "yield")]
    pub yield_rate: f64,
}

/// Evaluate the curve over a ladder of maturities
pub fn generate_curve(params: &NelsonSiegelParams, maturities: &[f64]) -> Vec<CurvePoint> {
    maturities
        .iter()
        .map(|&maturity| CurvePoint {
            maturity,
            yield_rate: nelson_siegel_yield(maturity, params),
        })
        .collect()
}

/// Heuristic Nelson-Siegel fit from observed yields
///
/// beta0 from the longest observed yield, beta1 from the short-end
/// deviation, beta2 from the hump, lambda fixed at a typical 2.5. A
/// proper fit would run Levenberg-Marquardt over all four parameters;
/// this matches the coarse calibration the platform's scenario curves
/// need.
pub fn fit_nelson_siegel(points: &[CurvePoint]) -> Result<NelsonSiegelParams, BondError> {
    if points.is_empty() {
        return Err(BondError::EmptyCurve);
    }

    let yields: Vec<f64> = points.iter().map(|p| p.yield_rate).collect();
    let beta0 = *yields.last().expect("points verified non-empty");
    let beta1 = yields[0] - beta0;
    let max_yield = yields.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

    Ok(NelsonSiegelParams {
        beta0,
        beta1,
        beta2: max_yield - beta0,
        lambda: 2.5,
    })
}

/// Canonical curve shapes used by the rate scenarios
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CurveScenario {
    Normal,
    Inverted,
    Flat,
    Humped,
}

impl CurveScenario {
    pub fn params(&self) -> NelsonSiegelParams {
        match self {
            CurveScenario::Normal => NelsonSiegelParams {
                beta0: 0.045,
                beta1: -0.015,
                beta2: 0.01,
                lambda: 2.5,
            },
            CurveScenario::Inverted => NelsonSiegelParams {
                beta0: 0.035,
                beta1: 0.02,
                beta2: -0.015,
                lambda: 2.0,
            },
            CurveScenario::Flat => NelsonSiegelParams {
                beta0: 0.04,
                beta1: 0.0,
                beta2: 0.0,
                lambda: 2.5,
            },
            CurveScenario::Humped => NelsonSiegelParams {
                beta0: 0.04,
                beta1: -0.01,
                beta2: 0.03,
                lambda: 1.5,
            },
        }
    }

    pub fn all() -> [CurveScenario; 4] {
        [
            CurveScenario::Normal,
            CurveScenario::Inverted,
            CurveScenario::Flat,
            CurveScenario::Humped,
        ]
    }
}

impl fmt::Display for CurveScenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CurveScenario::Normal => write!(f, "Normal (Upward Sloping)"),
            CurveScenario::Inverted => write!(f, "Inverted (Recession Signal)"),
            CurveScenario::Flat => write!(f, "Flat"),
            CurveScenario::Humped => write!(f, "Humped"),
        }
    }
}

impl std::str::FromStr for CurveScenario {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "normal" => Ok(CurveScenario::Normal),
            "inverted" => Ok(CurveScenario::Inverted),
            "flat" => Ok(CurveScenario::Flat),
            "humped" => Ok(CurveScenario::Humped),
            _ => anyhow::bail!(
                "Invalid curve scenario: {}. Must be 'normal', 'inverted', 'flat' or 'humped'",
                s
            ),
        }
    }
}
