//! End-to-end Black-Litterman allocation workflow
//!
//! Pulls history for a ticker universe, estimates the annualized return
//! covariance, reverse-optimizes the equilibrium prior from market-cap
//! weights, blends in investor views, and hands the posterior to the
//! max-Sharpe search.

use crate::domain::allocation::{MarketPrior, View, ViewSet, posterior};
use crate::domain::market::HistoryPeriod;
use crate::domain::portfolio::{
    MaxSharpeConfig, max_sharpe_weights, portfolio_return, portfolio_volatility, sharpe_ratio,
};
use crate::domain::ports::MarketDataService;
use crate::domain::stats;
use anyhow::{Context, Result, bail};
use ndarray::Array1;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info};

/// One entry of the TOML views file: either absolute or relative
#[derive(Debug, Clone, Deserialize)]
struct ViewEntry {
    asset: Option<String>,
    long: Option<String>,
    short: Option<String>,
    expected_return: Option<f64>,
    spread: Option<f64>,
    variance: Option<f64>,
}

/// Views file shape:
///
/// ```toml
/// tau = 0.05
/// risk_aversion = 2.5
///
/// [[views]]
/// asset = "VNQ"
/// expected_return = 0.07
///
/// [[views]]
/// long = "AAPL"
/// short = "MSFT"
/// spread = 0.02
/// variance = 0.001
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ViewsFile {
    pub tau: Option<f64>,
    pub risk_aversion: Option<f64>,
    #[serde(default)]
    views: Vec<ViewEntry>,
}

impl ViewsFile {
    pub fn from_toml(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("Failed to parse views TOML")
    }

    /// Resolve ticker names to universe indices
    fn resolve(&self, tickers: &[String]) -> Result<ViewSet> {
        let index_of = |name: &str| -> Result<usize> {
            tickers
                .iter()
                .position(|t| t == name)
                .with_context(|| format!("View references unknown ticker: {}", name))
        };

        let mut views = ViewSet::new(tickers.len());
        for entry in &self.views {
            let view = match (&entry.asset, &entry.long, &entry.short) {
                (Some(asset), None, None) => View::Absolute {
                    asset: index_of(asset)?,
                    expected_return: entry
                        .expected_return
                        .context("Absolute view requires expected_return")?,
                    variance: entry.variance,
                },
                (None, Some(long), Some(short)) => View::Relative {
                    long: index_of(long)?,
                    short: index_of(short)?,
                    spread: entry.spread.context("Relative view requires spread")?,
                    variance: entry.variance,
                },
                _ => bail!(
                    "A view must set either 'asset' (absolute) or 'long' and 'short' (relative)"
                ),
            };
            views.push(view)?;
        }
        Ok(views)
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationReport {
    pub tickers: Vec<String>,
    pub market_weights: Vec<f64>,
    pub prior_returns: Vec<f64>,
    pub posterior_returns: Vec<f64>,
    pub weights: Vec<f64>,
    pub expected_return: f64,
    pub volatility: f64,
    pub sharpe: f64,
    pub tau: f64,
    pub risk_aversion: f64,
    pub observations: usize,
}

pub struct AllocationEngine {
    market: Arc<dyn MarketDataService>,
    pub risk_free_rate: f64,
    pub tau: f64,
    pub risk_aversion: f64,
}

const MIN_OBSERVATIONS: usize = 20;

impl AllocationEngine {
    pub fn new(
        market: Arc<dyn MarketDataService>,
        risk_free_rate: f64,
        tau: f64,
        risk_aversion: f64,
    ) -> Self {
        Self {
            market,
            risk_free_rate,
            tau,
            risk_aversion,
        }
    }

    /// Run the full workflow for a ticker universe
    pub async fn run(
        &self,
        tickers: &[String],
        period: HistoryPeriod,
        views_file: &ViewsFile,
    ) -> Result<AllocationReport> {
        if tickers.is_empty() {
            bail!("Allocation requires at least one ticker");
        }
        let tau = views_file.tau.unwrap_or(self.tau);
        let risk_aversion = views_file.risk_aversion.unwrap_or(self.risk_aversion);

        // Daily log-return series per asset, aligned to the shortest history
        let mut series: Vec<Vec<f64>> = Vec::with_capacity(tickers.len());
        for ticker in tickers {
            let bars = self
                .market
                .get_history(ticker, period)
                .await
                .with_context(|| format!("Failed to load history for {}", ticker))?;
            let closes: Vec<f64> = bars
                .iter()
                .filter_map(|bar| bar.close.to_f64())
                .collect();
            series.push(stats::log_returns(&closes));
        }

        let min_len = series.iter().map(|s| s.len()).min().unwrap_or(0);
        if min_len < MIN_OBSERVATIONS {
            bail!(
                "Not enough history: need at least {} return observations, got {}",
                MIN_OBSERVATIONS,
                min_len
            );
        }
        for s in series.iter_mut() {
            s.truncate(min_len);
        }
        debug!("Aligned {} return observations per asset", min_len);

        let covariance = stats::covariance_matrix(&series)
            .context("Failed to estimate the return covariance matrix")?
            .mapv(|v| v * stats::TRADING_DAYS);

        // Market-cap weights anchor the equilibrium prior
        let quotes = self.market.get_quotes(tickers).await?;
        let caps: Vec<f64> = quotes.iter().map(|q| q.market_cap as f64).collect();
        let total_cap: f64 = caps.iter().sum();
        if total_cap <= 0.0 {
            bail!("Market capitalizations sum to zero");
        }
        let market_weights: Vec<f64> = caps.iter().map(|c| c / total_cap).collect();

        let prior = MarketPrior::from_equilibrium(
            covariance.clone(),
            &Array1::from(market_weights.clone()),
            risk_aversion,
        )?;

        let views = views_file.resolve(tickers)?;
        info!(
            "Blending {} view(s) at tau={}, delta={}",
            views.len(),
            tau,
            risk_aversion
        );
        let post = posterior(&prior, &views, tau)?;

        let posterior_returns = post.expected_returns.to_vec();
        let weights = max_sharpe_weights(
            &posterior_returns,
            &post.covariance,
            self.risk_free_rate,
            &MaxSharpeConfig::default(),
        );

        let expected_return = portfolio_return(&weights, &posterior_returns);
        let volatility = portfolio_volatility(&weights, &post.covariance);

        Ok(AllocationReport {
            tickers: tickers.to_vec(),
            market_weights,
            prior_returns: prior.returns.to_vec(),
            posterior_returns,
            weights,
            expected_return,
            volatility,
            sharpe: sharpe_ratio(expected_return, self.risk_free_rate, volatility),
            tau,
            risk_aversion,
            observations: min_len,
        })
    }
}
