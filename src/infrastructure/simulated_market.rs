//! Simulated market data provider
//!
//! Generates plausible quotes, OHLCV history and a streaming quote feed
//! for a fixed ticker universe, with no network I/O. Quotes swing within
//! +/-5% of each instrument's base price; history is a random walk with a
//! small daily drift in the base level.

use crate::domain::errors::MarketDataError;
use crate::domain::market::{DailyBar, HistoryPeriod, MarketEvent, StockQuote};
use crate::domain::ports::MarketDataService;
use anyhow::Result;
use async_trait::async_trait;
use chrono::{Duration as ChronoDuration, Utc};
use rand::Rng;
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use std::time::Duration;
use tokio::sync::mpsc::{self, Receiver};
use tracing::info;

struct TickerInfo {
    ticker: &'static str,
    name: &'static str,
    sector: &'static str,
    base_price: f64,
}

/// The instruments the simulator knows about: the real-estate universe the
/// platform ships with, plus the large caps the news feed references.
const UNIVERSE: &[TickerInfo] = &[
    TickerInfo { ticker: "293940", name: "Shinhan Alpha REIT", sector: "Real Estate", base_price: 9850.0 },
    TickerInfo { ticker: "377190", name: "E-REITs Kocref", sector: "Real Estate", base_price: 7200.0 },
    TickerInfo { ticker: "338100", name: "NH Prime REIT", sector: "Real Estate", base_price: 9200.0 },
    TickerInfo { ticker: "VNQ", name: "Vanguard Real Estate ETF", sector: "Real Estate", base_price: 82.50 },
    TickerInfo { ticker: "SCHH", name: "Schwab US REIT ETF", sector: "Real Estate", base_price: 54.30 },
    TickerInfo { ticker: "IYR", name: "iShares US Real Estate ETF", sector: "Real Estate", base_price: 180.45 },
    TickerInfo { ticker: "AAPL", name: "Apple Inc.", sector: "Technology", base_price: 228.0 },
    TickerInfo { ticker: "MSFT", name: "Microsoft Corporation", sector: "Technology", base_price: 415.0 },
    TickerInfo { ticker: "NVDA", name: "NVIDIA Corporation", sector: "Technology", base_price: 131.0 },
    TickerInfo { ticker: "GOOGL", name: "Alphabet Inc.", sector: "Technology", base_price: 168.0 },
    TickerInfo { ticker: "JPM", name: "JPMorgan Chase & Co.", sector: "Financials", base_price: 210.0 },
    TickerInfo { ticker: "XOM", name: "Exxon Mobil Corporation", sector: "Energy", base_price: 118.0 },
];

fn lookup(ticker: &str) -> Result<&'static TickerInfo, MarketDataError> {
    UNIVERSE
        .iter()
        .find(|info| info.ticker == ticker)
        .ok_or_else(|| MarketDataError::UnknownTicker {
            ticker: ticker.to_string(),
        })
}

fn to_money(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or(Decimal::ZERO).round_dp(2)
}

/// In-process market data simulator
#[derive(Debug, Clone)]
pub struct SimulatedMarketData {
    tick_interval: Duration,
}

impl SimulatedMarketData {
    pub fn new(tick_interval: Duration) -> Self {
        Self { tick_interval }
    }

    /// Every ticker the simulator can quote
    pub fn universe() -> Vec<String> {
        UNIVERSE.iter().map(|info| info.ticker.to_string()).collect()
    }

    fn generate_quote(info: &TickerInfo) -> StockQuote {
        let mut rng = rand::rng();

        let change_percent = rng.random_range(-5.0..=5.0);
        let change = info.base_price * change_percent / 100.0;
        let price = info.base_price + change;

        StockQuote {
            ticker: info.ticker.to_string(),
            name: info.name.to_string(),
            sector: info.sector.to_string(),
            price: to_money(price),
            change: to_money(change),
            change_percent: (change_percent * 100.0).round() / 100.0,
            volume: rng.random_range(1_000_000..=50_000_000),
            market_cap: rng.random_range(1_000_000_000..=50_000_000_000),
            pe: Some((rng.random_range(10.0_f64..=30.0) * 100.0).round() / 100.0),
            dividend_yield: Some((rng.random_range(2.0_f64..=6.0) * 100.0).round() / 100.0),
        }
    }

    fn generate_history(info: &TickerInfo, days: u32) -> Vec<DailyBar> {
        let mut rng = rand::rng();
        let mut base = info.base_price;
        let today = Utc::now().date_naive();
        let mut bars = Vec::with_capacity(days as usize);

        for i in (1..=days).rev() {
            let date = today - ChronoDuration::days(i as i64);

            let open = base + rng.random_range(-5.0..=5.0);
            let close = base + rng.random_range(-5.0..=5.0);
            let high = open.max(close) + rng.random_range(0.0..=2.0);
            let low = open.min(close) - rng.random_range(0.0..=2.0);

            bars.push(DailyBar {
                date,
                open: to_money(open),
                high: to_money(high),
                low: to_money(low),
                close: to_money(close),
                volume: rng.random_range(1_000_000..=50_000_000),
            });

            // Small drift in the base level, kept positive
            base = (base + rng.random_range(-1.0..=1.0)).max(10.0);
        }

        bars
    }
}

impl Default for SimulatedMarketData {
    fn default() -> Self {
        Self::new(Duration::from_millis(500))
    }
}

#[async_trait]
impl MarketDataService for SimulatedMarketData {
    async fn get_quote(&self, ticker: &str) -> Result<StockQuote> {
        let info = lookup(ticker)?;
        Ok(Self::generate_quote(info))
    }

    async fn get_quotes(&self, tickers: &[String]) -> Result<Vec<StockQuote>> {
        tickers
            .iter()
            .map(|ticker| {
                let info = lookup(ticker)?;
                Ok(Self::generate_quote(info))
            })
            .collect()
    }

    async fn get_history(&self, ticker: &str, period: HistoryPeriod) -> Result<Vec<DailyBar>> {
        let info = lookup(ticker)?;
        Ok(Self::generate_history(info, period.days()))
    }

    async fn subscribe(&self, tickers: Vec<String>) -> Result<Receiver<MarketEvent>> {
        // Validate up front so a typo fails at subscription, not mid-stream
        let infos: Vec<&'static TickerInfo> = tickers
            .iter()
            .map(|t| lookup(t))
            .collect::<Result<_, _>>()?;

        let (tx, rx) = mpsc::channel(100);
        let tick_interval = self.tick_interval;

        tokio::spawn(async move {
            let mut prices: Vec<f64> = infos.iter().map(|info| info.base_price).collect();
            let mut interval = tokio::time::interval(tick_interval);
            info!("Simulated feed started for {:?}", tickers);

            loop {
                interval.tick().await;

                // Walk all prices first: the rng handle is thread-local and
                // must not live across an await point.
                let events: Vec<MarketEvent> = {
                    let mut rng = rand::rng();
                    infos
                        .iter()
                        .zip(prices.iter_mut())
                        .map(|(info, price)| {
                            // -0.5% to +0.5% per tick
                            let change_pct = rng.random_range(-0.005..=0.005);
                            *price *= 1.0 + change_pct;
                            MarketEvent::Quote {
                                ticker: info.ticker.to_string(),
                                price: to_money(*price),
                                timestamp: Utc::now().timestamp_millis(),
                            }
                        })
                        .collect()
                };

                for event in events {
                    if tx.send(event).await.is_err() {
                        info!("Subscriber dropped, stopping simulated feed");
                        return;
                    }
                }
            }
        });

        Ok(rx)
    }
}
