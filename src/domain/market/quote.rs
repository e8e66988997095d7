use crate::domain::errors::MarketDataError;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Point-in-time snapshot of a listed instrument
///
/// Field names serialize in camelCase to stay compatible with the
/// platform's historical JSON shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockQuote {
    pub ticker: String,
    pub name: String,
    pub sector: String,
    pub price: Decimal,
    pub change: Decimal,
    pub change_percent: f64,
    pub volume: u64,
    pub market_cap: u64,
    pub pe: Option<f64>,
    pub dividend_yield: Option<f64>,
}

/// One daily OHLCV bar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyBar {
    pub date: NaiveDate,
    pub open: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub close: Decimal,
    pub volume: u64,
}

/// Streaming market event published by a data service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum MarketEvent {
    Quote {
        ticker: String,
        price: Decimal,
        timestamp: i64,
    },
    Bar(DailyBar),
}

/// Lookback window for historical bars
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HistoryPeriod {
    OneDay,
    FiveDays,
    OneMonth,
    ThreeMonths,
    SixMonths,
    OneYear,
    FiveYears,
}

impl HistoryPeriod {
    /// Number of daily bars the period spans
    pub fn days(&self) -> u32 {
        match self {
            HistoryPeriod::OneDay => 1,
            HistoryPeriod::FiveDays => 5,
            HistoryPeriod::OneMonth => 30,
            HistoryPeriod::ThreeMonths => 90,
            HistoryPeriod::SixMonths => 180,
            HistoryPeriod::OneYear => 365,
            HistoryPeriod::FiveYears => 1825,
        }
    }
}

impl FromStr for HistoryPeriod {
    type Err = MarketDataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "1d" => Ok(HistoryPeriod::OneDay),
            "5d" => Ok(HistoryPeriod::FiveDays),
            "1mo" => Ok(HistoryPeriod::OneMonth),
            "3mo" => Ok(HistoryPeriod::ThreeMonths),
            "6mo" => Ok(HistoryPeriod::SixMonths),
            "1y" => Ok(HistoryPeriod::OneYear),
            "5y" => Ok(HistoryPeriod::FiveYears),
            _ => Err(MarketDataError::InvalidPeriod {
                period: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for HistoryPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HistoryPeriod::OneDay => write!(f, "1d"),
            HistoryPeriod::FiveDays => write!(f, "5d"),
            HistoryPeriod::OneMonth => write!(f, "1mo"),
            HistoryPeriod::ThreeMonths => write!(f, "3mo"),
            HistoryPeriod::SixMonths => write!(f, "6mo"),
            HistoryPeriod::OneYear => write!(f, "1y"),
            HistoryPeriod::FiveYears => write!(f, "5y"),
        }
    }
}
