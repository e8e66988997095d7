use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of item flowing through the news feed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NewsCategory {
    News,
    MarketUpdate,
    AnalystReport,
}

impl fmt::Display for NewsCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NewsCategory::News => write!(f, "News"),
            NewsCategory::MarketUpdate => write!(f, "Market Update"),
            NewsCategory::AnalystReport => write!(f, "Analyst Report"),
        }
    }
}

/// Headline sentiment label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

impl Sentiment {
    /// Classify a compound score in [-1, 1]
    ///
    /// - score > 0.3: positive
    /// - score < -0.3: negative
    /// - otherwise neutral
    pub fn from_compound(score: f64) -> Self {
        if score > 0.3 {
            Sentiment::Positive
        } else if score < -0.3 {
            Sentiment::Negative
        } else {
            Sentiment::Neutral
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sentiment::Positive => write!(f, "positive"),
            Sentiment::Neutral => write!(f, "neutral"),
            Sentiment::Negative => write!(f, "negative"),
        }
    }
}

/// A single article in the market news feed
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsArticle {
    pub id: String,
    #[serde(rename = "type")]
    pub category: NewsCategory,
    #[serde(rename = "title")]
    pub headline: String,
    pub summary: Option<String>,
    pub source: String,
    pub sector: String,
    pub sentiment: Sentiment,
    pub url: String,
    pub published_at: DateTime<Utc>,
    pub related_tickers: Vec<String>,
}
