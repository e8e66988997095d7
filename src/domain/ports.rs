use crate::domain::market::{DailyBar, HistoryPeriod, MarketEvent, NewsArticle, StockQuote};
use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::mpsc::Receiver;

/// Source of quotes and historical bars
#[async_trait]
pub trait MarketDataService: Send + Sync {
    async fn get_quote(&self, ticker: &str) -> Result<StockQuote>;
    async fn get_quotes(&self, tickers: &[String]) -> Result<Vec<StockQuote>>;
    async fn get_history(&self, ticker: &str, period: HistoryPeriod) -> Result<Vec<DailyBar>>;
    /// Stream live quote events for the given tickers
    async fn subscribe(&self, tickers: Vec<String>) -> Result<Receiver<MarketEvent>>;
}

/// Source of market news articles
#[async_trait]
pub trait NewsFeedService: Send + Sync {
    /// Most recent articles, newest first
    async fn latest(&self, limit: usize) -> Result<Vec<NewsArticle>>;
    /// Stream articles as they are published
    async fn subscribe_news(&self) -> Result<Receiver<NewsArticle>>;
}
