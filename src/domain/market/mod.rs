pub mod news;
pub mod quote;

pub use news::{NewsArticle, NewsCategory, Sentiment};
pub use quote::{DailyBar, HistoryPeriod, MarketEvent, StockQuote};
