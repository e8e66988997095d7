//! Simulated market news feed
//!
//! Serves a rotating pool of realistic headlines with no network I/O.
//! Sentiment labels are not hardcoded: every article is scored through the
//! VADER-based analyzer on the way out.

use crate::domain::market::{NewsArticle, NewsCategory};
use crate::domain::ports::NewsFeedService;
use crate::infrastructure::sentiment::HeadlineAnalyzer;
use anyhow::Result;
use chrono::{Duration as ChronoDuration, Utc};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::{self, Receiver};
use tracing::info;
use uuid::Uuid;

struct HeadlineTemplate {
    category: NewsCategory,
    headline: &'static str,
    summary: Option<&'static str>,
    source: &'static str,
    sector: &'static str,
    url: &'static str,
    related_tickers: &'static [&'static str],
}

const HEADLINES: &[HeadlineTemplate] = &[
    HeadlineTemplate {
        category: NewsCategory::News,
        headline: "Real Estate Sector Shows Strong Recovery in Q4",
        summary: None,
        source: "Financial Times",
        sector: "real-estate",
        url: "https://ft.com/news/1",
        related_tickers: &["VNQ", "SCHH", "IYR"],
    },
    HeadlineTemplate {
        category: NewsCategory::MarketUpdate,
        headline: "Interest Rates Hold Steady at 3.5%",
        summary: None,
        source: "Bloomberg",
        sector: "all",
        url: "https://bloomberg.com/news/2",
        related_tickers: &[],
    },
    HeadlineTemplate {
        category: NewsCategory::AnalystReport,
        headline: "REIT Valuations Attractive at Current Levels",
        summary: None,
        source: "Goldman Sachs",
        sector: "real-estate",
        url: "https://goldmansachs.com/news/3",
        related_tickers: &["VNQ", "IYR"],
    },
    HeadlineTemplate {
        category: NewsCategory::News,
        headline: "Commercial Real Estate Trends: Office Space Demand Down",
        summary: None,
        source: "Reuters",
        sector: "real-estate",
        url: "https://reuters.com/news/4",
        related_tickers: &["IYR"],
    },
    HeadlineTemplate {
        category: NewsCategory::News,
        headline: "Residential Property Prices Continue Upward Trend",
        summary: None,
        source: "MarketWatch",
        sector: "real-estate",
        url: "https://marketwatch.com/news/5",
        related_tickers: &["VNQ"],
    },
    HeadlineTemplate {
        category: NewsCategory::News,
        headline: "Fed Signals Potential Rate Cut in Q2",
        summary: Some(
            "Federal Reserve officials hint at possible monetary easing amid cooling \
             inflation data and stable employment figures.",
        ),
        source: "Bloomberg",
        sector: "all",
        url: "https://bloomberg.com/news/6",
        related_tickers: &["JPM"],
    },
    HeadlineTemplate {
        category: NewsCategory::News,
        headline: "Tech Giants Report Record AI Infrastructure Spending",
        summary: Some(
            "Hyperscalers announce combined $150B investment in AI data centers, \
             boosting semiconductor demand.",
        ),
        source: "WSJ",
        sector: "technology",
        url: "https://wsj.com/news/7",
        related_tickers: &["MSFT", "GOOGL", "NVDA"],
    },
    HeadlineTemplate {
        category: NewsCategory::News,
        headline: "Oil Prices Surge on Supply Cut Extension, Raising Inflation Concerns",
        summary: Some(
            "Crude hits $95/barrel as producers extend output cuts through Q3.",
        ),
        source: "Reuters",
        sector: "energy",
        url: "https://reuters.com/news/8",
        related_tickers: &["XOM"],
    },
];

/// In-process news feed simulator
pub struct SimulatedNewsFeed {
    analyzer: Arc<HeadlineAnalyzer>,
    publish_interval: Duration,
}

impl SimulatedNewsFeed {
    pub fn new(publish_interval: Duration) -> Self {
        Self {
            analyzer: Arc::new(HeadlineAnalyzer::new()),
            publish_interval,
        }
    }

    fn build_article(analyzer: &HeadlineAnalyzer, template: &HeadlineTemplate, minutes_ago: i64) -> NewsArticle {
        NewsArticle {
            id: Uuid::new_v4().to_string(),
            category: template.category,
            headline: template.headline.to_string(),
            summary: template.summary.map(|s| s.to_string()),
            source: template.source.to_string(),
            sector: template.sector.to_string(),
            sentiment: analyzer.classify(template.headline, template.summary),
            url: template.url.to_string(),
            published_at: Utc::now() - ChronoDuration::minutes(minutes_ago),
            related_tickers: template
                .related_tickers
                .iter()
                .map(|t| t.to_string())
                .collect(),
        }
    }
}

impl Default for SimulatedNewsFeed {
    fn default() -> Self {
        Self::new(Duration::from_secs(15))
    }
}

#[async_trait::async_trait]
impl NewsFeedService for SimulatedNewsFeed {
    async fn latest(&self, limit: usize) -> Result<Vec<NewsArticle>> {
        // Stagger publication times so the feed reads naturally, newest first
        let mut articles: Vec<NewsArticle> = HEADLINES
            .iter()
            .take(limit)
            .enumerate()
            .map(|(i, template)| {
                Self::build_article(&self.analyzer, template, 5 + 12 * i as i64)
            })
            .collect();
        articles.sort_by(|a, b| b.published_at.cmp(&a.published_at));
        Ok(articles)
    }

    async fn subscribe_news(&self) -> Result<Receiver<NewsArticle>> {
        let (tx, rx) = mpsc::channel(100);
        let analyzer = Arc::clone(&self.analyzer);
        let publish_interval = self.publish_interval;

        tokio::spawn(async move {
            info!("Simulated news feed started");
            let mut interval = tokio::time::interval(publish_interval);

            for template in HEADLINES.iter().cycle() {
                interval.tick().await;
                let article = Self::build_article(&analyzer, template, 0);
                if tx.send(article).await.is_err() {
                    info!("Subscriber dropped, stopping simulated news feed");
                    return;
                }
            }
        });

        Ok(rx)
    }
}
