//! Integration tests for the simulated market-data and news services
//! through their domain ports.

use nexus_quant::domain::market::{HistoryPeriod, MarketEvent};
use nexus_quant::domain::ports::{MarketDataService, NewsFeedService};
use nexus_quant::infrastructure::{SimulatedMarketData, SimulatedNewsFeed};
use rust_decimal::Decimal;
use std::time::Duration;

#[tokio::test]
async fn single_quote_has_consistent_fields() {
    let market = SimulatedMarketData::default();
    let quote = market.get_quote("VNQ").await.unwrap();

    assert_eq!(quote.ticker, "VNQ");
    assert_eq!(quote.sector, "Real Estate");
    assert!(quote.price > Decimal::ZERO);
    // change and change_percent agree in sign (skip the rounding dead zone)
    if quote.change_percent > 0.1 {
        assert!(quote.change > Decimal::ZERO);
    } else if quote.change_percent < -0.1 {
        assert!(quote.change < Decimal::ZERO);
    }
    assert!(quote.pe.is_some());
    assert!(quote.dividend_yield.is_some());
}

#[tokio::test]
async fn batch_preserves_order_and_length() {
    let market = SimulatedMarketData::default();
    let tickers = vec![
        "IYR".to_string(),
        "AAPL".to_string(),
        "293940".to_string(),
    ];
    let quotes = market.get_quotes(&tickers).await.unwrap();

    assert_eq!(quotes.len(), 3);
    assert_eq!(quotes[0].ticker, "IYR");
    assert_eq!(quotes[1].ticker, "AAPL");
    assert_eq!(quotes[2].ticker, "293940");
    assert_eq!(quotes[1].sector, "Technology");
}

#[tokio::test]
async fn unknown_ticker_fails_everywhere() {
    let market = SimulatedMarketData::default();

    assert!(market.get_quote("BOGUS").await.is_err());
    assert!(
        market
            .get_quotes(&["VNQ".to_string(), "BOGUS".to_string()])
            .await
            .is_err()
    );
    assert!(
        market
            .get_history("BOGUS", HistoryPeriod::OneMonth)
            .await
            .is_err()
    );
    assert!(market.subscribe(vec!["BOGUS".to_string()]).await.is_err());
}

#[tokio::test]
async fn history_honors_period_lengths() {
    let market = SimulatedMarketData::default();
    for (period, expected) in [
        (HistoryPeriod::FiveDays, 5),
        (HistoryPeriod::OneMonth, 30),
        (HistoryPeriod::ThreeMonths, 90),
    ] {
        let bars = market.get_history("SCHH", period).await.unwrap();
        assert_eq!(bars.len(), expected, "period {}", period);
    }
}

#[tokio::test]
async fn history_bars_are_well_formed() {
    let market = SimulatedMarketData::default();
    let bars = market.get_history("VNQ", HistoryPeriod::SixMonths).await.unwrap();

    for bar in &bars {
        assert!(bar.high >= bar.open && bar.high >= bar.close);
        assert!(bar.low <= bar.open && bar.low <= bar.close);
        assert!(bar.close > Decimal::ZERO);
        assert!(bar.volume >= 1_000_000);
    }
}

#[tokio::test]
async fn subscription_streams_quotes() {
    let market = SimulatedMarketData::new(Duration::from_millis(10));
    let mut rx = market
        .subscribe(vec!["VNQ".to_string(), "NVDA".to_string()])
        .await
        .unwrap();

    let mut seen_vnq = false;
    let mut seen_nvda = false;
    for _ in 0..10 {
        let event = tokio::time::timeout(Duration::from_secs(2), rx.recv())
            .await
            .expect("timed out waiting for quote")
            .expect("feed closed unexpectedly");
        let MarketEvent::Quote { ticker, price, .. } = event else {
            continue;
        };
        assert!(price > Decimal::ZERO);
        match ticker.as_str() {
            "VNQ" => seen_vnq = true,
            "NVDA" => seen_nvda = true,
            other => panic!("unexpected ticker {}", other),
        }
        if seen_vnq && seen_nvda {
            break;
        }
    }
    assert!(seen_vnq && seen_nvda);
}

#[tokio::test]
async fn news_feed_serves_scored_articles() {
    let feed = SimulatedNewsFeed::default();
    let articles = feed.latest(5).await.unwrap();

    assert_eq!(articles.len(), 5);
    for article in &articles {
        assert!(!article.id.is_empty());
        assert!(!article.headline.is_empty());
        assert!(!article.source.is_empty());
    }
    // Newest first
    for pair in articles.windows(2) {
        assert!(pair[0].published_at >= pair[1].published_at);
    }
}
