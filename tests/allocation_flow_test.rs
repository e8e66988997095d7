//! End-to-end allocation workflow against the simulated market:
//! history -> covariance -> equilibrium prior -> views -> posterior -> weights.

use nexus_quant::application::allocation_engine::{AllocationEngine, ViewsFile};
use nexus_quant::domain::market::HistoryPeriod;
use nexus_quant::infrastructure::SimulatedMarketData;
use std::sync::Arc;

fn engine() -> AllocationEngine {
    AllocationEngine::new(Arc::new(SimulatedMarketData::default()), 0.045, 0.05, 2.5)
}

fn universe() -> Vec<String> {
    vec!["VNQ".to_string(), "SCHH".to_string(), "IYR".to_string()]
}

#[tokio::test]
async fn allocation_without_views_produces_valid_weights() {
    let report = engine()
        .run(&universe(), HistoryPeriod::OneYear, &ViewsFile::default())
        .await
        .unwrap();

    assert_eq!(report.tickers.len(), 3);
    assert_eq!(report.weights.len(), 3);
    assert_eq!(report.prior_returns.len(), 3);
    assert_eq!(report.posterior_returns.len(), 3);

    let weight_sum: f64 = report.weights.iter().sum();
    assert!((weight_sum - 1.0).abs() < 1e-9, "weights sum to {}", weight_sum);
    assert!(report.weights.iter().all(|&w| w >= 0.0));

    let market_weight_sum: f64 = report.market_weights.iter().sum();
    assert!((market_weight_sum - 1.0).abs() < 1e-9);

    // With no views the posterior mean equals the equilibrium prior
    for (prior, post) in report
        .prior_returns
        .iter()
        .zip(report.posterior_returns.iter())
    {
        assert!((prior - post).abs() < 1e-12);
    }

    assert!(report.volatility.is_finite() && report.volatility > 0.0);
    assert!(report.expected_return.is_finite());
    assert!(report.observations >= 20);
}

#[tokio::test]
async fn views_tilt_the_posterior() {
    // The simulated walk is volatile, so the equilibrium prior can be
    // large; pick a view far above any plausible prior to pin the
    // direction of the tilt.
    let view_return = 10.0;
    let views = ViewsFile::from_toml(
        r#"
        [[views]]
        asset = "VNQ"
        expected_return = 10.0
        variance = 0.0001
        "#,
    )
    .unwrap();

    let report = engine()
        .run(&universe(), HistoryPeriod::OneYear, &views)
        .await
        .unwrap();

    // A confident bullish view must lift VNQ's posterior above its prior,
    // without overshooting the view itself
    assert!(
        report.posterior_returns[0] > report.prior_returns[0],
        "posterior {} <= prior {}",
        report.posterior_returns[0],
        report.prior_returns[0]
    );
    assert!(report.posterior_returns[0] < view_return);
}

#[tokio::test]
async fn file_overrides_engine_parameters() {
    let views = ViewsFile::from_toml("tau = 0.11\nrisk_aversion = 4.0").unwrap();
    let report = engine()
        .run(&universe(), HistoryPeriod::OneYear, &views)
        .await
        .unwrap();

    assert_eq!(report.tau, 0.11);
    assert_eq!(report.risk_aversion, 4.0);
}

#[tokio::test]
async fn short_history_is_rejected() {
    let result = engine()
        .run(&universe(), HistoryPeriod::FiveDays, &ViewsFile::default())
        .await;
    let err = result.unwrap_err();
    assert!(err.to_string().contains("Not enough history"));
}

#[tokio::test]
async fn unknown_ticker_is_rejected() {
    let tickers = vec!["VNQ".to_string(), "BOGUS".to_string()];
    let result = engine()
        .run(&tickers, HistoryPeriod::OneYear, &ViewsFile::default())
        .await;
    assert!(result.is_err());
}

#[tokio::test]
async fn empty_universe_is_rejected() {
    let result = engine()
        .run(&[], HistoryPeriod::OneYear, &ViewsFile::default())
        .await;
    assert!(result.is_err());
}
