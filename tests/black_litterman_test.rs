//! Integration tests for the Black-Litterman allocator: equilibrium
//! prior, view blending, and the downstream max-Sharpe weights.

use ndarray::{arr1, arr2};
use nexus_quant::domain::allocation::{MarketPrior, View, ViewSet, posterior};
use nexus_quant::domain::portfolio::{MaxSharpeConfig, max_sharpe_weights};

fn three_asset_prior() -> MarketPrior {
    // Equities, bonds, real estate: plausible annualized covariance
    let sigma = arr2(&[
        [0.0400, 0.0060, 0.0120],
        [0.0060, 0.0100, 0.0040],
        [0.0120, 0.0040, 0.0250],
    ]);
    let weights = arr1(&[0.55, 0.30, 0.15]);
    MarketPrior::from_equilibrium(sigma, &weights, 2.5).unwrap()
}

#[test]
fn equilibrium_prior_rewards_risk() {
    let prior = three_asset_prior();
    // The high-variance asset must carry the highest implied return
    assert!(prior.returns[0] > prior.returns[1]);
    assert!(prior.returns[0] > prior.returns[2]);
    assert!(prior.returns.iter().all(|&r| r > 0.0));
}

#[test]
fn posterior_interpolates_between_prior_and_view() {
    let prior = three_asset_prior();
    let view_return = prior.returns[2] + 0.05;

    let mut views = ViewSet::new(3);
    views
        .push(View::Absolute {
            asset: 2,
            expected_return: view_return,
            variance: None,
        })
        .unwrap();

    let post = posterior(&prior, &views, 0.05).unwrap();
    let mu = post.expected_returns[2];
    assert!(mu > prior.returns[2], "posterior did not move toward the view");
    assert!(mu < view_return, "posterior overshot the view");
}

#[test]
fn correlated_assets_move_with_the_viewed_one() {
    let prior = three_asset_prior();

    // Bullish view on asset 0, which is positively correlated with asset 2
    let mut views = ViewSet::new(3);
    views
        .push(View::Absolute {
            asset: 0,
            expected_return: prior.returns[0] + 0.06,
            variance: None,
        })
        .unwrap();

    let post = posterior(&prior, &views, 0.05).unwrap();
    // Spillover through the covariance: the correlated asset rises too
    assert!(post.expected_returns[2] > prior.returns[2]);
}

#[test]
fn posterior_covariance_exceeds_prior_variance() {
    let prior = three_asset_prior();
    let mut views = ViewSet::new(3);
    views
        .push(View::Relative {
            long: 0,
            short: 1,
            spread: 0.03,
            variance: None,
        })
        .unwrap();

    let post = posterior(&prior, &views, 0.05).unwrap();
    // Estimation uncertainty adds to every diagonal entry
    for i in 0..3 {
        assert!(post.covariance[[i, i]] > prior.covariance[[i, i]]);
    }
}

#[test]
fn tau_scales_the_pull_of_views() {
    let prior = three_asset_prior();
    let view_return = prior.returns[1] + 0.04;

    let build_views = || {
        let mut views = ViewSet::new(3);
        views
            .push(View::Absolute {
                asset: 1,
                expected_return: view_return,
                variance: Some(0.0004),
            })
            .unwrap();
        views
    };

    // Higher tau: less confidence in the prior, view pulls harder
    let low_tau = posterior(&prior, &build_views(), 0.01).unwrap().expected_returns[1];
    let high_tau = posterior(&prior, &build_views(), 0.5).unwrap().expected_returns[1];

    assert!(high_tau > low_tau, "tau did not increase the view's pull");
}

#[test]
fn posterior_feeds_the_optimizer() {
    let prior = three_asset_prior();
    let mut views = ViewSet::new(3);
    views
        .push(View::Absolute {
            asset: 1,
            expected_return: 0.15,
            variance: Some(1e-5),
        })
        .unwrap();

    let post = posterior(&prior, &views, 0.05).unwrap();
    let weights = max_sharpe_weights(
        &post.expected_returns.to_vec(),
        &post.covariance,
        0.02,
        &MaxSharpeConfig::default(),
    );

    let sum: f64 = weights.iter().sum();
    assert!((sum - 1.0).abs() < 1e-9);
    assert!(weights.iter().all(|&w| w >= 0.0));
    // The confidently-upgraded low-risk asset should dominate the book
    let max_weight = weights
        .iter()
        .cloned()
        .fold(f64::NEG_INFINITY, f64::max);
    assert_eq!(weights[1], max_weight, "weights were {:?}", weights);
}
