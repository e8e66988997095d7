//! Integration tests for fixed-income analytics: pricing, YTM solving,
//! duration-based estimates, curve scenarios and immunization.

use nexus_quant::domain::fixed_income::{
    AccrualPeriod, Bond, BondQuote, CurveScenario, analyze, estimate_price_change,
    fit_nelson_siegel, generate_curve, immunize, macaulay_duration, modified_duration,
    nelson_siegel_yield, yield_to_maturity, zero_coupon_price,
};

fn corporate_5y() -> Bond {
    // 5% semi-annual corporate
    Bond::new(100.0, 0.05, 5.0, 2).unwrap()
}

#[test]
fn premium_and_discount_pricing() {
    let bond = corporate_5y();
    // Yield below coupon: premium. Above: discount.
    assert!(bond.price(0.04) > 100.0);
    assert!((bond.price(0.05) - 100.0).abs() < 1e-9);
    assert!(bond.price(0.06) < 100.0);
}

#[test]
fn ytm_inverts_pricing_across_the_curve() {
    let bond = corporate_5y();
    for y in [0.02, 0.045, 0.07, 0.10] {
        let price = bond.price(y);
        let solved = yield_to_maturity(&bond, price).unwrap();
        assert!((solved - y).abs() < 1e-5, "solved {} for true {}", solved, y);
    }
}

#[test]
fn analytics_from_market_price() {
    let bond = corporate_5y();
    let market_price = 96.5;
    let analytics = analyze(&bond, BondQuote::MarketPrice(market_price), None).unwrap();

    // Discount bond: YTM above coupon, current yield between them
    assert!(analytics.yield_to_maturity > 0.05);
    assert!(analytics.current_yield > 0.05);
    assert!(analytics.current_yield < analytics.yield_to_maturity);
    assert_eq!(analytics.price, market_price);
    assert!(analytics.macaulay_duration > analytics.modified_duration);
    assert!(analytics.macaulay_duration < 5.0);
    assert!(analytics.convexity > 0.0);
    assert!(analytics.dv01 > 0.0);
}

#[test]
fn accrual_splits_clean_and_dirty() {
    let bond = corporate_5y();
    let analytics = analyze(
        &bond,
        BondQuote::Yield(0.05),
        Some(AccrualPeriod {
            days_since_last_coupon: 60.0,
            days_in_period: 180.0,
        }),
    )
    .unwrap();

    // One third of the 2.5 semi-annual coupon
    assert!((analytics.accrued_interest - 2.5 / 3.0).abs() < 1e-9);
    assert!((analytics.dirty_price - analytics.clean_price - 2.0 * analytics.accrued_interest).abs() < 1e-9);
}

#[test]
fn duration_convexity_estimate_brackets_true_repricing() {
    let bond = Bond::new(100.0, 0.04, 10.0, 2).unwrap();
    let from = 0.04;

    for dy in [-0.02, -0.005, 0.005, 0.02] {
        let estimate = estimate_price_change(&bond, from, dy);
        let actual = bond.price(from + dy);
        let error = (estimate.new_price - actual).abs() / actual;
        assert!(
            error < 0.01,
            "estimate off by {:.3}% for dy={}",
            error * 100.0,
            dy
        );
    }
}

#[test]
fn zero_coupon_consistency() {
    let via_bond = Bond::new(100.0, 0.0, 5.0, 1).unwrap().price(0.05);
    let direct = zero_coupon_price(100.0, 5.0, 0.05);
    assert!((via_bond - direct).abs() < 1e-9);
}

#[test]
fn curve_scenarios_have_expected_shapes() {
    let maturities = [0.25, 1.0, 2.0, 5.0, 10.0, 30.0];

    let normal = generate_curve(&CurveScenario::Normal.params(), &maturities);
    assert!(normal.last().unwrap().yield_rate > normal.first().unwrap().yield_rate);

    let inverted = generate_curve(&CurveScenario::Inverted.params(), &maturities);
    assert!(inverted.last().unwrap().yield_rate < inverted.first().unwrap().yield_rate);

    // Humped: some middle maturity tops both ends
    let humped = generate_curve(&CurveScenario::Humped.params(), &maturities);
    let peak = humped
        .iter()
        .map(|p| p.yield_rate)
        .fold(f64::NEG_INFINITY, f64::max);
    assert!(peak > humped.first().unwrap().yield_rate);
    assert!(peak > humped.last().unwrap().yield_rate);
}

#[test]
fn fitted_curve_reproduces_anchors() {
    let params = CurveScenario::Normal.params();
    let maturities = [0.25, 2.0, 10.0, 30.0];
    let observed = generate_curve(&params, &maturities);

    let fitted = fit_nelson_siegel(&observed).unwrap();
    // The heuristic anchors the long end exactly
    let long = nelson_siegel_yield(30.0, &fitted);
    assert!((long - observed.last().unwrap().yield_rate).abs() < 0.01);
}

#[test]
fn immunization_closes_the_duration_gap() {
    let short = Bond::new(100.0, 0.06, 3.0, 2).unwrap();
    let long = Bond::new(100.0, 0.03, 15.0, 2).unwrap();
    let yields = [0.05, 0.05];
    let target = 7.0;

    let plan = immunize(&[short, long], &[0.9, 0.1], target, &yields).unwrap();
    assert!(plan.rebalance_needed);

    let d_short = macaulay_duration(&short, 0.05);
    let d_long = macaulay_duration(&long, 0.05);
    let achieved = plan.suggested_weights[0] * d_short + plan.suggested_weights[1] * d_long;
    assert!((achieved - target).abs() < 1e-9);

    // Sanity: modified duration shrinks with yield level
    assert!(modified_duration(&long, 0.08) < modified_duration(&long, 0.02));
}
