pub mod bond;
pub mod credit;
pub mod yield_curve;

pub use bond::{
    AccrualPeriod, Bond, BondAnalytics, BondQuote, ConvertibleTerms, ConvertibleValue,
    PriceChangeEstimate, accrued_interest, analyze, convertible_value, convexity, dv01,
    estimate_price_change, floating_rate_note_price, macaulay_duration, modified_duration,
    yield_to_maturity, zero_coupon_price,
};
pub use credit::{CreditSpreadAnalysis, ImmunizationPlan, analyze_credit_spread, immunize};
pub use yield_curve::{CurvePoint, CurveScenario, NelsonSiegelParams, fit_nelson_siegel,
    generate_curve, nelson_siegel_yield};
