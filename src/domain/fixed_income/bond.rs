//! Bond pricing and rate-sensitivity analytics
//!
//! Present-value pricing of fixed-coupon bonds, yield-to-maturity solving,
//! Macaulay/modified duration, convexity, DV01, accrued interest, and the
//! duration+convexity price-change approximation. Also covers floating
//! rate notes and a simple convertible decomposition.

use crate::domain::errors::BondError;
use serde::{Deserialize, Serialize};

/// A plain fixed-coupon bond
///
/// Rates are annualized decimals; `payments_per_year` is 1 (annual),
/// 2 (semi-annual), 4 (quarterly) or 12 (monthly).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bond {
    pub face_value: f64,
    pub coupon_rate: f64,
    pub maturity_years: f64,
    pub payments_per_year: u32,
}

impl Bond {
    pub fn new(
        face_value: f64,
        coupon_rate: f64,
        maturity_years: f64,
        payments_per_year: u32,
    ) -> Result<Self, BondError> {
        if face_value <= 0.0 {
            return Err(BondError::InvalidBond {
                reason: format!("face value must be positive, got {}", face_value),
            });
        }
        if coupon_rate < 0.0 {
            return Err(BondError::InvalidBond {
                reason: format!("coupon rate cannot be negative, got {}", coupon_rate),
            });
        }
        if maturity_years < 0.0 {
            return Err(BondError::InvalidBond {
                reason: format!("maturity cannot be negative, got {}", maturity_years),
            });
        }
        if payments_per_year == 0 {
            return Err(BondError::InvalidBond {
                reason: "payment frequency must be at least 1 per year".to_string(),
            });
        }
        Ok(Self {
            face_value,
            coupon_rate,
            maturity_years,
            payments_per_year,
        })
    }

    fn total_periods(&self) -> u32 {
        (self.maturity_years * self.payments_per_year as f64).round() as u32
    }

    fn coupon_payment(&self) -> f64 {
        self.face_value * self.coupon_rate / self.payments_per_year as f64
    }

    /// Present value at the given yield to maturity
    ///
    /// PV = sum(C / (1+y)^t) + F / (1+y)^T with y the per-period yield.
    pub fn price(&self, yield_to_maturity: f64) -> f64 {
        let periods = self.total_periods();
        if periods == 0 {
            return self.face_value;
        }
        let coupon = self.coupon_payment();
        let y = yield_to_maturity / self.payments_per_year as f64;

        let mut price = 0.0;
        for t in 1..=periods {
            price += coupon / (1.0 + y).powi(t as i32);
        }
        price + self.face_value / (1.0 + y).powi(periods as i32)
    }
}

/// Price of a zero-coupon bond: F / (1+y)^T
pub fn zero_coupon_price(face_value: f64, maturity_years: f64, yield_to_maturity: f64) -> f64 {
    face_value / (1.0 + yield_to_maturity).powf(maturity_years)
}

const YTM_MAX_ITERATIONS: usize = 100;
const YTM_TOLERANCE: f64 = 1e-6;
const YTM_FLOOR: f64 = 1e-4;

/// Solve for the yield implied by a market price
///
/// Newton-Raphson with the analytic derivative -P * D_mod, seeded from
/// the current yield, floored at one basis point.
pub fn yield_to_maturity(bond: &Bond, market_price: f64) -> Result<f64, BondError> {
    if market_price <= 0.0 {
        return Err(BondError::InvalidBond {
            reason: format!("market price must be positive, got {}", market_price),
        });
    }

    let mut ytm = bond.coupon_rate * bond.face_value / market_price;
    if ytm <= 0.0 {
        // Zero-coupon seed
        ytm = 0.05;
    }

    for _ in 0..YTM_MAX_ITERATIONS {
        let price = bond.price(ytm);
        let diff = price - market_price;
        if diff.abs() < YTM_TOLERANCE {
            return Ok(ytm);
        }

        let derivative = -price * modified_duration(bond, ytm);
        if derivative.abs() < 1e-10 {
            return Err(BondError::FlatDerivative { ytm });
        }

        ytm = (ytm - diff / derivative).max(YTM_FLOOR);
    }

    Err(BondError::YtmDidNotConverge {
        iterations: YTM_MAX_ITERATIONS,
    })
}

/// Macaulay duration: PV-weighted average time to cash flows, in years
pub fn macaulay_duration(bond: &Bond, yield_to_maturity: f64) -> f64 {
    let periods = bond.total_periods();
    if periods == 0 {
        return 0.0;
    }
    let coupon = bond.coupon_payment();
    let y = yield_to_maturity / bond.payments_per_year as f64;
    let price = bond.price(yield_to_maturity);

    let mut weighted_time = 0.0;
    for t in 1..=periods {
        let pv = coupon / (1.0 + y).powi(t as i32);
        weighted_time += (t as f64 / bond.payments_per_year as f64) * pv;
    }
    let pv_face = bond.face_value / (1.0 + y).powi(periods as i32);
    weighted_time += bond.maturity_years * pv_face;

    weighted_time / price
}

/// Modified duration: Macaulay / (1 + y/k), the first-order price sensitivity
pub fn modified_duration(bond: &Bond, yield_to_maturity: f64) -> f64 {
    let y = yield_to_maturity / bond.payments_per_year as f64;
    macaulay_duration(bond, yield_to_maturity) / (1.0 + y)
}

/// Convexity (annualized): curvature of the price-yield relationship
pub fn convexity(bond: &Bond, yield_to_maturity: f64) -> f64 {
    let periods = bond.total_periods();
    if periods == 0 {
        return 0.0;
    }
    let coupon = bond.coupon_payment();
    let k = bond.payments_per_year as f64;
    let y = yield_to_maturity / k;
    let price = bond.price(yield_to_maturity);

    let mut sum = 0.0;
    for t in 1..=periods {
        let pv = coupon / (1.0 + y).powi(t as i32);
        sum += pv * t as f64 * (t as f64 + 1.0);
    }
    let pv_face = bond.face_value / (1.0 + y).powi(periods as i32);
    sum += pv_face * periods as f64 * (periods as f64 + 1.0);

    sum / (price * (1.0 + y).powi(2)) / (k * k)
}

/// Dollar value of one basis point
pub fn dv01(bond: &Bond, yield_to_maturity: f64) -> f64 {
    bond.price(yield_to_maturity) * modified_duration(bond, yield_to_maturity) * 0.0001
}

/// Coupon interest accumulated since the last payment date
pub fn accrued_interest(bond: &Bond, days_since_last_coupon: f64, days_in_period: f64) -> f64 {
    if days_in_period <= 0.0 {
        return 0.0;
    }
    bond.coupon_payment() * (days_since_last_coupon / days_in_period)
}

/// How the bond is quoted when requesting analytics
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BondQuote {
    MarketPrice(f64),
    Yield(f64),
}

/// Day counts for accrued-interest computation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AccrualPeriod {
    pub days_since_last_coupon: f64,
    pub days_in_period: f64,
}

/// Full analytics bundle for one bond
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BondAnalytics {
    pub price: f64,
    pub yield_to_maturity: f64,
    pub current_yield: f64,
    pub macaulay_duration: f64,
    pub modified_duration: f64,
    pub convexity: f64,
    pub dv01: f64,
    pub accrued_interest: f64,
    pub clean_price: f64,
    pub dirty_price: f64,
}

/// Analyze a bond from either a market price or a quoted yield
pub fn analyze(
    bond: &Bond,
    quote: BondQuote,
    accrual: Option<AccrualPeriod>,
) -> Result<BondAnalytics, BondError> {
    let (price, ytm) = match quote {
        BondQuote::MarketPrice(p) => (p, yield_to_maturity(bond, p)?),
        BondQuote::Yield(y) => (bond.price(y), y),
    };

    let accrued = match accrual {
        Some(a) => accrued_interest(bond, a.days_since_last_coupon, a.days_in_period),
        None => 0.0,
    };

    Ok(BondAnalytics {
        price,
        yield_to_maturity: ytm,
        current_yield: bond.coupon_rate * bond.face_value / price,
        macaulay_duration: macaulay_duration(bond, ytm),
        modified_duration: modified_duration(bond, ytm),
        convexity: convexity(bond, ytm),
        dv01: dv01(bond, ytm),
        accrued_interest: accrued,
        clean_price: price - accrued,
        dirty_price: price + accrued,
    })
}

/// Second-order price change estimate for a yield move
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceChangeEstimate {
    pub duration_effect: f64,
    pub convexity_effect: f64,
    pub total_change: f64,
    pub new_price: f64,
}

/// dP/P ~= -D_mod * dy + 0.5 * C * dy^2
pub fn estimate_price_change(
    bond: &Bond,
    current_yield: f64,
    yield_change: f64,
) -> PriceChangeEstimate {
    let price = bond.price(current_yield);
    let duration_effect = -modified_duration(bond, current_yield) * yield_change;
    let convexity_effect = 0.5 * convexity(bond, current_yield) * yield_change * yield_change;
    let total_change = duration_effect + convexity_effect;

    PriceChangeEstimate {
        duration_effect,
        convexity_effect,
        total_change,
        new_price: price * (1.0 + total_change),
    }
}

/// Floating rate note price between resets
///
/// Trades near par; discounted at reference + spread over the stub to the
/// next reset (money-market day count).
pub fn floating_rate_note_price(
    face_value: f64,
    reference_rate: f64,
    spread: f64,
    days_to_next_reset: f64,
    days_in_year: f64,
) -> f64 {
    let discount_rate = reference_rate + spread;
    let time_fraction = days_to_next_reset / days_in_year;
    face_value / (1.0 + discount_rate * time_fraction)
}

/// Terms of a convertible bond
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConvertibleTerms {
    pub bond: Bond,
    pub conversion_ratio: f64,
    pub stock_price: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConvertibleValue {
    pub bond_floor: f64,
    pub conversion_value: f64,
    pub option_value: f64,
    pub total_value: f64,
}

/// Decompose a convertible into bond floor + conversion + option value
///
/// The embedded option is a coarse haircut on the conversion premium; a
/// lattice model would refine it but the decomposition is what the
/// scenario views consume.
pub fn convertible_value(terms: &ConvertibleTerms, discount_yield: f64) -> ConvertibleValue {
    let bond_floor = terms.bond.price(discount_yield);
    let conversion_value = terms.conversion_ratio * terms.stock_price;
    let option_value = (conversion_value - bond_floor).max(0.0) * 0.5;

    ConvertibleValue {
        bond_floor,
        conversion_value,
        option_value,
        total_value: bond_floor.max(conversion_value) + option_value,
    }
}
