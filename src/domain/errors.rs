use thiserror::Error;

/// Errors raised by the option pricing models
#[derive(Debug, Error)]
pub enum PricingError {
    #[error("Spot price must be positive, got {value}")]
    NonPositiveSpot { value: f64 },

    #[error("Strike price must be positive, got {value}")]
    NonPositiveStrike { value: f64 },

    #[error("Time to expiry must be positive, got {value} years")]
    NonPositiveExpiry { value: f64 },

    #[error("Volatility must be positive, got {value}")]
    NonPositiveVolatility { value: f64 },

    #[error("Implied volatility did not converge after {iterations} iterations")]
    ImpliedVolDidNotConverge { iterations: usize },

    #[error("Vega is zero at sigma={sigma:.4}, cannot iterate")]
    ZeroVega { sigma: f64 },

    #[error("Strike ladder is empty")]
    EmptyStrikeLadder,
}

/// Errors raised by the Black-Litterman allocator
#[derive(Debug, Error)]
pub enum AllocationError {
    #[error("Matrix must be square, got {rows}x{cols}")]
    NotSquare { rows: usize, cols: usize },

    #[error("Covariance matrix is singular or near-singular")]
    SingularMatrix,

    #[error("Dimension mismatch in {what}: expected {expected}, got {actual}")]
    DimensionMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("View references asset index {index}, universe has {n_assets} assets")]
    ViewOutOfBounds { index: usize, n_assets: usize },

    #[error("View uncertainty must be positive, got {value}")]
    NonPositiveUncertainty { value: f64 },

    #[error("Tau must be positive, got {value}")]
    NonPositiveTau { value: f64 },

    #[error("Asset universe is empty")]
    EmptyUniverse,
}

/// Errors raised by the fixed-income analytics
#[derive(Debug, Error)]
pub enum BondError {
    #[error("Invalid bond: {reason}")]
    InvalidBond { reason: String },

    #[error("Yield to maturity did not converge after {iterations} iterations")]
    YtmDidNotConverge { iterations: usize },

    #[error("YTM derivative too small at y={ytm:.6}, cannot iterate")]
    FlatDerivative { ytm: f64 },

    #[error("Either a market price or a yield is required to analyze a bond")]
    MissingQuote,

    #[error("Expected {expected} {what}, got {actual}")]
    LengthMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("Cannot fit a curve through an empty set of observed yields")]
    EmptyCurve,
}

/// Errors raised by the risk analytics
#[derive(Debug, Error)]
pub enum RiskError {
    #[error("Confidence level must be in (0, 1), got {value}")]
    InvalidConfidence { value: f64 },

    #[error("Return series too short: need at least {need}, got {got}")]
    InsufficientReturns { need: usize, got: usize },
}

/// Errors raised by market data providers
#[derive(Debug, Error)]
pub enum MarketDataError {
    #[error("Unknown ticker: {ticker}")]
    UnknownTicker { ticker: String },

    #[error("Invalid history period: {period}. Must be one of 1d, 5d, 1mo, 3mo, 6mo, 1y, 5y")]
    InvalidPeriod { period: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pricing_error_formatting() {
        let err = PricingError::NonPositiveVolatility { value: -0.2 };
        assert!(err.to_string().contains("-0.2"));

        let err = PricingError::ImpliedVolDidNotConverge { iterations: 100 };
        assert!(err.to_string().contains("100"));
    }

    #[test]
    fn test_allocation_error_formatting() {
        let err = AllocationError::DimensionMismatch {
            what: "view vector",
            expected: 3,
            actual: 2,
        };
        let msg = err.to_string();
        assert!(msg.contains("view vector"));
        assert!(msg.contains("3"));
        assert!(msg.contains("2"));
    }

    #[test]
    fn test_market_data_error_formatting() {
        let err = MarketDataError::UnknownTicker {
            ticker: "ZZZZ".to_string(),
        };
        assert!(err.to_string().contains("ZZZZ"));
    }
}
