pub mod factor_models;
pub mod mpt;

pub use factor_models::{FactorLoadings, FactorPremiums, beta, capm_expected_return, jensens_alpha};
pub use mpt::{
    MaxSharpeConfig, max_sharpe_weights, portfolio_return, portfolio_variance,
    portfolio_volatility, sharpe_ratio,
};
