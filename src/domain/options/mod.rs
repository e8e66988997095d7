pub mod black_scholes;
pub mod chain;

pub use black_scholes::{
    Greeks, OptionContract, OptionKind, OptionQuote, implied_volatility, price,
    put_call_parity_gap,
};
pub use chain::{
    ChainEntry, Moneyness, PositionSide, ProfitBound, RiskProfile, break_even, moneyness,
    option_chain, probability_of_profit, risk_profile,
};
