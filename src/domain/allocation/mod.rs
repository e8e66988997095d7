pub mod black_litterman;
pub mod matrix;
pub mod views;

pub use black_litterman::{MarketPrior, Posterior, equilibrium_returns, posterior};
pub use views::{View, ViewSet};
