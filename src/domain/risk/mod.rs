pub mod monte_carlo;
pub mod var;

pub use monte_carlo::{MonteCarloConfig, MonteCarloEngine, MonteCarloResult};
pub use var::{conditional_var, historical_var, parametric_var};
