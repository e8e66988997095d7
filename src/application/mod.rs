pub mod allocation_engine;
pub mod option_report;
pub mod rate_shock;
pub mod reporting;
