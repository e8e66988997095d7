//! Report output: formatted console tables, JSON and CSV export

use crate::application::allocation_engine::AllocationReport;
use crate::application::option_report::OptionChainReport;
use crate::application::rate_shock::RateShockReport;
use crate::domain::market::{DailyBar, NewsArticle, StockQuote};
use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Writes reports under a fixed output directory
pub struct Reporter {
    output_dir: String,
}

impl Reporter {
    pub fn new(output_dir: &str) -> Self {
        Self {
            output_dir: output_dir.to_string(),
        }
    }

    fn prepare_path(&self, file_name: &str) -> Result<PathBuf> {
        let dir = Path::new(&self.output_dir);
        if !dir.exists() {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create output dir {}", self.output_dir))?;
        }
        Ok(dir.join(file_name))
    }

    /// Serialize any report to pretty JSON
    pub fn write_json<T: Serialize>(&self, file_name: &str, report: &T) -> Result<PathBuf> {
        let path = self.prepare_path(file_name)?;
        let json = serde_json::to_string_pretty(report).context("Failed to serialize report")?;
        fs::write(&path, json).with_context(|| format!("Failed to write {}", path.display()))?;
        info!("Report written to {}", path.display());
        Ok(path)
    }

    /// Export daily bars as CSV
    pub fn write_history_csv(&self, file_name: &str, bars: &[DailyBar]) -> Result<PathBuf> {
        let path = self.prepare_path(file_name)?;
        let mut writer = csv::Writer::from_path(&path)
            .with_context(|| format!("Failed to open {}", path.display()))?;
        for bar in bars {
            writer.serialize(bar)?;
        }
        writer.flush()?;
        info!("History written to {}", path.display());
        Ok(path)
    }

    pub fn print_chain(&self, report: &OptionChainReport) {
        println!("\n{}", "=".repeat(72));
        println!(
            "OPTION CHAIN  spot={:.2}  T={:.2}y  vol={:.0}%",
            report.spot,
            report.expiry_years,
            report.volatility * 100.0
        );
        println!("{}", "=".repeat(72));
        println!(
            "{:>8} | {:>8} | {:>8} | {:>7} | {:>7} | {:>5}",
            "Strike", "Call", "Put", "C.Delta", "P.Delta", "Mny"
        );
        for entry in &report.entries {
            println!(
                "{:>8.2} | {:>8.2} | {:>8.2} | {:>7.3} | {:>7.3} | {:>5}",
                entry.strike, entry.call, entry.put, entry.call_delta, entry.put_delta,
                entry.moneyness
            );
        }
        println!(
            "\nATM break-evens: call {:.2} / put {:.2}   PoP: call {:.1}% / put {:.1}%",
            report.atm_call_break_even,
            report.atm_put_break_even,
            report.atm_call_pop * 100.0,
            report.atm_put_pop * 100.0
        );
    }

    pub fn print_allocation(&self, report: &AllocationReport) {
        println!("\n{}", "=".repeat(72));
        println!(
            "BLACK-LITTERMAN ALLOCATION  tau={}  delta={}  ({} obs)",
            report.tau, report.risk_aversion, report.observations
        );
        println!("{}", "=".repeat(72));
        println!(
            "{:<8} | {:>8} | {:>9} | {:>10} | {:>7}",
            "Ticker", "Mkt Wt", "Prior", "Posterior", "Weight"
        );
        for (i, ticker) in report.tickers.iter().enumerate() {
            println!(
                "{:<8} | {:>7.2}% | {:>8.2}% | {:>9.2}% | {:>6.2}%",
                ticker,
                report.market_weights[i] * 100.0,
                report.prior_returns[i] * 100.0,
                report.posterior_returns[i] * 100.0,
                report.weights[i] * 100.0
            );
        }
        println!(
            "\nPortfolio: E[r]={:.2}%  vol={:.2}%  Sharpe={:.2}",
            report.expected_return * 100.0,
            report.volatility * 100.0,
            report.sharpe
        );
    }

    pub fn print_rate_shock(&self, report: &RateShockReport) {
        println!("\n{}", "=".repeat(72));
        println!(
            "RATE SHOCK  {:.2}% -> {:.2}% ({:+.2})",
            report.current_rate, report.new_rate, report.rate_change
        );
        println!("{}", "=".repeat(72));
        for company in &report.companies {
            println!(
                "{:<8} {:<28} {:>9} -> {:>9}  health={:>4.1}  {:?}/{:?}",
                company.ticker,
                company.name,
                company.current.price,
                company.projected.price,
                company.health_score,
                company.risk_level,
                company.recommendation
            );
        }
    }

    pub fn print_quotes(&self, quotes: &[StockQuote]) {
        println!(
            "{:<8} | {:<28} | {:>10} | {:>8} | {:>12}",
            "Ticker", "Name", "Price", "Change%", "Volume"
        );
        for quote in quotes {
            println!(
                "{:<8} | {:<28} | {:>10} | {:>7.2}% | {:>12}",
                quote.ticker, quote.name, quote.price, quote.change_percent, quote.volume
            );
        }
    }

    pub fn print_news(&self, articles: &[NewsArticle]) {
        for article in articles {
            println!(
                "[{}] {} — {} ({}, {})",
                article.sentiment,
                article.headline,
                article.source,
                article.category,
                article.published_at.format("%H:%M")
            );
        }
    }
}

impl Default for Reporter {
    fn default() -> Self {
        Self::new("reports")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    #[test]
    fn test_write_json_roundtrip() {
        let dir = std::env::temp_dir().join("nexus-quant-test-reports");
        let reporter = Reporter::new(dir.to_str().unwrap());

        #[derive(Serialize)]
        struct Dummy {
            value: f64,
        }
        let path = reporter
            .write_json("dummy.json", &Dummy { value: 1.5 })
            .unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.contains("1.5"));
        fs::remove_file(path).ok();
    }

    #[test]
    fn test_write_history_csv() {
        let dir = std::env::temp_dir().join("nexus-quant-test-reports");
        let reporter = Reporter::new(dir.to_str().unwrap());

        let bars = vec![DailyBar {
            date: NaiveDate::from_ymd_opt(2025, 6, 2).unwrap(),
            open: dec!(100.0),
            high: dec!(103.5),
            low: dec!(99.0),
            close: dec!(102.0),
            volume: 1_200_000,
        }];
        let path = reporter.write_history_csv("bars.csv", &bars).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.contains("2025-06-02"));
        assert!(contents.contains("103.5"));
        fs::remove_file(path).ok();
    }
}
