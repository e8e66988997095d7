//! Nexus-Quant CLI
//!
//! Quantitative analytics for the Nexus-Alpha platform: option pricing,
//! Black-Litterman allocation, bond analytics, risk measures, and a
//! simulated market-data/news layer for development.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use nexus_quant::application::allocation_engine::{AllocationEngine, ViewsFile};
use nexus_quant::application::option_report::{self, ChainRequest};
use nexus_quant::application::rate_shock::{RateScenario, RateShockEngine};
use nexus_quant::application::reporting::Reporter;
use nexus_quant::config::Config;
use nexus_quant::domain::fixed_income::{self, Bond, BondQuote, CurveScenario};
use nexus_quant::domain::market::HistoryPeriod;
use nexus_quant::domain::options::{self, OptionContract, OptionKind};
use nexus_quant::domain::ports::{MarketDataService, NewsFeedService};
use nexus_quant::domain::risk::{MonteCarloConfig, MonteCarloEngine, conditional_var,
    historical_var, parametric_var};
use nexus_quant::domain::stats;
use nexus_quant::infrastructure::{SimulatedMarketData, SimulatedNewsFeed};
use rust_decimal::prelude::ToPrimitive;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

#[derive(Parser)]
#[command(author, version, about = "Nexus-Alpha quantitative analytics", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Price a European option and its Greeks
    Price {
        #[arg(short, long)]
        spot: f64,
        #[arg(short = 'k', long)]
        strike: f64,
        /// Time to expiry in years
        #[arg(short = 't', long)]
        expiry: f64,
        /// Annualized risk-free rate (decimal)
        #[arg(short, long, default_value = "0.045")]
        rate: f64,
        /// Annualized volatility (decimal)
        #[arg(short, long)]
        volatility: f64,
        /// Continuous dividend yield (decimal)
        #[arg(short = 'q', long, default_value = "0.0")]
        dividend_yield: f64,
    },
    /// Solve for implied volatility from a market price
    Iv {
        #[arg(short, long)]
        market_price: f64,
        #[arg(short, long)]
        spot: f64,
        #[arg(short = 'k', long)]
        strike: f64,
        #[arg(short = 't', long)]
        expiry: f64,
        #[arg(short, long, default_value = "0.045")]
        rate: f64,
        /// Option kind (call or put)
        #[arg(long, default_value = "call")]
        kind: String,
        #[arg(short = 'q', long, default_value = "0.0")]
        dividend_yield: f64,
    },
    /// Generate an option chain around the spot
    Chain {
        #[arg(short, long)]
        spot: f64,
        #[arg(short = 't', long)]
        expiry: f64,
        #[arg(short, long, default_value = "0.045")]
        rate: f64,
        #[arg(short, long)]
        volatility: f64,
        #[arg(short = 'q', long, default_value = "0.0")]
        dividend_yield: f64,
        /// Output JSON file for the chain
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Full analytics for a fixed-coupon bond
    Bond {
        #[arg(short, long, default_value = "100.0")]
        face: f64,
        /// Annual coupon rate (decimal)
        #[arg(short, long)]
        coupon: f64,
        /// Years to maturity
        #[arg(short, long)]
        maturity: f64,
        /// Coupon payments per year
        #[arg(short = 'p', long, default_value = "2")]
        frequency: u32,
        /// Quoted yield to maturity (decimal)
        #[arg(short, long)]
        ytm: Option<f64>,
        /// Observed market price (alternative to --ytm)
        #[arg(long)]
        price: Option<f64>,
    },
    /// Print a Nelson-Siegel yield curve scenario
    Curve {
        /// Scenario (normal, inverted, flat, humped)
        #[arg(short, long, default_value = "normal")]
        scenario: String,
    },
    /// Black-Litterman allocation over a ticker universe
    Allocate {
        /// Comma-separated tickers
        #[arg(short, long)]
        symbols: Option<String>,
        /// History window (1mo, 3mo, 6mo, 1y, 5y)
        #[arg(short, long)]
        period: Option<String>,
        /// TOML file with investor views
        #[arg(short, long)]
        views: Option<String>,
        /// Output JSON file
        #[arg(short, long, default_value = "allocation.json")]
        output: String,
    },
    /// Value-at-Risk report from simulated history
    Var {
        #[arg(short, long, default_value = "VNQ")]
        symbol: String,
        #[arg(short, long, default_value = "1y")]
        period: String,
        #[arg(short, long, default_value = "0.95")]
        confidence: f64,
        /// Portfolio value for the parametric figure
        #[arg(long, default_value = "1000000")]
        value: f64,
    },
    /// Monte Carlo equity-path simulation
    MonteCarlo {
        #[arg(short, long, default_value = "10000")]
        iterations: usize,
        #[arg(short, long, default_value = "252")]
        steps: usize,
        #[arg(long, default_value = "100000")]
        initial_equity: f64,
        #[arg(long, default_value = "0.55")]
        win_rate: f64,
        #[arg(long, default_value = "0.02")]
        avg_win: f64,
        #[arg(long, default_value = "0.015")]
        avg_loss: f64,
    },
    /// Current quotes for one or more tickers
    Quote {
        #[arg(short, long)]
        symbols: Option<String>,
    },
    /// Daily bars for a ticker, optionally exported as CSV
    History {
        #[arg(short, long, default_value = "VNQ")]
        symbol: String,
        #[arg(short, long, default_value = "1mo")]
        period: String,
        /// Output CSV file
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Latest market news with scored sentiment
    News {
        #[arg(short, long, default_value = "5")]
        limit: usize,
    },
    /// Interest-rate shock scenario over the REIT universe
    Shock {
        #[arg(short, long)]
        symbols: Option<String>,
        /// New policy rate (percent)
        #[arg(short, long)]
        new_rate: f64,
        /// Current policy rate (percent)
        #[arg(short, long, default_value = "2.5")]
        current_rate: f64,
        #[arg(short, long, default_value = "rate_shock.json")]
        output: String,
    },
}

fn parse_symbols(arg: Option<String>, config: &Config) -> Vec<String> {
    match arg {
        Some(list) => list.split(',').map(|s| s.trim().to_string()).collect(),
        None => config.symbols.clone(),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber).ok();

    let cli = Cli::parse();
    let config = Config::from_env()?;
    let reporter = Reporter::new(&config.output_dir);
    let market: Arc<dyn MarketDataService> = Arc::new(SimulatedMarketData::new(
        Duration::from_millis(config.quote_tick_ms),
    ));

    match cli.command {
        Commands::Price {
            spot,
            strike,
            expiry,
            rate,
            volatility,
            dividend_yield,
        } => {
            let contract = OptionContract::new(spot, strike, expiry, rate, volatility)
                .with_dividend_yield(dividend_yield);
            let quote = options::price(&contract)?;
            println!("{}", serde_json::to_string_pretty(&quote)?);

            for line in option_report::describe_greeks(&quote.call_greeks, OptionKind::Call) {
                println!("  {}", line);
            }
        }
        Commands::Iv {
            market_price,
            spot,
            strike,
            expiry,
            rate,
            kind,
            dividend_yield,
        } => {
            let kind = match kind.to_lowercase().as_str() {
                "put" => OptionKind::Put,
                _ => OptionKind::Call,
            };
            let contract = OptionContract::new(spot, strike, expiry, rate, 0.2)
                .with_dividend_yield(dividend_yield);
            let iv = options::implied_volatility(market_price, &contract, kind)?;
            println!("Implied volatility: {:.4} ({:.2}%)", iv, iv * 100.0);
        }
        Commands::Chain {
            spot,
            expiry,
            rate,
            volatility,
            dividend_yield,
            output,
        } => {
            let request = ChainRequest {
                spot,
                expiry_years: expiry,
                risk_free_rate: rate,
                volatility,
                dividend_yield,
                strikes: None,
            };
            let report = option_report::build_chain(&request)?;
            reporter.print_chain(&report);
            if let Some(file_name) = output {
                reporter.write_json(&file_name, &report)?;
            }
        }
        Commands::Bond {
            face,
            coupon,
            maturity,
            frequency,
            ytm,
            price,
        } => {
            let bond = Bond::new(face, coupon, maturity, frequency)?;
            let quote = match (ytm, price) {
                (Some(y), _) => BondQuote::Yield(y),
                (None, Some(p)) => BondQuote::MarketPrice(p),
                (None, None) => anyhow::bail!("Provide either --ytm or --price"),
            };
            let analytics = fixed_income::analyze(&bond, quote, None)?;
            println!("{}", serde_json::to_string_pretty(&analytics)?);
        }
        Commands::Curve { scenario } => {
            let scenario = CurveScenario::from_str(&scenario)?;
            let maturities = [0.25, 0.5, 1.0, 2.0, 3.0, 5.0, 7.0, 10.0, 20.0, 30.0];
            let curve = fixed_income::generate_curve(&scenario.params(), &maturities);
            println!("{}", scenario);
            for point in curve {
                println!("{:>6.2}y  {:.3}%", point.maturity, point.yield_rate * 100.0);
            }
        }
        Commands::Allocate {
            symbols,
            period,
            views,
            output,
        } => {
            let tickers = parse_symbols(symbols, &config);
            let period = match period {
                Some(p) => HistoryPeriod::from_str(&p)?,
                None => config.history_period,
            };
            let views_file = match views {
                Some(path) => {
                    let contents = std::fs::read_to_string(&path)
                        .with_context(|| format!("Failed to read views file {}", path))?;
                    ViewsFile::from_toml(&contents)?
                }
                None => ViewsFile::default(),
            };

            let engine = AllocationEngine::new(
                Arc::clone(&market),
                config.risk_free_rate,
                config.tau,
                config.risk_aversion,
            );
            let report = engine.run(&tickers, period, &views_file).await?;
            reporter.print_allocation(&report);
            reporter.write_json(&output, &report)?;
        }
        Commands::Var {
            symbol,
            period,
            confidence,
            value,
        } => {
            let period = HistoryPeriod::from_str(&period)?;
            let bars = market.get_history(&symbol, period).await?;
            let closes: Vec<f64> = bars.iter().filter_map(|b| b.close.to_f64()).collect();
            let returns = stats::simple_returns(&closes);

            let hist = historical_var(&returns, confidence)?
                .context("Not enough history for VaR")?;
            let cvar = conditional_var(&returns, confidence)?
                .context("Not enough history for CVaR")?;
            let (mean, std) = stats::mean_std(&returns).context("Empty return series")?;
            let parametric = parametric_var(value, mean, std, confidence, 1.0)?;

            println!("VaR report for {} over {} ({} returns)", symbol, period, returns.len());
            println!("  Historical VaR ({:.0}%): {:.3}% of value", confidence * 100.0, hist * 100.0);
            println!("  Conditional VaR:         {:.3}% of value", cvar * 100.0);
            println!("  Parametric 1-day VaR:    ${:.2}", parametric);
        }
        Commands::MonteCarlo {
            iterations,
            steps,
            initial_equity,
            win_rate,
            avg_win,
            avg_loss,
        } => {
            let mc_config = MonteCarloConfig {
                iterations,
                steps,
                initial_equity,
                win_rate,
                avg_win_pct: avg_win,
                avg_loss_pct: avg_loss,
            };
            let result = MonteCarloEngine::simulate(&mc_config);
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Commands::Quote { symbols } => {
            let tickers = parse_symbols(symbols, &config);
            let quotes = market.get_quotes(&tickers).await?;
            reporter.print_quotes(&quotes);
        }
        Commands::History {
            symbol,
            period,
            output,
        } => {
            let period = HistoryPeriod::from_str(&period)?;
            let bars = market.get_history(&symbol, period).await?;
            info!("Generated {} bars for {}", bars.len(), symbol);
            for bar in bars.iter().rev().take(10).rev() {
                println!(
                    "{}  O:{} H:{} L:{} C:{} V:{}",
                    bar.date, bar.open, bar.high, bar.low, bar.close, bar.volume
                );
            }
            if let Some(file_name) = output {
                reporter.write_history_csv(&file_name, &bars)?;
            }
        }
        Commands::News { limit } => {
            let feed = SimulatedNewsFeed::new(Duration::from_secs(config.news_interval_secs));
            let articles = feed.latest(limit).await?;
            reporter.print_news(&articles);
        }
        Commands::Shock {
            symbols,
            new_rate,
            current_rate,
            output,
        } => {
            let tickers = parse_symbols(symbols, &config);
            let engine = RateShockEngine::new(Arc::clone(&market));
            let report = engine
                .simulate(
                    &tickers,
                    RateScenario {
                        current_rate,
                        new_rate,
                    },
                )
                .await?;
            reporter.print_rate_shock(&report);
            reporter.write_json(&output, &report)?;
        }
    }

    Ok(())
}
