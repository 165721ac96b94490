//! Compare staking rewards across every platform in a quotes file
//!
//! Usage:
//!   cargo run --bin compare_platforms -- --quotes quotes.csv --prices prices.csv --usd 1000

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{ArgGroup, Parser};
use log::warn;
use serde::Serialize;

use staking_calculator::constraints;
use staking_calculator::market::{compare_platforms, PriceSource, QuoteBook, YieldSource};
use staking_calculator::rewards::{CalculatorConfig, CompoundingFrequency};

#[derive(Parser, Debug)]
#[command(about = "Rank staking platforms by estimated reward")]
#[command(group(ArgGroup::new("stake").required(true).args(["amount", "usd"])))]
struct Args {
    /// CSV with symbol,platform,apy,chain,tvl_usd
    #[arg(long)]
    quotes: PathBuf,

    /// CSV with symbol,price
    #[arg(long)]
    prices: Option<PathBuf>,

    /// Staking duration in days
    #[arg(long, default_value_t = 365)]
    days: u32,

    /// Stake this many units of every asset
    #[arg(long)]
    amount: Option<f64>,

    /// Stake this much quote currency in every asset (needs prices)
    #[arg(long)]
    usd: Option<f64>,

    #[arg(long, default_value = "daily")]
    frequency: CompoundingFrequency,

    #[arg(long)]
    simple: bool,

    #[arg(long, default_value = "platform_comparison.csv")]
    output: PathBuf,
}

#[derive(Debug, Serialize)]
struct OutputRow {
    symbol: String,
    rank: usize,
    platform: String,
    chain: String,
    apr: f64,
    apy: Option<f64>,
    principal: f64,
    interest: f64,
    total: f64,
    interest_value: Option<f64>,
    meets_constraints: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let start = Instant::now();

    let book = QuoteBook::from_csv(&args.quotes, args.prices.as_ref())
        .context("Failed to load market data")?;
    let config = CalculatorConfig {
        compound: !args.simple,
        compounding: args.frequency,
        enforce_constraints: false,
    };

    let symbols = book.symbols();
    println!("Loaded quotes for {} assets in {:?}", symbols.len(), start.elapsed());

    let mut writer = csv::Writer::from_path(&args.output)
        .with_context(|| format!("Unable to create {}", args.output.display()))?;
    let mut rows = 0;

    for symbol in &symbols {
        let price = book.price(symbol);
        // The "stake" group guarantees exactly one of --amount and --usd
        let principal = match (args.amount, price) {
            (Some(amount), _) => amount,
            (None, Some(p)) if p > 0.0 => args.usd.unwrap_or_default() / p,
            (None, _) => {
                warn!("No usable price for {}, skipping", symbol);
                continue;
            }
        };

        let meets_constraints = constraints::is_valid_stake_amount(symbol, principal)
            && constraints::is_valid_stake_duration(symbol, args.days);
        let quotes = book.platforms(symbol)?;
        let estimates = compare_platforms(&quotes, principal, args.days, &config, price);

        if let Some(best) = estimates.first() {
            println!(
                "  {:<6} best: {:<24} {:>8.3}% -> {:.6} {}{}",
                symbol,
                best.platform_name,
                best.result.apr,
                best.result.interest,
                symbol,
                if meets_constraints { "" } else { "  (outside staking constraints)" }
            );
        }

        for (i, estimate) in estimates.into_iter().enumerate() {
            writer.serialize(OutputRow {
                symbol: symbol.clone(),
                rank: i + 1,
                platform: estimate.platform_name,
                chain: estimate.chain.unwrap_or_default(),
                apr: estimate.result.apr,
                apy: estimate.result.apy,
                principal: estimate.result.principal,
                interest: estimate.result.interest,
                total: estimate.result.total,
                interest_value: estimate.interest_value,
                meets_constraints,
            })?;
            rows += 1;
        }
    }

    writer.flush()?;
    println!("\nWrote {} rows to {} in {:?}", rows, args.output.display(), start.elapsed());
    Ok(())
}
