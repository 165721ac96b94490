//! Staking Calculator CLI
//!
//! Estimate staking rewards, inspect per-asset staking constraints and convert APR to APY

use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use log::info;

use staking_calculator::constraints::{self, CoinStakingConstraints, StakeSchedule};
use staking_calculator::rewards::{
    apr_to_apy, calculate_staking_rewards, project_rewards, CompoundingFrequency, StakingParameters,
};

#[derive(Parser, Debug)]
#[command(name = "staking_calculator", version, about = "Estimate crypto staking rewards")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Estimate rewards for a stake
    Calc {
        /// Asset ticker, used to check staking constraints
        #[arg(long)]
        symbol: Option<String>,

        /// Amount of the asset to stake
        #[arg(long)]
        amount: f64,

        /// Nominal annual rate in percent
        #[arg(long)]
        apr: f64,

        /// Staking duration in days
        #[arg(long)]
        days: u32,

        /// Use simple interest instead of compounding
        #[arg(long)]
        simple: bool,

        /// Compounding cadence: daily, weekly, monthly, quarterly or annually
        #[arg(long, default_value = "daily")]
        frequency: CompoundingFrequency,

        /// Skip the staking constraints check
        #[arg(long)]
        no_validate: bool,

        /// Write the accrual schedule to this CSV file
        #[arg(long)]
        schedule_csv: Option<PathBuf>,

        /// Start date (YYYY-MM-DD) for the unbonding calendar
        #[arg(long)]
        start_date: Option<NaiveDate>,
    },

    /// Show staking constraints for one asset, or all of them
    Constraints {
        symbol: Option<String>,
    },

    /// Convert a nominal APR to APY
    Apy {
        #[arg(long)]
        apr: f64,

        #[arg(long, default_value = "daily")]
        frequency: CompoundingFrequency,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Calc {
            symbol,
            amount,
            apr,
            days,
            simple,
            frequency,
            no_validate,
            schedule_csv,
            start_date,
        } => {
            let params =
                StakingParameters::new(amount, apr, days).with_compounding_days(frequency.days());
            params.validate().context("Invalid calculation input")?;

            let asset = symbol.as_deref().and_then(constraints::get_staking_constraints);
            if let Some(symbol) = symbol.as_deref() {
                if !no_validate {
                    constraints::validate_stake(symbol, amount, days).with_context(|| {
                        format!("Stake does not meet {} staking constraints", symbol)
                    })?;
                }
            }

            let use_compound = !simple;
            let result = calculate_staking_rewards(&params, use_compound);
            let unit = symbol.as_deref().unwrap_or("");

            println!("Staking Reward Estimate");
            println!("=======================\n");
            println!("  Principal:  {:.6} {}", result.principal, unit);
            println!("  APR:        {:.4}%", result.apr);
            if let Some(apy) = result.apy {
                println!("  APY:        {:.4}% ({} compounding)", apy, frequency);
            } else {
                println!("  Interest:   simple");
            }
            println!("  Duration:   {} days", days);
            println!("  Rewards:    {:.6} {}", result.interest, unit);
            println!("  Total:      {:.6} {}", result.total, unit);
            println!("  Return:     {:.4}%", result.return_pct());

            if let Some(start) = start_date {
                let schedule = match asset {
                    Some(c) => StakeSchedule::for_asset(start, days, c),
                    None => StakeSchedule::new(start, days, 0),
                }
                .context("Unable to build the stake calendar")?;
                println!("\nCalendar:");
                println!("  Start:          {}", schedule.start);
                println!("  Rewards end:    {}", schedule.rewards_end);
                println!(
                    "  Funds liquid:   {} ({} days unbonding)",
                    schedule.liquid_on, schedule.unbonding_days
                );
                println!(
                    "  Effective APR:  {:.4}% over {} locked days",
                    schedule.effective_apr(apr),
                    schedule.locked_days()
                );
            }

            if let Some(path) = schedule_csv {
                let schedule = project_rewards(&params, use_compound)
                    .context("Unable to build the accrual schedule")?;
                let file = File::create(&path)
                    .with_context(|| format!("Unable to create {}", path.display()))?;
                schedule.write_csv(file)?;
                info!("Wrote {} accrual rows", schedule.rows.len());
                println!("\nAccrual schedule written to: {}", path.display());
            }
        }

        Commands::Constraints { symbol } => match symbol {
            Some(symbol) => match constraints::get_staking_constraints(&symbol) {
                Some(c) => print_constraints(c),
                None => println!(
                    "No staking constraints for {}; any amount and duration is accepted",
                    symbol
                ),
            },
            None => {
                println!("{:<6} {:>12} {:>10}  {}", "Symbol", "MinStake", "Unbonding", "Windows");
                println!("{}", "-".repeat(72));
                for c in constraints::get_all_staking_constraints() {
                    println!(
                        "{:<6} {:>12} {:>9}d  {}",
                        c.symbol,
                        c.min_stake_amount,
                        c.unbonding_period,
                        c.describe_periods()
                    );
                }
            }
        },

        Commands::Apy { apr, frequency } => {
            let apy = apr_to_apy(apr, frequency.periods_per_year());
            println!("{:.4}% APR compounded {} = {:.4}% APY", apr, frequency, apy);
        }
    }

    Ok(())
}

fn print_constraints(c: &CoinStakingConstraints) {
    println!("{}", c.symbol);
    println!("  Minimum stake:    {}", c.min_stake_amount);
    println!("  Unbonding period: {} days", c.unbonding_period);
    println!("  Staking windows:  {}", c.describe_periods());
    println!("  Method:           {}", c.staking_method);
    println!("  Rewards:          {}", c.reward_type);
    if !c.staking_risks.is_empty() {
        println!("  Risks:");
        for risk in &c.staking_risks {
            println!("    - {}", risk);
        }
    }
    if !c.notes.is_empty() {
        println!("  Notes:            {}", c.notes);
    }
}
