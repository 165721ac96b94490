//! Period-by-period accrual schedule for a stake

use std::io::Write;

use serde::{Deserialize, Serialize};

use super::frequency::DAYS_PER_YEAR;
use super::types::StakingParameters;
use crate::error::{CalculatorError, Result};

/// Most rows a single schedule may hold (a century of daily rows, with room to spare)
pub const MAX_ACCRUAL_ROWS: u64 = 100_000;

/// Balance of the stake at one point in the schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccrualRow {
    /// Days since the stake started
    pub day: u32,
    /// Compounding periods elapsed (may be fractional on the last row)
    pub period: f64,
    pub balance: f64,
    /// Reward earned since the previous row
    pub period_reward: f64,
    /// Reward earned since day 0
    pub cumulative_reward: f64,
}

/// Full accrual schedule from day 0 to the end of the stake
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccrualSchedule {
    pub compounded: bool,
    pub period_days: u32,
    pub rows: Vec<AccrualRow>,
}

impl AccrualSchedule {
    /// Balance on the final row
    pub fn final_balance(&self) -> f64 {
        self.rows.last().map(|r| r.balance).unwrap_or(0.0)
    }

    /// Reward earned over the whole schedule
    pub fn total_reward(&self) -> f64 {
        self.rows.last().map(|r| r.cumulative_reward).unwrap_or(0.0)
    }

    /// Write the schedule as CSV with a header row
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        for row in &self.rows {
            csv_writer.serialize(row)?;
        }
        csv_writer.flush()?;
        Ok(())
    }
}

/// Build the accrual schedule matching `calculate_staking_rewards`.
///
/// Rows fall on every period boundary (`compounding_days()` apart, also used
/// as the reporting step for simple interest) plus a closing row on `days`,
/// so the last balance equals the calculated total. Fails with
/// `InvalidArgument` when that would take more than [`MAX_ACCRUAL_ROWS`] rows.
pub fn project_rewards(
    params: &StakingParameters,
    use_compound: bool,
) -> Result<AccrualSchedule> {
    let period_days = params.compounding_days();
    let row_count = accrual_row_count(params.days, period_days);
    if row_count > MAX_ACCRUAL_ROWS {
        return Err(CalculatorError::InvalidArgument(format!(
            "{} days at {} days per period needs {} schedule rows, limit is {}",
            params.days, period_days, row_count, MAX_ACCRUAL_ROWS
        )));
    }

    let step = period_days as f64;
    let daily_rate = params.apr / 100.0 / DAYS_PER_YEAR;
    let periodic_rate = daily_rate * step;

    let balance_at = |day: u32| -> f64 {
        if use_compound {
            params.principal * (1.0 + periodic_rate).powf(day as f64 / step)
        } else {
            params.principal * (1.0 + daily_rate * day as f64)
        }
    };

    let mut days: Vec<u32> = (0..=params.days).step_by(period_days as usize).collect();
    if days.last() != Some(&params.days) {
        days.push(params.days);
    }

    let mut rows = Vec::with_capacity(row_count as usize);
    let mut previous = params.principal;
    for day in days {
        let balance = balance_at(day);
        rows.push(AccrualRow {
            day,
            period: day as f64 / step,
            balance,
            period_reward: balance - previous,
            cumulative_reward: balance - params.principal,
        });
        previous = balance;
    }

    Ok(AccrualSchedule {
        compounded: use_compound,
        period_days,
        rows,
    })
}

/// Rows `project_rewards` emits: every boundary from day 0, plus a closing
/// row when `days` is not a whole number of periods
fn accrual_row_count(days: u32, period_days: u32) -> u64 {
    let boundaries = days as u64 / period_days as u64 + 1;
    if days % period_days == 0 {
        boundaries
    } else {
        boundaries + 1
    }
}
