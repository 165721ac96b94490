//! Calendar view of a stake: when rewards stop and when funds are liquid

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use super::types::CoinStakingConstraints;
use crate::error::{CalculatorError, Result};

/// Key dates of a single stake
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StakeSchedule {
    pub start: NaiveDate,
    /// Days the stake earns rewards
    pub staking_days: u32,
    /// Days locked after the unstake request, earning nothing
    pub unbonding_days: u32,
    /// Last day rewards accrue; the unstake request goes in here
    pub rewards_end: NaiveDate,
    /// First day the funds can be moved
    pub liquid_on: NaiveDate,
}

impl StakeSchedule {
    /// Fails with `InvalidArgument` when either date falls outside the
    /// supported calendar range
    pub fn new(start: NaiveDate, staking_days: u32, unbonding_days: u32) -> Result<Self> {
        let rewards_end = add_days(start, staking_days)?;
        let liquid_on = add_days(rewards_end, unbonding_days)?;
        Ok(Self {
            start,
            staking_days,
            unbonding_days,
            rewards_end,
            liquid_on,
        })
    }

    /// Schedule using the asset's unbonding period
    pub fn for_asset(
        start: NaiveDate,
        staking_days: u32,
        constraints: &CoinStakingConstraints,
    ) -> Result<Self> {
        Self::new(start, staking_days, constraints.unbonding_period)
    }

    /// Total days the capital is committed
    pub fn locked_days(&self) -> u64 {
        self.staking_days as u64 + self.unbonding_days as u64
    }

    /// Nominal rate earned over the whole lockup, unbonding included.
    ///
    /// `apr * staking_days / locked_days`; zero when nothing is locked.
    pub fn effective_apr(&self, apr: f64) -> f64 {
        let locked = self.locked_days();
        if locked == 0 {
            return 0.0;
        }
        apr * self.staking_days as f64 / locked as f64
    }
}

fn add_days(date: NaiveDate, days: u32) -> Result<NaiveDate> {
    date.checked_add_days(Days::new(days as u64)).ok_or_else(|| {
        CalculatorError::InvalidArgument(format!(
            "{} days after {} is beyond the supported calendar",
            days, date
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraints::StakingConstraintsRegistry;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_dates() {
        let schedule = StakeSchedule::new(date(2024, 1, 1), 90, 28).unwrap();
        assert_eq!(schedule.rewards_end, date(2024, 3, 31));
        assert_eq!(schedule.liquid_on, date(2024, 4, 28));
        assert_eq!(schedule.locked_days(), 118);
    }

    #[test]
    fn test_liquid_asset_unlocks_when_rewards_end() {
        let schedule = StakeSchedule::new(date(2024, 6, 1), 30, 0).unwrap();
        assert_eq!(schedule.rewards_end, schedule.liquid_on);
        assert!((schedule.effective_apr(5.0) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_unbonding_dilutes_rate() {
        let schedule = StakeSchedule::new(date(2024, 1, 1), 84, 28).unwrap();
        assert!((schedule.effective_apr(12.0) - 9.0).abs() < 1e-12);
    }

    #[test]
    fn test_nothing_locked() {
        let schedule = StakeSchedule::new(date(2024, 1, 1), 0, 0).unwrap();
        assert_eq!(schedule.effective_apr(10.0), 0.0);
    }

    #[test]
    fn test_for_asset() {
        let registry = StakingConstraintsRegistry::builtin();
        let dot = registry.get("DOT").unwrap();
        let schedule = StakeSchedule::for_asset(date(2024, 1, 1), 28, dot).unwrap();
        assert_eq!(schedule.unbonding_days, 28);
        assert_eq!(schedule.liquid_on, date(2024, 2, 26));
    }

    #[test]
    fn test_duration_past_calendar_range_is_rejected() {
        let result = StakeSchedule::new(date(2024, 1, 1), 100_000_000, 28);
        assert!(matches!(result, Err(CalculatorError::InvalidArgument(_))));

        // Staking end fits, unbonding pushes past the last date
        let near_end = NaiveDate::MAX - Days::new(10);
        assert!(StakeSchedule::new(near_end, 5, 0).is_ok());
        assert!(matches!(
            StakeSchedule::new(near_end, 5, 28),
            Err(CalculatorError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_locked_days_does_not_overflow() {
        let schedule = StakeSchedule {
            start: date(2024, 1, 1),
            staking_days: u32::MAX,
            unbonding_days: u32::MAX,
            rewards_end: date(2024, 1, 1),
            liquid_on: date(2024, 1, 1),
        };
        assert_eq!(schedule.locked_days(), 2 * u32::MAX as u64);
        assert!((schedule.effective_apr(10.0) - 5.0).abs() < 1e-9);
    }
}
