//! Per-asset staking constraint records

use std::fmt;

use serde::{Deserialize, Serialize};

/// A permitted staking duration window, inclusive on both ends
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StakingPeriod {
    pub name: String,
    pub min_days: u32,
    /// None = no maximum
    pub max_days: Option<u32>,
}

impl StakingPeriod {
    pub fn new(name: &str, min_days: u32, max_days: Option<u32>) -> Self {
        Self {
            name: name.to_string(),
            min_days,
            max_days,
        }
    }

    /// Window with no upper bound
    pub fn open_ended(name: &str, min_days: u32) -> Self {
        Self::new(name, min_days, None)
    }

    /// Window admitting exactly one duration
    pub fn fixed(name: &str, days: u32) -> Self {
        Self::new(name, days, Some(days))
    }

    pub fn contains(&self, days: u32) -> bool {
        days >= self.min_days && self.max_days.map_or(true, |max| days <= max)
    }
}

impl fmt::Display for StakingPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.max_days {
            Some(max) if max == self.min_days => write!(f, "{}: {} days", self.name, max),
            Some(max) => write!(f, "{}: {}-{} days", self.name, self.min_days, max),
            None => write!(f, "{}: {}+ days", self.name, self.min_days),
        }
    }
}

/// Staking rules and descriptive metadata for one asset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoinStakingConstraints {
    /// Uppercase ticker
    pub symbol: String,

    /// Smallest principal accepted
    pub min_stake_amount: f64,

    /// Days between an unstake request and the funds becoming liquid (0 = liquid)
    pub unbonding_period: u32,

    /// Permitted durations; a stake is valid if any window contains it
    pub staking_periods: Vec<StakingPeriod>,

    // Display-only metadata
    pub notes: String,
    pub staking_method: String,
    pub staking_risks: Vec<String>,
    pub reward_type: String,
}

impl CoinStakingConstraints {
    pub fn is_valid_amount(&self, amount: f64) -> bool {
        amount >= self.min_stake_amount
    }

    pub fn is_valid_duration(&self, days: u32) -> bool {
        self.staking_periods.iter().any(|p| p.contains(days))
    }

    /// Shortest duration any window admits
    pub fn min_days(&self) -> Option<u32> {
        self.staking_periods.iter().map(|p| p.min_days).min()
    }

    /// Windows rendered for messages, e.g. "Flexible: 28+ days"
    pub fn describe_periods(&self) -> String {
        self.staking_periods
            .iter()
            .map(|p| p.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Check the record invariants: at least one window, and no window whose
    /// maximum lies below its minimum
    pub(crate) fn check(&self) -> Result<(), String> {
        if self.symbol.is_empty() {
            return Err("symbol is empty".to_string());
        }
        if !self.min_stake_amount.is_finite() || self.min_stake_amount < 0.0 {
            return Err(format!("minimum stake {} is not a valid amount", self.min_stake_amount));
        }
        if self.staking_periods.is_empty() {
            return Err("no staking periods".to_string());
        }
        for period in &self.staking_periods {
            if let Some(max) = period.max_days {
                if max < period.min_days {
                    return Err(format!(
                        "period '{}' ends ({} days) before it starts ({} days)",
                        period.name, max, period.min_days
                    ));
                }
            }
        }
        Ok(())
    }
}

/// Normalize a ticker for lookup
pub fn normalize_symbol(symbol: &str) -> String {
    symbol.trim().to_uppercase()
}
