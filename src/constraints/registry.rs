//! Staking constraints registry and the built-in constraints table

use std::collections::HashMap;

use log::debug;

use super::types::{normalize_symbol, CoinStakingConstraints, StakingPeriod};
use crate::error::{CalculatorError, Result, StakeViolation};

/// Read-only table of staking constraints keyed by uppercase symbol.
///
/// Lookups for symbols that are not in the table return `None`, and the
/// validation predicates treat such symbols as unconstrained.
#[derive(Debug, Clone)]
pub struct StakingConstraintsRegistry {
    entries: Vec<CoinStakingConstraints>,
    index: HashMap<String, usize>,
}

impl StakingConstraintsRegistry {
    /// Registry holding the built-in constraints table
    pub fn builtin() -> Self {
        let entries = builtin_entries();
        let index = entries
            .iter()
            .enumerate()
            .map(|(i, c)| (c.symbol.clone(), i))
            .collect();
        debug!("Built-in staking constraints: {} assets", entries.len());
        Self { entries, index }
    }

    /// Build a registry from arbitrary entries, keeping their order.
    ///
    /// Symbols are normalized to uppercase. Fails on an entry that breaks the
    /// record invariants or on two entries with the same symbol.
    pub fn from_entries(entries: Vec<CoinStakingConstraints>) -> Result<Self> {
        let mut normalized = Vec::with_capacity(entries.len());
        let mut index = HashMap::with_capacity(entries.len());

        for mut entry in entries {
            entry.symbol = normalize_symbol(&entry.symbol);
            entry
                .check()
                .map_err(|reason| CalculatorError::InvalidConstraints {
                    symbol: entry.symbol.clone(),
                    reason,
                })?;
            if index.insert(entry.symbol.clone(), normalized.len()).is_some() {
                return Err(CalculatorError::DuplicateSymbol(entry.symbol));
            }
            normalized.push(entry);
        }

        debug!("Staking constraints registry: {} assets", normalized.len());
        Ok(Self {
            entries: normalized,
            index,
        })
    }

    /// Case-insensitive lookup
    pub fn get(&self, symbol: &str) -> Option<&CoinStakingConstraints> {
        self.index
            .get(&normalize_symbol(symbol))
            .map(|&i| &self.entries[i])
    }

    /// Copy of every entry in table order
    pub fn all(&self) -> Vec<CoinStakingConstraints> {
        self.entries.clone()
    }

    /// Symbols in table order
    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|c| c.symbol.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True if the symbol is unconstrained or `amount` meets its minimum
    pub fn is_valid_stake_amount(&self, symbol: &str, amount: f64) -> bool {
        self.get(symbol).map_or(true, |c| c.is_valid_amount(amount))
    }

    /// True if the symbol is unconstrained or some staking window contains `days`
    pub fn is_valid_stake_duration(&self, symbol: &str, days: u32) -> bool {
        self.get(symbol).map_or(true, |c| c.is_valid_duration(days))
    }

    /// Check amount, then duration, reporting the first rule broken
    pub fn validate_stake(&self, symbol: &str, amount: f64, days: u32) -> Result<()> {
        let Some(constraints) = self.get(symbol) else {
            debug!("No staking constraints for {}, accepting stake", symbol);
            return Ok(());
        };

        if !constraints.is_valid_amount(amount) {
            return Err(StakeViolation::BelowMinimum {
                symbol: constraints.symbol.clone(),
                amount,
                minimum: constraints.min_stake_amount,
            }
            .into());
        }

        if !constraints.is_valid_duration(days) {
            return Err(StakeViolation::DurationOutsideWindows {
                symbol: constraints.symbol.clone(),
                days,
                windows: constraints.describe_periods(),
            }
            .into());
        }

        Ok(())
    }
}

impl Default for StakingConstraintsRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

#[allow(clippy::too_many_arguments)]
fn coin(
    symbol: &str,
    min_stake_amount: f64,
    unbonding_period: u32,
    staking_periods: Vec<StakingPeriod>,
    notes: &str,
    staking_method: &str,
    staking_risks: &[&str],
    reward_type: &str,
) -> CoinStakingConstraints {
    CoinStakingConstraints {
        symbol: symbol.to_string(),
        min_stake_amount,
        unbonding_period,
        staking_periods,
        notes: notes.to_string(),
        staking_method: staking_method.to_string(),
        staking_risks: staking_risks.iter().map(|r| r.to_string()).collect(),
        reward_type: reward_type.to_string(),
    }
}

/// The curated constraints table
fn builtin_entries() -> Vec<CoinStakingConstraints> {
    vec![
        coin(
            "ETH",
            0.01,
            0,
            vec![StakingPeriod::open_ended("Flexible", 1)],
            "Pooled and liquid staking accept small amounts; a solo validator needs 32 ETH",
            "Liquid staking or validator deposit",
            &["Smart contract risk", "Validator slashing", "Liquid token depeg"],
            "Rebasing or exchange-rate accrual",
        ),
        coin(
            "SOL",
            0.01,
            2,
            vec![StakingPeriod::open_ended("Flexible", 1)],
            "Stake activates and deactivates at epoch boundaries (about 2 days)",
            "Delegation to a validator",
            &["Validator downtime", "Commission changes"],
            "Paid each epoch, auto-compounded into the stake account",
        ),
        coin(
            "ADA",
            10.0,
            0,
            vec![StakingPeriod::open_ended("Flexible", 20)],
            "First rewards arrive after about four epochs; funds never leave the wallet",
            "Delegation to a stake pool",
            &["Pool saturation", "Pool operator fees"],
            "Paid each epoch, auto-compounded",
        ),
        coin(
            "DOT",
            1.0,
            28,
            vec![StakingPeriod::open_ended("Flexible", 28)],
            "Nomination pools accept 1 DOT; direct nomination needs a much higher dynamic minimum",
            "Nomination pool or direct nomination",
            &["Validator slashing", "28 day unbonding lock", "Inactive nominations earn nothing"],
            "Paid each era, claimable or auto-compounded by pools",
        ),
        coin(
            "KSM",
            0.1,
            7,
            vec![StakingPeriod::open_ended("Flexible", 7)],
            "Kusama eras last six hours",
            "Nomination pool or direct nomination",
            &["Validator slashing", "7 day unbonding lock"],
            "Paid each era",
        ),
        coin(
            "ATOM",
            0.1,
            21,
            vec![StakingPeriod::open_ended("Flexible", 1)],
            "Redelegation between validators is instant; undelegation takes 21 days",
            "Delegation to a validator",
            &["Validator slashing", "Jailing for downtime", "21 day unbonding lock"],
            "Accrues every block, claimed manually",
        ),
        coin(
            "AVAX",
            25.0,
            0,
            vec![StakingPeriod::new("Delegation", 14, Some(365))],
            "Stake is locked for the chosen term and returned automatically when it ends",
            "Delegation to a validator",
            &["Validator uptime below 80% forfeits rewards", "Funds locked for the full term"],
            "Paid at the end of the staking term",
        ),
        coin(
            "NEAR",
            1.0,
            2,
            vec![StakingPeriod::open_ended("Flexible", 1)],
            "Unstaked funds unlock after 4 epochs (about 52 hours)",
            "Delegation to a staking pool",
            &["Validator kicked out of the active set", "Pool fees"],
            "Auto-compounded each epoch",
        ),
        coin(
            "MATIC",
            1.0,
            3,
            vec![StakingPeriod::open_ended("Flexible", 1)],
            "Unbonding takes 80 checkpoints (about 3 days)",
            "Delegation to a validator on Ethereum",
            &["Validator slashing", "Ethereum gas costs to claim"],
            "Accrues per checkpoint, claimed or restaked manually",
        ),
        coin(
            "TRX",
            1.0,
            14,
            vec![StakingPeriod::open_ended("Frozen", 3)],
            "Staked TRX also grants bandwidth or energy",
            "Freeze and vote for super representatives",
            &["14 day unfreeze delay", "Vote rewards depend on SR ranking"],
            "Voting rewards claimed every 24 hours",
        ),
        coin(
            "CRO",
            100.0,
            28,
            vec![
                StakingPeriod::fixed("1 Month", 30),
                StakingPeriod::fixed("3 Months", 90),
                StakingPeriod::fixed("6 Months", 180),
            ],
            "Fixed terms only; early withdrawal is not possible",
            "Fixed-term locked staking",
            &["Funds locked for the full term", "28 day unbonding after the term"],
            "Paid at the end of the term",
        ),
        coin(
            "XTZ",
            1.0,
            0,
            vec![StakingPeriod::open_ended("Flexible", 1)],
            "Delegated balances stay spendable; rewards start after a few cycles",
            "Delegation to a baker",
            &["Baker stops paying rewards", "Baker over-delegation"],
            "Paid by the baker each cycle",
        ),
    ]
}
