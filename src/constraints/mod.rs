//! Per-asset staking constraints: minimum stake, permitted durations and
//! unbonding periods
//!
//! The process-wide registry is built once from the built-in table on first
//! use and never changes afterwards. The free functions in this module read
//! from it; build a [`StakingConstraintsRegistry`] directly (or load one with
//! [`loader::load_constraints`]) for a custom table.
//!
//! Validation is advisory. Assets missing from the table are unconstrained,
//! and the reward calculators never consult the registry themselves.

mod types;
mod registry;
mod schedule;
pub mod loader;

pub use types::{normalize_symbol, CoinStakingConstraints, StakingPeriod};
pub use registry::StakingConstraintsRegistry;
pub use schedule::StakeSchedule;

use std::sync::OnceLock;

use crate::error::Result;

static REGISTRY: OnceLock<StakingConstraintsRegistry> = OnceLock::new();

/// The process-wide registry holding the built-in table
pub fn registry() -> &'static StakingConstraintsRegistry {
    REGISTRY.get_or_init(StakingConstraintsRegistry::builtin)
}

/// Constraints for `symbol` (case-insensitive), or None if the asset is not listed
pub fn get_staking_constraints(symbol: &str) -> Option<&'static CoinStakingConstraints> {
    registry().get(symbol)
}

/// Copy of every registry entry in table order
pub fn get_all_staking_constraints() -> Vec<CoinStakingConstraints> {
    registry().all()
}

/// True if `symbol` is unlisted or `amount` meets its minimum stake
pub fn is_valid_stake_amount(symbol: &str, amount: f64) -> bool {
    registry().is_valid_stake_amount(symbol, amount)
}

/// True if `symbol` is unlisted or one of its staking windows contains `days`
pub fn is_valid_stake_duration(symbol: &str, days: u32) -> bool {
    registry().is_valid_stake_duration(symbol, days)
}

/// Amount and duration check with the reason for a rejection
pub fn validate_stake(symbol: &str, amount: f64, days: u32) -> Result<()> {
    registry().validate_stake(symbol, amount, days)
}
