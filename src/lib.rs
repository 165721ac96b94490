//! Staking Calculator - reward estimation engine for crypto staking
//!
//! This library provides:
//! - Simple and compound reward calculations with APR/APY conversion
//! - Compounding cadence resolution (daily through annually)
//! - A per-asset staking constraints registry (minimum stake, staking windows, unbonding)
//! - Accrual schedules and unbonding-aware stake calendars
//! - Multi-platform reward comparison over pluggable yield and price sources

pub mod error;
pub mod rewards;
pub mod constraints;
pub mod market;

// Re-export commonly used types
pub use error::{CalculatorError, Result, StakeViolation};
pub use rewards::{
    apr_to_apy, calculate_staking_rewards, get_compounding_frequency, CalculatorConfig,
    CompoundingFrequency, StakingParameters, StakingResult,
};
pub use constraints::{
    get_all_staking_constraints, get_staking_constraints, is_valid_stake_amount,
    is_valid_stake_duration, CoinStakingConstraints, StakingConstraintsRegistry, StakingPeriod,
};
pub use market::{PlatformQuote, PriceSource, QuoteBook, YieldSource};
