//! Reward calculation: interest formulas, APR/APY conversion and the
//! calculation facade
//!
//! # Example
//!
//! ```rust
//! use staking_calculator::rewards::{calculate_staking_rewards, StakingParameters};
//!
//! let params = StakingParameters::new(100.0, 10.0, 365);
//! let result = calculate_staking_rewards(&params, false);
//! assert!((result.total - 110.0).abs() < 1e-9);
//! ```

mod types;
mod frequency;
mod interest;
mod apy;
mod accrual;

pub use types::{StakingParameters, StakingResult};
pub use frequency::{get_compounding_frequency, CompoundingFrequency, DAYS_PER_YEAR};
pub use interest::{calculate_compound_interest, calculate_simple_interest};
pub use apy::{apr_to_apy, apr_to_apy_daily, apy_to_apr, DEFAULT_PERIODS_PER_YEAR};
pub use accrual::{project_rewards, AccrualRow, AccrualSchedule, MAX_ACCRUAL_ROWS};

use log::{debug, warn};
use serde::{Deserialize, Serialize};

/// Single entry point for a reward estimate.
///
/// Dispatches to the compound or simple calculator. Parameters are not
/// validated here; callers check them against the constraints registry and
/// `StakingParameters::validate` first. A missing or zero compounding
/// period is treated as daily.
pub fn calculate_staking_rewards(params: &StakingParameters, use_compound: bool) -> StakingResult {
    if use_compound {
        if !matches!(params.compounding_frequency, Some(d) if d > 0) {
            warn!(
                "No usable compounding period ({:?}), compounding daily",
                params.compounding_frequency
            );
        }
        debug!(
            "Compound rewards: principal={} apr={} days={} period_days={}",
            params.principal,
            params.apr,
            params.days,
            params.compounding_days()
        );
        calculate_compound_interest(params)
    } else {
        debug!(
            "Simple rewards: principal={} apr={} days={}",
            params.principal, params.apr, params.days
        );
        calculate_simple_interest(params)
    }
}

/// Calculation preferences shared by the CLI and Lambda entry points
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculatorConfig {
    /// Compound rewards instead of simple interest
    pub compound: bool,

    /// Compounding cadence when `compound` is set
    pub compounding: CompoundingFrequency,

    /// Reject stakes that break the asset's staking constraints
    pub enforce_constraints: bool,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            compound: true,
            compounding: CompoundingFrequency::Daily,
            enforce_constraints: true,
        }
    }
}

impl CalculatorConfig {
    /// Simple interest, no compounding
    pub fn simple() -> Self {
        Self {
            compound: false,
            ..Default::default()
        }
    }

    /// Set the compounding cadence
    pub fn with_compounding(mut self, compounding: CompoundingFrequency) -> Self {
        self.compounding = compounding;
        self
    }

    /// Build calculation parameters carrying this config's compounding period
    pub fn parameters(&self, principal: f64, apr: f64, days: u32) -> StakingParameters {
        StakingParameters::new(principal, apr, days).with_compounding_days(self.compounding.days())
    }

    /// Run the facade with this config
    pub fn calculate(&self, principal: f64, apr: f64, days: u32) -> StakingResult {
        calculate_staking_rewards(&self.parameters(principal, apr, days), self.compound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_facade_simple_path() {
        let result = calculate_staking_rewards(&StakingParameters::new(100.0, 10.0, 365), false);
        assert_relative_eq!(result.interest, 10.0, epsilon = 1e-10);
        assert_relative_eq!(result.total, 110.0, epsilon = 1e-10);
        assert!(result.apy.is_none());
    }

    #[test]
    fn test_facade_compound_path() {
        let params = StakingParameters::new(1_000.0, 12.0, 365).with_compounding_days(30);
        let result = calculate_staking_rewards(&params, true);
        assert_eq!(result, calculate_compound_interest(&params));
        assert!(result.apy.is_some());
    }

    #[test]
    fn test_facade_zero_frequency_compounds_daily() {
        let zero = StakingParameters::new(1_000.0, 5.0, 100).with_compounding_days(0);
        let daily = StakingParameters::new(1_000.0, 5.0, 100).with_compounding_days(1);
        assert_eq!(
            calculate_staking_rewards(&zero, true).total,
            calculate_staking_rewards(&daily, true).total
        );
    }

    #[test]
    fn test_facade_is_deterministic() {
        let params = StakingParameters::new(42.0, 6.3, 77).with_compounding_days(7);
        let first = calculate_staking_rewards(&params, true);
        let second = calculate_staking_rewards(&params, true);
        assert_eq!(first, second);
    }

    #[test]
    fn test_zero_days_both_paths() {
        let params = StakingParameters::new(250.0, 20.0, 0);
        for use_compound in [true, false] {
            let result = calculate_staking_rewards(&params, use_compound);
            assert!(result.interest.abs() < 1e-12);
            assert!((result.total - 250.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_config_defaults() {
        let config: CalculatorConfig = serde_json::from_str("{}").unwrap();
        assert!(config.compound);
        assert_eq!(config.compounding, CompoundingFrequency::Daily);
        assert!(config.enforce_constraints);

        let config: CalculatorConfig =
            serde_json::from_str(r#"{"compounding": "weekly", "compound": false}"#).unwrap();
        assert_eq!(config.compounding, CompoundingFrequency::Weekly);
        assert!(!config.compound);
    }

    #[test]
    fn test_config_calculate() {
        let config = CalculatorConfig::default().with_compounding(CompoundingFrequency::Monthly);
        let result = config.calculate(1_000.0, 12.0, 365);
        assert!((result.total - 1_126.834_170_458_7).abs() < 1e-6);

        let simple = CalculatorConfig::simple().calculate(100.0, 10.0, 365);
        assert_relative_eq!(simple.total, 110.0, epsilon = 1e-10);
    }
}
