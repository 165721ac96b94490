//! Input and output records for a reward calculation

use serde::{Deserialize, Serialize};

use crate::error::{CalculatorError, Result};

/// Inputs for a single reward estimate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StakingParameters {
    /// Amount of the asset being staked
    pub principal: f64,

    /// Nominal annual rate in percent (5.25 = 5.25%/year)
    pub apr: f64,

    /// Staking duration in days
    pub days: u32,

    /// Days per compounding period; None means daily when compounding
    #[serde(default)]
    pub compounding_frequency: Option<u32>,
}

impl StakingParameters {
    pub fn new(principal: f64, apr: f64, days: u32) -> Self {
        Self {
            principal,
            apr,
            days,
            compounding_frequency: None,
        }
    }

    /// Set the compounding period length in days
    pub fn with_compounding_days(mut self, days_per_period: u32) -> Self {
        self.compounding_frequency = Some(days_per_period);
        self
    }

    /// Days per compounding period, never zero
    pub fn compounding_days(&self) -> u32 {
        self.compounding_frequency.filter(|&d| d > 0).unwrap_or(1)
    }

    /// Precondition check for callers that want to reject meaningless input
    /// before calculating. The calculators themselves accept anything.
    pub fn validate(&self) -> Result<()> {
        if !self.principal.is_finite() || self.principal <= 0.0 {
            return Err(CalculatorError::InvalidArgument(format!(
                "principal must be positive, got {}",
                self.principal
            )));
        }
        if !self.apr.is_finite() || self.apr < 0.0 {
            return Err(CalculatorError::InvalidArgument(format!(
                "APR must be a non-negative percentage, got {}",
                self.apr
            )));
        }
        if self.days == 0 {
            return Err(CalculatorError::InvalidArgument(
                "staking duration must be at least one day".to_string(),
            ));
        }
        if self.compounding_frequency == Some(0) {
            return Err(CalculatorError::InvalidArgument(
                "compounding period must be at least one day".to_string(),
            ));
        }
        Ok(())
    }
}

/// Outcome of a reward calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StakingResult {
    pub principal: f64,

    /// Reward earned over the staking period
    pub interest: f64,

    /// principal + interest
    pub total: f64,

    /// Nominal rate the calculation used, echoed from the input
    pub apr: f64,

    /// Effective annual yield, only set for compounded calculations
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub apy: Option<f64>,
}

impl StakingResult {
    /// Interest as a percentage of principal over the whole period
    pub fn return_pct(&self) -> f64 {
        if self.principal == 0.0 {
            0.0
        } else {
            self.interest / self.principal * 100.0
        }
    }
}
