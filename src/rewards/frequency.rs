//! Compounding cadences and their day-count divisors

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CalculatorError;

/// Days in the calculator's year. Rates are always annualized over 365 days.
pub const DAYS_PER_YEAR: f64 = 365.0;

/// Named compounding cadence offered to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CompoundingFrequency {
    #[default]
    Daily,
    Weekly,
    Monthly,
    Quarterly,
    Annually,
}

impl CompoundingFrequency {
    /// Every cadence, shortest period first
    pub const ALL: [CompoundingFrequency; 5] = [
        CompoundingFrequency::Daily,
        CompoundingFrequency::Weekly,
        CompoundingFrequency::Monthly,
        CompoundingFrequency::Quarterly,
        CompoundingFrequency::Annually,
    ];

    /// Number of days in one compounding period
    pub fn days(&self) -> u32 {
        match self {
            CompoundingFrequency::Daily => 1,
            CompoundingFrequency::Weekly => 7,
            CompoundingFrequency::Monthly => 30,
            CompoundingFrequency::Quarterly => 90,
            CompoundingFrequency::Annually => 365,
        }
    }

    /// Compounding events per 365-day year (`365 / days`), the unit `apr_to_apy` expects
    pub fn periods_per_year(&self) -> f64 {
        DAYS_PER_YEAR / self.days() as f64
    }

    pub fn name(&self) -> &'static str {
        match self {
            CompoundingFrequency::Daily => "daily",
            CompoundingFrequency::Weekly => "weekly",
            CompoundingFrequency::Monthly => "monthly",
            CompoundingFrequency::Quarterly => "quarterly",
            CompoundingFrequency::Annually => "annually",
        }
    }
}

impl fmt::Display for CompoundingFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CompoundingFrequency {
    type Err = CalculatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|f| f.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| CalculatorError::Parse(format!("Unknown compounding frequency: {}", s)))
    }
}

/// Resolve a cadence name to its days-per-period divisor.
///
/// Names are matched case-insensitively. Anything outside the five known
/// cadences resolves to 1 (daily), so the result is always a usable divisor.
pub fn get_compounding_frequency(name: &str) -> u32 {
    name.parse::<CompoundingFrequency>()
        .map(|f| f.days())
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_cadences() {
        assert_eq!(get_compounding_frequency("daily"), 1);
        assert_eq!(get_compounding_frequency("weekly"), 7);
        assert_eq!(get_compounding_frequency("monthly"), 30);
        assert_eq!(get_compounding_frequency("quarterly"), 90);
        assert_eq!(get_compounding_frequency("annually"), 365);
    }

    #[test]
    fn test_unknown_cadence_defaults_to_daily() {
        assert_eq!(get_compounding_frequency("hourly"), 1);
        assert_eq!(get_compounding_frequency(""), 1);
        assert_eq!(get_compounding_frequency("biweekly"), 1);
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        let monthly: CompoundingFrequency = "Monthly".parse().unwrap();
        let weekly: CompoundingFrequency = " WEEKLY ".parse().unwrap();
        assert_eq!(monthly, CompoundingFrequency::Monthly);
        assert_eq!(weekly, CompoundingFrequency::Weekly);
        assert!("fortnightly".parse::<CompoundingFrequency>().is_err());
    }

    #[test]
    fn test_periods_per_year() {
        assert!((CompoundingFrequency::Daily.periods_per_year() - 365.0).abs() < 1e-12);
        assert!((CompoundingFrequency::Annually.periods_per_year() - 1.0).abs() < 1e-12);
        assert!((CompoundingFrequency::Monthly.periods_per_year() - 365.0 / 30.0).abs() < 1e-12);
    }

    #[test]
    fn test_display_round_trips_names() {
        for f in CompoundingFrequency::ALL {
            assert_eq!(get_compounding_frequency(&f.to_string()), f.days());
        }
    }
}
