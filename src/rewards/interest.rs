//! Simple and compound interest over a staking period
//!
//! Rates are annual percentages spread over a 365-day year. Neither
//! calculator rejects its input: negative rates or principals produce the
//! arithmetic result, and callers that care use `StakingParameters::validate`.

use super::apy::apr_to_apy;
use super::frequency::DAYS_PER_YEAR;
use super::types::{StakingParameters, StakingResult};

/// Daily rate (decimal) for an annual percentage
fn daily_rate(apr: f64) -> f64 {
    apr / 100.0 / DAYS_PER_YEAR
}

/// Linear accrual: `interest = principal * apr/100/365 * days`
pub fn calculate_simple_interest(params: &StakingParameters) -> StakingResult {
    let interest = params.principal * daily_rate(params.apr) * params.days as f64;

    StakingResult {
        principal: params.principal,
        interest,
        total: params.principal + interest,
        apr: params.apr,
        apy: None,
    }
}

/// Compound accrual with one compounding event every `compounding_days()` days.
///
/// The number of periods is `days / period_days` as a real number, so a
/// duration that is not a whole number of periods earns a fractional period.
pub fn calculate_compound_interest(params: &StakingParameters) -> StakingResult {
    let period_days = params.compounding_days() as f64;
    let periodic_rate = daily_rate(params.apr) * period_days;
    let periods = params.days as f64 / period_days;

    let total = params.principal * (1.0 + periodic_rate).powf(periods);
    let apy = apr_to_apy(params.apr, DAYS_PER_YEAR / period_days);

    StakingResult {
        principal: params.principal,
        interest: total - params.principal,
        total,
        apr: params.apr,
        apy: Some(apy),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_simple_interest_one_year() {
        let result = calculate_simple_interest(&StakingParameters::new(100.0, 10.0, 365));
        assert_relative_eq!(result.interest, 10.0, epsilon = 1e-10);
        assert_relative_eq!(result.total, 110.0, epsilon = 1e-10);
        assert_eq!(result.apy, None);
        assert_eq!(result.apr, 10.0);
    }

    #[test]
    fn test_simple_interest_is_linear() {
        for (principal, apr, days) in [(250.0, 6.5, 45), (1.0, 100.0, 1), (10_000.0, 0.25, 730)] {
            let result = calculate_simple_interest(&StakingParameters::new(principal, apr, days));
            let expected = principal * apr / 100.0 / 365.0 * days as f64;
            assert_relative_eq!(result.interest, expected, epsilon = 1e-9);
            assert_relative_eq!(result.total, principal + expected, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_zero_days_earns_nothing() {
        let params = StakingParameters::new(500.0, 12.0, 0).with_compounding_days(30);

        let simple = calculate_simple_interest(&params);
        assert_eq!(simple.interest, 0.0);
        assert_eq!(simple.total, 500.0);

        let compound = calculate_compound_interest(&params);
        assert!(compound.interest.abs() < 1e-12);
        assert!((compound.total - 500.0).abs() < 1e-12);
    }

    #[test]
    fn test_compound_single_period_matches_simple() {
        // One compounding period spanning the whole stake
        let params = StakingParameters::new(1_000.0, 9.0, 90).with_compounding_days(90);
        let result = calculate_compound_interest(&params);
        let expected_total = 1_000.0 * (1.0 + 9.0 / 100.0 / 365.0 * 90.0);
        assert_relative_eq!(result.total, expected_total, epsilon = 1e-9);
        assert_relative_eq!(
            result.interest,
            calculate_simple_interest(&params).interest,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_compound_monthly_fractional_periods() {
        // 365 / 30 = 12.1666... periods, not truncated to 12
        let params = StakingParameters::new(1_000.0, 12.0, 365).with_compounding_days(30);
        let result = calculate_compound_interest(&params);

        let periodic_rate = 0.12 / 365.0 * 30.0;
        let expected = 1_000.0 * (1.0_f64 + periodic_rate).powf(365.0 / 30.0);
        assert_relative_eq!(result.total, expected, epsilon = 1e-9);
        assert!((result.total - 1_126.834_170_458_7).abs() < 1e-6);

        let twelve_whole_periods = 1_000.0 * (1.0_f64 + periodic_rate).powi(12);
        assert!(result.total > twelve_whole_periods);
    }

    #[test]
    fn test_compound_reports_apy() {
        let params = StakingParameters::new(1_000.0, 12.0, 365).with_compounding_days(30);
        let result = calculate_compound_interest(&params);
        let apy = result.apy.unwrap();
        assert_relative_eq!(apy, apr_to_apy(12.0, 365.0 / 30.0), epsilon = 1e-12);
        // A full year at the same cadence earns exactly the APY
        assert_relative_eq!(result.return_pct(), apy, epsilon = 1e-9);
    }

    #[test]
    fn test_compound_defaults_to_daily() {
        let params = StakingParameters::new(1_000.0, 12.0, 365);
        let result = calculate_compound_interest(&params);
        let expected = 1_000.0 * (1.0_f64 + 0.12 / 365.0).powf(365.0);
        assert_relative_eq!(result.total, expected, epsilon = 1e-9);
    }

    #[test]
    fn test_compound_beats_simple_over_many_periods() {
        let params = StakingParameters::new(1_000.0, 8.0, 720).with_compounding_days(7);
        let compound = calculate_compound_interest(&params).interest;
        assert!(compound > calculate_simple_interest(&params).interest);
    }

    /// The calculators do not guard against negative input. This pins that
    /// boundary: a negative rate yields negative interest instead of an error.
    #[test]
    fn test_negative_apr_is_not_rejected() {
        let params = StakingParameters::new(100.0, -10.0, 365);
        let simple = calculate_simple_interest(&params);
        assert_relative_eq!(simple.interest, -10.0, epsilon = 1e-10);

        let compound = calculate_compound_interest(&params);
        assert!(compound.interest < 0.0);
        assert!(params.validate().is_err());
    }
}
