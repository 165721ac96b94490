//! Conversion between nominal APR and effective APY
//!
//! Both directions take `periods_per_year`, the number of compounding events
//! in a year. A day-count cadence converts to it as `365 / days_per_period`
//! (see [`super::CompoundingFrequency::periods_per_year`]).

/// Daily compounding over a 365-day year
pub const DEFAULT_PERIODS_PER_YEAR: f64 = 365.0;

/// Effective annual yield (percent) of a nominal annual rate (percent).
///
/// `apy = ((1 + apr/100/n)^n - 1) * 100`. `periods_per_year` must be positive.
pub fn apr_to_apy(apr: f64, periods_per_year: f64) -> f64 {
    let rate = apr / 100.0;
    ((1.0 + rate / periods_per_year).powf(periods_per_year) - 1.0) * 100.0
}

/// [`apr_to_apy`] with daily compounding
pub fn apr_to_apy_daily(apr: f64) -> f64 {
    apr_to_apy(apr, DEFAULT_PERIODS_PER_YEAR)
}

/// Nominal annual rate (percent) that compounds to the given APY (percent).
///
/// Inverse of [`apr_to_apy`]: `apr = ((1 + apy/100)^(1/n) - 1) * n * 100`.
pub fn apy_to_apr(apy: f64, periods_per_year: f64) -> f64 {
    let yield_rate = apy / 100.0;
    ((1.0 + yield_rate).powf(1.0 / periods_per_year) - 1.0) * periods_per_year * 100.0
}
