//! Side-by-side reward estimates across the platforms quoting an asset

use log::{debug, warn};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::{PlatformQuote, PriceSource, YieldSource};
use crate::constraints::{normalize_symbol, StakingConstraintsRegistry};
use crate::error::Result;
use crate::rewards::{calculate_staking_rewards, CalculatorConfig, StakingResult};

/// Reward estimate for staking on one platform
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformEstimate {
    pub platform_name: String,
    pub chain: Option<String>,
    pub tvl_usd: Option<f64>,
    pub result: StakingResult,
    /// Reward in the quote currency, when a price is known
    pub interest_value: Option<f64>,
    /// principal + reward in the quote currency, when a price is known
    pub total_value: Option<f64>,
}

/// Every platform's estimate for one asset, best first
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetComparison {
    pub symbol: String,
    pub price: Option<f64>,
    pub estimates: Vec<PlatformEstimate>,
}

impl AssetComparison {
    pub fn best(&self) -> Option<&PlatformEstimate> {
        self.estimates.first()
    }
}

/// Estimate rewards on every quote in parallel, highest reward first.
///
/// Each quote's APY is used as the calculation APR. Quotes with a negative
/// or non-finite rate are dropped.
pub fn compare_platforms(
    quotes: &[PlatformQuote],
    principal: f64,
    days: u32,
    config: &CalculatorConfig,
    price: Option<f64>,
) -> Vec<PlatformEstimate> {
    let mut estimates: Vec<PlatformEstimate> = quotes
        .par_iter()
        .filter(|quote| {
            let usable = quote.apy.is_finite() && quote.apy >= 0.0;
            if !usable {
                warn!("Skipping {}: unusable rate {}", quote.platform_name, quote.apy);
            }
            usable
        })
        .map(|quote| {
            let params = config.parameters(principal, quote.apy, days);
            let result = calculate_staking_rewards(&params, config.compound);
            PlatformEstimate {
                platform_name: quote.platform_name.clone(),
                chain: quote.chain.clone(),
                tvl_usd: quote.tvl_usd,
                interest_value: price.map(|p| result.interest * p),
                total_value: price.map(|p| result.total * p),
                result,
            }
        })
        .collect();

    estimates.sort_by(|a, b| {
        b.result
            .interest
            .total_cmp(&a.result.interest)
            .then_with(|| a.platform_name.cmp(&b.platform_name))
    });
    estimates
}

/// Pull quotes and price for `symbol`, optionally enforce its staking
/// constraints, and compare every platform
pub fn compare_asset<S>(
    source: &S,
    registry: &StakingConstraintsRegistry,
    symbol: &str,
    principal: f64,
    days: u32,
    config: &CalculatorConfig,
) -> Result<AssetComparison>
where
    S: YieldSource + PriceSource,
{
    if config.enforce_constraints {
        registry.validate_stake(symbol, principal, days)?;
    }

    let quotes = source.platforms(symbol)?;
    let price = source.price(symbol);
    debug!("{}: {} platforms, price {:?}", symbol, quotes.len(), price);

    Ok(AssetComparison {
        symbol: normalize_symbol(symbol),
        price,
        estimates: compare_platforms(&quotes, principal, days, config, price),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CalculatorError;
    use crate::market::QuoteBook;
    use approx::assert_relative_eq;

    fn quotes() -> Vec<PlatformQuote> {
        vec![
            PlatformQuote::new("Low", 4.0),
            PlatformQuote::new("High", 15.0),
            PlatformQuote::new("Broken", f64::NAN),
            PlatformQuote::new("Mid", 9.0),
            PlatformQuote::new("Negative", -3.0),
        ]
    }

    #[test]
    fn test_sorted_by_reward() {
        let estimates = compare_platforms(&quotes(), 100.0, 365, &CalculatorConfig::simple(), None);
        let names: Vec<&str> = estimates.iter().map(|e| e.platform_name.as_str()).collect();
        assert_eq!(names, vec!["High", "Mid", "Low"]);
        assert_relative_eq!(estimates[0].result.interest, 15.0, epsilon = 1e-9);
        assert!(estimates[0].interest_value.is_none());
    }

    #[test]
    fn test_ties_sorted_by_name() {
        let quotes = vec![PlatformQuote::new("Beta", 5.0), PlatformQuote::new("Alpha", 5.0)];
        let estimates = compare_platforms(&quotes, 100.0, 30, &CalculatorConfig::default(), None);
        assert_eq!(estimates[0].platform_name, "Alpha");
        assert_eq!(estimates[1].platform_name, "Beta");
    }

    #[test]
    fn test_price_values() {
        let config = CalculatorConfig::simple();
        let estimates = compare_platforms(&quotes(), 100.0, 365, &config, Some(2.0));
        assert_relative_eq!(estimates[0].interest_value.unwrap(), 30.0, epsilon = 1e-9);
        assert_relative_eq!(estimates[0].total_value.unwrap(), 230.0, epsilon = 1e-9);
    }

    #[test]
    fn test_compare_asset_enforces_constraints() {
        let mut book = QuoteBook::new();
        book.add_quote("DOT", PlatformQuote::new("Pool", 14.0));
        book.set_price("DOT", 6.0);
        let registry = StakingConstraintsRegistry::builtin();
        let config = CalculatorConfig::default();

        let comparison = compare_asset(&book, &registry, "dot", 10.0, 30, &config).unwrap();
        assert_eq!(comparison.symbol, "DOT");
        assert_eq!(comparison.price, Some(6.0));
        assert_eq!(comparison.best().unwrap().platform_name, "Pool");

        let rejected = compare_asset(&book, &registry, "DOT", 10.0, 7, &config);
        assert!(matches!(rejected, Err(CalculatorError::StakeRejected(_))));

        let lenient = CalculatorConfig {
            enforce_constraints: false,
            ..CalculatorConfig::default()
        };
        assert!(compare_asset(&book, &registry, "DOT", 10.0, 7, &lenient).is_ok());
    }

    #[test]
    fn test_compare_unknown_asset() {
        let book = QuoteBook::new();
        let registry = StakingConstraintsRegistry::builtin();
        let comparison =
            compare_asset(&book, &registry, "xyz", 1.0, 1, &CalculatorConfig::default()).unwrap();
        assert!(comparison.estimates.is_empty());
        assert!(comparison.best().is_none());
    }
}
