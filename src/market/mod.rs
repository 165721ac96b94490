//! Market data consumed by the calculator: platform yields and spot prices
//!
//! The calculator does not fetch anything itself. Live clients plug in
//! behind [`YieldSource`] and [`PriceSource`]; [`QuoteBook`] is the
//! in-memory implementation, filled directly or from CSV.

mod quotes;
mod comparison;

pub use quotes::{load_prices_from_reader, load_quotes_from_reader, QuoteBook};
pub use comparison::{compare_asset, compare_platforms, AssetComparison, PlatformEstimate};

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// One platform's yield offer for an asset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformQuote {
    pub platform_name: String,
    /// Annualized rate in percent, used directly as the calculation APR
    pub apy: f64,
    #[serde(default)]
    pub chain: Option<String>,
    #[serde(default)]
    pub tvl_usd: Option<f64>,
}

impl PlatformQuote {
    pub fn new(platform_name: &str, apy: f64) -> Self {
        Self {
            platform_name: platform_name.to_string(),
            apy,
            chain: None,
            tvl_usd: None,
        }
    }
}

/// Provider of yield-bearing platforms per asset
pub trait YieldSource {
    /// Platforms offering yield on `symbol`; empty if none are known
    fn platforms(&self, symbol: &str) -> Result<Vec<PlatformQuote>>;
}

/// Provider of spot prices
pub trait PriceSource {
    /// Price of one unit of `symbol` in the quote currency
    fn price(&self, symbol: &str) -> Option<f64>;
}
