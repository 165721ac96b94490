//! In-memory quote book and its CSV loaders

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use csv::Reader;
use log::info;

use super::{PlatformQuote, PriceSource, YieldSource};
use crate::constraints::normalize_symbol;
use crate::error::Result;

/// Platform quotes and prices keyed by uppercase symbol
#[derive(Debug, Clone, Default)]
pub struct QuoteBook {
    quotes: HashMap<String, Vec<PlatformQuote>>,
    prices: HashMap<String, f64>,
}

impl QuoteBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load quotes and, optionally, prices from CSV files
    pub fn from_csv<P: AsRef<Path>>(quotes_path: P, prices_path: Option<P>) -> Result<Self> {
        let mut book = Self::new();
        let quotes_file = std::fs::File::open(quotes_path.as_ref())?;
        for (symbol, quote) in load_quotes_from_reader(quotes_file)? {
            book.add_quote(&symbol, quote);
        }
        if let Some(path) = prices_path {
            for (symbol, price) in load_prices_from_reader(std::fs::File::open(path.as_ref())?)? {
                book.set_price(&symbol, price);
            }
        }
        info!(
            "Quote book: {} assets with quotes, {} prices",
            book.quotes.len(),
            book.prices.len()
        );
        Ok(book)
    }

    pub fn add_quote(&mut self, symbol: &str, quote: PlatformQuote) {
        self.quotes.entry(normalize_symbol(symbol)).or_default().push(quote);
    }

    pub fn set_price(&mut self, symbol: &str, price: f64) {
        self.prices.insert(normalize_symbol(symbol), price);
    }

    /// Symbols with at least one quote, sorted
    pub fn symbols(&self) -> Vec<String> {
        let mut symbols: Vec<String> = self.quotes.keys().cloned().collect();
        symbols.sort();
        symbols
    }
}

impl YieldSource for QuoteBook {
    fn platforms(&self, symbol: &str) -> Result<Vec<PlatformQuote>> {
        Ok(self
            .quotes
            .get(&normalize_symbol(symbol))
            .cloned()
            .unwrap_or_default())
    }
}

impl PriceSource for QuoteBook {
    fn price(&self, symbol: &str) -> Option<f64> {
        self.prices.get(&normalize_symbol(symbol)).copied()
    }
}

#[derive(Debug, serde::Deserialize)]
struct QuoteRow {
    symbol: String,
    platform: String,
    apy: f64,
    chain: Option<String>,
    tvl_usd: Option<f64>,
}

#[derive(Debug, serde::Deserialize)]
struct PriceRow {
    symbol: String,
    price: f64,
}

/// Read `symbol,platform,apy,chain,tvl_usd` rows
pub fn load_quotes_from_reader<R: Read>(reader: R) -> Result<Vec<(String, PlatformQuote)>> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut quotes = Vec::new();

    for result in csv_reader.deserialize() {
        let row: QuoteRow = result?;
        quotes.push((
            normalize_symbol(&row.symbol),
            PlatformQuote {
                platform_name: row.platform,
                apy: row.apy,
                chain: row.chain.filter(|c| !c.is_empty()),
                tvl_usd: row.tvl_usd,
            },
        ));
    }

    Ok(quotes)
}

/// Read `symbol,price` rows
pub fn load_prices_from_reader<R: Read>(reader: R) -> Result<Vec<(String, f64)>> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut prices = Vec::new();

    for result in csv_reader.deserialize() {
        let row: PriceRow = result?;
        prices.push((normalize_symbol(&row.symbol), row.price));
    }

    Ok(prices)
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUOTES: &str = "\
symbol,platform,apy,chain,tvl_usd
dot,Polkadot Pool,14.2,Polkadot,120000000
DOT,Bifrost,11.8,,
eth,Lido,3.1,Ethereum,9000000000
";

    #[test]
    fn test_load_quotes() {
        let quotes = load_quotes_from_reader(QUOTES.as_bytes()).unwrap();
        assert_eq!(quotes.len(), 3);
        assert_eq!(quotes[0].0, "DOT");
        assert_eq!(quotes[0].1.chain.as_deref(), Some("Polkadot"));
        assert_eq!(quotes[1].1.chain, None);
        assert_eq!(quotes[1].1.tvl_usd, None);
        assert_eq!(quotes[2].1.tvl_usd, Some(9_000_000_000.0));
    }

    #[test]
    fn test_book_lookup_is_case_insensitive() {
        let mut book = QuoteBook::new();
        for (symbol, quote) in load_quotes_from_reader(QUOTES.as_bytes()).unwrap() {
            book.add_quote(&symbol, quote);
        }
        book.set_price("dot", 6.5);

        assert_eq!(book.platforms("Dot").unwrap().len(), 2);
        assert!(book.platforms("ATOM").unwrap().is_empty());
        assert_eq!(book.price("DOT"), Some(6.5));
        assert_eq!(book.price("ETH"), None);
        assert_eq!(book.symbols(), vec!["DOT", "ETH"]);
    }

    #[test]
    fn test_load_prices() {
        let prices = load_prices_from_reader("symbol,price\nsol,142.5\n".as_bytes()).unwrap();
        assert_eq!(prices, vec![("SOL".to_string(), 142.5)]);
    }
}
