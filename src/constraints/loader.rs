//! Load a staking constraints registry from CSV
//!
//! One row per staking window. Rows sharing a symbol are merged in file
//! order; the asset-level columns are taken from the symbol's first row.

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use csv::Reader;
use log::info;

use super::registry::StakingConstraintsRegistry;
use super::types::{normalize_symbol, CoinStakingConstraints, StakingPeriod};
use crate::error::Result;

/// Raw CSV row
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    symbol: String,
    min_stake_amount: f64,
    unbonding_period: u32,
    period_name: String,
    min_days: u32,
    /// Empty = unbounded
    max_days: Option<u32>,
    #[serde(default)]
    notes: String,
    #[serde(default)]
    staking_method: String,
    /// Semicolon separated
    #[serde(default)]
    staking_risks: String,
    #[serde(default)]
    reward_type: String,
}

impl CsvRow {
    fn period(&self) -> StakingPeriod {
        StakingPeriod::new(&self.period_name, self.min_days, self.max_days)
    }

    fn into_constraints(self) -> CoinStakingConstraints {
        let staking_periods = vec![self.period()];
        let staking_risks = self
            .staking_risks
            .split(';')
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .map(str::to_string)
            .collect();

        CoinStakingConstraints {
            symbol: normalize_symbol(&self.symbol),
            min_stake_amount: self.min_stake_amount,
            unbonding_period: self.unbonding_period,
            staking_periods,
            notes: self.notes,
            staking_method: self.staking_method,
            staking_risks,
            reward_type: self.reward_type,
        }
    }
}

/// Load constraints from a CSV file
pub fn load_constraints<P: AsRef<Path>>(path: P) -> Result<StakingConstraintsRegistry> {
    let path = path.as_ref();
    let registry = load_constraints_from_reader(std::fs::File::open(path)?)?;
    info!("Loaded staking constraints for {} assets from {}", registry.len(), path.display());
    Ok(registry)
}

/// Load constraints from any reader (e.g., string buffer, network stream)
pub fn load_constraints_from_reader<R: Read>(reader: R) -> Result<StakingConstraintsRegistry> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut entries: Vec<CoinStakingConstraints> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for result in csv_reader.deserialize() {
        let row: CsvRow = result?;
        let symbol = normalize_symbol(&row.symbol);

        match positions.get(&symbol) {
            Some(&i) => entries[i].staking_periods.push(row.period()),
            None => {
                positions.insert(symbol, entries.len());
                entries.push(row.into_constraints());
            }
        }
    }

    StakingConstraintsRegistry::from_entries(entries)
}
