//! Error types for the staking calculator

use thiserror::Error;

/// Crate-wide result alias
pub type Result<T> = std::result::Result<T, CalculatorError>;

/// Errors raised by loaders, registry construction and advisory validation.
///
/// The interest calculators themselves never fail; see [`crate::rewards`].
#[derive(Debug, Error)]
pub enum CalculatorError {
    /// A calculation input failed its precondition check
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A constraints entry breaks the registry invariants
    #[error("Invalid staking constraints for {symbol}: {reason}")]
    InvalidConstraints { symbol: String, reason: String },

    /// Two constraints entries share a normalized symbol
    #[error("Duplicate staking constraints for symbol {0}")]
    DuplicateSymbol(String),

    /// A stake was rejected by the constraints registry
    #[error("Stake rejected: {0}")]
    StakeRejected(#[from] StakeViolation),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A field could not be parsed into its expected type
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Why a stake does not satisfy an asset's constraints
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StakeViolation {
    #[error("{amount} {symbol} is below the minimum stake of {minimum} {symbol}")]
    BelowMinimum {
        symbol: String,
        amount: f64,
        minimum: f64,
    },

    #[error("{days} days is outside every staking window for {symbol} ({windows})")]
    DurationOutsideWindows {
        symbol: String,
        days: u32,
        /// Human readable list of the permitted windows
        windows: String,
    },
}
