//! Error types for the Daolette settlement engine
//!
//! Every failure aborts the whole call: the runtime discards all staged
//! effects, so none of these errors ever leaves a partial fund movement behind.

use crate::common::types::Address;

/// Root error type for all engine operations
#[derive(Debug, thiserror::Error)]
pub enum DaoletteError {
    /// Treasury unset, bad configuration, or missing privilege
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("Game not active yet")]
    GameInactive,

    /// Outcome set empty, too wide, or containing an unknown outcome
    #[error("Invalid bet: {0}. Returning funds.")]
    MalformedBet(#[from] MalformedBetError),

    #[error("Betting amount {stake} out of range ({min} -> {max})")]
    StakeOutOfRange { stake: u128, min: u128, max: u128 },

    #[error("Not enough in treasury to make the play (balance {balance}, payout {payout})")]
    TreasuryInsufficientFunds { balance: u128, payout: u128 },

    #[error("Caller {0} is a contract; contracts cannot play games")]
    CallerNotEligible(Address),

    #[error("Treasury error: {0}")]
    Treasury(#[from] TreasuryError),

    #[error("Arithmetic overflow while computing {0}")]
    ArithmeticOverflow(&'static str),
}

/// Configuration and administration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigurationError {
    #[error("Treasury address is not set")]
    MissingTreasury,

    #[error("Only the owner can call {operation} (caller {caller})")]
    Unauthorized { caller: Address, operation: &'static str },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidValue { field: String, value: String, reason: String },

    #[error("Failed to load configuration: {0}")]
    LoadFailed(String),

    #[error("Failed to save configuration: {0}")]
    SaveFailed(String),
}

/// Structural problems with a submitted outcome set
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MalformedBetError {
    #[error("No numbers submitted. Zero win chance")]
    NoOutcomes,

    #[error("Too many numbers submitted ({0}, max 20)")]
    TooManyOutcomes(usize),

    #[error("'{0}' is not a playable number. Numbers must be between 1 and 20, submitted as a comma separated string")]
    InvalidOutcome(String),

    #[error("No bet limit defined for {0} numbers")]
    BreadthOutOfRange(usize),
}

/// Failures reported by the treasury collaborator
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TreasuryError {
    #[error("Unknown treasury account {0}")]
    UnknownAccount(Address),

    #[error("Treasury cannot pay {requested} (balance {available})")]
    PayoutExceedsBalance { requested: u128, available: u128 },

    #[error("Treasury balance overflow")]
    BalanceOverflow,
}

pub type DaoletteResult<T> = Result<T, DaoletteError>;
