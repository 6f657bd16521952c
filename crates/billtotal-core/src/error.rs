//! Error types for the billtotal-core library.
//!
//! Extraction itself never fails: malformed tokens are dropped and a missing
//! total is reported as `None`. Errors only come from configuration and I/O.

use rust_decimal::Decimal;
use thiserror::Error;

/// Main error type for the billtotal library.
#[derive(Error, Debug)]
pub enum BillTotalError {
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed JSON in a configuration file.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised while validating extraction settings.
#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    /// The keyword list has no entries.
    #[error("keyword set must contain at least one keyword")]
    EmptyKeywordSet,

    /// A keyword is empty or whitespace only. It would match every line.
    #[error("keyword at position {0} is blank")]
    BlankKeyword(usize),

    /// Upper sanity bound must be strictly positive.
    #[error("max_amount must be greater than zero, got {0}")]
    InvalidMaxAmount(Decimal),

    /// Currency codes are three ASCII letters.
    #[error("invalid currency code: {0:?}")]
    InvalidCurrencyCode(String),
}

/// Result type for the billtotal library.
pub type Result<T> = std::result::Result<T, BillTotalError>;
