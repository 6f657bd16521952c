//! Extraction result types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// An amount found in the bill text, with where it came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonetaryCandidate {
    /// Normalized value, always in `[0, max_amount)`.
    pub value: Decimal,

    /// Matched text, currency markers included.
    pub raw_match: String,

    /// Zero-based index of the line the amount was found on.
    pub source_line_index: usize,

    /// The line itself or the line above carries a total keyword.
    pub keyword_associated: bool,

    /// Currency symbol or code printed next to the amount.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
}

/// Total lookup outcome in the same shape as the remote find-total service,
/// so callers can treat both sources alike.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TotalResponse {
    #[serde(with = "rust_decimal::serde::float_option")]
    pub total: Option<Decimal>,

    pub currency: Option<String>,

    /// Error message, if the lookup itself failed.
    pub error: Option<String>,
}

impl TotalResponse {
    pub fn found(total: Decimal, currency: Option<String>) -> Self {
        Self {
            total: Some(total),
            currency,
            error: None,
        }
    }

    pub fn missing() -> Self {
        Self::default()
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            total: None,
            currency: None,
            error: Some(error.into()),
        }
    }
}
