//! Monetary token extraction from a single OCR line.

use std::sync::Arc;

use regex::Captures;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::normalize::{default_max_amount, normalize_amount};
use super::patterns::MONEY_PATTERN;

/// Currency codes recognized next to an amount when no configuration overrides them.
pub const DEFAULT_CURRENCY_CODES: &[&str] = &[
    "USD", "EUR", "GBP", "CHF", "JPY", "CNY", "INR", "IDR", "MYR", "SGD", "AUD", "CAD", "PLN",
];

/// One amount found in a line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmountMatch {
    /// Normalized value.
    pub value: Decimal,
    /// Text that was matched, currency markers included.
    pub source: String,
    /// Byte span of the match within the line.
    pub position: (usize, usize),
    /// Currency symbol or recognized currency code next to the amount.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
}

/// Finds amount-like substrings in a line and normalizes them.
#[derive(Debug, Clone)]
pub struct AmountExtractor {
    max_amount: Decimal,
    currency_codes: Arc<[String]>,
}

impl AmountExtractor {
    pub fn new() -> Self {
        Self {
            max_amount: default_max_amount(),
            currency_codes: DEFAULT_CURRENCY_CODES.iter().map(|c| c.to_string()).collect(),
        }
    }

    /// Set the exclusive upper bound for accepted values.
    pub fn with_max_amount(mut self, max_amount: Decimal) -> Self {
        self.max_amount = max_amount;
        self
    }

    /// Set the 3-letter codes reported as currencies. Matching is case-insensitive.
    pub fn with_currency_codes<I, S>(mut self, codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.currency_codes = codes
            .into_iter()
            .map(|c| c.as_ref().trim().to_ascii_uppercase())
            .collect();
        self
    }

    /// Exclusive upper bound for accepted values.
    pub fn max_amount(&self) -> Decimal {
        self.max_amount
    }

    /// Lazily scan `line` for amounts in left-to-right order.
    ///
    /// Tokens that fail to parse or fall outside the accepted range are
    /// skipped; the iterator never yields an error.
    pub fn scan<'a>(&'a self, line: &'a str) -> impl Iterator<Item = AmountMatch> + 'a {
        MONEY_PATTERN
            .captures_iter(line)
            .filter_map(move |caps| self.to_match(&caps))
    }

    /// First amount in `line`, if any.
    pub fn extract(&self, line: &str) -> Option<AmountMatch> {
        self.scan(line).next()
    }

    fn to_match(&self, caps: &Captures<'_>) -> Option<AmountMatch> {
        let full = caps.get(0)?;
        let value = normalize_amount(caps.get(3)?.as_str(), self.max_amount)?;

        let currency = if let Some(symbol) = caps.get(2) {
            Some(symbol.as_str().to_string())
        } else {
            caps.get(1)
                .or_else(|| caps.get(4))
                .map(|code| code.as_str().to_ascii_uppercase())
                .filter(|code| self.currency_codes.iter().any(|c| c == code))
        };

        Some(AmountMatch {
            value,
            source: full.as_str().to_string(),
            position: (full.start(), full.end()),
            currency,
        })
    }
}

impl Default for AmountExtractor {
    fn default() -> Self {
        Self::new()
    }
}
