//! Configuration structures for total extraction.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{ConfigError, Result};
use crate::total::rules::{default_max_amount, AmountStyle, DEFAULT_CURRENCY_CODES, DEFAULT_KEYWORDS};
use crate::total::TotalParser;

/// Main configuration for billtotal.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BillTotalConfig {
    /// Extraction settings.
    pub extraction: ExtractionConfig,

    /// Output settings.
    pub display: DisplayConfig,
}

/// Settings that change which amounts are found and how they are ranked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Phrases that mark a line as carrying the total. Case-insensitive.
    pub keywords: Vec<String>,

    /// Amounts at or above this value are discarded.
    pub max_amount: Decimal,

    /// 3-letter codes reported as the currency of an amount.
    pub currency_codes: Vec<String>,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            keywords: DEFAULT_KEYWORDS.iter().map(|k| k.to_string()).collect(),
            max_amount: default_max_amount(),
            currency_codes: DEFAULT_CURRENCY_CODES.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl ExtractionConfig {
    /// Check values that would make extraction meaningless.
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if self.keywords.is_empty() {
            return Err(ConfigError::EmptyKeywordSet);
        }
        if let Some(i) = self.keywords.iter().position(|k| k.trim().is_empty()) {
            return Err(ConfigError::BlankKeyword(i));
        }
        if self.max_amount <= Decimal::ZERO {
            return Err(ConfigError::InvalidMaxAmount(self.max_amount));
        }
        if let Some(code) = self
            .currency_codes
            .iter()
            .find(|c| c.len() != 3 || !c.chars().all(|ch| ch.is_ascii_alphabetic()))
        {
            return Err(ConfigError::InvalidCurrencyCode(code.clone()));
        }
        Ok(())
    }
}

/// Output formatting.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Separator convention for printed amounts.
    pub style: AmountStyle,
}

impl BillTotalConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Build a parser from the extraction settings.
    pub fn parser(&self) -> Result<TotalParser> {
        TotalParser::from_config(&self.extraction)
    }
}
