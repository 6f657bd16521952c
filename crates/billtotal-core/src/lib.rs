//! Core library for finding the payable total on a bill or receipt.
//!
//! This crate provides:
//! - Amount extraction from noisy OCR lines, with `1,234.56` and `1.234,56` styles
//! - Keyword association ("TOTAL", "BALANCE DUE", "SUMME", ...) and total ranking
//! - A whole-line amount classifier for building pick lists
//! - Configuration models for alternate keyword sets and bounds

pub mod error;
pub mod models;
pub mod total;

pub use error::{BillTotalError, ConfigError, Result};
pub use models::config::{BillTotalConfig, DisplayConfig, ExtractionConfig};
pub use models::total::{MonetaryCandidate, TotalResponse};
pub use total::rules::{
    candidate_lines, format_amount, looks_like_monetary_line, split_lines, AmountExtractor,
    AmountStyle, KeywordSet,
};
pub use total::{
    extract_total, parse_amount_text, sum_amount_texts, ExtractionResult, Ranking, TotalParser,
};
