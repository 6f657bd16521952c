//! Total extraction module.

mod parser;
mod ranker;
pub mod rules;

pub use parser::{ExtractionResult, TotalParser};
pub use ranker::{select_total, Ranking};

use lazy_static::lazy_static;
use rust_decimal::Decimal;

lazy_static! {
    static ref DEFAULT_PARSER: TotalParser = TotalParser::new();
}

/// Most likely total in raw OCR text, using the built-in configuration.
///
/// Returns `None` when the text holds no plausible amount. Never fails on
/// malformed input.
pub fn extract_total(raw_text: &str) -> Option<Decimal> {
    DEFAULT_PARSER.extract_total(raw_text)
}

/// Value of a single amount string, e.g. one the user picked from
/// [`rules::candidate_lines`].
pub fn parse_amount_text(text: &str) -> Option<Decimal> {
    DEFAULT_PARSER.parse_amount_text(text)
}

/// Sum of the parseable amount strings.
pub fn sum_amount_texts<I, S>(texts: I) -> Decimal
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    DEFAULT_PARSER.sum_amount_texts(texts)
}
