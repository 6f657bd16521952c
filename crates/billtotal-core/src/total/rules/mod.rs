//! Rule-based building blocks for total extraction.

pub mod amounts;
pub mod format;
pub mod keywords;
pub mod normalize;
pub mod patterns;

pub use amounts::{AmountExtractor, AmountMatch, DEFAULT_CURRENCY_CODES};
pub use format::{
    candidate_lines, format_amount, looks_like_monetary_line, split_lines, AmountStyle,
};
pub use keywords::{KeywordSet, DEFAULT_KEYWORDS};
pub use normalize::{default_max_amount, normalize_amount, normalize_separators, parse_number};
pub use patterns::*;
