//! Compiled regex patterns shared by the amount rules.
//!
//! Digits are spelled `[0-9]` rather than `\d` so that non-ASCII digits never
//! produce a match that the decimal parser would reject afterwards.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Monetary token inside a noisy line.
    ///
    /// Groups: 1 = 3-letter prefix word, 2 = currency symbol,
    /// 3 = numeric part, 4 = 3-letter suffix word.
    ///
    /// The grouped alternative must come first: with the plain one first,
    /// `45,000` would be cut into `45,00` and `0`.
    pub static ref MONEY_PATTERN: Regex = Regex::new(
        r"(?i)(?:\b([a-z]{3})\s*|(\p{Sc})\s*)?([0-9]{1,3}(?:[.,][0-9]{3})+(?:[.,][0-9]{2})?|[0-9]+(?:[.,][0-9]{2})?)(?:\s*([a-z]{3})\b)?"
    ).unwrap();

    /// A whole line that is nothing but an amount.
    pub static ref MONETARY_LINE: Regex = Regex::new(
        r"(?x)^(?:
            [0-9]{1,3}(?:,[0-9]{3})*(?:\.[0-9]{2})?     # 1,234.56 | 1,234 | 123.45 | 123
            |
            [0-9]{1,3}(?:\.[0-9]{3})*(?:,[0-9]{2})?     # 1.234,56 | 1.234 | 123,45
            |
            [0-9]+(?:[.,][0-9]{2})?                     # 12345.67 | 12345,67
            |
            [0-9]+                                      # 25000
        )$"
    ).unwrap();
}
