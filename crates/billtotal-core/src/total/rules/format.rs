//! Whole-line amount shapes and display formatting.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::patterns::MONETARY_LINE;

/// Whether `line` is, in its entirety, an amount such as `1,234.56`,
/// `1.234,56`, `123,45` or `25000`.
///
/// The caller trims the line. Unlike the extractor this is a full-string
/// match, so `Rp 1.234` or `Total 5.00` are rejected.
pub fn looks_like_monetary_line(line: &str) -> bool {
    MONETARY_LINE.is_match(line)
}

/// Split `text` on `\r\n`, `\n` or a lone `\r`.
///
/// Some OCR engines end lines with a bare carriage return, which
/// [`str::lines`] would leave inside a single line. A trailing terminator
/// yields a final empty line.
pub fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    let mut rest = Some(text);
    std::iter::from_fn(move || {
        let current = rest?;
        match current.find(['\r', '\n']) {
            Some(i) => {
                let skip = if current[i..].starts_with("\r\n") { 2 } else { 1 };
                rest = Some(&current[i + skip..]);
                Some(&current[..i])
            }
            None => {
                rest = None;
                Some(current)
            }
        }
    })
}

/// Trimmed, non-blank lines of `text` that look like amounts, in order.
///
/// Used to offer the user a short pick list when the automatic total is
/// missing or doubtful.
pub fn candidate_lines(text: &str) -> Vec<String> {
    split_lines(text)
        .map(str::trim)
        .filter(|l| !l.is_empty() && looks_like_monetary_line(l))
        .map(str::to_string)
        .collect()
}

/// Separator convention used when printing amounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AmountStyle {
    /// `1,234.56`
    #[default]
    Dot,
    /// `1.234,56`
    Comma,
}

impl AmountStyle {
    fn separators(self) -> (char, char) {
        match self {
            AmountStyle::Dot => (',', '.'),
            AmountStyle::Comma => ('.', ','),
        }
    }
}

/// Format an amount with thousands grouping and two decimals.
pub fn format_amount(amount: Decimal, style: AmountStyle) -> String {
    let (group_sep, decimal_sep) = style.separators();
    let s = format!("{:.2}", amount.round_dp(2).abs());
    let (integer_part, decimal_part) = s.split_once('.').unwrap_or((s.as_str(), "00"));

    let digits: Vec<char> = integer_part.chars().collect();
    let mut formatted = String::new();
    if amount.is_sign_negative() && !amount.round_dp(2).is_zero() {
        formatted.push('-');
    }

    for (i, c) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            formatted.push(group_sep);
        }
        formatted.push(*c);
    }

    formatted.push(decimal_sep);
    formatted.push_str(decimal_part);
    formatted
}
