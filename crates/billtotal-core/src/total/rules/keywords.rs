//! Total-indicating keywords and line association.

use std::sync::Arc;

use lazy_static::lazy_static;

use crate::error::ConfigError;

/// Keywords that label a payable amount on a bill.
///
/// `SUBTOTAL` is included on purpose: on some receipts it is the only
/// labelled figure, and the ranker picks the largest labelled value anyway.
pub const DEFAULT_KEYWORDS: &[&str] = &[
    "TOTAL",
    "TOTAL DUE",
    "AMOUNT DUE",
    "GRAND TOTAL",
    "BALANCE",
    "BALANCE DUE",
    "TOTAL AMOUNT",
    "PAYABLE AMOUNT",
    "NET TOTAL",
    "INVOICE TOTAL",
    "TOTAL CHARGE",
    "TOTAL PAID",
    "TOTAL TO PAY",
    "TOTAL OWED",
    "SUBTOTAL",
    "SUB TOTAL",
    "SUMME",
    "GESAMT",
];

lazy_static! {
    static ref DEFAULT_KEYWORD_SET: KeywordSet = KeywordSet {
        keywords: DEFAULT_KEYWORDS.iter().map(|k| k.to_string()).collect(),
    };
}

/// Immutable, case-insensitive set of keyword phrases.
///
/// Cloning is cheap; clones share the same storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordSet {
    /// Upper-cased, trimmed phrases.
    keywords: Arc<[String]>,
}

impl KeywordSet {
    /// Build a set from arbitrary phrases.
    pub fn new<I, S>(keywords: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut normalized = Vec::new();
        for (i, keyword) in keywords.into_iter().enumerate() {
            let keyword = keyword.as_ref().trim();
            if keyword.is_empty() {
                return Err(ConfigError::BlankKeyword(i));
            }
            let keyword = keyword.to_uppercase();
            if !normalized.contains(&keyword) {
                normalized.push(keyword);
            }
        }

        if normalized.is_empty() {
            return Err(ConfigError::EmptyKeywordSet);
        }

        Ok(Self {
            keywords: normalized.into(),
        })
    }

    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.keywords.iter().map(String::as_str)
    }

    /// Whether `line` contains any keyword, ignoring case.
    pub fn matches_line(&self, line: &str) -> bool {
        let upper = line.to_uppercase();
        self.keywords.iter().any(|k| upper.contains(k.as_str()))
    }

    /// Keyword flag for every line, in order.
    pub fn line_flags<S: AsRef<str>>(&self, lines: &[S]) -> Vec<bool> {
        lines.iter().map(|l| self.matches_line(l.as_ref())).collect()
    }

    /// Whether the amount on line `index` is tied to a keyword: the line
    /// itself or the line right above it carries one. Lines below never count.
    pub fn is_keyword_associated<S: AsRef<str>>(&self, lines: &[S], index: usize) -> bool {
        let Some(line) = lines.get(index) else {
            return false;
        };
        self.matches_line(line.as_ref())
            || (index > 0 && self.matches_line(lines[index - 1].as_ref()))
    }
}

impl Default for KeywordSet {
    fn default() -> Self {
        DEFAULT_KEYWORD_SET.clone()
    }
}

/// Association flag for line `index` given precomputed per-line keyword flags.
pub(crate) fn associated(flags: &[bool], index: usize) -> bool {
    flags.get(index).copied().unwrap_or(false)
        || (index > 0 && flags.get(index - 1).copied().unwrap_or(false))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_set_is_shared() {
        let a = KeywordSet::default();
        let b = KeywordSet::default();
        assert_eq!(a, b);
        assert_eq!(a.len(), DEFAULT_KEYWORDS.len());
    }

    #[test]
    fn test_matches_case_insensitively() {
        let set = KeywordSet::default();
        assert!(set.matches_line("Grand total:"));
        assert!(set.matches_line("balance due 10.00"));
        assert!(set.matches_line("Gesamtbetrag EUR"));
        assert!(!set.matches_line("Cash 20.00"));
    }

    #[test]
    fn test_subtotal_contains_total() {
        assert!(KeywordSet::default().matches_line("Subtotal 50.00"));
    }

    #[test]
    fn test_previous_line_counts_next_line_does_not() {
        let set = KeywordSet::default();
        let lines = ["Item 5.00", "TOTAL", "42.00", "Change 8.00"];

        assert!(!set.is_keyword_associated(&lines, 0));
        assert!(set.is_keyword_associated(&lines, 1));
        assert!(set.is_keyword_associated(&lines, 2));
        assert!(!set.is_keyword_associated(&lines, 3));
    }

    #[test]
    fn test_out_of_range_index() {
        let lines = ["TOTAL 5.00"];
        assert!(!KeywordSet::default().is_keyword_associated(&lines, 7));
    }

    #[test]
    fn test_flags_agree_with_direct_lookup() {
        let set = KeywordSet::default();
        let lines = ["Amount due", "12.00", "Thanks", "Summe 3,00", "x"];
        let flags = set.line_flags(&lines);
        for i in 0..lines.len() {
            assert_eq!(associated(&flags, i), set.is_keyword_associated(&lines, i));
        }
    }

    #[test]
    fn test_custom_set() {
        let set = KeywordSet::new(["jumlah", " Bayar "]).unwrap();
        assert_eq!(set.iter().collect::<Vec<_>>(), vec!["JUMLAH", "BAYAR"]);
        assert!(set.matches_line("Jumlah 45.000"));
        assert!(!set.matches_line("Total 45.000"));
    }

    #[test]
    fn test_invalid_sets() {
        assert_eq!(
            KeywordSet::new(Vec::<String>::new()),
            Err(ConfigError::EmptyKeywordSet)
        );
        assert_eq!(
            KeywordSet::new(["TOTAL", "  "]),
            Err(ConfigError::BlankKeyword(1))
        );
    }
}
