//! Line-by-line total extraction over a whole OCR text.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::models::config::ExtractionConfig;
use crate::models::MonetaryCandidate;

use super::ranker::{select_total, Ranking};
use super::rules::amounts::AmountExtractor;
use super::rules::format::split_lines;
use super::rules::keywords::{associated, KeywordSet};

/// Result of total extraction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractionResult {
    /// Selected total, if any amount was found.
    pub total: Option<Decimal>,
    /// Currency marker printed next to the selected total.
    pub currency: Option<String>,
    /// Every accepted candidate, in document order.
    pub candidates: Vec<MonetaryCandidate>,
    /// Distinct values by partition, largest first.
    pub ranking: Ranking,
}

impl ExtractionResult {
    /// Whether the total came from a line labelled with a keyword.
    pub fn is_keyword_backed(&self) -> bool {
        self.ranking.is_keyword_backed()
    }
}

/// Finds the payable total in OCR text.
///
/// Holds no per-call state; one parser can serve any number of threads.
#[derive(Debug, Clone, Default)]
pub struct TotalParser {
    keywords: KeywordSet,
    amounts: AmountExtractor,
}

impl TotalParser {
    /// Create a parser with the built-in keywords, bound and currency codes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a parser from validated settings.
    pub fn from_config(config: &ExtractionConfig) -> Result<Self> {
        config.validate()?;
        let keywords = KeywordSet::new(&config.keywords)?;
        let amounts = AmountExtractor::new()
            .with_max_amount(config.max_amount)
            .with_currency_codes(&config.currency_codes);
        Ok(Self { keywords, amounts })
    }

    /// Replace the keyword set.
    pub fn with_keywords(mut self, keywords: KeywordSet) -> Self {
        self.keywords = keywords;
        self
    }

    /// Set the exclusive upper bound for accepted amounts.
    pub fn with_max_amount(mut self, max_amount: Decimal) -> Self {
        self.amounts = self.amounts.with_max_amount(max_amount);
        self
    }

    /// Set the currency codes recognized next to amounts.
    pub fn with_currency_codes<I, S>(mut self, codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.amounts = self.amounts.with_currency_codes(codes);
        self
    }

    pub fn keywords(&self) -> &KeywordSet {
        &self.keywords
    }

    pub fn amounts(&self) -> &AmountExtractor {
        &self.amounts
    }

    /// All accepted amounts in `text`, tagged with line index and keyword association.
    pub fn candidates(&self, text: &str) -> Vec<MonetaryCandidate> {
        let lines: Vec<&str> = split_lines(text).collect();
        let flags = self.keywords.line_flags(&lines);

        let mut candidates = Vec::new();
        for (index, line) in lines.iter().enumerate() {
            let keyword_associated = associated(&flags, index);
            candidates.extend(self.amounts.scan(line).map(|m| MonetaryCandidate {
                value: m.value,
                raw_match: m.source,
                source_line_index: index,
                keyword_associated,
                currency: m.currency,
            }));
        }
        candidates
    }

    /// Run extraction and keep every intermediate result.
    pub fn parse(&self, text: &str) -> ExtractionResult {
        let candidates = self.candidates(text);
        if candidates.is_empty() {
            debug!("No numeric amounts found in the bill text");
            return ExtractionResult::default();
        }

        let ranking = Ranking::from_candidates(&candidates);
        let selected = select_total(&candidates);
        let total = selected.map(|c| c.value);
        let currency = selected.and_then(|c| c.currency.clone());

        if ranking.is_keyword_backed() {
            debug!("Largest keyword-associated amount: {:?}", total);
        } else {
            debug!(
                "No keyword-associated amount found, returning largest overall amount: {:?}",
                total
            );
        }

        ExtractionResult {
            total,
            currency,
            candidates,
            ranking,
        }
    }

    /// The most likely total in `text`, or `None` when no plausible amount exists.
    pub fn extract_total(&self, text: &str) -> Option<Decimal> {
        let candidates = self.candidates(text);
        Ranking::from_candidates(&candidates).best()
    }

    /// Value of an amount string picked by the user, such as `"1.234,56"` or
    /// `"Rp 45.000"`.
    pub fn parse_amount_text(&self, text: &str) -> Option<Decimal> {
        self.amounts.extract(text.trim()).map(|m| m.value)
    }

    /// Sum of the parseable amount strings; the others are skipped.
    pub fn sum_amount_texts<I, S>(&self, texts: I) -> Decimal
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        texts
            .into_iter()
            .filter_map(|t| self.parse_amount_text(t.as_ref()))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{BillTotalError, ConfigError};
    use crate::total::rules::looks_like_monetary_line;
    use pretty_assertions::assert_eq;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_empty_and_numberless_text() {
        let parser = TotalParser::new();
        assert_eq!(parser.extract_total(""), None);
        assert_eq!(parser.extract_total("no numbers here"), None);
        assert_eq!(parser.parse("no numbers here"), ExtractionResult::default());
    }

    #[test]
    fn test_keyword_associated_maximum() {
        let parser = TotalParser::new();
        assert_eq!(
            parser.extract_total("Subtotal 50.00\nTotal 75.00"),
            Some(dec("75.00"))
        );
    }

    #[test]
    fn test_carriage_return_line_endings() {
        let parser = TotalParser::new();
        let lf = "Item 100.00\nTOTAL\n45.00\nCash 200.00";
        let cr = lf.replace('\n', "\r");
        let crlf = lf.replace('\n', "\r\n");

        for text in [lf.to_string(), cr, crlf] {
            let result = parser.parse(&text);
            assert_eq!(result.total, Some(dec("45.00")), "{text:?}");
            let lines: Vec<usize> = result.candidates.iter().map(|c| c.source_line_index).collect();
            assert_eq!(lines, vec![0, 2, 3]);
        }
    }

    #[test]
    fn test_larger_subtotal_wins() {
        // Misread totals are not corrected; the largest labelled value is kept.
        let parser = TotalParser::new();
        assert_eq!(
            parser.extract_total("Subtotal 80.00\n\nTotal 8.00"),
            Some(dec("80.00"))
        );
    }

    #[test]
    fn test_largest_overall_without_keywords() {
        let parser = TotalParser::new();
        assert_eq!(
            parser.extract_total("Item A 12.00\nItem B 88.00"),
            Some(dec("88.00"))
        );
    }

    #[test]
    fn test_out_of_range_only_amount() {
        assert_eq!(TotalParser::new().extract_total("15,000,000"), None);
        assert_eq!(TotalParser::new().extract_total("TOTAL 15,000,000"), None);
    }

    #[test]
    fn test_amount_below_keyword_line() {
        let text = "COFFEE 4.50\nMUFFIN 3.25\nTOTAL\n7.75\nCASH 20.00\nCHANGE 12.25";
        let result = TotalParser::new().parse(text);

        assert_eq!(result.total, Some(dec("7.75")));
        assert!(result.is_keyword_backed());
        let flags: Vec<bool> = result.candidates.iter().map(|c| c.keyword_associated).collect();
        assert_eq!(flags, vec![false, false, true, false, false]);
    }

    #[test]
    fn test_line_after_amount_does_not_associate() {
        // 99.00 sits above the keyword, so only 10.00 is associated.
        let text = "99.00\nTOTAL DUE\n10.00";
        assert_eq!(TotalParser::new().extract_total(text), Some(dec("10.00")));
    }

    #[test]
    fn test_european_receipt() {
        let text = "REWE Markt\nBanane 1,29\nKaffee 5,49\nSUMME EUR 6,78\n\nGegeben 10,00\nRückgeld 3,22";
        let result = TotalParser::new().parse(text);
        assert_eq!(result.total, Some(dec("6.78")));
        assert_eq!(result.currency.as_deref(), Some("EUR"));
    }

    #[test]
    fn test_thousands_on_indonesian_receipt() {
        let text = "TOKO MAJU\nNasi 25.000\nTeh 5.000\nTOTAL Rp 30.000";
        // A lone dot group reads as a fraction, so 30.000 becomes 30.
        assert_eq!(TotalParser::new().extract_total(text), Some(dec("30.000")));

        let text = "TOKO MAJU\nNasi 1.025.000\nTOTAL Rp 1.030.000";
        assert_eq!(TotalParser::new().extract_total(text), Some(dec("1030000")));
    }

    #[test]
    fn test_candidates_keep_provenance() {
        let candidates = TotalParser::new().candidates("Tip 2.00\n\nTotal USD 1,234.56");
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[1].value, dec("1234.56"));
        assert_eq!(candidates[1].raw_match, "USD 1,234.56");
        assert_eq!(candidates[1].source_line_index, 2);
        assert_eq!(candidates[1].currency.as_deref(), Some("USD"));
        assert!(!candidates[0].keyword_associated);
    }

    #[test]
    fn test_idempotent() {
        let text = "Subtotal 9,99\nTax 0,80\nTotal 10,79\n\nThank you";
        let parser = TotalParser::new();
        let first = parser.parse(text);
        for _ in 0..5 {
            assert_eq!(parser.parse(text), first);
        }
        assert_eq!(first.total, parser.extract_total(text));
    }

    #[test]
    fn test_custom_keywords() {
        let parser = TotalParser::new().with_keywords(KeywordSet::new(["JUMLAH"]).unwrap());
        let text = "Total 90.00\nJumlah 40.00";
        assert_eq!(parser.extract_total(text), Some(dec("40.00")));
        assert_eq!(TotalParser::new().extract_total(text), Some(dec("90.00")));
    }

    #[test]
    fn test_custom_max_amount() {
        let parser = TotalParser::new().with_max_amount(dec("1000"));
        assert_eq!(parser.extract_total("Total 1,500.00\nItem 20.00"), Some(dec("20.00")));
    }

    #[test]
    fn test_from_config() {
        let mut config = ExtractionConfig::default();
        config.keywords = vec!["bayar".into()];
        config.max_amount = dec("500");
        let parser = TotalParser::from_config(&config).unwrap();
        assert_eq!(parser.keywords().iter().collect::<Vec<_>>(), vec!["BAYAR"]);
        assert_eq!(parser.amounts().max_amount(), dec("500"));
        assert_eq!(parser.extract_total("Total 99.00\nBayar 600.00\nBayar 45.00"), Some(dec("45.00")));

        config.max_amount = dec("-1");
        assert!(matches!(
            TotalParser::from_config(&config),
            Err(BillTotalError::Config(ConfigError::InvalidMaxAmount(_)))
        ));
    }

    #[test]
    fn test_parse_amount_text() {
        let parser = TotalParser::new();
        assert_eq!(parser.parse_amount_text(" 1.234,56 "), Some(dec("1234.56")));
        assert_eq!(parser.parse_amount_text("Rp 45.000"), Some(dec("45.000")));
        assert_eq!(parser.parse_amount_text("USD 1,200"), Some(dec("1200")));
        assert_eq!(parser.parse_amount_text("n/a"), None);
    }

    #[test]
    fn test_sum_amount_texts() {
        let parser = TotalParser::new();
        let sum = parser.sum_amount_texts(["12.50", "oops", "1.000,25", "7"]);
        assert_eq!(sum, dec("1019.75"));
        assert_eq!(parser.sum_amount_texts(Vec::<String>::new()), Decimal::ZERO);
    }

    #[test]
    fn test_classified_lines_always_yield_a_candidate() {
        let parser = TotalParser::new();
        for line in ["1,234.56", "1,234", "123.45", "123", "1.234,56", "1.234", "123,45", "12345,67", "0"] {
            assert!(looks_like_monetary_line(line));
            assert!(!parser.candidates(line).is_empty(), "{line}");
        }
    }

    #[test]
    fn test_parser_is_shareable_across_threads() {
        let parser = std::sync::Arc::new(TotalParser::new());
        let handles: Vec<_> = (1..=4u32)
            .map(|i| {
                let parser = parser.clone();
                std::thread::spawn(move || {
                    parser.extract_total(&format!("Item 1.00\nTotal {}.00", i * 10))
                })
            })
            .collect();

        for (i, handle) in (1..=4u32).zip(handles) {
            assert_eq!(handle.join().unwrap(), Some(Decimal::from(i * 10)));
        }
    }
}
