//! WASM bindings for finding the total on bills and receipts.
//!
//! This crate provides WebAssembly bindings for use in browsers and Node.js.
//! Amounts cross the boundary as `f64`; use the `*_string` variants when the
//! exact decimal text matters.

use rust_decimal::Decimal;
use wasm_bindgen::prelude::*;

use billtotal_core::{KeywordSet, MonetaryCandidate, TotalParser, TotalResponse};

/// Initialize panic hook for better error messages in console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Version information.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn to_f64(value: Decimal) -> f64 {
    value.to_string().parse().unwrap_or(0.0)
}

fn to_js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Find the payable total in OCR text.
#[wasm_bindgen]
pub fn extract_total(text: &str) -> Option<f64> {
    billtotal_core::extract_total(text).map(to_f64)
}

/// Find the payable total in OCR text, as a decimal string such as `"1234.56"`.
#[wasm_bindgen]
pub fn extract_total_string(text: &str) -> Option<String> {
    billtotal_core::extract_total(text).map(|d| d.to_string())
}

/// Whether a trimmed line is, in its entirety, an amount.
#[wasm_bindgen]
pub fn looks_like_monetary_line(line: &str) -> bool {
    billtotal_core::looks_like_monetary_line(line)
}

/// Lines of `text` that look like amounts, as a `string[]`.
#[wasm_bindgen]
pub fn candidate_lines(text: &str) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(&billtotal_core::candidate_lines(text)).map_err(to_js_error)
}

/// Value of an amount string picked by the user (e.g., "1.234,56").
#[wasm_bindgen]
pub fn parse_amount_text(text: &str) -> Option<f64> {
    billtotal_core::parse_amount_text(text).map(to_f64)
}

/// Sum of a list of amount strings; unparseable entries are skipped.
#[wasm_bindgen]
pub fn sum_amount_texts(texts: Vec<String>) -> f64 {
    to_f64(billtotal_core::sum_amount_texts(&texts))
}

/// Total extractor class for browser use.
#[wasm_bindgen]
pub struct TotalExtractor {
    parser: TotalParser,
}

#[wasm_bindgen]
impl TotalExtractor {
    /// Create an extractor with the built-in keywords.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            parser: TotalParser::new(),
        }
    }

    /// Replace the total keywords (e.g., `["TOTAL", "JUMLAH"]`).
    #[wasm_bindgen]
    pub fn set_keywords(&mut self, keywords: Vec<String>) -> Result<(), JsValue> {
        let keywords = KeywordSet::new(&keywords).map_err(to_js_error)?;
        self.parser = self.parser.clone().with_keywords(keywords);
        Ok(())
    }

    /// Set the exclusive upper bound for accepted amounts.
    #[wasm_bindgen]
    pub fn set_max_amount(&mut self, max_amount: f64) -> Result<(), JsValue> {
        let max_amount = Decimal::try_from(max_amount).map_err(to_js_error)?;
        if max_amount <= Decimal::ZERO {
            return Err(JsValue::from_str("max_amount must be positive"));
        }
        self.parser = self.parser.clone().with_max_amount(max_amount);
        Ok(())
    }

    /// Find the total; `None` when the text holds no amount.
    #[wasm_bindgen]
    pub fn extract(&self, text: &str) -> Option<f64> {
        self.parser.extract_total(text).map(to_f64)
    }

    /// Get the `{ total, currency, error, candidates }` result object.
    #[wasm_bindgen]
    pub fn extract_with_candidates(&self, text: &str) -> Result<JsValue, JsValue> {
        let result = self.parser.parse(text);

        #[derive(serde::Serialize)]
        struct ExtractResult {
            #[serde(flatten)]
            response: TotalResponse,
            keyword_backed: bool,
            candidates: Vec<MonetaryCandidate>,
        }

        let response = match result.total {
            Some(total) => TotalResponse::found(total, result.currency.clone()),
            None => TotalResponse::missing(),
        };
        let output = ExtractResult {
            response,
            keyword_backed: result.is_keyword_backed(),
            candidates: result.candidates,
        };

        serde_wasm_bindgen::to_value(&output).map_err(to_js_error)
    }
}

impl Default for TotalExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_total() {
        assert_eq!(extract_total("Item 5.00\nTOTAL 12.50"), Some(12.5));
        assert_eq!(extract_total("no amounts"), None);
        assert_eq!(extract_total_string("Total Rp 45,000"), Some("45000".to_string()));
    }

    #[test]
    fn test_parse_amount_text() {
        let amount = parse_amount_text("1.234,56").unwrap();
        assert!((amount - 1234.56).abs() < 0.001);
        assert_eq!(sum_amount_texts(vec!["1.50".into(), "x".into(), "2,50".into()]), 4.0);
    }

    #[test]
    fn test_extractor_configuration() {
        let mut extractor = TotalExtractor::new();
        extractor.set_keywords(vec!["Jumlah".into()]).unwrap();
        assert_eq!(extractor.extract("Total 90.00\nJumlah 40.00"), Some(40.0));

        extractor.set_max_amount(50.0).unwrap();
        assert_eq!(extractor.extract("Grand 75.00\n30.00"), Some(30.0));
    }
}
