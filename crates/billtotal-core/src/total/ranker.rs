//! Picks the total among all candidates of a document.
//!
//! Keyword-associated amounts win over everything else, and within a group
//! the largest value wins. When both "Subtotal" and "Total" are labelled the
//! larger of the two is returned, which is normally the payable amount.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::MonetaryCandidate;

/// Distinct candidate values, largest first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ranking {
    /// Values from keyword-associated candidates.
    pub keyword_values: Vec<Decimal>,
    /// Values from all candidates.
    pub all_values: Vec<Decimal>,
}

impl Ranking {
    pub fn from_candidates(candidates: &[MonetaryCandidate]) -> Self {
        let keyword_values = distinct_descending(
            candidates
                .iter()
                .filter(|c| c.keyword_associated)
                .map(|c| c.value),
        );
        let all_values = distinct_descending(candidates.iter().map(|c| c.value));

        Self {
            keyword_values,
            all_values,
        }
    }

    /// The selected total, or `None` when there were no candidates.
    pub fn best(&self) -> Option<Decimal> {
        self.keyword_values
            .first()
            .or_else(|| self.all_values.first())
            .copied()
    }

    /// Whether the selected total came from a keyword-associated line.
    pub fn is_keyword_backed(&self) -> bool {
        !self.keyword_values.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.all_values.is_empty()
    }
}

fn distinct_descending(values: impl Iterator<Item = Decimal>) -> Vec<Decimal> {
    let mut values: Vec<Decimal> = values.collect();
    values.sort_unstable_by(|a, b| b.cmp(a));
    // 75.0 and 75.00 compare equal and collapse.
    values.dedup();
    values
}

/// The candidate holding the total.
///
/// Equal values are interchangeable; among them the first one that carries a
/// currency marker is preferred, otherwise the first in document order.
pub fn select_total(candidates: &[MonetaryCandidate]) -> Option<&MonetaryCandidate> {
    let ranking = Ranking::from_candidates(candidates);
    let best = ranking.best()?;
    let keyword_only = ranking.is_keyword_backed();

    let mut tied = candidates
        .iter()
        .filter(|c| c.value == best && (!keyword_only || c.keyword_associated));

    let first = tied.next()?;
    if first.currency.is_some() {
        return Some(first);
    }
    Some(tied.find(|c| c.currency.is_some()).unwrap_or(first))
}
