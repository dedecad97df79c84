//! Quote collection
//!
//! `QuoteBook` holds the ordered collection and the active category filter.
//! It only ever grows: quotes are appended by the form, by imports and by
//! remote sync, and are never edited or removed.

pub mod controller;
pub mod reconcile;
pub mod transfer;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::QuoteError;
use crate::types::{MatchRule, Quote, ALL_CATEGORIES};

pub use controller::{QuoteController, SharedController};
pub use reconcile::MergeReport;

#[derive(Debug, Clone)]
pub struct QuoteBook {
    quotes: Vec<Quote>,
    selected_category: String,
    match_rule: MatchRule,
}

impl QuoteBook {
    pub fn new(quotes: Vec<Quote>, match_rule: MatchRule) -> Self {
        Self {
            quotes,
            selected_category: ALL_CATEGORIES.to_string(),
            match_rule,
        }
    }

    pub fn quotes(&self) -> &[Quote] {
        &self.quotes
    }

    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }

    pub fn match_rule(&self) -> MatchRule {
        self.match_rule
    }

    pub fn selected_category(&self) -> &str {
        &self.selected_category
    }

    /// Distinct categories in order of first appearance, led by "all"
    pub fn categories(&self) -> Vec<String> {
        let mut categories = vec![ALL_CATEGORIES.to_string()];
        for quote in &self.quotes {
            if !categories.contains(&quote.category) {
                categories.push(quote.category.clone());
            }
        }
        categories
    }

    pub fn has_category(&self, category: &str) -> bool {
        category == ALL_CATEGORIES || self.quotes.iter().any(|q| q.category == category)
    }

    /// Change the active filter; unknown categories are rejected
    pub fn select_category(&mut self, category: &str) -> Result<(), QuoteError> {
        if !self.has_category(category) {
            return Err(QuoteError::Validation(format!(
                "Unknown category: {}",
                category
            )));
        }
        self.selected_category = category.to_string();
        Ok(())
    }

    /// Restore a persisted filter, falling back to "all" when it no longer applies
    pub fn restore_category(&mut self, category: Option<&str>) {
        self.selected_category = match category {
            Some(category) if self.has_category(category) => category.to_string(),
            _ => ALL_CATEGORIES.to_string(),
        };
    }

    /// Quotes in the active category, in collection order
    pub fn filtered(&self) -> Vec<&Quote> {
        self.quotes
            .iter()
            .filter(|quote| quote.in_category(&self.selected_category))
            .collect()
    }

    /// Uniform pick among the filtered quotes; `None` when nothing matches
    pub fn pick_random<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&Quote> {
        self.filtered().choose(rng).copied()
    }

    pub fn push(&mut self, quote: Quote) {
        self.quotes.push(quote);
    }

    /// Append the incoming quotes that are not already present
    pub fn merge(&mut self, incoming: impl IntoIterator<Item = Quote>) -> MergeReport {
        reconcile::reconcile(&mut self.quotes, incoming, self.match_rule)
    }

    /// Drop quotes appended after `len`; used to undo a mutation that could not be saved
    pub(crate) fn truncate(&mut self, len: usize) {
        self.quotes.truncate(len);
    }
}
