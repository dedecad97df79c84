//! Merge of incoming quotes into the local collection
//!
//! Presence is the whole conflict model: local quotes are never touched and
//! incoming quotes that do not match an existing one are appended in order.

use serde::Serialize;
use std::collections::HashSet;

use crate::types::{MatchRule, Quote};

/// Outcome of a merge
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MergeReport {
    /// Quotes appended to the collection
    pub added: usize,
    /// Incoming quotes that were already known
    pub already_present: usize,
}

impl MergeReport {
    pub fn total(&self) -> usize {
        self.added + self.already_present
    }
}

impl std::fmt::Display for MergeReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} new, {} already present",
            self.added, self.already_present
        )
    }
}

/// Select the incoming quotes that are not yet in `local`.
///
/// Duplicates inside `incoming` are kept once, at their first position.
pub fn new_quotes(
    local: &[Quote],
    incoming: impl IntoIterator<Item = Quote>,
    rule: MatchRule,
) -> (Vec<Quote>, MergeReport) {
    let mut seen: HashSet<(String, Option<String>)> =
        local.iter().map(|quote| rule.key(quote)).collect();
    let mut fresh = Vec::new();
    let mut report = MergeReport::default();

    for quote in incoming {
        if seen.insert(rule.key(&quote)) {
            fresh.push(quote);
            report.added += 1;
        } else {
            report.already_present += 1;
        }
    }

    (fresh, report)
}

/// Append the incoming quotes missing from `local` and report the counts
pub fn reconcile(
    local: &mut Vec<Quote>,
    incoming: impl IntoIterator<Item = Quote>,
    rule: MatchRule,
) -> MergeReport {
    let (fresh, report) = new_quotes(local, incoming, rule);
    local.extend(fresh);
    report
}
