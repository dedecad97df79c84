//! Quote types
//!
//! Defines the quote record and the equality rule used to deduplicate merges.

use serde::{Deserialize, Serialize};

use crate::error::QuoteError;

/// Pseudo-category that selects every quote
pub const ALL_CATEGORIES: &str = "all";

/// A single quote
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Quote {
    /// The quote itself
    pub text: String,
    /// Free-form category label
    pub category: String,
}

impl Quote {
    /// Create a quote from user input.
    ///
    /// Both fields are trimmed and must be non-empty afterwards.
    pub fn new(text: impl AsRef<str>, category: impl AsRef<str>) -> Result<Self, QuoteError> {
        let text = text.as_ref().trim();
        let category = category.as_ref().trim();

        if text.is_empty() || category.is_empty() {
            return Err(QuoteError::Validation(
                "Please fill in both the quote and its category".to_string(),
            ));
        }

        Ok(Self {
            text: text.to_string(),
            category: category.to_string(),
        })
    }

    /// Whether this quote belongs to `category`, honoring the "all" pseudo-category
    pub fn in_category(&self, category: &str) -> bool {
        category == ALL_CATEGORIES || self.category == category
    }
}

/// Equality rule applied when merging imported or remote quotes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchRule {
    /// Two quotes are the same when both text and category match
    #[default]
    TextAndCategory,
    /// Two quotes are the same when their text matches
    TextOnly,
}

impl MatchRule {
    /// Key under which a quote is deduplicated
    pub fn key(self, quote: &Quote) -> (String, Option<String>) {
        match self {
            MatchRule::TextAndCategory => (quote.text.clone(), Some(quote.category.clone())),
            MatchRule::TextOnly => (quote.text.clone(), None),
        }
    }
}

impl std::fmt::Display for MatchRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchRule::TextAndCategory => write!(f, "text + category"),
            MatchRule::TextOnly => write!(f, "text only"),
        }
    }
}

/// Quotes shown on first launch when nothing has been persisted yet
pub fn default_quotes() -> Vec<Quote> {
    vec![
        Quote {
            text: "The best way to get started is to quit talking and begin doing.".to_string(),
            category: "Motivation".to_string(),
        },
        Quote {
            text: "Don't let yesterday take up too much of today.".to_string(),
            category: "Inspiration".to_string(),
        },
        Quote {
            text: "we do hard things.".to_string(),
            category: "Alx".to_string(),
        },
    ]
}
