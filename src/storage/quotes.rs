//! Quote collection storage
//!
//! Typed access to the keys QuoteDeck keeps in its key-value stores.

use crate::storage::{KeyValueStore, StorageError};
use crate::types::Quote;

/// Persistent key holding the JSON array of quotes
pub const QUOTES_KEY: &str = "quotes";
/// Persistent key holding the last selected category
pub const SELECTED_CATEGORY_KEY: &str = "selectedCategory";
/// Session key holding the last displayed quote
pub const LAST_VIEWED_KEY: &str = "lastViewedQuote";

/// Load the persisted collection.
///
/// Returns `None` when nothing has been saved yet.
pub fn load_quotes(store: &dyn KeyValueStore) -> Result<Option<Vec<Quote>>, StorageError> {
    match store.get(QUOTES_KEY)? {
        Some(json) if !json.trim().is_empty() => Ok(Some(serde_json::from_str(&json)?)),
        _ => Ok(None),
    }
}

pub fn save_quotes(store: &dyn KeyValueStore, quotes: &[Quote]) -> Result<(), StorageError> {
    let json = serde_json::to_string(quotes)?;
    store.set(QUOTES_KEY, &json)?;
    tracing::debug!("Saved {} quotes", quotes.len());
    Ok(())
}

pub fn load_selected_category(store: &dyn KeyValueStore) -> Result<Option<String>, StorageError> {
    Ok(store
        .get(SELECTED_CATEGORY_KEY)?
        .filter(|category| !category.trim().is_empty()))
}

pub fn save_selected_category(store: &dyn KeyValueStore, category: &str) -> Result<(), StorageError> {
    store.set(SELECTED_CATEGORY_KEY, category)
}

pub fn load_last_viewed(session: &dyn KeyValueStore) -> Result<Option<Quote>, StorageError> {
    match session.get(LAST_VIEWED_KEY)? {
        Some(json) => Ok(Some(serde_json::from_str(&json)?)),
        None => Ok(None),
    }
}

/// Record the displayed quote, or clear the entry when nothing is shown
pub fn save_last_viewed(
    session: &dyn KeyValueStore,
    quote: Option<&Quote>,
) -> Result<(), StorageError> {
    match quote {
        Some(quote) => session.set(LAST_VIEWED_KEY, &serde_json::to_string(quote)?),
        None => session.remove(LAST_VIEWED_KEY),
    }
}
