//! Application controller
//!
//! Owns the quote book together with its persistent and session stores.
//! Every mutation is persisted before it is kept: when saving fails the
//! appended quotes are dropped again and the error is returned.

use rand::Rng;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::book::reconcile::MergeReport;
use crate::book::transfer;
use crate::book::QuoteBook;
use crate::error::QuoteError;
use crate::storage::quotes::{
    load_last_viewed, load_quotes, load_selected_category, save_last_viewed, save_quotes,
    save_selected_category,
};
use crate::storage::KeyValueStore;
use crate::types::quote::default_quotes;
use crate::types::{MatchRule, Quote};

/// Controller handle shared between the UI and the sync task
pub type SharedController = Arc<Mutex<QuoteController>>;

pub struct QuoteController {
    book: QuoteBook,
    store: Arc<dyn KeyValueStore>,
    session: Arc<dyn KeyValueStore>,
}

impl QuoteController {
    /// Build the controller from persisted state, or the default quotes
    pub fn load(
        store: Arc<dyn KeyValueStore>,
        session: Arc<dyn KeyValueStore>,
        match_rule: MatchRule,
    ) -> Self {
        let quotes = match load_quotes(store.as_ref()) {
            Ok(Some(quotes)) => {
                tracing::info!("Loaded {} quotes from storage", quotes.len());
                quotes
            }
            Ok(None) => {
                tracing::info!("No saved quotes, starting with defaults");
                default_quotes()
            }
            Err(e) => {
                tracing::warn!("Failed to load saved quotes, starting with defaults: {}", e);
                default_quotes()
            }
        };

        let mut book = QuoteBook::new(quotes, match_rule);
        match load_selected_category(store.as_ref()) {
            Ok(category) => book.restore_category(category.as_deref()),
            Err(e) => tracing::warn!("Failed to load selected category: {}", e),
        }

        Self {
            book,
            store,
            session,
        }
    }

    pub fn into_shared(self) -> SharedController {
        Arc::new(Mutex::new(self))
    }

    pub fn book(&self) -> &QuoteBook {
        &self.book
    }

    /// Validate and append a quote from the form
    pub fn add_quote(&mut self, text: &str, category: &str) -> Result<Quote, QuoteError> {
        let quote = Quote::new(text, category)?;
        let previous_len = self.book.len();

        self.book.push(quote.clone());
        self.persist_or_rollback(previous_len)?;
        self.remember_viewed(Some(&quote));

        tracing::info!("Added quote in category {:?}", quote.category);
        Ok(quote)
    }

    /// Change the active filter and persist it
    pub fn select_category(&mut self, category: &str) -> Result<(), QuoteError> {
        let previous = self.book.selected_category().to_string();
        self.book.select_category(category)?;

        if let Err(e) = save_selected_category(self.store.as_ref(), category) {
            self.book.restore_category(Some(&previous));
            return Err(e.into());
        }
        Ok(())
    }

    /// Pick a random quote in the active category and record it as last viewed
    pub fn show_random(&mut self) -> Option<Quote> {
        self.show_random_with(&mut rand::thread_rng())
    }

    pub fn show_random_with<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<Quote> {
        let picked = self.book.pick_random(rng).cloned();
        self.remember_viewed(picked.as_ref());
        picked
    }

    /// Keep showing the last viewed quote while it fits the active category,
    /// otherwise pick a new one
    pub fn current_or_random(&mut self) -> Option<Quote> {
        self.current_or_random_with(&mut rand::thread_rng())
    }

    pub fn current_or_random_with<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<Quote> {
        match self.last_viewed() {
            Some(quote) => Some(quote),
            None => self.show_random_with(rng),
        }
    }

    /// The last displayed quote, if it is still in the active category
    pub fn last_viewed(&self) -> Option<Quote> {
        match load_last_viewed(self.session.as_ref()) {
            Ok(quote) => quote.filter(|q| q.in_category(self.book.selected_category())),
            Err(e) => {
                tracing::warn!("Failed to read last viewed quote: {}", e);
                None
            }
        }
    }

    pub fn export_json(&self) -> Result<String, QuoteError> {
        transfer::export_json(self.book.quotes())
    }

    pub fn export_to_dir(&self, dir: &Path) -> Result<PathBuf, QuoteError> {
        transfer::export_to_dir(dir, self.book.quotes())
    }

    /// Validate an import document and merge it
    pub fn import_json(&mut self, json: &str) -> Result<MergeReport, QuoteError> {
        let quotes = transfer::parse_import(json)?;
        self.merge_quotes(quotes)
    }

    /// Merge already-validated quotes (import file or remote batch)
    pub fn merge_quotes(&mut self, quotes: Vec<Quote>) -> Result<MergeReport, QuoteError> {
        let previous_len = self.book.len();
        let report = self.book.merge(quotes);

        if report.added > 0 {
            self.persist_or_rollback(previous_len)?;
        }
        Ok(report)
    }

    fn persist_or_rollback(&mut self, previous_len: usize) -> Result<(), QuoteError> {
        if let Err(e) = save_quotes(self.store.as_ref(), self.book.quotes()) {
            tracing::error!("Failed to save quotes, discarding change: {}", e);
            self.book.truncate(previous_len);
            return Err(e.into());
        }
        Ok(())
    }

    fn remember_viewed(&self, quote: Option<&Quote>) {
        if let Err(e) = save_last_viewed(self.session.as_ref(), quote) {
            tracing::warn!("Failed to record last viewed quote: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{FileStore, MemoryStore, StorageError};
    use crate::types::ALL_CATEGORIES;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// Store whose writes always fail
    struct ReadOnlyStore;

    impl KeyValueStore for ReadOnlyStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Ok(None)
        }

        fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "read-only",
            )))
        }

        fn remove(&self, _key: &str) -> Result<(), StorageError> {
            Ok(())
        }
    }

    fn memory_controller() -> QuoteController {
        QuoteController::load(
            Arc::new(MemoryStore::new()),
            Arc::new(MemoryStore::new()),
            MatchRule::TextAndCategory,
        )
    }

    fn controller_with(quotes: &[Quote]) -> QuoteController {
        let store = Arc::new(MemoryStore::new());
        save_quotes(store.as_ref(), quotes).unwrap();
        QuoteController::load(store, Arc::new(MemoryStore::new()), MatchRule::TextAndCategory)
    }

    #[test]
    fn test_starts_with_defaults() {
        let controller = memory_controller();
        assert_eq!(controller.book().quotes(), default_quotes().as_slice());
        assert_eq!(controller.book().selected_category(), ALL_CATEGORIES);
    }

    #[test]
    fn test_corrupt_storage_falls_back_to_defaults() {
        let store = Arc::new(MemoryStore::new());
        store.set("quotes", "garbage").unwrap();
        let controller =
            QuoteController::load(store, Arc::new(MemoryStore::new()), MatchRule::TextAndCategory);
        assert_eq!(controller.book().len(), 3);
    }

    #[test]
    fn test_add_quote_persists() {
        let dir = tempfile::tempdir().unwrap();
        let store: Arc<dyn KeyValueStore> = Arc::new(FileStore::open(dir.path()));
        let mut controller = QuoteController::load(
            store.clone(),
            Arc::new(MemoryStore::new()),
            MatchRule::TextAndCategory,
        );

        let quote = controller.add_quote(" Keep going ", "Motivation").unwrap();
        assert_eq!(quote.text, "Keep going");
        assert_eq!(controller.book().len(), 4);

        let reloaded = QuoteController::load(
            Arc::new(FileStore::open(dir.path())),
            Arc::new(MemoryStore::new()),
            MatchRule::TextAndCategory,
        );
        assert_eq!(reloaded.book().quotes(), controller.book().quotes());
    }

    #[test]
    fn test_add_rejects_empty_fields() {
        let mut controller = memory_controller();
        assert!(matches!(
            controller.add_quote("", "Motivation"),
            Err(QuoteError::Validation(_))
        ));
        assert!(matches!(
            controller.add_quote("Text", ""),
            Err(QuoteError::Validation(_))
        ));
        assert_eq!(controller.book().len(), 3);
    }

    #[test]
    fn test_corrupt_store_file_does_not_block_changes() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(crate::storage::kv::STORE_FILE), "{garbage").unwrap();

        let mut controller = QuoteController::load(
            Arc::new(FileStore::open(dir.path())),
            Arc::new(MemoryStore::new()),
            MatchRule::TextAndCategory,
        );
        assert_eq!(controller.book().len(), 3);

        controller.add_quote("Keep going", "Motivation").unwrap();
        controller
            .merge_quotes(vec![Quote::new("Remote", "Server").unwrap()])
            .unwrap();

        let reloaded = QuoteController::load(
            Arc::new(FileStore::open(dir.path())),
            Arc::new(MemoryStore::new()),
            MatchRule::TextAndCategory,
        );
        assert_eq!(reloaded.book().len(), 5);
        assert_eq!(reloaded.book().quotes(), controller.book().quotes());
    }

    #[test]
    fn test_add_rolls_back_when_save_fails() {
        let mut controller = QuoteController::load(
            Arc::new(ReadOnlyStore),
            Arc::new(MemoryStore::new()),
            MatchRule::TextAndCategory,
        );

        let result = controller.add_quote("Unsaved", "Nowhere");
        assert!(matches!(result, Err(QuoteError::Storage(_))));
        assert_eq!(controller.book().len(), 3);
    }

    #[test]
    fn test_import_merges_into_collection() {
        let mut controller = controller_with(&[Quote::new("Learn X", "Education").unwrap()]);

        let report = controller
            .import_json(r#"[{"text":"Stay positive!","category":"Motivation"}]"#)
            .unwrap();

        assert_eq!(report, MergeReport { added: 1, already_present: 0 });
        assert_eq!(
            controller.book().quotes(),
            &[
                Quote::new("Learn X", "Education").unwrap(),
                Quote::new("Stay positive!", "Motivation").unwrap(),
            ]
        );
    }

    #[test]
    fn test_invalid_import_changes_nothing() {
        let mut controller = memory_controller();
        let result = controller.import_json(r#"[{"text":"No category"}]"#);
        assert!(matches!(result, Err(QuoteError::InvalidImport(_))));
        assert_eq!(controller.book().len(), 3);
    }

    #[test]
    fn test_merge_rolls_back_when_save_fails() {
        let mut controller = QuoteController::load(
            Arc::new(ReadOnlyStore),
            Arc::new(MemoryStore::new()),
            MatchRule::TextAndCategory,
        );
        let result = controller.merge_quotes(vec![Quote::new("Remote", "Server").unwrap()]);
        assert!(result.is_err());
        assert_eq!(controller.book().len(), 3);
    }

    #[test]
    fn test_export_then_import_into_empty_collection() {
        let source = memory_controller();
        let exported = source.export_json().unwrap();

        let mut target = controller_with(&[]);
        target.import_json(&exported).unwrap();
        assert_eq!(target.book().quotes(), source.book().quotes());
    }

    #[test]
    fn test_selected_category_survives_reload() {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let mut controller = QuoteController::load(
            store.clone(),
            Arc::new(MemoryStore::new()),
            MatchRule::TextAndCategory,
        );
        controller.select_category("Inspiration").unwrap();

        let reloaded =
            QuoteController::load(store, Arc::new(MemoryStore::new()), MatchRule::TextAndCategory);
        assert_eq!(reloaded.book().selected_category(), "Inspiration");
    }

    #[test]
    fn test_select_category_rolls_back_when_save_fails() {
        let mut controller = QuoteController::load(
            Arc::new(ReadOnlyStore),
            Arc::new(MemoryStore::new()),
            MatchRule::TextAndCategory,
        );
        assert!(controller.select_category("Alx").is_err());
        assert_eq!(controller.book().selected_category(), ALL_CATEGORIES);
    }

    #[test]
    fn test_show_random_tracks_last_viewed() {
        let mut controller = memory_controller();
        let mut rng = StdRng::seed_from_u64(3);

        let shown = controller.show_random_with(&mut rng).unwrap();
        assert_eq!(controller.last_viewed(), Some(shown));
    }

    #[test]
    fn test_show_random_with_no_match_clears_last_viewed() {
        let mut controller = controller_with(&[]);
        assert!(controller.show_random_with(&mut StdRng::seed_from_u64(1)).is_none());
        assert!(controller.last_viewed().is_none());
    }

    #[test]
    fn test_current_or_random_keeps_quote_within_filter() {
        let mut controller = memory_controller();
        let mut rng = StdRng::seed_from_u64(11);
        let added = controller.add_quote("Keep going", "Motivation").unwrap();

        controller.select_category("Motivation").unwrap();
        assert_eq!(controller.current_or_random_with(&mut rng), Some(added));

        controller.select_category("Alx").unwrap();
        let shown = controller.current_or_random_with(&mut rng).unwrap();
        assert_eq!(shown.category, "Alx");
        assert_eq!(controller.last_viewed(), Some(shown));
    }

    #[test]
    fn test_last_viewed_hidden_outside_filter() {
        let mut controller = memory_controller();
        controller.add_quote("Keep going", "Motivation").unwrap();
        controller.select_category("Alx").unwrap();
        assert!(controller.last_viewed().is_none());
    }
}
