//! Remote sync
//!
//! A sync fetches the whole remote batch first and only then merges it into
//! the collection under the controller lock, so a failed fetch changes
//! nothing. Periodic and manual syncs share `sync_once`.

pub mod remote;
pub mod scheduler;

use chrono::{DateTime, Utc};

use crate::book::{MergeReport, SharedController};
use crate::error::QuoteError;

pub use remote::{HttpRemote, RemoteSource};
pub use scheduler::{SyncHandle, SyncScheduler};

/// Result of one successful sync
#[derive(Debug, Clone, PartialEq)]
pub struct SyncReport {
    pub merge: MergeReport,
    pub finished_at: DateTime<Utc>,
}

/// Progress notifications emitted by the scheduler
#[derive(Debug, Clone, PartialEq)]
pub enum SyncEvent {
    Started,
    Completed(SyncReport),
    Failed(String),
}

/// Sync state as shown in the status indicator
#[derive(Debug, Clone, Default, PartialEq)]
pub enum SyncStatus {
    #[default]
    Idle,
    Syncing,
    Synced(SyncReport),
    Failed {
        message: String,
        at: DateTime<Utc>,
    },
}

impl SyncStatus {
    pub fn apply(&mut self, event: SyncEvent) {
        *self = match event {
            SyncEvent::Started => SyncStatus::Syncing,
            SyncEvent::Completed(report) => SyncStatus::Synced(report),
            SyncEvent::Failed(message) => SyncStatus::Failed {
                message,
                at: Utc::now(),
            },
        };
    }

    pub fn label(&self) -> String {
        match self {
            SyncStatus::Idle => "Not synced yet".to_string(),
            SyncStatus::Syncing => "Syncing with server...".to_string(),
            SyncStatus::Synced(report) => format!(
                "Synced at {}: {}",
                report.finished_at.format("%H:%M:%S"),
                report.merge
            ),
            SyncStatus::Failed { message, at } => {
                format!("Sync failed at {}: {}", at.format("%H:%M:%S"), message)
            }
        }
    }
}

/// Fetch the remote batch and merge it into the collection.
///
/// With `push` set, the merged collection is POSTed back afterwards; a failed
/// push is logged and does not fail the sync.
pub async fn sync_once(
    controller: &SharedController,
    remote: &dyn RemoteSource,
    push: bool,
) -> Result<SyncReport, QuoteError> {
    let batch = remote.fetch().await?;

    let (merge, snapshot) = {
        let mut controller = controller.lock().expect("controller mutex poisoned");
        let merge = controller.merge_quotes(batch)?;
        let snapshot = push.then(|| controller.book().quotes().to_vec());
        (merge, snapshot)
    };

    tracing::info!("Sync complete: {}", merge);

    if let Some(quotes) = snapshot {
        if let Err(e) = remote.push(&quotes).await {
            tracing::warn!("Failed to push quotes to server: {}", e);
        }
    }

    Ok(SyncReport {
        merge,
        finished_at: Utc::now(),
    })
}


#[cfg(test)]
mod tests {
    use super::testing::FakeRemote;
    use super::*;
    use crate::book::QuoteController;
    use crate::storage::MemoryStore;
    use crate::types::{MatchRule, Quote};
    use std::sync::Arc;

    fn shared(quotes: Vec<Quote>) -> SharedController {
        let store = Arc::new(MemoryStore::new());
        crate::storage::quotes::save_quotes(store.as_ref(), &quotes).unwrap();
        QuoteController::load(store, Arc::new(MemoryStore::new()), MatchRule::TextAndCategory)
            .into_shared()
    }

    fn server(text: &str) -> Quote {
        Quote::new(text, "Server").unwrap()
    }

    fn len(controller: &SharedController) -> usize {
        controller.lock().unwrap().book().len()
    }

    #[tokio::test]
    async fn test_sync_appends_new_remote_quotes() {
        let controller = shared(vec![Quote::new("Learn X", "Education").unwrap()]);
        let remote = FakeRemote::serving(vec![server("one"), server("two")]);

        let report = sync_once(&controller, &remote, false).await.unwrap();

        assert_eq!(report.merge, MergeReport { added: 2, already_present: 0 });
        let guard = controller.lock().unwrap();
        assert_eq!(guard.book().quotes()[0].text, "Learn X");
        assert_eq!(guard.book().quotes()[2].text, "two");
    }

    #[tokio::test]
    async fn test_sync_twice_is_idempotent() {
        let controller = shared(Vec::new());
        let remote = FakeRemote::serving(vec![server("one"), server("two")]);

        sync_once(&controller, &remote, false).await.unwrap();
        let second = sync_once(&controller, &remote, false).await.unwrap();

        assert_eq!(second.merge, MergeReport { added: 0, already_present: 2 });
        assert_eq!(len(&controller), 2);
    }

    #[tokio::test]
    async fn test_failed_fetch_leaves_collection_unchanged() {
        let controller = shared(vec![Quote::new("Learn X", "Education").unwrap()]);
        let remote = FakeRemote::failing();

        let result = sync_once(&controller, &remote, false).await;

        assert!(matches!(result, Err(QuoteError::Network(_))));
        assert_eq!(len(&controller), 1);
    }

    #[tokio::test]
    async fn test_push_sends_merged_collection() {
        let controller = shared(vec![Quote::new("Learn X", "Education").unwrap()]);
        let remote = FakeRemote::serving(vec![server("one")]);

        sync_once(&controller, &remote, true).await.unwrap();

        let pushed = remote.pushed.lock().unwrap();
        assert_eq!(pushed.len(), 1);
        assert_eq!(pushed[0].len(), 2);
    }

    #[tokio::test]
    async fn test_failed_push_does_not_fail_sync() {
        let controller = shared(Vec::new());
        let remote = FakeRemote {
            fail_push: true,
            ..FakeRemote::serving(vec![server("one")])
        };

        let report = sync_once(&controller, &remote, true).await.unwrap();
        assert_eq!(report.merge.added, 1);
        assert_eq!(len(&controller), 1);
    }

    #[test]
    fn test_status_transitions() {
        let mut status = SyncStatus::default();
        assert_eq!(status.label(), "Not synced yet");

        status.apply(SyncEvent::Started);
        assert_eq!(status, SyncStatus::Syncing);

        status.apply(SyncEvent::Failed("timeout".to_string()));
        assert!(status.label().contains("timeout"));

        let report = SyncReport {
            merge: MergeReport { added: 3, already_present: 1 },
            finished_at: Utc::now(),
        };
        status.apply(SyncEvent::Completed(report));
        assert!(status.label().contains("3 new, 1 already present"));
    }
}
