//! Root Dioxus application component
//!
//! This module contains the main App component and the state shared across
//! the UI tree.

use crate::book::{QuoteController, SharedController};
use crate::error::QuoteError;
use crate::storage::settings::{load_settings, save_settings};
use crate::storage::{get_data_dir, FileStore, KeyValueStore, MemoryStore};
use crate::sync::{sync_once, HttpRemote, RemoteSource, SyncEvent, SyncHandle, SyncScheduler, SyncStatus};
use crate::types::{AppConfig, Quote};
use crate::ui::Layout;
use dioxus::prelude::*;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Kind of message shown in the status line
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum NoticeKind {
    Info,
    Error,
}

/// User-visible status message
#[derive(Clone, PartialEq, Debug)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

/// Global application state shared across components
#[derive(Clone)]
pub struct AppState {
    pub controller: SharedController,
    /// `None` when the HTTP client could not be built
    pub remote: Option<Arc<dyn RemoteSource>>,
    pub config: Signal<AppConfig>,
    /// Where exports go by default; `None` when running without a data dir
    pub data_dir: Option<PathBuf>,
    /// Bumped after every mutation so views re-read the controller
    pub revision: Signal<u64>,
    pub current_quote: Signal<Option<Quote>>,
    pub notice: Signal<Option<Notice>>,
    pub sync_status: Signal<SyncStatus>,
    pub scheduler: Signal<Option<SyncHandle>>,
}

impl AppState {
    pub fn new() -> Self {
        let config = load_settings();

        let data_dir = match get_data_dir() {
            Ok(dir) => Some(dir),
            Err(e) => {
                tracing::warn!("No data directory, quotes will not persist: {}", e);
                None
            }
        };
        let store: Arc<dyn KeyValueStore> = match &data_dir {
            Some(dir) => Arc::new(FileStore::open(dir)),
            None => Arc::new(MemoryStore::new()),
        };

        let mut controller =
            QuoteController::load(store, Arc::new(MemoryStore::new()), config.match_rule);
        let first_quote = controller.current_or_random();

        let remote: Option<Arc<dyn RemoteSource>> = match HttpRemote::new(&config) {
            Ok(remote) => Some(Arc::new(remote)),
            Err(e) => {
                tracing::error!("Failed to create HTTP client, sync disabled: {}", e);
                None
            }
        };

        tracing::info!("AppState initialized");
        Self {
            controller: controller.into_shared(),
            remote,
            config: Signal::new(config),
            data_dir,
            revision: Signal::new(0),
            current_quote: Signal::new(first_quote),
            notice: Signal::new(None),
            sync_status: Signal::new(SyncStatus::Idle),
            scheduler: Signal::new(None),
        }
    }

    pub fn notify(&self, message: impl Into<String>) {
        let mut notice = self.notice;
        notice.set(Some(Notice {
            kind: NoticeKind::Info,
            message: message.into(),
        }));
    }

    pub fn report_error(&self, context: &str, error: &QuoteError) {
        tracing::error!("{}: {}", context, error);
        let mut notice = self.notice;
        notice.set(Some(Notice {
            kind: NoticeKind::Error,
            message: error.to_string(),
        }));
    }

    /// Tell views the collection changed
    pub fn refresh(&self) {
        let mut revision = self.revision;
        revision += 1;
    }

    /// Pick a new random quote for the display region
    pub fn show_random(&self) {
        let picked = self
            .controller
            .lock()
            .expect("controller mutex poisoned")
            .show_random();
        let mut current_quote = self.current_quote;
        current_quote.set(picked);
    }

    /// Re-render the display after a filter change, keeping the quote when it still applies
    pub fn show_current_or_random(&self) {
        let picked = self
            .controller
            .lock()
            .expect("controller mutex poisoned")
            .current_or_random();
        let mut current_quote = self.current_quote;
        current_quote.set(picked);
    }

    pub fn auto_sync_running(&self) -> bool {
        self.scheduler.read().is_some()
    }

    /// Start the periodic sync and route its events into the UI
    pub fn start_auto_sync(&self) {
        let Some(remote) = self.remote.clone() else {
            return;
        };
        if self.auto_sync_running() {
            return;
        }

        let config = self.config.read().clone();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let handle = SyncScheduler::new(self.controller.clone(), remote, config.sync_interval())
            .with_push(config.push_on_sync)
            .start(tx);
        let mut scheduler = self.scheduler;
        scheduler.set(Some(handle));

        let app_state = self.clone();
        spawn(async move {
            while let Some(event) = rx.recv().await {
                app_state.apply_sync_event(event);
            }
        });
    }

    pub fn stop_auto_sync(&self) {
        let mut scheduler = self.scheduler;
        if let Some(handle) = scheduler.write().take() {
            handle.cancel();
        };
    }

    /// Pause or resume the periodic sync and remember the choice in settings
    pub fn set_auto_sync(&self, enabled: bool) {
        if enabled {
            self.start_auto_sync();
        } else {
            self.stop_auto_sync();
        }

        let mut config = self.config;
        config.write().auto_sync = enabled;
        if let Err(e) = save_settings(&config.read()) {
            tracing::warn!("Failed to save auto-sync setting: {}", e);
        };
    }

    /// Run one sync right away, alongside any periodic run
    pub fn sync_now(&self) {
        let Some(remote) = self.remote.clone() else {
            self.notify("Sync is unavailable: the HTTP client could not be created");
            return;
        };

        let app_state = self.clone();
        let push = self.config.read().push_on_sync;
        spawn(async move {
            app_state.apply_sync_event(SyncEvent::Started);
            let event = match sync_once(&app_state.controller, remote.as_ref(), push).await {
                Ok(report) => SyncEvent::Completed(report),
                Err(e) => SyncEvent::Failed(e.to_string()),
            };
            app_state.apply_sync_event(event);
        });
    }

    fn apply_sync_event(&self, event: SyncEvent) {
        match &event {
            SyncEvent::Completed(report) if report.merge.added > 0 => {
                self.refresh();
                self.notify(format!(
                    "Quotes synced with server: {} new",
                    report.merge.added
                ));
            }
            SyncEvent::Failed(message) => {
                tracing::error!("Sync failed: {}", message);
            }
            _ => {}
        }

        let mut sync_status = self.sync_status;
        sync_status.write().apply(event);
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[component]
pub fn App() -> Element {
    let app_state = use_context_provider(AppState::new);

    use_hook(move || {
        if app_state.config.read().auto_sync {
            app_state.start_auto_sync();
        }
    });

    rsx! {
        Layout {}
    }
}
