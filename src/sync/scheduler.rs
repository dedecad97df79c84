//! Periodic sync task
//!
//! Runs `sync_once` on a fixed interval until its handle is cancelled or
//! dropped. The first tick fires immediately, so a sync happens at startup.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::book::SharedController;
use crate::sync::{sync_once, RemoteSource, SyncEvent};

/// Starts recurring sync tasks
pub struct SyncScheduler {
    controller: SharedController,
    remote: Arc<dyn RemoteSource>,
    interval: Duration,
    push: bool,
}

impl SyncScheduler {
    pub fn new(controller: SharedController, remote: Arc<dyn RemoteSource>, interval: Duration) -> Self {
        Self {
            controller,
            remote,
            interval,
            push: false,
        }
    }

    /// POST the collection back after each merge
    pub fn with_push(mut self, push: bool) -> Self {
        self.push = push;
        self
    }

    /// Spawn the task on the current tokio runtime.
    ///
    /// Outcomes are sent on `events`; a closed receiver is ignored.
    pub fn start(self, events: mpsc::UnboundedSender<SyncEvent>) -> SyncHandle {
        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(self.interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            tracing::info!("Periodic sync started, every {:?}", self.interval);

            loop {
                tokio::select! {
                    biased;

                    changed = shutdown_rx.changed() => {
                        if changed.is_err() || *shutdown_rx.borrow() {
                            break;
                        }
                    }
                    _ = ticker.tick() => {
                        if *shutdown_rx.borrow() {
                            break;
                        }

                        let _ = events.send(SyncEvent::Started);
                        let event = match sync_once(&self.controller, self.remote.as_ref(), self.push).await {
                            Ok(report) => SyncEvent::Completed(report),
                            Err(e) => {
                                tracing::warn!("Periodic sync failed: {}", e);
                                SyncEvent::Failed(e.to_string())
                            }
                        };
                        let _ = events.send(event);
                    }
                }
            }

            tracing::info!("Periodic sync stopped");
        });

        SyncHandle {
            shutdown: shutdown_tx,
            task: Some(task),
        }
    }
}

/// Cancellation handle for a running sync task; dropping it cancels the task
pub struct SyncHandle {
    shutdown: watch::Sender<bool>,
    task: Option<JoinHandle<()>>,
}

impl SyncHandle {
    /// Stop scheduling new syncs. A sync already in flight finishes.
    pub fn cancel(&self) {
        let _ = self.shutdown.send(true);
    }

    /// Cancel and wait for the task to exit
    pub async fn stop(mut self) {
        self.cancel();
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                tracing::warn!("Sync task ended abnormally: {}", e);
            }
        }
    }
}

impl Drop for SyncHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}
