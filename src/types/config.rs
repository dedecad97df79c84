//! Configuration types
//!
//! Application and sync configuration structures.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::types::MatchRule;

pub const DEFAULT_ENDPOINT: &str = "https://jsonplaceholder.typicode.com/posts";
pub const DEFAULT_SERVER_CATEGORY: &str = "Server";

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Remote endpoint polled during sync
    pub endpoint: String,
    /// Seconds between automatic syncs (5 - 3600)
    pub sync_interval_secs: u64,
    /// Maximum number of remote records taken per sync (1 - 100)
    pub fetch_limit: usize,
    /// Category assigned to quotes coming from the server
    pub server_category: String,
    /// POST the local collection back to the endpoint after a merge
    pub push_on_sync: bool,
    /// Start the periodic sync on launch
    pub auto_sync: bool,
    /// Equality rule for import and sync merges
    pub match_rule: MatchRule,
    /// HTTP request timeout in seconds (1 - 120)
    pub request_timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            sync_interval_secs: 30,
            fetch_limit: 10,
            server_category: DEFAULT_SERVER_CATEGORY.to_string(),
            push_on_sync: false,
            auto_sync: true,
            match_rule: MatchRule::default(),
            request_timeout_secs: 10,
        }
    }
}

impl AppConfig {
    /// Repair out-of-range or blank values in place
    pub fn validate(&mut self) {
        self.sync_interval_secs = self.sync_interval_secs.clamp(5, 3600);
        self.fetch_limit = self.fetch_limit.clamp(1, 100);
        self.request_timeout_secs = self.request_timeout_secs.clamp(1, 120);

        if self.endpoint.trim().is_empty() {
            self.endpoint = DEFAULT_ENDPOINT.to_string();
        }

        if self.server_category.trim().is_empty() {
            self.server_category = DEFAULT_SERVER_CATEGORY.to_string();
        }
    }

    pub fn sync_interval(&self) -> Duration {
        Duration::from_secs(self.sync_interval_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
