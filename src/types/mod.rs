//! Shared type definitions
//!
//! This module contains the data types shared by storage, sync and the UI.

pub mod config;
pub mod quote;

pub use config::AppConfig;
pub use quote::{MatchRule, Quote, ALL_CATEGORIES};
