//! QuoteDeck Library
//!
//! Core library for the QuoteDeck desktop application: a persisted quote
//! collection with JSON import/export and periodic merge from a remote
//! endpoint.

pub mod app;
pub mod book;
pub mod error;
pub mod storage;
pub mod sync;
pub mod types;
pub mod ui;

pub use error::QuoteError;
