//! Remote quote source
//!
//! The endpoint returns posts shaped like `{"id": 1, "title": "..."}`; each
//! title becomes a quote in the configured server category.

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::QuoteError;
use crate::types::{AppConfig, Quote};

/// Something quotes can be fetched from and pushed to
#[async_trait]
pub trait RemoteSource: Send + Sync {
    /// Fetch the full remote batch
    async fn fetch(&self) -> Result<Vec<Quote>, QuoteError>;

    /// Send the local collection upstream. The response is never merged.
    async fn push(&self, quotes: &[Quote]) -> Result<(), QuoteError>;
}

#[derive(Debug, Deserialize)]
struct ServerPost {
    #[serde(default)]
    title: String,
}

/// Map server posts to quotes, skipping blank titles
fn posts_to_quotes(posts: Vec<ServerPost>, limit: usize, category: &str) -> Vec<Quote> {
    posts
        .into_iter()
        .filter_map(|post| Quote::new(&post.title, category).ok())
        .take(limit)
        .collect()
}

/// HTTP implementation backed by reqwest
pub struct HttpRemote {
    client: reqwest::Client,
    endpoint: String,
    limit: usize,
    category: String,
}

impl HttpRemote {
    pub fn new(config: &AppConfig) -> Result<Self, QuoteError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .user_agent(concat!("QuoteDeck/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            limit: config.fetch_limit,
            category: config.server_category.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl RemoteSource for HttpRemote {
    async fn fetch(&self) -> Result<Vec<Quote>, QuoteError> {
        let response = self.client.get(&self.endpoint).send().await?;

        if !response.status().is_success() {
            return Err(QuoteError::Network(format!(
                "GET {} returned {}",
                self.endpoint,
                response.status()
            )));
        }

        let posts: Vec<ServerPost> = response.json().await?;
        let quotes = posts_to_quotes(posts, self.limit, &self.category);

        tracing::debug!("Fetched {} quotes from {}", quotes.len(), self.endpoint);
        Ok(quotes)
    }

    async fn push(&self, quotes: &[Quote]) -> Result<(), QuoteError> {
        let response = self.client.post(&self.endpoint).json(quotes).send().await?;
        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        if !status.is_success() {
            return Err(QuoteError::Network(format!(
                "POST {} returned {}",
                self.endpoint, status
            )));
        }

        tracing::info!("Pushed {} quotes, server replied {}: {}", quotes.len(), status, body);
        Ok(())
    }
}
