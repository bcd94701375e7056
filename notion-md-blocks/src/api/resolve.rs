//! Destination resolution
//!
//! Decides which existing page a new page is created under. The publisher
//! only sees the [`DestinationResolver`] trait, so the search heuristic can be
//! replaced or stubbed without touching conversion or upload.

use super::NotionClient;
use crate::error::SyncError;
use async_trait::async_trait;
use tracing::debug;

/// The page new documents are created under.
#[derive(Debug, Clone, PartialEq)]
pub struct Destination {
    pub id: String,
    /// Human readable title, when known.
    pub title: Option<String>,
}

/// Maps a name hint (usually the document title) to a destination.
#[async_trait]
pub trait DestinationResolver: Send + Sync {
    async fn resolve(&self, hint: &str) -> Result<Destination, SyncError>;
}

/// Always resolves to the same page, typically from `--parent`.
#[derive(Debug, Clone)]
pub struct FixedDestination {
    id: String,
}

impl FixedDestination {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

#[async_trait]
impl DestinationResolver for FixedDestination {
    async fn resolve(&self, _hint: &str) -> Result<Destination, SyncError> {
        Ok(Destination {
            id: self.id.clone(),
            title: None,
        })
    }
}

/// Searches the workspace with the first words of the hint and takes the
/// first page Notion returns.
#[derive(Debug, Clone)]
pub struct SearchDestination<'a> {
    client: &'a NotionClient,
    words: usize,
}

impl<'a> SearchDestination<'a> {
    /// Number of leading words used as the query when not configured.
    pub const DEFAULT_WORDS: usize = 2;

    pub fn new(client: &'a NotionClient) -> Self {
        Self {
            client,
            words: Self::DEFAULT_WORDS,
        }
    }

    /// Use `words` leading words of the hint as the query (at least one).
    pub fn with_words(mut self, words: usize) -> Self {
        self.words = words.max(1);
        self
    }

    /// The query sent for a given hint.
    pub fn query_for(&self, hint: &str) -> String {
        hint.split_whitespace()
            .take(self.words)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[async_trait]
impl DestinationResolver for SearchDestination<'_> {
    async fn resolve(&self, hint: &str) -> Result<Destination, SyncError> {
        let query = self.query_for(hint);
        debug!(query = %query, "looking up parent page");

        let pages = self.client.search_pages(&query).await?;
        let page = pages
            .into_iter()
            .next()
            .ok_or_else(|| SyncError::DestinationNotFound(query.clone()))?;

        Ok(Destination {
            id: page.id,
            title: page.title,
        })
    }
}
