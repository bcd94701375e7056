//! Document publishing pipeline.
//!
//! Provides the high level API used by the CLI: take a Markdown file, find
//! the parent page, create a page named after the file and append the
//! converted blocks in order.
//!
//! Notion caps the `children` array of a single append request at 100 blocks,
//! so blocks are sent in consecutive chunks. Chunks are sent one at a time and
//! never reordered.
//!
//! For more control, call [`crate::convert`] and [`NotionClient`] directly.

use crate::api::{DestinationResolver, NotionClient};
use crate::converter::{convert_with_options, ConvertOptions};
use crate::error::SyncError;
use crate::wire::fit_request_limits;
use std::fs;
use std::path::Path;
use tracing::info;

/// Upper bound Notion enforces on blocks per append request.
pub const MAX_CHUNK_SIZE: usize = 100;

/// Specifies how documents are published.
///
/// ```ignore
/// let spec = SyncSpec::new(&client, &resolver).with_chunk_size(50);
/// let report = sync_file(&spec, "docs/Release_Notes.md").await?;
/// ```
pub struct SyncSpec<'a> {
    pub client: &'a NotionClient,
    pub resolver: &'a dyn DestinationResolver,
    pub options: ConvertOptions,
    pub chunk_size: usize,
}

impl<'a> SyncSpec<'a> {
    pub fn new(client: &'a NotionClient, resolver: &'a dyn DestinationResolver) -> Self {
        Self {
            client,
            resolver,
            options: ConvertOptions::default(),
            chunk_size: MAX_CHUNK_SIZE,
        }
    }

    /// Sets the number of blocks per request, clamped to `1..=100`.
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.clamp(1, MAX_CHUNK_SIZE);
        self
    }

    pub fn with_options(mut self, options: ConvertOptions) -> Self {
        self.options = options;
        self
    }
}

/// Result of publishing one document.
#[derive(Debug, Clone, PartialEq)]
pub struct SyncReport {
    pub title: String,
    pub page_id: String,
    pub parent_title: Option<String>,
    pub block_count: usize,
    pub url: String,
}

/// Publishes a Markdown file. The page title is derived from the file name.
///
/// # Errors
///
/// Returns [`SyncError`] if:
/// - The file cannot be read
/// - No parent page can be resolved
/// - Notion rejects any request
pub async fn sync_file(
    spec: &SyncSpec<'_>,
    path: impl AsRef<Path>,
) -> Result<SyncReport, SyncError> {
    let path = path.as_ref();
    let markdown = fs::read_to_string(path).map_err(|source| SyncError::Read {
        path: path.display().to_string(),
        source,
    })?;
    sync_document(spec, &title_from_path(path), &markdown).await
}

/// Publishes Markdown text as a new page called `title`.
pub async fn sync_document(
    spec: &SyncSpec<'_>,
    title: &str,
    markdown: &str,
) -> Result<SyncReport, SyncError> {
    let destination = spec.resolver.resolve(title).await?;
    if let Some(parent) = &destination.title {
        info!("Using parent page: {parent}");
    }

    info!("Creating page: {title}");
    let page_id = spec.client.create_page(&destination.id, title).await?;

    let blocks = fit_request_limits(convert_with_options(markdown, &spec.options));
    let total = blocks.len();
    let chunk_size = spec.chunk_size.clamp(1, MAX_CHUNK_SIZE);
    for (index, chunk) in blocks.chunks(chunk_size).enumerate() {
        let first = index * chunk_size;
        info!(
            "Uploading blocks {}-{} of {total}",
            first + 1,
            first + chunk.len()
        );
        spec.client.append_blocks(&page_id, chunk).await?;
    }

    let url = page_url(&page_id);
    info!("Uploaded {total} blocks");
    Ok(SyncReport {
        title: title.to_string(),
        parent_title: destination.title,
        block_count: total,
        url,
        page_id,
    })
}

/// Page title for a Markdown file: the file stem with underscores as spaces.
pub fn title_from_path(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().replace('_', " "))
        .unwrap_or_default()
}

/// Public URL of a page id.
pub fn page_url(page_id: &str) -> String {
    format!("https://www.notion.so/{}", page_id.replace('-', ""))
}
