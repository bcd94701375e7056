//! Notion REST API client.
//!
//! [`NotionClient`] provides typed methods for the three endpoints the
//! uploader needs: `POST /search`, `POST /pages` and
//! `PATCH /blocks/{id}/children`. Batching lives in [`crate::publish`]; the
//! client sends exactly what it is given.

pub mod resolve;

use crate::blocks::Block;
use crate::error::ApiError;
use crate::wire::blocks_to_json;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use std::collections::HashMap;
use tracing::debug;

pub use resolve::{Destination, DestinationResolver, FixedDestination, SearchDestination};

/// Base URL for the public Notion API.
pub const NOTION_API_BASE: &str = "https://api.notion.com/v1";

/// API version sent in the `Notion-Version` header.
pub const NOTION_VERSION: &str = "2022-06-28";

/// HTTP client for the Notion API.
///
/// Wraps a [`reqwest::Client`] and the integration token. The base URL can be
/// overridden to point at a mock server.
#[derive(Debug, Clone)]
pub struct NotionClient {
    http: Client,
    token: String,
    base_url: String,
    version: String,
}

/// A page returned by search.
#[derive(Debug, Clone, PartialEq)]
pub struct PageSummary {
    pub id: String,
    pub title: Option<String>,
}

impl NotionClient {
    /// Create a client for the public API with the given bearer token.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            token: token.into(),
            base_url: NOTION_API_BASE.to_owned(),
            version: NOTION_VERSION.to_owned(),
        }
    }

    /// Point the client at another base URL. A trailing slash is ignored.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        self.base_url = base_url.trim_end_matches('/').to_owned();
        self
    }

    /// Override the `Notion-Version` header.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Search pages shared with the integration.
    pub async fn search_pages(&self, query: &str) -> Result<Vec<PageSummary>, ApiError> {
        debug!(query = %query, "searching pages");
        let body = json!({
            "query": query,
            "filter": { "property": "object", "value": "page" },
        });
        let response: SearchResponse =
            decode(self.send(self.http.post(self.url("search")).json(&body)).await?)?;

        Ok(response
            .results
            .into_iter()
            .map(|page| PageSummary {
                title: page.title(),
                id: page.id,
            })
            .collect())
    }

    /// Create an empty page under `parent_id`. Returns the new page id.
    pub async fn create_page(&self, parent_id: &str, title: &str) -> Result<String, ApiError> {
        debug!(parent = %parent_id, title = %title, "creating page");
        let body = json!({
            "parent": { "page_id": parent_id },
            "properties": {
                "title": [{ "type": "text", "text": { "content": title } }],
            },
        });
        let created: CreatedPage =
            decode(self.send(self.http.post(self.url("pages")).json(&body)).await?)?;
        Ok(created.id)
    }

    /// Append blocks to the end of a page, in order.
    pub async fn append_blocks(&self, page_id: &str, blocks: &[Block]) -> Result<(), ApiError> {
        debug!(page = %page_id, count = blocks.len(), "appending blocks");
        let body = json!({ "children": blocks_to_json(blocks) });
        let url = self.url(&format!("blocks/{page_id}/children"));
        self.send(self.http.patch(url).json(&body)).await?;
        Ok(())
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url)
    }

    /// Attach auth headers, send, and turn non-success statuses into errors.
    async fn send(&self, request: RequestBuilder) -> Result<Value, ApiError> {
        let response = request
            .bearer_auth(&self.token)
            .header("Notion-Version", &self.version)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorBody>(&text)
                .ok()
                .and_then(|body| body.message)
                .unwrap_or(text);
            return Err(ApiError::Status {
                status: status.as_u16(),
                message,
            });
        }

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&text).map_err(|e| ApiError::InvalidResponse(e.to_string()))
    }
}

fn decode<T: DeserializeOwned>(value: Value) -> Result<T, ApiError> {
    serde_json::from_value(value).map_err(|e| ApiError::InvalidResponse(e.to_string()))
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CreatedPage {
    id: String,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<SearchResult>,
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    id: String,
    #[serde(default)]
    properties: HashMap<String, Property>,
}

#[derive(Debug, Deserialize)]
struct Property {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    title: Vec<PlainText>,
}

#[derive(Debug, Deserialize)]
struct PlainText {
    plain_text: String,
}

impl SearchResult {
    /// The text of the page's title property, whatever it is named.
    fn title(&self) -> Option<String> {
        self.properties
            .values()
            .find(|property| property.kind == "title")
            .map(|property| {
                property
                    .title
                    .iter()
                    .map(|part| part.plain_text.as_str())
                    .collect::<String>()
            })
            .filter(|title| !title.is_empty())
    }
}
