//! HTTP implementation of [`NotionApi`].

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::{debug, trace};
use url::Url;

use crate::api::{DatabaseMeta, NotionApi, Page, PaginatedList, QueryRequest};
use crate::error::{NotionError, Result};

/// Public Notion API origin.
pub const DEFAULT_BASE_URL: &str = "https://api.notion.com";

/// API version sent with every request.
pub const NOTION_VERSION: &str = "2022-06-28";

/// Page size for block children requests (the API maximum).
const CHILDREN_PAGE_SIZE: u32 = 100;

/// Notion REST client authenticated with an integration token.
#[derive(Clone)]
pub struct NotionClient {
    client: reqwest::Client,
    token: String,
    base_url: String,
}

impl NotionClient {
    /// Create a new client against the public API.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            token: token.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Point the client at another origin (proxies, test servers).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(Url::parse(&format!("{}/v1/{}", self.base_url, path))?)
    }

    async fn send<T: DeserializeOwned>(&self, request: reqwest::RequestBuilder) -> Result<T> {
        let response = request
            .header("Authorization", format!("Bearer {}", self.token))
            .header("Notion-Version", NOTION_VERSION)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(NotionError::from_response(status.as_u16(), &body));
        }

        let body = response.bytes().await?;
        trace!(size = body.len(), "Notion response received");
        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait]
impl NotionApi for NotionClient {
    async fn retrieve_database(&self, database_id: &str) -> Result<DatabaseMeta> {
        let url = self.endpoint(&format!("databases/{}", database_id))?;
        debug!(database = %database_id, "Retrieving database");
        self.send(self.client.get(url)).await
    }

    async fn query_database(
        &self,
        database_id: &str,
        request: &QueryRequest,
    ) -> Result<PaginatedList<Page>> {
        let url = self.endpoint(&format!("databases/{}/query", database_id))?;
        debug!(
            database = %database_id,
            cursor = ?request.start_cursor,
            "Querying database"
        );
        self.send(self.client.post(url).json(request)).await
    }

    async fn list_block_children(
        &self,
        block_id: &str,
        start_cursor: Option<&str>,
    ) -> Result<PaginatedList<serde_json::Value>> {
        let mut url = self.endpoint(&format!("blocks/{}/children", block_id))?;
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("page_size", &CHILDREN_PAGE_SIZE.to_string());
            if let Some(cursor) = start_cursor {
                query.append_pair("start_cursor", cursor);
            }
        }
        debug!(block = %block_id, cursor = ?start_cursor, "Listing block children");
        self.send(self.client.get(url)).await
    }
}

impl std::fmt::Debug for NotionClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotionClient")
            .field("base_url", &self.base_url)
            .field("token", &"<redacted>")
            .finish()
    }
}
