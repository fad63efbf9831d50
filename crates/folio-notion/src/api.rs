//! The Notion operations the synchronizer relies on, and their wire types.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use folio_models::RichText;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::property::PropertyValue;

/// Read access to a Notion workspace.
///
/// Implemented over HTTP by [`crate::NotionClient`]. Every call is a single
/// request; pagination is driven by the caller through cursors.
#[async_trait]
pub trait NotionApi: Send + Sync {
    /// Fetches database metadata. Fails when the ID is wrong or the
    /// integration has no access.
    async fn retrieve_database(&self, database_id: &str) -> Result<DatabaseMeta>;

    /// Fetches one page of database rows.
    async fn query_database(
        &self,
        database_id: &str,
        request: &QueryRequest,
    ) -> Result<PaginatedList<Page>>;

    /// Fetches one page of a block's (or page's) children as raw JSON blocks.
    async fn list_block_children(
        &self,
        block_id: &str,
        start_cursor: Option<&str>,
    ) -> Result<PaginatedList<serde_json::Value>>;
}

/// Database metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatabaseMeta {
    pub id: String,
    #[serde(default)]
    pub title: Vec<RichText>,
}

impl DatabaseMeta {
    /// First run of the title, if any.
    pub fn display_title(&self) -> Option<String> {
        self.title
            .first()
            .map(|r| r.plain_text.clone())
            .filter(|t| !t.is_empty())
    }
}

/// Body of a database query request.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct QueryRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_cursor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
}

impl QueryRequest {
    /// Request continuing from a cursor.
    pub fn after(cursor: Option<String>) -> Self {
        Self {
            start_cursor: cursor,
            page_size: None,
        }
    }

    /// Request limited to `size` rows.
    pub fn limit(size: u32) -> Self {
        Self {
            start_cursor: None,
            page_size: Some(size),
        }
    }
}

/// One page of a paginated list endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaginatedList<T> {
    pub results: Vec<T>,
    #[serde(default)]
    pub has_more: bool,
    #[serde(default)]
    pub next_cursor: Option<String>,
}

impl<T> PaginatedList<T> {
    /// The cursor for the next request, only when more results exist.
    pub fn next_page_cursor(&self) -> Option<&str> {
        if self.has_more {
            self.next_cursor.as_deref()
        } else {
            None
        }
    }
}

/// A database row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub id: String,
    pub last_edited_time: DateTime<Utc>,
    #[serde(default)]
    pub properties: HashMap<String, PropertyValue>,
}

impl Page {
    pub fn property(&self, name: &str) -> Option<&PropertyValue> {
        self.properties.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_next_page_cursor_requires_has_more() {
        let more: PaginatedList<u32> = PaginatedList {
            results: vec![1],
            has_more: true,
            next_cursor: Some("c2".to_string()),
        };
        assert_eq!(more.next_page_cursor(), Some("c2"));

        let done: PaginatedList<u32> = PaginatedList {
            results: vec![1],
            has_more: false,
            next_cursor: Some("stale".to_string()),
        };
        assert_eq!(done.next_page_cursor(), None);
    }

    #[test]
    fn test_query_request_omits_empty_fields() {
        let body = serde_json::to_value(QueryRequest::default()).unwrap();
        assert_eq!(body, json!({}));

        let body = serde_json::to_value(QueryRequest::limit(1)).unwrap();
        assert_eq!(body, json!({ "page_size": 1 }));
    }

    #[test]
    fn test_decode_page() {
        let page: Page = serde_json::from_value(json!({
            "object": "page",
            "id": "row-1",
            "last_edited_time": "2024-03-01T12:00:00.000Z",
            "properties": {
                "Name": { "id": "title", "type": "title", "title": [{ "plain_text": "A" }] },
                "Owner": { "id": "o", "type": "people", "people": [] }
            }
        }))
        .unwrap();

        assert_eq!(page.id, "row-1");
        assert!(page.property("Name").unwrap().as_title().is_some());
        assert_eq!(page.property("Owner"), Some(&PropertyValue::Other));
        assert!(page.property("Missing").is_none());
    }

    #[test]
    fn test_display_title() {
        let meta: DatabaseMeta = serde_json::from_value(json!({
            "object": "database",
            "id": "db",
            "title": [{ "plain_text": "Projects" }]
        }))
        .unwrap();
        assert_eq!(meta.display_title().as_deref(), Some("Projects"));

        let untitled = DatabaseMeta {
            id: "db".to_string(),
            title: Vec::new(),
        };
        assert!(untitled.display_title().is_none());
    }
}
