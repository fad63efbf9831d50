//! In-memory Notion workspace and downloader for sync tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;

use async_trait::async_trait;
use folio_notion::{
    DatabaseMeta, Download, Downloader, NotionApi, NotionError, Page, PaginatedList, QueryRequest,
};
use folio_sync::{ProjectSchema, SiteSchema, SyncConfig};
use serde_json::{json, Value};

/// Rows and blocks per page when the caller sets no page size.
const PAGE_SIZE: usize = 2;

#[derive(Default)]
pub struct FakeWorkspace {
    databases: HashMap<String, (String, Vec<Value>)>,
    children: HashMap<String, Vec<Value>>,
    /// Block whose children list always contains itself.
    cyclic: Option<String>,
    pub queries: Mutex<Vec<(String, QueryRequest)>>,
    pub children_requests: Mutex<Vec<String>>,
}

impl FakeWorkspace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_database(mut self, id: &str, title: &str, rows: Vec<Value>) -> Self {
        self.databases
            .insert(id.to_string(), (title.to_string(), rows));
        self
    }

    pub fn with_children(mut self, block_id: &str, blocks: Vec<Value>) -> Self {
        self.children.insert(block_id.to_string(), blocks);
        self
    }

    pub fn with_cycle(mut self, block_id: &str) -> Self {
        self.cyclic = Some(block_id.to_string());
        self
    }

    pub fn children_request_count(&self) -> usize {
        self.children_requests.lock().unwrap().len()
    }

    fn not_found(id: &str) -> NotionError {
        NotionError::Api {
            status: 404,
            code: "object_not_found".to_string(),
            message: format!("Could not find {}", id),
        }
    }
}

fn paginate<T: Clone>(items: &[T], cursor: Option<&str>, size: usize) -> PaginatedList<T> {
    let start: usize = cursor.map(|c| c.parse().unwrap()).unwrap_or(0);
    let end = (start + size).min(items.len());
    let has_more = end < items.len();
    PaginatedList {
        results: items[start..end].to_vec(),
        has_more,
        next_cursor: has_more.then(|| end.to_string()),
    }
}

#[async_trait]
impl NotionApi for FakeWorkspace {
    async fn retrieve_database(&self, database_id: &str) -> folio_notion::Result<DatabaseMeta> {
        let (title, _) = self
            .databases
            .get(database_id)
            .ok_or_else(|| Self::not_found(database_id))?;
        Ok(DatabaseMeta {
            id: database_id.to_string(),
            title: vec![folio_models::RichText::plain(title.clone())],
        })
    }

    async fn query_database(
        &self,
        database_id: &str,
        request: &QueryRequest,
    ) -> folio_notion::Result<PaginatedList<Page>> {
        self.queries
            .lock()
            .unwrap()
            .push((database_id.to_string(), request.clone()));

        let (_, rows) = self
            .databases
            .get(database_id)
            .ok_or_else(|| Self::not_found(database_id))?;
        let size = request.page_size.map(|s| s as usize).unwrap_or(PAGE_SIZE);
        let page = paginate(rows, request.start_cursor.as_deref(), size);

        Ok(PaginatedList {
            results: page
                .results
                .into_iter()
                .map(|row| serde_json::from_value(row).unwrap())
                .collect(),
            has_more: page.has_more,
            next_cursor: page.next_cursor,
        })
    }

    async fn list_block_children(
        &self,
        block_id: &str,
        start_cursor: Option<&str>,
    ) -> folio_notion::Result<PaginatedList<Value>> {
        self.children_requests
            .lock()
            .unwrap()
            .push(block_id.to_string());

        if self.cyclic.as_deref() == Some(block_id) {
            return Ok(PaginatedList {
                results: vec![toggle(block_id, "again", true)],
                has_more: false,
                next_cursor: None,
            });
        }

        let blocks = self.children.get(block_id).cloned().unwrap_or_default();
        Ok(paginate(&blocks, start_cursor, PAGE_SIZE))
    }
}

/// Serves fixed responses by URL; unknown URLs fail with 404.
#[derive(Default)]
pub struct FakeDownloader {
    files: HashMap<String, Download>,
    pub requests: Mutex<Vec<String>>,
}

impl FakeDownloader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, url: &str, bytes: &[u8], content_type: Option<&str>) -> Self {
        self.files.insert(
            url.to_string(),
            Download {
                bytes: bytes.to_vec(),
                content_type: content_type.map(str::to_string),
            },
        );
        self
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl Downloader for FakeDownloader {
    async fn fetch(&self, url: &str) -> folio_notion::Result<Download> {
        self.requests.lock().unwrap().push(url.to_string());
        self.files
            .get(url)
            .cloned()
            .ok_or_else(|| NotionError::Download {
                url: url.to_string(),
                status: 404,
            })
    }
}

/// Config writing under `root` with the given databases.
pub fn config(root: &Path, projects: &[&str], site: Option<&str>) -> SyncConfig {
    SyncConfig {
        token: "test-token".to_string(),
        project_databases: projects.iter().map(|s| s.to_string()).collect(),
        site_database: site.map(str::to_string),
        api_base_url: "http://unused.invalid".to_string(),
        data_dir: root.join("src/data"),
        content_dir: root.join("public/notion"),
        localize_assets: true,
        projects: ProjectSchema::default(),
        site: SiteSchema::default(),
    }
}

/// A project row. `order`/`published` of `None` omit the property entirely.
pub fn project_row(
    id: &str,
    title: &str,
    order: Option<f64>,
    published: Option<bool>,
    edited: &str,
) -> Value {
    let mut properties = json!({
        "Name": { "id": "title", "type": "title", "title": [{ "plain_text": title }] },
        "Description": { "id": "d", "type": "rich_text", "rich_text": [{ "plain_text": format!("About {}", title) }] },
        "Tags": { "id": "t", "type": "multi_select", "multi_select": [{ "name": "rust" }] },
        "Repo": { "id": "r", "type": "url", "url": null }
    });
    if let Some(order) = order {
        properties["Order"] = json!({ "id": "o", "type": "number", "number": order });
    }
    if let Some(published) = published {
        properties["Published"] = json!({ "id": "p", "type": "checkbox", "checkbox": published });
    }
    json!({
        "object": "page",
        "id": id,
        "last_edited_time": edited,
        "properties": properties
    })
}

pub fn paragraph(id: &str, text: &str) -> Value {
    json!({
        "object": "block",
        "id": id,
        "type": "paragraph",
        "has_children": false,
        "paragraph": { "rich_text": [{ "plain_text": text }], "color": "default" }
    })
}

pub fn toggle(id: &str, text: &str, has_children: bool) -> Value {
    json!({
        "object": "block",
        "id": id,
        "type": "toggle",
        "has_children": has_children,
        "toggle": { "rich_text": [{ "plain_text": text }] }
    })
}

pub fn external_image(id: &str, url: &str) -> Value {
    json!({
        "object": "block",
        "id": id,
        "type": "image",
        "has_children": false,
        "image": { "caption": [], "type": "external", "external": { "url": url } }
    })
}

pub fn hosted_image(id: &str, url: &str) -> Value {
    json!({
        "object": "block",
        "id": id,
        "type": "image",
        "has_children": false,
        "image": {
            "caption": [{ "plain_text": "Screenshot" }],
            "type": "file",
            "file": { "url": url, "expiry_time": "2030-01-01T00:00:00.000Z" }
        }
    })
}
