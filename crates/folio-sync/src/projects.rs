//! Project synchronizer.
//!
//! Pulls every row of each configured project database, maps rows into
//! [`ProjectRow`]s and reduces them to the published, deduplicated and
//! ordered project list.

use std::collections::HashMap;

use folio_models::{ProjectRecord, ProjectRow, RichText, SortKey};
use folio_notion::{NotionApi, Page, PropertyValue, QueryRequest};
use tracing::{info, warn};

use crate::config::ProjectSchema;
use crate::error::{Result, SyncError};

/// Fetches and merges rows from all databases.
///
/// Any database failing to load aborts the whole sync; a partial project
/// list is never produced.
pub async fn sync_projects(
    api: &dyn NotionApi,
    databases: &[String],
    schema: &ProjectSchema,
) -> Result<Vec<ProjectRecord>> {
    let mut rows = Vec::new();
    for database in databases {
        let pages = fetch_rows(api, database)
            .await
            .map_err(|source| SyncError::Database {
                database: database.clone(),
                source,
            })?;
        rows.extend(pages.iter().map(|page| map_row(page, schema)));
    }

    let total = rows.len();
    let projects = merge_rows(rows);
    info!(rows = total, projects = projects.len(), "Merged project rows");
    Ok(projects)
}

/// Retrieves a database's metadata, then pages through all of its rows.
pub async fn fetch_rows(api: &dyn NotionApi, database: &str) -> folio_notion::Result<Vec<Page>> {
    let meta = api.retrieve_database(database).await?;
    info!(
        database = %database,
        title = %meta.display_title().unwrap_or_else(|| database.to_string()),
        "DB OK"
    );

    let mut pages = Vec::new();
    let mut cursor: Option<String> = None;
    loop {
        let list = api
            .query_database(database, &QueryRequest::after(cursor.take()))
            .await?;
        cursor = list.next_page_cursor().map(str::to_string);
        pages.extend(list.results);
        if cursor.is_none() {
            break;
        }
    }

    info!(database = %database, rows = pages.len(), "Fetched database rows");
    Ok(pages)
}

/// Maps a database page into a project row using the configured property names.
///
/// Missing or differently typed properties fall back to empty values; a
/// missing publish checkbox leaves the flag unset.
pub fn map_row(page: &Page, schema: &ProjectSchema) -> ProjectRow {
    let property = |name: &str| page.property(name);

    let mut record = ProjectRecord::new(page.id.clone(), String::new());
    record.title = property(&schema.title)
        .and_then(PropertyValue::as_title)
        .map(RichText::first)
        .unwrap_or_default();
    record.description = property(&schema.description)
        .and_then(PropertyValue::as_rich_text)
        .map(RichText::first)
        .unwrap_or_default();
    record.tags = property(&schema.tags)
        .and_then(PropertyValue::as_tags)
        .unwrap_or_default();
    record.link = property(&schema.link)
        .and_then(PropertyValue::as_url)
        .map(str::to_string);

    ProjectRow {
        record,
        published: property(&schema.published).and_then(PropertyValue::as_checkbox),
        sort_key: SortKey::new(
            property(&schema.order).and_then(PropertyValue::as_number),
            page.last_edited_time,
        ),
    }
}

/// Filters unpublished rows, drops duplicate IDs and orders the rest.
///
/// A duplicated ID keeps its first position but takes the later row's
/// values. Sorting then reorders by [`SortKey::compare`].
pub fn merge_rows(rows: Vec<ProjectRow>) -> Vec<ProjectRecord> {
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut unique: Vec<ProjectRow> = Vec::new();

    for row in rows.into_iter().filter(ProjectRow::is_included) {
        match positions.get(&row.record.id) {
            Some(&index) => {
                warn!(id = %row.record.id, "Duplicate project id, keeping the later row");
                unique[index] = row;
            }
            None => {
                positions.insert(row.record.id.clone(), unique.len());
                unique.push(row);
            }
        }
    }

    unique.sort_by(|a, b| a.sort_key.compare(&b.sort_key));
    unique.into_iter().map(|row| row.record).collect()
}
