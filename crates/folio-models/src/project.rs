//! Project types.
//!
//! A [`ProjectRow`] is one database row after property mapping; it still
//! carries the publish flag and sort key. Only the [`ProjectRecord`] part
//! is ever written to disk.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A published project as listed in `projects.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectRecord {
    /// Notion page ID of the row, stable across syncs.
    pub id: String,

    /// Project title.
    pub title: String,

    /// Short description shown on the project card.
    #[serde(rename = "desc")]
    pub description: String,

    /// Tags in source order.
    #[serde(default)]
    pub tags: Vec<String>,

    /// External link (usually the repository), `null` when absent.
    pub link: Option<String>,

    /// ID of the content document for this project (same as `id`).
    #[serde(rename = "notionPageId")]
    pub content_ref: String,
}

impl ProjectRecord {
    /// Creates a record whose content document shares its ID.
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            content_ref: id.clone(),
            id,
            title: title.into(),
            description: String::new(),
            tags: Vec::new(),
            link: None,
        }
    }
}

/// Ordering key for project rows. Never persisted.
///
/// # Ordering Rules
///
/// 1. Lower `order` comes first; a missing order sorts after every ordered row
/// 2. For equal order, the most recently edited row comes first
#[derive(Debug, Clone, PartialEq)]
pub struct SortKey {
    pub order: Option<f64>,
    pub last_edited: DateTime<Utc>,
}

impl SortKey {
    pub fn new(order: Option<f64>, last_edited: DateTime<Utc>) -> Self {
        Self { order, last_edited }
    }

    /// Compares two keys according to the project list ordering.
    pub fn compare(&self, other: &Self) -> Ordering {
        let a = self.order.unwrap_or(f64::INFINITY);
        let b = other.order.unwrap_or(f64::INFINITY);
        a.total_cmp(&b)
            .then_with(|| other.last_edited.cmp(&self.last_edited))
    }
}

/// A project row mapped from a database page, before filtering and sorting.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectRow {
    pub record: ProjectRecord,

    /// Value of the publish checkbox, `None` when the row has no such property.
    pub published: Option<bool>,

    pub sort_key: SortKey,
}

impl ProjectRow {
    /// Whether the row belongs in the output. A missing flag counts as published.
    pub fn is_included(&self) -> bool {
        self.published.unwrap_or(true)
    }
}
