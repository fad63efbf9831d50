//! Data models for the portfolio content synchronizer.
//!
//! This crate provides the types that flow from the Notion workspace into
//! the static site: project records, their content documents, and the
//! site profile. Their serde shape is the on-disk schema the presentation
//! layer reads, so field names and block `type` discriminators are fixed.

pub mod content;
pub mod project;
pub mod site;

// Re-export main types
pub use content::{
    Annotations, BlockKind, CalloutPayload, CodePayload, ContentBlock, ContentDocument,
    EmptyPayload, ExternalFile, HostedFile, Icon, ImagePayload, ImageSource, RichText,
    TextPayload, ToDoPayload,
};
pub use project::{ProjectRecord, ProjectRow, SortKey};
pub use site::{SiteLinks, SiteProfile};
