//! Minimal Notion REST client.
//!
//! Covers the handful of endpoints the synchronizer needs: retrieving and
//! querying databases, and listing block children. Callers depend on the
//! [`NotionApi`] trait so the sync pipeline can run against an in-memory
//! workspace in tests.
//!
//! # Example
//!
//! ```no_run
//! use folio_notion::{NotionApi, NotionClient, QueryRequest};
//!
//! # async fn example() -> folio_notion::Result<()> {
//! let client = NotionClient::new("secret_token");
//!
//! let meta = client.retrieve_database("db-id").await?;
//! println!("{}", meta.display_title().unwrap_or_default());
//!
//! let page = client.query_database("db-id", &QueryRequest::default()).await?;
//! for row in page.results {
//!     println!("{} edited {}", row.id, row.last_edited_time);
//! }
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod client;
pub mod download;
pub mod error;
pub mod property;

pub use api::{DatabaseMeta, NotionApi, Page, PaginatedList, QueryRequest};
pub use client::{NotionClient, DEFAULT_BASE_URL, NOTION_VERSION};
pub use download::{Download, Downloader, HttpDownloader};
pub use error::{NotionError, Result};
pub use property::{FormulaValue, PropertyValue, SelectOption};
