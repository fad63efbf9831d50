//! Build-time content synchronizer for the portfolio site.
//!
//! Pulls project rows and their page content from one or more Notion
//! databases, plus an optional settings row, and bakes them into static
//! files the site reads:
//!
//! - `src/data/projects.json`: published projects, ordered
//! - `src/data/site.json`: hero, links and about text
//! - `public/notion/{page_id}.json`: block tree of each project page
//! - `public/notion/assets/{block_id}.{ext}`: downloaded images
//!
//! Every run resyncs from scratch and overwrites previous output.
//!
//! # Example
//!
//! ```no_run
//! use folio_sync::{SyncConfig, Synchronizer};
//!
//! # async fn example() -> folio_sync::Result<()> {
//! let config = SyncConfig::from_env(".")?;
//! let report = Synchronizer::from_config(config).run().await?;
//! println!("{} projects", report.projects);
//! # Ok(())
//! # }
//! ```

pub mod assets;
pub mod cli;
pub mod config;
pub mod content;
pub mod error;
pub mod projects;
pub mod runner;
pub mod site;

pub use assets::{infer_extension, AssetLocalizer, LocalizeStats};
pub use config::{ConfigError, ProjectSchema, SiteSchema, SyncConfig};
pub use content::{fetch_document, MAX_DEPTH};
pub use error::{Result, SyncError};
pub use projects::{merge_rows, sync_projects};
pub use runner::{SyncReport, Synchronizer};
pub use site::sync_site;
