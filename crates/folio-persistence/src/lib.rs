//! Output layer for synchronized content.
//!
//! Every artifact is written atomically (write to temp file, then rename) so
//! a crashed run never leaves a half-written JSON file for the site build.
//!
//! # Example
//!
//! ```no_run
//! use folio_models::ProjectRecord;
//! use folio_persistence::OutputStore;
//!
//! let store = OutputStore::new("site/src/data", "site/public/notion");
//!
//! let projects = vec![ProjectRecord::new("page-1", "Compiler")];
//! store.write_projects(&projects).unwrap();
//!
//! let loaded = store.read_projects().unwrap();
//! assert_eq!(loaded, projects);
//! ```

pub mod atomic;
pub mod error;
pub mod output_store;

pub use error::{PersistenceError, Result};
pub use output_store::{OutputStore, ASSETS_DIR, PROJECTS_FILE, SITE_FILE};
