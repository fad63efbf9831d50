//! Configuration for a synchronization run.
//!
//! Resolved once at startup from environment variables and passed down
//! explicitly.
//!
//! # Environment Variables
//!
//! - `NOTION_TOKEN`: integration token (required)
//! - `NOTION_PROJECT_DB_IDS`: comma-separated project database IDs
//! - `NOTION_DATABASE_ID`: single project database ID, used when the list is unset
//! - `NOTION_SITE_DB_ID`: settings database ID (optional)
//! - `NOTION_API_URL`: API origin override
//! - `FOLIO_DATA_DIR`: override for `<root>/src/data`
//! - `FOLIO_CONTENT_DIR`: override for `<root>/public/notion`

use std::path::{Path, PathBuf};

use folio_notion::DEFAULT_BASE_URL;
use thiserror::Error;
use tracing::{debug, warn};

pub const NOTION_TOKEN_ENV: &str = "NOTION_TOKEN";
pub const PROJECT_DB_IDS_ENV: &str = "NOTION_PROJECT_DB_IDS";
pub const LEGACY_DATABASE_ID_ENV: &str = "NOTION_DATABASE_ID";
pub const SITE_DB_ID_ENV: &str = "NOTION_SITE_DB_ID";
pub const API_URL_ENV: &str = "NOTION_API_URL";
pub const DATA_DIR_ENV: &str = "FOLIO_DATA_DIR";
pub const CONTENT_DIR_ENV: &str = "FOLIO_CONTENT_DIR";

// Default layout under the site root
const DATA_SUBDIR: &str = "src/data";
const CONTENT_SUBDIR: &str = "public/notion";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing {}", NOTION_TOKEN_ENV)]
    MissingToken,
}

/// Property names read from each project row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectSchema {
    pub title: String,
    pub description: String,
    pub tags: String,
    pub link: String,
    pub published: String,
    pub order: String,
}

impl Default for ProjectSchema {
    fn default() -> Self {
        Self {
            title: "Name".to_string(),
            description: "Description".to_string(),
            tags: "Tags".to_string(),
            link: "Repo".to_string(),
            published: "Published".to_string(),
            order: "Order".to_string(),
        }
    }
}

/// Property names read from the settings row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteSchema {
    pub name: String,
    pub subtitle: String,
    pub github: String,
    pub linkedin: String,
    pub email: String,
    pub about: String,
}

impl Default for SiteSchema {
    fn default() -> Self {
        Self {
            name: "ProfilName".to_string(),
            subtitle: "Desc".to_string(),
            github: "GitHub".to_string(),
            linkedin: "LinkedIn".to_string(),
            email: "Email".to_string(),
            about: "AboutText".to_string(),
        }
    }
}

#[derive(Clone)]
pub struct SyncConfig {
    pub token: String,
    /// Project databases in the order they are synced.
    pub project_databases: Vec<String>,
    pub site_database: Option<String>,
    pub api_base_url: String,
    pub data_dir: PathBuf,
    pub content_dir: PathBuf,
    /// Download images referenced by content documents.
    pub localize_assets: bool,
    pub projects: ProjectSchema,
    pub site: SiteSchema,
}

impl SyncConfig {
    /// Resolves configuration from the process environment.
    pub fn from_env(root: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_vars(root, |key| std::env::var(key).ok())
    }

    /// Resolves configuration through an arbitrary variable lookup.
    ///
    /// Blank values are treated as unset.
    pub fn from_vars<F>(root: impl AsRef<Path>, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let root = root.as_ref();

        let token = get(NOTION_TOKEN_ENV).ok_or(ConfigError::MissingToken)?;

        let mut project_databases = get(PROJECT_DB_IDS_ENV)
            .map(|list| parse_id_list(&list))
            .unwrap_or_default();
        if project_databases.is_empty() {
            project_databases.extend(get(LEGACY_DATABASE_ID_ENV));
        }

        Ok(Self {
            token,
            project_databases,
            site_database: get(SITE_DB_ID_ENV),
            api_base_url: get(API_URL_ENV).unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            data_dir: get(DATA_DIR_ENV)
                .map(PathBuf::from)
                .unwrap_or_else(|| root.join(DATA_SUBDIR)),
            content_dir: get(CONTENT_DIR_ENV)
                .map(PathBuf::from)
                .unwrap_or_else(|| root.join(CONTENT_SUBDIR)),
            localize_assets: true,
            projects: ProjectSchema::default(),
            site: SiteSchema::default(),
        })
    }
}

impl std::fmt::Debug for SyncConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyncConfig")
            .field("token", &"<redacted>")
            .field("project_databases", &self.project_databases)
            .field("site_database", &self.site_database)
            .field("api_base_url", &self.api_base_url)
            .field("data_dir", &self.data_dir)
            .field("content_dir", &self.content_dir)
            .field("localize_assets", &self.localize_assets)
            .finish()
    }
}

/// Env files read from the site root, highest precedence first.
pub const ENV_FILES: [&str; 2] = [".env.local", ".env"];

/// Loads every env file present under `root`.
///
/// Earlier files win over later ones, and neither overrides variables
/// already set in the process. Missing files are skipped.
pub fn load_env_files(root: &Path) {
    for file in ENV_FILES {
        let path = root.join(file);
        match dotenvy::from_path(&path) {
            Ok(()) => debug!(path = %path.display(), "Loaded env file"),
            Err(e) if e.not_found() => {}
            Err(e) => warn!(path = %path.display(), error = %e, "Ignoring unreadable env file"),
        }
    }
}

/// Splits a comma-separated ID list, dropping blank entries.
pub fn parse_id_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
