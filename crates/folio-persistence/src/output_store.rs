//! On-disk layout of synchronized content.

use std::path::{Path, PathBuf};

use folio_models::{ContentDocument, ProjectRecord, SiteProfile};
use tracing::debug;

use crate::atomic::{atomic_write, atomic_write_json, ensure_dir, read_json};
use crate::error::Result;

/// File name of the project list inside the data directory.
pub const PROJECTS_FILE: &str = "projects.json";

/// File name of the site profile inside the data directory.
pub const SITE_FILE: &str = "site.json";

/// Subdirectory of the content directory holding downloaded images.
pub const ASSETS_DIR: &str = "assets";

/// Writes synchronizer output.
///
/// The data directory is bundled into the site at build time; the content
/// directory is served as static files and fetched at render time:
/// ```text
/// data_dir/
/// ├── projects.json
/// └── site.json
/// content_dir/
/// ├── {page_id}.json
/// └── assets/
///     └── {block_id}.{ext}
/// ```
#[derive(Debug, Clone)]
pub struct OutputStore {
    data_dir: PathBuf,
    content_dir: PathBuf,
}

impl OutputStore {
    /// Creates a store over the given directories. Nothing is touched on disk yet.
    pub fn new(data_dir: impl Into<PathBuf>, content_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            content_dir: content_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn content_dir(&self) -> &Path {
        &self.content_dir
    }

    pub fn projects_path(&self) -> PathBuf {
        self.data_dir.join(PROJECTS_FILE)
    }

    pub fn site_path(&self) -> PathBuf {
        self.data_dir.join(SITE_FILE)
    }

    /// Path of the content document for a page.
    pub fn document_path(&self, id: &str) -> PathBuf {
        self.content_dir.join(format!("{}.json", id))
    }

    /// Path of a downloaded image, relative to the content directory.
    ///
    /// This is the value stored in an image block's `_local` field.
    pub fn asset_relative_path(block_id: &str, ext: &str) -> String {
        format!("{}/{}.{}", ASSETS_DIR, block_id, ext)
    }

    /// Creates both output directories.
    pub fn ensure_dirs(&self) -> Result<()> {
        ensure_dir(&self.data_dir)?;
        ensure_dir(&self.content_dir)
    }

    /// Saves the project list, replacing any previous one.
    pub fn write_projects(&self, projects: &[ProjectRecord]) -> Result<()> {
        let path = self.projects_path();
        atomic_write_json(&path, &projects)?;
        debug!(path = %path.display(), count = projects.len(), "Wrote project list");
        Ok(())
    }

    pub fn read_projects(&self) -> Result<Vec<ProjectRecord>> {
        read_json(&self.projects_path())
    }

    /// Saves a content document under its ID.
    pub fn write_document(&self, document: &ContentDocument) -> Result<()> {
        let path = self.document_path(&document.id);
        atomic_write_json(&path, document)?;
        debug!(path = %path.display(), blocks = document.blocks.len(), "Wrote content document");
        Ok(())
    }

    pub fn read_document(&self, id: &str) -> Result<ContentDocument> {
        read_json(&self.document_path(id))
    }

    pub fn write_site(&self, site: &SiteProfile) -> Result<()> {
        let path = self.site_path();
        atomic_write_json(&path, site)?;
        debug!(path = %path.display(), "Wrote site profile");
        Ok(())
    }

    /// Saves image bytes for a block and returns the relative path.
    pub fn write_asset(&self, block_id: &str, ext: &str, bytes: &[u8]) -> Result<String> {
        let relative = Self::asset_relative_path(block_id, ext);
        let path = self.content_dir.join(&relative);
        atomic_write(&path, bytes)?;
        debug!(path = %path.display(), size = bytes.len(), "Wrote asset");
        Ok(relative)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_models::{BlockKind, ContentBlock, SiteLinks};
    use tempfile::tempdir;

    fn store_in(dir: &Path) -> OutputStore {
        OutputStore::new(dir.join("src/data"), dir.join("public/notion"))
    }

    #[test]
    fn test_projects_roundtrip() {
        let dir = tempdir().unwrap();
        let store = store_in(dir.path());

        let mut first = ProjectRecord::new("p1", "First");
        first.tags = vec!["rust".to_string(), "cli".to_string()];
        first.link = Some("https://github.com/me/first".to_string());
        let projects = vec![first, ProjectRecord::new("p2", "Second")];

        store.write_projects(&projects).unwrap();

        assert!(store.projects_path().ends_with("src/data/projects.json"));
        assert_eq!(store.read_projects().unwrap(), projects);
    }

    #[test]
    fn test_document_named_by_id() {
        let dir = tempdir().unwrap();
        let store = store_in(dir.path());
        let doc = ContentDocument::new(
            "abc-123",
            vec![ContentBlock::new("b1", BlockKind::paragraph("hi"))],
        );

        store.write_document(&doc).unwrap();

        let path = dir.path().join("public/notion/abc-123.json");
        assert!(path.exists());
        let raw: serde_json::Value = read_json(&path).unwrap();
        assert_eq!(raw["id"], "abc-123");
        assert_eq!(raw["blocks"][0]["type"], "paragraph");
        assert_eq!(store.read_document("abc-123").unwrap(), doc);
    }

    #[test]
    fn test_site_written_to_data_dir() {
        let dir = tempdir().unwrap();
        let store = store_in(dir.path());
        let site = SiteProfile {
            hero_name: "Ada".to_string(),
            links: SiteLinks::default(),
            ..Default::default()
        };

        store.write_site(&site).unwrap();

        let raw: serde_json::Value = read_json(&dir.path().join("src/data/site.json")).unwrap();
        assert_eq!(raw["heroName"], "Ada");
        assert_eq!(raw["links"]["github"], "");
    }

    #[test]
    fn test_write_asset_returns_relative_path() {
        let dir = tempdir().unwrap();
        let store = store_in(dir.path());

        let relative = store.write_asset("block-9", "webp", b"RIFF").unwrap();

        assert_eq!(relative, "assets/block-9.webp");
        let on_disk = dir.path().join("public/notion/assets/block-9.webp");
        assert_eq!(std::fs::read(on_disk).unwrap(), b"RIFF");
    }

    #[test]
    fn test_ensure_dirs() {
        let dir = tempdir().unwrap();
        let store = store_in(dir.path());
        store.ensure_dirs().unwrap();
        assert!(store.data_dir().is_dir());
        assert!(store.content_dir().is_dir());
    }
}
