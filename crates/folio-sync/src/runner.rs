//! Synchronization run: projects path, then site path.
//!
//! Steps run strictly one after another; every request is awaited before
//! the next one is sent.

use std::sync::Arc;

use folio_notion::{Downloader, HttpDownloader, NotionApi, NotionClient};
use folio_persistence::OutputStore;
use tracing::info;

use crate::assets::AssetLocalizer;
use crate::config::SyncConfig;
use crate::content::fetch_document;
use crate::error::{Result, SyncError};
use crate::projects::sync_projects;
use crate::site::sync_site;

/// Counts reported at the end of a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub projects: usize,
    pub documents: usize,
    pub images_localized: usize,
    pub images_failed: usize,
    pub site_written: bool,
}

pub struct Synchronizer {
    config: SyncConfig,
    api: Arc<dyn NotionApi>,
    downloader: Arc<dyn Downloader>,
    store: OutputStore,
}

impl Synchronizer {
    /// Creates a synchronizer over the given workspace and downloader.
    pub fn new(
        config: SyncConfig,
        api: Arc<dyn NotionApi>,
        downloader: Arc<dyn Downloader>,
    ) -> Self {
        let store = OutputStore::new(&config.data_dir, &config.content_dir);
        Self {
            config,
            api,
            downloader,
            store,
        }
    }

    /// Creates a synchronizer talking to the Notion API over HTTP.
    pub fn from_config(config: SyncConfig) -> Self {
        let api = NotionClient::new(config.token.clone()).with_base_url(&config.api_base_url);
        Self::new(config, Arc::new(api), Arc::new(HttpDownloader::new()))
    }

    pub fn store(&self) -> &OutputStore {
        &self.store
    }

    /// Runs a full sync, overwriting previous output.
    pub async fn run(&self) -> Result<SyncReport> {
        self.store.ensure_dirs()?;

        let mut report = SyncReport::default();
        self.sync_projects(&mut report).await?;
        self.sync_site(&mut report).await?;

        info!(
            projects = report.projects,
            documents = report.documents,
            images = report.images_localized,
            images_failed = report.images_failed,
            site = report.site_written,
            "Done"
        );
        Ok(report)
    }

    async fn sync_projects(&self, report: &mut SyncReport) -> Result<()> {
        let databases = &self.config.project_databases;
        if databases.is_empty() {
            info!("No project databases configured, skipping projects");
            return Ok(());
        }
        info!(databases = %databases.join(", "), "Syncing project databases");

        let projects = sync_projects(self.api.as_ref(), databases, &self.config.projects).await?;
        let localizer = AssetLocalizer::new(self.downloader.as_ref(), &self.store);

        for project in &projects {
            let mut document = fetch_document(self.api.as_ref(), &project.content_ref)
                .await
                .map_err(|source| SyncError::Content {
                    document: project.content_ref.clone(),
                    source,
                })?;

            if self.config.localize_assets {
                let stats = localizer.localize(&mut document).await?;
                report.images_localized += stats.localized;
                report.images_failed += stats.failed;
            }

            self.store.write_document(&document)?;
            report.documents += 1;
        }

        self.store.write_projects(&projects)?;
        report.projects = projects.len();
        info!(
            count = projects.len(),
            path = %self.store.projects_path().display(),
            "Wrote projects"
        );
        Ok(())
    }

    async fn sync_site(&self, report: &mut SyncReport) -> Result<()> {
        let Some(database) = &self.config.site_database else {
            info!("Site database not configured, skipping site profile");
            return Ok(());
        };

        if let Some(site) = sync_site(self.api.as_ref(), database, &self.config.site).await? {
            self.store.write_site(&site)?;
            report.site_written = true;
            info!(path = %self.store.site_path().display(), "Wrote site profile");
        }
        Ok(())
    }
}
