//! Plain file downloads for block assets.

use async_trait::async_trait;
use tracing::debug;

use crate::error::{NotionError, Result};

/// Downloaded bytes plus the declared content type.
#[derive(Debug, Clone, PartialEq)]
pub struct Download {
    pub bytes: Vec<u8>,
    pub content_type: Option<String>,
}

/// Fetches a resource by URL.
#[async_trait]
pub trait Downloader: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Download>;
}

/// Unauthenticated HTTP downloader.
///
/// Notion-hosted files come back as pre-signed URLs, so no token is sent.
#[derive(Debug, Clone, Default)]
pub struct HttpDownloader {
    client: reqwest::Client,
}

impl HttpDownloader {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Downloader for HttpDownloader {
    async fn fetch(&self, url: &str) -> Result<Download> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(NotionError::Download {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.to_string());
        let bytes = response.bytes().await?.to_vec();

        debug!(url = %url, size = bytes.len(), content_type = ?content_type, "Downloaded file");
        Ok(Download {
            bytes,
            content_type,
        })
    }
}
