//! Asset localizer.
//!
//! Downloads every image referenced by a content document into the assets
//! directory and records the local path on the image block. A failed
//! download only costs that image its local copy.

use folio_models::{BlockKind, ContentBlock, ContentDocument, ImagePayload};
use folio_notion::Downloader;
use folio_persistence::{OutputStore, Result};
use tracing::{debug, warn};
use url::Url;

/// Extension used when neither the URL nor the content type names a format.
pub const FALLBACK_EXTENSION: &str = "img";

const IMAGE_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "gif", "webp", "svg", "avif", "bmp", "ico",
];

/// Outcome counts for one document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LocalizeStats {
    pub localized: usize,
    pub failed: usize,
}

pub struct AssetLocalizer<'a> {
    downloader: &'a dyn Downloader,
    store: &'a OutputStore,
}

impl<'a> AssetLocalizer<'a> {
    pub fn new(downloader: &'a dyn Downloader, store: &'a OutputStore) -> Self {
        Self { downloader, store }
    }

    /// Localizes all images in the document, nested blocks included.
    ///
    /// Only a failure to write a downloaded file is returned as an error.
    pub async fn localize(&self, document: &mut ContentDocument) -> Result<LocalizeStats> {
        let mut stats = LocalizeStats::default();
        let mut stack: Vec<&mut ContentBlock> = document.blocks.iter_mut().rev().collect();

        while let Some(block) = stack.pop() {
            let ContentBlock {
                id, kind, children, ..
            } = block;

            if let BlockKind::Image { image } = kind {
                if self.localize_image(id, image).await? {
                    stats.localized += 1;
                } else {
                    stats.failed += 1;
                }
            }

            stack.extend(children.iter_mut().rev());
        }

        Ok(stats)
    }

    /// Downloads one image. Returns false when the download failed.
    async fn localize_image(&self, block_id: &str, image: &mut ImagePayload) -> Result<bool> {
        let url = image.source.url().to_string();

        let download = match self.downloader.fetch(&url).await {
            Ok(download) => download,
            Err(e) => {
                warn!(block = %block_id, error = %e, "Image download failed, keeping remote URL");
                return Ok(false);
            }
        };

        let ext = infer_extension(&url, download.content_type.as_deref());
        let relative = self.store.write_asset(block_id, ext, &download.bytes)?;
        debug!(block = %block_id, path = %relative, "Localized image");
        image.local = Some(relative);
        Ok(true)
    }
}

/// Picks a file extension for a downloaded image.
///
/// Tries the URL path suffix first, then the declared content type, then
/// falls back to [`FALLBACK_EXTENSION`].
pub fn infer_extension(url: &str, content_type: Option<&str>) -> &'static str {
    extension_from_url(url)
        .or_else(|| content_type.and_then(extension_from_content_type))
        .unwrap_or(FALLBACK_EXTENSION)
}

fn extension_from_url(url: &str) -> Option<&'static str> {
    let parsed = Url::parse(url).ok()?;
    let file_name = parsed.path_segments()?.last()?;
    let (_, ext) = file_name.rsplit_once('.')?;
    let ext = ext.to_ascii_lowercase();
    IMAGE_EXTENSIONS.iter().copied().find(|known| *known == ext)
}

fn extension_from_content_type(content_type: &str) -> Option<&'static str> {
    let mime = content_type.split(';').next()?.trim().to_ascii_lowercase();
    match mime.as_str() {
        "image/png" => Some("png"),
        "image/jpeg" | "image/jpg" => Some("jpg"),
        "image/gif" => Some("gif"),
        "image/webp" => Some("webp"),
        "image/svg+xml" => Some("svg"),
        "image/avif" => Some("avif"),
        "image/bmp" => Some("bmp"),
        _ => None,
    }
}
