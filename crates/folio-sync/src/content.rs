//! Content fetcher.
//!
//! Builds a page's block tree with an explicit worklist instead of
//! recursion. Each pending fetch carries its depth; fetches deeper than
//! [`MAX_DEPTH`] are dropped, which leaves those blocks without children
//! and guarantees termination even for cyclic structures.

use folio_models::{ContentBlock, ContentDocument};
use folio_notion::NotionApi;
use tracing::{debug, warn};

/// Deepest level whose children are still fetched. The page itself is level 0.
pub const MAX_DEPTH: usize = 6;

/// A block whose children still need fetching.
struct PendingFetch {
    /// Arena index of the parent block, `None` for the page itself.
    parent: Option<usize>,
    block_id: String,
    depth: usize,
}

/// Fetches the full block tree of a page.
///
/// Blocks of unsupported kinds are dropped together with their subtree.
/// Any request failure aborts the fetch.
pub async fn fetch_document(
    api: &dyn NotionApi,
    document_id: &str,
) -> folio_notion::Result<ContentDocument> {
    let mut arena: Vec<Option<ContentBlock>> = Vec::new();
    let mut child_slots: Vec<Vec<usize>> = Vec::new();
    let mut roots: Vec<usize> = Vec::new();

    let mut pending = vec![PendingFetch {
        parent: None,
        block_id: document_id.to_string(),
        depth: 0,
    }];

    while let Some(job) = pending.pop() {
        if job.depth > MAX_DEPTH {
            debug!(block = %job.block_id, depth = job.depth, "Depth limit reached, skipping children");
            continue;
        }

        let mut nested = Vec::new();
        for value in fetch_children(api, &job.block_id).await? {
            let block = match decode_block(value) {
                Ok(block) => block,
                Err(skipped) => {
                    skipped.log();
                    continue;
                }
            };

            let index = arena.len();
            if block.has_children {
                nested.push(PendingFetch {
                    parent: Some(index),
                    block_id: block.id.clone(),
                    depth: job.depth + 1,
                });
            }
            arena.push(Some(block));
            child_slots.push(Vec::new());
            match job.parent {
                Some(parent) => child_slots[parent].push(index),
                None => roots.push(index),
            }
        }

        // Reversed so the first child is fetched next
        pending.extend(nested.into_iter().rev());
    }

    // Children always sit after their parent in the arena
    for index in (0..arena.len()).rev() {
        let children: Vec<ContentBlock> = std::mem::take(&mut child_slots[index])
            .into_iter()
            .filter_map(|child| arena[child].take())
            .collect();
        if let Some(block) = arena[index].as_mut() {
            block.children = children;
        }
    }

    let blocks: Vec<ContentBlock> = roots
        .into_iter()
        .filter_map(|index| arena[index].take())
        .collect();

    debug!(document = %document_id, blocks = blocks.len(), "Fetched block tree");
    Ok(ContentDocument::new(document_id, blocks))
}

/// Pages through all direct children of a block.
async fn fetch_children(
    api: &dyn NotionApi,
    block_id: &str,
) -> folio_notion::Result<Vec<serde_json::Value>> {
    let mut results = Vec::new();
    let mut cursor: Option<String> = None;
    loop {
        let list = api.list_block_children(block_id, cursor.as_deref()).await?;
        cursor = list.next_page_cursor().map(str::to_string);
        results.extend(list.results);
        if cursor.is_none() {
            return Ok(results);
        }
    }
}

/// Why a returned block was left out of the tree.
#[derive(Debug, PartialEq)]
enum SkippedBlock {
    /// A kind the site does not render.
    Unsupported { id: String, kind: String },
    /// A rendered kind, or a block without id or type, that failed to decode.
    Malformed { kind: String, error: String },
}

impl SkippedBlock {
    fn log(&self) {
        match self {
            Self::Unsupported { id, kind } => {
                debug!(block = %id, kind = %kind, "Dropping unsupported block")
            }
            Self::Malformed { kind, error } => {
                warn!(kind = %kind, error = %error, "Dropping malformed block")
            }
        }
    }
}

/// Decodes a raw block. Unsupported kinds and decode failures are skipped.
fn decode_block(value: serde_json::Value) -> Result<ContentBlock, SkippedBlock> {
    let kind = value
        .get("type")
        .and_then(|t| t.as_str())
        .unwrap_or("unknown")
        .to_string();

    match serde_json::from_value::<ContentBlock>(value) {
        Ok(block) if block.kind.is_supported() => Ok(block),
        Ok(block) => Err(SkippedBlock::Unsupported { id: block.id, kind }),
        Err(e) => Err(SkippedBlock::Malformed {
            kind,
            error: e.to_string(),
        }),
    }
}
