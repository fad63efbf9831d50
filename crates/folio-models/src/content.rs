//! Content document types.
//!
//! Blocks keep Notion's wire shape: a `type` discriminator plus a payload
//! stored under a key of the same name, e.g.
//!
//! ```json
//! { "id": "b1", "type": "paragraph", "has_children": false,
//!   "paragraph": { "rich_text": [ ... ] } }
//! ```
//!
//! The presentation layer switches on `type` and reads the payload, so the
//! serialized form must stay identical to what Notion returns for the kinds
//! listed in [`BlockKind`].

use serde::{Deserialize, Serialize};

/// The body of one project page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentDocument {
    pub id: String,
    pub blocks: Vec<ContentBlock>,
}

impl ContentDocument {
    pub fn new(id: impl Into<String>, blocks: Vec<ContentBlock>) -> Self {
        Self {
            id: id.into(),
            blocks,
        }
    }

    /// Number of blocks in the document, nested children included.
    pub fn block_count(&self) -> usize {
        let mut count = 0;
        let mut stack: Vec<&ContentBlock> = self.blocks.iter().collect();
        while let Some(block) = stack.pop() {
            count += 1;
            stack.extend(block.children.iter());
        }
        count
    }
}

/// A single block, possibly owning nested child blocks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentBlock {
    pub id: String,

    /// Whether the source reported nested children for this block.
    #[serde(default)]
    pub has_children: bool,

    #[serde(flatten)]
    pub kind: BlockKind,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ContentBlock>,
}

impl ContentBlock {
    pub fn new(id: impl Into<String>, kind: BlockKind) -> Self {
        Self {
            id: id.into(),
            has_children: false,
            kind,
            children: Vec::new(),
        }
    }

    /// Attaches children and marks the block as having them.
    pub fn with_children(mut self, children: Vec<ContentBlock>) -> Self {
        self.has_children = !children.is_empty();
        self.children = children;
        self
    }
}

/// Block kinds understood by the site, tagged by Notion's `type` field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BlockKind {
    #[serde(rename = "heading_1")]
    Heading1 { heading_1: TextPayload },
    #[serde(rename = "heading_2")]
    Heading2 { heading_2: TextPayload },
    #[serde(rename = "heading_3")]
    Heading3 { heading_3: TextPayload },
    Paragraph { paragraph: TextPayload },
    Quote { quote: TextPayload },
    Callout { callout: CalloutPayload },
    Code { code: CodePayload },
    BulletedListItem { bulleted_list_item: TextPayload },
    NumberedListItem { numbered_list_item: TextPayload },
    ToDo { to_do: ToDoPayload },
    Toggle { toggle: TextPayload },
    Divider {
        #[serde(default)]
        divider: EmptyPayload,
    },
    Image { image: ImagePayload },
    /// Any kind the site does not render (tables, embeds, columns, ...).
    #[serde(other)]
    Unsupported,
}

impl BlockKind {
    /// Shorthand for a paragraph of plain text.
    pub fn paragraph(text: &str) -> Self {
        Self::Paragraph {
            paragraph: TextPayload::plain(text),
        }
    }

    pub fn is_supported(&self) -> bool {
        !matches!(self, Self::Unsupported)
    }
}

/// Payload shared by headings, paragraphs, quotes, list items and toggles.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextPayload {
    #[serde(default)]
    pub rich_text: Vec<RichText>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl TextPayload {
    pub fn plain(text: &str) -> Self {
        Self {
            rich_text: vec![RichText::plain(text)],
            color: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CalloutPayload {
    #[serde(default)]
    pub rich_text: Vec<RichText>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<Icon>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// Callout icon. Only emoji icons are rendered; other kinds keep their type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Icon {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emoji: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CodePayload {
    #[serde(default)]
    pub rich_text: Vec<RichText>,
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub caption: Vec<RichText>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ToDoPayload {
    #[serde(default)]
    pub rich_text: Vec<RichText>,
    #[serde(default)]
    pub checked: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// Payload of a divider, always `{}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmptyPayload {}

/// Image payload.
///
/// `local` is set once the image has been downloaded and holds a path
/// relative to the content directory. The remote source is kept either way.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImagePayload {
    #[serde(flatten)]
    pub source: ImageSource,
    #[serde(default)]
    pub caption: Vec<RichText>,
    #[serde(rename = "_local", default, skip_serializing_if = "Option::is_none")]
    pub local: Option<String>,
}

impl ImagePayload {
    pub fn external(url: impl Into<String>) -> Self {
        Self {
            source: ImageSource::External {
                external: ExternalFile { url: url.into() },
            },
            caption: Vec::new(),
            local: None,
        }
    }
}

/// Where an image lives, selected by the payload's own `type` field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ImageSource {
    /// Hosted elsewhere and linked from Notion.
    External { external: ExternalFile },
    /// Uploaded to Notion; the URL is signed and expires.
    File { file: HostedFile },
}

impl ImageSource {
    pub fn url(&self) -> &str {
        match self {
            Self::External { external } => &external.url,
            Self::File { file } => &file.url,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExternalFile {
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostedFile {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry_time: Option<String>,
}

/// A styled span of text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RichText {
    #[serde(default)]
    pub plain_text: String,
    #[serde(default)]
    pub href: Option<String>,
    #[serde(default)]
    pub annotations: Annotations,
}

impl RichText {
    /// An unstyled run.
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            plain_text: text.into(),
            href: None,
            annotations: Annotations::default(),
        }
    }

    /// Concatenates the plain text of every run.
    pub fn join(runs: &[RichText]) -> String {
        runs.iter().map(|r| r.plain_text.as_str()).collect()
    }

    /// Plain text of the first run only, empty when there are none.
    pub fn first(runs: &[RichText]) -> String {
        runs.first().map(|r| r.plain_text.clone()).unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Annotations {
    pub bold: bool,
    pub italic: bool,
    pub strikethrough: bool,
    pub underline: bool,
    pub code: bool,
    pub color: String,
}

impl Default for Annotations {
    fn default() -> Self {
        Self {
            bold: false,
            italic: false,
            strikethrough: false,
            underline: false,
            code: false,
            color: "default".to_string(),
        }
    }
}
