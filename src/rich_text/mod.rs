//! Prismic structured text.
//!
//! A rich text field is a list of blocks; each textual block carries its text
//! and spans of formatting over character ranges of that text.

use serde::Deserialize;

use crate::util::serde_helpers::null_as_default;

pub mod html;

pub use html::as_html;

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
pub enum BlockKind {
    #[serde(rename = "heading1")]
    Heading1,
    #[serde(rename = "heading2")]
    Heading2,
    #[serde(rename = "heading3")]
    Heading3,
    #[serde(rename = "heading4")]
    Heading4,
    #[serde(rename = "heading5")]
    Heading5,
    #[serde(rename = "heading6")]
    Heading6,
    #[serde(rename = "paragraph")]
    Paragraph,
    #[serde(rename = "preformatted")]
    Preformatted,
    #[serde(rename = "list-item")]
    ListItem,
    #[serde(rename = "o-list-item")]
    OrderedListItem,
    #[serde(rename = "image")]
    Image,
    #[serde(rename = "embed")]
    Embed,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
pub enum SpanKind {
    #[serde(rename = "strong")]
    Strong,
    #[serde(rename = "em")]
    Em,
    #[serde(rename = "hyperlink")]
    Hyperlink,
    #[serde(rename = "label")]
    Label,
    #[serde(other)]
    Unknown,
}

/// Payload of hyperlink and label spans.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct SpanData {
    pub link_type: Option<String>,
    pub url: Option<String>,
    pub target: Option<String>,
    pub uid: Option<String>,
    #[serde(rename = "type")]
    pub doc_type: Option<String>,
    pub label: Option<String>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    #[serde(rename = "type")]
    pub kind: SpanKind,
    #[serde(default)]
    pub data: Option<SpanData>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct Embed {
    pub embed_url: Option<String>,
    #[serde(rename = "type")]
    pub embed_type: Option<String>,
    pub provider_name: Option<String>,
    pub html: Option<String>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct RichTextBlock {
    #[serde(rename = "type")]
    pub kind: BlockKind,
    #[serde(default, deserialize_with = "null_as_default")]
    pub text: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub spans: Vec<Span>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub alt: Option<String>,
    #[serde(default)]
    pub oembed: Option<Embed>,
}

impl RichTextBlock {
    pub fn is_textual(&self) -> bool {
        !matches!(self.kind, BlockKind::Image | BlockKind::Embed | BlockKind::Unknown)
    }
}

/// Plain text of the field: the text of every textual block joined by a space.
pub fn as_text(blocks: &[RichTextBlock]) -> String {
    blocks.iter()
        .filter(|b| b.is_textual())
        .map(|b| b.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}
