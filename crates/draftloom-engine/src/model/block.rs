use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a block, assigned by the document host when it
/// adopts the block and never reassigned afterwards.
///
/// Freshly classified blocks carry an unassigned (empty) id until the host
/// takes ownership of them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockId(String);

impl BlockId {
    /// Generate a fresh, document-unique identifier.
    pub fn fresh() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// The empty id carried by blocks that no host has adopted yet.
    pub fn unassigned() -> Self {
        Self(String::new())
    }

    pub fn is_assigned(&self) -> bool {
        !self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BlockId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BlockId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Style flags carried by a text span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SpanStyles {
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub bold: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub italic: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub code: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub strike: bool,
}

impl SpanStyles {
    pub const PLAIN: Self = Self::flags(false, false, false, false);
    pub const BOLD: Self = Self::flags(true, false, false, false);
    pub const ITALIC: Self = Self::flags(false, true, false, false);
    pub const CODE: Self = Self::flags(false, false, true, false);
    pub const STRIKE: Self = Self::flags(false, false, false, true);
    pub const BOLD_ITALIC: Self = Self::flags(true, true, false, false);

    const fn flags(bold: bool, italic: bool, code: bool, strike: bool) -> Self {
        Self {
            bold,
            italic,
            code,
            strike,
        }
    }

    pub fn is_plain(&self) -> bool {
        *self == Self::PLAIN
    }
}

/// A run of text with a uniform style set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextSpan {
    pub text: String,
    #[serde(default)]
    pub styles: SpanStyles,
}

impl TextSpan {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            styles: SpanStyles::PLAIN,
        }
    }

    pub fn styled(text: impl Into<String>, styles: SpanStyles) -> Self {
        Self {
            text: text.into(),
            styles,
        }
    }
}

/// Normalize a span list: merge adjacent spans with identical style sets and
/// drop empty spans that carry no information.
///
/// An empty list collapses to a single empty plain span so every block has a
/// well-defined (possibly empty) text.
pub fn normalize_spans(spans: Vec<TextSpan>) -> Vec<TextSpan> {
    let mut out: Vec<TextSpan> = Vec::with_capacity(spans.len());
    for span in spans {
        match out.last_mut() {
            Some(prev) if prev.styles == span.styles => prev.text.push_str(&span.text),
            _ => {
                if !span.text.is_empty() {
                    out.push(span);
                }
            }
        }
    }
    if out.is_empty() {
        out.push(TextSpan::plain(""));
    }
    out
}

/// Structural role of a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum BlockKind {
    Heading { level: u8 },
    Paragraph,
    BulletItem,
    NumberedItem,
}

/// One structural unit of a document: a heading, paragraph, or list item,
/// with its styled text content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub id: BlockId,
    pub kind: BlockKind,
    pub spans: Vec<TextSpan>,
}

impl Block {
    /// Create a block with an unassigned id. The span list is normalized.
    pub fn new(kind: BlockKind, spans: Vec<TextSpan>) -> Self {
        Self {
            id: BlockId::unassigned(),
            kind,
            spans: normalize_spans(spans),
        }
    }

    pub fn heading(level: u8, spans: Vec<TextSpan>) -> Self {
        Self::new(BlockKind::Heading { level }, spans)
    }

    pub fn paragraph(spans: Vec<TextSpan>) -> Self {
        Self::new(BlockKind::Paragraph, spans)
    }

    pub fn bullet_item(spans: Vec<TextSpan>) -> Self {
        Self::new(BlockKind::BulletItem, spans)
    }

    pub fn numbered_item(spans: Vec<TextSpan>) -> Self {
        Self::new(BlockKind::NumberedItem, spans)
    }

    pub fn with_id(mut self, id: BlockId) -> Self {
        self.id = id;
        self
    }

    /// Rendered text of the block: span texts concatenated, markers excluded.
    pub fn text(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }

    pub fn is_heading(&self) -> bool {
        matches!(self.kind, BlockKind::Heading { .. })
    }

    pub fn heading_level(&self) -> Option<u8> {
        match self.kind {
            BlockKind::Heading { level } => Some(level),
            _ => None,
        }
    }
}
