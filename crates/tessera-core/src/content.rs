//! Content captured for abbreviation blocks.
//!
//! The parser does not interpret rich content. Plain text and spans of
//! co-resident markup are stored as [`ContentNode`]s and handed, unchanged,
//! to whatever content renderer the host supplies.

/// Kind of an inline markup span recognized inside a diagram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkupKind {
    /// `[[target|label]]`
    Link,
    /// `{{source|title}}`
    Media,
    /// `**text**`
    Strong,
    /// `//text//`
    Emphasis,
    /// `__text__`
    Underline,
    /// `''text''`
    Monospace,
    /// `%%text%%` or `<nowiki>text</nowiki>`
    Unformatted,
}

impl MarkupKind {
    /// Opening and closing delimiters, in lexer priority order.
    pub const DELIMITERS: [(MarkupKind, &'static str, &'static str); 8] = [
        (MarkupKind::Link, "[[", "]]"),
        (MarkupKind::Media, "{{", "}}"),
        (MarkupKind::Strong, "**", "**"),
        (MarkupKind::Emphasis, "//", "//"),
        (MarkupKind::Underline, "__", "__"),
        (MarkupKind::Monospace, "''", "''"),
        (MarkupKind::Unformatted, "%%", "%%"),
        (MarkupKind::Unformatted, "<nowiki>", "</nowiki>"),
    ];
}

/// An opaque node of abbreviation content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentNode {
    /// Raw text, verbatim.
    Text(String),
    /// A markup span with its inner text, delimiters stripped.
    Markup { kind: MarkupKind, inner: String },
}

impl ContentNode {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    pub fn markup(kind: MarkupKind, inner: impl Into<String>) -> Self {
        Self::Markup {
            kind,
            inner: inner.into(),
        }
    }

    /// Returns the node's text without any markup delimiters.
    pub fn plain_text(&self) -> &str {
        match self {
            Self::Text(text) => text,
            Self::Markup { inner, .. } => inner,
        }
    }
}
