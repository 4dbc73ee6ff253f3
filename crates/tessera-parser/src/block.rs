//! Extraction of `<diagram>` blocks from a surrounding document.

use crate::span::Span;

pub const OPEN_MARKER: &str = "<diagram>";
pub const CLOSE_MARKER: &str = "</diagram>";

/// A `<diagram>...</diagram>` block found in a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block<'src> {
    body: &'src str,
    body_offset: usize,
    span: Span,
}

impl<'src> Block<'src> {
    /// Diagram text: everything after the first newline that follows the
    /// opening marker, up to the closing marker.
    pub fn body(&self) -> &'src str {
        self.body
    }

    /// Byte offset of the body within the document.
    pub fn body_offset(&self) -> usize {
        self.body_offset
    }

    /// Span of the whole block, markers included.
    pub fn span(&self) -> Span {
        self.span
    }
}

/// Find every diagram block of a document, in document order.
///
/// Blocks do not nest: a block ends at the first closing marker after its
/// opening marker. An opening marker without a closing marker is ordinary
/// text.
pub fn blocks(document: &str) -> Vec<Block<'_>> {
    let mut found = Vec::new();
    let mut cursor = 0;

    while let Some(open) = document[cursor..].find(OPEN_MARKER) {
        let start = cursor + open;
        let inner_start = start + OPEN_MARKER.len();
        let Some(close) = document[inner_start..].find(CLOSE_MARKER) else {
            break;
        };
        let inner_end = inner_start + close;
        let end = inner_end + CLOSE_MARKER.len();

        let inner = &document[inner_start..inner_end];
        let (body, body_offset) = match inner.find('\n') {
            Some(newline) => (&inner[newline + 1..], inner_start + newline + 1),
            None => ("", inner_end),
        };

        found.push(Block {
            body,
            body_offset,
            span: Span::new(start..end),
        });
        cursor = end;
    }

    found
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_block() {
        let document = "before\n<diagram> ignored\n|A|\n</diagram>\nafter";
        let found = blocks(document);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].body(), "|A|\n");
        assert_eq!(&document[found[0].span().range()], "<diagram> ignored\n|A|\n</diagram>");
        assert_eq!(
            &document[found[0].body_offset()..found[0].body_offset() + 4],
            "|A|\n"
        );
    }

    #[test]
    fn test_block_without_newline_has_empty_body() {
        let found = blocks("<diagram>|A|</diagram>");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].body(), "");
    }

    #[test]
    fn test_multiple_blocks_do_not_nest() {
        let document = "<diagram>\n|A|\n<diagram>\n|B|\n</diagram></diagram>\n<diagram>\n|C|\n</diagram>";
        let bodies: Vec<&str> = blocks(document).iter().map(Block::body).collect();
        assert_eq!(bodies, vec!["|A|\n<diagram>\n|B|\n", "|C|\n"]);
    }

    #[test]
    fn test_unclosed_block_is_text() {
        assert!(blocks("<diagram>\n|A|\n").is_empty());
        assert!(blocks("no diagrams here").is_empty());
    }
}
