//! Abbreviation blocks and the per-line abbreviation table.
//!
//! A box cell whose text equals the name of an abbreviation declared on the
//! same diagram line is rendered with that abbreviation's captured content
//! and style parameters instead of its literal text.

use std::collections::BTreeMap;

use indexmap::IndexMap;

use tessera_core::{content::ContentNode, style::StyleParams};

use crate::span::Span;

/// Captured content and resolved style of one abbreviation declaration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AbbreviationBlock {
    content: Vec<ContentNode>,
    params: StyleParams,
    span: Span,
}

impl AbbreviationBlock {
    pub fn new(params: StyleParams, span: Span) -> Self {
        Self {
            content: Vec::new(),
            params,
            span,
        }
    }

    /// Content nodes captured after the declaration, in source order.
    pub fn content(&self) -> &[ContentNode] {
        &self.content
    }

    /// Validated style parameters.
    pub fn params(&self) -> &StyleParams {
        &self.params
    }

    /// Span of the declaring `|name=` token.
    pub fn span(&self) -> Span {
        self.span
    }

    pub fn push_content(&mut self, node: ContentNode) {
        self.content.push(node);
    }
}

/// Abbreviation blocks keyed by `(line index, name)`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AbbreviationTable {
    lines: BTreeMap<usize, IndexMap<String, AbbreviationBlock>>,
}

impl AbbreviationTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up the block declared as `name` on `line`.
    pub fn get(&self, line: usize, name: &str) -> Option<&AbbreviationBlock> {
        self.lines.get(&line).and_then(|blocks| blocks.get(name))
    }

    pub(crate) fn get_mut(&mut self, line: usize, name: &str) -> Option<&mut AbbreviationBlock> {
        self.lines
            .get_mut(&line)
            .and_then(|blocks| blocks.get_mut(name))
    }

    /// Declares `name` on `line`, replacing an earlier declaration with the
    /// same name.
    pub fn insert(&mut self, line: usize, name: impl Into<String>, block: AbbreviationBlock) {
        self.lines.entry(line).or_default().insert(name.into(), block);
    }

    /// Returns `true` if at least one abbreviation is declared on `line`.
    pub fn declares_on_line(&self, line: usize) -> bool {
        self.lines.contains_key(&line)
    }

    /// Iterates `(line, name, block)` ordered by line, then declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &str, &AbbreviationBlock)> {
        self.lines.iter().flat_map(|(&line, blocks)| {
            blocks
                .iter()
                .map(move |(name, block)| (line, name.as_str(), block))
        })
    }

    pub fn len(&self) -> usize {
        self.lines.values().map(IndexMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use tessera_core::style::StyleKey;

    use super::*;

    #[test]
    fn test_lookup_is_per_line() {
        let mut table = AbbreviationTable::new();
        table.insert(1, "box", AbbreviationBlock::default());

        assert!(table.get(1, "box").is_some());
        assert!(table.get(0, "box").is_none());
        assert!(table.declares_on_line(1));
        assert!(!table.declares_on_line(0));
    }

    #[test]
    fn test_redeclaration_replaces_block() {
        let mut params = StyleParams::new();
        params.insert(StyleKey::TextAlign, "left");

        let mut table = AbbreviationTable::new();
        table.insert(0, "a", AbbreviationBlock::default());
        table.insert(0, "b", AbbreviationBlock::default());
        table.insert(0, "a", AbbreviationBlock::new(params, Span::new(4..8)));

        assert_eq!(table.len(), 2);
        let names: Vec<&str> = table.iter().map(|(_, name, _)| name).collect();
        assert_eq!(names, vec!["a", "b"]);
        assert_eq!(
            table.get(0, "a").unwrap().params().get(StyleKey::TextAlign),
            Some("left")
        );
    }
}
