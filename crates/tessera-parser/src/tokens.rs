//! Token types produced by the diagram tokenizer.

use std::fmt;

use tessera_core::content::ContentNode;

use crate::span::Span;

/// The cell delimiter of the diagram notation.
pub const DELIMITER: char = '|';

/// Token types for the diagram notation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token<'src> {
    /// Entry marker of a diagram block.
    Enter,
    /// Exit marker of a diagram block.
    Exit,
    /// End of a diagram row.
    Newline,
    /// `|command`, with surrounding whitespace trimmed.
    Command(&'src str),
    /// `|name=` or `|name{params}=`.
    AbbrEval {
        name: &'src str,
        params: Option<&'src str>,
    },
    /// Text that matched no other rule.
    RawText(&'src str),
    /// A span of co-resident markup, kept opaque.
    PassThrough(ContentNode),
}

/// A token with its byte span in the diagram body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionedToken<'src> {
    pub token: Token<'src>,
    pub span: Span,
}

impl<'src> PositionedToken<'src> {
    pub fn new(token: Token<'src>, span: Span) -> Self {
        Self { token, span }
    }
}

impl<'src> std::ops::Deref for PositionedToken<'src> {
    type Target = Token<'src>;

    fn deref(&self) -> &Self::Target {
        &self.token
    }
}

impl<'src> From<(Token<'src>, Span)> for PositionedToken<'src> {
    fn from((token, span): (Token<'src>, Span)) -> Self {
        Self::new(token, span)
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Enter => write!(f, "<enter>"),
            Token::Exit => write!(f, "<exit>"),
            Token::Newline => write!(f, "\\n"),
            Token::Command(text) => write!(f, "{DELIMITER}{text}"),
            Token::AbbrEval { name, params: None } => write!(f, "{DELIMITER}{name}="),
            Token::AbbrEval {
                name,
                params: Some(params),
            } => write!(f, "{DELIMITER}{name}{{{params}}}="),
            Token::RawText(text) => write!(f, "{text}"),
            Token::PassThrough(node) => write!(f, "{}", node.plain_text()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_display() {
        assert_eq!(Token::Command("+@1").to_string(), "|+@1");
        assert_eq!(
            Token::AbbrEval {
                name: "box",
                params: Some("padding:2px")
            }
            .to_string(),
            "|box{padding:2px}="
        );
        assert_eq!(
            Token::AbbrEval {
                name: "box",
                params: None
            }
            .to_string(),
            "|box="
        );
    }
}
