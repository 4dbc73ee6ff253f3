//! Tokenizer for diagram block bodies.
//!
//! The lexer converts the text between a block's entry and exit markers into
//! a stream of [`Token`]s. It is total: every byte of the input ends up in
//! exactly one token, and text that matches no rule becomes
//! [`Token::RawText`].
//!
//! Rules are tried in priority order at each position:
//!
//! 1. `\n` is a [`Token::Newline`].
//! 2. `|name{params}=`, `|name=`, and `|name{...=` with an unclosed group are
//!    [`Token::AbbrEval`]s.
//! 3. Any other `|` starts a [`Token::Command`] running up to the next `|`,
//!    `=` or newline.
//! 4. Inline markup spans (`[[...]]`, `**...**`, ...) closed on the same line
//!    are [`Token::PassThrough`] nodes.
//! 5. Everything else is raw text; adjacent raw runs are merged.

use std::collections::HashMap;

use winnow::{
    Parser as _,
    combinator::{alt, delimited, preceded, terminated},
    error::{ContextError, ModalResult},
    stream::{LocatingSlice, Location, Stream},
    token::{any, take_while},
};

use tessera_core::content::{ContentNode, MarkupKind};

use crate::{
    span::Span,
    tokens::{DELIMITER, PositionedToken, Token},
};

type Input<'a> = LocatingSlice<&'a str>;
type IResult<O> = ModalResult<O, ContextError>;

/// Characters that may start a token other than raw text.
fn is_token_start(c: char) -> bool {
    matches!(
        c,
        '\n' | DELIMITER | '[' | '{' | '*' | '/' | '_' | '\'' | '%' | '<'
    )
}

/// Parse newline
fn newline<'a>(input: &mut Input<'a>) -> IResult<Token<'a>> {
    '\n'.value(Token::Newline).parse_next(input)
}

/// Parse an abbreviation name: ASCII letters, digits and underscores
fn abbreviation_name<'a>(input: &mut Input<'a>) -> IResult<&'a str> {
    take_while(1.., |c: char| c.is_ascii_alphanumeric() || c == '_').parse_next(input)
}

/// Parse a `{...}` parameter group and return its inner text
fn parameter_group<'a>(input: &mut Input<'a>) -> IResult<&'a str> {
    delimited(
        '{',
        take_while(0.., |c: char| !matches!(c, '{' | '}' | '\n')),
        '}',
    )
    .parse_next(input)
}

/// Parse an abbreviation evaluation (order matters - parameterized first)
fn abbreviation<'a>(input: &mut Input<'a>) -> IResult<Token<'a>> {
    preceded(
        DELIMITER,
        alt((
            terminated((abbreviation_name, parameter_group), '=').map(|(name, params)| {
                Token::AbbrEval {
                    name,
                    params: Some(params),
                }
            }),
            terminated(abbreviation_name, '=').map(|name| Token::AbbrEval { name, params: None }),
            // An unclosed group falls back to a bare name covering the whole run
            terminated(
                (
                    abbreviation_name,
                    '{',
                    take_while(0.., |c: char| {
                        !matches!(c, '{' | '}' | '=' | DELIMITER | '\n')
                    }),
                )
                    .take(),
                '=',
            )
            .map(|name| Token::AbbrEval { name, params: None }),
        )),
    )
    .parse_next(input)
}

/// Parse a command: the delimiter and everything up to the next `|`, `=` or newline
fn command<'a>(input: &mut Input<'a>) -> IResult<Token<'a>> {
    preceded(
        DELIMITER,
        take_while(0.., |c: char| !matches!(c, DELIMITER | '=' | '\n')),
    )
    .map(|text: &str| Token::Command(text.trim()))
    .parse_next(input)
}

/// Parse raw text, or a single character that failed to start another token
fn raw_text<'a>(input: &mut Input<'a>) -> IResult<Token<'a>> {
    alt((take_while(1.., |c: char| !is_token_start(c)), any.take()))
        .map(Token::RawText)
        .parse_next(input)
}

/// Parse a single token with position tracking
fn positioned_token<'a>(input: &mut Input<'a>) -> IResult<PositionedToken<'a>> {
    let start_pos = input.current_token_start();

    let token = alt((
        newline,
        abbreviation, // Must come before command
        command,
        raw_text, // Always matches on non-empty input
    ))
    .parse_next(input)?;

    let end_pos = input.current_token_start();
    Ok(PositionedToken::new(token, Span::new(start_pos..end_pos)))
}

/// Memoized forward searches over the source.
///
/// Each needle remembers where its last search started and what it found.
/// While the cursor has not passed that hit the answer still holds, so a run
/// of unclosed openers costs one scan per needle instead of one per opener.
#[derive(Debug, Default)]
struct Lookahead {
    hits: HashMap<&'static str, (usize, Option<usize>)>,
}

impl Lookahead {
    /// Byte offset of the first `needle` at or after `from`.
    fn find(&mut self, source: &str, needle: &'static str, from: usize) -> Option<usize> {
        if let Some(&(searched_from, hit)) = self.hits.get(needle) {
            if searched_from <= from && hit.is_none_or(|at| at >= from) {
                return hit;
            }
        }
        let hit = source[from..].find(needle).map(|at| from + at);
        self.hits.insert(needle, (from, hit));
        hit
    }
}

/// Lexer that accumulates tokens, merging adjacent raw text.
struct Lexer<'a> {
    source: &'a str,
    tokens: Vec<PositionedToken<'a>>,
    lookahead: Lookahead,
}

impl<'a> Lexer<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            tokens: Vec::new(),
            lookahead: Lookahead::default(),
        }
    }

    /// Match an inline markup span that closes on the same line.
    ///
    /// No opener starts with `|` or a newline, so trying markup before the
    /// other rules keeps their priority order.
    fn markup_span(&mut self, input: &mut Input<'a>) -> Option<PositionedToken<'a>> {
        let source = self.source;
        let start = input.current_token_start();
        let rest = &source[start..];

        for (kind, open, close) in MarkupKind::DELIMITERS {
            if !rest.starts_with(open) {
                continue;
            }
            let inner_start = start + open.len();
            let Some(close_at) = self.lookahead.find(source, close, inner_start) else {
                continue;
            };
            let line_end = self
                .lookahead
                .find(source, "\n", start)
                .unwrap_or(source.len());
            if close_at > line_end {
                continue;
            }

            let end = close_at + close.len();
            let _ = input.next_slice(end - start);
            let inner = &source[inner_start..close_at];
            return Some(PositionedToken::new(
                Token::PassThrough(ContentNode::markup(kind, inner)),
                Span::new(start..end),
            ));
        }

        None
    }

    fn push(&mut self, token: PositionedToken<'a>) {
        if let (Some(last), Token::RawText(_)) = (self.tokens.last_mut(), &token.token) {
            if matches!(last.token, Token::RawText(_)) && last.span.end() == token.span.start() {
                let span = last.span.union(token.span);
                *last = PositionedToken::new(Token::RawText(&self.source[span.range()]), span);
                return;
            }
        }
        self.tokens.push(token);
    }

    fn tokenize(&mut self) {
        let end = self.source.len();
        self.push(PositionedToken::new(Token::Enter, Span::new(0..0)));

        let mut input = LocatingSlice::new(self.source);
        while !input.is_empty() {
            let start_pos = input.current_token_start();
            let parsed = match self.markup_span(&mut input) {
                Some(token) => Ok(token),
                None => positioned_token(&mut input),
            };
            match parsed {
                Ok(token) => self.push(token),
                Err(_) => {
                    // Unreachable in practice: raw text accepts any character
                    let _ = input.next_token();
                    let span = Span::new(start_pos..input.current_token_start());
                    self.push(PositionedToken::new(
                        Token::RawText(&self.source[span.range()]),
                        span,
                    ));
                }
            }
        }

        self.push(PositionedToken::new(Token::Exit, Span::new(end..end)));
    }
}

/// Tokenize a diagram block body.
///
/// The returned stream starts with [`Token::Enter`] and ends with
/// [`Token::Exit`]. Tokenization never fails.
pub fn tokenize(body: &str) -> Vec<PositionedToken<'_>> {
    let mut lexer = Lexer::new(body);
    lexer.tokenize();
    lexer.tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inner_tokens(input: &str) -> Vec<Token<'_>> {
        let tokens = tokenize(input);
        assert_eq!(tokens.first().map(|t| &t.token), Some(&Token::Enter));
        assert_eq!(tokens.last().map(|t| &t.token), Some(&Token::Exit));
        tokens[1..tokens.len() - 1]
            .iter()
            .map(|t| t.token.clone())
            .collect()
    }

    #[test]
    fn test_commands_are_trimmed() {
        assert_eq!(
            inner_tokens("| A |+@1|  |\n"),
            vec![
                Token::Command("A"),
                Token::Command("+@1"),
                Token::Command(""),
                Token::Command(""),
                Token::Newline,
            ]
        );
    }

    #[test]
    fn test_bare_abbreviation() {
        assert_eq!(
            inner_tokens("|box= Hello"),
            vec![
                Token::AbbrEval {
                    name: "box",
                    params: None
                },
                Token::RawText(" Hello"),
            ]
        );
    }

    #[test]
    fn test_parameterized_abbreviation() {
        assert_eq!(
            inner_tokens("|box{text-align:center;padding:2px}=x"),
            vec![
                Token::AbbrEval {
                    name: "box",
                    params: Some("text-align:center;padding:2px")
                },
                Token::RawText("x"),
            ]
        );
    }

    #[test]
    fn test_unclosed_parameter_group_becomes_bare_name() {
        assert_eq!(
            inner_tokens("|box{padding:2px=x"),
            vec![
                Token::AbbrEval {
                    name: "box{padding:2px",
                    params: None
                },
                Token::RawText("x"),
            ]
        );
    }

    #[test]
    fn test_equals_ends_command() {
        // A name with a space is not an abbreviation
        assert_eq!(
            inner_tokens("|a b=c"),
            vec![Token::Command("a b"), Token::RawText("=c")]
        );
    }

    #[test]
    fn test_text_before_delimiter_is_raw() {
        assert_eq!(
            inner_tokens("A|B"),
            vec![Token::RawText("A"), Token::Command("B")]
        );
    }

    #[test]
    fn test_markup_is_passed_through() {
        assert_eq!(
            inner_tokens("|x= see [[page|label]] **now**"),
            vec![
                Token::AbbrEval {
                    name: "x",
                    params: None
                },
                Token::RawText(" see "),
                Token::PassThrough(ContentNode::markup(MarkupKind::Link, "page|label")),
                Token::RawText(" "),
                Token::PassThrough(ContentNode::markup(MarkupKind::Strong, "now")),
            ]
        );
    }

    #[test]
    fn test_unclosed_markup_is_raw_text() {
        assert_eq!(
            inner_tokens("|x= a ** b\n** c"),
            vec![
                Token::AbbrEval {
                    name: "x",
                    params: None
                },
                Token::RawText(" a ** b"),
                Token::Newline,
                Token::RawText("** c"),
            ]
        );
    }

    #[test]
    fn test_markup_closed_on_a_later_line_after_openers() {
        assert_eq!(
            inner_tokens("[[ ** // x\n**b** [[p]]"),
            vec![
                Token::RawText("[[ ** // x"),
                Token::Newline,
                Token::PassThrough(ContentNode::markup(MarkupKind::Strong, "b")),
                Token::RawText(" "),
                Token::PassThrough(ContentNode::markup(MarkupKind::Link, "p")),
            ]
        );
    }

    #[test]
    fn test_long_run_of_unclosed_openers() {
        let body = format!("|x= {}", "[".repeat(200_000));
        let tokens = inner_tokens(&body);
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[1], Token::RawText(&body[4..]));
    }

    #[test]
    fn test_nowiki_is_unformatted() {
        assert_eq!(
            inner_tokens("<nowiki>|a|</nowiki>"),
            vec![Token::PassThrough(ContentNode::markup(
                MarkupKind::Unformatted,
                "|a|"
            ))]
        );
    }

    #[test]
    fn test_spans_track_positions() {
        let tokens = tokenize("|ab|\n");
        let spans: Vec<Span> = tokens.iter().map(|t| t.span).collect();
        assert_eq!(
            spans,
            vec![
                Span::new(0..0),
                Span::new(0..3),
                Span::new(3..4),
                Span::new(4..5),
                Span::new(5..5),
            ]
        );
    }

    #[test]
    fn test_empty_body() {
        assert!(inner_tokens("").is_empty());
    }
}

#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use super::*;

    /// Tokens must tile the input: contiguous, in order, and covering every byte.
    fn check_tokens_tile_input(input: &str) -> Result<(), TestCaseError> {
        let tokens = tokenize(input);
        let mut cursor = 0;
        for token in &tokens {
            prop_assert_eq!(token.span.start(), cursor, "gap before {:?}", token);
            cursor = token.span.end();
        }
        prop_assert_eq!(cursor, input.len());
        Ok(())
    }

    proptest! {
        #[test]
        fn tokens_tile_input(input in "[ a-zA-Z0-9|=@{}\\[\\]*/_'%<>;:\n+.,!-]{0,64}") {
            check_tokens_tile_input(&input)?;
        }
    }
}
