//! Line and abbreviation assembler.
//!
//! The assembler is a single pass over the token stream. It groups commands
//! into [`Line`]s and captures abbreviation content into an
//! [`AbbreviationTable`]. The currently open capture is an explicit field of
//! the assembler state; it is set by an abbreviation token and cleared by the
//! next command, abbreviation, newline or exit.

use log::{debug, trace};

use tessera_core::{content::ContentNode, style::{StyleKey, StyleParams}};

use crate::{
    abbreviation::{AbbreviationBlock, AbbreviationTable},
    error::{Diagnostic, DiagnosticCollector, WarningCode},
    span::Span,
    style,
    tokens::{PositionedToken, Token},
};

/// A single command of a diagram line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    text: String,
    span: Span,
}

impl Command {
    pub fn new(text: impl Into<String>, span: Span) -> Self {
        Self {
            text: text.into(),
            span,
        }
    }

    /// Command text with surrounding whitespace trimmed.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Span of the `|command` token.
    pub fn span(&self) -> Span {
        self.span
    }
}

/// An ordered sequence of commands forming one diagram row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Line {
    commands: Vec<Command>,
}

impl Line {
    pub fn new(commands: Vec<Command>) -> Self {
        Self { commands }
    }

    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

/// Result of assembling a token stream.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Assembly {
    lines: Vec<Line>,
    abbreviations: AbbreviationTable,
    diagnostics: Vec<Diagnostic>,
}

impl Assembly {
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn abbreviations(&self) -> &AbbreviationTable {
        &self.abbreviations
    }

    /// Warnings about dropped or reinterpreted input.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Splits the assembly into its lines, abbreviation table and warnings.
    pub fn into_parts(self) -> (Vec<Line>, AbbreviationTable, Vec<Diagnostic>) {
        (self.lines, self.abbreviations, self.diagnostics)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    BeforeEntry,
    Active,
    Done,
}

/// The abbreviation currently receiving raw text and pass-through nodes.
#[derive(Debug)]
struct Capture {
    line: usize,
    name: String,
    span: Span,
}

struct Assembler {
    state: State,
    lines: Vec<Line>,
    current: Line,
    /// Whether the current line has accepted a command. An unterminated last
    /// line only becomes a line once it has.
    has_command: bool,
    abbreviations: AbbreviationTable,
    capture: Option<Capture>,
    diagnostics: DiagnosticCollector,
}

impl Assembler {
    fn new() -> Self {
        Self {
            state: State::BeforeEntry,
            lines: Vec::new(),
            current: Line::default(),
            has_command: false,
            abbreviations: AbbreviationTable::new(),
            capture: None,
            diagnostics: DiagnosticCollector::new(),
        }
    }

    fn line_index(&self) -> usize {
        self.lines.len()
    }

    fn feed(&mut self, token: PositionedToken<'_>) {
        match self.state {
            State::BeforeEntry => {
                if token.token == Token::Enter {
                    self.state = State::Active;
                } else {
                    trace!(token:% = token.token; "Skipping token before entry marker");
                }
            }
            State::Active => self.feed_active(token),
            State::Done => {}
        }
    }

    fn feed_active(&mut self, PositionedToken { token, span }: PositionedToken<'_>) {
        match token {
            Token::Enter => {}
            Token::Exit => {
                self.capture = None;
                if self.has_command {
                    self.finish_line();
                }
                self.state = State::Done;
            }
            Token::Newline => {
                self.capture = None;
                self.finish_line();
            }
            Token::Command(text) => match self.capture.take() {
                Some(capture) => self.reject_command(text, span, &capture),
                None => {
                    self.has_command = true;
                    self.current.commands.push(Command::new(text, span));
                }
            },
            Token::AbbrEval { name, params } => self.open_capture(name, params, span),
            Token::RawText(text) => self.capture_node(ContentNode::text(text)),
            Token::PassThrough(node) => self.capture_node(node),
        }
    }

    fn finish_line(&mut self) {
        let line = std::mem::take(&mut self.current);
        trace!(line = self.line_index(), commands = line.commands.len(); "Finished line");
        self.lines.push(line);
        self.has_command = false;
    }

    fn reject_command(&mut self, text: &str, span: Span, capture: &Capture) {
        debug!(
            line = capture.line,
            command = text,
            abbreviation = capture.name;
            "Dropping command after abbreviation"
        );
        self.diagnostics.emit(
            Diagnostic::warning(format!("command `{text}` after abbreviation is ignored"))
                .with_code(WarningCode::W003)
                .with_label(span, "dropped")
                .with_secondary_label(capture.span, "abbreviation declared here")
                .with_help("move commands before the first abbreviation of the line"),
        );
    }

    fn open_capture(&mut self, name: &str, params: Option<&str>, span: Span) {
        let line = self.line_index();

        if name.contains('{') {
            self.diagnostics.emit(
                Diagnostic::warning(format!(
                    "parameter group of `{name}` is not closed; using it as a plain name"
                ))
                .with_code(WarningCode::W004)
                .with_label(span, "unclosed `{`")
                .with_help("close the group: `|name{key:value}=`"),
            );
        }

        // `|` + name + `{` precede the parameter text
        let params_offset = span.start() + 1 + name.len() + 1;
        let params = params
            .map(|raw| self.parse_params(raw, params_offset))
            .unwrap_or_default();

        debug!(line, name, params = params.len(); "Opening abbreviation capture");
        self.abbreviations
            .insert(line, name, AbbreviationBlock::new(params, span));
        self.capture = Some(Capture {
            line,
            name: name.to_string(),
            span,
        });
    }

    /// Parses `key:value;key:value`, keeping only whitelisted, valid pairs.
    fn parse_params(&mut self, raw: &str, offset: usize) -> StyleParams {
        let mut params = StyleParams::new();
        let mut start = offset;

        for param in raw.split(';') {
            let param_span = Span::new(start..start + param.len());
            start += param.len() + 1;

            if param.trim().is_empty() {
                continue;
            }

            let mut parts = param.split(':');
            let key = parts.next().unwrap_or_default().trim();
            let value = parts.next().map(str::trim);

            let (Ok(style_key), Some(value)) = (key.parse::<StyleKey>(), value) else {
                self.diagnostics.emit(
                    Diagnostic::warning(format!("unsupported style parameter `{}`", param.trim()))
                        .with_code(WarningCode::W002)
                        .with_label(param_span, "parameter dropped")
                        .with_help(
                            "supported properties: border-color, background-color, text-align, padding",
                        ),
                );
                continue;
            };

            if style::is_valid_value(style_key, value) {
                params.insert(style_key, value);
            } else {
                self.diagnostics.emit(
                    Diagnostic::warning(format!("invalid value for `{style_key}`"))
                        .with_code(WarningCode::W001)
                        .with_label(param_span, "parameter dropped"),
                );
            }
        }

        params
    }

    fn capture_node(&mut self, node: ContentNode) {
        if let Some(capture) = &self.capture {
            if let Some(block) = self.abbreviations.get_mut(capture.line, &capture.name) {
                block.push_content(node);
            }
        }
    }

    fn finish(mut self) -> Assembly {
        // An exit marker never arrived; keep what was started
        if self.state == State::Active && self.has_command {
            self.finish_line();
        }

        // The last command of a line is the row's closing border, unless the
        // line declares an abbreviation
        for (index, line) in self.lines.iter_mut().enumerate() {
            if !line.commands.is_empty() && !self.abbreviations.declares_on_line(index) {
                if let Some(border) = line.commands.pop() {
                    trace!(line = index, command = border.text; "Dropped closing border token");
                }
            }
        }

        Assembly {
            lines: self.lines,
            abbreviations: self.abbreviations,
            diagnostics: self.diagnostics.finish(),
        }
    }
}

/// Assemble a token stream into lines and abbreviation blocks.
///
/// Tokens before [`Token::Enter`] and after [`Token::Exit`] are ignored.
pub fn assemble<'a>(tokens: impl IntoIterator<Item = PositionedToken<'a>>) -> Assembly {
    let mut assembler = Assembler::new();
    for token in tokens {
        assembler.feed(token);
    }
    assembler.finish()
}
