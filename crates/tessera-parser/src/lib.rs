//! # Tessera Parser
//!
//! Front end for the Tessera diagram notation. This crate turns the body of a
//! diagram block into lines of commands and a table of abbreviation blocks.
//!
//! ## Usage
//!
//! ```
//! # use tessera_parser::parse;
//!
//! let body = "|box|-@2|box|\n|box= Hello\n";
//! let assembly = parse(body);
//!
//! assert_eq!(assembly.lines().len(), 2);
//! assert!(assembly.abbreviations().get(1, "box").is_some());
//! ```

mod abbreviation;
mod assembler;
mod block;
pub mod error;
mod lexer;
mod span;
pub mod style;
mod tokens;

pub use abbreviation::{AbbreviationBlock, AbbreviationTable};
pub use assembler::{Assembly, Command, Line, assemble};
pub use block::{Block, CLOSE_MARKER, OPEN_MARKER, blocks};
pub use lexer::tokenize;
pub use span::Span;
pub use tokens::{PositionedToken, Token};

use log::debug;

/// Parse a diagram body into lines and abbreviation blocks.
///
/// Parsing never fails. Input that cannot be interpreted as written is
/// dropped or reinterpreted, and each such case is reported in
/// [`Assembly::diagnostics`].
///
/// 1. **Tokenize** - Split the body into delimiter-separated tokens
/// 2. **Assemble** - Group commands into lines and capture abbreviations
pub fn parse(body: &str) -> Assembly {
    let tokens = lexer::tokenize(body);
    debug!(tokens = tokens.len(); "Tokenized diagram body");

    let assembly = assembler::assemble(tokens);
    debug!(
        lines = assembly.lines().len(),
        abbreviations = assembly.abbreviations().len(),
        warnings = assembly.diagnostics().len();
        "Assembled diagram lines"
    );
    assembly
}
