//! Warning diagnostics for degraded diagram input.
//!
//! Diagram compilation never fails. Whenever the input is malformed, the
//! pipeline picks a best-effort interpretation and records a [`Diagnostic`]
//! explaining what was dropped or reinterpreted.
//!
//! # Example
//!
//! ```
//! # use tessera_parser::error::{Diagnostic, WarningCode};
//! # use tessera_parser::Span;
//!
//! let diag = Diagnostic::warning("invalid value for `padding`")
//!     .with_code(WarningCode::W001)
//!     .with_label(Span::new(12..24), "parameter dropped")
//!     .with_help("use `auto` or a number followed by `px`, `%` or `em`");
//! ```

mod code;
mod collector;
mod diagnostic;
mod label;

pub(crate) use collector::DiagnosticCollector;

pub use code::WarningCode;
pub use diagnostic::Diagnostic;
pub use label::Label;
