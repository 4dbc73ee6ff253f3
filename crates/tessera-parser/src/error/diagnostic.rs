//! The warning type of the Tessera diagnostic system.

use std::fmt;

use crate::{
    error::{code::WarningCode, label::Label},
    span::Span,
};

/// A warning about degraded input, with source location information.
///
/// ```text
/// warning[W003]: command after abbreviation is ignored
///   |
/// 2 | |box=Some text| x |
///   |  ----           ^^^ dropped
///   |  |
///   |  abbreviation declared here
///   = help: move commands before the first abbreviation of the line
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    code: Option<WarningCode>,
    message: String,
    labels: Vec<Label>,
    help: Option<String>,
}

impl Diagnostic {
    /// Create a warning diagnostic.
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: message.into(),
            labels: Vec::new(),
            help: None,
        }
    }

    /// Get the warning code, if any.
    pub fn code(&self) -> Option<WarningCode> {
        self.code
    }

    /// Get the primary message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get all labels attached to this diagnostic.
    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    /// Get the help text, if any.
    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }

    /// Set the warning code.
    pub fn with_code(mut self, code: WarningCode) -> Self {
        self.code = Some(code);
        self
    }

    /// Add a primary label to this diagnostic.
    pub fn with_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(Label::primary(span, message));
        self
    }

    /// Add a secondary label to this diagnostic.
    pub fn with_secondary_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(Label::secondary(span, message));
        self
    }

    /// Set the help text.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// Returns a copy with every label moved right by `offset` bytes.
    ///
    /// Used to re-base diagnostics of a diagram body onto the enclosing
    /// document.
    pub fn shifted(&self, offset: usize) -> Self {
        Self {
            code: self.code,
            message: self.message.clone(),
            labels: self.labels.iter().map(|l| l.shifted(offset)).collect(),
            help: self.help.clone(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "warning")?;
        if let Some(code) = self.code {
            write!(f, "[{code}]")?;
        }
        write!(f, ": {}", self.message)
    }
}

impl std::error::Error for Diagnostic {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_builder_chain() {
        let diag = Diagnostic::warning("command after abbreviation is ignored")
            .with_code(WarningCode::W003)
            .with_label(Span::new(14..17), "dropped")
            .with_secondary_label(Span::new(1..5), "abbreviation declared here")
            .with_help("move commands before the first abbreviation of the line");

        assert_eq!(diag.code(), Some(WarningCode::W003));
        assert_eq!(diag.labels().len(), 2);
        assert!(diag.labels()[0].is_primary());
        assert!(diag.labels()[1].is_secondary());
        assert_eq!(
            diag.help(),
            Some("move commands before the first abbreviation of the line")
        );
    }

    #[test]
    fn test_diagnostic_display() {
        let diag = Diagnostic::warning("invalid value").with_code(WarningCode::W001);
        assert_eq!(diag.to_string(), "warning[W001]: invalid value");
        assert_eq!(Diagnostic::warning("plain").to_string(), "warning: plain");
    }

    #[test]
    fn test_diagnostic_shifted() {
        let diag = Diagnostic::warning("x").with_label(Span::new(0..3), "here");
        assert_eq!(diag.shifted(7).labels()[0].span(), Span::new(7..10));
    }
}
