//! Warning codes for the Tessera diagnostic system.
//!
//! Codes are grouped by the stage that emits them:
//! - `W00x` - Tokenizer and line assembler
//! - `W10x` - Grid compiler

use std::fmt;

/// Codes for categorizing warning diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WarningCode {
    /// Invalid style value.
    ///
    /// A whitelisted style property had a value that failed validation.
    W001,

    /// Unsupported style property.
    ///
    /// A parameter named a property outside the whitelist, or had no `:`.
    W002,

    /// Command after abbreviation.
    ///
    /// A command followed an abbreviation declaration on the same line.
    W003,

    /// Unclosed parameter group.
    ///
    /// An abbreviation's `{` was never closed; the whole run became its name.
    W004,

    /// Malformed arrow suffix.
    ///
    /// The text after `@` was not 1-2 hexadecimal digits.
    W101,
}

impl WarningCode {
    /// Returns a short description of this warning code.
    pub fn description(&self) -> &'static str {
        match self {
            Self::W001 => "invalid style value",
            Self::W002 => "unsupported style property",
            Self::W003 => "command after abbreviation",
            Self::W004 => "unclosed parameter group",
            Self::W101 => "malformed arrow suffix",
        }
    }
}

impl fmt::Display for WarningCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_display() {
        assert_eq!(WarningCode::W001.to_string(), "W001");
        assert_eq!(WarningCode::W101.to_string(), "W101");
        assert_eq!(WarningCode::W003.description(), "command after abbreviation");
    }
}
