//! Error codes for the Trellis diagnostic system.
//!
//! Error codes are organized by stage:
//! - `E0xx` - Preprocessor errors
//! - `E1xx` - Grammar errors

use std::fmt;

/// Error codes for categorizing diagnostic errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // Preprocessor Errors (E0xx)
    // =========================================================================
    /// Malformed directive.
    ///
    /// A line starting with `#` has no `:` separating key and value.
    E001,

    // =========================================================================
    // Grammar Errors (E1xx)
    // =========================================================================
    /// Unexpected token.
    ///
    /// A structural character appeared where it cannot be matched, such as a
    /// `]` or `|` outside of any classifier.
    E100,

    /// Unclosed classifier.
    ///
    /// A classifier was opened with `[` but the input ended, or another
    /// construct began, before its closing `]`.
    E101,

    /// Association without an arrow.
    ///
    /// Text between two classifiers must contain an arrow such as `->`.
    E102,

    /// Association without a target.
    ///
    /// Text after a classifier must be followed by another classifier.
    E103,
}

impl ErrorCode {
    /// Returns the numeric code as a string (e.g., "E001").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E001 => "E001",
            ErrorCode::E100 => "E100",
            ErrorCode::E101 => "E101",
            ErrorCode::E102 => "E102",
            ErrorCode::E103 => "E103",
        }
    }

    /// Returns a short description of what this error code means.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E001 => "malformed directive",
            ErrorCode::E100 => "unexpected token",
            ErrorCode::E101 => "unclosed classifier",
            ErrorCode::E102 => "association without arrow",
            ErrorCode::E103 => "association without target",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::E001.to_string(), "E001");
        assert_eq!(ErrorCode::E100.to_string(), "E100");
        assert_eq!(ErrorCode::E103.to_string(), "E103");
    }

    #[test]
    fn test_error_code_description() {
        assert_eq!(ErrorCode::E001.description(), "malformed directive");
        assert_eq!(ErrorCode::E101.description(), "unclosed classifier");
        assert_eq!(ErrorCode::E102.description(), "association without arrow");
    }
}
