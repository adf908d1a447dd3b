use std::fmt;

/// Error codes for all diagnostics.
///
/// Format: E#### where the first digit indicates the phase:
/// - E1xxx: Type syntax and verification errors
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    /// Unknown type keyword
    E1001,
    /// Malformed type syntax
    E1002,
    /// Unknown enumerant spelling
    E1003,
    /// Invalid element type
    E1004,
    /// Invalid array element count
    E1005,
}

impl ErrorCode {
    /// Every code, in numeric order.
    pub const ALL: [ErrorCode; 5] = [
        ErrorCode::E1001,
        ErrorCode::E1002,
        ErrorCode::E1003,
        ErrorCode::E1004,
        ErrorCode::E1005,
    ];

    /// Check if this is a parser/syntax error (E1xxx range).
    pub fn is_parser_error(&self) -> bool {
        self.as_str().starts_with("E1")
    }

    /// Get the numeric code as a string (e.g., "E1001").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E1001 => "E1001",
            ErrorCode::E1002 => "E1002",
            ErrorCode::E1003 => "E1003",
            ErrorCode::E1004 => "E1004",
            ErrorCode::E1005 => "E1005",
        }
    }

    /// One-line explanation of the code.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E1001 => "unknown type keyword",
            ErrorCode::E1002 => "malformed type syntax",
            ErrorCode::E1003 => "unknown enumerant spelling",
            ErrorCode::E1004 => "invalid element type",
            ErrorCode::E1005 => "invalid array element count",
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
        assert_eq!(ErrorCode::E1001.to_string(), "E1001");
        assert_eq!(ErrorCode::E1005.as_str(), "E1005");
    }

    #[test]
    fn test_all_codes_are_parser_errors() {
        assert!(ErrorCode::ALL.iter().all(ErrorCode::is_parser_error));
        assert!(ErrorCode::ALL.iter().all(|c| !c.description().is_empty()));
    }
}
