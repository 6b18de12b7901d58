//! Error types for a single conversion
//!
//! These never escape `convert_xml_to_compose`; the orchestrator turns them
//! into an inline error comment plus a stub composable.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConvertError {
    #[error("[Line {line}:{column}] {message}")]
    Syntax {
        message: String,
        line: usize,
        column: usize,
    },

    #[error("document has no root element")]
    Empty,

    #[error("nesting depth exceeds the limit of {limit} levels")]
    TooDeep { limit: usize },

    #[error("document has more than {limit} elements")]
    TooLarge { limit: usize },
}

impl ConvertError {
    /// Build a syntax error, translating a byte offset in `source` to line/column
    pub fn syntax(message: impl Into<String>, source: &str, position: usize) -> Self {
        let (line, column) = line_col(source, position);
        ConvertError::Syntax {
            message: message.into(),
            line,
            column,
        }
    }

    /// Whether the input was rejected for size rather than for being malformed
    pub fn is_limit(&self) -> bool {
        matches!(self, ConvertError::TooDeep { .. } | ConvertError::TooLarge { .. })
    }
}

fn line_col(source: &str, position: usize) -> (usize, usize) {
    let mut line = 1;
    let mut column = 1;
    for (i, ch) in source.char_indices() {
        if i >= position {
            break;
        }
        if ch == '\n' {
            line += 1;
            column = 1;
        } else {
            column += 1;
        }
    }
    (line, column)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_syntax_error_reports_line_and_column() {
        let source = "<A>\n  <B>";
        let err = ConvertError::syntax("unclosed", source, 6);
        assert_eq!(err.to_string(), "[Line 2:3] unclosed");
    }

    #[test]
    fn test_limit_errors() {
        assert!(ConvertError::TooDeep { limit: 5 }.is_limit());
        assert!(ConvertError::TooLarge { limit: 5 }.is_limit());
        assert!(!ConvertError::Empty.is_limit());
    }
}
