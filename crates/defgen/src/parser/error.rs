//! Parse error types for templates and patterns.

use thiserror::Error;

/// An error that occurred during parsing.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    /// A syntax error with location information.
    #[error("syntax error at {line}:{column}: {message}")]
    Syntax {
        line: usize,
        column: usize,
        message: String,
    },

    /// Unexpected end of input.
    #[error("unexpected end of input at {line}:{column}")]
    UnexpectedEof { line: usize, column: usize },
}

/// Calculate line and column from original input and remaining input.
pub(crate) fn calculate_position(original: &str, remaining: &str) -> (usize, usize) {
    let consumed = original.len() - remaining.len();
    let consumed_str = &original[..consumed];
    let line = consumed_str.chars().filter(|&c| c == '\n').count() + 1;
    let last_newline = consumed_str.rfind('\n');
    let column = match last_newline {
        Some(pos) => consumed - pos,
        None => consumed + 1,
    };
    (line, column)
}

/// Turn leftover input into a syntax (or end-of-input) error.
pub(crate) fn leftover_error(original: &str, remaining: &str, message: String) -> ParseError {
    let (line, column) = calculate_position(original, remaining);
    if remaining.is_empty() {
        ParseError::UnexpectedEof { line, column }
    } else {
        ParseError::Syntax {
            line,
            column,
            message,
        }
    }
}
