//! Parser error types.

use crate::lexer::{Position, Token};

/// A syntax error found while parsing a statement.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{pos}: {message}")]
pub struct ParseError {
    /// The error message.
    pub message: String,
    /// The location of the error.
    pub pos: Position,
}

impl ParseError {
    /// Creates a new parse error.
    #[must_use]
    pub fn new(message: impl Into<String>, pos: Position) -> Self {
        Self {
            message: message.into(),
            pos,
        }
    }

    /// Creates an "unexpected token" error located at `found`.
    #[must_use]
    pub fn unexpected(expected: &str, found: &Token) -> Self {
        Self::new(
            format!("expected {expected}, found {}", describe(found)),
            found.pos,
        )
    }
}

/// Describes a token for use in an error message.
pub(super) fn describe(token: &Token) -> String {
    if token.is_eof() {
        String::from("end of input")
    } else {
        format!("{:?}", token.literal)
    }
}

/// Every syntax error found in a statement, in source order.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{}", .0.iter().map(ToString::to_string).collect::<Vec<_>>().join("\n"))]
pub struct ParseErrors(pub Vec<ParseError>);

impl ParseErrors {
    /// Returns the individual errors.
    #[must_use]
    pub fn errors(&self) -> &[ParseError] {
        &self.0
    }

    /// Returns the number of errors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if there are no errors.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
