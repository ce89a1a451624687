//! Statement lexer.
//!
//! This module provides a hand-written, lazy lexer that turns annotated
//! statement text into positioned tokens. Only the punctuation used by the
//! annotation grammar is recognised; any other character becomes an
//! [`TokenKind::Unknown`] token instead of an error.

mod position;
mod token;
mod tokenizer;

pub use position::Position;
pub use token::{Token, TokenKind};
pub use tokenizer::Lexer;
