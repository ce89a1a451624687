//! Token types for the statement lexer.

use super::Position;

/// The kind of token.
///
/// The discriminants are dense so the parser can index its dispatch tables
/// directly with `kind as usize`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Special
    /// End of input
    Eof,
    /// Unrecognised character, kept verbatim
    Unknown,

    // Literals
    /// Identifier or keyword (e.g., SELECT, person, address_id)
    Identifier,
    /// Number literal, with at most one decimal point (e.g., 42, 100000.5)
    Number,
    /// Single-quoted string literal, quotes included (e.g., 'it''s')
    String,

    // Punctuation
    /// ,
    Comma,
    /// (
    LeftParen,
    /// )
    RightParen,
    /// [
    LeftBracket,
    /// ]
    RightBracket,
    /// &
    Ampersand,
    /// .
    Dot,
    /// *
    Star,
    /// $
    Dollar,
    /// =
    Eq,
    /// ;
    Semicolon,
}

impl TokenKind {
    /// Number of token kinds.
    pub const COUNT: usize = 16;

    /// Every token kind, in discriminant order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::Eof,
        Self::Unknown,
        Self::Identifier,
        Self::Number,
        Self::String,
        Self::Comma,
        Self::LeftParen,
        Self::RightParen,
        Self::LeftBracket,
        Self::RightBracket,
        Self::Ampersand,
        Self::Dot,
        Self::Star,
        Self::Dollar,
        Self::Eq,
        Self::Semicolon,
    ];

    /// Returns the punctuation kind for a character, if it is one we recognise.
    #[must_use]
    pub const fn from_punct(c: char) -> Option<Self> {
        match c {
            '(' => Some(Self::LeftParen),
            ')' => Some(Self::RightParen),
            '[' => Some(Self::LeftBracket),
            ']' => Some(Self::RightBracket),
            ',' => Some(Self::Comma),
            '&' => Some(Self::Ampersand),
            '.' => Some(Self::Dot),
            '*' => Some(Self::Star),
            '$' => Some(Self::Dollar),
            '=' => Some(Self::Eq),
            ';' => Some(Self::Semicolon),
            _ => None,
        }
    }
}

/// A token with its literal text and its position in the source.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Token {
    /// The kind of token.
    pub kind: TokenKind,
    /// The exact source text of the token.
    pub literal: String,
    /// The location of the first character of the token.
    pub pos: Position,
}

impl Token {
    /// Creates a new token.
    #[must_use]
    pub fn new(kind: TokenKind, literal: impl Into<String>, pos: Position) -> Self {
        Self {
            kind,
            literal: literal.into(),
            pos,
        }
    }

    /// Creates an end-of-input token at the given position.
    #[must_use]
    pub const fn eof(pos: Position) -> Self {
        Self {
            kind: TokenKind::Eof,
            literal: String::new(),
            pos,
        }
    }

    /// Returns true if this is an EOF token.
    #[must_use]
    pub const fn is_eof(&self) -> bool {
        matches!(self.kind, TokenKind::Eof)
    }

    /// Returns the position just past the last character of the token.
    #[must_use]
    pub fn end(&self) -> Position {
        self.pos.advance_over(&self.literal)
    }
}
