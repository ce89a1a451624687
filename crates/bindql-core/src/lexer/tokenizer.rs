//! Statement tokenizer implementation.

use super::{Position, Token, TokenKind};

/// A lazy lexer over annotated statement text.
///
/// Tokens are scanned on demand by [`Lexer::next_token`]; no token buffer is
/// kept. Once the input is exhausted every further call returns an EOF token.
/// To start over, create a new lexer over the same input.
pub struct Lexer<'a> {
    /// The trimmed input.
    input: &'a str,
    /// The current byte position.
    pos: usize,
    /// Line of the character at `pos`.
    line: usize,
    /// Column of the character at `pos`.
    column: usize,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer for the given input.
    ///
    /// Leading and trailing whitespace is trimmed once here, so positions are
    /// relative to the first non-whitespace character.
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        Self {
            input: input.trim(),
            pos: 0,
            line: 1,
            column: 1,
        }
    }

    /// Returns the trimmed input this lexer scans.
    #[must_use]
    pub const fn input(&self) -> &'a str {
        self.input
    }

    /// Returns the current character without advancing.
    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    /// Returns the character after the current one without advancing.
    fn peek_next(&self) -> Option<char> {
        let mut chars = self.input[self.pos..].chars();
        chars.next();
        chars.next()
    }

    /// Advances to the next character and returns it.
    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    const fn current_position(&self) -> Position {
        Position::new(self.pos, self.line, self.column)
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.advance();
        }
    }

    /// Creates a token spanning from `start` to the current position.
    fn make_token(&self, kind: TokenKind, start: Position) -> Token {
        Token::new(kind, &self.input[start.offset..self.pos], start)
    }

    /// Scans an identifier: a letter or underscore, then letters, digits or
    /// underscores.
    fn scan_identifier(&mut self, start: Position) -> Token {
        while self.peek().is_some_and(|c| c.is_alphanumeric() || c == '_') {
            self.advance();
        }
        self.make_token(TokenKind::Identifier, start)
    }

    /// Scans a number with at most one decimal point.
    ///
    /// A second `.` ends the token, so `1.2.3` scans as `1.2`, `.`, `3`.
    fn scan_number(&mut self, start: Position) -> Token {
        let mut seen_dot = false;
        loop {
            match self.peek() {
                Some(c) if c.is_ascii_digit() => {
                    self.advance();
                }
                Some('.') if !seen_dot => {
                    seen_dot = true;
                    self.advance();
                }
                _ => break,
            }
        }
        self.make_token(TokenKind::Number, start)
    }

    /// Scans a single-quoted string literal, quotes included.
    ///
    /// A doubled quote inside the string is an escaped quote. An unterminated
    /// string yields whatever was collected before the input ran out.
    fn scan_string(&mut self, start: Position) -> Token {
        self.advance(); // opening quote

        loop {
            match self.peek() {
                Some('\'') if self.peek_next() == Some('\'') => {
                    self.advance();
                    self.advance();
                }
                Some('\'') => {
                    self.advance();
                    break;
                }
                Some(_) => {
                    self.advance();
                }
                None => break,
            }
        }

        self.make_token(TokenKind::String, start)
    }

    /// Scans the next token.
    #[must_use]
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();
        let start = self.current_position();

        let Some(c) = self.peek() else {
            return Token::eof(start);
        };

        if let Some(kind) = TokenKind::from_punct(c) {
            self.advance();
            return self.make_token(kind, start);
        }

        match c {
            '\'' => self.scan_string(start),
            c if c.is_ascii_digit() => self.scan_number(start),
            c if c.is_alphabetic() || c == '_' => self.scan_identifier(start),
            _ => {
                self.advance();
                self.make_token(TokenKind::Unknown, start)
            }
        }
    }

    /// Returns true if the lexer has consumed all of its input.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.input[self.pos..].trim_start().is_empty()
    }

    /// Tokenizes the remaining input and returns all tokens, ending with EOF.
    #[must_use]
    pub fn tokenize(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token();
            let is_eof = token.is_eof();
            tokens.push(token);
            if is_eof {
                break;
            }
        }
        tokens
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    /// Yields tokens up to, but not including, end of input.
    fn next(&mut self) -> Option<Token> {
        let token = self.next_token();
        (!token.is_eof()).then_some(token)
    }
}
