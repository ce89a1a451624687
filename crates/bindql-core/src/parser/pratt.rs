//! Pratt dispatch tables: binding powers and per-token handlers.

use super::Parser;
use crate::ast::Expression;
use crate::lexer::TokenKind;

/// Binding power of tokens that never continue an expression.
pub const LOWEST: u8 = 0;
/// Binding power of tokens that attach to the expression before them.
pub const HIGHEST: u8 = 1;

/// Handler for a token that starts an expression.
pub type PrefixFn<'a> = fn(&mut Parser<'a>) -> Expression;
/// Handler for a token that follows a completed left expression.
pub type InfixFn<'a> = fn(&mut Parser<'a>, Expression) -> Expression;

/// Returns the binding power of a token kind.
///
/// Only `)`, `]` and `.` bind tightly; every other kind is at the lowest
/// level, so by default nothing continues an expression.
#[must_use]
pub const fn precedence(kind: TokenKind) -> u8 {
    match kind {
        TokenKind::RightParen | TokenKind::RightBracket | TokenKind::Dot => HIGHEST,
        _ => LOWEST,
    }
}

fn prefix_handler<'a>(kind: TokenKind) -> Option<PrefixFn<'a>> {
    match kind {
        TokenKind::Eof => None,
        TokenKind::Ampersand => Some(Parser::parse_output_target as PrefixFn<'a>),
        TokenKind::Dollar => Some(Parser::parse_input_source as PrefixFn<'a>),
        TokenKind::LeftParen => Some(Parser::parse_group as PrefixFn<'a>),
        TokenKind::Unknown
        | TokenKind::Identifier
        | TokenKind::Number
        | TokenKind::String
        | TokenKind::Comma
        | TokenKind::RightParen
        | TokenKind::LeftBracket
        | TokenKind::RightBracket
        | TokenKind::Dot
        | TokenKind::Star
        | TokenKind::Eq
        | TokenKind::Semicolon => Some(Parser::parse_identity as PrefixFn<'a>),
    }
}

fn infix_handler<'a>(kind: TokenKind) -> Option<InfixFn<'a>> {
    match kind {
        TokenKind::Dot => Some(Parser::parse_member as InfixFn<'a>),
        _ => None,
    }
}

/// Builds the prefix table, indexed by `TokenKind as usize`.
pub fn prefix_table<'a>() -> [Option<PrefixFn<'a>>; TokenKind::COUNT] {
    TokenKind::ALL.map(prefix_handler)
}

/// Builds the infix table, indexed by `TokenKind as usize`.
pub fn infix_table<'a>() -> [Option<InfixFn<'a>>; TokenKind::COUNT] {
    TokenKind::ALL.map(infix_handler)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precedence_levels() {
        assert_eq!(precedence(TokenKind::Dot), HIGHEST);
        assert_eq!(precedence(TokenKind::RightParen), HIGHEST);
        assert_eq!(precedence(TokenKind::RightBracket), HIGHEST);
        assert_eq!(precedence(TokenKind::Identifier), LOWEST);
        assert_eq!(precedence(TokenKind::LeftBracket), LOWEST);
        assert_eq!(precedence(TokenKind::Ampersand), LOWEST);
    }

    #[test]
    fn test_every_kind_but_eof_starts_an_expression() {
        let table = prefix_table();
        for kind in TokenKind::ALL {
            assert_eq!(
                table[kind as usize].is_some(),
                kind != TokenKind::Eof,
                "{kind:?}"
            );
        }
    }

    #[test]
    fn test_only_dot_is_infix() {
        let table = infix_table();
        let infix: Vec<_> = TokenKind::ALL
            .into_iter()
            .filter(|kind| table[*kind as usize].is_some())
            .collect();
        assert_eq!(infix, vec![TokenKind::Dot]);
    }
}
