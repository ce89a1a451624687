//! Statement parser implementation.

use tracing::trace;

use super::error::{ParseError, ParseErrors, describe};
use super::pratt::{InfixFn, LOWEST, PrefixFn, infix_table, precedence, prefix_table};
use crate::ast::{Expression, TypeMapping};
use crate::lexer::{Lexer, Token, TokenKind};

/// Precedence-climbing parser for annotated statements.
///
/// Only the annotation grammar is interpreted:
///
/// ```text
/// OutputTarget := '&' Identifier '.' (Identifier | '*')
/// InputSource  := '$' Identifier '.' (Identifier | '*')
/// GroupedCols  := '(' Expr (',' Expr)* ')'
/// ```
///
/// Everything else becomes [`Expression::Identity`] leaves, or
/// [`Expression::PassThrough`] for dotted names such as `p.name`.
///
/// Syntax errors do not stop the parser: each one is recorded and parsing
/// resumes after the offending construct, so a single run reports every
/// problem in the statement.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
    peek: Token,
    errors: Vec<ParseError>,
    prefix: [Option<PrefixFn<'a>>; TokenKind::COUNT],
    infix: [Option<InfixFn<'a>>; TokenKind::COUNT],
}

impl<'a> Parser<'a> {
    /// Creates a new parser for the given input.
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        Self::from_lexer(Lexer::new(input))
    }

    /// Creates a parser reading tokens from `lexer`.
    #[must_use]
    pub fn from_lexer(mut lexer: Lexer<'a>) -> Self {
        let current = lexer.next_token();
        let peek = lexer.next_token();
        Self {
            lexer,
            current,
            peek,
            errors: Vec::new(),
            prefix: prefix_table(),
            infix: infix_table(),
        }
    }

    /// Parses the whole statement.
    ///
    /// Always returns a root [`Expression::Sql`], even for an empty or
    /// malformed statement, together with every syntax error found.
    #[must_use]
    pub fn run(mut self) -> (Expression, Vec<ParseError>) {
        let mut children = Vec::new();

        if self.current.is_eof() {
            self.errors
                .push(ParseError::new("empty statement", self.current.pos));
        }

        while !self.current.is_eof() {
            if let Some(expr) = self.parse_expression(LOWEST) {
                children.push(expr);
            }
            self.next_token();
        }

        trace!(
            expressions = children.len(),
            errors = self.errors.len(),
            "parsed statement"
        );
        (Expression::Sql(children), self.errors)
    }

    /// Parses the whole statement, failing if any syntax error was found.
    ///
    /// # Errors
    ///
    /// Returns every syntax error in the statement.
    pub fn parse(self) -> Result<Expression, ParseErrors> {
        let (root, errors) = self.run();
        if errors.is_empty() {
            Ok(root)
        } else {
            Err(ParseErrors(errors))
        }
    }

    fn next_token(&mut self) {
        let next = self.lexer.next_token();
        self.current = core::mem::replace(&mut self.peek, next);
    }

    fn error(&mut self, error: ParseError) {
        self.errors.push(error);
    }

    /// Parses one expression starting at the current token.
    ///
    /// On return the current token is the last token of the expression.
    /// Returns `None` only at end of input.
    fn parse_expression(&mut self, min_precedence: u8) -> Option<Expression> {
        let prefix = self.prefix[self.current.kind as usize]?;
        let mut left = prefix(self);

        while min_precedence < precedence(self.peek.kind) {
            let Some(infix) = self.infix[self.peek.kind as usize] else {
                return Some(left);
            };
            self.next_token();
            left = infix(self, left);
        }

        Some(left)
    }

    /// Any token the grammar does not interpret.
    pub(super) fn parse_identity(&mut self) -> Expression {
        Expression::Identity(self.current.clone())
    }

    /// `&Type.field`
    pub(super) fn parse_output_target(&mut self) -> Expression {
        match self.parse_type_mapping("output expression") {
            Ok(mapping) => Expression::OutputTarget(mapping),
            Err(partial) => partial,
        }
    }

    /// `$Type.field`
    pub(super) fn parse_input_source(&mut self) -> Expression {
        match self.parse_type_mapping("input expression") {
            Ok(mapping) => Expression::InputSource(mapping),
            Err(partial) => partial,
        }
    }

    /// Parses the shared `marker Type . field` shape.
    ///
    /// A marker not followed by an identifier is plain pass-through, as in
    /// `a & 4` or `$1`. A malformed annotation is reported and whatever was
    /// consumed comes back as `Err` so it still renders.
    fn parse_type_mapping(&mut self, context: &str) -> Result<TypeMapping, Expression> {
        let marker = self.current.clone();
        if self.peek.kind != TokenKind::Identifier {
            return Err(Expression::Identity(marker));
        }

        self.next_token();
        let name = self.current.clone();
        if self.peek.kind != TokenKind::Dot {
            let expected = format!("'.' after type name {:?} in {context}", name.literal);
            self.error(ParseError::unexpected(&expected, &self.peek));
            return Err(Expression::PassThrough(vec![
                Expression::Identity(marker),
                Expression::Identity(name),
            ]));
        }

        self.next_token();
        let dot = self.current.clone();
        if !matches!(self.peek.kind, TokenKind::Identifier | TokenKind::Star) {
            let expected = format!(
                "field name or '*' after \"{}.\" in {context}",
                name.literal
            );
            self.error(ParseError::unexpected(&expected, &self.peek));
            return Err(Expression::PassThrough(vec![
                Expression::Identity(marker),
                Expression::Identity(name),
                Expression::Identity(dot),
            ]));
        }

        self.next_token();
        Ok(TypeMapping::new(marker, name, self.current.clone()))
    }

    /// `( column, column, ... )`
    ///
    /// A malformed group is reported and returned as far as it was parsed;
    /// the caller carries on with the token that broke it.
    pub(super) fn parse_group(&mut self) -> Expression {
        let open = self.current.clone();
        let mut columns = Vec::new();
        let mut commas: Vec<Option<Token>> = Vec::new();
        let mut after_comma = false;

        let close = loop {
            self.next_token();
            match self.current.kind {
                TokenKind::Eof => {
                    let expected = format!("')' to close group opened at {}", open.pos);
                    self.error(ParseError::unexpected(&expected, &self.current));
                    break None;
                }
                TokenKind::RightParen => {
                    if columns.is_empty() {
                        self.error(ParseError::new("empty column group", open.pos));
                    } else if after_comma {
                        self.error(ParseError::unexpected("column after ','", &self.current));
                    }
                    break Some(self.current.clone());
                }
                TokenKind::Comma => {
                    if columns.is_empty() || after_comma {
                        self.error(ParseError::new(
                            format!("expected column before ',', found {}", describe(&self.current)),
                            self.current.pos,
                        ));
                        break None;
                    }
                    if let Some(slot) = commas.last_mut() {
                        *slot = Some(self.current.clone());
                    }
                    after_comma = true;
                }
                _ => {
                    if let Some(column) = self.parse_expression(LOWEST) {
                        columns.push(column);
                        commas.push(None);
                    }
                    after_comma = false;
                }
            }
        };

        Expression::GroupedColumns {
            open,
            columns,
            commas,
            close,
        }
    }

    /// `left . right`, e.g. `p.name` or `p.*`.
    pub(super) fn parse_member(&mut self, left: Expression) -> Expression {
        let mut parts = match left {
            Expression::PassThrough(parts) => parts,
            other => vec![other],
        };
        parts.push(Expression::Identity(self.current.clone()));

        if matches!(
            self.peek.kind,
            TokenKind::Identifier | TokenKind::Star | TokenKind::Number
        ) {
            self.next_token();
            parts.push(Expression::Identity(self.current.clone()));
        }

        Expression::PassThrough(parts)
    }
}
