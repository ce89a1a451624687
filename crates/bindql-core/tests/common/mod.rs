#![allow(dead_code)]

use bindql_core::{
    BindError, Describable, Descriptor, DescriptorTable, Error, Expression, ExpressionKind,
    Field, FieldTag, Lexer, ParseError, ParseErrors, Parser, TokenKind, validate,
};

pub fn parse(sql: &str) -> Expression {
    Parser::new(sql)
        .parse()
        .unwrap_or_else(|e| panic!("Failed to parse: {sql}\nError: {e}"))
}

pub fn parse_err(sql: &str) -> ParseErrors {
    Parser::new(sql)
        .parse()
        .expect_err(&format!("Expected parse error for: {sql}"))
}

/// Returns the first parse error, checking that its message contains `needle`.
pub fn assert_parse_err(sql: &str, needle: &str) -> ParseError {
    let errors = parse_err(sql);
    let first = errors.errors()[0].clone();
    assert!(
        errors.errors().iter().any(|e| e.message.contains(needle)),
        "Expected an error containing {needle:?} for: {sql}\nGot: {errors}"
    );
    first
}

/// Kinds of the top-level expressions of `sql`.
pub fn top_kinds(sql: &str) -> Vec<ExpressionKind> {
    parse(sql).children().iter().map(Expression::kind).collect()
}

/// `(kind, literal)` pairs of every token in `sql`, without the final EOF.
pub fn tokens(sql: &str) -> Vec<(TokenKind, String)> {
    Lexer::new(sql).map(|t| (t.kind, t.literal)).collect()
}

/// Verifies that rendering is a fixed point: parse(sql).render() re-parses
/// to the same tree shape and renders to the same string again.
pub fn round_trip(sql: &str) {
    let ast1 = parse(sql);
    let rendered1 = ast1.render();
    let ast2 = parse(&rendered1);
    let rendered2 = ast2.render();
    assert_eq!(
        rendered1, rendered2,
        "Round-trip failed.\n  Input:    {sql}\n  First:    {rendered1}\n  Second:   {rendered2}"
    );
    assert_eq!(shape(&ast1), shape(&ast2), "Shape changed for: {sql}");
}

/// The tree's kinds in walk order.
pub fn shape(expr: &Expression) -> Vec<ExpressionKind> {
    let mut kinds = Vec::new();
    expr.walk(|e| {
        kinds.push(e.kind());
        Ok::<(), ()>(())
    })
    .unwrap();
    kinds
}

/// A descriptor with the given name and columns.
pub fn descriptor(name: &str, columns: &[&str]) -> Descriptor {
    Descriptor::new(name, columns.iter().copied().map(Field::new)).unwrap()
}

pub fn table(names: &[&str]) -> DescriptorTable {
    DescriptorTable::from_descriptors(names.iter().map(|n| descriptor(n, &["id"]))).unwrap()
}

pub fn bind(sql: &str, names: &[&str]) -> Result<(), BindError> {
    validate(&parse(sql), &table(names))
}

pub fn bind_err(err: Error) -> BindError {
    match err {
        Error::Bind(e) => e,
        other => panic!("Expected a bind error, got {other:?}"),
    }
}

// Record types shared by the integration tests.

pub struct Person;

impl Describable for Person {
    const TYPE_NAME: &'static str = "Person";
    const FIELDS: &'static [FieldTag] = &[
        FieldTag::new("id"),
        FieldTag::new("name"),
        FieldTag::new("address_id"),
    ];
}

pub struct Address;

impl Describable for Address {
    const TYPE_NAME: &'static str = "Address";
    const FIELDS: &'static [FieldTag] = &[
        FieldTag::new("id"),
        FieldTag::new("district"),
        FieldTag::new("street"),
    ];
}

pub struct Manager;

impl Describable for Manager {
    const TYPE_NAME: &'static str = "Manager";
    const FIELDS: &'static [FieldTag] = &[FieldTag::new("id"), FieldTag::new("name")];
}
