//! Expression AST types.

use core::fmt;

use crate::lexer::{Position, Token};

/// The variant tag of an [`Expression`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExpressionKind {
    /// The root of a parsed statement.
    Sql,
    /// A parenthesised, comma-separated column list.
    GroupedColumns,
    /// An `&Type.field` output annotation.
    OutputTarget,
    /// A `$Type.field` input annotation.
    InputSource,
    /// A single opaque token.
    Identity,
    /// A run of tokens passed through verbatim, such as `p.name`.
    PassThrough,
}

impl ExpressionKind {
    /// Returns the variant name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Sql => "Sql",
            Self::GroupedColumns => "GroupedColumns",
            Self::OutputTarget => "OutputTarget",
            Self::InputSource => "InputSource",
            Self::Identity => "Identity",
            Self::PassThrough => "PassThrough",
        }
    }
}

/// The payload shared by output targets and input sources: a marker token
/// (`&` or `$`), a type name and a field.
///
/// Both operands are always [`Expression::Identity`] nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeMapping {
    marker: Token,
    operands: Box<[Expression; 2]>,
}

impl TypeMapping {
    /// Creates a type mapping from its marker, type name and field tokens.
    #[must_use]
    pub fn new(marker: Token, name: Token, field: Token) -> Self {
        Self {
            marker,
            operands: Box::new([Expression::Identity(name), Expression::Identity(field)]),
        }
    }

    /// The `&` or `$` token that introduced this mapping.
    #[must_use]
    pub const fn marker(&self) -> &Token {
        &self.marker
    }

    /// The type name, such as `Person` in `&Person.*`.
    #[must_use]
    pub fn type_name(&self) -> &Expression {
        &self.operands[0]
    }

    /// The field, such as `id` in `$Person.id`, or `*`.
    #[must_use]
    pub fn field(&self) -> &Expression {
        &self.operands[1]
    }

    /// The type name as text.
    #[must_use]
    pub fn name(&self) -> &str {
        self.type_name().literal().unwrap_or_default()
    }

    /// The field as text.
    #[must_use]
    pub fn field_name(&self) -> &str {
        self.field().literal().unwrap_or_default()
    }

    /// Returns true if the field is the `*` wildcard.
    #[must_use]
    pub fn is_wildcard(&self) -> bool {
        self.field_name() == "*"
    }

    fn operands(&self) -> &[Expression] {
        self.operands.as_slice()
    }
}

impl fmt::Display for TypeMapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}.{}",
            self.marker.literal,
            self.type_name(),
            self.field()
        )
    }
}

/// A node of the statement tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expression {
    /// The root: every top-level expression of the statement, in order.
    Sql(Vec<Expression>),

    /// A grouped column list, e.g. `(id, name)`.
    GroupedColumns {
        /// The opening parenthesis.
        open: Token,
        /// The grouped expressions, without separators.
        columns: Vec<Expression>,
        /// The comma following each column, parallel to `columns`.
        commas: Vec<Option<Token>>,
        /// The closing parenthesis, absent if the group was malformed.
        close: Option<Token>,
    },

    /// An output annotation, e.g. `&Person.*`.
    OutputTarget(TypeMapping),

    /// An input annotation, e.g. `$Address.id`.
    InputSource(TypeMapping),

    /// A single token the parser does not interpret.
    Identity(Token),

    /// Consecutive expressions rendered without separators, e.g. `p.name`.
    PassThrough(Vec<Expression>),
}

impl Expression {
    /// Returns the variant tag.
    #[must_use]
    pub const fn kind(&self) -> ExpressionKind {
        match self {
            Self::Sql(_) => ExpressionKind::Sql,
            Self::GroupedColumns { .. } => ExpressionKind::GroupedColumns,
            Self::OutputTarget(_) => ExpressionKind::OutputTarget,
            Self::InputSource(_) => ExpressionKind::InputSource,
            Self::Identity(_) => ExpressionKind::Identity,
            Self::PassThrough(_) => ExpressionKind::PassThrough,
        }
    }

    /// Returns the child expressions in source order.
    #[must_use]
    pub fn children(&self) -> &[Self] {
        match self {
            Self::Sql(children) | Self::PassThrough(children) => children,
            Self::GroupedColumns { columns, .. } => columns,
            Self::OutputTarget(mapping) | Self::InputSource(mapping) => mapping.operands(),
            Self::Identity(_) => &[],
        }
    }

    /// Returns the position of the first character of this expression.
    #[must_use]
    pub fn begin(&self) -> Position {
        match self {
            Self::Sql(children) | Self::PassThrough(children) => {
                children.first().map_or_else(Position::default, Self::begin)
            }
            Self::GroupedColumns { open, .. } => open.pos,
            Self::OutputTarget(mapping) | Self::InputSource(mapping) => mapping.marker.pos,
            Self::Identity(token) => token.pos,
        }
    }

    /// Returns the position just past the last character of this expression.
    #[must_use]
    pub fn end(&self) -> Position {
        match self {
            Self::Sql(children) | Self::PassThrough(children) => {
                children.last().map_or_else(Position::default, Self::end)
            }
            Self::GroupedColumns {
                open,
                columns,
                commas,
                close,
            } => match (close, commas.last().and_then(Option::as_ref), columns.last()) {
                (Some(close), _, _) => close.end(),
                (None, Some(comma), _) => comma.end(),
                (None, None, Some(last)) => last.end(),
                (None, None, None) => open.end(),
            },
            Self::OutputTarget(mapping) | Self::InputSource(mapping) => mapping.field().end(),
            Self::Identity(token) => token.end(),
        }
    }

    /// Reconstructs the statement text this expression was parsed from.
    ///
    /// Whitespace is normalised: top-level expressions are separated by a
    /// single space and grouped columns by `", "`.
    #[must_use]
    pub fn render(&self) -> String {
        self.to_string()
    }

    /// Returns the token literal if this is an [`Expression::Identity`].
    #[must_use]
    pub fn literal(&self) -> Option<&str> {
        match self {
            Self::Identity(token) => Some(&token.literal),
            _ => None,
        }
    }

    /// Returns the type mapping if this is an output target or input source.
    #[must_use]
    pub const fn as_type_mapping(&self) -> Option<&TypeMapping> {
        match self {
            Self::OutputTarget(mapping) | Self::InputSource(mapping) => Some(mapping),
            _ => None,
        }
    }

    /// Visits this expression and its descendants depth-first, stopping at
    /// the first error returned by `visit`.
    ///
    /// # Errors
    ///
    /// Returns the first error produced by `visit`.
    pub fn walk<'a, E, F>(&'a self, mut visit: F) -> Result<(), E>
    where
        F: FnMut(&'a Self) -> Result<(), E>,
    {
        super::walk(self, &mut visit)
    }

    /// Returns the first expression, in walk order, matching `predicate`.
    #[must_use]
    pub fn find<P>(&self, mut predicate: P) -> Option<&Self>
    where
        P: FnMut(&Self) -> bool,
    {
        let search = self.walk(|e| if predicate(e) { Err(e) } else { Ok(()) });
        search.err()
    }

    /// Returns every output target, in source order.
    #[must_use]
    pub fn output_targets(&self) -> Vec<&TypeMapping> {
        self.collect(|e| match e {
            Self::OutputTarget(mapping) => Some(mapping),
            _ => None,
        })
    }

    /// Returns every input source, in source order.
    #[must_use]
    pub fn input_sources(&self) -> Vec<&TypeMapping> {
        self.collect(|e| match e {
            Self::InputSource(mapping) => Some(mapping),
            _ => None,
        })
    }

    /// Returns every output target and input source, in source order.
    #[must_use]
    pub fn type_mappings(&self) -> Vec<&TypeMapping> {
        self.collect(Self::as_type_mapping)
    }

    fn collect<'a, T>(&'a self, mut pick: impl FnMut(&'a Self) -> Option<T>) -> Vec<T> {
        let mut found = Vec::new();
        let walked = self.walk(|e| {
            found.extend(pick(e));
            Ok::<(), core::convert::Infallible>(())
        });
        match walked {
            Ok(()) => found,
            Err(never) => match never {},
        }
    }
}

fn write_separated(f: &mut fmt::Formatter<'_>, items: &[Expression], sep: &str) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(sep)?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sql(children) => write_separated(f, children, " "),
            Self::GroupedColumns {
                columns,
                commas,
                close,
                ..
            } => {
                f.write_str("(")?;
                for (i, column) in columns.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{column}")?;
                    if commas.get(i).is_some_and(Option::is_some) {
                        f.write_str(",")?;
                    }
                }
                if close.is_some() {
                    f.write_str(")")?;
                }
                Ok(())
            }
            Self::OutputTarget(mapping) | Self::InputSource(mapping) => write!(f, "{mapping}"),
            Self::Identity(token) => f.write_str(&token.literal),
            Self::PassThrough(children) => write_separated(f, children, ""),
        }
    }
}
