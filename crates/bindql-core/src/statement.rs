//! Prepared statements.

use std::sync::Arc;

use tracing::debug;

use crate::ast::{Expression, TypeMapping};
use crate::binder::{DescriptorTable, validate};
use crate::parser::Parser;
use crate::schema::{Described, Descriptor, DescriptorCache, DescriptorSource};
use crate::Result;

/// A parsed statement whose annotations have been checked against the
/// supplied types.
///
/// Statements are immutable and can be shared between threads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    expression: Expression,
    descriptors: DescriptorTable,
}

impl Statement {
    /// Parses `text` and binds it to the types of `args`, using `source` to
    /// describe them.
    ///
    /// # Errors
    ///
    /// Fails on syntax errors, invalid type declarations, repeated type
    /// names, annotations naming a type not in `args`, and types in `args`
    /// the statement never names.
    pub fn prepare<S>(source: &S, text: &str, args: &[&dyn Described]) -> Result<Self>
    where
        S: DescriptorSource + ?Sized,
    {
        let expression = Parser::new(text).parse()?;
        let descriptors = DescriptorTable::build(source, args)?;
        Self::bind(expression, descriptors)
    }

    /// Binds an already parsed statement to a descriptor table.
    ///
    /// # Errors
    ///
    /// Fails on annotations naming a type not in `descriptors` and on
    /// descriptors the statement never names.
    pub fn bind(expression: Expression, descriptors: DescriptorTable) -> Result<Self> {
        validate(&expression, &descriptors)?;
        debug!(
            types = descriptors.len(),
            annotations = expression.type_mappings().len(),
            "prepared statement"
        );
        Ok(Self {
            expression,
            descriptors,
        })
    }

    /// The parsed statement.
    #[must_use]
    pub const fn expression(&self) -> &Expression {
        &self.expression
    }

    /// The descriptors of the types the statement was bound to.
    #[must_use]
    pub const fn descriptors(&self) -> &DescriptorTable {
        &self.descriptors
    }

    /// Looks up the descriptor of a bound type.
    #[must_use]
    pub fn descriptor(&self, name: &str) -> Option<&Arc<Descriptor>> {
        self.descriptors.get(name)
    }

    /// The bound type names, in supply order.
    pub fn type_names(&self) -> impl Iterator<Item = &str> {
        self.descriptors.names()
    }

    /// The output annotations (`&Type.field`), in source order.
    #[must_use]
    pub fn outputs(&self) -> Vec<&TypeMapping> {
        self.expression.output_targets()
    }

    /// The input annotations (`$Type.field`), in source order.
    #[must_use]
    pub fn inputs(&self) -> Vec<&TypeMapping> {
        self.expression.input_sources()
    }

    /// The statement text, re-rendered from the parsed tree.
    #[must_use]
    pub fn sql(&self) -> String {
        self.expression.render()
    }
}

/// Prepares statements against a shared descriptor cache.
///
/// Cloning a preparer is cheap; clones share the same cache.
#[derive(Debug, Clone, Default)]
pub struct Preparer {
    cache: Arc<DescriptorCache>,
}

impl Preparer {
    /// Creates a preparer using `cache`.
    #[must_use]
    pub const fn new(cache: Arc<DescriptorCache>) -> Self {
        Self { cache }
    }

    /// The descriptor cache.
    #[must_use]
    pub const fn cache(&self) -> &Arc<DescriptorCache> {
        &self.cache
    }

    /// Parses `text` and binds it to the types of `args`.
    ///
    /// # Errors
    ///
    /// See [`Statement::prepare`].
    pub fn prepare(&self, text: &str, args: &[&dyn Described]) -> Result<Statement> {
        Statement::prepare(self.cache.as_ref(), text, args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Describable, FieldTag};
    use crate::{BindError, Error};

    struct Person;

    impl Describable for Person {
        const TYPE_NAME: &'static str = "Person";
        const FIELDS: &'static [FieldTag] = &[FieldTag::new("id"), FieldTag::new("name")];
    }

    struct Address;

    impl Describable for Address {
        const TYPE_NAME: &'static str = "Address";
        const FIELDS: &'static [FieldTag] = &[FieldTag::new("id")];
    }

    const STATEMENT: &str =
        "SELECT * AS &Person.* FROM person WHERE address_id = $Address.id;";

    #[test]
    fn test_prepare() {
        let preparer = Preparer::default();
        let stmt = preparer
            .prepare(STATEMENT, &[&Person, &Address])
            .expect("prepare");

        assert_eq!(stmt.type_names().collect::<Vec<_>>(), ["Person", "Address"]);
        assert_eq!(stmt.outputs().len(), 1);
        assert_eq!(stmt.outputs()[0].name(), "Person");
        assert!(stmt.outputs()[0].is_wildcard());
        assert_eq!(stmt.inputs()[0].to_string(), "$Address.id");
        assert_eq!(
            stmt.sql(),
            "SELECT * AS &Person.* FROM person WHERE address_id = $Address.id ;"
        );
        assert!(stmt.descriptor("Person").expect("bound").has_field("name"));
        assert_eq!(preparer.cache().len(), 2);
    }

    #[test]
    fn test_prepare_reuses_cached_descriptors() {
        let cache = Arc::new(DescriptorCache::new());
        let preparer = Preparer::new(Arc::clone(&cache));
        let first = preparer
            .prepare(STATEMENT, &[&Person, &Address])
            .expect("prepare");
        let second = preparer
            .clone()
            .prepare("SELECT &Person.name FROM person", &[&Person])
            .expect("prepare");
        assert!(Arc::ptr_eq(
            first.descriptor("Person").expect("bound"),
            second.descriptor("Person").expect("bound"),
        ));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_parse_errors_come_first() {
        let err = Preparer::default()
            .prepare("SELECT (a, b, from person", &[&Person, &Person])
            .unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }

    #[test]
    fn test_bind_errors() {
        let preparer = Preparer::default();
        let err = preparer.prepare(STATEMENT, &[&Person]).unwrap_err();
        assert!(matches!(
            err,
            Error::Bind(BindError::TypeInfoNotPresent(ref name)) if name == "Address"
        ));
        assert!(err.to_string().contains("\"Address\""));
    }

    #[test]
    fn test_bind_parsed_expression() {
        let expression = Parser::new("SELECT 1").parse().expect("parse");
        let stmt = Statement::bind(expression, DescriptorTable::new()).expect("bind");
        assert!(stmt.outputs().is_empty());
        assert_eq!(stmt.sql(), "SELECT 1");
    }

    #[test]
    fn test_statement_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Statement>();
        assert_send_sync::<Preparer>();
    }
}
