//! # bindql-core
//!
//! Annotated SQL front end: parse statements that carry type annotations and
//! check them against the record types supplied by the caller.
//!
//! This crate provides:
//! - A lazy tokenizer that never fails on unknown characters
//! - A Pratt parser recognising `&Type.field` outputs, `$Type.field` inputs
//!   and grouped column lists, passing all other SQL through untouched
//! - A binder checking that annotations and supplied types match exactly
//! - A thread-safe descriptor cache fed by `#[derive(Describable)]`
//!
//! ## Preparing a statement
//!
//! ```rust
//! use bindql_core::{Describable, FieldTag, Preparer};
//!
//! struct Person;
//!
//! impl Describable for Person {
//!     const TYPE_NAME: &'static str = "Person";
//!     const FIELDS: &'static [FieldTag] = &[FieldTag::new("id"), FieldTag::new("name")];
//! }
//!
//! let preparer = Preparer::default();
//! let stmt = preparer
//!     .prepare("SELECT &Person.* FROM person WHERE id = $Person.id", &[&Person])
//!     .unwrap();
//!
//! assert_eq!(stmt.outputs()[0].to_string(), "&Person.*");
//! assert_eq!(stmt.inputs()[0].field_name(), "id");
//! ```
//!
//! ## Binding errors
//!
//! Every type named in the statement must be supplied, and every supplied
//! type must be named:
//!
//! ```rust
//! use bindql_core::{BindError, Describable, Error, FieldTag, Preparer};
//!
//! struct Person;
//!
//! impl Describable for Person {
//!     const TYPE_NAME: &'static str = "Person";
//!     const FIELDS: &'static [FieldTag] = &[FieldTag::new("id")];
//! }
//!
//! let err = Preparer::default()
//!     .prepare("SELECT &Person.* FROM person WHERE id = $Address.id", &[&Person])
//!     .unwrap_err();
//!
//! assert!(matches!(err, Error::Bind(BindError::TypeInfoNotPresent(_))));
//! ```

pub mod ast;
pub mod binder;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod schema;
pub mod statement;

pub use ast::{Expression, ExpressionKind, TypeMapping};
pub use binder::{BindError, DescriptorTable, validate};
pub use error::{Error, Result};
pub use lexer::{Lexer, Position, Token, TokenKind};
pub use parser::{ParseError, ParseErrors, Parser};
pub use schema::{
    Describable, Described, Descriptor, DescriptorCache, DescriptorError, DescriptorSource, Field,
    FieldTag,
};
pub use statement::{Preparer, Statement};
