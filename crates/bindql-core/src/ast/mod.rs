//! Abstract Syntax Tree (AST) types for annotated statements.

mod expression;
mod walk;

pub use expression::{Expression, ExpressionKind, TypeMapping};
pub use walk::walk;
