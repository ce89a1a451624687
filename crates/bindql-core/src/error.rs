//! Error types for statement preparation.

use thiserror::Error;

use crate::binder::BindError;
use crate::parser::ParseErrors;
use crate::schema::DescriptorError;

/// Errors that can occur while preparing a statement.
#[derive(Debug, Error)]
pub enum Error {
    /// The statement has syntax errors.
    #[error("cannot parse statement:\n{0}")]
    Parse(#[from] ParseErrors),

    /// A supplied type has an invalid declaration.
    #[error("invalid type declaration: {0}")]
    Descriptor(#[from] DescriptorError),

    /// The supplied types do not match the types the statement names.
    #[error("cannot bind statement: {0}")]
    Bind(#[from] BindError),
}

/// Result type for statement preparation.
pub type Result<T> = std::result::Result<T, Error>;
