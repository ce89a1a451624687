//! Binding error types.

/// A mismatch between the types a statement names and the types supplied.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BindError {
    /// Two supplied values describe types with the same name.
    #[error("names for supplied types are not unique; {0:?} is ambiguous")]
    TypeNameNotUnique(String),

    /// The statement names a type that was not supplied.
    #[error("identity {0:?} has no associated object from which to derive type information")]
    TypeInfoNotPresent(String),

    /// A supplied type is never named by the statement.
    #[error("type with name {0:?} was supplied, but is not used in the statement")]
    SuperfluousType(String),
}

impl BindError {
    /// The type name the error is about.
    #[must_use]
    pub fn type_name(&self) -> &str {
        match self {
            Self::TypeNameNotUnique(name)
            | Self::TypeInfoNotPresent(name)
            | Self::SuperfluousType(name) => name,
        }
    }
}
