//! Type descriptors for annotated statements.
//!
//! A statement refers to record types by name (`&Person.*`, `$Address.id`).
//! This module provides the [`Describable`] trait, implemented by
//! `#[derive(Describable)]`, which exposes a type's name and column tags as
//! compile-time constants, and the [`Descriptor`] built from them at run time.

mod cache;

use core::any::TypeId;
use core::fmt;

pub use cache::{DescriptorCache, DescriptorSource};

/// Errors in a type declaration, found when its descriptor is built.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DescriptorError {
    /// The type has an empty name.
    #[error("type name must not be empty")]
    EmptyTypeName,

    /// A field has an empty column tag.
    #[error("field {field:?} of type {type_name:?} has an empty column name")]
    EmptyColumnName {
        /// The declaring type.
        type_name: String,
        /// The field carrying the empty tag.
        field: String,
    },

    /// Two fields share a column tag.
    #[error("column {column:?} is declared more than once on type {type_name:?}")]
    DuplicateColumn {
        /// The declaring type.
        type_name: String,
        /// The repeated column tag.
        column: String,
    },
}

/// Column metadata for one field, as declared on a [`Describable`] type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldTag {
    /// The column name statements refer to.
    pub column: &'static str,
    /// The Rust field the column maps to.
    pub field: &'static str,
    /// Whether the field may be left out when it holds its empty value.
    pub omit_empty: bool,
}

impl FieldTag {
    /// Creates a tag for a field whose column name equals its own name.
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self {
            column: name,
            field: name,
            omit_empty: false,
        }
    }
}

/// Trait for types that can be named in annotated statements.
///
/// Usually implemented with `#[derive(Describable)]`:
///
/// ```ignore
/// #[derive(Describable)]
/// struct Person {
///     id: i64,
///     #[column(name = "address_id")]
///     address: i64,
/// }
/// ```
pub trait Describable {
    /// The name statements use for this type.
    const TYPE_NAME: &'static str;

    /// Column tags of the type's fields, in declaration order.
    const FIELDS: &'static [FieldTag];
}

/// Object-safe view of a [`Describable`] type.
///
/// Implemented for every `Describable + 'static` type, so values of
/// different types can be passed together as `&[&dyn Described]`.
pub trait Described {
    /// Identifies the concrete type, for caching.
    fn type_key(&self) -> TypeId;

    /// The name statements use for this type.
    fn type_name(&self) -> &'static str;

    /// Builds and validates the descriptor of the concrete type.
    ///
    /// # Errors
    ///
    /// Returns an error if the type's declaration is invalid.
    fn describe(&self) -> Result<Descriptor, DescriptorError>;
}

impl<T: Describable + 'static> Described for T {
    fn type_key(&self) -> TypeId {
        TypeId::of::<T>()
    }

    fn type_name(&self) -> &'static str {
        T::TYPE_NAME
    }

    fn describe(&self) -> Result<Descriptor, DescriptorError> {
        Descriptor::of::<T>()
    }
}

/// A column of a [`Descriptor`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Field {
    /// The column name statements refer to.
    pub column: String,
    /// The host field the column maps to.
    pub field: String,
    /// Whether the field may be left out when it holds its empty value.
    pub omit_empty: bool,
}

impl Field {
    /// Creates a field whose column name equals its own name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            column: name.clone(),
            field: name,
            omit_empty: false,
        }
    }
}

impl From<&FieldTag> for Field {
    fn from(tag: &FieldTag) -> Self {
        Self {
            column: tag.column.to_string(),
            field: tag.field.to_string(),
            omit_empty: tag.omit_empty,
        }
    }
}

/// A validated description of a record type: its name and columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Descriptor {
    name: String,
    fields: Vec<Field>,
}

impl Descriptor {
    /// Creates a descriptor, checking that the name and every column name
    /// are non-empty and that column names are unique.
    ///
    /// # Errors
    ///
    /// Returns the first problem found in the declaration.
    pub fn new(
        name: impl Into<String>,
        fields: impl IntoIterator<Item = Field>,
    ) -> Result<Self, DescriptorError> {
        let name = name.into();
        if name.is_empty() {
            return Err(DescriptorError::EmptyTypeName);
        }

        let mut checked: Vec<Field> = Vec::new();
        for field in fields {
            if field.column.is_empty() {
                return Err(DescriptorError::EmptyColumnName {
                    type_name: name,
                    field: field.field,
                });
            }
            if checked.iter().any(|f| f.column == field.column) {
                return Err(DescriptorError::DuplicateColumn {
                    type_name: name,
                    column: field.column,
                });
            }
            checked.push(field);
        }

        Ok(Self {
            name,
            fields: checked,
        })
    }

    /// Builds the descriptor of a [`Describable`] type.
    ///
    /// # Errors
    ///
    /// Returns an error if the type's declaration is invalid.
    pub fn of<T: Describable>() -> Result<Self, DescriptorError> {
        Self::new(T::TYPE_NAME, T::FIELDS.iter().map(Field::from))
    }

    /// The type name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The columns, in declaration order.
    #[must_use]
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// The column names, in declaration order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.column.as_str())
    }

    /// Looks up a column by name.
    #[must_use]
    pub fn field(&self, column: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.column == column)
    }

    /// Returns true if the type has a column with this name.
    #[must_use]
    pub fn has_field(&self, column: &str) -> bool {
        self.field(column).is_some()
    }
}

impl fmt::Display for Descriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        for (i, column) in self.field_names().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str(column)?;
        }
        f.write_str(")")
    }
}
