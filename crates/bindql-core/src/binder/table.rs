//! The per-statement table of supplied type descriptors.

use std::sync::Arc;

use super::BindError;
use crate::schema::{Described, Descriptor, DescriptorSource};

/// Descriptors of the types supplied with a statement, unique by name and
/// kept in supply order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DescriptorTable {
    descriptors: Vec<Arc<Descriptor>>,
}

impl DescriptorTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the table for `args`, asking `source` for each descriptor.
    ///
    /// Stops at the first invalid declaration or repeated name.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Descriptor`] for an invalid declaration and
    /// [`BindError::TypeNameNotUnique`] for a repeated name.
    pub fn build<S>(source: &S, args: &[&dyn Described]) -> crate::Result<Self>
    where
        S: DescriptorSource + ?Sized,
    {
        let mut table = Self::new();
        for arg in args {
            table.insert(source.reflect(*arg)?)?;
        }
        Ok(table)
    }

    /// Builds a table from ready-made descriptors.
    ///
    /// # Errors
    ///
    /// Returns [`BindError::TypeNameNotUnique`] for a repeated name.
    pub fn from_descriptors<I>(descriptors: I) -> Result<Self, BindError>
    where
        I: IntoIterator,
        I::Item: Into<Arc<Descriptor>>,
    {
        let mut table = Self::new();
        for descriptor in descriptors {
            table.insert(descriptor.into())?;
        }
        Ok(table)
    }

    /// Adds a descriptor, rejecting a name that is already present.
    ///
    /// # Errors
    ///
    /// Returns [`BindError::TypeNameNotUnique`] for a repeated name.
    pub fn insert(&mut self, descriptor: Arc<Descriptor>) -> Result<(), BindError> {
        if self.contains(descriptor.name()) {
            return Err(BindError::TypeNameNotUnique(descriptor.name().to_string()));
        }
        self.descriptors.push(descriptor);
        Ok(())
    }

    /// Looks up a descriptor by type name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Arc<Descriptor>> {
        self.descriptors.iter().find(|d| d.name() == name)
    }

    /// Returns true if a type with this name was supplied.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// The type names, in supply order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.descriptors.iter().map(|d| d.name())
    }

    /// The descriptors, in supply order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<Descriptor>> {
        self.descriptors.iter()
    }

    /// Returns the number of descriptors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    /// Returns true if no types were supplied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}
