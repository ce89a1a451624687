//! Type binding.
//!
//! Checks that every type a statement names in an annotation was supplied,
//! and that every supplied type is named at least once.

mod error;
mod table;

use std::collections::HashSet;

use crate::ast::Expression;

pub use error::BindError;
pub use table::DescriptorTable;

/// Validates the annotations of a parsed statement against `table`.
///
/// The tree is walked in source order and the first annotation naming a type
/// missing from `table` is reported. Once the whole tree is walked, the first
/// supplied type (in supply order) that no annotation names is reported.
///
/// # Errors
///
/// Returns [`BindError::TypeInfoNotPresent`] or [`BindError::SuperfluousType`].
pub fn validate(root: &Expression, table: &DescriptorTable) -> Result<(), BindError> {
    let mut seen = HashSet::new();

    root.walk(|expr| {
        let Some(mapping) = expr.as_type_mapping() else {
            return Ok(());
        };
        let name = mapping.name();
        if !table.contains(name) {
            return Err(BindError::TypeInfoNotPresent(name.to_string()));
        }
        seen.insert(name);
        Ok(())
    })?;

    match table.names().find(|name| !seen.contains(name)) {
        Some(unused) => Err(BindError::SuperfluousType(unused.to_string())),
        None => Ok(()),
    }
}
