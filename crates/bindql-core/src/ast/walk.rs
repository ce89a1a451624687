//! Depth-first traversal of the expression tree.

use super::Expression;

/// Visits `node` and then its descendants, depth-first and pre-order.
///
/// `visit` is called on a node before any of its children. The first `Err`
/// it returns stops the traversal immediately: no further siblings or
/// ancestors' siblings are visited, and the error is handed back to the
/// caller. Returning an error is also how a search signals "found".
///
/// # Errors
///
/// Returns the first error produced by `visit`.
pub fn walk<'a, E, F>(node: &'a Expression, visit: &mut F) -> Result<(), E>
where
    F: FnMut(&'a Expression) -> Result<(), E>,
{
    visit(node)?;
    for child in node.children() {
        walk(child, visit)?;
    }
    Ok(())
}
