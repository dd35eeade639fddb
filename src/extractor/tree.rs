//! Source text to syntax tree, all-or-nothing
//!
//! A file either yields a complete tree or a syntax error carrying the
//! offending location; partial trees never leave this module.

use tree_sitter::{Node, Parser, Tree};

use crate::error::ExtractError;

/// Parse source text into a syntax tree
///
/// Fails with `ExtractError::Syntax` when the grammar rejects the input;
/// the error carries the 1-based line and column of the first offending
/// node and a non-empty message.
pub(crate) fn build_tree(
    parser: &mut Parser,
    source: &str,
    file_path: &str,
) -> Result<Tree, ExtractError> {
    let tree = parser.parse(source, None).ok_or_else(|| ExtractError::Syntax {
        path: file_path.to_string(),
        line: 1,
        column: 1,
        message: "parser produced no tree".to_string(),
    })?;

    let root = tree.root_node();
    if root.has_error() {
        let (line, column, message) = match first_error_node(root) {
            Some(node) => {
                let point = node.start_position();
                let message = if node.is_missing() {
                    format!("missing {}", node.kind())
                } else {
                    "invalid syntax".to_string()
                };
                (point.row + 1, point.column + 1, message)
            }
            None => (1, 1, "invalid syntax".to_string()),
        };
        return Err(ExtractError::Syntax {
            path: file_path.to_string(),
            line,
            column,
            message,
        });
    }

    Ok(tree)
}

/// First error or missing node in document order
///
/// Only subtrees flagged with `has_error` are descended, so well-formed
/// regions are skipped wholesale.
fn first_error_node(node: Node<'_>) -> Option<Node<'_>> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    if !node.has_error() {
        return None;
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if let Some(found) = first_error_node(child) {
            return Some(found);
        }
    }
    None
}
