//! Cyclomatic-style complexity scoring
//!
//! A branch-counting approximation, not a control-flow-graph computation.
//! The counting rules are fixed for cross-implementation comparability and
//! must not be re-derived: every conditional, loop, exception-handling
//! block, and resource-scope block adds one, every handler clause adds one,
//! and a short-circuit chain of k operands adds k - 1 (each binary boolean
//! node counts once).

use tree_sitter::Node;

/// Complexity of a callable subtree, starting from the base score of 1.0
pub(crate) fn complexity_of(callable: Node<'_>) -> f64 {
    let mut score = 1.0;
    let mut stack = vec![callable];

    while let Some(node) = stack.pop() {
        match node.kind() {
            "if_statement" | "elif_clause" | "for_statement" | "while_statement"
            | "try_statement" | "with_statement" => score += 1.0,
            "boolean_operator" => score += 1.0,
            "except_clause" => score += 1.0,
            _ => {}
        }

        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            stack.push(child);
        }
    }

    score
}
