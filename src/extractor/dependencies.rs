//! Syntactic dependency collection
//!
//! Gathers call-target names and attribute-access chains referenced inside
//! a callable subtree into one deduplicated set. This is a co-occurrence
//! signal; no name resolution is attempted.

use std::collections::BTreeSet;

use tree_sitter::Node;

use super::exprs::{attribute_chain, call_target};

/// Collect referenced call targets and attribute chains, sorted
///
/// The set is logically unordered; sorted output keeps re-parses diffable.
pub(crate) fn collect_dependencies(callable: Node<'_>, source: &str) -> Vec<String> {
    let mut found = BTreeSet::new();
    let mut stack = vec![callable];

    while let Some(node) = stack.pop() {
        match node.kind() {
            "call" => {
                if let Some(func) = node.child_by_field_name("function")
                    && let Some(target) = call_target(func, source)
                    && !target.is_empty()
                {
                    found.insert(target);
                }
            }
            "attribute" => {
                let chain = attribute_chain(node, source);
                if !chain.is_empty() {
                    found.insert(chain);
                }
            }
            _ => {}
        }

        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            stack.push(child);
        }
    }

    found.into_iter().collect()
}
