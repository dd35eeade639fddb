//! Import declaration collection
//!
//! Imports are a log of declarations, not a set: declaration order is
//! preserved and duplicates are kept. Aliases record the original module
//! name, wildcard imports record `<module>.*`, and relative-import dots
//! are stripped from the module part.

use tree_sitter::Node;

use super::exprs::node_text;

/// Record the dotted names declared by one import statement
pub(crate) fn collect_import(node: Node<'_>, source: &str, imports: &mut Vec<String>) {
    match node.kind() {
        "import_statement" => {
            let mut cursor = node.walk();
            for name in node.children_by_field_name("name", &mut cursor) {
                imports.push(imported_name(name, source));
            }
        }
        "import_from_statement" | "future_import_statement" => {
            let module = match node.child_by_field_name("module_name") {
                Some(module_name) => node_text(module_name, source)
                    .trim_start_matches('.')
                    .to_string(),
                // `from __future__ import ...` carries no module_name field
                None => "__future__".to_string(),
            };

            if named_child_of_kind(node, "wildcard_import").is_some() {
                imports.push(format!("{}.*", module));
                return;
            }

            let mut cursor = node.walk();
            for name in node.children_by_field_name("name", &mut cursor) {
                imports.push(format!("{}.{}", module, imported_name(name, source)));
            }
        }
        _ => {}
    }
}

/// Original dotted name of an import target, seeing through `as` aliases
fn imported_name(name: Node<'_>, source: &str) -> String {
    if name.kind() == "aliased_import" {
        name.child_by_field_name("name")
            .map(|n| node_text(n, source).to_string())
            .unwrap_or_default()
    } else {
        node_text(name, source).to_string()
    }
}

fn named_child_of_kind<'a>(node: Node<'a>, kind: &str) -> Option<Node<'a>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor).find(|c| c.kind() == kind)
}
