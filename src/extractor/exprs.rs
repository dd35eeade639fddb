//! Rendering of expression nodes into canonical text
//!
//! Signatures, decorators, defaults, and dependencies all need small
//! textual renderings of expression subtrees. Every unrecognized shape
//! lands in an explicit fallback arm (`Any` for annotations, `...` for
//! defaults) so the lossy cases stay visible and testable.

use tree_sitter::Node;

/// Source text of a node
pub(crate) fn node_text<'a>(node: Node<'_>, source: &'a str) -> &'a str {
    node.utf8_text(source.as_bytes()).unwrap_or("")
}

/// Full dotted chain of an attribute access (e.g. `self.handler.flush`)
///
/// When the chain does not bottom out in a bare identifier (e.g.
/// `make().flush`) only the attribute parts are joined.
pub(crate) fn attribute_chain(node: Node<'_>, source: &str) -> String {
    let mut parts = Vec::new();
    let mut current = node;

    while current.kind() == "attribute" {
        if let Some(attr) = current.child_by_field_name("attribute") {
            parts.push(node_text(attr, source).to_string());
        }
        match current.child_by_field_name("object") {
            Some(object) => current = object,
            None => break,
        }
    }

    if current.kind() == "identifier" {
        parts.push(node_text(current, source).to_string());
    }

    parts.reverse();
    parts.join(".")
}

/// Name of a call target: bare identifier or dotted chain
///
/// Calls through anything else (subscripts, nested calls, lambdas) have no
/// usable name and yield `None`.
pub(crate) fn call_target(func: Node<'_>, source: &str) -> Option<String> {
    match func.kind() {
        "identifier" => Some(node_text(func, source).to_string()),
        "attribute" => Some(attribute_chain(func, source)),
        _ => None,
    }
}

/// Render a type annotation as canonical text
///
/// Simple names render as themselves, dotted names as the chain,
/// single-argument generics as `Base[Arg]`. Multi-argument bracket content
/// is not specially handled and falls through to `Any`, as does every
/// unrecognized expression shape.
pub(crate) fn render_annotation(node: Node<'_>, source: &str) -> String {
    match node.kind() {
        // the grammar wraps annotations in a `type` node
        "type" | "parenthesized_expression" => match node.named_child(0) {
            Some(inner) => render_annotation(inner, source),
            None => "Any".to_string(),
        },
        "identifier" => node_text(node, source).to_string(),
        "attribute" => attribute_chain(node, source),
        "member_type" => node_text(node, source).to_string(),
        "subscript" => {
            let base = match node.child_by_field_name("value") {
                Some(value) => render_annotation(value, source),
                None => "Any".to_string(),
            };
            let mut cursor = node.walk();
            let args: Vec<Node<'_>> = node
                .children_by_field_name("subscript", &mut cursor)
                .collect();
            let inner = match args.as_slice() {
                [only] => render_annotation(*only, source),
                _ => "Any".to_string(),
            };
            format!("{}[{}]", base, inner)
        }
        "generic_type" => {
            let base = match node.named_child(0) {
                Some(value) => render_annotation(value, source),
                None => "Any".to_string(),
            };
            let mut cursor = node.walk();
            let params: Vec<Node<'_>> = node
                .named_children(&mut cursor)
                .find(|c| c.kind() == "type_parameter")
                .map(|tp| {
                    let mut inner_cursor = tp.walk();
                    tp.named_children(&mut inner_cursor).collect()
                })
                .unwrap_or_default();
            let inner = match params.as_slice() {
                [only] => render_annotation(*only, source),
                _ => "Any".to_string(),
            };
            format!("{}[{}]", base, inner)
        }
        "string" | "integer" | "float" | "true" | "false" | "none" => {
            node_text(node, source).to_string()
        }
        // deliberate lossy fallback for unions, literals-with-operators, etc.
        _ => "Any".to_string(),
    }
}

/// Render a default value as canonical text
///
/// Literal constants render as written, identifiers as their name,
/// attribute chains dotted. Anything else renders as the placeholder
/// ellipsis, a deliberate lossy fallback rather than an error.
pub(crate) fn render_default(node: Node<'_>, source: &str) -> String {
    match node.kind() {
        "string" | "integer" | "float" | "true" | "false" | "none" => {
            node_text(node, source).to_string()
        }
        "identifier" => node_text(node, source).to_string(),
        "attribute" => attribute_chain(node, source),
        "parenthesized_expression" => match node.named_child(0) {
            Some(inner) => render_default(inner, source),
            None => "...".to_string(),
        },
        _ => "...".to_string(),
    }
}

/// Name of a decorator as written
///
/// `@name` yields the name, `@mod.attr` the dotted chain, `@factory(...)`
/// the call target. Exotic decorator expressions fall back to their
/// source text.
pub(crate) fn decorator_name(decorator: Node<'_>, source: &str) -> String {
    let Some(expr) = decorator.named_child(0) else {
        return String::new();
    };
    match expr.kind() {
        "identifier" => node_text(expr, source).to_string(),
        "attribute" => attribute_chain(expr, source),
        "call" => expr
            .child_by_field_name("function")
            .and_then(|func| call_target(func, source))
            .unwrap_or_default(),
        _ => node_text(expr, source).to_string(),
    }
}

/// Base-class names of a class in declaration order
///
/// Keyword arguments (e.g. `metaclass=...`) are not base classes and are
/// skipped.
pub(crate) fn base_class_names(argument_list: Node<'_>, source: &str) -> Vec<String> {
    let mut bases = Vec::new();
    let mut cursor = argument_list.walk();
    for child in argument_list.named_children(&mut cursor) {
        match child.kind() {
            "identifier" => bases.push(node_text(child, source).to_string()),
            "attribute" => bases.push(attribute_chain(child, source)),
            "keyword_argument" | "comment" => {}
            _ => bases.push(node_text(child, source).to_string()),
        }
    }
    bases
}

/// Leading documentation literal of a `def` or `class` body
///
/// Returns the cleaned string content, or an empty string when the first
/// body statement is not a string expression.
pub(crate) fn docstring_of(definition: Node<'_>, source: &str) -> String {
    let Some(body) = definition.child_by_field_name("body") else {
        return String::new();
    };
    let Some(first) = body.named_child(0) else {
        return String::new();
    };
    if first.kind() != "expression_statement" {
        return String::new();
    }
    let Some(expr) = first.named_child(0) else {
        return String::new();
    };
    if expr.kind() != "string" {
        return String::new();
    }
    clean_doc(&string_inner_text(expr, source))
}

/// Raw text between the opening and closing quote delimiters
fn string_inner_text(string: Node<'_>, source: &str) -> String {
    let mut start = None;
    let mut end = None;
    let mut cursor = string.walk();
    for child in string.children(&mut cursor) {
        match child.kind() {
            "string_start" => start = Some(child.end_byte()),
            "string_end" => end = Some(child.start_byte()),
            _ => {}
        }
    }
    match (start, end) {
        (Some(start), Some(end)) if start <= end => source[start..end].to_string(),
        _ => node_text(string, source).trim_matches(['"', '\'']).to_string(),
    }
}

/// Normalize a docstring: dedent continuation lines by their common
/// indentation and drop surrounding blank lines
fn clean_doc(raw: &str) -> String {
    let lines: Vec<&str> = raw.lines().collect();
    if lines.is_empty() {
        return String::new();
    }

    let indent = lines
        .iter()
        .skip(1)
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.len() - line.trim_start().len())
        .min()
        .unwrap_or(0);

    let mut cleaned: Vec<String> = Vec::with_capacity(lines.len());
    for (i, line) in lines.iter().enumerate() {
        if i == 0 {
            cleaned.push(line.trim_start().to_string());
        } else {
            let mut cut = 0;
            for ch in line.chars() {
                if cut >= indent || !ch.is_whitespace() {
                    break;
                }
                cut += ch.len_utf8();
            }
            cleaned.push(line[cut..].to_string());
        }
    }

    while cleaned.first().is_some_and(|line| line.trim().is_empty()) {
        cleaned.remove(0);
    }
    while cleaned.last().is_some_and(|line| line.trim().is_empty()) {
        cleaned.pop();
    }

    cleaned.join("\n").trim_end().to_string()
}
