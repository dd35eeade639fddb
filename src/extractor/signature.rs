//! Canonical signature reconstruction for callables and classes
//!
//! Signatures must be byte-stable across re-parses so downstream change
//! detection can diff them; the construction order here is fixed and must
//! not be reordered.

use tree_sitter::Node;

use super::exprs::{node_text, render_annotation, render_default};
use crate::types::ParameterInfo;

/// How a scanned parameter participates in the signature
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ParamKind {
    Positional,
    VarArgs,
    KwArgs,
}

/// One scanned parameter, prior to rendering
#[derive(Debug, Clone)]
pub(crate) struct RawParam {
    pub(crate) name: String,
    pub(crate) annotation: Option<String>,
    pub(crate) default: Option<String>,
    pub(crate) kind: ParamKind,
}

/// Scan a `parameters` node into raw parameter records
///
/// Positional-only parameters (before `/`) and keyword-only parameters
/// (after a bare `*`) fall outside the positional model and are dropped;
/// `*args` and `**kwargs` are kept as variadic markers. Defaults arrive
/// attached to their parameter node, which realizes the right-aligned
/// defaults rule directly.
pub(crate) fn collect_parameters(parameters: Node<'_>, source: &str) -> Vec<RawParam> {
    let mut params: Vec<RawParam> = Vec::new();
    let mut keyword_only = false;

    let mut cursor = parameters.walk();
    for child in parameters.children(&mut cursor) {
        match child.kind() {
            "identifier" => {
                if keyword_only {
                    continue;
                }
                params.push(RawParam {
                    name: node_text(child, source).to_string(),
                    annotation: None,
                    default: None,
                    kind: ParamKind::Positional,
                });
            }
            "typed_parameter" => {
                let annotation = child
                    .child_by_field_name("type")
                    .map(|t| render_annotation(t, source));
                // a typed splat (`*args: int`) nests the pattern inside
                let (name, kind) = match child.named_child(0) {
                    Some(inner) if inner.kind() == "list_splat_pattern" => {
                        (splat_name(inner, source), ParamKind::VarArgs)
                    }
                    Some(inner) if inner.kind() == "dictionary_splat_pattern" => {
                        (splat_name(inner, source), ParamKind::KwArgs)
                    }
                    Some(inner) => (node_text(inner, source).to_string(), ParamKind::Positional),
                    None => continue,
                };
                if kind == ParamKind::Positional && keyword_only {
                    continue;
                }
                if kind == ParamKind::VarArgs {
                    keyword_only = true;
                }
                params.push(RawParam {
                    name,
                    annotation,
                    default: None,
                    kind,
                });
            }
            "default_parameter" | "typed_default_parameter" => {
                if keyword_only {
                    continue;
                }
                let Some(name) = child.child_by_field_name("name") else {
                    continue;
                };
                let annotation = child
                    .child_by_field_name("type")
                    .map(|t| render_annotation(t, source));
                let default = child
                    .child_by_field_name("value")
                    .map(|v| render_default(v, source));
                params.push(RawParam {
                    name: node_text(name, source).to_string(),
                    annotation,
                    default,
                    kind: ParamKind::Positional,
                });
            }
            "list_splat_pattern" => {
                params.push(RawParam {
                    name: splat_name(child, source),
                    annotation: None,
                    default: None,
                    kind: ParamKind::VarArgs,
                });
                keyword_only = true;
            }
            "dictionary_splat_pattern" => {
                params.push(RawParam {
                    name: splat_name(child, source),
                    annotation: None,
                    default: None,
                    kind: ParamKind::KwArgs,
                });
            }
            // bare `*`: everything after is keyword-only
            "keyword_separator" | "*" => keyword_only = true,
            // `/`: everything before was positional-only
            "positional_separator" | "/" => {
                params.retain(|p| p.kind != ParamKind::Positional);
            }
            _ => {}
        }
    }

    params
}

fn splat_name(pattern: Node<'_>, source: &str) -> String {
    pattern
        .named_child(0)
        .map(|n| node_text(n, source).to_string())
        .unwrap_or_else(|| node_text(pattern, source).trim_start_matches('*').to_string())
}

/// Build the canonical callable signature
///
/// `def name(a, b: int = 1, *args, **kwargs) -> ret:` with the keyword
/// chosen by sync/async. The trailing colon is part of the signature.
pub(crate) fn build_signature(
    name: &str,
    is_async: bool,
    params: &[RawParam],
    return_type: Option<&str>,
) -> String {
    let prefix = if is_async { "async def" } else { "def" };

    let rendered: Vec<String> = params
        .iter()
        .map(|param| {
            let marker = match param.kind {
                ParamKind::Positional => "",
                ParamKind::VarArgs => "*",
                ParamKind::KwArgs => "**",
            };
            let mut out = format!("{}{}", marker, param.name);
            if let Some(annotation) = &param.annotation {
                out.push_str(&format!(": {}", annotation));
            }
            if let Some(default) = &param.default {
                out.push_str(&format!(" = {}", default));
            }
            out
        })
        .collect();

    let mut signature = format!("{} {}({})", prefix, name, rendered.join(", "));
    if let Some(return_type) = return_type {
        signature.push_str(&format!(" -> {}", return_type));
    }
    signature.push(':');
    signature
}

/// Build the canonical class signature: `class Name:` or
/// `class Name(Base1, Base2):`
pub(crate) fn class_signature(name: &str, bases: &[String]) -> String {
    if bases.is_empty() {
        format!("class {}:", name)
    } else {
        format!("class {}({}):", name, bases.join(", "))
    }
}

/// Positional parameters as boundary records; variadics are signature-only
pub(crate) fn parameter_infos(params: &[RawParam]) -> Vec<ParameterInfo> {
    params
        .iter()
        .filter(|param| param.kind == ParamKind::Positional)
        .map(|param| ParameterInfo {
            name: param.name.clone(),
            param_type: param
                .annotation
                .clone()
                .unwrap_or_else(|| "Any".to_string()),
            required: param.default.is_none(),
            default: param.default.clone(),
        })
        .collect()
}
