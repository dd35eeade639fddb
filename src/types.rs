use serde::{Deserialize, Serialize};

/// Kind of structural unit found in a source file
///
/// `Module` and `Variable` are reserved for future extraction rules and are
/// never produced by the current walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementType {
    Function,
    Method,
    Class,
    Module,
    Variable,
}

/// Visibility derived from the element's naming convention
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public,
    Protected,
    Private,
}

impl Visibility {
    /// Derive visibility from an identifier
    ///
    /// Dunder names (`__init__`) are public; `__`-prefixed names are
    /// private; `_`-prefixed names are protected; everything else is public.
    pub fn from_name(name: &str) -> Self {
        if name.starts_with("__") && name.ends_with("__") {
            Visibility::Public
        } else if name.starts_with("__") {
            Visibility::Private
        } else if name.starts_with('_') {
            Visibility::Protected
        } else {
            Visibility::Public
        }
    }
}

/// One declared parameter of a callable
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterInfo {
    /// Parameter name as declared
    pub name: String,
    /// Rendered type annotation, "Any" when unannotated
    #[serde(rename = "type")]
    pub param_type: String,
    /// Whether the parameter must be supplied (no default value)
    pub required: bool,
    /// Rendered default value, absent when the parameter has none
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
}

/// One structural unit extracted from a source file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodeElement {
    /// Kind of element (function, method, class)
    pub element_type: ElementType,
    /// Unqualified identifier
    pub name: String,
    /// Qualified name; `<enclosing_class>.<name>` for methods, otherwise
    /// equal to `name`
    pub full_name: String,
    /// Canonical reconstructed signature
    pub signature: String,
    /// Leading documentation literal, empty string if absent
    pub docstring: String,
    /// 1-based first source line of the element
    pub start_line: usize,
    /// 1-based last source line of the element (inclusive)
    pub end_line: usize,
    /// Cyclomatic-style complexity, >= 1.0
    pub complexity_score: f64,
    /// Referenced call targets and attribute chains, deduplicated and
    /// sorted for reproducible output
    pub dependencies: Vec<String>,
    /// Declared parameters in declaration order
    pub parameters: Vec<ParameterInfo>,
    /// Rendered return annotation, "Any" when unannotated
    pub return_type: String,
    /// Visibility derived from the naming convention
    pub visibility: Visibility,
    /// Whether the callable was declared async
    pub is_async: bool,
    /// Whether a staticmethod-style decorator is attached
    pub is_static: bool,
    /// Whether the element is abstract (decorator or ABC base)
    pub is_abstract: bool,
    /// Decorator names as written, in declaration order
    pub decorators: Vec<String>,
    /// Enclosing class path; present if and only if this is a method
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_class: Option<String>,
}

/// Complete structural analysis of one source file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileAnalysis {
    /// Path label for the analyzed file
    pub file_path: String,
    /// Raw source text
    pub content: String,
    /// SHA-256 hex digest of the exact source bytes
    pub content_hash: String,
    /// Extracted elements, ordered by start line
    pub elements: Vec<CodeElement>,
    /// Import declarations as dotted names, in declaration order,
    /// duplicates preserved
    pub imports: Vec<String>,
    /// Module-level variable names; reserved extension point, always empty
    pub global_variables: Vec<String>,
    /// Number of source lines (newline count + 1)
    pub line_count: usize,
    /// Source size in bytes
    pub file_size: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_element() -> CodeElement {
        CodeElement {
            element_type: ElementType::Method,
            name: "resize".to_string(),
            full_name: "Widget.resize".to_string(),
            signature: "def resize(self, factor: float = 1.0):".to_string(),
            docstring: String::new(),
            start_line: 3,
            end_line: 5,
            complexity_score: 1.0,
            dependencies: vec![],
            parameters: vec![
                ParameterInfo {
                    name: "self".to_string(),
                    param_type: "Any".to_string(),
                    required: true,
                    default: None,
                },
                ParameterInfo {
                    name: "factor".to_string(),
                    param_type: "float".to_string(),
                    required: false,
                    default: Some("1.0".to_string()),
                },
            ],
            return_type: "Any".to_string(),
            visibility: Visibility::Public,
            is_async: false,
            is_static: false,
            is_abstract: false,
            decorators: vec![],
            parent_class: Some("Widget".to_string()),
        }
    }

    #[test]
    fn test_visibility_from_name() {
        assert_eq!(Visibility::from_name("__init__"), Visibility::Public);
        assert_eq!(Visibility::from_name("__secret"), Visibility::Private);
        assert_eq!(Visibility::from_name("_helper"), Visibility::Protected);
        assert_eq!(Visibility::from_name("run"), Visibility::Public);
    }

    #[test]
    fn test_element_type_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&ElementType::Function).unwrap(),
            "\"function\""
        );
        assert_eq!(
            serde_json::to_string(&ElementType::Class).unwrap(),
            "\"class\""
        );
    }

    #[test]
    fn test_parameter_default_absent_when_none() {
        let param = ParameterInfo {
            name: "self".to_string(),
            param_type: "Any".to_string(),
            required: true,
            default: None,
        };
        let json = serde_json::to_string(&param).unwrap();
        assert!(!json.contains("default"));
        assert!(json.contains("\"type\":\"Any\""));
    }

    #[test]
    fn test_element_serialization_roundtrip() {
        let element = sample_element();
        let json = serde_json::to_string(&element).unwrap();
        let back: CodeElement = serde_json::from_str(&json).unwrap();
        assert_eq!(element, back);
    }

    #[test]
    fn test_method_full_name_invariant() {
        let element = sample_element();
        let parent = element.parent_class.as_deref().unwrap();
        assert_eq!(element.full_name, format!("{}.{}", parent, element.name));
    }

    #[test]
    fn test_file_analysis_roundtrip() {
        let analysis = FileAnalysis {
            file_path: "pkg/widget.py".to_string(),
            content: "x = 1\n".to_string(),
            content_hash: "ab".repeat(32),
            elements: vec![sample_element()],
            imports: vec!["os".to_string(), "os".to_string()],
            global_variables: vec![],
            line_count: 2,
            file_size: 6,
        };
        let json = serde_json::to_string(&analysis).unwrap();
        let back: FileAnalysis = serde_json::from_str(&json).unwrap();
        assert_eq!(analysis, back);
        // duplicate imports are a log of declarations, not a set
        assert_eq!(back.imports.len(), 2);
    }
}
