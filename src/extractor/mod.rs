//! Structure extraction: syntax tree to element catalog
//!
//! One depth-first walk per file drives scope tracking and element
//! assembly; signatures, docstrings, complexity, dependencies, and imports
//! are derived per node as the walk passes it. Walk state is created fresh
//! for every parse call and never stored on the extractor, so concurrent
//! parses can never observe each other's scope.

mod complexity;
mod dependencies;
mod exprs;
mod imports;
mod scope;
mod signature;
mod tree;

use std::path::Path;

use sha2::{Digest, Sha256};
use tree_sitter::{Node, Parser};

use crate::config::ExtractionConfig;
use crate::error::ExtractError;
use crate::language::Language;
use crate::types::{CodeElement, ElementType, FileAnalysis, Visibility};
use self::scope::ScopeTracker;

/// Per-call traversal state
///
/// Built fresh at the start of every parse so nothing leaks between calls
/// or threads.
struct WalkState {
    scopes: ScopeTracker,
    elements: Vec<CodeElement>,
    imports: Vec<String>,
}

impl WalkState {
    fn new(legacy_scope: bool) -> Self {
        Self {
            scopes: ScopeTracker::new(legacy_scope),
            elements: Vec::new(),
            imports: Vec::new(),
        }
    }
}

/// Extracts the structural catalog of a source file
///
/// One extractor handles one language. Parsing is synchronous and runs to
/// completion; a call either yields a complete [`FileAnalysis`] or an
/// error, never a partial result. Extractors are cheap to create; use a
/// fresh one per thread for cross-file parallelism.
pub struct StructureExtractor {
    language: Language,
    parser: Parser,
    config: ExtractionConfig,
}

impl StructureExtractor {
    /// Create an extractor for the given language with default settings
    pub fn new(language: Language) -> Result<Self, ExtractError> {
        Self::with_config(language, ExtractionConfig::default())
    }

    /// Create an extractor with explicit extraction settings
    pub fn with_config(
        language: Language,
        config: ExtractionConfig,
    ) -> Result<Self, ExtractError> {
        let mut parser = Parser::new();
        parser
            .set_language(&language.grammar())
            .map_err(|e| ExtractError::Grammar {
                language: language.name().to_string(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            language,
            parser,
            config,
        })
    }

    /// The language this extractor parses
    pub fn language(&self) -> Language {
        self.language
    }

    /// Read and analyze a source file
    pub fn parse_file(&mut self, path: impl AsRef<Path>) -> Result<FileAnalysis, ExtractError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ExtractError::FileNotFound(path.display().to_string()));
        }

        let bytes = std::fs::read(path).map_err(|e| ExtractError::Io {
            file: path.display().to_string(),
            reason: e.to_string(),
        })?;
        let content = String::from_utf8(bytes)
            .map_err(|_| ExtractError::Encoding(path.display().to_string()))?;

        self.parse_source(&content, &path.display().to_string())
    }

    /// Analyze source text
    ///
    /// `file_path` is a label used in error messages and the result's
    /// `file_path` field only.
    pub fn parse_source(
        &mut self,
        content: &str,
        file_path: &str,
    ) -> Result<FileAnalysis, ExtractError> {
        let tree = tree::build_tree(&mut self.parser, content, file_path)?;

        let mut state = WalkState::new(self.config.legacy_scope);
        self.walk(tree.root_node(), content, &mut state);

        tracing::debug!(
            "Extracted {} elements and {} imports from {}",
            state.elements.len(),
            state.imports.len(),
            file_path
        );

        Ok(FileAnalysis {
            file_path: file_path.to_string(),
            content: content.to_string(),
            content_hash: content_hash(content),
            elements: state.elements,
            imports: state.imports,
            global_variables: Vec::new(),
            line_count: content.bytes().filter(|b| *b == b'\n').count() + 1,
            file_size: content.len(),
        })
    }

    /// Depth-first pre-order walk over the tree
    ///
    /// Pre-order extraction keeps elements ordered by start line. The match
    /// covers exactly the node kinds extraction cares about; everything
    /// else just descends.
    fn walk(&self, node: Node<'_>, source: &str, state: &mut WalkState) {
        match node.kind() {
            "function_definition" => {
                if let Some(element) = self.extract_callable(node, source, state) {
                    state.elements.push(element);
                }
                self.walk_children(node, source, state);
            }
            "class_definition" => {
                let class_name = node
                    .child_by_field_name("name")
                    .map(|n| exprs::node_text(n, source).to_string());

                if let Some(element) = self.extract_class(node, source, state) {
                    state.elements.push(element);
                }

                match class_name {
                    Some(name) => {
                        state.scopes.enter_class(&name);
                        self.walk_children(node, source, state);
                        state.scopes.exit_class();
                    }
                    None => self.walk_children(node, source, state),
                }
            }
            "import_statement" | "import_from_statement" | "future_import_statement" => {
                imports::collect_import(node, source, &mut state.imports);
            }
            _ => self.walk_children(node, source, state),
        }
    }

    fn walk_children(&self, node: Node<'_>, source: &str, state: &mut WalkState) {
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            self.walk(child, source, state);
        }
    }

    /// Assemble one function or method element
    fn extract_callable(
        &self,
        node: Node<'_>,
        source: &str,
        state: &WalkState,
    ) -> Option<CodeElement> {
        let name_node = node.child_by_field_name("name")?;
        let name = exprs::node_text(name_node, source).to_string();

        let is_async = node.child(0).is_some_and(|c| c.kind() == "async");
        let in_class = state.scopes.in_class();
        let element_type = if in_class {
            ElementType::Method
        } else {
            ElementType::Function
        };
        let parent_class = if in_class {
            state.scopes.enclosing_path()
        } else {
            None
        };
        let full_name = state.scopes.qualify(&name);

        let raw_params = node
            .child_by_field_name("parameters")
            .map(|p| signature::collect_parameters(p, source))
            .unwrap_or_default();
        let return_annotation = node
            .child_by_field_name("return_type")
            .map(|r| exprs::render_annotation(r, source));
        let sig = signature::build_signature(
            &name,
            is_async,
            &raw_params,
            return_annotation.as_deref(),
        );

        let decorators = decorators_of(node, source);
        let is_static = decorators.iter().any(|d| d.contains("staticmethod"));
        let is_abstract = decorators.iter().any(|d| d.contains("abstractmethod"));

        Some(CodeElement {
            element_type,
            visibility: Visibility::from_name(&name),
            full_name,
            signature: sig,
            docstring: exprs::docstring_of(node, source),
            start_line: node.start_position().row + 1,
            end_line: node.end_position().row + 1,
            complexity_score: complexity::complexity_of(node),
            dependencies: dependencies::collect_dependencies(node, source),
            parameters: signature::parameter_infos(&raw_params),
            return_type: return_annotation.unwrap_or_else(|| "Any".to_string()),
            is_async,
            is_static,
            is_abstract,
            decorators,
            parent_class,
            name,
        })
    }

    /// Assemble one class element
    ///
    /// Base-class names stand in for the dependency walk, and the
    /// complexity is fixed at the base score; member complexity lives on
    /// the member elements.
    fn extract_class(
        &self,
        node: Node<'_>,
        source: &str,
        state: &WalkState,
    ) -> Option<CodeElement> {
        let name_node = node.child_by_field_name("name")?;
        let name = exprs::node_text(name_node, source).to_string();

        let bases = node
            .child_by_field_name("superclasses")
            .map(|s| exprs::base_class_names(s, source))
            .unwrap_or_default();

        let decorators = decorators_of(node, source);
        let is_abstract =
            bases.iter().any(|b| b == "ABC") || decorators.iter().any(|d| d.contains("abstract"));

        Some(CodeElement {
            element_type: ElementType::Class,
            visibility: Visibility::from_name(&name),
            full_name: state.scopes.qualify_class(&name),
            signature: signature::class_signature(&name, &bases),
            docstring: exprs::docstring_of(node, source),
            start_line: node.start_position().row + 1,
            end_line: node.end_position().row + 1,
            complexity_score: 1.0,
            dependencies: bases,
            parameters: Vec::new(),
            return_type: String::new(),
            is_async: false,
            is_static: false,
            is_abstract,
            decorators,
            parent_class: None,
            name,
        })
    }
}

/// Decorator names attached via an enclosing `decorated_definition`
fn decorators_of(definition: Node<'_>, source: &str) -> Vec<String> {
    let Some(parent) = definition.parent() else {
        return Vec::new();
    };
    if parent.kind() != "decorated_definition" {
        return Vec::new();
    }

    let mut names = Vec::new();
    let mut cursor = parent.walk();
    for child in parent.children(&mut cursor) {
        if child.kind() == "decorator" {
            names.push(exprs::decorator_name(child, source));
        }
    }
    names
}

/// SHA-256 hex digest of the exact source bytes
fn content_hash(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(source: &str) -> FileAnalysis {
        let mut extractor = StructureExtractor::new(Language::Python).unwrap();
        extractor.parse_source(source, "test.py").unwrap()
    }

    fn extract_legacy(source: &str) -> FileAnalysis {
        let config = ExtractionConfig {
            legacy_scope: true,
            ..ExtractionConfig::default()
        };
        let mut extractor = StructureExtractor::with_config(Language::Python, config).unwrap();
        extractor.parse_source(source, "test.py").unwrap()
    }

    #[test]
    fn test_documented_function_without_parameters() {
        let source = "def notify():\n    \"\"\"Does X.\"\"\"\n    return 1\n";
        let analysis = extract(source);
        assert_eq!(analysis.elements.len(), 1);

        let element = &analysis.elements[0];
        assert_eq!(element.element_type, ElementType::Function);
        assert_eq!(element.name, "notify");
        assert_eq!(element.full_name, "notify");
        assert_eq!(element.complexity_score, 1.0);
        assert_eq!(element.docstring, "Does X.");
        assert!(element.parameters.is_empty());
        assert_eq!(element.parent_class, None);
        assert_eq!(element.return_type, "Any");
    }

    #[test]
    fn test_class_with_method() {
        let source = r#"
class Widget:
    def resize(self, factor: float = 1.0):
        pass
"#;
        let analysis = extract(source);
        assert_eq!(analysis.elements.len(), 2);

        let class = &analysis.elements[0];
        assert_eq!(class.element_type, ElementType::Class);
        assert_eq!(class.full_name, "Widget");
        assert_eq!(class.signature, "class Widget:");
        assert_eq!(class.complexity_score, 1.0);
        assert_eq!(class.parent_class, None);

        let method = &analysis.elements[1];
        assert_eq!(method.element_type, ElementType::Method);
        assert_eq!(method.full_name, "Widget.resize");
        assert_eq!(method.parent_class.as_deref(), Some("Widget"));
        assert_eq!(
            method.signature,
            "def resize(self, factor: float = 1.0):"
        );
        assert_eq!(method.parameters.len(), 2);
        assert_eq!(method.parameters[0].name, "self");
        assert_eq!(method.parameters[0].param_type, "Any");
        assert!(method.parameters[0].required);
        assert_eq!(method.parameters[1].name, "factor");
        assert_eq!(method.parameters[1].param_type, "float");
        assert!(!method.parameters[1].required);
        assert_eq!(method.parameters[1].default.as_deref(), Some("1.0"));
    }

    #[test]
    fn test_branching_complexity() {
        let source = r#"
def guarded(a, b):
    if a and b:
        pass
    try:
        work()
    except ValueError:
        pass
"#;
        let analysis = extract(source);
        assert_eq!(analysis.elements[0].complexity_score, 5.0);
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let mut extractor = StructureExtractor::new(Language::Python).unwrap();
        let err = extractor
            .parse_file("/nonexistent/path/missing.py")
            .unwrap_err();
        assert!(matches!(err, ExtractError::FileNotFound(_)));
    }

    #[test]
    fn test_unbalanced_source_is_syntax_error() {
        let mut extractor = StructureExtractor::new(Language::Python).unwrap();
        let err = extractor
            .parse_source("def broken(:\n    pass\n", "bad.py")
            .unwrap_err();
        match err {
            ExtractError::Syntax { message, .. } => assert!(!message.is_empty()),
            other => panic!("expected syntax error, got {other}"),
        }
    }

    #[test]
    fn test_elements_ordered_by_start_line() {
        let source = r#"
def first():
    pass

class Second:
    def third(self):
        pass

def fourth():
    pass
"#;
        let analysis = extract(source);
        let names: Vec<&str> = analysis.elements.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["first", "Second", "third", "fourth"]);
        let lines: Vec<usize> = analysis.elements.iter().map(|e| e.start_line).collect();
        assert!(lines.windows(2).all(|w| w[0] <= w[1]));
        assert!(analysis.elements.iter().all(|e| e.start_line <= e.end_line));
    }

    #[test]
    fn test_idempotent_reparse() {
        let source = "import os\n\ndef f(a, b=2):\n    return os.path.join(a, b)\n";
        let first = extract(source);
        let second = extract(source);
        assert_eq!(first, second);
    }

    #[test]
    fn test_single_byte_change_flips_hash() {
        let first = extract("x = 1\n");
        let second = extract("x = 2\n");
        assert_ne!(first.content_hash, second.content_hash);
        assert_eq!(first.content_hash.len(), 64);
    }

    #[test]
    fn test_visibility_rules() {
        let source = r#"
class Widget:
    def __init__(self):
        pass

    def __hidden(self):
        pass

    def _guarded(self):
        pass

    def open(self):
        pass
"#;
        let analysis = extract(source);
        let by_name = |name: &str| {
            analysis
                .elements
                .iter()
                .find(|e| e.name == name)
                .unwrap()
                .visibility
        };
        assert_eq!(by_name("__init__"), Visibility::Public);
        assert_eq!(by_name("__hidden"), Visibility::Private);
        assert_eq!(by_name("_guarded"), Visibility::Protected);
        assert_eq!(by_name("open"), Visibility::Public);
    }

    #[test]
    fn test_nested_class_qualification() {
        let source = r#"
class Outer:
    class Inner:
        def ping(self):
            pass
"#;
        let analysis = extract(source);
        let full_names: Vec<&str> = analysis
            .elements
            .iter()
            .map(|e| e.full_name.as_str())
            .collect();
        assert_eq!(full_names, vec!["Outer", "Outer.Inner", "Outer.Inner.ping"]);

        let ping = &analysis.elements[2];
        assert_eq!(ping.parent_class.as_deref(), Some("Outer.Inner"));
        assert_eq!(
            ping.full_name,
            format!("{}.{}", ping.parent_class.as_deref().unwrap(), ping.name)
        );
    }

    #[test]
    fn test_nested_class_legacy_mode() {
        let source = r#"
class Outer:
    class Inner:
        def ping(self):
            pass
"#;
        let analysis = extract_legacy(source);
        let full_names: Vec<&str> = analysis
            .elements
            .iter()
            .map(|e| e.full_name.as_str())
            .collect();
        assert_eq!(full_names, vec!["Outer", "Inner", "Inner.ping"]);
        assert_eq!(analysis.elements[2].parent_class.as_deref(), Some("Inner"));
    }

    #[test]
    fn test_async_and_decorators() {
        let source = r#"
class Service:
    @staticmethod
    def build():
        pass

    @abc.abstractmethod
    def handle(self):
        pass

    async def run(self):
        pass
"#;
        let analysis = extract(source);
        let by_name = |name: &str| analysis.elements.iter().find(|e| e.name == name).unwrap();

        let build = by_name("build");
        assert!(build.is_static);
        assert!(!build.is_abstract);
        assert_eq!(build.decorators, vec!["staticmethod"]);

        let handle = by_name("handle");
        assert!(handle.is_abstract);
        assert_eq!(handle.decorators, vec!["abc.abstractmethod"]);

        let run = by_name("run");
        assert!(run.is_async);
        assert_eq!(run.signature, "async def run(self):");
    }

    #[test]
    fn test_class_bases_and_abstractness() {
        let source = r#"
class Shape(ABC):
    pass

class Circle(Shape, mixins.Drawable):
    pass
"#;
        let analysis = extract(source);

        let shape = &analysis.elements[0];
        assert!(shape.is_abstract);
        assert_eq!(shape.dependencies, vec!["ABC"]);
        assert_eq!(shape.signature, "class Shape(ABC):");

        let circle = &analysis.elements[1];
        assert!(!circle.is_abstract);
        assert_eq!(circle.dependencies, vec!["Shape", "mixins.Drawable"]);
        assert_eq!(circle.signature, "class Circle(Shape, mixins.Drawable):");
    }

    #[test]
    fn test_return_annotation_rendering() {
        let source = r#"
def plain() -> None:
    pass

def generic(items) -> List[int]:
    pass

def dotted() -> np.ndarray:
    pass

def lossy() -> Dict[str, int]:
    pass
"#;
        let analysis = extract(source);
        let by_name = |name: &str| {
            analysis
                .elements
                .iter()
                .find(|e| e.name == name)
                .unwrap()
                .return_type
                .as_str()
        };
        assert_eq!(by_name("plain"), "None");
        assert_eq!(by_name("generic"), "List[int]");
        assert_eq!(by_name("dotted"), "np.ndarray");
        assert_eq!(by_name("lossy"), "Dict[Any]");
    }

    #[test]
    fn test_variadic_signature() {
        let source = "def spread(first, *rest, **options):\n    pass\n";
        let analysis = extract(source);
        let element = &analysis.elements[0];
        assert_eq!(element.signature, "def spread(first, *rest, **options):");
        // variadics are signature-only
        assert_eq!(element.parameters.len(), 1);
    }

    #[test]
    fn test_dependencies_of_nested_calls() {
        let source = r#"
def sync(client):
    payload = build_payload()
    client.session.post(payload)
"#;
        let analysis = extract(source);
        assert_eq!(
            analysis.elements[0].dependencies,
            vec![
                "build_payload",
                "client.session",
                "client.session.post",
            ]
        );
    }

    #[test]
    fn test_imports_collected_anywhere_in_walk() {
        let source = r#"
import os

def lazy():
    import json
    return json
"#;
        let analysis = extract(source);
        assert_eq!(analysis.imports, vec!["os", "json"]);
    }

    #[test]
    fn test_file_metadata() {
        let source = "x = 1\ny = 2\n";
        let analysis = extract(source);
        assert_eq!(analysis.file_path, "test.py");
        assert_eq!(analysis.content, source);
        assert_eq!(analysis.line_count, 3);
        assert_eq!(analysis.file_size, source.len());
        assert!(analysis.global_variables.is_empty());
        assert!(analysis.elements.is_empty());
    }

    #[test]
    fn test_nested_function_inside_method_is_method() {
        let source = r#"
class Widget:
    def outer(self):
        def inner():
            pass
        return inner
"#;
        let analysis = extract(source);
        let inner = analysis.elements.iter().find(|e| e.name == "inner").unwrap();
        assert_eq!(inner.element_type, ElementType::Method);
        assert_eq!(inner.parent_class.as_deref(), Some("Widget"));
        assert_eq!(inner.full_name, "Widget.inner");
    }
}
