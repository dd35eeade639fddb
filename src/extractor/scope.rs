//! Enclosing-class tracking during the extraction walk
//!
//! A stack of class names is pushed on entering a class node and popped on
//! leaving it, so the tracker always knows the full enclosing-class path.
//! The legacy mode reproduces the single-slot behavior of older
//! deployments, where only the innermost class names a method's parent.

/// Tracks the enclosing class context during a depth-first walk
#[derive(Debug)]
pub(crate) struct ScopeTracker {
    classes: Vec<String>,
    legacy: bool,
}

impl ScopeTracker {
    pub(crate) fn new(legacy: bool) -> Self {
        Self {
            classes: Vec::new(),
            legacy,
        }
    }

    /// Enter a class subtree
    pub(crate) fn enter_class(&mut self, name: &str) {
        self.classes.push(name.to_string());
    }

    /// Leave the innermost class subtree
    pub(crate) fn exit_class(&mut self) {
        self.classes.pop();
    }

    /// Whether the walk is currently inside any class body
    pub(crate) fn in_class(&self) -> bool {
        !self.classes.is_empty()
    }

    /// Dot-joined path of enclosing classes, `None` at module scope
    ///
    /// In legacy mode only the innermost class is reported.
    pub(crate) fn enclosing_path(&self) -> Option<String> {
        if self.classes.is_empty() {
            None
        } else if self.legacy {
            self.classes.last().cloned()
        } else {
            Some(self.classes.join("."))
        }
    }

    /// Qualified name for a callable declared in the current scope
    pub(crate) fn qualify(&self, name: &str) -> String {
        match self.enclosing_path() {
            Some(path) => format!("{}.{}", path, name),
            None => name.to_string(),
        }
    }

    /// Qualified name for a class declared in the current scope
    ///
    /// Legacy mode never qualifies class names.
    pub(crate) fn qualify_class(&self, name: &str) -> String {
        if self.legacy {
            name.to_string()
        } else {
            self.qualify(name)
        }
    }
}
