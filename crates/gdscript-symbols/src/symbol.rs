use gdscript_syntax::ElementId;

use crate::kind::SymbolKind;

/// Annotation metadata attached to a symbol's declaration (`@export`,
/// `@onready`, spec.md §4.4).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SymbolAnnotations {
    pub exported: bool,
    pub onready: bool,
}

/// A declared name: `(name, kind, declaration_node, declared_type_hint?)`
/// (spec.md §3).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    pub name: String,
    pub kind: SymbolKind,
    pub declaration_node: ElementId,
    pub declared_type_hint: Option<String>,
    pub annotations: SymbolAnnotations,
}

impl Symbol {
    pub fn new(name: impl Into<String>, kind: SymbolKind, declaration_node: ElementId) -> Self {
        Self {
            name: name.into(),
            kind,
            declaration_node,
            declared_type_hint: None,
            annotations: SymbolAnnotations::default(),
        }
    }

    pub fn with_type_hint(mut self, hint: impl Into<String>) -> Self {
        self.declared_type_hint = Some(hint.into());
        self
    }

    pub fn with_annotations(mut self, annotations: SymbolAnnotations) -> Self {
        self.annotations = annotations;
        self
    }
}
