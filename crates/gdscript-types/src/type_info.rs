use crate::confidence::Confidence;
use crate::semantic_type::SemanticType;

/// `{declared_type?, inferred_type, effective_type, confidence, nullable,
/// potentially_null, is_union, union_members?, container_element_type?,
/// container_key_type?}` (spec.md §3).
///
/// `effective_type` here is the flow-agnostic reduction
/// `declared_type ?? inferred_type ?? variant`; the full formula
/// `narrowed_type ?? declared_type ?? inferred_type ?? variant` is applied
/// by `gdscript-flow`, which holds the narrowing context this crate does
/// not depend on (spec.md §2's dependency order).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeInfo {
    pub declared_type: Option<SemanticType>,
    pub inferred_type: Option<SemanticType>,
    pub confidence: Confidence,
    pub nullable: bool,
    pub potentially_null: bool,
}

impl TypeInfo {
    pub fn new(declared_type: Option<SemanticType>, inferred_type: Option<SemanticType>, confidence: Confidence) -> Self {
        Self { declared_type, inferred_type, confidence, nullable: false, potentially_null: false }
    }

    /// `declared_type ?? inferred_type ?? variant`, without flow narrowing.
    pub fn effective_type(&self) -> SemanticType {
        self.declared_type
            .clone()
            .or_else(|| self.inferred_type.clone())
            .unwrap_or_else(SemanticType::variant)
    }

    pub fn is_union(&self) -> bool {
        self.effective_type().is_union()
    }

    pub fn union_members(&self) -> Option<Vec<SemanticType>> {
        self.effective_type().union_members().map(|m| m.to_vec())
    }

    pub fn container_element_type(&self) -> Option<SemanticType> {
        self.effective_type().element_type()
    }

    pub fn container_key_type(&self) -> Option<SemanticType> {
        self.effective_type().key_type()
    }

    pub fn mark_nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    pub fn mark_potentially_null(mut self) -> Self {
        self.potentially_null = true;
        self
    }
}
